use crate::engine::{GoalValidation, PeriodSummary, ScoreBreakdown};
use crate::models::{ConsumptionRecord, MealType, Nutrient, NutritionGoal, NutritionInfo};

/// Display a parsed nutrition record.
pub fn display_nutrition(info: &NutritionInfo) {
    for nutrient in Nutrient::ALL {
        println!("  {:<9} {:>7.1} {}", nutrient, info.get(nutrient), nutrient.unit());
    }
}

/// Display a sustainability score with its modifiers.
pub fn display_score(breakdown: &ScoreBreakdown, profile: &str) {
    println!("Sustainability score: {} / 100 ({} profile)", breakdown.score(), profile);
    println!();
    println!("  base       +50");
    let rows = [
        ("protein", breakdown.protein),
        ("carbs", breakdown.carbs),
        ("fat", breakdown.fat),
        ("calories", breakdown.calories),
        ("packaging", breakdown.packaging),
        ("carbon", breakdown.carbon),
    ];
    for (label, points) in rows {
        if points != 0 {
            println!("  {:<10} {:+}", label, points);
        }
    }
}

/// Display the outcome of a goal check.
pub fn display_validation(result: &GoalValidation) {
    let Some(report) = result.report() else {
        println!("No daily goal set; nothing to exceed.");
        return;
    };

    println!();
    println!("=== Daily Goal Check ===");
    println!();

    for nutrient in Nutrient::ALL {
        let flag = if report.exceeds.get(nutrient) { "  OVER" } else { "" };
        println!(
            "  {:<9} {:>7.0} / {:<7.0} {:<4} {:>4}%{}",
            nutrient,
            report.projected.get(nutrient),
            report.targets.get(nutrient),
            nutrient.unit(),
            report.percentages.get(nutrient),
            flag
        );
    }

    println!();
    if report.is_valid() {
        println!("Within today's goal.");
    } else {
        for over in report.exceeded_nutrients() {
            println!(
                "Exceeds {} by {:.0} {}",
                over.nutrient,
                over.overage,
                over.nutrient.unit()
            );
        }
    }
}

/// Display the active goal.
pub fn display_goal(goal: Option<&NutritionGoal>) {
    match goal {
        None => println!("No daily goal set."),
        Some(goal) => {
            println!("Daily goal:");
            display_nutrition(&goal.targets());
            println!("  {} day(s) of progress logged", goal.progress.len());
        }
    }
}

/// Display a logged consumption record.
pub fn display_consumption(record: &ConsumptionRecord, recipe_name: &str) {
    println!(
        "Logged {} x {} for {} on {}: {}",
        record.servings,
        recipe_name,
        record.meal_type,
        record.consumed_on(),
        record.total_nutrition()
    );
}

/// Display a period summary in a formatted table.
pub fn display_summary(summary: &PeriodSummary, goal: Option<&NutritionGoal>) {
    println!();
    match summary.meal_type_filter {
        Some(meal) => println!(
            "=== {} to {} ({} only) ===",
            summary.range.start, summary.range.end, meal
        ),
        None => println!("=== {} to {} ===", summary.range.start, summary.range.end),
    }
    println!();
    println!(
        "{:<12} {:>8} {:>8} {:>8} {:>8}",
        "date", "kcal", "protein", "carbs", "fat"
    );

    for day in &summary.per_day {
        let done = if day.logged.is_some_and(|l| l.completed) { "  *" } else { "" };
        println!(
            "{:<12} {:>8.0} {:>8.0} {:>8.0} {:>8.0}{}",
            day.date.to_string(),
            day.nutrition.calories,
            day.nutrition.protein,
            day.nutrition.carbs,
            day.nutrition.fat,
            done
        );
    }

    let avg = &summary.averages;
    println!();
    println!(
        "{:<12} {:>8.0} {:>8.0} {:>8.0} {:>8.0}",
        "average", avg.calories, avg.protein, avg.carbs, avg.fat
    );

    if let Some(goal) = goal {
        let adherence = summary.goal_adherence(goal);
        println!(
            "{:<12} {:>7}% {:>7}% {:>7}% {:>7}%",
            "of goal",
            adherence[&Nutrient::Calories],
            adherence[&Nutrient::Protein],
            adherence[&Nutrient::Carbs],
            adherence[&Nutrient::Fat]
        );
        println!("Goal completed on {} day(s)", summary.completed_days());
    }

    println!();
    println!("--- Meals ---");
    if summary.meal_distribution.is_empty() {
        println!("(none logged)");
    }
    for meal in MealType::ALL {
        if let Some(count) = summary.meal_distribution.get(&meal) {
            println!("  {:<10} {}", meal.to_string(), count);
        }
    }
    println!();
}
