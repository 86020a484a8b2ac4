use std::path::Path;

use chrono::{Local, NaiveDate};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use pantry_nutrition::cli::{Cli, Command, PeriodArgs, ScoreProfile};
use pantry_nutrition::engine::{
    ScoreBreakdown, aggregate_period, parse_nutrition_lines, parse_nutrition_text,
};
use pantry_nutrition::error::{NutriError, Result};
use pantry_nutrition::interface::{
    display_consumption, display_goal, display_nutrition, display_score, display_summary,
    display_validation, prompt_goal, prompt_meal_type, prompt_recipe, prompt_servings,
    prompt_yes_no, write_summary_csv,
};
use pantry_nutrition::logging::init_logging;
use pantry_nutrition::models::{CarbonFootprint, MealType, NutritionGoal, NutritionInfo, Packaging};
use pantry_nutrition::state::{HouseholdState, HouseholdStore, load_state, save_state};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let json = cli.json;
    let file = cli.file.clone();
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Parse { text } => cmd_parse(&text, json),
        Command::Score {
            calories,
            protein,
            carbs,
            fat,
            from_text,
            profile,
            packaging,
            carbon,
        } => {
            let nutrition = match from_text {
                Some(text) => parse_nutrition_text(&text),
                None => NutritionInfo::new(calories, protein, carbs, fat),
            };
            cmd_score(&nutrition, profile, packaging, carbon, json)
        }
        Command::Goal {
            calories,
            protein,
            carbs,
            fat,
            interactive,
        } => cmd_goal(&file, [calories, protein, carbs, fat], interactive, json),
        Command::Check {
            recipe,
            servings,
            date,
        } => cmd_check(&file, &recipe, servings, date.unwrap_or_else(today), json),
        Command::Log {
            recipe,
            servings,
            meal,
            yes,
        } => cmd_log(&file, recipe, servings, meal, yes),
        Command::Summary { period } => cmd_summary(&file, &period, json),
        Command::Export { period, out } => cmd_export(&file, &period, &out),
        Command::Rescore => cmd_rescore(&file),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse free text into nutrition values, one record per line of input.
fn cmd_parse(text: &str, json: bool) -> Result<()> {
    let parsed = if text.contains('\n') {
        parse_nutrition_lines(text)
    } else {
        vec![parse_nutrition_text(text)]
    };

    if json {
        return match parsed.as_slice() {
            [single] => print_json(single),
            _ => print_json(&parsed),
        };
    }
    if parsed.iter().all(NutritionInfo::is_zero) {
        println!("No nutrition values found.");
        return Ok(());
    }
    for (i, info) in parsed.iter().enumerate() {
        if parsed.len() > 1 {
            println!("Item {}:", i + 1);
        }
        display_nutrition(info);
    }
    Ok(())
}

/// Score a nutrition record.
fn cmd_score(
    nutrition: &NutritionInfo,
    profile: ScoreProfile,
    packaging: Option<Packaging>,
    carbon: Option<CarbonFootprint>,
    json: bool,
) -> Result<()> {
    if !nutrition.is_valid() {
        return Err(NutriError::InvalidInput(
            "Nutrition values must be non-negative".to_string(),
        ));
    }

    let bands = profile.bands();
    let breakdown = ScoreBreakdown::compute(nutrition, &bands, packaging, carbon);

    if json {
        return print_json(&serde_json::json!({
            "score": breakdown.score(),
            "profile": bands.name,
            "breakdown": breakdown,
        }));
    }
    display_score(&breakdown, bands.name);
    Ok(())
}

/// Load the household state, or start empty when the file does not exist yet.
fn load_or_default(file: &Path) -> Result<HouseholdState> {
    match load_state(file) {
        Ok(state) => Ok(state),
        Err(NutriError::StateNotFound(path)) => {
            warn!(%path, "state file not found, starting empty");
            Ok(HouseholdState::default())
        }
        Err(e) => Err(e),
    }
}

/// Show or update the daily goal.
fn cmd_goal(file: &Path, targets: [Option<f64>; 4], interactive: bool, json: bool) -> Result<()> {
    let mut store = HouseholdStore::new(load_or_default(file)?);

    let new_goal = if interactive {
        Some(prompt_goal(store.goal())?)
    } else if targets.iter().any(Option::is_some) {
        let current = store
            .goal()
            .map(NutritionGoal::targets)
            .unwrap_or_default();
        let [calories, protein, carbs, fat] = targets;
        Some(NutritionGoal::new(
            calories.unwrap_or(current.calories),
            protein.unwrap_or(current.protein),
            carbs.unwrap_or(current.carbs),
            fat.unwrap_or(current.fat),
        ))
    } else {
        None
    };

    if let Some(goal) = new_goal {
        store.set_goal(goal)?;
        save_state(file, store.state())?;
        println!("Goal saved.");
    }

    if json {
        return print_json(&store.goal());
    }
    display_goal(store.goal());
    Ok(())
}

/// Check a recipe against the goal without logging it.
fn cmd_check(file: &Path, recipe: &str, servings: f64, date: NaiveDate, json: bool) -> Result<()> {
    let store = HouseholdStore::new(load_state(file)?);
    let result = store.check_recipe(recipe, servings, date)?;

    if json {
        return print_json(&result);
    }
    display_validation(&result);
    Ok(())
}

/// Log a recipe as eaten, warning first if it breaks the goal.
fn cmd_log(
    file: &Path,
    recipe: Option<String>,
    servings: Option<f64>,
    meal: Option<MealType>,
    yes: bool,
) -> Result<()> {
    let mut store = HouseholdStore::new(load_state(file)?);

    if store.recipes().is_empty() {
        println!("No recipes in {}.", file.display());
        return Ok(());
    }

    let recipe_id = match recipe {
        Some(r) => r,
        None => match prompt_recipe(store.recipes())? {
            Some(id) => id,
            None => return Ok(()),
        },
    };
    let servings = match servings {
        Some(s) => s,
        None => prompt_servings()?,
    };
    let meal = match meal {
        Some(m) => m,
        None => prompt_meal_type()?,
    };

    let now = Local::now().fixed_offset();
    let check = store.check_recipe(&recipe_id, servings, now.date_naive())?;
    if !check.is_valid() {
        display_validation(&check);
        if !yes && !prompt_yes_no("Log it anyway?", false)? {
            info!("logging cancelled by user");
            return Ok(());
        }
    }

    let record = store.consume_recipe(&recipe_id, servings, meal, now)?;
    let name = store
        .get_recipe(&record.recipe_id)
        .map(|r| r.name.clone())
        .unwrap_or_else(|| record.recipe_id.clone());
    display_consumption(&record, &name);

    save_state(file, store.state())?;
    println!("State saved.");
    Ok(())
}

fn cmd_summary(file: &Path, period: &PeriodArgs, json: bool) -> Result<()> {
    let store = HouseholdStore::new(load_or_default(file)?);
    let range = period.range(today());

    let progress = store.goal().map(|g| g.progress.as_slice()).unwrap_or(&[]);
    let summary = aggregate_period(&range, progress, store.consumption(), period.meal);

    if json {
        return print_json(&summary);
    }
    display_summary(&summary, store.goal());
    Ok(())
}

fn cmd_export(file: &Path, period: &PeriodArgs, out: &Path) -> Result<()> {
    let store = HouseholdStore::new(load_state(file)?);
    let range = period.range(today());

    let progress = store.goal().map(|g| g.progress.as_slice()).unwrap_or(&[]);
    let summary = aggregate_period(&range, progress, store.consumption(), period.meal);

    write_summary_csv(&summary, out)?;
    println!(
        "Wrote {} day(s) from {} to {} to {}",
        summary.per_day.len(),
        range.start,
        range.end,
        out.display()
    );
    Ok(())
}

fn cmd_rescore(file: &Path) -> Result<()> {
    let mut store = HouseholdStore::new(load_state(file)?);
    let changed = store.rescore_all();

    save_state(file, store.state())?;
    println!("Updated {} score(s). State saved.", changed);
    Ok(())
}
