use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{NutriError, Result};
use crate::models::{MealType, Nutrient, NutritionGoal, NutritionInfo, Recipe};

/// Minimum similarity for a fuzzy recipe-name suggestion.
const FUZZY_THRESHOLD: f64 = 0.7;

/// Prompt for a positive number.
pub fn prompt_positive(prompt: &str, default: &str) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| NutriError::InvalidInput("Invalid number".to_string()))?;

    if !(value.is_finite() && value > 0.0) {
        return Err(NutriError::InvalidInput(
            "Value must be greater than 0".to_string(),
        ));
    }
    Ok(value)
}

/// Prompt for a number of servings.
pub fn prompt_servings() -> Result<f64> {
    prompt_positive("How many servings?", "1")
}

/// Prompt for the meal type.
pub fn prompt_meal_type() -> Result<MealType> {
    let options: Vec<String> = MealType::ALL.iter().map(|m| m.to_string()).collect();

    let selection = Select::new()
        .with_prompt("Which meal was this?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(MealType::ALL[selection.min(MealType::ALL.len() - 1)])
}

/// Prompt for the four daily targets.
pub fn prompt_goal(current: Option<&NutritionGoal>) -> Result<NutritionGoal> {
    let defaults = current
        .map(NutritionGoal::targets)
        .unwrap_or_else(|| NutritionInfo::new(2000.0, 50.0, 250.0, 70.0));

    let mut values = [0.0; 4];
    for (slot, nutrient) in values.iter_mut().zip(Nutrient::ALL) {
        *slot = prompt_positive(
            &format!("Daily {} ({})", nutrient, nutrient.unit()),
            &format!("{:.0}", defaults.get(nutrient)),
        )?;
    }

    Ok(NutritionGoal::new(values[0], values[1], values[2], values[3]))
}

/// Prompt for a recipe with fuzzy name matching. Returns the recipe id.
pub fn prompt_recipe(recipes: &[Recipe]) -> Result<Option<String>> {
    if recipes.is_empty() {
        return Ok(None);
    }

    loop {
        let input: String = Input::new()
            .with_prompt("Which recipe? (press Enter to cancel)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        // Try exact match first (case-insensitive)
        let lowered = input.to_lowercase();
        if let Some(recipe) = recipes
            .iter()
            .find(|r| r.key() == lowered || r.id == input)
        {
            return Ok(Some(recipe.id.clone()));
        }

        let mut candidates: Vec<(&Recipe, f64)> = recipes
            .iter()
            .map(|r| (r, jaro_winkler(&r.key(), &lowered)))
            .filter(|(_, score)| *score > FUZZY_THRESHOLD)
            .collect();

        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        match candidates.len() {
            0 => {
                println!("No matching recipe found for '{}'", input);
            }
            1 => {
                let recipe = candidates[0].0;
                if prompt_yes_no(&format!("Did you mean '{}'?", recipe.name), true)? {
                    return Ok(Some(recipe.id.clone()));
                }
            }
            _ => {
                let options: Vec<&Recipe> = candidates.iter().take(5).map(|(r, _)| *r).collect();
                let mut labels: Vec<String> = options.iter().map(|r| r.name.clone()).collect();
                labels.push("None of these".to_string());

                let selection = Select::new()
                    .with_prompt("Which did you mean?")
                    .items(&labels)
                    .default(0)
                    .interact()?;

                if let Some(recipe) = options.get(selection) {
                    return Ok(Some(recipe.id.clone()));
                }
            }
        }
    }
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
