use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{NutriError, Result};
use crate::models::{ConsumptionRecord, NutritionGoal, PantryItem, Recipe};

/// Everything the household file holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdState {
    #[serde(default)]
    pub recipes: Vec<Recipe>,

    #[serde(default)]
    pub pantry: Vec<PantryItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<NutritionGoal>,

    #[serde(default)]
    pub consumption: Vec<ConsumptionRecord>,
}

/// Deduplicate by key, keeping the last occurrence in its original position.
fn dedupe_by<T, F>(items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> String,
{
    let mut last_index: HashMap<String, usize> = HashMap::new();
    for (i, item) in items.iter().enumerate() {
        last_index.insert(key(item), i);
    }
    items
        .into_iter()
        .enumerate()
        .filter(|(i, item)| last_index.get(&key(item)) == Some(i))
        .map(|(_, item)| item)
        .collect()
}

/// Load household state from a JSON file.
///
/// Recipes and pantry items are deduplicated by id (last occurrence wins) and
/// goal progress is re-sorted with one entry per date.
pub fn load_state<P: AsRef<Path>>(path: P) -> Result<HouseholdState> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(NutriError::StateNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)?;
    let mut state: HouseholdState = serde_json::from_str(&content)?;

    let recipe_count = state.recipes.len();
    state.recipes = dedupe_by(state.recipes, |r| r.id.clone());
    state.pantry = dedupe_by(state.pantry, |p| p.id.clone());
    if state.recipes.len() != recipe_count {
        warn!(
            dropped = recipe_count - state.recipes.len(),
            "duplicate recipe ids in state file"
        );
    }

    if let Some(goal) = state.goal.as_mut() {
        goal.normalize_progress();
    }

    debug!(
        recipes = state.recipes.len(),
        pantry = state.pantry.len(),
        records = state.consumption.len(),
        "loaded household state"
    );
    Ok(state)
}

/// Save household state to a JSON file.
pub fn save_state<P: AsRef<Path>>(path: P, state: &HouseholdState) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;
    Ok(())
}
