use chrono::{DateTime, FixedOffset, NaiveDate};
use tracing::{debug, info};

use crate::engine::{CalorieBands, GoalValidation, validate_against_goal};
use crate::error::{NutriError, Result};
use crate::models::{
    ConsumptionRecord, MealType, NutritionGoal, NutritionInfo, PantryItem, Recipe,
    SustainabilityInfo,
};
use crate::state::persistence::HouseholdState;

/// In-memory view over the household file: catalog lookups, the consumption
/// log, and the active goal.
pub struct HouseholdStore {
    state: HouseholdState,
}

impl HouseholdStore {
    pub fn new(state: HouseholdState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &HouseholdState {
        &self.state
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.state.recipes
    }

    pub fn pantry(&self) -> &[PantryItem] {
        &self.state.pantry
    }

    pub fn consumption(&self) -> &[ConsumptionRecord] {
        &self.state.consumption
    }

    pub fn goal(&self) -> Option<&NutritionGoal> {
        self.state.goal.as_ref()
    }

    /// Get a recipe by id, or by name (case-insensitive).
    pub fn get_recipe(&self, id_or_name: &str) -> Option<&Recipe> {
        let key = id_or_name.to_lowercase();
        self.state
            .recipes
            .iter()
            .find(|r| r.id == id_or_name)
            .or_else(|| self.state.recipes.iter().find(|r| r.key() == key))
    }

    /// Replace the active goal. Progress already logged is carried over.
    pub fn set_goal(&mut self, mut goal: NutritionGoal) -> Result<()> {
        if !goal.is_valid() {
            return Err(NutriError::InvalidInput(
                "Daily goal targets must be positive".to_string(),
            ));
        }
        if goal.progress.is_empty() {
            if let Some(previous) = self.state.goal.take() {
                goal.progress = previous.progress;
            }
        }
        goal.normalize_progress();
        info!(calories = goal.daily_calories, "daily goal updated");
        self.state.goal = Some(goal);
        Ok(())
    }

    /// Nutrition consumed on `date`, summed over the log.
    pub fn daily_total(&self, date: NaiveDate) -> NutritionInfo {
        self.state
            .consumption
            .iter()
            .filter(|r| r.consumed_on() == date)
            .map(ConsumptionRecord::total_nutrition)
            .sum()
    }

    /// Check `servings` of a recipe against the goal for `date`.
    pub fn check_recipe(
        &self,
        id_or_name: &str,
        servings: f64,
        date: NaiveDate,
    ) -> Result<GoalValidation> {
        validate_servings(servings)?;
        let recipe = self
            .get_recipe(id_or_name)
            .ok_or_else(|| NutriError::RecipeNotFound(id_or_name.to_string()))?;

        let contribution = recipe.nutrition_info.scaled(servings);
        let prior = self.daily_total(date);
        Ok(validate_against_goal(&contribution, &prior, self.goal()))
    }

    /// Log servings of a recipe: append to the consumption log and merge the
    /// day's progress into the goal, if one is set.
    pub fn consume_recipe(
        &mut self,
        id_or_name: &str,
        servings: f64,
        meal_type: MealType,
        consumed_at: DateTime<FixedOffset>,
    ) -> Result<ConsumptionRecord> {
        validate_servings(servings)?;
        let recipe = self
            .get_recipe(id_or_name)
            .ok_or_else(|| NutriError::RecipeNotFound(id_or_name.to_string()))?;

        let record = ConsumptionRecord {
            recipe_id: recipe.id.clone(),
            servings,
            meal_type,
            consumed_at,
            nutrition_info: recipe.nutrition_info,
        };

        if let Some(goal) = self.state.goal.as_mut() {
            let day = goal.accumulate_progress(record.consumed_on(), record.total_nutrition());
            debug!(date = %day.date, completed = day.completed, "daily progress merged");
        }

        info!(
            recipe = %record.recipe_id,
            servings,
            meal = %meal_type,
            "consumption logged"
        );
        self.state.consumption.push(record.clone());
        Ok(record)
    }

    /// Recompute every computed sustainability score.
    ///
    /// Recipes use the recipe calibration on nutrition alone; packaging and
    /// carbon only count for pantry items, which use the pantry calibration.
    /// Manual scores are kept.
    /// Returns how many scores changed.
    pub fn rescore_all(&mut self) -> usize {
        let mut changed = 0;

        for recipe in &mut self.state.recipes {
            let info = recipe
                .sustainability_info
                .get_or_insert_with(SustainabilityInfo::default);
            if info.refresh_nutrition_only(&recipe.nutrition_info, &CalorieBands::RECIPE) {
                changed += 1;
            }
        }

        for item in &mut self.state.pantry {
            let info = item
                .sustainability_info
                .get_or_insert_with(SustainabilityInfo::default);
            if info.refresh(&item.nutrition_info, &CalorieBands::PANTRY_ITEM) {
                changed += 1;
            }
        }

        info!(changed, "sustainability scores refreshed");
        changed
    }
}

fn validate_servings(servings: f64) -> Result<()> {
    if servings.is_finite() && servings > 0.0 {
        Ok(())
    } else {
        Err(NutriError::InvalidInput(format!(
            "Servings must be positive, got {}",
            servings
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Packaging, SustainabilityScore};

    fn sample_state() -> HouseholdState {
        HouseholdState {
            recipes: vec![
                Recipe {
                    id: "r-oats".to_string(),
                    name: "Overnight Oats".to_string(),
                    nutrition_info: NutritionInfo::new(300.0, 15.0, 45.0, 8.0),
                    sustainability_info: None,
                },
                Recipe {
                    id: "r-curry".to_string(),
                    name: "Lentil Curry".to_string(),
                    nutrition_info: NutritionInfo::new(550.0, 25.0, 70.0, 15.0),
                    sustainability_info: None,
                },
            ],
            pantry: vec![PantryItem {
                id: "p-beans".to_string(),
                name: "Black Beans".to_string(),
                quantity: 3.0,
                nutrition_info: NutritionInfo::new(120.0, 8.0, 20.0, 1.0),
                sustainability_info: Some(SustainabilityInfo {
                    score: SustainabilityScore::Computed(0),
                    packaging: Some(Packaging::Recyclable),
                    carbon_footprint: None,
                }),
            }],
            goal: Some(NutritionGoal::new(2000.0, 50.0, 250.0, 70.0)),
            consumption: Vec::new(),
        }
    }

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_get_recipe_by_id_or_name() {
        let store = HouseholdStore::new(sample_state());
        assert!(store.get_recipe("r-oats").is_some());
        assert!(store.get_recipe("lentil curry").is_some());
        assert!(store.get_recipe("LENTIL CURRY").is_some());
        assert!(store.get_recipe("pizza").is_none());
    }

    #[test]
    fn test_consume_appends_and_merges_progress() {
        let mut store = HouseholdStore::new(sample_state());
        store
            .consume_recipe("r-oats", 1.0, MealType::Breakfast, at("2024-03-01T08:00:00+01:00"))
            .unwrap();
        store
            .consume_recipe("Lentil Curry", 2.0, MealType::Dinner, at("2024-03-01T19:00:00+01:00"))
            .unwrap();

        assert_eq!(store.consumption().len(), 2);
        let goal = store.goal().unwrap();
        assert_eq!(goal.progress.len(), 1);
        assert_eq!(goal.progress[0].nutrition.calories, 1400.0);

        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(store.daily_total(date).calories, 1400.0);
    }

    #[test]
    fn test_consume_rejects_bad_input() {
        let mut store = HouseholdStore::new(sample_state());
        let when = at("2024-03-01T08:00:00+00:00");
        assert!(matches!(
            store.consume_recipe("r-oats", 0.0, MealType::Snack, when),
            Err(NutriError::InvalidInput(_))
        ));
        assert!(matches!(
            store.consume_recipe("pizza", 1.0, MealType::Snack, when),
            Err(NutriError::RecipeNotFound(_))
        ));
        assert!(store.consumption().is_empty());
    }

    #[test]
    fn test_check_recipe_uses_prior_total() {
        let mut store = HouseholdStore::new(sample_state());
        store
            .consume_recipe("r-curry", 2.0, MealType::Lunch, at("2024-03-01T12:00:00+00:00"))
            .unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let result = store.check_recipe("r-oats", 1.0, date).unwrap();
        let report = result.report().unwrap();
        // 1100 + 300 kcal, 50 + 15 g protein
        assert!(!report.exceeds.calories);
        assert!(report.exceeds.protein);
        assert_eq!(report.percentages.calories, 70);
        assert_eq!(report.percentages.protein, 130);
    }

    #[test]
    fn test_check_without_goal() {
        let mut state = sample_state();
        state.goal = None;
        let store = HouseholdStore::new(state);
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            store.check_recipe("r-oats", 10.0, date).unwrap(),
            GoalValidation::Unconstrained
        );
    }

    #[test]
    fn test_rescore_all_keeps_manual() {
        let mut state = sample_state();
        let mut manual = SustainabilityInfo::default();
        manual.override_score(12);
        state.recipes[1].sustainability_info = Some(manual);

        let mut store = HouseholdStore::new(state);
        let changed = store.rescore_all();

        assert_eq!(changed, 2);
        let curry = store.get_recipe("r-curry").unwrap();
        assert_eq!(curry.sustainability_info.unwrap().score, SustainabilityScore::Manual(12));
        // beans: 120 kcal (+15), protein 0.28 (+15), carbs 0.69 (0), fat 0.03 (0), recyclable (+5)
        assert_eq!(store.pantry()[0].sustainability_info.unwrap().score.value(), 85);
    }

    #[test]
    fn test_rescore_recipe_skips_packaging_bonus() {
        let mut state = sample_state();
        state.recipes[0].sustainability_info = Some(SustainabilityInfo {
            score: SustainabilityScore::Computed(0),
            packaging: Some(Packaging::Biodegradable),
            carbon_footprint: Some(crate::models::CarbonFootprint::Low),
        });

        let mut store = HouseholdStore::new(state);
        store.rescore_all();

        // oats: 300 kcal (+15 recipe bands), shares 0.22/0.66/0.12 -> +10/0/+10
        let oats = store.get_recipe("r-oats").unwrap();
        assert_eq!(oats.sustainability_info.unwrap().score, SustainabilityScore::Computed(85));
    }

    #[test]
    fn test_set_goal_keeps_progress() {
        let mut store = HouseholdStore::new(sample_state());
        store
            .consume_recipe("r-oats", 1.0, MealType::Breakfast, at("2024-03-01T08:00:00+00:00"))
            .unwrap();
        store.set_goal(NutritionGoal::new(1800.0, 60.0, 200.0, 60.0)).unwrap();

        let goal = store.goal().unwrap();
        assert_eq!(goal.daily_calories, 1800.0);
        assert_eq!(goal.progress.len(), 1);
        assert!(store.set_goal(NutritionGoal::new(0.0, 1.0, 1.0, 1.0)).is_err());
    }
}
