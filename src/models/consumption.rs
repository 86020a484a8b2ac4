use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::NutritionInfo;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        };
        f.pad(name)
    }
}

/// One logged serving event. The log is append-only.
///
/// `nutrition_info` is the per-serving snapshot of the recipe at the time it was eaten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionRecord {
    pub recipe_id: String,
    pub servings: f64,
    pub meal_type: MealType,
    pub consumed_at: DateTime<FixedOffset>,
    pub nutrition_info: NutritionInfo,
}

impl ConsumptionRecord {
    /// Calendar date of consumption in the record's own offset.
    #[inline]
    pub fn consumed_on(&self) -> NaiveDate {
        self.consumed_at.date_naive()
    }

    /// Nutrition for all servings eaten.
    #[inline]
    pub fn total_nutrition(&self) -> NutritionInfo {
        self.nutrition_info.scaled(self.servings)
    }
}
