use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Nutrient, NutritionInfo};

/// One day of logged intake for a goal. At most one per date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub date: NaiveDate,

    #[serde(flatten)]
    pub nutrition: NutritionInfo,

    #[serde(default)]
    pub completed: bool,
}

impl DailyProgress {
    pub fn new(date: NaiveDate, nutrition: NutritionInfo, completed: bool) -> Self {
        Self {
            date,
            nutrition,
            completed,
        }
    }
}

/// A user's active daily nutrition targets plus the per-day log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionGoal {
    pub daily_calories: f64,
    pub daily_protein: f64,
    pub daily_carbs: f64,
    pub daily_fat: f64,

    /// Kept sorted by date, unique per date.
    #[serde(default)]
    pub progress: Vec<DailyProgress>,
}

impl NutritionGoal {
    pub fn new(daily_calories: f64, daily_protein: f64, daily_carbs: f64, daily_fat: f64) -> Self {
        Self {
            daily_calories,
            daily_protein,
            daily_carbs,
            daily_fat,
            progress: Vec::new(),
        }
    }

    /// Daily target for one nutrient.
    #[inline]
    pub fn target(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.daily_calories,
            Nutrient::Protein => self.daily_protein,
            Nutrient::Carbs => self.daily_carbs,
            Nutrient::Fat => self.daily_fat,
        }
    }

    /// Daily targets as a nutrition record.
    pub fn targets(&self) -> NutritionInfo {
        NutritionInfo::new(
            self.daily_calories,
            self.daily_protein,
            self.daily_carbs,
            self.daily_fat,
        )
    }

    /// All targets strictly positive.
    pub fn is_valid(&self) -> bool {
        Nutrient::ALL
            .iter()
            .all(|&n| self.target(n).is_finite() && self.target(n) > 0.0)
    }

    pub fn progress_for(&self, date: NaiveDate) -> Option<&DailyProgress> {
        self.progress
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|idx| &self.progress[idx])
    }

    /// Write a day's record, replacing any existing record for that date.
    pub fn upsert_progress(&mut self, entry: DailyProgress) {
        match self.progress.binary_search_by_key(&entry.date, |p| p.date) {
            Ok(idx) => self.progress[idx] = entry,
            Err(idx) => self.progress.insert(idx, entry),
        }
    }

    /// Add `nutrition` into the day's record, creating it if missing.
    ///
    /// `completed` is recomputed: the day is complete once calories reach the target.
    pub fn accumulate_progress(
        &mut self,
        date: NaiveDate,
        nutrition: NutritionInfo,
    ) -> &DailyProgress {
        let idx = match self.progress.binary_search_by_key(&date, |p| p.date) {
            Ok(idx) => {
                self.progress[idx].nutrition = self.progress[idx].nutrition + nutrition;
                idx
            }
            Err(idx) => {
                self.progress
                    .insert(idx, DailyProgress::new(date, nutrition, false));
                idx
            }
        };
        let reached = self.progress[idx].nutrition.calories >= self.daily_calories;
        self.progress[idx].completed = reached;
        &self.progress[idx]
    }

    /// Restore the sorted/unique invariant after deserializing foreign data.
    ///
    /// Later entries for the same date win.
    pub fn normalize_progress(&mut self) {
        let entries = std::mem::take(&mut self.progress);
        for entry in entries {
            self.upsert_progress(entry);
        }
    }
}
