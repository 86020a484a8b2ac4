use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// The four tracked nutrients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nutrient {
    Calories,
    Protein,
    Carbs,
    Fat,
}

impl Nutrient {
    pub const ALL: [Nutrient; 4] = [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Carbs,
        Nutrient::Fat,
    ];

    /// Display unit for this nutrient.
    pub fn unit(self) -> &'static str {
        match self {
            Nutrient::Calories => "kcal",
            _ => "g",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Nutrient::Calories => "calories",
            Nutrient::Protein => "protein",
            Nutrient::Carbs => "carbs",
            Nutrient::Fat => "fat",
        };
        f.pad(name)
    }
}

/// Calories plus the three macro-nutrients (grams).
///
/// Always embedded in an owning record (recipe, pantry item, daily progress);
/// it carries no identity of its own. All values are expected to be >= 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionInfo {
    #[serde(default)]
    pub calories: f64,

    #[serde(default)]
    pub protein: f64,

    #[serde(default)]
    pub carbs: f64,

    #[serde(default)]
    pub fat: f64,
}

impl NutritionInfo {
    pub fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
        }
    }

    /// All-zero record.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Value of a single nutrient.
    #[inline]
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fat => self.fat,
        }
    }

    /// Sum of macro mass (protein + carbs + fat).
    #[inline]
    pub fn total_macros(&self) -> f64 {
        self.protein + self.carbs + self.fat
    }

    /// Every value multiplied by `factor` (e.g. servings).
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fat: self.fat * factor,
        }
    }

    /// Each value rounded to the nearest integer.
    pub fn rounded(&self) -> Self {
        Self {
            calories: self.calories.round(),
            protein: self.protein.round(),
            carbs: self.carbs.round(),
            fat: self.fat.round(),
        }
    }

    pub fn is_zero(&self) -> bool {
        Nutrient::ALL.iter().all(|&n| self.get(n) == 0.0)
    }

    /// Basic validation: every value finite and non-negative.
    pub fn is_valid(&self) -> bool {
        Nutrient::ALL
            .iter()
            .all(|&n| self.get(n).is_finite() && self.get(n) >= 0.0)
    }
}

impl Add for NutritionInfo {
    type Output = NutritionInfo;

    fn add(self, other: NutritionInfo) -> NutritionInfo {
        NutritionInfo {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
        }
    }
}

impl std::iter::Sum for NutritionInfo {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutritionInfo::zero(), |acc, n| acc + n)
    }
}

impl fmt::Display for NutritionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0} kcal, {:.0}g protein, {:.0}g carbs, {:.0}g fat",
            self.calories, self.protein, self.carbs, self.fat
        )
    }
}
