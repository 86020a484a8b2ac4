use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::engine::constants::PERCENT;
use crate::models::{Nutrient, NutritionGoal, NutritionInfo};

/// Per-nutrient flag set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct NutrientFlags {
    pub calories: bool,
    pub protein: bool,
    pub carbs: bool,
    pub fat: bool,
}

impl NutrientFlags {
    pub fn get(&self, nutrient: Nutrient) -> bool {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fat => self.fat,
        }
    }

    pub fn any(&self) -> bool {
        self.calories || self.protein || self.carbs || self.fat
    }
}

/// Per-nutrient percent of goal. May exceed 100; never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct NutrientPercentages {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

impl NutrientPercentages {
    pub fn get(&self, nutrient: Nutrient) -> u32 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fat => self.fat,
        }
    }
}

/// A nutrient that would go over its daily target.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Exceedance {
    pub nutrient: Nutrient,
    pub projected: f64,
    pub target: f64,
    pub overage: f64,
}

/// Outcome of checking a contribution against a goal that exists.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalReport {
    pub projected: NutritionInfo,
    pub targets: NutritionInfo,
    pub exceeds: NutrientFlags,
    pub percentages: NutrientPercentages,
}

impl GoalReport {
    pub fn is_valid(&self) -> bool {
        !self.exceeds.any()
    }

    /// Nutrients over target, in calories/protein/carbs/fat order.
    pub fn exceeded_nutrients(&self) -> Vec<Exceedance> {
        Nutrient::ALL
            .iter()
            .filter(|&&n| self.exceeds.get(n))
            .map(|&n| Exceedance {
                nutrient: n,
                projected: self.projected.get(n),
                target: self.targets.get(n),
                overage: self.projected.get(n) - self.targets.get(n),
            })
            .collect()
    }
}

/// Result of [`validate_against_goal`].
///
/// With no goal set there is nothing to exceed; that is `Unconstrained`,
/// never a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum GoalValidation {
    Unconstrained,
    Checked(GoalReport),
}

impl GoalValidation {
    pub fn is_valid(&self) -> bool {
        match self {
            GoalValidation::Unconstrained => true,
            GoalValidation::Checked(report) => report.is_valid(),
        }
    }

    pub fn report(&self) -> Option<&GoalReport> {
        match self {
            GoalValidation::Unconstrained => None,
            GoalValidation::Checked(report) => Some(report),
        }
    }
}

impl Serialize for GoalValidation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GoalValidation::Unconstrained => {
                let mut state = serializer.serialize_struct("GoalValidation", 1)?;
                state.serialize_field("valid", &true)?;
                state.end()
            }
            GoalValidation::Checked(report) => {
                let mut state = serializer.serialize_struct("GoalValidation", 3)?;
                state.serialize_field("valid", &report.is_valid())?;
                state.serialize_field("exceeds", &report.exceeds)?;
                state.serialize_field("percentages", &report.percentages)?;
                state.end()
            }
        }
    }
}

/// Rounded percent of `target`; 0 for a non-positive target.
fn percent_of(value: f64, target: f64) -> u32 {
    if target <= 0.0 || !target.is_finite() {
        return 0;
    }
    let pct = (value / target * PERCENT).round();
    if pct.is_finite() && pct > 0.0 {
        pct as u32
    } else {
        0
    }
}

/// Check whether adding `contribution` to the day's `prior_daily_total`
/// would push any nutrient over `goal`.
pub fn validate_against_goal(
    contribution: &NutritionInfo,
    prior_daily_total: &NutritionInfo,
    goal: Option<&NutritionGoal>,
) -> GoalValidation {
    let Some(goal) = goal else {
        return GoalValidation::Unconstrained;
    };

    let projected = *prior_daily_total + *contribution;
    let targets = goal.targets();

    let exceeds = NutrientFlags {
        calories: projected.calories > targets.calories,
        protein: projected.protein > targets.protein,
        carbs: projected.carbs > targets.carbs,
        fat: projected.fat > targets.fat,
    };
    let percentages = NutrientPercentages {
        calories: percent_of(projected.calories, targets.calories),
        protein: percent_of(projected.protein, targets.protein),
        carbs: percent_of(projected.carbs, targets.carbs),
        fat: percent_of(projected.fat, targets.fat),
    };

    GoalValidation::Checked(GoalReport {
        projected,
        targets,
        exceeds,
        percentages,
    })
}
