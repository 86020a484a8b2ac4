mod catalog;
mod consumption;
mod goal;
mod nutrition;
mod sustainability;

pub use catalog::{PantryItem, Recipe};
pub use consumption::{ConsumptionRecord, MealType};
pub use goal::{DailyProgress, NutritionGoal};
pub use nutrition::{Nutrient, NutritionInfo};
pub use sustainability::{CarbonFootprint, Packaging, SustainabilityInfo, SustainabilityScore};
