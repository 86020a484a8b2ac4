pub mod aggregation;
pub mod constants;
pub mod parser;
pub mod scoring;
pub mod validation;

pub use aggregation::{DateRange, DayTotal, LoggedDay, PeriodSummary, aggregate_period};
pub use parser::{parse_nutrition_lines, parse_nutrition_text};
pub use scoring::{CalorieBands, ScoreBreakdown, calculate_sustainability_score};
pub use validation::{
    Exceedance, GoalReport, GoalValidation, NutrientFlags, NutrientPercentages,
    validate_against_goal,
};
