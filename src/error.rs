use thiserror::Error;

#[derive(Debug, Error)]
pub enum NutriError {
    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("State file not found: {0}")]
    StateNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
}

pub type Result<T> = std::result::Result<T, NutriError>;
