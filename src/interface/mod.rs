pub mod export;
pub mod prompts;
pub mod render;

pub use export::write_summary_csv;
pub use prompts::{prompt_goal, prompt_meal_type, prompt_recipe, prompt_servings, prompt_yes_no};
pub use render::{
    display_consumption, display_goal, display_nutrition, display_score, display_summary,
    display_validation,
};
