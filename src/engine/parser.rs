use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::models::NutritionInfo;

/// Number followed by a unit/word, case-insensitive, whitespace-tolerant.
/// Decimals are captured whole so "12.5g" never reads as "5g". ASCII digits
/// only; plural unit words are accepted.
static CALORIES_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+(?:\.[0-9]+)?)\s*kcals?\b").expect("calorie pattern is valid")
});

static PROTEIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+(?:\.[0-9]+)?)\s*g\s*proteins?\b")
        .expect("protein pattern is valid")
});

static CARBS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+(?:\.[0-9]+)?)\s*g\s*carb(?:s|ohydrates?)?\b")
        .expect("carbs pattern is valid")
});

static FAT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+(?:\.[0-9]+)?)\s*g\s*fats?\b").expect("fat pattern is valid")
});

/// First quantity matched by `pattern`, or 0.
fn first_quantity(pattern: &Regex, text: &str) -> f64 {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Extract calories and macros from free text such as
/// `"320 kcal, 18g protein, 40g carbs, 9g fat"`.
///
/// Each nutrient is searched for independently, so token order does not
/// matter. Anything not found is 0; this never fails.
pub fn parse_nutrition_text(text: &str) -> NutritionInfo {
    let info = NutritionInfo {
        calories: first_quantity(&CALORIES_PATTERN, text),
        protein: first_quantity(&PROTEIN_PATTERN, text),
        carbs: first_quantity(&CARBS_PATTERN, text),
        fat: first_quantity(&FAT_PATTERN, text),
    };
    debug!(input_len = text.len(), parsed = %info, "parsed nutrition text");
    info
}

/// Parse one record per non-empty line, for generators that describe several items at once.
pub fn parse_nutrition_lines(text: &str) -> Vec<NutritionInfo> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_nutrition_text)
        .collect()
}
