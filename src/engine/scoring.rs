use serde::Serialize;

use crate::engine::constants::*;
use crate::models::{CarbonFootprint, NutritionInfo, Packaging};

/// Calorie thresholds and the points awarded at or below each one.
///
/// Thresholds are checked in order; the first one the calories fit under wins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalorieBands {
    pub name: &'static str,
    pub bands: [(f64, i32); 3],
}

impl CalorieBands {
    /// Snack/pantry-item calibration.
    pub const PANTRY_ITEM: CalorieBands = CalorieBands {
        name: "pantry-item",
        bands: [(200.0, 15), (300.0, 10), (400.0, 5)],
    };

    /// Full-recipe calibration.
    pub const RECIPE: CalorieBands = CalorieBands {
        name: "recipe",
        bands: [(400.0, 15), (600.0, 10), (800.0, 5)],
    };

    /// Points for an absolute calorie level.
    pub fn points_for(&self, calories: f64) -> i32 {
        self.bands
            .iter()
            .find(|(limit, _)| calories <= *limit)
            .map(|(_, points)| *points)
            .unwrap_or(0)
    }
}

impl Default for CalorieBands {
    fn default() -> Self {
        CalorieBands::PANTRY_ITEM
    }
}

#[inline]
fn within(share: f64, band: (f64, f64)) -> bool {
    share >= band.0 && share <= band.1
}

/// Points for a macro share given its tight and loose bands.
pub fn macro_share_points(share: f64, tight: (f64, f64), loose: (f64, f64)) -> i32 {
    if within(share, tight) {
        MACRO_TIGHT_POINTS
    } else if within(share, loose) {
        MACRO_LOOSE_POINTS
    } else {
        0
    }
}

pub fn packaging_points(packaging: Packaging) -> i32 {
    match packaging {
        Packaging::Biodegradable => PACKAGING_BIODEGRADABLE_POINTS,
        Packaging::Recyclable => PACKAGING_RECYCLABLE_POINTS,
        Packaging::Reusable | Packaging::NonRecyclable => 0,
    }
}

pub fn carbon_points(carbon: CarbonFootprint) -> i32 {
    match carbon {
        CarbonFootprint::Low => CARBON_LOW_POINTS,
        CarbonFootprint::Medium => CARBON_MEDIUM_POINTS,
        CarbonFootprint::High => CARBON_HIGH_POINTS,
    }
}

/// Itemised modifiers behind a sustainability score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
    pub calories: i32,
    pub packaging: i32,
    pub carbon: i32,
}

impl ScoreBreakdown {
    /// Compute every modifier for the given inputs.
    pub fn compute(
        nutrition: &NutritionInfo,
        bands: &CalorieBands,
        packaging: Option<Packaging>,
        carbon_footprint: Option<CarbonFootprint>,
    ) -> Self {
        let mut breakdown = ScoreBreakdown::default();

        let total = nutrition.total_macros();
        if total > 0.0 {
            breakdown.protein = macro_share_points(
                nutrition.protein / total,
                PROTEIN_TIGHT_BAND,
                PROTEIN_LOOSE_BAND,
            );
            breakdown.carbs =
                macro_share_points(nutrition.carbs / total, CARBS_TIGHT_BAND, CARBS_LOOSE_BAND);
            breakdown.fat =
                macro_share_points(nutrition.fat / total, FAT_TIGHT_BAND, FAT_LOOSE_BAND);
        }

        breakdown.calories = bands.points_for(nutrition.calories);
        breakdown.packaging = packaging.map(packaging_points).unwrap_or(0);
        breakdown.carbon = carbon_footprint.map(carbon_points).unwrap_or(0);
        breakdown
    }

    /// Sum of all modifiers.
    pub fn modifiers(&self) -> i32 {
        self.protein + self.carbs + self.fat + self.calories + self.packaging + self.carbon
    }

    /// Final bounded score.
    pub fn score(&self) -> u8 {
        (BASE_SCORE + self.modifiers()).clamp(SCORE_MIN, SCORE_MAX) as u8
    }
}

/// Sustainability score in [0, 100].
///
/// Base 50, plus macro-balance points, a calorie-level bonus from `bands`,
/// and optional packaging/carbon modifiers, clamped. Not cached: call again
/// whenever any input changes.
pub fn calculate_sustainability_score(
    nutrition: &NutritionInfo,
    bands: &CalorieBands,
    packaging: Option<Packaging>,
    carbon_footprint: Option<CarbonFootprint>,
) -> u8 {
    ScoreBreakdown::compute(nutrition, bands, packaging, carbon_footprint).score()
}
