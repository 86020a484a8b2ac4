/// Starting point of every sustainability score before modifiers.
pub const BASE_SCORE: i32 = 50;

/// Lower and upper bound of a sustainability score.
pub const SCORE_MIN: i32 = 0;
pub const SCORE_MAX: i32 = 100;

/// Points for a macro share inside its tight band.
pub const MACRO_TIGHT_POINTS: i32 = 15;

/// Points for a macro share inside its loose band (but outside the tight one).
pub const MACRO_LOOSE_POINTS: i32 = 10;

// ─────────────────────────────────────────────────────────────────────────────
// Ideal macro-share bands (fraction of protein + carbs + fat), inclusive.
// ─────────────────────────────────────────────────────────────────────────────

pub const PROTEIN_TIGHT_BAND: (f64, f64) = (0.25, 0.35);
pub const PROTEIN_LOOSE_BAND: (f64, f64) = (0.20, 0.40);

pub const CARBS_TIGHT_BAND: (f64, f64) = (0.45, 0.55);
pub const CARBS_LOOSE_BAND: (f64, f64) = (0.40, 0.60);

pub const FAT_TIGHT_BAND: (f64, f64) = (0.15, 0.25);
pub const FAT_LOOSE_BAND: (f64, f64) = (0.10, 0.30);

// ─────────────────────────────────────────────────────────────────────────────
// Packaging and carbon modifiers (pantry items only)
// ─────────────────────────────────────────────────────────────────────────────

pub const PACKAGING_BIODEGRADABLE_POINTS: i32 = 10;
pub const PACKAGING_RECYCLABLE_POINTS: i32 = 5;

pub const CARBON_LOW_POINTS: i32 = 10;
pub const CARBON_MEDIUM_POINTS: i32 = 5;
pub const CARBON_HIGH_POINTS: i32 = -5;

/// Percent-of-goal scale factor.
pub const PERCENT: f64 = 100.0;
