use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::engine::constants::SCORE_MAX;
use crate::engine::scoring::{CalorieBands, calculate_sustainability_score};
use crate::models::NutritionInfo;

/// Packaging type of a pantry item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Packaging {
    Recyclable,
    Biodegradable,
    Reusable,
    NonRecyclable,
}

/// Coarse carbon-footprint rating of a pantry item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CarbonFootprint {
    Low,
    Medium,
    High,
}

/// A sustainability score, either derived from nutrition or typed in by the user.
///
/// Always in [0, 100]; stored values above 100 are capped on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum SustainabilityScore {
    Computed(u8),
    Manual(u8),
}

/// Wire form accepting any non-negative integer.
#[derive(Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
enum StoredScore {
    Computed(u64),
    Manual(u64),
}

fn cap_score(value: u64) -> u8 {
    value.min(SCORE_MAX as u64) as u8
}

impl<'de> Deserialize<'de> for SustainabilityScore {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match StoredScore::deserialize(deserializer)? {
            StoredScore::Computed(v) => SustainabilityScore::Computed(cap_score(v)),
            StoredScore::Manual(v) => SustainabilityScore::Manual(cap_score(v)),
        })
    }
}

impl SustainabilityScore {
    pub fn value(self) -> u8 {
        match self {
            SustainabilityScore::Computed(v) | SustainabilityScore::Manual(v) => v,
        }
    }

    pub fn is_manual(self) -> bool {
        matches!(self, SustainabilityScore::Manual(_))
    }
}

impl Default for SustainabilityScore {
    fn default() -> Self {
        SustainabilityScore::Computed(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SustainabilityInfo {
    #[serde(default)]
    pub score: SustainabilityScore,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packaging: Option<Packaging>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbon_footprint: Option<CarbonFootprint>,
}

impl SustainabilityInfo {
    /// Build with a freshly computed score.
    pub fn computed(
        nutrition: &NutritionInfo,
        bands: &CalorieBands,
        packaging: Option<Packaging>,
        carbon_footprint: Option<CarbonFootprint>,
    ) -> Self {
        let mut info = Self {
            score: SustainabilityScore::Computed(0),
            packaging,
            carbon_footprint,
        };
        info.refresh(nutrition, bands);
        info
    }

    /// Recompute a computed score. Manual overrides are left as entered.
    ///
    /// Returns true if the stored score changed.
    pub fn refresh(&mut self, nutrition: &NutritionInfo, bands: &CalorieBands) -> bool {
        self.refresh_with(nutrition, bands, self.packaging, self.carbon_footprint)
    }

    /// Like [`refresh`](Self::refresh), but scores nutrition alone and
    /// ignores any packaging/carbon attributes (recipe context).
    pub fn refresh_nutrition_only(
        &mut self,
        nutrition: &NutritionInfo,
        bands: &CalorieBands,
    ) -> bool {
        self.refresh_with(nutrition, bands, None, None)
    }

    fn refresh_with(
        &mut self,
        nutrition: &NutritionInfo,
        bands: &CalorieBands,
        packaging: Option<Packaging>,
        carbon_footprint: Option<CarbonFootprint>,
    ) -> bool {
        if self.score.is_manual() {
            return false;
        }
        let fresh = SustainabilityScore::Computed(calculate_sustainability_score(
            nutrition,
            bands,
            packaging,
            carbon_footprint,
        ));
        let changed = fresh != self.score;
        self.score = fresh;
        changed
    }

    /// Pin the score to a user-entered value (capped at 100).
    pub fn override_score(&mut self, value: u8) {
        self.score = SustainabilityScore::Manual(cap_score(u64::from(value)));
    }

    /// Drop a manual override and go back to the computed score.
    pub fn clear_override(&mut self, nutrition: &NutritionInfo, bands: &CalorieBands) {
        self.score = SustainabilityScore::Computed(0);
        self.refresh(nutrition, bands);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balanced_snack() -> NutritionInfo {
        NutritionInfo::new(180.0, 30.0, 50.0, 20.0)
    }

    #[test]
    fn test_computed_refreshes_on_change() {
        let bands = CalorieBands::PANTRY_ITEM;
        let mut info = SustainabilityInfo::computed(&balanced_snack(), &bands, None, None);
        assert_eq!(info.score, SustainabilityScore::Computed(100));

        let heavier = NutritionInfo::new(900.0, 30.0, 50.0, 20.0);
        assert!(info.refresh(&heavier, &bands));
        assert_eq!(info.score, SustainabilityScore::Computed(95));
    }

    #[test]
    fn test_manual_survives_refresh() {
        let bands = CalorieBands::PANTRY_ITEM;
        let mut info = SustainabilityInfo::computed(&balanced_snack(), &bands, None, None);
        info.override_score(42);
        assert!(!info.refresh(&balanced_snack(), &bands));
        assert_eq!(info.score, SustainabilityScore::Manual(42));

        info.clear_override(&balanced_snack(), &bands);
        assert_eq!(info.score, SustainabilityScore::Computed(100));
    }

    #[test]
    fn test_nutrition_only_ignores_packaging() {
        // all fat, 1000 kcal: no macro or calorie points
        let info_n = NutritionInfo::new(1000.0, 0.0, 0.0, 50.0);
        let bands = CalorieBands::RECIPE;
        let mut info = SustainabilityInfo {
            score: SustainabilityScore::Computed(0),
            packaging: Some(Packaging::Biodegradable),
            carbon_footprint: Some(CarbonFootprint::Low),
        };

        info.refresh_nutrition_only(&info_n, &bands);
        assert_eq!(info.score, SustainabilityScore::Computed(50));

        info.refresh(&info_n, &bands);
        assert_eq!(info.score, SustainabilityScore::Computed(70));
    }

    #[test]
    fn test_override_capped() {
        let mut info = SustainabilityInfo::default();
        info.override_score(250);
        assert_eq!(info.score.value(), 100);
    }

    #[test]
    fn test_stored_scores_capped_on_load() {
        let info: SustainabilityInfo =
            serde_json::from_str(r#"{"score": {"kind": "manual", "value": 250}}"#).unwrap();
        assert_eq!(info.score, SustainabilityScore::Manual(100));

        let score: SustainabilityScore =
            serde_json::from_str(r#"{"kind": "computed", "value": 180}"#).unwrap();
        assert_eq!(score, SustainabilityScore::Computed(100));
    }

    #[test]
    fn test_score_serializes_tagged() {
        let json = serde_json::to_value(SustainabilityScore::Manual(70)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "manual", "value": 70}));

        let back: SustainabilityScore =
            serde_json::from_str(r#"{"kind": "manual", "value": 70}"#).unwrap();
        assert_eq!(back, SustainabilityScore::Manual(70));

        let packaging: Packaging = serde_json::from_str(r#""non-recyclable""#).unwrap();
        assert_eq!(packaging, Packaging::NonRecyclable);
    }
}
