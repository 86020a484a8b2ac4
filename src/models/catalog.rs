use serde::{Deserialize, Serialize};

use crate::models::{NutritionInfo, SustainabilityInfo};

/// A stored recipe. Nutrition is per serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub nutrition_info: NutritionInfo,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sustainability_info: Option<SustainabilityInfo>,
}

/// An item on the pantry shelf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryItem {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub quantity: f64,

    #[serde(default)]
    pub nutrition_info: NutritionInfo,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sustainability_info: Option<SustainabilityInfo>,
}

impl Recipe {
    /// Canonical key for name lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

impl PantryItem {
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}
