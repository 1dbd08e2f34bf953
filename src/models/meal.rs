// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Meals, the foods they contain, and the requests that create them.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Macronutrient totals in grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Macros {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// One recognised food inside a meal.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub name: String,
    pub grams: f64,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub model_label: Option<String>,
    pub confidence: f64,
}

impl FoodItem {
    /// Rescale calories and macros to a new portion size.
    ///
    /// Leaves the item untouched when either weight is not positive.
    pub fn scale_to_grams(&mut self, grams: f64) {
        if !(grams > 0.0 && self.grams > 0.0) {
            return;
        }
        let factor = grams / self.grams;
        self.calories *= factor;
        self.protein *= factor;
        self.carbs *= factor;
        self.fat *= factor;
        self.grams = grams;
    }
}

/// A logged meal.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: String,
    pub timestamp: String,
    pub source: String,
    pub original_input: String,
    pub foods: Vec<FoodItem>,
    pub total_calories: f64,
    pub total_macros: Macros,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireMacros {
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
}

impl From<WireMacros> for Macros {
    fn from(wire: WireMacros) -> Self {
        Self {
            protein: wire.protein_g.unwrap_or(0.0),
            carbs: wire.carbs_g.unwrap_or(0.0),
            fat: wire.fat_g.unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireFood {
    pub name: Option<String>,
    pub grams: Option<f64>,
    pub calories: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub model_label: Option<String>,
    pub confidence: Option<f64>,
}

impl From<WireFood> for FoodItem {
    fn from(wire: WireFood) -> Self {
        Self {
            name: wire.name.unwrap_or_default(),
            grams: wire.grams.unwrap_or(0.0),
            calories: wire.calories.unwrap_or(0.0),
            protein: wire.protein_g.unwrap_or(0.0),
            carbs: wire.carbs_g.unwrap_or(0.0),
            fat: wire.fat_g.unwrap_or(0.0),
            model_label: wire.model_label,
            confidence: wire.confidence.unwrap_or(0.0),
        }
    }
}

/// Meal body returned by every meal endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireMeal {
    pub meal_id: Option<String>,
    pub timestamp: Option<String>,
    pub source: Option<String>,
    pub original_input: Option<String>,
    pub foods: Option<Vec<WireFood>>,
    pub total_calories: Option<f64>,
    pub total_macros: Option<WireMacros>,
    pub confidence_score: Option<f64>,
}

impl From<WireMeal> for Meal {
    fn from(wire: WireMeal) -> Self {
        Self {
            id: wire.meal_id.unwrap_or_default(),
            timestamp: wire.timestamp.unwrap_or_default(),
            source: wire.source.unwrap_or_default(),
            original_input: wire.original_input.unwrap_or_default(),
            foods: wire
                .foods
                .unwrap_or_default()
                .into_iter()
                .map(FoodItem::from)
                .collect(),
            total_calories: wire.total_calories.unwrap_or(0.0),
            total_macros: wire.total_macros.map(Macros::from).unwrap_or_default(),
            confidence: wire.confidence_score.unwrap_or(0.0),
        }
    }
}

// ─── Requests ────────────────────────────────────────────────

/// Image to analyse, sent as multipart field `file`.
#[derive(Debug, Clone, Validate)]
pub struct ImageUpload {
    #[validate(length(min = 1, message = "Image file name is required"))]
    pub file_name: String,
    #[validate(custom(function = "validate_mime_type"))]
    pub mime_type: String,
    #[validate(length(min = 1, message = "Image data is required"))]
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Build an upload, guessing the MIME type from the file extension.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_for_file_name(&file_name).to_string();
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }
}

fn validate_mime_type(mime_type: &str) -> Result<(), ValidationError> {
    // Same parser the multipart encoder uses.
    match reqwest::multipart::Part::bytes(Vec::new()).mime_str(mime_type) {
        Ok(_) => Ok(()),
        Err(_) => Err(ValidationError::new("mime_type").with_message(Cow::Owned(format!(
            "Invalid image type \"{}\"",
            mime_type
        )))),
    }
}

fn mime_for_file_name(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "gif" => "image/gif",
        _ => "image/jpeg",
    }
}

/// `POST /meals/from-barcode` request body.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct BarcodeMeal {
    #[validate(length(min = 1, message = "Barcode is required"))]
    pub barcode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_description: Option<String>,
    #[validate(range(min = 1, message = "Servings must be at least 1"))]
    pub servings: u32,
}

impl BarcodeMeal {
    pub fn new(barcode: impl Into<String>) -> Self {
        Self {
            barcode: barcode.into(),
            serving_description: None,
            servings: 1,
        }
    }
}

/// `POST /meals` request body for a manually entered food.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct ManualMeal {
    #[validate(length(min = 1, message = "Food name is required"))]
    pub food_name: String,
    #[validate(range(min = 0.0, message = "Calories cannot be negative"))]
    pub calories: f64,
    #[validate(range(min = 0.0, message = "Protein cannot be negative"))]
    pub protein: f64,
    #[validate(range(min = 0.0, message = "Carbs cannot be negative"))]
    pub carbs: f64,
    #[validate(range(min = 0.0, message = "Fat cannot be negative"))]
    pub fat: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<String>,
    /// Filled in by the client (`YYYY-MM-DD`, defaults to today)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}
