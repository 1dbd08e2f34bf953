// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Food database search results.

use serde::{Deserialize, Serialize};

/// One entry from the food database, values per serving.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FoodSearchResult {
    pub id: String,
    pub name: String,
    pub serving: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireFoodSearchResult {
    pub id: Option<String>,
    pub name: Option<String>,
    pub serving: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

impl From<WireFoodSearchResult> for FoodSearchResult {
    fn from(wire: WireFoodSearchResult) -> Self {
        Self {
            id: wire.id.unwrap_or_default(),
            name: wire.name.unwrap_or_default(),
            serving: wire.serving.unwrap_or_default(),
            calories: wire.calories.unwrap_or(0.0),
            protein: wire.protein.unwrap_or(0.0),
            carbs: wire.carbs.unwrap_or(0.0),
            fat: wire.fat.unwrap_or(0.0),
        }
    }
}

/// Search endpoint body: either `{"results": [...]}` or a bare list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireSearchResponse {
    Wrapped {
        #[serde(default)]
        results: Vec<WireFoodSearchResult>,
    },
    Bare(Vec<WireFoodSearchResult>),
}

impl WireSearchResponse {
    pub(crate) fn into_results(self) -> Vec<FoodSearchResult> {
        let items = match self {
            WireSearchResponse::Wrapped { results } => results,
            WireSearchResponse::Bare(items) => items,
        };
        items.into_iter().map(FoodSearchResult::from).collect()
    }
}
