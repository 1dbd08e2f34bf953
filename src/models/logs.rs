// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Water, exercise and weight log entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Water intake entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterLog {
    pub id: String,
    /// Amount in milliliters
    pub amount_ml: f64,
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireWaterLog {
    pub water_log_id: Option<String>,
    pub amount: Option<f64>,
    pub timestamp: Option<String>,
}

impl From<WireWaterLog> for WaterLog {
    fn from(wire: WireWaterLog) -> Self {
        Self {
            id: wire.water_log_id.unwrap_or_default(),
            amount_ml: wire.amount.unwrap_or(0.0),
            timestamp: wire.timestamp.unwrap_or_default(),
        }
    }
}

/// Exercise session entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseLog {
    pub id: String,
    pub name: String,
    pub duration_minutes: f64,
    pub calories_burned: f64,
    pub timestamp: String,
}

/// Exercise body; the backend uses camelCase for `caloriesBurned`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireExerciseLog {
    pub exercise_log_id: Option<String>,
    pub name: Option<String>,
    pub duration: Option<f64>,
    #[serde(rename = "caloriesBurned")]
    pub calories_burned: Option<f64>,
    pub timestamp: Option<String>,
}

impl From<WireExerciseLog> for ExerciseLog {
    fn from(wire: WireExerciseLog) -> Self {
        Self {
            id: wire.exercise_log_id.unwrap_or_default(),
            name: wire.name.unwrap_or_default(),
            duration_minutes: wire.duration.unwrap_or(0.0),
            calories_burned: wire.calories_burned.unwrap_or(0.0),
            timestamp: wire.timestamp.unwrap_or_default(),
        }
    }
}

/// New exercise to log.
#[derive(Debug, Clone, Validate)]
pub struct NewExercise {
    #[validate(length(min = 1, message = "Exercise name is required"))]
    pub name: String,
    #[validate(range(min = 1, message = "Duration must be at least one minute"))]
    pub duration_minutes: u32,
    pub calories_burned: u32,
    /// Defaults to today
    pub date: Option<NaiveDate>,
}

/// Body-weight entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightLog {
    pub id: String,
    pub weight_kg: f64,
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireWeightLog {
    pub weight_log_id: Option<String>,
    pub weight: Option<f64>,
    pub timestamp: Option<String>,
}

impl From<WireWeightLog> for WeightLog {
    fn from(wire: WireWeightLog) -> Self {
        Self {
            id: wire.weight_log_id.unwrap_or_default(),
            weight_kg: wire.weight.unwrap_or(0.0),
            timestamp: wire.timestamp.unwrap_or_default(),
        }
    }
}

/// Optional bounds for the weight history query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeightRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}
