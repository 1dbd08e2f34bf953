// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Per-day nutrition summary computed by the backend.

use super::meal::{Macros, WireMacros};
use serde::{Deserialize, Serialize};

/// Daily totals. Read-only on the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    /// `YYYY-MM-DD`
    pub date: String,
    pub total_calories: f64,
    pub total_macros: Macros,
    pub remaining_calories: f64,
    pub total_water: Option<f64>,
    pub total_exercise: Option<f64>,
}

impl DailySummary {
    /// Summary for a day with nothing logged.
    pub fn empty(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Default::default()
        }
    }

    /// True when nothing has been recorded for the day.
    pub fn is_empty(&self) -> bool {
        self.total_calories == 0.0
            && self.total_macros == Macros::default()
            && self.total_water.unwrap_or(0.0) == 0.0
            && self.total_exercise.unwrap_or(0.0) == 0.0
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireDailySummary {
    pub date: Option<String>,
    pub total_calories: Option<f64>,
    pub total_macros: Option<WireMacros>,
    pub remaining_calories: Option<f64>,
    pub total_water: Option<f64>,
    pub total_exercise: Option<f64>,
}

impl WireDailySummary {
    /// Map to a summary, using `requested_date` when the body omits it.
    pub fn into_summary(self, requested_date: &str) -> DailySummary {
        DailySummary {
            date: self.date.unwrap_or_else(|| requested_date.to_string()),
            total_calories: self.total_calories.unwrap_or(0.0),
            total_macros: self.total_macros.map(Macros::from).unwrap_or_default(),
            remaining_calories: self.remaining_calories.unwrap_or(0.0),
            total_water: self.total_water,
            total_exercise: self.total_exercise,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_mapping() {
        let json = r#"{"date":"2024-05-01","total_calories":1450.5,
                       "total_macros":{"protein_g":90,"carbs_g":150,"fat_g":40},
                       "remaining_calories":549.5,"total_water":1500}"#;
        let summary = serde_json::from_str::<WireDailySummary>(json)
            .unwrap()
            .into_summary("2024-05-01");

        assert_eq!(summary.total_calories, 1450.5);
        assert_eq!(summary.total_macros.protein, 90.0);
        assert_eq!(summary.remaining_calories, 549.5);
        assert_eq!(summary.total_water, Some(1500.0));
        assert_eq!(summary.total_exercise, None);
        assert!(!summary.is_empty());
    }

    #[test]
    fn test_missing_date_uses_requested() {
        let summary = WireDailySummary::default().into_summary("2024-01-02");
        assert_eq!(summary, DailySummary::empty("2024-01-02"));
        assert!(summary.is_empty());
    }
}
