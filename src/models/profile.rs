// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! User profile: the local cached copy and its backend mirror.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Biological sex used by the BMR formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    #[serde(other)]
    Other,
}

/// Self-reported activity level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Active,
    VeryActive,
    /// Unknown values read as moderate.
    #[default]
    #[serde(other)]
    Moderate,
}

impl ActivityLevel {
    /// TDEE multiplier applied to the BMR.
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

/// Weight goal driving the calorie adjustment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Lose,
    Gain,
    #[default]
    #[serde(other)]
    Maintain,
}

/// Locally cached profile.
///
/// Only `daily_calorie_target` and `timezone` exist on the backend; the
/// body measurements live on the device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(alias = "height", skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(alias = "weight", skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(alias = "goalWeight", skip_serializing_if = "Option::is_none")]
    pub goal_weight_kg: Option<f64>,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub goal: Goal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_calorie_target: Option<u32>,
}

impl Profile {
    /// Overlay the backend-owned fields onto this profile.
    pub fn merge_backend(&mut self, remote: &BackendProfile) {
        if remote.daily_calorie_target > 0 {
            self.daily_calorie_target = Some(remote.daily_calorie_target);
        }
        if !remote.timezone.is_empty() {
            self.timezone = Some(remote.timezone.clone());
        }
    }
}

/// Profile as the backend stores it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendProfile {
    pub user_id: String,
    pub daily_calorie_target: u32,
    pub timezone: String,
}

/// `GET/PUT /user/profile` response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireProfile {
    pub user_id: Option<String>,
    pub daily_calorie_target: Option<f64>,
    pub timezone: Option<String>,
}

impl From<WireProfile> for BackendProfile {
    fn from(wire: WireProfile) -> Self {
        Self {
            user_id: wire.user_id.unwrap_or_default(),
            daily_calorie_target: wire
                .daily_calorie_target
                .filter(|t| t.is_finite() && *t > 0.0)
                .map(|t| t.round() as u32)
                .unwrap_or(0),
            timezone: wire.timezone.unwrap_or_default(),
        }
    }
}

/// `PUT /user/profile` request body; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_calorie_target: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.daily_calorie_target.is_none() && self.timezone.is_none()
    }
}

macro_rules! impl_str_enum {
    ($ty:ty { $($variant:path => $name:literal),+ $(,)? }) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let name = match self {
                    $($variant => $name,)+
                };
                f.write_str(name)
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
                    $($name => Ok($variant),)+
                    other => Err(format!("unknown value '{}'", other)),
                }
            }
        }
    };
}

impl_str_enum!(Gender {
    Gender::Male => "male",
    Gender::Female => "female",
    Gender::Other => "other",
});

impl_str_enum!(ActivityLevel {
    ActivityLevel::Sedentary => "sedentary",
    ActivityLevel::Light => "light",
    ActivityLevel::Moderate => "moderate",
    ActivityLevel::Active => "active",
    ActivityLevel::VeryActive => "very_active",
});

impl_str_enum!(Goal {
    Goal::Lose => "lose",
    Goal::Maintain => "maintain",
    Goal::Gain => "gain",
});
