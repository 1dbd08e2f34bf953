// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily calorie and macro targets (Mifflin-St Jeor).

use crate::models::{Gender, Goal, Profile};
use serde::Serialize;

/// Target used when neither an estimate nor a stored target exists.
pub const DEFAULT_DAILY_CALORIES: u32 = 2000;

/// Default daily water goal in milliliters.
pub const DEFAULT_WATER_GOAL_ML: u32 = 2000;

/// Daily deficit/surplus for a lose/gain goal (~0.5 kg per week).
const GOAL_ADJUSTMENT_KCAL: f64 = 500.0;

const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

/// Daily macro targets in grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MacroTargets {
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

/// Estimate the goal-adjusted daily calorie target.
///
/// Returns 0 ("unknown") when age, height or weight is missing.
pub fn estimate_daily_calories(profile: &Profile) -> u32 {
    let (Some(age), Some(height), Some(weight)) =
        (profile.age, profile.height_cm, profile.weight_kg)
    else {
        return 0;
    };
    if age == 0 || !(height > 0.0) || !(weight > 0.0) {
        return 0;
    }

    let base = 10.0 * weight + 6.25 * height - 5.0 * f64::from(age);
    let bmr = match profile.gender {
        Some(Gender::Male) => base + 5.0,
        _ => base - 161.0,
    };

    let tdee = bmr * profile.activity_level.multiplier();

    let target = match profile.goal {
        Goal::Lose => tdee - GOAL_ADJUSTMENT_KCAL,
        Goal::Gain => tdee + GOAL_ADJUSTMENT_KCAL,
        Goal::Maintain => tdee,
    };

    target.round().max(0.0) as u32
}

/// Split a calorie budget 30/40/30 into protein/carbs/fat grams.
///
/// Each macro is rounded on its own, so the grams may not add back up to
/// exactly `calories`.
pub fn estimate_macros(calories: u32) -> MacroTargets {
    let calories = f64::from(calories);
    MacroTargets {
        protein: (calories * 0.30 / KCAL_PER_G_PROTEIN).round() as u32,
        carbs: (calories * 0.40 / KCAL_PER_G_CARBS).round() as u32,
        fat: (calories * 0.30 / KCAL_PER_G_FAT).round() as u32,
    }
}

/// Target to display: the estimate, else the stored target, else 2000.
pub fn effective_daily_target(profile: &Profile) -> u32 {
    let estimate = estimate_daily_calories(profile);
    if estimate > 0 {
        return estimate;
    }
    profile
        .daily_calorie_target
        .filter(|t| *t > 0)
        .unwrap_or(DEFAULT_DAILY_CALORIES)
}

/// Body-mass index rounded to one decimal.
pub fn bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if !(weight_kg > 0.0 && height_cm > 0.0) {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some((weight_kg / (height_m * height_m) * 10.0).round() / 10.0)
}

/// WHO adult BMI bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}
