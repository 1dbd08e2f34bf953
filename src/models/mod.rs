// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Client data models and their backend wire shapes.
//!
//! Every `Wire*` type mirrors a backend JSON body with all fields optional;
//! the `From` conversions are the single place where defaults are applied.

pub mod food;
pub mod logs;
pub mod meal;
pub mod profile;
pub mod session;
pub mod summary;

pub use food::{FoodSearchResult, WireFoodSearchResult};
pub use logs::{
    ExerciseLog, NewExercise, WaterLog, WeightLog, WeightRange, WireExerciseLog, WireWaterLog,
    WireWeightLog,
};
pub use meal::{
    BarcodeMeal, FoodItem, ImageUpload, Macros, ManualMeal, Meal, WireFood, WireMacros, WireMeal,
};
pub use profile::{
    ActivityLevel, BackendProfile, Gender, Goal, Profile, ProfileUpdate, WireProfile,
};
pub use session::{Session, WireSession};
pub use summary::{DailySummary, WireDailySummary};
