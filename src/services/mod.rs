// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - session gateway, resource clients and estimators.

pub mod calories;
pub mod exercise;
pub mod foods;
pub mod gateway;
pub mod meals;
pub mod profile;
pub mod single_flight;
pub mod summary;
pub mod water;
pub mod weight;

pub use calories::{
    bmi, effective_daily_target, estimate_daily_calories, estimate_macros, BmiCategory,
    MacroTargets,
};
pub use exercise::ExerciseClient;
pub use foods::FoodsClient;
pub use gateway::{ApiRequest, RequestBody, SessionGateway, AUTH_HEADER, MAX_AUTH_RETRIES};
pub use meals::MealsClient;
pub use profile::ProfileClient;
pub use single_flight::SingleFlight;
pub use summary::SummaryClient;
pub use water::WaterClient;
pub use weight::WeightClient;
