// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! calai-client: client for an AI calorie-tracking backend
//!
//! This crate provides an authenticated session gateway, typed clients for
//! meals, water, exercise, weight, summaries and food search, and a local
//! calorie/macro estimator.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod time_utils;

use config::Config;
use error::Result;
use services::{
    ExerciseClient, FoodsClient, MealsClient, ProfileClient, SessionGateway, SummaryClient,
    WaterClient, WeightClient,
};
use std::sync::Arc;
use store::{FileStore, KeyValueStore, ProfileCache, SessionStore};

/// All resource clients sharing one session gateway.
#[derive(Clone)]
pub struct CalaiClient {
    pub gateway: SessionGateway,
    pub profile: ProfileClient,
    pub meals: MealsClient,
    pub water: WaterClient,
    pub exercise: ExerciseClient,
    pub weight: WeightClient,
    pub summary: SummaryClient,
    pub foods: FoodsClient,
}

impl CalaiClient {
    /// Client persisting its session and profile under `config.data_dir`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_store(config, Arc::new(FileStore::new(&config.data_dir)))
    }

    /// Client over an arbitrary key-value store.
    pub fn with_store(config: &Config, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let gateway = SessionGateway::new(config, SessionStore::new(store.clone()))?;
        Ok(Self::from_gateway(gateway, ProfileCache::new(store)))
    }

    pub fn from_gateway(gateway: SessionGateway, profile_cache: ProfileCache) -> Self {
        Self {
            profile: ProfileClient::new(gateway.clone(), profile_cache),
            meals: MealsClient::new(gateway.clone()),
            water: WaterClient::new(gateway.clone()),
            exercise: ExerciseClient::new(gateway.clone()),
            weight: WeightClient::new(gateway.clone()),
            summary: SummaryClient::new(gateway.clone()),
            foods: FoodsClient::new(gateway.clone()),
            gateway,
        }
    }
}
