// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Food database search.

use crate::error::{ApiError, Result};
use crate::models::food::WireSearchResponse;
use crate::models::FoodSearchResult;
use crate::services::gateway::{ApiRequest, SessionGateway};

#[derive(Clone)]
pub struct FoodsClient {
    gateway: SessionGateway,
}

impl FoodsClient {
    pub fn new(gateway: SessionGateway) -> Self {
        Self { gateway }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<FoodSearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::Validation("Search query is required".into()));
        }

        let request = ApiRequest::get("/meals/search").query("q", query);
        let response: WireSearchResponse = self.gateway.fetch(&request, "search foods").await?;
        Ok(response.into_results())
    }
}
