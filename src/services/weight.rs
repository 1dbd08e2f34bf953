// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Body-weight history.

use crate::error::{ApiError, Result};
use crate::models::{WeightLog, WeightRange, WireWeightLog};
use crate::services::gateway::{resource_path, ApiRequest, SessionGateway};
use crate::services::meals::required_id;
use crate::time_utils::{date_or_today, format_date};
use chrono::NaiveDate;

#[derive(Clone)]
pub struct WeightClient {
    gateway: SessionGateway,
}

impl WeightClient {
    pub fn new(gateway: SessionGateway) -> Self {
        Self { gateway }
    }

    pub async fn log(&self, weight_kg: f64, date: Option<NaiveDate>) -> Result<WeightLog> {
        if !(weight_kg.is_finite() && weight_kg > 0.0) {
            return Err(ApiError::Validation(
                "Weight must be greater than zero".into(),
            ));
        }

        let request = ApiRequest::post("/weight").json(&serde_json::json!({
            "weight": weight_kg,
            "date": date_or_today(date),
        }))?;
        let log: WireWeightLog = self.gateway.fetch(&request, "log weight").await?;
        Ok(WeightLog::from(log))
    }

    /// Weight entries between the optional inclusive bounds.
    pub async fn list(&self, range: WeightRange) -> Result<Vec<WeightLog>> {
        if let (Some(start), Some(end)) = (range.start, range.end) {
            if start > end {
                return Err(ApiError::Validation(
                    "Start date must not be after end date".into(),
                ));
            }
        }

        let request = ApiRequest::get("/weight")
            .query_opt("start", range.start.map(format_date))
            .query_opt("end", range.end.map(format_date));
        let logs: Vec<WireWeightLog> = self.gateway.fetch(&request, "load weight logs").await?;
        Ok(logs.into_iter().map(WeightLog::from).collect())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = required_id(id, "Weight log")?;
        let request = ApiRequest::delete(resource_path("/weight", id));
        self.gateway.execute(&request, "delete weight log").await
    }
}
