// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Water intake logging.

use crate::error::{ApiError, Result};
use crate::models::{WaterLog, WireWaterLog};
use crate::services::gateway::{resource_path, ApiRequest, SessionGateway};
use crate::services::meals::required_id;
use crate::time_utils::{date_or_today, format_date};
use chrono::NaiveDate;

#[derive(Clone)]
pub struct WaterClient {
    gateway: SessionGateway,
}

impl WaterClient {
    pub fn new(gateway: SessionGateway) -> Self {
        Self { gateway }
    }

    /// Log `amount_ml` milliliters on `date` (today when omitted).
    pub async fn log(&self, amount_ml: u32, date: Option<NaiveDate>) -> Result<WaterLog> {
        if amount_ml == 0 {
            return Err(ApiError::Validation(
                "Water amount must be greater than zero".into(),
            ));
        }

        let request = ApiRequest::post("/water").json(&serde_json::json!({
            "amount": amount_ml,
            "date": date_or_today(date),
        }))?;
        let log: WireWaterLog = self.gateway.fetch(&request, "log water").await?;
        Ok(WaterLog::from(log))
    }

    /// Water entries, optionally filtered to one day.
    pub async fn list(&self, date: Option<NaiveDate>) -> Result<Vec<WaterLog>> {
        let request = ApiRequest::get("/water").query_opt("date", date.map(format_date));
        let logs: Vec<WireWaterLog> = self.gateway.fetch(&request, "load water logs").await?;
        Ok(logs.into_iter().map(WaterLog::from).collect())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = required_id(id, "Water log")?;
        let request = ApiRequest::delete(resource_path("/water", id));
        self.gateway.execute(&request, "delete water log").await
    }
}
