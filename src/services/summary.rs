// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily summary.

use crate::error::Result;
use crate::models::{DailySummary, WireDailySummary};
use crate::services::gateway::{read_json, ApiRequest, SessionGateway};
use crate::time_utils::date_or_today;
use chrono::NaiveDate;
use reqwest::StatusCode;

#[derive(Clone)]
pub struct SummaryClient {
    gateway: SessionGateway,
}

impl SummaryClient {
    pub fn new(gateway: SessionGateway) -> Self {
        Self { gateway }
    }

    /// Totals for `date` (today when omitted).
    ///
    /// A day the backend has no record of comes back as 404 and is
    /// reported as an empty summary.
    pub async fn day(&self, date: Option<NaiveDate>) -> Result<DailySummary> {
        let date = date_or_today(date);
        let request = ApiRequest::get("/summary/day").query("date", date.clone());
        let response = self.gateway.send(&request).await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(%date, "No summary recorded for day");
            return Ok(DailySummary::empty(date));
        }

        let summary: WireDailySummary = read_json(response, "load daily summary").await?;
        Ok(summary.into_summary(&date))
    }
}
