// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise logging.

use crate::error::Result;
use crate::models::{ExerciseLog, NewExercise, WireExerciseLog};
use crate::services::gateway::{resource_path, ApiRequest, SessionGateway};
use crate::services::meals::required_id;
use crate::time_utils::{date_or_today, format_date};
use chrono::NaiveDate;
use validator::Validate;

#[derive(Clone)]
pub struct ExerciseClient {
    gateway: SessionGateway,
}

impl ExerciseClient {
    pub fn new(gateway: SessionGateway) -> Self {
        Self { gateway }
    }

    pub async fn log(&self, mut exercise: NewExercise) -> Result<ExerciseLog> {
        exercise.name = exercise.name.trim().to_string();
        exercise.validate()?;

        // The backend spells this one field in camelCase.
        let request = ApiRequest::post("/exercise").json(&serde_json::json!({
            "name": exercise.name,
            "duration": exercise.duration_minutes,
            "caloriesBurned": exercise.calories_burned,
            "date": date_or_today(exercise.date),
        }))?;
        let log: WireExerciseLog = self.gateway.fetch(&request, "log exercise").await?;
        let log = ExerciseLog::from(log);
        tracing::info!(exercise_id = %log.id, minutes = log.duration_minutes, "Logged exercise");
        Ok(log)
    }

    pub async fn list(&self, date: Option<NaiveDate>) -> Result<Vec<ExerciseLog>> {
        let request = ApiRequest::get("/exercise").query_opt("date", date.map(format_date));
        let logs: Vec<WireExerciseLog> =
            self.gateway.fetch(&request, "load exercise logs").await?;
        Ok(logs.into_iter().map(ExerciseLog::from).collect())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = required_id(id, "Exercise log")?;
        let request = ApiRequest::delete(resource_path("/exercise", id));
        self.gateway.execute(&request, "delete exercise log").await
    }
}
