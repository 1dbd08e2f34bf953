// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meal logging: free text, photo, barcode and manual entry.

use crate::error::{ApiError, Result};
use crate::models::{BarcodeMeal, FoodItem, ImageUpload, ManualMeal, Meal, WireFood, WireMeal};
use crate::services::gateway::{resource_path, ApiRequest, SessionGateway};
use crate::time_utils::date_or_today;
use chrono::NaiveDate;
use validator::Validate;

/// Client for `/meals`.
#[derive(Clone)]
pub struct MealsClient {
    gateway: SessionGateway,
}

impl MealsClient {
    pub fn new(gateway: SessionGateway) -> Self {
        Self { gateway }
    }

    /// Log a meal from a natural-language description.
    pub async fn log_from_text(&self, description: &str) -> Result<Meal> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ApiError::Validation("Meal description is required".into()));
        }

        let request = ApiRequest::post("/meals/from-text")
            .json(&serde_json::json!({ "description": description }))?;
        let meal: WireMeal = self.gateway.fetch(&request, "log meal").await?;
        let meal = Meal::from(meal);
        tracing::info!(meal_id = %meal.id, foods = meal.foods.len(), "Logged meal from text");
        Ok(meal)
    }

    /// Upload a photo and log the recognised meal.
    pub async fn log_from_image(&self, upload: ImageUpload) -> Result<Meal> {
        upload.validate()?;

        let request = ApiRequest::post("/meals/from-image").file(upload);
        let meal: WireMeal = self.gateway.fetch(&request, "analyze image").await?;
        let meal = Meal::from(meal);
        tracing::info!(meal_id = %meal.id, foods = meal.foods.len(), "Logged meal from image");
        Ok(meal)
    }

    /// Recognise the foods in a photo without logging anything.
    pub async fn scan_image(&self, upload: ImageUpload) -> Result<Vec<FoodItem>> {
        upload.validate()?;

        let request = ApiRequest::post("/meals/scan").file(upload);
        let foods: Vec<WireFood> = self.gateway.fetch(&request, "scan image").await?;
        Ok(foods.into_iter().map(FoodItem::from).collect())
    }

    /// Log a packaged product by barcode.
    pub async fn log_from_barcode(&self, mut meal: BarcodeMeal) -> Result<Meal> {
        meal.barcode = meal.barcode.trim().to_string();
        meal.serving_description = meal
            .serving_description
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        meal.validate()?;

        let request = ApiRequest::post("/meals/from-barcode").json(&meal)?;
        let meal: WireMeal = self.gateway.fetch(&request, "log barcode meal").await?;
        Ok(Meal::from(meal))
    }

    /// Log a manually entered food; the date defaults to today.
    pub async fn log_manual(&self, mut meal: ManualMeal) -> Result<Meal> {
        meal.food_name = meal.food_name.trim().to_string();
        meal.validate()?;
        if meal.date.is_none() {
            meal.date = Some(date_or_today(None));
        }

        let request = ApiRequest::post("/meals").json(&meal)?;
        let meal: WireMeal = self.gateway.fetch(&request, "add food").await?;
        Ok(Meal::from(meal))
    }

    /// Meals logged on `date` (today when omitted).
    pub async fn list(&self, date: Option<NaiveDate>) -> Result<Vec<Meal>> {
        let request = ApiRequest::get("/meals").query("date", date_or_today(date));
        let meals: Vec<WireMeal> = self.gateway.fetch(&request, "load meals").await?;
        Ok(meals.into_iter().map(Meal::from).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Meal> {
        let id = required_id(id, "Meal")?;
        let request = ApiRequest::get(resource_path("/meals", id));
        let meal: WireMeal = self.gateway.fetch(&request, "load meal").await?;
        Ok(Meal::from(meal))
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = required_id(id, "Meal")?;
        let request = ApiRequest::delete(resource_path("/meals", id));
        self.gateway.execute(&request, "delete meal").await?;
        tracing::info!(meal_id = %id, "Deleted meal");
        Ok(())
    }
}

/// Trimmed, non-empty id or a validation error naming the resource.
pub(crate) fn required_id<'a>(id: &'a str, what: &str) -> Result<&'a str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::Validation(format!("{} id is required", what)));
    }
    Ok(id)
}
