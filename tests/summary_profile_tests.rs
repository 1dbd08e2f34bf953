// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

mod common;

use calai_client::models::{ActivityLevel, DailySummary, Gender, Goal, Profile, ProfileUpdate};
use calai_client::store::{MemoryStore, ProfileCache};
use chrono::NaiveDate;
use common::*;
use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn reference_profile() -> Profile {
    Profile {
        age: Some(30),
        height_cm: Some(170.0),
        weight_kg: Some(70.0),
        gender: Some(Gender::Male),
        activity_level: ActivityLevel::Moderate,
        goal: Goal::Maintain,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_summary_maps_totals() {
    let (server, store, client) = test_backend().await;
    seed_session(&store, "tok");
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/summary/day")
                .query_param("date", "2024-05-01");
            then.status(200).json_body(json!({
                "date": "2024-05-01",
                "total_calories": 1450,
                "total_macros": {"protein_g": 90, "carbs_g": 150, "fat_g": 40},
                "remaining_calories": 550,
                "total_water": 1500,
                "total_exercise": 300
            }));
        })
        .await;

    let summary = client
        .summary
        .day(NaiveDate::from_ymd_opt(2024, 5, 1))
        .await
        .unwrap();

    assert_eq!(summary.date, "2024-05-01");
    assert_eq!(summary.total_calories, 1450.0);
    assert_eq!(summary.total_macros.carbs, 150.0);
    assert_eq!(summary.remaining_calories, 550.0);
    assert_eq!(summary.total_water, Some(1500.0));
    assert_eq!(summary.total_exercise, Some(300.0));
}

#[tokio::test]
async fn test_summary_404_is_empty_day() {
    let (server, store, client) = test_backend().await;
    seed_session(&store, "tok");
    server
        .mock_async(|when, then| {
            when.method(GET).path("/summary/day");
            then.status(404).json_body(json!({"detail": "No data"}));
        })
        .await;

    let summary = client
        .summary
        .day(NaiveDate::from_ymd_opt(2024, 1, 2))
        .await
        .unwrap();

    assert_eq!(summary, DailySummary::empty("2024-01-02"));
    assert!(summary.is_empty());
}

#[tokio::test]
async fn test_summary_defaults_to_today() {
    let (server, store, client) = test_backend().await;
    seed_session(&store, "tok");
    let today = calai_client::time_utils::date_or_today(None);
    let expected = today.clone();
    let mock = server
        .mock_async(move |when, then| {
            when.method(GET).path("/summary/day").query_param("date", today);
            then.status(200).json_body(json!({}));
        })
        .await;

    let summary = client.summary.day(None).await.unwrap();

    assert_eq!(mock.calls_async().await, 1);
    assert_eq!(summary.date, expected);
}

#[tokio::test]
async fn test_summary_server_error_is_not_empty() {
    let (server, store, client) = test_backend().await;
    seed_session(&store, "tok");
    server
        .mock_async(|when, then| {
            when.method(GET).path("/summary/day");
            then.status(500);
        })
        .await;

    let err = client.summary.day(None).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Failed to load daily summary (HTTP 500)");
}

#[tokio::test]
async fn test_profile_fetch_and_update() {
    let (server, store, client) = test_backend().await;
    seed_session(&store, "tok");
    server
        .mock_async(|when, then| {
            when.method(GET).path("/user/profile");
            then.status(200)
                .json_body(json!({"user_id": "demo_user", "daily_calorie_target": 2000}));
        })
        .await;
    let put = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/user/profile")
                .json_body(json!({"timezone": "Europe/Berlin"}));
            then.status(200).json_body(json!({
                "user_id": "demo_user", "daily_calorie_target": 2000, "timezone": "Europe/Berlin"
            }));
        })
        .await;

    let remote = client.profile.fetch().await.unwrap();
    assert_eq!(remote.user_id, "demo_user");
    assert_eq!(remote.daily_calorie_target, 2000);
    assert_eq!(remote.timezone, "");

    let updated = client
        .profile
        .update(ProfileUpdate {
            daily_calorie_target: None,
            timezone: Some(" Europe/Berlin ".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(updated.timezone, "Europe/Berlin");
    assert_eq!(put.calls_async().await, 1);

    let err = client
        .profile
        .update(ProfileUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, calai_client::error::ApiError::Validation(_)));
}

#[tokio::test]
async fn test_profile_save_pushes_estimate_and_caches() {
    let (server, store, client) = test_backend().await;
    seed_session(&store, "tok");
    let put = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/user/profile")
                .json_body(json!({"daily_calorie_target": 2507, "timezone": "UTC"}));
            then.status(200).json_body(json!({
                "user_id": "demo_user", "daily_calorie_target": 2507, "timezone": "UTC"
            }));
        })
        .await;

    let profile = Profile {
        timezone: Some("UTC".to_string()),
        ..reference_profile()
    };
    let saved = client.profile.save(profile).await.unwrap();

    assert_eq!(put.calls_async().await, 1);
    assert_eq!(saved.daily_calorie_target, Some(2507));
    assert_eq!(saved.age, Some(30));
    assert_eq!(client.profile.cached(), Some(saved));
}

#[tokio::test]
async fn test_profile_load_merges_backend_fields() {
    let (server, store, client) = test_backend().await;
    seed_session(&store, "tok");
    ProfileCache::new(store.clone())
        .set(&reference_profile())
        .unwrap();
    server
        .mock_async(|when, then| {
            when.method(GET).path("/user/profile");
            then.status(200).json_body(json!({
                "user_id": "demo_user", "daily_calorie_target": 1800, "timezone": "Asia/Tokyo"
            }));
        })
        .await;

    let profile = client.profile.load().await.unwrap();

    assert_eq!(profile.age, Some(30));
    assert_eq!(profile.daily_calorie_target, Some(1800));
    assert_eq!(profile.timezone.as_deref(), Some("Asia/Tokyo"));
    assert_eq!(client.profile.cached(), Some(profile));
}

#[tokio::test]
async fn test_profile_load_falls_back_to_cache_when_offline() {
    let store = Arc::new(MemoryStore::new());
    seed_session(&store, "tok");
    ProfileCache::new(store.clone())
        .set(&reference_profile())
        .unwrap();
    let client = client_for(&closed_port_url(), store.clone());

    let profile = client.profile.load().await.unwrap();
    assert_eq!(profile, reference_profile());

    client.profile.clear_cache();
    assert!(client.profile.load().await.unwrap_err().is_unreachable());
}
