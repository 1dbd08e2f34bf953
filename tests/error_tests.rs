// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use calai_client::error::ApiError;
use calai_client::models::ManualMeal;
use validator::Validate;

#[test]
fn test_predicates() {
    let err = ApiError::AuthRequired("Invalid token".to_string());
    assert!(err.is_auth_required());
    assert!(!err.is_unreachable());
    assert_eq!(err.status(), None);

    let err = ApiError::Unreachable("connection refused".to_string());
    assert!(err.is_unreachable());
    assert!(!err.is_auth_required());

    let err = ApiError::Backend {
        status: 404,
        message: "Meal not found".to_string(),
    };
    assert_eq!(err.status(), Some(404));
    assert!(!err.is_auth_required());
}

#[test]
fn test_display_and_user_message() {
    let err = ApiError::Backend {
        status: 422,
        message: "Input should be greater than 0".to_string(),
    };
    assert_eq!(err.to_string(), "Input should be greater than 0");
    assert_eq!(err.user_message(), "Input should be greater than 0");

    let err = ApiError::Unreachable("timed out".to_string());
    assert_eq!(err.to_string(), "Backend unreachable: timed out");
    assert!(err.user_message().contains("connection"));

    let err = ApiError::Validation("Barcode is required".to_string());
    assert_eq!(err.user_message(), "Barcode is required");

    let err = ApiError::Decode("load meals: expected a sequence".to_string());
    assert!(!err.user_message().contains("sequence"));
}

#[test]
fn test_errors_clone_equal() {
    let err = ApiError::AuthRequired("rejected".to_string());
    assert_eq!(err.clone(), err);
}

#[test]
fn test_validation_reports_fields_in_name_order() {
    let meal = ManualMeal {
        food_name: String::new(),
        calories: -1.0,
        protein: -1.0,
        carbs: 0.0,
        fat: 0.0,
        serving_size: None,
        date: None,
    };

    for _ in 0..10 {
        let err = ApiError::from(meal.validate().unwrap_err());
        assert_eq!(
            err,
            ApiError::Validation("Calories cannot be negative".to_string())
        );
    }
}
