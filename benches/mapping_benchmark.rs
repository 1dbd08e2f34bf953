use calai_client::models::{Meal, WireDailySummary, WireMeal};
use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};
use std::hint::black_box;

/// A busy day: 8 meals with 5 foods each.
fn day_of_meals() -> Value {
    let meals: Vec<Value> = (0..8)
        .map(|m| {
            let foods: Vec<Value> = (0..5)
                .map(|f| {
                    json!({
                        "name": format!("food {m}-{f}"),
                        "grams": 100 + f * 20,
                        "calories": 120.5 + f as f64,
                        "protein_g": 8.2, "carbs_g": 15.0, "fat_g": 4.1,
                        "model_label": "generic", "confidence": 0.82
                    })
                })
                .collect();
            json!({
                "meal_id": format!("meal-{m}"),
                "timestamp": "2024-05-01T12:00:00",
                "source": "image",
                "original_input": "photo",
                "foods": foods,
                "total_calories": 612.5,
                "total_macros": {"protein_g": 41, "carbs_g": 75, "fat_g": 20.5},
                "confidence_score": 0.8
            })
        })
        .collect();
    Value::Array(meals)
}

fn benchmark_wire_mapping(c: &mut Criterion) {
    let body = serde_json::to_string(&day_of_meals()).expect("Failed to encode fixture");
    let summary_body = json!({
        "date": "2024-05-01",
        "total_calories": 4900,
        "total_macros": {"protein_g": 328, "carbs_g": 600, "fat_g": 164},
        "remaining_calories": -2900
    })
    .to_string();

    let mut group = c.benchmark_group("wire_mapping");

    group.bench_function("day_of_meals", |b| {
        b.iter(|| {
            let wire: Vec<WireMeal> = serde_json::from_str(black_box(&body)).expect("decode");
            wire.into_iter().map(Meal::from).collect::<Vec<_>>()
        })
    });

    group.bench_function("daily_summary", |b| {
        b.iter(|| {
            let wire: WireDailySummary =
                serde_json::from_str(black_box(&summary_body)).expect("decode");
            wire.into_summary("2024-05-01")
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_wire_mapping);
criterion_main!(benches);
