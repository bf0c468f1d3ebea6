// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Achievement, progress, and level reporting over seeded history.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

/// Seed a history that yields the reference stats:
/// active_days 35, total_trips 60, public_trips 12, bike_trips 6,
/// electricity_months 4.
async fn seed_reference_history(state: &std::sync::Arc<carbon_tracker::AppState>) {
    common::seed_user(state, "asha").await;

    let date = |day: usize| {
        if day <= 31 {
            format!("2026-07-{:02}", day)
        } else {
            format!("2026-08-{:02}", day - 31)
        }
    };

    // 12 public-transport trips on days 1-12
    for day in 1..=12 {
        common::seed_trip(state, "asha", "Bus", 5.0, &date(day)).await;
    }
    // 6 bike rides on days 13-18
    for day in 13..=18 {
        common::seed_trip(state, "asha", "Bike", 2.0, &date(day)).await;
    }
    // 17 car trips on days 19-35, plus 25 more on day 19: 42 car trips
    for day in 19..=35 {
        common::seed_trip(state, "asha", "Car", 8.0, &date(day)).await;
    }
    for _ in 0..25 {
        common::seed_trip(state, "asha", "Car", 8.0, &date(19)).await;
    }

    // 4 logged electricity months
    for month in ["2026-01", "2026-02", "2026-03", "2026-04"] {
        common::seed_electricity(state, "asha", month, 100.0).await;
    }
}

#[tokio::test]
async fn test_reference_history_scores_550_points() {
    let (app, state) = common::create_test_app();
    seed_reference_history(&state).await;
    let token = common::create_test_jwt("asha", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/achievements")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;

    // Stats derived from the seeded history
    assert_eq!(body["stats"]["active_days"], 35);
    assert_eq!(body["stats"]["total_trips"], 60);
    assert_eq!(body["stats"]["public_trips"], 12);
    assert_eq!(body["stats"]["bike_trips"], 6);
    assert_eq!(body["stats"]["electricity_months"], 4);

    // 200 + 160 + 80 + 50 + 60
    assert_eq!(body["points"], 550);
    assert_eq!(body["achievements"].as_array().unwrap().len(), 7);

    assert_eq!(body["level"]["name"], "🌿 Sprout");
    assert_eq!(body["next_level"]["name"], "🌳 Tree");
    assert_eq!(body["next_level"]["min_points"], 1000);
}

#[tokio::test]
async fn test_fresh_user_has_zero_points_and_lowest_level() {
    let (app, state) = common::create_test_app();
    common::seed_user(&state, "ravi").await;
    let token = common::create_test_jwt("ravi", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/achievements")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;

    assert_eq!(body["points"], 0);
    assert!(body["achievements"].as_array().unwrap().is_empty());
    assert_eq!(body["level"]["name"], "🌱 Seed");

    // Progress still lists every category with sane bounds.
    let progress = body["progress"].as_array().unwrap();
    assert_eq!(progress.len(), 5);
    for entry in progress {
        assert_eq!(entry["current"], 0);
        assert_eq!(entry["percent"], 0);
        assert_eq!(entry["unlocked"], false);
    }
}
