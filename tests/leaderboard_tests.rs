// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard ordering, tie-breaks, and rank reporting.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

async fn get_leaderboard_as(
    app: axum::Router,
    state: &std::sync::Arc<carbon_tracker::AppState>,
    username: &str,
) -> serde_json::Value {
    let token = common::create_test_jwt(username, &state.config.jwt_signing_key);
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/leaderboard")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    common::body_json(response).await
}

/// Give a user 10 car trips on 10 distinct days: 90 points
/// (consistency 7 days → 50, travel 10 trips → 40), 19.2 kg travel.
async fn seed_ninety_point_user(
    state: &std::sync::Arc<carbon_tracker::AppState>,
    username: &str,
) {
    common::seed_user(state, username).await;
    for day in 1..=10 {
        common::seed_trip(state, username, "Car", 10.0, &format!("2026-07-{:02}", day)).await;
    }
}

#[tokio::test]
async fn test_equal_points_keep_signup_order() {
    let (app, state) = common::create_test_app();
    seed_ninety_point_user(&state, "asha").await;
    seed_ninety_point_user(&state, "ravi").await;
    common::seed_user(&state, "zoe").await;
    common::seed_trip(&state, "zoe", "Car", 1.0, "2026-07-01").await;

    let body = get_leaderboard_as(app, &state, "zoe").await;

    let rows = body["leaderboard"].as_array().unwrap();
    let order: Vec<&str> = rows.iter().map(|r| r["username"].as_str().unwrap()).collect();
    assert_eq!(order, vec!["asha", "ravi", "zoe"]);

    assert_eq!(rows[0]["points"], 90);
    assert_eq!(rows[1]["points"], 90);
    assert_eq!(rows[2]["points"], 0);

    assert_eq!(body["total_users"], 3);
    assert_eq!(body["your_rank"], 3);
    assert_eq!(body["your_points"], 0);
}

#[tokio::test]
async fn test_emission_totals_combine_travel_and_electricity() {
    let (app, state) = common::create_test_app();
    seed_ninety_point_user(&state, "asha").await;
    common::seed_electricity(&state, "asha", "2026-06", 100.0).await;

    let body = get_leaderboard_as(app, &state, "asha").await;

    let rows = body["leaderboard"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    // 10 trips * 10 km * 0.192 + 100 kWh * 0.82 = 19.2 + 82.0
    assert_eq!(rows[0]["total_emission_kg"], 101.2);
    assert_eq!(body["your_rank"], 1);
    assert_eq!(body["your_emission_kg"], 101.2);
}

#[tokio::test]
async fn test_users_without_records_rank_with_zeroes() {
    let (app, state) = common::create_test_app();
    common::seed_user(&state, "asha").await;

    let body = get_leaderboard_as(app, &state, "asha").await;

    let rows = body["leaderboard"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["points"], 0);
    assert_eq!(rows[0]["total_emission_kg"], 0.0);
    assert_eq!(body["your_rank"], 1);
}
