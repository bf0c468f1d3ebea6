// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end trip logging flows.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

fn authed(token: &str, method: &str, uri: &str, body: Option<&str>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn test_log_and_list_manual_trip() {
    let (app, state) = common::create_test_app();
    common::seed_user(&state, "asha").await;
    let token = common::create_test_jwt("asha", &state.config.jwt_signing_key);

    let response = app
        .clone()
        .oneshot(authed(
            &token,
            "POST",
            "/api/trips",
            Some(r#"{"vehicle": "Car", "distance_km": 10.0}"#),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let logged = common::body_json(response).await;
    assert_eq!(logged["emission_kg"], 1.92);
    assert_eq!(logged["mode"], "manual");

    let response = app
        .oneshot(authed(&token, "GET", "/api/trips", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;

    let trips = body["trips"].as_array().unwrap();
    assert_eq!(trips.len(), 1);
    assert_eq!(trips[0]["vehicle"], "Car");
    assert_eq!(trips[0]["emission_kg"], 1.92);
}

#[tokio::test]
async fn test_delete_own_trip() {
    let (app, state) = common::create_test_app();
    common::seed_user(&state, "asha").await;
    let token = common::create_test_jwt("asha", &state.config.jwt_signing_key);

    let response = app
        .clone()
        .oneshot(authed(
            &token,
            "POST",
            "/api/trips",
            Some(r#"{"vehicle": "Bus", "distance_km": 3.0}"#),
        ))
        .await
        .unwrap();
    let trip_id = common::body_json(response).await["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(authed(&token, "DELETE", &format!("/api/trips/{}", trip_id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(authed(&token, "GET", "/api/trips", None))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert!(body["trips"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_cannot_delete_someone_elses_trip() {
    let (app, state) = common::create_test_app();
    common::seed_user(&state, "asha").await;
    common::seed_user(&state, "ravi").await;
    let asha = common::create_test_jwt("asha", &state.config.jwt_signing_key);
    let ravi = common::create_test_jwt("ravi", &state.config.jwt_signing_key);

    let response = app
        .clone()
        .oneshot(authed(
            &asha,
            "POST",
            "/api/trips",
            Some(r#"{"vehicle": "Car", "distance_km": 2.0}"#),
        ))
        .await
        .unwrap();
    let trip_id = common::body_json(response).await["id"].as_i64().unwrap();

    let response = app
        .oneshot(authed(&ravi, "DELETE", &format!("/api/trips/{}", trip_id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_automatic_trip_start_finish() {
    let (app, state) = common::create_test_app();
    common::seed_user(&state, "asha").await;
    let token = common::create_test_jwt("asha", &state.config.jwt_signing_key);

    let response = app
        .clone()
        .oneshot(authed(
            &token,
            "POST",
            "/api/trips/start",
            Some(r#"{"lat": 12.9716, "lon": 77.5946}"#),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await["status"], "started");

    let response = app
        .clone()
        .oneshot(authed(
            &token,
            "POST",
            "/api/trips/finish",
            Some(r#"{"vehicle": "Bus", "lat": 13.0827, "lon": 80.2707}"#),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let finished = common::body_json(response).await;

    let distance = finished["distance_km"].as_f64().unwrap();
    assert!(distance > 250.0 && distance < 350.0, "got {distance}");

    // The trip is persisted with its geo data and automatic mode.
    let response = app
        .oneshot(authed(&token, "GET", "/api/trips", None))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    let trips = body["trips"].as_array().unwrap();
    assert_eq!(trips.len(), 1);
    assert_eq!(trips[0]["mode"], "automatic");

    // Finishing again without a new start fails.
    let response = app_finish_again(&state, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

async fn app_finish_again(
    state: &std::sync::Arc<carbon_tracker::AppState>,
    token: &str,
) -> axum::response::Response {
    carbon_tracker::routes::create_router(state.clone())
        .oneshot(authed(
            token,
            "POST",
            "/api/trips/finish",
            Some(r#"{"vehicle": "Bus", "lat": 13.0, "lon": 80.0}"#),
        ))
        .await
        .unwrap()
}
