// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use carbon_tracker::config::Config;
use carbon_tracker::db::Db;
use carbon_tracker::models::{NewElectricity, NewTrip, User};
use carbon_tracker::routes::create_router;
use carbon_tracker::services::{emissions, PendingTrips};
use carbon_tracker::AppState;
use std::sync::Arc;

/// Create a test app over an in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let db = Db::open_in_memory().expect("Failed to open in-memory database");

    let state = Arc::new(AppState {
        config,
        db,
        pending_trips: PendingTrips::default(),
    });

    (create_router(state.clone()), state)
}

/// Create a session JWT for a test user.
#[allow(dead_code)]
pub fn create_test_jwt(username: &str, signing_key: &[u8]) -> String {
    carbon_tracker::middleware::auth::create_jwt(username, signing_key)
        .expect("Failed to create test JWT")
}

/// Insert a user directly into the store.
#[allow(dead_code)]
pub async fn seed_user(state: &Arc<AppState>, username: &str) {
    state
        .db
        .create_user(&User {
            username: username.to_string(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
        })
        .await
        .expect("Failed to seed user");
}

/// Insert a manual trip directly into the store.
#[allow(dead_code)]
pub async fn seed_trip(state: &Arc<AppState>, username: &str, vehicle: &str, km: f64, date: &str) {
    state
        .db
        .insert_trip(&NewTrip::manual(username, vehicle, km, date))
        .await
        .expect("Failed to seed trip");
}

/// Insert an electricity record directly into the store.
#[allow(dead_code)]
pub async fn seed_electricity(state: &Arc<AppState>, username: &str, month: &str, kwh: f64) {
    state
        .db
        .insert_electricity(&NewElectricity {
            username: username.to_string(),
            month: month.to_string(),
            units_kwh: kwh,
            co2_kg: emissions::electricity_emission(kwh),
            bill_reference: None,
            logged_at: "2026-01-01T00:00:00Z".to_string(),
        })
        .await
        .expect("Failed to seed electricity record");
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not valid JSON")
}
