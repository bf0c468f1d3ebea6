// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trip logging routes (manual and automatic).

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{NewTrip, TripMode, TripRecord};
use crate::services::emissions;
use crate::services::trips::{haversine_km, TripStart};
use crate::time_utils::{time_of_day, today};
use crate::AppState;

const MAX_VEHICLE_LEN: usize = 50;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/trips", get(list_trips).post(log_trip))
        .route("/api/trips/{id}", delete(delete_trip))
        .route("/api/trips/start", post(start_trip))
        .route("/api/trips/finish", post(finish_trip))
}

fn validate_vehicle(raw: &str) -> Result<String> {
    let vehicle = raw.trim();
    if vehicle.is_empty() {
        return Err(AppError::BadRequest("Vehicle required".to_string()));
    }
    if vehicle.len() > MAX_VEHICLE_LEN {
        return Err(AppError::BadRequest(format!(
            "Vehicle must be at most {MAX_VEHICLE_LEN} characters"
        )));
    }
    Ok(vehicle.to_string())
}

fn validate_distance(distance_km: f64) -> Result<()> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(AppError::BadRequest(
            "Distance must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

fn validate_coordinates(lat: f64, lon: f64) -> Result<()> {
    if !lat.is_finite() || !lon.is_finite() || !(-90.0..=90.0).contains(&lat)
        || !(-180.0..=180.0).contains(&lon)
    {
        return Err(AppError::BadRequest("Invalid coordinates".to_string()));
    }
    Ok(())
}

// ─── Listing ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct TripsQuery {
    /// Day to list (YYYY-MM-DD); defaults to today
    date: Option<String>,
}

/// One trip with its display emission.
#[derive(Serialize)]
pub struct TripResponse {
    pub id: i64,
    pub vehicle: String,
    pub distance_km: f64,
    pub mode: TripMode,
    pub emission_kg: f64,
}

impl From<TripRecord> for TripResponse {
    fn from(trip: TripRecord) -> Self {
        let emission_kg = emissions::trip_emission(&trip.vehicle, trip.distance_km);
        Self {
            id: trip.id,
            vehicle: trip.vehicle,
            distance_km: trip.distance_km,
            mode: trip.mode,
            emission_kg,
        }
    }
}

#[derive(Serialize)]
pub struct TripsResponse {
    pub date: String,
    pub trips: Vec<TripResponse>,
}

/// List the user's trips for a day.
async fn list_trips(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<TripsQuery>,
) -> Result<Json<TripsResponse>> {
    let date = match params.date {
        Some(raw) => {
            chrono::NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
                AppError::BadRequest("Invalid 'date' parameter: must be YYYY-MM-DD".to_string())
            })?;
            raw
        }
        None => today(),
    };

    let trips = state.db.trips_for_date(&user.username, &date).await?;

    Ok(Json(TripsResponse {
        date,
        trips: trips.into_iter().map(TripResponse::from).collect(),
    }))
}

// ─── Manual Logging ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct LogTripRequest {
    pub vehicle: String,
    pub distance_km: f64,
}

/// Log a manual trip for today.
async fn log_trip(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<LogTripRequest>,
) -> Result<Json<TripResponse>> {
    let vehicle = validate_vehicle(&req.vehicle)?;
    validate_distance(req.distance_km)?;

    let date = today();
    let trip = NewTrip::manual(&user.username, &vehicle, req.distance_km, &date);
    let id = state.db.insert_trip(&trip).await?;

    tracing::info!(
        username = %user.username,
        vehicle = %vehicle,
        distance_km = req.distance_km,
        "Trip logged"
    );

    Ok(Json(TripResponse {
        id,
        emission_kg: emissions::trip_emission(&vehicle, req.distance_km),
        vehicle,
        distance_km: req.distance_km,
        mode: TripMode::Manual,
    }))
}

// ─── Deletion ────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DeleteTripResponse {
    pub success: bool,
}

/// Delete one of the user's own trips.
async fn delete_trip(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(trip_id): Path<i64>,
) -> Result<Json<DeleteTripResponse>> {
    let deleted = state.db.delete_trip(trip_id, &user.username).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("Trip {trip_id} not found")));
    }

    tracing::info!(username = %user.username, trip_id, "Trip deleted");
    Ok(Json(DeleteTripResponse { success: true }))
}

// ─── Automatic Trips ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct StartTripRequest {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Serialize)]
pub struct StartTripResponse {
    pub status: &'static str,
}

/// Begin an automatic trip at the given coordinates.
async fn start_trip(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<StartTripRequest>,
) -> Result<Json<StartTripResponse>> {
    validate_coordinates(req.lat, req.lon)?;

    state.pending_trips.start(
        &user.username,
        TripStart {
            lat: req.lat,
            lon: req.lon,
            started_at: time_of_day(),
        },
    );

    tracing::debug!(username = %user.username, "Automatic trip started");
    Ok(Json(StartTripResponse { status: "started" }))
}

#[derive(Deserialize)]
pub struct FinishTripRequest {
    pub vehicle: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Serialize)]
pub struct FinishTripResponse {
    pub id: i64,
    pub distance_km: f64,
    pub emission_kg: f64,
}

/// Finish the pending automatic trip and log it.
async fn finish_trip(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<FinishTripRequest>,
) -> Result<Json<FinishTripResponse>> {
    let vehicle = validate_vehicle(&req.vehicle)?;
    validate_coordinates(req.lat, req.lon)?;

    let start = state
        .pending_trips
        .take(&user.username)
        .ok_or_else(|| AppError::BadRequest("No trip in progress".to_string()))?;

    let distance_km = haversine_km(start.lat, start.lon, req.lat, req.lon);

    let trip = NewTrip {
        username: user.username.clone(),
        vehicle: vehicle.clone(),
        distance_km,
        date: today(),
        mode: TripMode::Automatic,
        start_lat: Some(start.lat),
        start_lon: Some(start.lon),
        end_lat: Some(req.lat),
        end_lon: Some(req.lon),
        start_time: Some(start.started_at),
        end_time: Some(time_of_day()),
    };
    let id = state.db.insert_trip(&trip).await?;

    tracing::info!(
        username = %user.username,
        vehicle = %vehicle,
        distance_km,
        "Automatic trip recorded"
    );

    Ok(Json(FinishTripResponse {
        id,
        distance_km,
        emission_kg: emissions::trip_emission(&vehicle, distance_km),
    }))
}
