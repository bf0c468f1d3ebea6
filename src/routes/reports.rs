// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Report routes: emissions, suggestions, achievements, leaderboard.

use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::UserStats;
use crate::routes::trips::TripResponse;
use crate::services::achievements::{CategoryProgress, UnlockedAchievement};
use crate::services::emissions::{self, EmissionBand};
use crate::services::levels::LevelDef;
use crate::services::{
    achievement_progress, leaderboard, level_for_points, suggestions, unlocked_achievements,
    LeaderboardEntry,
};
use crate::time_utils::{current_month, today};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/emissions", get(get_emissions))
        .route("/api/suggestions", get(get_suggestions))
        .route("/api/achievements", get(get_achievements))
        .route("/api/leaderboard", get(get_leaderboard))
}

// ─── Emissions ───────────────────────────────────────────────

#[derive(Serialize)]
pub struct VehicleTotal {
    pub vehicle: String,
    pub emission_kg: f64,
}

#[derive(Serialize)]
pub struct EmissionsResponse {
    pub date: String,
    pub trips: Vec<TripResponse>,
    /// Today's travel emission, summed raw and rounded once (kg)
    pub travel_emission_kg: f64,
    /// Current month's electricity emission (kg)
    pub electricity_emission_kg: f64,
    /// Combined total, rounded once from the raw sums (kg)
    pub total_emission_kg: f64,
    /// Per-vehicle totals in first-appearance order
    pub vehicle_totals: Vec<VehicleTotal>,
    pub band: EmissionBand,
}

/// Today's emission report.
async fn get_emissions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<EmissionsResponse>> {
    let date = today();
    let trips = state.db.trips_for_date(&user.username, &date).await?;

    let rows: Vec<(String, f64)> = trips
        .iter()
        .map(|trip| (trip.vehicle.clone(), trip.distance_km))
        .collect();

    let travel_raw = emissions::travel_emission_raw(&rows);
    let electricity_raw = state
        .db
        .electricity_total_for_month(&user.username, &current_month())
        .await?;
    let total_emission_kg = emissions::round2(travel_raw + electricity_raw);

    let vehicle_totals = emissions::vehicle_totals(&rows)
        .into_iter()
        .map(|(vehicle, emission_kg)| VehicleTotal {
            vehicle,
            emission_kg,
        })
        .collect();

    Ok(Json(EmissionsResponse {
        date,
        trips: trips.into_iter().map(TripResponse::from).collect(),
        travel_emission_kg: emissions::round2(travel_raw),
        electricity_emission_kg: emissions::round2(electricity_raw),
        total_emission_kg,
        vehicle_totals,
        band: EmissionBand::for_total(total_emission_kg),
    }))
}

// ─── Suggestions ─────────────────────────────────────────────

#[derive(Serialize)]
pub struct SuggestionsResponse {
    /// Today's travel emission (kg)
    pub travel_emission_kg: f64,
    /// All-time electricity emission (kg)
    pub electricity_emission_kg: f64,
    pub suggestions: Vec<&'static str>,
    pub reduction_labels: Vec<&'static str>,
    pub reduction_values: Vec<f64>,
    pub improved_emission_kg: f64,
}

/// Reduction suggestions against the dominant emission source.
async fn get_suggestions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<SuggestionsResponse>> {
    let trips = state.db.trips_for_date(&user.username, &today()).await?;
    let rows: Vec<(String, f64)> = trips
        .iter()
        .map(|trip| (trip.vehicle.clone(), trip.distance_km))
        .collect();

    let travel_kg = emissions::round2(emissions::travel_emission_raw(&rows));
    let electricity_kg =
        emissions::round2(state.db.electricity_total(&user.username).await?);

    let report = suggestions::build(travel_kg, electricity_kg);

    Ok(Json(SuggestionsResponse {
        travel_emission_kg: travel_kg,
        electricity_emission_kg: electricity_kg,
        suggestions: report.suggestions,
        reduction_labels: report.reduction_labels,
        reduction_values: report.reduction_values,
        improved_emission_kg: report.improved_emission_kg,
    }))
}

// ─── Achievements ────────────────────────────────────────────

#[derive(Serialize)]
pub struct AchievementsResponse {
    pub achievements: Vec<UnlockedAchievement>,
    pub progress: Vec<CategoryProgress>,
    pub points: u32,
    pub level: &'static LevelDef,
    pub next_level: Option<&'static LevelDef>,
    pub stats: UserStats,
}

/// Unlocked achievements, progress, points, and level for the user.
async fn get_achievements(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<AchievementsResponse>> {
    let stats = state.db.user_stats(&user.username).await?;

    let (achievements, points) = unlocked_achievements(&stats);
    let progress = achievement_progress(&stats);
    let (level, next_level) = level_for_points(points);

    Ok(Json(AchievementsResponse {
        achievements,
        progress,
        points,
        level,
        next_level,
        stats,
    }))
}

// ─── Leaderboard ─────────────────────────────────────────────

#[derive(Serialize)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub total_users: usize,
    /// 1-based rank of the caller, absent if unranked
    pub your_rank: Option<usize>,
    pub your_points: u32,
    pub your_emission_kg: f64,
}

/// Full ranking plus the caller's own position.
async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<LeaderboardResponse>> {
    let entries = leaderboard::build(&state.db).await?;

    let your_rank = leaderboard::rank_of(&entries, &user.username);
    let yours = entries.iter().find(|entry| entry.username == user.username);
    let your_points = yours.map(|entry| entry.points).unwrap_or(0);
    let your_emission_kg = yours.map(|entry| entry.total_emission_kg).unwrap_or(0.0);

    Ok(Json(LeaderboardResponse {
        total_users: entries.len(),
        your_rank,
        your_points,
        your_emission_kg,
        leaderboard: entries,
    }))
}
