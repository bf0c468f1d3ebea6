// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Carbon-Tracker: personal carbon-footprint tracking service
//!
//! This crate provides the backend API for logging travel trips and
//! electricity usage, computing CO₂ emissions, and awarding gamified
//! achievements, levels, and leaderboard rankings.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Db;
use services::PendingTrips;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Db,
    pub pending_trips: PendingTrips,
}
