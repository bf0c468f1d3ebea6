// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Automatic trip recording support.
//!
//! An automatic trip spans two requests: `start` stores the departure
//! point, `finish` computes the haversine distance to the arrival point
//! and logs the trip. The in-progress starts live in a shared per-user
//! map on [`crate::AppState`], never in ambient session state.

use std::sync::Arc;

use dashmap::DashMap;

use crate::services::emissions::round2;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Departure point of an in-progress automatic trip.
#[derive(Debug, Clone)]
pub struct TripStart {
    pub lat: f64,
    pub lon: f64,
    /// Wall-clock start time (HH:MM:SS)
    pub started_at: String,
}

/// In-progress automatic trips, keyed by username.
///
/// Starting again before finishing overwrites the previous departure
/// point (last write wins).
#[derive(Debug, Clone, Default)]
pub struct PendingTrips {
    inner: Arc<DashMap<String, TripStart>>,
}

impl PendingTrips {
    /// Record a departure point for a user.
    pub fn start(&self, username: &str, start: TripStart) {
        self.inner.insert(username.to_string(), start);
    }

    /// Take the pending departure point, if any, removing it.
    pub fn take(&self, username: &str) -> Option<TripStart> {
        self.inner.remove(username).map(|(_, start)| start)
    }
}

/// Great-circle distance between two coordinates, rounded to 2 decimals (km).
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);

    round2(EARTH_RADIUS_KM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt()))
}
