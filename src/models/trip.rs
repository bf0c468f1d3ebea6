// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trip model for storage and API.

use serde::{Deserialize, Serialize};

/// How a trip was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripMode {
    /// Entered by hand with an explicit distance
    Manual,
    /// Recorded via start/finish coordinates
    Automatic,
}

impl TripMode {
    /// String form used in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Automatic => "automatic",
        }
    }

    /// Parse from the database string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "manual" => Some(Self::Manual),
            "automatic" => Some(Self::Automatic),
            _ => None,
        }
    }
}

/// Stored trip record.
///
/// Immutable once created, except for deletion by its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRecord {
    /// Row ID
    pub id: i64,
    /// Owning username
    pub username: String,
    /// Vehicle category (Car, Bike, Bus, Train, or anything else —
    /// unknown categories are zero-rated, not rejected)
    pub vehicle: String,
    /// Distance in kilometers
    pub distance_km: f64,
    /// Trip date (YYYY-MM-DD)
    pub date: String,
    /// How the trip was recorded
    pub mode: TripMode,
    /// Start coordinates (automatic trips only)
    pub start_lat: Option<f64>,
    pub start_lon: Option<f64>,
    /// End coordinates (automatic trips only)
    pub end_lat: Option<f64>,
    pub end_lon: Option<f64>,
    /// Start/end wall-clock times (HH:MM:SS, automatic trips only)
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// A trip about to be inserted (no row ID yet).
#[derive(Debug, Clone)]
pub struct NewTrip {
    pub username: String,
    pub vehicle: String,
    pub distance_km: f64,
    pub date: String,
    pub mode: TripMode,
    pub start_lat: Option<f64>,
    pub start_lon: Option<f64>,
    pub end_lat: Option<f64>,
    pub end_lon: Option<f64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl NewTrip {
    /// A manual trip for the given day, no geo data.
    pub fn manual(username: &str, vehicle: &str, distance_km: f64, date: &str) -> Self {
        Self {
            username: username.to_string(),
            vehicle: vehicle.to_string(),
            distance_km,
            date: date.to_string(),
            mode: TripMode::Manual,
            start_lat: None,
            start_lon: None,
            end_lat: None,
            end_lon: None,
            start_time: None,
            end_time: None,
        }
    }
}
