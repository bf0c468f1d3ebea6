// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Emission calculation service.
//!
//! Converts logged activity (trips, electricity usage) into CO₂ mass using
//! fixed per-category factors. All functions are pure.
//!
//! Rounding rule: aggregate totals are computed by summing unrounded
//! per-record values and rounding once at the end. Per-record emissions
//! returned for listings are rounded for display only and are never summed.

use serde::Serialize;

/// Per-vehicle emission factors in kg CO₂ per km, in display order.
pub static EMISSION_FACTORS: &[(&str, f64)] = &[
    ("Car", 0.192),
    ("Bike", 0.103),
    ("Bus", 0.082),
    ("Train", 0.041),
];

/// Emission factor for electricity in kg CO₂ per kWh.
pub const ELECTRICITY_FACTOR: f64 = 0.82;

/// Combined daily emission at or below this is classified as low (kg).
const LOW_THRESHOLD_KG: f64 = 5.0;
/// Combined daily emission at or below this is classified as medium (kg).
const MEDIUM_THRESHOLD_KG: f64 = 10.0;

/// Round half-up (away from zero) to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Emission factor for a vehicle category.
///
/// Unknown categories are zero-rated rather than rejected: the trip is
/// kept, it just contributes no CO₂.
pub fn vehicle_factor(vehicle: &str) -> f64 {
    EMISSION_FACTORS
        .iter()
        .find(|(name, _)| *name == vehicle)
        .map(|(_, factor)| *factor)
        .unwrap_or(0.0)
}

/// CO₂ mass for a single trip, rounded for display (kg).
pub fn trip_emission(vehicle: &str, distance_km: f64) -> f64 {
    round2(distance_km * vehicle_factor(vehicle))
}

/// CO₂ mass for a month of electricity usage, rounded (kg).
///
/// This value is fixed at logging time and stored with the record.
pub fn electricity_emission(units_kwh: f64) -> f64 {
    round2(units_kwh * ELECTRICITY_FACTOR)
}

/// Unrounded travel emission across `(vehicle, distance_km)` rows (kg).
///
/// Callers round the result once at the aggregation boundary.
pub fn travel_emission_raw(rows: &[(String, f64)]) -> f64 {
    rows.iter()
        .map(|(vehicle, distance)| distance * vehicle_factor(vehicle))
        .sum()
}

/// Per-vehicle emission totals in first-appearance order of the rows.
///
/// Returned as an ordered list of pairs so report ordering is
/// deterministic. Each total is rounded once, after summing.
pub fn vehicle_totals(rows: &[(String, f64)]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();

    for (vehicle, distance) in rows {
        let emission = distance * vehicle_factor(vehicle);
        match totals.iter_mut().find(|(name, _)| name == vehicle) {
            Some((_, total)) => *total += emission,
            None => totals.push((vehicle.clone(), emission)),
        }
    }

    for (_, total) in &mut totals {
        *total = round2(*total);
    }
    totals
}

/// Qualitative band for a combined daily emission total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmissionBand {
    Low,
    Medium,
    High,
}

impl EmissionBand {
    /// Classify a combined emission total (kg).
    pub fn for_total(total_kg: f64) -> Self {
        if total_kg <= LOW_THRESHOLD_KG {
            Self::Low
        } else if total_kg <= MEDIUM_THRESHOLD_KG {
            Self::Medium
        } else {
            Self::High
        }
    }
}
