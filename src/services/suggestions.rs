// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Emission reduction suggestions.
//!
//! Picks the dominant emission source (travel vs electricity) and offers
//! estimated reductions against it.

use serde::Serialize;

use crate::services::emissions::round2;

/// Suggested actions with estimated reductions.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionReport {
    pub suggestions: Vec<&'static str>,
    pub reduction_labels: Vec<&'static str>,
    /// Estimated reduction per suggestion (kg)
    pub reduction_values: Vec<f64>,
    /// Projected total after applying the best single reduction (kg)
    pub improved_emission_kg: f64,
}

/// Build suggestions from the user's travel and electricity totals (kg).
///
/// Travel wins ties, matching how the suggestions were always presented.
pub fn build(travel_kg: f64, electricity_kg: f64) -> SuggestionReport {
    let (suggestions, reduction_labels, reduction_values) = if travel_kg >= electricity_kg {
        (
            vec!["Use public transport", "Walk for short distances", "Carpool"],
            vec!["Car → Bus", "Car → Walk", "Carpool"],
            vec![
                round2(travel_kg * 0.4),
                round2(travel_kg * 0.7),
                round2(travel_kg * 0.25),
            ],
        )
    } else {
        (
            vec!["Reduce AC usage", "Switch to LED", "Avoid standby power"],
            vec!["Reduce AC", "LED", "No Standby"],
            vec![
                round2(electricity_kg * 0.3),
                round2(electricity_kg * 0.2),
                round2(electricity_kg * 0.15),
            ],
        )
    };

    let best_reduction = reduction_values.iter().cloned().fold(0.0, f64::max);
    let improved_emission_kg = round2(travel_kg + electricity_kg - best_reduction);

    SuggestionReport {
        suggestions,
        reduction_labels,
        reduction_values,
        improved_emission_kg,
    }
}
