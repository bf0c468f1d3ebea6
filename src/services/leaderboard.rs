// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard ranking service.
//!
//! Aggregates achievement points and total emission per user and produces
//! a sorted ranking. Everything is re-derived from the store on each call.

use serde::Serialize;

use crate::db::Db;
use crate::error::Result;
use crate::services::{achievements, emissions};

/// One leaderboard row.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub points: u32,
    /// Travel + electricity emission, summed raw and rounded once (kg)
    pub total_emission_kg: f64,
}

/// Build the full leaderboard, one entry per known user.
///
/// Users without any records simply score zero; a missing user is never
/// an error. Store failures propagate — no partial leaderboard.
pub async fn build(db: &Db) -> Result<Vec<LeaderboardEntry>> {
    let usernames = db.list_users().await?;
    let mut entries = Vec::with_capacity(usernames.len());

    for username in usernames {
        let stats = db.user_stats(&username).await?;
        let (_, points) = achievements::unlocked_achievements(&stats);

        let trip_rows = db.trip_emission_rows(&username).await?;
        let travel_raw = emissions::travel_emission_raw(&trip_rows);
        let electricity_raw = db.electricity_total(&username).await?;

        entries.push(LeaderboardEntry {
            username,
            points,
            total_emission_kg: emissions::round2(travel_raw + electricity_raw),
        });
    }

    Ok(rank_entries(entries))
}

/// Sort entries by points descending.
///
/// The sort is stable, so users with equal points keep their enumeration
/// order (store creation order) — ties are deterministic.
pub fn rank_entries(mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    entries.sort_by(|a, b| b.points.cmp(&a.points));
    entries
}

/// 1-based rank of a user, or `None` if absent from the list.
pub fn rank_of(entries: &[LeaderboardEntry], username: &str) -> Option<usize> {
    entries
        .iter()
        .position(|entry| entry.username == username)
        .map(|index| index + 1)
}
