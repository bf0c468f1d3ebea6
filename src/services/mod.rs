// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod achievements;
pub mod emissions;
pub mod leaderboard;
pub mod levels;
pub mod suggestions;
pub mod trips;

pub use achievements::{achievement_progress, unlocked_achievements};
pub use leaderboard::LeaderboardEntry;
pub use levels::level_for_points;
pub use trips::PendingTrips;
