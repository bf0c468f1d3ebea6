// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Level engine.
//!
//! Maps cumulative achievement points to a named level.

use serde::Serialize;

/// A named level milestone.
#[derive(Debug, Clone, Serialize)]
pub struct LevelDef {
    pub name: &'static str,
    /// Minimum points required (strictly increasing; first entry is 0)
    pub min_points: u32,
}

/// All level definitions, in ascending point order.
pub static LEVELS: &[LevelDef] = &[
    LevelDef { name: "🌱 Seed", min_points: 0 },
    LevelDef { name: "🌿 Sprout", min_points: 300 },
    LevelDef { name: "🌳 Tree", min_points: 1000 },
    LevelDef { name: "🌲 Forest", min_points: 3000 },
    LevelDef { name: "🏆 Guardian", min_points: 8000 },
    LevelDef { name: "👑 Legend", min_points: 20000 },
];

/// Current level for a point total, plus the next level if any.
///
/// The current level is the last definition whose `min_points` is at or
/// below the total; the first definition always qualifies since its
/// threshold is 0.
pub fn level_for_points(points: u32) -> (&'static LevelDef, Option<&'static LevelDef>) {
    let index = LEVELS
        .iter()
        .rposition(|level| points >= level.min_points)
        .unwrap_or(0);

    (&LEVELS[index], LEVELS.get(index + 1))
}
