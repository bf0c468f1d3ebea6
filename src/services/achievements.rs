// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Achievement engine.
//!
//! Derives unlocked achievement tiers, cumulative points, and per-category
//! progress from a user's [`UserStats`]. Unlocks are cumulative: clearing a
//! tier also credits every earlier tier in the same category.

use serde::Serialize;

use crate::models::{StatKind, UserStats};

/// A (threshold, reward) step within an achievement category.
#[derive(Debug, Clone, Copy)]
pub struct Tier {
    /// Stat value at which this tier unlocks (always ≥ 1)
    pub threshold: u32,
    /// Points awarded for unlocking
    pub reward: u32,
}

/// Static achievement category definition.
#[derive(Debug, Clone)]
pub struct AchievementCategory {
    pub key: &'static str,
    /// Which user stat this category tracks
    pub stat: StatKind,
    /// Unit label used in achievement names ("days", "trips", ...)
    pub unit: &'static str,
    pub description: &'static str,
    /// Tiers in strictly increasing threshold order
    pub tiers: &'static [Tier],
}

/// All achievement categories.
pub static CATEGORIES: &[AchievementCategory] = &[
    AchievementCategory {
        key: "consistency",
        stat: StatKind::ActiveDays,
        unit: "days",
        description: "Stay active on the app",
        tiers: &[
            Tier { threshold: 7, reward: 50 },
            Tier { threshold: 30, reward: 150 },
            Tier { threshold: 90, reward: 400 },
            Tier { threshold: 180, reward: 1000 },
            Tier { threshold: 365, reward: 3000 },
        ],
    },
    AchievementCategory {
        key: "travel",
        stat: StatKind::TotalTrips,
        unit: "trips",
        description: "Log your daily travel",
        tiers: &[
            Tier { threshold: 10, reward: 40 },
            Tier { threshold: 50, reward: 120 },
            Tier { threshold: 200, reward: 350 },
            Tier { threshold: 500, reward: 1000 },
            Tier { threshold: 2000, reward: 3000 },
        ],
    },
    AchievementCategory {
        key: "public_transport",
        stat: StatKind::PublicTrips,
        unit: "eco trips",
        description: "Use low-emission transport",
        tiers: &[
            Tier { threshold: 10, reward: 80 },
            Tier { threshold: 50, reward: 250 },
            Tier { threshold: 200, reward: 900 },
        ],
    },
    AchievementCategory {
        key: "cycling",
        stat: StatKind::BikeTrips,
        unit: "rides",
        description: "Choose cycling over vehicles",
        tiers: &[
            Tier { threshold: 5, reward: 50 },
            Tier { threshold: 25, reward: 150 },
            Tier { threshold: 100, reward: 500 },
        ],
    },
    AchievementCategory {
        key: "electricity",
        stat: StatKind::ElectricityMonths,
        unit: "months",
        description: "Log electricity usage",
        tiers: &[
            Tier { threshold: 3, reward: 60 },
            Tier { threshold: 6, reward: 200 },
            Tier { threshold: 12, reward: 600 },
        ],
    },
];

/// An unlocked achievement tier.
#[derive(Debug, Clone, Serialize)]
pub struct UnlockedAchievement {
    /// Display label, `"<threshold> <unit>"`
    pub label: String,
    /// Points this tier contributed
    pub points: u32,
}

/// Compute all unlocked achievements and the cumulative point total.
///
/// A tier is unlocked iff the category's stat meets its threshold, so a
/// user who clears tier 3 also gets credit for tiers 1 and 2.
pub fn unlocked_achievements(stats: &UserStats) -> (Vec<UnlockedAchievement>, u32) {
    let mut achievements = Vec::new();
    let mut points = 0;

    for category in CATEGORIES {
        let value = stats.stat(category.stat);

        for tier in category.tiers {
            if value >= tier.threshold {
                achievements.push(UnlockedAchievement {
                    label: format!("{} {}", tier.threshold, category.unit),
                    points: tier.reward,
                });
                points += tier.reward;
            }
        }
    }

    (achievements, points)
}

/// Progress toward the next tier of one category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryProgress {
    /// Label of the active tier, `"<threshold> <unit>"`
    pub label: String,
    pub description: &'static str,
    /// Current progress, clamped to the target
    pub current: u32,
    /// Active tier threshold
    pub target: u32,
    pub unit: &'static str,
    /// Reward of the active tier
    pub points: u32,
    /// floor(current / target * 100), always in [0, 100]
    pub percent: u32,
    /// Whether the stat already meets the active tier's threshold
    pub unlocked: bool,
}

/// Per-category progress toward the next tier to unlock.
///
/// The active tier is the first whose threshold exceeds the stat value;
/// once every tier is cleared it stays pinned to the last (highest) one.
pub fn achievement_progress(stats: &UserStats) -> Vec<CategoryProgress> {
    CATEGORIES
        .iter()
        .map(|category| {
            let value = stats.stat(category.stat);

            let active = category
                .tiers
                .iter()
                .find(|tier| value < tier.threshold)
                .unwrap_or_else(|| {
                    category
                        .tiers
                        .last()
                        .expect("every category has at least one tier")
                });

            let current = value.min(active.threshold);
            // Config guarantees threshold >= 1, so no division by zero.
            let percent = (u64::from(current) * 100 / u64::from(active.threshold)) as u32;

            CategoryProgress {
                label: format!("{} {}", active.threshold, category.unit),
                description: category.description,
                current,
                target: active.threshold,
                unit: category.unit,
                points: active.reward,
                percent,
                unlocked: value >= active.threshold,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stats() -> UserStats {
        UserStats {
            active_days: 35,
            total_trips: 60,
            public_trips: 12,
            bike_trips: 6,
            electricity_months: 4,
        }
    }

    #[test]
    fn test_thresholds_strictly_increase() {
        for category in CATEGORIES {
            for pair in category.tiers.windows(2) {
                assert!(
                    pair[0].threshold < pair[1].threshold,
                    "tiers out of order in {}",
                    category.key
                );
            }
            assert!(category.tiers.iter().all(|t| t.threshold >= 1));
        }
    }

    #[test]
    fn test_unlocks_are_cumulative() {
        let (achievements, points) = unlocked_achievements(&sample_stats());

        // consistency: 7 + 30; travel: 10 + 50; public_transport: 10;
        // cycling: 5; electricity: 3.
        let labels: Vec<&str> = achievements.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "7 days",
                "30 days",
                "10 trips",
                "50 trips",
                "10 eco trips",
                "5 rides",
                "3 months",
            ]
        );
        assert_eq!(points, 550);
    }

    #[test]
    fn test_total_equals_sum_of_rewards() {
        let (achievements, points) = unlocked_achievements(&sample_stats());
        let sum: u32 = achievements.iter().map(|a| a.points).sum();
        assert_eq!(points, sum);

        let (none, zero) = unlocked_achievements(&UserStats::default());
        assert!(none.is_empty());
        assert_eq!(zero, 0);
    }

    #[test]
    fn test_highest_threshold_unlocks_every_tier() {
        let stats = UserStats {
            active_days: 365,
            ..UserStats::default()
        };

        let (achievements, points) = unlocked_achievements(&stats);
        assert_eq!(achievements.len(), 5);
        assert_eq!(points, 50 + 150 + 400 + 1000 + 3000);
    }

    #[test]
    fn test_progress_bounds() {
        for stats in [
            UserStats::default(),
            sample_stats(),
            UserStats {
                active_days: 10_000,
                total_trips: 10_000,
                public_trips: 10_000,
                bike_trips: 10_000,
                electricity_months: 10_000,
            },
        ] {
            for entry in achievement_progress(&stats) {
                assert!(entry.current <= entry.target);
                assert!(entry.percent <= 100);
                assert_eq!(entry.unlocked, entry.current >= entry.target);
            }
        }
    }

    #[test]
    fn test_progress_active_tier_selection() {
        let progress = achievement_progress(&sample_stats());

        // active_days = 35: next consistency tier is 90 days.
        let consistency = &progress[0];
        assert_eq!(consistency.label, "90 days");
        assert_eq!(consistency.current, 35);
        assert_eq!(consistency.target, 90);
        assert_eq!(consistency.percent, 38); // floor(35/90 * 100)
        assert!(!consistency.unlocked);
    }

    #[test]
    fn test_progress_pins_to_last_tier_when_maxed() {
        let stats = UserStats {
            bike_trips: 500,
            ..UserStats::default()
        };

        let cycling = achievement_progress(&stats)
            .into_iter()
            .find(|p| p.unit == "rides")
            .unwrap();

        assert_eq!(cycling.label, "100 rides");
        assert_eq!(cycling.current, 100);
        assert_eq!(cycling.target, 100);
        assert_eq!(cycling.percent, 100);
        assert!(cycling.unlocked);
    }
}
