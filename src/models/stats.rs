//! Per-user activity statistics.
//!
//! These counts are re-derived from the trip and electricity tables on
//! every request; nothing here is cached or incrementally updated.

use serde::{Deserialize, Serialize};

/// Which underlying count an achievement category tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    ActiveDays,
    TotalTrips,
    PublicTrips,
    BikeTrips,
    ElectricityMonths,
}

/// Derived usage statistics for a single user.
///
/// A user with no records has all-zero stats; an unknown username is not
/// an error at this layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserStats {
    /// Distinct dates with at least one logged trip
    pub active_days: u32,
    /// Total logged trips
    pub total_trips: u32,
    /// Trips on public transport (Bus or Train)
    pub public_trips: u32,
    /// Trips by bike
    pub bike_trips: u32,
    /// Distinct months with logged electricity usage
    pub electricity_months: u32,
}

impl UserStats {
    /// Look up the count backing a given stat kind.
    pub fn stat(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::ActiveDays => self.active_days,
            StatKind::TotalTrips => self.total_trips,
            StatKind::PublicTrips => self.public_trips,
            StatKind::BikeTrips => self.bike_trips,
            StatKind::ElectricityMonths => self.electricity_months,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_lookup_matches_fields() {
        let stats = UserStats {
            active_days: 1,
            total_trips: 2,
            public_trips: 3,
            bike_trips: 4,
            electricity_months: 5,
        };

        assert_eq!(stats.stat(StatKind::ActiveDays), 1);
        assert_eq!(stats.stat(StatKind::TotalTrips), 2);
        assert_eq!(stats.stat(StatKind::PublicTrips), 3);
        assert_eq!(stats.stat(StatKind::BikeTrips), 4);
        assert_eq!(stats.stat(StatKind::ElectricityMonths), 5);
    }

    #[test]
    fn test_default_is_all_zero() {
        let stats = UserStats::default();
        assert_eq!(stats.active_days, 0);
        assert_eq!(stats.total_trips, 0);
        assert_eq!(stats.public_trips, 0);
        assert_eq!(stats.bike_trips, 0);
        assert_eq!(stats.electricity_months, 0);
    }
}
