// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod electricity;
pub mod stats;
pub mod trip;
pub mod user;

pub use electricity::{ElectricityRecord, NewElectricity};
pub use stats::{StatKind, UserStats};
pub use trip::{NewTrip, TripMode, TripRecord};
pub use user::User;
