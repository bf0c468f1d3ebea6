// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{Local, SecondsFormat, Utc};

/// Today's date as `YYYY-MM-DD` in local time.
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// The current month as `YYYY-MM` in local time.
pub fn current_month() -> String {
    Local::now().format("%Y-%m").to_string()
}

/// The current wall-clock time as `HH:MM:SS` in local time.
pub fn time_of_day() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// The current UTC timestamp as RFC3339 with a `Z` suffix.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
