//! Electricity usage model for storage and API.

use serde::{Deserialize, Serialize};

/// Stored electricity usage record.
///
/// One record per user per month in practice, though not enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectricityRecord {
    /// Row ID
    pub id: i64,
    /// Owning username
    pub username: String,
    /// Billing month (YYYY-MM)
    pub month: String,
    /// Consumed units in kWh
    pub units_kwh: f64,
    /// CO₂ mass derived when the record was logged (kg)
    pub co2_kg: f64,
    /// Reference to the source bill, if any
    pub bill_reference: Option<String>,
    /// When the record was logged (RFC3339)
    pub logged_at: String,
}

/// An electricity record about to be inserted (no row ID yet).
#[derive(Debug, Clone)]
pub struct NewElectricity {
    pub username: String,
    pub month: String,
    pub units_kwh: f64,
    pub co2_kg: f64,
    pub bill_reference: Option<String>,
    pub logged_at: String,
}
