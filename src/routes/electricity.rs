// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Electricity usage logging routes.

use axum::{
    extract::State,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{ElectricityRecord, NewElectricity};
use crate::services::emissions;
use crate::time_utils::now_rfc3339;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/electricity", get(list_usage).post(log_usage))
}

#[derive(Deserialize)]
pub struct LogElectricityRequest {
    /// Billing month (YYYY-MM)
    pub month: String,
    pub units_kwh: f64,
    /// Reference to the source bill, if any
    #[serde(default)]
    pub bill_reference: Option<String>,
}

#[derive(Serialize)]
pub struct ElectricityResponse {
    pub id: i64,
    pub month: String,
    pub units_kwh: f64,
    pub co2_kg: f64,
}

fn validate_month(month: &str) -> Result<()> {
    // A month is valid iff "<month>-01" parses as a date.
    chrono::NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest("Invalid 'month' parameter: must be YYYY-MM".to_string())
    })?;
    Ok(())
}

/// Log a month of electricity usage; CO₂ is derived and stored.
async fn log_usage(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<LogElectricityRequest>,
) -> Result<Json<ElectricityResponse>> {
    validate_month(&req.month)?;
    if !req.units_kwh.is_finite() || req.units_kwh < 0.0 {
        return Err(AppError::BadRequest(
            "Units must be a non-negative number".to_string(),
        ));
    }

    let co2_kg = emissions::electricity_emission(req.units_kwh);
    let record = NewElectricity {
        username: user.username.clone(),
        month: req.month.clone(),
        units_kwh: req.units_kwh,
        co2_kg,
        bill_reference: req.bill_reference,
        logged_at: now_rfc3339(),
    };
    let id = state.db.insert_electricity(&record).await?;

    tracing::info!(
        username = %user.username,
        month = %req.month,
        units_kwh = req.units_kwh,
        co2_kg,
        "Electricity usage logged"
    );

    Ok(Json(ElectricityResponse {
        id,
        month: req.month,
        units_kwh: req.units_kwh,
        co2_kg,
    }))
}

#[derive(Serialize)]
pub struct ElectricityListResponse {
    pub records: Vec<ElectricityRecord>,
}

/// List the user's logged electricity months.
async fn list_usage(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ElectricityListResponse>> {
    let records = state.db.electricity_for_user(&user.username).await?;
    Ok(Json(ElectricityListResponse { records }))
}
