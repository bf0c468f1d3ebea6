// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SQLite store with typed operations.
//!
//! Provides high-level operations for:
//! - Users (signup and enumeration)
//! - Trips (logged travel)
//! - Electricity (monthly usage records)
//! - Derived per-user statistics
//!
//! A single connection is shared behind an async mutex; every statistics
//! read happens under one lock hold, so the five counts always come from
//! the same snapshot.

use std::path::Path;
use std::sync::Arc;

use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::models::{
    ElectricityRecord, NewElectricity, NewTrip, TripMode, TripRecord, User, UserStats,
};

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS trips (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    mode TEXT NOT NULL,
    vehicle TEXT NOT NULL,
    distance_km REAL NOT NULL,
    date TEXT NOT NULL,
    start_lat REAL,
    start_lon REAL,
    end_lat REAL,
    end_lon REAL,
    start_time TEXT,
    end_time TEXT
);
CREATE INDEX IF NOT EXISTS idx_trips_user_date ON trips(username, date);

CREATE TABLE IF NOT EXISTS electricity (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    month TEXT NOT NULL,
    units_kwh REAL NOT NULL,
    co2_kg REAL NOT NULL,
    bill_reference TEXT,
    logged_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_electricity_user ON electricity(username);
"#;

/// SQLite database client.
#[derive(Clone)]
pub struct Db {
    conn: Arc<Mutex<Connection>>,
}

impl Db {
    /// Open or create the database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| AppError::Database(format!("Failed to create data dir: {e}")))?;
            }
        }

        let conn = Connection::open(path.as_ref())
            .map_err(|e| AppError::Database(format!("Failed to open database: {e}")))?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .and_then(|_| conn.pragma_update(None, "synchronous", "NORMAL"))
            .and_then(|_| conn.pragma_update(None, "foreign_keys", "ON"))
            .map_err(|e| AppError::Database(e.to_string()))?;

        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| AppError::Database(format!("Failed to initialize schema: {e}")))?;

        tracing::info!(path = %path.as_ref().display(), "Opened SQLite database");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory database (used by tests).
    pub fn open_in_memory() -> Result<Self, AppError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AppError::Database(e.to_string()))?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Create a user. Fails with `Conflict` if the username is taken.
    pub async fn create_user(&self, user: &User) -> Result<(), AppError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO users (username, created_at) VALUES (?1, ?2)",
            params![user.username, user.created_at],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                AppError::Conflict(format!("Username '{}' already exists", user.username))
            }
            other => AppError::Database(other.to_string()),
        })?;
        Ok(())
    }

    /// Get a user by username.
    pub async fn get_user(&self, username: &str) -> Result<Option<User>, AppError> {
        let conn = self.conn.lock().await;
        conn.query_row(
            "SELECT username, created_at FROM users WHERE username = ?1",
            params![username],
            |row| {
                Ok(User {
                    username: row.get(0)?,
                    created_at: row.get(1)?,
                })
            },
        )
        .optional()
        .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All usernames in creation order.
    ///
    /// The leaderboard relies on this order being stable: it is the
    /// enumeration order preserved for equal-point ties.
    pub async fn list_users(&self) -> Result<Vec<String>, AppError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT username FROM users ORDER BY id")
            .map_err(|e| AppError::Database(e.to_string()))?;

        let users = stmt
            .query_map([], |row| row.get(0))
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<String>>>())
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(users)
    }

    // ─── Trip Operations ─────────────────────────────────────────

    /// Insert a trip, returning its row ID.
    pub async fn insert_trip(&self, trip: &NewTrip) -> Result<i64, AppError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO trips (
                username, mode, vehicle, distance_km, date,
                start_lat, start_lon, end_lat, end_lon,
                start_time, end_time
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                trip.username,
                trip.mode.as_str(),
                trip.vehicle,
                trip.distance_km,
                trip.date,
                trip.start_lat,
                trip.start_lon,
                trip.end_lat,
                trip.end_lon,
                trip.start_time,
                trip.end_time,
            ],
        )
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(conn.last_insert_rowid())
    }

    /// A user's trips for one date, in creation order.
    pub async fn trips_for_date(
        &self,
        username: &str,
        date: &str,
    ) -> Result<Vec<TripRecord>, AppError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(
                "SELECT id, username, vehicle, distance_km, date, mode,
                        start_lat, start_lon, end_lat, end_lon, start_time, end_time
                 FROM trips WHERE username = ?1 AND date = ?2 ORDER BY id",
            )
            .map_err(|e| AppError::Database(e.to_string()))?;

        let trips = stmt
            .query_map(params![username, date], trip_from_row)
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(trips)
    }

    /// Delete a trip owned by the given user.
    ///
    /// Returns `false` if no such trip exists (or it belongs to someone
    /// else — ownership is part of the predicate, not a separate check).
    pub async fn delete_trip(&self, trip_id: i64, username: &str) -> Result<bool, AppError> {
        let conn = self.conn.lock().await;
        let deleted = conn
            .execute(
                "DELETE FROM trips WHERE id = ?1 AND username = ?2",
                params![trip_id, username],
            )
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(deleted > 0)
    }

    /// All of a user's `(vehicle, distance_km)` rows in creation order,
    /// for emission aggregation.
    pub async fn trip_emission_rows(
        &self,
        username: &str,
    ) -> Result<Vec<(String, f64)>, AppError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT vehicle, distance_km FROM trips WHERE username = ?1 ORDER BY id")
            .map_err(|e| AppError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![username], |row| Ok((row.get(0)?, row.get(1)?)))
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows)
    }

    // ─── Electricity Operations ──────────────────────────────────

    /// Insert an electricity record, returning its row ID.
    pub async fn insert_electricity(&self, record: &NewElectricity) -> Result<i64, AppError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO electricity (username, month, units_kwh, co2_kg, bill_reference, logged_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.username,
                record.month,
                record.units_kwh,
                record.co2_kg,
                record.bill_reference,
                record.logged_at,
            ],
        )
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(conn.last_insert_rowid())
    }

    /// A user's electricity records, most recent month first.
    pub async fn electricity_for_user(
        &self,
        username: &str,
    ) -> Result<Vec<ElectricityRecord>, AppError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(
                "SELECT id, username, month, units_kwh, co2_kg, bill_reference, logged_at
                 FROM electricity WHERE username = ?1 ORDER BY month DESC, id DESC",
            )
            .map_err(|e| AppError::Database(e.to_string()))?;

        let records = stmt
            .query_map(params![username], |row| {
                Ok(ElectricityRecord {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    month: row.get(2)?,
                    units_kwh: row.get(3)?,
                    co2_kg: row.get(4)?,
                    bill_reference: row.get(5)?,
                    logged_at: row.get(6)?,
                })
            })
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(records)
    }

    /// Unrounded sum of a user's stored electricity CO₂ (kg).
    pub async fn electricity_total(&self, username: &str) -> Result<f64, AppError> {
        let conn = self.conn.lock().await;
        conn.query_row(
            "SELECT COALESCE(SUM(co2_kg), 0) FROM electricity WHERE username = ?1",
            params![username],
            |row| row.get(0),
        )
        .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Unrounded sum of a user's stored electricity CO₂ for one month (kg).
    pub async fn electricity_total_for_month(
        &self,
        username: &str,
        month: &str,
    ) -> Result<f64, AppError> {
        let conn = self.conn.lock().await;
        conn.query_row(
            "SELECT COALESCE(SUM(co2_kg), 0) FROM electricity WHERE username = ?1 AND month = ?2",
            params![username, month],
            |row| row.get(0),
        )
        .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Statistics ──────────────────────────────────────────────

    /// Derived statistics for a user.
    ///
    /// All five counts are read under a single lock hold, so they come
    /// from one consistent snapshot. A user with no records gets
    /// all-zero stats — never an error.
    pub async fn user_stats(&self, username: &str) -> Result<UserStats, AppError> {
        let conn = self.conn.lock().await;

        let count = |sql: &str| -> Result<u32, AppError> {
            conn.query_row(sql, params![username], |row| row.get(0))
                .map_err(|e| AppError::Database(e.to_string()))
        };

        Ok(UserStats {
            active_days: count("SELECT COUNT(DISTINCT date) FROM trips WHERE username = ?1")?,
            total_trips: count("SELECT COUNT(*) FROM trips WHERE username = ?1")?,
            public_trips: count(
                "SELECT COUNT(*) FROM trips WHERE username = ?1 AND vehicle IN ('Bus', 'Train')",
            )?,
            bike_trips: count("SELECT COUNT(*) FROM trips WHERE username = ?1 AND vehicle = 'Bike'")?,
            electricity_months: count(
                "SELECT COUNT(DISTINCT month) FROM electricity WHERE username = ?1",
            )?,
        })
    }
}

fn trip_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TripRecord> {
    let mode_str: String = row.get(5)?;
    let mode = TripMode::parse(&mode_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            5,
            rusqlite::types::Type::Text,
            format!("unknown trip mode '{mode_str}'").into(),
        )
    })?;

    Ok(TripRecord {
        id: row.get(0)?,
        username: row.get(1)?,
        vehicle: row.get(2)?,
        distance_km: row.get(3)?,
        date: row.get(4)?,
        mode,
        start_lat: row.get(6)?,
        start_lon: row.get(7)?,
        end_lat: row.get(8)?,
        end_lon: row.get(9)?,
        start_time: row.get(10)?,
        end_time: row.get(11)?,
    })
}
