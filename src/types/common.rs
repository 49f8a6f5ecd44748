//! Common domain types shared across ingestion, the engine and reporting
//!
//! This module contains the fundamental types used throughout the uptime
//! monitoring pipeline: status observations, business hours, timezones,
//! report jobs and the per-store metrics output row.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Observed store status at a poll instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreStatus {
    Active,
    Inactive,
}

impl StoreStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreStatus::Active => "active",
            StoreStatus::Inactive => "inactive",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, StoreStatus::Active)
    }
}

impl FromStr for StoreStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(StoreStatus::Active),
            "inactive" => Ok(StoreStatus::Inactive),
            other => Err(format!("Unknown store status: {}", other)),
        }
    }
}

impl fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single timestamped active/inactive poll for a store
///
/// Immutable once recorded. The engine assumes a status persists from its
/// observation instant until the next observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusObservation {
    pub store_id: String,
    pub status: StoreStatus,
    pub timestamp_utc: DateTime<Utc>,
}

/// One weekday's business-hours window for a store, in store-local time
///
/// Day convention: 0 = Monday .. 6 = Sunday, matching
/// `chrono::Weekday::num_days_from_monday`. A store may carry several
/// entries for the same weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessHoursEntry {
    pub store_id: String,
    pub day_of_week: u8,
    pub start_time_local: NaiveTime,
    pub end_time_local: NaiveTime,
}

/// IANA timezone assignment for a store
#[derive(Debug, Clone, PartialEq)]
pub struct StoreTimezone {
    pub store_id: String,
    pub timezone: chrono_tz::Tz,
}

/// Report job lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    Running,
    Complete,
    Failed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Running => "Running",
            ReportStatus::Complete => "Complete",
            ReportStatus::Failed => "Failed",
        }
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Running" => Ok(ReportStatus::Running),
            "Complete" => Ok(ReportStatus::Complete),
            "Failed" => Ok(ReportStatus::Failed),
            other => Err(format!("Unknown report status: {}", other)),
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted report job metadata
///
/// Created `Running` at trigger time; transitioned exactly once to
/// `Complete` (with an output path) or `Failed` (with an error message)
/// when the computation task finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportJob {
    pub report_id: String,
    pub status: ReportStatus,
    pub output_path: Option<String>,
    pub error: Option<String>,
    pub created_at: i64,
    pub completed_at: Option<i64>,
}

/// Per-store uptime/downtime metrics for the three report windows
///
/// All values are minutes restricted to the store's business hours. For
/// every window, uptime + downtime never exceeds the business minutes the
/// window overlaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRow {
    pub store_id: String,
    pub uptime_last_hour: f64,
    pub uptime_last_day: f64,
    pub uptime_last_week: f64,
    pub downtime_last_hour: f64,
    pub downtime_last_day: f64,
    pub downtime_last_week: f64,
}

impl MetricsRow {
    /// A row for a store with no observations at all: zero everywhere
    pub fn empty(store_id: &str) -> Self {
        Self {
            store_id: store_id.to_string(),
            uptime_last_hour: 0.0,
            uptime_last_day: 0.0,
            uptime_last_week: 0.0,
            downtime_last_hour: 0.0,
            downtime_last_day: 0.0,
            downtime_last_week: 0.0,
        }
    }
}
