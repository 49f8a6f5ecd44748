//! Database trait abstractions for modular database operations.
//!
//! This module defines the traits that group database operations by
//! concern: status polls, business hours, timezones, report jobs and
//! statistics. The report engine consumes the read side only.

use crate::errors::AppResult;
use crate::types::{
    BusinessHoursEntry, ReportJob, StatusObservation, StoreTimezone,
};
use chrono::{DateTime, Utc};

/// Status poll storage and time-ordered retrieval
pub trait StatusOperations {
    /// Insert a batch of status observations atomically
    fn insert_status_batch(&mut self, batch: &[StatusObservation]) -> AppResult<()>;

    /// All distinct store ids present in the status feed, sorted
    fn distinct_store_ids(&self) -> AppResult<Vec<String>>;

    /// Maximum observed timestamp, optionally restricted to one store.
    /// Drives the max-observation reference policy.
    fn max_status_timestamp(&self, store_id: Option<&str>)
        -> AppResult<Option<DateTime<Utc>>>;

    /// Observations for a store within [from, to], ascending by timestamp
    fn observations_in_range(
        &self,
        store_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<StatusObservation>>;

    /// Latest observation strictly before an instant, if any.
    /// Seeds the initial status when a window's own data is sparse.
    fn latest_observation_before(
        &self,
        store_id: &str,
        instant: DateTime<Utc>,
    ) -> AppResult<Option<StatusObservation>>;

    /// Total number of status rows
    fn count_status_rows(&self) -> AppResult<u64>;
}

/// Business hours storage and per-store retrieval
pub trait HoursOperations {
    /// Insert a batch of business-hours entries atomically
    fn insert_hours_batch(&mut self, batch: &[BusinessHoursEntry]) -> AppResult<()>;

    /// All weekly entries for a store, ordered by weekday then start time
    fn hours_for_store(&self, store_id: &str) -> AppResult<Vec<BusinessHoursEntry>>;

    /// Total number of business-hours rows
    fn count_hours_rows(&self) -> AppResult<u64>;
}

/// Timezone storage and per-store retrieval
pub trait TimezoneOperations {
    /// Insert a batch of timezone assignments atomically (last write wins)
    fn insert_timezones_batch(&mut self, batch: &[StoreTimezone]) -> AppResult<()>;

    /// The store's zone, or None when the store has no timezone record
    fn timezone_for_store(&self, store_id: &str) -> AppResult<Option<StoreTimezone>>;

    /// Total number of timezone rows
    fn count_timezone_rows(&self) -> AppResult<u64>;
}

/// Report job lifecycle operations
///
/// A job is created Running and transitioned exactly once; the mark
/// methods refuse to touch rows already in a terminal state.
pub trait ReportOperations {
    /// Create a new report job in Running state
    fn create_report(&mut self, report_id: &str) -> AppResult<()>;

    /// Transition a Running job to Complete with its output location
    fn mark_report_complete(&mut self, report_id: &str, output_path: &str) -> AppResult<()>;

    /// Transition a Running job to Failed with the error message
    fn mark_report_failed(&mut self, report_id: &str, error: &str) -> AppResult<()>;

    /// Fetch a report job by id
    fn get_report(&self, report_id: &str) -> AppResult<Option<ReportJob>>;
}

/// Database summary statistics
pub trait StatisticsOperations {
    fn get_database_stats(&self) -> AppResult<super::DatabaseStats>;
}
