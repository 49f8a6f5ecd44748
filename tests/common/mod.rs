//! Common Test Utilities
//!
//! Shared helpers for integration tests: unique database paths so tests
//! can run in parallel, and fixture builders for the store domain.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use store_uptime_monitor::types::{BusinessHoursEntry, StatusObservation, StoreStatus};

/// Global test counter for generating unique test database paths
static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a unique test database path for a given test
///
/// Combines the test name, process id, an atomic counter and a timestamp
/// so parallel tests never collide.
pub fn create_unique_test_db_path(test_name: &str) -> String {
    let test_dir = PathBuf::from("test_output/integration_tests");
    std::fs::create_dir_all(&test_dir).unwrap();

    let unique_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();

    let db_path = test_dir.join(format!(
        "{}_{}_{}_{}.db",
        test_name,
        std::process::id(),
        unique_id,
        timestamp
    ));
    db_path.to_str().unwrap().to_string()
}

/// A fixed Wednesday-afternoon instant well inside Chicago business hours:
/// 2023-01-25 22:00:00 UTC = 16:00 local (CST)
pub fn reference_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 1, 25, 22, 0, 0).unwrap()
}

pub fn observation(
    store_id: &str,
    status: StoreStatus,
    timestamp_utc: DateTime<Utc>,
) -> StatusObservation {
    StatusObservation {
        store_id: store_id.to_string(),
        status,
        timestamp_utc,
    }
}

/// Mon-Fri business hours with the same local window each weekday
pub fn weekday_hours(store_id: &str, start: (u32, u32), end: (u32, u32)) -> Vec<BusinessHoursEntry> {
    (0..5)
        .map(|day| BusinessHoursEntry {
            store_id: store_id.to_string(),
            day_of_week: day,
            start_time_local: chrono::NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time_local: chrono::NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        })
        .collect()
}
