//! Time utilities shared across storage and the report engine
//!
//! Status timestamps are persisted as Unix milliseconds UTC; the helpers
//! here are the single conversion point between `chrono` instants and the
//! stored representation.

use chrono::{DateTime, Duration, Utc};

/// Milliseconds in a minute
pub const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// Convert a UTC instant to Unix milliseconds for storage
pub fn to_epoch_ms(instant: DateTime<Utc>) -> i64 {
    instant.timestamp_millis()
}

/// Convert stored Unix milliseconds back to a UTC instant
///
/// Returns the epoch for out-of-range values rather than panicking; stored
/// values are produced by `to_epoch_ms` so this is a not-reachable guard.
pub fn from_epoch_ms(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH)
}

/// Fractional minutes between two instants; zero when `to` precedes `from`
pub fn minutes_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta: Duration = to - from;
    let millis = delta.num_milliseconds();
    if millis <= 0 {
        0.0
    } else {
        millis as f64 / MILLIS_PER_MINUTE
    }
}
