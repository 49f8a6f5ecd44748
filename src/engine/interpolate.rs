//! Status interpolation over a sparse observation sequence.

use crate::types::{StatusObservation, StoreStatus};
use chrono::{DateTime, Utc};

/// The status in effect at an instant: the latest observation at or before
/// it, or None when no observation precedes the instant.
///
/// The sequence must be ascending by timestamp (the storage layer's read
/// contract); ties at the same instant resolve to the last record, matching
/// the store's last-write-wins ordering. Pure lookup, O(log n).
pub fn status_at(observations: &[StatusObservation], at: DateTime<Utc>) -> Option<StoreStatus> {
    debug_assert!(
        observations
            .windows(2)
            .all(|pair| pair[0].timestamp_utc <= pair[1].timestamp_utc),
        "observation sequence must be ascending by timestamp"
    );

    let idx = observations.partition_point(|obs| obs.timestamp_utc <= at);
    if idx == 0 {
        None
    } else {
        Some(observations[idx - 1].status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn obs(status: StoreStatus, hour: u32, min: u32) -> StatusObservation {
        StatusObservation {
            store_id: "s1".to_string(),
            status,
            timestamp_utc: Utc.with_ymd_and_hms(2023, 1, 25, hour, min, 0).unwrap(),
        }
    }

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, 25, hour, min, 0).unwrap()
    }

    #[test]
    fn test_no_observation_before_instant() {
        let observations = [obs(StoreStatus::Active, 12, 0)];
        assert_eq!(status_at(&observations, at(11, 59)), None);
    }

    #[test]
    fn test_latest_at_or_before_wins() {
        let observations = [
            obs(StoreStatus::Active, 9, 0),
            obs(StoreStatus::Inactive, 11, 0),
            obs(StoreStatus::Active, 13, 0),
        ];

        assert_eq!(status_at(&observations, at(10, 0)), Some(StoreStatus::Active));
        assert_eq!(
            status_at(&observations, at(12, 59)),
            Some(StoreStatus::Inactive)
        );
        assert_eq!(status_at(&observations, at(18, 0)), Some(StoreStatus::Active));
    }

    #[test]
    fn test_exact_timestamp_is_inclusive() {
        let observations = [
            obs(StoreStatus::Active, 9, 0),
            obs(StoreStatus::Inactive, 11, 0),
        ];
        assert_eq!(
            status_at(&observations, at(11, 0)),
            Some(StoreStatus::Inactive)
        );
    }

    #[test]
    fn test_tie_resolves_to_last_record() {
        let observations = [
            obs(StoreStatus::Active, 11, 0),
            obs(StoreStatus::Inactive, 11, 0),
        ];
        assert_eq!(
            status_at(&observations, at(11, 0)),
            Some(StoreStatus::Inactive)
        );
    }

    #[test]
    fn test_empty_sequence() {
        assert_eq!(status_at(&[], at(12, 0)), None);
    }
}
