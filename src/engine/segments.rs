//! Segment accumulation: attribute a clipped interval's minutes to uptime
//! or downtime.

use crate::types::{StatusObservation, StoreStatus};
use crate::utils::time::minutes_between;
use chrono::{DateTime, Utc};

/// Uptime/downtime minute totals for one or more accumulated intervals
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SegmentTotals {
    pub uptime_minutes: f64,
    pub downtime_minutes: f64,
}

impl SegmentTotals {
    pub fn add(&mut self, other: SegmentTotals) {
        self.uptime_minutes += other.uptime_minutes;
        self.downtime_minutes += other.downtime_minutes;
    }

    pub fn total_minutes(&self) -> f64 {
        self.uptime_minutes + self.downtime_minutes
    }

    fn credit(&mut self, status: StoreStatus, minutes: f64) {
        if status.is_active() {
            self.uptime_minutes += minutes;
        } else {
            self.downtime_minutes += minutes;
        }
    }
}

/// Attribute every minute of `[clip_start, clip_end)` to uptime or downtime.
///
/// Observations strictly inside the interval are the only points where the
/// status can change; each sub-segment between consecutive boundaries is
/// credited to the status effective at its start. `initial` is the status
/// in effect at `clip_start` (interpolated by the caller, including from
/// observations before the interval). With no internal observations the
/// whole interval is credited to `initial`.
///
/// Minutes are fractional; rounding happens only at output serialisation.
pub fn accumulate(
    clip_start: DateTime<Utc>,
    clip_end: DateTime<Utc>,
    observations: &[StatusObservation],
    initial: StoreStatus,
) -> SegmentTotals {
    let mut totals = SegmentTotals::default();
    if clip_end <= clip_start {
        return totals;
    }

    let mut cursor = clip_start;
    let mut current = initial;

    for observation in observations {
        if observation.timestamp_utc <= clip_start {
            continue;
        }
        if observation.timestamp_utc >= clip_end {
            break;
        }

        totals.credit(current, minutes_between(cursor, observation.timestamp_utc));
        cursor = observation.timestamp_utc;
        current = observation.status;
    }

    totals.credit(current, minutes_between(cursor, clip_end));
    totals
}
