//! Window aggregation: one reporting window, summed across the local
//! calendar dates and business-hours segments it touches.

use crate::engine::clip::{clip, day_bounds_utc, local_window_to_utc};
use crate::engine::hours::{DaySchedule, WeeklySchedule};
use crate::engine::interpolate::status_at;
use crate::engine::segments::{accumulate, SegmentTotals};
use crate::types::{MetricsRow, StatusObservation, StoreStatus};
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

/// Sum uptime/downtime minutes for one window `[window_start, window_end)`.
///
/// Iterates every local calendar date the window touches (inclusive on
/// both ends, computed in the store's zone), resolves that date's business
/// hours, clips each business window to the reporting window and runs the
/// segment accumulator over the overlap. The initial status of each
/// clipped segment is interpolated from the full observation sequence, so
/// observations before the window seed the first segment.
///
/// A store with no observations at all contributes zero uptime and zero
/// downtime - absence of data is not downtime. Once any observation
/// exists, unseeded intervals default to inactive.
pub fn aggregate_window(
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    tz: Tz,
    schedule: &WeeklySchedule,
    observations: &[StatusObservation],
) -> SegmentTotals {
    let mut totals = SegmentTotals::default();
    if observations.is_empty() || window_end <= window_start {
        return totals;
    }

    let start_date = window_start.with_timezone(&tz).date_naive();
    let end_date = window_end.with_timezone(&tz).date_naive();

    for date in start_date.iter_days() {
        if date > end_date {
            break;
        }

        let day_windows = match schedule.resolve(date) {
            DaySchedule::Closed => continue,
            DaySchedule::OpenAllDay => vec![day_bounds_utc(date, tz)],
            DaySchedule::Windows(windows) => windows
                .iter()
                .filter_map(|&(start, end)| local_window_to_utc(date, start, end, tz))
                .collect(),
        };

        for business_window in day_windows {
            let Some((clip_start, clip_end)) =
                clip((window_start, window_end), business_window)
            else {
                continue;
            };

            let initial =
                status_at(observations, clip_start).unwrap_or(StoreStatus::Inactive);
            totals.add(accumulate(clip_start, clip_end, observations, initial));
        }
    }

    totals
}

/// Compute the full metrics row for one store: last hour, last day and
/// last week, all ending at the reference instant.
pub fn compute_store_metrics(
    store_id: &str,
    reference: DateTime<Utc>,
    tz: Tz,
    schedule: &WeeklySchedule,
    observations: &[StatusObservation],
) -> MetricsRow {
    if observations.is_empty() {
        return MetricsRow::empty(store_id);
    }

    let last_hour = aggregate_window(
        reference - Duration::hours(1),
        reference,
        tz,
        schedule,
        observations,
    );
    let last_day = aggregate_window(
        reference - Duration::days(1),
        reference,
        tz,
        schedule,
        observations,
    );
    let last_week = aggregate_window(
        reference - Duration::days(7),
        reference,
        tz,
        schedule,
        observations,
    );

    MetricsRow {
        store_id: store_id.to_string(),
        uptime_last_hour: last_hour.uptime_minutes,
        uptime_last_day: last_day.uptime_minutes,
        uptime_last_week: last_week.uptime_minutes,
        downtime_last_hour: last_hour.downtime_minutes,
        downtime_last_day: last_day.downtime_minutes,
        downtime_last_week: last_week.downtime_minutes,
    }
}
