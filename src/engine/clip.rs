//! Interval clipping and local-to-UTC conversion.
//!
//! Local business-hours windows are converted to absolute UTC instants on
//! their specific calendar date, so the zone's offset on that date applies
//! (daylight-saving transitions land on the correct instants instead of
//! reusing a stale offset from another day).
//!
//! DST edge mapping: an ambiguous local time (fall-back) takes the earliest
//! mapping; a nonexistent local time (spring-forward gap) falls back to
//! interpreting the naive value as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Convert a store-local naive datetime to UTC using the zone's rules
fn local_to_utc(naive: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

/// Convert one local business-hours window on a specific date to UTC
///
/// Returns None when the converted window is empty (possible when a DST
/// transition swallows the whole window).
pub fn local_window_to_utc(
    date: NaiveDate,
    start_local: NaiveTime,
    end_local: NaiveTime,
    tz: Tz,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = local_to_utc(date.and_time(start_local), tz);
    let end = local_to_utc(date.and_time(end_local), tz);

    if end <= start {
        return None;
    }
    Some((start, end))
}

/// The date's midnight-to-next-midnight bounds in UTC - the "open all day"
/// window for that zone and date
pub fn day_bounds_utc(date: NaiveDate, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let next_day = date.succ_opt().unwrap_or(date);
    (
        local_to_utc(date.and_time(NaiveTime::MIN), tz),
        local_to_utc(next_day.and_time(NaiveTime::MIN), tz),
    )
}

/// Intersection of two half-open UTC intervals, or None when disjoint
pub fn clip(
    global: (DateTime<Utc>, DateTime<Utc>),
    window: (DateTime<Utc>, DateTime<Utc>),
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = global.0.max(window.0);
    let end = global.1.min(window.1);

    if end <= start {
        return None;
    }
    Some((start, end))
}
