//! Business-hours resolution against the weekly schedule.

use crate::config::MissingHoursPolicy;
use crate::types::BusinessHoursEntry;
use chrono::{Datelike, NaiveDate, NaiveTime};
use tracing::debug;

/// Resolved business hours for one calendar date
#[derive(Debug, Clone, PartialEq)]
pub enum DaySchedule {
    /// No entry for the weekday and the open policy applies: midnight to
    /// midnight in store-local time
    OpenAllDay,
    /// No entry for the weekday under the closed policy, or the weekday's
    /// entries were all invalid: no minutes counted
    Closed,
    /// Explicit local-time windows, sorted by start time
    Windows(Vec<(NaiveTime, NaiveTime)>),
}

/// A store's weekly schedule, indexed by weekday (0 = Monday .. 6 = Sunday)
///
/// Multiple entries per weekday are all honoured; resolution is
/// deterministic because windows are sorted at construction.
#[derive(Debug, Clone)]
pub struct WeeklySchedule {
    by_weekday: [Vec<(NaiveTime, NaiveTime)>; 7],
    missing_policy: MissingHoursPolicy,
}

impl WeeklySchedule {
    /// Build a schedule from a store's business-hours entries
    ///
    /// Entries whose end does not come after their start are dropped here
    /// as well as at ingest, so a schedule built from unvalidated data
    /// stays consistent.
    pub fn from_entries(entries: &[BusinessHoursEntry], missing_policy: MissingHoursPolicy) -> Self {
        let mut by_weekday: [Vec<(NaiveTime, NaiveTime)>; 7] = Default::default();

        for entry in entries {
            if entry.day_of_week > 6 {
                debug!(
                    "Dropping business-hours entry with weekday {} for store {}",
                    entry.day_of_week, entry.store_id
                );
                continue;
            }
            if entry.end_time_local <= entry.start_time_local {
                debug!(
                    "Dropping inverted business-hours window {} - {} for store {}",
                    entry.start_time_local, entry.end_time_local, entry.store_id
                );
                continue;
            }
            by_weekday[entry.day_of_week as usize]
                .push((entry.start_time_local, entry.end_time_local));
        }

        for windows in by_weekday.iter_mut() {
            windows.sort();
        }

        Self {
            by_weekday,
            missing_policy,
        }
    }

    /// Resolve the business hours in effect on a specific calendar date
    ///
    /// A weekday without entries is not an error: it resolves via the
    /// missing-hours policy.
    pub fn resolve(&self, date: NaiveDate) -> DaySchedule {
        let weekday = date.weekday().num_days_from_monday() as usize;
        let windows = &self.by_weekday[weekday];

        if windows.is_empty() {
            return match self.missing_policy {
                MissingHoursPolicy::Open => DaySchedule::OpenAllDay,
                MissingHoursPolicy::Closed => DaySchedule::Closed,
            };
        }

        DaySchedule::Windows(windows.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: u8, start: (u32, u32), end: (u32, u32)) -> BusinessHoursEntry {
        BusinessHoursEntry {
            store_id: "s1".to_string(),
            day_of_week: day,
            start_time_local: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time_local: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        }
    }

    #[test]
    fn test_resolve_configured_weekday() {
        // 2023-01-23 is a Monday
        let schedule =
            WeeklySchedule::from_entries(&[entry(0, (8, 0), (17, 0))], MissingHoursPolicy::Open);
        let monday = NaiveDate::from_ymd_opt(2023, 1, 23).unwrap();

        match schedule.resolve(monday) {
            DaySchedule::Windows(windows) => {
                assert_eq!(windows.len(), 1);
                assert_eq!(windows[0].0, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
            }
            other => panic!("Expected explicit windows, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_weekday_follows_policy() {
        let entries = [entry(0, (8, 0), (17, 0))];
        let sunday = NaiveDate::from_ymd_opt(2023, 1, 22).unwrap();

        let open = WeeklySchedule::from_entries(&entries, MissingHoursPolicy::Open);
        assert_eq!(open.resolve(sunday), DaySchedule::OpenAllDay);

        let closed = WeeklySchedule::from_entries(&entries, MissingHoursPolicy::Closed);
        assert_eq!(closed.resolve(sunday), DaySchedule::Closed);
    }

    #[test]
    fn test_multiple_windows_sorted() {
        let schedule = WeeklySchedule::from_entries(
            &[entry(2, (14, 0), (20, 0)), entry(2, (7, 30), (11, 0))],
            MissingHoursPolicy::Open,
        );
        // 2023-01-25 is a Wednesday
        let wednesday = NaiveDate::from_ymd_opt(2023, 1, 25).unwrap();

        match schedule.resolve(wednesday) {
            DaySchedule::Windows(windows) => {
                assert_eq!(windows.len(), 2);
                assert!(windows[0].0 < windows[1].0);
            }
            other => panic!("Expected explicit windows, got {:?}", other),
        }
    }

    #[test]
    fn test_inverted_window_dropped() {
        let schedule =
            WeeklySchedule::from_entries(&[entry(0, (17, 0), (8, 0))], MissingHoursPolicy::Closed);
        let monday = NaiveDate::from_ymd_opt(2023, 1, 23).unwrap();
        assert_eq!(schedule.resolve(monday), DaySchedule::Closed);
    }
}
