//! Raw CSV record types for ingestion
//!
//! Each record type matches one source CSV's column layout exactly and
//! converts into its validated domain type. Conversion failures carry the
//! reason so the ingest processors can skip-and-warn per record.

use crate::errors::{AppError, AppResult};
use crate::types::{BusinessHoursEntry, StatusObservation, StoreStatus, StoreTimezone};
use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw store status poll record - matches store_status.csv
///
/// `timestamp_utc` arrives as `2023-01-22 12:09:39.388884 UTC` in the
/// source data; RFC 3339 is accepted as a fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRecord {
    pub store_id: String,
    pub status: String,
    pub timestamp_utc: String,
}

impl StatusRecord {
    /// Validate and convert to a domain observation
    pub fn to_observation(&self) -> AppResult<StatusObservation> {
        let status: StoreStatus = self
            .status
            .trim()
            .parse()
            .map_err(AppError::InvalidData)?;

        let timestamp_utc = parse_utc_timestamp(self.timestamp_utc.trim())?;

        Ok(StatusObservation {
            store_id: self.store_id.trim().to_string(),
            status,
            timestamp_utc,
        })
    }
}

/// Parse the source data's UTC timestamp formats
///
/// Accepts `YYYY-MM-DD HH:MM:SS[.frac] UTC` (the poll feed format) and
/// RFC 3339.
pub fn parse_utc_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    if let Some(naive_part) = raw.strip_suffix(" UTC") {
        let naive = NaiveDateTime::parse_from_str(naive_part, "%Y-%m-%d %H:%M:%S%.f")?;
        return Ok(naive.and_utc());
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    // Bare naive datetime, assumed UTC
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")?;
    Ok(naive.and_utc())
}

/// Raw business hours record - matches menu_hours.csv
///
/// The source data names the weekday column `dayOfWeek` in some exports
/// and `day` in others; both are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursRecord {
    pub store_id: String,
    #[serde(rename = "dayOfWeek", alias = "day")]
    pub day_of_week: u8,
    pub start_time_local: String,
    pub end_time_local: String,
}

impl HoursRecord {
    /// Validate and convert to a domain business-hours entry
    ///
    /// Rejects weekdays outside 0..=6 and windows whose end does not come
    /// after their start.
    pub fn to_entry(&self) -> AppResult<BusinessHoursEntry> {
        if self.day_of_week > 6 {
            return Err(AppError::InvalidData(format!(
                "day_of_week out of range: {}",
                self.day_of_week
            )));
        }

        let start_time_local = parse_local_time(self.start_time_local.trim())?;
        let end_time_local = parse_local_time(self.end_time_local.trim())?;

        if end_time_local <= start_time_local {
            return Err(AppError::InvalidData(format!(
                "business hours window ends at or before it starts: {} - {}",
                self.start_time_local, self.end_time_local
            )));
        }

        Ok(BusinessHoursEntry {
            store_id: self.store_id.trim().to_string(),
            day_of_week: self.day_of_week,
            start_time_local,
            end_time_local,
        })
    }
}

/// Parse a local time-of-day as `HH:MM:SS` (or `HH:MM`)
pub fn parse_local_time(raw: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(AppError::from)
}

/// Raw timezone record - matches timezones.csv
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimezoneRecord {
    pub store_id: String,
    pub timezone_str: String,
}

impl TimezoneRecord {
    /// Validate and convert to a domain timezone assignment
    pub fn to_timezone(&self) -> AppResult<StoreTimezone> {
        let timezone = self
            .timezone_str
            .trim()
            .parse::<chrono_tz::Tz>()
            .map_err(|_| {
                AppError::Timezone(format!("Unknown timezone: {}", self.timezone_str))
            })?;

        Ok(StoreTimezone {
            store_id: self.store_id.trim().to_string(),
            timezone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_poll_feed_timestamp() {
        let ts = parse_utc_timestamp("2023-01-22 12:09:39.388884 UTC").unwrap();
        assert_eq!(ts.to_rfc3339(), "2023-01-22T12:09:39.388884+00:00");
    }

    #[test]
    fn test_parse_timestamp_without_fraction() {
        let ts = parse_utc_timestamp("2023-01-22 12:09:39 UTC").unwrap();
        assert_eq!(ts.second(), 39);
        assert_eq!(ts.nanosecond(), 0);
    }

    #[test]
    fn test_parse_rfc3339_timestamp() {
        let ts = parse_utc_timestamp("2023-01-22T12:09:39Z").unwrap();
        assert_eq!(ts.hour(), 12);
    }

    #[test]
    fn test_status_record_conversion() {
        let record = StatusRecord {
            store_id: "store-1".to_string(),
            status: "active".to_string(),
            timestamp_utc: "2023-01-22 12:09:39.388884 UTC".to_string(),
        };
        let obs = record.to_observation().unwrap();
        assert_eq!(obs.store_id, "store-1");
        assert_eq!(obs.status, StoreStatus::Active);
    }

    #[test]
    fn test_status_record_rejects_unknown_status() {
        let record = StatusRecord {
            store_id: "store-1".to_string(),
            status: "open".to_string(),
            timestamp_utc: "2023-01-22 12:09:39 UTC".to_string(),
        };
        assert!(record.to_observation().is_err());
    }

    #[test]
    fn test_hours_record_conversion() {
        let record = HoursRecord {
            store_id: "store-1".to_string(),
            day_of_week: 0,
            start_time_local: "08:00:00".to_string(),
            end_time_local: "17:00:00".to_string(),
        };
        let entry = record.to_entry().unwrap();
        assert_eq!(entry.day_of_week, 0);
        assert_eq!(entry.start_time_local.hour(), 8);
        assert_eq!(entry.end_time_local.hour(), 17);
    }

    #[test]
    fn test_hours_record_rejects_inverted_window() {
        let record = HoursRecord {
            store_id: "store-1".to_string(),
            day_of_week: 2,
            start_time_local: "17:00:00".to_string(),
            end_time_local: "08:00:00".to_string(),
        };
        assert!(record.to_entry().is_err());
    }

    #[test]
    fn test_hours_record_rejects_bad_day() {
        let record = HoursRecord {
            store_id: "store-1".to_string(),
            day_of_week: 7,
            start_time_local: "08:00:00".to_string(),
            end_time_local: "17:00:00".to_string(),
        };
        assert!(record.to_entry().is_err());
    }

    #[test]
    fn test_timezone_record_conversion() {
        let record = TimezoneRecord {
            store_id: "store-1".to_string(),
            timezone_str: "America/Denver".to_string(),
        };
        let tz = record.to_timezone().unwrap();
        assert_eq!(tz.timezone, chrono_tz::America::Denver);
    }

    #[test]
    fn test_timezone_record_rejects_unknown_zone() {
        let record = TimezoneRecord {
            store_id: "store-1".to_string(),
            timezone_str: "Mars/Olympus_Mons".to_string(),
        };
        assert!(record.to_timezone().is_err());
    }
}
