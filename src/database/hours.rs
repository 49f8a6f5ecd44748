//! Business hours storage.

use crate::database::traits::HoursOperations;
use crate::database::Database;
use crate::errors::AppResult;
use crate::types::BusinessHoursEntry;
use chrono::NaiveTime;
use rusqlite::params;
use tracing::debug;

const TIME_FORMAT: &str = "%H:%M:%S";

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<BusinessHoursEntry> {
    let parse_time = |idx: usize, raw: String| {
        NaiveTime::parse_from_str(&raw, TIME_FORMAT).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
    };

    let start_raw: String = row.get(2)?;
    let end_raw: String = row.get(3)?;

    Ok(BusinessHoursEntry {
        store_id: row.get(0)?,
        day_of_week: row.get(1)?,
        start_time_local: parse_time(2, start_raw)?,
        end_time_local: parse_time(3, end_raw)?,
    })
}

impl HoursOperations for Database {
    fn insert_hours_batch(&mut self, batch: &[BusinessHoursEntry]) -> AppResult<()> {
        self.execute_transaction(|tx| {
            let mut stmt = tx.prepare_cached(
                r#"INSERT INTO business_hours
                   (store_id, day_of_week, start_time_local, end_time_local)
                   VALUES (?1, ?2, ?3, ?4)"#,
            )?;

            for entry in batch {
                stmt.execute(params![
                    entry.store_id,
                    entry.day_of_week,
                    entry.start_time_local.format(TIME_FORMAT).to_string(),
                    entry.end_time_local.format(TIME_FORMAT).to_string(),
                ])?;
            }

            debug!("Inserted batch of {} business-hours entries", batch.len());
            Ok(())
        })
    }

    fn hours_for_store(&self, store_id: &str) -> AppResult<Vec<BusinessHoursEntry>> {
        let mut stmt = self.connection().prepare_cached(
            r#"SELECT store_id, day_of_week, start_time_local, end_time_local
               FROM business_hours
               WHERE store_id = ?1
               ORDER BY day_of_week, start_time_local"#,
        )?;

        let rows = stmt.query_map(params![store_id], row_to_entry)?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    fn count_hours_rows(&self) -> AppResult<u64> {
        let count: i64 = self.connection().query_row(
            "SELECT COUNT(*) FROM business_hours",
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(store: &str, day: u8, start: (u32, u32), end: (u32, u32)) -> BusinessHoursEntry {
        BusinessHoursEntry {
            store_id: store.to_string(),
            day_of_week: day,
            start_time_local: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time_local: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        }
    }

    #[test]
    fn test_hours_round_trip_ordered() {
        let mut db = Database::new(":memory:").unwrap();
        db.insert_hours_batch(&[
            entry("s1", 4, (9, 0), (17, 0)),
            entry("s1", 0, (12, 0), (20, 0)),
            entry("s1", 0, (6, 30), (11, 0)),
            entry("s2", 2, (8, 0), (16, 0)),
        ])
        .unwrap();

        let hours = db.hours_for_store("s1").unwrap();
        assert_eq!(hours.len(), 3);
        // Ordered by weekday, then start time
        assert_eq!(hours[0].day_of_week, 0);
        assert_eq!(hours[0].start_time_local, NaiveTime::from_hms_opt(6, 30, 0).unwrap());
        assert_eq!(hours[1].start_time_local, NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert_eq!(hours[2].day_of_week, 4);
    }

    #[test]
    fn test_store_without_hours_is_empty() {
        let db = Database::new(":memory:").unwrap();
        assert!(db.hours_for_store("missing").unwrap().is_empty());
    }
}
