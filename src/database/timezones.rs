//! Timezone assignment storage.
//!
//! Zones are validated at ingest; a stored string that no longer parses
//! (e.g. after a tz database rename) surfaces as a timezone error rather
//! than a silent fallback.

use crate::database::traits::TimezoneOperations;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::types::StoreTimezone;
use rusqlite::{params, OptionalExtension};
use tracing::debug;

impl TimezoneOperations for Database {
    fn insert_timezones_batch(&mut self, batch: &[StoreTimezone]) -> AppResult<()> {
        self.execute_transaction(|tx| {
            let mut stmt = tx.prepare_cached(
                r#"INSERT INTO store_timezones (store_id, timezone_str)
                   VALUES (?1, ?2)
                   ON CONFLICT(store_id) DO UPDATE SET timezone_str = excluded.timezone_str"#,
            )?;

            for assignment in batch {
                stmt.execute(params![
                    assignment.store_id,
                    assignment.timezone.name(),
                ])?;
            }

            debug!("Inserted batch of {} timezone assignments", batch.len());
            Ok(())
        })
    }

    fn timezone_for_store(&self, store_id: &str) -> AppResult<Option<StoreTimezone>> {
        let raw: Option<(String, String)> = self
            .connection()
            .query_row(
                "SELECT store_id, timezone_str FROM store_timezones WHERE store_id = ?1",
                params![store_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match raw {
            None => Ok(None),
            Some((store_id, timezone_str)) => {
                let timezone = timezone_str.parse::<chrono_tz::Tz>().map_err(|_| {
                    AppError::Timezone(format!(
                        "Stored timezone for {} is not a known zone: {}",
                        store_id, timezone_str
                    ))
                })?;
                Ok(Some(StoreTimezone { store_id, timezone }))
            }
        }
    }

    fn count_timezone_rows(&self) -> AppResult<u64> {
        let count: i64 = self.connection().query_row(
            "SELECT COUNT(*) FROM store_timezones",
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}
