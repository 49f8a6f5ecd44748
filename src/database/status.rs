//! Status poll storage and time-ordered retrieval.
//!
//! The engine's interpolation contract depends on ascending timestamp
//! order, so every read here orders by `timestamp_utc` (then rowid, which
//! makes duplicate-instant rows resolve last-write-wins deterministically).

use crate::database::traits::StatusOperations;
use crate::database::Database;
use crate::errors::AppResult;
use crate::types::{StatusObservation, StoreStatus};
use crate::utils::time::{from_epoch_ms, to_epoch_ms};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};
use tracing::debug;

fn row_to_observation(row: &rusqlite::Row<'_>) -> rusqlite::Result<StatusObservation> {
    let status_raw: String = row.get(1)?;
    let status: StoreStatus = status_raw.parse().map_err(|e: String| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            e.into(),
        )
    })?;

    Ok(StatusObservation {
        store_id: row.get(0)?,
        status,
        timestamp_utc: from_epoch_ms(row.get(2)?),
    })
}

impl StatusOperations for Database {
    fn insert_status_batch(&mut self, batch: &[StatusObservation]) -> AppResult<()> {
        self.execute_transaction(|tx| {
            let mut stmt = tx.prepare_cached(
                r#"INSERT INTO store_status (store_id, status, timestamp_utc)
                   VALUES (?1, ?2, ?3)"#,
            )?;

            for observation in batch {
                stmt.execute(params![
                    observation.store_id,
                    observation.status.as_str(),
                    to_epoch_ms(observation.timestamp_utc),
                ])?;
            }

            debug!("Inserted batch of {} status observations", batch.len());
            Ok(())
        })
    }

    fn distinct_store_ids(&self) -> AppResult<Vec<String>> {
        let mut stmt = self
            .connection()
            .prepare("SELECT DISTINCT store_id FROM store_status ORDER BY store_id")?;

        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut store_ids = Vec::new();
        for row in rows {
            store_ids.push(row?);
        }
        Ok(store_ids)
    }

    fn max_status_timestamp(
        &self,
        store_id: Option<&str>,
    ) -> AppResult<Option<DateTime<Utc>>> {
        let max_ms: Option<i64> = match store_id {
            Some(store) => self.connection().query_row(
                "SELECT MAX(timestamp_utc) FROM store_status WHERE store_id = ?1",
                params![store],
                |row| row.get(0),
            )?,
            None => self.connection().query_row(
                "SELECT MAX(timestamp_utc) FROM store_status",
                [],
                |row| row.get(0),
            )?,
        };

        Ok(max_ms.map(from_epoch_ms))
    }

    fn observations_in_range(
        &self,
        store_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<StatusObservation>> {
        let mut stmt = self.connection().prepare_cached(
            r#"SELECT store_id, status, timestamp_utc
               FROM store_status
               WHERE store_id = ?1 AND timestamp_utc >= ?2 AND timestamp_utc <= ?3
               ORDER BY timestamp_utc, id"#,
        )?;

        let rows = stmt.query_map(
            params![store_id, to_epoch_ms(from), to_epoch_ms(to)],
            row_to_observation,
        )?;

        let mut observations = Vec::new();
        for row in rows {
            observations.push(row?);
        }
        Ok(observations)
    }

    fn latest_observation_before(
        &self,
        store_id: &str,
        instant: DateTime<Utc>,
    ) -> AppResult<Option<StatusObservation>> {
        let observation = self
            .connection()
            .query_row(
                r#"SELECT store_id, status, timestamp_utc
                   FROM store_status
                   WHERE store_id = ?1 AND timestamp_utc < ?2
                   ORDER BY timestamp_utc DESC, id DESC
                   LIMIT 1"#,
                params![store_id, to_epoch_ms(instant)],
                row_to_observation,
            )
            .optional()?;

        Ok(observation)
    }

    fn count_status_rows(&self) -> AppResult<u64> {
        let count: i64 =
            self.connection()
                .query_row("SELECT COUNT(*) FROM store_status", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
