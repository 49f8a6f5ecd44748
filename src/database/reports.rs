//! Report job lifecycle storage.
//!
//! Jobs are created Running and moved to a terminal state exactly once:
//! the mark operations guard on `status = 'Running'` so a stale task
//! cannot overwrite a terminal state.

use crate::database::traits::ReportOperations;
use crate::database::Database;
use crate::errors::AppResult;
use crate::types::{ReportJob, ReportStatus};
use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use tracing::{debug, warn};

fn row_to_job(row: &rusqlite::Row<'_>) -> rusqlite::Result<ReportJob> {
    let status_raw: String = row.get(1)?;
    let status: ReportStatus = status_raw.parse().map_err(|e: String| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            e.into(),
        )
    })?;

    Ok(ReportJob {
        report_id: row.get(0)?,
        status,
        output_path: row.get(2)?,
        error: row.get(3)?,
        created_at: row.get(4)?,
        completed_at: row.get(5)?,
    })
}

impl ReportOperations for Database {
    fn create_report(&mut self, report_id: &str) -> AppResult<()> {
        self.connection().execute(
            r#"INSERT INTO reports (report_id, status, created_at)
               VALUES (?1, 'Running', ?2)"#,
            params![report_id, Utc::now().timestamp()],
        )?;

        debug!("Created report job {} in Running state", report_id);
        Ok(())
    }

    fn mark_report_complete(&mut self, report_id: &str, output_path: &str) -> AppResult<()> {
        let updated = self.connection().execute(
            r#"UPDATE reports
               SET status = 'Complete', output_path = ?2, completed_at = ?3
               WHERE report_id = ?1 AND status = 'Running'"#,
            params![report_id, output_path, Utc::now().timestamp()],
        )?;

        if updated == 0 {
            warn!(
                "Report {} was not Running; Complete transition ignored",
                report_id
            );
        }
        Ok(())
    }

    fn mark_report_failed(&mut self, report_id: &str, error: &str) -> AppResult<()> {
        let updated = self.connection().execute(
            r#"UPDATE reports
               SET status = 'Failed', error = ?2, completed_at = ?3
               WHERE report_id = ?1 AND status = 'Running'"#,
            params![report_id, error, Utc::now().timestamp()],
        )?;

        if updated == 0 {
            warn!(
                "Report {} was not Running; Failed transition ignored",
                report_id
            );
        }
        Ok(())
    }

    fn get_report(&self, report_id: &str) -> AppResult<Option<ReportJob>> {
        let job = self
            .connection()
            .query_row(
                r#"SELECT report_id, status, output_path, error, created_at, completed_at
                   FROM reports WHERE report_id = ?1"#,
                params![report_id],
                row_to_job,
            )
            .optional()?;

        Ok(job)
    }
}
