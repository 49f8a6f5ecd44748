//! Database summary statistics.

use crate::database::traits::StatisticsOperations;
use crate::database::Database;
use crate::errors::AppResult;

/// Summary counts across all tables
#[derive(Debug, Clone, Default)]
pub struct DatabaseStats {
    pub status_rows: u64,
    pub store_count: u64,
    pub hours_rows: u64,
    pub timezone_rows: u64,
    pub reports_running: u64,
    pub reports_complete: u64,
    pub reports_failed: u64,
}

impl DatabaseStats {
    /// Share of stores that carry an explicit timezone record
    pub fn timezone_coverage(&self) -> f64 {
        if self.store_count > 0 {
            (self.timezone_rows as f64 / self.store_count as f64) * 100.0
        } else {
            0.0
        }
    }
}

impl StatisticsOperations for Database {
    fn get_database_stats(&self) -> AppResult<DatabaseStats> {
        let conn = self.connection();

        let status_rows: i64 =
            conn.query_row("SELECT COUNT(*) FROM store_status", [], |row| row.get(0))?;
        let store_count: i64 = conn.query_row(
            "SELECT COUNT(DISTINCT store_id) FROM store_status",
            [],
            |row| row.get(0),
        )?;
        let hours_rows: i64 =
            conn.query_row("SELECT COUNT(*) FROM business_hours", [], |row| row.get(0))?;
        let timezone_rows: i64 =
            conn.query_row("SELECT COUNT(*) FROM store_timezones", [], |row| row.get(0))?;

        let mut stats = DatabaseStats {
            status_rows: status_rows as u64,
            store_count: store_count as u64,
            hours_rows: hours_rows as u64,
            timezone_rows: timezone_rows as u64,
            ..Default::default()
        };

        let mut stmt =
            conn.prepare("SELECT status, COUNT(*) FROM reports GROUP BY status")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;
        for row in rows {
            let (status, count) = row?;
            match status.as_str() {
                "Running" => stats.reports_running = count as u64,
                "Complete" => stats.reports_complete = count as u64,
                "Failed" => stats.reports_failed = count as u64,
                _ => {}
            }
        }

        Ok(stats)
    }
}
