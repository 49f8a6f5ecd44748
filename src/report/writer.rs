//! CSV serialisation of the per-store metrics rows.
//!
//! Minute values are accumulated as fractional floats through the engine
//! and rounded to two decimals only here, at the serialisation edge.

use crate::errors::AppResult;
use crate::types::MetricsRow;
use std::path::Path;
use tracing::info;

const HEADER: [&str; 7] = [
    "store_id",
    "uptime_last_hour",
    "uptime_last_day",
    "uptime_last_week",
    "downtime_last_hour",
    "downtime_last_day",
    "downtime_last_week",
];

/// Write the report rows to a CSV file, one row per store
pub fn write_metrics_csv(path: &Path, rows: &[MetricsRow]) -> AppResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(HEADER)?;

    for row in rows {
        writer.write_record([
            row.store_id.as_str(),
            &format!("{:.2}", row.uptime_last_hour),
            &format!("{:.2}", row.uptime_last_day),
            &format!("{:.2}", row.uptime_last_week),
            &format!("{:.2}", row.downtime_last_hour),
            &format!("{:.2}", row.downtime_last_day),
            &format!("{:.2}", row.downtime_last_week),
        ])?;
    }

    writer.flush()?;
    info!("Wrote {} metrics rows to {}", rows.len(), path.display());
    Ok(())
}
