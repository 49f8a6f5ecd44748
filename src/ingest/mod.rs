//! CSV ingestion for the three source feeds.
//!
//! Each loader streams its CSV, validates rows into domain types and
//! inserts them in batches inside transactions. A malformed row is skipped
//! with a warning and counted - it never aborts the file. A file of only
//! malformed rows ingests nothing, which downstream resolves through the
//! absence-of-data defaults rather than an error.

use crate::database::{Database, HoursOperations, StatusOperations, TimezoneOperations};
use crate::errors::{AppError, AppResult};
use crate::types::statistics::IngestStats;
use crate::types::{HoursRecord, StatusRecord, TimezoneRecord};
use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

/// Stream one CSV through a row parser and a batched flush.
///
/// `parse` turns a raw record into its domain type (failures are counted
/// as malformed and skipped); `flush` receives each full batch and the
/// final partial batch.
fn ingest_csv_file<Raw, Domain, Parse, Flush>(
    path: &Path,
    batch_size: usize,
    mut parse: Parse,
    mut flush: Flush,
) -> AppResult<IngestStats>
where
    Raw: DeserializeOwned,
    Parse: FnMut(&Raw) -> AppResult<Domain>,
    Flush: FnMut(&[Domain]) -> AppResult<()>,
{
    if !path.exists() {
        return Err(AppError::Config(format!(
            "CSV file does not exist: {}",
            path.display()
        )));
    }

    let file = File::open(path).map_err(AppError::Io)?;
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let mut stats = IngestStats::new();
    let mut batch: Vec<Domain> = Vec::with_capacity(batch_size);

    for (row_idx, result) in csv_reader.deserialize::<Raw>().enumerate() {
        // Header occupies line 1; data rows start at line 2
        let line = row_idx + 2;
        stats.total_rows += 1;

        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Skipping unreadable row at line {}: {}", line, e);
                stats.malformed += 1;
                continue;
            }
        };

        match parse(&raw) {
            Ok(domain) => batch.push(domain),
            Err(e) => {
                warn!("Skipping invalid row at line {}: {}", line, e);
                stats.malformed += 1;
                continue;
            }
        }

        if batch.len() >= batch_size {
            flush(&batch)?;
            stats.inserted += batch.len();
            stats.batches_processed += 1;
            batch.clear();
        }
    }

    if !batch.is_empty() {
        flush(&batch)?;
        stats.inserted += batch.len();
        stats.batches_processed += 1;
    }

    stats.finish();
    Ok(stats)
}

/// Ingest the store status poll feed
pub fn ingest_status_csv(
    database: &mut Database,
    path: &Path,
    batch_size: usize,
) -> AppResult<IngestStats> {
    info!("Ingesting status polls from {}", path.display());

    let stats = ingest_csv_file(
        path,
        batch_size,
        |record: &StatusRecord| record.to_observation(),
        |batch| database.insert_status_batch(batch),
    )?;

    info!(
        "Status ingest complete: {} inserted, {} malformed of {} rows",
        stats.inserted, stats.malformed, stats.total_rows
    );
    Ok(stats)
}

/// Ingest the weekly business hours
pub fn ingest_hours_csv(
    database: &mut Database,
    path: &Path,
    batch_size: usize,
) -> AppResult<IngestStats> {
    info!("Ingesting business hours from {}", path.display());

    let stats = ingest_csv_file(
        path,
        batch_size,
        |record: &HoursRecord| record.to_entry(),
        |batch| database.insert_hours_batch(batch),
    )?;

    info!(
        "Business hours ingest complete: {} inserted, {} malformed of {} rows",
        stats.inserted, stats.malformed, stats.total_rows
    );
    Ok(stats)
}

/// Ingest the store timezone assignments
pub fn ingest_timezones_csv(
    database: &mut Database,
    path: &Path,
    batch_size: usize,
) -> AppResult<IngestStats> {
    info!("Ingesting timezones from {}", path.display());

    let stats = ingest_csv_file(
        path,
        batch_size,
        |record: &TimezoneRecord| record.to_timezone(),
        |batch| database.insert_timezones_batch(batch),
    )?;

    info!(
        "Timezone ingest complete: {} inserted, {} malformed of {} rows",
        stats.inserted, stats.malformed, stats.total_rows
    );
    Ok(stats)
}
