use crate::config::AppConfig;
use crate::database::{Database, StatisticsOperations};
use crate::errors::{AppError, AppResult};
use crate::ingest::{ingest_hours_csv, ingest_status_csv, ingest_timezones_csv};
use crate::types::statistics::IngestStats;
use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args)]
pub struct IngestCommand {
    /// Path to the store status polls CSV (overrides config.toml)
    #[arg(long)]
    status_csv: Option<PathBuf>,

    /// Path to the business hours CSV (overrides config.toml)
    #[arg(long)]
    hours_csv: Option<PathBuf>,

    /// Path to the timezones CSV (overrides config.toml)
    #[arg(long)]
    timezones_csv: Option<PathBuf>,

    /// Database path (overrides config.toml and env vars)
    #[arg(long)]
    database_path: Option<PathBuf>,

    /// Batch size for database inserts (overrides config.toml)
    #[arg(long)]
    batch_size: Option<usize>,
}

impl IngestCommand {
    pub fn run(&self) -> AppResult<()> {
        info!("=== Store Uptime Monitor - Ingest ===");

        // Load configuration from file/environment
        let app_config = match AppConfig::load() {
            Ok(config) => {
                info!("Configuration loaded successfully");
                config
            }
            Err(e) => {
                warn!("Failed to load configuration: {}", e);
                info!("Using defaults and CLI arguments for ingest");
                AppConfig::get_defaults().map_err(|e| AppError::Config(e.to_string()))?
            }
        };

        // CLI arguments override config values
        let final_database_path = self
            .database_path
            .clone()
            .unwrap_or(app_config.database.default_path.clone());
        let final_batch_size = self.batch_size.unwrap_or(app_config.ingest.batch_size);

        // A file given on the command line is ingested even if the config
        // copy does not exist; config-sourced paths are only used when the
        // file is actually present.
        let status_csv = self
            .status_csv
            .clone()
            .or_else(|| existing(&app_config.paths.status_csv));
        let hours_csv = self
            .hours_csv
            .clone()
            .or_else(|| existing(&app_config.paths.hours_csv));
        let timezones_csv = self
            .timezones_csv
            .clone()
            .or_else(|| existing(&app_config.paths.timezones_csv));

        if status_csv.is_none() && hours_csv.is_none() && timezones_csv.is_none() {
            return Err(AppError::Config(
                "No input CSVs found. Pass --status-csv/--hours-csv/--timezones-csv or configure paths in config.toml".to_string(),
            ));
        }

        info!("Configuration:");
        info!("  Database: {}", final_database_path.display());
        info!("  Batch size: {}", final_batch_size);

        let mut database = Database::new(&final_database_path.to_string_lossy())?;

        if let Some(path) = &status_csv {
            let stats = ingest_status_csv(&mut database, path, final_batch_size)?;
            print_summary("store status polls", path, &stats);
        }
        if let Some(path) = &hours_csv {
            let stats = ingest_hours_csv(&mut database, path, final_batch_size)?;
            print_summary("business hours", path, &stats);
        }
        if let Some(path) = &timezones_csv {
            let stats = ingest_timezones_csv(&mut database, path, final_batch_size)?;
            print_summary("timezones", path, &stats);
        }

        // Show database stats
        let db_stats = database.get_database_stats()?;
        println!("\n=== DATABASE SUMMARY ===");
        println!("Status rows: {}", db_stats.status_rows);
        println!("Stores: {}", db_stats.store_count);
        println!("Business-hours rows: {}", db_stats.hours_rows);
        println!("Timezone rows: {}", db_stats.timezone_rows);
        println!("Timezone coverage: {:.1}%", db_stats.timezone_coverage());

        println!("\nDatabase written to: {}", final_database_path.display());

        Ok(())
    }
}

fn existing(path: &PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path.clone())
    } else {
        None
    }
}

fn print_summary(label: &str, path: &PathBuf, stats: &IngestStats) {
    println!("\n=== INGEST: {} ===", label);
    println!("Source: {}", path.display());
    println!("Rows read: {}", stats.total_rows);
    println!("Rows inserted: {}", stats.inserted);
    println!("Malformed rows skipped: {}", stats.malformed);
    println!("Error rate: {:.4}%", stats.error_rate());
    println!(
        "Processing time: {:.2}s ({:.0} rows/sec)",
        stats.timing.elapsed().as_secs_f64(),
        stats.rows_per_second()
    );
}
