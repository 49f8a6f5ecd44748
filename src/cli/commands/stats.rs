use crate::config::AppConfig;
use crate::database::{Database, StatisticsOperations};
use crate::errors::{AppError, AppResult};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct StatsCommand {
    /// Database path (overrides config.toml and env vars)
    #[arg(long)]
    database_path: Option<PathBuf>,
}

impl StatsCommand {
    pub fn run(&self) -> AppResult<()> {
        let app_config =
            AppConfig::get_defaults().map_err(|e| AppError::Config(e.to_string()))?;
        let final_database_path = self
            .database_path
            .clone()
            .unwrap_or(app_config.database.default_path);

        if !final_database_path.exists() {
            return Err(AppError::Config(format!(
                "Database not found: {}",
                final_database_path.display()
            )));
        }

        let database = Database::new(&final_database_path.to_string_lossy())?;
        let stats = database.get_database_stats()?;

        println!("=== DATABASE SUMMARY ===");
        println!("Database: {}", final_database_path.display());
        println!("Status rows: {}", stats.status_rows);
        println!("Stores: {}", stats.store_count);
        println!("Business-hours rows: {}", stats.hours_rows);
        println!("Timezone rows: {}", stats.timezone_rows);
        println!("Timezone coverage: {:.1}%", stats.timezone_coverage());
        println!(
            "Reports: {} running, {} complete, {} failed",
            stats.reports_running, stats.reports_complete, stats.reports_failed
        );

        Ok(())
    }
}
