use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::report::orchestrator::report_status;
use crate::report::ReportOrchestrator;
use crate::types::ReportStatus;
use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args)]
pub struct ReportCommand {
    /// Restrict the report to a single store
    #[arg(long)]
    store_id: Option<String>,

    /// Output directory for the report CSV (overrides config.toml)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Database path (overrides config.toml and env vars)
    #[arg(long)]
    database_path: Option<PathBuf>,

    /// Concurrent store computations (overrides config.toml)
    #[arg(long)]
    concurrent_stores: Option<usize>,
}

impl ReportCommand {
    pub async fn run(&self) -> AppResult<()> {
        info!("=== Store Uptime Monitor - Report ===");

        // Load configuration from file/environment
        let app_config = match AppConfig::load() {
            Ok(config) => {
                info!("Configuration loaded successfully");
                config
            }
            Err(e) => {
                warn!("Failed to load configuration: {}", e);
                info!("Using defaults and CLI arguments for report generation");
                AppConfig::get_defaults().map_err(|e| AppError::Config(e.to_string()))?
            }
        };

        // CLI arguments override config values
        let final_database_path = self
            .database_path
            .clone()
            .unwrap_or(app_config.database.default_path.clone());
        let final_output_dir = self
            .output_dir
            .clone()
            .unwrap_or(app_config.paths.reports_dir.clone());
        let mut engine_config = app_config.engine;
        if let Some(concurrent) = self.concurrent_stores {
            engine_config.concurrent_stores = concurrent;
        }

        info!("Configuration:");
        info!("  Database: {}", final_database_path.display());
        info!("  Output directory: {}", final_output_dir.display());
        info!("  Reference policy: {:?}", engine_config.reference_policy);
        info!(
            "  Missing-hours policy: {:?}",
            engine_config.missing_hours_policy
        );
        info!("  Concurrent stores: {}", engine_config.concurrent_stores);
        if let Some(store) = &self.store_id {
            info!("  Store filter: {}", store);
        }

        // Validate database exists
        if !final_database_path.exists() {
            return Err(AppError::Config(format!(
                "Database not found: {}. Run the ingest command first",
                final_database_path.display()
            )));
        }

        let orchestrator = ReportOrchestrator::new(
            final_database_path.clone(),
            final_output_dir,
            engine_config,
        )?;

        // Trigger returns immediately with the job Running; the CLI is a
        // one-shot batch caller, so await the background task in-process.
        let (report_id, handle) = orchestrator.trigger(self.store_id.clone())?;
        println!("Report triggered: {}", report_id);

        handle
            .await
            .map_err(|e| AppError::Report(format!("Report task panicked: {}", e)))?;

        let job = report_status(&final_database_path, &report_id)?
            .ok_or_else(|| AppError::Report(format!("Report {} vanished", report_id)))?;

        println!("\n=== REPORT {} ===", job.status.as_str().to_uppercase());
        println!("Report ID: {}", job.report_id);
        match job.status {
            ReportStatus::Complete => {
                if let Some(path) = &job.output_path {
                    println!("Output: {}", path);
                }
                Ok(())
            }
            ReportStatus::Failed => Err(AppError::Report(
                job.error.unwrap_or_else(|| "Unknown failure".to_string()),
            )),
            ReportStatus::Running => Err(AppError::Report(
                "Report still Running after task completion".to_string(),
            )),
        }
    }
}
