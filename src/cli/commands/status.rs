use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::report::orchestrator::report_status;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct StatusCommand {
    /// Report job identifier
    #[arg(long)]
    report_id: String,

    /// Database path (overrides config.toml and env vars)
    #[arg(long)]
    database_path: Option<PathBuf>,
}

impl StatusCommand {
    pub fn run(&self) -> AppResult<()> {
        let app_config =
            AppConfig::get_defaults().map_err(|e| AppError::Config(e.to_string()))?;
        let final_database_path = self
            .database_path
            .clone()
            .unwrap_or(app_config.database.default_path);

        let job = report_status(&final_database_path, &self.report_id)?;

        match job {
            None => {
                println!("Report not found: {}", self.report_id);
            }
            Some(job) => {
                println!("Report: {}", job.report_id);
                println!("Status: {}", job.status);
                if let Some(path) = &job.output_path {
                    println!("Output: {}", path);
                }
                if let Some(error) = &job.error {
                    println!("Error: {}", error);
                }
            }
        }

        Ok(())
    }
}
