use crate::errors::AppResult;
use clap::{Parser, Subcommand};
use tracing_subscriber;

pub mod commands;

/// Store Uptime Monitor
#[derive(Parser)]
#[command(name = "store-uptime-monitor")]
#[command(about = "Store uptime/downtime reporting within business hours")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Ingest source CSVs (status polls, business hours, timezones)
    Ingest(commands::ingest::IngestCommand),
    /// Trigger a report job and wait for it to finish
    Report(commands::report::ReportCommand),
    /// Poll a report job's status
    Status(commands::status::StatusCommand),
    /// Show database summary statistics
    Stats(commands::stats::StatsCommand),
}

pub async fn run() -> AppResult<()> {
    // Initialise tracing subscriber to capture info!() macros
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest(command) => command.run(),
        Commands::Report(command) => command.run().await,
        Commands::Status(command) => command.run(),
        Commands::Stats(command) => command.run(),
    }
}
