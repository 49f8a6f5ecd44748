use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub database: DatabaseConfig,
    pub ingest: IngestConfig,
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub status_csv: PathBuf,
    pub hours_csv: PathBuf,
    pub timezones_csv: PathBuf,
    pub reports_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub default_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    pub batch_size: usize,
}

/// Policy for weekdays with no configured business hours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingHoursPolicy {
    /// Treat the day as open 24 hours (the dominant source behaviour)
    Open,
    /// Treat the day as closed - no minutes counted
    Closed,
}

/// Policy for choosing the reference "now" instant a report measures back from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferencePolicy {
    /// Maximum observed status timestamp across the targeted stores.
    /// Reproducible against historical datasets.
    MaxObservation,
    /// Wall-clock time at trigger
    WallClock,
}

/// Policy for handling a single store's computation failure within a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreFailurePolicy {
    /// Log and skip the store; the report still completes
    Skip,
    /// First store failure fails the whole report
    Fail,
}

/// Engine configuration for report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Fallback IANA zone for stores without a timezone record
    pub default_timezone: String,
    pub missing_hours_policy: MissingHoursPolicy,
    pub reference_policy: ReferencePolicy,
    pub store_failure_policy: StoreFailurePolicy,
    /// Cap on concurrently processed stores per report
    pub concurrent_stores: usize,
    /// Hours of observation history loaded before the week window to seed
    /// the initial status of the first business segment
    pub seed_margin_hours: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_timezone: "America/Chicago".to_string(),
            missing_hours_policy: MissingHoursPolicy::Open,
            reference_policy: ReferencePolicy::MaxObservation,
            store_failure_policy: StoreFailurePolicy::Skip,
            concurrent_stores: 8,
            seed_margin_hours: 24,
        }
    }
}

impl EngineConfig {
    /// Resolve the configured default timezone to a parsed zone
    pub fn default_tz(&self) -> Result<chrono_tz::Tz, crate::errors::AppError> {
        self.default_timezone.parse::<chrono_tz::Tz>().map_err(|_| {
            crate::errors::AppError::Timezone(format!(
                "Unknown default timezone: {}",
                self.default_timezone
            ))
        })
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        let engine_defaults = EngineConfig::default();
        let config = Config::builder()
            // Start with default values
            .set_default("paths.status_csv", "./data/store_status.csv")?
            .set_default("paths.hours_csv", "./data/menu_hours.csv")?
            .set_default("paths.timezones_csv", "./data/timezones.csv")?
            .set_default("paths.reports_dir", "./reports")?
            .set_default("database.default_path", "./store_monitor.db")?
            .set_default("ingest.batch_size", 10000)?
            // Engine defaults
            .set_default("engine.default_timezone", engine_defaults.default_timezone)?
            .set_default("engine.missing_hours_policy", "open")?
            .set_default("engine.reference_policy", "max-observation")?
            .set_default("engine.store_failure_policy", "skip")?
            .set_default(
                "engine.concurrent_stores",
                engine_defaults.concurrent_stores as i64,
            )?
            .set_default(
                "engine.seed_margin_hours",
                engine_defaults.seed_margin_hours as i64,
            )?
            // Load from config.toml if it exists
            .add_source(File::with_name("config").required(false))
            // Override with environment variables
            // STORE_MONITOR_* env variables override file configuration
            .add_source(config::Environment::with_prefix("STORE_MONITOR").separator("__"))
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        // Check for specific environment variables with custom names
        if let Ok(db_path) = env::var("STORE_MONITOR_DATABASE_PATH") {
            app_config.database.default_path = PathBuf::from(db_path);
        }

        if let Ok(reports_dir) = env::var("STORE_MONITOR_REPORTS_DIR") {
            app_config.paths.reports_dir = PathBuf::from(reports_dir);
        }

        Ok(app_config)
    }

    /// Get default config values for CLI argument defaults
    pub fn get_defaults() -> Result<Self, ConfigError> {
        // Try to load config for defaults, but don't fail if not found
        match Self::load() {
            Ok(config) => Ok(config),
            Err(_) => {
                // Return sensible defaults if no config found
                Ok(Self {
                    paths: PathsConfig {
                        status_csv: PathBuf::from("./data/store_status.csv"),
                        hours_csv: PathBuf::from("./data/menu_hours.csv"),
                        timezones_csv: PathBuf::from("./data/timezones.csv"),
                        reports_dir: PathBuf::from("./reports"),
                    },
                    database: DatabaseConfig {
                        default_path: PathBuf::from("./store_monitor.db"),
                    },
                    ingest: IngestConfig { batch_size: 10000 },
                    engine: EngineConfig::default(),
                })
            }
        }
    }
}
