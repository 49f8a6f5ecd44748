//! Report orchestration: job lifecycle, per-store fan-out and output.
//!
//! Triggering a report creates a Running job row and submits the
//! computation as a background tokio task; the caller gets the report id
//! immediately and can poll the job row. The task's completion callback
//! transitions the job to Complete or Failed exactly once - a job is never
//! left Running after the task finishes.

use crate::config::{EngineConfig, ReferencePolicy, StoreFailurePolicy};
use crate::database::{
    Database, HoursOperations, ReportOperations, StatusOperations, TimezoneOperations,
};
use crate::engine::{compute_store_metrics, WeeklySchedule};
use crate::errors::{AppError, AppResult};
use crate::types::statistics::ReportRunStats;
use crate::types::{BusinessHoursEntry, MetricsRow, StatusObservation};
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Read-only inputs for one store's computation, loaded before fan-out
struct StoreInputs {
    store_id: String,
    timezone: Tz,
    hours: Vec<BusinessHoursEntry>,
    observations: Vec<StatusObservation>,
}

/// Orchestrates report jobs against one database and output directory
#[derive(Clone)]
pub struct ReportOrchestrator {
    database_path: PathBuf,
    reports_dir: PathBuf,
    engine: EngineConfig,
}

impl ReportOrchestrator {
    /// Create an orchestrator, validating the configured default timezone
    pub fn new(
        database_path: PathBuf,
        reports_dir: PathBuf,
        engine: EngineConfig,
    ) -> AppResult<Self> {
        // Fail fast on an unresolvable default zone rather than inside a job
        engine.default_tz()?;

        Ok(Self {
            database_path,
            reports_dir,
            engine,
        })
    }

    /// Trigger a new report job.
    ///
    /// Creates the Running job row synchronously, then submits the
    /// computation as a background task. Returns the report id and the
    /// task handle; the handle is for callers that want to await
    /// completion in-process (the CLI does), pollers can ignore it.
    pub fn trigger(
        &self,
        store_filter: Option<String>,
    ) -> AppResult<(String, JoinHandle<()>)> {
        let report_id = Uuid::new_v4().to_string();

        let mut database = Database::new(&self.database_path.to_string_lossy())?;
        database.create_report(&report_id)?;
        info!("Report {} triggered (status Running)", report_id);

        let orchestrator = self.clone();
        let task_report_id = report_id.clone();
        let handle = tokio::spawn(async move {
            orchestrator.run_to_completion(&task_report_id, store_filter).await;
        });

        Ok((report_id, handle))
    }

    /// Run the computation and record the terminal job state exactly once
    async fn run_to_completion(&self, report_id: &str, store_filter: Option<String>) {
        let outcome = self.generate(report_id, store_filter).await;

        let mut database = match Database::new(&self.database_path.to_string_lossy()) {
            Ok(db) => db,
            Err(e) => {
                error!(
                    "Report {} finished but the job state could not be updated: {}",
                    report_id, e
                );
                return;
            }
        };

        let transition = match outcome {
            Ok((output_path, stats)) => {
                info!(
                    "Report {} complete: {} rows, {} stores skipped, {:.1}s",
                    report_id,
                    stats.rows_written,
                    stats.stores_skipped,
                    stats.timing.elapsed().as_secs_f64()
                );
                database.mark_report_complete(report_id, &output_path.to_string_lossy())
            }
            Err(e) => {
                error!("Report {} failed: {}", report_id, e);
                database.mark_report_failed(report_id, &e.to_string())
            }
        };

        if let Err(e) = transition {
            error!("Report {} state transition failed: {}", report_id, e);
        }
    }

    /// The full computation path: reference instant, per-store inputs,
    /// concurrent aggregation, CSV output
    async fn generate(
        &self,
        report_id: &str,
        store_filter: Option<String>,
    ) -> AppResult<(PathBuf, ReportRunStats)> {
        let mut stats = ReportRunStats::new();
        let database = Database::new(&self.database_path.to_string_lossy())?;
        let default_tz = self.engine.default_tz()?;

        let reference = self.resolve_reference(&database, store_filter.as_deref())?;
        let store_ids = match &store_filter {
            Some(store_id) => vec![store_id.clone()],
            None => database.distinct_store_ids()?,
        };
        info!(
            "Report {}: {} stores, reference instant {}",
            report_id,
            store_ids.len(),
            reference
        );

        // Load phase: serial read of each store's observations, hours and
        // timezone. This is where per-store faults surface, and where the
        // failure policy applies.
        let mut inputs = Vec::with_capacity(store_ids.len());
        for store_id in &store_ids {
            match self.load_store_inputs(&database, store_id, reference, default_tz) {
                Ok(store_inputs) => inputs.push(store_inputs),
                Err(e) => match self.engine.store_failure_policy {
                    StoreFailurePolicy::Skip => {
                        warn!("Skipping store {}: {}", store_id, e);
                        stats.stores_skipped += 1;
                    }
                    StoreFailurePolicy::Fail => {
                        return Err(AppError::Report(format!(
                            "Store {} failed: {}",
                            store_id, e
                        )));
                    }
                },
            }
        }

        // Compute phase: stores are independent; fan out over read-only
        // inputs with a bounded number of in-flight tasks.
        let missing_policy = self.engine.missing_hours_policy;
        let mut rows: Vec<MetricsRow> = futures::stream::iter(inputs.into_iter())
            .map(|input| async move {
                let schedule = WeeklySchedule::from_entries(&input.hours, missing_policy);
                compute_store_metrics(
                    &input.store_id,
                    reference,
                    input.timezone,
                    &schedule,
                    &input.observations,
                )
            })
            .buffer_unordered(self.engine.concurrent_stores.max(1))
            .collect()
            .await;

        // buffer_unordered yields in completion order; sort for stable output
        rows.sort_by(|a, b| a.store_id.cmp(&b.store_id));
        stats.stores_processed = rows.len();
        stats.rows_written = rows.len();

        std::fs::create_dir_all(&self.reports_dir).map_err(AppError::Io)?;
        let output_path = self.reports_dir.join(format!("report_{}.csv", report_id));
        super::writer::write_metrics_csv(&output_path, &rows)?;

        stats.finish();
        Ok((output_path, stats))
    }

    /// Resolve the reference "now" instant per the configured policy
    fn resolve_reference(
        &self,
        database: &Database,
        store_filter: Option<&str>,
    ) -> AppResult<DateTime<Utc>> {
        match self.engine.reference_policy {
            ReferencePolicy::WallClock => Ok(Utc::now()),
            ReferencePolicy::MaxObservation => {
                match database.max_status_timestamp(store_filter)? {
                    Some(max) => Ok(max),
                    None => {
                        // No observations anywhere: the windows are empty
                        // whatever the instant, wall clock keeps the job
                        // well-defined
                        debug!("No observations found; falling back to wall clock");
                        Ok(Utc::now())
                    }
                }
            }
        }
    }

    /// Load one store's read-only inputs.
    ///
    /// Observations cover the week window plus the seed margin, and the
    /// latest observation before that range is prepended so the first
    /// business segment's initial status interpolates from real data.
    fn load_store_inputs(
        &self,
        database: &Database,
        store_id: &str,
        reference: DateTime<Utc>,
        default_tz: Tz,
    ) -> AppResult<StoreInputs> {
        let timezone = match database.timezone_for_store(store_id)? {
            Some(assignment) => assignment.timezone,
            None => {
                debug!(
                    "Store {} has no timezone record; using default {}",
                    store_id, default_tz
                );
                default_tz
            }
        };

        let hours = database.hours_for_store(store_id)?;

        let load_from = reference
            - Duration::days(7)
            - Duration::hours(self.engine.seed_margin_hours as i64);
        let mut observations =
            database.observations_in_range(store_id, load_from, reference)?;
        if let Some(seed) = database.latest_observation_before(store_id, load_from)? {
            observations.insert(0, seed);
        }

        Ok(StoreInputs {
            store_id: store_id.to_string(),
            timezone,
            hours,
            observations,
        })
    }
}

/// Poll a report job's current state
pub fn report_status(database_path: &Path, report_id: &str) -> AppResult<Option<crate::types::ReportJob>> {
    let database = Database::new(&database_path.to_string_lossy())?;
    database.get_report(report_id)
}
