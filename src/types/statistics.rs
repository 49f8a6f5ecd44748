//! Statistics for ingestion runs and report generation runs
//!
//! Mirrors the pipeline's two long-running operations: CSV ingestion and
//! per-report computation. Durations are captured with `Instant` so rates
//! stay correct however long a run takes.

use std::time::{Duration, Instant};

/// Common timing information for run statistics
#[derive(Debug, Clone)]
pub struct TimingInfo {
    pub start_time: Instant,
    pub processing_duration: Duration,
}

impl Default for TimingInfo {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            processing_duration: Duration::default(),
        }
    }
}

impl TimingInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(&mut self) {
        self.processing_duration = self.start_time.elapsed();
    }

    pub fn elapsed(&self) -> Duration {
        if self.processing_duration.is_zero() {
            self.start_time.elapsed()
        } else {
            self.processing_duration
        }
    }
}

/// Statistics for one CSV ingest run
#[derive(Debug, Clone)]
pub struct IngestStats {
    pub total_rows: usize,
    pub inserted: usize,
    pub malformed: usize,
    pub batches_processed: usize,
    pub timing: TimingInfo,
}

impl Default for IngestStats {
    fn default() -> Self {
        Self {
            total_rows: 0,
            inserted: 0,
            malformed: 0,
            batches_processed: 0,
            timing: TimingInfo::new(),
        }
    }
}

impl IngestStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(&mut self) {
        self.timing.finish();
    }

    pub fn error_rate(&self) -> f64 {
        if self.total_rows > 0 {
            (self.malformed as f64 / self.total_rows as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn rows_per_second(&self) -> f64 {
        let secs = self.timing.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.total_rows as f64 / secs
        } else {
            0.0
        }
    }
}

/// Statistics for one report generation run
#[derive(Debug, Clone)]
pub struct ReportRunStats {
    pub stores_processed: usize,
    pub stores_skipped: usize,
    pub rows_written: usize,
    pub timing: TimingInfo,
}

impl Default for ReportRunStats {
    fn default() -> Self {
        Self {
            stores_processed: 0,
            stores_skipped: 0,
            rows_written: 0,
            timing: TimingInfo::new(),
        }
    }
}

impl ReportRunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(&mut self) {
        self.timing.finish();
    }

    pub fn stores_per_second(&self) -> f64 {
        let secs = self.timing.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.stores_processed as f64 / secs
        } else {
            0.0
        }
    }
}
