//! Uptime/downtime estimation engine
//!
//! The core computation: given a store's time-ordered status observations,
//! its weekly business-hours schedule and its timezone, estimate uptime and
//! downtime minutes for the last-hour/day/week windows ending at a fixed
//! reference instant, counted only inside business hours.
//!
//! ## Pipeline
//!
//! ```text
//! aggregate_window
//!   └─ per local calendar date touched by the window
//!        ├─ WeeklySchedule::resolve        (business hours for that weekday)
//!        ├─ local_window_to_utc + clip     (absolute UTC overlap, DST-aware)
//!        ├─ status_at                      (seed status at the clip start)
//!        └─ accumulate                     (split at observations, attribute)
//! ```
//!
//! Observation sequences are ascending by timestamp (the storage layer's
//! contract); a status persists from its observation until the next one.

pub mod clip;
pub mod hours;
pub mod interpolate;
pub mod segments;
pub mod window;

pub use clip::{clip, day_bounds_utc, local_window_to_utc};
pub use hours::{DaySchedule, WeeklySchedule};
pub use interpolate::status_at;
pub use segments::{accumulate, SegmentTotals};
pub use window::{aggregate_window, compute_store_metrics};
