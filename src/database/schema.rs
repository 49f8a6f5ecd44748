//! SQLite schema for the store uptime monitor
//!
//! Four tables, populated by two writers:
//!
//! - **Ingest**: `store_status`, `business_hours`, `store_timezones` -
//!   read-only to the report engine afterwards.
//! - **Report orchestrator**: `reports` - one row per triggered report job,
//!   transitioned Running -> Complete/Failed exactly once.
//!
//! Status timestamps are stored as Unix **milliseconds** UTC so the poll
//! feed's sub-second precision survives the round trip.

use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::debug;

/// Initialise the complete schema
pub fn setup_schema(connection: &Connection) -> AppResult<()> {
    connection.execute_batch(
        r#"
        PRAGMA user_version = 1;
        PRAGMA foreign_keys = ON;

        -- STORE STATUS POLLS
        -- Append-only feed of active/inactive observations per store
        CREATE TABLE IF NOT EXISTS store_status (
            id INTEGER PRIMARY KEY,
            store_id TEXT NOT NULL,
            status TEXT NOT NULL CHECK (status IN ('active', 'inactive')),
            timestamp_utc INTEGER NOT NULL          -- Unix milliseconds UTC
        );

        -- Covering index for the engine's time-ordered range scans
        CREATE INDEX IF NOT EXISTS idx_store_status_store_ts
            ON store_status(store_id, timestamp_utc);

        -- BUSINESS HOURS
        -- Weekly local-time windows; day_of_week 0 = Monday .. 6 = Sunday.
        -- A store may carry multiple rows per weekday; a missing weekday is
        -- resolved by the engine's missing-hours policy, not stored here.
        CREATE TABLE IF NOT EXISTS business_hours (
            id INTEGER PRIMARY KEY,
            store_id TEXT NOT NULL,
            day_of_week INTEGER NOT NULL CHECK (day_of_week BETWEEN 0 AND 6),
            start_time_local TEXT NOT NULL,         -- HH:MM:SS
            end_time_local TEXT NOT NULL            -- HH:MM:SS
        );

        CREATE INDEX IF NOT EXISTS idx_business_hours_store
            ON business_hours(store_id);

        -- STORE TIMEZONES
        -- IANA zone per store; stores without a row fall back to the
        -- configured default zone
        CREATE TABLE IF NOT EXISTS store_timezones (
            store_id TEXT PRIMARY KEY,
            timezone_str TEXT NOT NULL
        );

        -- REPORT JOBS
        CREATE TABLE IF NOT EXISTS reports (
            report_id TEXT PRIMARY KEY,
            status TEXT NOT NULL CHECK (status IN ('Running', 'Complete', 'Failed')),
            output_path TEXT,
            error TEXT,
            created_at INTEGER NOT NULL,            -- Unix seconds UTC
            completed_at INTEGER
        );
        "#,
    )?;

    debug!("Schema initialised");
    Ok(())
}
