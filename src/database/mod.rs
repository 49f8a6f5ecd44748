//! Modular database operations for the store uptime monitor.
//!
//! This module provides a clean interface to database operations
//! organised by concern.
//!
//! ## Architecture
//!
//! The `Database` struct directly implements all operation traits:
//! - `StatusOperations` - status poll storage and time-ordered retrieval
//! - `HoursOperations` - business hours storage
//! - `TimezoneOperations` - timezone assignments
//! - `ReportOperations` - report job lifecycle
//! - `StatisticsOperations` - summary statistics

pub mod hours;
pub mod reports;
pub mod schema;
pub mod statistics;
pub mod status;
pub mod timezones;
pub mod traits;

// Re-export the main types and traits
pub use schema::setup_schema;
pub use statistics::DatabaseStats;
pub use traits::*;

use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::info;

/// The main database interface that implements all operation traits.
///
/// This struct directly holds a SQLite connection and provides all database
/// operations through trait implementations organised by concern.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Create a new database instance, initialising the schema if needed
    pub fn new(database_path: &str) -> AppResult<Self> {
        let connection = Connection::open(database_path)?;

        // The trigger path, status pollers and the background report task
        // each hold their own connection to the same file
        connection.busy_timeout(std::time::Duration::from_secs(5))?;

        // Initialise the schema
        setup_schema(&connection)?;

        info!("Database initialised at: {}", database_path);
        Ok(Self { connection })
    }

    /// Get a reference to the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Execute a function within a database transaction
    pub fn execute_transaction<F, R>(&mut self, f: F) -> AppResult<R>
    where
        F: FnOnce(&rusqlite::Transaction) -> AppResult<R>,
    {
        let tx = self.connection.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }
}
