//! SQLite client for the local staging store
//!
//! The client holds only the database path. Each logical operation opens its own
//! short-lived connection through [`SqliteClient::connect`].

use super::schema::SCHEMA_SQL;
use crate::domain::{LegTrackError, Result, StoreError};
use rusqlite::Connection;
use std::path::PathBuf;
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct SqliteClient {
    path: PathBuf,
}

impl SqliteClient {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens a new connection, creating the parent directory if needed
    ///
    /// # Errors
    ///
    /// Returns a store error if the directory or database cannot be opened.
    pub fn connect(&self) -> Result<Connection> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    LegTrackError::Store(StoreError::Local(format!(
                        "Failed to create database directory {}: {}",
                        parent.display(),
                        e
                    )))
                })?;
            }
        }

        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }

    /// Creates the record and ledger tables if they don't exist
    ///
    /// # Errors
    ///
    /// Returns a store error if the schema cannot be created.
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA_SQL)?;
        tracing::info!(path = %self.path.display(), "Local schema initialized");
        Ok(())
    }
}
