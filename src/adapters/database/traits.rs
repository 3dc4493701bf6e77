//! Store abstraction traits
//!
//! This module defines the traits that the local staging store and the remote
//! system-of-record must implement. One implementation exists per entity kind.

use crate::domain::{Record, Result, Scope};
use async_trait::async_trait;

/// Rows written by one [`LocalStore::bulk_upsert`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertCounts {
    pub inserted: usize,
    pub updated: usize,
}

impl UpsertCounts {
    /// Rows whose `last_updated` moved
    pub fn changed(&self) -> usize {
        self.inserted + self.updated
    }
}

/// Outcome of one remote push call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PushReceipt {
    /// Rows the remote store reports as written
    pub rows_affected: u64,
}

/// Local staging store for one entity kind
///
/// Every method opens its own connection; multi-row writes run in one transaction.
pub trait LocalStore<R: Record>: Send + Sync {
    /// Existing records inside `scope`, used as the reconciliation index
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn select_by_scope(&self, scope: &Scope) -> Result<Vec<R>>;

    /// Records with `last_updated >= timestamp`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn select_updated_after(&self, timestamp: i64) -> Result<Vec<R>>;

    /// Applies an insert set and an update set atomically, stamping every written row
    /// with `timestamp`
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; nothing is written in that case.
    fn bulk_upsert(&self, insert: &[R], update: &[R], timestamp: i64) -> Result<UpsertCounts>;

    fn count(&self) -> Result<usize>;

    /// Deletes every record and returns how many were removed
    fn delete_all(&self) -> Result<usize>;
}

/// Remote system-of-record for one entity kind
#[async_trait]
pub trait RemoteStore<R: Record>: Send + Sync {
    /// Upserts `records` on the remote side
    ///
    /// # Errors
    ///
    /// Returns an error if the remote write fails. Records from earlier calls stay
    /// written.
    async fn push(&self, records: &[R]) -> Result<PushReceipt>;
}
