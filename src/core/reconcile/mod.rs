//! Reconciliation of parsed batches against the local store
//!
//! [`Reconciler::sortout`] loads the existing records for a scope, then
//! [`partition`] splits the incoming batch into insert, update and ignore sets.

pub mod sortout;

pub use sortout::{partition, Sortout};

use crate::adapters::database::traits::LocalStore;
use crate::domain::{Record, Result, Scope};
use std::collections::HashMap;
use std::sync::Arc;

/// Reconciles batches of one record kind
pub struct Reconciler<R: Record> {
    store: Arc<dyn LocalStore<R>>,
}

impl<R: Record> Reconciler<R> {
    pub fn new(store: Arc<dyn LocalStore<R>>) -> Self {
        Self { store }
    }

    /// Classifies `incoming` against the local records in `scope`
    ///
    /// # Errors
    ///
    /// Returns an error if the existing records cannot be loaded.
    pub fn sortout(&self, scope: &Scope, incoming: Vec<R>) -> Result<Sortout<R>> {
        let existing = self.store.select_by_scope(scope)?;
        let sortout = partition(existing, incoming);

        tracing::debug!(
            data_type = %R::DATA_TYPE,
            scope = %scope,
            insert = sortout.insert_size(),
            update = sortout.update_size(),
            ignore = sortout.ignore_size(),
            "Sorted out batch"
        );

        Ok(sortout)
    }

    /// Classifies `incoming` grouped by each record's own [`Record::scope`]
    ///
    /// A source page may list records outside the scope it was fetched for, such as
    /// another year or a type that did not parse. Each group is compared with the local
    /// records of its own scope so no stored key is missed. Groups keep first-seen order.
    ///
    /// # Errors
    ///
    /// Returns an error if the existing records of any group cannot be loaded.
    pub fn sortout_by_record_scope(&self, incoming: Vec<R>) -> Result<Sortout<R>> {
        let mut positions: HashMap<Scope, usize> = HashMap::new();
        let mut groups: Vec<(Scope, Vec<R>)> = Vec::new();
        for record in incoming {
            let scope = record.scope();
            let position = *positions.entry(scope).or_insert_with(|| {
                groups.push((scope, Vec::new()));
                groups.len() - 1
            });
            groups[position].1.push(record);
        }

        let mut sortout = Sortout::default();
        for (scope, records) in groups {
            sortout.merge(self.sortout(&scope, records)?);
        }
        Ok(sortout)
    }
}
