//! Generic SQLite implementation of [`LocalStore`]

use super::client::SqliteClient;
use super::records::{select_columns, SqliteRecord};
use crate::adapters::database::traits::{LocalStore, UpsertCounts};
use crate::domain::{Result, Scope};
use rusqlite::params_from_iter;
use rusqlite::types::Value;
use std::marker::PhantomData;

/// Local store for one record kind, backed by its table in the staging database
pub struct SqliteStore<R> {
    client: SqliteClient,
    _record: PhantomData<fn() -> R>,
}

impl<R: SqliteRecord> SqliteStore<R> {
    pub fn new(client: SqliteClient) -> Self {
        Self {
            client,
            _record: PhantomData,
        }
    }

    fn order_by() -> String {
        R::KEY_COLUMNS.join(", ")
    }

    fn select(&self, filter: &str, params: Vec<Value>) -> Result<Vec<R>> {
        let conn = self.client.connect()?;
        let sql = format!(
            "SELECT {} FROM {} WHERE {} ORDER BY {}",
            select_columns::<R>(),
            R::TABLE,
            filter,
            Self::order_by()
        );
        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map(params_from_iter(params), |row| R::from_row(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn insert_sql() -> String {
        let columns = select_columns::<R>();
        let placeholders = vec!["?"; R::KEY_COLUMNS.len() + 1 + R::PAYLOAD_COLUMNS.len()];
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            R::TABLE,
            columns,
            placeholders.join(", ")
        )
    }

    fn update_sql() -> String {
        let assignments = std::iter::once("last_updated")
            .chain(R::PAYLOAD_COLUMNS.iter().copied())
            .map(|c| format!("{c} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let key_match = R::KEY_COLUMNS
            .iter()
            .map(|c| format!("{c} = ?"))
            .collect::<Vec<_>>()
            .join(" AND ");
        format!("UPDATE {} SET {} WHERE {}", R::TABLE, assignments, key_match)
    }
}

impl<R: SqliteRecord> LocalStore<R> for SqliteStore<R> {
    fn select_by_scope(&self, scope: &Scope) -> Result<Vec<R>> {
        let (filter, params) = R::scope_filter(scope);
        self.select(&filter, params)
    }

    fn select_updated_after(&self, timestamp: i64) -> Result<Vec<R>> {
        self.select("last_updated >= ?", vec![Value::Integer(timestamp)])
    }

    fn bulk_upsert(&self, insert: &[R], update: &[R], timestamp: i64) -> Result<UpsertCounts> {
        if insert.is_empty() && update.is_empty() {
            return Ok(UpsertCounts::default());
        }

        let mut conn = self.client.connect()?;
        let tx = conn.transaction()?;
        let mut counts = UpsertCounts::default();

        {
            let mut insert_stmt = tx.prepare_cached(&Self::insert_sql())?;
            for record in insert {
                let params = record
                    .key_values()
                    .into_iter()
                    .chain(std::iter::once(Value::Integer(timestamp)))
                    .chain(record.payload_values());
                counts.inserted += insert_stmt.execute(params_from_iter(params))?;
            }

            let mut update_stmt = tx.prepare_cached(&Self::update_sql())?;
            for record in update {
                let params = std::iter::once(Value::Integer(timestamp))
                    .chain(record.payload_values())
                    .chain(record.key_values());
                counts.updated += update_stmt.execute(params_from_iter(params))?;
            }
        }

        tx.commit()?;

        tracing::debug!(
            table = R::TABLE,
            inserted = counts.inserted,
            updated = counts.updated,
            "Applied local upsert"
        );
        Ok(counts)
    }

    fn count(&self) -> Result<usize> {
        let conn = self.client.connect()?;
        let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", R::TABLE), [], |row| {
            row.get(0)
        })?;
        Ok(count as usize)
    }

    fn delete_all(&self) -> Result<usize> {
        let conn = self.client.connect()?;
        let deleted = conn.execute(&format!("DELETE FROM {}", R::TABLE), [])?;
        Ok(deleted)
    }
}
