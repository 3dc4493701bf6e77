//! PostgreSQL adapter implementing [`RemoteStore`]

use super::client::PostgresClient;
use super::models::{upsert_sql, PostgresRecord};
use crate::adapters::database::traits::{PushReceipt, RemoteStore};
use crate::domain::Result;
use async_trait::async_trait;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// Remote store for one record kind
///
/// Every [`RemoteStore::push`] call runs in a single transaction.
pub struct PostgresRemoteStore<R> {
    client: Arc<PostgresClient>,
    _record: PhantomData<fn() -> R>,
}

impl<R: PostgresRecord> PostgresRemoteStore<R> {
    pub fn new(client: Arc<PostgresClient>) -> Self {
        Self {
            client,
            _record: PhantomData,
        }
    }
}

#[async_trait]
impl<R: PostgresRecord> RemoteStore<R> for PostgresRemoteStore<R> {
    async fn push(&self, records: &[R]) -> Result<PushReceipt> {
        if records.is_empty() {
            return Ok(PushReceipt::default());
        }

        let mut conn = self.client.get_connection().await?;
        let tx = conn.transaction().await?;
        let statement = tx
            .prepare_cached(&upsert_sql::<R>(self.client.schema()))
            .await?;

        let mut rows_affected = 0u64;
        for record in records {
            let params = record.params();
            let refs: Vec<&(dyn ToSql + Sync)> = params
                .iter()
                .map(|p| p.as_ref() as &(dyn ToSql + Sync))
                .collect();
            rows_affected += tx.execute(&statement, &refs).await?;
        }

        tx.commit().await?;

        tracing::debug!(
            table = R::TABLE,
            records = records.len(),
            rows_affected,
            "Pushed records to PostgreSQL"
        );

        Ok(PushReceipt { rows_affected })
    }
}
