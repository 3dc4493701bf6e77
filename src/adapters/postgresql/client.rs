//! PostgreSQL client implementation
//!
//! This module provides the pooled client for the remote system-of-record.

use super::models::remote_schema_sql;
use crate::config::schema::RemoteConfig;
use crate::domain::{LegTrackError, Result, StoreError};
use deadpool_postgres::{Manager, ManagerConfig, Object, Pool, RecyclingMethod, Runtime};
use postgres_native_tls::MakeTlsConnector;
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio_postgres::NoTls;

/// PostgreSQL client for LegTrack
///
/// Owns the connection pool. Tables live in the configured schema.
pub struct PostgresClient {
    pool: Pool,
    config: RemoteConfig,
}

impl PostgresClient {
    /// Create a new PostgreSQL client
    ///
    /// No connection is opened until the pool is first used.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string cannot be parsed or the pool cannot be built.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let pg_config: tokio_postgres::Config = config
            .connection_string
            .expose_secret()
            .parse()
            .map_err(|e| {
                LegTrackError::Configuration(format!("Invalid PostgreSQL connection string: {e}"))
            })?;

        let manager_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };

        let manager = if config.requires_tls() {
            let connector = native_tls::TlsConnector::builder().build().map_err(|e| {
                LegTrackError::Configuration(format!("Failed to build TLS connector: {e}"))
            })?;
            Manager::from_config(pg_config, MakeTlsConnector::new(connector), manager_config)
        } else {
            Manager::from_config(pg_config, NoTls, manager_config)
        };

        let timeout = Some(Duration::from_secs(config.connection_timeout_seconds));
        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .runtime(Runtime::Tokio1)
            .wait_timeout(timeout)
            .create_timeout(timeout)
            .recycle_timeout(timeout)
            .build()
            .map_err(|e| {
                LegTrackError::Store(StoreError::Pool(format!(
                    "Failed to create connection pool: {e}"
                )))
            })?;

        Ok(Self { pool, config })
    }

    /// Create the remote record tables if they don't exist
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub async fn ensure_schema(&self) -> Result<()> {
        let client = self.get_connection().await?;
        client
            .batch_execute(&remote_schema_sql(&self.config.schema))
            .await?;

        tracing::info!(schema = %self.config.schema, "PostgreSQL schema initialized");
        Ok(())
    }

    /// Get a connection from the pool with the statement timeout applied
    ///
    /// # Errors
    ///
    /// Returns an error if a connection cannot be obtained.
    pub async fn get_connection(&self) -> Result<Object> {
        let client = self.pool.get().await?;
        let timeout_query = format!(
            "SET statement_timeout = {}",
            self.config.statement_timeout_seconds * 1000
        );
        client.batch_execute(&timeout_query).await?;
        Ok(client)
    }

    /// Schema holding the record tables
    pub fn schema(&self) -> &str {
        &self.config.schema
    }

    /// Get the connection string (without password)
    pub fn connection_string_safe(&self) -> String {
        redact(self.config.connection_string.expose_secret().as_ref())
    }

    /// Get the pool statistics
    pub fn pool_status(&self) -> deadpool_postgres::Status {
        self.pool.status()
    }
}

fn redact(connection_string: &str) -> String {
    connection_string
        .rsplit_once('@')
        .map(|(_, host)| format!("postgresql://***@{host}"))
        .unwrap_or_else(|| "postgresql://***".to_string())
}
