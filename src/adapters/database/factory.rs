//! Store factory
//!
//! This module builds the local and remote stores from configuration.

use crate::adapters::database::traits::{LocalStore, RemoteStore};
use crate::adapters::postgresql::{PostgresClient, PostgresRecord, PostgresRemoteStore};
use crate::adapters::sqlite::{SqliteClient, SqliteRecord, SqliteStore};
use crate::config::schema::LegTrackConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Opens the local staging database and makes sure its tables exist
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the schema cannot be created.
pub fn create_local_client(config: &LegTrackConfig) -> Result<SqliteClient> {
    let client = SqliteClient::new(&config.local.database_path);
    client.ensure_schema()?;
    Ok(client)
}

/// Builds the remote connection pool
///
/// Remote tables are created lazily by [`PostgresClient::ensure_schema`].
///
/// # Errors
///
/// Returns an error if the connection settings are invalid.
pub fn create_remote_client(config: &LegTrackConfig) -> Result<Arc<PostgresClient>> {
    tracing::info!("Creating PostgreSQL client");
    let client = PostgresClient::new(config.remote.clone())?;
    tracing::debug!(remote = %client.connection_string_safe(), "PostgreSQL pool ready");
    Ok(Arc::new(client))
}

/// Local store for record kind `R`
pub fn create_local_store<R: SqliteRecord>(client: &SqliteClient) -> Arc<dyn LocalStore<R>> {
    Arc::new(SqliteStore::<R>::new(client.clone()))
}

/// Remote store for record kind `R`
pub fn create_remote_store<R: PostgresRecord>(
    client: &Arc<PostgresClient>,
) -> Arc<dyn RemoteStore<R>> {
    Arc::new(PostgresRemoteStore::<R>::new(Arc::clone(client)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;
    use crate::domain::{Measure, MeasureType};
    use tempfile::TempDir;

    #[test]
    fn test_create_local_client_and_store() {
        let dir = TempDir::new().unwrap();
        let db = dir.path().join("db").join("legtrack.sqlite3");
        let toml = format!(
            r#"
[application]
log_level = "info"

[local]
database_path = "{}"

[remote]
connection_string = "postgresql://user:pw@localhost:5432/legtrack"
"#,
            db.display()
        );
        let config = load_config_from_str(&toml).unwrap();

        let client = create_local_client(&config).unwrap();
        assert!(db.exists());

        let store = create_local_store::<Measure>(&client);
        store
            .bulk_upsert(&[Measure::new(2024, MeasureType::Sb, 9)], &[], 1)
            .unwrap();
        assert_eq!(store.count().unwrap(), 1);

        let remote = create_remote_client(&config).unwrap();
        let _store = create_remote_store::<Measure>(&remote);
    }
}
