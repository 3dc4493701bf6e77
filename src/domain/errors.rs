//! Domain error types
//!
//! This module defines the error hierarchy for LegTrack. Run boundaries branch on the
//! error kind: validation failures propagate to the caller, everything else becomes a
//! `failed` ledger row.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main LegTrack error type
///
/// This is the primary error type used throughout the crate.
#[derive(Debug, Error)]
pub enum LegTrackError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network or transport errors while fetching source pages
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Malformed source content or selector mismatch
    #[error("Parse error: {0}")]
    Parse(String),

    /// Local or remote store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Missing or invalid caller argument
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl LegTrackError {
    /// Returns true for errors that must escape a run boundary unmodified
    pub fn is_validation(&self) -> bool {
        matches!(self, LegTrackError::Validation(_))
    }

    /// Short, stable name of the error kind for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            LegTrackError::Configuration(_) => "configuration",
            LegTrackError::Fetch(_) => "fetch",
            LegTrackError::Parse(_) => "parse",
            LegTrackError::Store(_) => "store",
            LegTrackError::Validation(_) => "validation",
            LegTrackError::Serialization(_) => "serialization",
            LegTrackError::Io(_) => "io",
        }
    }
}

/// Fetch-specific errors
///
/// These errors don't expose the HTTP client types.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Failed to connect to the source site
    #[error("Failed to connect: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Non-success HTTP status
    #[error("Unexpected status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// Response body could not be read
    #[error("Invalid response body: {0}")]
    InvalidBody(String),
}

/// Store-specific errors for the local staging store and the remote sink
#[derive(Debug, Error)]
pub enum StoreError {
    /// Local SQLite failure
    #[error("Local store failure: {0}")]
    Local(String),

    /// Remote store failure
    #[error("Remote store failure: {0}")]
    Remote(String),

    /// Connection pool failure
    #[error("Connection pool failure: {0}")]
    Pool(String),

    /// A ledger row was finalized twice
    #[error("{table} row {id} is already finalized")]
    AlreadyFinalized { table: &'static str, id: i64 },

    /// A stored value could not be mapped back into the domain
    #[error("Corrupt stored value: {0}")]
    Corrupt(String),
}

impl From<std::io::Error> for LegTrackError {
    fn from(err: std::io::Error) -> Self {
        LegTrackError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LegTrackError {
    fn from(err: serde_json::Error) -> Self {
        LegTrackError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for LegTrackError {
    fn from(err: toml::de::Error) -> Self {
        LegTrackError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<rusqlite::Error> for LegTrackError {
    fn from(err: rusqlite::Error) -> Self {
        LegTrackError::Store(StoreError::Local(err.to_string()))
    }
}

impl From<tokio_postgres::Error> for LegTrackError {
    fn from(err: tokio_postgres::Error) -> Self {
        LegTrackError::Store(StoreError::Remote(err.to_string()))
    }
}

impl From<deadpool_postgres::PoolError> for LegTrackError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        LegTrackError::Store(StoreError::Pool(err.to_string()))
    }
}
