//! PostgreSQL remote store
//!
//! This module provides the system-of-record the forwarder pushes to.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::PostgresRemoteStore;
pub use client::PostgresClient;
pub use models::PostgresRecord;
