//! SQLite local staging store
//!
//! One database file holds the record tables and both job ledgers.

pub mod client;
pub mod records;
pub mod schema;
pub mod store;

pub use client::SqliteClient;
pub use records::SqliteRecord;
pub use store::SqliteStore;
