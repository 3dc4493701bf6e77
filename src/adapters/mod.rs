//! External system integrations for LegTrack.
//!
//! - [`http`] - Source site fetcher and page URLs
//! - [`html`] - Page parsers built on `scraper`
//! - [`database`] - Store traits and factory
//! - [`sqlite`] - Local staging store and job ledgers' database
//! - [`postgresql`] - Remote system-of-record
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits ([`http::Fetcher`],
//! [`html::Parser`], [`database::LocalStore`], [`database::RemoteStore`]) so the
//! core workflows can be tested with in-memory fakes.
//!
//! ```rust,no_run
//! use legtrack::adapters::database::{create_local_store, LocalStore};
//! use legtrack::adapters::sqlite::SqliteClient;
//! use legtrack::domain::{Measure, Scope};
//!
//! # fn example() -> legtrack::domain::Result<()> {
//! let client = SqliteClient::new("./results/legtrack.sqlite3");
//! client.ensure_schema()?;
//! let measures = create_local_store::<Measure>(&client);
//! let existing = measures.select_by_scope(&Scope::year(2024))?;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod html;
pub mod http;
pub mod postgresql;
pub mod sqlite;
