// LegTrack - Legislative tracking ETL
// Copyright (c) 2025 LegTrack Contributors
// Licensed under the MIT License

//! # LegTrack - Legislative tracking ETL
//!
//! LegTrack ingests the pages of a legislative tracking site, stages the parsed records
//! in a local SQLite database and forwards only new or changed records, once, to a
//! remote PostgreSQL system-of-record.
//!
//! ## Overview
//!
//! This library provides:
//! - **Scraping** measure, hearing and special-session pages, skipping pages that did
//!   not change since their last snapshot
//! - **Reconciling** each parsed batch against local state into insert, update and
//!   ignore sets
//! - **Ledgers** of scrape and push jobs that give once-per-run forwarding without
//!   distributed transactions
//! - **Forwarding** the records changed by the next unprocessed scrape job, in chunks
//!
//! ## Architecture
//!
//! LegTrack follows a layered architecture:
//!
//! - [`core`] - Business logic (detect, reconcile, ledger, scrape, forward, pipeline)
//! - [`adapters`] - External integrations (HTTP, HTML, SQLite, PostgreSQL)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use legtrack::config::load_config;
//! use legtrack::core::pipeline::Pipeline;
//! use legtrack::domain::DataType;
//! use legtrack::logging::init_logging;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("legtrack.toml")?;
//!     let _guard = init_logging(&config.application.log_level, &config.logging)?;
//!
//!     let pipeline = Pipeline::from_config(&config)?;
//!     pipeline.ensure_remote_schema().await?;
//!
//!     let scraped = pipeline.scrape(&pipeline.measures_target(2024)).await?;
//!     println!("Scrape {scraped}");
//!
//!     let forwarded = pipeline.forward(DataType::Measure).await?;
//!     println!("Forward: {forwarded}");
//!     Ok(())
//! }
//! ```
//!
//! ## Incremental Forwarding
//!
//! Each completed push job that wrote data records the scrape job it consumed. That id
//! is the watermark: the next forwarding run picks the oldest completed scrape job past
//! it that changed data, and pushes every local record stamped since that job started.
//!
//! ```rust,no_run
//! use legtrack::adapters::sqlite::SqliteClient;
//! use legtrack::core::ledger::PushJobLedger;
//! use legtrack::domain::DataType;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SqliteClient::new("./results/legtrack.sqlite3");
//! let watermark = PushJobLedger::new(client).watermark(DataType::Hearing)?;
//! println!("Hearings forwarded through scrape job {watermark}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! LegTrack uses the [`domain::LegTrackError`] type for all errors. Validation errors
//! escape a run unmodified; every other failure inside a run becomes a `failed` ledger
//! row and a `failed` result:
//!
//! ```rust,no_run
//! use legtrack::domain::LegTrackError;
//!
//! fn example() -> Result<(), LegTrackError> {
//!     let config = legtrack::config::load_config("legtrack.toml")?;
//!     println!("{}", config.source.base_url);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
