//! Core business logic for LegTrack.
//!
//! # Modules
//!
//! - [`detect`] - Snapshot fingerprints that short-circuit unchanged pages
//! - [`reconcile`] - Insert/update/ignore classification against local state
//! - [`ledger`] - Scrape and push job ledgers
//! - [`scrape`] - Scrape runs: fetch, detect, parse, reconcile, stage
//! - [`forward`] - Forwarding runs: watermark, chunked push, ledger bookkeeping
//! - [`pipeline`] - Every data type wired to its collaborators
//!
//! # Workflow
//!
//! 1. **Scrape**: fetch a source page and compare it with its last snapshot
//! 2. **Reconcile**: sort the parsed records against the local store
//! 3. **Stage**: apply inserts and updates in one local transaction, stamping
//!    `last_updated`, and record the scrape job
//! 4. **Forward** (separate schedule): pick the next scrape job past the push watermark
//!    and push every record stamped since it started
//!
//! # Example
//!
//! ```rust,no_run
//! use legtrack::config::load_config;
//! use legtrack::core::pipeline::Pipeline;
//! use legtrack::core::scrape::ScrapeTarget;
//! use legtrack::domain::DataType;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("legtrack.toml")?;
//! let pipeline = Pipeline::from_config(&config)?;
//!
//! let outcome = pipeline.scrape(&ScrapeTarget::Hearings { year: 2024 }).await?;
//! println!("Scrape {}: {} parsed, {} changed", outcome.message(), outcome.total, outcome.updated);
//!
//! let forwarded = pipeline.forward(DataType::Hearing).await?;
//! println!("{forwarded}");
//! # Ok(())
//! # }
//! ```

pub mod detect;
pub mod forward;
pub mod ledger;
pub mod pipeline;
pub mod reconcile;
pub mod scrape;
