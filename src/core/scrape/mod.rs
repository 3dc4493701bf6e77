//! Scraping of source pages into the local store
//!
//! A scrape job covers one [`ScrapeTarget`], expanded into units (one page each). Per
//! unit the runner fetches the page, skips it when it matches the last snapshot, parses
//! it, reconciles the records against the local store, applies the changes in one
//! transaction and only then saves the new snapshot. Measure and special session units
//! are recorded as scrape details; the job status is their rollup.

pub mod outcome;
pub mod runner;
pub mod target;

pub use outcome::ScrapeOutcome;
pub use runner::ScrapeRunner;
pub use target::{ScrapeTarget, ScrapeUnit};
