//! Scrape and push job ledgers
//!
//! Both ledgers live in the local SQLite database next to the staged records and are
//! the only coordination between scraping and forwarding: a completed scrape job that
//! changed data is picked up by the next forwarding run whose watermark is below it.

pub mod models;
pub mod push;
pub mod rollup;
pub mod scrape;

pub use models::{PushJob, ScrapeDetail, ScrapeJob};
pub use push::PushJobLedger;
pub use rollup::rollup;
pub use scrape::ScrapeJobLedger;
