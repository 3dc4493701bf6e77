//! Source site access

pub mod fetcher;
pub mod urls;

pub use fetcher::{Fetcher, HttpFetcher};
pub use urls::SourceUrls;
