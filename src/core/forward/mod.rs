//! Forwarding of staged records to the remote store
//!
//! A forwarding run:
//!
//! 1. Reads the watermark: the scrape job consumed by the latest completed push that
//!    wrote data
//! 2. Picks the oldest completed scrape job past the watermark that changed data
//! 3. Pushes every local record stamped since that job started, in chunks
//! 4. Records the push job, which moves the watermark when data was written

pub mod forwarder;
pub mod outcome;

pub use forwarder::Forwarder;
pub use outcome::ForwardOutcome;
