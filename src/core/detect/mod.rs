//! Change detection for fetched source pages

pub mod detector;
pub mod fingerprint;

pub use detector::{ChangeDetector, SnapshotKey};
pub use fingerprint::fingerprint;
