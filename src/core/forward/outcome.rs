//! Forwarding run results

use serde::Serialize;
use std::fmt;

/// What one forwarding run did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ForwardOutcome {
    /// No completed scrape job past the watermark changed data
    NoUnprocessedScrapeJobs,
    /// A scrape job was pending but no local record was stamped since it started
    NoUnprocessedData,
    /// `size` records were pushed; the remote store reported `rows_affected`
    Completed { size: usize, rows_affected: u64 },
    /// The run failed and was recorded as such
    Failed { error: String },
}

impl ForwardOutcome {
    pub fn message(&self) -> String {
        match self {
            ForwardOutcome::NoUnprocessedScrapeJobs => "No Unprocessed Scrape Jobs".to_string(),
            ForwardOutcome::NoUnprocessedData => "No Unprocessed Data".to_string(),
            ForwardOutcome::Completed { size, .. } => format!("Push Completed {size} Data"),
            ForwardOutcome::Failed { error } => error.clone(),
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            ForwardOutcome::NoUnprocessedScrapeJobs | ForwardOutcome::NoUnprocessedData
        )
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ForwardOutcome::Failed { .. })
    }
}

impl fmt::Display for ForwardOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
