//! Scrape run results

use crate::domain::JobStatus;
use serde::Serialize;
use std::fmt;

/// Result of one scrape run: the terminal job status and summed counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScrapeOutcome {
    pub status: JobStatus,
    /// Records parsed across all units
    pub total: i64,
    /// Records inserted or updated locally
    pub updated: i64,
}

impl ScrapeOutcome {
    pub fn failed() -> Self {
        Self {
            status: JobStatus::Failed,
            total: 0,
            updated: 0,
        }
    }

    /// `completed`, `skipped` or `failed`
    pub fn message(&self) -> &'static str {
        self.status.as_str()
    }
}

impl fmt::Display for ScrapeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (total: {}, updated: {})",
            self.message(),
            self.total,
            self.updated
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_outcome() {
        let outcome = ScrapeOutcome::failed();
        assert_eq!(outcome.message(), "failed");
        assert_eq!(outcome.to_string(), "failed (total: 0, updated: 0)");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ScrapeOutcome {
            status: JobStatus::Completed,
            total: 12,
            updated: 3,
        })
        .unwrap();
        assert_eq!(json["status"], "completed");
        assert_eq!(json["total"], 12);
        assert_eq!(json["updated"], 3);
    }
}
