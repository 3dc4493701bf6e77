//! Job status rollup over subtype details

use crate::domain::JobStatus;

/// Combines subtype outcomes into the job outcome
///
/// Any failure fails the job; a job whose units were all skipped (or that had none) is
/// skipped; anything else completed.
pub fn rollup(statuses: &[JobStatus]) -> JobStatus {
    if statuses.contains(&JobStatus::Failed) {
        JobStatus::Failed
    } else if statuses.iter().all(|s| *s == JobStatus::Skipped) {
        JobStatus::Skipped
    } else {
        JobStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;
    use JobStatus::{Completed, Failed, Skipped};

    #[test_case(&[Skipped, Skipped], Skipped ; "all skipped")]
    #[test_case(&[Completed, Skipped], Completed ; "one completed")]
    #[test_case(&[Completed, Failed, Skipped], Failed ; "any failed")]
    #[test_case(&[Failed], Failed ; "single failure")]
    #[test_case(&[], Skipped ; "no units")]
    fn test_rollup(statuses: &[JobStatus], expected: JobStatus) {
        assert_eq!(rollup(statuses), expected);
    }
}
