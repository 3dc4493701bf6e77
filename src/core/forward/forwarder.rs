//! Forwarder: pushes locally changed records to the remote store once per scrape job

use super::outcome::ForwardOutcome;
use crate::adapters::database::traits::{LocalStore, RemoteStore};
use crate::adapters::sqlite::SqliteClient;
use crate::core::ledger::{PushJobLedger, ScrapeJobLedger};
use crate::domain::{JobStatus, LegTrackError, Record, Result};
use crate::{log_error_with_context, log_run_complete, log_run_start};
use std::sync::Arc;

const RUN: &str = "forward";

/// Forwards one record kind
///
/// Only one forwarder per data type may run at a time.
pub struct Forwarder<R: Record> {
    local: Arc<dyn LocalStore<R>>,
    remote: Arc<dyn RemoteStore<R>>,
    scrape_jobs: ScrapeJobLedger,
    push_jobs: PushJobLedger,
    max_records_per_push: usize,
}

impl<R: Record> Forwarder<R> {
    /// # Errors
    ///
    /// Returns a validation error if `max_records_per_push` is 0.
    pub fn new(
        client: SqliteClient,
        local: Arc<dyn LocalStore<R>>,
        remote: Arc<dyn RemoteStore<R>>,
        max_records_per_push: usize,
    ) -> Result<Self> {
        if max_records_per_push == 0 {
            return Err(LegTrackError::Validation(
                "max_records_per_push must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            local,
            remote,
            scrape_jobs: ScrapeJobLedger::new(client.clone()),
            push_jobs: PushJobLedger::new(client),
            max_records_per_push,
        })
    }

    /// Forwards the records changed by the next unprocessed scrape job
    ///
    /// Failures other than validation errors are recorded in the push ledger and
    /// reported as [`ForwardOutcome::Failed`]. Validation errors are returned before
    /// any push job row is written.
    pub async fn run(&self) -> Result<ForwardOutcome> {
        let data_type = R::DATA_TYPE;
        let mut push_job_id = None;

        let result = self.forward_next(&mut push_job_id).await;
        let error = match result {
            Ok(outcome) => return Ok(outcome),
            Err(e) if e.is_validation() => return Err(e),
            Err(e) => e,
        };

        let context = format!("Forwarding {data_type} failed");
        log_error_with_context!(error, context.as_str());
        match push_job_id {
            Some(id) => self.push_jobs.update(id, JobStatus::Failed, 0, 0)?,
            None => {
                self.push_jobs.insert_error(data_type)?;
            }
        }
        log_run_complete!(RUN, data_type, push_job_id.unwrap_or(0), JobStatus::Failed, 0, 0);

        Ok(ForwardOutcome::Failed {
            error: error.to_string(),
        })
    }

    async fn forward_next(&self, push_job_id: &mut Option<i64>) -> Result<ForwardOutcome> {
        let data_type = R::DATA_TYPE;
        let watermark = self.push_jobs.watermark(data_type)?;

        let Some(scrape_job) = self
            .scrape_jobs
            .select_job_updated_after(data_type, watermark)?
        else {
            let id = self.push_jobs.insert(data_type, 0, JobStatus::Skipped)?;
            tracing::info!(data_type = %data_type, watermark, "No Unprocessed Scrape Jobs");
            log_run_complete!(RUN, data_type, id, JobStatus::Skipped, 0, 0);
            return Ok(ForwardOutcome::NoUnprocessedScrapeJobs);
        };
        check_origin_time(scrape_job.started_at)?;

        let id = self
            .push_jobs
            .insert(data_type, scrape_job.id, JobStatus::Started)?;
        *push_job_id = Some(id);
        log_run_start!(RUN, data_type, id);

        let outcome = self.push(scrape_job.started_at).await?;
        match &outcome {
            ForwardOutcome::Completed { size, .. } => {
                let size = *size as i64;
                self.push_jobs.update(id, JobStatus::Completed, size, size)?;
                log_run_complete!(RUN, data_type, id, JobStatus::Completed, size, size);
            }
            _ => {
                self.push_jobs.update(id, JobStatus::Skipped, 0, 0)?;
                log_run_complete!(RUN, data_type, id, JobStatus::Skipped, 0, 0);
            }
        }
        Ok(outcome)
    }

    /// Pushes every local record stamped at or after `origin_time`
    ///
    /// Records go out in chunks of at most `max_records_per_push`, one after another.
    /// A failed chunk stops the push; earlier chunks stay written remotely.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `origin_time` is not positive, or the first store
    /// error encountered.
    pub async fn push(&self, origin_time: i64) -> Result<ForwardOutcome> {
        check_origin_time(origin_time)?;

        let records = self.local.select_updated_after(origin_time)?;
        let size = records.len();
        if size == 0 {
            tracing::info!(data_type = %R::DATA_TYPE, origin_time, "No Unprocessed Data");
            return Ok(ForwardOutcome::NoUnprocessedData);
        }

        let mut rows_affected = 0u64;
        for (i, chunk) in records.chunks(self.max_records_per_push).enumerate() {
            let receipt = self.remote.push(chunk).await?;
            tracing::debug!(
                data_type = %R::DATA_TYPE,
                chunk = i,
                records = chunk.len(),
                rows_affected = receipt.rows_affected,
                "Pushed chunk"
            );
            rows_affected += receipt.rows_affected;
        }

        if rows_affected != size as u64 {
            tracing::warn!(
                data_type = %R::DATA_TYPE,
                size,
                rows_affected,
                "Remote rows affected differs from records pushed"
            );
        }

        tracing::info!(data_type = %R::DATA_TYPE, size, "Push Completed {size} Data");
        Ok(ForwardOutcome::Completed {
            size,
            rows_affected,
        })
    }
}

fn check_origin_time(origin_time: i64) -> Result<()> {
    if origin_time <= 0 {
        return Err(LegTrackError::Validation(format!(
            "Invalid origin time {origin_time}"
        )));
    }
    Ok(())
}
