//! Scrape runner: fetch, detect, parse, reconcile and stage one record kind

use super::outcome::ScrapeOutcome;
use super::target::{ScrapeTarget, ScrapeUnit};
use crate::adapters::database::traits::LocalStore;
use crate::adapters::html::Parser;
use crate::adapters::http::{Fetcher, SourceUrls};
use crate::adapters::sqlite::SqliteClient;
use crate::core::detect::ChangeDetector;
use crate::core::ledger::{rollup, ScrapeJobLedger};
use crate::core::reconcile::Reconciler;
use crate::domain::{now_millis, JobStatus, LegTrackError, Record, Result};
use crate::{log_error_with_context, log_run_complete, log_run_start};
use std::sync::Arc;

const RUN: &str = "scrape";

/// Counts of one finished unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct UnitCounts {
    status: JobStatus,
    total: i64,
    updated: i64,
}

impl UnitCounts {
    fn empty(status: JobStatus) -> Self {
        Self {
            status,
            total: 0,
            updated: 0,
        }
    }
}

/// Scrapes one record kind into the local store
pub struct ScrapeRunner<R: Record> {
    fetcher: Arc<dyn Fetcher>,
    parser: Arc<dyn Parser<R>>,
    store: Arc<dyn LocalStore<R>>,
    reconciler: Reconciler<R>,
    detector: ChangeDetector,
    urls: SourceUrls,
    ledger: ScrapeJobLedger,
}

impl<R: Record> ScrapeRunner<R> {
    pub fn new(
        client: SqliteClient,
        fetcher: Arc<dyn Fetcher>,
        parser: Arc<dyn Parser<R>>,
        store: Arc<dyn LocalStore<R>>,
        detector: ChangeDetector,
        urls: SourceUrls,
    ) -> Self {
        Self {
            fetcher,
            parser,
            reconciler: Reconciler::new(store.clone()),
            store,
            detector,
            urls,
            ledger: ScrapeJobLedger::new(client),
        }
    }

    /// Runs one scrape job for `target`
    ///
    /// Every unit is attempted even if an earlier one failed. A unit whose page is
    /// unchanged since the last snapshot is skipped.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any ledger row is written if the target is
    /// invalid or belongs to another record kind. Other failures are recorded in the
    /// ledger and reported as a `failed` outcome.
    pub async fn run(&self, target: &ScrapeTarget) -> Result<ScrapeOutcome> {
        target.validate()?;
        if target.data_type() != R::DATA_TYPE {
            return Err(LegTrackError::Validation(format!(
                "Cannot scrape {target} as {}",
                R::DATA_TYPE
            )));
        }

        let data_type = R::DATA_TYPE;
        let job_id = self.ledger.insert_job(data_type)?;
        log_run_start!(RUN, data_type, job_id);
        tracing::info!(job_id, target = %target, "Scraping");

        let result = self.run_units(job_id, target).await.and_then(|outcome| {
            self.ledger
                .update_job(job_id, outcome.status, outcome.total, outcome.updated)?;
            Ok(outcome)
        });

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(error) => {
                let context = format!("Scraping {target} failed");
                log_error_with_context!(error, context.as_str());
                self.ledger.update_job(job_id, JobStatus::Failed, 0, 0)?;
                ScrapeOutcome::failed()
            }
        };

        log_run_complete!(
            RUN,
            data_type,
            job_id,
            outcome.status,
            outcome.total,
            outcome.updated
        );
        Ok(outcome)
    }

    async fn run_units(&self, job_id: i64, target: &ScrapeTarget) -> Result<ScrapeOutcome> {
        let mut statuses = Vec::new();
        let mut total = 0;
        let mut updated = 0;

        for unit in target.units(&self.urls) {
            let started_at = now_millis();
            let counts = match self.scrape_unit(&unit).await {
                Ok(counts) => counts,
                Err(error) => {
                    let context = format!("Scraping {} failed", unit.url);
                    log_error_with_context!(error, context.as_str());
                    UnitCounts::empty(JobStatus::Failed)
                }
            };

            if let Some(measure_type) = unit.detail {
                self.ledger.insert_detail(
                    job_id,
                    measure_type,
                    counts.status,
                    started_at,
                    counts.total,
                    counts.updated,
                )?;
            }

            statuses.push(counts.status);
            total += counts.total;
            updated += counts.updated;
        }

        Ok(ScrapeOutcome {
            status: rollup(&statuses),
            total,
            updated,
        })
    }

    async fn scrape_unit(&self, unit: &ScrapeUnit) -> Result<UnitCounts> {
        let content = self.fetcher.fetch(&unit.url).await?;

        if !self.detector.is_changed(&content, &unit.snapshot)? {
            tracing::info!(snapshot = %unit.snapshot, "Source unchanged, skipping");
            return Ok(UnitCounts::empty(JobStatus::Skipped));
        }

        let incoming = self.parser.parse_all(&content)?;
        let total = incoming.len() as i64;

        let sortout = self.reconciler.sortout_by_record_scope(incoming)?;
        let counts = self
            .store
            .bulk_upsert(&sortout.insert, &sortout.update, now_millis())?;

        // Only a page that made it into the store becomes the new snapshot
        self.detector.save(&content, &unit.snapshot)?;

        tracing::info!(
            scope = %unit.scope,
            total,
            inserted = counts.inserted,
            updated = counts.updated,
            "Unit staged"
        );

        Ok(UnitCounts {
            status: JobStatus::Completed,
            total,
            updated: counts.changed() as i64,
        })
    }
}
