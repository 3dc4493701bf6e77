//! Integration tests for scrape runs with a fake fetcher

mod common;

use common::{hearing_page, local_client, local_store, measure_page, FakeFetcher};
use legtrack::adapters::database::traits::LocalStore;
use legtrack::adapters::html::{HearingParser, MeasureParser};
use legtrack::adapters::http::{Fetcher, SourceUrls};
use legtrack::adapters::sqlite::SqliteClient;
use legtrack::core::detect::{ChangeDetector, SnapshotKey};
use legtrack::core::ledger::ScrapeJobLedger;
use legtrack::core::scrape::{ScrapeOutcome, ScrapeRunner, ScrapeTarget};
use legtrack::domain::{DataType, Hearing, JobStatus, Measure, MeasureType, Record, Scope};
use std::sync::Arc;
use tempfile::TempDir;

const BASE: &str = "https://www.capitol.hawaii.gov";

struct Harness {
    dir: TempDir,
    client: SqliteClient,
    fetcher: Arc<FakeFetcher>,
    urls: SourceUrls,
}

impl Harness {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let client = local_client(&dir);
        Self {
            dir,
            client,
            fetcher: Arc::new(FakeFetcher::new()),
            urls: SourceUrls::new(BASE),
        }
    }

    fn detector(&self) -> ChangeDetector {
        ChangeDetector::new(self.dir.path().join("snapshots"))
    }

    fn fetcher(&self) -> Arc<dyn Fetcher> {
        self.fetcher.clone()
    }

    fn measures(&self) -> ScrapeRunner<Measure> {
        ScrapeRunner::new(
            self.client.clone(),
            self.fetcher(),
            Arc::new(MeasureParser::new().unwrap()),
            local_store(&self.client),
            self.detector(),
            self.urls.clone(),
        )
    }

    fn hearings(&self) -> ScrapeRunner<Hearing> {
        ScrapeRunner::new(
            self.client.clone(),
            self.fetcher(),
            Arc::new(HearingParser::new().unwrap()),
            local_store(&self.client),
            self.detector(),
            self.urls.clone(),
        )
    }

    fn ledger(&self) -> ScrapeJobLedger {
        ScrapeJobLedger::new(self.client.clone())
    }
}

fn bills_and_resolutions() -> ScrapeTarget {
    ScrapeTarget::Measures {
        year: 2024,
        types: vec![MeasureType::Hb, MeasureType::Hr],
    }
}

#[tokio::test]
async fn test_measure_scrape_stages_records() {
    let h = Harness::new();
    h.fetcher.serve(
        h.urls.measures(2024, MeasureType::Hb),
        measure_page(2024, &[("HB", 1, "RELATING TO TAXES."), ("HB", 2, "RELATING TO WATER.")]),
    );
    h.fetcher.serve(
        h.urls.measures(2024, MeasureType::Hr),
        measure_page(2024, &[("HR", 7, "URGING REFORM.")]),
    );

    let outcome = h.measures().run(&bills_and_resolutions()).await.unwrap();
    assert_eq!(
        outcome,
        ScrapeOutcome {
            status: JobStatus::Completed,
            total: 3,
            updated: 3
        }
    );
    assert_eq!(outcome.message(), "completed");

    let store = local_store::<Measure>(&h.client);
    assert_eq!(store.count().unwrap(), 3);
    let hb = store
        .select_by_scope(&Scope::year(2024).with_measure_type(MeasureType::Hb))
        .unwrap();
    assert_eq!(hb.len(), 2);
    assert_eq!(hb[1].measure_title, "RELATING TO WATER.");
    assert!(hb.iter().all(|m| m.last_updated() > 0));

    let jobs = h.ledger().select_all().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].status, JobStatus::Completed);
    assert!(jobs[0].update_needed);

    let details = h.ledger().select_details(jobs[0].id).unwrap();
    assert_eq!(details.len(), 2);
    assert_eq!(details[0].measure_type, MeasureType::Hb);
    assert_eq!(details[0].total_number, 2);
    assert_eq!(details[1].measure_type, MeasureType::Hr);
    assert_eq!(details[1].updated_number, 1);

    assert!(h
        .detector()
        .snapshot_path(&SnapshotKey::new(2024, "hb"))
        .exists());
}

#[tokio::test]
async fn test_unchanged_pages_are_skipped() {
    let h = Harness::new();
    h.fetcher.serve(
        h.urls.measures(2024, MeasureType::Hb),
        measure_page(2024, &[("HB", 1, "RELATING TO TAXES.")]),
    );
    h.fetcher.serve(
        h.urls.measures(2024, MeasureType::Hr),
        measure_page(2024, &[("HR", 7, "URGING REFORM.")]),
    );
    let runner = h.measures();
    runner.run(&bills_and_resolutions()).await.unwrap();

    let outcome = runner.run(&bills_and_resolutions()).await.unwrap();
    assert_eq!(outcome.status, JobStatus::Skipped);
    assert_eq!(outcome.total, 0);

    let jobs = h.ledger().select_all().unwrap();
    assert_eq!(jobs[1].status, JobStatus::Skipped);
    assert!(!jobs[1].update_needed);
    let details = h.ledger().select_details(jobs[1].id).unwrap();
    assert!(details.iter().all(|d| d.status == JobStatus::Skipped));
}

#[tokio::test]
async fn test_changed_page_updates_only_changed_records() {
    let h = Harness::new();
    let target = ScrapeTarget::Measures {
        year: 2024,
        types: vec![MeasureType::Hb],
    };
    let url = h.urls.measures(2024, MeasureType::Hb);
    let runner = h.measures();

    h.fetcher.serve(
        url.clone(),
        measure_page(2024, &[("HB", 1, "RELATING TO TAXES."), ("HB", 2, "RELATING TO WATER.")]),
    );
    runner.run(&target).await.unwrap();

    h.fetcher.serve(
        url,
        measure_page(2024, &[("HB", 1, "RELATING TO TAXES."), ("HB", 2, "RELATING TO DRINKING WATER.")]),
    );
    let outcome = runner.run(&target).await.unwrap();
    assert_eq!(outcome.status, JobStatus::Completed);
    assert_eq!(outcome.total, 2);
    assert_eq!(outcome.updated, 1);

    let stored = local_store::<Measure>(&h.client)
        .select_by_scope(&Scope::year(2024).with_measure_type(MeasureType::Hb))
        .unwrap();
    assert_eq!(stored[1].measure_title, "RELATING TO DRINKING WATER.");
    assert!(stored[1].last_updated() >= stored[0].last_updated());
}

#[tokio::test]
async fn test_unrecognised_measure_type_is_updated_not_reinserted() {
    let h = Harness::new();
    let target = ScrapeTarget::Measures {
        year: 2024,
        types: vec![MeasureType::Hb],
    };
    let url = h.urls.measures(2024, MeasureType::Hb);
    let runner = h.measures();

    h.fetcher.serve(
        url.clone(),
        measure_page(2024, &[("HB", 1, "RELATING TO TAXES."), ("XX", 7, "RELATING TO ODDITIES.")]),
    );
    let first = runner.run(&target).await.unwrap();
    assert_eq!(first.status, JobStatus::Completed);
    assert_eq!(first.updated, 2);

    h.fetcher.serve(
        url,
        measure_page(2024, &[("HB", 1, "RELATING TO TAXES."), ("XX", 7, "RELATING TO CURIOSITIES.")]),
    );
    let second = runner.run(&target).await.unwrap();
    assert_eq!(second.status, JobStatus::Completed);
    assert_eq!(second.total, 2);
    assert_eq!(second.updated, 1);

    let stored = local_store::<Measure>(&h.client)
        .select_by_scope(&Scope::year(2024).with_measure_type(MeasureType::Unknown))
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].measure_title, "RELATING TO CURIOSITIES.");
}

#[tokio::test]
async fn test_failed_unit_fails_job_but_keeps_other_units() {
    let h = Harness::new();
    // Nothing served for hr: the fetch fails with a 404
    h.fetcher.serve(
        h.urls.measures(2024, MeasureType::Hb),
        measure_page(2024, &[("HB", 1, "RELATING TO TAXES.")]),
    );

    let outcome = h.measures().run(&bills_and_resolutions()).await.unwrap();
    assert_eq!(outcome.status, JobStatus::Failed);
    assert_eq!(outcome.total, 1);
    assert_eq!(h.fetcher.requests().len(), 2);

    let job = &h.ledger().select_all().unwrap()[0];
    assert_eq!(job.status, JobStatus::Failed);
    let details = h.ledger().select_details(job.id).unwrap();
    assert_eq!(details[0].status, JobStatus::Completed);
    assert_eq!(details[1].status, JobStatus::Failed);
    assert_eq!(details[1].total_number, 0);

    assert_eq!(local_store::<Measure>(&h.client).count().unwrap(), 1);
}

#[tokio::test]
async fn test_unparseable_page_keeps_previous_snapshot() {
    let h = Harness::new();
    let target = ScrapeTarget::Measures {
        year: 2024,
        types: vec![MeasureType::Hb],
    };
    let url = h.urls.measures(2024, MeasureType::Hb);
    let runner = h.measures();

    h.fetcher.serve(url.clone(), "<html><body>Service unavailable</body></html>");
    let outcome = runner.run(&target).await.unwrap();
    assert_eq!(outcome, ScrapeOutcome::failed());
    assert!(!h
        .detector()
        .snapshot_path(&SnapshotKey::new(2024, "hb"))
        .exists());

    h.fetcher
        .serve(url, measure_page(2024, &[("HB", 1, "RELATING TO TAXES.")]));
    let outcome = runner.run(&target).await.unwrap();
    assert_eq!(outcome.status, JobStatus::Completed);
    assert_eq!(outcome.updated, 1);
}

#[tokio::test]
async fn test_hearing_update_and_no_detail_rows() {
    let h = Harness::new();
    let target = ScrapeTarget::Hearings { year: 2020 };
    let runner = h.hearings();

    h.fetcher.serve(
        h.urls.hearings(),
        hearing_page(&[("SB", 2629, "6/22/2020 9:30 AM", "ROOM2")]),
    );
    runner.run(&target).await.unwrap();

    h.fetcher.serve(
        h.urls.hearings(),
        hearing_page(&[("SB", 2629, "6/22/2020 9:30 AM", "XXX2")]),
    );
    let outcome = runner.run(&target).await.unwrap();
    assert_eq!(outcome.status, JobStatus::Completed);
    assert_eq!(outcome.updated, 1);

    let stored = local_store::<Hearing>(&h.client)
        .select_by_scope(&Scope::year(2020))
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].room, "XXX2");

    for job in h.ledger().select_all().unwrap() {
        assert_eq!(job.data_type, DataType::Hearing);
        assert!(h.ledger().select_details(job.id).unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_hearings_spanning_years_are_reconciled_per_year() {
    let h = Harness::new();
    let target = ScrapeTarget::Hearings { year: 2024 };
    let runner = h.hearings();

    h.fetcher.serve(
        h.urls.hearings(),
        hearing_page(&[
            ("HB", 10, "12/30/2024 10:00 AM", "325"),
            ("HB", 11, "1/2/2025 10:00 AM", "325"),
        ]),
    );
    let first = runner.run(&target).await.unwrap();
    assert_eq!(first.updated, 2);

    // Same listing with one extra row: the stored 2025 hearing must not be re-inserted
    h.fetcher.serve(
        h.urls.hearings(),
        hearing_page(&[
            ("HB", 10, "12/30/2024 10:00 AM", "325"),
            ("HB", 11, "1/2/2025 10:00 AM", "325"),
            ("HB", 12, "1/3/2025 9:00 AM", "211"),
        ]),
    );
    let second = runner.run(&target).await.unwrap();
    assert_eq!(second.status, JobStatus::Completed);
    assert_eq!(second.total, 3);
    assert_eq!(second.updated, 1);
    assert_eq!(local_store::<Hearing>(&h.client).count().unwrap(), 3);
}

#[tokio::test]
async fn test_invalid_target_writes_no_ledger_row() {
    let h = Harness::new();

    let err = h
        .measures()
        .run(&ScrapeTarget::Measures {
            year: 1850,
            types: vec![MeasureType::Hb],
        })
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = h
        .measures()
        .run(&ScrapeTarget::Hearings { year: 2024 })
        .await
        .unwrap_err();
    assert!(err.is_validation());

    assert_eq!(h.ledger().count().unwrap(), 0);
    assert!(h.fetcher.requests().is_empty());
}
