//! Push job ledger
//!
//! The watermark for a data type is the scrape job consumed by its latest completed
//! push that wrote data.

use super::models::PushJob;
use super::scrape::{ensure_terminal, not_started};
use crate::adapters::sqlite::SqliteClient;
use crate::domain::{now_millis, DataType, JobStatus, Result};
use rusqlite::{params, OptionalExtension};

const TABLE: &str = "push_jobs";

pub struct PushJobLedger {
    client: SqliteClient,
}

impl PushJobLedger {
    pub fn new(client: SqliteClient) -> Self {
        Self { client }
    }

    /// Inserts a push job and returns its id
    ///
    /// A terminal `status` is stamped with `completed_at` right away.
    pub fn insert(&self, data_type: DataType, scrape_job_id: i64, status: JobStatus) -> Result<i64> {
        let now = now_millis();
        let completed_at = status.is_terminal().then_some(now);
        let conn = self.client.connect()?;
        conn.execute(
            "INSERT INTO push_jobs (data_type, scrape_job_id, status, started_at, completed_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                data_type.as_i64(),
                scrape_job_id,
                status.as_i64(),
                now,
                completed_at
            ],
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(push_job_id = id, data_type = %data_type, scrape_job_id, status = %status, "Push job recorded");
        Ok(id)
    }

    /// Records a run that failed before any push job existed
    pub fn insert_error(&self, data_type: DataType) -> Result<i64> {
        self.insert(data_type, 0, JobStatus::Failed)
    }

    /// Finalizes a started push job
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::StoreError::AlreadyFinalized`] if the job already left
    /// `started`.
    pub fn update(&self, id: i64, status: JobStatus, total: i64, updated: i64) -> Result<()> {
        ensure_terminal(status)?;
        let conn = self.client.connect()?;
        let changed = conn.execute(
            "UPDATE push_jobs \
             SET status = ?1, completed_at = ?2, total_number = ?3, updated_number = ?4 \
             WHERE id = ?5 AND status = ?6",
            params![
                status.as_i64(),
                now_millis(),
                total,
                updated,
                id,
                JobStatus::Started.as_i64()
            ],
        )?;
        if changed == 0 {
            return Err(not_started(&conn, TABLE, id));
        }
        Ok(())
    }

    /// Latest completed push job for `data_type` that wrote at least one record
    pub fn latest_completed(&self, data_type: DataType) -> Result<Option<PushJob>> {
        let conn = self.client.connect()?;
        let job = conn
            .query_row(
                &format!(
                    "SELECT {} FROM push_jobs \
                     WHERE data_type = ?1 AND status = ?2 AND updated_number > 0 \
                     ORDER BY id DESC LIMIT 1",
                    PushJob::COLUMNS
                ),
                params![data_type.as_i64(), JobStatus::Completed.as_i64()],
                PushJob::from_row,
            )
            .optional()?;
        Ok(job)
    }

    /// Id of the last scrape job forwarded for `data_type`, or 0
    pub fn watermark(&self, data_type: DataType) -> Result<i64> {
        Ok(self
            .latest_completed(data_type)?
            .map(|job| job.scrape_job_id)
            .unwrap_or(0))
    }

    pub fn select(&self, id: i64) -> Result<Option<PushJob>> {
        let conn = self.client.connect()?;
        let job = conn
            .query_row(
                &format!("SELECT {} FROM push_jobs WHERE id = ?1", PushJob::COLUMNS),
                params![id],
                PushJob::from_row,
            )
            .optional()?;
        Ok(job)
    }

    pub fn select_all(&self) -> Result<Vec<PushJob>> {
        let conn = self.client.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM push_jobs ORDER BY id ASC",
            PushJob::COLUMNS
        ))?;
        let jobs = stmt
            .query_map([], PushJob::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(jobs)
    }

    pub fn count(&self) -> Result<usize> {
        let conn = self.client.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM push_jobs", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn delete_all(&self) -> Result<usize> {
        let conn = self.client.connect()?;
        Ok(conn.execute("DELETE FROM push_jobs", [])?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LegTrackError, StoreError};
    use tempfile::TempDir;

    fn ledger(dir: &TempDir) -> PushJobLedger {
        let client = SqliteClient::new(dir.path().join("ledger.sqlite3"));
        client.ensure_schema().unwrap();
        PushJobLedger::new(client)
    }

    #[test]
    fn test_skipped_insert_is_terminal() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);

        let id = ledger.insert(DataType::Measure, 0, JobStatus::Skipped).unwrap();
        let job = ledger.select(id).unwrap().unwrap();
        assert_eq!(job.status, JobStatus::Skipped);
        assert_eq!(job.scrape_job_id, 0);
        assert!(job.completed_at.is_some());

        let err = ledger.update(id, JobStatus::Completed, 1, 1).unwrap_err();
        assert!(matches!(
            err,
            LegTrackError::Store(StoreError::AlreadyFinalized { table: "push_jobs", .. })
        ));
    }

    #[test]
    fn test_watermark_follows_latest_completed_push_with_data() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);
        assert_eq!(ledger.watermark(DataType::Measure).unwrap(), 0);

        let first = ledger.insert(DataType::Measure, 3, JobStatus::Started).unwrap();
        ledger.update(first, JobStatus::Completed, 5, 5).unwrap();
        assert_eq!(ledger.watermark(DataType::Measure).unwrap(), 3);

        // Completed without data and failed runs do not move the watermark
        let empty = ledger.insert(DataType::Measure, 7, JobStatus::Started).unwrap();
        ledger.update(empty, JobStatus::Completed, 0, 0).unwrap();
        let failed = ledger.insert(DataType::Measure, 8, JobStatus::Started).unwrap();
        ledger.update(failed, JobStatus::Failed, 0, 0).unwrap();
        ledger.insert_error(DataType::Measure).unwrap();
        assert_eq!(ledger.watermark(DataType::Measure).unwrap(), 3);

        // Other data types are independent
        let hearing = ledger.insert(DataType::Hearing, 9, JobStatus::Started).unwrap();
        ledger.update(hearing, JobStatus::Completed, 1, 1).unwrap();
        assert_eq!(ledger.watermark(DataType::Measure).unwrap(), 3);
        assert_eq!(ledger.watermark(DataType::Hearing).unwrap(), 9);
    }

    #[test]
    fn test_insert_error_marker() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);

        let id = ledger.insert_error(DataType::SpecialSessionMeasure).unwrap();
        let job = ledger.select(id).unwrap().unwrap();
        assert_eq!(job.scrape_job_id, 0);
        assert_eq!(job.status, JobStatus::Failed);

        assert_eq!(ledger.count().unwrap(), 1);
        assert_eq!(ledger.select_all().unwrap().len(), 1);
        assert_eq!(ledger.delete_all().unwrap(), 1);
        assert_eq!(ledger.count().unwrap(), 0);
    }
}
