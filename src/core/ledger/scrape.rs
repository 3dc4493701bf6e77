//! Scrape job ledger
//!
//! Jobs move `started -> completed | skipped | failed` exactly once.

use super::models::{ScrapeDetail, ScrapeJob};
use crate::adapters::sqlite::SqliteClient;
use crate::domain::{
    now_millis, DataType, JobStatus, LegTrackError, MeasureType, Result, StoreError,
};
use rusqlite::{params, Connection, OptionalExtension};

const TABLE: &str = "scrape_jobs";

pub struct ScrapeJobLedger {
    client: SqliteClient,
}

impl ScrapeJobLedger {
    pub fn new(client: SqliteClient) -> Self {
        Self { client }
    }

    /// Opens a job in `started` state and returns its id
    pub fn insert_job(&self, data_type: DataType) -> Result<i64> {
        let conn = self.client.connect()?;
        conn.execute(
            "INSERT INTO scrape_jobs (data_type, status, started_at) VALUES (?1, ?2, ?3)",
            params![
                data_type.as_i64(),
                JobStatus::Started.as_i64(),
                now_millis()
            ],
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(job_id = id, data_type = %data_type, "Scrape job started");
        Ok(id)
    }

    /// Finalizes a started job
    ///
    /// `update_needed` is set when `updated > 0`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyFinalized`] if the job already left `started`, and a
    /// validation error if `status` is not terminal.
    pub fn update_job(&self, id: i64, status: JobStatus, total: i64, updated: i64) -> Result<()> {
        ensure_terminal(status)?;
        let conn = self.client.connect()?;
        let changed = conn.execute(
            "UPDATE scrape_jobs \
             SET status = ?1, completed_at = ?2, total_number = ?3, updated_number = ?4, \
                 update_needed = ?5 \
             WHERE id = ?6 AND status = ?7",
            params![
                status.as_i64(),
                now_millis(),
                total,
                updated,
                updated > 0,
                id,
                JobStatus::Started.as_i64()
            ],
        )?;
        if changed == 0 {
            return Err(not_started(&conn, TABLE, id));
        }
        tracing::debug!(job_id = id, status = %status, total, updated, "Scrape job finalized");
        Ok(())
    }

    /// Records one finished subtype unit of a job
    pub fn insert_detail(
        &self,
        job_id: i64,
        measure_type: MeasureType,
        status: JobStatus,
        started_at: i64,
        total: i64,
        updated: i64,
    ) -> Result<i64> {
        let conn = self.client.connect()?;
        conn.execute(
            "INSERT INTO scrape_details \
             (scrape_job_id, measure_type, status, started_at, completed_at, total_number, updated_number) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                job_id,
                measure_type.as_i64(),
                status.as_i64(),
                started_at,
                now_millis(),
                total,
                updated
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Oldest completed job after `last_id` that changed data
    pub fn select_job_updated_after(
        &self,
        data_type: DataType,
        last_id: i64,
    ) -> Result<Option<ScrapeJob>> {
        let conn = self.client.connect()?;
        let job = conn
            .query_row(
                &format!(
                    "SELECT {} FROM scrape_jobs \
                     WHERE data_type = ?1 AND id > ?2 AND status = ?3 AND update_needed = 1 \
                     ORDER BY id ASC LIMIT 1",
                    ScrapeJob::COLUMNS
                ),
                params![data_type.as_i64(), last_id, JobStatus::Completed.as_i64()],
                ScrapeJob::from_row,
            )
            .optional()?;
        Ok(job)
    }

    pub fn select_job(&self, id: i64) -> Result<Option<ScrapeJob>> {
        let conn = self.client.connect()?;
        let job = conn
            .query_row(
                &format!("SELECT {} FROM scrape_jobs WHERE id = ?1", ScrapeJob::COLUMNS),
                params![id],
                ScrapeJob::from_row,
            )
            .optional()?;
        Ok(job)
    }

    pub fn select_all(&self) -> Result<Vec<ScrapeJob>> {
        let conn = self.client.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM scrape_jobs ORDER BY id ASC",
            ScrapeJob::COLUMNS
        ))?;
        let jobs = stmt
            .query_map([], ScrapeJob::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(jobs)
    }

    pub fn select_details(&self, job_id: i64) -> Result<Vec<ScrapeDetail>> {
        let conn = self.client.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM scrape_details WHERE scrape_job_id = ?1 ORDER BY id ASC",
            ScrapeDetail::COLUMNS
        ))?;
        let details = stmt
            .query_map(params![job_id], ScrapeDetail::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(details)
    }

    pub fn count(&self) -> Result<usize> {
        let conn = self.client.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM scrape_jobs", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Deletes every job and its details
    pub fn delete_all(&self) -> Result<usize> {
        let mut conn = self.client.connect()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM scrape_details", [])?;
        let deleted = tx.execute("DELETE FROM scrape_jobs", [])?;
        tx.commit()?;
        Ok(deleted)
    }
}

pub(super) fn ensure_terminal(status: JobStatus) -> Result<()> {
    if status.is_terminal() {
        Ok(())
    } else {
        Err(LegTrackError::Validation(format!(
            "Cannot finalize a job with status {status}"
        )))
    }
}

/// Error for a finalization that matched no started row
pub(super) fn not_started(conn: &Connection, table: &'static str, id: i64) -> LegTrackError {
    let exists = conn
        .query_row(
            &format!("SELECT 1 FROM {table} WHERE id = ?1"),
            params![id],
            |_| Ok(()),
        )
        .optional();
    match exists {
        Ok(Some(())) => StoreError::AlreadyFinalized { table, id }.into(),
        Ok(None) => StoreError::Local(format!("{table} row {id} does not exist")).into(),
        Err(e) => e.into(),
    }
}
