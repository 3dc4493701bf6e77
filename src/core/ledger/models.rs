//! Ledger row types

use crate::domain::{DataType, JobStatus, MeasureType, StoreError};
use rusqlite::types::Type;
use rusqlite::Row;
use serde::Serialize;

/// One scrape run for a data type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeJob {
    pub id: i64,
    pub data_type: DataType,
    pub status: JobStatus,
    pub started_at: i64,
    pub completed_at: Option<i64>,
    pub total_number: i64,
    pub updated_number: i64,
    /// Set on finalization when the run changed at least one record
    pub update_needed: bool,
}

/// One subtype unit of a scrape run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeDetail {
    pub id: i64,
    pub scrape_job_id: i64,
    pub measure_type: MeasureType,
    pub status: JobStatus,
    pub started_at: i64,
    pub completed_at: Option<i64>,
    pub total_number: i64,
    pub updated_number: i64,
}

/// One forwarding run for a data type
///
/// `scrape_job_id` is 0 when no scrape job was consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushJob {
    pub id: i64,
    pub data_type: DataType,
    pub scrape_job_id: i64,
    pub status: JobStatus,
    pub started_at: i64,
    pub completed_at: Option<i64>,
    pub total_number: i64,
    pub updated_number: i64,
}

fn corrupt(column: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        Type::Integer,
        Box::new(StoreError::Corrupt(message)),
    )
}

fn data_type_at(row: &Row<'_>, column: &str) -> rusqlite::Result<DataType> {
    let code: i64 = row.get(column)?;
    DataType::try_from(code).map_err(|e| corrupt(0, e))
}

fn status_at(row: &Row<'_>, column: &str) -> rusqlite::Result<JobStatus> {
    let code: i64 = row.get(column)?;
    JobStatus::try_from(code).map_err(|e| corrupt(0, e))
}

impl ScrapeJob {
    pub(crate) const COLUMNS: &'static str = "id, data_type, status, started_at, completed_at, \
        total_number, updated_number, update_needed";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            data_type: data_type_at(row, "data_type")?,
            status: status_at(row, "status")?,
            started_at: row.get("started_at")?,
            completed_at: row.get("completed_at")?,
            total_number: row.get("total_number")?,
            updated_number: row.get("updated_number")?,
            update_needed: row.get("update_needed")?,
        })
    }
}

impl ScrapeDetail {
    pub(crate) const COLUMNS: &'static str = "id, scrape_job_id, measure_type, status, \
        started_at, completed_at, total_number, updated_number";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let measure_type: i64 = row.get("measure_type")?;
        Ok(Self {
            id: row.get("id")?,
            scrape_job_id: row.get("scrape_job_id")?,
            measure_type: MeasureType::from_i64(measure_type),
            status: status_at(row, "status")?,
            started_at: row.get("started_at")?,
            completed_at: row.get("completed_at")?,
            total_number: row.get("total_number")?,
            updated_number: row.get("updated_number")?,
        })
    }
}

impl PushJob {
    pub(crate) const COLUMNS: &'static str = "id, data_type, scrape_job_id, status, started_at, \
        completed_at, total_number, updated_number";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            data_type: data_type_at(row, "data_type")?,
            scrape_job_id: row.get("scrape_job_id")?,
            status: status_at(row, "status")?,
            started_at: row.get("started_at")?,
            completed_at: row.get("completed_at")?,
            total_number: row.get("total_number")?,
            updated_number: row.get("updated_number")?,
        })
    }
}
