//! Ledger status report

use crate::domain::DataType;
use serde::Serialize;

/// Snapshot of the ledgers and local stores
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub scrape_jobs: usize,
    pub push_jobs: usize,
    pub data_types: Vec<DataTypeStatus>,
}

impl StatusReport {
    pub fn get(&self, data_type: DataType) -> Option<&DataTypeStatus> {
        self.data_types.iter().find(|s| s.data_type == data_type)
    }

    /// Pretty JSON for operators
    pub fn to_json_pretty(&self) -> crate::domain::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Status of one data type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataTypeStatus {
    pub data_type: DataType,
    /// Records staged locally
    pub local_records: usize,
    /// Last scrape job forwarded, 0 if none
    pub watermark: i64,
    /// Next scrape job the forwarder would pick up
    pub pending_scrape_job: Option<i64>,
}
