//! Committee hearing records

use super::ids::{DataType, MeasureType};
use super::record::{Record, Scope};
use serde::{Deserialize, Serialize};

/// Natural key of a [`Hearing`]
///
/// A measure can be heard more than once, so the hearing notice is part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HearingKey {
    pub year: i32,
    pub measure_type: MeasureType,
    pub measure_number: i32,
    pub notice: String,
}

/// One row of the upcoming hearings table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hearing {
    pub year: i32,
    pub measure_type: MeasureType,
    pub measure_number: i32,
    pub notice: String,
    pub measure_relative_url: String,
    pub code: String,
    pub committee: String,
    /// Hearing date and time exactly as published
    pub datetime: String,
    /// `datetime` as epoch milliseconds; derived, so excluded from equality
    pub timestamp: i64,
    pub description: String,
    pub room: String,
    pub notice_url: String,
    pub notice_pdf_url: String,
    pub last_updated: i64,
}

impl Hearing {
    /// Creates a hearing with an empty payload
    pub fn new(
        year: i32,
        measure_type: MeasureType,
        measure_number: i32,
        notice: impl Into<String>,
    ) -> Self {
        Self {
            year,
            measure_type,
            measure_number,
            notice: notice.into(),
            measure_relative_url: String::new(),
            code: String::new(),
            committee: String::new(),
            datetime: String::new(),
            timestamp: 0,
            description: String::new(),
            room: String::new(),
            notice_url: String::new(),
            notice_pdf_url: String::new(),
            last_updated: 0,
        }
    }
}

impl Record for Hearing {
    type Key = HearingKey;

    const DATA_TYPE: DataType = DataType::Hearing;

    fn key(&self) -> HearingKey {
        HearingKey {
            year: self.year,
            measure_type: self.measure_type,
            measure_number: self.measure_number,
            notice: self.notice.clone(),
        }
    }

    fn scope(&self) -> Scope {
        Scope::year(self.year)
    }

    fn same_content(&self, other: &Self) -> bool {
        self.year == other.year
            && self.measure_type == other.measure_type
            && self.measure_number == other.measure_number
            && self.notice == other.notice
            && self.measure_relative_url == other.measure_relative_url
            && self.code == other.code
            && self.committee == other.committee
            && self.datetime == other.datetime
            && self.description == other.description
            && self.room == other.room
            && self.notice_url == other.notice_url
            && self.notice_pdf_url == other.notice_pdf_url
    }

    fn last_updated(&self) -> i64 {
        self.last_updated
    }

    fn set_last_updated(&mut self, timestamp: i64) {
        self.last_updated = timestamp;
    }
}
