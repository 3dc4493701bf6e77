//! Special-session measure records

use super::ids::{DataType, MeasureType, SessionId};
use super::record::{Record, Scope};
use serde::{Deserialize, Serialize};

/// Natural key of a [`SpecialSessionMeasure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpecialSessionKey {
    pub year: i32,
    pub session: SessionId,
    pub measure_type: MeasureType,
    pub measure_number: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialSessionMeasure {
    pub year: i32,
    pub session: SessionId,
    pub measure_type: MeasureType,
    pub measure_number: i32,
    pub code: String,
    pub report_title: String,
    pub measure_title: String,
    pub measure_pdf_url: String,
    pub measure_archive_url: String,
    pub current_referral: String,
    pub last_updated: i64,
}

impl SpecialSessionMeasure {
    /// Creates a special-session measure with an empty payload
    pub fn new(
        year: i32,
        session: SessionId,
        measure_type: MeasureType,
        measure_number: i32,
    ) -> Self {
        Self {
            year,
            session,
            measure_type,
            measure_number,
            code: String::new(),
            report_title: String::new(),
            measure_title: String::new(),
            measure_pdf_url: String::new(),
            measure_archive_url: String::new(),
            current_referral: String::new(),
            last_updated: 0,
        }
    }
}

impl Record for SpecialSessionMeasure {
    type Key = SpecialSessionKey;

    const DATA_TYPE: DataType = DataType::SpecialSessionMeasure;

    fn key(&self) -> SpecialSessionKey {
        SpecialSessionKey {
            year: self.year,
            session: self.session,
            measure_type: self.measure_type,
            measure_number: self.measure_number,
        }
    }

    fn scope(&self) -> Scope {
        Scope::year(self.year).with_session(self.session)
    }

    fn same_content(&self, other: &Self) -> bool {
        self.key() == other.key()
            && self.code == other.code
            && self.report_title == other.report_title
            && self.measure_title == other.measure_title
            && self.measure_pdf_url == other.measure_pdf_url
            && self.measure_archive_url == other.measure_archive_url
            && self.current_referral == other.current_referral
    }

    fn last_updated(&self) -> i64 {
        self.last_updated
    }

    fn set_last_updated(&mut self, timestamp: i64) {
        self.last_updated = timestamp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_is_part_of_key() {
        let a = SpecialSessionMeasure::new(2018, SessionId::new('a').unwrap(), MeasureType::Sr, 3);
        let b = SpecialSessionMeasure::new(2018, SessionId::new('b').unwrap(), MeasureType::Sr, 3);
        assert_ne!(a.key(), b.key());
        assert!(!a.same_content(&b));
    }
}
