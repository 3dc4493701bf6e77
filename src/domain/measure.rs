//! Regular-session measure records

use super::ids::{DataType, MeasureType};
use super::record::{Record, Scope};
use serde::{Deserialize, Serialize};

/// Natural key of a [`Measure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeasureKey {
    pub year: i32,
    pub measure_type: MeasureType,
    pub measure_number: i32,
}

/// One row of the deadline report for a measure type
///
/// # Examples
///
/// ```
/// use legtrack::domain::measure::Measure;
/// use legtrack::domain::ids::MeasureType;
/// use legtrack::domain::record::Record;
///
/// let mut a = Measure::new(2020, MeasureType::Hb, 35);
/// a.code = "HB35".to_string();
/// let mut b = a.clone();
/// b.last_updated = 1_000;
/// assert!(a.same_content(&b));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measure {
    pub year: i32,
    pub measure_type: MeasureType,
    pub measure_number: i32,
    pub code: String,
    pub report_title: String,
    pub measure_title: String,
    pub measure_pdf_url: String,
    pub measure_archive_url: String,
    pub current_referral: String,
    pub bit_appropriation: bool,
    pub description: String,
    pub status: String,
    pub introducer: String,
    pub companion: String,
    pub last_updated: i64,
}

impl Measure {
    /// Creates a measure with an empty payload
    pub fn new(year: i32, measure_type: MeasureType, measure_number: i32) -> Self {
        Self {
            year,
            measure_type,
            measure_number,
            code: String::new(),
            report_title: String::new(),
            measure_title: String::new(),
            measure_pdf_url: String::new(),
            measure_archive_url: String::new(),
            current_referral: String::new(),
            bit_appropriation: false,
            description: String::new(),
            status: String::new(),
            introducer: String::new(),
            companion: String::new(),
            last_updated: 0,
        }
    }
}

impl Record for Measure {
    type Key = MeasureKey;

    const DATA_TYPE: DataType = DataType::Measure;

    fn key(&self) -> MeasureKey {
        MeasureKey {
            year: self.year,
            measure_type: self.measure_type,
            measure_number: self.measure_number,
        }
    }

    fn scope(&self) -> Scope {
        Scope::year(self.year).with_measure_type(self.measure_type)
    }

    fn same_content(&self, other: &Self) -> bool {
        self.key() == other.key()
            && self.code == other.code
            && self.report_title == other.report_title
            && self.measure_title == other.measure_title
            && self.measure_pdf_url == other.measure_pdf_url
            && self.measure_archive_url == other.measure_archive_url
            && self.current_referral == other.current_referral
            && self.bit_appropriation == other.bit_appropriation
            && self.description == other.description
            && self.status == other.status
            && self.introducer == other.introducer
            && self.companion == other.companion
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

    fn sample() -> Measure {
        Measure {
            code: "SB2629 SD2".to_string(),
            report_title: "ENVIRONMENT".to_string(),
            status: "(S) Referred to EEP.".to_string(),
            ..Measure::new(2020, MeasureType::Sb, 2629)
        }
    }

    #[test]
    fn test_scope_follows_measure_type() {
        assert_eq!(sample().scope().to_string(), "2020/sb");
        let unknown = Measure::new(2020, MeasureType::Unknown, 7);
        assert_eq!(
            unknown.scope(),
            Scope::year(2020).with_measure_type(MeasureType::Unknown)
        );
    }

    #[test]
    fn test_same_content_ignores_last_updated() {
        let a = sample();
        let mut b = sample();
        b.set_last_updated(99);
        assert!(a.same_content(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_same_content_detects_payload_change() {
        let a = sample();
        let mut b = sample();
        b.bit_appropriation = true;
        assert!(!a.same_content(&b));
    }

    #[test]
    fn test_key() {
        let key = sample().key();
        assert_eq!(key.year, 2020);
        assert_eq!(key.measure_type, MeasureType::Sb);
        assert_eq!(key.measure_number, 2629);
    }
}
