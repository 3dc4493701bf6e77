//! Domain identifier types
//!
//! Closed enumerations stored as integers in the ledger and record tables, plus the
//! special-session identifier newtype.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Entity kind handled by a scrape or forwarding run
///
/// # Examples
///
/// ```
/// use legtrack::domain::ids::DataType;
///
/// assert_eq!(DataType::Hearing.as_i64(), 2);
/// assert_eq!(DataType::try_from(3).unwrap(), DataType::SpecialSessionMeasure);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Regular-session measures
    Measure,
    /// Upcoming committee hearings
    Hearing,
    /// Special-session measures
    SpecialSessionMeasure,
}

impl DataType {
    /// All data types, in storage order
    pub const ALL: [DataType; 3] = [
        DataType::Measure,
        DataType::Hearing,
        DataType::SpecialSessionMeasure,
    ];

    /// Integer code stored in ledger rows
    pub fn as_i64(self) -> i64 {
        match self {
            DataType::Measure => 1,
            DataType::Hearing => 2,
            DataType::SpecialSessionMeasure => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Measure => "measure",
            DataType::Hearing => "hearing",
            DataType::SpecialSessionMeasure => "special_session_measure",
        }
    }
}

impl TryFrom<i64> for DataType {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DataType::Measure),
            2 => Ok(DataType::Hearing),
            3 => Ok(DataType::SpecialSessionMeasure),
            other => Err(format!("Unknown data type code: {other}")),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a ledger row
///
/// `Started` is the only non-terminal state; a row moves to one of the other three
/// exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Started,
    Skipped,
    Failed,
    Completed,
}

impl JobStatus {
    pub fn as_i64(self) -> i64 {
        match self {
            JobStatus::Started => 1,
            JobStatus::Skipped => 2,
            JobStatus::Failed => 3,
            JobStatus::Completed => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Started => "started",
            JobStatus::Skipped => "skipped",
            JobStatus::Failed => "failed",
            JobStatus::Completed => "completed",
        }
    }

    /// Check if the status is terminal
    pub fn is_terminal(self) -> bool {
        self != JobStatus::Started
    }
}

impl TryFrom<i64> for JobStatus {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(JobStatus::Started),
            2 => Ok(JobStatus::Skipped),
            3 => Ok(JobStatus::Failed),
            4 => Ok(JobStatus::Completed),
            other => Err(format!("Unknown job status code: {other}")),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Measure type (bill, resolution, ...)
///
/// Parsing never fails: unrecognised codes land in [`MeasureType::Unknown`] so that
/// records with an unparseable subtype still get a stable natural key.
///
/// # Examples
///
/// ```
/// use legtrack::domain::ids::MeasureType;
///
/// assert_eq!(MeasureType::from_code("HCR"), MeasureType::Hcr);
/// assert_eq!(MeasureType::from_code("xyz"), MeasureType::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasureType {
    Hb,
    Sb,
    Hr,
    Sr,
    Hcr,
    Scr,
    Gm,
    Jc,
    Spa,
    Spb,
    Unknown,
}

impl MeasureType {
    /// Measure types scraped from the deadline report by default
    pub const REPORTED: [MeasureType; 7] = [
        MeasureType::Hb,
        MeasureType::Sb,
        MeasureType::Hr,
        MeasureType::Sr,
        MeasureType::Hcr,
        MeasureType::Scr,
        MeasureType::Gm,
    ];

    /// Lowercase code used in URLs, snapshot names and storage
    pub fn code(self) -> &'static str {
        match self {
            MeasureType::Hb => "hb",
            MeasureType::Sb => "sb",
            MeasureType::Hr => "hr",
            MeasureType::Sr => "sr",
            MeasureType::Hcr => "hcr",
            MeasureType::Scr => "scr",
            MeasureType::Gm => "gm",
            MeasureType::Jc => "jc",
            MeasureType::Spa => "spa",
            MeasureType::Spb => "spb",
            MeasureType::Unknown => "unknown",
        }
    }

    /// Integer code stored in scrape detail rows
    pub fn as_i64(self) -> i64 {
        match self {
            MeasureType::Hb => 1,
            MeasureType::Sb => 2,
            MeasureType::Hr => 3,
            MeasureType::Sr => 4,
            MeasureType::Hcr => 5,
            MeasureType::Scr => 6,
            MeasureType::Gm => 7,
            MeasureType::Jc => 8,
            MeasureType::Spa => 9,
            MeasureType::Spb => 10,
            MeasureType::Unknown => 99,
        }
    }

    pub fn from_i64(value: i64) -> Self {
        match value {
            1 => MeasureType::Hb,
            2 => MeasureType::Sb,
            3 => MeasureType::Hr,
            4 => MeasureType::Sr,
            5 => MeasureType::Hcr,
            6 => MeasureType::Scr,
            7 => MeasureType::Gm,
            8 => MeasureType::Jc,
            9 => MeasureType::Spa,
            10 => MeasureType::Spb,
            _ => MeasureType::Unknown,
        }
    }

    /// Case-insensitive lookup that falls back to `Unknown`
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "hb" => MeasureType::Hb,
            "sb" => MeasureType::Sb,
            "hr" => MeasureType::Hr,
            "sr" => MeasureType::Sr,
            "hcr" => MeasureType::Hcr,
            "scr" => MeasureType::Scr,
            "gm" => MeasureType::Gm,
            "jc" => MeasureType::Jc,
            "spa" => MeasureType::Spa,
            "spb" => MeasureType::Spb,
            _ => MeasureType::Unknown,
        }
    }

    /// Only house and senate bills are filtered to active measures on the report page
    pub fn report_active_only(self) -> bool {
        matches!(self, MeasureType::Hb | MeasureType::Sb)
    }
}

impl fmt::Display for MeasureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Special session identifier (`a` or `b`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(char);

impl SessionId {
    /// Creates a session id, accepting only `a` or `b` (case-insensitive)
    pub fn new(id: char) -> Result<Self, String> {
        match id.to_ascii_lowercase() {
            c @ ('a' | 'b') => Ok(Self(c)),
            other => Err(format!("Invalid special session '{other}'. Must be 'a' or 'b'")),
        }
    }

    pub fn as_char(self) -> char {
        self.0
    }

    /// Snapshot subtype and detail measure type for this session
    pub fn measure_type(self) -> MeasureType {
        if self.0 == 'a' {
            MeasureType::Spa
        } else {
            MeasureType::Spb
        }
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(c),
            _ => Err(format!("Invalid special session '{s}'. Must be 'a' or 'b'")),
        }
    }
}

impl TryFrom<String> for SessionId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0.to_string()
    }
}
