//! Record abstraction shared by every entity kind
//!
//! A record has a natural key, a payload, and a `last_updated` epoch (milliseconds)
//! written by the local store whenever the row is inserted or changed. Reconciliation
//! compares payloads only; `last_updated` never participates in equality.

use super::ids::{DataType, MeasureType, SessionId};
use std::fmt;
use std::hash::Hash;

/// A record stored locally and forwarded to the remote sink
pub trait Record: Clone + fmt::Debug + Send + Sync + 'static {
    /// Natural key with structural equality
    type Key: Clone + Eq + Hash + fmt::Debug + Send + Sync;

    /// Entity kind this record belongs to
    const DATA_TYPE: DataType;

    fn key(&self) -> Self::Key;

    /// Narrowest scope whose local records can hold this record's stored counterpart
    fn scope(&self) -> Scope;

    /// Payload equality, ignoring `last_updated` and any derived fields
    ///
    /// Must be total over the record shape.
    fn same_content(&self, other: &Self) -> bool;

    fn last_updated(&self) -> i64;

    fn set_last_updated(&mut self, timestamp: i64);
}

/// Reconciliation scope: the slice of local state a parsed batch replaces
///
/// # Examples
///
/// ```
/// use legtrack::domain::record::Scope;
/// use legtrack::domain::ids::MeasureType;
///
/// let scope = Scope::year(2024).with_measure_type(MeasureType::Hb);
/// assert_eq!(scope.to_string(), "2024/hb");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scope {
    pub year: i32,
    pub measure_type: Option<MeasureType>,
    pub session: Option<SessionId>,
}

impl Scope {
    pub fn year(year: i32) -> Self {
        Self {
            year,
            measure_type: None,
            session: None,
        }
    }

    pub fn with_measure_type(mut self, measure_type: MeasureType) -> Self {
        self.measure_type = Some(measure_type);
        self
    }

    pub fn with_session(mut self, session: SessionId) -> Self {
        self.session = Some(session);
        self
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.year)?;
        if let Some(session) = self.session {
            write!(f, "{session}")?;
        }
        if let Some(measure_type) = self.measure_type {
            write!(f, "/{measure_type}")?;
        }
        Ok(())
    }
}

/// Current wall-clock time as epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
