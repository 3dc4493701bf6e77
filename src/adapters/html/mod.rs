//! Page parsers
//!
//! Each parser turns one fetched page into the records it lists. A page without the
//! expected table is an error; individual rows whose natural key cannot be read are
//! dropped with a warning.

pub mod hearings;
pub mod measures;
pub mod special_session;
pub mod text;

pub use hearings::HearingParser;
pub use measures::MeasureParser;
pub use special_session::SpecialSessionParser;

use crate::domain::{Record, Result};

/// Extracts records of kind `R` from page content
pub trait Parser<R: Record>: Send + Sync {
    /// # Errors
    ///
    /// Returns a parse error if the page does not contain the expected table.
    fn parse_all(&self, html: &str) -> Result<Vec<R>>;
}
