//! Source page locations

use crate::domain::{MeasureType, SessionId};

/// Builds page URLs relative to the configured site root
#[derive(Debug, Clone)]
pub struct SourceUrls {
    base_url: String,
}

impl SourceUrls {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Deadline report listing every measure of one type
    ///
    /// Bills (hb, sb) are restricted to active measures.
    pub fn measures(&self, year: i32, measure_type: MeasureType) -> String {
        let active = if measure_type.report_active_only() {
            "&active=true"
        } else {
            ""
        };
        format!(
            "{}/advreports/advreport.aspx?year={}&report=deadline{}&rpt_type=&measuretype={}",
            self.base_url,
            year,
            active,
            measure_type.code()
        )
    }

    pub fn hearings(&self) -> String {
        format!("{}/upcominghearings.aspx", self.base_url)
    }

    pub fn special_session(&self, year: i32, session: SessionId) -> String {
        format!("{}/splsession.aspx?year={}{}", self.base_url, year, session)
    }
}
