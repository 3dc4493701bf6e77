//! What a scrape run covers

use crate::adapters::http::SourceUrls;
use crate::core::detect::SnapshotKey;
use crate::domain::{DataType, LegTrackError, MeasureType, Result, Scope, SessionId};
use std::fmt;

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2999;

/// Target of one scrape run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeTarget {
    /// Deadline reports for each listed measure type
    Measures { year: i32, types: Vec<MeasureType> },
    /// The upcoming hearings page
    Hearings { year: i32 },
    /// The measure listing of one special session
    SpecialSession { year: i32, session: SessionId },
}

impl ScrapeTarget {
    /// Measures of `year` for the default reported types
    pub fn measures(year: i32) -> Self {
        ScrapeTarget::Measures {
            year,
            types: MeasureType::REPORTED.to_vec(),
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            ScrapeTarget::Measures { .. } => DataType::Measure,
            ScrapeTarget::Hearings { .. } => DataType::Hearing,
            ScrapeTarget::SpecialSession { .. } => DataType::SpecialSessionMeasure,
        }
    }

    pub fn year(&self) -> i32 {
        match self {
            ScrapeTarget::Measures { year, .. }
            | ScrapeTarget::Hearings { year }
            | ScrapeTarget::SpecialSession { year, .. } => *year,
        }
    }

    /// Checks caller arguments before anything is written
    ///
    /// # Errors
    ///
    /// Returns a validation error for a year outside 1900..=2999, an empty type list,
    /// or a measure type that has no deadline report.
    pub fn validate(&self) -> Result<()> {
        let year = self.year();
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(LegTrackError::Validation(format!(
                "Invalid year {year}. Must be between {MIN_YEAR} and {MAX_YEAR}"
            )));
        }

        if let ScrapeTarget::Measures { types, .. } = self {
            if types.is_empty() {
                return Err(LegTrackError::Validation(
                    "At least one measure type is required".to_string(),
                ));
            }
            if let Some(bad) = types.iter().find(|t| {
                matches!(t, MeasureType::Unknown | MeasureType::Spa | MeasureType::Spb)
            }) {
                return Err(LegTrackError::Validation(format!(
                    "Measure type '{bad}' has no deadline report"
                )));
            }
        }
        Ok(())
    }

    /// Expands the target into the pages fetched by one run
    pub fn units(&self, urls: &SourceUrls) -> Vec<ScrapeUnit> {
        match self {
            ScrapeTarget::Measures { year, types } => types
                .iter()
                .map(|&measure_type| ScrapeUnit {
                    url: urls.measures(*year, measure_type),
                    snapshot: SnapshotKey::new(*year, measure_type.code()),
                    scope: Scope::year(*year).with_measure_type(measure_type),
                    detail: Some(measure_type),
                })
                .collect(),
            ScrapeTarget::Hearings { year } => vec![ScrapeUnit {
                url: urls.hearings(),
                snapshot: SnapshotKey::new(*year, "hearings"),
                scope: Scope::year(*year),
                detail: None,
            }],
            ScrapeTarget::SpecialSession { year, session } => {
                let measure_type = session.measure_type();
                vec![ScrapeUnit {
                    url: urls.special_session(*year, *session),
                    snapshot: SnapshotKey::new(*year, measure_type.code()),
                    scope: Scope::year(*year).with_session(*session),
                    detail: Some(measure_type),
                }]
            }
        }
    }
}

impl fmt::Display for ScrapeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeTarget::Measures { year, types } => {
                let codes: Vec<&str> = types.iter().map(|t| t.code()).collect();
                write!(f, "measures {year} [{}]", codes.join(","))
            }
            ScrapeTarget::Hearings { year } => write!(f, "hearings {year}"),
            ScrapeTarget::SpecialSession { year, session } => {
                write!(f, "special session {year}{session}")
            }
        }
    }
}

/// One page of a scrape run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeUnit {
    pub url: String,
    pub snapshot: SnapshotKey,
    /// Local slice the parsed page replaces
    pub scope: Scope,
    /// Measure type recorded as a scrape detail, if the unit gets one
    pub detail: Option<MeasureType>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const BASE: &str = "https://www.capitol.hawaii.gov";

    #[test_case(1899 ; "too early")]
    #[test_case(3000 ; "too late")]
    fn test_year_out_of_range(year: i32) {
        let err = ScrapeTarget::Hearings { year }.validate().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_measure_types_are_checked() {
        let empty = ScrapeTarget::Measures {
            year: 2024,
            types: Vec::new(),
        };
        assert!(empty.validate().unwrap_err().is_validation());

        let special = ScrapeTarget::Measures {
            year: 2024,
            types: vec![MeasureType::Hb, MeasureType::Spa],
        };
        assert!(special.validate().unwrap_err().is_validation());

        assert!(ScrapeTarget::measures(2024).validate().is_ok());
    }

    #[test]
    fn test_measure_units() {
        let urls = SourceUrls::new(BASE);
        let target = ScrapeTarget::Measures {
            year: 2024,
            types: vec![MeasureType::Hb, MeasureType::Gm],
        };
        let units = target.units(&urls);

        assert_eq!(units.len(), 2);
        assert_eq!(units[0].snapshot.file_name(), "2024-hb.html");
        assert_eq!(units[0].detail, Some(MeasureType::Hb));
        assert_eq!(units[0].scope.to_string(), "2024/hb");
        assert_eq!(units[1].url, urls.measures(2024, MeasureType::Gm));
    }

    #[test]
    fn test_hearing_and_session_units() {
        let urls = SourceUrls::new(BASE);

        let hearings = ScrapeTarget::Hearings { year: 2020 }.units(&urls);
        assert_eq!(hearings.len(), 1);
        assert_eq!(hearings[0].snapshot.file_name(), "2020-hearings.html");
        assert_eq!(hearings[0].detail, None);

        let session = SessionId::new('b').unwrap();
        let target = ScrapeTarget::SpecialSession {
            year: 2021,
            session,
        };
        assert_eq!(target.data_type(), DataType::SpecialSessionMeasure);
        let units = target.units(&urls);
        assert_eq!(units[0].snapshot.file_name(), "2021-spb.html");
        assert_eq!(units[0].detail, Some(MeasureType::Spb));
        assert_eq!(units[0].scope, Scope::year(2021).with_session(session));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ScrapeTarget::Measures {
                year: 2024,
                types: vec![MeasureType::Hb, MeasureType::Sb]
            }
            .to_string(),
            "measures 2024 [hb,sb]"
        );
        assert_eq!(ScrapeTarget::Hearings { year: 2024 }.to_string(), "hearings 2024");
    }
}
