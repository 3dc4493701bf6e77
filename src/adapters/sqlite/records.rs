//! Row mappings between records and local tables
//!
//! Column order everywhere is key columns, then `last_updated`, then payload columns.

use crate::domain::{
    Hearing, Measure, MeasureType, Record, Scope, SessionId, SpecialSessionMeasure, StoreError,
};
use rusqlite::types::{Type, Value};
use rusqlite::Row;

/// A record that maps onto one local table
pub trait SqliteRecord: Record {
    const TABLE: &'static str;
    const KEY_COLUMNS: &'static [&'static str];
    const PAYLOAD_COLUMNS: &'static [&'static str];

    /// Builds a record from a row selected with [`select_columns`]
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    fn key_values(&self) -> Vec<Value>;

    fn payload_values(&self) -> Vec<Value>;

    /// `WHERE` clause and parameters selecting `scope`
    fn scope_filter(scope: &Scope) -> (String, Vec<Value>);
}

/// Comma-separated key, `last_updated` and payload columns
pub fn select_columns<R: SqliteRecord>() -> String {
    R::KEY_COLUMNS
        .iter()
        .chain(std::iter::once(&"last_updated"))
        .chain(R::PAYLOAD_COLUMNS.iter())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

fn measure_type_at(row: &Row<'_>, column: &str) -> rusqlite::Result<MeasureType> {
    let code: String = row.get(column)?;
    Ok(MeasureType::from_code(&code))
}

fn session_at(row: &Row<'_>, column: &str) -> rusqlite::Result<SessionId> {
    let raw: String = row.get(column)?;
    raw.parse().map_err(|e: String| {
        rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(StoreError::Corrupt(e)))
    })
}

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

fn year_filter(scope: &Scope) -> (Vec<&'static str>, Vec<Value>) {
    (vec!["year = ?"], vec![Value::Integer(i64::from(scope.year))])
}

fn join_filter(clauses: Vec<&'static str>) -> String {
    clauses.join(" AND ")
}

impl SqliteRecord for Measure {
    const TABLE: &'static str = "measures";
    const KEY_COLUMNS: &'static [&'static str] = &["year", "measure_type", "measure_number"];
    const PAYLOAD_COLUMNS: &'static [&'static str] = &[
        "code",
        "report_title",
        "measure_title",
        "measure_pdf_url",
        "measure_archive_url",
        "current_referral",
        "bit_appropriation",
        "description",
        "status",
        "introducer",
        "companion",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Measure {
            year: row.get("year")?,
            measure_type: measure_type_at(row, "measure_type")?,
            measure_number: row.get("measure_number")?,
            last_updated: row.get("last_updated")?,
            code: row.get("code")?,
            report_title: row.get("report_title")?,
            measure_title: row.get("measure_title")?,
            measure_pdf_url: row.get("measure_pdf_url")?,
            measure_archive_url: row.get("measure_archive_url")?,
            current_referral: row.get("current_referral")?,
            bit_appropriation: row.get("bit_appropriation")?,
            description: row.get("description")?,
            status: row.get("status")?,
            introducer: row.get("introducer")?,
            companion: row.get("companion")?,
        })
    }

    fn key_values(&self) -> Vec<Value> {
        vec![
            Value::Integer(i64::from(self.year)),
            text(self.measure_type.code()),
            Value::Integer(i64::from(self.measure_number)),
        ]
    }

    fn payload_values(&self) -> Vec<Value> {
        vec![
            text(&self.code),
            text(&self.report_title),
            text(&self.measure_title),
            text(&self.measure_pdf_url),
            text(&self.measure_archive_url),
            text(&self.current_referral),
            Value::Integer(i64::from(self.bit_appropriation)),
            text(&self.description),
            text(&self.status),
            text(&self.introducer),
            text(&self.companion),
        ]
    }

    fn scope_filter(scope: &Scope) -> (String, Vec<Value>) {
        let (mut clauses, mut params) = year_filter(scope);
        if let Some(measure_type) = scope.measure_type {
            clauses.push("measure_type = ?");
            params.push(text(measure_type.code()));
        }
        (join_filter(clauses), params)
    }
}

impl SqliteRecord for Hearing {
    const TABLE: &'static str = "hearings";
    const KEY_COLUMNS: &'static [&'static str] =
        &["year", "measure_type", "measure_number", "notice"];
    const PAYLOAD_COLUMNS: &'static [&'static str] = &[
        "measure_relative_url",
        "code",
        "committee",
        "datetime",
        "timestamp",
        "description",
        "room",
        "notice_url",
        "notice_pdf_url",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Hearing {
            year: row.get("year")?,
            measure_type: measure_type_at(row, "measure_type")?,
            measure_number: row.get("measure_number")?,
            notice: row.get("notice")?,
            last_updated: row.get("last_updated")?,
            measure_relative_url: row.get("measure_relative_url")?,
            code: row.get("code")?,
            committee: row.get("committee")?,
            datetime: row.get("datetime")?,
            timestamp: row.get("timestamp")?,
            description: row.get("description")?,
            room: row.get("room")?,
            notice_url: row.get("notice_url")?,
            notice_pdf_url: row.get("notice_pdf_url")?,
        })
    }

    fn key_values(&self) -> Vec<Value> {
        vec![
            Value::Integer(i64::from(self.year)),
            text(self.measure_type.code()),
            Value::Integer(i64::from(self.measure_number)),
            text(&self.notice),
        ]
    }

    fn payload_values(&self) -> Vec<Value> {
        vec![
            text(&self.measure_relative_url),
            text(&self.code),
            text(&self.committee),
            text(&self.datetime),
            Value::Integer(self.timestamp),
            text(&self.description),
            text(&self.room),
            text(&self.notice_url),
            text(&self.notice_pdf_url),
        ]
    }

    fn scope_filter(scope: &Scope) -> (String, Vec<Value>) {
        let (mut clauses, mut params) = year_filter(scope);
        if let Some(measure_type) = scope.measure_type {
            clauses.push("measure_type = ?");
            params.push(text(measure_type.code()));
        }
        (join_filter(clauses), params)
    }
}

impl SqliteRecord for SpecialSessionMeasure {
    const TABLE: &'static str = "sp_measures";
    const KEY_COLUMNS: &'static [&'static str] =
        &["year", "session", "measure_type", "measure_number"];
    const PAYLOAD_COLUMNS: &'static [&'static str] = &[
        "code",
        "report_title",
        "measure_title",
        "measure_pdf_url",
        "measure_archive_url",
        "current_referral",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(SpecialSessionMeasure {
            year: row.get("year")?,
            session: session_at(row, "session")?,
            measure_type: measure_type_at(row, "measure_type")?,
            measure_number: row.get("measure_number")?,
            last_updated: row.get("last_updated")?,
            code: row.get("code")?,
            report_title: row.get("report_title")?,
            measure_title: row.get("measure_title")?,
            measure_pdf_url: row.get("measure_pdf_url")?,
            measure_archive_url: row.get("measure_archive_url")?,
            current_referral: row.get("current_referral")?,
        })
    }

    fn key_values(&self) -> Vec<Value> {
        vec![
            Value::Integer(i64::from(self.year)),
            Value::Text(self.session.to_string()),
            text(self.measure_type.code()),
            Value::Integer(i64::from(self.measure_number)),
        ]
    }

    fn payload_values(&self) -> Vec<Value> {
        vec![
            text(&self.code),
            text(&self.report_title),
            text(&self.measure_title),
            text(&self.measure_pdf_url),
            text(&self.measure_archive_url),
            text(&self.current_referral),
        ]
    }

    fn scope_filter(scope: &Scope) -> (String, Vec<Value>) {
        let (mut clauses, mut params) = year_filter(scope);
        if let Some(session) = scope.session {
            clauses.push("session = ?");
            params.push(Value::Text(session.to_string()));
        }
        if let Some(measure_type) = scope.measure_type {
            clauses.push("measure_type = ?");
            params.push(text(measure_type.code()));
        }
        (join_filter(clauses), params)
    }
}
