//! Remote row mappings
//!
//! Each record kind maps onto one table keyed by its natural key. Writes are
//! `INSERT ... ON CONFLICT (key) DO UPDATE`, so replaying a chunk is harmless.

use crate::domain::{Hearing, Measure, Record, SpecialSessionMeasure};
use tokio_postgres::types::ToSql;

/// Owned statement parameter
pub type SqlParam = Box<dyn ToSql + Sync + Send>;

const SCHEMA_TEMPLATE: &str = r#"
CREATE SCHEMA IF NOT EXISTS {schema};

CREATE TABLE IF NOT EXISTS {schema}.measures (
    year INTEGER NOT NULL,
    measure_type TEXT NOT NULL,
    measure_number INTEGER NOT NULL,
    last_updated BIGINT NOT NULL,
    code TEXT NOT NULL,
    report_title TEXT NOT NULL,
    measure_title TEXT NOT NULL,
    measure_pdf_url TEXT NOT NULL,
    measure_archive_url TEXT NOT NULL,
    current_referral TEXT NOT NULL,
    bit_appropriation BOOLEAN NOT NULL,
    description TEXT NOT NULL,
    status TEXT NOT NULL,
    introducer TEXT NOT NULL,
    companion TEXT NOT NULL,
    PRIMARY KEY (year, measure_type, measure_number)
);

CREATE TABLE IF NOT EXISTS {schema}.hearings (
    year INTEGER NOT NULL,
    measure_type TEXT NOT NULL,
    measure_number INTEGER NOT NULL,
    notice TEXT NOT NULL,
    last_updated BIGINT NOT NULL,
    measure_relative_url TEXT NOT NULL,
    code TEXT NOT NULL,
    committee TEXT NOT NULL,
    datetime TEXT NOT NULL,
    timestamp BIGINT NOT NULL,
    description TEXT NOT NULL,
    room TEXT NOT NULL,
    notice_url TEXT NOT NULL,
    notice_pdf_url TEXT NOT NULL,
    PRIMARY KEY (year, measure_type, measure_number, notice)
);

CREATE TABLE IF NOT EXISTS {schema}.sp_measures (
    year INTEGER NOT NULL,
    session TEXT NOT NULL,
    measure_type TEXT NOT NULL,
    measure_number INTEGER NOT NULL,
    last_updated BIGINT NOT NULL,
    code TEXT NOT NULL,
    report_title TEXT NOT NULL,
    measure_title TEXT NOT NULL,
    measure_pdf_url TEXT NOT NULL,
    measure_archive_url TEXT NOT NULL,
    current_referral TEXT NOT NULL,
    PRIMARY KEY (year, session, measure_type, measure_number)
);
"#;

/// DDL for the remote tables inside `schema`
///
/// `schema` must already be validated as a plain identifier.
pub fn remote_schema_sql(schema: &str) -> String {
    SCHEMA_TEMPLATE.replace("{schema}", schema)
}

/// A record that maps onto one remote table
pub trait PostgresRecord: Record {
    const TABLE: &'static str;
    const KEY_COLUMNS: &'static [&'static str];
    const PAYLOAD_COLUMNS: &'static [&'static str];

    /// Key values, then `last_updated`, then payload values
    fn params(&self) -> Vec<SqlParam>;
}

/// Upsert statement for `R` inside `schema`
pub fn upsert_sql<R: PostgresRecord>(schema: &str) -> String {
    let columns: Vec<&str> = R::KEY_COLUMNS
        .iter()
        .copied()
        .chain(std::iter::once("last_updated"))
        .chain(R::PAYLOAD_COLUMNS.iter().copied())
        .collect();
    let placeholders = (1..=columns.len())
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let assignments = std::iter::once("last_updated")
        .chain(R::PAYLOAD_COLUMNS.iter().copied())
        .map(|c| format!("{c} = EXCLUDED.{c}"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {schema}.{table} ({columns}) VALUES ({placeholders}) \
         ON CONFLICT ({keys}) DO UPDATE SET {assignments}",
        table = R::TABLE,
        columns = columns.join(", "),
        keys = R::KEY_COLUMNS.join(", "),
    )
}

fn text(value: &str) -> SqlParam {
    Box::new(value.to_string())
}

impl PostgresRecord for Measure {
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

    fn params(&self) -> Vec<SqlParam> {
        vec![
            Box::new(self.year),
            text(self.measure_type.code()),
            Box::new(self.measure_number),
            Box::new(self.last_updated),
            text(&self.code),
            text(&self.report_title),
            text(&self.measure_title),
            text(&self.measure_pdf_url),
            text(&self.measure_archive_url),
            text(&self.current_referral),
            Box::new(self.bit_appropriation),
            text(&self.description),
            text(&self.status),
            text(&self.introducer),
            text(&self.companion),
        ]
    }
}

impl PostgresRecord for Hearing {
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

    fn params(&self) -> Vec<SqlParam> {
        vec![
            Box::new(self.year),
            text(self.measure_type.code()),
            Box::new(self.measure_number),
            text(&self.notice),
            Box::new(self.last_updated),
            text(&self.measure_relative_url),
            text(&self.code),
            text(&self.committee),
            text(&self.datetime),
            Box::new(self.timestamp),
            text(&self.description),
            text(&self.room),
            text(&self.notice_url),
            text(&self.notice_pdf_url),
        ]
    }
}

impl PostgresRecord for SpecialSessionMeasure {
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

    fn params(&self) -> Vec<SqlParam> {
        vec![
            Box::new(self.year),
            Box::new(self.session.to_string()),
            text(self.measure_type.code()),
            Box::new(self.measure_number),
            Box::new(self.last_updated),
            text(&self.code),
            text(&self.report_title),
            text(&self.measure_title),
            text(&self.measure_pdf_url),
            text(&self.measure_archive_url),
            text(&self.current_referral),
        ]
    }
}
