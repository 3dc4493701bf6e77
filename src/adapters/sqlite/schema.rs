//! Local table definitions

/// Record tables keyed by natural key, plus the scrape and push ledgers
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS measures (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    year INTEGER NOT NULL,
    measure_type TEXT NOT NULL,
    measure_number INTEGER NOT NULL,
    last_updated INTEGER NOT NULL,
    code TEXT NOT NULL DEFAULT '',
    report_title TEXT NOT NULL DEFAULT '',
    measure_title TEXT NOT NULL DEFAULT '',
    measure_pdf_url TEXT NOT NULL DEFAULT '',
    measure_archive_url TEXT NOT NULL DEFAULT '',
    current_referral TEXT NOT NULL DEFAULT '',
    bit_appropriation INTEGER NOT NULL DEFAULT 0,
    description TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL DEFAULT '',
    introducer TEXT NOT NULL DEFAULT '',
    companion TEXT NOT NULL DEFAULT '',
    UNIQUE (year, measure_type, measure_number)
);
CREATE INDEX IF NOT EXISTS idx_measures_last_updated ON measures (last_updated);

CREATE TABLE IF NOT EXISTS hearings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    year INTEGER NOT NULL,
    measure_type TEXT NOT NULL,
    measure_number INTEGER NOT NULL,
    notice TEXT NOT NULL,
    last_updated INTEGER NOT NULL,
    measure_relative_url TEXT NOT NULL DEFAULT '',
    code TEXT NOT NULL DEFAULT '',
    committee TEXT NOT NULL DEFAULT '',
    datetime TEXT NOT NULL DEFAULT '',
    timestamp INTEGER NOT NULL DEFAULT 0,
    description TEXT NOT NULL DEFAULT '',
    room TEXT NOT NULL DEFAULT '',
    notice_url TEXT NOT NULL DEFAULT '',
    notice_pdf_url TEXT NOT NULL DEFAULT '',
    UNIQUE (year, measure_type, measure_number, notice)
);
CREATE INDEX IF NOT EXISTS idx_hearings_last_updated ON hearings (last_updated);

CREATE TABLE IF NOT EXISTS sp_measures (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    year INTEGER NOT NULL,
    session TEXT NOT NULL,
    measure_type TEXT NOT NULL,
    measure_number INTEGER NOT NULL,
    last_updated INTEGER NOT NULL,
    code TEXT NOT NULL DEFAULT '',
    report_title TEXT NOT NULL DEFAULT '',
    measure_title TEXT NOT NULL DEFAULT '',
    measure_pdf_url TEXT NOT NULL DEFAULT '',
    measure_archive_url TEXT NOT NULL DEFAULT '',
    current_referral TEXT NOT NULL DEFAULT '',
    UNIQUE (year, session, measure_type, measure_number)
);
CREATE INDEX IF NOT EXISTS idx_sp_measures_last_updated ON sp_measures (last_updated);

CREATE TABLE IF NOT EXISTS scrape_jobs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    data_type INTEGER NOT NULL,
    status INTEGER NOT NULL,
    started_at INTEGER NOT NULL,
    completed_at INTEGER,
    total_number INTEGER NOT NULL DEFAULT 0,
    updated_number INTEGER NOT NULL DEFAULT 0,
    update_needed INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_scrape_jobs_pending
    ON scrape_jobs (data_type, status, update_needed, id);

CREATE TABLE IF NOT EXISTS scrape_details (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    scrape_job_id INTEGER NOT NULL REFERENCES scrape_jobs (id),
    measure_type INTEGER NOT NULL,
    status INTEGER NOT NULL,
    started_at INTEGER NOT NULL,
    completed_at INTEGER,
    total_number INTEGER NOT NULL DEFAULT 0,
    updated_number INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_scrape_details_job ON scrape_details (scrape_job_id);

CREATE TABLE IF NOT EXISTS push_jobs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    data_type INTEGER NOT NULL,
    scrape_job_id INTEGER NOT NULL DEFAULT 0,
    status INTEGER NOT NULL,
    started_at INTEGER NOT NULL,
    completed_at INTEGER,
    total_number INTEGER NOT NULL DEFAULT 0,
    updated_number INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_push_jobs_latest ON push_jobs (data_type, status, started_at);
"#;
