//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output
//! - JSON-formatted local file logs with rotation
//! - Run-level macros so scrape and forwarding runs log the same field names
//!
//! # Example
//!
//! ```no_run
//! use legtrack::logging::init_logging;
//! use legtrack::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Scheduler tick");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of a scrape or forwarding run
///
/// # Example
///
/// ```no_run
/// use legtrack::log_run_start;
/// use legtrack::domain::DataType;
///
/// log_run_start!("forward", DataType::Measure, 12);
/// ```
#[macro_export]
macro_rules! log_run_start {
    ($run:expr, $data_type:expr, $job_id:expr) => {
        tracing::info!(
            run = $run,
            data_type = %$data_type,
            job_id = $job_id,
            "Run started"
        );
    };
}

/// Log the terminal status of a run
///
/// # Example
///
/// ```no_run
/// use legtrack::log_run_complete;
/// use legtrack::domain::{DataType, JobStatus};
///
/// log_run_complete!("scrape", DataType::Hearing, 3, JobStatus::Completed, 40, 2);
/// ```
#[macro_export]
macro_rules! log_run_complete {
    ($run:expr, $data_type:expr, $job_id:expr, $status:expr, $total:expr, $updated:expr) => {
        tracing::info!(
            run = $run,
            data_type = %$data_type,
            job_id = $job_id,
            status = %$status,
            total = $total,
            updated = $updated,
            "Run finished"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use legtrack::log_error_with_context;
/// use legtrack::domain::LegTrackError;
///
/// let error = LegTrackError::Parse("table not found".to_string());
/// log_error_with_context!(&error, "Failed to parse hearings");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            error_kind = $error.kind(),
            context = $context,
            "Error occurred"
        );
    };
}
