//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::LegTrackConfig;
use crate::config::secret_string;
use crate::domain::errors::LegTrackError;
use crate::domain::result::Result;
use crate::domain::MeasureType;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into LegTrackConfig
/// 4. Applies environment variable overrides (LEGTRACK_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is missing
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use legtrack::config::loader::load_config;
///
/// let config = load_config("legtrack.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<LegTrackConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LegTrackError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        LegTrackError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Loads configuration from TOML text
///
/// Same pipeline as [`load_config`] minus the file read.
///
/// # Errors
///
/// Returns an error if substitution, parsing or validation fails.
pub fn load_config_from_str(contents: &str) -> Result<LegTrackConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: LegTrackConfig = toml::from_str(&contents)
        .map_err(|e| LegTrackError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        LegTrackError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced environment variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| LegTrackError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&cap[0], &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(LegTrackError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using LEGTRACK_* prefix
///
/// Environment variables follow the pattern: LEGTRACK_<SECTION>_<KEY>
/// For example: LEGTRACK_SOURCE_BASE_URL, LEGTRACK_PUSH_MAX_RECORDS_PER_PUSH
fn apply_env_overrides(config: &mut LegTrackConfig) -> Result<()> {
    if let Ok(val) = std::env::var("LEGTRACK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Source overrides
    if let Ok(val) = std::env::var("LEGTRACK_SOURCE_BASE_URL") {
        config.source.base_url = val;
    }
    if let Ok(val) = std::env::var("LEGTRACK_SOURCE_TIMEOUT_SECONDS") {
        config.source.timeout_seconds = parse_override("LEGTRACK_SOURCE_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("LEGTRACK_SOURCE_USER_AGENT") {
        config.source.user_agent = val;
    }
    if let Ok(val) = std::env::var("LEGTRACK_SOURCE_MEASURE_TYPES") {
        config.source.measure_types = val
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(MeasureType::from_code)
            .collect();
    }

    // Local store overrides
    if let Ok(val) = std::env::var("LEGTRACK_LOCAL_DATABASE_PATH") {
        config.local.database_path = val;
    }
    if let Ok(val) = std::env::var("LEGTRACK_LOCAL_SNAPSHOT_DIR") {
        config.local.snapshot_dir = val;
    }

    // Remote store overrides
    if let Ok(val) = std::env::var("LEGTRACK_REMOTE_CONNECTION_STRING") {
        config.remote.connection_string = secret_string(val);
    }
    if let Ok(val) = std::env::var("LEGTRACK_REMOTE_SCHEMA") {
        config.remote.schema = val;
    }
    if let Ok(val) = std::env::var("LEGTRACK_REMOTE_MAX_CONNECTIONS") {
        config.remote.max_connections = parse_override("LEGTRACK_REMOTE_MAX_CONNECTIONS", &val)?;
    }
    if let Ok(val) = std::env::var("LEGTRACK_REMOTE_SSL_MODE") {
        config.remote.ssl_mode = val;
    }

    // Push overrides
    if let Ok(val) = std::env::var("LEGTRACK_PUSH_MAX_RECORDS_PER_PUSH") {
        config.push.max_records_per_push =
            parse_override("LEGTRACK_PUSH_MAX_RECORDS_PER_PUSH", &val)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("LEGTRACK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("LEGTRACK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        LegTrackError::Configuration(format!("Invalid value '{value}' for {name}"))
    })
}
