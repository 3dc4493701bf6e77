//! Configuration management for LegTrack.
//!
//! LegTrack uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `LEGTRACK_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! The loaded [`LegTrackConfig`] is passed explicitly to every component that needs it;
//! nothing reads process-wide configuration after loading.
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "production"
//!
//! [application]
//! log_level = "info"
//!
//! [source]
//! base_url = "https://www.capitol.hawaii.gov"
//! measure_types = ["hb", "sb", "hr", "sr", "hcr", "scr", "gm"]
//!
//! [local]
//! database_path = "./results/legtrack.sqlite3"
//! snapshot_dir = "./results"
//!
//! [remote]
//! connection_string = "${LEGTRACK_REMOTE_URL}"
//! ssl_mode = "require"
//!
//! [push]
//! max_records_per_push = 1000
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use legtrack::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("legtrack.toml")?;
//! println!("Source: {}", config.source.base_url);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_str};
pub use schema::{
    ApplicationConfig, Environment, LegTrackConfig, LocalConfig, LoggingConfig, PushConfig,
    RemoteConfig, SourceConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
