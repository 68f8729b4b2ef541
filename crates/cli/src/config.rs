//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TROLLEY_SNAPSHOT` - Default path of the list snapshot (backend JSON)
//! - `TROLLEY_CATALOG` - Default path of the catalog file (JSON or YAML)
//! - `TROLLEY_SORT` - Default shop sort mode (`location` or `alphabetical`)
//! - `TROLLEY_POLL_INTERVAL_MS` - How often `watch` checks the snapshot (default: 1000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `TROLLEY_LOG_FORMAT` - `text` (default) or `json` for structured logs
//! - `RUST_LOG` - Log filter (default: `trolley=info,trolley_cli=info,trolley_core=info`)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use trolley_core::SortMode;

const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
const MIN_POLL_INTERVAL_MS: u64 = 50;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Trolley CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrolleyConfig {
    /// Snapshot used when `--snapshot` is not given
    pub snapshot_path: Option<PathBuf>,
    /// Catalog used when `--catalog` is not given
    pub catalog_path: Option<PathBuf>,
    /// Sort mode for the shop surface when `--sort` is not given
    pub sort_mode: SortMode,
    /// Interval between snapshot checks in `watch`
    pub poll_interval: Duration,
    /// Emit logs as JSON lines instead of text
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl Default for TrolleyConfig {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            catalog_path: None,
            sort_mode: SortMode::default(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl TrolleyConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let sort_mode = match get_optional_env("TROLLEY_SORT") {
            Some(raw) => parse_sort_mode(&raw)?,
            None => SortMode::default(),
        };
        let poll_interval = match get_optional_env("TROLLEY_POLL_INTERVAL_MS") {
            Some(raw) => parse_poll_interval(&raw)?,
            None => Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        };

        let log_json = match get_optional_env("TROLLEY_LOG_FORMAT") {
            Some(raw) => parse_log_format(&raw)?,
            None => false,
        };

        Ok(Self {
            snapshot_path: get_optional_env("TROLLEY_SNAPSHOT").map(PathBuf::from),
            catalog_path: get_optional_env("TROLLEY_CATALOG").map(PathBuf::from),
            sort_mode,
            poll_interval,
            log_json,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_sort_mode(raw: &str) -> Result<SortMode, ConfigError> {
    raw.parse()
        .map_err(|e: trolley_core::ParseError| {
            ConfigError::InvalidEnvVar("TROLLEY_SORT".to_string(), e.to_string())
        })
}

/// Returns whether the format is JSON.
fn parse_log_format(raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "text" => Ok(false),
        "json" => Ok(true),
        other => Err(ConfigError::InvalidEnvVar(
            "TROLLEY_LOG_FORMAT".to_string(),
            format!("expected text or json, got {other}"),
        )),
    }
}

fn parse_poll_interval(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: String| {
        ConfigError::InvalidEnvVar("TROLLEY_POLL_INTERVAL_MS".to_string(), reason)
    };
    let millis = raw.trim().parse::<u64>().map_err(|e| invalid(e.to_string()))?;
    if millis < MIN_POLL_INTERVAL_MS {
        return Err(invalid(format!(
            "must be at least {MIN_POLL_INTERVAL_MS} (got {millis})"
        )));
    }
    Ok(Duration::from_millis(millis))
}
