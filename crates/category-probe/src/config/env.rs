// crates/category-probe/src/config/env.rs
// ============================================================================
// Module: Probe Environment
// Description: Environment-backed configuration for probe runs.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std, thiserror
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 and empty values fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::credentials::DEFAULT_CREDENTIALS_FILE;
use crate::telemetry::LogFormat;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for probe configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeEnv {
    /// Optional credentials file path.
    CredentialsPath,
    /// Optional request timeout in seconds (positive integer).
    TimeoutSeconds,
    /// Optional directory for report artifacts.
    ReportDir,
    /// Optional log output format (`text` or `json`).
    LogFormat,
}

impl ProbeEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CredentialsPath => "CATEGORY_PROBE_CREDENTIALS",
            Self::TimeoutSeconds => "CATEGORY_PROBE_TIMEOUT_SEC",
            Self::ReportDir => "CATEGORY_PROBE_REPORT_DIR",
            Self::LogFormat => "CATEGORY_PROBE_LOG_FORMAT",
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The variable is set but not valid UTF-8.
    #[error("{0} must be valid UTF-8")]
    InvalidUtf8(String),
    /// The variable is set but empty or whitespace.
    #[error("{0} must not be empty")]
    Empty(String),
    /// The variable holds an unacceptable value.
    #[error("{name} {reason}")]
    InvalidValue {
        /// Variable or flag name.
        name: String,
        /// Validation failure description.
        reason: String,
    },
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed probe configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProbeConfig {
    /// Optional credentials file override.
    pub credentials_path: Option<PathBuf>,
    /// Optional request timeout; `None` keeps the HTTP client default.
    pub timeout: Option<Duration>,
    /// Optional report artifact directory.
    pub report_dir: Option<PathBuf>,
    /// Optional log format override.
    pub log_format: Option<LogFormat>,
}

impl ProbeConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an environment value is not valid UTF-8, is
    /// empty, or fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_over(Self::default())
    }

    /// Loads configuration, keeping every field `overrides` sets.
    ///
    /// Variables for overridden fields are not read, so an invalid value there
    /// cannot fail the load.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable that is read is not valid UTF-8,
    /// is empty, or fails validation.
    pub fn load_over(overrides: Self) -> Result<Self, ConfigError> {
        let credentials_path = match overrides.credentials_path {
            Some(path) => Some(path),
            None => read_env_nonempty(ProbeEnv::CredentialsPath.as_str())?.map(PathBuf::from),
        };
        let timeout = match overrides.timeout {
            Some(timeout) => Some(timeout),
            None => read_env_nonempty(ProbeEnv::TimeoutSeconds.as_str())?
                .map(|value| parse_timeout_seconds(ProbeEnv::TimeoutSeconds.as_str(), &value))
                .transpose()?,
        };
        let report_dir = match overrides.report_dir {
            Some(dir) => Some(dir),
            None => read_env_nonempty(ProbeEnv::ReportDir.as_str())?.map(PathBuf::from),
        };
        let log_format = match overrides.log_format {
            Some(format) => Some(format),
            None => read_env_nonempty(ProbeEnv::LogFormat.as_str())?
                .map(|value| parse_log_format(ProbeEnv::LogFormat.as_str(), &value))
                .transpose()?,
        };
        Ok(Self {
            credentials_path,
            timeout,
            report_dir,
            log_format,
        })
    }

    /// Returns the credentials path, falling back to the default file name.
    #[must_use]
    pub fn credentials_path_or_default(&self) -> PathBuf {
        self.credentials_path.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS_FILE))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidUtf8`] when the variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| ConfigError::InvalidUtf8(name.to_string()))
    })
}

/// Reads an environment variable and rejects empty values.
fn read_env_nonempty(name: &str) -> Result<Option<String>, ConfigError> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty(name.to_string())),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive timeout value in whole seconds.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] when the value is blank, non-numeric,
/// or zero.
pub fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        name: name.to_string(),
        reason: reason.to_string(),
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid("must be a positive integer number of seconds"));
    }
    let secs: u64 =
        trimmed.parse().map_err(|_| invalid("must be a positive integer number of seconds"))?;
    if secs == 0 {
        return Err(invalid("must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}

/// Parses a log format literal.
fn parse_log_format(name: &str, raw: &str) -> Result<LogFormat, ConfigError> {
    LogFormat::parse(raw.trim()).ok_or_else(|| ConfigError::InvalidValue {
        name: name.to_string(),
        reason: "must be `text` or `json`".to_string(),
    })
}
