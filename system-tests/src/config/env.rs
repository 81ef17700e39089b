// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for system tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: category-probe
// ============================================================================

//! ## Overview
//! Environment values are parsed with the probe's strict readers so invalid
//! UTF-8, empty values, and malformed timeouts fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use category_probe::config::ConfigError;
use category_probe::config::parse_timeout_seconds;
use category_probe::config::read_env_strict;
use category_probe::credentials::DEFAULT_CREDENTIALS_FILE;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Optional run root override for test artifacts.
    RunRoot,
    /// Credentials file for the live-api suite.
    LiveCredentials,
    /// Optional request timeout override in seconds (positive integer).
    TimeoutSeconds,
}

impl SystemTestEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RunRoot => "CATEGORY_PROBE_SYSTEM_TEST_RUN_ROOT",
            Self::LiveCredentials => "CATEGORY_PROBE_SYSTEM_TEST_CREDENTIALS",
            Self::TimeoutSeconds => "CATEGORY_PROBE_SYSTEM_TEST_TIMEOUT_SEC",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Optional run root override.
    pub run_root: Option<PathBuf>,
    /// Optional live credentials path override.
    pub live_credentials: Option<PathBuf>,
    /// Optional timeout override in seconds (positive integer).
    pub timeout: Option<Duration>,
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an environment value is not valid UTF-8,
    /// is empty, or is not a positive timeout.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(read_env_strict)
    }

    /// Loads configuration through `read`, which maps a variable name to its
    /// value (`None` when unset).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `read` fails, a value is empty, or the
    /// timeout is not positive.
    pub fn load_with<F>(read: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<Option<String>, ConfigError>,
    {
        let lookup = |key: SystemTestEnv| read_nonempty(&read, key);
        let run_root = lookup(SystemTestEnv::RunRoot)?.map(PathBuf::from);
        let live_credentials = lookup(SystemTestEnv::LiveCredentials)?.map(PathBuf::from);
        let timeout = lookup(SystemTestEnv::TimeoutSeconds)?
            .map(|value| parse_timeout_seconds(SystemTestEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        Ok(Self {
            run_root,
            live_credentials,
            timeout,
        })
    }

    /// Returns the live credentials path, falling back to the probe default
    /// resolved against the workspace root.
    #[must_use]
    pub fn live_credentials_or_default(&self) -> PathBuf {
        self.live_credentials.clone().unwrap_or_else(|| {
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join(DEFAULT_CREDENTIALS_FILE)
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads one key through `read` and rejects empty values.
fn read_nonempty<F>(read: &F, key: SystemTestEnv) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Result<Option<String>, ConfigError>,
{
    let name = key.as_str();
    match read(name)? {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty(name.to_string())),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}
