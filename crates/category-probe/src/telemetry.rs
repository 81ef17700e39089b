// crates/category-probe/src/telemetry.rs
// ============================================================================
// Module: Probe Telemetry
// Description: Tracing subscriber bootstrap for the probe binary.
// Purpose: Route structured probe events to stderr as text or JSON.
// Dependencies: tracing, tracing-subscriber
// ============================================================================

//! ## Overview
//! The library emits `tracing` events (scenario spans, HTTP exchanges, token
//! metadata); the binary installs a `fmt` subscriber filtered by `RUST_LOG`.
//! Stdout is reserved for the scenario report, so logs go to stderr.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Default filter applied when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Log output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single-line events.
    #[default]
    Text,
    /// Newline-delimited JSON events.
    Json,
}

impl LogFormat {
    /// Parses a case-insensitive format literal.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("text") {
            Some(Self::Text)
        } else if raw.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }

    /// Returns a stable label for the format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

/// Subscriber installation failure.
#[derive(Debug, Error)]
#[error("failed to install tracing subscriber: {0}")]
pub struct TelemetryError(String);

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns [`TelemetryError`] when a global subscriber is already installed.
pub fn init_tracing(format: LogFormat) -> Result<(), TelemetryError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder =
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let result = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|err| TelemetryError(err.to_string()))
}
