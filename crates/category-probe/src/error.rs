// crates/category-probe/src/error.rs
// ============================================================================
// Module: Probe Errors
// Description: Fatal error taxonomy for a probe run.
// Purpose: Collect the failures that abort a run before any scenario executes.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Scenario failures are reported per scenario and never abort the run. The
//! errors collected here are the ones that do: unreadable credentials, an
//! invalid environment, a client that cannot be built, a failed token
//! exchange, or report artifacts that cannot be written.

use thiserror::Error;

use crate::auth::TokenError;
use crate::client::ClientError;
use crate::config::ConfigError;
use crate::credentials::CredentialsError;
use crate::report::ReportError;

/// Fatal probe errors.
///
/// # Invariants
/// - Every variant aborts the run; none is raised for a single scenario.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Environment configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Credentials could not be loaded.
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
    /// HTTP client setup failed.
    #[error(transparent)]
    Client(#[from] ClientError),
    /// Token exchange failed.
    #[error(transparent)]
    Token(#[from] TokenError),
    /// Report artifacts could not be written.
    #[error(transparent)]
    Report(#[from] ReportError),
}
