// crates/category-probe/src/scenarios/assertions.rs
// ============================================================================
// Module: Scenario Assertions
// Description: Failure taxonomy and assertion helpers for scenarios.
// Purpose: Turn response checks into typed, reportable failures.
// Dependencies: serde, thiserror
// ============================================================================

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::client::ApiResponse;
use crate::client::ClientError;
use crate::model::ErrorList;

/// Why a scenario failed.
///
/// # Invariants
/// - Failures are scoped to one scenario and never abort the run.
#[derive(Debug, Error)]
pub enum ScenarioFailure {
    /// The response status differs from the contract.
    #[error("expected http {expected}, got {actual} from {url}")]
    UnexpectedStatus {
        /// Contracted status.
        expected: u16,
        /// Observed status.
        actual: u16,
        /// Request URL.
        url: String,
    },
    /// The response body violates the contract.
    #[error("assertion failed: {0}")]
    Assertion(String),
    /// The discovery listing did not yield a usable input.
    #[error("discovery failed: {0}")]
    Discovery(String),
    /// The body does not have the contracted shape.
    #[error("unexpected body from {url}: {message}")]
    Decode {
        /// Request URL.
        url: String,
        /// Decode failure description.
        message: String,
    },
    /// The exchange itself failed.
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Evidence gathered by a passing scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioEvidence {
    /// Observations worth reporting.
    pub notes: Vec<String>,
}

impl ScenarioEvidence {
    /// Appends an observation.
    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

/// Result alias for scenario functions.
pub type ScenarioResult = Result<ScenarioEvidence, ScenarioFailure>;

/// Fails unless the response carries `expected`.
///
/// # Errors
///
/// Returns [`ScenarioFailure::UnexpectedStatus`] on mismatch.
pub fn expect_status(response: &ApiResponse, expected: u16) -> Result<(), ScenarioFailure> {
    if response.status() == expected {
        return Ok(());
    }
    Err(ScenarioFailure::UnexpectedStatus {
        expected,
        actual: response.status(),
        url: response.url().to_string(),
    })
}

/// Decodes the response body into `T`.
///
/// # Errors
///
/// Returns [`ScenarioFailure::Decode`] when the body does not match.
pub fn decode_body<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, ScenarioFailure> {
    response.decode().map_err(|err| ScenarioFailure::Decode {
        url: response.url().to_string(),
        message: err.to_string(),
    })
}

/// Fails with `message` unless `condition` holds.
///
/// # Errors
///
/// Returns [`ScenarioFailure::Assertion`] when `condition` is false.
pub fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<(), ScenarioFailure> {
    if condition { Ok(()) } else { Err(ScenarioFailure::Assertion(message())) }
}

/// Requires a non-empty `errors` array, whatever its entries look like.
///
/// # Errors
///
/// Returns [`ScenarioFailure`] when the body has no `errors` array or it is empty.
pub fn expect_error_list(response: &ApiResponse) -> Result<ErrorList, ScenarioFailure> {
    let errors: ErrorList = decode_body(response)?;
    ensure(!errors.errors.is_empty(), || {
        format!("error list from {} is empty", response.url())
    })?;
    Ok(errors)
}
