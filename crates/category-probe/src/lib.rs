// crates/category-probe/src/lib.rs
// ============================================================================
// Module: Category Probe Library
// Description: Contract probe for a remote sale-category HTTP API.
// Purpose: Expose credentials, token, client, scenarios, and reporting.
// Dependencies: reqwest, serde, thiserror, tracing, url
// ============================================================================

//! ## Overview
//! The category probe authenticates against a remote marketplace API with the
//! OAuth2 client-credentials grant and then runs a fixed, ordered set of
//! read-only contract scenarios against its sale-category endpoints. Each
//! scenario reports independently; only credential or token failures abort a
//! run.
//!
//! Security posture: remote responses are untrusted; bodies are size-limited,
//! decoding fails closed, and secrets never reach logs or transcripts.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod auth;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod model;
pub mod report;
pub mod scenarios;
pub mod telemetry;


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use auth::AccessToken;
pub use auth::TokenError;
pub use auth::acquire_token;
pub use client::ApiRequest;
pub use client::ApiResponse;
pub use client::CategoryApiClient;
pub use client::ClientError;
pub use config::ProbeConfig;
pub use credentials::Credentials;
pub use credentials::CredentialsError;
pub use error::ProbeError;
pub use report::ScenarioOutcome;
pub use report::ScenarioStatus;
pub use report::SuiteReport;
pub use scenarios::ProbeContext;
pub use scenarios::ScenarioFailure;
pub use scenarios::ScenarioGroup;
pub use scenarios::ScenarioId;
pub use scenarios::run_scenario;
pub use scenarios::run_suite;
