// crates/category-probe/src/auth.rs
// ============================================================================
// Module: Token Acquisition
// Description: OAuth2 client-credentials exchange against the auth server.
// Purpose: Produce the bearer token every authorized scenario request carries.
// Dependencies: base64, serde, thiserror, tracing
// ============================================================================

//! ## Overview
//! A single token is acquired per run with
//! `GET {authUrl}/token?grant_type=client_credentials` and HTTP Basic
//! credentials. The token is not refreshed; a failed exchange aborts the run.
//!
//! Security posture: the secret and the token are redacted from `Debug` and
//! never logged.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use thiserror::Error;

use crate::client::ApiRequest;
use crate::client::CategoryApiClient;
use crate::client::ClientError;
use crate::credentials::Credentials;

/// Maximum number of error-body characters kept in [`TokenError::Rejected`].
const MAX_ERROR_PREVIEW_CHARS: usize = 256;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Token exchange errors.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The exchange could not be performed.
    #[error("token request failed: {0}")]
    Client(#[from] ClientError),
    /// The auth server answered with a non-success status.
    #[error("token endpoint returned http {status}: {preview}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        preview: String,
    },
    /// The body did not carry a usable `access_token`.
    #[error("token response is missing a usable access_token: {0}")]
    MissingToken(String),
}

/// Token endpoint response body.
#[derive(Deserialize)]
struct TokenResponse {
    /// Issued access token.
    access_token: String,
    /// Token type label.
    #[serde(default)]
    token_type: Option<String>,
    /// Lifetime in seconds.
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Bearer token acquired for one run.
///
/// # Invariants
/// - The wrapped token is non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

impl AccessToken {
    /// Wraps a raw access token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::MissingToken`] when the token is blank.
    pub fn new(raw: impl Into<String>) -> Result<Self, TokenError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(TokenError::MissingToken("access_token is empty".to_string()));
        }
        Ok(Self(raw))
    }

    /// Returns the `Authorization` header value (`Bearer <token>`).
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// ============================================================================
// SECTION: Exchange
// ============================================================================

/// Builds the HTTP Basic `Authorization` value for the client pair.
#[must_use]
pub fn basic_authorization(credentials: &Credentials) -> String {
    let pair = format!("{}:{}", credentials.client_id(), credentials.client_secret());
    format!("Basic {}", BASE64.encode(pair))
}

/// Exchanges client credentials for an access token.
///
/// # Errors
///
/// Returns [`TokenError`] when the request fails, the server rejects the
/// credentials, or the body lacks a non-empty `access_token`.
pub async fn acquire_token(
    client: &CategoryApiClient,
    credentials: &Credentials,
) -> Result<AccessToken, TokenError> {
    let request = ApiRequest::get(["token"])
        .query("grant_type", "client_credentials")
        .authorization(basic_authorization(credentials))
        .without_content_type();
    let response = client.send_to(credentials.auth_url(), &request).await?;
    if !(200..300).contains(&response.status()) {
        return Err(TokenError::Rejected {
            status: response.status(),
            preview: preview(&response.body().to_string()),
        });
    }
    let parsed: TokenResponse =
        response.decode().map_err(|err| TokenError::MissingToken(err.to_string()))?;
    tracing::info!(
        token_type = parsed.token_type.as_deref().unwrap_or("unknown"),
        expires_in = parsed.expires_in.unwrap_or_default(),
        "access token acquired"
    );
    AccessToken::new(parsed.access_token)
}

/// Truncates an error body for display.
fn preview(body: &str) -> String {
    body.chars().take(MAX_ERROR_PREVIEW_CHARS).collect()
}
