// crates/category-probe/src/credentials.rs
// ============================================================================
// Module: Credentials
// Description: Loader for the client-credentials JSON file.
// Purpose: Read and validate auth/API endpoints and the OAuth2 client pair.
// Dependencies: serde, serde_json, thiserror, url
// ============================================================================

//! ## Overview
//! Credentials are read once per run from a small JSON file with the keys
//! `authUrl`, `apiUrl`, `clientID`, and `clientsecret`. Any failure here is
//! fatal: no scenario can run without a token.
//!
//! Security posture: the client secret is redacted from `Debug` output and is
//! never logged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default credentials file name, resolved against the working directory.
pub const DEFAULT_CREDENTIALS_FILE: &str = "Allegro-credentials.json";

/// Maximum credentials file size accepted by the loader.
pub const MAX_CREDENTIALS_BYTES: u64 = 64 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Credential loading errors.
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// The file could not be opened or read.
    #[error("failed to read credentials file {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file exceeds [`MAX_CREDENTIALS_BYTES`].
    #[error("credentials file {path} exceeds {limit} bytes")]
    TooLarge {
        /// Path that failed.
        path: PathBuf,
        /// Size limit in bytes.
        limit: u64,
    },
    /// The file is not a valid credentials JSON object.
    #[error("invalid credentials json in {path}: {source}")]
    Parse {
        /// Path that failed.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// A required field is blank.
    #[error("credentials field `{0}` must not be empty")]
    EmptyField(&'static str),
    /// An endpoint is not an absolute http(s) URL.
    #[error("credentials field `{field}` is not a valid http(s) url: {reason}")]
    InvalidUrl {
        /// Offending field name.
        field: &'static str,
        /// Parse failure description.
        reason: String,
    },
}

// ============================================================================
// SECTION: Types
// ============================================================================

/// On-disk credentials layout.
#[derive(Deserialize)]
struct CredentialsFile {
    /// OAuth2 authorization server base URL.
    #[serde(rename = "authUrl")]
    auth_url: String,
    /// Category API base URL.
    #[serde(rename = "apiUrl")]
    api_url: String,
    /// OAuth2 client identifier.
    #[serde(rename = "clientID")]
    client_id: String,
    /// OAuth2 client secret.
    #[serde(rename = "clientsecret")]
    client_secret: String,
}

/// Validated, immutable credentials for one run.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// OAuth2 authorization server base URL.
    auth_url: Url,
    /// Category API base URL.
    api_url: Url,
    /// OAuth2 client identifier.
    client_id: String,
    /// OAuth2 client secret.
    client_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("auth_url", &self.auth_url.as_str())
            .field("api_url", &self.api_url.as_str())
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Builds credentials from raw values, validating each field.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsError`] when a field is blank or an endpoint is not
    /// an absolute `http`/`https` URL.
    pub fn new(
        auth_url: &str,
        api_url: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Self, CredentialsError> {
        let client_id = require_nonempty("clientID", client_id)?;
        let client_secret = require_nonempty("clientsecret", client_secret)?;
        Ok(Self {
            auth_url: parse_endpoint("authUrl", auth_url)?,
            api_url: parse_endpoint("apiUrl", api_url)?,
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        })
    }

    /// Loads credentials from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsError`] when the file is missing, too large,
    /// malformed, or contains invalid values.
    pub fn load(path: &Path) -> Result<Self, CredentialsError> {
        let file = File::open(path).map_err(|source| CredentialsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut bytes = Vec::new();
        file.take(MAX_CREDENTIALS_BYTES + 1).read_to_end(&mut bytes).map_err(|source| {
            CredentialsError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        if u64::try_from(bytes.len()).unwrap_or(u64::MAX) > MAX_CREDENTIALS_BYTES {
            return Err(CredentialsError::TooLarge {
                path: path.to_path_buf(),
                limit: MAX_CREDENTIALS_BYTES,
            });
        }
        let raw: CredentialsFile =
            serde_json::from_slice(&bytes).map_err(|source| CredentialsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(&raw.auth_url, &raw.api_url, &raw.client_id, &raw.client_secret)
    }

    /// Returns the authorization server base URL.
    #[must_use]
    pub const fn auth_url(&self) -> &Url {
        &self.auth_url
    }

    /// Returns the category API base URL.
    #[must_use]
    pub const fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Returns the OAuth2 client identifier.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the OAuth2 client secret.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Rejects blank values, returning the trimmed value otherwise.
fn require_nonempty<'a>(field: &'static str, value: &'a str) -> Result<&'a str, CredentialsError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CredentialsError::EmptyField(field));
    }
    Ok(trimmed)
}

/// Parses an absolute http(s) endpoint URL.
fn parse_endpoint(field: &'static str, raw: &str) -> Result<Url, CredentialsError> {
    let raw = require_nonempty(field, raw)?;
    let url = Url::parse(raw).map_err(|err| CredentialsError::InvalidUrl {
        field,
        reason: err.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CredentialsError::InvalidUrl {
            field,
            reason: format!("unsupported scheme `{}`", url.scheme()),
        });
    }
    if url.cannot_be_a_base() {
        return Err(CredentialsError::InvalidUrl {
            field,
            reason: "url cannot be used as a base".to_string(),
        });
    }
    Ok(url)
}
