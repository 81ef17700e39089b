// crates/category-probe/src/client.rs
// ============================================================================
// Module: Category API Client
// Description: HTTP client for the token and sale-category endpoints.
// Purpose: Issue GET requests with controlled headers and capture transcripts.
// Dependencies: reqwest, serde_json, thiserror, tracing, url
// ============================================================================

//! ## Overview
//! [`CategoryApiClient`] issues GET requests described by [`ApiRequest`]
//! values. Each request states exactly which `Authorization` and
//! `Content-Type` headers it carries, because several contract scenarios
//! depend on their absence or on malformed values. Non-2xx statuses are not
//! errors here; they are returned for the scenarios to assert on.
//!
//! Security posture: response bodies are untrusted and size-limited.
//! Authorization values are redacted from `Debug` output, logs, and the
//! transcript.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::redirect::Policy;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Media type sent with category API requests unless a request overrides it.
pub const DEFAULT_CONTENT_TYPE: &str = "application/vnd.allegro.public.v1+json";

/// Maximum response body size accepted by the client.
pub const MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;

/// User agent sent with every request.
const USER_AGENT: &str = concat!("category-probe/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Client errors.
///
/// # Invariants
/// - HTTP error statuses are never mapped to these variants.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The reqwest client could not be constructed.
    #[error("failed to build http client: {0}")]
    Build(String),
    /// The base URL cannot take path segments.
    #[error("url {0} cannot be used as a request base")]
    InvalidBase(String),
    /// A header value contains characters HTTP does not allow.
    #[error("invalid {0} header value")]
    InvalidHeader(&'static str),
    /// The request could not be sent or the body could not be read.
    #[error("http transport error for {url}: {message}")]
    Transport {
        /// Request URL.
        url: String,
        /// Transport failure description.
        message: String,
    },
    /// Response body exceeded [`MAX_RESPONSE_BYTES`].
    #[error("response exceeds size limit ({actual} > {limit})")]
    ResponseTooLarge {
        /// Observed size in bytes.
        actual: usize,
        /// Maximum size in bytes.
        limit: usize,
    },
}

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Description of a single GET request.
///
/// # Invariants
/// - Path segments are percent-encoded when appended to the base URL.
/// - `Content-Type` defaults to [`DEFAULT_CONTENT_TYPE`].
#[derive(Clone)]
pub struct ApiRequest {
    /// Path segments appended to the base URL.
    segments: Vec<String>,
    /// Query pairs appended in order.
    query: Vec<(String, String)>,
    /// Full `Authorization` header value.
    authorization: Option<String>,
    /// `Content-Type` header value.
    content_type: Option<String>,
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("segments", &self.segments)
            .field("query", &self.query)
            .field("authorization", &self.authorization.as_ref().map(|_| "<redacted>"))
            .field("content_type", &self.content_type)
            .finish()
    }
}

impl ApiRequest {
    /// Starts a GET request for the given path segments.
    #[must_use]
    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            authorization: None,
            content_type: Some(DEFAULT_CONTENT_TYPE.to_string()),
        }
    }

    /// Appends a query pair.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the raw `Authorization` header value.
    #[must_use]
    pub fn authorization(mut self, value: impl Into<String>) -> Self {
        self.authorization = Some(value.into());
        self
    }

    /// Overrides the `Content-Type` header value.
    #[must_use]
    pub fn content_type(mut self, value: impl Into<String>) -> Self {
        self.content_type = Some(value.into());
        self
    }

    /// Sends no `Content-Type` header.
    #[must_use]
    pub fn without_content_type(mut self) -> Self {
        self.content_type = None;
        self
    }

    /// Returns true when an `Authorization` header will be sent.
    #[must_use]
    pub const fn is_authorized(&self) -> bool {
        self.authorization.is_some()
    }

    /// Resolves the request URL against a base.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBase`] when `base` cannot take path segments.
    pub fn resolve(&self, base: &Url) -> Result<Url, ClientError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBase(base.to_string()))?
            .pop_if_empty()
            .extend(&self.segments);
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }

    /// Builds the header map for this request.
    fn headers(&self) -> Result<HeaderMap, ClientError> {
        let mut headers = HeaderMap::new();
        if let Some(value) = &self.authorization {
            let header = HeaderValue::from_str(value)
                .map_err(|_| ClientError::InvalidHeader("authorization"))?;
            headers.insert(AUTHORIZATION, header);
        }
        if let Some(value) = &self.content_type {
            let header = HeaderValue::from_str(value)
                .map_err(|_| ClientError::InvalidHeader("content-type"))?;
            headers.insert(CONTENT_TYPE, header);
        }
        Ok(headers)
    }
}

// ============================================================================
// SECTION: Responses
// ============================================================================

/// Status and decoded body of one exchange.
///
/// # Invariants
/// - `body` is JSON `null` when the payload is empty or not JSON.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Request URL.
    url: String,
    /// HTTP status code.
    status: u16,
    /// Decoded JSON body.
    body: Value,
}

impl ApiResponse {
    /// Builds a response from parts.
    #[must_use]
    pub const fn new(url: String, status: u16, body: Value) -> Self {
        Self {
            url,
            status,
            body,
        }
    }

    /// Returns the request URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the decoded JSON body.
    #[must_use]
    pub const fn body(&self) -> &Value {
        &self.body
    }

    /// Decodes the body into a typed payload.
    ///
    /// # Errors
    ///
    /// Returns the serde error when the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.body)
    }
}

// ============================================================================
// SECTION: Transcript
// ============================================================================

/// One recorded HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    /// 1-based exchange counter.
    pub sequence: u64,
    /// HTTP method.
    pub method: String,
    /// Request URL.
    pub url: String,
    /// Whether an `Authorization` header was sent.
    pub authorized: bool,
    /// `Content-Type` header sent, if any.
    pub content_type: Option<String>,
    /// Response status, when a response arrived.
    pub status: Option<u16>,
    /// Transport error, when no usable response arrived.
    pub error: Option<String>,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// HTTP client bound to the category API base URL.
#[derive(Clone)]
pub struct CategoryApiClient {
    /// Reqwest client instance.
    http: Client,
    /// Category API base URL.
    api_base: Url,
    /// Recorded exchanges.
    transcript: Arc<Mutex<Vec<TranscriptEntry>>>,
}

impl fmt::Debug for CategoryApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategoryApiClient").field("api_base", &self.api_base.as_str()).finish()
    }
}

impl CategoryApiClient {
    /// Builds a client for the given API base.
    ///
    /// `timeout` bounds each whole request; `None` keeps reqwest's default.
    /// Redirects are not followed.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Build`] when the HTTP client cannot be constructed.
    pub fn new(api_base: Url, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = Client::builder().redirect(Policy::none()).user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|err| ClientError::Build(err.to_string()))?;
        Ok(Self {
            http,
            api_base,
            transcript: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Returns the category API base URL.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Sends a request relative to the category API base.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request cannot be built or sent, or the
    /// body exceeds the size limit.
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ClientError> {
        self.send_to(&self.api_base, request).await
    }

    /// Sends a request relative to an arbitrary base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request cannot be built or sent, or the
    /// body exceeds the size limit.
    pub async fn send_to(
        &self,
        base: &Url,
        request: &ApiRequest,
    ) -> Result<ApiResponse, ClientError> {
        let url = request.resolve(base)?;
        let headers = request.headers()?;
        let result = self.execute(url.clone(), headers).await;
        match &result {
            Ok(response) => {
                tracing::debug!(
                    method = "GET",
                    url = %url,
                    status = response.status(),
                    authorized = request.is_authorized(),
                    "http exchange completed"
                );
                self.record(&url, request, Some(response.status()), None);
            }
            Err(err) => {
                tracing::debug!(method = "GET", url = %url, error = %err, "http exchange failed");
                self.record(&url, request, None, Some(err.to_string()));
            }
        }
        result
    }

    /// Returns a snapshot of the transcript entries.
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Performs the GET and reads the bounded body.
    async fn execute(&self, url: Url, headers: HeaderMap) -> Result<ApiResponse, ClientError> {
        let url_text = url.to_string();
        let response = self.http.get(url).headers(headers).send().await.map_err(|err| {
            ClientError::Transport {
                url: url_text.clone(),
                message: err.to_string(),
            }
        })?;
        let status = response.status().as_u16();
        let bytes = read_body_with_limit(response, MAX_RESPONSE_BYTES).await.map_err(
            |err| match err {
                BodyError::TooLarge(actual) => ClientError::ResponseTooLarge {
                    actual,
                    limit: MAX_RESPONSE_BYTES,
                },
                BodyError::Read(message) => ClientError::Transport {
                    url: url_text.clone(),
                    message,
                },
            },
        )?;
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Ok(ApiResponse::new(url_text, status, body))
    }

    /// Appends an exchange to the transcript.
    fn record(&self, url: &Url, request: &ApiRequest, status: Option<u16>, error: Option<String>) {
        let Ok(mut guard) = self.transcript.lock() else {
            return;
        };
        let sequence = u64::try_from(guard.len()).unwrap_or(u64::MAX).saturating_add(1);
        guard.push(TranscriptEntry {
            sequence,
            method: "GET".to_string(),
            url: url.to_string(),
            authorized: request.is_authorized(),
            content_type: request.content_type.clone(),
            status,
            error,
        });
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Body read failures.
enum BodyError {
    /// Accumulated size in bytes when the limit was crossed.
    TooLarge(usize),
    /// Transport failure while streaming.
    Read(String),
}

/// Reads a response body while enforcing a hard byte limit.
async fn read_body_with_limit(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, BodyError> {
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(|err| BodyError::Read(err.to_string()))?
    {
        let next_total =
            body.len().checked_add(chunk.len()).ok_or(BodyError::TooLarge(usize::MAX))?;
        if next_total > limit {
            return Err(BodyError::TooLarge(next_total));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
