// crates/category-probe/src/scenarios/context.rs
// ============================================================================
// Module: Probe Context
// Description: Immutable run context shared by every scenario.
// Purpose: Carry the client and token, and build endpoint requests.
// Dependencies: category-probe client/auth
// ============================================================================

use std::time::Duration;

use super::assertions::ScenarioFailure;
use super::assertions::decode_body;
use crate::auth::AccessToken;
use crate::auth::acquire_token;
use crate::client::ApiRequest;
use crate::client::ApiResponse;
use crate::client::CategoryApiClient;
use crate::client::ClientError;
use crate::credentials::Credentials;
use crate::error::ProbeError;
use crate::model::CategoryList;

/// Query key used to filter listings by parent.
pub const PARENT_ID_QUERY: &str = "parent.id";

/// Run context: the API client plus the token acquired during setup.
///
/// # Invariants
/// - The token is acquired before the context exists and never changes.
#[derive(Debug, Clone)]
pub struct ProbeContext {
    /// Client bound to the category API.
    client: CategoryApiClient,
    /// Bearer token for authorized requests.
    token: AccessToken,
}

impl ProbeContext {
    /// Builds a context from an existing client and token.
    #[must_use]
    pub const fn new(client: CategoryApiClient, token: AccessToken) -> Self {
        Self {
            client,
            token,
        }
    }

    /// Builds the client and acquires the run's token.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] when the client cannot be built or the token
    /// exchange fails.
    pub async fn establish(
        credentials: &Credentials,
        timeout: Option<Duration>,
    ) -> Result<Self, ProbeError> {
        let client = CategoryApiClient::new(credentials.api_url().clone(), timeout)?;
        let token = acquire_token(&client, credentials).await?;
        Ok(Self::new(client, token))
    }

    /// Returns the API client.
    #[must_use]
    pub const fn client(&self) -> &CategoryApiClient {
        &self.client
    }

    /// Adds the run's bearer token to a request.
    #[must_use]
    pub fn authorize(&self, request: ApiRequest) -> ApiRequest {
        request.authorization(self.token.header_value())
    }

    /// Sends a request as-is.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the exchange fails.
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ClientError> {
        self.client.send(request).await
    }

    /// Issues a fresh authorized main listing for id discovery.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioFailure::Discovery`] when the listing does not yield a
    /// category list.
    pub async fn discover_main_categories(&self) -> Result<CategoryList, ScenarioFailure> {
        let response = self.send(&self.authorize(categories_request())).await?;
        decode_body::<CategoryList>(&response).map_err(|err| {
            ScenarioFailure::Discovery(format!(
                "main listing returned http {} without categories: {err}",
                response.status()
            ))
        })
    }
}

/// `GET sale/categories`.
#[must_use]
pub fn categories_request() -> ApiRequest {
    ApiRequest::get(["sale", "categories"])
}

/// `GET sale/categories/{id}`.
#[must_use]
pub fn category_request(id: &str) -> ApiRequest {
    ApiRequest::get(["sale", "categories", id])
}

/// `GET sale/categories/{id}/parameters`.
#[must_use]
pub fn parameters_request(id: &str) -> ApiRequest {
    ApiRequest::get(["sale", "categories", id, "parameters"])
}
