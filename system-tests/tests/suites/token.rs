// system-tests/tests/suites/token.rs
// ============================================================================
// Module: Token Tests
// Description: Client-credentials exchange against the stub.
// Purpose: Validate token acquisition and fail-closed run setup.
// Dependencies: system-tests helpers
// ============================================================================

//! Token acquisition tests for category-probe system-tests.

use category_probe::CategoryApiClient;
use category_probe::Credentials;
use category_probe::ProbeContext;
use category_probe::ProbeError;
use category_probe::ScenarioId;
use category_probe::TokenError;
use category_probe::acquire_token;
use helpers::category_stub::STUB_ACCESS_TOKEN;
use helpers::category_stub::STUB_CLIENT_ID;
use helpers::category_stub::StubFaults;
use helpers::category_stub::spawn_category_stub;
use helpers::category_stub::spawn_category_stub_with_faults;
use helpers::context::STUB_TIMEOUT;
use helpers::context::TokenCache;
use helpers::context::expect_pass;
use tempfile::tempdir;

use crate::helpers;

#[tokio::test(flavor = "multi_thread")]
async fn token_exchange_sends_basic_credentials() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_category_stub()?;
    let credentials = stub.credentials()?;
    let client = CategoryApiClient::new(credentials.api_url().clone(), Some(STUB_TIMEOUT))?;

    let token = acquire_token(&client, &credentials).await?;
    if token.header_value() != format!("Bearer {STUB_ACCESS_TOKEN}") {
        return Err("bearer header does not carry the issued token".into());
    }

    let requests = stub.requests();
    let [request] = requests.as_slice() else {
        return Err(format!("expected one token request, saw {}", requests.len()).into());
    };
    if request.path != "/auth/token" {
        return Err(format!("unexpected token path {}", request.path).into());
    }
    if request.query.as_deref() != Some("grant_type=client_credentials") {
        return Err(format!("unexpected token query {:?}", request.query).into());
    }
    if !request.authorization.as_deref().is_some_and(|value| value.starts_with("Basic ")) {
        return Err("token request must use basic authorization".into());
    }
    if request.content_type.is_some() {
        return Err("token request must not send a content type".into());
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn wrong_secret_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_category_stub()?;
    let credentials =
        Credentials::new(&stub.auth_url(), &stub.api_url(), STUB_CLIENT_ID, "not-the-secret")?;
    let client = CategoryApiClient::new(credentials.api_url().clone(), Some(STUB_TIMEOUT))?;

    match acquire_token(&client, &credentials).await {
        Err(TokenError::Rejected {
            status: 401,
            preview,
        }) if preview.contains("invalid_client") => Ok(()),
        other => Err(format!("expected 401 rejection, got {other:?}").into()),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn token_failure_aborts_before_any_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_category_stub_with_faults(StubFaults {
        reject_credentials: true,
        ..StubFaults::default()
    })?;
    let credentials = stub.credentials()?;

    let result = ProbeContext::establish(&credentials, Some(STUB_TIMEOUT)).await;
    if !matches!(result, Err(ProbeError::Token(TokenError::Rejected { status: 401, .. }))) {
        return Err(format!("expected token rejection, got {result:?}").into());
    }
    let category_calls =
        stub.requests().iter().filter(|request| request.path.starts_with("/api/")).count();
    if category_calls != 0 {
        return Err(format!("{category_calls} category requests sent without a token").into());
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn credentials_file_drives_context_setup() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_category_stub()?;
    let dir = tempdir()?;
    let path = stub.write_credentials_file(dir.path())?;

    let credentials = Credentials::load(&path)?;
    if credentials.client_id() != STUB_CLIENT_ID {
        return Err("credentials file did not round-trip the client id".into());
    }
    let ctx = ProbeContext::establish(&credentials, Some(STUB_TIMEOUT)).await?;
    if ctx.client().transcript().len() != 1 {
        return Err("context setup should issue exactly one request".into());
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn shared_token_is_exchanged_once() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_category_stub()?;
    let credentials = stub.credentials()?;
    let cache = TokenCache::new();

    let first = cache.context(&credentials, Some(STUB_TIMEOUT)).await?;
    let second = cache.context(&credentials, Some(STUB_TIMEOUT)).await?;
    expect_pass(&first, ScenarioId::ListMainCategories).await?;
    expect_pass(&second, ScenarioId::GetExistingCategory).await?;

    let token_calls =
        stub.requests().iter().filter(|request| request.path == "/auth/token").count();
    if token_calls != 1 {
        return Err(format!("expected one token exchange, saw {token_calls}").into());
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn shared_token_failure_is_not_retried() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_category_stub_with_faults(StubFaults {
        reject_credentials: true,
        ..StubFaults::default()
    })?;
    let credentials = stub.credentials()?;
    let cache = TokenCache::new();

    for attempt in 0..2 {
        if cache.context(&credentials, Some(STUB_TIMEOUT)).await.is_ok() {
            return Err(format!("attempt {attempt} built a context without a token").into());
        }
    }
    let requests = stub.requests();
    let token_calls = requests.iter().filter(|request| request.path == "/auth/token").count();
    if token_calls != 1 || requests.len() != 1 {
        return Err(format!("expected a single token exchange, saw {}", requests.len()).into());
    }
    Ok(())
}
