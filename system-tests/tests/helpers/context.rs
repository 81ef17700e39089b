// system-tests/tests/helpers/context.rs
// ============================================================================
// Module: Context Helpers
// Description: Context setup against the stub or the live API.
// Purpose: Keep suite bodies focused on scenario outcomes.
// Dependencies: category-probe, system-tests, tokio
// ============================================================================

use std::time::Duration;

use category_probe::AccessToken;
use category_probe::CategoryApiClient;
use category_probe::Credentials;
use category_probe::ProbeContext;
use category_probe::ScenarioId;
use category_probe::acquire_token;
use category_probe::run_scenario;
use category_probe::scenarios::ScenarioFailure;
use system_tests::config::SystemTestConfig;
use tokio::sync::OnceCell;

use super::category_stub::CategoryStubHandle;

/// Request timeout used against the stub.
pub const STUB_TIMEOUT: Duration = Duration::from_secs(5);

/// Token shared by every live test in the binary.
static LIVE_TOKEN: TokenCache = TokenCache::new();

/// One token exchange shared by many contexts.
///
/// # Invariants
/// - The exchange runs at most once; a failure is cached like a success.
/// - Each context gets its own client so no connection pool outlives the
///   runtime that created it.
pub struct TokenCache {
    /// Outcome of the single exchange.
    cell: OnceCell<Result<AccessToken, String>>,
}

impl TokenCache {
    /// Creates an empty cache.
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::const_new(),
        }
    }

    /// Builds a context, exchanging credentials only on first use.
    pub async fn context(
        &self,
        credentials: &Credentials,
        timeout: Option<Duration>,
    ) -> Result<ProbeContext, Box<dyn std::error::Error>> {
        let token = self
            .cell
            .get_or_init(|| async {
                let client = CategoryApiClient::new(credentials.api_url().clone(), timeout)
                    .map_err(|err| err.to_string())?;
                acquire_token(&client, credentials).await.map_err(|err| err.to_string())
            })
            .await
            .clone()
            .map_err(|err| format!("token exchange failed: {err}"))?;
        let client = CategoryApiClient::new(credentials.api_url().clone(), timeout)?;
        Ok(ProbeContext::new(client, token))
    }
}

/// Establishes a context against a running stub.
pub async fn stub_context(
    stub: &CategoryStubHandle,
) -> Result<ProbeContext, Box<dyn std::error::Error>> {
    let credentials = stub.credentials()?;
    Ok(ProbeContext::establish(&credentials, Some(STUB_TIMEOUT)).await?)
}

/// Returns a context against the live API named by the credentials file.
///
/// All live tests share one token.
pub async fn live_context() -> Result<ProbeContext, Box<dyn std::error::Error>> {
    let config = SystemTestConfig::load()?;
    let credentials = Credentials::load(&config.live_credentials_or_default())?;
    LIVE_TOKEN.context(&credentials, config.timeout).await
}

/// Runs one scenario and converts a failure into a test error.
pub async fn expect_pass(
    ctx: &ProbeContext,
    id: ScenarioId,
) -> Result<(), Box<dyn std::error::Error>> {
    run_scenario(ctx, id).await.map_err(|err| format!("{id} failed: {err}"))?;
    Ok(())
}

/// Runs one scenario and returns its failure, erroring if it passed.
pub async fn expect_fail(
    ctx: &ProbeContext,
    id: ScenarioId,
) -> Result<ScenarioFailure, Box<dyn std::error::Error>> {
    match run_scenario(ctx, id).await {
        Ok(_) => Err(format!("{id} passed against a faulty stub").into()),
        Err(failure) => Ok(failure),
    }
}
