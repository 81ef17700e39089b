// system-tests/tests/suites/category_by_id.rs
// ============================================================================
// Module: Category By Id Tests
// Description: Single-category lookup scenarios against the stub.
// Purpose: Validate lookup checks for unknown, oversized, and listed ids.
// Dependencies: system-tests helpers
// ============================================================================

//! Category lookup tests for category-probe system-tests.

use category_probe::ScenarioId;
use category_probe::scenarios::OVERSIZED_CATEGORY_ID;
use category_probe::scenarios::ScenarioFailure;
use helpers::category_stub::FIRST_MAIN_ID;
use helpers::category_stub::StubFaults;
use helpers::category_stub::spawn_category_stub;
use helpers::category_stub::spawn_category_stub_with_faults;
use helpers::context::expect_fail;
use helpers::context::expect_pass;
use helpers::context::stub_context;

use crate::helpers;

#[tokio::test(flavor = "multi_thread")]
async fn lookup_scenarios_pass_against_conforming_stub() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_category_stub()?;
    let ctx = stub_context(&stub).await?;
    for id in [
        ScenarioId::GetUnknownCategory,
        ScenarioId::GetCategoryWithoutToken,
        ScenarioId::GetOversizedCategoryId,
        ScenarioId::GetExistingCategory,
    ] {
        expect_pass(&ctx, id).await?;
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn existing_lookup_uses_first_listed_id() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_category_stub()?;
    let ctx = stub_context(&stub).await?;
    expect_pass(&ctx, ScenarioId::GetExistingCategory).await?;

    let requests = stub.requests();
    let discovery = requests.iter().position(|request| request.is_main_listing());
    let lookup_path = format!("/api/sale/categories/{FIRST_MAIN_ID}");
    let lookup = requests.iter().position(|request| request.path == lookup_path);
    match (discovery, lookup) {
        (Some(discovery), Some(lookup)) if discovery < lookup => Ok(()),
        _ => Err("lookup must follow a fresh main listing and target its first id".into()),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn oversized_id_reaches_server_unaltered() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_category_stub()?;
    let ctx = stub_context(&stub).await?;
    expect_pass(&ctx, ScenarioId::GetOversizedCategoryId).await?;

    let expected = format!("/api/sale/categories/{OVERSIZED_CATEGORY_ID}");
    if !stub.requests().iter().any(|request| request.path == expected) {
        return Err("oversized id was not sent verbatim".into());
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn overflow_server_error_fails_oversized_check() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_category_stub_with_faults(StubFaults {
        overflow_server_error: true,
        ..StubFaults::default()
    })?;
    let ctx = stub_context(&stub).await?;

    let failure = expect_fail(&ctx, ScenarioId::GetOversizedCategoryId).await?;
    if !matches!(failure, ScenarioFailure::UnexpectedStatus { expected: 404, actual: 500, .. }) {
        return Err(format!("expected 404/500 status mismatch, got {failure}").into());
    }
    expect_pass(&ctx, ScenarioId::GetUnknownCategory).await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn anonymous_lookup_fails_token_check() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_category_stub_with_faults(StubFaults {
        allow_anonymous: true,
        ..StubFaults::default()
    })?;
    let ctx = stub_context(&stub).await?;

    let failure = expect_fail(&ctx, ScenarioId::GetCategoryWithoutToken).await?;
    if !matches!(failure, ScenarioFailure::UnexpectedStatus { expected: 401, actual: 404, .. }) {
        return Err(format!("expected 401/404 status mismatch, got {failure}").into());
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_error_lists_fail_not_found_checks() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_category_stub_with_faults(StubFaults {
        empty_errors: true,
        ..StubFaults::default()
    })?;
    let ctx = stub_context(&stub).await?;

    for id in [ScenarioId::GetUnknownCategory, ScenarioId::GetOversizedCategoryId] {
        let failure = expect_fail(&ctx, id).await?;
        if !matches!(failure, ScenarioFailure::Assertion(_)) {
            return Err(format!("{id}: expected assertion failure, got {failure}").into());
        }
    }
    // Parameter 404 bodies are not inspected.
    expect_pass(&ctx, ScenarioId::GetUnknownCategoryParameters).await?;
    expect_pass(&ctx, ScenarioId::GetExistingCategory).await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn structured_error_entries_pass_not_found_checks() -> Result<(), Box<dyn std::error::Error>>
{
    let stub = spawn_category_stub_with_faults(StubFaults {
        structured_error_details: true,
        ..StubFaults::default()
    })?;
    let ctx = stub_context(&stub).await?;

    for id in [
        ScenarioId::ListUnknownParent,
        ScenarioId::GetUnknownCategory,
        ScenarioId::GetOversizedCategoryId,
    ] {
        expect_pass(&ctx, id).await?;
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn mismatched_lookup_id_fails_existing_check() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_category_stub_with_faults(StubFaults {
        mismatched_lookup_id: true,
        ..StubFaults::default()
    })?;
    let ctx = stub_context(&stub).await?;

    let failure = expect_fail(&ctx, ScenarioId::GetExistingCategory).await?;
    let ScenarioFailure::Assertion(message) = &failure else {
        return Err(format!("expected assertion failure, got {failure}").into());
    };
    if !message.contains(FIRST_MAIN_ID) || !message.contains("99999") {
        return Err(format!("failure does not name both ids: {message}").into());
    }
    expect_pass(&ctx, ScenarioId::ListMainCategories).await?;
    Ok(())
}
