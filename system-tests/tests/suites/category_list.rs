// system-tests/tests/suites/category_list.rs
// ============================================================================
// Module: Category List Tests
// Description: Listing scenarios against the category stub.
// Purpose: Validate listing checks and the requests they send.
// Dependencies: system-tests helpers
// ============================================================================

//! Category listing tests for category-probe system-tests.

use category_probe::ScenarioId;
use category_probe::client::DEFAULT_CONTENT_TYPE;
use category_probe::scenarios::INVALID_CONTENT_TYPE;
use category_probe::scenarios::ScenarioFailure;
use helpers::category_stub::FIRST_MAIN_ID;
use helpers::category_stub::FIRST_PARENT_ID;
use helpers::category_stub::StubFaults;
use helpers::category_stub::spawn_category_stub;
use helpers::category_stub::spawn_category_stub_with_faults;
use helpers::context::expect_fail;
use helpers::context::expect_pass;
use helpers::context::stub_context;

use crate::helpers;

#[tokio::test(flavor = "multi_thread")]
async fn listing_scenarios_pass_against_conforming_stub() -> Result<(), Box<dyn std::error::Error>>
{
    let stub = spawn_category_stub()?;
    let ctx = stub_context(&stub).await?;
    for id in [
        ScenarioId::ListMainCategories,
        ScenarioId::ListChildrenOfNonLeaf,
        ScenarioId::ListUnknownParent,
        ScenarioId::ListWithoutToken,
        ScenarioId::ListWithInvalidContentType,
    ] {
        expect_pass(&ctx, id).await?;
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn children_are_requested_for_first_non_leaf() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_category_stub()?;
    let ctx = stub_context(&stub).await?;
    expect_pass(&ctx, ScenarioId::ListChildrenOfNonLeaf).await?;

    let expected_query = format!("parent.id={FIRST_PARENT_ID}");
    let filtered: Vec<_> = stub
        .requests()
        .into_iter()
        .filter(|request| request.path == "/api/sale/categories" && request.query.is_some())
        .collect();
    let [request] = filtered.as_slice() else {
        return Err(format!("expected one filtered listing, saw {}", filtered.len()).into());
    };
    if request.query.as_deref() != Some(expected_query.as_str()) {
        return Err(format!("unexpected parent filter {:?}", request.query).into());
    }
    if request.content_type.as_deref() != Some(DEFAULT_CONTENT_TYPE) {
        return Err("filtered listing must send the vendor content type".into());
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unauthenticated_listing_sends_no_authorization() -> Result<(), Box<dyn std::error::Error>>
{
    let stub = spawn_category_stub()?;
    let ctx = stub_context(&stub).await?;
    expect_pass(&ctx, ScenarioId::ListWithoutToken).await?;

    let requests = stub.requests();
    let last = requests.last().ok_or("no request captured")?;
    if last.authorization.is_some() {
        return Err("unauthenticated listing leaked an authorization header".into());
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_content_type_is_sent_verbatim() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_category_stub()?;
    let ctx = stub_context(&stub).await?;
    expect_pass(&ctx, ScenarioId::ListWithInvalidContentType).await?;

    let requests = stub.requests();
    let last = requests.last().ok_or("no request captured")?;
    if last.content_type.as_deref() != Some(INVALID_CONTENT_TYPE) {
        return Err(format!("unexpected content type {:?}", last.content_type).into());
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn stray_child_parent_fails_children_check() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_category_stub_with_faults(StubFaults {
        wrong_child_parent: true,
        ..StubFaults::default()
    })?;
    let ctx = stub_context(&stub).await?;

    let failure = expect_fail(&ctx, ScenarioId::ListChildrenOfNonLeaf).await?;
    let ScenarioFailure::Assertion(message) = &failure else {
        return Err(format!("expected assertion failure, got {failure}").into());
    };
    if !message.contains(FIRST_PARENT_ID) || !message.contains("11763") {
        return Err(format!("failure does not name both parent ids: {message}").into());
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_non_leaf_category_is_a_discovery_failure()
-> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_category_stub_with_faults(StubFaults {
        no_parent_categories: true,
        ..StubFaults::default()
    })?;
    let ctx = stub_context(&stub).await?;

    let failure = expect_fail(&ctx, ScenarioId::ListChildrenOfNonLeaf).await?;
    if !matches!(failure, ScenarioFailure::Discovery(_)) {
        return Err(format!("expected discovery failure, got {failure}").into());
    }
    expect_pass(&ctx, ScenarioId::ListMainCategories).await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_content_type_fails_tolerance_check() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_category_stub_with_faults(StubFaults {
        strict_content_type: true,
        ..StubFaults::default()
    })?;
    let ctx = stub_context(&stub).await?;

    let failure = expect_fail(&ctx, ScenarioId::ListWithInvalidContentType).await?;
    if !matches!(failure, ScenarioFailure::UnexpectedStatus { expected: 200, actual: 415, .. }) {
        return Err(format!("expected 200/415 status mismatch, got {failure}").into());
    }
    expect_pass(&ctx, ScenarioId::ListMainCategories).await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn anonymous_listing_fails_token_check() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_category_stub_with_faults(StubFaults {
        allow_anonymous: true,
        ..StubFaults::default()
    })?;
    let ctx = stub_context(&stub).await?;

    let failure = expect_fail(&ctx, ScenarioId::ListWithoutToken).await?;
    if !matches!(failure, ScenarioFailure::UnexpectedStatus { expected: 401, actual: 200, .. }) {
        return Err(format!("expected 401/200 status mismatch, got {failure}").into());
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_main_listing_fails_listing_and_discovery() -> Result<(), Box<dyn std::error::Error>>
{
    let stub = spawn_category_stub_with_faults(StubFaults {
        empty_main_listing: true,
        ..StubFaults::default()
    })?;
    let ctx = stub_context(&stub).await?;

    for id in [ScenarioId::ListMainCategories, ScenarioId::ListWithInvalidContentType] {
        let failure = expect_fail(&ctx, id).await?;
        if !matches!(failure, ScenarioFailure::Assertion(_)) {
            return Err(format!("{id}: expected assertion failure, got {failure}").into());
        }
    }
    for id in [
        ScenarioId::ListChildrenOfNonLeaf,
        ScenarioId::GetExistingCategory,
        ScenarioId::GetExistingCategoryParameters,
    ] {
        let failure = expect_fail(&ctx, id).await?;
        if !matches!(failure, ScenarioFailure::Discovery(_)) {
            return Err(format!("{id}: expected discovery failure, got {failure}").into());
        }
    }
    expect_pass(&ctx, ScenarioId::ListUnknownParent).await?;
    expect_pass(&ctx, ScenarioId::ListWithoutToken).await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unnamed_first_category_fails_main_listing() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_category_stub_with_faults(StubFaults {
        unnamed_first_category: true,
        ..StubFaults::default()
    })?;
    let ctx = stub_context(&stub).await?;

    let failure = expect_fail(&ctx, ScenarioId::ListMainCategories).await?;
    let ScenarioFailure::Assertion(message) = &failure else {
        return Err(format!("expected assertion failure, got {failure}").into());
    };
    if !message.contains(FIRST_MAIN_ID) {
        return Err(format!("failure does not name the unnamed category: {message}").into());
    }
    expect_pass(&ctx, ScenarioId::ListWithInvalidContentType).await?;
    expect_pass(&ctx, ScenarioId::GetExistingCategory).await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn childless_parent_fails_children_check() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_category_stub_with_faults(StubFaults {
        childless_parent: true,
        ..StubFaults::default()
    })?;
    let ctx = stub_context(&stub).await?;

    let failure = expect_fail(&ctx, ScenarioId::ListChildrenOfNonLeaf).await?;
    let ScenarioFailure::Assertion(message) = &failure else {
        return Err(format!("expected assertion failure, got {failure}").into());
    };
    if !message.contains(FIRST_PARENT_ID) {
        return Err(format!("failure does not name the childless parent: {message}").into());
    }
    expect_pass(&ctx, ScenarioId::ListMainCategories).await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_error_list_fails_unknown_parent_check() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_category_stub_with_faults(StubFaults {
        empty_errors: true,
        ..StubFaults::default()
    })?;
    let ctx = stub_context(&stub).await?;

    let failure = expect_fail(&ctx, ScenarioId::ListUnknownParent).await?;
    if !matches!(failure, ScenarioFailure::Assertion(_)) {
        return Err(format!("expected assertion failure, got {failure}").into());
    }
    expect_pass(&ctx, ScenarioId::ListMainCategories).await?;
    Ok(())
}
