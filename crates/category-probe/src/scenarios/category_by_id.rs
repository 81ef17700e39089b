// crates/category-probe/src/scenarios/category_by_id.rs
// ============================================================================
// Module: Category By Id Scenarios
// Description: Contract checks for GET sale/categories/{id}.
// Purpose: Cover unknown, unauthorized, oversized, and existing lookups.
// Dependencies: category-probe scenario helpers
// ============================================================================

use super::OVERSIZED_CATEGORY_ID;
use super::UNKNOWN_CATEGORY_ID;
use super::assertions::ScenarioEvidence;
use super::assertions::ScenarioFailure;
use super::assertions::ScenarioResult;
use super::assertions::decode_body;
use super::assertions::ensure;
use super::assertions::expect_error_list;
use super::assertions::expect_status;
use super::context::ProbeContext;
use super::context::category_request;
use crate::model::Category;

/// Category `0` is a 404 with errors.
pub(super) async fn get_unknown_category(ctx: &ProbeContext) -> ScenarioResult {
    let response = ctx.send(&ctx.authorize(category_request(UNKNOWN_CATEGORY_ID))).await?;
    expect_status(&response, 404)?;
    let errors = expect_error_list(&response)?;
    Ok(ScenarioEvidence::default().note(errors.summary()))
}

/// Lookup without a token is a 401.
pub(super) async fn get_category_without_token(ctx: &ProbeContext) -> ScenarioResult {
    let response = ctx.send(&category_request(UNKNOWN_CATEGORY_ID)).await?;
    expect_status(&response, 401)?;
    Ok(ScenarioEvidence::default())
}

/// An id beyond 64-bit range is a 404, not a server error.
pub(super) async fn get_oversized_category_id(ctx: &ProbeContext) -> ScenarioResult {
    let response = ctx.send(&ctx.authorize(category_request(OVERSIZED_CATEGORY_ID))).await?;
    expect_status(&response, 404)?;
    let errors = expect_error_list(&response)?;
    Ok(ScenarioEvidence::default().note(errors.summary()))
}

/// The first listed category round-trips through the by-id endpoint.
pub(super) async fn get_existing_category(ctx: &ProbeContext) -> ScenarioResult {
    let main = ctx.discover_main_categories().await?;
    let requested = main
        .categories
        .first()
        .map(|category| category.id.clone())
        .ok_or_else(|| ScenarioFailure::Discovery("main category list is empty".to_string()))?;
    let response = ctx.send(&ctx.authorize(category_request(requested.as_str()))).await?;
    expect_status(&response, 200)?;
    let category: Category = decode_body(&response)?;
    ensure(category.id == requested, || {
        format!("requested category {requested}, received {}", category.id)
    })?;
    Ok(ScenarioEvidence::default().note(format!("category {} ({})", category.name, category.id)))
}
