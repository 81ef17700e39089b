// crates/category-probe/src/scenarios/category_params.rs
// ============================================================================
// Module: Category Parameter Scenarios
// Description: Contract checks for GET sale/categories/{id}/parameters.
// Purpose: Cover unknown, unauthorized, and existing parameter lookups.
// Dependencies: category-probe scenario helpers
// ============================================================================

use super::UNKNOWN_CATEGORY_ID;
use super::assertions::ScenarioEvidence;
use super::assertions::ScenarioFailure;
use super::assertions::ScenarioResult;
use super::assertions::decode_body;
use super::assertions::ensure;
use super::assertions::expect_status;
use super::context::ProbeContext;
use super::context::parameters_request;
use crate::model::ParameterList;

/// Parameters for category `0` are a 404; the body is not checked.
pub(super) async fn get_unknown_category_parameters(ctx: &ProbeContext) -> ScenarioResult {
    let response = ctx.send(&ctx.authorize(parameters_request(UNKNOWN_CATEGORY_ID))).await?;
    expect_status(&response, 404)?;
    Ok(ScenarioEvidence::default())
}

/// Parameter lookup without a token is a 401.
pub(super) async fn get_parameters_without_token(ctx: &ProbeContext) -> ScenarioResult {
    let response = ctx.send(&parameters_request(UNKNOWN_CATEGORY_ID)).await?;
    expect_status(&response, 401)?;
    Ok(ScenarioEvidence::default())
}

/// The first listed category exposes at least one parameter.
pub(super) async fn get_existing_category_parameters(ctx: &ProbeContext) -> ScenarioResult {
    let main = ctx.discover_main_categories().await?;
    let category = main
        .categories
        .first()
        .ok_or_else(|| ScenarioFailure::Discovery("main category list is empty".to_string()))?;
    let response = ctx.send(&ctx.authorize(parameters_request(category.id.as_str()))).await?;
    expect_status(&response, 200)?;
    let list: ParameterList = decode_body(&response)?;
    ensure(!list.parameters.is_empty(), || {
        format!("category {} has no parameters", category.id)
    })?;
    let required = list.parameters.iter().filter(|param| param.required == Some(true)).count();
    Ok(ScenarioEvidence::default().note(format!(
        "category {} has {} parameter(s), {required} required",
        category.id,
        list.parameters.len()
    )))
}
