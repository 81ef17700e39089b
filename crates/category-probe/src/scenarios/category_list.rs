// crates/category-probe/src/scenarios/category_list.rs
// ============================================================================
// Module: Category List Scenarios
// Description: Contract checks for GET sale/categories.
// Purpose: Cover listing, parent filtering, auth, and content-type tolerance.
// Dependencies: category-probe scenario helpers
// ============================================================================

use super::UNKNOWN_CATEGORY_ID;
use super::assertions::ScenarioEvidence;
use super::assertions::ScenarioFailure;
use super::assertions::ScenarioResult;
use super::assertions::decode_body;
use super::assertions::ensure;
use super::assertions::expect_error_list;
use super::assertions::expect_status;
use super::context::PARENT_ID_QUERY;
use super::context::ProbeContext;
use super::context::categories_request;
use crate::model::CategoryList;

/// Content type the API must tolerate.
pub const INVALID_CONTENT_TYPE: &str = "incorrect";

/// Main listing returns a non-empty list whose first entry is named.
pub(super) async fn list_main_categories(ctx: &ProbeContext) -> ScenarioResult {
    let response = ctx.send(&ctx.authorize(categories_request())).await?;
    expect_status(&response, 200)?;
    let list: CategoryList = decode_body(&response)?;
    let first = list
        .categories
        .first()
        .ok_or_else(|| ScenarioFailure::Assertion("main category list is empty".to_string()))?;
    ensure(!first.name.is_empty(), || format!("first category {} has an empty name", first.id))?;
    Ok(ScenarioEvidence::default()
        .note(format!("{} main categories listed", list.categories.len()))
        .note(format!("first category: {} ({})", first.name, first.id)))
}

/// Children of the first non-leaf category all point back at it.
pub(super) async fn list_children_of_non_leaf(ctx: &ProbeContext) -> ScenarioResult {
    let main = ctx.discover_main_categories().await?;
    let parent = main.first_with_children().ok_or_else(|| {
        ScenarioFailure::Discovery("no main category is marked non-leaf".to_string())
    })?;
    let request = categories_request().query(PARENT_ID_QUERY, parent.id.as_str());
    let response = ctx.send(&ctx.authorize(request)).await?;
    expect_status(&response, 200)?;
    let children: CategoryList = decode_body(&response)?;
    ensure(!children.categories.is_empty(), || {
        format!("non-leaf category {} has no children", parent.id)
    })?;
    if let Some(stray) =
        children.categories.iter().find(|child| child.parent_id() != Some(&parent.id))
    {
        let actual = stray.parent_id().map_or_else(|| "none".to_string(), ToString::to_string);
        return Err(ScenarioFailure::Assertion(format!(
            "child {} has parent.id {actual}, expected {}",
            stray.id, parent.id
        )));
    }
    Ok(ScenarioEvidence::default().note(format!(
        "{} children of {} ({}) all reference their parent",
        children.categories.len(),
        parent.name,
        parent.id
    )))
}

/// Filtering by a non-existent parent is a 404 with errors.
pub(super) async fn list_unknown_parent(ctx: &ProbeContext) -> ScenarioResult {
    let request = categories_request().query(PARENT_ID_QUERY, UNKNOWN_CATEGORY_ID);
    let response = ctx.send(&ctx.authorize(request)).await?;
    expect_status(&response, 404)?;
    let errors = expect_error_list(&response)?;
    Ok(ScenarioEvidence::default().note(errors.summary()))
}

/// Listing without a token is a 401.
pub(super) async fn list_without_token(ctx: &ProbeContext) -> ScenarioResult {
    let response = ctx.send(&categories_request()).await?;
    expect_status(&response, 401)?;
    Ok(ScenarioEvidence::default())
}

/// A malformed content type does not change the listing outcome.
pub(super) async fn list_with_invalid_content_type(ctx: &ProbeContext) -> ScenarioResult {
    let request = categories_request().content_type(INVALID_CONTENT_TYPE);
    let response = ctx.send(&ctx.authorize(request)).await?;
    expect_status(&response, 200)?;
    let list: CategoryList = decode_body(&response)?;
    ensure(!list.categories.is_empty(), || {
        "main category list is empty with an incorrect content-type".to_string()
    })?;
    Ok(ScenarioEvidence::default()
        .note(format!("{} main categories listed", list.categories.len())))
}
