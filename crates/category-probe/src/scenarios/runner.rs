// crates/category-probe/src/scenarios/runner.rs
// ============================================================================
// Module: Scenario Runner
// Description: Dispatch and sequential execution of contract scenarios.
// Purpose: Run scenarios in isolation and fold outcomes into a report.
// Dependencies: tracing
// ============================================================================

use std::time::Instant;

use tracing::Instrument;

use super::assertions::ScenarioResult;
use super::catalog::ScenarioId;
use super::category_by_id;
use super::category_list;
use super::category_params;
use super::context::ProbeContext;
use crate::report::ScenarioOutcome;
use crate::report::SuiteReport;

/// Runs a single scenario.
///
/// # Errors
///
/// Returns [`super::ScenarioFailure`] when the scenario's contract is violated
/// or its exchanges fail.
pub async fn run_scenario(ctx: &ProbeContext, id: ScenarioId) -> ScenarioResult {
    match id {
        ScenarioId::ListMainCategories => category_list::list_main_categories(ctx).await,
        ScenarioId::ListChildrenOfNonLeaf => category_list::list_children_of_non_leaf(ctx).await,
        ScenarioId::ListUnknownParent => category_list::list_unknown_parent(ctx).await,
        ScenarioId::ListWithoutToken => category_list::list_without_token(ctx).await,
        ScenarioId::ListWithInvalidContentType => {
            category_list::list_with_invalid_content_type(ctx).await
        }
        ScenarioId::GetUnknownCategory => category_by_id::get_unknown_category(ctx).await,
        ScenarioId::GetCategoryWithoutToken => {
            category_by_id::get_category_without_token(ctx).await
        }
        ScenarioId::GetOversizedCategoryId => category_by_id::get_oversized_category_id(ctx).await,
        ScenarioId::GetExistingCategory => category_by_id::get_existing_category(ctx).await,
        ScenarioId::GetUnknownCategoryParameters => {
            category_params::get_unknown_category_parameters(ctx).await
        }
        ScenarioId::GetParametersWithoutToken => {
            category_params::get_parameters_without_token(ctx).await
        }
        ScenarioId::GetExistingCategoryParameters => {
            category_params::get_existing_category_parameters(ctx).await
        }
    }
}

/// Runs the selected scenarios in canonical order and collects a report.
///
/// An empty selection runs every scenario. Duplicates run once.
pub async fn run_suite(ctx: &ProbeContext, selection: &[ScenarioId]) -> SuiteReport {
    let mut report = SuiteReport::start();
    let selected = ScenarioId::ALL
        .into_iter()
        .filter(|id| selection.is_empty() || selection.contains(id));
    for id in selected {
        let span = tracing::info_span!("scenario", id = id.as_str(), group = id.group().title());
        let started = Instant::now();
        let result = run_scenario(ctx, id).instrument(span.clone()).await;
        let outcome = ScenarioOutcome::from_result(id, started.elapsed(), result);
        span.in_scope(|| match outcome.detail.as_deref() {
            None => tracing::info!("scenario passed"),
            Some(detail) => tracing::warn!(detail, "scenario failed"),
        });
        report.push(outcome);
    }
    report.finish();
    report
}
