// crates/category-probe/src/scenarios/mod.rs
// ============================================================================
// Module: Contract Scenarios
// Description: Fixed, ordered contract scenarios and their runner.
// Purpose: Execute each scenario in isolation and collect a suite report.
// Dependencies: tracing, category-probe client/report
// ============================================================================

//! ## Overview
//! Every scenario takes the immutable [`ProbeContext`] by reference and
//! returns its own result. Scenarios that need a real category id re-issue
//! the main listing themselves, so no scenario depends on another having run.
//!
//! Invariants:
//! - A failing scenario never prevents the remaining scenarios from running.
//! - Scenarios run sequentially in [`ScenarioId::ALL`] order.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod assertions;
mod catalog;
mod category_by_id;
mod category_list;
mod category_params;
mod context;
mod runner;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Identifier that never names a category.
pub const UNKNOWN_CATEGORY_ID: &str = "0";

/// 21-digit identifier that does not fit a 64-bit integer.
pub const OVERSIZED_CATEGORY_ID: &str = "100000000000000000000";

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use assertions::ScenarioEvidence;
pub use assertions::ScenarioFailure;
pub use assertions::ScenarioResult;
pub use assertions::decode_body;
pub use assertions::ensure;
pub use assertions::expect_error_list;
pub use assertions::expect_status;
pub use catalog::ScenarioGroup;
pub use catalog::ScenarioId;
pub use catalog::UnknownScenario;
pub use category_list::INVALID_CONTENT_TYPE;
pub use context::PARENT_ID_QUERY;
pub use context::ProbeContext;
pub use context::categories_request;
pub use context::category_request;
pub use context::parameters_request;
pub use runner::run_scenario;
pub use runner::run_suite;
