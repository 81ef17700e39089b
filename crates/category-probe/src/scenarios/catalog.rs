// crates/category-probe/src/scenarios/catalog.rs
// ============================================================================
// Module: Scenario Catalog
// Description: Stable identifiers, groups, and descriptions for scenarios.
// Purpose: Define the fixed, ordered contract scenario list.
// Dependencies: serde, thiserror
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Endpoint group a scenario belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioGroup {
    /// `GET sale/categories`.
    CategoryList,
    /// `GET sale/categories/{id}`.
    CategoryById,
    /// `GET sale/categories/{id}/parameters`.
    CategoryParams,
}

impl ScenarioGroup {
    /// Returns a human-readable group title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::CategoryList => "Category List",
            Self::CategoryById => "Category by ID",
            Self::CategoryParams => "Category Params",
        }
    }
}

/// Contract scenario identifiers in canonical execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioId {
    /// Main listing returns named categories.
    ListMainCategories,
    /// Listing filtered by a non-leaf parent returns only its children.
    ListChildrenOfNonLeaf,
    /// Listing filtered by parent `0` is a 404 with errors.
    ListUnknownParent,
    /// Listing without a token is a 401.
    ListWithoutToken,
    /// Listing with a malformed content type still succeeds.
    ListWithInvalidContentType,
    /// Category `0` is a 404 with errors.
    GetUnknownCategory,
    /// Category lookup without a token is a 401.
    GetCategoryWithoutToken,
    /// A 21-digit category id is a 404 with errors.
    GetOversizedCategoryId,
    /// A listed category is returned by id.
    GetExistingCategory,
    /// Parameters for category `0` are a 404.
    GetUnknownCategoryParameters,
    /// Parameters lookup without a token is a 401.
    GetParametersWithoutToken,
    /// A listed category has parameters.
    GetExistingCategoryParameters,
}

impl ScenarioId {
    /// Every scenario in canonical order.
    pub const ALL: [Self; 12] = [
        Self::ListMainCategories,
        Self::ListChildrenOfNonLeaf,
        Self::ListUnknownParent,
        Self::ListWithoutToken,
        Self::ListWithInvalidContentType,
        Self::GetUnknownCategory,
        Self::GetCategoryWithoutToken,
        Self::GetOversizedCategoryId,
        Self::GetExistingCategory,
        Self::GetUnknownCategoryParameters,
        Self::GetParametersWithoutToken,
        Self::GetExistingCategoryParameters,
    ];

    /// Returns the stable snake-case identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListMainCategories => "list_main_categories",
            Self::ListChildrenOfNonLeaf => "list_children_of_non_leaf",
            Self::ListUnknownParent => "list_unknown_parent",
            Self::ListWithoutToken => "list_without_token",
            Self::ListWithInvalidContentType => "list_with_invalid_content_type",
            Self::GetUnknownCategory => "get_unknown_category",
            Self::GetCategoryWithoutToken => "get_category_without_token",
            Self::GetOversizedCategoryId => "get_oversized_category_id",
            Self::GetExistingCategory => "get_existing_category",
            Self::GetUnknownCategoryParameters => "get_unknown_category_parameters",
            Self::GetParametersWithoutToken => "get_parameters_without_token",
            Self::GetExistingCategoryParameters => "get_existing_category_parameters",
        }
    }

    /// Returns the endpoint group.
    #[must_use]
    pub const fn group(self) -> ScenarioGroup {
        match self {
            Self::ListMainCategories
            | Self::ListChildrenOfNonLeaf
            | Self::ListUnknownParent
            | Self::ListWithoutToken
            | Self::ListWithInvalidContentType => ScenarioGroup::CategoryList,
            Self::GetUnknownCategory
            | Self::GetCategoryWithoutToken
            | Self::GetOversizedCategoryId
            | Self::GetExistingCategory => ScenarioGroup::CategoryById,
            Self::GetUnknownCategoryParameters
            | Self::GetParametersWithoutToken
            | Self::GetExistingCategoryParameters => ScenarioGroup::CategoryParams,
        }
    }

    /// Returns a one-line description of the contract checked.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ListMainCategories => "GET sale/categories returns all main categories",
            Self::ListChildrenOfNonLeaf => {
                "GET sale/categories?parent.id for a non-leaf category returns its children"
            }
            Self::ListUnknownParent => "GET sale/categories?parent.id=0 returns 404 with errors",
            Self::ListWithoutToken => "GET sale/categories without access token returns 401",
            Self::ListWithInvalidContentType => {
                "GET sale/categories with incorrect content-type still returns 200"
            }
            Self::GetUnknownCategory => "GET sale/categories/0 returns 404 with errors",
            Self::GetCategoryWithoutToken => {
                "GET sale/categories/{id} without access token returns 401"
            }
            Self::GetOversizedCategoryId => {
                "GET sale/categories/{id} with an id too large for an integer returns 404"
            }
            Self::GetExistingCategory => {
                "GET sale/categories/{id} for an existing category returns that category"
            }
            Self::GetUnknownCategoryParameters => "GET sale/categories/0/parameters returns 404",
            Self::GetParametersWithoutToken => {
                "GET sale/categories/{id}/parameters without access token returns 401"
            }
            Self::GetExistingCategoryParameters => {
                "GET sale/categories/{id}/parameters for an existing category returns parameters"
            }
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown scenario identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scenario `{0}`")]
pub struct UnknownScenario(pub String);

impl FromStr for ScenarioId {
    type Err = UnknownScenario;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == raw)
            .ok_or_else(|| UnknownScenario(raw.to_string()))
    }
}
