// crates/category-probe/src/model.rs
// ============================================================================
// Module: Category API Model
// Description: Read-only payload shapes for the sale-category endpoints.
// Purpose: Decode category, parameter, and error bodies from untrusted JSON.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The probe never owns or mutates remote entities; these types only decode
//! what the API returns. Unknown fields are ignored so additive API changes do
//! not break the contract checks.

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Opaque category identifier.
///
/// # Invariants
/// - Compared textually; JSON numbers are normalized to their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    /// Creates an identifier from its textual form.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the textual identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CategoryId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        /// Wire forms accepted for identifiers.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            /// String identifier.
            Text(String),
            /// Numeric identifier.
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        })
    }
}

// ============================================================================
// SECTION: Categories
// ============================================================================

/// Reference to a parent category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParentRef {
    /// Parent identifier.
    pub id: CategoryId,
}

/// A sale category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    /// Category identifier.
    pub id: CategoryId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Leaf flag; absent when the API omits it.
    #[serde(default)]
    pub leaf: Option<bool>,
    /// Parent reference; `None` for main categories.
    #[serde(default)]
    pub parent: Option<ParentRef>,
}

impl Category {
    /// Returns true only when the API explicitly marks the category non-leaf.
    #[must_use]
    pub fn has_children(&self) -> bool {
        self.leaf == Some(false)
    }

    /// Returns the parent identifier, if any.
    #[must_use]
    pub fn parent_id(&self) -> Option<&CategoryId> {
        self.parent.as_ref().map(|parent| &parent.id)
    }
}

/// Body of `GET sale/categories`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CategoryList {
    /// Returned categories.
    pub categories: Vec<Category>,
}

impl CategoryList {
    /// Returns the first category marked non-leaf.
    #[must_use]
    pub fn first_with_children(&self) -> Option<&Category> {
        self.categories.iter().find(|category| category.has_children())
    }
}

// ============================================================================
// SECTION: Parameters
// ============================================================================

/// A parameter definition attached to a category.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CategoryParameter {
    /// Parameter identifier.
    pub id: CategoryId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Value type label (`dictionary`, `integer`, ...).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Whether the parameter is mandatory for offers.
    #[serde(default)]
    pub required: Option<bool>,
}

/// Body of `GET sale/categories/{id}/parameters`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ParameterList {
    /// Returned parameters.
    pub parameters: Vec<CategoryParameter>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Typed view of one error entry, used for reporting only.
///
/// `code`, `details`, and `path` are kept as raw JSON because the API does
/// not pin their types.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorEntry {
    /// Machine-readable error code.
    #[serde(default)]
    pub code: Option<Value>,
    /// Developer-facing message.
    #[serde(default)]
    pub message: Option<String>,
    /// Additional details.
    #[serde(default)]
    pub details: Option<Value>,
    /// Request path the error refers to.
    #[serde(default)]
    pub path: Option<Value>,
    /// End-user-facing message.
    #[serde(default)]
    pub user_message: Option<String>,
}

/// Body returned with non-2xx statuses.
///
/// # Invariants
/// - Entries are counted as-is; their shape never fails the decode.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorList {
    /// Reported errors, undecoded.
    pub errors: Vec<Value>,
}

impl ErrorList {
    /// Returns the entries that fit [`ApiErrorEntry`]; others are skipped.
    pub fn entries(&self) -> impl Iterator<Item = ApiErrorEntry> + '_ {
        self.errors.iter().filter_map(|raw| ApiErrorEntry::deserialize(raw).ok())
    }

    /// Summarizes the list for scenario notes.
    #[must_use]
    pub fn summary(&self) -> String {
        let count = self.errors.len();
        let first = self.entries().find_map(|entry| entry.user_message.or(entry.message));
        match first {
            Some(message) => format!("{count} error(s) reported, first: {message}"),
            None => format!("{count} error(s) reported"),
        }
    }
}
