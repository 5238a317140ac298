//! Board behaviour configuration.

use crate::board::domain::ColumnDeletePolicy;
use serde::Deserialize;

/// Tunable limits and policies applied by the board service.
///
/// Every field has a default, so partial configuration documents are
/// accepted.
///
/// # Examples
///
/// ```
/// use blitztask::board::config::BoardConfig;
/// use blitztask::board::domain::ColumnDeletePolicy;
///
/// let config = BoardConfig::default();
/// assert_eq!(config.column_delete_policy, ColumnDeletePolicy::Cascade);
///
/// let parsed = BoardConfig::from_json_str(r#"{"max_labels": 5}"#).expect("valid config");
/// assert_eq!(parsed.max_labels, 5);
/// assert_eq!(parsed.max_title_length, 200);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// What happens to a column's tasks when the column is deleted.
    pub column_delete_policy: ColumnDeletePolicy,
    /// Maximum task and column title length in characters.
    pub max_title_length: usize,
    /// Maximum task description length in characters.
    pub max_description_length: usize,
    /// Maximum number of labels on one task.
    pub max_labels: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            column_delete_policy: ColumnDeletePolicy::Cascade,
            max_title_length: 200,
            max_description_length: 10_000,
            max_labels: 20,
        }
    }
}

impl BoardConfig {
    /// Creates a strict configuration: non-empty columns cannot be deleted
    /// and field limits are tighter.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            column_delete_policy: ColumnDeletePolicy::RejectNonEmpty,
            max_title_length: 80,
            max_description_length: 2_000,
            max_labels: 5,
        }
    }

    /// Returns a copy with a different deletion policy.
    #[must_use]
    pub const fn with_column_delete_policy(mut self, policy: ColumnDeletePolicy) -> Self {
        self.column_delete_policy = policy;
        self
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] when the document is malformed or a
    /// field has the wrong type.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
