//! Rule configuration for the conformance cascade.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Column names used to read conformance rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    /// Column holding the raw conformance text (e.g. "Conformance").
    pub mandatory_optional_column: String,
}

/// Flags and literals controlling which cascade stages are active.
///
/// Every field is optional in the source document: booleans default to
/// `false` and `direct_values` to an empty set. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub column_mapping: ColumnMapping,

    /// Literals returned unchanged (typically `M` and `O`).
    pub direct_values: BTreeSet<String>,

    /// Resolve `"<scope>: (<a> & <b>)"` groups and strip parenthetical
    /// comments before the remaining stages run.
    pub remove_suffix_in_brackets: bool,

    /// Accept `"<scope>: M"` when the scope is registered.
    pub server_client_prefix_handling: bool,

    /// Resolve `"<scope>: <feature>"` through the feature catalog.
    pub feature_mapping_handling: bool,
}

impl RuleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration with every stage enabled and `M`/`O` as direct values.
    pub fn standard(column: impl Into<String>) -> Self {
        Self {
            column_mapping: ColumnMapping {
                mandatory_optional_column: column.into(),
            },
            direct_values: ["M", "O"].into_iter().map(String::from).collect(),
            remove_suffix_in_brackets: true,
            server_client_prefix_handling: true,
            feature_mapping_handling: true,
        }
    }

    pub fn with_direct_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.direct_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_remove_suffix_in_brackets(mut self, enable: bool) -> Self {
        self.remove_suffix_in_brackets = enable;
        self
    }

    pub fn with_server_client_prefix_handling(mut self, enable: bool) -> Self {
        self.server_client_prefix_handling = enable;
        self
    }

    pub fn with_feature_mapping_handling(mut self, enable: bool) -> Self {
        self.feature_mapping_handling = enable;
        self
    }

    pub fn with_conformance_column(mut self, column: impl Into<String>) -> Self {
        self.column_mapping.mandatory_optional_column = column.into();
        self
    }

    pub fn is_direct_value(&self, text: &str) -> bool {
        self.direct_values.contains(text)
    }

    pub fn conformance_column(&self) -> &str {
        &self.column_mapping.mandatory_optional_column
    }

    /// Check the settings needed to read rows from a sheet.
    pub fn validate(&self) -> Result<()> {
        if self.conformance_column().trim().is_empty() {
            return Err(ModelError::MissingConformanceColumn);
        }
        if self.direct_values.iter().any(|value| value.trim().is_empty()) {
            return Err(ModelError::BlankDirectValue);
        }
        Ok(())
    }
}
