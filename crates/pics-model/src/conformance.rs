use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::scope_prefix_of;

/// The `Variable` column of the row being resolved.
///
/// Only the `Cluster.Role` prefix is used, to pick between features that share
/// a PICS name across scopes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariableContext(String);

impl VariableContext {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Cluster.Role` prefix, or `None` when the context is blank.
    pub fn scope_prefix(&self) -> Option<&str> {
        if self.0.is_empty() {
            None
        } else {
            Some(scope_prefix_of(&self.0))
        }
    }
}

impl fmt::Display for VariableContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConformanceInput {
    pub raw_text: String,
    pub variable_context: VariableContext,
}

impl ConformanceInput {
    pub fn new(raw_text: impl Into<String>, variable_context: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            variable_context: VariableContext::new(variable_context),
        }
    }
}

/// Cascade stage that produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    BracketedSuffixGroup,
    PipeList,
    SingleFeature,
    AnnotatedVariable,
    DirectValue,
    ScopedPrefix,
    LogicalExpression,
    ReducedPrefix,
    NoMatch,
}

impl Stage {
    /// Stages in evaluation order.
    pub const CASCADE: [Stage; 9] = [
        Stage::BracketedSuffixGroup,
        Stage::PipeList,
        Stage::SingleFeature,
        Stage::AnnotatedVariable,
        Stage::DirectValue,
        Stage::ScopedPrefix,
        Stage::LogicalExpression,
        Stage::ReducedPrefix,
        Stage::NoMatch,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::BracketedSuffixGroup => "bracketed suffix group",
            Self::PipeList => "pipe list",
            Self::SingleFeature => "single feature",
            Self::AnnotatedVariable => "annotated variable",
            Self::DirectValue => "direct value",
            Self::ScopedPrefix => "scoped prefix",
            Self::LogicalExpression => "logical expression",
            Self::ReducedPrefix => "reduced prefix",
            Self::NoMatch => "no match",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of resolving one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConformanceResult {
    /// Canonical expression, empty when no rule applied.
    pub expression: String,
    /// Stage that claimed the row.
    pub stage: Stage,
}

impl ConformanceResult {
    pub fn new(expression: impl Into<String>, stage: Stage) -> Self {
        Self {
            expression: expression.into(),
            stage,
        }
    }

    pub fn no_match() -> Self {
        Self::new(String::new(), Stage::NoMatch)
    }

    /// True when the row needs a manual value downstream.
    pub fn is_unresolved(&self) -> bool {
        self.expression.is_empty()
    }
}

/// A row that resolved to an empty expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Sheet row number (header is row 1).
    pub row: usize,
    pub text: String,
    pub stage: Stage,
}

/// Per-batch counts, keyed by stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionSummary {
    pub total: usize,
    pub unresolved: usize,
    pub by_stage: BTreeMap<Stage, usize>,
}

impl ResolutionSummary {
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a ConformanceResult>,
    {
        let mut summary = Self::default();
        for result in results {
            summary.total += 1;
            if result.is_unresolved() {
                summary.unresolved += 1;
            }
            *summary.by_stage.entry(result.stage).or_insert(0) += 1;
        }
        summary
    }

    pub fn resolved(&self) -> usize {
        self.total - self.unresolved
    }

    pub fn count(&self, stage: Stage) -> usize {
        self.by_stage.get(&stage).copied().unwrap_or(0)
    }
}
