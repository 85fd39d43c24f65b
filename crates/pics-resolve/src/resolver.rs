//! Ordered rule cascade reducing raw conformance text to a canonical expression.

use tracing::{debug, trace};

use pics_model::{
    ConformanceInput, ConformanceResult, FeatureCatalog, RuleConfig, ScopeVariableSet, Stage,
    VariableContext,
};

use crate::predicates::{has_dangling_operator, strip_parentheticals};
use crate::stages::{self, StageOutcome};

/// Read-only lookup state shared by every row of a batch.
#[derive(Debug, Clone, Default)]
pub struct ResolverContext {
    rules: RuleConfig,
    scopes: ScopeVariableSet,
    catalog: FeatureCatalog,
}

/// Working copy of one row while it moves through the cascade.
struct RowText<'a> {
    /// Trimmed raw input.
    original: &'a str,
    /// Input offered to every stage after the first.
    text: String,
    context: &'a VariableContext,
}

impl ResolverContext {
    pub fn new(rules: RuleConfig, scopes: ScopeVariableSet, catalog: FeatureCatalog) -> Self {
        Self {
            rules,
            scopes,
            catalog,
        }
    }

    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    pub fn scopes(&self) -> &ScopeVariableSet {
        &self.scopes
    }

    pub fn catalog(&self) -> &FeatureCatalog {
        &self.catalog
    }

    pub fn resolve(&self, input: &ConformanceInput) -> ConformanceResult {
        self.resolve_text(&input.raw_text, &input.variable_context)
    }

    /// Text that stages after the bracketed suffix group are offered.
    ///
    /// With `remove_suffix_in_brackets` every `(...)` group is stripped,
    /// including grouping parentheses.
    pub fn working_text(&self, raw_text: &str) -> String {
        let original = raw_text.trim();
        if self.rules.remove_suffix_in_brackets {
            strip_parentheticals(original)
        } else {
            original.to_string()
        }
    }

    /// Run the cascade; the first stage that claims the row wins.
    pub fn resolve_text(&self, raw_text: &str, context: &VariableContext) -> ConformanceResult {
        let original = raw_text.trim();
        let row = RowText {
            original,
            text: self.working_text(original),
            context,
        };
        for stage in Stage::CASCADE {
            match self.attempt(stage, &row) {
                StageOutcome::Matched(expression) => {
                    debug!(stage = %stage, input = original, %expression, "conformance resolved");
                    if stage == Stage::LogicalExpression && has_dangling_operator(&expression) {
                        debug!(input = original, %expression, "expression ends with an operator");
                    }
                    return ConformanceResult::new(expression, stage);
                }
                StageOutcome::Unresolved => {
                    debug!(stage = %stage, input = original, "conformance unresolved");
                    return ConformanceResult::new(String::new(), stage);
                }
                StageOutcome::NoMatch => {
                    trace!(stage = %stage, input = original, "stage skipped");
                }
            }
        }
        ConformanceResult::no_match()
    }

    fn attempt(&self, stage: Stage, row: &RowText<'_>) -> StageOutcome {
        let text = row.text.as_str();
        match stage {
            Stage::BracketedSuffixGroup => {
                stages::bracketed_suffix_group(&self.rules, &self.catalog, row.original)
            }
            Stage::PipeList => stages::pipe_list(&self.catalog, text),
            Stage::SingleFeature => stages::single_feature(&self.catalog, row.original, text),
            Stage::AnnotatedVariable => stages::annotated(row.original),
            Stage::DirectValue => stages::direct_value(&self.rules, text),
            Stage::ScopedPrefix => {
                stages::scoped_prefix(&self.rules, &self.scopes, &self.catalog, text)
            }
            Stage::LogicalExpression => {
                stages::logical_expression(&self.catalog, text, row.context)
            }
            Stage::ReducedPrefix => stages::reduced_prefix_match(&self.scopes, text),
            Stage::NoMatch => StageOutcome::Unresolved,
        }
    }
}
