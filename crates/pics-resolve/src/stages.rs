//! Handlers for the individual cascade stages.
//!
//! Every handler checks its own precondition first and answers
//! [`StageOutcome::NoMatch`] when the text does not have its shape, so each one
//! can be exercised on its own.

use pics_model::{FeatureCatalog, RuleConfig, ScopeVariableSet, VariableContext};

use crate::mapper::map_expression;
use crate::predicates::{
    annotated_variable, has_explicit_brackets, is_bracket_delimited, is_direct_value,
    is_pipe_list, reduced_prefix, split_scope_prefix, suffix_group,
};

/// Result of offering a row to one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// The stage produced the row's expression.
    Matched(String),
    /// The stage owns the row but could not produce an expression.
    Unresolved,
    /// The stage does not apply; try the next one.
    NoMatch,
}

/// `"<scope>: (<a> & <b>)"`: every name must resolve under `<scope>`.
pub fn bracketed_suffix_group(
    rules: &RuleConfig,
    catalog: &FeatureCatalog,
    text: &str,
) -> StageOutcome {
    if !rules.remove_suffix_in_brackets {
        return StageOutcome::NoMatch;
    }
    let Some(content) = suffix_group(text) else {
        return StageOutcome::NoMatch;
    };
    let Some((prefix, _)) = split_scope_prefix(text) else {
        return StageOutcome::NoMatch;
    };
    let mut variables = Vec::new();
    for name in content.split(['&', '|']).map(str::trim) {
        let variable = if prefix.is_empty() {
            catalog.first_variable(name)
        } else {
            catalog.first_scoped_variable(name, prefix)
        };
        match variable {
            Some(variable) => variables.push(variable),
            None => return StageOutcome::NoMatch,
        }
    }
    let separator = if content.contains('&') { " & " } else { " | " };
    StageOutcome::Matched(variables.join(separator))
}

/// `"[PIN | RID]"` or `"[PIN] | [RID]"`: each alternative must name exactly one record.
///
/// A name registered under several scopes declines the stage, leaving the row
/// to the scope-aware logical expression stage. An unknown name cannot be
/// offset by another name's extra records.
pub fn pipe_list(catalog: &FeatureCatalog, text: &str) -> StageOutcome {
    if !is_pipe_list(text) {
        return StageOutcome::NoMatch;
    }
    let inner = text.strip_prefix('[').unwrap_or(text);
    let inner = inner.strip_suffix(']').unwrap_or(inner);
    let mut variables = Vec::new();
    for part in inner.split('|') {
        let name = part.trim().trim_matches(['[', ']']).trim();
        match catalog.lookup_by_name(name).as_slice() {
            [record] => variables.push(record.variable.as_str()),
            _ => return StageOutcome::NoMatch,
        }
    }
    StageOutcome::Matched(variables.join(" | "))
}

/// `"[MACCNT]"` or `"MACCNT"`; brackets on the raw input are kept.
pub fn single_feature(catalog: &FeatureCatalog, original: &str, text: &str) -> StageOutcome {
    let cleaned = text.trim_matches(['[', ']']).trim_matches('.').trim();
    match catalog.first_variable(cleaned) {
        Some(variable) if is_bracket_delimited(original) => {
            StageOutcome::Matched(format!("[{variable}]"))
        }
        Some(variable) => StageOutcome::Matched(variable.to_string()),
        None => StageOutcome::NoMatch,
    }
}

/// `"OCC.S.F01(PIR): M"` becomes `"[OCC.S.F01]"`.
pub fn annotated(original: &str) -> StageOutcome {
    match annotated_variable(original) {
        Some(variable) => StageOutcome::Matched(format!("[{variable}]")),
        None => StageOutcome::NoMatch,
    }
}

pub fn direct_value(rules: &RuleConfig, text: &str) -> StageOutcome {
    if is_direct_value(text, rules) {
        StageOutcome::Matched(text.to_string())
    } else {
        StageOutcome::NoMatch
    }
}

/// `"<prefix>: <value>"`. Once a `:` is present this stage always ends the cascade.
pub fn scoped_prefix(
    rules: &RuleConfig,
    scopes: &ScopeVariableSet,
    catalog: &FeatureCatalog,
    text: &str,
) -> StageOutcome {
    let Some((prefix, value)) = split_scope_prefix(text) else {
        return StageOutcome::NoMatch;
    };
    if rules.server_client_prefix_handling
        && scopes.contains(prefix)
        && is_direct_value(value, rules)
    {
        return StageOutcome::Matched(value.to_string());
    }
    if rules.feature_mapping_handling
        && let Some(variable) = catalog.first_scoped_variable(value, prefix)
    {
        return StageOutcome::Matched(variable.to_string());
    }
    StageOutcome::Unresolved
}

pub fn logical_expression(
    catalog: &FeatureCatalog,
    text: &str,
    context: &VariableContext,
) -> StageOutcome {
    if has_explicit_brackets(text) {
        StageOutcome::Matched(map_expression(catalog, text, context))
    } else {
        StageOutcome::NoMatch
    }
}

/// Text whose `Cluster.Role` prefix is a registered scope is already canonical.
pub fn reduced_prefix_match(scopes: &ScopeVariableSet, text: &str) -> StageOutcome {
    match reduced_prefix(text) {
        Some(prefix) if scopes.contains(prefix) => StageOutcome::Matched(text.to_string()),
        _ => StageOutcome::NoMatch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> FeatureCatalog {
        FeatureCatalog::from_pairs([
            ("IMPE", "EEM.S.F01"),
            ("CUME", "EEM.S.F02"),
            ("PIN", "DRLK.S.F01"),
            ("RID", "DRLK.S.F02"),
            ("MACCNT", "WIFIDIAG.S.F01"),
        ])
    }

    fn rules() -> RuleConfig {
        RuleConfig::standard("Conformance")
    }

    #[test]
    fn suffix_group_joins_with_source_separator() {
        assert_eq!(
            bracketed_suffix_group(&rules(), &catalog(), "EEM.S: (IMPE & CUME)"),
            StageOutcome::Matched("EEM.S.F01 & EEM.S.F02".to_string())
        );
        assert_eq!(
            bracketed_suffix_group(&rules(), &catalog(), "EEM.S: (IMPE | CUME)"),
            StageOutcome::Matched("EEM.S.F01 | EEM.S.F02".to_string())
        );
    }

    #[test]
    fn suffix_group_requires_every_name() {
        assert_eq!(
            bracketed_suffix_group(&rules(), &catalog(), "EEM.S: (IMPE & BOGUS)"),
            StageOutcome::NoMatch
        );
        assert_eq!(
            bracketed_suffix_group(&rules(), &catalog(), "DRLK.S: (IMPE & CUME)"),
            StageOutcome::NoMatch
        );
    }

    #[test]
    fn suffix_group_disabled_by_flag() {
        let rules = rules().with_remove_suffix_in_brackets(false);
        assert_eq!(
            bracketed_suffix_group(&rules, &catalog(), "EEM.S: (IMPE & CUME)"),
            StageOutcome::NoMatch
        );
    }

    #[test]
    fn pipe_list_accepts_bracketed_parts() {
        assert_eq!(
            pipe_list(&catalog(), "[PIN] | [RID]"),
            StageOutcome::Matched("DRLK.S.F01 | DRLK.S.F02".to_string())
        );
        assert_eq!(pipe_list(&catalog(), "[PIN | BOGUS]"), StageOutcome::NoMatch);
        assert_eq!(pipe_list(&catalog(), "[PIN]"), StageOutcome::NoMatch);
    }

    #[test]
    fn pipe_list_declines_names_in_several_scopes() {
        let catalog = FeatureCatalog::from_pairs([
            ("PIR", "OCC.C.F01"),
            ("PIR", "OCC.S.F01"),
            ("US", "OCC.S.F02"),
        ]);
        assert_eq!(pipe_list(&catalog, "[PIR | US]"), StageOutcome::NoMatch);
        assert_eq!(pipe_list(&catalog, "[PIR | BOGUS]"), StageOutcome::NoMatch);
    }

    #[test]
    fn single_feature_rewraps_brackets() {
        assert_eq!(
            single_feature(&catalog(), "[MACCNT]", "[MACCNT]"),
            StageOutcome::Matched("[WIFIDIAG.S.F01]".to_string())
        );
        assert_eq!(
            single_feature(&catalog(), "MACCNT.", "MACCNT."),
            StageOutcome::Matched("WIFIDIAG.S.F01".to_string())
        );
    }

    #[test]
    fn scoped_prefix_never_falls_through() {
        let scopes = ScopeVariableSet::new(["EEM.S"]);
        assert_eq!(
            scoped_prefix(&rules(), &scopes, &catalog(), "EEM.S: M"),
            StageOutcome::Matched("M".to_string())
        );
        assert_eq!(
            scoped_prefix(&rules(), &scopes, &catalog(), "EEM.S: CUME"),
            StageOutcome::Matched("EEM.S.F02".to_string())
        );
        assert_eq!(
            scoped_prefix(&rules(), &scopes, &catalog(), "EEM.C: CUME"),
            StageOutcome::Unresolved
        );
        assert_eq!(
            scoped_prefix(&rules(), &scopes, &catalog(), "EEM.S CUME"),
            StageOutcome::NoMatch
        );
    }

    #[test]
    fn scoped_prefix_respects_flags() {
        let scopes = ScopeVariableSet::new(["EEM.S"]);
        let rules = rules()
            .with_server_client_prefix_handling(false)
            .with_feature_mapping_handling(false);
        assert_eq!(
            scoped_prefix(&rules, &scopes, &catalog(), "EEM.S: M"),
            StageOutcome::Unresolved
        );
    }

    #[test]
    fn reduced_prefix_keeps_text() {
        let scopes = ScopeVariableSet::new(["OCC.S"]);
        assert_eq!(
            reduced_prefix_match(&scopes, "OCC.S.A0000"),
            StageOutcome::Matched("OCC.S.A0000".to_string())
        );
        assert_eq!(reduced_prefix_match(&scopes, "OCC.C.A0000"), StageOutcome::NoMatch);
    }
}
