//! Cascade behaviour over a small, realistic feature catalog.

mod common;

use pics_model::{ConformanceInput, RuleConfig, Stage, VariableContext};
use pics_resolve::{ResolverContext, resolve_batch};

use common::{context_with_rules, sample_context};

fn resolve(context: &ResolverContext, text: &str, variable: &str) -> (String, Stage) {
    let result = context.resolve_text(text, &VariableContext::new(variable));
    (result.expression, result.stage)
}

#[test]
fn scoped_feature_group_resolves_every_name() {
    let (expression, stage) = resolve(&sample_context(), "EEM.S: (IMPE & CUME)", "EEM.S.A0000");
    assert_eq!(expression, "EEM.S.F01 & EEM.S.F02");
    assert_eq!(stage, Stage::BracketedSuffixGroup);
}

#[test]
fn feature_group_needs_suffix_flag() {
    let rules = RuleConfig::standard("Conformance").with_remove_suffix_in_brackets(false);
    let (expression, stage) = resolve(
        &context_with_rules(rules),
        "EEM.S: (IMPE & CUME)",
        "EEM.S.A0000",
    );
    // The scoped-prefix stage claims the row and cannot map "(IMPE & CUME)".
    assert_eq!(expression, "");
    assert_eq!(stage, Stage::ScopedPrefix);
}

#[test]
fn pipe_list_beats_single_token() {
    let context = sample_context();
    assert_eq!(
        resolve(&context, "[MACCNT]", ""),
        ("[WIFIDIAG.S.F01]".to_string(), Stage::SingleFeature)
    );
    assert_eq!(
        resolve(&context, "[MACCNT | RID]", ""),
        ("WIFIDIAG.S.F01 | DRLK.S.F02".to_string(), Stage::PipeList)
    );
}

#[test]
fn pipe_list_joins_all_alternatives() {
    let (expression, stage) = resolve(&sample_context(), "[PIN | RID]", "DRLK.S.A0000");
    assert_eq!(expression, "DRLK.S.F01 | DRLK.S.F02");
    assert_eq!(stage, Stage::PipeList);
}

#[test]
fn partial_pipe_list_is_not_joined() {
    let (expression, stage) = resolve(&sample_context(), "[PIN | BOGUS]", "DRLK.S.A0000");
    assert_ne!(stage, Stage::PipeList);
    // Token-by-token mapping keeps the unknown name as written.
    assert_eq!(stage, Stage::LogicalExpression);
    assert_eq!(expression, "DRLK.S.F01 | BOGUS");
}

#[test]
fn pipe_list_with_name_in_several_scopes_uses_row_scope() {
    // PIR is registered for both OCC.C and OCC.S.
    let (expression, stage) = resolve(&sample_context(), "[PIR | US]", "OCC.S.A0000");
    assert_eq!(stage, Stage::LogicalExpression);
    assert_eq!(expression, "OCC.S.F01 | OCC.S.F02");

    let (expression, _) = resolve(&sample_context(), "[PIR | US]", "OCC.C.A0000");
    assert_eq!(expression, "OCC.C.F01 | US");
}

#[test]
fn pipe_list_extra_records_do_not_cover_unknown_names() {
    let (expression, stage) = resolve(&sample_context(), "[PIR | BOGUS]", "OCC.S.A0000");
    assert_eq!(stage, Stage::LogicalExpression);
    assert_eq!(expression, "OCC.S.F01 | BOGUS");
}

#[test]
fn feature_group_picks_record_under_prefix() {
    let (expression, stage) = resolve(&sample_context(), "OCC.S: (PIR & US)", "OCC.S.A0000");
    assert_eq!(stage, Stage::BracketedSuffixGroup);
    assert_eq!(expression, "OCC.S.F01 & OCC.S.F02");

    let (expression, stage) = resolve(&sample_context(), "OCC.C: (PIR | US)", "OCC.C.A0000");
    // US has no client record, so the group declines and the stripped
    // "OCC.C:" is left to the scoped-prefix stage.
    assert_eq!(stage, Stage::ScopedPrefix);
    assert_eq!(expression, "");
}

#[test]
fn direct_value_is_identity() {
    for variable in ["", "OCC.S.A0000", "EEM.C.C00.Rsp"] {
        assert_eq!(
            resolve(&sample_context(), "M", variable),
            ("M".to_string(), Stage::DirectValue)
        );
    }
    assert_eq!(resolve(&sample_context(), " O ", "").0, "O");
}

#[test]
fn direct_value_needs_configuration() {
    let rules = RuleConfig::standard("Conformance").with_direct_values(Vec::<String>::new());
    let (expression, stage) = resolve(&context_with_rules(rules), "M", "");
    assert_eq!(expression, "");
    assert_eq!(stage, Stage::NoMatch);
}

#[test]
fn annotated_variable_shorthand() {
    let (expression, stage) = resolve(&sample_context(), "OCC.S.F01(PIR): M", "OCC.S.A0000");
    assert_eq!(expression, "[OCC.S.F01]");
    assert_eq!(stage, Stage::AnnotatedVariable);

    let rules = RuleConfig::standard("Conformance").with_remove_suffix_in_brackets(false);
    let (expression, _) = resolve(&context_with_rules(rules), "OCC.S.F01(PIR): O", "");
    assert_eq!(expression, "[OCC.S.F01]");
}

#[test]
fn server_client_prefix_passes_direct_value() {
    let context = sample_context();
    assert_eq!(
        resolve(&context, "EEM.S: M", ""),
        ("M".to_string(), Stage::ScopedPrefix)
    );
    // Unregistered scope: stage 6 owns the row and yields nothing.
    assert_eq!(
        resolve(&context, "XYZ.S: M", ""),
        (String::new(), Stage::ScopedPrefix)
    );
}

#[test]
fn scoped_feature_mapping_uses_exact_prefix() {
    let context = sample_context();
    assert_eq!(resolve(&context, "OCC.C: PIR", "OCC.S.A0000").0, "OCC.C.F01");
    assert_eq!(resolve(&context, "OCC.S: PIR", "OCC.C.A0000").0, "OCC.S.F01");
    assert_eq!(resolve(&context, "OCC.C: US", "").0, "");
}

#[test]
fn logical_expression_maps_in_context() {
    let context = sample_context();
    assert_eq!(
        resolve(&context, "[PIR & !US]", "OCC.S.A0000").0,
        "OCC.S.F01 & !OCC.S.F02"
    );
}

#[test]
fn grouping_parentheses_survive_without_suffix_stripping() {
    let rules = RuleConfig::standard("Conformance").with_remove_suffix_in_brackets(false);
    let context = context_with_rules(rules);
    assert_eq!(
        resolve(&context, "[PIR] & (US | !IMPE)", "OCC.C.A0000"),
        (
            "OCC.C.F01 & ( US | !IMPE )".to_string(),
            Stage::LogicalExpression
        )
    );
    assert_eq!(
        resolve(&context, "[PIR(note) & US]", "OCC.S.A0000").0,
        "OCC.S.F01 & OCC.S.F02"
    );
}

#[test]
fn suffix_stripping_drops_every_parenthetical() {
    assert_eq!(
        resolve(&sample_context(), "[PIR] & (US | !IMPE)", "OCC.C.A0000").0,
        "OCC.C.F01 &"
    );
}

#[test]
fn negation_is_preserved() {
    let (expression, stage) = resolve(&sample_context(), "[!OCC.S.F01 & US]", "OCC.S.A0000");
    assert_eq!(stage, Stage::LogicalExpression);
    assert_eq!(expression, "!OCC.S.F01 & OCC.S.F02");
}

#[test]
fn registered_prefix_is_already_canonical() {
    assert_eq!(
        resolve(&sample_context(), "OCC.S.A0000", ""),
        ("OCC.S.A0000".to_string(), Stage::ReducedPrefix)
    );
}

#[test]
fn unknown_token_has_no_match() {
    assert_eq!(
        resolve(&sample_context(), "BOGUS.TOKEN", ""),
        (String::new(), Stage::NoMatch)
    );
}

#[test]
fn batch_reports_unresolved_rows() {
    let rows = vec![
        ConformanceInput::new("M", "OCC.S.A0000"),
        ConformanceInput::new("BOGUS.TOKEN", "OCC.S.A0001"),
        ConformanceInput::new("OCC.C: US", "OCC.C.A0000"),
    ];
    let report = resolve_batch(&sample_context(), &rows);
    assert_eq!(report.values(), vec!["M", "", ""]);
    let rows: Vec<usize> = report.diagnostics.iter().map(|d| d.row).collect();
    assert_eq!(rows, vec![3, 4]);
    assert_eq!(report.diagnostics[1].stage, Stage::ScopedPrefix);

    let summary = report.summary();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.unresolved, 2);
    assert_eq!(summary.count(Stage::DirectValue), 1);
}

#[test]
fn cascade_snapshot() {
    let context = sample_context();
    let cases = [
        ("EEM.S: (IMPE & CUME)", "EEM.S.A0000"),
        ("[PIN | RID]", "DRLK.S.A0000"),
        ("[MACCNT]", "WIFIDIAG.S.A0000"),
        ("MACCNT", "WIFIDIAG.S.A0000"),
        ("OCC.S.F01(PIR): M", "OCC.S.A0000"),
        ("M", "OCC.S.A0000"),
        ("EEM.S: O", "EEM.S.A0000"),
        ("OCC.S: US", "OCC.S.A0000"),
        ("OCC.C: US", "OCC.C.A0000"),
        ("[PIR & !US]", "OCC.S.A0000"),
        ("OCC.S.A0000", "OCC.S.A0000"),
        ("BOGUS.TOKEN", "OCC.S.A0000"),
    ];
    let rendered = cases
        .iter()
        .map(|(text, variable)| {
            let result = context.resolve_text(text, &VariableContext::new(*variable));
            format!("{text} => {:?} ({})", result.expression, result.stage)
        })
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(rendered, @r#"
    EEM.S: (IMPE & CUME) => "EEM.S.F01 & EEM.S.F02" (bracketed suffix group)
    [PIN | RID] => "DRLK.S.F01 | DRLK.S.F02" (pipe list)
    [MACCNT] => "[WIFIDIAG.S.F01]" (single feature)
    MACCNT => "WIFIDIAG.S.F01" (single feature)
    OCC.S.F01(PIR): M => "[OCC.S.F01]" (annotated variable)
    M => "M" (direct value)
    EEM.S: O => "O" (scoped prefix)
    OCC.S: US => "OCC.S.F02" (scoped prefix)
    OCC.C: US => "" (scoped prefix)
    [PIR & !US] => "OCC.S.F01 & !OCC.S.F02" (logical expression)
    OCC.S.A0000 => "OCC.S.A0000" (reduced prefix)
    BOGUS.TOKEN => "" (no match)
    "#);
}
