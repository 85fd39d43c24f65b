#![allow(dead_code)]

use pics_model::{FeatureCatalog, RuleConfig, ScopeVariableSet};
use pics_resolve::ResolverContext;

pub fn sample_catalog() -> FeatureCatalog {
    FeatureCatalog::from_pairs([
        ("IMPE", "EEM.S.F01"),
        ("CUME", "EEM.S.F02"),
        ("PIN", "DRLK.S.F01"),
        ("RID", "DRLK.S.F02"),
        ("MACCNT", "WIFIDIAG.S.F01"),
        ("PIR", "OCC.C.F01"),
        ("PIR", "OCC.S.F01"),
        ("US", "OCC.S.F02"),
    ])
}

pub fn sample_scopes() -> ScopeVariableSet {
    ScopeVariableSet::new(["EEM.S", "EEM.C", "DRLK.S", "OCC.S", "OCC.C", "WIFIDIAG.S"])
}

pub fn sample_context() -> ResolverContext {
    ResolverContext::new(
        RuleConfig::standard("Conformance"),
        sample_scopes(),
        sample_catalog(),
    )
}

pub fn context_with_rules(rules: RuleConfig) -> ResolverContext {
    ResolverContext::new(rules, sample_scopes(), sample_catalog())
}
