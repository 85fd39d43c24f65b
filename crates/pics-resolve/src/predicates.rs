//! Shape tests deciding which cascade stage may claim a conformance string.
//!
//! Each predicate is pure and looks only at the text (plus rule flags where
//! noted), so stage selection can be checked without running the cascade.

use std::sync::LazyLock;

use regex::Regex;

use pics_model::{RuleConfig, scope_prefix_of};

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((.*?)\)").expect("Invalid parenthetical regex"));

/// `OCC.S.F01(PIR): M` and friends.
static ANNOTATED_VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]+\.\w+\.F\d+)\(.*?\):\s*[MO]$")
        .expect("Invalid annotated variable regex")
});

/// Content of the first `(...)` group, when the text also carries a `:` scope.
pub fn suffix_group(text: &str) -> Option<&str> {
    if !text.contains(':') {
        return None;
    }
    PARENTHETICAL
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|group| group.as_str())
}

/// Remove every `(...)` group and trim the remainder.
pub fn strip_parentheticals(text: &str) -> String {
    PARENTHETICAL.replace_all(text, "").trim().to_string()
}

pub fn is_pipe_list(text: &str) -> bool {
    text.contains('|')
}

pub fn is_bracket_delimited(text: &str) -> bool {
    text.starts_with('[') && text.ends_with(']')
}

/// Canonical variable of an `<CLUSTER>.<word>.F<digits>(...): M|O` string.
pub fn annotated_variable(text: &str) -> Option<&str> {
    ANNOTATED_VARIABLE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|var| var.as_str())
}

pub fn is_direct_value(text: &str, rules: &RuleConfig) -> bool {
    rules.is_direct_value(text)
}

/// Split `"<prefix>: <value>"` once, trimming both halves.
pub fn split_scope_prefix(text: &str) -> Option<(&str, &str)> {
    text.split_once(':')
        .map(|(prefix, value)| (prefix.trim(), value.trim()))
}

pub fn has_explicit_brackets(text: &str) -> bool {
    text.contains('[')
}

/// First two dot segments of a dotted text, `None` when there is no dot.
pub fn reduced_prefix(text: &str) -> Option<&str> {
    if text.contains('.') {
        Some(scope_prefix_of(text))
    } else {
        None
    }
}

/// True when a mapped expression ends in `&`, `|`, `!` or `(`.
///
/// Happens when suffix stripping removes a trailing grouping parenthetical.
pub fn has_dangling_operator(expression: &str) -> bool {
    expression.trim_end().ends_with(['&', '|', '!', '('])
}
