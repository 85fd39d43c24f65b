//! Flat lexer for logical conformance expressions.
//!
//! The tokenizer does not build a tree: tokens come back in presentation order
//! and are reassembled as-is after mapping.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Parenthetical comment glued to a feature name, e.g. the `(PIR)` in `OCC.S.F01(PIR)`.
static ATTACHED_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w)\([^()]*\)").expect("Invalid attached comment regex"));

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!?\w+(?:\.\w+)*|[&|()!]").expect("Invalid token regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// One of `& | ( ) !`.
    Operator(char),
    /// Feature name or dotted variable, possibly prefixed with `!`.
    Variable(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operator(op) => write!(f, "{op}"),
            Token::Variable(name) => f.write_str(name),
        }
    }
}

/// Remove parenthetical comments attached directly to a feature name.
///
/// Grouping parentheses (preceded by whitespace, an operator, or nothing) are
/// left in place.
pub fn strip_attached_comments(expression: &str) -> String {
    let mut current = expression.to_string();
    loop {
        let next = ATTACHED_COMMENT.replace_all(&current, "${1}").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Split an expression into operator and variable tokens.
///
/// Characters outside the token grammar (whitespace, `[`, `]`, `:` and the
/// like) only separate tokens.
pub fn tokenize(expression: &str) -> Vec<Token> {
    let cleaned = strip_attached_comments(expression);
    TOKEN
        .find_iter(&cleaned)
        .map(|found| {
            let text = found.as_str();
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(op @ ('&' | '|' | '(' | ')' | '!')), None) => Token::Operator(op),
                _ => Token::Variable(text.to_string()),
            }
        })
        .collect()
}
