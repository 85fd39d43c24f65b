use pics_model::{FeatureCatalog, VariableContext};

use crate::tokenizer::{Token, tokenize};

/// Resolve one feature token to its registered variable.
///
/// Negated tokens keep their `!`. Matches are narrowed to the context's
/// `Cluster.Role` scope; a blank context leaves them unfiltered. Unknown
/// tokens come back unchanged.
pub fn resolve_token(catalog: &FeatureCatalog, token: &str, context: &VariableContext) -> String {
    if let Some(base) = token.strip_prefix('!') {
        return format!("!{}", resolve_token(catalog, base, context));
    }
    let matched = match context.scope_prefix() {
        Some(prefix) => catalog.first_scoped_variable(token, prefix),
        None => catalog.first_variable(token),
    };
    matched.unwrap_or(token).to_string()
}

/// Tokenize an expression and map every variable token, joined by single spaces.
pub fn map_expression(
    catalog: &FeatureCatalog,
    expression: &str,
    context: &VariableContext,
) -> String {
    tokenize(expression)
        .iter()
        .map(|token| match token {
            Token::Operator(_) => token.to_string(),
            Token::Variable(name) => resolve_token(catalog, name, context),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
