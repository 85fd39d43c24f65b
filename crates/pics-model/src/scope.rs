use std::collections::BTreeSet;

/// Registered server/client scope identifiers (e.g. `"EEM.S"`, `"OCC.C"`).
#[derive(Debug, Clone, Default)]
pub struct ScopeVariableSet {
    scopes: BTreeSet<String>,
}

impl ScopeVariableSet {
    pub fn new<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let scopes = identifiers
            .into_iter()
            .map(|id| id.as_ref().trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
        Self { scopes }
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.scopes.contains(identifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.scopes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}
