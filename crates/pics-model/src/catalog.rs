//! Feature catalog: PICS display names to registered variable identifiers.
//!
//! A PICS name may be registered under several scopes (e.g. `PIR` under both
//! `OCC.S` and `OCC.C`). Lookups return records in catalog insertion order and
//! every "first match" decision in the resolver relies on that order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One row of the feature catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Human display name (e.g. "IMPE").
    pub pics_name: String,
    /// Canonical dotted identifier (e.g. "EEM.S.F01").
    pub variable: String,
    /// Scope the variable is registered under (e.g. "EEM.S").
    pub scope_prefix: String,
}

impl FeatureRecord {
    /// Build a record, deriving the scope prefix from the variable.
    ///
    /// Returns `None` when either field is blank after trimming.
    pub fn new(pics_name: &str, variable: &str) -> Option<Self> {
        let pics_name = pics_name.trim();
        let variable = variable.trim();
        if pics_name.is_empty() || variable.is_empty() {
            return None;
        }
        Some(Self {
            pics_name: pics_name.to_string(),
            variable: variable.to_string(),
            scope_prefix: scope_prefix_of(variable).to_string(),
        })
    }

    /// True when the variable is registered under `prefix`.
    pub fn is_scoped_to(&self, prefix: &str) -> bool {
        self.variable
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('.'))
    }
}

/// First two dot-separated segments of an identifier (`"EEM.S.F01"` -> `"EEM.S"`).
///
/// Identifiers with fewer segments are returned whole.
pub fn scope_prefix_of(identifier: &str) -> &str {
    match identifier.match_indices('.').nth(1) {
        Some((idx, _)) => &identifier[..idx],
        None => identifier,
    }
}

/// Read-only catalog of feature records with a name index.
#[derive(Debug, Clone, Default)]
pub struct FeatureCatalog {
    records: Vec<FeatureRecord>,
    by_name: HashMap<String, Vec<usize>>,
}

impl FeatureCatalog {
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = FeatureRecord>,
    {
        let mut catalog = Self::default();
        for record in records {
            if record.pics_name.trim().is_empty() || record.variable.trim().is_empty() {
                continue;
            }
            let idx = catalog.records.len();
            catalog
                .by_name
                .entry(record.pics_name.trim().to_string())
                .or_default()
                .push(idx);
            catalog.records.push(record);
        }
        catalog
    }

    /// Build a catalog from raw `(PICS name, Variable)` pairs, skipping blanks.
    pub fn from_pairs<I, N, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: AsRef<str>,
    {
        Self::new(
            pairs
                .into_iter()
                .filter_map(|(name, variable)| {
                    FeatureRecord::new(name.as_ref(), variable.as_ref())
                }),
        )
    }

    /// All records registered under `pics_name`, in catalog order.
    pub fn lookup_by_name(&self, pics_name: &str) -> Vec<&FeatureRecord> {
        self.by_name
            .get(pics_name.trim())
            .map(|indices| indices.iter().map(|&idx| &self.records[idx]).collect())
            .unwrap_or_default()
    }

    /// Records registered under `pics_name` whose variable lives in `scope_prefix`.
    pub fn lookup_by_name_and_prefix(
        &self,
        pics_name: &str,
        scope_prefix: &str,
    ) -> Vec<&FeatureRecord> {
        self.lookup_by_name(pics_name)
            .into_iter()
            .filter(|record| record.is_scoped_to(scope_prefix))
            .collect()
    }

    pub fn first_variable(&self, pics_name: &str) -> Option<&str> {
        self.by_name
            .get(pics_name.trim())
            .and_then(|indices| indices.first())
            .map(|&idx| self.records[idx].variable.as_str())
    }

    pub fn first_scoped_variable(&self, pics_name: &str, scope_prefix: &str) -> Option<&str> {
        self.lookup_by_name_and_prefix(pics_name, scope_prefix)
            .first()
            .map(|record| record.variable.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
