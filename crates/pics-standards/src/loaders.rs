use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use pics_model::{ConformanceInput, FeatureCatalog, FeatureRecord, RuleConfig, ScopeVariableSet};

use crate::csv_utils::{CsvTable, get_field, read_csv_table};
use crate::error::{Result, StandardsError};

/// Feature feed column holding the human display name.
pub const PICS_NAME_COLUMN: &str = "PICS name";
/// Column holding the registered variable (feature, scope, and sheet feeds).
pub const VARIABLE_COLUMN: &str = "Variable";

/// Build the feature catalog from a `PICS name` / `Variable` CSV export.
///
/// Rows missing either value are skipped.
pub fn load_feature_catalog(path: &Path) -> Result<FeatureCatalog> {
    let table = read_csv_table(path)?;
    table.require_column(path, PICS_NAME_COLUMN)?;
    table.require_column(path, VARIABLE_COLUMN)?;
    let catalog = feature_catalog_from_rows(&table.rows);
    info!(
        path = %path.display(),
        records = catalog.len(),
        skipped = table.rows.len() - catalog.len(),
        "feature catalog loaded"
    );
    Ok(catalog)
}

pub fn feature_catalog_from_rows(rows: &[BTreeMap<String, String>]) -> FeatureCatalog {
    FeatureCatalog::new(rows.iter().filter_map(|row| {
        let record = FeatureRecord::new(
            get_field(row, PICS_NAME_COLUMN),
            get_field(row, VARIABLE_COLUMN),
        );
        if record.is_none() {
            debug!(?row, "skipping incomplete feature record");
        }
        record
    }))
}

/// Build the scope variable set from the `Variable` column of a CSV export.
pub fn load_scope_variables(path: &Path) -> Result<ScopeVariableSet> {
    let table = read_csv_table(path)?;
    table.require_column(path, VARIABLE_COLUMN)?;
    let scopes = ScopeVariableSet::new(
        table
            .rows
            .iter()
            .map(|row| get_field(row, VARIABLE_COLUMN)),
    );
    info!(path = %path.display(), scopes = scopes.len(), "scope variables loaded");
    Ok(scopes)
}

/// Load rule configuration, as TOML for `.toml` files and JSON otherwise.
pub fn load_rule_config(path: &Path) -> Result<RuleConfig> {
    let text = fs::read_to_string(path).map_err(|source| StandardsError::io(path, source))?;
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let rules = if is_toml {
        toml::from_str(&text).map_err(|source| StandardsError::Toml {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_json::from_str(&text).map_err(|source| StandardsError::Json {
            path: path.to_path_buf(),
            source,
        })?
    };
    debug!(path = %path.display(), ?rules, "rule configuration loaded");
    Ok(rules)
}

/// Load rules and check they name a conformance column.
pub fn load_validated_rule_config(path: &Path) -> Result<RuleConfig> {
    let rules = load_rule_config(path)?;
    rules
        .validate()
        .map_err(|source| StandardsError::InvalidRules {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(rules)
}

/// Rows to resolve from an exported sheet: the conformance column plus `Variable`.
///
/// A sheet without a `Variable` column resolves every row without context.
pub fn conformance_inputs(table: &CsvTable, column: &str) -> Vec<ConformanceInput> {
    table
        .rows
        .iter()
        .map(|row| {
            ConformanceInput::new(
                row.get(column).cloned().unwrap_or_default(),
                get_field(row, VARIABLE_COLUMN),
            )
        })
        .collect()
}

/// Read an exported sheet and the rows to resolve from it.
pub fn load_conformance_sheet(
    path: &Path,
    column: &str,
) -> Result<(CsvTable, Vec<ConformanceInput>)> {
    let table = read_csv_table(path)?;
    table.require_column(path, column)?;
    let inputs = conformance_inputs(&table, column);
    Ok((table, inputs))
}
