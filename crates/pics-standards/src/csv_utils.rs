//! Shared CSV utilities for loading exported sheets.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{Result, StandardsError};

/// A CSV sheet: ordered headers plus one map per data row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<BTreeMap<String, String>>,
}

impl CsvTable {
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|header| header == column)
    }

    /// Fail with [`StandardsError::MissingColumn`] unless `column` is present.
    pub fn require_column(&self, path: &Path, column: &str) -> Result<()> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(StandardsError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            })
        }
    }
}

/// Read a CSV file into a [`CsvTable`].
///
/// Header names are stripped of BOM characters and surrounding whitespace;
/// cell values are kept as written.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|source| StandardsError::csv(path, source))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| StandardsError::csv(path, source))?
        .iter()
        .map(|header| header.trim_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| StandardsError::csv(path, source))?;
        let mut row = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            let Some(key) = headers.get(idx) else {
                continue;
            };
            row.insert(key.clone(), value.to_string());
        }
        rows.push(row);
    }
    Ok(CsvTable { headers, rows })
}

/// Get a trimmed field value from a row, returning empty string if not present.
pub fn get_field<'a>(row: &'a BTreeMap<String, String>, key: &str) -> &'a str {
    row.get(key).map(|value| value.trim()).unwrap_or("")
}
