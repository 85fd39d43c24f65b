//! Writing resolved conformance values back into an exported sheet.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use csv::Writer;

use pics_resolve::FIRST_DATA_ROW;
use pics_standards::CsvTable;

/// Column filled with resolved expressions when none is given.
pub const DEFAULT_OUTPUT_COLUMN: &str = "Conformance Expression";

/// Spreadsheet column letters for a 1-based index (1 -> `A`, 27 -> `AA`).
pub fn column_letters(mut index: usize) -> String {
    let mut letters = Vec::new();
    while index > 0 {
        let rem = (index - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        index = (index - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// A1 range covering the data rows of one column (`G2:G11` for 10 rows).
pub fn output_range(column_index: usize, row_count: usize) -> String {
    let letters = column_letters(column_index);
    let last_row = row_count + FIRST_DATA_ROW - 1;
    format!("{letters}{FIRST_DATA_ROW}:{letters}{last_row}")
}

/// Where the resolved copy of `input` is written.
pub fn output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("sheet");
    let name = format!("{stem}.resolved.csv");
    match output_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}

/// Headers after placing `column`, plus its 1-based position.
///
/// An existing column is overwritten in place; otherwise it is appended.
pub fn place_output_column(headers: &[String], column: &str) -> (Vec<String>, usize) {
    let mut headers = headers.to_vec();
    let position = match headers.iter().position(|header| header == column) {
        Some(idx) => idx,
        None => {
            headers.push(column.to_string());
            headers.len() - 1
        }
    };
    (headers, position + 1)
}

/// Write `table` to `path` with `values` in `column`, one value per row.
///
/// Returns the 1-based index of the output column.
pub fn write_output_column(
    table: &CsvTable,
    column: &str,
    values: &[String],
    path: &Path,
) -> Result<usize> {
    if values.len() != table.rows.len() {
        bail!(
            "{} values for {} rows in {}",
            values.len(),
            table.rows.len(),
            path.display()
        );
    }
    let (headers, column_index) = place_output_column(&table.headers, column);
    let mut writer =
        Writer::from_path(path).with_context(|| format!("create csv: {}", path.display()))?;
    writer
        .write_record(&headers)
        .with_context(|| format!("write headers: {}", path.display()))?;
    for (row, value) in table.rows.iter().zip(values) {
        let record = headers.iter().map(|header| {
            if header == column {
                value.as_str()
            } else {
                row.get(header).map(String::as_str).unwrap_or("")
            }
        });
        writer
            .write_record(record)
            .with_context(|| format!("write record: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush csv: {}", path.display()))?;
    Ok(column_index)
}
