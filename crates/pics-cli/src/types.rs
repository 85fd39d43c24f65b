use std::path::PathBuf;

use pics_model::{Diagnostic, ResolutionSummary};

#[derive(Debug)]
pub struct ResolveResult {
    pub sheets: Vec<SheetSummary>,
}

impl ResolveResult {
    pub fn unresolved(&self) -> usize {
        self.sheets.iter().map(|sheet| sheet.summary.unresolved).sum()
    }
}

#[derive(Debug)]
pub struct SheetSummary {
    pub sheet: String,
    pub input: PathBuf,
    /// Resolved copy, `None` on a dry run.
    pub output: Option<PathBuf>,
    /// A1 range of the filled output cells.
    pub output_range: Option<String>,
    pub summary: ResolutionSummary,
    pub diagnostics: Vec<Diagnostic>,
}
