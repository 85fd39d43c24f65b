//! Resolving whole sheets of conformance rows.

use std::num::NonZeroUsize;
use std::panic;
use std::thread;

use tracing::warn;

use pics_model::{ConformanceInput, ConformanceResult, Diagnostic, ResolutionSummary};

use crate::resolver::ResolverContext;

/// Sheet row of the first data row (row 1 holds the header).
pub const FIRST_DATA_ROW: usize = 2;

/// Results for a batch, in input order, plus the rows needing manual review.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub results: Vec<ConformanceResult>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BatchReport {
    fn from_results(rows: &[ConformanceInput], results: Vec<ConformanceResult>) -> Self {
        let diagnostics = rows
            .iter()
            .zip(&results)
            .enumerate()
            .filter(|(_, (_, result))| result.is_unresolved())
            .map(|(idx, (input, result))| {
                let row = idx + FIRST_DATA_ROW;
                warn!(
                    row,
                    text = %input.raw_text,
                    stage = %result.stage,
                    "no conformance rule matched"
                );
                Diagnostic {
                    row,
                    text: input.raw_text.clone(),
                    stage: result.stage,
                }
            })
            .collect();
        Self {
            results,
            diagnostics,
        }
    }

    pub fn summary(&self) -> ResolutionSummary {
        ResolutionSummary::from_results(&self.results)
    }

    /// Output cell values, one per input row.
    pub fn values(&self) -> Vec<String> {
        self.results
            .iter()
            .map(|result| result.expression.clone())
            .collect()
    }
}

pub fn resolve_batch(context: &ResolverContext, rows: &[ConformanceInput]) -> BatchReport {
    let results = rows.iter().map(|row| context.resolve(row)).collect();
    BatchReport::from_results(rows, results)
}

/// Resolve rows across `workers` threads; results keep input order.
pub fn resolve_batch_parallel(
    context: &ResolverContext,
    rows: &[ConformanceInput],
    workers: NonZeroUsize,
) -> BatchReport {
    let workers = workers.get().min(rows.len());
    if workers <= 1 {
        return resolve_batch(context, rows);
    }
    let chunk_size = rows.len().div_ceil(workers);
    let results: Vec<ConformanceResult> = thread::scope(|scope| {
        let handles: Vec<_> = rows
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|row| context.resolve(row))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|payload| panic::resume_unwind(payload))
            })
            .collect()
    });
    BatchReport::from_results(rows, results)
}

/// Worker count matching the available execution units.
pub fn default_workers() -> NonZeroUsize {
    thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}
