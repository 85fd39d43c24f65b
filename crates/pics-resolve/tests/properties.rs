//! Property tests: resolution is deterministic and independent of row order.

mod common;

use std::num::NonZeroUsize;

use proptest::prelude::*;

use pics_model::{ConformanceInput, VariableContext};
use pics_resolve::{resolve_batch, resolve_batch_parallel};

use common::sample_context;

fn conformance_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z.\\[\\]|&!(): ]{0,24}",
        prop::sample::select(vec![
            "M", "O", "[PIN | RID]", "[MACCNT]", "EEM.S: (IMPE & CUME)", "OCC.S.F01(PIR): M",
            "OCC.S: US", "[PIR & !US]", "OCC.S.A0000", "BOGUS.TOKEN",
        ])
        .prop_map(String::from),
    ]
}

fn variable_context() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["", "OCC.S.A0000", "OCC.C.A0001", "DRLK.S.F01", "EEM"])
        .prop_map(String::from)
}

fn rows() -> impl Strategy<Value = Vec<ConformanceInput>> {
    prop::collection::vec((conformance_text(), variable_context()), 0..32).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(text, variable)| ConformanceInput::new(text, variable))
            .collect()
    })
}

proptest! {
    #[test]
    fn resolution_is_deterministic(text in conformance_text(), variable in variable_context()) {
        let context = sample_context();
        let variable = VariableContext::new(variable);
        let first = context.resolve_text(&text, &variable);
        let second = context.resolve_text(&text, &variable);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn reordering_rows_does_not_change_results(rows in rows()) {
        let context = sample_context();
        let forward = resolve_batch(&context, &rows).results;
        let mut reversed_rows = rows.clone();
        reversed_rows.reverse();
        let mut backward = resolve_batch(&context, &reversed_rows).results;
        backward.reverse();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn parallel_batch_matches_sequential(rows in rows(), workers in 1usize..6) {
        let context = sample_context();
        let workers = NonZeroUsize::new(workers).unwrap();
        let sequential = resolve_batch(&context, &rows);
        let parallel = resolve_batch_parallel(&context, &rows, workers);
        prop_assert_eq!(sequential.results, parallel.results);
        prop_assert_eq!(sequential.diagnostics, parallel.diagnostics);
    }
}
