//! Conformance expression resolver.
//!
//! Reduces raw conformance text scraped from certification tables
//! (`"EEM.S: (IMPE & CUME)"`, `"[PIN | RID]"`, `"OCC.S.F01(PIR): M"`) to
//! canonical expressions over registered PICS variables.
//!
//! ```ignore
//! use pics_resolve::ResolverContext;
//!
//! let context = ResolverContext::new(rules, scopes, catalog);
//! let result = context.resolve_text("EEM.S: (IMPE & CUME)", &VariableContext::new("EEM.S.A0000"));
//! assert_eq!(result.expression, "EEM.S.F01 & EEM.S.F02");
//! ```

#![deny(unsafe_code)]

pub mod batch;
pub mod mapper;
pub mod predicates;
pub mod resolver;
pub mod stages;
pub mod tokenizer;

pub use batch::{
    BatchReport, FIRST_DATA_ROW, default_workers, resolve_batch, resolve_batch_parallel,
};
pub use mapper::{map_expression, resolve_token};
pub use resolver::ResolverContext;
pub use stages::StageOutcome;
pub use tokenizer::{Token, tokenize};
