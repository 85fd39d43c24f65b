#![deny(unsafe_code)]

pub mod catalog;
pub mod conformance;
pub mod error;
pub mod rules;
pub mod scope;

pub use catalog::{FeatureCatalog, FeatureRecord, scope_prefix_of};
pub use conformance::{
    ConformanceInput, ConformanceResult, Diagnostic, ResolutionSummary, Stage, VariableContext,
};
pub use error::{ModelError, Result};
pub use rules::{ColumnMapping, RuleConfig};
pub use scope::ScopeVariableSet;
