#![deny(unsafe_code)]

pub mod csv_utils;
pub mod error;
pub mod loaders;

pub use crate::csv_utils::{CsvTable, get_field, read_csv_table};
pub use crate::error::{Result, StandardsError};
pub use crate::loaders::{
    PICS_NAME_COLUMN, VARIABLE_COLUMN, conformance_inputs, feature_catalog_from_rows,
    load_conformance_sheet, load_feature_catalog, load_rule_config, load_scope_variables,
    load_validated_rule_config,
};
