//! CLI library components for the PICS conformance resolver.

pub mod logging;
pub mod sheet;
