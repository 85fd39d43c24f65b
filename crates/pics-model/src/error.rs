use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("rule configuration does not name the conformance column")]
    MissingConformanceColumn,
    #[error("direct value must not be blank")]
    BlankDirectValue,
}

pub type Result<T> = std::result::Result<T, ModelError>;
