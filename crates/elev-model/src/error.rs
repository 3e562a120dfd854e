use thiserror::Error;

/// Errors raised when parsing model values from user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid year id: {0}")]
    InvalidYearId(String),
    #[error("invalid organization number: {0}")]
    InvalidOrgNr(String),
    #[error("invalid trinn '{0}' (expected Alle, Vg1, Vg2 or Vg3)")]
    InvalidTrinn(String),
    #[error("invalid kjoenn '{0}' (expected Alle, Gutt or Jente)")]
    InvalidKjoenn(String),
    #[error("unknown table: {0}")]
    UnknownTable(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
