//! Error types for quadag Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Malformed quadruple on line {line}: {reason}")]
    MalformedQuadruple { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
