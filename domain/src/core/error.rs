//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Model hierarchy must contain at least one model")]
    EmptyHierarchy,

    #[error("Invalid model: {0}")]
    InvalidModel(String),
}
