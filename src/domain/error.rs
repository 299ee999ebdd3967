//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Criterion errors are local precondition violations raised by tree operations.
/// None of them are transient; they are returned to the caller as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CriterionError {
    #[error("no such criterion: {path}")]
    NoSuchCriterion { path: String },

    #[error("not splitable criterion: {value}")]
    NotSplitable { value: String },

    #[error("criterion has no parent: {path}")]
    NoParent { path: String },

    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("duplicate criterion '{value}' under {path}")]
    DuplicateCriterion { path: String, value: String },
}

/// Result type for tree operations.
pub type CriterionResult<T> = Result<T, CriterionError>;
