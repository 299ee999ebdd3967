//! Crate-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::CriterionError;

#[derive(Error, Debug)]
pub enum CritreeError {
    #[error("{0}")]
    Criterion(#[from] CriterionError),

    #[error("config error: {message}")]
    Config { message: String },
}

pub type CritreeResult<T> = Result<T, CritreeError>;
