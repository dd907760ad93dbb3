//! Executor error types
//!
//! Expected "cannot push down" outcomes never reach here; these are the
//! truly unexpected conditions of engine-side evaluation.

use thiserror::Error;

use crate::schema::SchemaError;

/// Errors raised while executing a plan
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExecutorError {
    /// The plan referenced a table the schema does not contain
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// An expression cannot be evaluated engine-side
    #[error("cannot evaluate expression: {0}")]
    Eval(String),
}

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;
