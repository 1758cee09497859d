//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur while building models or validating samples.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Malformed model construction (self coupling, non-finite coefficient).
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// An assignment does not cover a variable the caller declared.
    #[error("Malformed assignment: missing value for variable '{variable}'")]
    MalformedAssignment {
        /// The declared variable that had no value.
        variable: String,
    },

    /// Variable name is not part of the model.
    #[error("Unknown variable '{0}'")]
    UnknownVariable(String),

    /// Constraint was given the wrong number of variables.
    #[error("Constraint '{constraint}' takes {expected} variables, got {got}")]
    ArityMismatch {
        /// Name of the constraint.
        constraint: String,
        /// Expected number of variables.
        expected: usize,
        /// Actual number of variables provided.
        got: usize,
    },

    /// Constraint has no quadratic encoding.
    #[error("Constraint '{0}' cannot be reduced to an energy model")]
    NotReducible(String),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
