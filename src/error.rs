//! Error types for the condition tree core

use crate::tree::Path;
use thiserror::Error;

/// Main error type for the condition tree core
///
/// Path-related variants are contract errors: they mean a path was computed
/// against a different tree revision than the one being mutated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConditionTreeError {
    #[error("Path not found: {0}")]
    PathNotFound(Path),

    #[error("Expected a group at {0}")]
    NotAGroup(Path),

    #[error("Expected a condition at {0}")]
    NotALeaf(Path),

    #[error("Empty path")]
    EmptyPath,

    #[error("Nesting depth {depth} exceeds maximum of {max}")]
    DepthExceeded { depth: usize, max: usize },

    #[error("Cannot remove the only child of the group at {0}")]
    LastChildOfGroup(Path),

    #[error("Unknown condition key: {0}")]
    UnknownLeafKey(String),

    #[error("Invalid logic operator: {0}")]
    InvalidLogic(String),

    #[error("Condition id not found: {0}")]
    IdNotFound(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

impl From<serde_json::Error> for ConditionTreeError {
    fn from(err: serde_json::Error) -> Self {
        ConditionTreeError::DeserializationError(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<ConditionTreeError> for pyo3::PyErr {
    fn from(err: ConditionTreeError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyIndexError, PyKeyError, PyValueError};

        match err {
            ConditionTreeError::PathNotFound(_)
            | ConditionTreeError::NotAGroup(_)
            | ConditionTreeError::NotALeaf(_)
            | ConditionTreeError::EmptyPath
            | ConditionTreeError::LastChildOfGroup(_) => PyIndexError::new_err(err.to_string()),
            ConditionTreeError::IdNotFound(_) => PyKeyError::new_err(err.to_string()),
            ConditionTreeError::DepthExceeded { .. }
            | ConditionTreeError::UnknownLeafKey(_)
            | ConditionTreeError::InvalidLogic(_)
            | ConditionTreeError::DeserializationError(_) => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Result type alias for the condition tree core
pub type Result<T> = std::result::Result<T, ConditionTreeError>;
