//! Error types for dot-path tokenizing, traversal, and search criteria.

use thiserror::Error;

/// Errors raised by the dot-path operations.
///
/// Absent keys are never errors: reads report them as `None` and existence
/// checks as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DotPathError {
    /// The root handed to a traversal or transform is not a mapping.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
    /// A path supplied through dynamic input is not a string.
    #[error("Invalid path: {message}")]
    InvalidPath { message: String },
    /// A search criteria document is malformed.
    #[error("Invalid search criteria: {message}")]
    InvalidCriteria { message: String },
}

impl DotPathError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        DotPathError::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_path(message: impl Into<String>) -> Self {
        DotPathError::InvalidPath {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_criteria(message: impl Into<String>) -> Self {
        DotPathError::InvalidCriteria {
            message: message.into(),
        }
    }
}
