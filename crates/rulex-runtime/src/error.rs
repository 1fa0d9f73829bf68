//! Runtime error types

use thiserror::Error;

/// Runtime error
///
/// Raised while evaluating a compiled predicate when the data itself violates
/// an assumption the type registry cannot express.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// A value did not have the shape the node graph was built for
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// A nullable value was unwrapped while absent
    #[error("Missing value: {0} is null")]
    MissingValue(String),

    /// Positional index past the end of a sequence
    #[error("Index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Dictionary lookup with an absent key
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Error reported by a host accessor or macro
    #[error("Host error: {0}")]
    Host(String),
}

impl RuntimeError {
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        RuntimeError::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RuntimeError::IndexOutOfRange { index: 3, len: 1 }.to_string(),
            "Index 3 out of range for sequence of length 1"
        );
        assert_eq!(
            RuntimeError::KeyNotFound("region".to_string()).to_string(),
            "Key not found: region"
        );
        assert_eq!(
            RuntimeError::type_mismatch("record", "int").to_string(),
            "Type mismatch: expected record, got int"
        );
    }
}
