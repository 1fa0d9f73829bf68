//! Parser error types

use std::path::PathBuf;
use thiserror::Error;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// Unbalanced parentheses in a path
    #[error("Malformed path '{path}': unbalanced parenthesis at position {position}")]
    MalformedPath { path: String, position: usize },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Invalid single-line condition
    #[error("Invalid condition: {0}")]
    InvalidCondition(#[from] rulex_core::condition::ParseError),

    /// Unknown document format
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// Document could not be read
    #[error("I/O error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_path_message() {
        let error = ParseError::MalformedPath {
            path: "Foo(Bar".to_string(),
            position: 3,
        };
        assert_eq!(
            error.to_string(),
            "Malformed path 'Foo(Bar': unbalanced parenthesis at position 3"
        );
    }

    #[test]
    fn test_io_error_names_path() {
        let error = ParseError::Io {
            path: PathBuf::from("rules/missing.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(error.to_string().contains("rules/missing.yaml"));
    }
}
