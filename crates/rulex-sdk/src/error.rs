//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Parser error
    #[error("Parser error: {0}")]
    ParseError(#[from] rulex_parser::ParseError),

    /// Compiler error
    #[error("Compiler error: {0}")]
    CompileError(#[from] rulex_compiler::CompileError),

    /// A rule failed to compile for the requested type
    #[error("Rule '{rule_id}' failed to compile: {source}")]
    RuleCompile {
        rule_id: String,
        #[source]
        source: rulex_compiler::CompileError,
    },

    /// Runtime error
    #[error("Runtime error: {0}")]
    RuntimeError(#[from] rulex_runtime::RuntimeError),

    /// Unknown rule id
    #[error("Rule not found: {0}")]
    RuleNotFound(String),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
