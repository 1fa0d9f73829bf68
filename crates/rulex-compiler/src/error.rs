//! Compiler error types
//!
//! Every error here is raised while building a predicate, before any data
//! is evaluated. None of them is retried; the condition has to be fixed.

use rulex_core::ValueType;
use rulex_parser::ParseError;
use thiserror::Error;

/// Compiler error
#[derive(Error, Debug)]
pub enum CompileError {
    /// Unbalanced parentheses in a path
    #[error("Malformed path '{path}': unbalanced parenthesis at position {position}")]
    MalformedPath { path: String, position: usize },

    /// No macro, function, indexer or member matched a segment
    #[error("Cannot resolve segment '{segment}' on type {ty}")]
    UnresolvedSegment { segment: String, ty: ValueType },

    /// Operand shapes do not satisfy an operator's contract
    #[error("Operator {operator} cannot be applied to {left} and {right}")]
    OperandType {
        operator: String,
        left: String,
        right: String,
    },

    /// A literal cannot be converted to its target type
    #[error("Cannot convert literal '{literal}' to {target}")]
    LiteralConversion { literal: String, target: String },

    /// Target type missing from the registry
    #[error("Type is not registered: {0}")]
    UnregisteredType(String),

    /// Function recognized but not applicable
    #[error("Function {function} cannot be applied to {ty}")]
    InvalidFunctionCall { function: String, ty: String },

    /// Condition root is not boolean
    #[error("Condition does not produce a boolean but {0}")]
    NonBooleanCondition(ValueType),

    /// Value path cannot be read as the requested Rust type
    #[error("Path of type {actual} cannot be read as {expected}")]
    ResultType { expected: String, actual: String },

    /// Invalid single-line condition
    #[error("Invalid condition: {0}")]
    Condition(#[from] rulex_core::condition::ParseError),

    /// Other parser error
    #[error("Parse error: {0}")]
    Parse(ParseError),
}

impl From<ParseError> for CompileError {
    fn from(error: ParseError) -> Self {
        match error {
            ParseError::MalformedPath { path, position } => {
                CompileError::MalformedPath { path, position }
            }
            other => CompileError::Parse(other),
        }
    }
}

impl CompileError {
    pub(crate) fn unresolved(segment: &str, ty: &ValueType) -> Self {
        CompileError::UnresolvedSegment {
            segment: segment.to_string(),
            ty: ty.clone(),
        }
    }

    pub(crate) fn literal(literal: &str, target: impl ToString) -> Self {
        CompileError::LiteralConversion {
            literal: literal.to_string(),
            target: target.to_string(),
        }
    }
}

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;
