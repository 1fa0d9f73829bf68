//! RULEX Core - Core types and definitions for the RULEX condition compiler
//!
//! This crate provides the fundamental types used across the RULEX workspace:
//! - Runtime values and static value types
//! - Condition operators
//! - Condition tree definitions and the condition string parser
//! - Error types

pub mod ast;
pub mod condition;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use ast::Operator;
pub use error::CoreError;
pub use types::{EnumType, Value, ValueType};
