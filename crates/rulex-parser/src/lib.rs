//! RULEX Parser - path tokenizer and condition document parser
//!
//! This crate turns text into the structures the compiler consumes:
//! - Paths (`Orders.Latest(3).Total`) into ordered, classified segments
//! - JSON / YAML documents into condition trees

pub mod document;
pub mod error;
pub mod path;

// Re-export main parser types
pub use document::{DocumentFormat, RuleDocument};
pub use error::{ParseError, Result};
pub use path::{tokenize, IndexKey, Segment};
