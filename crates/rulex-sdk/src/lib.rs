//! RULEX SDK
//!
//! High-level API for loading condition rules and evaluating them against
//! registered host types.

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;

// Re-export main types
pub use builder::RuleEngineBuilder;
pub use config::EngineConfig;
pub use engine::RuleEngine;
pub use error::{Result, SdkError};

// Re-export commonly used types from dependencies
pub use rulex_compiler::{
    CompilerOptions, DynPredicate, FunctionBuilder, Predicate, TypeRegistry, ValueExtractor,
};
pub use rulex_core::condition::{ConditionTree, LeafCondition};
pub use rulex_core::{EnumType, Operator, Value, ValueType};
pub use rulex_runtime::RuntimeError;
