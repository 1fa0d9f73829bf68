//! RULEX Compiler - condition tree to predicate compiler
//!
//! This crate resolves condition trees against registered host types and
//! produces reusable predicates:
//! - [`registry`]: member accessor tables and macros per host type
//! - [`resolver`]: path segment resolution (macro, function, indexer, member)
//! - [`operators`]: validating operator builders
//! - [`compiler`]: the compile entry points

pub mod coercion;
pub mod compiler;
pub mod condition;
pub mod error;
pub mod functions;
pub mod invocation;
pub mod operators;
pub mod registry;
pub mod resolver;

// Re-export main types
pub use compiler::{Compiler, CompilerOptions, DynPredicate, Predicate, ValueExtractor};
pub use condition::{BuildContext, ConditionExpression};
pub use error::{CompileError, Result};
pub use functions::{BuiltinFunction, BuiltinFunctions, FunctionBuilder, FunctionCall};
pub use registry::{MacroBody, MacroDef, MemberDef, RecordBuilder, TypeDef, TypeRegistry};
pub use resolver::SegmentResolver;
