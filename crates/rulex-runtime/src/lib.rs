//! RULEX Runtime - evaluation of resolved node graphs
//!
//! The compiler resolves every path segment and operator up front and hands
//! the result over as a [`Node`] graph. This crate evaluates such graphs
//! against host objects:
//! - [`node`]: the resolved, immutable node model
//! - [`executor`]: the tree-walking evaluator
//! - [`operators`]: operator kernels
//! - [`extract`]: typed extraction of evaluated values

pub mod error;
pub mod executor;
pub mod extract;
pub mod node;
pub mod operators;

// Re-export main types
pub use error::{Result, RuntimeError};
pub use extract::FromValue;
pub use node::{Accessor, Expr, Getter, Kernel, Node, RecordFn, RecordMacro, ValueFn, ValueFunction};
