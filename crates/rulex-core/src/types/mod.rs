//! Type system for RULEX
//!
//! - [`Value`]: runtime values flowing through compiled predicates
//! - [`ValueType`]: static types used while resolving paths and validating operands

pub mod value;
pub mod value_type;

pub use value::Value;
pub use value_type::{EnumType, ValueType};
