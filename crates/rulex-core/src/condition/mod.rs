//! Condition Tree Module
//!
//! Data types for condition trees and the parser for single-line conditions.
//! The same tree shape is used by rule documents (JSON or YAML) and by code
//! that builds conditions programmatically.
//!
//! # Syntax
//!
//! ## Leaf conditions
//! ```yaml
//! left: Orders.Latest(3).Total
//! operator: GreaterThan
//! right: "100"
//! ```
//!
//! ## Single-line conditions
//! ```yaml
//! - Age >= 30
//! - Tags all_in ["vip", "beta", "internal"]
//! - Nickname is_empty
//! ```
//!
//! ## Groups (all/any/not)
//! ```yaml
//! all:
//!   - Age >= 30
//!   - any:
//!       - Country in ["US", "CA"]
//!       - left: Tier
//!         operator: Equals
//!         right: Gold
//!   - not:
//!       - Name starts_with "test"
//! ```

mod parser;
mod types;

pub use parser::{ConditionParser, ParseError};
pub use types::{ConditionGroup, ConditionTree, GroupBranch, LeafCondition};
