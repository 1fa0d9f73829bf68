//! Node coercions applied after every resolved segment
//!
//! Enums (and nullable enums) become their textual form so string literals
//! and string operators apply to them. Nullable numerics are unwrapped to
//! their underlying type unless the caller asked to keep them nullable.

use rulex_core::ValueType;
use rulex_runtime::{Expr, Node};

/// Replace an enum-typed node with its textual form
pub fn normalize_enum(node: Node) -> Node {
    if node.ty.is_enum() || node.ty.is_nullable_enum() {
        Node::new(ValueType::String, Expr::EnumToText(Box::new(node)))
    } else {
        node
    }
}

/// Replace a nullable numeric node with its underlying value
pub fn unwrap_nullable_numeric(node: Node) -> Node {
    if node.ty.is_nullable_numeric() {
        let inner = node.ty.underlying().clone();
        Node::new(inner, Expr::Unwrap(Box::new(node)))
    } else {
        node
    }
}

/// Enum normalization first, then (optionally) nullable unwrapping
pub fn coerce(node: Node, unwrap_nullable: bool) -> Node {
    let node = normalize_enum(node);
    if unwrap_nullable {
        unwrap_nullable_numeric(node)
    } else {
        node
    }
}
