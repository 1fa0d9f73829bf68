//! Resolved node model
//!
//! A [`Node`] pairs a static [`ValueType`] with the resolved expression that
//! produces it. Nodes are immutable once built and only ever composed into
//! larger nodes; every name lookup has already happened by the time a node
//! exists, so evaluation never consults the type registry.

use crate::error::Result;
use regex::Regex;
use rulex_core::{Value, ValueType};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Reads a member from a host object
pub type Getter = Arc<dyn Fn(&dyn Any) -> Result<Value> + Send + Sync>;

/// Computed extension on a host object: receiver plus converted literal arguments
pub type RecordFn = Arc<dyn Fn(&dyn Any, &[Value]) -> Result<Value> + Send + Sync>;

/// Computed extension or function over a runtime value
pub type ValueFn = Arc<dyn Fn(&Value, &[Value]) -> Result<Value> + Send + Sync>;

/// Named member accessor
#[derive(Clone)]
pub struct Accessor {
    pub name: String,
    pub get: Getter,
}

/// Named macro over a host object
#[derive(Clone)]
pub struct RecordMacro {
    pub name: String,
    pub call: RecordFn,
}

/// Named macro or function over a runtime value
#[derive(Clone)]
pub struct ValueFunction {
    pub name: String,
    pub call: ValueFn,
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Accessor({})", self.name)
    }
}

impl fmt::Debug for RecordMacro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordMacro({})", self.name)
    }
}

impl fmt::Debug for ValueFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueFunction({})", self.name)
    }
}

/// Boolean test applied by an operator node
#[derive(Debug, Clone)]
pub enum Kernel {
    Equals,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    /// Substring test
    Substring,
    /// Sequence membership of the right operand
    Element,
    StartsWith,
    EndsWith,
    /// Case-insensitive regex, compiled at build time
    Matches(Regex),
    /// Text of the left operand occurs in the right array
    In,
    /// Every element of the left sequence occurs in the right array
    AllIn,
    /// Every element of the right array occurs in the left sequence
    ContainsAll,
    /// Left is null or has no elements
    IsEmpty,
}

/// Resolved expression
#[derive(Debug, Clone)]
pub enum Expr {
    /// The evaluation target itself
    Context,
    /// Constant
    Literal(Value),
    /// Member read through a registered accessor
    Member {
        parent: Box<Node>,
        accessor: Accessor,
    },
    /// Positional access into a sequence
    Index { parent: Box<Node>, position: usize },
    /// Keyed access into a dictionary
    Lookup { parent: Box<Node>, key: String },
    /// Macro bound to a host object receiver
    Invoke {
        receiver: Box<Node>,
        function: RecordMacro,
        args: Vec<Value>,
    },
    /// Macro or function applied to a runtime value
    Apply {
        input: Box<Node>,
        function: ValueFunction,
        args: Vec<Value>,
    },
    /// Enum (or null) to its textual form
    EnumToText(Box<Node>),
    /// Nullable to its underlying value; absent values are an error
    Unwrap(Box<Node>),
    /// Boolean operator
    Operator {
        kernel: Kernel,
        left: Box<Node>,
        right: Box<Node>,
    },
    Not(Box<Node>),
    All(Vec<Node>),
    Any(Vec<Node>),
}

/// A resolved node: static type plus the expression producing it
#[derive(Debug, Clone)]
pub struct Node {
    pub ty: ValueType,
    pub expr: Expr,
}

impl Node {
    pub fn new(ty: ValueType, expr: Expr) -> Self {
        Self { ty, expr }
    }

    /// The evaluation target, typed as the registered record
    pub fn context(ty: ValueType) -> Self {
        Self::new(ty, Expr::Context)
    }

    pub fn literal(ty: ValueType, value: Value) -> Self {
        Self::new(ty, Expr::Literal(value))
    }

    pub fn boolean(value: bool) -> Self {
        Self::literal(ValueType::Bool, Value::Bool(value))
    }

    pub fn operator(kernel: Kernel, left: Node, right: Node) -> Self {
        Self::new(
            ValueType::Bool,
            Expr::Operator {
                kernel,
                left: Box::new(left),
                right: Box::new(right),
            },
        )
    }

    pub fn not(inner: Node) -> Self {
        Self::new(ValueType::Bool, Expr::Not(Box::new(inner)))
    }

    pub fn all(items: Vec<Node>) -> Self {
        Self::new(ValueType::Bool, Expr::All(items))
    }

    pub fn any(items: Vec<Node>) -> Self {
        Self::new(ValueType::Bool, Expr::Any(items))
    }

    pub fn is_context(&self) -> bool {
        matches!(self.expr, Expr::Context)
    }

    /// Path-like rendering used in error messages
    pub fn describe(&self) -> String {
        fn join(parent: &Node, step: String) -> String {
            let prefix = parent.describe();
            if prefix.is_empty() {
                step
            } else {
                format!("{}.{}", prefix, step)
            }
        }

        match &self.expr {
            Expr::Context => String::new(),
            Expr::Literal(value) => format!("{:?}", value),
            Expr::Member { parent, accessor } => join(parent, accessor.name.clone()),
            Expr::Index { parent, position } => format!("{}[{}]", parent.describe(), position),
            Expr::Lookup { parent, key } => format!("{}['{}']", parent.describe(), key),
            Expr::Invoke {
                receiver, function, ..
            } => join(receiver, format!("{}(..)", function.name)),
            Expr::Apply { input, function, .. } => join(input, format!("{}(..)", function.name)),
            Expr::EnumToText(inner) | Expr::Unwrap(inner) => inner.describe(),
            Expr::Operator {
                kernel, left, right, ..
            } => format!("{} {:?} {}", left.describe(), kernel, right.describe()),
            Expr::Not(inner) => format!("not ({})", inner.describe()),
            Expr::All(items) => format!("all[{}]", items.len()),
            Expr::Any(items) => format!("any[{}]", items.len()),
        }
    }
}
