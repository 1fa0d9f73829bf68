//! Node graph evaluator
//!
//! Walks a resolved [`Node`] graph against one evaluation target. The target
//! is borrowed for the duration of the call; nested host objects reached
//! through accessors are shared handles, never copies of the target itself.

use crate::error::{Result, RuntimeError};
use crate::node::{Expr, Node};
use crate::operators::apply_kernel;
use rulex_core::Value;
use std::any::Any;

/// What a node evaluates to when it is used as a receiver
enum Target<'a> {
    /// The borrowed evaluation target
    Root(&'a dyn Any),
    /// Any other value
    Value(Value),
}

impl Node {
    /// Evaluate this node against a target object
    pub fn evaluate(&self, root: &dyn Any) -> Result<Value> {
        match &self.expr {
            Expr::Context => Err(RuntimeError::InvalidOperation(
                "the evaluation target has no value form".to_string(),
            )),

            Expr::Literal(value) => Ok(value.clone()),

            Expr::Member { parent, accessor } => match parent.evaluate_target(root)? {
                Target::Root(target) => (accessor.get)(target),
                Target::Value(Value::Record(record)) => {
                    let target: &dyn Any = &*record;
                    (accessor.get)(target)
                }
                Target::Value(Value::Null) => Ok(Value::Null),
                Target::Value(other) => Err(RuntimeError::type_mismatch(
                    parent.ty.to_string(),
                    other.kind(),
                )),
            },

            Expr::Index { parent, position } => match parent.evaluate(root)? {
                Value::List(mut items) => {
                    let len = items.len();
                    if *position < len {
                        Ok(items.swap_remove(*position))
                    } else {
                        Err(RuntimeError::IndexOutOfRange {
                            index: *position,
                            len,
                        })
                    }
                }
                Value::Null => Ok(Value::Null),
                other => Err(RuntimeError::type_mismatch("list", other.kind())),
            },

            Expr::Lookup { parent, key } => match parent.evaluate(root)? {
                Value::Map(mut map) => map
                    .remove(key)
                    .ok_or_else(|| RuntimeError::KeyNotFound(key.clone())),
                Value::Null => Ok(Value::Null),
                other => Err(RuntimeError::type_mismatch("map", other.kind())),
            },

            Expr::Invoke {
                receiver,
                function,
                args,
            } => match receiver.evaluate_target(root)? {
                Target::Root(target) => (function.call)(target, args),
                Target::Value(Value::Record(record)) => {
                    let target: &dyn Any = &*record;
                    (function.call)(target, args)
                }
                Target::Value(Value::Null) => Ok(Value::Null),
                Target::Value(other) => Err(RuntimeError::type_mismatch(
                    receiver.ty.to_string(),
                    other.kind(),
                )),
            },

            Expr::Apply {
                input,
                function,
                args,
            } => {
                let value = input.evaluate(root)?;
                (function.call)(&value, args)
            }

            Expr::EnumToText(inner) => match inner.evaluate(root)? {
                Value::Enum(name) | Value::String(name) => Ok(Value::String(name)),
                Value::Null => Ok(Value::Null),
                other => Err(RuntimeError::type_mismatch("enum", other.kind())),
            },

            Expr::Unwrap(inner) => match inner.evaluate(root)? {
                Value::Null => Err(RuntimeError::MissingValue(inner.describe())),
                value => Ok(value),
            },

            Expr::Operator {
                kernel,
                left,
                right,
            } => {
                let left = left.evaluate(root)?;
                let right = right.evaluate(root)?;
                apply_kernel(kernel, &left, &right).map(Value::Bool)
            }

            Expr::Not(inner) => inner.evaluate_bool(root).map(|b| Value::Bool(!b)),

            Expr::All(items) => {
                for item in items {
                    if !item.evaluate_bool(root)? {
                        return Ok(Value::Bool(false));
                    }
                }
                Ok(Value::Bool(true))
            }

            Expr::Any(items) => {
                for item in items {
                    if item.evaluate_bool(root)? {
                        return Ok(Value::Bool(true));
                    }
                }
                Ok(Value::Bool(false))
            }
        }
    }

    /// Evaluate a node that must produce a boolean
    pub fn evaluate_bool(&self, root: &dyn Any) -> Result<bool> {
        match self.evaluate(root)? {
            Value::Bool(b) => Ok(b),
            other => Err(RuntimeError::type_mismatch("bool", other.kind())),
        }
    }

    fn evaluate_target<'a>(&self, root: &'a dyn Any) -> Result<Target<'a>> {
        match &self.expr {
            Expr::Context => Ok(Target::Root(root)),
            _ => self.evaluate(root).map(Target::Value),
        }
    }
}
