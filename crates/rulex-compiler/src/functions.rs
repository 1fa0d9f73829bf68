//! Built-in path functions
//!
//! A function segment is recognized by a [`FunctionBuilder`] after macro
//! lookup has failed. The builder both recognizes the segment text and builds
//! the node applying the function to its parent.

use crate::error::{CompileError, Result};
use rulex_core::{Value, ValueType};
use rulex_parser::Segment;
use rulex_runtime::{Expr, Node, RuntimeError, ValueFn, ValueFunction};
use std::sync::Arc;

/// A recognized function segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<String>,
}

/// Recognizes and builds function segments
pub trait FunctionBuilder: Send + Sync {
    /// Return the call described by `segment` if this builder handles it
    fn recognize(&self, segment: &str) -> Option<FunctionCall>;

    /// Build the node applying `call` to `parent`
    fn build(&self, parent: Node, call: &FunctionCall) -> Result<Node>;
}

/// Functions available without registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinFunction {
    /// Number of elements of a sequence or dictionary
    Count,
    /// Whether a sequence has at least one element
    Any,
    /// Character count of a string
    Length,
    Lower,
    Upper,
    Trim,
}

impl BuiltinFunction {
    /// Look up a built-in function by name, ignoring case
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "count" => Some(BuiltinFunction::Count),
            "any" => Some(BuiltinFunction::Any),
            "length" => Some(BuiltinFunction::Length),
            "lower" => Some(BuiltinFunction::Lower),
            "upper" => Some(BuiltinFunction::Upper),
            "trim" => Some(BuiltinFunction::Trim),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinFunction::Count => "Count",
            BuiltinFunction::Any => "Any",
            BuiltinFunction::Length => "Length",
            BuiltinFunction::Lower => "Lower",
            BuiltinFunction::Upper => "Upper",
            BuiltinFunction::Trim => "Trim",
        }
    }

    /// Result type when applied to `input`, if applicable
    fn result_type(&self, input: &ValueType) -> Option<ValueType> {
        let input = input.underlying();
        match self {
            BuiltinFunction::Count if input.is_sequence() || matches!(input, ValueType::Map(_)) => {
                Some(ValueType::Int)
            }
            BuiltinFunction::Any if input.is_sequence() => Some(ValueType::Bool),
            BuiltinFunction::Length if *input == ValueType::String => Some(ValueType::Int),
            BuiltinFunction::Lower | BuiltinFunction::Upper | BuiltinFunction::Trim
                if *input == ValueType::String =>
            {
                Some(ValueType::String)
            }
            _ => None,
        }
    }

    fn body(&self) -> ValueFn {
        match self {
            BuiltinFunction::Count => Arc::new(count),
            BuiltinFunction::Any => Arc::new(any),
            BuiltinFunction::Length => Arc::new(length),
            BuiltinFunction::Lower => Arc::new(|v: &Value, _: &[Value]| map_text(v, str::to_lowercase)),
            BuiltinFunction::Upper => Arc::new(|v: &Value, _: &[Value]| map_text(v, str::to_uppercase)),
            BuiltinFunction::Trim => Arc::new(|v: &Value, _: &[Value]| map_text(v, |s| s.trim().to_string())),
        }
    }
}

fn count(value: &Value, _: &[Value]) -> rulex_runtime::Result<Value> {
    match value {
        Value::List(items) => Ok(Value::Int(items.len() as i64)),
        Value::Map(map) => Ok(Value::Int(map.len() as i64)),
        Value::Null => Ok(Value::Int(0)),
        other => Err(RuntimeError::type_mismatch("list", other.kind())),
    }
}

fn any(value: &Value, _: &[Value]) -> rulex_runtime::Result<Value> {
    match value {
        Value::List(items) => Ok(Value::Bool(!items.is_empty())),
        Value::Null => Ok(Value::Bool(false)),
        other => Err(RuntimeError::type_mismatch("list", other.kind())),
    }
}

fn length(value: &Value, _: &[Value]) -> rulex_runtime::Result<Value> {
    match value {
        Value::String(s) => Ok(Value::Int(s.chars().count() as i64)),
        Value::Null => Ok(Value::Int(0)),
        other => Err(RuntimeError::type_mismatch("string", other.kind())),
    }
}

fn map_text(value: &Value, f: impl Fn(&str) -> String) -> rulex_runtime::Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(f(s))),
        Value::Null => Ok(Value::Null),
        other => Err(RuntimeError::type_mismatch("string", other.kind())),
    }
}

/// The built-in function set: `Count()`, `Any()`, `Length()`, `Lower()`,
/// `Upper()` and `Trim()`, matched ignoring case
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFunctions;

impl FunctionBuilder for BuiltinFunctions {
    fn recognize(&self, segment: &str) -> Option<FunctionCall> {
        match Segment::parse(segment) {
            Segment::Call { name, args } if BuiltinFunction::parse(&name).is_some() => {
                Some(FunctionCall { name, args })
            }
            _ => None,
        }
    }

    fn build(&self, parent: Node, call: &FunctionCall) -> Result<Node> {
        let invalid = |ty: &ValueType| CompileError::InvalidFunctionCall {
            function: call.name.clone(),
            ty: ty.to_string(),
        };

        let function = BuiltinFunction::parse(&call.name).ok_or_else(|| invalid(&parent.ty))?;
        if !call.args.is_empty() {
            return Err(CompileError::InvalidFunctionCall {
                function: call.name.clone(),
                ty: format!("{} with {} argument(s)", parent.ty, call.args.len()),
            });
        }
        let ty = function
            .result_type(&parent.ty)
            .ok_or_else(|| invalid(&parent.ty))?;

        tracing::trace!(function = function.name(), input = %parent.ty, "Building function call");
        Ok(Node::new(
            ty,
            Expr::Apply {
                input: Box::new(parent),
                function: ValueFunction {
                    name: function.name().to_string(),
                    call: function.body(),
                },
                args: Vec::new(),
            },
        ))
    }
}
