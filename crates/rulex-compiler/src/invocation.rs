//! Literal conversion and macro invocation
//!
//! Literals in conditions are always text. They are converted once, when the
//! node is built, to the type the other side of the operation expects.

use crate::error::{CompileError, Result};
use crate::registry::{MacroBody, MacroDef};
use rulex_core::{Value, ValueType};
use rulex_parser::path::split_arguments;
use rulex_runtime::{Expr, Node, RecordMacro, ValueFunction};

/// Convert a textual literal to a value of `target`
pub fn convert_literal(literal: &str, target: &ValueType) -> Result<Value> {
    match target {
        ValueType::Any | ValueType::String => Ok(Value::String(literal.to_string())),
        ValueType::Enum(def) => def
            .parse_variant(literal.trim())
            .map(Value::enumeration)
            .ok_or_else(|| CompileError::literal(literal, target)),
        ValueType::Int => literal
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| CompileError::literal(literal, target)),
        ValueType::Float => literal
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| CompileError::literal(literal, target)),
        ValueType::Bool => match literal.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(CompileError::literal(literal, target)),
        },
        // Text stays verbatim so "" and "null" compare as strings
        ValueType::Nullable(inner) if **inner == ValueType::String => {
            Ok(Value::String(literal.to_string()))
        }
        ValueType::Nullable(inner) => {
            let trimmed = literal.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
                Ok(Value::Null)
            } else {
                convert_literal(literal, inner)
            }
        }
        ValueType::Sequence(element) | ValueType::Array(element) => parse_literal_array(literal)?
            .iter()
            .map(|item| convert_literal(item, element))
            .collect::<Result<Vec<_>>>()
            .map(Value::List),
        ValueType::Map(_) | ValueType::Record(_) => Err(CompileError::literal(literal, target)),
    }
}

/// Split an array literal into its items
///
/// Accepts a JSON array (`["a", "b"]`), a bracketed list of bare words
/// (`[a, b]`) or a comma-separated list (`a, b`). Non-string JSON items keep
/// their JSON text.
pub fn parse_literal_array(literal: &str) -> Result<Vec<String>> {
    let trimmed = literal.trim();
    if !trimmed.starts_with('[') {
        return Ok(split_list(trimmed));
    }

    if let Ok(items) = serde_json::from_str::<Vec<serde_json::Value>>(trimmed) {
        return Ok(items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect());
    }

    trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .map(split_list)
        .ok_or_else(|| CompileError::literal(literal, ValueType::array(ValueType::String)))
}

fn split_list(text: &str) -> Vec<String> {
    split_arguments(text)
        .into_iter()
        .filter(|item| !item.is_empty())
        .collect()
}

/// Build the node invoking `def` on `receiver` with textual arguments
///
/// Arguments are converted to the declared parameter types. A macro declared
/// without parameters ignores whatever arguments the segment carries.
pub fn build_macro_call(receiver: Node, def: &MacroDef, args: &[String]) -> Result<Node> {
    let args = def
        .params
        .iter()
        .zip(args)
        .map(|(ty, literal)| convert_literal(literal, ty))
        .collect::<Result<Vec<_>>>()?;

    let expr = match &def.body {
        MacroBody::Record(call) => Expr::Invoke {
            receiver: Box::new(receiver),
            function: RecordMacro {
                name: def.name.clone(),
                call: call.clone(),
            },
            args,
        },
        MacroBody::Value(call) => Expr::Apply {
            input: Box::new(receiver),
            function: ValueFunction {
                name: def.name.clone(),
                call: call.clone(),
            },
            args,
        },
    };

    Ok(Node::new(def.returns.clone(), expr))
}
