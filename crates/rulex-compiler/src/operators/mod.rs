//! Operator builders
//!
//! Every operator is a struct whose constructor validates the operand shapes
//! and whose [`OperatorBuilder::create`] produces the boolean node. Shape
//! violations are reported here, before any data is evaluated.
//!
//! Negated operators (`NotEquals`, `NotIn`, `NotContains`, `IsNotEmpty`) are
//! their positive builder wrapped in a `Not` node.

mod comparison;
mod contains;
mod empty;
mod membership;
mod string;

pub use comparison::ComparisonOperator;
pub use contains::ContainsOperator;
pub use empty::IsEmptyOperator;
pub use membership::{AllInOperator, ContainsAllOperator, InOperator};
pub use string::{EndsWithOperator, MatchesOperator, StartsWithOperator, DEFAULT_REGEX_SIZE_LIMIT};

use crate::compiler::CompilerOptions;
use crate::error::{CompileError, Result};
use crate::invocation::{convert_literal, parse_literal_array};
use rulex_core::{Operator, Value, ValueType};
use rulex_runtime::Node;

/// Validated operator, ready to produce its node
pub trait OperatorBuilder {
    fn create(self) -> Node;
}

pub(crate) fn operand_error(operator: Operator, left: &ValueType, right: Option<&ValueType>) -> CompileError {
    CompileError::OperandType {
        operator: operator.name().to_string(),
        left: left.to_string(),
        right: right.map_or_else(|| "nothing".to_string(), ToString::to_string),
    }
}

/// Build the node for `left <operator> literal`
pub fn build_operator(
    operator: Operator,
    left: Node,
    literal: &str,
    options: &CompilerOptions,
) -> Result<Node> {
    tracing::trace!(operator = operator.name(), left = %left.ty, literal, "Building operator");

    let node = match operator {
        Operator::Equals
        | Operator::GreaterThan
        | Operator::GreaterThanOrEqual
        | Operator::LessThan
        | Operator::LessThanOrEqual => {
            let right = comparison_literal(operator, &left, literal)?;
            ComparisonOperator::new(operator, left, right)?.create()
        }
        Operator::NotEquals => {
            let right = comparison_literal(operator, &left, literal)?;
            let equals = ComparisonOperator::new(Operator::Equals, left, right)
                .map_err(|e| rename(e, operator))?;
            Node::not(equals.create())
        }
        Operator::Contains => {
            let right = contains_literal(&left, literal)?;
            ContainsOperator::new(left, right)?.create()
        }
        Operator::NotContains => {
            let right = contains_literal(&left, literal)?;
            let contains = ContainsOperator::new(left, right).map_err(|e| rename(e, operator))?;
            Node::not(contains.create())
        }
        Operator::StartsWith => StartsWithOperator::new(left, text_literal(literal))?.create(),
        Operator::EndsWith => EndsWithOperator::new(left, text_literal(literal))?.create(),
        Operator::Matches => {
            MatchesOperator::with_size_limit(left, text_literal(literal), options.regex_size_limit)?
                .create()
        }
        Operator::In => InOperator::new(left, array_literal(literal)?)?.create(),
        Operator::NotIn => {
            let within = InOperator::new(left, array_literal(literal)?).map_err(|e| rename(e, operator))?;
            Node::not(within.create())
        }
        Operator::AllIn => AllInOperator::new(left, array_literal(literal)?)?.create(),
        Operator::ContainsAll => ContainsAllOperator::new(left, array_literal(literal)?)?.create(),
        Operator::IsEmpty => IsEmptyOperator::new(left)?.create(),
        Operator::IsNotEmpty => {
            let empty = IsEmptyOperator::new(left).map_err(|e| rename(e, operator))?;
            Node::not(empty.create())
        }
    };

    Ok(node)
}

fn rename(error: CompileError, operator: Operator) -> CompileError {
    match error {
        CompileError::OperandType { left, right, .. } => CompileError::OperandType {
            operator: operator.name().to_string(),
            left,
            right,
        },
        other => other,
    }
}

fn text_literal(literal: &str) -> Node {
    Node::literal(ValueType::String, Value::String(literal.to_string()))
}

fn array_literal(literal: &str) -> Result<Node> {
    let items = parse_literal_array(literal)?;
    Ok(Node::literal(ValueType::array(ValueType::String), Value::list(items)))
}

/// Right operand of a comparison: the literal converted to the left type
fn comparison_literal(operator: Operator, left: &Node, literal: &str) -> Result<Node> {
    if !left.ty.is_scalar() {
        return Err(operand_error(operator, &left.ty, Some(&ValueType::String)));
    }
    let value = convert_literal(literal, &left.ty)?;
    Ok(Node::literal(left.ty.clone(), value))
}

/// Right operand of `Contains`: text for strings, element type for sequences
fn contains_literal(left: &Node, literal: &str) -> Result<Node> {
    match left.ty.element_type() {
        Some(element) if element.is_scalar() => {
            let value = convert_literal(literal, element)?;
            Ok(Node::literal(element.clone(), value))
        }
        _ => Ok(text_literal(literal)),
    }
}
