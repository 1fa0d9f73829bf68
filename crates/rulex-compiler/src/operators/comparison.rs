use super::{operand_error, OperatorBuilder};
use crate::error::Result;
use rulex_core::{Operator, ValueType};
use rulex_runtime::{Kernel, Node};

/// Equality and ordering of scalars
#[derive(Debug)]
pub struct ComparisonOperator {
    kernel: Kernel,
    left: Node,
    right: Node,
}

impl ComparisonOperator {
    /// `operator` must be `Equals` or one of the four orderings
    pub fn new(operator: Operator, left: Node, right: Node) -> Result<Self> {
        let l = left.ty.underlying();
        let r = right.ty.underlying();
        let kernel = match operator {
            Operator::Equals if comparable(l, r) => Kernel::Equals,
            Operator::GreaterThan if orderable(l, r) => Kernel::GreaterThan,
            Operator::GreaterThanOrEqual if orderable(l, r) => Kernel::GreaterThanOrEqual,
            Operator::LessThan if orderable(l, r) => Kernel::LessThan,
            Operator::LessThanOrEqual if orderable(l, r) => Kernel::LessThanOrEqual,
            _ => return Err(operand_error(operator, &left.ty, Some(&right.ty))),
        };
        Ok(Self {
            kernel,
            left,
            right,
        })
    }
}

fn comparable(left: &ValueType, right: &ValueType) -> bool {
    left.is_scalar()
        && right.is_scalar()
        && (left.is_assignable_from(right) || right.is_assignable_from(left))
}

fn orderable(left: &ValueType, right: &ValueType) -> bool {
    (left.is_numeric() && right.is_numeric())
        || (*left == ValueType::String && *right == ValueType::String)
}

impl OperatorBuilder for ComparisonOperator {
    fn create(self) -> Node {
        Node::operator(self.kernel, self.left, self.right)
    }
}
