use super::{operand_error, OperatorBuilder};
use crate::error::Result;
use rulex_core::{Operator, Value, ValueType};
use rulex_runtime::{Kernel, Node};

/// Null, or a sequence, dictionary or string without elements
#[derive(Debug)]
pub struct IsEmptyOperator {
    left: Node,
}

impl IsEmptyOperator {
    pub fn new(left: Node) -> Result<Self> {
        let ty = left.ty.underlying();
        if ty.is_sequence() || matches!(ty, ValueType::Map(_) | ValueType::String) {
            Ok(Self { left })
        } else {
            Err(operand_error(Operator::IsEmpty, &left.ty, None))
        }
    }
}

impl OperatorBuilder for IsEmptyOperator {
    fn create(self) -> Node {
        Node::operator(
            Kernel::IsEmpty,
            self.left,
            Node::literal(ValueType::Any, Value::Null),
        )
    }
}
