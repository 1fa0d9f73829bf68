use super::{operand_error, OperatorBuilder};
use crate::error::Result;
use rulex_core::{Operator, ValueType};
use rulex_runtime::{Kernel, Node};

/// Substring test on strings, membership test on sequences
#[derive(Debug)]
pub struct ContainsOperator {
    kernel: Kernel,
    left: Node,
    right: Node,
}

impl ContainsOperator {
    pub fn new(left: Node, right: Node) -> Result<Self> {
        let kernel = match left.ty.underlying() {
            ValueType::String if right.ty == ValueType::String => Kernel::Substring,
            ty if ty.element_type().is_some_and(|e| e.is_assignable_from(&right.ty)) => {
                Kernel::Element
            }
            _ => return Err(operand_error(Operator::Contains, &left.ty, Some(&right.ty))),
        };
        Ok(Self {
            kernel,
            left,
            right,
        })
    }
}

impl OperatorBuilder for ContainsOperator {
    fn create(self) -> Node {
        Node::operator(self.kernel, self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulex_core::Value;

    fn evaluate(left: Node, right: Node) -> bool {
        ContainsOperator::new(left, right)
            .unwrap()
            .create()
            .evaluate_bool(&())
            .unwrap()
    }

    #[test]
    fn test_substring() {
        let left = Node::literal(ValueType::String, Value::from("hello world"));
        assert!(evaluate(left.clone(), Node::literal(ValueType::String, Value::from("lo w"))));
        assert!(!evaluate(left, Node::literal(ValueType::String, Value::from("xyz"))));
    }

    #[test]
    fn test_sequence_membership() {
        let left = Node::literal(ValueType::sequence(ValueType::Int), Value::list([1i64, 2, 3]));
        assert!(evaluate(left.clone(), Node::literal(ValueType::Int, Value::Int(2))));
        assert!(!evaluate(left, Node::literal(ValueType::Int, Value::Int(9))));
    }

    #[test]
    fn test_mismatched_element_type() {
        let left = Node::literal(ValueType::sequence(ValueType::Int), Value::list([1i64]));
        let right = Node::literal(ValueType::String, Value::from("1"));
        assert!(ContainsOperator::new(left, right).is_err());
    }
}
