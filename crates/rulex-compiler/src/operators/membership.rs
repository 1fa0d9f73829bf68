//! Membership operators over string arrays
//!
//! `AllIn` and `ContainsAll` take the same operand shapes and test opposite
//! subset directions.

use super::{operand_error, OperatorBuilder};
use crate::error::Result;
use rulex_core::Operator;
use rulex_runtime::{Kernel, Node};

fn check_array(operator: Operator, left: &Node, right: &Node) -> Result<()> {
    if right.ty.is_string_array() {
        Ok(())
    } else {
        Err(operand_error(operator, &left.ty, Some(&right.ty)))
    }
}

/// Text of a scalar left operand occurs in the right array
#[derive(Debug)]
pub struct InOperator {
    left: Node,
    right: Node,
}

impl InOperator {
    pub fn new(left: Node, right: Node) -> Result<Self> {
        if !left.ty.is_scalar() {
            return Err(operand_error(Operator::In, &left.ty, Some(&right.ty)));
        }
        check_array(Operator::In, &left, &right)?;
        Ok(Self { left, right })
    }
}

impl OperatorBuilder for InOperator {
    fn create(self) -> Node {
        Node::operator(Kernel::In, self.left, self.right)
    }
}

/// Every element of the left sequence occurs in the right array
#[derive(Debug)]
pub struct AllInOperator {
    left: Node,
    right: Node,
}

impl AllInOperator {
    pub fn new(left: Node, right: Node) -> Result<Self> {
        if !left.ty.is_string_sequence() {
            return Err(operand_error(Operator::AllIn, &left.ty, Some(&right.ty)));
        }
        check_array(Operator::AllIn, &left, &right)?;
        Ok(Self { left, right })
    }
}

impl OperatorBuilder for AllInOperator {
    fn create(self) -> Node {
        Node::operator(Kernel::AllIn, self.left, self.right)
    }
}

/// Every element of the right array occurs in the left sequence
#[derive(Debug)]
pub struct ContainsAllOperator {
    left: Node,
    right: Node,
}

impl ContainsAllOperator {
    pub fn new(left: Node, right: Node) -> Result<Self> {
        if !left.ty.is_string_sequence() {
            return Err(operand_error(Operator::ContainsAll, &left.ty, Some(&right.ty)));
        }
        check_array(Operator::ContainsAll, &left, &right)?;
        Ok(Self { left, right })
    }
}

impl OperatorBuilder for ContainsAllOperator {
    fn create(self) -> Node {
        Node::operator(Kernel::ContainsAll, self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulex_core::{Value, ValueType};

    fn strings(items: &[&str]) -> Value {
        Value::list(items.iter().copied())
    }

    fn sequence(items: &[&str]) -> Node {
        Node::literal(ValueType::sequence(ValueType::String), strings(items))
    }

    fn array(items: &[&str]) -> Node {
        Node::literal(ValueType::array(ValueType::String), strings(items))
    }

    fn evaluate(node: Node) -> bool {
        node.evaluate_bool(&()).unwrap()
    }

    #[test]
    fn test_in() {
        let abc = array(&["A", "B", "C"]);
        let b = Node::literal(ValueType::String, Value::from("B"));
        let d = Node::literal(ValueType::String, Value::from("D"));
        assert!(evaluate(InOperator::new(b, abc.clone()).unwrap().create()));
        assert!(!evaluate(InOperator::new(d, abc).unwrap().create()));
    }

    #[test]
    fn test_all_in_and_contains_all_directions() {
        let left = sequence(&["A", "B"]);
        let right = array(&["A", "B", "C"]);
        assert!(evaluate(
            AllInOperator::new(left.clone(), right.clone()).unwrap().create()
        ));
        assert!(!evaluate(ContainsAllOperator::new(left, right).unwrap().create()));
    }

    #[test]
    fn test_shape_validation() {
        let number = Node::literal(ValueType::Int, Value::Int(1));
        assert!(AllInOperator::new(number.clone(), array(&["1"])).is_err());
        assert!(InOperator::new(sequence(&["A"]), array(&["A"])).is_err());
        assert!(InOperator::new(number, sequence(&["1"])).is_err());
    }
}
