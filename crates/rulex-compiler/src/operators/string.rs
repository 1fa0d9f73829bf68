use super::{operand_error, OperatorBuilder};
use crate::error::{CompileError, Result};
use rulex_core::{Operator, Value, ValueType};
use rulex_runtime::{Expr, Kernel, Node};

/// Default compiled-regex size limit
pub const DEFAULT_REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

fn check_strings(operator: Operator, left: &Node, right: &Node) -> Result<()> {
    if *left.ty.underlying() == ValueType::String && right.ty == ValueType::String {
        Ok(())
    } else {
        Err(operand_error(operator, &left.ty, Some(&right.ty)))
    }
}

/// Prefix test
#[derive(Debug)]
pub struct StartsWithOperator {
    left: Node,
    right: Node,
}

impl StartsWithOperator {
    pub fn new(left: Node, right: Node) -> Result<Self> {
        check_strings(Operator::StartsWith, &left, &right)?;
        Ok(Self { left, right })
    }
}

impl OperatorBuilder for StartsWithOperator {
    fn create(self) -> Node {
        Node::operator(Kernel::StartsWith, self.left, self.right)
    }
}

/// Suffix test
#[derive(Debug)]
pub struct EndsWithOperator {
    left: Node,
    right: Node,
}

impl EndsWithOperator {
    pub fn new(left: Node, right: Node) -> Result<Self> {
        check_strings(Operator::EndsWith, &left, &right)?;
        Ok(Self { left, right })
    }
}

impl OperatorBuilder for EndsWithOperator {
    fn create(self) -> Node {
        Node::operator(Kernel::EndsWith, self.left, self.right)
    }
}

/// Case-insensitive regex match; the pattern must be a literal
#[derive(Debug)]
pub struct MatchesOperator {
    regex: regex::Regex,
    left: Node,
    right: Node,
}

impl MatchesOperator {
    pub fn new(left: Node, right: Node) -> Result<Self> {
        Self::with_size_limit(left, right, DEFAULT_REGEX_SIZE_LIMIT)
    }

    pub fn with_size_limit(left: Node, right: Node, size_limit: usize) -> Result<Self> {
        check_strings(Operator::Matches, &left, &right)?;
        let Expr::Literal(Value::String(pattern)) = &right.expr else {
            return Err(operand_error(Operator::Matches, &left.ty, Some(&right.ty)));
        };
        let regex = regex::RegexBuilder::new(pattern)
            .case_insensitive(true)
            .size_limit(size_limit)
            .build()
            .map_err(|_| CompileError::literal(pattern, "regex"))?;
        Ok(Self { regex, left, right })
    }
}

impl OperatorBuilder for MatchesOperator {
    fn create(self) -> Node {
        Node::operator(Kernel::Matches(self.regex), self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Node {
        Node::literal(ValueType::String, Value::from(value))
    }

    fn evaluate(node: Node) -> bool {
        node.evaluate_bool(&()).unwrap()
    }

    #[test]
    fn test_prefix_and_suffix() {
        assert!(evaluate(StartsWithOperator::new(text("testing"), text("test")).unwrap().create()));
        assert!(evaluate(EndsWithOperator::new(text("testing"), text("ing")).unwrap().create()));
        assert!(!evaluate(EndsWithOperator::new(text("testing"), text("test")).unwrap().create()));
    }

    #[test]
    fn test_matches_ignores_case() {
        let node = MatchesOperator::new(text("Order-123"), text("^order-\\d+$"))
            .unwrap()
            .create();
        assert!(evaluate(node));
    }

    #[test]
    fn test_size_limit_rejects_large_patterns() {
        let result = MatchesOperator::with_size_limit(text("a"), text("\\w{1000}"), 64);
        assert!(matches!(result, Err(CompileError::LiteralConversion { .. })));
    }

    #[test]
    fn test_non_string_left_rejected() {
        let number = Node::literal(ValueType::Int, Value::Int(1));
        assert!(StartsWithOperator::new(number, text("1")).is_err());
    }
}
