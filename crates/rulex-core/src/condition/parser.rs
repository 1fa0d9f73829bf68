//! Single-line condition parser
//!
//! Parses condition strings like:
//! - `Age == 30`
//! - `Tier != "Gold"`
//! - `Country in ["US", "CA"]`
//! - `Orders.Latest(3).Total > 100`
//! - `Tags is_empty`

use super::types::{ConditionTree, LeafCondition};
use crate::ast::operator::Operator;

/// Infix operators, longer spellings first so ties resolve to the longest match
const INFIX_OPERATORS: [(&str, Operator); 16] = [
    (" contains_all ", Operator::ContainsAll),
    (" not_contains ", Operator::NotContains),
    (" starts_with ", Operator::StartsWith),
    (" ends_with ", Operator::EndsWith),
    (" contains ", Operator::Contains),
    (" matches ", Operator::Matches),
    (" all_in ", Operator::AllIn),
    (" not in ", Operator::NotIn),
    (" in ", Operator::In),
    ("!=", Operator::NotEquals),
    (">=", Operator::GreaterThanOrEqual),
    ("<=", Operator::LessThanOrEqual),
    ("==", Operator::Equals),
    (">", Operator::GreaterThan),
    ("<", Operator::LessThan),
    ("=", Operator::Equals),
];

/// Postfix operators
const POSTFIX_OPERATORS: [(&str, Operator); 2] = [
    (" is_not_empty", Operator::IsNotEmpty),
    (" is_empty", Operator::IsEmpty),
];

/// Condition parser for single-line conditions
#[derive(Debug, Default)]
pub struct ConditionParser;

/// Parse error
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub condition: String,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse '{}': {}", self.condition, self.message)
    }
}

impl std::error::Error for ParseError {}

impl ParseError {
    fn new(message: &str, condition: &str) -> Self {
        Self {
            message: message.to_string(),
            condition: condition.to_string(),
        }
    }
}

impl ConditionParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a single condition string into a leaf condition
    ///
    /// The operator is the one occurring first in the string (outside of
    /// parentheses, brackets and quotes); on ties the longest spelling wins.
    pub fn parse_condition(&self, condition: &str) -> Result<LeafCondition, ParseError> {
        let condition = condition.trim();
        if condition.is_empty() {
            return Err(ParseError::new("Empty condition", condition));
        }

        for (suffix, op) in POSTFIX_OPERATORS.iter() {
            if let Some(field) = condition.strip_suffix(suffix) {
                let field = field.trim();
                if field.is_empty() {
                    return Err(ParseError::new("Empty field name", condition));
                }
                log::debug!("Parsed postfix condition '{}' as {}", condition, op);
                return Ok(LeafCondition::unary(field, *op));
            }
        }

        let (pos, op_str, op) = find_operator(condition)
            .ok_or_else(|| ParseError::new("No operator found", condition))?;

        let field = condition[..pos].trim();
        if field.is_empty() {
            return Err(ParseError::new("Empty field name", condition));
        }

        let value = parse_literal(&condition[pos + op_str.len()..]);
        log::debug!("Parsed condition '{}' as {} {} {:?}", condition, field, op, value);

        Ok(LeafCondition::new(field, op, value))
    }

    /// Parse multiple condition strings into an `all` group
    pub fn parse_all(&self, conditions: &[String]) -> Result<ConditionTree, ParseError> {
        let items: Result<Vec<_>, _> = conditions
            .iter()
            .map(|c| self.parse_condition(c).map(ConditionTree::Leaf))
            .collect();
        Ok(ConditionTree::all(items?))
    }

    /// Parse multiple condition strings into an `any` group
    pub fn parse_any(&self, conditions: &[String]) -> Result<ConditionTree, ParseError> {
        let items: Result<Vec<_>, _> = conditions
            .iter()
            .map(|c| self.parse_condition(c).map(ConditionTree::Leaf))
            .collect();
        Ok(ConditionTree::any(items?))
    }
}

/// Locate the earliest top-level operator
fn find_operator(condition: &str) -> Option<(usize, &'static str, Operator)> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for (pos, c) in condition.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(' | '[') => depth += 1,
            (None, ')' | ']') => depth = depth.saturating_sub(1),
            (None, _) if depth == 0 => {
                let rest = &condition[pos..];
                if let Some((op_str, op)) = INFIX_OPERATORS
                    .iter()
                    .find(|(op_str, _)| rest.starts_with(op_str))
                {
                    return Some((pos, op_str, *op));
                }
            }
            _ => {}
        }
    }

    None
}

/// Strip surrounding quotes from a literal; anything else is kept verbatim
fn parse_literal(value: &str) -> String {
    let value = value.trim();
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted {
        value[1..value.len() - 1].to_string()
    } else {
        value.to_string()
    }
}
