//! Condition operators

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operator tag of a leaf condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    // Comparison operators
    /// Equal (==)
    #[serde(alias = "==", alias = "equals", alias = "eq")]
    Equals,
    /// Not equal (!=)
    #[serde(alias = "!=", alias = "not_equals", alias = "ne")]
    NotEquals,
    /// Greater than (>)
    #[serde(alias = ">", alias = "greater_than", alias = "gt")]
    GreaterThan,
    /// Greater than or equal (>=)
    #[serde(alias = ">=", alias = "greater_than_or_equal", alias = "ge")]
    GreaterThanOrEqual,
    /// Less than (<)
    #[serde(alias = "<", alias = "less_than", alias = "lt")]
    LessThan,
    /// Less than or equal (<=)
    #[serde(alias = "<=", alias = "less_than_or_equal", alias = "le")]
    LessThanOrEqual,

    // String / sequence operators
    /// Substring or sequence membership
    #[serde(alias = "contains")]
    Contains,
    /// Negated `Contains`
    #[serde(alias = "not_contains")]
    NotContains,
    /// Prefix test
    #[serde(alias = "starts_with")]
    StartsWith,
    /// Suffix test
    #[serde(alias = "ends_with")]
    EndsWith,
    /// Case-insensitive regex match
    #[serde(alias = "matches", alias = "regex")]
    Matches,

    // Membership operators
    /// Left value occurs in the right array
    #[serde(alias = "in")]
    In,
    /// Negated `In`
    #[serde(alias = "not_in")]
    NotIn,
    /// Every element of the left sequence occurs in the right array
    #[serde(alias = "all_in")]
    AllIn,
    /// Every element of the right array occurs in the left sequence
    #[serde(alias = "contains_all")]
    ContainsAll,

    // Unary operators
    /// Left sequence is null or has no elements
    #[serde(alias = "is_empty")]
    IsEmpty,
    /// Negated `IsEmpty`
    #[serde(alias = "is_not_empty")]
    IsNotEmpty,
}

impl Operator {
    /// Every operator, in declaration order
    pub const ALL: [Operator; 17] = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::GreaterThan,
        Operator::GreaterThanOrEqual,
        Operator::LessThan,
        Operator::LessThanOrEqual,
        Operator::Contains,
        Operator::NotContains,
        Operator::StartsWith,
        Operator::EndsWith,
        Operator::Matches,
        Operator::In,
        Operator::NotIn,
        Operator::AllIn,
        Operator::ContainsAll,
        Operator::IsEmpty,
        Operator::IsNotEmpty,
    ];

    /// Canonical tag name
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Equals => "Equals",
            Operator::NotEquals => "NotEquals",
            Operator::GreaterThan => "GreaterThan",
            Operator::GreaterThanOrEqual => "GreaterThanOrEqual",
            Operator::LessThan => "LessThan",
            Operator::LessThanOrEqual => "LessThanOrEqual",
            Operator::Contains => "Contains",
            Operator::NotContains => "NotContains",
            Operator::StartsWith => "StartsWith",
            Operator::EndsWith => "EndsWith",
            Operator::Matches => "Matches",
            Operator::In => "In",
            Operator::NotIn => "NotIn",
            Operator::AllIn => "AllIn",
            Operator::ContainsAll => "ContainsAll",
            Operator::IsEmpty => "IsEmpty",
            Operator::IsNotEmpty => "IsNotEmpty",
        }
    }

    /// Returns true if the operator takes no right operand
    pub fn is_unary(&self) -> bool {
        matches!(self, Operator::IsEmpty | Operator::IsNotEmpty)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operator {
    type Err = CoreError;

    /// Accepts the canonical name, snake_case or the symbolic comparison forms
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let symbolic = match s {
            "==" => Some(Operator::Equals),
            "!=" => Some(Operator::NotEquals),
            ">" => Some(Operator::GreaterThan),
            ">=" => Some(Operator::GreaterThanOrEqual),
            "<" => Some(Operator::LessThan),
            "<=" => Some(Operator::LessThanOrEqual),
            _ => None,
        };
        if let Some(op) = symbolic {
            return Ok(op);
        }

        let folded: String = s.chars().filter(|c| *c != '_').collect();
        Operator::ALL
            .iter()
            .find(|op| op.name().eq_ignore_ascii_case(&folded))
            .copied()
            .ok_or_else(|| CoreError::UnknownOperator(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_from_str() {
        assert_eq!("AllIn".parse::<Operator>().unwrap(), Operator::AllIn);
        assert_eq!("all_in".parse::<Operator>().unwrap(), Operator::AllIn);
        assert_eq!("contains_all".parse::<Operator>().unwrap(), Operator::ContainsAll);
        assert_eq!(">=".parse::<Operator>().unwrap(), Operator::GreaterThanOrEqual);
        assert!("between".parse::<Operator>().is_err());
    }

    #[test]
    fn test_operator_name_round_trip() {
        for op in Operator::ALL {
            assert_eq!(op.name().parse::<Operator>().unwrap(), op);
        }
    }

    #[test]
    fn test_operator_is_unary() {
        assert!(Operator::IsEmpty.is_unary());
        assert!(Operator::IsNotEmpty.is_unary());
        assert!(!Operator::In.is_unary());
    }

    #[test]
    fn test_operator_serde_aliases() {
        let op: Operator = serde_json::from_str(r#""==""#).unwrap();
        assert_eq!(op, Operator::Equals);
        let op: Operator = serde_json::from_str(r#""starts_with""#).unwrap();
        assert_eq!(op, Operator::StartsWith);
        assert_eq!(serde_json::to_string(&Operator::ContainsAll).unwrap(), r#""ContainsAll""#);
    }
}
