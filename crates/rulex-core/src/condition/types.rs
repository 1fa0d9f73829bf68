//! Condition tree types

use crate::ast::operator::Operator;
use serde::{Deserialize, Deserializer, Serialize};

/// A node of a condition tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ConditionTree {
    /// Path-operator-literal condition
    Leaf(LeafCondition),
    /// Logical group (all/any/not)
    Group(ConditionGroup),
    /// Single-line condition (e.g., "Age >= 30")
    Simple(String),
}

/// An atomic condition: `left` path, operator tag and `right` literal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LeafCondition {
    /// Path into the target object (e.g., "Orders.Latest(3).Total")
    pub left: String,
    /// Operator tag
    pub operator: Operator,
    /// Literal operand, kept as text until the operator decides how to read it
    #[serde(default, deserialize_with = "literal_text")]
    pub right: String,
}

/// Logical group with all/any/not branches
///
/// Every present branch contributes and the contributions are AND-ed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConditionGroup {
    /// All conditions must be true (AND logic)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all: Option<Vec<ConditionTree>>,
    /// At least one condition must be true (OR logic)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any: Option<Vec<ConditionTree>>,
    /// Negation of the conjunction of the conditions (NOT ALL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not: Option<Vec<ConditionTree>>,
}

impl LeafCondition {
    pub fn new(left: impl Into<String>, operator: Operator, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            operator,
            right: right.into(),
        }
    }

    /// A condition for a unary operator such as `IsEmpty`
    pub fn unary(left: impl Into<String>, operator: Operator) -> Self {
        Self::new(left, operator, String::new())
    }
}

impl ConditionTree {
    pub fn leaf(left: impl Into<String>, operator: Operator, right: impl Into<String>) -> Self {
        ConditionTree::Leaf(LeafCondition::new(left, operator, right))
    }

    pub fn all(items: Vec<ConditionTree>) -> Self {
        ConditionTree::Group(ConditionGroup {
            all: Some(items),
            ..Default::default()
        })
    }

    pub fn any(items: Vec<ConditionTree>) -> Self {
        ConditionTree::Group(ConditionGroup {
            any: Some(items),
            ..Default::default()
        })
    }

    pub fn not(items: Vec<ConditionTree>) -> Self {
        ConditionTree::Group(ConditionGroup {
            not: Some(items),
            ..Default::default()
        })
    }

    /// Number of leaf conditions in the tree. Single-line conditions count as one leaf.
    pub fn leaf_count(&self) -> usize {
        match self {
            ConditionTree::Leaf(_) | ConditionTree::Simple(_) => 1,
            ConditionTree::Group(group) => group
                .branches()
                .flat_map(|(_, items)| items.iter())
                .map(ConditionTree::leaf_count)
                .sum(),
        }
    }
}

/// Branch of a condition group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBranch {
    All,
    Any,
    Not,
}

impl ConditionGroup {
    /// Present branches in all, any, not order
    pub fn branches(&self) -> impl Iterator<Item = (GroupBranch, &[ConditionTree])> {
        [
            (GroupBranch::All, self.all.as_deref()),
            (GroupBranch::Any, self.any.as_deref()),
            (GroupBranch::Not, self.not.as_deref()),
        ]
        .into_iter()
        .filter_map(|(branch, items)| items.map(|items| (branch, items)))
    }
}

/// Accepts any scalar or array for `right`; non-strings keep their JSON text
fn literal_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}
