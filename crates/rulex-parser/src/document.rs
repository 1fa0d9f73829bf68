//! Condition document parser
//!
//! A rule document maps rule ids to condition trees:
//!
//! ```yaml
//! adult_customers:
//!   all:
//!     - Age >= 18
//!     - left: Tier
//!       operator: In
//!       right: [Silver, Gold]
//! gold_only: Tier == Gold
//! ```
//!
//! Single-line conditions are parsed while loading, and every leaf path is
//! tokenized once so that malformed documents are rejected up front.

use crate::error::{ParseError, Result};
use crate::path::tokenize;
use rulex_core::condition::{ConditionParser, ConditionTree};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(DocumentFormat::Json),
            Some("yaml") | Some("yml") => Ok(DocumentFormat::Yaml),
            _ => Err(ParseError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Rule id to condition tree mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleDocument {
    pub rules: BTreeMap<String, ConditionTree>,
}

impl RuleDocument {
    /// Parse a JSON rule document
    pub fn from_json(content: &str) -> Result<Self> {
        let document: RuleDocument = serde_json::from_str(content)?;
        document.normalized()
    }

    /// Parse a YAML rule document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let document: RuleDocument = serde_yaml::from_str(content)?;
        document.normalized()
    }

    /// Parse a rule document in the given format
    pub fn parse(content: &str, format: DocumentFormat) -> Result<Self> {
        match format {
            DocumentFormat::Json => Self::from_json(content),
            DocumentFormat::Yaml => Self::from_yaml(content),
        }
    }

    /// Read and parse a rule document, detecting the format from the extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded rule document {:?} ({:?})", path, format);
        Self::parse(&content, format)
    }

    pub fn get(&self, id: &str) -> Option<&ConditionTree> {
        self.rules.get(id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn normalized(self) -> Result<Self> {
        let rules = self
            .rules
            .into_iter()
            .map(|(id, tree)| normalize_tree(tree).map(|tree| (id, tree)))
            .collect::<Result<_>>()?;
        Ok(Self { rules })
    }
}

/// Parse a single condition tree from JSON
pub fn parse_condition_json(content: &str) -> Result<ConditionTree> {
    normalize_tree(serde_json::from_str(content)?)
}

/// Parse a single condition tree from YAML
pub fn parse_condition_yaml(content: &str) -> Result<ConditionTree> {
    normalize_tree(serde_yaml::from_str(content)?)
}

/// Replace single-line conditions by leaves and check every leaf path
pub fn normalize_tree(tree: ConditionTree) -> Result<ConditionTree> {
    match tree {
        ConditionTree::Simple(text) => {
            let leaf = ConditionParser::new().parse_condition(&text)?;
            tokenize(&leaf.left)?;
            Ok(ConditionTree::Leaf(leaf))
        }
        ConditionTree::Leaf(leaf) => {
            tokenize(&leaf.left)?;
            Ok(ConditionTree::Leaf(leaf))
        }
        ConditionTree::Group(mut group) => {
            for branch in [&mut group.all, &mut group.any, &mut group.not] {
                if let Some(items) = branch.take() {
                    let items = items
                        .into_iter()
                        .map(normalize_tree)
                        .collect::<Result<Vec<_>>>()?;
                    *branch = Some(items);
                }
            }
            Ok(ConditionTree::Group(group))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulex_core::Operator;

    #[test]
    fn test_from_json_normalizes_simple_conditions() {
        let document = RuleDocument::from_json(r#"{"adult": "Age >= 18"}"#).unwrap();
        assert_eq!(
            document.get("adult"),
            Some(&ConditionTree::leaf("Age", Operator::GreaterThanOrEqual, "18"))
        );
    }

    #[test]
    fn test_from_yaml_nested_groups() {
        let yaml = r#"
vip:
  any:
    - Tier == Gold
    - all:
        - Orders.Count() > 10
        - Tags contains vip
"#;
        let document = RuleDocument::from_yaml(yaml).unwrap();
        assert_eq!(document.len(), 1);
        assert_eq!(document.get("vip").map(ConditionTree::leaf_count), Some(3));
    }

    #[test]
    fn test_malformed_leaf_path_is_rejected() {
        let result = RuleDocument::from_json(
            r#"{"broken": {"left": "Orders.Latest(3", "operator": "IsEmpty"}}"#,
        );
        assert!(matches!(result, Err(ParseError::MalformedPath { .. })));
    }

    #[test]
    fn test_invalid_simple_condition_is_rejected() {
        let result = parse_condition_json(r#""no operator here""#);
        assert!(matches!(result, Err(ParseError::InvalidCondition(_))));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.JSON")).unwrap(), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("a.yml")).unwrap(), DocumentFormat::Yaml);
        assert!(DocumentFormat::from_path(Path::new("a.toml")).is_err());
    }
}
