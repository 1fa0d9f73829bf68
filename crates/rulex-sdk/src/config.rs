//! Configuration types for RuleEngine

use crate::error::{Result, SdkError};
use rulex_compiler::CompilerOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rule document path(s), JSON or YAML by extension
    pub rule_files: Vec<PathBuf>,

    /// Rule contents (id, condition tree) - alternative to file paths
    #[serde(skip)]
    pub rule_contents: Vec<(String, String)>,

    /// Compiler options
    pub compiler_options: CompilerOptions,

    /// Cache compiled predicates per (rule id, target type)
    pub enable_cache: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            rule_files: Vec::new(),
            rule_contents: Vec::new(),
            compiler_options: CompilerOptions::default(),
            enable_cache: true,
        }
    }

    /// Load a configuration from YAML
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| SdkError::ConfigError(e.to_string()))
    }

    /// Load a configuration from JSON
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| SdkError::ConfigError(e.to_string()))
    }

    /// Add a rule file
    pub fn with_rule_file(mut self, path: PathBuf) -> Self {
        self.rule_files.push(path);
        self
    }

    /// Add a rule given as JSON or YAML condition text
    pub fn with_rule_content(mut self, id: impl Into<String>, content: impl Into<String>) -> Self {
        self.rule_contents.push((id.into(), content.into()));
        self
    }

    pub fn with_compiler_options(mut self, options: CompilerOptions) -> Self {
        self.compiler_options = options;
        self
    }

    /// Enable predicate caching
    pub fn enable_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert!(config.enable_cache);
        assert!(config.rule_files.is_empty());
        assert!(config.compiler_options.unwrap_nullable_numerics);
    }

    #[test]
    fn test_from_yaml() {
        let config = EngineConfig::from_yaml_str(
            r#"
rule_files:
  - rules/customers.yaml
enable_cache: false
compiler_options:
  unwrap_nullable_numerics: false
"#,
        )
        .unwrap();
        assert_eq!(config.rule_files, vec![PathBuf::from("rules/customers.yaml")]);
        assert!(!config.enable_cache);
        assert!(!config.compiler_options.unwrap_nullable_numerics);
        assert_eq!(
            config.compiler_options.regex_size_limit,
            CompilerOptions::default().regex_size_limit
        );
    }

    #[test]
    fn test_from_json() {
        let config = EngineConfig::from_json_str(r#"{ "rule_files": ["a.json", "b.yml"] }"#).unwrap();
        assert_eq!(config.rule_files.len(), 2);
        assert!(config.enable_cache);
    }

    #[test]
    fn test_invalid_config() {
        let result = EngineConfig::from_json_str(r#"{ "enable_cache": "sometimes" }"#);
        assert!(matches!(result, Err(SdkError::ConfigError(_))));
    }

    #[test]
    fn test_builder_style() {
        let config = EngineConfig::new()
            .with_rule_file(PathBuf::from("rules.yaml"))
            .with_rule_content("adults", "Age >= 18")
            .enable_cache(false);
        assert_eq!(config.rule_files.len(), 1);
        assert_eq!(config.rule_contents[0].0, "adults");
        assert!(!config.enable_cache);
    }
}
