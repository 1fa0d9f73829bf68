//! Builder pattern for RuleEngine

use crate::config::EngineConfig;
use crate::engine::RuleEngine;
use crate::error::Result;
use rulex_compiler::{Compiler, CompilerOptions, FunctionBuilder, TypeRegistry};
use rulex_core::condition::ConditionTree;
use rulex_parser::document::{normalize_tree, parse_condition_yaml};
use rulex_parser::RuleDocument;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Builder for RuleEngine
///
/// # Example
///
/// ```rust,ignore
/// use rulex_sdk::{RuleEngineBuilder, Value, ValueType};
///
/// let engine = RuleEngineBuilder::new()
///     .register_types(|registry| {
///         registry
///             .register::<Customer>("Customer")
///             .member("Age", ValueType::Int, |c: &Customer| Value::Int(c.age));
///     })
///     .add_rule_file("rules/customers.yaml")
///     .add_rule_content("adults", "Age >= 18")
///     .build()?;
///
/// let adult = engine.evaluate("adults", &customer)?;
/// ```
pub struct RuleEngineBuilder {
    config: EngineConfig,
    registry: TypeRegistry,
    functions: Option<Arc<dyn FunctionBuilder>>,
    rules: Vec<(String, ConditionTree)>,
}

impl RuleEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            registry: TypeRegistry::new(),
            functions: None,
            rules: Vec::new(),
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Register host types, enums and macros
    pub fn register_types<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut TypeRegistry),
    {
        setup(&mut self.registry);
        self
    }

    /// Use an already populated registry
    pub fn with_registry(mut self, registry: TypeRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the built-in function library
    pub fn with_functions(mut self, functions: Arc<dyn FunctionBuilder>) -> Self {
        self.functions = Some(functions);
        self
    }

    /// Add a rule document file
    pub fn add_rule_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.rule_files.push(path.into());
        self
    }

    /// Add multiple rule document files
    pub fn add_rule_files(mut self, paths: Vec<PathBuf>) -> Self {
        self.config.rule_files.extend(paths);
        self
    }

    /// Add a rule given as JSON or YAML condition text
    ///
    /// # Arguments
    /// * `id` - Rule id
    /// * `content` - Condition tree, e.g. `Age >= 18` or `{ all: [...] }`
    pub fn add_rule_content(mut self, id: impl Into<String>, content: impl Into<String>) -> Self {
        self.config.rule_contents.push((id.into(), content.into()));
        self
    }

    /// Add a rule built in code
    pub fn add_rule(mut self, id: impl Into<String>, tree: ConditionTree) -> Self {
        self.rules.push((id.into(), tree));
        self
    }

    /// Set compiler options
    pub fn with_compiler_options(mut self, options: CompilerOptions) -> Self {
        self.config.compiler_options = options;
        self
    }

    /// Enable predicate caching
    pub fn enable_cache(mut self, enable: bool) -> Self {
        self.config.enable_cache = enable;
        self
    }

    /// Load every rule and build the engine
    pub fn build(self) -> Result<RuleEngine> {
        let mut rules = BTreeMap::new();

        for path in &self.config.rule_files {
            let document = RuleDocument::from_file(path)?;
            tracing::info!(path = %path.display(), rules = document.len(), "Loaded rule file");
            for (id, tree) in document.rules {
                insert_rule(&mut rules, id, tree);
            }
        }

        for (id, content) in &self.config.rule_contents {
            let tree = parse_condition_yaml(content)?;
            insert_rule(&mut rules, id.clone(), tree);
        }

        for (id, tree) in self.rules {
            insert_rule(&mut rules, id, normalize_tree(tree)?);
        }

        tracing::info!(rules = rules.len(), "Rule engine ready");

        let mut compiler = Compiler::new(self.registry).with_options(self.config.compiler_options);
        if let Some(functions) = self.functions {
            compiler = compiler.with_functions(functions);
        }

        Ok(RuleEngine::new(compiler, rules, self.config.enable_cache))
    }
}

fn insert_rule(rules: &mut BTreeMap<String, ConditionTree>, id: String, tree: ConditionTree) {
    if rules.contains_key(&id) {
        tracing::warn!(rule_id = %id, "Duplicate rule id, later definition wins");
    }
    rules.insert(id, tree);
}

impl Default for RuleEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
