//! Rule engine
//!
//! Holds the loaded condition trees and compiles them on demand. Compiled
//! predicates are cached per (rule id, target type); a cache miss compiles
//! outside the map lock and then inserts the result.

use crate::error::{Result, SdkError};
use dashmap::DashMap;
use rulex_compiler::{Compiler, Predicate, ValueExtractor};
use rulex_core::condition::ConditionTree;
use rulex_runtime::FromValue;
use std::any::{Any, TypeId};
use std::collections::BTreeMap;
use std::sync::Arc;

type CacheKey = (String, TypeId);

/// Compiles and evaluates named rules
pub struct RuleEngine {
    compiler: Compiler,
    rules: BTreeMap<String, ConditionTree>,
    cache: DashMap<CacheKey, Arc<dyn Any + Send + Sync>>,
    enable_cache: bool,
}

impl RuleEngine {
    pub(crate) fn new(
        compiler: Compiler,
        rules: BTreeMap<String, ConditionTree>,
        enable_cache: bool,
    ) -> Self {
        Self {
            compiler,
            rules,
            cache: DashMap::new(),
            enable_cache,
        }
    }

    /// Compiled predicate of a rule for target type `T`
    pub fn predicate<T: Any>(&self, rule_id: &str) -> Result<Predicate<T>> {
        let key = (rule_id.to_string(), TypeId::of::<T>());
        if self.enable_cache {
            if let Some(cached) = self.cache.get(&key) {
                if let Some(predicate) = cached.downcast_ref::<Predicate<T>>() {
                    tracing::trace!(rule_id, "Predicate cache hit");
                    return Ok(predicate.clone());
                }
            }
        }

        let tree = self
            .rules
            .get(rule_id)
            .ok_or_else(|| SdkError::RuleNotFound(rule_id.to_string()))?;
        let predicate = self
            .compiler
            .compile::<T>(tree)
            .map_err(|source| SdkError::RuleCompile {
                rule_id: rule_id.to_string(),
                source,
            })?;
        tracing::debug!(rule_id, target = std::any::type_name::<T>(), "Compiled rule");

        if self.enable_cache {
            let cached: Arc<dyn Any + Send + Sync> = Arc::new(predicate.clone());
            self.cache.entry(key).or_insert(cached);
        }
        Ok(predicate)
    }

    /// Evaluate a rule against a target
    pub fn evaluate<T: Any>(&self, rule_id: &str, target: &T) -> Result<bool> {
        let predicate = self.predicate::<T>(rule_id)?;
        Ok(predicate.evaluate(target)?)
    }

    /// Compile every rule for `T`, stopping at the first build error
    pub fn validate<T: Any>(&self) -> Result<()> {
        for rule_id in self.rules.keys() {
            self.predicate::<T>(rule_id)?;
        }
        tracing::info!(
            rules = self.rules.len(),
            target = std::any::type_name::<T>(),
            "All rules compiled"
        );
        Ok(())
    }

    /// Compile a path into a typed value extractor
    pub fn value_extractor<T: Any, R: FromValue>(&self, path: &str) -> Result<ValueExtractor<T, R>> {
        Ok(self.compiler.compile_value::<T, R>(path)?)
    }

    /// Rule ids in sorted order
    pub fn rule_ids(&self) -> Vec<&str> {
        self.rules.keys().map(String::as_str).collect()
    }

    pub fn rule(&self, rule_id: &str) -> Option<&ConditionTree> {
        self.rules.get(rule_id)
    }

    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    /// Number of cached predicates
    pub fn cached_predicates(&self) -> usize {
        self.cache.len()
    }

    /// Drop every cached predicate
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_ids())
            .field("cached_predicates", &self.cache.len())
            .field("enable_cache", &self.enable_cache)
            .finish()
    }
}
