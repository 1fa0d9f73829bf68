//! Compiler façade
//!
//! Builds predicates and value extractors from condition trees and paths.
//! All name lookups, literal conversions and shape checks happen here, once;
//! the produced predicates only walk their pre-resolved node graph.

use crate::condition::{BuildContext, ConditionExpression};
use crate::error::{CompileError, Result};
use crate::functions::{BuiltinFunctions, FunctionBuilder};
use crate::operators::DEFAULT_REGEX_SIZE_LIMIT;
use crate::registry::TypeRegistry;
use crate::resolver::SegmentResolver;
use rulex_core::ValueType;
use rulex_runtime::{FromValue, Node, RuntimeError};
use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Compiler options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    /// Unwrap nullable numerics after each segment (conditions only)
    pub unwrap_nullable_numerics: bool,

    /// Size limit of compiled `Matches` patterns, in bytes
    pub regex_size_limit: usize,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            unwrap_nullable_numerics: true,
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
        }
    }
}

/// Condition compiler bound to a type registry
#[derive(Clone)]
pub struct Compiler {
    registry: Arc<TypeRegistry>,
    functions: Arc<dyn FunctionBuilder>,
    options: CompilerOptions,
    resolutions: Arc<AtomicUsize>,
}

impl Compiler {
    /// Create a compiler with the built-in functions and default options
    pub fn new(registry: TypeRegistry) -> Self {
        Self::with_registry(Arc::new(registry))
    }

    /// Create a compiler sharing an existing registry
    pub fn with_registry(registry: Arc<TypeRegistry>) -> Self {
        Self {
            registry,
            functions: Arc::new(BuiltinFunctions),
            options: CompilerOptions::default(),
            resolutions: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Replace the function library
    pub fn with_functions(mut self, functions: Arc<dyn FunctionBuilder>) -> Self {
        self.functions = functions;
        self
    }

    pub fn with_options(mut self, options: CompilerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Number of path segments resolved by this compiler so far
    pub fn resolutions(&self) -> usize {
        self.resolutions.load(Ordering::Relaxed)
    }

    fn resolver(&self, unwrap_nullable: bool) -> SegmentResolver<'_> {
        SegmentResolver::new(
            &self.registry,
            self.functions.as_ref(),
            unwrap_nullable,
            &self.resolutions,
        )
    }

    fn context_type<T: Any>(&self) -> Result<ValueType> {
        self.registry
            .type_name_of::<T>()
            .map(ValueType::record)
            .ok_or_else(|| CompileError::UnregisteredType(std::any::type_name::<T>().to_string()))
    }

    /// Build the boolean node of a condition against a context type
    pub fn build_condition(&self, tree: &dyn ConditionExpression, context: ValueType) -> Result<Node> {
        let ctx = BuildContext {
            resolver: self.resolver(self.options.unwrap_nullable_numerics),
            context: Node::context(context),
            options: &self.options,
        };
        let node = tree.process(&ctx)?;
        if node.ty != ValueType::Bool {
            return Err(CompileError::NonBooleanCondition(node.ty));
        }
        Ok(node)
    }

    /// Compile a condition into a predicate over `T`
    pub fn compile<T: Any>(&self, tree: &dyn ConditionExpression) -> Result<Predicate<T>> {
        let context = self.context_type::<T>()?;
        tracing::debug!(target_type = %context, "Compiling predicate");
        let node = self.build_condition(tree, context)?;
        Ok(Predicate {
            node: Arc::new(node),
            _marker: PhantomData,
        })
    }

    /// Compile a condition for a type known only by its registered name
    pub fn compile_dynamic(&self, tree: &dyn ConditionExpression, type_name: &str) -> Result<DynPredicate> {
        let def = self
            .registry
            .type_def(type_name)
            .ok_or_else(|| CompileError::UnregisteredType(type_name.to_string()))?;
        tracing::debug!(target_type = type_name, "Compiling dynamic predicate");
        let node = self.build_condition(tree, ValueType::record(def.name.clone()))?;
        Ok(DynPredicate {
            node: Arc::new(node),
            type_id: def.type_id,
            type_name: def.name.clone(),
        })
    }

    /// Compile a path into a typed value extractor over `T`
    ///
    /// Nullable values are kept nullable; `R` decides how to read them.
    pub fn compile_value<T: Any, R: FromValue>(&self, path: &str) -> Result<ValueExtractor<T, R>> {
        let context = self.context_type::<T>()?;
        let node = self.resolver(false).resolve_path(Node::context(context), path)?;
        if node.is_context() || !R::accepts(&node.ty) {
            return Err(CompileError::ResultType {
                expected: std::any::type_name::<R>().to_string(),
                actual: node.ty.to_string(),
            });
        }
        tracing::debug!(path, value_type = %node.ty, "Compiled value extractor");
        Ok(ValueExtractor {
            node: Arc::new(node),
            _marker: PhantomData,
        })
    }
}

impl fmt::Debug for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compiler")
            .field("options", &self.options)
            .field("resolutions", &self.resolutions())
            .finish()
    }
}

/// Compiled predicate over `T`
pub struct Predicate<T> {
    node: Arc<Node>,
    _marker: PhantomData<fn(&T) -> bool>,
}

impl<T: Any> Predicate<T> {
    pub fn evaluate(&self, target: &T) -> rulex_runtime::Result<bool> {
        self.node.evaluate_bool(target)
    }

    /// The resolved node graph
    pub fn node(&self) -> &Node {
        &self.node
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").field("node", &self.node).finish()
    }
}

/// Compiled predicate whose target type is checked on every call
#[derive(Debug, Clone)]
pub struct DynPredicate {
    node: Arc<Node>,
    type_id: TypeId,
    type_name: String,
}

impl DynPredicate {
    pub fn evaluate(&self, target: &dyn Any) -> rulex_runtime::Result<bool> {
        if Any::type_id(target) != self.type_id {
            return Err(RuntimeError::type_mismatch(
                self.type_name.clone(),
                "object of another type",
            ));
        }
        self.node.evaluate_bool(target)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn node(&self) -> &Node {
        &self.node
    }
}

/// Compiled path reading an `R` out of a `T`
pub struct ValueExtractor<T, R> {
    node: Arc<Node>,
    _marker: PhantomData<fn(&T) -> R>,
}

impl<T: Any, R: FromValue> ValueExtractor<T, R> {
    pub fn extract(&self, target: &T) -> rulex_runtime::Result<R> {
        R::from_value(self.node.evaluate(target)?)
    }

    pub fn value_type(&self) -> &ValueType {
        &self.node.ty
    }
}

impl<T, R> Clone for ValueExtractor<T, R> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
            _marker: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulex_core::condition::ConditionTree;
    use rulex_core::{Operator, Value};

    struct Sensor {
        reading: Option<f64>,
        label: String,
    }

    fn compiler() -> Compiler {
        let mut registry = TypeRegistry::new();
        registry
            .register::<Sensor>("Sensor")
            .member("Reading", ValueType::nullable(ValueType::Float), |s: &Sensor| {
                s.reading.into()
            })
            .member("Label", ValueType::String, |s: &Sensor| s.label.as_str().into());
        Compiler::new(registry)
    }

    fn sensor(reading: Option<f64>) -> Sensor {
        Sensor {
            reading,
            label: "north".to_string(),
        }
    }

    #[test]
    fn test_unregistered_type() {
        let tree = ConditionTree::leaf("Label", Operator::Equals, "north");
        assert!(matches!(
            compiler().compile::<String>(&tree),
            Err(CompileError::UnregisteredType(_))
        ));
        assert!(matches!(
            compiler().compile_dynamic(&tree, "Missing"),
            Err(CompileError::UnregisteredType(_))
        ));
    }

    #[test]
    fn test_unwrapped_null_is_runtime_error() {
        let tree = ConditionTree::leaf("Reading", Operator::GreaterThan, "1.5");
        let predicate = compiler().compile::<Sensor>(&tree).unwrap();
        assert!(predicate.evaluate(&sensor(Some(2.0))).unwrap());
        assert!(matches!(
            predicate.evaluate(&sensor(None)),
            Err(RuntimeError::MissingValue(_))
        ));
    }

    #[test]
    fn test_unwrap_can_be_disabled() {
        let options = CompilerOptions {
            unwrap_nullable_numerics: false,
            ..Default::default()
        };
        let compiler = compiler().with_options(options);
        let tree = ConditionTree::leaf("Reading", Operator::GreaterThan, "1.5");
        let predicate = compiler.compile::<Sensor>(&tree).unwrap();
        assert!(!predicate.evaluate(&sensor(None)).unwrap());
    }

    #[test]
    fn test_dynamic_predicate_checks_type() {
        let tree = ConditionTree::leaf("Label", Operator::StartsWith, "no");
        let predicate = compiler().compile_dynamic(&tree, "Sensor").unwrap();
        assert!(predicate.evaluate(&sensor(None)).unwrap());
        assert!(matches!(
            predicate.evaluate(&"north".to_string()),
            Err(RuntimeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_value_extractor_keeps_nullable() {
        let extractor = compiler()
            .compile_value::<Sensor, Option<f64>>("Reading")
            .unwrap();
        assert_eq!(extractor.extract(&sensor(None)).unwrap(), None);
        assert_eq!(extractor.extract(&sensor(Some(1.0))).unwrap(), Some(1.0));
    }

    #[test]
    fn test_value_extractor_result_type() {
        assert!(matches!(
            compiler().compile_value::<Sensor, i64>("Label"),
            Err(CompileError::ResultType { .. })
        ));
        assert!(matches!(
            compiler().compile_value::<Sensor, Value>("Self"),
            Err(CompileError::ResultType { .. })
        ));
    }

    #[test]
    fn test_non_boolean_condition() {
        struct Path(&'static str);
        impl ConditionExpression for Path {
            fn process(&self, ctx: &BuildContext<'_>) -> Result<Node> {
                ctx.resolver.resolve_path(ctx.context.clone(), self.0)
            }
        }
        assert!(matches!(
            compiler().compile::<Sensor>(&Path("Label")),
            Err(CompileError::NonBooleanCondition(ValueType::String))
        ));
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: CompilerOptions = serde_json::from_str(r#"{"regex_size_limit": 1024}"#).unwrap();
        assert!(options.unwrap_nullable_numerics);
        assert_eq!(options.regex_size_limit, 1024);
    }
}
