//! Path segment resolution
//!
//! Each segment is resolved against the node built so far, in priority
//! order: registered macro, function, indexer, member. The resulting node is
//! coerced (enum to text, nullable numeric unwrap) before the next segment.

use crate::coercion::coerce;
use crate::error::{CompileError, Result};
use crate::functions::FunctionBuilder;
use crate::invocation::build_macro_call;
use crate::registry::TypeRegistry;
use rulex_core::ValueType;
use rulex_parser::{tokenize, IndexKey, Segment};
use rulex_runtime::{Accessor, Expr, Node};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Resolves path segments into nodes
#[derive(Clone, Copy)]
pub struct SegmentResolver<'a> {
    registry: &'a TypeRegistry,
    functions: &'a dyn FunctionBuilder,
    unwrap_nullable: bool,
    resolutions: &'a AtomicUsize,
}

impl<'a> SegmentResolver<'a> {
    pub fn new(
        registry: &'a TypeRegistry,
        functions: &'a dyn FunctionBuilder,
        unwrap_nullable: bool,
        resolutions: &'a AtomicUsize,
    ) -> Self {
        Self {
            registry,
            functions,
            unwrap_nullable,
            resolutions,
        }
    }

    /// Same resolver with a different nullable unwrap policy
    pub fn with_unwrap(self, unwrap_nullable: bool) -> Self {
        Self {
            unwrap_nullable,
            ..self
        }
    }

    /// Resolve a whole path starting from `root`
    pub fn resolve_path(&self, root: Node, path: &str) -> Result<Node> {
        tokenize(path)?
            .iter()
            .try_fold(root, |current, segment| self.resolve(current, segment))
    }

    /// Resolve one segment against `current`
    pub fn resolve(&self, current: Node, segment: &str) -> Result<Node> {
        self.resolutions.fetch_add(1, Ordering::Relaxed);
        let parsed = Segment::parse(segment);

        if let Segment::Call { name, args } = &parsed {
            if let Some(def) =
                self.registry
                    .find_macro(&current.ty, name, args.len(), current.is_context())
            {
                tracing::trace!(segment, receiver = %current.ty, "Resolved macro");
                let node = build_macro_call(current, def, args)?;
                return Ok(coerce(node, self.unwrap_nullable));
            }
        }

        if let Some(call) = self.functions.recognize(segment) {
            tracing::trace!(segment, input = %current.ty, "Resolved function");
            let node = self.functions.build(current, &call)?;
            return Ok(coerce(node, self.unwrap_nullable));
        }

        let node = match parsed {
            Segment::SelfRef => current,
            Segment::Index { name, key } if name.is_empty() => index(current, key, segment)?,
            Segment::Index { name, key } => {
                let member = self.member(current, &name, segment)?;
                index(member, key, segment)?
            }
            Segment::Member(name) => self.member(current, &name, segment)?,
            Segment::Call { .. } => return Err(CompileError::unresolved(segment, &current.ty)),
        };

        Ok(coerce(node, self.unwrap_nullable))
    }

    /// Number of segments resolved so far
    pub fn resolutions(&self) -> usize {
        self.resolutions.load(Ordering::Relaxed)
    }

    fn member(&self, current: Node, name: &str, segment: &str) -> Result<Node> {
        let type_name = current
            .ty
            .record_name()
            .ok_or_else(|| CompileError::unresolved(segment, &current.ty))?;
        let def = self
            .registry
            .type_def(type_name)
            .ok_or_else(|| CompileError::UnregisteredType(type_name.to_string()))?;
        let member = def
            .member(name)
            .ok_or_else(|| CompileError::unresolved(segment, &current.ty))?;

        Ok(Node::new(
            member.ty.clone(),
            Expr::Member {
                parent: Box::new(current),
                accessor: Accessor {
                    name: member.name.clone(),
                    get: member.get.clone(),
                },
            },
        ))
    }
}

/// Positional or keyed access on an already resolved member
///
/// Sequences are materialized as lists by their accessors, so positional
/// access needs no conversion here.
fn index(member: Node, key: IndexKey, segment: &str) -> Result<Node> {
    let keyed = matches!(member.ty, ValueType::Map(_));
    let ty = match (&key, &member.ty) {
        (IndexKey::Position(_), ValueType::Sequence(element) | ValueType::Array(element)) => {
            (**element).clone()
        }
        (_, ValueType::Map(value)) => (**value).clone(),
        _ => return Err(CompileError::unresolved(segment, &member.ty)),
    };

    let parent = Box::new(member);
    let expr = match key {
        IndexKey::Position(position) if !keyed => Expr::Index { parent, position },
        IndexKey::Position(position) => Expr::Lookup {
            parent,
            key: position.to_string(),
        },
        IndexKey::Key(key) => Expr::Lookup { parent, key },
    };
    Ok(Node::new(ty, expr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::BuiltinFunctions;
    use rulex_core::{EnumType, Value};
    use std::collections::HashMap;

    struct Address {
        city: String,
    }

    struct Person {
        age: Option<i64>,
        tier: &'static str,
        home: Option<std::sync::Arc<Address>>,
        tags: Vec<String>,
        limits: HashMap<String, i64>,
    }

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        let tier = registry.register_enum(EnumType::new("Tier", ["Gold", "Silver"]));
        registry
            .register::<Address>("Address")
            .member("City", ValueType::String, |a: &Address| a.city.as_str().into());
        registry
            .register::<Person>("Person")
            .member("Age", ValueType::nullable(ValueType::Int), |p: &Person| p.age.into())
            .member("Tier", tier, |p: &Person| Value::enumeration(p.tier))
            .member("Home", ValueType::record("Address"), |p: &Person| {
                p.home.clone().map_or(Value::Null, |home| Value::Record(home))
            })
            .member("Tags", ValueType::sequence(ValueType::String), |p: &Person| {
                Value::list(p.tags.clone())
            })
            .member("Limits", ValueType::map(ValueType::Int), |p: &Person| {
                p.limits.clone().into()
            })
            .macro_fn("Older", vec![ValueType::Int], ValueType::Bool, |p: &Person, args| {
                let years = args.first().and_then(Value::as_f64).unwrap_or_default();
                Ok(Value::Bool(p.age.unwrap_or_default() as f64 > years))
            });
        registry
    }

    fn person() -> Person {
        Person {
            age: Some(42),
            tier: "Gold",
            home: Some(std::sync::Arc::new(Address {
                city: "Lyon".to_string(),
            })),
            tags: vec!["vip".to_string()],
            limits: HashMap::from([("daily".to_string(), 500)]),
        }
    }

    fn resolve(path: &str, unwrap: bool) -> Result<Node> {
        let registry = registry();
        let counter = AtomicUsize::new(0);
        let resolver = SegmentResolver::new(&registry, &BuiltinFunctions, unwrap, &counter);
        resolver.resolve_path(Node::context(ValueType::record("Person")), path)
    }

    #[test]
    fn test_member_chain() {
        let node = resolve("Home.City", true).unwrap();
        assert_eq!(node.ty, ValueType::String);
        assert_eq!(node.evaluate(&person()).unwrap(), Value::from("Lyon"));
    }

    #[test]
    fn test_member_names_ignore_case() {
        let node = resolve("home.city", true).unwrap();
        assert_eq!(node.evaluate(&person()).unwrap(), Value::from("Lyon"));
    }

    #[test]
    fn test_coercions_applied() {
        assert_eq!(resolve("Tier", true).unwrap().ty, ValueType::String);
        assert_eq!(resolve("Age", true).unwrap().ty, ValueType::Int);
        assert_eq!(
            resolve("Age", false).unwrap().ty,
            ValueType::nullable(ValueType::Int)
        );
    }

    #[test]
    fn test_self_is_identity() {
        let node = resolve("Self.Home.Self.City", true).unwrap();
        assert_eq!(node.evaluate(&person()).unwrap(), Value::from("Lyon"));
        assert!(resolve("Self", true).unwrap().is_context());
    }

    #[test]
    fn test_indexers() {
        let node = resolve("Tags[0]", true).unwrap();
        assert_eq!(node.evaluate(&person()).unwrap(), Value::from("vip"));
        let node = resolve("Limits['daily']", true).unwrap();
        assert_eq!(node.ty, ValueType::Int);
        assert_eq!(node.evaluate(&person()).unwrap(), Value::Int(500));
        assert!(matches!(
            resolve("Home[0]", true),
            Err(CompileError::UnresolvedSegment { .. })
        ));
    }

    #[test]
    fn test_macro_then_function() {
        let node = resolve("Older(40)", true).unwrap();
        assert_eq!(node.evaluate(&person()).unwrap(), Value::Bool(true));
        let node = resolve("Tags.Count()", true).unwrap();
        assert_eq!(node.evaluate(&person()).unwrap(), Value::Int(1));
    }

    #[test]
    fn test_unknown_segments() {
        let err = resolve("Agee", true).unwrap_err();
        assert_eq!(err.to_string(), "Cannot resolve segment 'Agee' on type Person");
        assert!(matches!(
            resolve("Nope(1)", true),
            Err(CompileError::UnresolvedSegment { .. })
        ));
        assert!(matches!(
            resolve("Home.City.Length", true),
            Err(CompileError::UnresolvedSegment { .. })
        ));
    }

    #[test]
    fn test_malformed_path() {
        assert!(matches!(
            resolve("Older(40", true),
            Err(CompileError::MalformedPath { position: 5, .. })
        ));
    }

    #[test]
    fn test_counter_tracks_segments() {
        let registry = registry();
        let counter = AtomicUsize::new(0);
        let resolver = SegmentResolver::new(&registry, &BuiltinFunctions, true, &counter);
        resolver
            .resolve_path(Node::context(ValueType::record("Person")), "Home.City")
            .unwrap();
        assert_eq!(resolver.resolutions(), 2);
    }
}
