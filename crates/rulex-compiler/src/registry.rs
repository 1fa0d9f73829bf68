//! Type registry
//!
//! The registry replaces runtime reflection: every host type a condition can
//! navigate is registered under a name together with a table of member
//! accessors. Macros (computed extensions) are registered alongside, keyed by
//! name and receiver type.

use rulex_core::{EnumType, Value, ValueType};
use rulex_runtime::{Getter, RecordFn, RuntimeError, ValueFn};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

/// A readable member of a registered type
#[derive(Clone)]
pub struct MemberDef {
    pub name: String,
    pub ty: ValueType,
    pub get: Getter,
}

impl std::fmt::Debug for MemberDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberDef")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .finish()
    }
}

/// A registered host type
#[derive(Debug, Clone)]
pub struct TypeDef {
    pub name: String,
    pub type_id: TypeId,
    members: Vec<MemberDef>,
}

impl TypeDef {
    /// Member lookup, exact name first, then ignoring case
    pub fn member(&self, name: &str) -> Option<&MemberDef> {
        self.members
            .iter()
            .find(|m| m.name == name)
            .or_else(|| self.members.iter().find(|m| m.name.eq_ignore_ascii_case(name)))
    }

    pub fn members(&self) -> &[MemberDef] {
        &self.members
    }
}

/// Callable body of a macro
#[derive(Clone)]
pub enum MacroBody {
    /// Receives the host object the macro is declared on
    Record(RecordFn),
    /// Receives any evaluated value
    Value(ValueFn),
}

/// A computed extension callable from a path segment
#[derive(Clone)]
pub struct MacroDef {
    pub name: String,
    pub receiver: ValueType,
    /// Declared parameters; empty means arguments are ignored
    pub params: Vec<ValueType>,
    pub returns: ValueType,
    pub body: MacroBody,
}

impl std::fmt::Debug for MacroDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MacroDef")
            .field("name", &self.name)
            .field("receiver", &self.receiver)
            .field("params", &self.params)
            .field("returns", &self.returns)
            .finish()
    }
}

/// Registry of host types, enums and macros
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeDef>,
    names: HashMap<TypeId, String>,
    enums: HashMap<String, Arc<EnumType>>,
    macros: Vec<MacroDef>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a host type under `name` and start declaring its members
    ///
    /// Registering the same type again extends its member table. Registering
    /// a different type under a taken name replaces the old declaration,
    /// members and record macros included.
    pub fn register<T: Any + Send + Sync>(&mut self, name: impl Into<String>) -> RecordBuilder<'_, T> {
        let name = name.into();
        let type_id = TypeId::of::<T>();
        tracing::debug!(type_name = %name, "Registering type");

        let stale = self
            .types
            .get(&name)
            .map(|def| def.type_id)
            .filter(|id| *id != type_id);
        if let Some(stale) = stale {
            tracing::warn!(type_name = %name, "Replacing type registered under the same name");
            self.names.remove(&stale);
            let receiver = ValueType::record(name.clone());
            self.macros
                .retain(|m| !(m.receiver == receiver && matches!(m.body, MacroBody::Record(_))));
            self.types.remove(&name);
        }

        self.names.insert(type_id, name.clone());
        self.types.entry(name.clone()).or_insert_with(|| TypeDef {
            name: name.clone(),
            type_id,
            members: Vec::new(),
        });
        RecordBuilder {
            registry: self,
            name,
            _marker: PhantomData,
        }
    }

    /// Register an enumeration and return its value type
    pub fn register_enum(&mut self, def: EnumType) -> ValueType {
        let def = Arc::new(def);
        self.enums.insert(def.name.clone(), def.clone());
        ValueType::Enum(def)
    }

    /// Value type of a registered enumeration
    pub fn enum_type(&self, name: &str) -> Option<ValueType> {
        self.enums.get(name).cloned().map(ValueType::Enum)
    }

    /// Register a macro over any value assignable to `receiver`
    pub fn register_value_macro<F>(
        &mut self,
        name: impl Into<String>,
        receiver: ValueType,
        params: Vec<ValueType>,
        returns: ValueType,
        body: F,
    ) where
        F: Fn(&Value, &[Value]) -> rulex_runtime::Result<Value> + Send + Sync + 'static,
    {
        self.macros.push(MacroDef {
            name: name.into(),
            receiver,
            params,
            returns,
            body: MacroBody::Value(Arc::new(body)),
        });
    }

    pub fn type_def(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    /// Registered name of a Rust type
    pub fn type_name_of<T: Any>(&self) -> Option<&str> {
        self.names.get(&TypeId::of::<T>()).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Find a macro named exactly `name` applicable to `receiver` with `argc`
    /// arguments
    ///
    /// An exact receiver match wins over a merely assignable one. Value
    /// macros never bind to the evaluation target itself.
    pub fn find_macro(
        &self,
        receiver: &ValueType,
        name: &str,
        argc: usize,
        on_target: bool,
    ) -> Option<&MacroDef> {
        self.macros
            .iter()
            .filter(|m| m.name == name)
            .filter(|m| m.params.is_empty() || m.params.len() == argc)
            .filter(|m| !(on_target && matches!(m.body, MacroBody::Value(_))))
            .filter(|m| m.receiver.is_assignable_from(receiver))
            .min_by_key(|m| if m.receiver == *receiver { 0 } else { 1 })
    }

    pub fn macros(&self) -> &[MacroDef] {
        &self.macros
    }
}

fn downcast<'t, T: Any>(target: &'t dyn Any, type_name: &str) -> rulex_runtime::Result<&'t T> {
    target
        .downcast_ref::<T>()
        .ok_or_else(|| RuntimeError::type_mismatch(type_name, "object of another type"))
}

/// Declares the members and macros of one registered type
pub struct RecordBuilder<'a, T> {
    registry: &'a mut TypeRegistry,
    name: String,
    _marker: PhantomData<fn(&T)>,
}

impl<'a, T: Any + Send + Sync> RecordBuilder<'a, T> {
    /// Value type of the type being declared
    pub fn value_type(&self) -> ValueType {
        ValueType::record(self.name.clone())
    }

    /// Declare an infallible member
    pub fn member<F>(self, name: impl Into<String>, ty: ValueType, read: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        let type_name = self.name.clone();
        let get: Getter =
            Arc::new(move |target: &dyn Any| downcast::<T>(target, &type_name).map(&read));
        self.push_member(name.into(), ty, get)
    }

    /// Declare a member whose read can fail
    pub fn fallible_member<F>(self, name: impl Into<String>, ty: ValueType, read: F) -> Self
    where
        F: Fn(&T) -> rulex_runtime::Result<Value> + Send + Sync + 'static,
    {
        let type_name = self.name.clone();
        let get: Getter =
            Arc::new(move |target: &dyn Any| downcast::<T>(target, &type_name).and_then(&read));
        self.push_member(name.into(), ty, get)
    }

    /// Declare a macro with this type as receiver
    pub fn macro_fn<F>(
        self,
        name: impl Into<String>,
        params: Vec<ValueType>,
        returns: ValueType,
        body: F,
    ) -> Self
    where
        F: Fn(&T, &[Value]) -> rulex_runtime::Result<Value> + Send + Sync + 'static,
    {
        let type_name = self.name.clone();
        let call: RecordFn = Arc::new(move |target: &dyn Any, args: &[Value]| {
            let receiver = downcast::<T>(target, &type_name)?;
            body(receiver, args)
        });
        let receiver = self.value_type();
        self.registry.macros.push(MacroDef {
            name: name.into(),
            receiver,
            params,
            returns,
            body: MacroBody::Record(call),
        });
        self
    }

    fn push_member(self, name: String, ty: ValueType, get: Getter) -> Self {
        if let Some(def) = self.registry.types.get_mut(&self.name) {
            def.members.retain(|m| m.name != name);
            def.members.push(MemberDef { name, ty, get });
        }
        self
    }
}
