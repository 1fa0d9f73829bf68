//! Static value types
//!
//! `ValueType` describes what a resolved path node produces. Resolution,
//! coercion and operand validation all happen against these types before any
//! data is evaluated.

use std::fmt;
use std::sync::Arc;

/// An enumeration known to the type system
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumType {
    pub name: String,
    pub variants: Vec<String>,
}

impl EnumType {
    pub fn new<I, S>(name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a variant name, ignoring case. Returns the canonical spelling.
    pub fn parse_variant(&self, text: &str) -> Option<&str> {
        let text = text.trim();
        self.variants
            .iter()
            .find(|v| v.as_str() == text)
            .or_else(|| self.variants.iter().find(|v| v.eq_ignore_ascii_case(text)))
            .map(String::as_str)
    }
}

/// Static type of a resolved node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Wildcard, only used for macro receivers and element types
    Any,
    Bool,
    Int,
    Float,
    String,
    Enum(Arc<EnumType>),
    /// Optional scalar (`Option<i64>`, `Option<MyEnum>`, ...)
    Nullable(Box<ValueType>),
    /// Enumerable sequence
    Sequence(Box<ValueType>),
    /// Materialized, indexable sequence
    Array(Box<ValueType>),
    /// String-keyed dictionary
    Map(Box<ValueType>),
    /// Registered host record, by registered name
    Record(String),
}

impl ValueType {
    pub fn nullable(inner: ValueType) -> Self {
        ValueType::Nullable(Box::new(inner))
    }

    pub fn sequence(element: ValueType) -> Self {
        ValueType::Sequence(Box::new(element))
    }

    pub fn array(element: ValueType) -> Self {
        ValueType::Array(Box::new(element))
    }

    pub fn map(value: ValueType) -> Self {
        ValueType::Map(Box::new(value))
    }

    pub fn record(name: impl Into<String>) -> Self {
        ValueType::Record(name.into())
    }

    pub fn enumeration(def: EnumType) -> Self {
        ValueType::Enum(Arc::new(def))
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, ValueType::Enum(_))
    }

    pub fn is_nullable_enum(&self) -> bool {
        matches!(self, ValueType::Nullable(inner) if inner.is_enum())
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueType::Int | ValueType::Float)
    }

    pub fn is_nullable_numeric(&self) -> bool {
        matches!(self, ValueType::Nullable(inner) if inner.is_numeric())
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, ValueType::Nullable(_))
    }

    /// Scalars are the types a literal can be converted into
    pub fn is_scalar(&self) -> bool {
        match self {
            ValueType::Bool
            | ValueType::Int
            | ValueType::Float
            | ValueType::String
            | ValueType::Enum(_) => true,
            ValueType::Nullable(inner) => inner.is_scalar(),
            _ => false,
        }
    }

    /// Strips one level of `Nullable`
    pub fn underlying(&self) -> &ValueType {
        match self {
            ValueType::Nullable(inner) => inner,
            other => other,
        }
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, ValueType::Sequence(_) | ValueType::Array(_))
    }

    /// Element type of a sequence or array
    pub fn element_type(&self) -> Option<&ValueType> {
        match self {
            ValueType::Sequence(element) | ValueType::Array(element) => Some(element),
            _ => None,
        }
    }

    /// True for a sequence or array whose elements are strings
    pub fn is_string_sequence(&self) -> bool {
        self.element_type()
            .is_some_and(|e| matches!(e, ValueType::String | ValueType::Any))
    }

    pub fn is_string_array(&self) -> bool {
        matches!(self, ValueType::Array(e) if **e == ValueType::String)
    }

    pub fn record_name(&self) -> Option<&str> {
        match self {
            ValueType::Record(name) => Some(name),
            _ => None,
        }
    }

    /// Whether a value of type `other` can be used where `self` is expected
    pub fn is_assignable_from(&self, other: &ValueType) -> bool {
        match (self, other) {
            (ValueType::Any, _) => true,
            (a, b) if a == b => true,
            (ValueType::Sequence(a), ValueType::Sequence(b) | ValueType::Array(b)) => {
                a.is_assignable_from(b)
            }
            (ValueType::Array(a), ValueType::Array(b)) => a.is_assignable_from(b),
            (ValueType::Map(a), ValueType::Map(b)) => a.is_assignable_from(b),
            (ValueType::Nullable(a), ValueType::Nullable(b)) => a.is_assignable_from(b),
            (ValueType::Nullable(a), b) => a.is_assignable_from(b),
            (ValueType::Float, ValueType::Int) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Any => write!(f, "any"),
            ValueType::Bool => write!(f, "bool"),
            ValueType::Int => write!(f, "int"),
            ValueType::Float => write!(f, "float"),
            ValueType::String => write!(f, "string"),
            ValueType::Enum(def) => write!(f, "{}", def.name),
            ValueType::Nullable(inner) => write!(f, "{}?", inner),
            ValueType::Sequence(element) => write!(f, "Sequence<{}>", element),
            ValueType::Array(element) => write!(f, "{}[]", element),
            ValueType::Map(value) => write!(f, "Map<string, {}>", value),
            ValueType::Record(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier() -> EnumType {
        EnumType::new("Tier", ["Bronze", "Silver", "Gold"])
    }

    #[test]
    fn test_parse_variant_ignores_case() {
        let tier = tier();
        assert_eq!(tier.parse_variant("gold"), Some("Gold"));
        assert_eq!(tier.parse_variant(" Silver "), Some("Silver"));
        assert_eq!(tier.parse_variant("Platinum"), None);
    }

    #[test]
    fn test_nullable_predicates() {
        let nullable_int = ValueType::nullable(ValueType::Int);
        assert!(nullable_int.is_nullable_numeric());
        assert!(!nullable_int.is_nullable_enum());

        let nullable_tier = ValueType::nullable(ValueType::enumeration(tier()));
        assert!(nullable_tier.is_nullable_enum());
        assert!(!nullable_tier.is_nullable_numeric());
    }

    #[test]
    fn test_array_assignable_to_sequence() {
        let seq = ValueType::sequence(ValueType::String);
        assert!(seq.is_assignable_from(&ValueType::array(ValueType::String)));
        assert!(!ValueType::array(ValueType::String).is_assignable_from(&seq));
        assert!(ValueType::sequence(ValueType::Any).is_assignable_from(&seq));
    }

    #[test]
    fn test_display() {
        assert_eq!(ValueType::array(ValueType::String).to_string(), "string[]");
        assert_eq!(ValueType::nullable(ValueType::Int).to_string(), "int?");
        assert_eq!(
            ValueType::sequence(ValueType::record("Order")).to_string(),
            "Sequence<Order>"
        );
    }
}
