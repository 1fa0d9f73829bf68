//! Typed extraction of evaluated values
//!
//! [`FromValue`] lets a value-extraction path declare its Rust result type.
//! `accepts` is checked once against the node type when the path is built;
//! `from_value` runs on every evaluation.

use crate::error::{Result, RuntimeError};
use rulex_core::{Value, ValueType};

/// Conversion from an evaluated [`Value`] into a Rust type
pub trait FromValue: Sized {
    /// Whether a node of type `ty` can produce this type
    fn accepts(ty: &ValueType) -> bool;

    fn from_value(value: Value) -> Result<Self>;
}

impl FromValue for Value {
    fn accepts(_: &ValueType) -> bool {
        true
    }

    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl FromValue for bool {
    fn accepts(ty: &ValueType) -> bool {
        *ty == ValueType::Bool
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(RuntimeError::type_mismatch("bool", other.kind())),
        }
    }
}

impl FromValue for i64 {
    fn accepts(ty: &ValueType) -> bool {
        *ty == ValueType::Int
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Int(i) => Ok(i),
            Value::Null => Err(RuntimeError::MissingValue("int".to_string())),
            other => Err(RuntimeError::type_mismatch("int", other.kind())),
        }
    }
}

impl FromValue for f64 {
    fn accepts(ty: &ValueType) -> bool {
        ty.is_numeric()
    }

    fn from_value(value: Value) -> Result<Self> {
        match value.as_f64() {
            Some(f) => Ok(f),
            None if value.is_null() => Err(RuntimeError::MissingValue("float".to_string())),
            None => Err(RuntimeError::type_mismatch("float", value.kind())),
        }
    }
}

impl FromValue for String {
    fn accepts(ty: &ValueType) -> bool {
        matches!(ty, ValueType::String | ValueType::Enum(_))
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(s) | Value::Enum(s) => Ok(s),
            other => Err(RuntimeError::type_mismatch("string", other.kind())),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn accepts(ty: &ValueType) -> bool {
        T::accepts(ty.underlying())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn accepts(ty: &ValueType) -> bool {
        ty.element_type().is_some_and(T::accepts)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(RuntimeError::type_mismatch("list", other.kind())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_accepts_nullable() {
        assert!(Option::<i64>::accepts(&ValueType::nullable(ValueType::Int)));
        assert!(Option::<i64>::accepts(&ValueType::Int));
        assert!(!i64::accepts(&ValueType::nullable(ValueType::Int)));
    }

    #[test]
    fn test_option_from_null() {
        assert_eq!(Option::<i64>::from_value(Value::Null).unwrap(), None);
        assert_eq!(Option::<i64>::from_value(Value::Int(4)).unwrap(), Some(4));
    }

    #[test]
    fn test_vec_of_strings() {
        assert!(Vec::<String>::accepts(&ValueType::array(ValueType::String)));
        assert!(!Vec::<String>::accepts(&ValueType::String));
        let value = Value::list(vec!["a", "b"]);
        assert_eq!(Vec::<String>::from_value(value).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_f64_widens_int() {
        assert!(f64::accepts(&ValueType::Int));
        assert_eq!(f64::from_value(Value::Int(2)).unwrap(), 2.0);
    }
}
