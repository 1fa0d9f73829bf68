//! Collection kernels

use crate::error::{Result, RuntimeError};
use rulex_core::Value;

/// Null (handled by the caller), an empty list, map or string
pub(crate) fn is_empty(left: &Value) -> Result<bool> {
    match left {
        Value::Null => Ok(true),
        Value::List(items) => Ok(items.is_empty()),
        Value::Map(map) => Ok(map.is_empty()),
        Value::String(s) => Ok(s.is_empty()),
        other => Err(RuntimeError::type_mismatch("collection", other.kind())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty() {
        assert!(is_empty(&Value::List(vec![])).unwrap());
        assert!(!is_empty(&Value::list(vec!["x"])).unwrap());
        assert!(is_empty(&Value::from("")).unwrap());
        assert!(is_empty(&Value::Int(0)).is_err());
    }
}
