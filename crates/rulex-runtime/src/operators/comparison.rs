//! Comparison kernels

use crate::error::{Result, RuntimeError};
use rulex_core::Value;
use std::cmp::Ordering;

pub(crate) fn equals(left: &Value, right: &Value) -> bool {
    left == right
}

/// Order two scalars and test the ordering; numbers widen to floats
pub(crate) fn compare_order(
    left: &Value,
    right: &Value,
    test: impl Fn(Ordering) -> bool,
) -> Result<bool> {
    if right.is_null() {
        return Ok(false);
    }

    let ordering = match (left, right) {
        (Value::String(l), Value::String(r)) => Some(l.cmp(r)),
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(l), Some(r)) => l.partial_cmp(&r),
            _ => {
                return Err(RuntimeError::InvalidOperation(format!(
                    "Cannot order {:?} and {:?}",
                    left, right
                )))
            }
        },
    };

    // NaN never satisfies an ordering test
    Ok(ordering.is_some_and(test))
}
