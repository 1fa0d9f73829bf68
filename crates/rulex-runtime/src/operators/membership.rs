//! Membership kernels
//!
//! `AllIn` and `ContainsAll` test opposite subset directions over the same
//! operand shapes:
//! - `AllIn`: every element of the left sequence occurs in the right array
//! - `ContainsAll`: every element of the right array occurs in the left sequence

use crate::error::{Result, RuntimeError};
use rulex_core::Value;

fn list<'a>(value: &'a Value, side: &str) -> Result<&'a [Value]> {
    value
        .as_list()
        .ok_or_else(|| RuntimeError::type_mismatch(format!("{} list", side), value.kind()))
}

/// Sequence membership of a single value
pub(crate) fn contains_element(left: &Value, right: &Value) -> Result<bool> {
    Ok(list(left, "left")?.iter().any(|item| item == right))
}

/// Text of the left scalar occurs in the right array
pub(crate) fn in_array(left: &Value, right: &Value) -> Result<bool> {
    let Some(text) = left.to_text() else {
        return Err(RuntimeError::type_mismatch("scalar", left.kind()));
    };
    Ok(list(right, "right")?
        .iter()
        .any(|item| item.as_str() == Some(text.as_str())))
}

pub(crate) fn all_in(left: &Value, right: &Value) -> Result<bool> {
    let right = list(right, "right")?;
    Ok(list(left, "left")?.iter().all(|item| right.contains(item)))
}

pub(crate) fn contains_all(left: &Value, right: &Value) -> Result<bool> {
    let left = list(left, "left")?;
    Ok(list(right, "right")?.iter().all(|item| left.contains(item)))
}
