//! String kernels

use crate::error::{Result, RuntimeError};
use regex::Regex;
use rulex_core::Value;

fn text<'a>(value: &'a Value, side: &str) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| RuntimeError::type_mismatch(format!("{} string", side), value.kind()))
}

pub(crate) fn substring(left: &Value, right: &Value) -> Result<bool> {
    Ok(text(left, "left")?.contains(text(right, "right")?))
}

pub(crate) fn starts_with(left: &Value, right: &Value) -> Result<bool> {
    Ok(text(left, "left")?.starts_with(text(right, "right")?))
}

pub(crate) fn ends_with(left: &Value, right: &Value) -> Result<bool> {
    Ok(text(left, "left")?.ends_with(text(right, "right")?))
}

pub(crate) fn matches(regex: &Regex, left: &Value) -> Result<bool> {
    Ok(regex.is_match(text(left, "left")?))
}
