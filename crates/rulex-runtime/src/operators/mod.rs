//! Operator kernels
//!
//! This module contains the boolean tests behind operator nodes. Operand
//! shapes have already been validated when the node was built, so the kernels
//! only deal with runtime nulls and with data that contradicts the declared
//! types.

mod collection;
mod comparison;
mod membership;
mod string;

pub(crate) use collection::is_empty;
pub(crate) use comparison::{compare_order, equals};
pub(crate) use membership::{all_in, contains_all, contains_element, in_array};
pub(crate) use string::{ends_with, matches, starts_with, substring};

use crate::error::Result;
use crate::node::Kernel;
use rulex_core::Value;
use std::cmp::Ordering;

/// Apply a kernel to evaluated operands
///
/// A null left operand makes every test false except `IsEmpty` (true) and
/// `Equals` against a null right operand (true).
pub fn apply_kernel(kernel: &Kernel, left: &Value, right: &Value) -> Result<bool> {
    if left.is_null() {
        tracing::trace!("Null left operand for {:?}", kernel);
        return Ok(match kernel {
            Kernel::IsEmpty => true,
            Kernel::Equals => right.is_null(),
            _ => false,
        });
    }

    match kernel {
        Kernel::Equals => Ok(equals(left, right)),
        Kernel::GreaterThan => compare_order(left, right, |o| o == Ordering::Greater),
        Kernel::GreaterThanOrEqual => compare_order(left, right, |o| o != Ordering::Less),
        Kernel::LessThan => compare_order(left, right, |o| o == Ordering::Less),
        Kernel::LessThanOrEqual => compare_order(left, right, |o| o != Ordering::Greater),
        Kernel::Substring => substring(left, right),
        Kernel::Element => contains_element(left, right),
        Kernel::StartsWith => starts_with(left, right),
        Kernel::EndsWith => ends_with(left, right),
        Kernel::Matches(regex) => matches(regex, left),
        Kernel::In => in_array(left, right),
        Kernel::AllIn => all_in(left, right),
        Kernel::ContainsAll => contains_all(left, right),
        Kernel::IsEmpty => is_empty(left),
    }
}
