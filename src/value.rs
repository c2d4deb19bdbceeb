//! Helpers over field values
//!
//! A field value is an `Option<&Value>`: `None` when the key (or its whole bag) is
//! missing, `Some(&Value::Null)` when it was given as `null`. Both count as absent for
//! presence checks but print differently in messages.

use serde_json::{Number, Value};
use std::cmp::Ordering;
use std::fmt;

/// True when the value is missing or `null`.
///
/// `0`, `false` and `""` are present.
#[inline]
pub fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Loose string form of a field value, as used in rule messages.
///
/// ```
/// use fieldgate::value::Display;
/// use serde_json::json;
///
/// assert_eq!(Display(None).to_string(), "undefined");
/// assert_eq!(Display(Some(&json!(null))).to_string(), "null");
/// assert_eq!(Display(Some(&json!(2.0))).to_string(), "2");
/// assert_eq!(Display(Some(&json!("two"))).to_string(), "two");
/// assert_eq!(Display(Some(&json!([1, null, "a"]))).to_string(), "1,,a");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Display<'a>(pub Option<&'a Value>);

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => f.write_str("undefined"),
            Some(value) => write_value(f, value),
        }
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{}", b),
        Value::Number(n) => write_number(f, n),
        Value::String(s) => f.write_str(s),
        Value::Array(items) => write_joined(f, items),
        Value::Object(_) => f.write_str("[object Object]"),
    }
}

fn write_number(f: &mut fmt::Formatter<'_>, n: &Number) -> fmt::Result {
    if n.is_i64() || n.is_u64() {
        return write!(f, "{}", n);
    }
    match n.as_f64() {
        Some(x) if x == 0.0 => f.write_str("0"),
        Some(x) if x.is_finite() && (x.abs() >= 1e21 || x.abs() < 1e-6) => write_exponent(f, x),
        Some(x) => write!(f, "{}", x),
        None => write!(f, "{}", n),
    }
}

/// Exponent form with an explicit sign on the exponent: `1e+21`, `1.5e-7`.
fn write_exponent(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    let formatted = format!("{:e}", x);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            write!(f, "{}e+{}", mantissa, exponent)
        }
        _ => f.write_str(&formatted),
    }
}

/// Write array elements joined by `,`, with `null` elements left empty.
pub(crate) fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        if !item.is_null() {
            write_value(f, item)?;
        }
    }
    Ok(())
}

/// Comma-joined list of values, as printed by the `in` rule.
#[derive(Debug, Clone, Copy)]
pub struct Joined<'a>(pub &'a [Value]);

impl fmt::Display for Joined<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, self.0)
    }
}

/// Order two values of the same kind.
///
/// Numbers compare numerically, strings lexicographically, booleans with
/// `false < true`. Everything else, including mixed kinds, is incomparable.
pub fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn compare_numbers(a: &Number, b: &Number) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return Some(x.cmp(&y));
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return Some(x.cmp(&y));
    }
    a.as_f64()?.partial_cmp(&b.as_f64()?)
}

/// Equality without coercion between kinds.
///
/// Numbers are equal when they denote the same value (`1 == 1.0`); strings, booleans
/// and `null` compare by value. `"1"` never equals `1`. Arrays and objects are
/// identities rather than values, so a request value never equals one of them.
pub fn strict_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b) == Some(Ordering::Equal),
        (Value::Array(_) | Value::Object(_), _) | (_, Value::Array(_) | Value::Object(_)) => false,
        _ => left == right,
    }
}
