//! Rules and the registry that resolves them by name
//!
//! A rule inspects one field's value together with the options it was declared with,
//! and appends a message to the error bag when the value is rejected. A passing rule
//! leaves the bag untouched.
//!
//! # Example
//!
//! ```rust
//! use fieldgate::rule::{Builtin, Check, Rule, RuleOptions};
//! use fieldgate::ErrorBag;
//! use serde_json::json;
//!
//! let options = RuleOptions::range(0, 2);
//! let value = json!(3);
//! let mut errors = ErrorBag::new();
//!
//! Builtin::Between
//!     .evaluate(&Check::new("endTime", Some(&value), &options), &mut errors)
//!     .unwrap();
//! assert_eq!(errors.get("endTime").unwrap(), ["3 must be between 0 and 2"]);
//! ```

mod builtin;
mod registry;

pub use builtin::Builtin;
pub use registry::Registry;

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::error::{PredicateError, RuleError};
use crate::ErrorBag;

/// Everything a rule sees for one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct Check<'a> {
    /// Field name, used as the error bag key.
    pub field: &'a str,
    /// The field value; `None` when missing.
    pub value: Option<&'a Value>,
    /// Options the rule was declared with.
    pub options: &'a RuleOptions,
}

impl<'a> Check<'a> {
    /// Bundle a field, its value and the declared options.
    pub fn new(field: &'a str, value: Option<&'a Value>, options: &'a RuleOptions) -> Self {
        Self {
            field,
            value,
            options,
        }
    }
}

/// A named check over one field.
///
/// Implementations must be pure: the only observable effect is pushing messages onto
/// `errors` under `check.field`. Returning `Err` means the rule could not be
/// evaluated at all, which aborts the run with a [`ValidatorError`](crate::ValidatorError).
pub trait Rule: Send + Sync {
    /// Evaluate the rule, appending a message on failure.
    fn evaluate(&self, check: &Check<'_>, errors: &mut ErrorBag) -> Result<(), RuleError>;

    /// Reject option shapes the rule cannot work with.
    ///
    /// Called when a schema is parsed from a declarative form.
    fn check_options(&self, _options: &RuleOptions) -> Result<(), RuleError> {
        Ok(())
    }
}

/// A [`Rule`] backed by a closure. See [`Registry::register_fn`].
pub struct FnRule<F>(F);

impl<F> FnRule<F>
where
    F: Fn(&Check<'_>, &mut ErrorBag) -> Result<(), RuleError> + Send + Sync,
{
    /// Wrap a closure.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Rule for FnRule<F>
where
    F: Fn(&Check<'_>, &mut ErrorBag) -> Result<(), RuleError> + Send + Sync,
{
    fn evaluate(&self, check: &Check<'_>, errors: &mut ErrorBag) -> Result<(), RuleError> {
        (self.0)(check, errors)
    }
}

impl<F> fmt::Debug for FnRule<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnRule(..)")
    }
}

type PredicateFn = dyn Fn(Option<&Value>) -> Result<Option<String>, PredicateError> + Send + Sync;

/// Predicate used by the `custom` rule.
///
/// Returns the failure message, or `None` when the value is accepted. An empty
/// message counts as accepted.
#[derive(Clone)]
pub struct Predicate(Arc<PredicateFn>);

impl Predicate {
    /// Wrap an infallible predicate.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Option<&Value>) -> Option<String> + Send + Sync + 'static,
    {
        let wrapped =
            move |value: Option<&Value>| -> Result<Option<String>, PredicateError> { Ok(f(value)) };
        Self(Arc::new(wrapped))
    }

    /// Wrap a predicate that may itself fail.
    pub fn fallible<F>(f: F) -> Self
    where
        F: Fn(Option<&Value>) -> Result<Option<String>, PredicateError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Run the predicate.
    pub fn call(&self, value: Option<&Value>) -> Result<Option<String>, PredicateError> {
        (self.0)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// Options attached to a rule declaration.
///
/// The builder methods on [`FieldSpec`](crate::FieldSpec) produce the typed variants.
/// Schemas parsed from JSON carry the raw value in [`RuleOptions::Value`]; the accessor
/// methods accept either form.
#[derive(Debug, Clone)]
pub enum RuleOptions {
    /// A bare flag, as in `presence: true`.
    Flag(bool),
    /// Inclusive `[low, high]` bounds.
    Range(Value, Value),
    /// Allowed values, in declaration order.
    OneOf(Vec<Value>),
    /// A custom predicate.
    Predicate(Predicate),
    /// Raw declarative options.
    Value(Value),
}

impl RuleOptions {
    /// Inclusive bounds.
    pub fn range(low: impl Into<Value>, high: impl Into<Value>) -> Self {
        RuleOptions::Range(low.into(), high.into())
    }

    /// Allowed values.
    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        RuleOptions::OneOf(values.into_iter().map(Into::into).collect())
    }

    /// The `[low, high]` pair, if the options have that shape.
    pub fn as_range(&self) -> Option<(&Value, &Value)> {
        match self {
            RuleOptions::Range(low, high) => Some((low, high)),
            RuleOptions::Value(Value::Array(pair)) if pair.len() == 2 => Some((&pair[0], &pair[1])),
            _ => None,
        }
    }

    /// The allowed values, if the options are a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            RuleOptions::OneOf(values) => Some(values),
            RuleOptions::Value(Value::Array(values)) => Some(values),
            _ => None,
        }
    }

    /// The predicate, if any.
    pub fn as_predicate(&self) -> Option<&Predicate> {
        match self {
            RuleOptions::Predicate(predicate) => Some(predicate),
            _ => None,
        }
    }
}

impl From<Predicate> for RuleOptions {
    fn from(predicate: Predicate) -> Self {
        RuleOptions::Predicate(predicate)
    }
}

impl From<Value> for RuleOptions {
    fn from(value: Value) -> Self {
        RuleOptions::Value(value)
    }
}

impl From<bool> for RuleOptions {
    fn from(flag: bool) -> Self {
        RuleOptions::Flag(flag)
    }
}
