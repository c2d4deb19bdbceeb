//! The four built-in rules.

use super::{Check, Rule, RuleOptions};
use crate::error::RuleError;
use crate::value::{self, Display, Joined};
use crate::ErrorBag;
use std::cmp::Ordering;

/// Built-in rules, each registered under [`Builtin::name`].
///
/// | Rule | Options | Message |
/// |---|---|---|
/// | `presence` | flag (ignored) | `must be present` |
/// | `between` | `[low, high]` | `<value> must be between <low> and <high>` |
/// | `in` | allowed values | `<value> must be one of (<a>,<b>)` |
/// | `custom` | predicate | whatever the predicate returns |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// Rejects a missing or `null` value.
    Presence,
    /// Rejects values outside inclusive bounds, and missing values.
    Between,
    /// Rejects values not strictly equal to one of the allowed values.
    ///
    /// Arrays and objects never match, not even an identical allowed array or object.
    In,
    /// Delegates to a caller-supplied predicate.
    Custom,
}

impl Builtin {
    /// Every built-in, in registration order.
    pub const ALL: [Builtin; 4] = [
        Builtin::Presence,
        Builtin::Between,
        Builtin::In,
        Builtin::Custom,
    ];

    /// The name the rule is declared under.
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Presence => "presence",
            Builtin::Between => "between",
            Builtin::In => "in",
            Builtin::Custom => "custom",
        }
    }

    /// Look up a built-in by declared name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }
}

const EXPECTED_RANGE: &str = "a [low, high] pair";
const EXPECTED_LIST: &str = "a list of allowed values";
const EXPECTED_PREDICATE: &str = "a predicate";

impl Rule for Builtin {
    fn evaluate(&self, check: &Check<'_>, errors: &mut ErrorBag) -> Result<(), RuleError> {
        match self {
            Builtin::Presence => {
                if value::is_absent(check.value) {
                    errors.push(check.field, "must be present");
                }
            }
            Builtin::Between => {
                let (low, high) = check.options.as_range().ok_or(RuleError::InvalidOptions {
                    expected: EXPECTED_RANGE,
                })?;
                let within = match check.value {
                    Some(v) if !v.is_null() => {
                        matches!(
                            value::compare(v, low),
                            Some(Ordering::Greater | Ordering::Equal)
                        ) && matches!(
                            value::compare(v, high),
                            Some(Ordering::Less | Ordering::Equal)
                        )
                    }
                    _ => false,
                };
                if !within {
                    errors.push(
                        check.field,
                        format!(
                            "{} must be between {} and {}",
                            Display(check.value),
                            Display(Some(low)),
                            Display(Some(high))
                        ),
                    );
                }
            }
            Builtin::In => {
                let allowed = check.options.as_list().ok_or(RuleError::InvalidOptions {
                    expected: EXPECTED_LIST,
                })?;
                let member = check
                    .value
                    .is_some_and(|v| allowed.iter().any(|option| value::strict_eq(v, option)));
                if !member {
                    errors.push(
                        check.field,
                        format!(
                            "{} must be one of ({})",
                            Display(check.value),
                            Joined(allowed)
                        ),
                    );
                }
            }
            Builtin::Custom => {
                let predicate = check
                    .options
                    .as_predicate()
                    .ok_or(RuleError::InvalidOptions {
                        expected: EXPECTED_PREDICATE,
                    })?;
                if let Some(message) = predicate.call(check.value)? {
                    if !message.is_empty() {
                        errors.push(check.field, message);
                    }
                }
            }
        }
        Ok(())
    }

    fn check_options(&self, options: &RuleOptions) -> Result<(), RuleError> {
        let expected = match self {
            Builtin::Presence => return Ok(()),
            Builtin::Between if options.as_range().is_none() => EXPECTED_RANGE,
            Builtin::In if options.as_list().is_none() => EXPECTED_LIST,
            Builtin::Custom if options.as_predicate().is_none() => EXPECTED_PREDICATE,
            _ => return Ok(()),
        };
        Err(RuleError::InvalidOptions { expected })
    }
}
