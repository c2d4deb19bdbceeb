//! Errors raised while running a validator.
//!
//! These are distinct from validation failures: a request that breaks its rules is a
//! `Validation::Failure(ErrorBag)`, while a `ValidatorError` means the validator itself
//! could not evaluate a rule (malformed options, a predicate that errored).

use std::error::Error as StdError;
use std::fmt;

/// Error returned by a fallible custom predicate.
///
/// # Examples
///
/// ```rust
/// use fieldgate::PredicateError;
///
/// let err = PredicateError::new("lookup table not loaded");
/// assert_eq!(err.to_string(), "lookup table not loaded");
/// ```
#[derive(Debug)]
pub struct PredicateError {
    message: String,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl PredicateError {
    /// Create a predicate error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying error, keeping it reachable through `source()`.
    pub fn from_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl fmt::Display for PredicateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for PredicateError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

/// Error returned by a rule that could not be evaluated.
#[derive(Debug)]
pub enum RuleError {
    /// The options declared for the rule do not have the shape it needs.
    InvalidOptions {
        /// What the rule expected.
        expected: &'static str,
    },
    /// A custom predicate returned an error.
    Predicate(PredicateError),
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleError::InvalidOptions { expected } => {
                write!(f, "invalid options, expected {}", expected)
            }
            RuleError::Predicate(err) => write!(f, "predicate failed: {}", err),
        }
    }
}

impl StdError for RuleError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            RuleError::InvalidOptions { .. } => None,
            RuleError::Predicate(err) => Some(err),
        }
    }
}

impl From<PredicateError> for RuleError {
    fn from(err: PredicateError) -> Self {
        RuleError::Predicate(err)
    }
}

/// A rule failed to evaluate for a specific field.
///
/// # Examples
///
/// ```rust
/// use fieldgate::{RuleError, ValidatorError};
///
/// let err = ValidatorError::new("endTime", "between", RuleError::InvalidOptions {
///     expected: "a [low, high] pair",
/// });
/// assert_eq!(
///     err.to_string(),
///     "rule `between` on field `endTime`: invalid options, expected a [low, high] pair"
/// );
/// ```
#[derive(Debug)]
pub struct ValidatorError {
    field: String,
    rule: String,
    error: RuleError,
}

impl ValidatorError {
    /// Attach the field and rule name to a rule error.
    pub fn new(field: impl Into<String>, rule: impl Into<String>, error: RuleError) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
            error,
        }
    }

    /// The field being validated when the rule failed.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The declared rule name.
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// The underlying rule error.
    pub fn error(&self) -> &RuleError {
        &self.error
    }

    /// Whether this came from a custom predicate rather than a declaration problem.
    pub fn is_predicate(&self) -> bool {
        matches!(self.error, RuleError::Predicate(_))
    }
}

impl fmt::Display for ValidatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rule `{}` on field `{}`: {}",
            self.rule, self.field, self.error
        )
    }
}

impl StdError for ValidatorError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.error)
    }
}
