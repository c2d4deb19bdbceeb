use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::{Builtin, Check, FnRule, Rule};
use crate::error::RuleError;
use crate::ErrorBag;

/// Name to rule lookup used when evaluating a field.
///
/// [`Registry::new`] starts with the four [`Builtin`] rules. Additional rules can be
/// registered under any name; registering an existing name replaces that rule.
/// Declarations naming an unregistered rule are skipped.
///
/// # Example
///
/// ```rust
/// use fieldgate::rule::Registry;
/// use serde_json::Value;
///
/// let registry = Registry::new().with_fn("nonEmpty", |check, errors| {
///     if check.value.and_then(Value::as_str) == Some("") {
///         errors.push(check.field, "must not be empty");
///     }
///     Ok(())
/// });
///
/// assert!(registry.contains("presence"));
/// assert!(registry.contains("nonEmpty"));
/// ```
#[derive(Clone)]
pub struct Registry {
    rules: HashMap<String, Arc<dyn Rule>>,
}

impl Registry {
    /// A registry holding the built-in rules.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for builtin in Builtin::ALL {
            registry.register(builtin.name(), builtin);
        }
        registry
    }

    /// A registry with no rules at all.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Register `rule` under `name`, replacing any previous rule of that name.
    pub fn register<R>(&mut self, name: impl Into<String>, rule: R) -> &mut Self
    where
        R: Rule + 'static,
    {
        self.rules.insert(name.into(), Arc::new(rule));
        self
    }

    /// Register a closure as a rule.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&Check<'_>, &mut ErrorBag) -> Result<(), RuleError> + Send + Sync + 'static,
    {
        self.register(name, FnRule::new(f))
    }

    /// Builder form of [`Registry::register`].
    pub fn with<R>(mut self, name: impl Into<String>, rule: R) -> Self
    where
        R: Rule + 'static,
    {
        self.register(name, rule);
        self
    }

    /// Builder form of [`Registry::register_fn`].
    pub fn with_fn<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Check<'_>, &mut ErrorBag) -> Result<(), RuleError> + Send + Sync + 'static,
    {
        self.register_fn(name, f);
        self
    }

    /// Look up a rule by name.
    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules.get(name).map(|rule| rule.as_ref())
    }

    /// Whether a rule is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered rule names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Evaluate the rule registered under `name`.
    ///
    /// Returns `Ok(false)` without touching `errors` when no such rule exists.
    pub fn apply(
        &self,
        name: &str,
        check: &Check<'_>,
        errors: &mut ErrorBag,
    ) -> Result<bool, RuleError> {
        match self.get(name) {
            Some(rule) => rule.evaluate(check, errors).map(|()| true),
            None => {
                tracing::trace!(field = check.field, rule = name, "ignoring unknown rule");
                Ok(false)
            }
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("rules", &self.names())
            .finish()
    }
}
