//! Schemas: which rules apply to which request fields
//!
//! A [`Schema`] is an ordered list of fields, each described by a [`FieldSpec`]. Fields
//! are validated, and reported, in declaration order.
//!
//! Schemas can be built in code:
//!
//! ```rust
//! use fieldgate::{FieldSpec, Schema};
//!
//! let schema = Schema::new()
//!     .field("startTime", FieldSpec::new().presence())
//!     .field("endTime", FieldSpec::new().presence().between(0, 2))
//!     .field("page", FieldSpec::new().with_target("query").allow_blank().one_of([1, 2, 3]));
//!
//! assert_eq!(schema.len(), 3);
//! ```
//!
//! or declared as JSON, where every key other than `target` and `allowBlank` is a
//! rule name:
//!
//! ```rust
//! use fieldgate::Schema;
//!
//! let schema = Schema::from_json_str(r#"{
//!     "startTime": {"presence": true},
//!     "endTime": {"presence": true, "between": [0, 2], "target": "query", "allowBlank": true}
//! }"#).unwrap();
//!
//! let (name, spec) = schema.iter().nth(1).unwrap();
//! assert_eq!(name, "endTime");
//! assert_eq!(spec.target(), "query");
//! assert!(spec.allows_blank());
//! assert_eq!(spec.rule_names().collect::<Vec<_>>(), ["presence", "between"]);
//! ```
//!
//! Parse from a string (or any order-preserving deserializer) rather than from a
//! `serde_json::Value`: a `Value` object does not keep key order.

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;
use std::fmt;

use crate::error::PredicateError;
use crate::rule::{Builtin, Predicate, Rule, RuleOptions};

/// Bag a field is read from when no target is declared.
pub const DEFAULT_TARGET: &str = "params";

/// How one field is validated.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    target: String,
    allow_blank: bool,
    rules: Vec<(String, RuleOptions)>,
}

impl FieldSpec {
    /// A spec reading from [`DEFAULT_TARGET`] with no rules.
    pub fn new() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            allow_blank: false,
            rules: Vec::new(),
        }
    }

    /// Read the field from another bag of the request, e.g. `"query"` or `"body"`.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Skip every rule when the target bag or the value is missing or `null`.
    pub fn allow_blank(mut self) -> Self {
        self.allow_blank = true;
        self
    }

    /// Declare a rule by name.
    ///
    /// Declaring a name twice replaces the options but keeps the original position.
    pub fn rule(mut self, name: impl Into<String>, options: impl Into<RuleOptions>) -> Self {
        self.set_rule(name.into(), options.into());
        self
    }

    /// Require a value.
    pub fn presence(self) -> Self {
        self.rule(Builtin::Presence.name(), RuleOptions::Flag(true))
    }

    /// Require a value within inclusive bounds.
    pub fn between(self, low: impl Into<Value>, high: impl Into<Value>) -> Self {
        self.rule(Builtin::Between.name(), RuleOptions::range(low, high))
    }

    /// Require a value equal to one of `values` (declared as the `in` rule).
    pub fn one_of<I, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.rule(Builtin::In.name(), RuleOptions::one_of(values))
    }

    /// Check the value with a predicate returning the failure message, if any.
    ///
    /// ```rust
    /// use fieldgate::FieldSpec;
    /// use serde_json::json;
    ///
    /// let spec = FieldSpec::new()
    ///     .custom(|v| (v != Some(&json!(1))).then(|| "start time not 1".to_string()));
    /// ```
    pub fn custom<F>(self, f: F) -> Self
    where
        F: Fn(Option<&Value>) -> Option<String> + Send + Sync + 'static,
    {
        self.rule(Builtin::Custom.name(), Predicate::new(f))
    }

    /// Like [`FieldSpec::custom`], for predicates that can fail.
    ///
    /// A predicate error aborts the run with a [`ValidatorError`](crate::ValidatorError).
    pub fn try_custom<F>(self, f: F) -> Self
    where
        F: Fn(Option<&Value>) -> Result<Option<String>, PredicateError> + Send + Sync + 'static,
    {
        self.rule(Builtin::Custom.name(), Predicate::fallible(f))
    }

    /// Name of the bag this field is read from.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Whether blank values skip every rule.
    pub fn allows_blank(&self) -> bool {
        self.allow_blank
    }

    /// Declared rules in order.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &RuleOptions)> {
        self.rules
            .iter()
            .map(|(name, options)| (name.as_str(), options))
    }

    /// Declared rule names in order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(name, _)| name.as_str())
    }

    fn set_rule(&mut self, name: String, options: RuleOptions) {
        match self.rules.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = options,
            None => self.rules.push((name, options)),
        }
    }
}

impl Default for FieldSpec {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered field name to [`FieldSpec`] mapping.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(String, FieldSpec)>,
}

impl Schema {
    /// An empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field. Redeclaring a field replaces its spec in place.
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.insert(name.into(), spec);
        self
    }

    /// Parse a declarative JSON schema, keeping field and rule order.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Spec for `name`, if declared.
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, spec)| spec)
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no field is declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn insert(&mut self, name: String, spec: FieldSpec) {
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = spec,
            None => self.fields.push((name, spec)),
        }
    }
}

impl<'de> Deserialize<'de> for FieldSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldSpecVisitor;

        impl<'de> Visitor<'de> for FieldSpecVisitor {
            type Value = FieldSpec;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a field spec object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FieldSpec, A::Error> {
                let mut spec = FieldSpec::new();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "target" => spec.target = map.next_value()?,
                        "allowBlank" => spec.allow_blank = map.next_value()?,
                        _ => {
                            let options = RuleOptions::Value(map.next_value::<Value>()?);
                            if let Some(builtin) = Builtin::from_name(&key) {
                                builtin.check_options(&options).map_err(|e| {
                                    <A::Error as de::Error>::custom(format_args!(
                                        "rule `{}`: {}",
                                        key, e
                                    ))
                                })?;
                            }
                            spec.set_rule(key, options);
                        }
                    }
                }
                Ok(spec)
            }
        }

        deserializer.deserialize_map(FieldSpecVisitor)
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SchemaVisitor;

        impl<'de> Visitor<'de> for SchemaVisitor {
            type Value = Schema;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to field specs")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Schema, A::Error> {
                let mut schema = Schema::new();
                while let Some((name, spec)) = map.next_entry::<String, FieldSpec>()? {
                    schema.insert(name, spec);
                }
                Ok(schema)
            }
        }

        deserializer.deserialize_map(SchemaVisitor)
    }
}
