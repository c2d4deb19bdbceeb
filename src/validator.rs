//! Request validation: every declared field, one merged result
//!
//! ```rust
//! use fieldgate::{validate, FieldSpec, Request, Schema, Validation};
//! use serde_json::json;
//!
//! let validator = validate(
//!     Schema::new()
//!         .field("startTime", FieldSpec::new().presence())
//!         .field("endTime", FieldSpec::new().presence().between(0, 2)),
//! );
//!
//! let result = validator.validate(&Request::new().with_params(json!({}))).unwrap();
//! match result {
//!     Validation::Failure(errors) => assert_eq!(
//!         errors.to_json_string(),
//!         r#"{"errors":{"startTime":["must be present"],"endTime":["must be present","undefined must be between 0 and 2"]}}"#
//!     ),
//!     Validation::Success(()) => unreachable!(),
//! }
//! ```

use crate::error::ValidatorError;
use crate::middleware::Middleware;
use crate::request::Targets;
use crate::rule::Registry;
use crate::schema::Schema;
use crate::{field, ErrorBag, Validation};

/// Build a [`Validator`] for `schema` using the built-in rules.
pub fn validate(schema: Schema) -> Validator {
    Validator::new(schema)
}

/// Validates requests against a fixed schema.
///
/// A validator is immutable once built and can be shared between threads; every call
/// to [`Validator::validate`] works on its own error bag.
#[derive(Debug, Clone)]
pub struct Validator {
    schema: Schema,
    registry: Registry,
}

impl Validator {
    /// A validator for `schema` with the built-in rules.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            registry: Registry::new(),
        }
    }

    /// Resolve rule names through `registry` instead of the built-ins.
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// The schema being enforced.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The rules available to the schema.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Validate every declared field of `request`.
    ///
    /// Failed rules never produce an `Err`: they are collected into
    /// `Validation::Failure`. An `Err` means a rule could not be evaluated.
    pub fn validate<R>(&self, request: &R) -> Result<Validation<(), ErrorBag>, ValidatorError>
    where
        R: Targets + ?Sized,
    {
        let fields = self
            .schema
            .iter()
            .map(|(name, spec)| field::validate(&self.registry, name, spec, request))
            .collect::<Result<Vec<_>, _>>()?;

        let result = Validation::all(fields).map(|_| ());
        match &result {
            Validation::Success(()) => {
                tracing::debug!(fields = self.schema.len(), "request passed validation");
            }
            Validation::Failure(errors) => {
                tracing::debug!(
                    fields = self.schema.len(),
                    failed = errors.len(),
                    messages = errors.message_count(),
                    "request failed validation"
                );
            }
        }
        Ok(result)
    }

    /// Wrap this validator in request/response middleware.
    pub fn middleware(self) -> Middleware {
        Middleware::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldSpec;
    use crate::Request;
    use serde_json::{json, Value};

    #[test]
    fn test_empty_schema_passes() {
        let result = validate(Schema::new()).validate(&Request::new()).unwrap();
        assert!(result.is_success());
    }

    #[test]
    fn test_fields_fail_independently() {
        let validator = validate(
            Schema::new()
                .field("a", FieldSpec::new().presence())
                .field("b", FieldSpec::new().presence())
                .field("c", FieldSpec::new().one_of([1])),
        );
        let request = Request::new().with_params(json!({"b": 0, "c": 2}));

        let result = validator.validate(&request).unwrap();
        let errors = result.errors().unwrap();
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["a", "c"]);
        assert_eq!(errors.get("c").unwrap(), ["2 must be one of (1)"]);
    }

    #[test]
    fn test_custom_registry_is_used() {
        let registry = Registry::new().with_fn("even", |check, errors| {
            if check.value.and_then(Value::as_i64).is_some_and(|n| n % 2 != 0) {
                errors.push(check.field, "must be even");
            }
            Ok(())
        });
        let validator = validate(Schema::new().field("n", FieldSpec::new().rule("even", true)))
            .with_registry(registry);

        let result = validator
            .validate(&json!({"params": {"n": 3}}))
            .unwrap();
        assert_eq!(
            result.errors().unwrap().get("n").unwrap(),
            ["must be even"]
        );
    }

    #[test]
    fn test_validator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Validator>();
    }
}
