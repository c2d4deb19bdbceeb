//! Validation of a single field
//!
//! A field is read from its target bag, checked against its blank policy, and then run
//! through every declared rule in order. Each rule sees the same field-local
//! [`ErrorBag`], so one field can collect several messages.

use serde_json::Value;

use crate::error::ValidatorError;
use crate::request::Targets;
use crate::rule::{Check, Registry};
use crate::schema::FieldSpec;
use crate::value::is_absent;
use crate::{ErrorBag, Validation};

/// Whether a field's rules are skipped entirely.
///
/// True only when the spec allows blanks and either the target bag or the value is
/// missing or `null`.
pub fn should_skip(spec: &FieldSpec, bag: Option<&Value>, value: Option<&Value>) -> bool {
    spec.allows_blank() && (is_absent(bag) || is_absent(value))
}

/// Run every rule declared in `spec` against `value`, appending to `errors`.
///
/// Rules are not short-circuited. Names missing from the registry are skipped.
pub fn evaluate(
    registry: &Registry,
    name: &str,
    spec: &FieldSpec,
    value: Option<&Value>,
    errors: &mut ErrorBag,
) -> Result<(), ValidatorError> {
    for (rule, options) in spec.rules() {
        let check = Check::new(name, value, options);
        registry
            .apply(rule, &check, errors)
            .map_err(|e| ValidatorError::new(name, rule, e))?;
    }
    Ok(())
}

/// Validate one field of `request`.
///
/// Returns `Validation::Failure` with a bag holding only this field's messages.
///
/// ```rust
/// use fieldgate::rule::Registry;
/// use fieldgate::{field, FieldSpec, Request};
/// use serde_json::json;
///
/// let spec = FieldSpec::new().presence().between(0, 2);
/// let request = Request::new().with_params(json!({}));
///
/// let result = field::validate(&Registry::new(), "endTime", &spec, &request).unwrap();
/// let errors = result.errors().unwrap();
/// assert_eq!(
///     errors.get("endTime").unwrap(),
///     ["must be present", "undefined must be between 0 and 2"]
/// );
/// ```
pub fn validate<R>(
    registry: &Registry,
    name: &str,
    spec: &FieldSpec,
    request: &R,
) -> Result<Validation<(), ErrorBag>, ValidatorError>
where
    R: Targets + ?Sized,
{
    let bag = request.bag(spec.target());
    let value = bag.and_then(|bag| bag.get(name));

    if should_skip(spec, bag, value) {
        tracing::debug!(field = name, target = spec.target(), "skipping blank field");
        return Ok(Validation::success(()));
    }

    let mut errors = ErrorBag::new();
    evaluate(registry, name, spec, value, &mut errors)?;

    Ok(if errors.is_empty() {
        Validation::success(())
    } else {
        Validation::failure(errors)
    })
}
