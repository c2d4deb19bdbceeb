//! Testing utilities
//!
//! Assertion macros for validation results and recording doubles for the transport
//! collaborators, so middleware can be exercised without an HTTP stack.
//!
//! # Examples
//!
//! ```rust
//! use fieldgate::{assert_field_errors, assert_success, validate, FieldSpec, Schema};
//! use serde_json::json;
//!
//! let validator = validate(Schema::new().field("startTime", FieldSpec::new().one_of([1, 3])));
//!
//! assert_success!(validator.validate(&json!({"params": {"startTime": 3}})).unwrap());
//! assert_field_errors!(
//!     validator.validate(&json!({"params": {"startTime": 2}})).unwrap(),
//!     "startTime",
//!     ["2 must be one of (1,3)"]
//! );
//! ```

use serde_json::Value;
use std::sync::Mutex;

use crate::error_bag::ErrorPayload;
use crate::middleware::{ErrorLogger, Respond};

/// Records what the middleware writes to a response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockResponse {
    status: Option<u16>,
    body: Option<String>,
    sends: usize,
}

impl MockResponse {
    /// A response nothing has been written to.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last status set, if any.
    pub fn status_code(&self) -> Option<u16> {
        self.status
    }

    /// The last body sent, if any.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// How many times `send` was called.
    pub fn send_count(&self) -> usize {
        self.sends
    }
}

impl Respond for MockResponse {
    fn status(&mut self, code: u16) -> &mut Self {
        self.status = Some(code);
        self
    }

    fn send(&mut self, body: String) {
        self.body = Some(body);
        self.sends += 1;
    }
}

/// Records every payload handed to [`ErrorLogger::error`].
#[derive(Debug, Default)]
pub struct MockLogger {
    payloads: Mutex<Vec<Value>>,
}

impl MockLogger {
    /// A logger with no recorded calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Payloads received so far, as JSON values.
    pub fn payloads(&self) -> Vec<Value> {
        self.payloads
            .lock()
            .map(|payloads| payloads.clone())
            .unwrap_or_default()
    }
}

impl ErrorLogger for MockLogger {
    fn error(&self, payload: &ErrorPayload<'_>) {
        if let (Ok(value), Ok(mut payloads)) = (serde_json::to_value(payload), self.payloads.lock())
        {
            payloads.push(value);
        }
    }
}

/// Assert that a validation succeeds.
///
/// # Example
///
/// ```rust
/// use fieldgate::{Validation, assert_success};
///
/// let val = Validation::<_, Vec<String>>::success(42);
/// assert_success!(val);
/// ```
#[macro_export]
macro_rules! assert_success {
    ($validation:expr) => {
        match $validation {
            $crate::Validation::Success(_) => {}
            $crate::Validation::Failure(e) => {
                panic!("Expected Success, got Failure: {:?}", e);
            }
        }
    };
}

/// Assert that a validation fails.
///
/// # Example
///
/// ```rust
/// use fieldgate::{Validation, assert_failure};
///
/// let val = Validation::<i32, _>::failure(vec!["must be present".to_string()]);
/// assert_failure!(val);
/// ```
#[macro_export]
macro_rules! assert_failure {
    ($validation:expr) => {
        match $validation {
            $crate::Validation::Failure(_) => {}
            $crate::Validation::Success(v) => {
                panic!("Expected Failure, got Success: {:?}", v);
            }
        }
    };
}

/// Assert that a validation fails with exactly the given errors.
///
/// # Example
///
/// ```rust
/// use fieldgate::{Validation, assert_validation_errors};
///
/// let val = Validation::<i32, _>::failure(vec!["error1", "error2"]);
/// assert_validation_errors!(val, vec!["error1", "error2"]);
/// ```
#[macro_export]
macro_rules! assert_validation_errors {
    ($validation:expr, $expected:expr) => {
        match $validation {
            $crate::Validation::Failure(errors) => {
                assert_eq!(errors, $expected);
            }
            $crate::Validation::Success(v) => {
                panic!(
                    "Expected Failure with errors {:?}, got Success: {:?}",
                    $expected, v
                );
            }
        }
    };
}

/// Assert that a request validation failed with exactly `messages` for `field`.
///
/// Other fields may also have failed.
#[macro_export]
macro_rules! assert_field_errors {
    ($validation:expr, $field:expr, $messages:expr) => {
        match $validation {
            $crate::Validation::Failure(errors) => match errors.get($field) {
                Some(actual) => assert_eq!(actual, $messages),
                None => panic!("Expected errors for `{}`, got {:?}", $field, errors),
            },
            $crate::Validation::Success(v) => {
                panic!(
                    "Expected Failure for `{}`, got Success: {:?}",
                    $field, v
                );
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorBag, Validation};
    use serde_json::json;

    #[test]
    fn test_mock_response_records_status_and_body() {
        let mut response = MockResponse::new();
        response.status(422).send("{}".to_string());
        assert_eq!(response.status_code(), Some(422));
        assert_eq!(response.body(), Some("{}"));
        assert_eq!(response.send_count(), 1);
    }

    #[test]
    fn test_mock_logger_records_payload_objects() {
        let mut bag = ErrorBag::new();
        bag.push("startTime", "must be present");
        let logger = MockLogger::new();
        logger.error(&bag.payload());
        assert_eq!(
            logger.payloads(),
            [json!({"errors": {"startTime": ["must be present"]}})]
        );
    }

    #[test]
    fn test_assert_success_macro() {
        let val = Validation::<_, ErrorBag>::success(());
        assert_success!(val);
    }

    #[test]
    fn test_assert_field_errors_macro() {
        let mut bag = ErrorBag::new();
        bag.push("a", "must be present");
        assert_field_errors!(Validation::<(), _>::failure(bag), "a", ["must be present"]);
    }

    #[test]
    #[should_panic(expected = "Expected Success, got Failure")]
    fn test_assert_success_panics_on_failure() {
        let val = Validation::<i32, _>::failure(vec!["error".to_string()]);
        assert_success!(val);
    }

    #[test]
    #[should_panic(expected = "Expected Failure, got Success")]
    fn test_assert_failure_panics_on_success() {
        let val = Validation::<_, Vec<String>>::success(42);
        assert_failure!(val);
    }

    #[test]
    #[should_panic(expected = "Expected errors for `b`")]
    fn test_assert_field_errors_panics_on_other_field() {
        let mut bag = ErrorBag::new();
        bag.push("a", "must be present");
        assert_field_errors!(Validation::<(), _>::failure(bag), "b", ["must be present"]);
    }
}
