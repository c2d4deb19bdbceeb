//! Request/response adapter around a [`Validator`]
//!
//! On success the next handler runs and its output is returned untouched. On failure
//! the `{"errors": ...}` payload goes to the logger, the response gets status 422 and
//! the compact JSON payload as body, and the next handler is never called.
//!
//! ```rust
//! use fieldgate::testing::{MockLogger, MockResponse};
//! use fieldgate::{validate, FieldSpec, Outcome, Request, Schema};
//! use serde_json::json;
//!
//! let middleware = validate(Schema::new().field("startTime", FieldSpec::new().presence()))
//!     .middleware()
//!     .with_logger(MockLogger::new());
//!
//! let mut response = MockResponse::new();
//! let outcome = middleware
//!     .handle(&Request::new().with_params(json!({})), &mut response, || "handled")
//!     .unwrap();
//!
//! assert!(matches!(outcome, Outcome::Rejected(_)));
//! assert_eq!(response.status_code(), Some(422));
//! assert_eq!(response.body(), Some(r#"{"errors":{"startTime":["must be present"]}}"#));
//! ```

use crate::error::ValidatorError;
use crate::error_bag::ErrorPayload;
use crate::request::Targets;
use crate::validator::Validator;
use crate::{ErrorBag, Validation};

/// Status written when a request fails validation.
pub const UNPROCESSABLE_ENTITY: u16 = 422;

/// The response half of the transport.
pub trait Respond {
    /// Set the status code.
    fn status(&mut self, code: u16) -> &mut Self;

    /// Write the body.
    fn send(&mut self, body: String);
}

/// Receives the failure payload of a rejected request.
pub trait ErrorLogger {
    /// Record a rejected request at error severity.
    fn error(&self, payload: &ErrorPayload<'_>);
}

/// Logs rejected requests through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl ErrorLogger for TracingLogger {
    fn error(&self, payload: &ErrorPayload<'_>) {
        tracing::error!(
            failed = payload.errors.len(),
            errors = %payload,
            "rejecting request with invalid fields"
        );
    }
}

impl<L: ErrorLogger + ?Sized> ErrorLogger for &L {
    fn error(&self, payload: &ErrorPayload<'_>) {
        (**self).error(payload)
    }
}

/// What happened to a request that went through [`Middleware::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Validation passed and the next handler returned this value.
    Next(T),
    /// Validation failed; the response has already been written.
    Rejected(ErrorBag),
}

impl<T> Outcome<T> {
    /// True when the request was rejected.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }
}

/// Validation middleware.
#[derive(Debug, Clone)]
pub struct Middleware<L = TracingLogger> {
    validator: Validator,
    logger: L,
}

impl Middleware {
    /// Middleware logging through [`TracingLogger`].
    pub fn new(validator: Validator) -> Self {
        Self {
            validator,
            logger: TracingLogger,
        }
    }
}

impl<L: ErrorLogger> Middleware<L> {
    /// Send failure payloads to `logger` instead.
    pub fn with_logger<L2: ErrorLogger>(self, logger: L2) -> Middleware<L2> {
        Middleware {
            validator: self.validator,
            logger,
        }
    }

    /// The wrapped validator.
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// The configured logger.
    pub fn logger(&self) -> &L {
        &self.logger
    }

    /// Validate `request`, then either call `next` or reject.
    ///
    /// A [`ValidatorError`] is returned as is; nothing is logged or written for it.
    pub fn handle<R, S, N, T>(
        &self,
        request: &R,
        response: &mut S,
        next: N,
    ) -> Result<Outcome<T>, ValidatorError>
    where
        R: Targets + ?Sized,
        S: Respond,
        N: FnOnce() -> T,
    {
        match self.validator.validate(request)? {
            Validation::Success(()) => Ok(Outcome::Next(next())),
            Validation::Failure(errors) => {
                let payload = errors.payload();
                self.logger.error(&payload);
                response
                    .status(UNPROCESSABLE_ENTITY)
                    .send(payload.to_string());
                Ok(Outcome::Rejected(errors))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSpec, Schema};
    use crate::testing::{MockLogger, MockResponse};
    use crate::validator::validate;
    use crate::PredicateError;
    use serde_json::json;
    use tracing_test::traced_test;

    fn presence_middleware() -> Middleware<MockLogger> {
        validate(Schema::new().field("startTime", FieldSpec::new().presence()))
            .middleware()
            .with_logger(MockLogger::new())
    }

    #[test]
    fn test_success_calls_next_and_writes_nothing() {
        let middleware = presence_middleware();
        let mut response = MockResponse::new();

        let outcome = middleware
            .handle(&json!({"params": {"startTime": 1}}), &mut response, || 7)
            .unwrap();

        assert_eq!(outcome, Outcome::Next(7));
        assert_eq!(response.status_code(), None);
        assert_eq!(response.body(), None);
        assert!(middleware.logger().payloads().is_empty());
    }

    #[test]
    fn test_failure_logs_and_writes_422() {
        let middleware = presence_middleware();
        let mut response = MockResponse::new();
        let mut called = false;

        let outcome = middleware
            .handle(&json!({"params": {}}), &mut response, || called = true)
            .unwrap();

        assert!(outcome.is_rejected());
        assert!(!called);
        assert_eq!(response.status_code(), Some(UNPROCESSABLE_ENTITY));
        assert_eq!(
            response.body(),
            Some(r#"{"errors":{"startTime":["must be present"]}}"#)
        );
        assert_eq!(
            middleware.logger().payloads(),
            [json!({"errors": {"startTime": ["must be present"]}})]
        );
    }

    #[test]
    fn test_validator_error_propagates_without_response() {
        let middleware = validate(Schema::new().field(
            "startTime",
            FieldSpec::new().try_custom(|_| Err(PredicateError::new("boom"))),
        ))
        .middleware()
        .with_logger(MockLogger::new());
        let mut response = MockResponse::new();

        let err = middleware
            .handle(&json!({"params": {}}), &mut response, || ())
            .unwrap_err();

        assert!(err.is_predicate());
        assert_eq!(response.status_code(), None);
        assert!(middleware.logger().payloads().is_empty());
    }

    #[traced_test]
    #[test]
    fn test_tracing_logger_emits_error_event() {
        let middleware =
            validate(Schema::new().field("startTime", FieldSpec::new().presence())).middleware();
        let mut response = MockResponse::new();

        middleware
            .handle(&json!({}), &mut response, || ())
            .unwrap();

        assert!(logs_contain("rejecting request with invalid fields"));
        assert!(logs_contain("must be present"));
    }
}
