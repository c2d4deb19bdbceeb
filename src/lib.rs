//! # Fieldgate
//!
//! Declarative validation for request fields.
//!
//! Describe, per field, which checks apply; fieldgate runs every check on every field,
//! collects every failure, and either lets the request through or rejects it as a unit
//! with a structured `{"errors": {<field>: [<message>, ...]}}` payload.
//!
//! ## Quick Example
//!
//! ```rust
//! use fieldgate::{validate, FieldSpec, Request, Schema, Validation};
//! use serde_json::json;
//!
//! let validator = validate(
//!     Schema::new()
//!         .field("startTime", FieldSpec::new().presence())
//!         .field("endTime", FieldSpec::new().presence().between(0, 2))
//!         .field("sort", FieldSpec::new().with_target("query").allow_blank().one_of(["asc", "desc"])),
//! );
//!
//! let request = Request::new()
//!     .with_params(json!({"startTime": 10}))
//!     .with_query(json!({}));
//!
//! match validator.validate(&request).unwrap() {
//!     Validation::Success(()) => println!("valid"),
//!     Validation::Failure(errors) => {
//!         assert_eq!(
//!             errors.get("endTime").unwrap(),
//!             ["must be present", "undefined must be between 0 and 2"]
//!         );
//!         assert!(!errors.contains("sort"));
//!     }
//! }
//! ```
//!
//! ## Built-in rules
//!
//! | Rule | Declared with | Fails when |
//! |---|---|---|
//! | `presence` | [`FieldSpec::presence`] | value missing or `null` |
//! | `between` | [`FieldSpec::between`] | value missing, below `low` or above `high` |
//! | `in` | [`FieldSpec::one_of`] | value not equal to any allowed value |
//! | `custom` | [`FieldSpec::custom`] | predicate returns a message |
//!
//! More rules can be added through a [`rule::Registry`]. Declarations naming a rule the
//! registry does not know are ignored.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod error_bag;
pub mod field;
pub mod middleware;
pub mod request;
pub mod rule;
pub mod schema;
pub mod semigroup;
pub mod testing;
pub mod validation;
pub mod validator;
pub mod value;

// Re-exports
pub use error::{PredicateError, RuleError, ValidatorError};
pub use error_bag::{ErrorBag, ErrorPayload};
pub use middleware::{ErrorLogger, Middleware, Outcome, Respond, TracingLogger};
pub use request::{Request, Targets};
pub use schema::{FieldSpec, Schema};
pub use semigroup::Semigroup;
pub use validation::Validation;
pub use validator::{validate, Validator};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PredicateError, ValidatorError};
    pub use crate::error_bag::ErrorBag;
    pub use crate::middleware::{ErrorLogger, Middleware, Outcome, Respond};
    pub use crate::request::{Request, Targets};
    pub use crate::rule::Registry;
    pub use crate::schema::{FieldSpec, Schema};
    pub use crate::semigroup::Semigroup;
    pub use crate::validation::Validation;
    pub use crate::validator::{validate, Validator};
}
