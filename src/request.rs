//! Request-like inputs: named bags of field values
//!
//! Validators only need to look up `request[target][name]`, so any type exposing named
//! JSON bags can be validated by implementing [`Targets`].
//!
//! ```rust
//! use fieldgate::{Request, Targets};
//! use serde_json::json;
//!
//! let request = Request::new()
//!     .with_params(json!({"startTime": 1}))
//!     .with_query(json!({"page": null}));
//!
//! assert_eq!(request.field("params", "startTime"), Some(&json!(1)));
//! assert_eq!(request.field("query", "page"), Some(&json!(null)));
//! assert_eq!(request.field("body", "anything"), None);
//! ```

use serde_json::{Map, Value};
use std::collections::HashMap;

/// A source of named value bags.
pub trait Targets {
    /// The bag registered under `target`, if any.
    fn bag(&self, target: &str) -> Option<&Value>;

    /// The value stored at `name` inside the `target` bag.
    ///
    /// `None` when the bag is missing, is not an object, or lacks the key.
    fn field(&self, target: &str, name: &str) -> Option<&Value> {
        self.bag(target).and_then(|bag| bag.get(name))
    }
}

impl<T: Targets + ?Sized> Targets for &T {
    fn bag(&self, target: &str) -> Option<&Value> {
        (**self).bag(target)
    }
}

/// A JSON object whose top-level keys are targets.
impl Targets for Value {
    fn bag(&self, target: &str) -> Option<&Value> {
        self.get(target)
    }
}

impl Targets for Map<String, Value> {
    fn bag(&self, target: &str) -> Option<&Value> {
        self.get(target)
    }
}

impl Targets for HashMap<String, Value> {
    fn bag(&self, target: &str) -> Option<&Value> {
        self.get(target)
    }
}

/// An owned set of request bags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    bags: HashMap<String, Value>,
}

impl Request {
    /// A request without any bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bag stored under `target`.
    pub fn with_bag(mut self, target: impl Into<String>, bag: Value) -> Self {
        self.insert(target, bag);
        self
    }

    /// Set the `params` bag.
    pub fn with_params(self, bag: Value) -> Self {
        self.with_bag("params", bag)
    }

    /// Set the `query` bag.
    pub fn with_query(self, bag: Value) -> Self {
        self.with_bag("query", bag)
    }

    /// Set the `body` bag.
    pub fn with_body(self, bag: Value) -> Self {
        self.with_bag("body", bag)
    }

    /// Insert or replace a bag, returning the previous one.
    pub fn insert(&mut self, target: impl Into<String>, bag: Value) -> Option<Value> {
        self.bags.insert(target.into(), bag)
    }

    /// Remove a bag.
    pub fn remove(&mut self, target: &str) -> Option<Value> {
        self.bags.remove(target)
    }
}

impl Targets for Request {
    fn bag(&self, target: &str) -> Option<&Value> {
        self.bags.get(target)
    }
}

impl From<HashMap<String, Value>> for Request {
    fn from(bags: HashMap<String, Value>) -> Self {
        Self { bags }
    }
}
