//! The error bag: field name to ordered failure messages
//!
//! Fields keep the order in which they first received a message, and messages keep
//! the order in which rules produced them. A field that is present in the bag always
//! has at least one message.
//!
//! ```
//! use fieldgate::ErrorBag;
//!
//! let mut errors = ErrorBag::new();
//! errors.push("endTime", "must be present");
//! errors.push("endTime", "undefined must be between 0 and 2");
//!
//! assert_eq!(
//!     errors.to_json_string(),
//!     r#"{"errors":{"endTime":["must be present","undefined must be between 0 and 2"]}}"#
//! );
//! ```

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

use crate::Semigroup;

/// Aggregated failure messages for one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBag {
    entries: Vec<(String, Vec<String>)>,
}

impl ErrorBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to `field`, creating its sequence if needed.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        match self.entries.iter_mut().find(|(name, _)| name == field) {
            Some((_, messages)) => messages.push(message),
            None => self.entries.push((field.to_string(), vec![message])),
        }
    }

    /// Append several messages to `field`, in order.
    ///
    /// An empty `messages` leaves the bag untouched.
    pub fn extend<I, S>(&mut self, field: &str, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for message in messages {
            self.push(field, message);
        }
    }

    /// Messages recorded for `field`, or `None` if it has no errors.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    /// Whether `field` has at least one message.
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// True when no field has failed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total number of messages across all fields.
    pub fn message_count(&self) -> usize {
        self.entries.iter().map(|(_, messages)| messages.len()).sum()
    }

    /// Failing field names in report order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Iterate over `(field, messages)` pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, messages)| (name.as_str(), messages.as_slice()))
    }

    /// Wrap the bag in the `{"errors": ...}` envelope used on the wire and in logs.
    pub fn payload(&self) -> ErrorPayload<'_> {
        ErrorPayload { errors: self }
    }

    /// Compact JSON of the `{"errors": ...}` envelope.
    pub fn to_json_string(&self) -> String {
        self.payload().to_string()
    }
}

impl Semigroup for ErrorBag {
    fn combine(mut self, other: Self) -> Self {
        for (field, messages) in other.entries {
            self.extend(&field, messages);
        }
        self
    }
}

impl Serialize for ErrorBag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, messages) in &self.entries {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

/// The `{"errors": <bag>}` object handed to loggers and serialized as the response body.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ErrorPayload<'a> {
    /// The aggregated failures.
    pub errors: &'a ErrorBag,
}

impl fmt::Display for ErrorPayload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Serializing string keys and string arrays cannot fail.
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
