//! Semigroup trait for associative merging
//!
//! A Semigroup is a type with an associative binary operation. Fieldgate uses it to
//! fold the per-field error bags produced during a run into the single bag that is
//! reported for the request, so failures accumulate instead of short-circuiting.
//!
//! # Laws
//!
//! For a type to be a valid Semigroup, `combine` must be associative:
//! ```text
//! a.combine(b).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! # Examples
//!
//! ```
//! use fieldgate::{ErrorBag, Semigroup};
//!
//! let mut start = ErrorBag::new();
//! start.push("startTime", "must be present");
//!
//! let mut end = ErrorBag::new();
//! end.push("endTime", "must be present");
//!
//! let merged = start.combine(end);
//! assert_eq!(merged.fields().collect::<Vec<_>>(), vec!["startTime", "endTime"]);
//! ```

/// A type that supports an associative binary operation
///
/// # Note on Ownership
///
/// `combine` takes `self` by value so implementations can reuse the left
/// operand's allocation. Clone first if the originals are still needed.
pub trait Semigroup: Sized {
    /// Combine this value with another value associatively
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldgate::Semigroup;
    ///
    /// let messages = vec!["must be present".to_string()];
    /// let more = vec!["undefined must be between 0 and 2".to_string()];
    /// assert_eq!(messages.combine(more).len(), 2);
    /// ```
    fn combine(self, other: Self) -> Self;
}

impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_semigroup_keeps_order() {
        let v1 = vec!["must be present"];
        let v2 = vec!["undefined must be between 0 and 2"];
        assert_eq!(
            v1.combine(v2),
            vec!["must be present", "undefined must be between 0 and 2"]
        );
    }

    #[test]
    fn test_vec_semigroup_empty() {
        let v1: Vec<&str> = vec![];
        let v2 = vec!["a"];
        assert_eq!(v1.combine(v2), vec!["a"]);
    }

    #[test]
    fn test_vec_associativity() {
        let a = vec![1, 2];
        let b = vec![3];
        let c = vec![4, 5];
        assert_eq!(
            a.clone().combine(b.clone()).combine(c.clone()),
            a.combine(b.combine(c))
        );
    }
}
