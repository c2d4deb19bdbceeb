//! Validation type for accumulating errors
//!
//! `Validation` is similar to `Result` but is meant for checks where every failure
//! should be collected rather than stopping at the first one. A request validator
//! produces `Validation<(), ErrorBag>`: success when no rule failed, failure carrying
//! every message gathered during the run.
//!
//! # Examples
//!
//! ## Basic usage
//!
//! ```
//! use fieldgate::Validation;
//!
//! let success = Validation::<_, Vec<&str>>::success(42);
//! let failure = Validation::<i32, _>::failure(vec!["must be present"]);
//!
//! assert!(success.is_success());
//! assert!(failure.is_failure());
//! ```
//!
//! ## Accumulating errors
//!
//! ```
//! use fieldgate::Validation;
//!
//! let v1 = Validation::<i32, _>::failure(vec!["must be present"]);
//! let v2 = Validation::<i32, _>::failure(vec!["undefined must be between 0 and 2"]);
//!
//! assert_eq!(
//!     Validation::all([v1, v2]),
//!     Validation::Failure(vec!["must be present", "undefined must be between 0 and 2"])
//! );
//! ```

use crate::Semigroup;

/// A validation that either succeeds with a value or fails with accumulated errors
///
/// # Type Parameters
///
/// * `T` - The type of the success value
/// * `E` - The type of the error value (must implement `Semigroup` for accumulation)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation<T, E> {
    /// Successful validation with a value
    Success(T),
    /// Failed validation with accumulated errors
    Failure(E),
}

impl<T, E> Validation<T, E> {
    /// Create a successful validation
    #[inline]
    pub fn success(value: T) -> Self {
        Validation::Success(value)
    }

    /// Create a failed validation
    #[inline]
    pub fn failure(error: E) -> Self {
        Validation::Failure(error)
    }

    /// Check if this validation is successful
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Validation::Success(_))
    }

    /// Check if this validation failed
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Validation::Failure(_))
    }

    /// Borrow the accumulated errors, if any
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldgate::Validation;
    ///
    /// let v = Validation::<(), _>::failure(vec!["must be present"]);
    /// assert_eq!(v.errors(), Some(&vec!["must be present"]));
    /// ```
    #[inline]
    pub fn errors(&self) -> Option<&E> {
        match self {
            Validation::Success(_) => None,
            Validation::Failure(error) => Some(error),
        }
    }

    /// Transform the success value if present
    #[inline]
    pub fn map<U, F>(self, f: F) -> Validation<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Validation::Success(value) => Validation::Success(f(value)),
            Validation::Failure(error) => Validation::Failure(error),
        }
    }
}

impl<T, E: Semigroup> Validation<T, E> {
    /// Validate every item, collecting all successes or all failures
    ///
    /// Failures are combined in iteration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldgate::Validation;
    ///
    /// let result = Validation::all(vec![
    ///     Validation::<_, Vec<&str>>::success(1),
    ///     Validation::failure(vec!["startTime"]),
    ///     Validation::failure(vec!["endTime"]),
    /// ]);
    /// assert_eq!(result, Validation::Failure(vec!["startTime", "endTime"]));
    /// ```
    pub fn all<I>(validations: I) -> Validation<Vec<T>, E>
    where
        I: IntoIterator<Item = Validation<T, E>>,
    {
        let mut values = Vec::new();
        let mut errors: Option<E> = None;

        for validation in validations {
            match validation {
                Validation::Success(value) => values.push(value),
                Validation::Failure(error) => {
                    errors = Some(match errors {
                        Some(acc) => acc.combine(error),
                        None => error,
                    });
                }
            }
        }

        match errors {
            Some(error) => Validation::Failure(error),
            None => Validation::Success(values),
        }
    }
}
