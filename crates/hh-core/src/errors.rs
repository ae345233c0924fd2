//! Error types for the household solvers.
//!
//! Malformed economic inputs are rejected eagerly with
//! [`Error::InvalidArgument`]; results that break a contract after they were
//! computed surface as [`Error::Postcondition`]. Failing to reach the
//! convergence tolerance is *not* an error and is reported separately by the
//! solvers.

use thiserror::Error;

/// The top-level error type used throughout the workspace.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Malformed input detected before any computation starts.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A computed result violates its contract.
    #[error("postcondition not satisfied: {0}")]
    Postcondition(String),

    /// Numerical failure (singular system, non-finite intermediate, ...).
    #[error("{0}")]
    Runtime(String),

    /// Two inputs that must agree in size do not.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// The size that was required.
        expected: usize,
        /// The size that was supplied.
        found: usize,
    },
}

/// Shorthand `Result` type used throughout the workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reject malformed input.
///
/// Returns `Err(Error::InvalidArgument(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use hh_core::{ensure, errors::Error};
/// fn discount(beta: f64) -> hh_core::errors::Result<f64> {
///     ensure!(beta > 0.0 && beta < 1.0, "beta must lie in (0, 1), got {beta}");
///     Ok(beta)
/// }
/// assert!(discount(0.96).is_ok());
/// assert!(matches!(discount(1.5), Err(Error::InvalidArgument(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidArgument(
                format!($($msg)*)
            ));
        }
    };
}

/// Check a property of a computed result.
///
/// Returns `Err(Error::Postcondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use hh_core::{ensure_post, errors::Error};
/// fn normalise(x: f64) -> hh_core::errors::Result<f64> {
///     let result = x / 2.0;
///     ensure_post!(result >= 0.0, "result must be non-negative, got {result}");
///     Ok(result)
/// }
/// assert!(normalise(1.0).is_ok());
/// assert!(normalise(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure_post {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Postcondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Abort with a runtime error.
///
/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use hh_core::{fail, errors::Error};
/// fn always_err() -> hh_core::errors::Result<()> {
///     fail!("linear system is singular");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positive(x: f64) -> Result<f64> {
        ensure!(x > 0.0, "x must be positive, got {x}");
        Ok(x)
    }

    #[test]
    fn ensure_maps_to_invalid_argument() {
        assert_eq!(positive(2.0), Ok(2.0));
        assert_eq!(
            positive(-1.0),
            Err(Error::InvalidArgument("x must be positive, got -1".into()))
        );
    }

    #[test]
    fn dimension_mismatch_message() {
        let e = Error::DimensionMismatch {
            expected: 3,
            found: 2,
        };
        assert_eq!(e.to_string(), "dimension mismatch: expected 3, found 2");
    }
}
