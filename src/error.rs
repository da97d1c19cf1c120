//! Error types for polynomial least-squares fitting
//!
//! This module defines the failures a fit can report, along with a convenient `Result` alias.
//!
//! Note that a singular normal-equation system is **not** an error; see [`crate::SingularSystem`].

use crate::sample::SampleField;

/// Errors that can occur while validating samples or fitting a polynomial.
///
/// These are developer-facing. Translating them into user-facing text is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Cannot perform curve fitting because there are no samples.
    #[error("No samples available for fitting")]
    EmptyInput,

    /// A sample field could not be parsed as a finite real number.
    #[error("Row {row}: {field} value `{text}` is not a valid number")]
    InvalidNumber {
        /// Zero-based index of the offending sample
        row: usize,

        /// Which field of the sample was rejected
        field: SampleField,

        /// The rejected text, as supplied
        text: String,
    },

    /// The fit order must be at least 1.
    #[error("Fit order must be at least 1, got {0}")]
    InvalidOrder(usize),

    /// The fit order exceeds the maximum configured in [`crate::FitOptions`].
    #[error("Fit order {order} exceeds the configured maximum of {max}")]
    OrderTooHigh {
        /// Requested order
        order: usize,

        /// Configured maximum
        max: usize,
    },

    /// The requested order would need a system too large to build.
    #[error("Fit order {order} over {samples} samples needs a system too large to build")]
    SystemTooLarge {
        /// Requested order
        order: usize,

        /// Number of samples
        samples: usize,
    },

    /// A numeric value could not be cast to the target type.
    #[error("Failed to cast value to target type")]
    CastFailed,

    /// Failed to solve the algebraic system during fitting.
    ///
    /// Contains a static string describing the solver error.
    #[error("Failed to solve: {0}")]
    Algebra(&'static str),
}

/// Result type for polynomial fitting
pub type Result<T> = std::result::Result<T, Error>;
