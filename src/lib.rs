//! # lsqpoly
//! ## Polynomial least squares for tables typed in by humans
//!
//! Given a handful of `(x, y)` samples and an order `N`, this crate finds the coefficients
//! `c0..cN` of the polynomial `y = c0 + c1·x + … + cN·xᴺ` that minimize the sum of squared
//! residuals.
//!
//! Samples arrive as **raw text**, the way a grid or spreadsheet hands them over. Every cell is
//! validated before any arithmetic happens, and a cell that is not a number is reported with its
//! row and column; it never silently turns into `0.0`.
//!
//! ```rust
//! use lsqpoly::{PolynomialFitter, Sample, assert_all_close};
//!
//! let rows = vec![
//!     Sample::new("0", "1"),
//!     Sample::new("1", "2").with_comment("second reading"),
//!     Sample::new("2", "5"),
//!     Sample::new("3", "10"),
//! ];
//!
//! let fit = PolynomialFitter::<f64>::new().fit(&rows, 2).unwrap();
//! assert_all_close!(fit.coefficients(), [1.0, 0.0, 1.0], tol = 1e-9); // y = x² + 1
//! assert!(fit.warning().is_none());
//! ```
//!
//! # Core Concepts
//! - A [`Sample`] is one unparsed row: `x`, `y` and a free-text comment.
//! - A [`PolynomialFitter`] validates samples and solves the normal equations `XᵀX·β = Xᵀy`.
//!     - The solve goes through an SVD, so duplicate `x` values or an order as high as the
//!       sample count do not abort the fit. The minimum-norm solution is returned, flagged
//!       with a [`SingularSystem`] warning.
//! - A [`FitResult`] holds exactly `order + 1` coefficients, constant term first, and can be
//!   evaluated, printed, or summarized with [`FitResult::properties`].
//! - A [`Polynomial`] is the evaluable function itself, independent of any dataset.
//!
//! # Errors
//! Every failure is an [`error::Error`]: empty input, an unparsable cell, an order below 1 or
//! above [`FitOptions::max_order`], or a system that overflows while being built.
//!
//! # Logging
//! The fitter reports through the [`log`] facade: problem sizes at `debug`, singular systems at `warn`.
//! Install any logger to see them.
//!
//! # Testing utilities
//! See [`test`] for the [`samples!`], [`assert_close!`] and [`assert_all_close!`] macros.
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![cfg_attr(docsrs, feature(doc_cfg))]


pub mod basis;
pub mod display;
pub mod error;
pub mod sample;
pub mod statistics;
pub mod value;

mod fit;
mod polynomial;

pub use basis::monomial::MonomialPolynomial;
pub use fit::*;
pub use polynomial::Polynomial;
pub use sample::Sample;

pub use nalgebra;

/// Fits a polynomial of the given order to raw samples, using `f64` and default options.
///
/// Returns exactly `order + 1` coefficients, constant term first.
/// A singular system is logged, but otherwise ignored; use [`PolynomialFitter`] to inspect it.
///
/// # Errors
/// See [`PolynomialFitter::fit`].
///
/// # Example
/// ```
/// let rows = lsqpoly::samples![(0, 0), (1, 1), (2, 2), (3, 3)];
/// let coefs = lsqpoly::fit(&rows, 1).unwrap();
/// assert_eq!(coefs.len(), 2);
/// lsqpoly::assert_all_close!(coefs, [0.0, 1.0], tol = 1e-9);
/// ```
pub fn fit(samples: &[Sample<'_>], order: usize) -> error::Result<Vec<f64>> {
    PolynomialFitter::<f64>::new()
        .fit(samples, order)
        .map(FitResult::into_coefficients)
}

/// Validates raw samples and an order without fitting, using `f64` and default options.
///
/// # Errors
/// See [`PolynomialFitter::validate`].
pub fn validate(samples: &[Sample<'_>], order: usize) -> error::Result<ValidatedSamples> {
    PolynomialFitter::<f64>::new().validate(samples, order)
}

#[cfg(test)]
mod tests {
    use crate::samples;

    use super::*;

    #[test]
    fn test_fit_ignores_singular_warning() {
        let rows = samples![(5, 1), (5, 2), (5, 3)];
        let coefs = fit(&rows, 1).unwrap();
        assert_eq!(coefs.len(), 2);
        assert!(coefs.iter().all(|c| c.is_finite()));

        let coefs = fit(&rows, 3).unwrap();
        assert_eq!(coefs.len(), 4);
    }

    #[test]
    fn test_fit_reports_errors() {
        assert_eq!(fit(&[], 1).unwrap_err(), error::Error::EmptyInput);
        assert_eq!(
            validate(&samples![(0, 1)], 0).unwrap_err(),
            error::Error::InvalidOrder(0)
        );
    }
}
