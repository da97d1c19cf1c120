//! Goodness-of-fit measures for fitted polynomials
//!
//! # Model Fit / Regression Diagnostics
//! - [`sum_of_squared_residuals`]: The quantity least squares minimizes. Lower is better.
//! - [`r_squared`]: Proportion of variance explained by the model. Higher is better (0 to 1).
//!
//! # Error Metrics
//! - [`mean_squared_error`]: Average squared difference between observed and predicted values. Lower is better.
//!
//! # Examples
//!
//! ```rust
//! use lsqpoly::statistics::{r_squared, sum_of_squared_residuals};
//!
//! let y = vec![1.0, 2.0, 3.0];
//! let y_fit = vec![1.1, 1.9, 3.05];
//!
//! let r2 = r_squared(y.iter().copied(), y_fit.iter().copied());
//! let ssr = sum_of_squared_residuals(y.into_iter(), y_fit.into_iter());
//! assert!(r2 > 0.9 && ssr < 0.1);
//! ```
use crate::value::Value;

/// Computes the sum of squared residuals `Σ (y_i - y_fit_i)²`.
///
/// This is the objective a least-squares fit minimizes.
pub fn sum_of_squared_residuals<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    let mut total = T::zero();
    for (y, y_fit) in y.zip(y_fit) {
        total += Value::powi(y - y_fit, 2);
    }
    total
}

/// Calculate the R-squared value for a set of data.
///
/// R-squared is a number between 0 and 1 that tells you how well the model explains the data:
/// - `0` means the model explains none of the variation.
/// - `1` means the model explains all the variation.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// R² = 1 - (SS_res / SS_tot)
/// where
///   SS_res = Σ (y_i - y_fit_i)²
///   SS_tot = Σ (y_i - y_mean)²
/// ```
/// </div>
///
/// When all `y` are equal `SS_tot` is zero; the result is then 1 for a perfect fit, and 0 otherwise.
pub fn r_squared<T: Value>(y: impl Iterator<Item = T>, y_fit: impl Iterator<Item = T>) -> T {
    let y: Vec<T> = y.collect();
    let y_mean = mean(y.iter().copied());

    let mut ss_total = T::zero();
    let mut ss_residual = T::zero();
    for (y, y_fit) in y.into_iter().zip(y_fit) {
        ss_total += Value::powi(y - y_mean, 2);
        ss_residual += Value::powi(y - y_fit, 2);
    }

    if ss_total <= T::zero() {
        return if ss_residual <= T::zero() {
            T::one()
        } else {
            T::zero()
        };
    }

    T::one() - (ss_residual / ss_total)
}

/// Computes the mean squared error between observed and predicted values.
///
/// Returns zero if the iterators yield no elements.
pub fn mean_squared_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    let mut total = T::zero();
    let mut n = T::zero();
    for (y, y_fit) in y.zip(y_fit) {
        total += Value::powi(y - y_fit, 2);
        n += T::one();
    }

    if n == T::zero() {
        return T::zero();
    }
    total / n
}

/// Arithmetic mean; zero for an empty sequence
fn mean<T: Value>(data: impl Iterator<Item = T>) -> T {
    let mut sum = T::zero();
    let mut count = T::zero();
    for value in data {
        sum += value;
        count += T::one();
    }

    if count == T::zero() {
        return T::zero();
    }
    sum / count
}
