//! Polynomial basis functions for least-squares fitting
//!
//! This module defines the [`Basis`] trait, which describes how a row of the design
//! (Vandermonde-style) matrix is built for a given `x`, and how a polynomial expressed in
//! that basis is evaluated.
//!
//! # Provided Bases
//! - [`MonomialBasis`]: The standard monomial basis, i.e., 1, x, x², … xⁿ.
//!   Coefficients fitted in this basis are exactly the `c0..cN` of `c0 + c1·x + … + cN·xᴺ`.
//!
//! # Rolling Your Own
//! To implement a custom basis:
//! 1. Implement the `Basis<T>` trait for your type.
//! 2. Define how to populate a row of the design matrix in `fill_matrix_row`.
//! 3. Implement `solve_function` to evaluate the jth basis function.
//! 4. Implement [`crate::display::PolynomialDisplay`] so fitted results can be printed.
//!
//! This allows [`crate::PolynomialFitter`] and [`crate::Polynomial`] to use your basis seamlessly.

use nalgebra::MatrixViewMut;

use crate::value::Value;

pub(crate) mod monomial;
pub use monomial::MonomialBasis;

/// A trait representing a polynomial basis.
///
/// Assumes a Vandermonde structure for the basis functions.
///
/// A polynomial basis defines the set of functions φ₀, φ₁, …, φₙ used to represent a polynomial,
/// so that `y(x) = Σ c_j·φ_j(x)`.
///
/// # Type Parameters
/// - `T`: The numeric type used for coefficients and evaluation (e.g., `f64`).
pub trait Basis<T: Value>: Sized + Clone + Default + std::fmt::Debug + Send + Sync {
    /// Returns the number of basis functions needed for a polynomial of a given degree.
    ///
    /// The default implementation returns `degree + 1`:
    /// - Degree 1 → 2 functions (constant + x¹)
    /// - Degree 2 → 3 functions (constant + x¹ + x²)
    #[inline(always)]
    fn k(&self, degree: usize) -> usize {
        degree + 1
    }

    /// Returns the polynomial degree corresponding to a given number of basis functions.
    ///
    /// Returns `None` if the number of functions does not correspond to a valid degree.
    #[inline(always)]
    fn degree(&self, k: usize) -> Option<usize> {
        k.checked_sub(1)
    }

    /// Populates a row of the design matrix with this basis evaluated at `x`.
    ///
    /// All basis functions are written into `row`, starting at column `start_index`.
    ///
    /// # Parameters
    /// - `start_index`: Column index where writing begins.
    /// - `x`: The evaluation point.
    /// - `row`: Mutable row buffer.
    fn fill_matrix_row<R: nalgebra::Dim, C: nalgebra::Dim, RS: nalgebra::Dim, CS: nalgebra::Dim>(
        &self,
        start_index: usize,
        x: T,
        row: MatrixViewMut<T, R, C, RS, CS>,
    );

    /// Evaluates the jth basis function at `x`.
    fn solve_function(&self, j: usize, x: T) -> T;

    /// Evaluates a polynomial in this basis at `x`.
    ///
    /// The default sums `c_j·φ_j(x)`; bases with a cheaper recurrence should override it.
    fn solve(&self, x: T, coefficients: &[T]) -> T {
        let mut y = T::zero();
        for (j, &c) in coefficients.iter().enumerate() {
            y += c * self.solve_function(j, x);
        }
        y
    }
}
