use std::borrow::Cow;

use crate::{
    basis::Basis,
    display::PolynomialDisplay,
    error::{Error, Result},
    statistics,
    value::{CoordExt, Value},
};

/// Represents a polynomial function in a given basis.
///
/// This is the evaluable form of a fit result: it is not tied to any dataset, and can be
/// evaluated at any x-value.
///
/// # Type Parameters
/// - `'a`: Lifetime for borrowed coefficients, if used.
/// - `B`: The polynomial basis (e.g., [`crate::basis::MonomialBasis`]).
/// - `T`: Numeric type for the coefficients, default is `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial<'a, B, T: Value = f64>
where
    B: Basis<T>,
    B: PolynomialDisplay<T>,
{
    degree: usize,
    basis: B,
    coefficients: Cow<'a, [T]>,
}
impl<'a, B, T: Value> Polynomial<'a, B, T>
where
    B: Basis<T>,
    B: PolynomialDisplay<T>,
{
    /// Creates a polynomial without checking the coefficient count against the basis.
    ///
    /// An empty coefficient list is treated as degree 0, and evaluates to 0.
    pub(crate) fn new_unchecked(basis: B, coefficients: Cow<'a, [T]>) -> Self {
        let degree = basis.degree(coefficients.len()).unwrap_or_default();
        Self {
            degree,
            basis,
            coefficients,
        }
    }

    /// Creates a new polynomial from a basis and coefficients, inferring the degree.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOrder`] if there are no coefficients.
    pub fn from_basis(basis: B, coefficients: impl Into<Cow<'a, [T]>>) -> Result<Self> {
        let coefficients = coefficients.into();
        if basis.degree(coefficients.len()).is_none() {
            return Err(Error::InvalidOrder(0));
        }
        Ok(Self::new_unchecked(basis, coefficients))
    }

    /// Converts the polynomial into an owned version, with `'static` lifetime.
    pub fn into_owned(self) -> Polynomial<'static, B, T> {
        Polynomial {
            degree: self.degree,
            basis: self.basis,
            coefficients: Cow::Owned(self.coefficients.into_owned()),
        }
    }

    /// Returns a reference to the polynomial’s coefficients.
    ///
    /// The coefficient at index j belongs to the jth basis function.
    /// For example in a monomial expression `y(x) = 2x^2 - 3x + 1`;
    /// coefficients = [1.0, -3.0, 2.0]
    #[must_use]
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Consumes the polynomial, returning its coefficients.
    #[must_use]
    pub fn into_coefficients(self) -> Vec<T> {
        self.coefficients.into_owned()
    }

    /// Returns the degree of the polynomial.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Evaluates the polynomial at a given x-value.
    ///
    /// # Example
    /// ```
    /// # use lsqpoly::MonomialPolynomial;
    /// let poly = MonomialPolynomial::borrowed(&[1.0, 2.0, 3.0]); // Represents 1 + 2x + 3x^2
    /// assert_eq!(poly.y(2.0), 17.0);
    /// ```
    pub fn y(&self, x: T) -> T {
        self.basis.solve(x, &self.coefficients)
    }

    /// Evaluates the polynomial at multiple x-values, returning `(x, y)` pairs.
    pub fn solve(&self, x: impl IntoIterator<Item = T>) -> Vec<(T, T)> {
        x.into_iter().map(|x| (x, self.y(x))).collect()
    }

    /// Returns the residuals `y - y(x)` of this polynomial against `data`.
    pub fn residuals(&self, data: &[(T, T)]) -> Vec<T> {
        data.iter().map(|&(x, y)| y - self.y(x)).collect()
    }

    /// Calculates the R-squared value for the model compared to provided data.
    ///
    /// See [`statistics::r_squared`] for more details.
    pub fn r_squared(&self, data: &[(T, T)]) -> T {
        let y_fit = data.x_iter().map(|x| self.y(x));
        statistics::r_squared(data.y_iter(), y_fit)
    }

    /// Returns a human-readable string of the polynomial equation, e.g. `y(x) = 1.00x² + 1.00`
    #[must_use]
    pub fn equation(&self) -> String {
        let mut output = String::new();
        // Writing to a String cannot fail
        let _ = self.basis.format_polynomial(&mut output, self.coefficients());
        output
    }
}

impl<B, T: Value> std::fmt::Display for Polynomial<'_, B, T>
where
    B: Basis<T>,
    B: PolynomialDisplay<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.basis.format_polynomial(f, self.coefficients())
    }
}
