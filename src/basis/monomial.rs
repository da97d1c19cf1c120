use std::borrow::Cow;

use nalgebra::MatrixViewMut;

use crate::{
    basis::Basis,
    display::{self, Sign, DEFAULT_PRECISION},
    value::Value,
    Polynomial,
};

/// Standard (non-normalized) monomial basis for polynomials.
///
/// The monomial basis represents polynomials using the familiar powers of `x`:
///
/// ```text
/// 1, x, x², …, xⁿ
/// ```
///
/// It is **not normalized**, which means the design matrix becomes badly conditioned
/// for high orders or widely spread `x` values. The SVD solve used by
/// [`crate::PolynomialFitter`] tolerates this, and reports it through [`crate::SingularSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonomialBasis<T: Value = f64>(std::marker::PhantomData<T>);
impl<T: Value> Default for MonomialBasis<T> {
    fn default() -> Self {
        Self(std::marker::PhantomData)
    }
}
impl<T: Value> Basis<T> for MonomialBasis<T> {
    #[inline(always)]
    fn fill_matrix_row<R: nalgebra::Dim, C: nalgebra::Dim, RS: nalgebra::Dim, CS: nalgebra::Dim>(
        &self,
        start_index: usize,
        x: T,
        mut row: MatrixViewMut<T, R, C, RS, CS>,
    ) {
        // Running product; x^j for j = start_index..
        let mut power = T::one();
        for _ in 0..start_index {
            power *= x;
        }

        for j in start_index..row.ncols() {
            row[j] = power;
            power *= x;
        }
    }

    #[inline(always)]
    fn solve_function(&self, j: usize, x: T) -> T {
        match j {
            0 => T::one(),
            1 => x,
            _ => Value::powi(x, i32::try_from(j).unwrap_or(i32::MAX)),
        }
    }

    /// Horner's method
    fn solve(&self, x: T, coefficients: &[T]) -> T {
        let mut y = T::zero();
        for &c in coefficients.iter().rev() {
            y = y * x + c;
        }
        y
    }
}
impl<T: Value> display::PolynomialDisplay<T> for MonomialBasis<T> {
    fn format_term(&self, degree: i32, coef: T) -> Option<display::Term> {
        let sign = Sign::from_coef(coef);

        let base = display::format_variable("x", degree);
        let coef = display::format_coefficient(coef, degree, DEFAULT_PRECISION)?;

        let body = format!("{coef}{base}");
        Some(display::Term::new(sign, body))
    }
}

/// A monomial polynomial of the form `y = c0 + c1·x + … + cN·xᴺ`.
///
/// # Type Parameters
/// - `'a`: Lifetime of borrowed coefficients (if used).
/// - `T`: Numeric type (default `f64`).
pub type MonomialPolynomial<'a, T = f64> = Polynomial<'a, MonomialBasis<T>, T>;

impl<'a, T: Value> MonomialPolynomial<'a, T> {
    /// Creates a new borrowed monomial polynomial from a slice of coefficients.
    ///
    /// # Parameters
    /// - `coefficients`: Slice of coefficients, starting from the constant term.
    ///
    /// # Example
    /// ```
    /// # use lsqpoly::MonomialPolynomial;
    /// let poly = MonomialPolynomial::borrowed(&[1.0, 2.0, 3.0]); // 1 + 2x + 3x^2
    /// assert_eq!(poly.y(2.0), 17.0);
    /// ```
    #[must_use]
    pub fn borrowed(coefficients: &'a [T]) -> Self {
        Self::new_unchecked(MonomialBasis::default(), Cow::Borrowed(coefficients))
    }

    /// Creates a new owned monomial polynomial from a vector of coefficients.
    ///
    /// # Parameters
    /// - `coefficients`: Vec of coefficients, starting from the constant term.
    #[must_use]
    pub fn owned(coefficients: Vec<T>) -> Self {
        Self::new_unchecked(MonomialBasis::default(), Cow::Owned(coefficients))
    }
}
