use std::marker::PhantomData;

use nalgebra::{DMatrix, DVector, SVD};

use crate::{
    basis::{Basis, MonomialBasis},
    display::PolynomialDisplay,
    error::{Error, Result},
    sample::{self, Sample},
    statistics,
    value::{CoordExt, Value},
    Polynomial,
};

/// Iteration cap for the SVD; a well-formed normal matrix converges in far fewer
const MAX_SVD_ITERATIONS: usize = 10_000;

/// Largest element count allowed for either the design matrix or the normal matrix
const MAX_MATRIX_ELEMENTS: usize = 1 << 28;

/// Options controlling a [`PolynomialFitter`].
///
/// Can be deserialized from any serde format; missing fields take their defaults.
///
/// # Example
/// ```
/// # use lsqpoly::FitOptions;
/// let options = FitOptions::default().with_max_order(10);
/// assert_eq!(options.max_order, Some(10));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FitOptions {
    /// Highest order the fitter accepts. `None` means unbounded.
    pub max_order: Option<usize>,

    /// Relative cutoff for singular values of the normal matrix.
    ///
    /// Singular values at or below `rcond * σ_max` are treated as zero.
    /// `None` uses `machine_epsilon * size * σ_max`.
    pub rcond: Option<f64>,
}
impl FitOptions {
    /// Sets the highest order the fitter accepts.
    #[must_use]
    pub fn with_max_order(mut self, max_order: usize) -> Self {
        self.max_order = Some(max_order);
        self
    }

    /// Sets the relative singular value cutoff.
    #[must_use]
    pub fn with_rcond(mut self, rcond: f64) -> Self {
        self.rcond = Some(rcond);
        self
    }
}

/// Advisory raised when the normal-equation matrix `XᵀX` is singular or severely ill-conditioned.
///
/// This is **not** an error: the fit still returns the minimum-norm least-squares solution.
/// Common causes are duplicate `x` values, or an order too high for the number of distinct `x`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SingularSystem<T: Value = f64> {
    /// Numerical rank of `XᵀX`
    pub rank: usize,

    /// Number of coefficients, i.e. the rank a well-posed system would have
    pub k: usize,

    /// Ratio of the largest to the smallest singular value.
    ///
    /// Infinite whenever the SVD reports a smallest singular value of exactly zero, which
    /// happens for nearly singular matrices as well as exactly singular ones.
    pub condition: T,
}
impl<T: Value> std::fmt::Display for SingularSystem<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Normal matrix is rank deficient (rank {} of {}, condition {:.3e}); returning the minimum-norm solution",
            self.rank, self.k, self.condition
        )
    }
}

/// Samples that have passed validation, ready to be fitted.
///
/// Produced by [`PolynomialFitter::validate`]. Holding one guarantees every `x` and `y`
/// parsed to a finite number and the order is acceptable, so fitting it cannot fail on input.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSamples<T: Value = f64> {
    points: Vec<(T, T)>,
    order: usize,
}
impl<T: Value> ValidatedSamples<T> {
    /// The parsed `(x, y)` points, in the original row order.
    #[must_use]
    pub fn points(&self) -> &[(T, T)] {
        &self.points
    }

    /// The validated fit order.
    #[must_use]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; validation rejects empty input.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consumes this value, returning the parsed points.
    #[must_use]
    pub fn into_points(self) -> Vec<(T, T)> {
        self.points
    }
}

/// Polynomial least-squares fitter.
///
/// Fits `c0 + c1·x + … + cN·xᴺ` to a set of samples by:
/// - Building the design matrix `X` of shape `[M, N+1]`, with `X[i][j] = x_i^j`.
/// - Forming the normal equations `A = XᵀX`, `b = Xᵀy`.
/// - Solving `A·β = b` through the **SVD** of `A`, never a direct inverse.
///
/// Rank-deficient systems (duplicate `x` values, order ≥ sample count) are not an error:
/// small singular values are cut off, the minimum-norm solution is returned, and the
/// result carries a [`SingularSystem`] warning.
///
/// The fitter holds only immutable options, so one instance can be shared freely across threads.
///
/// # Type parameters
/// - `T`: Numeric type (default `f64`) implementing [`Value`].
/// - `B`: The basis type, implementing [`Basis<T>`]. Defaults to [`MonomialBasis`].
///
/// # Example
/// ```
/// # use lsqpoly::{PolynomialFitter, samples, assert_all_close};
/// let rows = samples![(0, 1), (1, 2), (2, 5), (3, 10)]; // y = x² + 1
/// let fit = PolynomialFitter::<f64>::new().fit(&rows, 2).unwrap();
/// assert_all_close!(fit.coefficients(), [1.0, 0.0, 1.0], tol = 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PolynomialFitter<T: Value = f64, B = MonomialBasis<T>>
where
    B: Basis<T>,
    B: PolynomialDisplay<T>,
{
    basis: B,
    options: FitOptions,
    _value: PhantomData<fn() -> T>,
}
impl<T: Value, B> PolynomialFitter<T, B>
where
    B: Basis<T>,
    B: PolynomialDisplay<T>,
{
    /// Creates a fitter with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(FitOptions::default())
    }

    /// Creates a fitter with the given options.
    #[must_use]
    pub fn with_options(options: FitOptions) -> Self {
        Self {
            basis: B::default(),
            options,
            _value: PhantomData,
        }
    }

    /// Returns the options this fitter was built with.
    #[must_use]
    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    /// Checks raw samples and an order, parsing every `x` and `y` up front.
    ///
    /// Checks run in this sequence, and the first failure is returned:
    /// 1. `samples` is not empty
    /// 2. `order` is at least 1, within [`FitOptions::max_order`] if set, and small
    ///    enough that the matrices can be built
    /// 3. each row, in order, `x` then `y`, parses to a finite number
    ///
    /// # Errors
    /// - [`Error::EmptyInput`] if there are no samples.
    /// - [`Error::InvalidOrder`] / [`Error::OrderTooHigh`] for an unacceptable order.
    /// - [`Error::SystemTooLarge`] if the order is too large to fit in memory.
    /// - [`Error::InvalidNumber`] naming the first bad row and field.
    pub fn validate(&self, samples: &[Sample<'_>], order: usize) -> Result<ValidatedSamples<T>> {
        if samples.is_empty() {
            return Err(Error::EmptyInput);
        }
        self.check_order(order, samples.len())?;

        let points = sample::parse_all(samples)?;
        Ok(ValidatedSamples { points, order })
    }

    /// Validates and fits raw samples.
    ///
    /// See [`PolynomialFitter::validate`] for the checks performed, and
    /// [`PolynomialFitter::fit_validated`] for the solve.
    ///
    /// # Errors
    /// Any error from [`PolynomialFitter::validate`], or [`Error::Algebra`] if the system
    /// could not be solved (e.g. `xᴺ` overflows).
    pub fn fit(&self, samples: &[Sample<'_>], order: usize) -> Result<FitResult<T, B>> {
        let validated = self.validate(samples, order)?;
        self.fit_validated(validated)
    }

    /// Fits points that are already numeric.
    ///
    /// The same checks as [`PolynomialFitter::validate`] apply, with non-finite
    /// coordinates reported as [`Error::InvalidNumber`].
    ///
    /// # Errors
    /// See [`PolynomialFitter::fit`].
    pub fn fit_points(&self, points: &[(T, T)], order: usize) -> Result<FitResult<T, B>> {
        if points.is_empty() {
            return Err(Error::EmptyInput);
        }
        self.check_order(order, points.len())?;
        sample::check_finite(points)?;

        self.fit_validated(ValidatedSamples {
            points: points.to_vec(),
            order,
        })
    }

    /// Fits samples that have already been validated.
    ///
    /// # Errors
    /// Returns [`Error::Algebra`] if the normal equations contain non-finite values
    /// (typically `xᴺ` overflowing), or if the SVD fails to converge.
    pub fn fit_validated(&self, validated: ValidatedSamples<T>) -> Result<FitResult<T, B>> {
        let ValidatedSamples { points, order } = validated;
        let k = self.basis.k(order);
        log::debug!(
            "fitting {} samples at order {order} ({k} coefficients)",
            points.len()
        );

        let (x_matrix, y) = Self::create_matrix(&points, &self.basis, k);
        let (xtx, xty) = Self::normal_equations(&x_matrix, &y);
        let solution = self.solve_matrix(xtx, &xty)?;

        let warning = (solution.rank < k).then(|| SingularSystem {
            rank: solution.rank,
            k,
            condition: solution.condition,
        });
        match &warning {
            Some(w) => log::warn!("{w}"),
            None => log::debug!("normal matrix condition {:.3e}", solution.condition),
        }

        let function = Polynomial::new_unchecked(self.basis.clone(), solution.coefficients.into());
        Ok(FitResult {
            data: points,
            order,
            function,
            warning,
        })
    }

    fn check_order(&self, order: usize, samples: usize) -> Result<()> {
        if order == 0 {
            return Err(Error::InvalidOrder(order));
        }

        if let Some(max) = self.options.max_order {
            if order > max {
                return Err(Error::OrderTooHigh { order, max });
            }
        }

        // Both X (samples x k) and XᵀX (k x k) must be allocatable
        let fits = order
            .checked_add(1)
            .and_then(|k| Some((samples.checked_mul(k)?, k.checked_mul(k)?)))
            .is_some_and(|(x_len, xtx_len)| {
                x_len <= MAX_MATRIX_ELEMENTS && xtx_len <= MAX_MATRIX_ELEMENTS
            });
        if !fits {
            return Err(Error::SystemTooLarge { order, samples });
        }

        Ok(())
    }

    /// Turns a dataset into a design matrix and y-values vector.
    fn create_matrix(data: &[(T, T)], basis: &B, k: usize) -> (DMatrix<T>, DVector<T>) {
        let mut bigx = DMatrix::zeros(data.len(), k);
        let b = DVector::from_iterator(data.len(), data.y_iter());

        for (row, (x, _)) in bigx.row_iter_mut().zip(data.iter()) {
            basis.fill_matrix_row(0, *x, row);
        }

        (bigx, b)
    }

    /// Reduce the n by k / n by 1 system into a k by k / k by 1 one.
    fn normal_equations(matrix: &DMatrix<T>, b: &DVector<T>) -> (DMatrix<T>, DVector<T>) {
        let xtx = matrix.transpose() * matrix;
        let xtb = matrix.transpose() * b;
        (xtx, xtb)
    }

    /// Solves the linear system using SVD.
    fn solve_matrix(&self, xtx: DMatrix<T>, xtb: &DVector<T>) -> Result<Solution<T>> {
        let size = xtx.shape();

        // An overflowing x^j poisons the SVD; it may never converge on NaN
        if xtx.iter().chain(xtb.iter()).any(|v| !num_traits::float::FloatCore::is_finite(*v)) {
            return Err(Error::Algebra("non-finite values in normal equations"));
        }

        // Calculate the singular value decomposition of the matrix
        let decomp = SVD::try_new_unordered(xtx, true, true, T::epsilon(), MAX_SVD_ITERATIONS)
            .ok_or(Error::Algebra("SVD did not converge"))?;

        // Calculate epsilon value
        // ~= machine_epsilon * max(size) * max_singular, unless overridden
        let sigma_max = decomp.singular_values.max();
        let sigma_min = decomp.singular_values.min();
        let epsilon = match self.options.rcond {
            Some(rcond) => T::try_cast(rcond)? * sigma_max,
            None => T::epsilon() * T::try_cast(size.0.max(size.1))? * sigma_max,
        };

        let rank = decomp.rank(epsilon);
        let condition = if sigma_min > T::zero() {
            sigma_max / sigma_min
        } else {
            T::infinity()
        };

        // Solve for X in `SVD * X = b`; values under epsilon are dropped, giving the minimum-norm solution
        let big_x = decomp.solve(xtb, epsilon).map_err(Error::Algebra)?;
        let coefficients: Vec<_> = big_x.data.into();

        // Make sure the coefficients are valid
        if coefficients.iter().any(|c| num_traits::float::FloatCore::is_nan(*c)) {
            return Err(Error::Algebra("NaN in coefficients"));
        }

        Ok(Solution {
            coefficients,
            rank,
            condition,
        })
    }
}

struct Solution<T> {
    coefficients: Vec<T>,
    rank: usize,
    condition: T,
}

/// The outcome of a successful fit: `order + 1` coefficients, and an optional [`SingularSystem`] warning.
///
/// `coefficients()[j]` is the coefficient of `xʲ`, so the fitted value at `x` is
/// `c0 + c1·x + … + cN·xᴺ`.
///
/// The result also keeps the parsed points it was fitted to, for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult<T: Value = f64, B = MonomialBasis<T>>
where
    B: Basis<T>,
    B: PolynomialDisplay<T>,
{
    data: Vec<(T, T)>,
    order: usize,
    function: Polynomial<'static, B, T>,
    warning: Option<SingularSystem<T>>,
}
impl<T: Value, B> FitResult<T, B>
where
    B: Basis<T>,
    B: PolynomialDisplay<T>,
{
    /// Returns the fitted coefficients `c0..cN`, constant term first.
    #[must_use]
    pub fn coefficients(&self) -> &[T] {
        self.function.coefficients()
    }

    /// Consumes the result, returning the coefficient vector.
    #[must_use]
    pub fn into_coefficients(self) -> Vec<T> {
        self.function.into_coefficients()
    }

    /// Returns the order the fit was computed at.
    #[must_use]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns the singular-system advisory, if the normal matrix was rank deficient.
    #[must_use]
    pub fn warning(&self) -> Option<&SingularSystem<T>> {
        self.warning.as_ref()
    }

    /// Returns true if the normal matrix was rank deficient.
    #[must_use]
    pub fn is_singular(&self) -> bool {
        self.warning.is_some()
    }

    /// Returns the `(x, y)` points this result was fitted to.
    #[must_use]
    pub fn data(&self) -> &[(T, T)] {
        &self.data
    }

    /// Returns the fitted polynomial, which can be evaluated at any `x`.
    #[must_use]
    pub fn polynomial(&self) -> &Polynomial<'static, B, T> {
        &self.function
    }

    /// Consumes the result, returning the fitted polynomial.
    #[must_use]
    pub fn into_polynomial(self) -> Polynomial<'static, B, T> {
        self.function
    }

    /// Evaluates the fitted polynomial at `x`.
    pub fn y(&self, x: T) -> T {
        self.function.y(x)
    }

    /// Returns the residuals `y_i - ŷ(x_i)` for every fitted point, in row order.
    #[must_use]
    pub fn residuals(&self) -> Vec<T> {
        self.function.residuals(&self.data)
    }

    /// Returns `Σ (y_i - ŷ(x_i))²`, the quantity the fit minimizes.
    #[must_use]
    pub fn sum_of_squared_residuals(&self) -> T {
        let y_fit = self.data.x_iter().map(|x| self.y(x));
        statistics::sum_of_squared_residuals(self.data.y_iter(), y_fit)
    }

    /// Returns the mean squared error of the fit against its own data.
    #[must_use]
    pub fn mean_squared_error(&self) -> T {
        let y_fit = self.data.x_iter().map(|x| self.y(x));
        statistics::mean_squared_error(self.data.y_iter(), y_fit)
    }

    /// Returns the R² of the fit against its own data.
    #[must_use]
    pub fn r_squared(&self) -> T {
        self.function.r_squared(&self.data)
    }

    /// Returns a human-readable equation, e.g. `y(x) = x² + 1.00`.
    #[must_use]
    pub fn equation(&self) -> String {
        self.function.equation()
    }

    /// Returns a serializable summary of the fit.
    #[must_use]
    pub fn properties(&self) -> FitProperties<T> {
        FitProperties {
            order: self.order,
            data_points: self.data.len(),
            coefficients: self.coefficients().to_vec(),
            rank: self.warning.map_or(self.coefficients().len(), |w| w.rank),
            singular: self.is_singular(),
            mse: self.mean_squared_error(),
            r_squared: self.r_squared(),
        }
    }
}

impl<T: Value, B> std::fmt::Display for FitResult<T, B>
where
    B: Basis<T>,
    B: PolynomialDisplay<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.function)
    }
}

/// A set of diagnostic properties for a fit.
///
/// Can be serialized to JSON or other formats for a presentation layer.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct FitProperties<T: Value> {
    /// The order of the fitted polynomial.
    pub order: usize,

    /// The number of samples used in the fit.
    pub data_points: usize,

    /// The fitted coefficients, constant term first.
    pub coefficients: Vec<T>,

    /// Numerical rank of the normal matrix.
    pub rank: usize,

    /// Whether the normal matrix was rank deficient.
    pub singular: bool,

    /// The mean squared error of the fit.
    pub mse: T,

    /// The R² value of the fit.
    pub r_squared: T,
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use rand_distr::{Distribution, Normal};

    use crate::{assert_all_close, assert_close, sample::SampleField, samples, MonomialPolynomial};

    use super::*;

    fn fitter() -> PolynomialFitter {
        PolynomialFitter::new()
    }

    /// Least squares on the design matrix itself, without the normal equations
    fn reference_lstsq(data: &[(f64, f64)], order: usize) -> Vec<f64> {
        let x = DMatrix::from_fn(data.len(), order + 1, |i, j| {
            data[i].0.powi(i32::try_from(j).unwrap())
        });
        let y = DVector::from_iterator(data.len(), data.iter().map(|&(_, y)| y));
        let svd = x.svd(true, true);
        svd.solve(&y, 1e-12).unwrap().data.into()
    }

    fn noisy_cubic(n: usize, seed: u64) -> Vec<(f64, f64)> {
        let poly = MonomialPolynomial::borrowed(&[2.0, -1.0, 0.5, 0.25]);
        let noise = Normal::new(0.0, 0.5).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|i| {
                let x = -3.0 + 6.0 * (i as f64) / (n as f64 - 1.0);
                (x, poly.y(x) + noise.sample(&mut rng))
            })
            .collect()
    }

    #[test]
    fn test_exact_quadratic_recovery() {
        let rows = samples![(0, 1), (1, 2), (2, 5), (3, 10)];
        let fit = fitter().fit(&rows, 2).unwrap();
        assert_eq!(fit.coefficients().len(), 3);
        assert_all_close!(fit.coefficients(), [1.0, 0.0, 1.0], tol = 1e-9);
        assert!(!fit.is_singular());
        assert_close!(fit.r_squared(), 1.0, tol = 1e-12);
    }

    #[test]
    fn test_linear_fit() {
        let rows = samples![(0, 0), (1, 1), (2, 2), (3, 3)];
        let fit = fitter().fit(&rows, 1).unwrap();
        assert_all_close!(fit.coefficients(), [0.0, 1.0], tol = 1e-9);
        assert_eq!(fit.order(), 1);
    }

    #[test]
    fn test_exact_cubic_recovery_with_extra_samples() {
        let poly = MonomialPolynomial::borrowed(&[-4.0, 0.5, 2.0, -0.75]);
        let data = poly.solve((0..12).map(|i| f64::from(i) * 0.5 - 2.0));
        let fit = fitter().fit_points(&data, 3).unwrap();
        assert_all_close!(fit.coefficients(), poly.coefficients(), tol = 1e-9);
        assert_close!(fit.sum_of_squared_residuals(), 0.0, tol = 1e-16);
    }

    #[test]
    fn test_matches_reference_least_squares() {
        let data = noisy_cubic(50, 7);
        for order in 1..=4 {
            let fit = fitter().fit_points(&data, order).unwrap();
            let reference = reference_lstsq(&data, order);
            assert_all_close!(fit.coefficients(), reference, tol = 1e-7);
        }
    }

    #[test]
    fn test_minimizes_squared_residuals() {
        let data = noisy_cubic(40, 11);
        let fit = fitter().fit_points(&data, 3).unwrap();
        let best = fit.sum_of_squared_residuals();

        // Nudging any coefficient can only make things worse
        for j in 0..4 {
            for delta in [-1e-3, 1e-3] {
                let mut coefs = fit.coefficients().to_vec();
                coefs[j] += delta;
                let poly = MonomialPolynomial::owned(coefs);
                let ssr = statistics::sum_of_squared_residuals(
                    data.y_iter(),
                    data.x_iter().map(|x| poly.y(x)),
                );
                assert!(ssr > best, "coefficient {j} nudged by {delta}: {ssr} <= {best}");
            }
        }
    }

    #[test]
    fn test_empty_input() {
        let err = fitter().fit(&[], 2).unwrap_err();
        assert_eq!(err, Error::EmptyInput);

        let err = fitter().fit_points(&[], 2).unwrap_err();
        assert_eq!(err, Error::EmptyInput);

        // Empty input is reported before anything else
        let err = fitter().validate(&[], 0).unwrap_err();
        assert_eq!(err, Error::EmptyInput);
    }

    #[test]
    fn test_invalid_number_names_row() {
        let rows = samples![(0, 1), (1, 2), ("abc", 5), (3, 10)];
        let err = fitter().fit(&rows, 2).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidNumber {
                row: 2,
                field: SampleField::X,
                text: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_y_is_never_zero() {
        let rows = samples![(0, 1), (1, ""), (2, 5)];
        let err = fitter().validate(&rows, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidNumber {
                row: 1,
                field: SampleField::Y,
                ..
            }
        ));
    }

    #[test]
    fn test_order_checks() {
        let rows = samples![(0, 1), (1, 2)];
        assert_eq!(fitter().fit(&rows, 0).unwrap_err(), Error::InvalidOrder(0));

        let bounded = PolynomialFitter::<f64>::with_options(FitOptions::default().with_max_order(3));
        assert!(bounded.fit(&rows, 3).is_ok());
        assert_eq!(
            bounded.fit(&rows, 4).unwrap_err(),
            Error::OrderTooHigh { order: 4, max: 3 }
        );

        // Orders that cannot be allocated are rejected, not attempted
        assert_eq!(
            fitter().fit(&rows, usize::MAX).unwrap_err(),
            Error::SystemTooLarge {
                order: usize::MAX,
                samples: 2
            }
        );
        assert_eq!(
            fitter().fit(&rows, 1 << 40).unwrap_err(),
            Error::SystemTooLarge {
                order: 1 << 40,
                samples: 2
            }
        );
        assert!(matches!(
            fitter().fit_points(&[(0.0, 1.0)], usize::MAX - 1),
            Err(Error::SystemTooLarge { .. })
        ));
        assert!(matches!(
            fitter().validate(&rows, 1 << 20),
            Err(Error::SystemTooLarge { .. })
        ));

        // Order is checked before parsing
        let bad = samples![("abc", 1)];
        assert_eq!(fitter().fit(&bad, 0).unwrap_err(), Error::InvalidOrder(0));
    }

    #[test]
    fn test_validate_then_fit() {
        let rows = samples![(0, 1, "origin"), (1, 2), (2, 5), (3, 10, "last")];
        let validated = fitter().validate(&rows, 2).unwrap();
        assert_eq!(validated.len(), 4);
        assert_eq!(validated.order(), 2);
        assert_eq!(validated.points()[3], (3.0, 10.0));

        let fit = fitter().fit_validated(validated.clone()).unwrap();
        assert_eq!(fit, fitter().fit(&rows, 2).unwrap());
        assert_eq!(fit.data(), validated.points());
    }

    #[test]
    fn test_deterministic() {
        let data = noisy_cubic(25, 3);
        let a = fitter().fit_points(&data, 3).unwrap().into_coefficients();
        let b = fitter().fit_points(&data, 3).unwrap().into_coefficients();
        assert_eq!(a, b);
    }

    #[test]
    fn test_identical_x_is_singular_not_fatal() {
        let rows = samples![(5, 1), (5, 2), (5, 3)];
        let fit = fitter().fit(&rows, 1).unwrap();
        assert!(fit.coefficients().iter().all(|c| c.is_finite()));

        let warning = fit.warning().expect("expected a singular system warning");
        assert_eq!(warning.rank, 1);
        assert_eq!(warning.k, 2);
        assert!(warning.condition > 1e12);

        // Minimum-norm solution passes through the mean of y at x = 5
        assert_close!(fit.y(5.0), 2.0, tol = 1e-9);
        assert_all_close!(fit.coefficients(), [1.0 / 13.0, 5.0 / 13.0], tol = 1e-9);
    }

    #[test]
    fn test_underdetermined_interpolates() {
        let rows = samples![(0, 1), (1, 2)];
        let fit = fitter().fit(&rows, 3).unwrap();
        assert_eq!(fit.coefficients().len(), 4);
        assert!(fit.is_singular());
        assert_close!(fit.y(0.0), 1.0, tol = 1e-9);
        assert_close!(fit.y(1.0), 2.0, tol = 1e-9);
    }

    #[test]
    fn test_single_sample() {
        let rows = samples![(2, 3)];
        let fit = fitter().fit(&rows, 1).unwrap();
        assert!(fit.is_singular());
        assert_close!(fit.y(2.0), 3.0, tol = 1e-9);
    }

    #[test]
    fn test_overflow_is_an_error() {
        let fit = fitter().fit_points(&[(1e200, 1.0), (2e200, 2.0)], 2);
        assert!(matches!(fit, Err(Error::Algebra(_))));
    }

    #[test]
    fn test_non_finite_points() {
        let err = fitter()
            .fit_points(&[(0.0, 1.0), (1.0, f64::NAN)], 1)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidNumber {
                row: 1,
                field: SampleField::Y,
                ..
            }
        ));
    }

    #[test]
    fn test_rcond_option() {
        // With a huge cutoff everything but the dominant direction is dropped
        let data = noisy_cubic(20, 5);
        let loose = PolynomialFitter::<f64>::with_options(FitOptions::default().with_rcond(0.5));
        let fit = loose.fit_points(&data, 3).unwrap();
        assert!(fit.is_singular());
        assert_eq!(fit.warning().unwrap().rank, 1);
    }

    #[test]
    fn test_f32_fit() {
        let data: Vec<(f32, f32)> = vec![(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)];
        let fit = PolynomialFitter::<f32>::new().fit_points(&data, 1).unwrap();
        assert_all_close!(fit.coefficients(), [1.0f32, 2.0], tol = 1e-4);
    }

    #[test]
    fn test_result_diagnostics() {
        let rows = samples![(0, 1), (1, 2), (2, 5), (3, 10)];
        let fit = fitter().fit(&rows, 2).unwrap();
        assert_eq!(fit.residuals().len(), 4);
        assert!(fit.mean_squared_error() < 1e-18);
        assert!(fit.equation().starts_with("y(x) = "));
        assert!(fit.equation().contains("x²"));
        assert_eq!(fit.to_string(), fit.equation());

        let props = fit.properties();
        assert_eq!(props.order, 2);
        assert_eq!(props.data_points, 4);
        assert_eq!(props.rank, 3);
        assert!(!props.singular);
    }

    #[test]
    fn test_properties_serialize() {
        let rows = samples![(0, 0), (1, 1), (2, 2)];
        let props = fitter().fit(&rows, 1).unwrap().properties();
        let json = serde_json::to_string(&props).unwrap();
        let back: FitProperties<f64> = serde_json::from_str(&json).unwrap();

        // JSON floats may lose the last bit
        assert_eq!(props.order, back.order);
        assert_eq!(props.data_points, back.data_points);
        assert_eq!(props.rank, back.rank);
        assert_eq!(props.singular, back.singular);
        assert_all_close!(props.coefficients, back.coefficients, tol = 1e-12);
        assert_close!(props.mse, back.mse, tol = 1e-12);
        assert_close!(props.r_squared, back.r_squared, tol = 1e-12);
    }

    #[test]
    fn test_options_deserialize() {
        let options: FitOptions = serde_json::from_str(r#"{ "max_order": 10 }"#).unwrap();
        assert_eq!(options, FitOptions::default().with_max_order(10));

        let options: FitOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, FitOptions::default());

        assert!(serde_json::from_str::<FitOptions>(r#"{ "degree": 3 }"#).is_err());
    }

    #[test]
    fn test_fitter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PolynomialFitter>();
        assert_send_sync::<FitResult>();
    }
}
