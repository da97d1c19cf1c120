/// Asserts that two floating-point values are approximately equal.
///
/// # Parameters
/// - `$a`, `$b`: Values to compare.
/// - `tol = $tol`: *(optional)* Absolute tolerance. Defaults to a few ulps scaled by the larger magnitude.
/// - `$msg`: *(optional)* Custom failure message, with `format!` arguments.
///
/// # Panics
/// Panics if `|a - b|` exceeds the tolerance.
///
/// # Examples
/// ```
/// # use lsqpoly::assert_close;
/// assert_close!(0.1 + 0.2, 0.3);
/// assert_close!(1.0, 1.0 + 1e-10, tol = 1e-9, "Nearly equal");
/// ```
#[macro_export]
macro_rules! assert_close {
    ($a:expr, $b:expr, tol = $tol:expr $(, $msg:literal $(, $args:expr)*)?) => { #[allow(clippy::float_cmp)] {
        #[allow(unused_mut, unused_assignments)] let mut msg = "Values not close".to_string();
        $( msg = format!($msg $(, $args)*); )?

        let (a, b) = ($a, $b);
        let tol = $tol;
        let diff = $crate::value::Value::abs_sub(a, b);
        assert!(
            a == b || diff <= tol,
            "{msg}: {a} != {b} (|a - b| = {diff:e}, tol = {tol:e})"
        );
    }};

    ($a:expr, $b:expr $(, $msg:literal $(, $args:expr)*)?) => {{
        let (a, b) = ($a, $b);
        $crate::assert_close!(a, b, tol = $crate::test::default_tolerance(a, b) $(, $msg $(, $args)*)?);
    }};
}

/// Asserts that two slices of floating-point values are approximately equal element-wise.
///
/// # Parameters
/// - `$src`: Source values (implements `len()` and `iter()`).
/// - `$dst`: Expected values, same length as `$src`.
/// - `tol = $tol`: *(optional)* Absolute tolerance, forwarded to [`crate::assert_close!`].
///
/// # Panics
/// - If the lengths differ.
/// - If any pair of elements is not close.
///
/// # Examples
/// ```
/// # use lsqpoly::assert_all_close;
/// let a = vec![1.0, 2.0, 3.0];
/// assert_all_close!(a, [1.0, 2.0, 3.0 + 1e-12], tol = 1e-9);
/// ```
#[macro_export]
macro_rules! assert_all_close {
    ($src:expr, $dst:expr $(, tol = $tol:expr)? $(,)?) => {{
        let (src, dst) = (&$src, &$dst);
        assert_eq!(src.len(), dst.len(), "{} elements - length mismatch", src.len());

        for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
            $crate::assert_close!(*s, *d $(, tol = $tol)?, "src[{}]", i);
        }
    }};
}

#[cfg(test)]
mod tests {
    use crate::samples;

    #[test]
    fn test_assert_close_macro() {
        assert_close!(1.0, 1.0);
        assert_close!(0.1 + 0.2, 0.3);
        assert_close!(1e12 + 1e-4, 1e12);
        assert_close!(1.0f32, 1.0f32 + 1e-8);
        assert_close!(2.0, 2.05, tol = 0.1);
    }

    #[test]
    #[should_panic(expected = "custom 7")]
    fn test_assert_close_macro_fails() {
        assert_close!(1.0, 1.1, "custom {}", 7);
    }

    #[test]
    fn test_assert_all_close_macro() {
        let a = vec![1.0, 2.0, 3.0];
        let b = [1.0, 2.0, 3.0];
        assert_all_close!(a, b);
        assert_all_close!(a, &[1.01, 2.0, 2.99], tol = 0.02);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn test_assert_all_close_macro_length() {
        assert_all_close!(vec![1.0], [1.0, 2.0]);
    }

    #[test]
    fn test_samples_macro() {
        let rows = samples![(0, 1.5), ("x", "y", "bad row")];
        assert_eq!(rows[0].x, "0");
        assert_eq!(rows[0].y, "1.5");
        assert_eq!(rows[0].comment, "");
        assert_eq!(rows[1].comment, "bad row");
    }
}
