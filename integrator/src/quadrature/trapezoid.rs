//! Composite trapezoidal rule

use super::{check_grid, sample, Integrand, Quadrature, QuadratureError};

/// Integrates over `[lower, upper]` with the composite trapezoidal rule.
///
/// The interval is split into `segments` equal steps of width `h`, and
/// ```text
/// ∫ f dx ≈ h × [f(a)/2 + f(a+h) + ... + f(a+(n-1)h) + f(b)/2]
/// ```
///
/// # Arguments
///
/// * `to_integrate` - The integrand
/// * `lower` - Lower bound, must be finite and below `upper`
/// * `upper` - Upper bound, must be finite
/// * `segments` - Number of steps, at least 1
///
/// # Returns
///
/// The approximate integral together with the `segments + 1` sample count,
/// or an error if the grid is invalid or a sample fails.
pub fn trapezoid<I>(
    to_integrate: &I,
    lower: f64,
    upper: f64,
    segments: usize,
) -> Result<Quadrature, QuadratureError>
where
    I: Integrand + ?Sized,
{
    check_grid(lower, upper, segments)?;

    let h = (upper - lower) / segments as f64;
    let mut total = 0.5 * (sample(to_integrate, lower)? + sample(to_integrate, upper)?);

    for i in 1..segments {
        total += sample(to_integrate, lower + i as f64 * h)?;
    }

    Ok(Quadrature {
        value: total * h,
        segments,
        evaluations: segments + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use expr_math::ExprError;

    fn square(x: f64) -> Result<f64, ExprError> {
        Ok(x * x)
    }

    #[test]
    fn test_trapezoid() {
        // Integrate f(x) = x^2 from 0 to 3 with 3 segments
        // (1-0)(0^2+1^2)/2 + (2-1)(1^2+2^2)/2 + (3-2)(2^2+3^2)/2
        // = 0.5 + 2.5 + 6.5 = 9.5
        let result = trapezoid(&square, 0.0, 3.0, 3).unwrap();

        assert_relative_eq!(result.value, 9.5, epsilon = 1e-12);
        assert_eq!(result.segments, 3);
        assert_eq!(result.evaluations, 4);
    }

    #[test]
    fn test_single_segment() {
        let result = trapezoid(&square, 0.0, 2.0, 1).unwrap();
        // 2 * (0 + 4) / 2
        assert_relative_eq!(result.value, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_exact_for_linear() {
        let line = |x: f64| -> Result<f64, ExprError> { Ok(3.0 * x - 1.0) };
        let result = trapezoid(&line, -1.0, 2.0, 7).unwrap();
        // [1.5x^2 - x] from -1 to 2 = (6 - 2) - (1.5 + 1) = 1.5
        assert_relative_eq!(result.value, 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_no_segments() {
        let result = trapezoid(&square, 0.0, 1.0, 0);

        assert!(matches!(result, Err(QuadratureError::NoSegments)));
    }

    #[test]
    fn test_not_ascending() {
        let result = trapezoid(&square, 2.0, 1.0, 4);

        assert!(matches!(result, Err(QuadratureError::InvalidInterval { .. })));
    }

    #[test]
    fn test_failing_sample_aborts() {
        let failing = |x: f64| -> Result<f64, ExprError> {
            if x > 0.5 {
                Err(ExprError::UnexpectedEnd)
            } else {
                Ok(x)
            }
        };
        let result = trapezoid(&failing, 0.0, 1.0, 4);

        // The upper bound is sampled right after the lower one
        assert!(matches!(
            result,
            Err(QuadratureError::Integrand { x, .. }) if x == 1.0
        ));
    }
}
