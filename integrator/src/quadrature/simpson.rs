//! Composite Simpson 1/3 rule

use super::{check_grid, sample, Integrand, Quadrature, QuadratureError};

/// Segment count Simpson's rule runs with: odd counts are rounded up to even.
pub fn effective_segments(segments: usize) -> usize {
    if segments % 2 == 1 {
        segments + 1
    } else {
        segments
    }
}

/// Integrates over `[lower, upper]` with the composite Simpson 1/3 rule.
///
/// ```text
/// ∫ f dx ≈ h/3 × [f(a) + 4·Σ f(odd nodes) + 2·Σ f(interior even nodes) + f(b)]
/// ```
///
/// The rule needs an even number of segments. An odd `segments` is incremented
/// by one; [`Quadrature::segments`] reports the count actually used.
pub fn simpson<I>(
    to_integrate: &I,
    lower: f64,
    upper: f64,
    segments: usize,
) -> Result<Quadrature, QuadratureError>
where
    I: Integrand + ?Sized,
{
    check_grid(lower, upper, segments)?;

    let n = effective_segments(segments);
    if n != segments {
        log::info!(
            "Simpson's rule needs an even segment count, using {} instead of {}",
            n,
            segments
        );
    }

    let h = (upper - lower) / n as f64;
    let mut total = sample(to_integrate, lower)? + sample(to_integrate, upper)?;

    for i in 1..n {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        total += weight * sample(to_integrate, lower + i as f64 * h)?;
    }

    Ok(Quadrature {
        value: total * h / 3.0,
        segments: n,
        evaluations: n + 1,
    })
}
