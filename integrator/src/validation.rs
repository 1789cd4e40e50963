//! Validation of the raw calculation inputs
//!
//! Checks run in a fixed order and the first failure is reported:
//! numeric fields parse, bounds ascend, segment count is positive and within
//! the configured cap, then the expression survives a smoke evaluation at the
//! lower bound before any quadrature work starts.

use expr_math::Expression;

use crate::error::CalculationError;
use crate::quadrature::QuadratureMethod;

/// A fully validated calculation, built fresh for every call
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationRequest {
    pub expression: Expression,
    pub lower: f64,
    pub upper: f64,
    /// Segment count as the caller asked for it
    pub segments: usize,
    pub method: QuadratureMethod,
}

/// Validate caller-supplied text fields into an [`IntegrationRequest`].
///
/// # Errors
///
/// * `CalculationError::NotANumber` - a bound is not a finite real or `segments` is not an integer
/// * `CalculationError::InvertedBounds` - `lower >= upper`
/// * `CalculationError::NonPositiveSegments` - `segments <= 0`
/// * `CalculationError::SegmentLimitExceeded` - `segments > max_segments`
/// * `CalculationError::InvalidExpression` - the expression cannot be evaluated at `lower`
pub fn validate(
    expression: &str,
    lower: &str,
    upper: &str,
    segments: &str,
    method: QuadratureMethod,
    max_segments: usize,
) -> Result<IntegrationRequest, CalculationError> {
    let lower_bound = parse_bound("lower bound", lower)?;
    let upper_bound = parse_bound("upper bound", upper)?;
    let requested = parse_segments(segments)?;

    if lower_bound >= upper_bound {
        return Err(CalculationError::InvertedBounds {
            lower: lower_bound,
            upper: upper_bound,
        });
    }

    if requested <= 0 {
        return Err(CalculationError::NonPositiveSegments(requested));
    }

    let segments = usize::try_from(requested)
        .ok()
        .filter(|&n| n <= max_segments)
        .ok_or(CalculationError::SegmentLimitExceeded {
            requested,
            max: max_segments,
        })?;

    let expression = smoke_test(expression, lower_bound)?;

    Ok(IntegrationRequest {
        expression,
        lower: lower_bound,
        upper: upper_bound,
        segments,
        method,
    })
}

fn parse_bound(field: &'static str, text: &str) -> Result<f64, CalculationError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CalculationError::NotANumber {
            field,
            value: text.to_string(),
        })
}

fn parse_segments(text: &str) -> Result<i64, CalculationError> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| CalculationError::NotANumber {
            field: "number of segments",
            value: text.to_string(),
        })
}

/// Compile the expression and evaluate it once at `x`
fn smoke_test(raw: &str, x: f64) -> Result<Expression, CalculationError> {
    let expression = Expression::parse(raw).map_err(CalculationError::InvalidExpression)?;
    let sample = expression.eval(x);
    log::debug!(
        "Smoke test: f({}) = {} for '{}'",
        x,
        sample,
        expression.canonical()
    );
    Ok(expression)
}
