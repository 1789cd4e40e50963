//! The caller-facing calculation entry point.
//!
//! A calculation is one synchronous, self-contained unit of work: validate the
//! text inputs, compile the expression once, run the chosen rule, and return
//! either a [`CalculationReport`] or a single [`CalculationError`]. Nothing is
//! shared between calls apart from the read-only configuration.

use std::fmt;

use crate::config::IntegratorConfig;
use crate::error::CalculationError;
use crate::quadrature::{Integrand, Quadrature, QuadratureError, QuadratureMethod};
use crate::validation::{validate, IntegrationRequest};

/// Expression the calculator starts with
pub const DEFAULT_EXPRESSION: &str = "x**2 + 3*x";

/// Ready-made integrands: (label, expression)
pub const EXAMPLE_FUNCTIONS: &[(&str, &str)] = &[
    ("Quadratic", "x^2 + 3x"),
    ("Sine", "sin(x)"),
    ("Exponential", "exp(x)"),
    ("Polynomial", "x^3 - 2x^2 + x - 1"),
];

/// Successful outcome of a calculation
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationReport {
    pub value: f64,
    pub method: QuadratureMethod,
    pub lower: f64,
    pub upper: f64,
    /// Segment count the caller asked for
    pub requested_segments: usize,
    /// Segment count the rule ran with
    pub segments: usize,
    pub evaluations: usize,
}

impl CalculationReport {
    /// True if the rule changed the requested segment count
    pub fn segments_adjusted(&self) -> bool {
        self.segments != self.requested_segments
    }
}

impl fmt::Display for CalculationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6} ({}, interval [{}, {}], {} segments",
            self.value,
            self.method.name(),
            self.lower,
            self.upper,
            self.segments
        )?;
        if self.segments_adjusted() {
            write!(f, ", {} requested", self.requested_segments)?;
        }
        write!(f, ")")
    }
}

/// Runs calculations under one configuration
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    config: IntegratorConfig,
}

impl Calculator {
    pub fn new(config: IntegratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IntegratorConfig {
        &self.config
    }

    /// Calculate from text inputs, with the method given by name
    /// (`"trapezoid"` or `"simpson"`).
    pub fn calculate(
        &self,
        expression: &str,
        lower: &str,
        upper: &str,
        segments: &str,
        method: &str,
    ) -> Result<CalculationReport, CalculationError> {
        let method: QuadratureMethod = method.parse()?;
        self.calculate_with(expression, lower, upper, segments, method)
    }

    /// Calculate from text inputs with an already chosen method
    pub fn calculate_with(
        &self,
        expression: &str,
        lower: &str,
        upper: &str,
        segments: &str,
        method: QuadratureMethod,
    ) -> Result<CalculationReport, CalculationError> {
        let request = validate(
            expression,
            lower,
            upper,
            segments,
            method,
            self.config.max_segments,
        )?;
        self.run(&request)
    }

    /// Run a validated request
    pub fn run(&self, request: &IntegrationRequest) -> Result<CalculationReport, CalculationError> {
        log::debug!(
            "Integrating '{}' over [{}, {}] with {} segments ({})",
            request.expression.canonical(),
            request.lower,
            request.upper,
            request.segments,
            request.method
        );

        let quadrature = integrate_with(
            &request.expression,
            request.lower,
            request.upper,
            request.segments,
            request.method,
        )?;

        if !quadrature.value.is_finite() {
            log::warn!(
                "Integral of '{}' is not finite: {}",
                request.expression.canonical(),
                quadrature.value
            );
        }

        Ok(CalculationReport {
            value: quadrature.value,
            method: request.method,
            lower: request.lower,
            upper: request.upper,
            requested_segments: request.segments,
            segments: quadrature.segments,
            evaluations: quadrature.evaluations,
        })
    }
}

/// Run `method` on any integrand, mapping rule failures onto [`CalculationError`].
pub fn integrate_with<I>(
    integrand: &I,
    lower: f64,
    upper: f64,
    segments: usize,
    method: QuadratureMethod,
) -> Result<Quadrature, CalculationError>
where
    I: Integrand + ?Sized,
{
    method
        .integrate(integrand, lower, upper, segments)
        .map_err(|error| match error {
            QuadratureError::NoSegments => CalculationError::NonPositiveSegments(0),
            QuadratureError::InvalidInterval { lower, upper } => {
                CalculationError::InvertedBounds { lower, upper }
            }
            QuadratureError::Integrand { x, source } => {
                CalculationError::EvaluationFailed { x, source }
            }
        })
}

/// Calculate with the default configuration and return just the value
pub fn calculate(
    expression: &str,
    lower: &str,
    upper: &str,
    segments: &str,
    method: &str,
) -> Result<f64, CalculationError> {
    Calculator::default()
        .calculate(expression, lower, upper, segments, method)
        .map(|report| report.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use expr_math::{ExprError, Expression};

    #[test]
    fn test_calculate_default_expression() {
        // ∫ x^2 + 3x from 0 to 2 = 8/3 + 6
        let value = calculate(DEFAULT_EXPRESSION, "0", "2", "1000", "trapezoid").unwrap();
        assert_relative_eq!(value, 28.0 / 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_report_records_segment_bump() {
        let report = Calculator::default()
            .calculate("x^2", "0", "2", "9", "simpson")
            .unwrap();

        assert_eq!(report.requested_segments, 9);
        assert_eq!(report.segments, 10);
        assert_eq!(report.evaluations, 11);
        assert!(report.segments_adjusted());
    }

    #[test]
    fn test_report_display() {
        let report = CalculationReport {
            value: 2.0 / 3.0,
            method: QuadratureMethod::Simpson,
            lower: 0.0,
            upper: 1.0,
            requested_segments: 3,
            segments: 4,
            evaluations: 5,
        };
        assert_eq!(
            report.to_string(),
            "0.666667 (Simpson 1/3, interval [0, 1], 4 segments, 3 requested)"
        );
    }

    #[test]
    fn test_unknown_method() {
        let result = calculate("x", "0", "1", "10", "romberg");
        assert!(matches!(result, Err(CalculationError::UnknownMethod(_))));
    }

    #[test]
    fn test_configured_segment_cap() {
        let calculator = Calculator::new(IntegratorConfig {
            max_segments: 100,
            default_segments: 10,
            ..Default::default()
        });
        let result = calculator.calculate("x", "0", "1", "101", "trapezoid");
        assert!(matches!(
            result,
            Err(CalculationError::SegmentLimitExceeded { requested: 101, max: 100 })
        ));
    }

    #[test]
    fn test_in_loop_failure_aborts_calculation() {
        let flaky = |x: f64| -> Result<f64, ExprError> {
            if x > 0.75 {
                Err(ExprError::UnexpectedEnd)
            } else {
                Ok(1.0)
            }
        };
        let result = integrate_with(&flaky, 0.0, 0.5, 4, QuadratureMethod::Trapezoid);
        assert!(result.is_ok());

        let result = integrate_with(&flaky, 0.0, 1.0, 4, QuadratureMethod::Simpson);
        assert!(matches!(
            result,
            Err(CalculationError::EvaluationFailed { x, .. }) if x == 1.0
        ));
    }

    #[test]
    fn test_non_finite_result_is_returned() {
        let value = calculate("1/x", "0", "1", "10", "trapezoid").unwrap();
        assert_eq!(value, f64::INFINITY);
    }

    #[test]
    fn test_example_functions_compile() {
        for (label, raw) in EXAMPLE_FUNCTIONS {
            assert!(Expression::parse(raw).is_ok(), "{label} example does not compile");
        }
        assert!(Expression::parse(DEFAULT_EXPRESSION).is_ok());
    }
}
