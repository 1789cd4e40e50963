//! Terminal errors of a calculation

use expr_math::ExprError;
use thiserror::Error;

use crate::quadrature::ParseMethodError;

/// Everything that can stop a calculation from producing a number.
///
/// Variants are listed in the order the checks run; the first failing check is
/// the one reported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    #[error("Please enter a valid number for the {field} (got '{value}')")]
    NotANumber { field: &'static str, value: String },

    #[error("Lower bound ({lower}) must be less than upper bound ({upper})")]
    InvertedBounds { lower: f64, upper: f64 },

    #[error("Number of segments must be positive (got {0})")]
    NonPositiveSegments(i64),

    #[error("Number of segments ({requested}) exceeds the maximum of {max}")]
    SegmentLimitExceeded { requested: i64, max: usize },

    #[error("Invalid expression: {0}")]
    InvalidExpression(#[source] ExprError),

    #[error("Evaluation failed at x = {x}: {source}")]
    EvaluationFailed {
        x: f64,
        #[source]
        source: ExprError,
    },

    #[error(transparent)]
    UnknownMethod(#[from] ParseMethodError),
}
