//! Quadrature rules over an evenly spaced grid
//!
//! Both rules sample the integrand at `n + 1` points of the interval, where `n`
//! is the effective segment count, and abort on the first sample that fails.

pub mod simpson;
pub mod trapezoid;

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use expr_math::{ExprError, Expression};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use simpson::simpson;
pub use trapezoid::trapezoid;

/// Errors that can occur while running a quadrature rule
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadratureError {
    #[error("At least one segment is required")]
    NoSegments,

    #[error("Bounds must be finite and ascending, got [{lower}, {upper}]")]
    InvalidInterval { lower: f64, upper: f64 },

    #[error("Integrand failed at x = {x}: {source}")]
    Integrand {
        x: f64,
        #[source]
        source: ExprError,
    },
}

/// Something that can be sampled at a point of the integration interval.
pub trait Integrand {
    fn sample(&self, x: f64) -> Result<f64, ExprError>;
}

impl Integrand for Expression {
    fn sample(&self, x: f64) -> Result<f64, ExprError> {
        Ok(self.eval(x))
    }
}

impl<F> Integrand for F
where
    F: Fn(f64) -> Result<f64, ExprError>,
{
    fn sample(&self, x: f64) -> Result<f64, ExprError> {
        self(x)
    }
}

/// Outcome of one quadrature run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrature {
    /// Approximate value of the integral
    pub value: f64,
    /// Segment count the rule actually used
    pub segments: usize,
    /// Number of integrand samples taken
    pub evaluations: usize,
}

/// Available quadrature rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum QuadratureMethod {
    /// Composite trapezoid rule, O(h²)
    Trapezoid,
    /// Composite Simpson 1/3 rule, O(h⁴); odd segment counts are bumped to even
    #[value(alias = "simpson13")]
    Simpson,
}

impl QuadratureMethod {
    pub const ALL: [QuadratureMethod; 2] = [QuadratureMethod::Trapezoid, QuadratureMethod::Simpson];

    /// Human readable name
    pub fn name(self) -> &'static str {
        match self {
            QuadratureMethod::Trapezoid => "Trapezoid",
            QuadratureMethod::Simpson => "Simpson 1/3",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            QuadratureMethod::Trapezoid => {
                "Approximates the area under the curve with trapezoids between neighbouring samples"
            }
            QuadratureMethod::Simpson => {
                "Fits a parabola through each pair of segments; more accurate for smooth functions"
            }
        }
    }

    /// Power of the step size `h` in the global truncation error
    pub fn error_order(self) -> u32 {
        match self {
            QuadratureMethod::Trapezoid => 2,
            QuadratureMethod::Simpson => 4,
        }
    }

    /// Run this rule on `integrand` over `[lower, upper]`
    pub fn integrate<I>(
        self,
        integrand: &I,
        lower: f64,
        upper: f64,
        segments: usize,
    ) -> Result<Quadrature, QuadratureError>
    where
        I: Integrand + ?Sized,
    {
        match self {
            QuadratureMethod::Trapezoid => trapezoid(integrand, lower, upper, segments),
            QuadratureMethod::Simpson => simpson(integrand, lower, upper, segments),
        }
    }
}

impl fmt::Display for QuadratureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuadratureMethod::Trapezoid => write!(f, "trapezoid"),
            QuadratureMethod::Simpson => write!(f, "simpson"),
        }
    }
}

/// Error returned when a method name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown integration method '{0}', expected 'trapezoid' or 'simpson'")]
pub struct ParseMethodError(pub String);

impl FromStr for QuadratureMethod {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trapezoid" => Ok(QuadratureMethod::Trapezoid),
            "simpson" | "simpson13" => Ok(QuadratureMethod::Simpson),
            _ => Err(ParseMethodError(s.to_string())),
        }
    }
}

/// Check the arguments shared by every rule
fn check_grid(lower: f64, upper: f64, segments: usize) -> Result<(), QuadratureError> {
    if segments == 0 {
        return Err(QuadratureError::NoSegments);
    }
    if !(lower.is_finite() && upper.is_finite() && lower < upper) {
        return Err(QuadratureError::InvalidInterval { lower, upper });
    }
    Ok(())
}

fn sample<I>(integrand: &I, x: f64) -> Result<f64, QuadratureError>
where
    I: Integrand + ?Sized,
{
    integrand
        .sample(x)
        .map_err(|source| QuadratureError::Integrand { x, source })
}
