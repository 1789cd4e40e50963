//! Definite integral calculator
//!
//! Approximates `∫ f(x) dx` over a finite interval for a user-typed expression,
//! using the composite trapezoid or Simpson 1/3 rule.
//!
//! ```rust
//! use integrator::calculate;
//!
//! # fn main() -> Result<(), integrator::CalculationError> {
//! let value = calculate("x^2", "0", "2", "10", "simpson")?;
//! assert!((value - 8.0 / 3.0).abs() < 1e-6);
//! # Ok(())
//! # }
//! ```

pub mod calculator;
pub mod config;
pub mod error;
pub mod quadrature;
pub mod validation;

pub use calculator::{
    calculate, integrate_with, CalculationReport, Calculator, DEFAULT_EXPRESSION, EXAMPLE_FUNCTIONS,
};
pub use config::{ConfigError, IntegratorConfig};
pub use error::CalculationError;
pub use quadrature::{Integrand, Quadrature, QuadratureError, QuadratureMethod};
pub use validation::{validate, IntegrationRequest};
