//! Single-variable expression engine
//!
//! Normalizes human-friendly expression text (`x^2 + 3x`, `2sin(pi x)`,
//! `sqrt(x)`), parses it into an expression tree, and evaluates that tree for a
//! given value of `x`.
//!
//! ```rust
//! use expr_math::Expression;
//!
//! # fn main() -> Result<(), expr_math::ExprError> {
//! let expr = Expression::parse("x^2 + 3x")?;
//! assert_eq!(expr.eval(2.0), 10.0);
//! assert_eq!(expr.canonical().to_string(), "x^2+3*x");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod expr;
pub mod normalize;
mod parser;
pub mod token;

pub use error::ExprError;
pub use expr::{BinaryOp, Expr, UnaryOp};
pub use normalize::{normalize, CanonicalExpression};
pub use token::{Constant, Function, Token, TokenKind};

/// Evaluate a canonical expression at `x`.
///
/// Compiles on every call; use [`Expression`] to evaluate the same expression
/// repeatedly.
pub fn evaluate(canonical: &CanonicalExpression, x: f64) -> Result<f64, ExprError> {
    Ok(canonical.compile()?.eval(x))
}

/// A normalized and compiled expression, ready to be evaluated many times.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    canonical: CanonicalExpression,
    tree: Expr,
}

impl Expression {
    /// Normalize and compile raw expression text
    pub fn parse(raw: &str) -> Result<Self, ExprError> {
        let canonical = normalize(raw);
        let tree = canonical.compile()?;
        Ok(Self { canonical, tree })
    }

    pub fn canonical(&self) -> &CanonicalExpression {
        &self.canonical
    }

    pub fn tree(&self) -> &Expr {
        &self.tree
    }

    /// Evaluate with the variable bound to `x`
    pub fn eval(&self, x: f64) -> f64 {
        self.tree.eval(x)
    }
}

impl std::str::FromStr for Expression {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expression::parse(s)
    }
}
