//! Expression tree and its interpreter

use crate::token::Function;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => lhs / rhs,
            BinaryOp::Pow => lhs.powf(rhs),
        }
    }
}

/// A parsed single-variable expression.
///
/// Named constants are folded into [`Expr::Number`] leaves at parse time. The
/// variable is a leaf of its own, bound only when the tree is evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable,
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        function: Function,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Evaluate the tree with the variable bound to `x`.
    ///
    /// Arithmetic follows IEEE-754: `1/0` is `inf`, `log(-1)` is `NaN`, and both
    /// propagate through the rest of the expression.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Expr::Number(value) => *value,
            Expr::Variable => x,
            Expr::Unary {
                op: UnaryOp::Neg,
                operand,
            } => -operand.eval(x),
            Expr::Binary { op, lhs, rhs } => op.apply(lhs.eval(x), rhs.eval(x)),
            Expr::Call { function, args } => match args.as_slice() {
                [a] => function.apply(&[a.eval(x)]),
                [a, b] => function.apply(&[a.eval(x), b.eval(x)]),
                _ => {
                    let values: Vec<f64> = args.iter().map(|arg| arg.eval(x)).collect();
                    function.apply(&values)
                }
            },
        }
    }

    /// True if the value of the tree depends on the variable
    pub fn depends_on_variable(&self) -> bool {
        match self {
            Expr::Number(_) => false,
            Expr::Variable => true,
            Expr::Unary { operand, .. } => operand.depends_on_variable(),
            Expr::Binary { lhs, rhs, .. } => lhs.depends_on_variable() || rhs.depends_on_variable(),
            Expr::Call { args, .. } => args.iter().any(Expr::depends_on_variable),
        }
    }
}
