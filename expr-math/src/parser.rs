//! Recursive descent parser from canonical tokens to an [`Expr`] tree
//!
//! Precedence, lowest to highest:
//! 1. `+`, `-` (left-associative)
//! 2. `*`, `/` (left-associative)
//! 3. unary `-`, `+`
//! 4. `^` (right-associative, binds tighter than unary minus: `-x^2 = -(x^2)`)
//! 5. numbers, `x`, constants, calls, parenthesized expressions

use crate::error::ExprError;
use crate::expr::{BinaryOp, Expr, UnaryOp};
use crate::token::{Token, TokenKind};

/// Deepest nesting of parentheses, calls, signs and exponents accepted
pub(crate) const MAX_NESTING: usize = 128;

pub(crate) fn parse(tokens: &[Token]) -> Result<Expr, ExprError> {
    if tokens.is_empty() {
        return Err(ExprError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.parse_additive()?;

    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(unexpected(token)),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().is_some_and(|token| token.kind == *kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ExprError> {
        match self.next() {
            Some(token) if token.kind == *kind => Ok(()),
            Some(token) => Err(unexpected(token)),
            None => Err(ExprError::UnexpectedEnd),
        }
    }

    fn parse_additive(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.parse_multiplicative()?;

        loop {
            let op = match self.peek().map(|token| &token.kind) {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.parse_multiplicative()?;
            lhs = Expr::binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.parse_unary()?;

        loop {
            let op = match self.peek().map(|token| &token.kind) {
                Some(TokenKind::Star) => BinaryOp::Mul,
                Some(TokenKind::Slash) => BinaryOp::Div,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.parse_unary()?;
            lhs = Expr::binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    // Every nested operand passes through here, so the depth check bounds the recursion
    fn parse_unary(&mut self) -> Result<Expr, ExprError> {
        if self.depth >= MAX_NESTING {
            let position = self
                .peek()
                .or(self.tokens.last())
                .map_or(0, |token| token.position);
            return Err(ExprError::TooDeep { position });
        }

        self.depth += 1;
        let operand = self.parse_signed();
        self.depth -= 1;
        operand
    }

    fn parse_signed(&mut self) -> Result<Expr, ExprError> {
        if self.eat(&TokenKind::Minus) {
            let operand = self.parse_unary()?;
            Ok(Expr::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(operand),
            })
        } else if self.eat(&TokenKind::Plus) {
            self.parse_unary()
        } else {
            self.parse_power()
        }
    }

    fn parse_power(&mut self) -> Result<Expr, ExprError> {
        let base = self.parse_primary()?;

        if self.eat(&TokenKind::Caret) {
            // Exponent may itself be signed: x^-2
            let exponent = self.parse_unary()?;
            Ok(Expr::binary(BinaryOp::Pow, base, exponent))
        } else {
            Ok(base)
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ExprError> {
        let token = self.next().ok_or(ExprError::UnexpectedEnd)?;

        match &token.kind {
            TokenKind::Number(value) => Ok(Expr::Number(*value)),
            TokenKind::Variable => Ok(Expr::Variable),
            TokenKind::Constant(constant) => Ok(Expr::Number(constant.value())),
            TokenKind::Function(function) => {
                let function = *function;
                if !self.eat(&TokenKind::LParen) {
                    return Err(ExprError::MissingArguments {
                        function: function.name(),
                        position: token.position,
                    });
                }

                let mut args = vec![self.parse_additive()?];
                while self.eat(&TokenKind::Comma) {
                    args.push(self.parse_additive()?);
                }
                self.expect(&TokenKind::RParen)?;

                if args.len() != function.arity() {
                    return Err(ExprError::WrongArity {
                        function: function.name(),
                        expected: function.arity(),
                        found: args.len(),
                    });
                }
                Ok(Expr::Call { function, args })
            }
            TokenKind::LParen => {
                let inner = self.parse_additive()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            _ => Err(unexpected(token)),
        }
    }
}

fn unexpected(token: &Token) -> ExprError {
    let position = token.position;
    match &token.kind {
        TokenKind::Unknown(name) => ExprError::UnknownIdentifier {
            name: name.clone(),
            position,
        },
        TokenKind::Malformed(literal) => ExprError::MalformedNumber {
            literal: literal.clone(),
            position,
        },
        TokenKind::Stray(ch) => ExprError::UnexpectedCharacter { ch: *ch, position },
        other => ExprError::UnexpectedToken {
            found: other.to_string(),
            position,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::token::Function;

    fn compile(raw: &str) -> Result<Expr, ExprError> {
        normalize(raw).compile()
    }

    #[test]
    fn test_precedence() {
        let expr = compile("1 + 2*x").unwrap();
        assert_eq!(
            expr,
            Expr::binary(
                BinaryOp::Add,
                Expr::Number(1.0),
                Expr::binary(BinaryOp::Mul, Expr::Number(2.0), Expr::Variable),
            )
        );
    }

    #[test]
    fn test_power_is_right_associative() {
        let expr = compile("2^3^2").unwrap();
        assert_eq!(
            expr,
            Expr::binary(
                BinaryOp::Pow,
                Expr::Number(2.0),
                Expr::binary(BinaryOp::Pow, Expr::Number(3.0), Expr::Number(2.0)),
            )
        );
    }

    #[test]
    fn test_unary_minus_binds_looser_than_power() {
        let expr = compile("-x^2").unwrap();
        assert_eq!(
            expr,
            Expr::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(Expr::binary(BinaryOp::Pow, Expr::Variable, Expr::Number(2.0))),
            }
        );
    }

    #[test]
    fn test_two_argument_call() {
        let expr = compile("pow(x, 3)").unwrap();
        assert_eq!(
            expr,
            Expr::Call {
                function: Function::Pow,
                args: vec![Expr::Variable, Expr::Number(3.0)],
            }
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(compile(""), Err(ExprError::Empty));
        assert_eq!(compile("x +"), Err(ExprError::UnexpectedEnd));
        assert_eq!(compile("(x + 1"), Err(ExprError::UnexpectedEnd));
        assert!(matches!(
            compile("foo(x)"),
            Err(ExprError::UnknownIdentifier { ref name, position: 0 }) if name == "foo"
        ));
        assert!(matches!(
            compile("sqrt x"),
            Err(ExprError::MissingArguments { function: "sqrt", position: 0 })
        ));
        assert!(matches!(
            compile("pow(x)"),
            Err(ExprError::WrongArity { function: "pow", expected: 2, found: 1 })
        ));
        assert!(matches!(
            compile("sin(x, 2)"),
            Err(ExprError::WrongArity { function: "sin", expected: 1, found: 2 })
        ));
        assert!(matches!(
            compile("x)"),
            Err(ExprError::UnexpectedToken { position: 1, .. })
        ));
        assert!(matches!(
            compile("2 3"),
            Err(ExprError::UnexpectedToken { position: 2, .. })
        ));
        assert!(matches!(
            compile("x $ 2"),
            Err(ExprError::UnexpectedCharacter { ch: '$', position: 2 })
        ));
        assert!(matches!(
            compile("1..5x"),
            Err(ExprError::MalformedNumber { position: 0, .. })
        ));
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |depth: usize| format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
        assert!(compile(&nested(100)).is_ok());
        assert!(matches!(
            compile(&nested(500)),
            Err(ExprError::TooDeep { position: 128 })
        ));

        let signs = format!("{}x", "-".repeat(1000));
        assert!(matches!(compile(&signs), Err(ExprError::TooDeep { .. })));

        let tower = vec!["x"; 1000].join("^");
        assert!(matches!(compile(&tower), Err(ExprError::TooDeep { .. })));

        let calls = format!("{}x{}", "sin(".repeat(500), ")".repeat(500));
        assert!(matches!(compile(&calls), Err(ExprError::TooDeep { .. })));
    }

    #[test]
    fn test_long_flat_sum_is_not_nested() {
        let sum = vec!["x"; 1000].join("+");
        let expr = compile(&sum).unwrap();
        assert_eq!(expr.eval(1.0), 1000.0);
    }

    #[test]
    fn test_reciprocal_trig_needs_no_extra_parenthesis() {
        assert!(compile("sec(x) + csc(x) * cot(x)").is_ok());
    }
}
