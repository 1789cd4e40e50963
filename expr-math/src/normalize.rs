//! Expression normalization.
//!
//! Turns the text a user typed into a [`CanonicalExpression`]: a token stream in
//! which every recognized constant and function name is resolved, `^` and `**`
//! are the single exponentiation token, and implicit products such as `2x`,
//! `(x+1)(x-1)` or `x(x+1)` carry an explicit `*`.
//!
//! Identifiers are split with maximal munch over a fixed keyword table: at each
//! position inside an alphabetic run the longest matching keyword wins, so `asin`
//! is never read as `a` + `sin`, `exp` never as `e` + `xp`, and `sinh` never as
//! `sin` + `h`. Whatever does not match is kept as an unresolved token and left
//! for the parser to reject, which makes normalization total.

use std::fmt;

use crate::error::ExprError;
use crate::expr::Expr;
use crate::parser;
use crate::token::{Constant, Keyword, Token, TokenKind, KEYWORDS};

/// The normalized form of a user expression.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalExpression {
    source: String,
    tokens: Vec<Token>,
}

impl CanonicalExpression {
    /// Text the expression was normalized from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// True if the input contained nothing but whitespace
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True if every token belongs to the expression vocabulary.
    ///
    /// A fully resolved expression can still be malformed, e.g. `x+`.
    pub fn is_fully_resolved(&self) -> bool {
        !self.tokens.iter().any(|token| {
            matches!(
                token.kind,
                TokenKind::Unknown(_) | TokenKind::Malformed(_) | TokenKind::Stray(_)
            )
        })
    }

    /// Parse the token stream into an evaluable expression tree
    pub fn compile(&self) -> Result<Expr, ExprError> {
        parser::parse(&self.tokens)
    }
}

impl fmt::Display for CanonicalExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut previous: Option<&TokenKind> = None;
        for token in &self.tokens {
            // Two operands with nothing in between, e.g. `2 3`, stay visibly apart
            if previous.is_some_and(|kind| kind.ends_operand() && token.kind.starts_bare_operand()) {
                write!(f, " ")?;
            }
            write!(f, "{}", token.kind)?;
            previous = Some(&token.kind);
        }
        Ok(())
    }
}

/// Normalize raw expression text. Never fails; unrecognized input survives as
/// unresolved tokens.
pub fn normalize(raw: &str) -> CanonicalExpression {
    let tokens = insert_implicit_products(tokenize(raw));
    let canonical = CanonicalExpression {
        source: raw.to_string(),
        tokens,
    };
    log::debug!("Normalized '{}' to '{}'", raw, canonical);
    canonical
}

fn tokenize(raw: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(ch) = raw[pos..].chars().next() {
        let rest = &raw[pos..];

        if ch.is_whitespace() {
            pos += ch.len_utf8();
            continue;
        }

        if ch.is_ascii_digit() || ch == '.' {
            let len = run_length(rest, |c| c.is_ascii_digit() || c == '.');
            let literal = &rest[..len];
            let kind = match literal.parse::<f64>() {
                Ok(value) => TokenKind::Number(value),
                Err(_) => TokenKind::Malformed(literal.to_string()),
            };
            tokens.push(Token {
                kind,
                position: pos,
            });
            pos += len;
            continue;
        }

        if ch.is_ascii_alphabetic() {
            let len = run_length(rest, |c| c.is_ascii_alphabetic());
            split_word(&rest[..len], pos, &mut tokens);
            pos += len;
            continue;
        }

        let (kind, len) = match ch {
            '*' if rest[1..].starts_with('*') => (TokenKind::Caret, 2),
            '+' => (TokenKind::Plus, 1),
            '-' => (TokenKind::Minus, 1),
            '*' => (TokenKind::Star, 1),
            '/' => (TokenKind::Slash, 1),
            '^' => (TokenKind::Caret, 1),
            '(' => (TokenKind::LParen, 1),
            ')' => (TokenKind::RParen, 1),
            ',' => (TokenKind::Comma, 1),
            'π' => (TokenKind::Constant(Constant::Pi), ch.len_utf8()),
            other => (TokenKind::Stray(other), other.len_utf8()),
        };
        tokens.push(Token {
            kind,
            position: pos,
        });
        pos += len;
    }

    tokens
}

fn run_length(text: &str, accept: impl Fn(char) -> bool) -> usize {
    text.find(|c: char| !accept(c)).unwrap_or(text.len())
}

/// Split an alphabetic run into keywords, longest match first.
fn split_word(word: &str, offset: usize, tokens: &mut Vec<Token>) {
    let lower = word.to_ascii_lowercase();
    let mut i = 0;

    while i < lower.len() {
        match longest_keyword(&lower[i..]) {
            Some((len, keyword)) => {
                tokens.push(Token {
                    kind: keyword.token_kind(),
                    position: offset + i,
                });
                i += len;
            }
            None => {
                tokens.push(Token {
                    kind: TokenKind::Unknown(word[i..].to_string()),
                    position: offset + i,
                });
                break;
            }
        }
    }
}

fn longest_keyword(text: &str) -> Option<(usize, Keyword)> {
    KEYWORDS
        .iter()
        .filter(|(word, _)| text.starts_with(word))
        .max_by_key(|(word, _)| word.len())
        .map(|(word, keyword)| (word.len(), *keyword))
}

fn insert_implicit_products(tokens: Vec<Token>) -> Vec<Token> {
    let mut explicit: Vec<Token> = Vec::with_capacity(tokens.len());

    for token in tokens {
        let glued = explicit
            .last()
            .is_some_and(|prev| prev.kind.ends_operand() && token.kind.starts_implicit_operand());
        if glued {
            explicit.push(Token {
                kind: TokenKind::Star,
                position: token.position,
            });
        }
        explicit.push(token);
    }

    explicit
}
