//! Errors produced while compiling or evaluating an expression

use thiserror::Error;

/// Errors that can occur when turning a canonical expression into an evaluable tree.
///
/// Positions are byte offsets into the text the user typed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("Expression is empty")]
    Empty,

    #[error("Unknown identifier '{name}' at position {position}")]
    UnknownIdentifier { name: String, position: usize },

    #[error("Malformed number '{literal}' at position {position}")]
    MalformedNumber { literal: String, position: usize },

    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    #[error("Unexpected '{found}' at position {position}")]
    UnexpectedToken { found: String, position: usize },

    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    #[error("Function '{function}' must be followed by '(' at position {position}")]
    MissingArguments {
        function: &'static str,
        position: usize,
    },

    #[error("Function '{function}' takes {expected} argument(s), got {found}")]
    WrongArity {
        function: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Expression is nested too deeply at position {position}")]
    TooDeep { position: usize },
}
