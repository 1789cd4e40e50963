//! Token vocabulary shared by the normalizer and the parser

use std::fmt;

/// Named functions recognized in expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Sec,
    Csc,
    Cot,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    /// Natural logarithm
    Ln,
    /// Base-10 logarithm
    Log,
    Exp,
    Sqrt,
    Cbrt,
    Abs,
    Floor,
    Ceil,
    /// Two-argument power, `pow(base, exponent)`
    Pow,
}

impl Function {
    pub const ALL: [Function; 21] = [
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Sec,
        Function::Csc,
        Function::Cot,
        Function::Asin,
        Function::Acos,
        Function::Atan,
        Function::Sinh,
        Function::Cosh,
        Function::Tanh,
        Function::Ln,
        Function::Log,
        Function::Exp,
        Function::Sqrt,
        Function::Cbrt,
        Function::Abs,
        Function::Floor,
        Function::Ceil,
        Function::Pow,
    ];

    /// Lowercase keyword used in expressions
    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Sec => "sec",
            Function::Csc => "csc",
            Function::Cot => "cot",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
            Function::Ln => "ln",
            Function::Log => "log",
            Function::Exp => "exp",
            Function::Sqrt => "sqrt",
            Function::Cbrt => "cbrt",
            Function::Abs => "abs",
            Function::Floor => "floor",
            Function::Ceil => "ceil",
            Function::Pow => "pow",
        }
    }

    /// Number of arguments the function takes
    pub fn arity(self) -> usize {
        match self {
            Function::Pow => 2,
            _ => 1,
        }
    }

    /// Apply the function to already evaluated arguments.
    ///
    /// Returns NaN unless `args` holds exactly [`Function::arity`] values.
    pub fn apply(self, args: &[f64]) -> f64 {
        let (a, b) = match args {
            [a] if self.arity() == 1 => (*a, f64::NAN),
            [a, b] if self.arity() == 2 => (*a, *b),
            _ => return f64::NAN,
        };
        match self {
            Function::Sin => a.sin(),
            Function::Cos => a.cos(),
            Function::Tan => a.tan(),
            Function::Sec => 1.0 / a.cos(),
            Function::Csc => 1.0 / a.sin(),
            Function::Cot => 1.0 / a.tan(),
            Function::Asin => a.asin(),
            Function::Acos => a.acos(),
            Function::Atan => a.atan(),
            Function::Sinh => a.sinh(),
            Function::Cosh => a.cosh(),
            Function::Tanh => a.tanh(),
            Function::Ln => a.ln(),
            Function::Log => a.log10(),
            Function::Exp => a.exp(),
            Function::Sqrt => a.sqrt(),
            Function::Cbrt => a.cbrt(),
            Function::Abs => a.abs(),
            Function::Floor => a.floor(),
            Function::Ceil => a.ceil(),
            Function::Pow => a.powf(b),
        }
    }
}

/// Named constants recognized in expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
    E,
    Infinity,
}

impl Constant {
    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
            Constant::Infinity => f64::INFINITY,
        }
    }

    /// Spelling used when rendering a canonical expression
    pub fn canonical_name(self) -> &'static str {
        match self {
            Constant::Pi => "PI",
            Constant::E => "E",
            Constant::Infinity => "Infinity",
        }
    }
}

/// The kinds of token a canonical expression is made of.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    /// The integration variable `x`
    Variable,
    Constant(Constant),
    Function(Function),
    /// Alphabetic run that is not in the vocabulary
    Unknown(String),
    /// Digit/dot run that does not parse as a number, e.g. `1.2.3`
    Malformed(String),
    /// Character outside the expression alphabet
    Stray(char),
    Plus,
    Minus,
    Star,
    Slash,
    /// Exponentiation, written `^` or `**`
    Caret,
    LParen,
    RParen,
    Comma,
}

impl TokenKind {
    /// True if the token can end an operand, so that a following operand implies `*`
    pub(crate) fn ends_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Number(_)
                | TokenKind::Variable
                | TokenKind::Constant(_)
                | TokenKind::Unknown(_)
                | TokenKind::RParen
        )
    }

    /// True for operands that print without a leading delimiter
    pub(crate) fn starts_bare_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Number(_)
                | TokenKind::Variable
                | TokenKind::Constant(_)
                | TokenKind::Unknown(_)
                | TokenKind::Malformed(_)
        )
    }

    /// True if the token can start an operand that is glued to a preceding one
    pub(crate) fn starts_implicit_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Variable
                | TokenKind::Constant(_)
                | TokenKind::Function(_)
                | TokenKind::Unknown(_)
                | TokenKind::LParen
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(value) => write!(f, "{value}"),
            TokenKind::Variable => write!(f, "x"),
            TokenKind::Constant(constant) => write!(f, "{}", constant.canonical_name()),
            TokenKind::Function(function) => write!(f, "{}", function.name()),
            TokenKind::Unknown(text) | TokenKind::Malformed(text) => write!(f, "{text}"),
            TokenKind::Stray(ch) => write!(f, "{ch}"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Caret => write!(f, "^"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Comma => write!(f, ","),
        }
    }
}

/// A token together with the byte offset where it starts in the raw input.
///
/// Multiplication tokens inserted for implicit products carry the position of the
/// operand that follows them.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

/// Vocabulary entries a keyword can resolve to
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Keyword {
    Variable,
    Constant(Constant),
    Function(Function),
}

impl Keyword {
    pub(crate) fn token_kind(self) -> TokenKind {
        match self {
            Keyword::Variable => TokenKind::Variable,
            Keyword::Constant(constant) => TokenKind::Constant(constant),
            Keyword::Function(function) => TokenKind::Function(function),
        }
    }
}

/// Keywords matched by the normalizer, lowercase.
pub(crate) const KEYWORDS: &[(&str, Keyword)] = &[
    ("x", Keyword::Variable),
    ("pi", Keyword::Constant(Constant::Pi)),
    ("e", Keyword::Constant(Constant::E)),
    ("infinity", Keyword::Constant(Constant::Infinity)),
    ("sin", Keyword::Function(Function::Sin)),
    ("cos", Keyword::Function(Function::Cos)),
    ("tan", Keyword::Function(Function::Tan)),
    ("sec", Keyword::Function(Function::Sec)),
    ("csc", Keyword::Function(Function::Csc)),
    ("cot", Keyword::Function(Function::Cot)),
    ("asin", Keyword::Function(Function::Asin)),
    ("acos", Keyword::Function(Function::Acos)),
    ("atan", Keyword::Function(Function::Atan)),
    ("sinh", Keyword::Function(Function::Sinh)),
    ("cosh", Keyword::Function(Function::Cosh)),
    ("tanh", Keyword::Function(Function::Tanh)),
    ("ln", Keyword::Function(Function::Ln)),
    ("log", Keyword::Function(Function::Log)),
    ("exp", Keyword::Function(Function::Exp)),
    ("sqrt", Keyword::Function(Function::Sqrt)),
    ("cbrt", Keyword::Function(Function::Cbrt)),
    ("abs", Keyword::Function(Function::Abs)),
    ("floor", Keyword::Function(Function::Floor)),
    ("ceil", Keyword::Function(Function::Ceil)),
    ("pow", Keyword::Function(Function::Pow)),
];
