//! Error types for expression evaluation.

use thiserror::Error;

/// Reasons an expression string could not be turned into a number.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A letter survived sanitizing; the expression is rejected outright.
    #[error("invalid character '{0}' in expression")]
    InvalidCharacter(char),

    /// The expression parsed but produced infinity or NaN (e.g. `1/0`).
    #[error("result is not a finite number")]
    Math,

    #[error("malformed expression: {0}")]
    Parse(#[from] ParseError),
}

/// Grammar violations found by the arithmetic parser.
///
/// Positions are byte offsets into the sanitized expression.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character '{ch}' at {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("unexpected token at {pos}")]
    UnexpectedToken { pos: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("parenthesis opened at {pos} is never closed")]
    UnclosedParen { pos: usize },

    #[error("malformed number at {pos}")]
    MalformedNumber { pos: usize },

    /// `++` and `--` written without a space between the signs.
    #[error("increment/decrement operator at {pos} is not supported")]
    IncrementOperator { pos: usize },

    #[error("expression nests too deeply")]
    TooDeep,
}
