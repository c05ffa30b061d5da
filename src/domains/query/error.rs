//! Query-specific error types.

use thiserror::Error;

/// Errors raised while evaluating a calculator expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    #[error("empty expression")]
    Empty,

    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("unexpected '{token}' at position {position}")]
    UnexpectedToken { token: String, position: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NotFinite,

    #[error("expression is nested too deeply")]
    TooDeep,
}
