use std::fmt;

/// Why a formula could not be parsed. Offsets count characters, not bytes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("empty expression")]
    Empty,

    #[error("expression is too long ({len} characters, limit {limit})")]
    TooLong { len: usize, limit: usize },

    #[error("expression is nested too deeply at offset {offset} (limit {limit})")]
    TooDeep { offset: usize, limit: usize },

    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("invalid number '{text}' at offset {offset}")]
    InvalidNumber { text: String, offset: usize },

    #[error("unexpected {found} at offset {offset}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        offset: usize,
    },

    #[error("unexpected end of input at offset {offset}, expected {expected}")]
    UnexpectedEnd { expected: &'static str, offset: usize },

    #[error("unmatched '(' at offset {offset}")]
    UnclosedParen { offset: usize },

    #[error("unknown identifier '{name}' at offset {offset}")]
    UnknownIdentifier { name: String, offset: usize },

    #[error("{func} takes {expected} argument(s), got {found} (offset {offset})")]
    WrongArity {
        func: &'static str,
        expected: &'static str,
        found: usize,
        offset: usize,
    },

    #[error("implicit multiplication at offset {offset}; write '*' explicitly")]
    ImplicitMultiplication { offset: usize },
}

impl ParseError {
    /// Character offset of the failure, when one is meaningful.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Empty | Self::TooLong { .. } => None,
            Self::TooDeep { offset, .. }
            | Self::UnexpectedChar { offset, .. }
            | Self::InvalidNumber { offset, .. }
            | Self::UnexpectedToken { offset, .. }
            | Self::UnexpectedEnd { offset, .. }
            | Self::UnclosedParen { offset }
            | Self::UnknownIdentifier { offset, .. }
            | Self::WrongArity { offset, .. }
            | Self::ImplicitMultiplication { offset } => Some(*offset),
        }
    }
}

/// Structural evaluation failure.
///
/// Uninhabited: an `Expression` only comes out of `parse`, which resolves
/// every identifier and checks every arity, so there is nothing left to fail
/// structurally. The type keeps `evaluate` honest about that guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {}

impl fmt::Display for EvalError {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl std::error::Error for EvalError {}
