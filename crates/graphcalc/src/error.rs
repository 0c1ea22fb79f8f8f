use crate::expr::ParseError;
use crate::sample::InvalidRangeError;

/// Umbrella error for one-shot helpers that parse and sample in a single call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid range: {0}")]
    Range(#[from] InvalidRangeError),
}
