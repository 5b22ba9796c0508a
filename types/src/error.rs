//! Parse errors for digit and credential input.

use thiserror::Error;

/// Errors from turning raw input into digits or credentials.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("not a decimal digit: {0:?}")]
    InvalidDigit(char),

    #[error("digit value out of range: {0}")]
    DigitOutOfRange(u8),
}
