//! Error types for bit-level I/O.

use thiserror::Error;

/// Result type alias for bit I/O operations.
pub type BitioResult<T> = Result<T, BitioError>;

/// Errors that can occur while reading or writing bits.
#[derive(Debug, Error)]
pub enum BitioError {
    /// A value other than 0 or 1 was passed where a bit was expected.
    #[error("{value} is not a bit")]
    InvalidBit {
        /// The rejected value.
        value: u8,
    },

    /// A character other than `0` or `1` appeared in a textual bit string.
    #[error("'{digit}' is not a bit digit")]
    InvalidDigit {
        /// The rejected character.
        digit: char,
    },

    /// The byte source has no more bytes, or a bulk write ran out of input bits.
    #[error("Unexpected end of stream")]
    EndOfStream,

    /// The underlying byte source or sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BitioError {
    /// Create a new invalid bit error.
    pub fn invalid_bit(value: u8) -> Self {
        BitioError::InvalidBit { value }
    }

    /// Create a new invalid digit error.
    pub fn invalid_digit(digit: char) -> Self {
        BitioError::InvalidDigit { digit }
    }

    /// Create a new end of stream error.
    pub fn end_of_stream() -> Self {
        BitioError::EndOfStream
    }

    /// Whether this error is the normal end-of-stream termination signal.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, BitioError::EndOfStream)
    }
}
