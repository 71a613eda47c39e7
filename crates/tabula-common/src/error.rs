//! Error types for tabula-common.

use thiserror::Error;

/// Common error type for Tabula operations.
#[derive(Debug, Error)]
pub enum Error {
    /// End of buffer reached while reading.
    #[error("unexpected end of buffer: needed {needed} bytes but only {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// A count field that must not be negative was.
    #[error("negative {what} count: {count}")]
    NegativeCount { what: &'static str, count: i32 },

    /// A collection is too large for its i32 count field.
    #[error("{what} count {count} does not fit in an i32")]
    CountOverflow { what: &'static str, count: usize },

    /// String length prefix cannot describe a valid string.
    #[error("invalid string length {length} at offset {offset}")]
    InvalidStringLength { length: i32, offset: usize },

    /// Missing null terminator in string.
    #[error("string missing null terminator")]
    MissingNullTerminator,

    /// UTF-16 decoding error.
    #[error("UTF-16 error: {0}")]
    Utf16(#[from] std::string::FromUtf16Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
