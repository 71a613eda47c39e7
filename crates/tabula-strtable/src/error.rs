//! Error types for string table parsing.

use thiserror::Error;

/// Errors that can occur when reading or writing a string table.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] tabula_common::Error),

    /// The declared entry count is negative.
    #[error("negative string table entry count: {0}")]
    NegativeEntryCount(i32),

    /// A tag container could not be decoded.
    #[error("malformed tag container at offset {offset}: {source}")]
    MalformedTagContainer {
        offset: usize,
        #[source]
        source: tabula_common::Error,
    },
}

/// Result type for string table operations.
pub type Result<T> = std::result::Result<T, Error>;
