//! Error types for property projections and their fixed-layout leaves.

use thiserror::Error;

/// Errors that can occur when reading or writing projected property data.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] tabula_common::Error),

    /// LUT tuple width outside 1..=4.
    #[error("invalid LUT width {0} (expected 1 to 4)")]
    InvalidLutWidth(usize),
}

/// Result type for property operations.
pub type Result<T> = std::result::Result<T, Error>;
