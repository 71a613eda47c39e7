//! Common utilities for Tabula.
//!
//! This crate provides foundational types used across all Tabula crates:
//!
//! - [`BinaryReader`] - Zero-copy binary reading from byte slices
//! - [`BinaryWriter`] - Little-endian binary writing into a growable buffer
//! - [`FString`] - The engine's length-prefixed string with its on-disk encoding

mod error;
mod fstring;
mod reader;
mod writer;

pub use error::{Error, Result};
pub use fstring::{FString, StringEncoding};
pub use reader::BinaryReader;
pub use writer::BinaryWriter;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
