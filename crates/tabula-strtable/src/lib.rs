//! Localization string tables.
//!
//! A string table is a namespace plus an ordered map from keys to source
//! strings. Newer assets append gameplay tag containers to every record and
//! after the last one; the two layouts are otherwise identical and the stream
//! carries no version marker, so [`LocalizationTable::read`] takes the offset
//! where the next structure begins and uses it to tell them apart.
//!
//! # Example
//!
//! ```
//! use tabula_common::{BinaryReader, BinaryWriter};
//! use tabula_strtable::LocalizationTable;
//!
//! let mut table = LocalizationTable::new("UI");
//! table.insert("Greeting", "Hello");
//!
//! let mut writer = BinaryWriter::new(Vec::new());
//! table.write(&mut writer).unwrap();
//! let bytes = writer.into_inner();
//!
//! let mut reader = BinaryReader::new(&bytes);
//! let back = LocalizationTable::read(&mut reader, bytes.len()).unwrap();
//! assert_eq!(back.value("Greeting"), Some("Hello"));
//! assert!(!back.is_tagged());
//! ```

mod codec;
mod error;
mod table;
mod tags;

pub use error::{Error, Result};
pub use table::{LocalizationTable, TableEntry};
pub use tags::{TagContainer, TagName};
