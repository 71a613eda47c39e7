//! Little-endian binary writer.
//!
//! [`BinaryWriter`] is the write-side counterpart of [`crate::BinaryReader`]:
//! every `read_*` on the reader has a matching `write_*` here producing the
//! same bytes.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use zerocopy::{Immutable, IntoBytes};

use crate::{Error, FString, Result, StringEncoding};

/// A binary writer over any [`Write`] sink, tracking the number of bytes written.
///
/// # Example
///
/// ```
/// use tabula_common::BinaryWriter;
///
/// let mut writer = BinaryWriter::new(Vec::new());
/// writer.write_i32(7).unwrap();
/// writer.write_f32(1.0).unwrap();
///
/// assert_eq!(writer.position(), 8);
/// assert_eq!(writer.into_inner(), [7, 0, 0, 0, 0x00, 0x00, 0x80, 0x3f]);
/// ```
#[derive(Debug)]
pub struct BinaryWriter<W: Write = Vec<u8>> {
    inner: W,
    position: usize,
}

impl<W: Write> BinaryWriter<W> {
    /// Wrap a sink.
    pub fn new(inner: W) -> Self {
        Self { inner, position: 0 }
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Unwrap the sink.
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Write raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes)?;
        self.position += bytes.len();
        Ok(())
    }

    /// Write a single byte.
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.inner.write_u8(value)?;
        self.position += 1;
        Ok(())
    }

    /// Write a little-endian u32.
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.inner.write_u32::<LittleEndian>(value)?;
        self.position += 4;
        Ok(())
    }

    /// Write a little-endian i32.
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.inner.write_i32::<LittleEndian>(value)?;
        self.position += 4;
        Ok(())
    }

    /// Write a little-endian f32.
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.inner.write_f32::<LittleEndian>(value)?;
        self.position += 4;
        Ok(())
    }

    /// Write a collection length as an i32 count.
    pub fn write_count(&mut self, what: &'static str, count: usize) -> Result<()> {
        let count = i32::try_from(count).map_err(|_| Error::CountOverflow { what, count })?;
        self.write_i32(count)
    }

    /// Write a length-prefixed engine string; `None` writes the null string.
    pub fn write_fstring(&mut self, value: Option<&FString>) -> Result<()> {
        let Some(value) = value else {
            return self.write_i32(0);
        };

        match value.encoding() {
            StringEncoding::Latin1 => {
                let bytes: Vec<u8> = value.as_str().chars().map(|c| c as u8).collect();
                self.write_count("string", bytes.len() + 1)?;
                self.write_bytes(&bytes)?;
                self.write_u8(0)
            }
            StringEncoding::Utf16 => {
                let units: Vec<u16> = value.as_str().encode_utf16().collect();
                let length = i32::try_from(units.len() + 1).map_err(|_| Error::CountOverflow {
                    what: "string",
                    count: units.len() + 1,
                })?;
                self.write_i32(-length)?;
                for unit in units {
                    self.inner.write_u16::<LittleEndian>(unit)?;
                    self.position += 2;
                }
                self.inner.write_u16::<LittleEndian>(0)?;
                self.position += 2;
                Ok(())
            }
        }
    }

    /// Write a struct's bytes using zerocopy.
    pub fn write_struct<T: IntoBytes + Immutable>(&mut self, value: &T) -> Result<()> {
        self.write_bytes(value.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BinaryReader;

    #[test]
    fn test_write_latin1_fstring() {
        let mut writer = BinaryWriter::new(Vec::new());
        writer.write_fstring(Some(&FString::new("ab"))).unwrap();

        assert_eq!(writer.into_inner(), [3, 0, 0, 0, b'a', b'b', 0]);
    }

    #[test]
    fn test_write_null_fstring() {
        let mut writer = BinaryWriter::new(Vec::new());
        writer.write_fstring(None).unwrap();

        assert_eq!(writer.into_inner(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_utf16_fstring_reads_back_identically() {
        let original = FString::new("\u{c548}\u{b155}");
        let mut writer = BinaryWriter::new(Vec::new());
        writer.write_fstring(Some(&original)).unwrap();
        assert_eq!(writer.position(), original.serialized_size());

        let bytes = writer.into_inner();
        assert_eq!(&bytes[..4], &(-3i32).to_le_bytes());

        let mut reader = BinaryReader::new(&bytes);
        assert_eq!(reader.read_fstring().unwrap(), Some(original));
        assert!(reader.is_empty());
    }
}
