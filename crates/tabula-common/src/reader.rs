//! Binary reader for zero-copy parsing of byte slices.
//!
//! This module provides [`BinaryReader`], a cursor-like type that efficiently
//! reads little-endian binary data from a byte slice without copying.

use zerocopy::FromBytes;

use crate::{Error, FString, Result, StringEncoding};

/// A binary reader that provides zero-copy reading from a byte slice.
///
/// Cloning a reader is cheap and yields an independent cursor over the same
/// bytes, which makes speculative parsing a matter of reading from a clone and
/// adopting its position only on success.
///
/// # Example
///
/// ```
/// use tabula_common::BinaryReader;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x00, 0x00, 0x80, 0x3f];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_u32().unwrap(), 0x04030201);
/// assert_eq!(reader.read_f32().unwrap(), 1.0);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Create a new reader starting at a specific position.
    #[inline]
    pub const fn new_at(data: &'a [u8], position: usize) -> Self {
        Self { data, position }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Seek to an absolute position.
    #[inline]
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Advance the position by a number of bytes.
    #[inline]
    pub fn advance(&mut self, count: usize) {
        self.position = self.position.saturating_add(count);
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            });
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    /// Read a little-endian u32.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a little-endian i32.
    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        let bytes = self.read_bytes(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a little-endian f32.
    #[inline]
    pub fn read_f32(&mut self) -> Result<f32> {
        let bytes = self.read_bytes(4)?;
        Ok(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read an i32 element count and check it against the remaining bytes.
    ///
    /// `min_element_size` is the smallest number of bytes a single element can
    /// occupy; a count that could not possibly fit is rejected before anything
    /// is allocated for it.
    pub fn read_count(&mut self, what: &'static str, min_element_size: usize) -> Result<usize> {
        let count = self.read_i32()?;
        if count < 0 {
            return Err(Error::NegativeCount { what, count });
        }
        let count = count as usize;
        let needed = count.saturating_mul(min_element_size);
        if needed > self.remaining() {
            return Err(Error::UnexpectedEof {
                needed,
                available: self.remaining(),
            });
        }
        Ok(count)
    }

    /// Read a length-prefixed engine string.
    ///
    /// Returns `None` for the null string (length 0).
    pub fn read_fstring(&mut self) -> Result<Option<FString>> {
        let offset = self.position;
        let length = self.read_i32()?;

        if length == 0 {
            return Ok(None);
        }

        if length > 0 {
            let bytes = self.read_bytes(length as usize)?;
            let (terminator, body) = bytes.split_last().ok_or(Error::MissingNullTerminator)?;
            if *terminator != 0 {
                return Err(Error::MissingNullTerminator);
            }
            // Latin-1 maps every byte straight onto the first 256 code points.
            let value = body.iter().map(|&b| b as char).collect();
            return Ok(Some(FString::with_encoding(value, StringEncoding::Latin1)));
        }

        let units = length
            .checked_neg()
            .and_then(|n| (n as usize).checked_mul(2))
            .ok_or(Error::InvalidStringLength { length, offset })?;
        let bytes = self.read_bytes(units)?;
        let mut code_units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        if code_units.pop() != Some(0) {
            return Err(Error::MissingNullTerminator);
        }
        let value = String::from_utf16(&code_units)?;
        Ok(Some(FString::with_encoding(value, StringEncoding::Utf16)))
    }

    /// Read a struct using zerocopy.
    ///
    /// The struct must implement `FromBytes` from the zerocopy crate.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::UnexpectedEof {
            needed: size,
            available: bytes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_primitives() {
        let data = [
            0x01u8, 0x02, 0x03, 0x04, // u32: 0x04030201
            0xFF, 0xFF, 0xFF, 0xFF, // i32: -1
        ];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.read_u32().unwrap(), 0x04030201);
        assert_eq!(reader.read_i32().unwrap(), -1);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_read_latin1_fstring() {
        let data = [4, 0, 0, 0, b'a', 0xE9, b'z', 0];
        let mut reader = BinaryReader::new(&data);

        let s = reader.read_fstring().unwrap().unwrap();
        assert_eq!(s.as_str(), "a\u{e9}z");
        assert_eq!(s.encoding(), StringEncoding::Latin1);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_read_utf16_fstring() {
        // -3: two code units plus terminator
        let data = [0xFD, 0xFF, 0xFF, 0xFF, 0x42, 0x30, 0x44, 0x30, 0, 0];
        let mut reader = BinaryReader::new(&data);

        let s = reader.read_fstring().unwrap().unwrap();
        assert_eq!(s.as_str(), "\u{3042}\u{3044}");
        assert_eq!(s.encoding(), StringEncoding::Utf16);
    }

    #[test]
    fn test_read_null_fstring() {
        let data = [0, 0, 0, 0];
        let mut reader = BinaryReader::new(&data);

        assert!(reader.read_fstring().unwrap().is_none());
        assert_eq!(reader.position(), 4);
    }

    #[test]
    fn test_fstring_without_terminator() {
        let data = [2, 0, 0, 0, b'a', b'b'];
        let mut reader = BinaryReader::new(&data);

        assert!(matches!(
            reader.read_fstring(),
            Err(Error::MissingNullTerminator)
        ));
    }

    #[test]
    fn test_fstring_length_past_end() {
        let data = [0x00, 0x00, 0x01, 0x00, b'a', 0];
        let mut reader = BinaryReader::new(&data);

        assert!(matches!(
            reader.read_fstring(),
            Err(Error::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_read_count_rejects_negative_and_oversized() {
        let data = (-1i32).to_le_bytes();
        assert!(matches!(
            BinaryReader::new(&data).read_count("tag", 8),
            Err(Error::NegativeCount { count: -1, .. })
        ));

        let data = 3i32.to_le_bytes();
        assert!(matches!(
            BinaryReader::new(&data).read_count("tag", 8),
            Err(Error::UnexpectedEof { needed: 24, .. })
        ));
    }

    #[test]
    fn test_clone_is_independent_cursor() {
        let data = [1, 0, 0, 0, 2, 0, 0, 0];
        let mut reader = BinaryReader::new(&data);
        let mut fork = reader.clone();

        assert_eq!(fork.read_i32().unwrap(), 1);
        assert_eq!(fork.read_i32().unwrap(), 2);
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_i32().unwrap(), 1);
    }

    #[test]
    fn test_eof_error() {
        let data = [0x01, 0x02];
        let mut reader = BinaryReader::new(&data);

        assert!(reader.read_u32().is_err());
    }
}
