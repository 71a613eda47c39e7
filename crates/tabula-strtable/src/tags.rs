//! Tag containers.
//!
//! A tag container is a counted list of name references. The table codec
//! never interprets the names; it only has to carry containers through a
//! read/write cycle unchanged.

use std::io::Write;

use tabula_common::{BinaryReader, BinaryWriter};

use crate::{Error, Result};

/// Reference into the asset's name table: index plus instance number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagName {
    pub index: i32,
    pub number: i32,
}

impl TagName {
    /// Serialized size in bytes.
    pub const SIZE: usize = 8;

    pub const fn new(index: i32, number: i32) -> Self {
        Self { index, number }
    }
}

/// A container of gameplay tags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagContainer {
    tags: Vec<TagName>,
}

impl TagContainer {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tags(tags: Vec<TagName>) -> Self {
        Self { tags }
    }

    pub fn tags(&self) -> &[TagName] {
        &self.tags
    }

    pub fn push(&mut self, tag: TagName) {
        self.tags.push(tag);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Size in bytes of the serialized form.
    pub fn serialized_size(&self) -> usize {
        4 + self.tags.len() * TagName::SIZE
    }

    /// Read a container.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let offset = reader.position();
        Self::read_inner(reader).map_err(|source| Error::MalformedTagContainer { offset, source })
    }

    fn read_inner(reader: &mut BinaryReader<'_>) -> tabula_common::Result<Self> {
        let count = reader.read_count("gameplay tag", TagName::SIZE)?;
        let mut tags = Vec::with_capacity(count);
        for _ in 0..count {
            let index = reader.read_i32()?;
            let number = reader.read_i32()?;
            tags.push(TagName { index, number });
        }
        Ok(Self { tags })
    }

    /// Write a container.
    pub fn write<W: Write>(&self, writer: &mut BinaryWriter<W>) -> Result<()> {
        writer.write_count("gameplay tag", self.tags.len())?;
        for tag in &self.tags {
            writer.write_i32(tag.index)?;
            writer.write_i32(tag.number)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write() {
        let container = TagContainer::from_tags(vec![TagName::new(12, 0), TagName::new(40, 2)]);
        let mut writer = BinaryWriter::new(Vec::new());
        container.write(&mut writer).unwrap();
        let bytes = writer.into_inner();
        assert_eq!(bytes.len(), container.serialized_size());

        let mut reader = BinaryReader::new(&bytes);
        assert_eq!(TagContainer::read(&mut reader).unwrap(), container);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_negative_count_is_malformed() {
        let bytes = (-2i32).to_le_bytes();
        let mut reader = BinaryReader::new(&bytes);
        assert!(matches!(
            TagContainer::read(&mut reader),
            Err(Error::MalformedTagContainer { offset: 0, .. })
        ));
    }

    #[test]
    fn test_count_past_end_is_malformed() {
        let mut bytes = 2i32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[0; 8]);
        let mut reader = BinaryReader::new(&bytes);
        assert!(TagContainer::read(&mut reader).is_err());
    }
}
