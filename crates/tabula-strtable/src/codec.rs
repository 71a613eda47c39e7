//! String table serialization.
//!
//! Two layouts exist for the same record stream, and nothing in the stream
//! says which one is in use:
//!
//! ```text
//! plain:   namespace, i32 n, n * (key, value)
//! tagged:  namespace, i32 n, n * (key, value, tags), trailing tags
//! ```
//!
//! The reader tries the tagged layout first on a forked cursor. It is accepted
//! only if every read succeeds *and* the fork ends exactly at the position
//! where the next structure starts. Otherwise the fork and everything read
//! through it are dropped and the records are read again in the plain layout
//! from the original cursor.

use std::fmt;
use std::io::Write;

use tabula_common::{BinaryReader, BinaryWriter, FString};
use tracing::debug;

use crate::table::LocalizationTable;
use crate::tags::TagContainer;
use crate::{Error, Result};

/// Smallest possible record: two null strings.
const MIN_PLAIN_RECORD: usize = 8;
/// Smallest possible tagged record: two null strings and an empty container.
const MIN_TAGGED_RECORD: usize = 12;

/// One record as it appears in the stream.
struct Record {
    key: Option<FString>,
    value: Option<FString>,
}

/// Records and tag data decoded under the tagged layout.
struct TaggedRecords {
    records: Vec<Record>,
    per_entry_tags: Vec<TagContainer>,
    trailing_tags: TagContainer,
}

/// Why the tagged layout was rejected.
enum Rejection {
    /// A read failed.
    Structural(Error),
    /// Everything decoded, but the cursor did not land on the boundary.
    Boundary { ended_at: usize, expected: usize },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structural(err) => write!(f, "{err}"),
            Self::Boundary { ended_at, expected } => {
                write!(f, "ended at {ended_at}, next structure at {expected}")
            }
        }
    }
}

impl LocalizationTable {
    /// Read a table starting at the reader's position.
    ///
    /// `next_starting` is the absolute position at which the structure after
    /// the table begins. On success the reader is left at the end of the
    /// table. Only a failure to decode the plain layout is returned as an
    /// error.
    pub fn read(reader: &mut BinaryReader<'_>, next_starting: usize) -> Result<Self> {
        let namespace = reader.read_fstring()?;
        let count = reader.read_i32()?;

        match read_tagged(reader.clone(), count, next_starting) {
            Ok((tagged, fork)) => {
                debug!(count, "string table uses the tagged layout");
                *reader = fork;
                let mut table = Self::empty(namespace, true);
                table.apply(tagged.records);
                table.per_entry_tags = Some(tagged.per_entry_tags);
                table.trailing_tags = Some(tagged.trailing_tags);
                Ok(table)
            }
            Err(rejection) => {
                debug!(count, %rejection, "falling back to the plain string table layout");
                let records = read_plain(reader, count)?;
                let mut table = Self::empty(namespace, false);
                table.apply(records);
                Ok(table)
            }
        }
    }

    /// Write the table in the layout it was created with.
    ///
    /// A tagged table writes an empty container for every entry that has no
    /// tag container of its own, and for a missing trailing container.
    pub fn write<W: Write>(&self, writer: &mut BinaryWriter<W>) -> Result<()> {
        writer.write_fstring(self.namespace.as_ref())?;
        writer.write_count("string table entry", self.entries.len())?;

        let empty = TagContainer::new();
        for (i, entry) in self.entries.iter().enumerate() {
            writer.write_fstring(Some(entry.key()))?;
            writer.write_fstring(entry.value())?;
            if self.tagged_format {
                self.entry_tags(i).unwrap_or(&empty).write(writer)?;
            }
        }

        if self.tagged_format {
            self.trailing_tags.as_ref().unwrap_or(&empty).write(writer)?;
        }
        Ok(())
    }

    /// Apply records in stream order. Later duplicates replace earlier values;
    /// records with a null key are not entered into the map.
    fn apply(&mut self, records: Vec<Record>) {
        for record in records {
            if let Some(key) = record.key {
                self.insert_entry(key, record.value);
            }
        }
    }
}

/// Validate the entry count against the bytes left for records of at least
/// `min_record` bytes each.
fn checked_count(reader: &BinaryReader<'_>, count: i32, min_record: usize) -> Result<usize> {
    if count < 0 {
        return Err(Error::NegativeEntryCount(count));
    }
    let count = count as usize;
    let needed = count.saturating_mul(min_record);
    if needed > reader.remaining() {
        return Err(tabula_common::Error::UnexpectedEof {
            needed,
            available: reader.remaining(),
        }
        .into());
    }
    Ok(count)
}

fn read_record(reader: &mut BinaryReader<'_>) -> Result<Record> {
    let key = reader.read_fstring()?;
    let value = reader.read_fstring()?;
    Ok(Record { key, value })
}

/// Decode the tagged layout on a forked cursor, returning the fork on success.
fn read_tagged(
    mut fork: BinaryReader<'_>,
    count: i32,
    next_starting: usize,
) -> std::result::Result<(TaggedRecords, BinaryReader<'_>), Rejection> {
    let decode = |fork: &mut BinaryReader<'_>| -> Result<TaggedRecords> {
        let count = checked_count(fork, count, MIN_TAGGED_RECORD)?;
        let mut records = Vec::with_capacity(count);
        let mut per_entry_tags = Vec::with_capacity(count);
        for _ in 0..count {
            records.push(read_record(fork)?);
            per_entry_tags.push(TagContainer::read(fork)?);
        }
        let trailing_tags = TagContainer::read(fork)?;
        Ok(TaggedRecords {
            records,
            per_entry_tags,
            trailing_tags,
        })
    };

    let tagged = decode(&mut fork).map_err(Rejection::Structural)?;
    if fork.position() != next_starting {
        return Err(Rejection::Boundary {
            ended_at: fork.position(),
            expected: next_starting,
        });
    }
    Ok((tagged, fork))
}

/// Decode the plain layout. There is no further fallback, so errors are final.
fn read_plain(reader: &mut BinaryReader<'_>, count: i32) -> Result<Vec<Record>> {
    let count = checked_count(reader, count, MIN_PLAIN_RECORD)?;
    (0..count).map(|_| read_record(reader)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::TagName;

    fn fstr(s: &str) -> FString {
        FString::new(s)
    }

    /// Encode records by hand, independent of `LocalizationTable::write`.
    fn encode(
        namespace: &str,
        records: &[(&str, &str)],
        tags: Option<(&[TagContainer], &TagContainer)>,
    ) -> Vec<u8> {
        let mut w = BinaryWriter::new(Vec::new());
        w.write_fstring(Some(&fstr(namespace))).unwrap();
        w.write_i32(records.len() as i32).unwrap();
        for (i, (k, v)) in records.iter().enumerate() {
            w.write_fstring(Some(&fstr(k))).unwrap();
            w.write_fstring(Some(&fstr(v))).unwrap();
            if let Some((per_entry, _)) = tags {
                per_entry[i].write(&mut w).unwrap();
            }
        }
        if let Some((_, trailing)) = tags {
            trailing.write(&mut w).unwrap();
        }
        w.into_inner()
    }

    fn tags(ids: &[i32]) -> TagContainer {
        TagContainer::from_tags(ids.iter().map(|&i| TagName::new(i, 0)).collect())
    }

    #[test]
    fn test_detects_tagged_layout() {
        let per_entry = [tags(&[3]), tags(&[4, 5])];
        let trailing = tags(&[]);
        let bytes = encode(
            "Game",
            &[("k1", "v1"), ("k2", "v2")],
            Some((&per_entry, &trailing)),
        );

        let mut reader = BinaryReader::new(&bytes);
        let table = LocalizationTable::read(&mut reader, bytes.len()).unwrap();

        assert!(table.is_tagged());
        assert_eq!(table.namespace().map(FString::as_str), Some("Game"));
        assert_eq!(table.value("k1"), Some("v1"));
        assert_eq!(table.value("k2"), Some("v2"));
        assert_eq!(table.per_entry_tags(), Some(&per_entry[..]));
        assert_eq!(table.trailing_tags(), Some(&trailing));
        assert_eq!(reader.position(), bytes.len());
    }

    #[test]
    fn test_falls_back_to_plain_layout() {
        let bytes = encode("Game", &[("k1", "v1"), ("k2", "v2")], None);

        let mut reader = BinaryReader::new(&bytes);
        let table = LocalizationTable::read(&mut reader, bytes.len()).unwrap();

        assert!(!table.is_tagged());
        assert_eq!(table.len(), 2);
        assert_eq!(table.value("k1"), Some("v1"));
        assert_eq!(table.value("k2"), Some("v2"));
        assert!(table.per_entry_tags().is_none());
        assert!(table.trailing_tags().is_none());
        assert_eq!(reader.position(), bytes.len());
    }

    #[test]
    fn test_fallback_with_trailing_data() {
        // The next structure follows directly; the tagged attempt reads into it.
        let mut bytes = encode("Game", &[("a", "1")], None);
        let end = bytes.len();
        bytes.extend_from_slice(&[0u8; 16]);

        let mut reader = BinaryReader::new(&bytes);
        let table = LocalizationTable::read(&mut reader, end).unwrap();

        assert!(!table.is_tagged());
        assert_eq!(table.value("a"), Some("1"));
        assert_eq!(reader.position(), end);
    }

    #[test]
    fn test_boundary_mismatch_rejects_tagged_parse() {
        // Valid tagged bytes, but the caller says the table ends elsewhere.
        let per_entry = [tags(&[])];
        let bytes = encode("Game", &[("a", "1")], Some((&per_entry, &tags(&[]))));

        let mut reader = BinaryReader::new(&bytes);
        let table = LocalizationTable::read(&mut reader, bytes.len() - 8).unwrap();

        assert!(!table.is_tagged());
        assert_eq!(table.value("a"), Some("1"));
        assert_eq!(reader.position(), bytes.len() - 8);
    }

    #[test]
    fn test_duplicate_keys_last_wins_tags_kept() {
        let per_entry = [tags(&[1]), tags(&[2])];
        let trailing = tags(&[]);
        let bytes = encode("UI", &[("a", "x"), ("a", "y")], Some((&per_entry, &trailing)));

        let mut reader = BinaryReader::new(&bytes);
        let table = LocalizationTable::read(&mut reader, bytes.len()).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.value("a"), Some("y"));
        assert_eq!(table.per_entry_tags().map(<[_]>::len), Some(2));
    }

    #[test]
    fn test_duplicate_keys_plain() {
        let bytes = encode("UI", &[("a", "x"), ("b", "z"), ("a", "y")], None);
        let mut reader = BinaryReader::new(&bytes);
        let table = LocalizationTable::read(&mut reader, bytes.len()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.value("a"), Some("y"));
        assert_eq!(table.entry_at(0).map(|e| e.key().as_str()), Some("a"));
    }

    #[test]
    fn test_empty_tagged_table() {
        let bytes = encode("Empty", &[], Some((&[], &tags(&[]))));

        let mut reader = BinaryReader::new(&bytes);
        let table = LocalizationTable::read(&mut reader, bytes.len()).unwrap();

        assert!(table.is_empty());
        assert!(table.is_tagged());
        assert_eq!(table.per_entry_tags(), Some(&[][..]));
        assert_eq!(table.trailing_tags(), Some(&TagContainer::new()));
    }

    #[test]
    fn test_empty_plain_table() {
        let bytes = encode("Empty", &[], None);

        let mut reader = BinaryReader::new(&bytes);
        let table = LocalizationTable::read(&mut reader, bytes.len()).unwrap();

        assert!(table.is_empty());
        assert!(!table.is_tagged());
        assert_eq!(reader.position(), bytes.len());
    }

    #[test]
    fn test_empty_plain_table_followed_by_zeroes() {
        // Four zero bytes after the table look like an empty trailing container;
        // only the boundary check tells the layouts apart.
        let mut bytes = encode("Empty", &[], None);
        let end = bytes.len();
        bytes.extend_from_slice(&[0u8; 4]);

        let mut reader = BinaryReader::new(&bytes);
        let table = LocalizationTable::read(&mut reader, end).unwrap();

        assert!(!table.is_tagged());
        assert_eq!(reader.position(), end);
    }

    #[test]
    fn test_corrupt_stream_is_fatal() {
        let mut bytes = encode("Game", &[("k1", "v1")], None);
        bytes.truncate(bytes.len() - 3);

        let mut reader = BinaryReader::new(&bytes);
        assert!(LocalizationTable::read(&mut reader, bytes.len()).is_err());
    }

    #[test]
    fn test_negative_count_is_fatal() {
        let mut w = BinaryWriter::new(Vec::new());
        w.write_fstring(Some(&fstr("Game"))).unwrap();
        w.write_i32(-1).unwrap();
        let bytes = w.into_inner();

        let mut reader = BinaryReader::new(&bytes);
        assert!(matches!(
            LocalizationTable::read(&mut reader, bytes.len()),
            Err(Error::NegativeEntryCount(-1))
        ));
    }

    #[test]
    fn test_null_key_skipped_but_tags_kept() {
        let mut w = BinaryWriter::new(Vec::new());
        w.write_fstring(Some(&fstr("Game"))).unwrap();
        w.write_i32(2).unwrap();
        w.write_fstring(None).unwrap();
        w.write_fstring(Some(&fstr("orphan"))).unwrap();
        tags(&[7]).write(&mut w).unwrap();
        w.write_fstring(Some(&fstr("k"))).unwrap();
        w.write_fstring(Some(&fstr("v"))).unwrap();
        tags(&[8]).write(&mut w).unwrap();
        tags(&[]).write(&mut w).unwrap();
        let bytes = w.into_inner();

        let mut reader = BinaryReader::new(&bytes);
        let table = LocalizationTable::read(&mut reader, bytes.len()).unwrap();

        assert!(table.is_tagged());
        assert_eq!(table.len(), 1);
        assert_eq!(table.value("k"), Some("v"));
        assert_eq!(table.entry_tags(1), Some(&tags(&[8])));
    }

    #[test]
    fn test_write_reproduces_input() {
        let per_entry = [tags(&[1, 2]), tags(&[])];
        let tagged = encode(
            "Game",
            &[("k1", "v1"), ("k2", "\u{65e5}\u{672c}")],
            Some((&per_entry, &tags(&[9]))),
        );
        let plain = encode("Game", &[("k1", "v1"), ("k2", "caf\u{e9}")], None);

        for bytes in [tagged, plain] {
            let mut reader = BinaryReader::new(&bytes);
            let table = LocalizationTable::read(&mut reader, bytes.len()).unwrap();

            let mut writer = BinaryWriter::new(Vec::new());
            table.write(&mut writer).unwrap();
            assert_eq!(writer.into_inner(), bytes);
        }
    }

    #[test]
    fn test_write_synthesizes_missing_tags() {
        let mut table = LocalizationTable::new_tagged("Game");
        table.insert("a", "1");
        table.insert("b", "2");
        table.set_entry_tags(0, tags(&[5]));
        table.trailing_tags = None;

        let mut writer = BinaryWriter::new(Vec::new());
        table.write(&mut writer).unwrap();
        let bytes = writer.into_inner();

        let expected = encode(
            "Game",
            &[("a", "1"), ("b", "2")],
            Some((&[tags(&[5]), tags(&[])], &tags(&[]))),
        );
        assert_eq!(bytes, expected);

        let mut reader = BinaryReader::new(&bytes);
        let back = LocalizationTable::read(&mut reader, bytes.len()).unwrap();
        assert!(back.is_tagged());
        assert_eq!(back.entry_tags(0), Some(&tags(&[5])));
    }

    #[test]
    fn test_plain_write_has_no_tags() {
        let mut table = LocalizationTable::new("Game");
        table.insert("a", "1");

        let mut writer = BinaryWriter::new(Vec::new());
        table.write(&mut writer).unwrap();
        assert_eq!(writer.into_inner(), encode("Game", &[("a", "1")], None));
    }
}
