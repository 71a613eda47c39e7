//! In-memory localization table.

use std::hash::BuildHasherDefault;

use hashbrown::HashMap as FastHashMap;
use rustc_hash::FxHasher;
use tabula_common::FString;

use crate::tags::TagContainer;

type FxHashMap<K, V> = FastHashMap<K, V, BuildHasherDefault<FxHasher>>;

/// One key/value pair of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableEntry {
    key: FString,
    value: Option<FString>,
}

impl TableEntry {
    pub fn key(&self) -> &FString {
        &self.key
    }

    /// The source string; `None` if it was stored as a null string.
    pub fn value(&self) -> Option<&FString> {
        self.value.as_ref()
    }

    /// The source string as text, empty for a null string.
    pub fn value_str(&self) -> &str {
        self.value.as_ref().map_or("", FString::as_str)
    }
}

/// A localization string table: a namespace and an ordered key -> source
/// string map, optionally carrying gameplay tag containers.
///
/// Entries keep insertion order. Inserting an existing key replaces its value
/// in place.
///
/// Tables read in the tagged layout carry one tag container per record read
/// from the stream (`per_entry_tags`, parallel to the records, not
/// deduplicated by key) plus one trailing container. The layout is fixed when
/// the table is created and decides how it is written.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LocalizationTable {
    pub(crate) namespace: Option<FString>,
    pub(crate) entries: Vec<TableEntry>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) index: FxHashMap<String, usize>,
    pub(crate) per_entry_tags: Option<Vec<TagContainer>>,
    pub(crate) trailing_tags: Option<TagContainer>,
    pub(crate) tagged_format: bool,
}

impl LocalizationTable {
    /// Create an empty table in the plain layout.
    pub fn new(namespace: impl Into<FString>) -> Self {
        Self::empty(Some(namespace.into()), false)
    }

    /// Create an empty table in the tagged layout.
    pub fn new_tagged(namespace: impl Into<FString>) -> Self {
        let mut table = Self::empty(Some(namespace.into()), true);
        table.per_entry_tags = Some(Vec::new());
        table.trailing_tags = Some(TagContainer::new());
        table
    }

    pub(crate) fn empty(namespace: Option<FString>, tagged_format: bool) -> Self {
        Self {
            namespace,
            entries: Vec::new(),
            index: FxHashMap::default(),
            per_entry_tags: None,
            trailing_tags: None,
            tagged_format,
        }
    }

    /// The table namespace; `None` if stored as a null string.
    pub fn namespace(&self) -> Option<&FString> {
        self.namespace.as_ref()
    }

    /// Number of distinct keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by key (exact, case-sensitive).
    pub fn get(&self, key: &str) -> Option<&TableEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    /// Source string for `key` as text.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).map(TableEntry::value_str)
    }

    /// Entry at `index` in table order.
    pub fn entry_at(&self, index: usize) -> Option<&TableEntry> {
        self.entries.get(index)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Insert or replace. A new key is appended; an existing key keeps its
    /// position. Returns the previous value of an existing key.
    pub fn insert(
        &mut self,
        key: impl Into<FString>,
        value: impl Into<FString>,
    ) -> Option<Option<FString>> {
        self.insert_entry(key.into(), Some(value.into()))
    }

    pub(crate) fn insert_entry(
        &mut self,
        key: FString,
        value: Option<FString>,
    ) -> Option<Option<FString>> {
        if let Some(&i) = self.index.get(key.as_str()) {
            return Some(std::mem::replace(&mut self.entries[i].value, value));
        }
        self.index.insert(key.as_str().to_owned(), self.entries.len());
        self.entries.push(TableEntry { key, value });
        None
    }

    /// Iterate entries in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, TableEntry> {
        self.entries.iter()
    }

    /// Whether the table uses the tagged layout.
    pub fn is_tagged(&self) -> bool {
        self.tagged_format
    }

    /// Tag containers in stream record order, if tagged.
    pub fn per_entry_tags(&self) -> Option<&[TagContainer]> {
        self.per_entry_tags.as_deref()
    }

    /// Tag container of the `index`-th record, if present.
    pub fn entry_tags(&self, index: usize) -> Option<&TagContainer> {
        self.per_entry_tags.as_ref()?.get(index)
    }

    /// Replace the tag container of the `index`-th record.
    ///
    /// Missing containers before `index` are filled with empty ones. Returns
    /// `false` (and does nothing) for a table in the plain layout.
    pub fn set_entry_tags(&mut self, index: usize, tags: TagContainer) -> bool {
        if !self.tagged_format {
            return false;
        }
        let per_entry = self.per_entry_tags.get_or_insert_with(Vec::new);
        if per_entry.len() <= index {
            per_entry.resize_with(index + 1, TagContainer::new);
        }
        per_entry[index] = tags;
        true
    }

    /// The container following all records, if tagged.
    pub fn trailing_tags(&self) -> Option<&TagContainer> {
        self.trailing_tags.as_ref()
    }

    /// Replace the trailing container. Returns `false` for a plain table.
    pub fn set_trailing_tags(&mut self, tags: TagContainer) -> bool {
        if !self.tagged_format {
            return false;
        }
        self.trailing_tags = Some(tags);
        true
    }
}

impl<'a> IntoIterator for &'a LocalizationTable {
    type Item = &'a TableEntry;
    type IntoIter = std::slice::Iter<'a, TableEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::TagName;

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut table = LocalizationTable::new("UI");
        assert_eq!(table.insert("a", "x"), None);
        table.insert("b", "y");
        assert_eq!(table.insert("a", "z"), Some(Some(FString::new("x"))));

        let keys: Vec<_> = table.iter().map(|e| e.key().as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(table.value("a"), Some("z"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let mut table = LocalizationTable::new("UI");
        table.insert("Key", "1");
        assert!(table.contains_key("Key"));
        assert!(!table.contains_key("key"));
        assert!(table.get("KEY").is_none());
    }

    #[test]
    fn test_tags_only_on_tagged_tables() {
        let mut plain = LocalizationTable::new("UI");
        assert!(!plain.set_entry_tags(0, TagContainer::new()));
        assert!(!plain.set_trailing_tags(TagContainer::new()));
        assert!(plain.per_entry_tags().is_none());

        let mut tagged = LocalizationTable::new_tagged("UI");
        let tags = TagContainer::from_tags(vec![TagName::new(1, 0)]);
        assert!(tagged.set_entry_tags(2, tags.clone()));
        assert_eq!(tagged.per_entry_tags().map(<[_]>::len), Some(3));
        assert_eq!(tagged.entry_tags(0), Some(&TagContainer::new()));
        assert_eq!(tagged.entry_tags(2), Some(&tags));
        assert_eq!(tagged.trailing_tags(), Some(&TagContainer::new()));
    }
}
