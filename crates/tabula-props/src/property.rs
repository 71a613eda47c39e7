//! In-memory property tree.
//!
//! An object's serialized state is an ordered [`PropertyBag`] of named,
//! dynamically-typed [`PropertyEntry`] values. The generic property reader and
//! writer that move these to and from bytes live with the asset container;
//! this module only defines the decoded shape they share with projections.

use std::fmt;

use crate::values::{LinearColor, Vector2, Vector3};

/// Declared kind of a property entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntryKind {
    Array,
    Struct,
    Float,
    Int,
    LinearColor,
    Vector,
    Vector2,
    Other,
}

impl EntryKind {
    /// Property type name as the engine spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Array => "ArrayProperty",
            Self::Struct => "StructProperty",
            Self::Float => "FloatProperty",
            Self::Int => "IntProperty",
            Self::LinearColor => "LinearColor",
            Self::Vector => "Vector",
            Self::Vector2 => "Vector2D",
            Self::Other => "Other",
        }
    }

    /// Whether this kind holds one fixed-shape multi-field value.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::LinearColor | Self::Vector | Self::Vector2)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a property entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyValue {
    /// Homogeneous array; `element_type` is the declared element property type.
    Array {
        element_type: String,
        elements: Vec<PropertyEntry>,
    },
    /// Struct made of named fields.
    Struct {
        struct_type: String,
        fields: Vec<PropertyEntry>,
    },
    /// 32-bit float.
    Float(f32),
    /// 32-bit signed integer.
    Int(i32),
    /// Composite linear color.
    LinearColor(LinearColor),
    /// Composite 3-vector.
    Vector(Vector3),
    /// Composite 2-vector.
    Vector2(Vector2),
    /// Any property type projections do not interpret, kept as raw bytes.
    Other { type_name: String, raw: Vec<u8> },
}

/// A named property entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyEntry {
    name: String,
    value: PropertyValue,
}

impl PropertyEntry {
    /// Create an entry from a name and a payload.
    pub fn new(name: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn float(name: impl Into<String>, value: f32) -> Self {
        Self::new(name, PropertyValue::Float(value))
    }

    pub fn int(name: impl Into<String>, value: i32) -> Self {
        Self::new(name, PropertyValue::Int(value))
    }

    pub fn linear_color(name: impl Into<String>, value: LinearColor) -> Self {
        Self::new(name, PropertyValue::LinearColor(value))
    }

    pub fn vector(name: impl Into<String>, value: Vector3) -> Self {
        Self::new(name, PropertyValue::Vector(value))
    }

    pub fn vector2(name: impl Into<String>, value: Vector2) -> Self {
        Self::new(name, PropertyValue::Vector2(value))
    }

    /// Create an array entry.
    pub fn array(
        name: impl Into<String>,
        element_type: impl Into<String>,
        elements: Vec<PropertyEntry>,
    ) -> Self {
        Self::new(
            name,
            PropertyValue::Array {
                element_type: element_type.into(),
                elements,
            },
        )
    }

    /// Create a struct entry.
    pub fn structure(
        name: impl Into<String>,
        struct_type: impl Into<String>,
        fields: Vec<PropertyEntry>,
    ) -> Self {
        Self::new(
            name,
            PropertyValue::Struct {
                struct_type: struct_type.into(),
                fields,
            },
        )
    }

    /// The entry's name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The entry's declared kind.
    pub fn kind(&self) -> EntryKind {
        match &self.value {
            PropertyValue::Array { .. } => EntryKind::Array,
            PropertyValue::Struct { .. } => EntryKind::Struct,
            PropertyValue::Float(_) => EntryKind::Float,
            PropertyValue::Int(_) => EntryKind::Int,
            PropertyValue::LinearColor(_) => EntryKind::LinearColor,
            PropertyValue::Vector(_) => EntryKind::Vector,
            PropertyValue::Vector2(_) => EntryKind::Vector2,
            PropertyValue::Other { .. } => EntryKind::Other,
        }
    }

    #[inline]
    pub fn value(&self) -> &PropertyValue {
        &self.value
    }

    #[inline]
    pub fn value_mut(&mut self) -> &mut PropertyValue {
        &mut self.value
    }

    /// Elements of an array entry.
    pub fn elements(&self) -> Option<&[PropertyEntry]> {
        match &self.value {
            PropertyValue::Array { elements, .. } => Some(elements),
            _ => None,
        }
    }

    /// Mutable elements of an array entry.
    ///
    /// Handed out as a slice: values may be edited in place but the array
    /// cannot grow or shrink through this accessor.
    pub fn elements_mut(&mut self) -> Option<&mut [PropertyEntry]> {
        match &mut self.value {
            PropertyValue::Array { elements, .. } => Some(elements),
            _ => None,
        }
    }

    /// Fields of a struct entry.
    pub fn fields(&self) -> Option<&[PropertyEntry]> {
        match &self.value {
            PropertyValue::Struct { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// Mutable fields of a struct entry.
    pub fn fields_mut(&mut self) -> Option<&mut [PropertyEntry]> {
        match &mut self.value {
            PropertyValue::Struct { fields, .. } => Some(fields),
            _ => None,
        }
    }

    #[inline]
    pub fn as_f32(&self) -> Option<f32> {
        match self.value {
            PropertyValue::Float(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_f32_mut(&mut self) -> Option<&mut f32> {
        match &mut self.value {
            PropertyValue::Float(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_i32(&self) -> Option<i32> {
        match self.value {
            PropertyValue::Int(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_i32_mut(&mut self) -> Option<&mut i32> {
        match &mut self.value {
            PropertyValue::Int(v) => Some(v),
            _ => None,
        }
    }
}

/// Ordered sequence of property entries making up an object's state.
///
/// Order is significant on write. The bag offers in-place access and
/// appending, but no removal or reordering.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyBag {
    entries: Vec<PropertyEntry>,
}

impl PropertyBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&mut self, entry: PropertyEntry) {
        self.entries.push(entry);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&PropertyEntry> {
        self.entries.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut PropertyEntry> {
        self.entries.get_mut(index)
    }

    /// Iterate entries in stored order.
    pub fn iter(&self) -> std::slice::Iter<'_, PropertyEntry> {
        self.entries.iter()
    }

    /// All entries as a slice.
    pub fn entries(&self) -> &[PropertyEntry] {
        &self.entries
    }
}

impl From<Vec<PropertyEntry>> for PropertyBag {
    fn from(entries: Vec<PropertyEntry>) -> Self {
        Self { entries }
    }
}

impl FromIterator<PropertyEntry> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = PropertyEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PropertyBag {
    type Item = &'a PropertyEntry;
    type IntoIter = std::slice::Iter<'a, PropertyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_kinds() {
        assert_eq!(PropertyEntry::float("A", 1.0).kind(), EntryKind::Float);
        assert_eq!(PropertyEntry::int("B", 1).kind(), EntryKind::Int);
        assert_eq!(
            PropertyEntry::array("C", "FloatProperty", vec![]).kind(),
            EntryKind::Array
        );
        assert!(EntryKind::LinearColor.is_composite());
        assert!(!EntryKind::Struct.is_composite());
    }

    #[test]
    fn test_accessors_reject_other_kinds() {
        let entry = PropertyEntry::int("Count", 3);
        assert_eq!(entry.as_i32(), Some(3));
        assert_eq!(entry.as_f32(), None);
        assert!(entry.elements().is_none());
        assert!(entry.fields().is_none());
    }

    #[test]
    fn test_elements_mut_edits_in_place() {
        let mut entry = PropertyEntry::array(
            "FloatData",
            "FloatProperty",
            vec![PropertyEntry::float("FloatData", 1.0)],
        );
        if let Some(v) = entry.elements_mut().and_then(|e| e[0].as_f32_mut()) {
            *v = 2.0;
        }
        assert_eq!(entry.elements().unwrap()[0].as_f32(), Some(2.0));
        assert_eq!(entry.elements().unwrap().len(), 1);
    }
}
