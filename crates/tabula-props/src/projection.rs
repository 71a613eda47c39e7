//! Typed views over named property arrays.
//!
//! A [`TypedArrayProjection`] binds to one named array in a [`PropertyBag`],
//! materializes its elements as typed values, and later pushes edits back into
//! the same entries in place.

use tracing::{debug, trace};

use crate::locator;
use crate::property::{PropertyBag, PropertyEntry};
use crate::window;

/// A value type that can be read from, and written back to, array elements.
pub trait Projectable: Copy {
    /// Number of consecutive array elements one value occupies.
    const STRIDE: usize;

    /// Read a value from exactly `STRIDE` elements, or `None` to skip them.
    fn read_slot(slot: &[PropertyEntry]) -> Option<Self>;

    /// Write the value into the `STRIDE` elements it was read from.
    ///
    /// Elements keep their encoding; anything the value does not map onto is
    /// left as it is.
    fn write_slot(&self, slot: &mut [PropertyEntry]);
}

/// Typed projection of one named array property.
#[derive(Debug, Clone)]
pub struct TypedArrayProjection<T> {
    names: &'static [&'static str],
    values: Vec<T>,
    /// Tuple index in the source array each value was read from.
    slots: Vec<usize>,
    source_index: Option<usize>,
}

impl<T: Projectable> TypedArrayProjection<T> {
    /// Create an unbound projection for the array named by any of `names`.
    pub fn new(names: &'static [&'static str]) -> Self {
        Self {
            names,
            values: Vec::new(),
            slots: Vec::new(),
            source_index: None,
        }
    }

    /// Create a projection and parse it from `bag`.
    pub fn from_bag(names: &'static [&'static str], bag: &PropertyBag) -> Self {
        let mut projection = Self::new(names);
        projection.parse(bag);
        projection
    }

    /// Bind to the array in `bag` and materialize its values.
    ///
    /// Any earlier state is discarded. Parsing the same bag again yields the
    /// same projection. A missing array leaves the projection empty and
    /// unbound.
    pub fn parse(&mut self, bag: &PropertyBag) {
        self.values.clear();
        self.slots.clear();
        self.source_index = None;

        let Some((index, elements)) = locator::locate(bag, self.names) else {
            debug!(names = ?self.names, "no source array; projection is empty");
            return;
        };

        for (slot, value) in window::project(elements, T::STRIDE, T::read_slot) {
            self.slots.push(slot);
            self.values.push(value);
        }
        self.source_index = Some(index);

        let skipped = window::tuple_count(elements.len(), T::STRIDE) - self.values.len();
        if skipped > 0 {
            trace!(skipped, "skipped elements of unexpected kind");
        }
        debug!(
            names = ?self.names,
            index,
            count = self.values.len(),
            "bound projection to source array"
        );
    }

    /// The property names this projection binds to.
    pub fn names(&self) -> &'static [&'static str] {
        self.names
    }

    /// Bag position of the source array, if one was found.
    pub fn source_index(&self) -> Option<usize> {
        self.source_index
    }

    /// Whether a source array was found.
    pub fn is_bound(&self) -> bool {
        self.source_index.is_some()
    }

    /// Number of projected values.
    #[inline]
    pub fn count(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`, or `None` out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<T> {
        self.values.get(index).copied()
    }

    /// Replace the value at `index`. Returns `false` (and does nothing) out of range.
    pub fn set(&mut self, index: usize, value: T) -> bool {
        match self.values.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Replace every value.
    pub fn set_all(&mut self, value: T) {
        self.values.fill(value);
    }

    /// All projected values in source order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Iterate projected values.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, T>> {
        self.values.iter().copied()
    }

    /// Push current values back into the source array.
    ///
    /// Call once, right before the bag is serialized. Values are written in
    /// place at the positions they were read from; the array never grows or
    /// shrinks, so values without room are dropped and untouched elements keep
    /// their original contents. Without a source array this does nothing.
    pub fn sync_to_source(&self, bag: &mut PropertyBag) {
        let Some(index) = self.source_index else {
            return;
        };
        let Some(elements) = locator::array_at_mut(bag, index) else {
            debug!(index, "source entry is no longer an array; skipping write-back");
            return;
        };

        let written = window::write_back(
            elements,
            T::STRIDE,
            self.slots.iter().copied().zip(&self.values),
            T::write_slot,
        );
        debug!(index, written, "synced projection to source array");
    }
}

impl<'a, T: Projectable> IntoIterator for &'a TypedArrayProjection<T> {
    type Item = T;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
