//! Named array lookup in a property bag.

use crate::property::{PropertyBag, PropertyEntry};

/// Find the first array entry whose name is one of `names`.
///
/// Names compare exactly (case-sensitive). An entry with a matching name that
/// is not an array is passed over and the scan continues. `None` means the
/// asset simply does not carry the feature.
pub fn locate<'a>(bag: &'a PropertyBag, names: &[&str]) -> Option<(usize, &'a [PropertyEntry])> {
    bag.iter().enumerate().find_map(|(index, entry)| {
        if !names.contains(&entry.name()) {
            return None;
        }
        entry.elements().map(|elements| (index, elements))
    })
}

/// Mutable elements of the array entry at `index`, if it is still an array.
pub fn array_at_mut(bag: &mut PropertyBag, index: usize) -> Option<&mut [PropertyEntry]> {
    bag.get_mut(index).and_then(PropertyEntry::elements_mut)
}
