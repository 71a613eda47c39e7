//! Per-element encoding adapter.
//!
//! Array elements holding a color or vector come in two encodings: a struct
//! whose float fields carry the components by name, or a composite value
//! stored as one unit. Reading accepts either; writing updates the element in
//! whichever encoding it already has.

use crate::projection::Projectable;
use crate::property::{PropertyEntry, PropertyValue};
use crate::values::{LinearColor, Vector2, Vector3};

/// Named float fields recognized inside a struct-encoded element.
#[derive(Debug, Clone, Copy)]
pub struct FieldLayout<const N: usize> {
    names: [&'static str; N],
    defaults: [f32; N],
}

/// `R, G, B, A`; alpha defaults to opaque.
pub const RGBA_FIELDS: FieldLayout<4> = FieldLayout {
    names: ["R", "G", "B", "A"],
    defaults: [0.0, 0.0, 0.0, 1.0],
};

/// `X, Y, Z`.
pub const XYZ_FIELDS: FieldLayout<3> = FieldLayout {
    names: ["X", "Y", "Z"],
    defaults: [0.0; 3],
};

/// `X, Y`.
pub const XY_FIELDS: FieldLayout<2> = FieldLayout {
    names: ["X", "Y"],
    defaults: [0.0; 2],
};

impl<const N: usize> FieldLayout<N> {
    /// Read recognized float fields, falling back to defaults for absent ones.
    pub fn read(&self, fields: &[PropertyEntry]) -> [f32; N] {
        let mut out = self.defaults;
        for field in fields {
            if let (Some(i), Some(v)) = (self.position(field.name()), field.as_f32()) {
                out[i] = v;
            }
        }
        out
    }

    /// Overwrite recognized float fields; all other fields are left alone.
    pub fn write(&self, fields: &mut [PropertyEntry], values: [f32; N]) {
        for field in fields {
            let Some(i) = self.position(field.name()) else {
                continue;
            };
            if let Some(v) = field.as_f32_mut() {
                *v = values[i];
            }
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| *n == name)
    }
}

impl Projectable for LinearColor {
    const STRIDE: usize = 1;

    fn read_slot(slot: &[PropertyEntry]) -> Option<Self> {
        match slot.first()?.value() {
            PropertyValue::Struct { fields, .. } => {
                Some(LinearColor::from_array(RGBA_FIELDS.read(fields)))
            }
            PropertyValue::LinearColor(color) => Some(*color),
            _ => None,
        }
    }

    fn write_slot(&self, slot: &mut [PropertyEntry]) {
        let Some(entry) = slot.first_mut() else {
            return;
        };
        match entry.value_mut() {
            PropertyValue::Struct { fields, .. } => RGBA_FIELDS.write(fields, self.to_array()),
            PropertyValue::LinearColor(color) => *color = *self,
            _ => {}
        }
    }
}

impl Projectable for Vector3 {
    const STRIDE: usize = 1;

    fn read_slot(slot: &[PropertyEntry]) -> Option<Self> {
        match slot.first()?.value() {
            PropertyValue::Struct { fields, .. } => Some(Vector3::from_array(XYZ_FIELDS.read(fields))),
            PropertyValue::Vector(v) => Some(*v),
            _ => None,
        }
    }

    fn write_slot(&self, slot: &mut [PropertyEntry]) {
        let Some(entry) = slot.first_mut() else {
            return;
        };
        match entry.value_mut() {
            PropertyValue::Struct { fields, .. } => XYZ_FIELDS.write(fields, self.to_array()),
            PropertyValue::Vector(v) => *v = *self,
            _ => {}
        }
    }
}

impl Projectable for Vector2 {
    const STRIDE: usize = 1;

    fn read_slot(slot: &[PropertyEntry]) -> Option<Self> {
        match slot.first()?.value() {
            PropertyValue::Struct { fields, .. } => Some(Vector2::from_array(XY_FIELDS.read(fields))),
            PropertyValue::Vector2(v) => Some(*v),
            _ => None,
        }
    }

    fn write_slot(&self, slot: &mut [PropertyEntry]) {
        let Some(entry) = slot.first_mut() else {
            return;
        };
        match entry.value_mut() {
            PropertyValue::Struct { fields, .. } => XY_FIELDS.write(fields, self.to_array()),
            PropertyValue::Vector2(v) => *v = *self,
            _ => {}
        }
    }
}

impl Projectable for f32 {
    const STRIDE: usize = 1;

    fn read_slot(slot: &[PropertyEntry]) -> Option<Self> {
        slot.first()?.as_f32()
    }

    fn write_slot(&self, slot: &mut [PropertyEntry]) {
        if let Some(v) = slot.first_mut().and_then(PropertyEntry::as_f32_mut) {
            *v = *self;
        }
    }
}

impl Projectable for i32 {
    const STRIDE: usize = 1;

    fn read_slot(slot: &[PropertyEntry]) -> Option<Self> {
        slot.first()?.as_i32()
    }

    fn write_slot(&self, slot: &mut [PropertyEntry]) {
        if let Some(v) = slot.first_mut().and_then(PropertyEntry::as_i32_mut) {
            *v = *self;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let entry = PropertyEntry::structure(
            "ColorData",
            "LinearColor",
            vec![PropertyEntry::float("G", 0.5)],
        );
        let color = LinearColor::read_slot(std::slice::from_ref(&entry)).unwrap();
        assert_eq!(color, LinearColor::new(0.0, 0.5, 0.0, 1.0));
    }

    #[test]
    fn test_unrecognized_fields_survive_write() {
        let mut entry = PropertyEntry::structure(
            "VectorData",
            "Vector",
            vec![
                PropertyEntry::float("X", 1.0),
                PropertyEntry::float("W", 9.0),
                PropertyEntry::int("Z", 4),
            ],
        );
        Vector3::new(5.0, 6.0, 7.0).write_slot(std::slice::from_mut(&mut entry));

        let fields = entry.fields().unwrap();
        assert_eq!(fields[0].as_f32(), Some(5.0));
        assert_eq!(fields[1].as_f32(), Some(9.0));
        // Recognized name but not a float: not touched.
        assert_eq!(fields[2].as_i32(), Some(4));
        // No Y field existed, so none is created.
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn test_composite_replaced_wholesale() {
        let mut entry = PropertyEntry::vector2("Offset", Vector2::new(1.0, 1.0));
        Vector2::new(3.0, 4.0).write_slot(std::slice::from_mut(&mut entry));
        assert_eq!(entry.value(), &PropertyValue::Vector2(Vector2::new(3.0, 4.0)));
    }

    #[test]
    fn test_mismatched_composite_is_skipped() {
        let entry = PropertyEntry::vector("ColorData", Vector3::new(1.0, 0.0, 0.0));
        assert!(LinearColor::read_slot(std::slice::from_ref(&entry)).is_none());
        assert!(Vector3::read_slot(std::slice::from_ref(&entry)).is_some());
    }

    #[test]
    fn test_scalar_kinds_do_not_cross() {
        let entry = PropertyEntry::int("IntData", 3);
        assert_eq!(i32::read_slot(std::slice::from_ref(&entry)), Some(3));
        assert_eq!(f32::read_slot(std::slice::from_ref(&entry)), None);
    }
}
