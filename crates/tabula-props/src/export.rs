//! Data-interface exports.
//!
//! Each particle data-interface class keeps its payload in one named array of
//! its property bag. A [`DataInterfaceExport`] owns that bag together with a
//! typed projection of the array, and hands the bag back (with edits applied)
//! when the export is finished.

use std::fmt;

use crate::lut::{LutColor, LutFloat, LutVector2, LutVector3};
use crate::projection::{Projectable, TypedArrayProjection};
use crate::property::PropertyBag;
use crate::values::{LinearColor, Vector3};

/// Data-interface classes with a typed projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataInterfaceClass {
    ArrayColor,
    ArrayFloat,
    ArrayFloat3,
    ArrayInt32,
    Curve,
    Vector2DCurve,
    VectorCurve,
    ColorCurve,
}

impl DataInterfaceClass {
    /// All classes.
    pub const ALL: [Self; 8] = [
        Self::ArrayColor,
        Self::ArrayFloat,
        Self::ArrayFloat3,
        Self::ArrayInt32,
        Self::Curve,
        Self::Vector2DCurve,
        Self::VectorCurve,
        Self::ColorCurve,
    ];

    /// Look up a class by its engine class name.
    pub fn from_class_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.class_name() == name)
    }

    /// Engine class name.
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::ArrayColor => "NiagaraDataInterfaceArrayColor",
            Self::ArrayFloat => "NiagaraDataInterfaceArrayFloat",
            Self::ArrayFloat3 => "NiagaraDataInterfaceArrayFloat3",
            Self::ArrayInt32 => "NiagaraDataInterfaceArrayInt32",
            Self::Curve => "NiagaraDataInterfaceCurve",
            Self::Vector2DCurve => "NiagaraDataInterfaceVector2DCurve",
            Self::VectorCurve => "NiagaraDataInterfaceVectorCurve",
            Self::ColorCurve => "NiagaraDataInterfaceColorCurve",
        }
    }

    /// Names of the array property holding the payload, in lookup order.
    pub fn property_names(&self) -> &'static [&'static str] {
        match self {
            Self::ArrayColor => &["ColorData"],
            Self::ArrayFloat => &["FloatData"],
            // InternalVectorData is the older name of the same field.
            Self::ArrayFloat3 => &["VectorData", "InternalVectorData"],
            Self::ArrayInt32 => &["IntData"],
            Self::Curve | Self::Vector2DCurve | Self::VectorCurve | Self::ColorCurve => {
                &["ShaderLUT"]
            }
        }
    }
}

impl fmt::Display for DataInterfaceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Value type projected by a data-interface class.
pub trait DataInterfaceValue: Projectable {
    const CLASS: DataInterfaceClass;
}

impl DataInterfaceValue for LinearColor {
    const CLASS: DataInterfaceClass = DataInterfaceClass::ArrayColor;
}

impl DataInterfaceValue for f32 {
    const CLASS: DataInterfaceClass = DataInterfaceClass::ArrayFloat;
}

impl DataInterfaceValue for Vector3 {
    const CLASS: DataInterfaceClass = DataInterfaceClass::ArrayFloat3;
}

impl DataInterfaceValue for i32 {
    const CLASS: DataInterfaceClass = DataInterfaceClass::ArrayInt32;
}

impl DataInterfaceValue for LutFloat {
    const CLASS: DataInterfaceClass = DataInterfaceClass::Curve;
}

impl DataInterfaceValue for LutVector2 {
    const CLASS: DataInterfaceClass = DataInterfaceClass::Vector2DCurve;
}

impl DataInterfaceValue for LutVector3 {
    const CLASS: DataInterfaceClass = DataInterfaceClass::VectorCurve;
}

impl DataInterfaceValue for LutColor {
    const CLASS: DataInterfaceClass = DataInterfaceClass::ColorCurve;
}

/// A data-interface export: its property bag plus a typed view of the payload.
#[derive(Debug, Clone)]
pub struct DataInterfaceExport<T> {
    bag: PropertyBag,
    projection: TypedArrayProjection<T>,
}

pub type ArrayColorExport = DataInterfaceExport<LinearColor>;
pub type ArrayFloatExport = DataInterfaceExport<f32>;
pub type ArrayFloat3Export = DataInterfaceExport<Vector3>;
pub type ArrayInt32Export = DataInterfaceExport<i32>;
pub type CurveExport = DataInterfaceExport<LutFloat>;
pub type Vector2DCurveExport = DataInterfaceExport<LutVector2>;
pub type VectorCurveExport = DataInterfaceExport<LutVector3>;
pub type ColorCurveExport = DataInterfaceExport<LutColor>;

impl<T: DataInterfaceValue> DataInterfaceExport<T> {
    /// Take ownership of a freshly decoded bag and project its payload.
    pub fn read(bag: PropertyBag) -> Self {
        let projection = TypedArrayProjection::from_bag(T::CLASS.property_names(), &bag);
        Self { bag, projection }
    }

    /// The export's class.
    pub fn class(&self) -> DataInterfaceClass {
        T::CLASS
    }

    /// The underlying bag as decoded; edits made through the projection are
    /// not visible here until [`finish`](Self::finish).
    pub fn bag(&self) -> &PropertyBag {
        &self.bag
    }

    pub fn projection(&self) -> &TypedArrayProjection<T> {
        &self.projection
    }

    pub fn projection_mut(&mut self) -> &mut TypedArrayProjection<T> {
        &mut self.projection
    }

    /// Apply projected edits and return the bag, ready to be serialized.
    pub fn finish(self) -> PropertyBag {
        let Self {
            mut bag,
            projection,
        } = self;
        projection.sync_to_source(&mut bag);
        bag
    }
}

/// A data-interface export of any supported class.
#[derive(Debug, Clone)]
pub enum AnyDataInterface {
    ArrayColor(ArrayColorExport),
    ArrayFloat(ArrayFloatExport),
    ArrayFloat3(ArrayFloat3Export),
    ArrayInt32(ArrayInt32Export),
    Curve(CurveExport),
    Vector2DCurve(Vector2DCurveExport),
    VectorCurve(VectorCurveExport),
    ColorCurve(ColorCurveExport),
}

impl AnyDataInterface {
    /// Read `bag` as an export of `class`.
    pub fn read(class: DataInterfaceClass, bag: PropertyBag) -> Self {
        match class {
            DataInterfaceClass::ArrayColor => Self::ArrayColor(DataInterfaceExport::read(bag)),
            DataInterfaceClass::ArrayFloat => Self::ArrayFloat(DataInterfaceExport::read(bag)),
            DataInterfaceClass::ArrayFloat3 => Self::ArrayFloat3(DataInterfaceExport::read(bag)),
            DataInterfaceClass::ArrayInt32 => Self::ArrayInt32(DataInterfaceExport::read(bag)),
            DataInterfaceClass::Curve => Self::Curve(DataInterfaceExport::read(bag)),
            DataInterfaceClass::Vector2DCurve => {
                Self::Vector2DCurve(DataInterfaceExport::read(bag))
            }
            DataInterfaceClass::VectorCurve => Self::VectorCurve(DataInterfaceExport::read(bag)),
            DataInterfaceClass::ColorCurve => Self::ColorCurve(DataInterfaceExport::read(bag)),
        }
    }

    /// Read `bag` if `class_name` names a supported class; otherwise hand the
    /// bag back untouched.
    pub fn read_by_name(class_name: &str, bag: PropertyBag) -> Result<Self, PropertyBag> {
        match DataInterfaceClass::from_class_name(class_name) {
            Some(class) => Ok(Self::read(class, bag)),
            None => Err(bag),
        }
    }

    pub fn class(&self) -> DataInterfaceClass {
        match self {
            Self::ArrayColor(e) => e.class(),
            Self::ArrayFloat(e) => e.class(),
            Self::ArrayFloat3(e) => e.class(),
            Self::ArrayInt32(e) => e.class(),
            Self::Curve(e) => e.class(),
            Self::Vector2DCurve(e) => e.class(),
            Self::VectorCurve(e) => e.class(),
            Self::ColorCurve(e) => e.class(),
        }
    }

    /// Number of projected values.
    pub fn count(&self) -> usize {
        match self {
            Self::ArrayColor(e) => e.projection().count(),
            Self::ArrayFloat(e) => e.projection().count(),
            Self::ArrayFloat3(e) => e.projection().count(),
            Self::ArrayInt32(e) => e.projection().count(),
            Self::Curve(e) => e.projection().count(),
            Self::Vector2DCurve(e) => e.projection().count(),
            Self::VectorCurve(e) => e.projection().count(),
            Self::ColorCurve(e) => e.projection().count(),
        }
    }

    /// Apply projected edits and return the bag.
    pub fn finish(self) -> PropertyBag {
        match self {
            Self::ArrayColor(e) => e.finish(),
            Self::ArrayFloat(e) => e.finish(),
            Self::ArrayFloat3(e) => e.finish(),
            Self::ArrayInt32(e) => e.finish(),
            Self::Curve(e) => e.finish(),
            Self::Vector2DCurve(e) => e.finish(),
            Self::VectorCurve(e) => e.finish(),
            Self::ColorCurve(e) => e.finish(),
        }
    }
}
