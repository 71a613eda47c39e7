//! Typed projections over dynamic property trees.
//!
//! Game assets store an object's state as an ordered bag of named,
//! dynamically-typed property entries. This crate gives strongly-typed views
//! onto particular arrays inside such a bag (particle data-interface arrays,
//! baked shader lookup tables) and writes edits back into the original entries
//! without disturbing anything else.
//!
//! # Example
//!
//! ```
//! use tabula_props::{ArrayFloatExport, PropertyBag, PropertyEntry};
//!
//! let bag = PropertyBag::from(vec![PropertyEntry::array(
//!     "FloatData",
//!     "FloatProperty",
//!     vec![PropertyEntry::float("FloatData", 0.5), PropertyEntry::float("FloatData", 1.0)],
//! )]);
//!
//! let mut export = ArrayFloatExport::read(bag);
//! assert_eq!(export.projection().count(), 2);
//! export.projection_mut().set(0, 0.75);
//!
//! // Apply the edit and get the bag back for serialization.
//! let bag = export.finish();
//! let elements = bag.get(0).and_then(PropertyEntry::elements).unwrap();
//! assert_eq!(elements[0].as_f32(), Some(0.75));
//! ```
//!
//! # Encodings
//!
//! Color and vector array elements may be stored either as a struct of named
//! float fields or as a single composite value. Projections accept both and
//! write each element back in the encoding it was read in.
//!
//! Shader LUTs are flat float arrays read as fixed-width tuples; see
//! [`ShaderLut`] and the [`window`] module.

mod adapter;
mod error;
mod export;
mod lut;
mod projection;
mod property;
mod values;

pub mod curve;
pub mod locator;
pub mod window;

pub use adapter::{FieldLayout, RGBA_FIELDS, XYZ_FIELDS, XY_FIELDS};
pub use error::{Error, Result};
pub use export::{
    AnyDataInterface, ArrayColorExport, ArrayFloat3Export, ArrayFloatExport, ArrayInt32Export,
    ColorCurveExport, CurveExport, DataInterfaceClass, DataInterfaceExport, DataInterfaceValue,
    Vector2DCurveExport, VectorCurveExport,
};
pub use lut::{LutColor, LutFloat, LutValue, LutVector2, LutVector3, ShaderLut};
pub use projection::{Projectable, TypedArrayProjection};
pub use property::{EntryKind, PropertyBag, PropertyEntry, PropertyValue};
pub use values::{LinearColor, Vector2, Vector3};
