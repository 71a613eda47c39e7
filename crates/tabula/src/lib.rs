//! Tabula - typed views over game asset property data.
//!
//! This crate re-exports the Tabula library crates under one roof.
//!
//! # Crates
//!
//! - [`tabula_common`] - Binary cursor/writer and length-prefixed strings
//! - [`tabula_props`] - Property trees, typed array projections, shader LUTs
//! - [`tabula_strtable`] - Localization string tables
//!
//! # Example
//!
//! ```
//! use tabula::prelude::*;
//!
//! let bag = PropertyBag::from(vec![PropertyEntry::array(
//!     "ShaderLUT",
//!     "FloatProperty",
//!     (0..6).map(|i| PropertyEntry::float("ShaderLUT", i as f32)).collect(),
//! )]);
//!
//! let export = AnyDataInterface::read(DataInterfaceClass::VectorCurve, bag);
//! assert_eq!(export.count(), 2);
//! ```

pub use tabula_common as common;
pub use tabula_props as props;
pub use tabula_strtable as strtable;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use tabula_common::{BinaryReader, BinaryWriter, FString};
    pub use tabula_props::{
        AnyDataInterface, DataInterfaceClass, DataInterfaceExport, LinearColor, PropertyBag,
        PropertyEntry, ShaderLut, TypedArrayProjection, Vector2, Vector3,
    };
    pub use tabula_strtable::{LocalizationTable, TagContainer};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
