//! Rich curve records.
//!
//! Curves are the authoring-side source a shader LUT is baked from. They are
//! plain fixed-layout records; nothing here evaluates them.

use std::io::Write;

use tabula_common::{BinaryReader, BinaryWriter};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::Result;

/// One curve key (28 bytes on disk).
#[derive(Debug, Clone, Copy, PartialEq, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct RichCurveKey {
    /// Interpolation mode.
    pub interp_mode: u8,
    /// Tangent mode.
    pub tangent_mode: u8,
    /// Tangent weight mode.
    pub tangent_weight_mode: u8,
    /// Padding; always written as zero.
    pub _padding: u8,
    pub time: f32,
    pub value: f32,
    pub arrive_tangent: f32,
    pub arrive_tangent_weight: f32,
    pub leave_tangent: f32,
    pub leave_tangent_weight: f32,
}

impl RichCurveKey {
    /// Serialized size in bytes.
    pub const SIZE: usize = 28;

    /// Read one key.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(reader.read_struct::<Self>()?)
    }

    /// Write one key with zeroed padding.
    pub fn write<W: Write>(&self, writer: &mut BinaryWriter<W>) -> Result<()> {
        let key = Self {
            _padding: 0,
            ..*self
        };
        Ok(writer.write_struct(&key)?)
    }
}

const _: () = assert!(std::mem::size_of::<RichCurveKey>() == RichCurveKey::SIZE);

/// A curve: default value, extrapolation modes and keys.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RichCurve {
    pub default_value: f32,
    pub pre_infinity_extrap: u8,
    pub post_infinity_extrap: u8,
    pub keys: Vec<RichCurveKey>,
}

impl RichCurve {
    /// Read a curve.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let default_value = reader.read_f32()?;
        let pre_infinity_extrap = reader.read_u8()?;
        let post_infinity_extrap = reader.read_u8()?;
        reader.read_bytes(2)?; // padding

        let key_count = reader.read_count("curve key", RichCurveKey::SIZE)?;
        let keys = (0..key_count)
            .map(|_| RichCurveKey::read(reader))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            default_value,
            pre_infinity_extrap,
            post_infinity_extrap,
            keys,
        })
    }

    /// Write a curve with zeroed padding.
    pub fn write<W: Write>(&self, writer: &mut BinaryWriter<W>) -> Result<()> {
        writer.write_f32(self.default_value)?;
        writer.write_u8(self.pre_infinity_extrap)?;
        writer.write_u8(self.post_infinity_extrap)?;
        writer.write_bytes(&[0, 0])?;
        writer.write_count("curve key", self.keys.len())?;
        for key in &self.keys {
            key.write(writer)?;
        }
        Ok(())
    }

    /// Serialized size in bytes.
    pub fn serialized_size(&self) -> usize {
        12 + self.keys.len() * RichCurveKey::SIZE
    }
}
