//! Shader lookup tables.
//!
//! Curves baked for GPU sampling are stored as a flat float array rather than
//! an array of structs: `[R0, G0, B0, A0, R1, G1, ...]` for colors, triplets
//! for 3-vectors, and so on. A [`ShaderLut`] reads that flat array as
//! fixed-width tuples.

use std::fmt;
use std::io::Write;

use tabula_common::{BinaryReader, BinaryWriter};

use crate::projection::Projectable;
use crate::property::PropertyEntry;
use crate::values::{LinearColor, Vector2, Vector3};
use crate::window::{self, MAX_WIDTH};
use crate::Result;

/// A tuple type stored as `WIDTH` consecutive floats.
pub trait LutValue: Copy {
    /// Floats per value.
    const WIDTH: usize;

    /// Build from exactly `WIDTH` floats.
    fn from_window(window: &[f32]) -> Self;

    /// Write exactly `WIDTH` floats.
    fn write_window(&self, window: &mut [f32]);
}

/// Single-channel LUT sample (scale, opacity, speed...).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LutFloat(pub f32);

/// 2D LUT sample (UV offsets, 2D positions).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LutVector2(pub Vector2);

/// 3D LUT sample (RGB without alpha, positions, directions).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LutVector3(pub Vector3);

/// RGBA LUT sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LutColor(pub LinearColor);

impl LutValue for LutFloat {
    const WIDTH: usize = 1;

    fn from_window(window: &[f32]) -> Self {
        Self(window[0])
    }

    fn write_window(&self, window: &mut [f32]) {
        window[0] = self.0;
    }
}

impl LutValue for LutVector2 {
    const WIDTH: usize = 2;

    fn from_window(window: &[f32]) -> Self {
        Self(Vector2::new(window[0], window[1]))
    }

    fn write_window(&self, window: &mut [f32]) {
        window.copy_from_slice(&self.0.to_array());
    }
}

impl LutValue for LutVector3 {
    const WIDTH: usize = 3;

    fn from_window(window: &[f32]) -> Self {
        Self(Vector3::new(window[0], window[1], window[2]))
    }

    fn write_window(&self, window: &mut [f32]) {
        window.copy_from_slice(&self.0.to_array());
    }
}

impl LutValue for LutColor {
    const WIDTH: usize = 4;

    fn from_window(window: &[f32]) -> Self {
        Self(LinearColor::new(window[0], window[1], window[2], window[3]))
    }

    fn write_window(&self, window: &mut [f32]) {
        window.copy_from_slice(&self.0.to_array());
    }
}

impl fmt::Display for LutFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl fmt::Display for LutVector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for LutVector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for LutColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// In a property array, a LUT value spans WIDTH consecutive Float entries. A
// window containing anything else is skipped; on write, only Float entries
// are updated.
macro_rules! impl_lut_projectable {
    ($($ty:ty),* $(,)?) => {$(
        impl Projectable for $ty {
            const STRIDE: usize = <$ty as LutValue>::WIDTH;

            fn read_slot(slot: &[PropertyEntry]) -> Option<Self> {
                let mut buf = [0.0f32; MAX_WIDTH];
                for (dst, entry) in buf.iter_mut().zip(slot) {
                    *dst = entry.as_f32()?;
                }
                Some(Self::from_window(&buf[..Self::STRIDE]))
            }

            fn write_slot(&self, slot: &mut [PropertyEntry]) {
                let mut buf = [0.0f32; MAX_WIDTH];
                self.write_window(&mut buf[..Self::STRIDE]);
                for (entry, value) in slot.iter_mut().zip(buf) {
                    if let Some(v) = entry.as_f32_mut() {
                        *v = value;
                    }
                }
            }
        }
    )*};
}

impl_lut_projectable!(LutFloat, LutVector2, LutVector3, LutColor);

/// A shader lookup table of `T` tuples.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShaderLut<T> {
    values: Vec<T>,
}

impl<T> Default for ShaderLut<T> {
    fn default() -> Self {
        Self { values: Vec::new() }
    }
}

impl<T: LutValue> ShaderLut<T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from values.
    pub fn from_values(values: Vec<T>) -> Self {
        Self { values }
    }

    /// Window a flat float slice; orphaned trailing floats are dropped.
    pub fn from_flat(flat: &[f32]) -> Self {
        let values = window::project(flat, T::WIDTH, |w| Some(T::from_window(w)))
            .into_iter()
            .map(|(_, value)| value)
            .collect();
        Self { values }
    }

    /// Flatten into a new float vector of `float_count()` items.
    pub fn to_flat(&self) -> Vec<f32> {
        let mut flat = vec![0.0; self.float_count()];
        self.flatten_into(&mut flat);
        flat
    }

    /// Write values into an existing flat slice without resizing it.
    ///
    /// Returns the number of tuples written; a tuple that does not fit whole
    /// is not written at all.
    pub fn flatten_into(&self, dest: &mut [f32]) -> usize {
        window::write_back(dest, T::WIDTH, self.values.iter().enumerate(), T::write_window)
    }

    /// Read `float_count` floats and window them.
    ///
    /// Trailing floats that do not form a whole tuple are consumed and
    /// discarded.
    pub fn read(reader: &mut BinaryReader<'_>, float_count: usize) -> Result<Self> {
        let mut flat = Vec::with_capacity(float_count.min(reader.remaining() / 4));
        for _ in 0..float_count {
            flat.push(reader.read_f32()?);
        }
        let orphaned = window::orphaned(float_count, T::WIDTH);
        if orphaned > 0 {
            tracing::debug!(float_count, orphaned, width = T::WIDTH, "dropping orphaned LUT floats");
        }
        Ok(Self::from_flat(&flat))
    }

    /// Write `float_count()` floats.
    pub fn write<W: Write>(&self, writer: &mut BinaryWriter<W>) -> Result<()> {
        for value in self.to_flat() {
            writer.write_f32(value)?;
        }
        Ok(())
    }

    /// Number of floats in the serialized form.
    pub fn float_count(&self) -> usize {
        self.values.len() * T::WIDTH
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<T> {
        self.values.get(index).copied()
    }

    /// Replace the value at `index`. Returns `false` out of range.
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

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }
}
