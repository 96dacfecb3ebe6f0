//! Structs with a fixed binary layout. None of these carry nested property
//! framing: their bytes follow the struct metadata directly.

use serde::{Serialize, Serializer};
use tracing::instrument;

use crate::{ArchiveReader, Result};

/// 16 raw bytes, displayed as 32 lowercase hex digits in stream order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FGuid(pub [u8; 16]);

impl FGuid {
    #[instrument(name = "FGuid_read", skip_all)]
    pub(crate) fn read<A: ArchiveReader>(ar: &mut A) -> Result<FGuid> {
        let mut bytes = [0; 16];
        bytes.copy_from_slice(ar.read_bytes(16)?);
        Ok(Self(bytes))
    }
}
impl std::fmt::Display for FGuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for b in self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}
impl Serialize for FGuid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// f32 compared by bit pattern so that decoded NaNs still compare equal.
#[derive(Debug, Clone, Copy)]
pub struct Float(pub f32);
/// f64 compared by bit pattern so that decoded NaNs still compare equal.
#[derive(Debug, Clone, Copy)]
pub struct Double(pub f64);

impl PartialEq for Float {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}
impl PartialEq for Double {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}
impl std::fmt::Display for Float {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
impl std::fmt::Display for Double {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
impl From<f32> for Float {
    fn from(value: f32) -> Self {
        Self(value)
    }
}
impl From<Float> for f32 {
    fn from(val: Float) -> Self {
        val.0
    }
}
impl From<f64> for Double {
    fn from(value: f64) -> Self {
        Self(value)
    }
}
impl From<Double> for f64 {
    fn from(val: Double) -> Self {
        val.0
    }
}

// JSON has no representation for non-finite numbers
fn non_finite_name(negative: bool, nan: bool) -> &'static str {
    match (negative, nan) {
        (false, true) => "NaN",
        (true, true) => "-NaN",
        (false, false) => "Infinity",
        (true, false) => "-Infinity",
    }
}
impl Serialize for Float {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value = self.0;
        if value.is_finite() {
            serializer.serialize_f32(value)
        } else {
            serializer.serialize_str(non_finite_name(value.is_sign_negative(), value.is_nan()))
        }
    }
}
impl Serialize for Double {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value = self.0;
        if value.is_finite() {
            serializer.serialize_f64(value)
        } else {
            serializer.serialize_str(non_finite_name(value.is_sign_negative(), value.is_nan()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vector {
    pub x: Double,
    pub y: Double,
    pub z: Double,
}
impl Vector {
    #[instrument(name = "Vector_read", skip_all)]
    pub(crate) fn read<A: ArchiveReader>(ar: &mut A) -> Result<Self> {
        Ok(Self {
            x: ar.read_f64()?.into(),
            y: ar.read_f64()?.into(),
            z: ar.read_f64()?.into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vector2D {
    pub x: Double,
    pub y: Double,
}
impl Vector2D {
    #[instrument(name = "Vector2D_read", skip_all)]
    pub(crate) fn read<A: ArchiveReader>(ar: &mut A) -> Result<Self> {
        Ok(Self {
            x: ar.read_f64()?.into(),
            y: ar.read_f64()?.into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rotator {
    pub pitch: Double,
    pub yaw: Double,
    pub roll: Double,
}
impl Rotator {
    #[instrument(name = "Rotator_read", skip_all)]
    pub(crate) fn read<A: ArchiveReader>(ar: &mut A) -> Result<Self> {
        Ok(Self {
            pitch: ar.read_f64()?.into(),
            yaw: ar.read_f64()?.into(),
            roll: ar.read_f64()?.into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quat {
    pub x: Double,
    pub y: Double,
    pub z: Double,
    pub w: Double,
}
impl Quat {
    #[instrument(name = "Quat_read", skip_all)]
    pub(crate) fn read<A: ArchiveReader>(ar: &mut A) -> Result<Self> {
        Ok(Self {
            x: ar.read_f64()?.into(),
            y: ar.read_f64()?.into(),
            z: ar.read_f64()?.into(),
            w: ar.read_f64()?.into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearColor {
    pub r: Float,
    pub g: Float,
    pub b: Float,
    pub a: Float,
}
impl LinearColor {
    #[instrument(name = "LinearColor_read", skip_all)]
    pub(crate) fn read<A: ArchiveReader>(ar: &mut A) -> Result<Self> {
        Ok(Self {
            r: ar.read_f32()?.into(),
            g: ar.read_f32()?.into(),
            b: ar.read_f32()?.into(),
            a: ar.read_f32()?.into(),
        })
    }
}

/// 8-bit color stored blue, green, red, alpha.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Color {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}
impl Color {
    #[instrument(name = "Color_read", skip_all)]
    pub(crate) fn read<A: ArchiveReader>(ar: &mut A) -> Result<Self> {
        Ok(Self {
            b: ar.read_u8()?,
            g: ar.read_u8()?,
            r: ar.read_u8()?,
            a: ar.read_u8()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntPoint {
    pub x: i32,
    pub y: i32,
}
impl IntPoint {
    #[instrument(name = "IntPoint_read", skip_all)]
    pub(crate) fn read<A: ArchiveReader>(ar: &mut A) -> Result<Self> {
        Ok(Self {
            x: ar.read_i32()?,
            y: ar.read_i32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntVector {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}
impl IntVector {
    #[instrument(name = "IntVector_read", skip_all)]
    pub(crate) fn read<A: ArchiveReader>(ar: &mut A) -> Result<Self> {
        Ok(Self {
            x: ar.read_i32()?,
            y: ar.read_i32()?,
            z: ar.read_i32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Box {
    pub min: Vector,
    pub max: Vector,
    pub is_valid: u8,
}
impl Box {
    #[instrument(name = "Box_read", skip_all)]
    pub(crate) fn read<A: ArchiveReader>(ar: &mut A) -> Result<Self> {
        Ok(Self {
            min: Vector::read(ar)?,
            max: Vector::read(ar)?,
            is_valid: ar.read_u8()?,
        })
    }
}
