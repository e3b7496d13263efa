//! Fixed-width big-endian field codec.
//!
//! Every multi-byte value in a SEG-Y file is big-endian regardless of the
//! host. [`decode`] and [`encode`] read and write one field at a byte offset
//! and fail instead of zero-filling or growing the buffer when the field
//! does not fit.

use crate::ibm;
use crate::{Result, SegyError};

/// A value with a fixed big-endian wire representation.
pub trait BigEndian: Sized + Copy {
    /// Width of the field in bytes.
    const WIDTH: usize;

    /// Read from a slice of exactly `WIDTH` bytes.
    fn read_be(bytes: &[u8]) -> Self;

    /// Write into a slice of exactly `WIDTH` bytes.
    fn write_be(self, out: &mut [u8]);
}

macro_rules! impl_big_endian {
    ($($ty:ty),* $(,)?) => {
        $(
            impl BigEndian for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                fn read_be(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_be_bytes(raw)
                }

                fn write_be(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_be_bytes());
                }
            }
        )*
    };
}

impl_big_endian!(i8, u8, i16, u16, i32, u32, i64, u64, f32, f64);

/// Signed 24-bit integer (sample format 7), held in an `i32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Int24(pub i32);

impl BigEndian for Int24 {
    const WIDTH: usize = 3;

    fn read_be(bytes: &[u8]) -> Self {
        let raw = i32::from_be_bytes([bytes[0], bytes[1], bytes[2], 0]);
        // Arithmetic shift sign-extends bit 23.
        Int24(raw >> 8)
    }

    fn write_be(self, out: &mut [u8]) {
        let raw = self.0.to_be_bytes();
        out.copy_from_slice(&raw[1..4]);
    }
}

/// Unsigned 24-bit integer (sample format 15), held in a `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UInt24(pub u32);

impl BigEndian for UInt24 {
    const WIDTH: usize = 3;

    fn read_be(bytes: &[u8]) -> Self {
        UInt24(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
    }

    fn write_be(self, out: &mut [u8]) {
        let raw = self.0.to_be_bytes();
        out.copy_from_slice(&raw[1..4]);
    }
}

/// A raw IBM hexadecimal float word (sample format 1).
///
/// Holds the wire bits so that decoding and re-encoding is lossless; use
/// [`IbmFloat::to_f32`] and [`IbmFloat::from_f32`] to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IbmFloat(pub u32);

impl IbmFloat {
    /// Encode an `f32`. Returns `None` for NaN and infinities.
    pub fn from_f32(value: f32) -> Option<Self> {
        ibm::f32_to_ibm(value).map(IbmFloat)
    }

    /// Decode to the nearest `f32`.
    pub fn to_f32(self) -> f32 {
        ibm::ibm_to_f32(self.0)
    }
}

impl BigEndian for IbmFloat {
    const WIDTH: usize = 4;

    fn read_be(bytes: &[u8]) -> Self {
        IbmFloat(u32::read_be(bytes))
    }

    fn write_be(self, out: &mut [u8]) {
        self.0.write_be(out);
    }
}

/// Decode a big-endian `T` at `offset`.
///
/// Fails with [`SegyError::ShortRead`] if fewer than `T::WIDTH` bytes remain.
pub fn decode<T: BigEndian>(buf: &[u8], offset: usize) -> Result<T> {
    let end = field_end(offset, T::WIDTH, buf.len()).ok_or(SegyError::ShortRead {
        expected: T::WIDTH,
        actual: buf.len().saturating_sub(offset),
    })?;
    Ok(T::read_be(&buf[offset..end]))
}

/// Encode `value` big-endian at `offset`.
///
/// Fails with [`SegyError::ShortWrite`] if the buffer cannot hold the field.
pub fn encode<T: BigEndian>(value: T, buf: &mut [u8], offset: usize) -> Result<()> {
    let end = field_end(offset, T::WIDTH, buf.len()).ok_or(SegyError::ShortWrite {
        expected: T::WIDTH,
        actual: buf.len().saturating_sub(offset),
    })?;
    value.write_be(&mut buf[offset..end]);
    Ok(())
}

fn field_end(offset: usize, width: usize, len: usize) -> Option<usize> {
    offset.checked_add(width).filter(|&end| end <= len)
}
