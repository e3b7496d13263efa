//! Bulk sample decoding and encoding for every supported format code.
//!
//! Samples are exposed as `f32` regardless of the on-disk representation.
//! Integer formats are range-checked on encode; values that do not fit are
//! reported, not clamped.

use crate::codec::{self, BigEndian, IbmFloat, Int24, UInt24};
use crate::types::SampleFormat;
use crate::{Result, SegyError};

/// Decode `count` samples of `format` from the start of `data`.
///
/// A `count` whose byte length does not fit in `usize` is a short read.
pub fn decode_samples(data: &[u8], format: SampleFormat, count: usize) -> Result<Vec<f32>> {
    let needed = count
        .checked_mul(format.sample_width())
        .filter(|&needed| needed <= data.len())
        .ok_or(SegyError::ShortRead {
            expected: count.saturating_mul(format.sample_width()),
            actual: data.len(),
        })?;
    let data = &data[..needed];

    match format {
        SampleFormat::IbmFloat32 => decode_with(data, count, |w: IbmFloat| w.to_f32()),
        SampleFormat::Int32 => decode_with(data, count, |v: i32| v as f32),
        SampleFormat::Int16 => decode_with(data, count, |v: i16| v as f32),
        SampleFormat::FixedPointGain => decode_with(data, count, fixed_point_to_f32),
        SampleFormat::IeeeFloat32 => decode_with(data, count, |v: f32| v),
        SampleFormat::IeeeFloat64 => decode_with(data, count, |v: f64| v as f32),
        SampleFormat::Int24 => decode_with(data, count, |v: Int24| v.0 as f32),
        SampleFormat::Int8 => decode_with(data, count, |v: i8| v as f32),
        SampleFormat::Int64 => decode_with(data, count, |v: i64| v as f32),
        SampleFormat::UInt32 => decode_with(data, count, |v: u32| v as f32),
        SampleFormat::UInt16 => decode_with(data, count, |v: u16| v as f32),
        SampleFormat::UInt64 => decode_with(data, count, |v: u64| v as f32),
        SampleFormat::UInt24 => decode_with(data, count, |v: UInt24| v.0 as f32),
        SampleFormat::UInt8 => decode_with(data, count, |v: u8| v as f32),
    }
}

/// Encode `samples` as `format`, appending to `out`.
///
/// On error `out` is left as it was.
pub fn encode_samples(samples: &[f32], format: SampleFormat, out: &mut Vec<u8>) -> Result<()> {
    let start = out.len();
    out.resize(start + samples.len() * format.sample_width(), 0);
    let result = encode_into(samples, format, &mut out[start..]);
    if result.is_err() {
        out.truncate(start);
    }
    result
}

fn encode_into(samples: &[f32], format: SampleFormat, buf: &mut [u8]) -> Result<()> {
    for (index, &value) in samples.iter().enumerate() {
        let unrepresentable = || SegyError::UnrepresentableSample {
            index,
            value,
            format,
        };
        let offset = index * format.sample_width();
        match format {
            SampleFormat::IbmFloat32 => {
                let word = IbmFloat::from_f32(value).ok_or_else(unrepresentable)?;
                codec::encode(word, buf, offset)?;
            }
            SampleFormat::IeeeFloat32 => codec::encode(value, buf, offset)?,
            SampleFormat::IeeeFloat64 => codec::encode(value as f64, buf, offset)?,
            SampleFormat::FixedPointGain => {
                let word = f32_to_fixed_point(value).ok_or_else(unrepresentable)?;
                codec::encode(word, buf, offset)?;
            }
            SampleFormat::Int8 => {
                let v = round_in_range(value, -128.0, 128.0).ok_or_else(unrepresentable)?;
                codec::encode(v as i8, buf, offset)?;
            }
            SampleFormat::UInt8 => {
                let v = round_in_range(value, 0.0, 256.0).ok_or_else(unrepresentable)?;
                codec::encode(v as u8, buf, offset)?;
            }
            SampleFormat::Int16 => {
                let v = round_in_range(value, -32_768.0, 32_768.0).ok_or_else(unrepresentable)?;
                codec::encode(v as i16, buf, offset)?;
            }
            SampleFormat::UInt16 => {
                let v = round_in_range(value, 0.0, 65_536.0).ok_or_else(unrepresentable)?;
                codec::encode(v as u16, buf, offset)?;
            }
            SampleFormat::Int24 => {
                let v = round_in_range(value, -8_388_608.0, 8_388_608.0)
                    .ok_or_else(unrepresentable)?;
                codec::encode(Int24(v as i32), buf, offset)?;
            }
            SampleFormat::UInt24 => {
                let v = round_in_range(value, 0.0, 16_777_216.0).ok_or_else(unrepresentable)?;
                codec::encode(UInt24(v as u32), buf, offset)?;
            }
            SampleFormat::Int32 => {
                let v = round_in_range(value, -2_147_483_648.0, 2_147_483_648.0)
                    .ok_or_else(unrepresentable)?;
                codec::encode(v as i32, buf, offset)?;
            }
            SampleFormat::UInt32 => {
                let v = round_in_range(value, 0.0, 4_294_967_296.0).ok_or_else(unrepresentable)?;
                codec::encode(v as u32, buf, offset)?;
            }
            SampleFormat::Int64 => {
                let v = round_in_range(value, -(2f64.powi(63)), 2f64.powi(63))
                    .ok_or_else(unrepresentable)?;
                codec::encode(v as i64, buf, offset)?;
            }
            SampleFormat::UInt64 => {
                let v = round_in_range(value, 0.0, 2f64.powi(64)).ok_or_else(unrepresentable)?;
                codec::encode(v as u64, buf, offset)?;
            }
        }
    }
    Ok(())
}

fn decode_with<T: BigEndian>(
    data: &[u8],
    count: usize,
    convert: impl Fn(T) -> f32,
) -> Result<Vec<f32>> {
    let mut samples = Vec::with_capacity(count);
    for i in 0..count {
        samples.push(convert(codec::decode::<T>(data, i * T::WIDTH)?));
    }
    Ok(samples)
}

/// Round to nearest and check `lo <= v < hi`. NaN and infinities fail.
fn round_in_range(value: f32, lo: f64, hi: f64) -> Option<f64> {
    let rounded = (value as f64).round();
    (rounded >= lo && rounded < hi).then_some(rounded)
}

/// Format 4: byte 0 zero, byte 1 gain exponent, bytes 2-3 signed mantissa.
/// The value is `mantissa * 2^-gain`.
fn fixed_point_to_f32(word: u32) -> f32 {
    let gain = ((word >> 16) & 0xFF) as i32;
    let mantissa = (word & 0xFFFF) as u16 as i16;
    (mantissa as f64 * 2f64.powi(-gain)) as f32
}

/// Pick the largest gain that still fits the mantissa in 16 bits.
fn f32_to_fixed_point(value: f32) -> Option<u32> {
    if !value.is_finite() {
        return None;
    }
    (0..=255i32).rev().find_map(|gain| {
        let scaled = (value as f64 * 2f64.powi(gain)).round();
        if (-32_768.0..32_768.0).contains(&scaled) {
            let mantissa = scaled as i16 as u16 as u32;
            Some(((gain as u32) << 16) | mantissa)
        } else {
            None
        }
    })
}
