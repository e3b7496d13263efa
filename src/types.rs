//! Shared types: [`SampleFormat`] and the fixed region sizes of a SEG-Y file.

use std::fmt;

use crate::{Result, SegyError};

/// Length of the textual (card image) header.
pub const TEXTUAL_HEADER_BYTES: usize = 3200;
/// Length of the binary file header.
pub const BINARY_HEADER_BYTES: usize = 400;
/// Length of every trace header.
pub const TRACE_HEADER_BYTES: usize = 240;
/// Offset of the first trace.
pub const FIRST_TRACE_OFFSET: u64 = (TEXTUAL_HEADER_BYTES + BINARY_HEADER_BYTES) as u64;

/// Numeric representation of trace samples, selected by the binary
/// header's sample format code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleFormat {
    /// 4-byte IBM hexadecimal float (code 1).
    IbmFloat32,
    /// 4-byte two's complement integer (code 2).
    Int32,
    /// 2-byte two's complement integer (code 3).
    Int16,
    /// 4-byte fixed point with gain, obsolete (code 4).
    FixedPointGain,
    /// 4-byte IEEE float (code 5).
    IeeeFloat32,
    /// 8-byte IEEE double (code 6).
    IeeeFloat64,
    /// 3-byte two's complement integer (code 7).
    Int24,
    /// 1-byte two's complement integer (code 8).
    Int8,
    /// 8-byte two's complement integer (code 9).
    Int64,
    /// 4-byte unsigned integer (code 10).
    UInt32,
    /// 2-byte unsigned integer (code 11).
    UInt16,
    /// 8-byte unsigned integer (code 12).
    UInt64,
    /// 3-byte unsigned integer (code 15).
    UInt24,
    /// 1-byte unsigned integer (code 16).
    UInt8,
}

impl SampleFormat {
    /// Convert a raw sample format code from the binary header.
    pub fn from_code(code: i16) -> Result<Self> {
        match code {
            1 => Ok(Self::IbmFloat32),
            2 => Ok(Self::Int32),
            3 => Ok(Self::Int16),
            4 => Ok(Self::FixedPointGain),
            5 => Ok(Self::IeeeFloat32),
            6 => Ok(Self::IeeeFloat64),
            7 => Ok(Self::Int24),
            8 => Ok(Self::Int8),
            9 => Ok(Self::Int64),
            10 => Ok(Self::UInt32),
            11 => Ok(Self::UInt16),
            12 => Ok(Self::UInt64),
            15 => Ok(Self::UInt24),
            16 => Ok(Self::UInt8),
            _ => Err(SegyError::UnsupportedFormat(code)),
        }
    }

    /// Convert to the raw code stored in the binary header.
    pub fn to_code(self) -> i16 {
        match self {
            Self::IbmFloat32 => 1,
            Self::Int32 => 2,
            Self::Int16 => 3,
            Self::FixedPointGain => 4,
            Self::IeeeFloat32 => 5,
            Self::IeeeFloat64 => 6,
            Self::Int24 => 7,
            Self::Int8 => 8,
            Self::Int64 => 9,
            Self::UInt32 => 10,
            Self::UInt16 => 11,
            Self::UInt64 => 12,
            Self::UInt24 => 15,
            Self::UInt8 => 16,
        }
    }

    /// Bytes per sample on disk.
    pub fn sample_width(self) -> usize {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int24 | Self::UInt24 => 3,
            Self::IbmFloat32
            | Self::Int32
            | Self::FixedPointGain
            | Self::IeeeFloat32
            | Self::UInt32 => 4,
            Self::IeeeFloat64 | Self::Int64 | Self::UInt64 => 8,
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::IbmFloat32 => "IBM FLOAT32",
            Self::Int32 => "INT32",
            Self::Int16 => "INT16",
            Self::FixedPointGain => "FIXED-POINT w/ GAIN",
            Self::IeeeFloat32 => "IEEE FLOAT32",
            Self::IeeeFloat64 => "IEEE FLOAT64",
            Self::Int24 => "INT24",
            Self::Int8 => "INT8",
            Self::Int64 => "INT64",
            Self::UInt32 => "UINT32",
            Self::UInt16 => "UINT16",
            Self::UInt64 => "UINT64",
            Self::UInt24 => "UINT24",
            Self::UInt8 => "UINT8",
        };
        write!(f, "{name} (code {})", self.to_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for code in -2..20 {
            match SampleFormat::from_code(code) {
                Ok(format) => assert_eq!(format.to_code(), code),
                Err(SegyError::UnsupportedFormat(c)) => assert_eq!(c, code),
                Err(e) => panic!("unexpected error {e}"),
            }
        }
    }

    #[test]
    fn test_widths() {
        assert_eq!(SampleFormat::from_code(1).unwrap().sample_width(), 4);
        assert_eq!(SampleFormat::from_code(2).unwrap().sample_width(), 4);
        assert_eq!(SampleFormat::from_code(3).unwrap().sample_width(), 2);
        assert_eq!(SampleFormat::from_code(5).unwrap().sample_width(), 4);
        assert_eq!(SampleFormat::from_code(6).unwrap().sample_width(), 8);
        assert_eq!(SampleFormat::from_code(7).unwrap().sample_width(), 3);
        assert_eq!(SampleFormat::from_code(8).unwrap().sample_width(), 1);
    }

    #[test]
    fn test_unassigned_codes_rejected() {
        for code in [0, 13, 14, 17, -1] {
            assert!(matches!(
                SampleFormat::from_code(code),
                Err(SegyError::UnsupportedFormat(c)) if c == code
            ));
        }
    }

    #[test]
    fn test_region_sizes() {
        assert_eq!(FIRST_TRACE_OFFSET, 3600);
    }
}
