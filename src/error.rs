//! Error types for SEG-Y decoding and encoding.

use thiserror::Error;

use crate::header::FieldKind;
use crate::types::SampleFormat;

#[derive(Debug, Error)]
pub enum SegyError {
    #[error("short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("short write: field needs {expected} bytes, buffer has {actual}")]
    ShortWrite { expected: usize, actual: usize },

    #[error("truncated {region}: expected {expected} bytes, got {actual}")]
    TruncatedHeader {
        region: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("format error: {0}")]
    FormatError(String),

    #[error("unsupported sample format code: {0}")]
    UnsupportedFormat(i16),

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("trace index {index} out of range (trace count {count})")]
    OutOfRange { index: u64, count: u64 },

    #[error("sample count mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("sample {index} ({value}) is not representable as {format}")]
    UnrepresentableSample {
        index: usize,
        value: f32,
        format: SampleFormat,
    },

    #[error("unknown header field: {0}")]
    UnknownField(String),

    #[error("header field {field} holds {expected}, not {actual}")]
    FieldKindMismatch {
        field: &'static str,
        expected: FieldKind,
        actual: FieldKind,
    },

    #[error("create requires an empty stream, found {0} bytes")]
    StreamNotEmpty(u64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SegyError>;
