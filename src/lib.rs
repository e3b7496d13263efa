//! Pure Rust SEG-Y reader and writer.
//!
//! Handles the 3200-byte textual header (ASCII or EBCDIC), the 400-byte
//! binary header, and fixed- or variable-length trace records with every
//! standard sample format, including IBM System/360 hex floats.
//! All multi-byte values are big-endian.
//!
//! # Writing and reading a file
//!
//! ```
//! use std::io::Cursor;
//! use segy_rs::{BinaryHeader, SampleFormat, SegyContainer, Trace};
//!
//! let header = BinaryHeader::new(4, SampleFormat::IbmFloat32);
//! let mut segy = SegyContainer::create(Cursor::new(Vec::new()), header).unwrap();
//! for i in 0..3 {
//!     let trace = Trace::new(vec![i as f32, 0.5, -1.0, 101.0]).with_sequence(i + 1);
//!     segy.append_trace(&trace).unwrap();
//! }
//! let bytes = segy.close().unwrap().into_inner();
//!
//! let mut segy = SegyContainer::open(Cursor::new(bytes)).unwrap();
//! assert_eq!(segy.trace_count(), 3);
//! assert_eq!(segy.sample_count(), 4);
//!
//! let trace = segy.read_trace_at(2).unwrap();
//! assert_eq!(trace.header.trace_sequence_line, 3);
//! assert_eq!(trace.data, vec![2.0, 0.5, -1.0, 101.0]);
//! ```
//!
//! # Header introspection
//!
//! ```
//! use segy_rs::{FieldValue, TraceHeader, TRACE_HEADER_FIELDS};
//!
//! let mut header = TraceHeader::default();
//! header.set("inline", FieldValue::I32(1200)).unwrap();
//! assert_eq!(header.inline, 1200);
//! assert_eq!(header.get("inline"), Some(FieldValue::I32(1200)));
//!
//! let spec = TRACE_HEADER_FIELDS.iter().find(|f| f.name == "inline").unwrap();
//! assert_eq!(spec.offset, 188);
//! ```
//!
//! # IBM floats
//!
//! ```
//! use segy_rs::{f32_to_ibm, ibm_to_f32};
//!
//! assert_eq!(ibm_to_f32(0x4265_0000), 101.0);
//! assert_eq!(f32_to_ibm(-118.625), Some(0xC276_A000));
//! ```

pub mod codec;
pub mod container;
pub mod cursor;
pub mod diag;
pub mod ebcdic;
pub mod error;
pub mod geometry;
pub mod header;
pub mod ibm;
pub mod samples;
pub mod textual;
pub mod trace;
pub mod types;

pub use container::{ContainerOptions, SegyContainer, TraceSizing};
pub use cursor::{TraceCursor, Traces};
pub use diag::Diagnostics;
pub use error::{Result, SegyError};
pub use geometry::{TraceGeometry, TraceIndex};
pub use header::{
    BINARY_HEADER_FIELDS, BinaryHeader, FieldKind, FieldSpec, FieldValue, TRACE_HEADER_FIELDS,
    TraceHeader,
};
pub use textual::{TextEncoding, TextualHeader};
pub use trace::Trace;
pub use types::{
    BINARY_HEADER_BYTES, FIRST_TRACE_OFFSET, SampleFormat, TEXTUAL_HEADER_BYTES,
    TRACE_HEADER_BYTES,
};

pub use codec::IbmFloat;
pub use ibm::{f32_to_ibm, ibm_to_f32};
pub use samples::{decode_samples, encode_samples};
