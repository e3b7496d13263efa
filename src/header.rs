//! Binary file header and trace header layouts.
//!
//! Each header is declared once with [`header_layout!`]: field name, byte
//! offset and integer type. The declaration generates the struct, a static
//! [`FieldSpec`] table for introspection, and the decode/encode pair, so the
//! codec and the table can never disagree.
//!
//! Bytes after the last declared field are kept verbatim in `reserved` and
//! written back unchanged.

use std::fmt;

use crate::codec::{self, BigEndian};
use crate::types::{BINARY_HEADER_BYTES, TRACE_HEADER_BYTES};
use crate::{Result, SegyError};

/// Width and signedness of a header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    I16,
    U16,
    I32,
    U32,
}

impl FieldKind {
    /// Size in bytes.
    pub fn width(self) -> usize {
        match self {
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 => 4,
        }
    }

    /// True for `I16` and `I32`.
    pub fn is_signed(self) -> bool {
        matches!(self, Self::I16 | Self::I32)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I16 => write!(f, "i16"),
            Self::U16 => write!(f, "u16"),
            Self::I32 => write!(f, "i32"),
            Self::U32 => write!(f, "u32"),
        }
    }
}

/// One row of a header layout table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Byte offset within the header (0-based).
    pub offset: usize,
    pub kind: FieldKind,
}

/// A typed header field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
}

impl FieldValue {
    /// The kind this value carries.
    pub fn kind(self) -> FieldKind {
        match self {
            Self::I16(_) => FieldKind::I16,
            Self::U16(_) => FieldKind::U16,
            Self::I32(_) => FieldKind::I32,
            Self::U32(_) => FieldKind::U32,
        }
    }

    /// Widen to `i64`, lossless for every kind.
    pub fn as_i64(self) -> i64 {
        match self {
            Self::I16(v) => v as i64,
            Self::U16(v) => v as i64,
            Self::I32(v) => v as i64,
            Self::U32(v) => v as i64,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}

/// Integer types that can appear as header fields.
pub trait HeaderInt: BigEndian {
    const KIND: FieldKind;

    fn into_value(self) -> FieldValue;

    fn from_value(value: FieldValue) -> Option<Self>;
}

macro_rules! impl_header_int {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl HeaderInt for $ty {
                const KIND: FieldKind = FieldKind::$variant;

                fn into_value(self) -> FieldValue {
                    FieldValue::$variant(self)
                }

                fn from_value(value: FieldValue) -> Option<Self> {
                    match value {
                        FieldValue::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_header_int!(i16 => I16, u16 => U16, i32 => I32, u32 => U32);

/// Declare a fixed-size header: struct, field table, codec and accessors.
macro_rules! header_layout {
    (
        $(#[$outer:meta])*
        pub struct $name:ident;
        region: $region:literal,
        len: $len:expr,
        reserved_from: $reserved:expr,
        table: $table:ident,
        fields {
            $( $(#[$doc:meta])* $field:ident: $ty:ty = $offset:expr, )*
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            $( $(#[$doc])* pub $field: $ty, )*
            /// Unassigned tail, preserved byte for byte.
            pub reserved: [u8; $len - $reserved],
        }

        #[doc = concat!("Field layout of [`", stringify!($name), "`], in offset order.")]
        pub const $table: &[FieldSpec] = &[
            $(
                FieldSpec {
                    name: stringify!($field),
                    offset: $offset,
                    kind: <$ty as HeaderInt>::KIND,
                },
            )*
        ];

        impl $name {
            /// Encoded length in bytes.
            pub const LEN: usize = $len;
            /// Offset where the reserved tail starts.
            pub const RESERVED_OFFSET: usize = $reserved;

            /// Decode from the first `LEN` bytes of `bytes`.
            pub fn decode(bytes: &[u8]) -> Result<Self> {
                if bytes.len() < $len {
                    return Err(SegyError::TruncatedHeader {
                        region: $region,
                        expected: $len,
                        actual: bytes.len(),
                    });
                }
                let mut reserved = [0u8; $len - $reserved];
                reserved.copy_from_slice(&bytes[$reserved..$len]);
                Ok(Self {
                    $( $field: codec::decode::<$ty>(bytes, $offset)?, )*
                    reserved,
                })
            }

            /// Encode to exactly `LEN` bytes.
            pub fn encode(&self) -> [u8; $len] {
                let mut buf = [0u8; $len];
                $(
                    self.$field
                        .write_be(&mut buf[$offset..$offset + <$ty as BigEndian>::WIDTH]);
                )*
                buf[$reserved..].copy_from_slice(&self.reserved);
                buf
            }

            /// Look up a field by name.
            pub fn get(&self, name: &str) -> Option<FieldValue> {
                match name {
                    $( stringify!($field) => Some(self.$field.into_value()), )*
                    _ => None,
                }
            }

            /// Set a field by name. The value must have the field's kind.
            pub fn set(&mut self, name: &str, value: FieldValue) -> Result<()> {
                match name {
                    $(
                        stringify!($field) => {
                            self.$field = <$ty as HeaderInt>::from_value(value).ok_or(
                                SegyError::FieldKindMismatch {
                                    field: stringify!($field),
                                    expected: <$ty as HeaderInt>::KIND,
                                    actual: value.kind(),
                                },
                            )?;
                            Ok(())
                        }
                    )*
                    _ => Err(SegyError::UnknownField(name.to_string())),
                }
            }

            /// All named fields with their current values, in offset order.
            pub fn fields(&self) -> Vec<(&'static str, FieldValue)> {
                vec![ $( (stringify!($field), self.$field.into_value()), )* ]
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $( $field: 0, )*
                    reserved: [0u8; $len - $reserved],
                }
            }
        }
    };
}

header_layout! {
    /// The 400-byte binary file header (file bytes 3200..3600).
    pub struct BinaryHeader;
    region: "binary header",
    len: BINARY_HEADER_BYTES,
    reserved_from: 60,
    table: BINARY_HEADER_FIELDS,
    fields {
        job_id: i32 = 0,
        line_number: i32 = 4,
        reel_number: i32 = 8,
        traces_per_ensemble: i16 = 12,
        aux_traces_per_ensemble: i16 = 14,
        sample_interval_us: u16 = 16,
        original_sample_interval_us: u16 = 18,
        /// Global sample count per trace. Must be non-zero to read traces.
        samples_per_trace: u16 = 20,
        original_samples_per_trace: u16 = 22,
        /// Selects the [`SampleFormat`](crate::SampleFormat) of every trace.
        sample_format_code: i16 = 24,
        ensemble_fold: i16 = 26,
        trace_sorting_code: i16 = 28,
        vertical_sum_code: i16 = 30,
        sweep_freq_start_hz: i16 = 32,
        sweep_freq_end_hz: i16 = 34,
        sweep_length_ms: i16 = 36,
        sweep_type: i16 = 38,
        sweep_channel: i16 = 40,
        sweep_taper_start_ms: i16 = 42,
        sweep_taper_end_ms: i16 = 44,
        taper_type: i16 = 46,
        correlated: i16 = 48,
        binary_gain_recovered: i16 = 50,
        amplitude_recovery_method: i16 = 52,
        measurement_system: i16 = 54,
        impulse_polarity: i16 = 56,
        vibratory_polarity: i16 = 58,
    }
}

header_layout! {
    /// The 240-byte header in front of every trace.
    pub struct TraceHeader;
    region: "trace header",
    len: TRACE_HEADER_BYTES,
    reserved_from: 232,
    table: TRACE_HEADER_FIELDS,
    fields {
        trace_sequence_line: i32 = 0,
        trace_sequence_file: i32 = 4,
        field_record: i32 = 8,
        field_trace: i32 = 12,
        energy_source_point: i32 = 16,
        ensemble: i32 = 20,
        ensemble_trace: i32 = 24,
        trace_identification_code: i16 = 28,
        vertical_summed_traces: i16 = 30,
        horizontal_stacked_traces: i16 = 32,
        data_use: i16 = 34,
        offset: i32 = 36,
        receiver_elevation: i32 = 40,
        source_surface_elevation: i32 = 44,
        source_depth: i32 = 48,
        receiver_datum_elevation: i32 = 52,
        source_datum_elevation: i32 = 56,
        source_water_depth: i32 = 60,
        receiver_water_depth: i32 = 64,
        elevation_scalar: i16 = 68,
        coordinate_scalar: i16 = 70,
        source_x: i32 = 72,
        source_y: i32 = 76,
        receiver_x: i32 = 80,
        receiver_y: i32 = 84,
        coordinate_units: i16 = 88,
        weathering_velocity: i16 = 90,
        subweathering_velocity: i16 = 92,
        source_uphole_time_ms: i16 = 94,
        receiver_uphole_time_ms: i16 = 96,
        source_static_ms: i16 = 98,
        receiver_static_ms: i16 = 100,
        total_static_ms: i16 = 102,
        lag_time_a_ms: i16 = 104,
        lag_time_b_ms: i16 = 106,
        delay_recording_time_ms: i16 = 108,
        mute_start_ms: i16 = 110,
        mute_end_ms: i16 = 112,
        /// Per-trace sample count; 0 means "use the binary header's".
        samples_in_trace: u16 = 114,
        sample_interval_us: u16 = 116,
        gain_type: i16 = 118,
        instrument_gain_constant: i16 = 120,
        instrument_initial_gain: i16 = 122,
        correlated: i16 = 124,
        sweep_freq_start_hz: i16 = 126,
        sweep_freq_end_hz: i16 = 128,
        sweep_length_ms: i16 = 130,
        sweep_type: i16 = 132,
        sweep_taper_start_ms: i16 = 134,
        sweep_taper_end_ms: i16 = 136,
        taper_type: i16 = 138,
        alias_filter_freq_hz: i16 = 140,
        alias_filter_slope: i16 = 142,
        notch_filter_freq_hz: i16 = 144,
        notch_filter_slope: i16 = 146,
        low_cut_freq_hz: i16 = 148,
        high_cut_freq_hz: i16 = 150,
        low_cut_slope: i16 = 152,
        high_cut_slope: i16 = 154,
        year: i16 = 156,
        day_of_year: i16 = 158,
        hour: i16 = 160,
        minute: i16 = 162,
        second: i16 = 164,
        time_basis_code: i16 = 166,
        trace_weighting_factor: i16 = 168,
        geophone_group_roll_pos1: i16 = 170,
        geophone_group_first_trace: i16 = 172,
        geophone_group_last_trace: i16 = 174,
        gap_size: i16 = 176,
        over_travel: i16 = 178,
        cdp_x: i32 = 180,
        cdp_y: i32 = 184,
        inline: i32 = 188,
        crossline: i32 = 192,
        shotpoint: i32 = 196,
        shotpoint_scalar: i16 = 200,
        trace_value_unit: i16 = 202,
        transduction_mantissa: i32 = 204,
        transduction_exponent: i16 = 208,
        transduction_unit: i16 = 210,
        device_id: i16 = 212,
        time_scalar: i16 = 214,
        source_type: i16 = 216,
        source_energy_direction_vertical: i16 = 218,
        source_energy_direction_crossline: i16 = 220,
        source_energy_direction_inline: i16 = 222,
        source_measurement_mantissa: i32 = 224,
        source_measurement_exponent: i16 = 228,
        source_measurement_unit: i16 = 230,
    }
}

impl BinaryHeader {
    /// A header for `samples_per_trace` samples of `format`, all else zero.
    pub fn new(samples_per_trace: u16, format: crate::SampleFormat) -> Self {
        Self {
            samples_per_trace,
            sample_format_code: format.to_code(),
            ..Self::default()
        }
    }
}
