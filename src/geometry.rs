//! Trace geometry: record size and trace count derived from file length.
//!
//! SEG-Y stores no trace count. It follows from the file length once the
//! record size is known:
//!
//! ```text
//! record_bytes = 240 + samples_per_trace * sample_width
//! trace_count  = (file_len - 3600) / record_bytes
//! ```
//!
//! Nothing here performs I/O. [`TraceIndex::scan`] walks variable-length
//! records through a caller-supplied header reader.

use crate::types::{FIRST_TRACE_OFFSET, SampleFormat, TRACE_HEADER_BYTES};
use crate::{Result, SegyError};

/// Fixed-size trace layout shared by every trace in a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceGeometry {
    pub samples_per_trace: usize,
    pub format: SampleFormat,
    pub record_bytes: u64,
    pub trace_count: u64,
}

impl TraceGeometry {
    /// Derive the layout of a file `file_len` bytes long.
    ///
    /// A remainder after dividing the trace area by the record size is an
    /// error: it means a truncated last trace or a mismatched header.
    pub fn derive(file_len: u64, samples_per_trace: u16, format: SampleFormat) -> Result<Self> {
        let record_bytes = record_bytes(samples_per_trace, format)?;
        let trace_area = file_len.checked_sub(FIRST_TRACE_OFFSET).ok_or_else(|| {
            SegyError::InvalidGeometry(format!(
                "file is {file_len} bytes, shorter than the {FIRST_TRACE_OFFSET}-byte file headers"
            ))
        })?;

        let remainder = trace_area % record_bytes;
        if remainder != 0 {
            return Err(SegyError::InvalidGeometry(format!(
                "{trace_area} trace bytes is not a multiple of the {record_bytes}-byte record \
                 ({remainder} bytes left over)"
            )));
        }

        Ok(Self {
            samples_per_trace: samples_per_trace as usize,
            format,
            record_bytes,
            trace_count: trace_area / record_bytes,
        })
    }

    /// Geometry of a freshly created file with no traces.
    pub fn empty(samples_per_trace: u16, format: SampleFormat) -> Result<Self> {
        Self::derive(FIRST_TRACE_OFFSET, samples_per_trace, format)
    }

    /// File offset of trace `index`. Does not check the range.
    pub fn trace_offset(&self, index: u64) -> u64 {
        FIRST_TRACE_OFFSET + index * self.record_bytes
    }

    /// File length implied by the current trace count.
    pub fn data_end(&self) -> u64 {
        self.trace_offset(self.trace_count)
    }
}

/// Record size of one trace with `samples` samples of `format`.
///
/// A zero sample count leaves the geometry undefined and is rejected.
pub fn record_bytes(samples: u16, format: SampleFormat) -> Result<u64> {
    if samples == 0 {
        return Err(SegyError::FormatError(
            "samples per trace is 0; trace geometry is undefined".into(),
        ));
    }
    Ok(TRACE_HEADER_BYTES as u64 + samples as u64 * format.sample_width() as u64)
}

/// Offsets and sample counts of traces whose sizes vary per trace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceIndex {
    offsets: Vec<u64>,
    sample_counts: Vec<usize>,
    end: u64,
}

impl TraceIndex {
    /// An index with no traces, ending at the first trace offset.
    pub fn new() -> Self {
        Self {
            offsets: Vec::new(),
            sample_counts: Vec::new(),
            end: FIRST_TRACE_OFFSET,
        }
    }

    /// Walk records from offset 3600 to `file_len`.
    ///
    /// `samples_at(offset)` returns the `samples_in_trace` field of the trace
    /// header at `offset`; a value of 0 falls back to `default_samples`.
    /// A record running past `file_len` is an [`SegyError::InvalidGeometry`].
    pub fn scan<F>(
        file_len: u64,
        default_samples: u16,
        format: SampleFormat,
        mut samples_at: F,
    ) -> Result<Self>
    where
        F: FnMut(u64) -> Result<u16>,
    {
        if file_len < FIRST_TRACE_OFFSET {
            return Err(SegyError::InvalidGeometry(format!(
                "file is {file_len} bytes, shorter than the {FIRST_TRACE_OFFSET}-byte file headers"
            )));
        }

        let mut index = Self::new();
        while index.end < file_len {
            let remaining = file_len - index.end;
            if remaining < TRACE_HEADER_BYTES as u64 {
                return Err(SegyError::InvalidGeometry(format!(
                    "{remaining} bytes after trace {} cannot hold a trace header",
                    index.len()
                )));
            }
            let declared = samples_at(index.end)?;
            let samples = if declared == 0 { default_samples } else { declared };
            let record = record_bytes(samples, format)?;
            if record > remaining {
                return Err(SegyError::InvalidGeometry(format!(
                    "trace {} needs {record} bytes, only {remaining} remain",
                    index.len()
                )));
            }
            index.push(samples as usize, record);
        }
        Ok(index)
    }

    /// Record a trace of `samples` samples occupying `record_bytes` bytes.
    pub fn push(&mut self, samples: usize, record_bytes: u64) {
        self.offsets.push(self.end);
        self.sample_counts.push(samples);
        self.end += record_bytes;
    }

    /// Number of indexed traces.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// True when no trace has been indexed.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// `(offset, sample_count)` of trace `index`.
    pub fn get(&self, index: usize) -> Option<(u64, usize)> {
        Some((*self.offsets.get(index)?, *self.sample_counts.get(index)?))
    }

    /// Offset one past the last record.
    pub fn end(&self) -> u64 {
        self.end
    }
}
