//! A single seismic trace: header plus samples.

use std::fmt;

use crate::header::TraceHeader;

/// One trace, decoded fresh on every read.
///
/// Samples are `f32` whatever the file's sample format; the container
/// converts on read and write.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub header: TraceHeader,
    pub data: Vec<f32>,
}

impl Trace {
    /// A trace with a default header whose `samples_in_trace` matches `data`.
    ///
    /// Counts above `u16::MAX` leave `samples_in_trace` at 0; such a trace
    /// can only be appended where the file's sample count agrees.
    pub fn new(data: Vec<f32>) -> Self {
        let header = TraceHeader {
            samples_in_trace: u16::try_from(data.len()).unwrap_or(0),
            ..TraceHeader::default()
        };
        Self { header, data }
    }

    /// Replace the header.
    pub fn with_header(mut self, header: TraceHeader) -> Self {
        self.header = header;
        self
    }

    /// Set the trace sequence numbers (line and file).
    pub fn with_sequence(mut self, sequence: i32) -> Self {
        self.header.trace_sequence_line = sequence;
        self.header.trace_sequence_file = sequence;
        self
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the trace has no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "trace {} | inline {} crossline {} | {} samples @ {} us",
            self.header.trace_sequence_file,
            self.header.inline,
            self.header.crossline,
            self.data.len(),
            self.header.sample_interval_us,
        )
    }
}
