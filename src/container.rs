//! [`SegyContainer`]: a SEG-Y file bound to a seekable byte stream.
//!
//! Opening reads the textual and binary headers and derives the trace
//! layout once. Every trace read seeks, reads and decodes one record; nothing
//! is cached. Appends encode a whole record before touching the stream, so a
//! rejected trace never leaves a partial record behind.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use segy_rs::{BinaryHeader, SampleFormat, SegyContainer, Trace};
//!
//! let header = BinaryHeader::new(3, SampleFormat::IbmFloat32);
//! let mut segy = SegyContainer::create(Cursor::new(Vec::new()), header).unwrap();
//! segy.append_trace(&Trace::new(vec![1.0, 2.0, 3.0])).unwrap();
//!
//! let bytes = segy.close().unwrap().into_inner();
//! assert_eq!(bytes.len(), 3600 + 240 + 3 * 4);
//!
//! let mut segy = SegyContainer::open(Cursor::new(bytes)).unwrap();
//! assert_eq!(segy.trace_count(), 1);
//! assert_eq!(segy.read_trace_at(0).unwrap().data, vec![1.0, 2.0, 3.0]);
//! ```

use std::fmt;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::LevelFilter;

use crate::cursor::{TraceCursor, Traces};
use crate::diag::Diagnostics;
use crate::geometry::{self, TraceGeometry, TraceIndex};
use crate::header::{BinaryHeader, TraceHeader};
use crate::samples;
use crate::textual::TextualHeader;
use crate::trace::Trace;
use crate::types::{
    BINARY_HEADER_BYTES, FIRST_TRACE_OFFSET, SampleFormat, TEXTUAL_HEADER_BYTES,
    TRACE_HEADER_BYTES,
};
use crate::{Result, SegyError};

/// How trace record sizes are determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceSizing {
    /// Every trace has the binary header's sample count. The trace count is
    /// derived from the file length without reading any trace.
    #[default]
    Global,
    /// Each trace header's `samples_in_trace` sizes its own record (0 means
    /// the binary header's count). Opening walks every trace header once.
    PerTrace,
}

/// Options for [`SegyContainer::open_with`] and [`SegyContainer::create_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainerOptions {
    pub sizing: TraceSizing,
    pub diagnostics: Diagnostics,
}

impl ContainerOptions {
    /// Global sizing, warnings only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log verbosity for this container only.
    pub fn with_verbosity(mut self, verbosity: LevelFilter) -> Self {
        self.diagnostics = Diagnostics::new(verbosity);
        self
    }

    /// Choose how trace record sizes are determined.
    pub fn with_trace_sizing(mut self, sizing: TraceSizing) -> Self {
        self.sizing = sizing;
        self
    }
}

#[derive(Debug)]
enum Layout {
    Uniform(TraceGeometry),
    Indexed(TraceIndex),
}

/// A SEG-Y file: headers plus trace access over an owned stream.
///
/// The stream is released when the container is dropped, or handed back by
/// [`close`](Self::close) / [`into_inner`](Self::into_inner).
pub struct SegyContainer<S> {
    stream: S,
    textual: TextualHeader,
    binary: BinaryHeader,
    format: SampleFormat,
    layout: Layout,
    diag: Diagnostics,
}

impl<S> SegyContainer<S> {
    /// Number of traces, from the geometry derived at open/create.
    pub fn trace_count(&self) -> u64 {
        match &self.layout {
            Layout::Uniform(g) => g.trace_count,
            Layout::Indexed(index) => index.len() as u64,
        }
    }

    /// The binary header's global sample count per trace.
    pub fn sample_count(&self) -> usize {
        self.binary.samples_per_trace as usize
    }

    /// Sample format named by the binary header.
    pub fn sample_format(&self) -> SampleFormat {
        self.format
    }

    /// Bytes per trace record, when every trace has the same size.
    pub fn trace_record_bytes(&self) -> Option<u64> {
        match &self.layout {
            Layout::Uniform(g) => Some(g.record_bytes),
            Layout::Indexed(_) => None,
        }
    }

    /// The binary header as read or written.
    pub fn binary_header(&self) -> &BinaryHeader {
        &self.binary
    }

    /// The textual header, byte for byte.
    pub fn textual_header(&self) -> &TextualHeader {
        &self.textual
    }

    /// Verbosity this container logs at.
    pub fn diagnostics(&self) -> Diagnostics {
        self.diag
    }

    /// A cursor positioned at the first trace.
    pub fn cursor(&self) -> TraceCursor {
        TraceCursor::new()
    }

    /// Release the container and return the stream without flushing.
    pub fn into_inner(self) -> S {
        self.stream
    }

    /// `(offset, sample_count)` of trace `index`.
    fn locate(&self, index: u64) -> Result<(u64, usize)> {
        let count = self.trace_count();
        if index >= count {
            return Err(SegyError::OutOfRange { index, count });
        }
        match &self.layout {
            Layout::Uniform(g) => Ok((g.trace_offset(index), g.samples_per_trace)),
            Layout::Indexed(trace_index) => usize::try_from(index)
                .ok()
                .and_then(|i| trace_index.get(i))
                .ok_or(SegyError::OutOfRange { index, count }),
        }
    }

    /// Offset one past the last trace record.
    fn data_end(&self) -> u64 {
        match &self.layout {
            Layout::Uniform(g) => g.data_end(),
            Layout::Indexed(index) => index.end(),
        }
    }
}

impl<S: Read + Seek> SegyContainer<S> {
    /// Open an existing file with default options.
    pub fn open(stream: S) -> Result<Self> {
        Self::open_with(stream, &ContainerOptions::default())
    }

    /// Read both file headers, derive the trace layout and position the
    /// stream at the first trace.
    pub fn open_with(mut stream: S, options: &ContainerOptions) -> Result<Self> {
        let diag = options.diagnostics;
        let file_len = stream.seek(SeekFrom::End(0))?;
        stream.seek(SeekFrom::Start(0))?;

        let mut textual_buf = vec![0u8; TEXTUAL_HEADER_BYTES];
        let got = read_full(&mut stream, &mut textual_buf)?;
        let textual = TextualHeader::from_bytes(&textual_buf[..got])?;

        let mut binary_buf = [0u8; BINARY_HEADER_BYTES];
        let got = read_full(&mut stream, &mut binary_buf)?;
        let binary = BinaryHeader::decode(&binary_buf[..got])?;
        let format = validate_binary_header(&binary)?;

        let layout = match options.sizing {
            TraceSizing::Global => Layout::Uniform(TraceGeometry::derive(
                file_len,
                binary.samples_per_trace,
                format,
            )?),
            TraceSizing::PerTrace => Layout::Indexed(TraceIndex::scan(
                file_len,
                binary.samples_per_trace,
                format,
                |offset| Ok(read_header_at(&mut stream, offset)?.samples_in_trace),
            )?),
        };

        stream.seek(SeekFrom::Start(FIRST_TRACE_OFFSET))?;

        let container = Self {
            stream,
            textual,
            binary,
            format,
            layout,
            diag,
        };
        diag.info(format_args!(
            "opened SEG-Y: {} bytes, {} traces, {} samples/trace, {}",
            file_len,
            container.trace_count(),
            container.sample_count(),
            format,
        ));
        Ok(container)
    }

    /// Read and decode trace `index`.
    pub fn read_trace_at(&mut self, index: u64) -> Result<Trace> {
        let (offset, sample_count) = self.locate(index)?;
        let record_len = TRACE_HEADER_BYTES + sample_count * self.format.sample_width();

        self.stream.seek(SeekFrom::Start(offset))?;
        let mut buf = vec![0u8; record_len];
        let got = read_full(&mut self.stream, &mut buf)?;
        if got < record_len {
            return Err(SegyError::ShortRead {
                expected: record_len,
                actual: got,
            });
        }

        let header = TraceHeader::decode(&buf)?;
        let declared = header.samples_in_trace as usize;
        if declared != 0 && declared != sample_count {
            self.diag.warn(format_args!(
                "trace {index} declares {declared} samples, read as {sample_count}"
            ));
        }
        let data = samples::decode_samples(&buf[TRACE_HEADER_BYTES..], self.format, sample_count)?;
        Ok(Trace { header, data })
    }

    /// Read only the 240-byte header of trace `index`.
    pub fn read_trace_header_at(&mut self, index: u64) -> Result<TraceHeader> {
        let (offset, _) = self.locate(index)?;
        read_header_at(&mut self.stream, offset)
    }

    /// Iterate over all traces from the first.
    pub fn traces(&mut self) -> Traces<'_, S> {
        Traces::new(self)
    }
}

impl<S: Read + Write + Seek> SegyContainer<S> {
    /// Start a new file with a blank textual header and default options.
    pub fn create(stream: S, binary: BinaryHeader) -> Result<Self> {
        Self::create_with(
            stream,
            TextualHeader::blank(),
            binary,
            &ContainerOptions::default(),
        )
    }

    /// Write the textual and binary headers to an empty stream.
    ///
    /// The binary header must name a supported sample format and a non-zero
    /// sample count. The new file has no traces.
    pub fn create_with(
        mut stream: S,
        textual: TextualHeader,
        binary: BinaryHeader,
        options: &ContainerOptions,
    ) -> Result<Self> {
        let diag = options.diagnostics;
        let format = validate_binary_header(&binary)?;

        let existing = stream.seek(SeekFrom::End(0))?;
        if existing != 0 {
            return Err(SegyError::StreamNotEmpty(existing));
        }

        stream.write_all(textual.as_bytes())?;
        stream.write_all(&binary.encode())?;

        let layout = match options.sizing {
            TraceSizing::Global => {
                Layout::Uniform(TraceGeometry::empty(binary.samples_per_trace, format)?)
            }
            TraceSizing::PerTrace => Layout::Indexed(TraceIndex::new()),
        };

        diag.info(format_args!(
            "created SEG-Y: {} samples/trace, {}",
            binary.samples_per_trace, format
        ));
        Ok(Self {
            stream,
            textual,
            binary,
            format,
            layout,
            diag,
        })
    }

    /// Encode `trace` and write it after the last trace.
    ///
    /// The sample count must match the file's: the binary header's count for
    /// [`TraceSizing::Global`], the trace header's own `samples_in_trace`
    /// (or the binary header's when 0) for [`TraceSizing::PerTrace`].
    pub fn append_trace(&mut self, trace: &Trace) -> Result<()> {
        let expected = self.expected_samples(&trace.header)?;
        if trace.data.len() != expected {
            return Err(SegyError::SizeMismatch {
                expected,
                actual: trace.data.len(),
            });
        }

        let record_len = TRACE_HEADER_BYTES + expected * self.format.sample_width();
        let mut buf = Vec::with_capacity(record_len);
        buf.extend_from_slice(&trace.header.encode());
        samples::encode_samples(&trace.data, self.format, &mut buf)?;

        let offset = self.data_end();
        self.stream.seek(SeekFrom::Start(offset))?;
        self.stream.write_all(&buf)?;

        match &mut self.layout {
            Layout::Uniform(g) => g.trace_count += 1,
            Layout::Indexed(index) => index.push(expected, record_len as u64),
        }
        self.diag.debug(format_args!(
            "appended trace {} at offset {offset} ({record_len} bytes)",
            self.trace_count() - 1
        ));
        Ok(())
    }

    /// Flush buffered writes to the stream.
    pub fn flush(&mut self) -> Result<()> {
        self.stream.flush()?;
        Ok(())
    }

    /// Flush and hand back the stream.
    pub fn close(mut self) -> Result<S> {
        self.stream.flush()?;
        Ok(self.stream)
    }

    fn expected_samples(&self, header: &TraceHeader) -> Result<usize> {
        let global = self.sample_count();
        let declared = header.samples_in_trace as usize;
        match self.layout {
            Layout::Uniform(_) => {
                if declared != 0 && declared != global {
                    return Err(SegyError::SizeMismatch {
                        expected: global,
                        actual: declared,
                    });
                }
                Ok(global)
            }
            Layout::Indexed(_) => Ok(if declared == 0 { global } else { declared }),
        }
    }
}

impl SegyContainer<File> {
    /// Open the file at `path` for reading.
    pub fn open_path<P: AsRef<Path>>(path: P, options: &ContainerOptions) -> Result<Self> {
        let file = File::open(path)?;
        Self::open_with(file, options)
    }

    /// Create (or truncate) the file at `path` and write its headers.
    pub fn create_path<P: AsRef<Path>>(
        path: P,
        textual: TextualHeader,
        binary: BinaryHeader,
        options: &ContainerOptions,
    ) -> Result<Self> {
        let file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        Self::create_with(file, textual, binary, options)
    }
}

impl<S> fmt::Debug for SegyContainer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegyContainer")
            .field("format", &self.format)
            .field("sample_count", &self.sample_count())
            .field("trace_count", &self.trace_count())
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

/// Check the binary header fields that trace geometry depends on.
fn validate_binary_header(binary: &BinaryHeader) -> Result<SampleFormat> {
    let format = SampleFormat::from_code(binary.sample_format_code)?;
    geometry::record_bytes(binary.samples_per_trace, format)?;
    Ok(format)
}

fn read_header_at<R: Read + Seek>(reader: &mut R, offset: u64) -> Result<TraceHeader> {
    reader.seek(SeekFrom::Start(offset))?;
    let mut buf = [0u8; TRACE_HEADER_BYTES];
    let got = read_full(reader, &mut buf)?;
    if got < TRACE_HEADER_BYTES {
        return Err(SegyError::ShortRead {
            expected: TRACE_HEADER_BYTES,
            actual: got,
        });
    }
    TraceHeader::decode(&buf)
}

/// Read until `buf` is full or the stream ends; returns bytes read.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
