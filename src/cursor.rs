//! Sequential trace access.
//!
//! [`TraceCursor`] holds nothing but the index of the next trace, so any
//! number of cursors can exist over one container. Each step borrows the
//! container mutably because reading moves the shared stream position.
//!
//! [`Traces`] wraps a cursor as an [`Iterator`] for the common
//! read-everything case.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use segy_rs::{BinaryHeader, SampleFormat, SegyContainer, Trace};
//!
//! let header = BinaryHeader::new(2, SampleFormat::IeeeFloat32);
//! let mut segy = SegyContainer::create(Cursor::new(Vec::new()), header).unwrap();
//! segy.append_trace(&Trace::new(vec![1.0, 2.0])).unwrap();
//! segy.append_trace(&Trace::new(vec![3.0, 4.0])).unwrap();
//!
//! let traces: Vec<_> = segy.traces().collect::<Result<Vec<_>, _>>().unwrap();
//! assert_eq!(traces.len(), 2);
//! assert_eq!(traces[1].data, vec![3.0, 4.0]);
//! ```

use std::io::{Read, Seek};

use crate::Result;
use crate::container::SegyContainer;
use crate::trace::Trace;

/// Forward-only position within a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraceCursor {
    next_index: u64,
}

impl TraceCursor {
    /// A cursor at the first trace.
    pub fn new() -> Self {
        Self { next_index: 0 }
    }

    /// A cursor whose first `next` reads trace `index`.
    pub fn starting_at(index: u64) -> Self {
        Self { next_index: index }
    }

    /// Index of the trace the next call will read.
    pub fn position(&self) -> u64 {
        self.next_index
    }

    /// Read the next trace, or `Ok(None)` once past the last one.
    ///
    /// The cursor only advances on success, so a failed read can be retried.
    pub fn next<S: Read + Seek>(&mut self, segy: &mut SegyContainer<S>) -> Result<Option<Trace>> {
        if self.next_index >= segy.trace_count() {
            return Ok(None);
        }
        let trace = segy.read_trace_at(self.next_index)?;
        self.next_index += 1;
        Ok(Some(trace))
    }
}

/// Iterator over the traces of a container.
///
/// Yields `Err` at most once, then stops.
pub struct Traces<'a, S> {
    segy: &'a mut SegyContainer<S>,
    cursor: TraceCursor,
    failed: bool,
}

impl<'a, S: Read + Seek> Traces<'a, S> {
    /// Iterate over `segy` from its first trace.
    pub fn new(segy: &'a mut SegyContainer<S>) -> Self {
        Self {
            segy,
            cursor: TraceCursor::new(),
            failed: false,
        }
    }
}

impl<S: Read + Seek> Iterator for Traces<'_, S> {
    type Item = Result<Trace>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.cursor.next(&mut *self.segy) {
            Ok(trace) => trace.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .segy
            .trace_count()
            .saturating_sub(self.cursor.position());
        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        (0, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BinaryHeader, SampleFormat, SegyError};
    use std::cell::Cell;
    use std::io::{Cursor, SeekFrom};
    use std::rc::Rc;

    fn make_container(n: usize) -> SegyContainer<Cursor<Vec<u8>>> {
        let mut segy = SegyContainer::create(
            Cursor::new(Vec::new()),
            BinaryHeader::new(3, SampleFormat::IbmFloat32),
        )
        .unwrap();
        for i in 0..n {
            let v = i as f32;
            segy.append_trace(&Trace::new(vec![v, v + 0.5, -v]).with_sequence(i as i32))
                .unwrap();
        }
        segy
    }

    #[test]
    fn test_cursor_exhaustion() {
        let mut segy = make_container(4);
        let mut cursor = segy.cursor();
        let mut seen = Vec::new();
        while let Some(trace) = cursor.next(&mut segy).unwrap() {
            seen.push(trace.header.trace_sequence_line);
        }
        assert_eq!(seen, vec![0, 1, 2, 3]);

        // Stays exhausted.
        assert!(cursor.next(&mut segy).unwrap().is_none());
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_cursor_empty_container() {
        let mut segy = make_container(0);
        assert!(segy.cursor().next(&mut segy).unwrap().is_none());
        assert_eq!(segy.traces().count(), 0);
    }

    #[test]
    fn test_independent_cursors() {
        let mut segy = make_container(3);
        let mut a = TraceCursor::new();
        let mut b = TraceCursor::starting_at(2);

        let first = a.next(&mut segy).unwrap().unwrap();
        let last = b.next(&mut segy).unwrap().unwrap();
        let second = a.next(&mut segy).unwrap().unwrap();

        assert_eq!(first.data[0], 0.0);
        assert_eq!(last.data[0], 2.0);
        assert_eq!(second.data[0], 1.0);
        assert!(b.next(&mut segy).unwrap().is_none());
    }

    #[test]
    fn test_iterator_collects_all() {
        let mut segy = make_container(5);
        let traces: Vec<_> = segy.traces().collect::<std::result::Result<Vec<_>, _>>().unwrap();
        assert_eq!(traces.len(), 5);
        assert_eq!(traces[3].data, vec![3.0, 3.5, -3.0]);
    }

    /// Stream that starts failing reads once `broken` is set.
    struct Flaky {
        inner: Cursor<Vec<u8>>,
        broken: Rc<Cell<bool>>,
    }

    impl Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.broken.get() {
                return Err(std::io::Error::other("device gone"));
            }
            self.inner.read(buf)
        }
    }

    impl Seek for Flaky {
        fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let bytes = make_container(3).into_inner().into_inner();
        let broken = Rc::new(Cell::new(false));
        let stream = Flaky {
            inner: Cursor::new(bytes),
            broken: Rc::clone(&broken),
        };
        let mut segy = SegyContainer::open(stream).unwrap();

        let mut traces = segy.traces();
        assert!(traces.next().unwrap().is_ok());
        broken.set(true);
        assert!(matches!(traces.next(), Some(Err(SegyError::Io(_)))));
        assert!(traces.next().is_none());
    }

    #[test]
    fn test_cursor_retries_after_error() {
        let bytes = make_container(2).into_inner().into_inner();
        let broken = Rc::new(Cell::new(false));
        let stream = Flaky {
            inner: Cursor::new(bytes),
            broken: Rc::clone(&broken),
        };
        let mut segy = SegyContainer::open(stream).unwrap();
        let mut cursor = TraceCursor::new();

        broken.set(true);
        assert!(cursor.next(&mut segy).is_err());
        assert_eq!(cursor.position(), 0);

        broken.set(false);
        let trace = cursor.next(&mut segy).unwrap().unwrap();
        assert_eq!(trace.data, vec![0.0, 0.5, 0.0]);
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_size_hint_counts_down() {
        let mut segy = make_container(3);
        let mut traces = segy.traces();
        assert_eq!(traces.size_hint(), (0, Some(3)));
        traces.next();
        assert_eq!(traces.size_hint(), (0, Some(2)));
    }
}
