//! Savepoint-capable byte input.
//!
//! [`InputBuffer`] wraps an underlying byte stream with a bounded ring of
//! look-ahead. A caller may mark a savepoint, speculatively read forward,
//! and then either `rewind` (the bytes will be returned again by later
//! reads) or `commit` (the bytes are definitively consumed). A committed
//! byte counter supports timing alignment against a session recording.

pub mod ring;

pub use ring::{ByteRing, RingError, RingReader};

use std::io::{self, ErrorKind, Read};
use tracing::{debug, trace};

/// Default look-ahead capacity; recognizing a control sequence needs only a
/// few dozen bytes, so this is generous.
pub const DEFAULT_LOOKAHEAD: usize = 1024;

pub struct InputBuffer<R> {
    src: R,
    ring: ByteRing,
    reader: RingReader,
    saving: bool,
    committed: u64,
    tentative: u64,
    last_error: Option<io::Error>,
}

impl<R: Read> InputBuffer<R> {
    pub fn new(src: R) -> Self {
        Self::with_capacity(src, DEFAULT_LOOKAHEAD)
    }

    pub fn with_capacity(src: R, capacity: usize) -> Self {
        Self {
            src,
            ring: ByteRing::new(capacity),
            reader: RingReader::default(),
            saving: false,
            committed: 0,
            tentative: 0,
            last_error: None,
        }
    }

    /// Produce the next byte, or `None` at end of input.
    ///
    /// `None` also covers a recorded read error (see [`Self::io_error`]) and
    /// an interrupted read; an interrupted read records nothing, so the
    /// caller may check its pending-signal state and simply call `get`
    /// again.
    pub fn get(&mut self) -> Option<u8> {
        if self.saving {
            if let Some(byte) = self.ring.reader_next(&mut self.reader) {
                self.tentative += 1;
                return Some(byte);
            }
            if self.ring.space_available() == 0 {
                debug!(
                    target: "input",
                    capacity = self.ring.capacity(),
                    "lookahead_exhausted"
                );
                return None;
            }
            let byte = self.fetch()?;
            self.ring
                .push(byte)
                .expect("space checked before push");
            self.ring.reader_to_end(&mut self.reader);
            self.tentative += 1;
            Some(byte)
        } else {
            let byte = match self.ring.pop() {
                Some(byte) => byte,
                None => self.fetch()?,
            };
            self.committed += 1;
            Some(byte)
        }
    }

    fn fetch(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.src.read(&mut byte) {
            Ok(0) => None,
            Ok(_) => Some(byte[0]),
            // Transient: a signal arrived mid-read. Not recorded; the
            // driver decides whether to retry.
            Err(e) if e.kind() == ErrorKind::Interrupted => None,
            Err(e) => {
                self.last_error = Some(e);
                None
            }
        }
    }

    /// Mark a savepoint. Savepoints never nest; a second `save` reports
    /// `false` and changes nothing.
    pub fn save(&mut self) -> bool {
        if self.saving {
            debug!(target: "input", "savepoint_already_active");
            return false;
        }
        self.saving = true;
        self.tentative = 0;
        self.ring.reader_reset(&mut self.reader);
        true
    }

    /// Un-consume everything read since the savepoint and leave saving
    /// mode. Later `get` calls return the saved bytes again.
    pub fn rewind(&mut self) {
        trace!(target: "input", replayed = self.tentative, "savepoint_rewind");
        self.ring.reader_reset(&mut self.reader);
        self.saving = false;
        self.tentative = 0;
    }

    /// Definitively consume everything read since the savepoint and leave
    /// saving mode. Reports `false` when no savepoint was active.
    pub fn commit(&mut self) -> bool {
        if !self.saving {
            trace!(target: "input", "commit_without_savepoint");
            return false;
        }
        self.ring.consume_to(&self.reader);
        self.saving = false;
        self.committed += self.tentative;
        self.tentative = 0;
        true
    }

    /// Whether the next `get` can be satisfied without touching the
    /// underlying stream.
    pub fn available(&self) -> bool {
        !self.ring.is_empty()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Number of bytes definitively consumed so far.
    pub fn committed_count(&self) -> u64 {
        self.committed
    }

    pub fn reset_count(&mut self) {
        self.committed = 0;
    }

    /// The read error observed on the underlying stream, if any. A `None`
    /// alongside end of input means a clean EOF.
    pub fn io_error(&self) -> Option<&io::Error> {
        self.last_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn over(bytes: &[u8]) -> InputBuffer<Cursor<Vec<u8>>> {
        InputBuffer::new(Cursor::new(bytes.to_vec()))
    }

    #[test]
    fn plain_reads_count_as_committed() {
        let mut ib = over(b"abc");
        assert_eq!(ib.get(), Some(b'a'));
        assert_eq!(ib.get(), Some(b'b'));
        assert_eq!(ib.committed_count(), 2);
        assert_eq!(ib.get(), Some(b'c'));
        assert_eq!(ib.get(), None);
        assert_eq!(ib.committed_count(), 3);
        assert!(ib.io_error().is_none());
    }

    #[test]
    fn rewind_replays_saved_bytes() {
        let mut ib = over(b"abcd");
        assert!(ib.save());
        assert_eq!(ib.get(), Some(b'a'));
        assert_eq!(ib.get(), Some(b'b'));
        ib.rewind();
        // Nothing was committed by the speculative reads.
        assert_eq!(ib.committed_count(), 0);
        assert_eq!(ib.get(), Some(b'a'));
        assert_eq!(ib.get(), Some(b'b'));
        assert_eq!(ib.get(), Some(b'c'));
        assert_eq!(ib.committed_count(), 3);
    }

    #[test]
    fn commit_folds_tentative_into_committed() {
        let mut ib = over(b"abcd");
        ib.save();
        ib.get();
        ib.get();
        ib.get();
        assert_eq!(ib.committed_count(), 0);
        assert!(ib.commit());
        assert_eq!(ib.committed_count(), 3);
        assert_eq!(ib.get(), Some(b'd'));
        assert_eq!(ib.committed_count(), 4);
    }

    #[test]
    fn savepoints_do_not_nest() {
        let mut ib = over(b"ab");
        assert!(ib.save());
        assert!(!ib.save());
        assert!(ib.is_saving());
        ib.rewind();
        assert!(!ib.is_saving());
    }

    #[test]
    fn commit_without_savepoint_is_harmless() {
        let mut ib = over(b"ab");
        assert!(!ib.commit());
        assert_eq!(ib.get(), Some(b'a'));
    }

    #[test]
    fn save_after_rewind_replays_then_extends() {
        let mut ib = over(b"abcd");
        ib.save();
        ib.get();
        ib.get();
        ib.rewind();
        // A second savepoint first replays the ring, then pulls fresh bytes.
        ib.save();
        assert_eq!(ib.get(), Some(b'a'));
        assert_eq!(ib.get(), Some(b'b'));
        assert_eq!(ib.get(), Some(b'c'));
        ib.commit();
        assert_eq!(ib.committed_count(), 3);
        assert_eq!(ib.get(), Some(b'd'));
    }

    #[test]
    fn partial_replay_commit_keeps_remainder() {
        let mut ib = over(b"abc");
        ib.save();
        ib.get();
        ib.get();
        ib.get();
        ib.rewind();
        ib.save();
        assert_eq!(ib.get(), Some(b'a'));
        ib.commit();
        assert_eq!(ib.committed_count(), 1);
        assert_eq!(ib.get(), Some(b'b'));
        assert_eq!(ib.get(), Some(b'c'));
    }

    #[test]
    fn lookahead_is_bounded_by_capacity() {
        let mut ib = InputBuffer::with_capacity(Cursor::new(b"abcdef".to_vec()), 3);
        ib.save();
        assert_eq!(ib.get(), Some(b'a'));
        assert_eq!(ib.get(), Some(b'b'));
        assert_eq!(ib.get(), Some(b'c'));
        // Ring full: speculation cannot continue.
        assert_eq!(ib.get(), None);
        ib.rewind();
        assert_eq!(ib.get(), Some(b'a'));
    }

    #[test]
    fn available_reflects_buffered_bytes_only() {
        let mut ib = over(b"ab");
        assert!(!ib.available());
        ib.save();
        ib.get();
        ib.rewind();
        assert!(ib.available());
        ib.get();
        assert!(!ib.available());
    }

    struct FailAfter {
        bytes: Vec<u8>,
        pos: usize,
        kind: ErrorKind,
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos < self.bytes.len() {
                buf[0] = self.bytes[self.pos];
                self.pos += 1;
                Ok(1)
            } else {
                Err(io::Error::new(self.kind, "boom"))
            }
        }
    }

    #[test]
    fn read_errors_surface_after_the_fact() {
        let mut ib = InputBuffer::new(FailAfter {
            bytes: b"a".to_vec(),
            pos: 0,
            kind: ErrorKind::BrokenPipe,
        });
        assert_eq!(ib.get(), Some(b'a'));
        assert_eq!(ib.get(), None);
        assert_eq!(ib.io_error().map(|e| e.kind()), Some(ErrorKind::BrokenPipe));
    }

    #[test]
    fn interrupted_reads_are_transient() {
        let mut ib = InputBuffer::new(FailAfter {
            bytes: Vec::new(),
            pos: 0,
            kind: ErrorKind::Interrupted,
        });
        assert_eq!(ib.get(), None);
        assert!(ib.io_error().is_none());
    }
}
