//! Fixed-capacity byte ring backing the look-ahead input buffer.
//!
//! `head == tail` is ambiguous between empty and full; a `full` flag
//! disambiguates. A detached [`RingReader`] cursor walks the live range
//! `[head, tail)` without consuming; `consume_to` then advances `head` to
//! the cursor position in one step.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RingError {
    #[error("ring buffer is full")]
    Full,
    #[error("ring buffer has {available} free bytes, {requested} requested")]
    Insufficient { requested: usize, available: usize },
}

#[derive(Debug)]
pub struct ByteRing {
    buf: Vec<u8>,
    head: usize,
    tail: usize,
    full: bool,
}

/// Non-consuming cursor over a [`ByteRing`]. `None` means the cursor has
/// reached the tail (or was placed there) and will yield nothing further.
#[derive(Debug, Clone, Copy, Default)]
pub struct RingReader {
    cursor: Option<usize>,
}

impl ByteRing {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring capacity must be nonzero");
        Self {
            buf: vec![0; capacity],
            head: 0,
            tail: 0,
            full: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail && !self.full
    }

    pub fn space_available(&self) -> usize {
        if self.full {
            0
        } else if self.tail >= self.head {
            self.capacity() - (self.tail - self.head)
        } else {
            self.head - self.tail
        }
    }

    fn step(&self, i: usize) -> usize {
        if i + 1 == self.capacity() { 0 } else { i + 1 }
    }

    fn step_back(&self, i: usize) -> usize {
        if i == 0 { self.capacity() - 1 } else { i - 1 }
    }

    /// Append one byte at the tail.
    pub fn push(&mut self, byte: u8) -> Result<(), RingError> {
        if self.full {
            return Err(RingError::Full);
        }
        self.buf[self.tail] = byte;
        self.tail = self.step(self.tail);
        if self.tail == self.head {
            self.full = true;
        }
        Ok(())
    }

    /// Append a run of bytes; all or nothing.
    pub fn push_many(&mut self, bytes: &[u8]) -> Result<(), RingError> {
        let available = self.space_available();
        if bytes.len() > available {
            return Err(RingError::Insufficient {
                requested: bytes.len(),
                available,
            });
        }
        for &b in bytes {
            self.buf[self.tail] = b;
            self.tail = self.step(self.tail);
        }
        if !bytes.is_empty() && self.tail == self.head {
            self.full = true;
        }
        Ok(())
    }

    /// Prepend one byte at the head. Requires at least one byte free.
    pub fn push_front(&mut self, byte: u8) -> Result<(), RingError> {
        if self.full {
            return Err(RingError::Full);
        }
        self.head = self.step_back(self.head);
        self.buf[self.head] = byte;
        if self.head == self.tail {
            self.full = true;
        }
        Ok(())
    }

    pub fn pop(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        self.full = false;
        let byte = self.buf[self.head];
        self.head = self.step(self.head);
        Some(byte)
    }

    pub fn clear(&mut self) {
        self.head = self.tail;
        self.full = false;
    }

    /// Place the cursor at the current head.
    pub fn reader_reset(&self, reader: &mut RingReader) {
        reader.cursor = if self.is_empty() { None } else { Some(self.head) };
    }

    /// Place the cursor past the tail.
    pub fn reader_to_end(&self, reader: &mut RingReader) {
        reader.cursor = None;
    }

    pub fn reader_at_end(&self, reader: &RingReader) -> bool {
        reader.cursor.is_none()
    }

    /// Yield the byte under the cursor and advance it, without consuming.
    pub fn reader_next(&self, reader: &mut RingReader) -> Option<u8> {
        let i = reader.cursor?;
        let byte = self.buf[i];
        let next = self.step(i);
        reader.cursor = if next == self.tail { None } else { Some(next) };
        Some(byte)
    }

    /// Advance the head to the cursor, consuming everything the cursor has
    /// passed over. A cursor at end consumes the whole live range.
    pub fn consume_to(&mut self, reader: &RingReader) {
        match reader.cursor {
            None => {
                self.head = self.tail;
                self.full = false;
            }
            Some(i) if i != self.head => {
                self.head = i;
                self.full = false;
            }
            Some(_) => {}
        }
    }
}
