//! Fixed-capacity frame text
//!
//! A frame never exceeds [`MAX_FRAME_LEN`] bytes, so the builder allocates
//! exactly that much and asserts on every push that it stays in bounds.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use super::{Direction, MAX_FRAME_LEN, hex::byte_to_hex};

/// A complete frame, sentinel through trailing newline
///
/// Only the codec creates frames, and it only writes ASCII, so the contents
/// are always valid UTF-8.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    bytes: Bytes,
}

impl Frame {
    /// Raw frame bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Frame as text
    #[must_use]
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes).expect("frame holds ASCII only")
    }

    /// Length including the terminator
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false for a built frame
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Direction encoded by the sentinel
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        self.bytes.first().copied().and_then(Direction::from_sentinel)
    }

    /// Shared handle to the underlying bytes
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Frame").field(&self.as_str()).finish()
    }
}

/// Bounded builder used by the codec
pub(super) struct FrameBuf {
    buf: BytesMut,
}

impl FrameBuf {
    pub(super) fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(MAX_FRAME_LEN),
        }
    }

    pub(super) fn push(&mut self, byte: u8) {
        assert!(byte.is_ascii(), "frame byte {byte:#04x} is not ASCII");
        assert!(
            self.buf.len() < MAX_FRAME_LEN,
            "frame exceeds {MAX_FRAME_LEN} bytes"
        );
        self.buf.put_u8(byte);
    }

    pub(super) fn push_hex(&mut self, value: u8) {
        let [hi, lo] = byte_to_hex(value);
        self.push(hi);
        self.push(lo);
    }

    /// Everything written after the first `start` bytes
    pub(super) fn tail(&self, start: usize) -> &[u8] {
        &self.buf[start..]
    }

    pub(super) fn finish(self) -> Frame {
        Frame {
            bytes: self.buf.freeze(),
        }
    }
}
