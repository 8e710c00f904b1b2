//! `#%`-terminated stream framer.
//!
//! Rules:
//! - A message is everything before a `#%` terminator; the terminator is consumed.
//! - Partial trailing data stays buffered and is never yielded.
//! - NUL bytes are stripped before the terminator search.
//! - Invalid UTF-8 is dropped sequence by sequence, never fatal.
//! - When the unterminated remainder outgrows `max_buffer_bytes` the buffer is
//!   cleared and the overflow is reported on [`Framed`].

use bytes::BytesMut;

/// Message terminator.
pub const TERMINATOR: &[u8; 2] = b"#%";

/// Default cap on buffered, unterminated bytes.
pub const DEFAULT_MAX_BUFFER_BYTES: usize = 1024;

/// Output of one [`Framer::feed`] call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Framed {
    /// Complete messages, in arrival order, without the terminator.
    pub messages: Vec<String>,
    /// Set when the buffer was discarded; holds the number of bytes dropped.
    pub overflowed: Option<usize>,
}

/// Per-connection framer. Not shared across tasks.
#[derive(Debug)]
pub struct Framer {
    buf: BytesMut,
    max_buffer_bytes: usize,
}

impl Default for Framer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framer {
    pub fn new() -> Self {
        Self::with_max_buffer(DEFAULT_MAX_BUFFER_BYTES)
    }

    pub fn with_max_buffer(max_buffer_bytes: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(max_buffer_bytes.min(8 * 1024)),
            max_buffer_bytes: max_buffer_bytes.max(1),
        }
    }

    /// Bytes currently buffered without a terminator.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Append a chunk and drain every complete message.
    ///
    /// Feeding an empty chunk is a no-op.
    pub fn feed(&mut self, chunk: &[u8]) -> Framed {
        let mut out = Framed::default();
        if chunk.is_empty() {
            return out;
        }

        self.buf.reserve(chunk.len());
        for part in chunk.split(|b| *b == 0) {
            self.buf.extend_from_slice(part);
        }

        while let Some(end) = find_terminator(&self.buf) {
            let raw = self.buf.split_to(end + TERMINATOR.len());
            out.messages.push(decode_lenient(&raw[..end]));
        }

        if self.buf.len() > self.max_buffer_bytes {
            let dropped = self.buf.len();
            self.buf.clear();
            tracing::debug!(
                dropped,
                limit = self.max_buffer_bytes,
                "framer buffer overflow, discarding"
            );
            out.overflowed = Some(dropped);
        }

        out
    }
}

fn find_terminator(buf: &[u8]) -> Option<usize> {
    buf.windows(TERMINATOR.len()).position(|w| w == TERMINATOR)
}

/// UTF-8 decode that skips invalid sequences instead of substituting them.
fn decode_lenient(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        s.push_str(chunk.valid());
    }
    s
}
