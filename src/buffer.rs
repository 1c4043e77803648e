//! Chunk accumulation for the line reader.
//!
//! Incoming chunks are kept as received and only stitched together when a
//! flush is due. The concatenation of the stored chunks always equals the
//! bytes received since the last emitted line.

use bytes::Bytes;

/// Ordered sequence of chunks received since the last flush.
///
/// Owned exclusively by the [`LineReader`](crate::LineReader) processing
/// one stream; it is cleared when the stream ends.
#[derive(Debug, Default)]
pub struct StreamBuffer {
    /// Chunks in arrival order.
    chunks: Vec<Bytes>,
    /// Total bytes across all chunks.
    len: usize,
}

impl StreamBuffer {
    /// Create a new empty buffer.
    pub fn new() -> Self {
        Self {
            chunks: Vec::new(),
            len: 0,
        }
    }

    /// Total bytes stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append a chunk, keeping arrival order.
    pub fn push(&mut self, chunk: &[u8]) {
        if chunk.is_empty() {
            return;
        }
        self.len += chunk.len();
        self.chunks.push(Bytes::copy_from_slice(chunk));
    }

    /// Assemble all chunks into one contiguous byte string, leaving the
    /// buffer empty.
    pub fn take_assembled(&mut self) -> Vec<u8> {
        let mut assembled = Vec::with_capacity(self.len);
        for chunk in self.chunks.drain(..) {
            assembled.extend_from_slice(&chunk);
        }
        self.len = 0;
        assembled
    }

    /// Drop all buffered chunks.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.len = 0;
    }
}
