//! Line reader state machine.
//!
//! Converts a push-based, chunked byte stream into a per-line callback
//! stream. The two stream notifications map to [`LineReader::push`] (data
//! arrived) and [`LineReader::finish`] (stream ended). Complete lines are
//! handed to the callback with their newline kept, in arrival order; when
//! the stream ends, any unterminated remainder is handed over once, as-is.

use crate::buffer::StreamBuffer;
use std::borrow::Cow;
use tracing::trace;

/// Current state of a reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    /// Accumulating chunks; no complete line buffered yet.
    Buffering,
    /// One or more complete lines are being emitted.
    Draining,
    /// Stream ended; further notifications are ignored.
    Closed,
}

/// Push-stream line framer.
///
/// Lines are delivered strictly in the order their terminating newline was
/// received, and never before all of their bytes have arrived. Splitting
/// happens on `\n` alone; a `\r` is ordinary line content. Bytes that are
/// not valid UTF-8 are not treated as an error, they are decoded lossily
/// at emission time.
pub struct LineReader<F> {
    buffer: StreamBuffer,
    state: ReaderState,
    on_line: F,
}

impl<F: FnMut(&str)> LineReader<F> {
    /// Create a reader that hands each line to `on_line`.
    pub fn new(on_line: F) -> Self {
        Self {
            buffer: StreamBuffer::new(),
            state: ReaderState::Buffering,
            on_line,
        }
    }

    /// Current state.
    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// Check whether the stream has ended.
    pub fn is_closed(&self) -> bool {
        self.state == ReaderState::Closed
    }

    /// Handle an arriving chunk.
    ///
    /// If the chunk completes one or more lines, each is emitted before
    /// this returns; text after the last newline stays buffered. A chunk
    /// without a newline is only buffered.
    pub fn push(&mut self, chunk: &[u8]) {
        if self.state == ReaderState::Closed {
            trace!(len = chunk.len(), "chunk after end of stream ignored");
            return;
        }

        self.buffer.push(chunk);

        // The retained tail never holds a newline, so only the incoming
        // chunk can complete a line.
        if find_newline(chunk).is_none() {
            return;
        }

        self.drain();
    }

    /// Handle end of stream.
    ///
    /// Emits any buffered partial text once, with no newline appended,
    /// then transitions to [`ReaderState::Closed`]. Late notifications are
    /// ignored from then on.
    pub fn finish(&mut self) {
        if self.state == ReaderState::Closed {
            trace!("end of stream already handled");
            return;
        }

        if !self.buffer.is_empty() {
            let rest = self.buffer.take_assembled();
            (self.on_line)(&decode(&rest));
        }
        self.state = ReaderState::Closed;
    }

    /// Emit every complete line in the buffer, oldest first.
    fn drain(&mut self) {
        self.state = ReaderState::Draining;

        let assembled = self.buffer.take_assembled();
        let mut rest = &assembled[..];
        while let Some(pos) = find_newline(rest) {
            let (line, tail) = rest.split_at(pos + 1);
            (self.on_line)(&decode(line));
            rest = tail;
        }

        // Whatever follows the last newline is the new buffer content.
        self.buffer.push(rest);
        self.state = ReaderState::Buffering;
    }
}

/// Find the first `\n`, returning its position.
fn find_newline(haystack: &[u8]) -> Option<usize> {
    haystack.iter().position(|&b| b == b'\n')
}

/// Decode a line for emission.
///
/// Decoding is per line, not per chunk, so a multi-byte character split
/// across chunk boundaries still comes out intact.
fn decode(line: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(line)
}
