use super::EXPANSION_INCREMENT;
use crate::error::{Error, Result};

/// Growable read buffer, layered for nested decodes.
///
/// Two parallel stacks: saved read positions, and per-layer end offsets.
/// By the time a nested payload is pushed as a layer, the enclosing decode
/// has already consumed it from its own layer, so the saved position is
/// where the outer loop must resume once the inner layer pops. The end
/// stack scopes `remaining()` to just the active layer, which is what stops
/// an inner decode from running past its payload into the outer stream.
pub(crate) struct ReadStream {
    buf: Vec<u8>,
    pos: usize,
    marks: Vec<usize>,
    ends: Vec<usize>,
}

impl ReadStream {
    pub fn new() -> Self {
        Self {
            buf: vec![0; EXPANSION_INCREMENT],
            pos: 0,
            marks: Vec::new(),
            ends: vec![0],
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.marks.clear();
        self.ends.clear();
        self.ends.push(0);
    }

    /// Bytes left in the active layer.
    pub fn remaining(&self) -> usize {
        self.active_end() - self.pos
    }

    /// Appends `bytes` after the active layer's end and moves the cursor to
    /// their start; `remaining()` now spans exactly these bytes.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        let start = self.active_end();
        self.expand_to(start + bytes.len());

        self.marks.push(self.pos);
        self.buf[start..start + bytes.len()].copy_from_slice(bytes);
        self.pos = start;
        self.ends.push(start + bytes.len());
    }

    /// Drops the active layer, restoring the cursor to where the enclosing
    /// layer left off.
    pub fn pop_bytes(&mut self) {
        if let Some(mark) = self.marks.pop() {
            self.pos = mark;
        }
        if self.ends.len() > 1 {
            self.ends.pop();
        }
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        if self.remaining() == 0 {
            return Err(Error::TruncatedInput { want: 1, have: 0 });
        }

        let b = self.buf[self.pos];
        self.pos += 1;
        Ok(b)
    }

    /// Exactly `len` bytes from the active layer, as a fresh buffer.
    pub fn read_exact(&mut self, len: usize) -> Result<Vec<u8>> {
        if self.remaining() < len {
            return Err(Error::TruncatedInput {
                want: len,
                have: self.remaining(),
            });
        }

        let bytes = self.buf[self.pos..self.pos + len].to_vec();
        self.pos += len;
        Ok(bytes)
    }

    fn active_end(&self) -> usize {
        self.ends.last().copied().unwrap_or(0)
    }

    fn expand_to(&mut self, required: usize) {
        if required <= self.buf.len() {
            return;
        }

        let overflow = required - self.buf.len();
        let increments = (overflow + EXPANSION_INCREMENT - 1) / EXPANSION_INCREMENT;
        self.buf
            .resize(self.buf.len() + increments * EXPANSION_INCREMENT, 0);
    }
}
