// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Append / sequential-read byte buffer.
//!
//! A [`BinaryBuffer`] keeps independent write and read cursors over one
//! growable backing store. Writes append at the write cursor; reads consume
//! from the read cursor and never see bytes past the write cursor. A read
//! that cannot be satisfied reports [`ObjectError::Underflow`] and leaves both
//! the cursor and the destination untouched.
//!
//! The whole buffer can be flushed to, or filled from, a flat file. The file
//! holds the written bytes and nothing else.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::codec::{Cursor, CursorMut, Payload};
use crate::error::{ObjectError, Result};

/// Default number of bytes reserved by [`BinaryBuffer::new`].
pub const DEFAULT_CAPACITY: usize = 4096;

#[derive(Debug, Clone)]
pub struct BinaryBuffer {
    bytes: Vec<u8>,
    write_pos: usize,
    read_pos: usize,
}

impl BinaryBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            write_pos: 0,
            read_pos: 0,
        }
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.write_pos]
    }

    pub fn len(&self) -> usize {
        self.write_pos
    }

    pub fn is_empty(&self) -> bool {
        self.write_pos == 0
    }

    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    pub fn read_pos(&self) -> usize {
        self.read_pos
    }

    /// Bytes left between the read and write cursors.
    pub fn remaining(&self) -> usize {
        self.write_pos - self.read_pos
    }

    /// Reset both cursors. The backing storage is kept for reuse.
    pub fn clear(&mut self) {
        self.write_pos = 0;
        self.read_pos = 0;
    }

    /// Move the read cursor back to the first byte.
    pub fn rewind(&mut self) {
        self.read_pos = 0;
    }

    // ======================================================================
    // Writes
    // ======================================================================

    /// Reserve `len` bytes at the write cursor, growing storage if needed.
    fn grow_for(&mut self, len: usize) -> std::ops::Range<usize> {
        let start = self.write_pos;
        let end = start + len;
        if end > self.bytes.len() {
            self.bytes.resize(end, 0);
        }
        start..end
    }

    pub fn write_bytes(&mut self, src: &[u8]) -> &mut Self {
        let range = self.grow_for(src.len());
        self.bytes[range.clone()].copy_from_slice(src);
        self.write_pos = range.end;
        self
    }

    /// Append the encoding of `value`.
    ///
    /// The write cursor only moves once the whole value is encoded.
    pub fn write<P: Payload>(&mut self, value: &P) -> Result<&mut Self> {
        let range = self.grow_for(P::SIZE);
        let end = range.end;
        value.encode(&mut CursorMut::new(&mut self.bytes[range]))?;
        self.write_pos = end;
        Ok(self)
    }

    // ======================================================================
    // Reads
    // ======================================================================

    /// The next `len` unread bytes, without consuming them.
    pub fn peek(&self, len: usize) -> Result<&[u8]> {
        let available = self.remaining();
        if len > available {
            warn!(
                offset = self.read_pos,
                requested = len,
                available,
                "buffer underflow"
            );
            return Err(ObjectError::Underflow {
                offset: self.read_pos,
                requested: len,
                available,
            });
        }
        Ok(&self.bytes[self.read_pos..self.read_pos + len])
    }

    /// Fill `dest` from the read cursor.
    pub fn read_into(&mut self, dest: &mut [u8]) -> Result<()> {
        dest.copy_from_slice(self.peek(dest.len())?);
        self.read_pos += dest.len();
        Ok(())
    }

    /// Decode the next value. The cursor stays put when decoding fails.
    pub fn read<P: Payload>(&mut self) -> Result<P> {
        let value = P::decode(&mut Cursor::new(self.peek(P::SIZE)?))?;
        self.read_pos += P::SIZE;
        Ok(value)
    }

    /// Skip `len` unread bytes.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.peek(len)?;
        self.read_pos += len;
        Ok(())
    }

    // ======================================================================
    // File persistence
    // ======================================================================

    /// Write every written byte to `path`, replacing the file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| ObjectError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(self.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|e| ObjectError::io(path, e))?;
        debug!(path = %path.display(), bytes = self.write_pos, "buffer saved");
        Ok(())
    }

    /// Replace the contents with the bytes of `path`.
    ///
    /// On success the write cursor sits at the file length and the read cursor
    /// at zero. On failure the buffer is left as it was.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| ObjectError::io(path, e))?;
        let expected = file
            .metadata()
            .map_err(|e| ObjectError::io(path, e))?
            .len() as usize;

        let mut bytes = Vec::with_capacity(expected.max(self.bytes.capacity()));
        let actual = file
            .read_to_end(&mut bytes)
            .map_err(|e| ObjectError::io(path, e))?;
        if actual != expected {
            return Err(ObjectError::ShortTransfer {
                operation: "read",
                path: path.to_path_buf(),
                expected,
                actual,
            });
        }

        self.bytes = bytes;
        self.write_pos = actual;
        self.read_pos = 0;
        debug!(path = %path.display(), bytes = actual, "buffer loaded");
        Ok(())
    }
}

impl Default for BinaryBuffer {
    fn default() -> Self {
        Self::new()
    }
}
