// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Read/write cursors over fixed-size payload slices.
//!
//! Byte order is a type parameter on every multi-byte accessor, so the same
//! cursor serves native-order fields and endian-tagged wire fields.

use byteorder::ByteOrder;

use super::{CodecError, CodecResult};

/// Generate write methods for multi-byte primitives.
///
/// Each generated method checks bounds, then lets `E` lay out the bytes.
macro_rules! impl_write {
    ($name:ident, $type:ty, $size:expr, $put:ident) => {
        pub fn $name<E: ByteOrder>(&mut self, value: $type) -> CodecResult<()> {
            let dst = self.claim($size)?;
            E::$put(dst, value);
            Ok(())
        }
    };
}

/// Generate read methods for multi-byte primitives.
macro_rules! impl_read {
    ($name:ident, $type:ty, $size:expr, $get:ident) => {
        pub fn $name<E: ByteOrder>(&mut self) -> CodecResult<$type> {
            let src = self.read_bytes($size)?;
            Ok(E::$get(src))
        }
    };
}

/// Mutable cursor for writing (bounds-checked)
pub struct CursorMut<'a> {
    buffer: &'a mut [u8],
    offset: usize,
}

impl<'a> CursorMut<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    fn claim(&mut self, len: usize) -> CodecResult<&mut [u8]> {
        if self.offset + len > self.buffer.len() {
            return Err(CodecError::WriteFailed {
                offset: self.offset,
                reason: "buffer too small".into(),
            });
        }
        let start = self.offset;
        self.offset += len;
        Ok(&mut self.buffer[start..start + len])
    }

    pub fn write_u8(&mut self, value: u8) -> CodecResult<()> {
        self.claim(1)?[0] = value;
        Ok(())
    }

    impl_write!(write_u16, u16, 2, write_u16);
    impl_write!(write_i16, i16, 2, write_i16);
    impl_write!(write_u32, u32, 4, write_u32);
    impl_write!(write_i32, i32, 4, write_i32);
    impl_write!(write_u64, u64, 8, write_u64);
    impl_write!(write_i64, i64, 8, write_i64);
    impl_write!(write_f32, f32, 4, write_f32);
    impl_write!(write_f64, f64, 8, write_f64);

    pub fn write_bytes(&mut self, data: &[u8]) -> CodecResult<()> {
        self.claim(data.len())?.copy_from_slice(data);
        Ok(())
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }
}

/// Immutable cursor for reading (bounds-checked, zero-copy)
pub struct Cursor<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    pub fn read_u8(&mut self) -> CodecResult<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    impl_read!(read_u16, u16, 2, read_u16);
    impl_read!(read_i16, i16, 2, read_i16);
    impl_read!(read_u32, u32, 4, read_u32);
    impl_read!(read_i32, i32, 4, read_i32);
    impl_read!(read_u64, u64, 8, read_u64);
    impl_read!(read_i64, i64, 8, read_i64);
    impl_read!(read_f32, f32, 4, read_f32);
    impl_read!(read_f64, f64, 8, read_f64);

    pub fn read_bytes(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        if self.offset + len > self.buffer.len() {
            return Err(CodecError::ReadFailed {
                offset: self.offset,
                reason: "unexpected end of buffer".into(),
            });
        }
        let slice = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }
}
