// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fixed-layout payload encoding.
//!
//! A [`Payload`] is a plain value whose encoded form has a size known at
//! compile time. The encoding is the concatenation of its fields in declared
//! order with no padding, and decoding rejects any byte pattern that no value
//! would produce. That makes byte equality of two encodings the same thing as
//! value equality, which the type descriptor comparison and entity equality
//! rely on.
//!
//! Bare floats are not payloads: their `PartialEq` disagrees with their bytes
//! for NaN and signed zero. Float fields use [`Wire`], which compares bit
//! patterns.

pub mod cursor;
pub mod wire;

pub use cursor::{Cursor, CursorMut};
pub use wire::{Wire, WireF32, WireF64, WireI32, WireI64, WireU32, WireU64, WireValue};

use std::fmt;

use byteorder::NativeEndian;
use thiserror::Error;

/// Cursor-level encoding error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("write failed at offset {offset}: {reason}")]
    WriteFailed { offset: usize, reason: String },
    #[error("read failed at offset {offset}: {reason}")]
    ReadFailed { offset: usize, reason: String },
    #[error("invalid data: {reason}")]
    InvalidData { reason: String },
}

pub type CodecResult<T> = core::result::Result<T, CodecError>;

/// A value with a fixed, padding-free binary layout.
///
/// Implementations must write exactly [`Payload::SIZE`] bytes and document
/// the width and order of each field.
pub trait Payload: Copy + PartialEq + fmt::Debug {
    /// Encoded size in bytes.
    const SIZE: usize;

    fn encode(&self, out: &mut CursorMut<'_>) -> CodecResult<()>;

    fn decode(input: &mut Cursor<'_>) -> CodecResult<Self>;

    /// Encoded bytes of this value.
    fn to_bytes(&self) -> CodecResult<Vec<u8>> {
        let mut bytes = vec![0u8; Self::SIZE];
        self.encode(&mut CursorMut::new(&mut bytes))?;
        Ok(bytes)
    }

    /// Decode from a slice holding exactly one encoded value.
    fn from_bytes(bytes: &[u8]) -> CodecResult<Self> {
        if bytes.len() != Self::SIZE {
            return Err(CodecError::InvalidData {
                reason: format!("expected {} bytes, got {}", Self::SIZE, bytes.len()),
            });
        }
        Self::decode(&mut Cursor::new(bytes))
    }
}

macro_rules! impl_native_payload {
    ($type:ty, $write:ident, $read:ident) => {
        impl Payload for $type {
            const SIZE: usize = std::mem::size_of::<$type>();

            fn encode(&self, out: &mut CursorMut<'_>) -> CodecResult<()> {
                out.$write::<NativeEndian>(*self)
            }

            fn decode(input: &mut Cursor<'_>) -> CodecResult<Self> {
                input.$read::<NativeEndian>()
            }
        }
    };
}

impl_native_payload!(u16, write_u16, read_u16);
impl_native_payload!(i16, write_i16, read_i16);
impl_native_payload!(u32, write_u32, read_u32);
impl_native_payload!(i32, write_i32, read_i32);
impl_native_payload!(u64, write_u64, read_u64);
impl_native_payload!(i64, write_i64, read_i64);

impl Payload for u8 {
    const SIZE: usize = 1;

    fn encode(&self, out: &mut CursorMut<'_>) -> CodecResult<()> {
        out.write_u8(*self)
    }

    fn decode(input: &mut Cursor<'_>) -> CodecResult<Self> {
        input.read_u8()
    }
}

impl Payload for i8 {
    const SIZE: usize = 1;

    fn encode(&self, out: &mut CursorMut<'_>) -> CodecResult<()> {
        out.write_u8(self.to_ne_bytes()[0])
    }

    fn decode(input: &mut Cursor<'_>) -> CodecResult<Self> {
        Ok(i8::from_ne_bytes([input.read_u8()?]))
    }
}

/// One byte, `0` or `1`. Any other byte is rejected.
impl Payload for bool {
    const SIZE: usize = 1;

    fn encode(&self, out: &mut CursorMut<'_>) -> CodecResult<()> {
        out.write_u8(u8::from(*self))
    }

    fn decode(input: &mut Cursor<'_>) -> CodecResult<Self> {
        match input.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::InvalidData {
                reason: format!("bool byte {}", other),
            }),
        }
    }
}

impl<const N: usize> Payload for [u8; N] {
    const SIZE: usize = N;

    fn encode(&self, out: &mut CursorMut<'_>) -> CodecResult<()> {
        out.write_bytes(self)
    }

    fn decode(input: &mut Cursor<'_>) -> CodecResult<Self> {
        input.read_array::<N>()
    }
}
