// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Endian-tagged wire fields.
//!
//! Plain primitives encode in host order. A [`Wire`] field carries its byte
//! order in its type, so a payload that embeds one keeps the same bytes on
//! every host.
//!
//! Wire fields compare by bit pattern, so two fields are equal exactly when
//! their encodings are. For floats that means a NaN equals itself and `0.0`
//! differs from `-0.0`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use byteorder::{BigEndian, ByteOrder, NativeEndian};

use super::{CodecResult, Cursor, CursorMut, Payload};

/// Primitive that can back a [`Wire`] field.
pub trait WireValue: Copy {
    /// Same-width unsigned view of the value.
    type Bits: Eq + Hash;

    fn bits(self) -> Self::Bits;
}

macro_rules! impl_wire_value {
    ($($type:ty => $bits:ty),* $(,)?) => {
        $(
            impl WireValue for $type {
                type Bits = $bits;

                fn bits(self) -> $bits {
                    <$bits>::from_ne_bytes(self.to_ne_bytes())
                }
            }
        )*
    };
}

impl_wire_value!(
    u16 => u16,
    i16 => u16,
    u32 => u32,
    i32 => u32,
    u64 => u64,
    i64 => u64,
    f32 => u32,
    f64 => u64,
);

/// A primitive that is always encoded in byte order `E`.
#[derive(Clone, Copy)]
pub struct Wire<T, E> {
    value: T,
    _order: PhantomData<E>,
}

impl<T: Copy, E: ByteOrder> Wire<T, E> {
    pub const fn new(value: T) -> Self {
        Self {
            value,
            _order: PhantomData,
        }
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
    }
}

impl<T: Copy + Default, E: ByteOrder> Default for Wire<T, E> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: WireValue, E> PartialEq for Wire<T, E> {
    fn eq(&self, other: &Self) -> bool {
        self.value.bits() == other.value.bits()
    }
}

impl<T: WireValue, E> Eq for Wire<T, E> {}

impl<T: WireValue, E> Hash for Wire<T, E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.bits().hash(state);
    }
}

impl<T: fmt::Debug, E> fmt::Debug for Wire<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl<T: fmt::Display, E> fmt::Display for Wire<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl<T: Copy, E: ByteOrder> From<T> for Wire<T, E> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

macro_rules! impl_wire_payload {
    ($type:ty, $write:ident, $read:ident) => {
        impl<E: ByteOrder> Payload for Wire<$type, E> {
            const SIZE: usize = std::mem::size_of::<$type>();

            fn encode(&self, out: &mut CursorMut<'_>) -> CodecResult<()> {
                out.$write::<E>(self.value)
            }

            fn decode(input: &mut Cursor<'_>) -> CodecResult<Self> {
                Ok(Self::new(input.$read::<E>()?))
            }
        }
    };
}

impl_wire_payload!(u16, write_u16, read_u16);
impl_wire_payload!(i16, write_i16, read_i16);
impl_wire_payload!(u32, write_u32, read_u32);
impl_wire_payload!(i32, write_i32, read_i32);
impl_wire_payload!(u64, write_u64, read_u64);
impl_wire_payload!(i64, write_i64, read_i64);
impl_wire_payload!(f32, write_f32, read_f32);
impl_wire_payload!(f64, write_f64, read_f64);

pub type WireI32 = Wire<i32, NativeEndian>;
pub type WireI64 = Wire<i64, NativeEndian>;
pub type WireU32 = Wire<u32, NativeEndian>;
pub type WireU64 = Wire<u64, NativeEndian>;
/// Doubles travel big-endian.
pub type WireF64 = Wire<f64, BigEndian>;
pub type WireF32 = Wire<f32, NativeEndian>;
