// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Entity base: identity plus a fixed-layout payload.
//!
//! # Record Format
//!
//! ```text
//! +-----------------------------+--------------------+
//! | TypeInfo (212)              | Payload (P::SIZE)  |
//! +-----------------------------+--------------------+
//! ```
//!
//! A reader verifies the descriptor before touching the payload. On a
//! mismatch the descriptor is consumed, the payload is left in the buffer and
//! the destination keeps its previous value.

use std::any::Any;
use std::fmt;

use crate::buffer::BinaryBuffer;
use crate::codec::{CodecResult, Cursor, CursorMut, Payload};
use crate::error::Result;
use crate::id::{Id, IdGenerators, NULL_ID};
use crate::type_info::TypeInfo;
use crate::NAMESPACE;

/// Object-safe protocol shared by every serializable entity.
pub trait Entity: Any + fmt::Debug {
    /// Descriptor written in front of this entity's record.
    fn info(&self) -> &'static TypeInfo;

    fn id(&self) -> Id;

    /// Bytes written by [`Entity::write`].
    fn record_size(&self) -> usize;

    fn write(&self, buffer: &mut BinaryBuffer) -> Result<()>;

    /// True when `other` has the same concrete type and equal data.
    fn equals(&self, other: &dyn Any) -> bool;

    fn as_any(&self) -> &dyn Any;
}

/// Entities that decode without outside help.
pub trait Decode: Entity {
    fn read(&mut self, buffer: &mut BinaryBuffer) -> Result<()>;
}

/// Size of a `[TypeInfo][P]` record.
pub const fn record_len<P: Payload>() -> usize {
    TypeInfo::SIZE + P::SIZE
}

/// Write `[info][payload]`.
pub fn write_record<P: Payload>(
    buffer: &mut BinaryBuffer,
    info: &TypeInfo,
    payload: &P,
) -> Result<()> {
    buffer.write(info)?.write(payload)?;
    Ok(())
}

/// Verify `info` and decode the payload that follows it.
pub fn read_record<P: Payload>(buffer: &mut BinaryBuffer, info: &TypeInfo) -> Result<P> {
    info.verify(buffer)?;
    buffer.read::<P>()
}

/// Payload of [`Object`]: the id, 8 bytes native order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ObjectData {
    pub id: Id,
}

impl ObjectData {
    pub const fn new(id: Id) -> Self {
        Self { id }
    }
}

impl Payload for ObjectData {
    const SIZE: usize = Id::SIZE;

    fn encode(&self, out: &mut CursorMut<'_>) -> CodecResult<()> {
        self.id.encode(out)
    }

    fn decode(input: &mut Cursor<'_>) -> CodecResult<Self> {
        Ok(Self::new(Id::decode(input)?))
    }
}

/// The plain entity: an identity and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Object {
    data: ObjectData,
}

impl Object {
    pub const INFO: TypeInfo = TypeInfo::new(NAMESPACE, "Object", 1, 1, 1);
    pub const DATA_SIZE: usize = ObjectData::SIZE;
    pub const SIZE: usize = record_len::<ObjectData>();

    pub const fn new(id: Id) -> Self {
        Self {
            data: ObjectData::new(id),
        }
    }

    /// New object with `id`, or the next generated id when `id` is [`NULL_ID`].
    pub fn create(ids: &IdGenerators, id: Id) -> Self {
        Self::new(ids.resolve(&Self::INFO, id))
    }

    pub fn data(&self) -> &ObjectData {
        &self.data
    }

    /// Copy the payload of `other` into `self`.
    pub fn assign(&mut self, other: &Object) -> &mut Self {
        self.data = other.data;
        self
    }

    pub fn data_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.data.to_bytes()?)
    }

    /// Overwrite the payload from its encoded bytes.
    pub fn load_data_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.data = ObjectData::from_bytes(bytes)?;
        Ok(())
    }

    pub fn clone_with_id(&self, id: Id) -> Self {
        Self {
            data: ObjectData { id, ..self.data },
        }
    }

    /// Same payload under a freshly generated identity.
    pub fn duplicate(&self, ids: &IdGenerators) -> Self {
        self.clone_with_id(ids.next_id(&Self::INFO))
    }

    pub fn is_null(&self) -> bool {
        self.data.id == NULL_ID
    }

    pub fn debug_string(&self) -> String {
        format!("id = {}", self)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data.id)
    }
}

impl Entity for Object {
    fn info(&self) -> &'static TypeInfo {
        &Self::INFO
    }

    fn id(&self) -> Id {
        self.data.id
    }

    fn record_size(&self) -> usize {
        Self::SIZE
    }

    fn write(&self, buffer: &mut BinaryBuffer) -> Result<()> {
        write_record(buffer, &Self::INFO, &self.data)
    }

    fn equals(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<Object>().is_some_and(|o| o == self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Decode for Object {
    fn read(&mut self, buffer: &mut BinaryBuffer) -> Result<()> {
        self.data = read_record(buffer, &Self::INFO)?;
        Ok(())
    }
}
