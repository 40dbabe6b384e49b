// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Identity generation.
//!
//! Ids are unique within a concrete type. [`IdGenerators`] keeps one
//! [`Generator`] per [`TypeInfo`] and hands them out on demand; counters are
//! atomic so concurrent callers never receive the same id.

use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::buffer::BinaryBuffer;
use crate::codec::{CodecResult, Cursor, CursorMut, Payload};
use crate::entity::{read_record, record_len, write_record, Decode, Entity};
use crate::error::Result;
use crate::type_info::TypeInfo;
use crate::NAMESPACE;

pub type Id = u64;

/// Reserved id meaning "not assigned".
pub const NULL_ID: Id = 0;

/// Serialized state of a [`Generator`].
///
/// id (8) | value (8) | step (8), native order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorData {
    pub id: Id,
    pub value: u64,
    pub step: u64,
}

impl Payload for GeneratorData {
    const SIZE: usize = 3 * u64::SIZE;

    fn encode(&self, out: &mut CursorMut<'_>) -> CodecResult<()> {
        self.id.encode(out)?;
        self.value.encode(out)?;
        self.step.encode(out)
    }

    fn decode(input: &mut Cursor<'_>) -> CodecResult<Self> {
        Ok(Self {
            id: Id::decode(input)?,
            value: u64::decode(input)?,
            step: u64::decode(input)?,
        })
    }
}

/// Monotonic id counter.
#[derive(Debug)]
pub struct Generator {
    id: Id,
    value: AtomicU64,
    step: u64,
}

impl Generator {
    pub const INFO: TypeInfo = TypeInfo::new(NAMESPACE, "Generator", 1, 1, 1);

    pub fn new(id: Id, value: u64, step: u64) -> Self {
        Self {
            id,
            value: AtomicU64::new(value),
            step,
        }
    }

    /// Advance by one step and return the new value.
    pub fn get_id(&self) -> Id {
        self.value
            .fetch_add(self.step, Ordering::Relaxed)
            .wrapping_add(self.step)
    }

    /// The value the next [`Generator::get_id`] would return, without advancing.
    pub fn next(&self) -> Id {
        self.current().wrapping_add(self.step)
    }

    pub fn current(&self) -> Id {
        self.value.load(Ordering::Relaxed)
    }

    pub fn set_value(&self, value: u64) {
        self.value.store(value, Ordering::Relaxed);
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn snapshot(&self) -> GeneratorData {
        GeneratorData {
            id: self.id,
            value: self.current(),
            step: self.step,
        }
    }

    pub fn restore(&mut self, data: GeneratorData) {
        self.id = data.id;
        self.value = AtomicU64::new(data.value);
        self.step = data.step;
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(NULL_ID, 0, 1)
    }
}

impl PartialEq for Generator {
    fn eq(&self, other: &Self) -> bool {
        self.snapshot() == other.snapshot()
    }
}

impl Entity for Generator {
    fn info(&self) -> &'static TypeInfo {
        &Self::INFO
    }

    fn id(&self) -> Id {
        self.id
    }

    fn record_size(&self) -> usize {
        record_len::<GeneratorData>()
    }

    fn write(&self, buffer: &mut BinaryBuffer) -> Result<()> {
        write_record(buffer, &Self::INFO, &self.snapshot())
    }

    fn equals(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<Generator>().is_some_and(|o| o == self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Decode for Generator {
    fn read(&mut self, buffer: &mut BinaryBuffer) -> Result<()> {
        let data = read_record(buffer, &Self::INFO)?;
        self.restore(data);
        Ok(())
    }
}

/// One generator per concrete type.
#[derive(Debug)]
pub struct IdGenerators {
    start: u64,
    step: u64,
    generators: Mutex<HashMap<TypeInfo, Arc<Generator>>>,
}

impl IdGenerators {
    pub fn new(start: u64, step: u64) -> Self {
        Self {
            start,
            step,
            generators: Mutex::new(HashMap::new()),
        }
    }

    /// The generator for `info`, created on first use.
    pub fn generator(&self, info: &TypeInfo) -> Arc<Generator> {
        let mut generators = self.generators.lock();
        Arc::clone(
            generators
                .entry(*info)
                .or_insert_with(|| Arc::new(Generator::new(NULL_ID, self.start, self.step))),
        )
    }

    pub fn next_id(&self, info: &TypeInfo) -> Id {
        self.generator(info).get_id()
    }

    /// Keep an explicit id; allocate one for [`NULL_ID`].
    pub fn resolve(&self, info: &TypeInfo, id: Id) -> Id {
        if id == NULL_ID {
            self.next_id(info)
        } else {
            id
        }
    }
}

impl Default for IdGenerators {
    fn default() -> Self {
        Self::new(0, 1)
    }
}
