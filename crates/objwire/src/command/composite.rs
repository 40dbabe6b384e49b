// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! A command made of other commands.
//!
//! # Record Format
//!
//! ```text
//! +--------------------+-------------------+-----------+---------+-----+
//! | Composite TypeInfo | base command body | count u64 | child 0 | ... |
//! +--------------------+-------------------+-----------+---------+-----+
//! ```
//!
//! Every child record starts with its own descriptor, so a
//! [`CommandRegistry`] can rebuild the right concrete type.

use tracing::error;

use super::{Command, CommandCore, CommandRegistry};
use crate::buffer::BinaryBuffer;
use crate::codec::Payload;
use crate::error::{ObjectError, Result};
use crate::id::{Id, IdGenerators, NULL_ID};
use crate::type_info::TypeInfo;
use crate::NAMESPACE;

/// Default number of children a composite can hold.
pub const MAX_COMMANDS: usize = 10;

/// Ordered, bounded list of owned child commands.
///
/// `run` executes children in insertion order and stops at the first failure
/// without rolling back the ones that already ran. `undo` walks the children
/// in the same forward order.
#[derive(Debug)]
pub struct CompositeCommand {
    core: CommandCore,
    commands: Vec<Box<dyn Command>>,
    capacity: usize,
}

impl CompositeCommand {
    pub const INFO: TypeInfo = TypeInfo::new(NAMESPACE, "CompositeCommand", 2, 1, 1);

    pub fn new(id: Id) -> Self {
        Self::with_capacity(id, MAX_COMMANDS)
    }

    /// New composite with `id`, or the next generated id when `id` is [`NULL_ID`].
    pub fn create(ids: &IdGenerators, id: Id) -> Self {
        Self::new(ids.resolve(&Self::INFO, id))
    }

    pub fn with_capacity(id: Id, capacity: usize) -> Self {
        Self {
            core: CommandCore::new(id),
            commands: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[Box<dyn Command>] {
        &self.commands
    }

    /// Take ownership of `command`, or hand back an error when full.
    pub fn try_add(&mut self, command: Box<dyn Command>) -> Result<()> {
        if self.commands.len() >= self.capacity {
            error!(
                composite = self.core.id(),
                capacity = self.capacity,
                "composite command is full"
            );
            return Err(ObjectError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.commands.push(command);
        Ok(())
    }

    /// Take ownership of `command`.
    ///
    /// # Panics
    ///
    /// Panics when the composite is already at capacity.
    pub fn add(&mut self, command: Box<dyn Command>) -> &mut Self {
        if let Err(e) = self.try_add(command) {
            panic!("cannot add command: {}", e);
        }
        self
    }
}

impl Default for CompositeCommand {
    fn default() -> Self {
        Self::new(NULL_ID)
    }
}

impl Clone for CompositeCommand {
    fn clone(&self) -> Self {
        Self {
            core: self.core,
            commands: self.commands.iter().map(|c| c.box_clone()).collect(),
            capacity: self.capacity,
        }
    }
}

impl PartialEq for CompositeCommand {
    fn eq(&self, other: &Self) -> bool {
        self.core == other.core
            && self.commands.len() == other.commands.len()
            && self
                .commands
                .iter()
                .zip(&other.commands)
                .all(|(a, b)| a.equals(b.as_any()))
    }
}

impl Command for CompositeCommand {
    fn core(&self) -> &CommandCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CommandCore {
        &mut self.core
    }

    fn execute(&mut self) -> Result<()> {
        for command in &mut self.commands {
            command.run()?;
        }
        Ok(())
    }

    fn compensate(&mut self) -> Result<()> {
        for command in &mut self.commands {
            command.undo()?;
        }
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }

    fn body_size(&self) -> usize {
        CommandCore::SIZE
            + u64::SIZE
            + self
                .commands
                .iter()
                .map(|c| c.record_size())
                .sum::<usize>()
    }

    fn write_body(&self, buffer: &mut BinaryBuffer) -> Result<()> {
        self.core.write(buffer)?;
        buffer.write(&(self.commands.len() as u64))?;
        for command in &self.commands {
            command.write(buffer)?;
        }
        Ok(())
    }

    /// Children are only replaced once every one of them decoded.
    fn read_body(&mut self, buffer: &mut BinaryBuffer, registry: &CommandRegistry) -> Result<()> {
        let mut core = CommandCore::default();
        core.read(buffer)?;

        let count = buffer.read::<u64>()?;
        if count > self.capacity as u64 {
            error!(
                count,
                capacity = self.capacity,
                "composite record holds too many commands"
            );
            return Err(ObjectError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let mut commands = Vec::with_capacity(count as usize);
        for _ in 0..count {
            commands.push(registry.read_command(buffer)?);
        }

        self.core = core;
        self.commands = commands;
        Ok(())
    }
}

crate::impl_command_entity!(CompositeCommand);
