// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Explicit owner of identity and type state.
//!
//! A [`Context`] is constructed once and passed to whatever creates or decodes
//! entities. It replaces process-wide id counters and self-registering type
//! tables: two contexts never share ids or registrations.

use tracing::debug;

use crate::buffer::BinaryBuffer;
use crate::command::{Command, CommandRegistry, CompositeCommand};
use crate::config::Config;
use crate::entity::{Entity, Object};
use crate::error::Result;
use crate::id::{Id, IdGenerators};
use crate::type_info::TypeInfo;

#[derive(Debug)]
pub struct Context {
    config: Config,
    ids: IdGenerators,
    commands: CommandRegistry,
}

impl Context {
    /// Context with the default configuration.
    pub fn new() -> Self {
        Self::build(Config::default())
    }

    /// Context for a validated `config`.
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: Config) -> Self {
        debug!(?config, "creating serialization context");
        Self {
            ids: IdGenerators::new(config.id_start, config.id_step),
            commands: CommandRegistry::with_builtins(config.composite_capacity),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ids(&self) -> &IdGenerators {
        &self.ids
    }

    /// Registry holding the built-in commands plus anything registered since.
    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    pub fn next_id(&self, info: &TypeInfo) -> Id {
        self.ids.next_id(info)
    }

    /// New [`Object`] with a generated id.
    pub fn object(&self) -> Object {
        Object::new(self.next_id(&Object::INFO))
    }

    /// Empty composite with a generated id and the configured capacity.
    pub fn composite(&self) -> CompositeCommand {
        CompositeCommand::with_capacity(
            self.next_id(&CompositeCommand::INFO),
            self.config.composite_capacity,
        )
    }

    /// Default-constructed command of type `T` with a generated id.
    pub fn command<T: Command + Default>(&self) -> T {
        let mut command = T::default();
        let id = self.next_id(command.info());
        command.core_mut().set_id(id);
        command
    }

    /// Empty buffer with the configured capacity.
    pub fn buffer(&self) -> BinaryBuffer {
        BinaryBuffer::with_capacity(self.config.buffer_capacity)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
