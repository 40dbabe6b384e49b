// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime map from type name to command constructor.
//!
//! Polymorphic decoding reads a descriptor first and then needs a default
//! instance of the matching concrete type to read the body into. Types are
//! registered by full class name (`namespace::Class`); the version is checked
//! against the constructed instance after lookup.

use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;
use tracing::{debug, warn};

use super::{Command, CompositeCommand, NullCommand};
use crate::buffer::BinaryBuffer;
use crate::error::{ObjectError, Result};
use crate::id::NULL_ID;
use crate::type_info::TypeInfo;

/// Builds a default instance of one registered command type.
pub type Constructor = Box<dyn Fn() -> Box<dyn Command> + Send + Sync>;

struct Entry {
    info: TypeInfo,
    construct: Constructor,
}

/// Thread-safe command type registry.
///
/// Registration is write-once per name; lookups take a shared lock.
pub struct CommandRegistry {
    entries: RwLock<HashMap<String, Entry>>,
}

impl CommandRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Registry pre-populated with [`NullCommand`] and [`CompositeCommand`].
    ///
    /// Decoded composites get `composite_capacity` slots.
    pub fn with_builtins(composite_capacity: usize) -> Self {
        let registry = Self::new();
        // Fresh registry, names are distinct.
        let _ = registry.register_with(NullCommand::INFO, || {
            Box::new(NullCommand::new()) as Box<dyn Command>
        });
        let _ = registry.register_with(CompositeCommand::INFO, move || {
            Box::new(CompositeCommand::with_capacity(NULL_ID, composite_capacity))
                as Box<dyn Command>
        });
        registry
    }

    /// Register `T` under its descriptor, constructed with `T::default()`.
    pub fn register<T>(&self) -> Result<()>
    where
        T: Command + Default,
    {
        let info = *T::default().info();
        self.register_with(info, || Box::new(T::default()) as Box<dyn Command>)
    }

    /// Register a custom constructor for `info`.
    pub fn register_with<F>(&self, info: TypeInfo, construct: F) -> Result<()>
    where
        F: Fn() -> Box<dyn Command> + Send + Sync + 'static,
    {
        self.insert(info, Box::new(construct))
    }

    fn insert(&self, info: TypeInfo, construct: Constructor) -> Result<()> {
        let name = info.full_class_name();
        let mut entries = self.entries.write();
        if entries.contains_key(&name) {
            warn!(type_name = %name, "command type already registered");
            return Err(ObjectError::DuplicateType(name));
        }
        debug!(type_info = %info, "registered command type");
        entries.insert(name, Entry { info, construct });
        Ok(())
    }

    /// New default instance of the type named by `info`, if registered.
    pub fn create(&self, info: &TypeInfo) -> Option<Box<dyn Command>> {
        let entries = self.entries.read();
        entries
            .get(&info.full_class_name())
            .map(|entry| (entry.construct)())
    }

    pub fn contains(&self, info: &TypeInfo) -> bool {
        self.entries.read().contains_key(&info.full_class_name())
    }

    /// Descriptor registered under the same name as `info`.
    pub fn registered_info(&self, info: &TypeInfo) -> Option<TypeInfo> {
        self.entries
            .read()
            .get(&info.full_class_name())
            .map(|entry| entry.info)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Registered names, sorted.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Decode one command record of any registered type.
    ///
    /// Reads the leading descriptor, builds the registered type and reads the
    /// body into it. Unknown names and version mismatches fail after the
    /// descriptor has been consumed.
    pub fn read_command(&self, buffer: &mut BinaryBuffer) -> Result<Box<dyn Command>> {
        let info = TypeInfo::read(buffer)?;
        let Some(mut command) = self.create(&info) else {
            warn!(type_info = %info, "unknown command type");
            return Err(ObjectError::UnknownType(info.full_class_name()));
        };

        if *command.info() != info {
            warn!(
                expected = %command.info(),
                found = %info,
                "command version mismatch"
            );
            return Err(ObjectError::TypeMismatch {
                expected: command.info().to_string(),
                found: info.to_string(),
            });
        }

        command.read_body(buffer, self)?;
        Ok(command)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}
