// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Executable, undoable, serializable commands.
//!
//! A command moves through `Created -> Run -> (Undone)`. [`Command::run`]
//! performs the action and sets the `ok` flag only when the action succeeds;
//! [`Command::undo`] compensates only when `ok` is set and leaves the flag as
//! it is.
//!
//! # Record Format
//!
//! ```text
//! +------------------+------------------------------------------------+
//! | own TypeInfo     | body                                           |
//! |                  | Command TypeInfo (212) | id (8) | ok (1) | ... |
//! +------------------+------------------------------------------------+
//! ```
//!
//! The leading descriptor names the concrete type so that a
//! [`CommandRegistry`] can construct it before the body is read.

mod composite;
mod registry;

pub use composite::{CompositeCommand, MAX_COMMANDS};
pub use registry::{CommandRegistry, Constructor};

use crate::buffer::BinaryBuffer;
use crate::codec::{CodecResult, Cursor, CursorMut, Payload};
use crate::entity::{read_record, record_len, write_record, Entity};
use crate::error::Result;
use crate::id::{Id, IdGenerators, NULL_ID};
use crate::type_info::TypeInfo;
use crate::NAMESPACE;

/// Shared command payload: id (8, native) | ok (1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CommandData {
    pub id: Id,
    pub ok: bool,
}

impl Payload for CommandData {
    const SIZE: usize = Id::SIZE + bool::SIZE;

    fn encode(&self, out: &mut CursorMut<'_>) -> CodecResult<()> {
        self.id.encode(out)?;
        self.ok.encode(out)
    }

    fn decode(input: &mut Cursor<'_>) -> CodecResult<Self> {
        Ok(Self {
            id: Id::decode(input)?,
            ok: bool::decode(input)?,
        })
    }
}

/// Identity and execution state embedded in every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CommandCore {
    data: CommandData,
}

impl CommandCore {
    pub const INFO: TypeInfo = TypeInfo::new(NAMESPACE, "Command", 2, 1, 1);
    /// Size of the base command record.
    pub const SIZE: usize = record_len::<CommandData>();

    pub const fn new(id: Id) -> Self {
        Self {
            data: CommandData { id, ok: false },
        }
    }

    pub fn data(&self) -> &CommandData {
        &self.data
    }

    pub fn id(&self) -> Id {
        self.data.id
    }

    pub fn set_id(&mut self, id: Id) {
        self.data.id = id;
    }

    pub fn ok(&self) -> bool {
        self.data.ok
    }

    pub(crate) fn mark_ok(&mut self) {
        self.data.ok = true;
    }

    pub fn write(&self, buffer: &mut BinaryBuffer) -> Result<()> {
        write_record(buffer, &Self::INFO, &self.data)
    }

    pub fn read(&mut self, buffer: &mut BinaryBuffer) -> Result<()> {
        self.data = read_record(buffer, &Self::INFO)?;
        Ok(())
    }
}

/// An undoable action that can travel through a [`BinaryBuffer`].
///
/// Implementors provide [`Command::execute`] (and usually
/// [`Command::compensate`]) and get `run`/`undo` bookkeeping for free.
/// Types with extra payload override `body_size`, `write_body` and
/// `read_body`, calling the core first.
pub trait Command: Entity {
    fn core(&self) -> &CommandCore;

    fn core_mut(&mut self) -> &mut CommandCore;

    /// The action performed by [`Command::run`].
    fn execute(&mut self) -> Result<()>;

    /// Reverts a successful [`Command::execute`].
    fn compensate(&mut self) -> Result<()> {
        Ok(())
    }

    /// Copy of this command, same id.
    fn box_clone(&self) -> Box<dyn Command>;

    fn ok(&self) -> bool {
        self.core().ok()
    }

    /// Execute, then mark the command ok. A failed action leaves `ok` unset.
    fn run(&mut self) -> Result<()> {
        self.execute()?;
        self.core_mut().mark_ok();
        Ok(())
    }

    /// Compensate if the last run succeeded; otherwise do nothing.
    fn undo(&mut self) -> Result<()> {
        if self.ok() {
            self.compensate()
        } else {
            Ok(())
        }
    }

    fn body_size(&self) -> usize {
        CommandCore::SIZE
    }

    fn write_body(&self, buffer: &mut BinaryBuffer) -> Result<()> {
        self.core().write(buffer)
    }

    /// Read everything after the leading descriptor.
    fn read_body(&mut self, buffer: &mut BinaryBuffer, _registry: &CommandRegistry) -> Result<()> {
        self.core_mut().read(buffer)
    }

    /// Verify the leading descriptor, then read the body.
    fn read(&mut self, buffer: &mut BinaryBuffer, registry: &CommandRegistry) -> Result<()> {
        self.info().verify(buffer)?;
        self.read_body(buffer, registry)
    }

    fn clone_with_id(&self, id: Id) -> Box<dyn Command> {
        let mut copy = self.box_clone();
        copy.core_mut().set_id(id);
        copy
    }

    /// Copy under a freshly generated id.
    fn duplicate(&self, ids: &IdGenerators) -> Box<dyn Command> {
        self.clone_with_id(ids.next_id(self.info()))
    }
}

/// Write `[own TypeInfo][body]`.
pub fn write_command<C: Command + ?Sized>(command: &C, buffer: &mut BinaryBuffer) -> Result<()> {
    buffer.write(command.info())?;
    command.write_body(buffer)
}

/// Implement [`Entity`] for a command type.
///
/// The type needs an inherent `INFO: TypeInfo` constant, a [`Command`]
/// impl and `PartialEq`.
#[macro_export]
macro_rules! impl_command_entity {
    ($type:ty) => {
        impl $crate::Entity for $type {
            fn info(&self) -> &'static $crate::TypeInfo {
                &<$type>::INFO
            }

            fn id(&self) -> $crate::Id {
                $crate::Command::core(self).id()
            }

            fn record_size(&self) -> usize {
                $crate::TypeInfo::SIZE + $crate::Command::body_size(self)
            }

            fn write(&self, buffer: &mut $crate::BinaryBuffer) -> $crate::Result<()> {
                $crate::command::write_command(self, buffer)
            }

            fn equals(&self, other: &dyn ::std::any::Any) -> bool {
                other.downcast_ref::<$type>().is_some_and(|o| o == self)
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    };
}

/// Command that does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NullCommand {
    core: CommandCore,
}

impl NullCommand {
    pub const INFO: TypeInfo = TypeInfo::new(NAMESPACE, "NullCommand", 2, 1, 1);

    pub const fn new() -> Self {
        Self {
            core: CommandCore::new(NULL_ID),
        }
    }

    pub const fn with_id(id: Id) -> Self {
        Self {
            core: CommandCore::new(id),
        }
    }

    /// New command with `id`, or the next generated id when `id` is [`NULL_ID`].
    pub fn create(ids: &IdGenerators, id: Id) -> Self {
        Self::with_id(ids.resolve(&Self::INFO, id))
    }
}

impl Command for NullCommand {
    fn core(&self) -> &CommandCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CommandCore {
        &mut self.core
    }

    fn execute(&mut self) -> Result<()> {
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Command> {
        Box::new(*self)
    }
}

impl_command_entity!(NullCommand);
