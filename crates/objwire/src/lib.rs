// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! objwire - typed binary object serialization
//!
//! Entities with a fixed-layout payload are written to and read from an
//! untyped [`BinaryBuffer`], each record prefixed by a [`TypeInfo`] that is
//! checked byte-for-byte on the way back in. Commands add run/undo semantics,
//! and composites nest heterogeneous commands that are rebuilt through a
//! [`CommandRegistry`].
//!
//! # Quick Start
//!
//! ```
//! use objwire::{Command, Context, Entity, NullCommand};
//!
//! let ctx = Context::new();
//! let mut composite = ctx.composite();
//! let child = NullCommand::with_id(ctx.next_id(&NullCommand::INFO));
//! composite.add(Box::new(child));
//! composite.run().unwrap();
//!
//! let mut buffer = ctx.buffer();
//! composite.write(&mut buffer).unwrap();
//!
//! let decoded = ctx.commands().read_command(&mut buffer).unwrap();
//! assert!(decoded.equals(composite.as_any()));
//! ```
//!
//! # Record Layout
//!
//! | Record | Bytes |
//! |--------|-------|
//! | Object | `TypeInfo` (212) + id (8) |
//! | Command | own `TypeInfo` + Command `TypeInfo` + id (8) + ok (1) |
//! | Composite | Command layout + count (8) + child records |
//!
//! Integers use native byte order unless wrapped in an endian-tagged
//! [`Wire`] field.

pub mod buffer;
pub mod codec;
pub mod command;
pub mod config;
pub mod context;
pub mod entity;
pub mod error;
pub mod id;
pub mod type_info;

pub use buffer::BinaryBuffer;
pub use codec::{
    CodecError, Payload, Wire, WireF32, WireF64, WireI32, WireI64, WireU32, WireU64, WireValue,
};
pub use command::{
    write_command, Command, CommandCore, CommandData, CommandRegistry, CompositeCommand,
    NullCommand, MAX_COMMANDS,
};
pub use config::{Config, ConfigBuilder};
pub use context::Context;
pub use entity::{Decode, Entity, Object, ObjectData};
pub use error::{ObjectError, Result};
pub use id::{Generator, Id, IdGenerators, NULL_ID};
pub use type_info::{Identifier, InterfaceVersion, TypeInfo};

/// Namespace of every type descriptor defined by this crate.
pub const NAMESPACE: &str = "objwire";
