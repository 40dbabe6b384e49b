// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Crate-wide error type.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::codec::CodecError;

/// Errors produced while writing, reading, persisting or running objects.
#[derive(Debug, Error)]
pub enum ObjectError {
    /// A read asked for more bytes than the buffer holds past its read cursor.
    #[error("buffer underflow at offset {offset}: requested {requested} bytes, {available} available")]
    Underflow {
        offset: usize,
        requested: usize,
        available: usize,
    },

    /// The type descriptor in the stream is not the one the reader expects.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// No constructor is registered for the descriptor found in the stream.
    #[error("unknown command type: {0}")]
    UnknownType(String),

    /// A composite already holds as many commands as it can.
    #[error("composite command capacity of {capacity} exceeded")]
    CapacityExceeded { capacity: usize },

    /// A command action reported a failure.
    #[error("command {command} failed: {reason}")]
    CommandFailed { command: String, reason: String },

    /// Identifier longer than the bounded name field.
    #[error("identifier `{name}` is longer than {max} bytes")]
    NameTooLong { name: String, max: usize },

    /// A constructor for this type name is already registered.
    #[error("command type already registered: {0}")]
    DuplicateType(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("short {operation} on {}: expected {expected} bytes, got {actual}", path.display())]
    ShortTransfer {
        operation: &'static str,
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ObjectError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ObjectError::Io {
            path: path.into(),
            source,
        }
    }

    /// Failure raised from inside a command action.
    pub fn command_failed(command: impl Into<String>, reason: impl Into<String>) -> Self {
        ObjectError::CommandFailed {
            command: command.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ObjectError>;
