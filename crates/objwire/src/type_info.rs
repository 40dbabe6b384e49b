// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors.
//!
//! Every serializable type owns one [`TypeInfo`] constant naming its
//! namespace, class and three-part interface version. The descriptor is
//! written in front of every record and compared byte for byte on read, so a
//! reader rejects data produced by a different type or by another version of
//! the same type.
//!
//! # Wire layout
//!
//! ```text
//! +---------------------------------------------------------------+
//! | namespace (100) | class_name (100) | public (4) | protected (4) |
//! | private (4)                                                   |
//! +---------------------------------------------------------------+
//! ```
//!
//! Names are UTF-8, zero padded. Versions are native-order `i32`.

use std::fmt;

use byteorder::NativeEndian;
use tracing::warn;

use crate::buffer::BinaryBuffer;
use crate::codec::{CodecError, CodecResult, Cursor, CursorMut, Payload};
use crate::error::{ObjectError, Result};

/// Capacity of a bounded identifier, in bytes.
pub const MAX_IDENTIFIER_SIZE: usize = 100;

/// Version value for descriptors that carry no version.
pub const NULL_VERSION: i32 = -1;

/// Bounded, zero-padded UTF-8 name.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identifier {
    bytes: [u8; MAX_IDENTIFIER_SIZE],
}

impl Identifier {
    pub const EMPTY: Identifier = Identifier {
        bytes: [0u8; MAX_IDENTIFIER_SIZE],
    };

    /// Build an identifier in a const context.
    ///
    /// Fails to compile when used in a constant with a name longer than
    /// [`MAX_IDENTIFIER_SIZE`] or containing NUL.
    pub const fn from_static(name: &'static str) -> Self {
        let src = name.as_bytes();
        assert!(src.len() <= MAX_IDENTIFIER_SIZE, "identifier too long");
        let mut bytes = [0u8; MAX_IDENTIFIER_SIZE];
        let mut i = 0;
        while i < src.len() {
            assert!(src[i] != 0, "identifier contains NUL");
            bytes[i] = src[i];
            i += 1;
        }
        Self { bytes }
    }

    pub fn new(name: &str) -> Result<Self> {
        let src = name.as_bytes();
        if src.len() > MAX_IDENTIFIER_SIZE {
            return Err(ObjectError::NameTooLong {
                name: name.to_string(),
                max: MAX_IDENTIFIER_SIZE,
            });
        }
        if src.contains(&0) {
            return Err(CodecError::InvalidData {
                reason: format!("identifier {:?} contains NUL", name),
            }
            .into());
        }
        let mut bytes = [0u8; MAX_IDENTIFIER_SIZE];
        bytes[..src.len()].copy_from_slice(src);
        Ok(Self { bytes })
    }

    fn len(&self) -> usize {
        self.bytes
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(MAX_IDENTIFIER_SIZE)
    }

    pub fn as_str(&self) -> &str {
        // Construction and decoding both guarantee UTF-8.
        std::str::from_utf8(&self.bytes[..self.len()]).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes[0] == 0
    }
}

impl Default for Identifier {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zero-padded name bytes. Decoding rejects invalid UTF-8 and any non-zero
/// byte after the terminator.
impl Payload for Identifier {
    const SIZE: usize = MAX_IDENTIFIER_SIZE;

    fn encode(&self, out: &mut CursorMut<'_>) -> CodecResult<()> {
        out.write_bytes(&self.bytes)
    }

    fn decode(input: &mut Cursor<'_>) -> CodecResult<Self> {
        let bytes = input.read_array::<MAX_IDENTIFIER_SIZE>()?;
        let id = Self { bytes };
        let len = id.len();
        if bytes[len..].iter().any(|&b| b != 0) {
            return Err(CodecError::InvalidData {
                reason: "identifier has bytes after its terminator".into(),
            });
        }
        if std::str::from_utf8(&bytes[..len]).is_err() {
            return Err(CodecError::InvalidData {
                reason: "identifier is not UTF-8".into(),
            });
        }
        Ok(id)
    }
}

/// Public, protected and private interface version numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InterfaceVersion {
    pub public: i32,
    pub protected: i32,
    pub private: i32,
}

impl InterfaceVersion {
    pub const NULL: InterfaceVersion =
        InterfaceVersion::new(NULL_VERSION, NULL_VERSION, NULL_VERSION);

    pub const fn new(public: i32, protected: i32, private: i32) -> Self {
        Self {
            public,
            protected,
            private,
        }
    }
}

impl fmt::Display for InterfaceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.public, self.protected, self.private)
    }
}

/// Fixed-size descriptor of a concrete serializable type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    namespace: Identifier,
    class_name: Identifier,
    version: InterfaceVersion,
}

impl TypeInfo {
    /// Encoded size (212 bytes).
    pub const SIZE: usize = 2 * MAX_IDENTIFIER_SIZE + 3 * 4;

    pub const NULL: TypeInfo = TypeInfo {
        namespace: Identifier::EMPTY,
        class_name: Identifier::EMPTY,
        version: InterfaceVersion::NULL,
    };

    pub const fn new(
        namespace: &'static str,
        class_name: &'static str,
        public: i32,
        protected: i32,
        private: i32,
    ) -> Self {
        Self {
            namespace: Identifier::from_static(namespace),
            class_name: Identifier::from_static(class_name),
            version: InterfaceVersion::new(public, protected, private),
        }
    }

    /// Runtime constructor for names not known at compile time.
    pub fn try_new(namespace: &str, class_name: &str, version: InterfaceVersion) -> Result<Self> {
        Ok(Self {
            namespace: Identifier::new(namespace)?,
            class_name: Identifier::new(class_name)?,
            version,
        })
    }

    pub fn namespace(&self) -> &str {
        self.namespace.as_str()
    }

    pub fn class_name(&self) -> &str {
        self.class_name.as_str()
    }

    pub fn version(&self) -> InterfaceVersion {
        self.version
    }

    /// `namespace::Class`
    pub fn full_class_name(&self) -> String {
        format!("{}::{}", self.namespace, self.class_name)
    }

    pub fn write(&self, buffer: &mut BinaryBuffer) -> Result<()> {
        buffer.write(self)?;
        Ok(())
    }

    pub fn read(buffer: &mut BinaryBuffer) -> Result<TypeInfo> {
        buffer.read::<TypeInfo>()
    }

    /// Read the next descriptor and fail unless it equals `self`.
    ///
    /// The descriptor bytes are consumed either way; nothing after them is.
    pub fn verify(&self, buffer: &mut BinaryBuffer) -> Result<()> {
        let found = Self::read(buffer)?;
        if found != *self {
            warn!(expected = %self, found = %found, "type descriptor mismatch");
            return Err(ObjectError::TypeMismatch {
                expected: self.to_string(),
                found: found.to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeInfo({})", self)
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{} v{}", self.namespace, self.class_name, self.version)
    }
}

/// namespace (100) | class_name (100) | public i32 | protected i32 | private i32
impl Payload for TypeInfo {
    const SIZE: usize = TypeInfo::SIZE;

    fn encode(&self, out: &mut CursorMut<'_>) -> CodecResult<()> {
        self.namespace.encode(out)?;
        self.class_name.encode(out)?;
        out.write_i32::<NativeEndian>(self.version.public)?;
        out.write_i32::<NativeEndian>(self.version.protected)?;
        out.write_i32::<NativeEndian>(self.version.private)
    }

    fn decode(input: &mut Cursor<'_>) -> CodecResult<Self> {
        Ok(Self {
            namespace: Identifier::decode(input)?,
            class_name: Identifier::decode(input)?,
            version: InterfaceVersion {
                public: input.read_i32::<NativeEndian>()?,
                protected: input.read_i32::<NativeEndian>()?,
                private: input.read_i32::<NativeEndian>()?,
            },
        })
    }
}
