// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Golden layouts: byte offsets of command records on the wire.
//
// Records use native byte order for the core fields, so the expected bytes
// are built from `to_ne_bytes` rather than checked-in reference files.
//
// Each test writes a known value and checks every field at its fixed offset,
// then decodes it again and re-encodes to the same bytes.

#![allow(clippy::unreadable_literal)]
#![allow(clippy::missing_panics_doc)]

use objwire::{
    BinaryBuffer, Command, CommandCore, CommandRegistry, CompositeCommand, Entity, NullCommand,
    Payload, TypeInfo, MAX_COMMANDS,
};

const INFO: usize = TypeInfo::SIZE;
const CORE: usize = INFO + 9;
const NULL_RECORD: usize = INFO + CORE;

fn info_bytes(info: &TypeInfo) -> Vec<u8> {
    info.to_bytes().unwrap()
}

/// Checks `[own TypeInfo][Command TypeInfo][id][ok]` at `offset`.
fn assert_command_header(bytes: &[u8], offset: usize, own: &TypeInfo, id: u64, ok: bool) {
    let core = offset + INFO;
    assert_eq!(&bytes[offset..core], info_bytes(own).as_slice(), "own descriptor");
    assert_eq!(
        &bytes[core..core + INFO],
        info_bytes(&CommandCore::INFO).as_slice(),
        "base descriptor"
    );
    assert_eq!(&bytes[core + INFO..core + INFO + 8], &id.to_ne_bytes(), "id");
    assert_eq!(bytes[core + INFO + 8], u8::from(ok), "ok flag");
}

#[test]
fn golden_type_info_layout() {
    let bytes = info_bytes(&CompositeCommand::INFO);
    assert_eq!(bytes.len(), 212);

    let namespace = b"objwire";
    assert_eq!(&bytes[..namespace.len()], namespace);
    assert!(bytes[namespace.len()..100].iter().all(|&b| b == 0));

    let class = b"CompositeCommand";
    assert_eq!(&bytes[100..100 + class.len()], class);
    assert!(bytes[100 + class.len()..200].iter().all(|&b| b == 0));

    assert_eq!(&bytes[200..204], &2i32.to_ne_bytes());
    assert_eq!(&bytes[204..208], &1i32.to_ne_bytes());
    assert_eq!(&bytes[208..212], &1i32.to_ne_bytes());
}

#[test]
fn golden_null_command_layout() {
    let mut cmd = NullCommand::with_id(0x0102030405060708);
    cmd.run().unwrap();

    let mut buffer = BinaryBuffer::new();
    cmd.write(&mut buffer).unwrap();
    let bytes = buffer.as_bytes();

    assert_eq!(bytes.len(), NULL_RECORD);
    assert_eq!(NULL_RECORD, 433);
    assert_command_header(bytes, 0, &NullCommand::INFO, 0x0102030405060708, true);
}

#[test]
fn golden_composite_layout() {
    let mut composite = CompositeCommand::new(7);
    composite.add(Box::new(NullCommand::with_id(3)));
    composite.run().unwrap();

    let mut buffer = BinaryBuffer::new();
    composite.write(&mut buffer).unwrap();
    let bytes = buffer.as_bytes().to_vec();

    assert_eq!(
        &bytes[0..212],
        info_bytes(&CompositeCommand::INFO).as_slice()
    );
    assert_eq!(&bytes[212..424], info_bytes(&CommandCore::INFO).as_slice());
    assert_eq!(&bytes[424..432], &7u64.to_ne_bytes());
    assert_eq!(bytes[432], 1);
    assert_eq!(&bytes[433..441], &1u64.to_ne_bytes());
    assert_eq!(&bytes[441..653], info_bytes(&NullCommand::INFO).as_slice());
    assert_command_header(&bytes, 441, &NullCommand::INFO, 3, true);
    assert_eq!(bytes.len(), 441 + NULL_RECORD);
    assert_eq!(bytes.len(), composite.record_size());

    // decode -> re-encode reproduces the same bytes
    let registry = CommandRegistry::with_builtins(MAX_COMMANDS);
    let decoded = registry.read_command(&mut buffer).unwrap();
    let mut again = BinaryBuffer::new();
    decoded.write(&mut again).unwrap();
    assert_eq!(again.as_bytes(), bytes.as_slice());
}

#[test]
fn golden_nested_composite_layout() {
    let mut inner = CompositeCommand::new(2);
    inner.add(Box::new(NullCommand::with_id(5)));
    let mut outer = CompositeCommand::new(1);
    outer.add(Box::new(NullCommand::with_id(4)));
    outer.add(Box::new(inner));

    let mut buffer = BinaryBuffer::new();
    outer.write(&mut buffer).unwrap();
    let bytes = buffer.as_bytes();

    // not run: ok bytes stay zero
    assert_command_header(bytes, 0, &CompositeCommand::INFO, 1, false);
    assert_eq!(&bytes[433..441], &2u64.to_ne_bytes());

    let first = 441;
    assert_command_header(bytes, first, &NullCommand::INFO, 4, false);

    let inner_at = first + NULL_RECORD;
    assert_command_header(bytes, inner_at, &CompositeCommand::INFO, 2, false);
    assert_eq!(
        &bytes[inner_at + 433..inner_at + 441],
        &1u64.to_ne_bytes()
    );
    assert_command_header(bytes, inner_at + 441, &NullCommand::INFO, 5, false);
    assert_eq!(bytes.len(), inner_at + 441 + NULL_RECORD);
}
