// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Command and composite behaviour against a shared counter.
//!
//! Each test thread owns its counter, so tests stay independent when run in
//! parallel.

use std::cell::{Cell, RefCell};

use objwire::{
    impl_command_entity, BinaryBuffer, Command, CommandCore, CommandRegistry, CompositeCommand,
    Context, Entity, NullCommand, ObjectError, Result, TypeInfo, MAX_COMMANDS,
};

thread_local! {
    static VALUE: Cell<i32> = const { Cell::new(0) };
    static UNDONE: RefCell<Vec<&'static str>> = const { RefCell::new(Vec::new()) };
}

fn value() -> i32 {
    VALUE.with(Cell::get)
}

fn add(delta: i32) {
    VALUE.with(|v| v.set(v.get() + delta));
}

fn compensated(class: &'static str, delta: i32) {
    add(-delta);
    UNDONE.with(|log| log.borrow_mut().push(class));
}

fn undone() -> Vec<&'static str> {
    UNDONE.with(|log| log.borrow().clone())
}

fn reset() {
    VALUE.with(|v| v.set(0));
    UNDONE.with(|log| log.borrow_mut().clear());
}

/// Counter command adding `$delta` on run and subtracting it on undo.
macro_rules! counter_command {
    ($name:ident, $class:literal, $delta:expr, $fails:expr) => {
        #[derive(Debug, Clone, PartialEq, Default)]
        struct $name {
            core: CommandCore,
        }

        impl $name {
            const INFO: TypeInfo = TypeInfo::new("tests", $class, 1, 0, 0);

            fn boxed(id: u64) -> Box<dyn Command> {
                Box::new(Self {
                    core: CommandCore::new(id),
                })
            }
        }

        impl Command for $name {
            fn core(&self) -> &CommandCore {
                &self.core
            }

            fn core_mut(&mut self) -> &mut CommandCore {
                &mut self.core
            }

            fn execute(&mut self) -> Result<()> {
                if $fails {
                    return Err(ObjectError::command_failed($class, "refused"));
                }
                add($delta);
                Ok(())
            }

            fn compensate(&mut self) -> Result<()> {
                compensated($class, $delta);
                Ok(())
            }

            fn box_clone(&self) -> Box<dyn Command> {
                Box::new(self.clone())
            }
        }

        impl_command_entity!($name);
    };
}

counter_command!(Inc, "Inc", 1, false);
counter_command!(Dec, "Dec", -1, false);
counter_command!(IncFail, "IncFail", 1, true);

/// Command with a payload of its own after the base record.
#[derive(Debug, Clone, PartialEq, Default)]
struct AddN {
    core: CommandCore,
    amount: i32,
}

impl AddN {
    const INFO: TypeInfo = TypeInfo::new("tests", "AddN", 1, 0, 0);

    fn boxed(id: u64, amount: i32) -> Box<dyn Command> {
        Box::new(Self {
            core: CommandCore::new(id),
            amount,
        })
    }
}

impl Command for AddN {
    fn core(&self) -> &CommandCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CommandCore {
        &mut self.core
    }

    fn execute(&mut self) -> Result<()> {
        add(self.amount);
        Ok(())
    }

    fn compensate(&mut self) -> Result<()> {
        compensated("AddN", self.amount);
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }

    fn body_size(&self) -> usize {
        CommandCore::SIZE + 4
    }

    fn write_body(&self, buffer: &mut BinaryBuffer) -> Result<()> {
        self.core.write(buffer)?;
        buffer.write(&self.amount)?;
        Ok(())
    }

    fn read_body(
        &mut self,
        buffer: &mut BinaryBuffer,
        _registry: &CommandRegistry,
    ) -> Result<()> {
        self.core.read(buffer)?;
        self.amount = buffer.read()?;
        Ok(())
    }
}

impl_command_entity!(AddN);

fn registry() -> CommandRegistry {
    let registry = CommandRegistry::with_builtins(MAX_COMMANDS);
    registry.register::<Inc>().unwrap();
    registry.register::<Dec>().unwrap();
    registry.register::<IncFail>().unwrap();
    registry.register::<AddN>().unwrap();
    registry
}

fn composite_of(children: Vec<Box<dyn Command>>) -> CompositeCommand {
    let mut composite = CompositeCommand::new(100);
    for child in children {
        composite.add(child);
    }
    composite
}

#[test]
fn test_run_then_undo_restores_value() {
    reset();
    let mut composite = composite_of(vec![
        Inc::boxed(1),
        Dec::boxed(2),
        Dec::boxed(3),
        Dec::boxed(4),
    ]);

    composite.run().unwrap();
    assert_eq!(value(), -2);
    assert!(composite.ok());
    assert!(composite.commands().iter().all(|c| c.ok()));

    composite.undo().unwrap();
    assert_eq!(value(), 0);
}

#[test]
fn test_undo_walks_children_in_forward_order() {
    reset();
    let mut composite = composite_of(vec![
        AddN::boxed(1, 10),
        Inc::boxed(2),
        Dec::boxed(3),
    ]);
    composite.run().unwrap();
    assert_eq!(value(), 10);

    composite.undo().unwrap();
    assert_eq!(value(), 0);
    // same order as run, not reversed
    assert_eq!(undone(), vec!["AddN", "Inc", "Dec"]);
}

#[test]
fn test_failing_child_stops_the_run() {
    reset();
    let mut composite = composite_of(vec![
        Inc::boxed(1),
        Dec::boxed(2),
        IncFail::boxed(3),
        Inc::boxed(4),
    ]);

    let err = composite.run().unwrap_err();
    assert!(matches!(
        err,
        ObjectError::CommandFailed { ref command, .. } if command == "IncFail"
    ));
    assert_eq!(value(), 0);
    assert!(!composite.ok());

    let ran: Vec<bool> = composite.commands().iter().map(|c| c.ok()).collect();
    assert_eq!(ran, vec![true, true, false, false]);

    // not ok, so undo is a no-op
    composite.undo().unwrap();
    assert_eq!(value(), 0);
}

#[test]
fn test_failed_command_is_not_undone() {
    reset();
    let mut fail = IncFail::default();
    assert!(fail.run().is_err());
    fail.undo().unwrap();
    assert_eq!(value(), 0);
}

#[test]
fn test_clone_equals_original() {
    let inc = Inc {
        core: CommandCore::new(5),
    };
    let copy = inc.box_clone();
    assert!(copy.equals(inc.as_any()));
    assert!(!copy.equals(Dec::default().as_any()));

    let composite = composite_of(vec![Inc::boxed(1), Dec::boxed(2)]);
    let copy = composite.box_clone();
    assert!(copy.equals(composite.as_any()));
}

#[test]
fn test_single_command_streaming() {
    let registry = registry();
    let original = AddN {
        core: CommandCore::new(9),
        amount: -42,
    };

    let mut buffer = BinaryBuffer::new();
    original.write(&mut buffer).unwrap();
    assert_eq!(buffer.len(), original.record_size());

    let mut decoded = AddN::default();
    decoded.read(&mut buffer, &registry).unwrap();
    assert_eq!(decoded, original);

    buffer.rewind();
    let dynamic = registry.read_command(&mut buffer).unwrap();
    assert!(dynamic.equals(original.as_any()));
}

#[test]
fn test_composite_streaming_preserves_state() {
    reset();
    let registry = registry();
    let mut composite = composite_of(vec![
        Inc::boxed(1),
        AddN::boxed(2, 7),
        Dec::boxed(3),
        Box::new(NullCommand::with_id(4)),
    ]);
    composite.run().unwrap();

    let mut buffer = BinaryBuffer::new();
    composite.write(&mut buffer).unwrap();
    assert_eq!(buffer.len(), composite.record_size());

    let mut decoded = CompositeCommand::default();
    decoded.read(&mut buffer, &registry).unwrap();
    assert_eq!(decoded, composite);
    assert!(decoded.ok());
    assert_eq!(decoded.commands()[1].info(), &AddN::INFO);

    // decoded commands are live: undo reverts the original run
    decoded.undo().unwrap();
    assert_eq!(value(), 0);
}

#[test]
fn test_composite_with_unregistered_child_fails() {
    let registry = CommandRegistry::with_builtins(MAX_COMMANDS);
    registry.register::<Inc>().unwrap();

    let composite = composite_of(vec![Inc::boxed(1), Dec::boxed(2), Inc::boxed(3)]);
    let mut buffer = BinaryBuffer::new();
    composite.write(&mut buffer).unwrap();

    let mut decoded = CompositeCommand::default();
    let err = decoded.read(&mut buffer, &registry).unwrap_err();
    assert!(matches!(err, ObjectError::UnknownType(ref name) if name == "tests::Dec"));
    assert!(decoded.is_empty());
    // the last child is never reached
    assert!(buffer.remaining() > 0);
}

#[test]
fn test_capacity_is_enforced() {
    let mut composite = CompositeCommand::default();
    for id in 0..MAX_COMMANDS as u64 {
        composite.try_add(Inc::boxed(id)).unwrap();
    }
    let err = composite.try_add(Inc::boxed(99)).unwrap_err();
    assert!(matches!(
        err,
        ObjectError::CapacityExceeded { capacity } if capacity == MAX_COMMANDS
    ));
    assert_eq!(composite.len(), MAX_COMMANDS);
}

#[test]
#[should_panic(expected = "cannot add command")]
fn test_add_beyond_capacity_panics() {
    let mut composite = CompositeCommand::default();
    for id in 0..=MAX_COMMANDS as u64 {
        composite.add(Inc::boxed(id));
    }
}

#[test]
fn test_context_registry_decodes_user_commands() {
    let ctx = Context::new();
    ctx.commands().register::<Inc>().unwrap();
    assert!(matches!(
        ctx.commands().register::<Inc>(),
        Err(ObjectError::DuplicateType(_))
    ));

    let mut composite = ctx.composite();
    composite.add(Inc::boxed(ctx.next_id(&Inc::INFO)));
    let twin = composite.duplicate(ctx.ids());
    assert_ne!(twin.id(), composite.id());

    let mut buffer = ctx.buffer();
    twin.write(&mut buffer).unwrap();
    let decoded = ctx.commands().read_command(&mut buffer).unwrap();
    assert!(decoded.equals(twin.as_any()));
    assert_eq!(decoded.id(), twin.id());
}
