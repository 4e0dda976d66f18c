// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type-erased access primitives stored in descriptors.
//!
//! These closures are what `#[derive(Reflect)]` and the builder compile
//! typed code down to. They trust their inputs: argument counts and types
//! are checked by the [`factory`](crate::factory) before a primitive runs,
//! so a [`Fault`] only reports what the primitive itself could not handle.

use std::{any::Any, error::Error as StdError, fmt};

use crate::Value;

/// Failure reported by a raw primitive.
pub enum Fault {
    /// The instance was missing or not of the declaring type.
    Instance,

    /// The argument at this position had an unexpected type.
    Argument(usize),

    /// The member body returned an error.
    Failed(Box<dyn StdError + Send + Sync>)
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance => f.write_str("Instance"),
            Self::Argument(index) => f.debug_tuple("Argument").field(index).finish(),
            Self::Failed(err) => f.debug_tuple("Failed").field(&err.to_string()).finish()
        }
    }
}

/// Reads a member of an instance. `None` when the instance has the wrong
/// type.
pub type InstanceRead = Box<dyn Fn(&dyn Any) -> Option<Value> + Send + Sync>;

/// Reads a static member.
pub type StaticRead = Box<dyn Fn() -> Value + Send + Sync>;

/// Writes a member of an instance.
pub type InstanceWrite = Box<dyn Fn(&mut dyn Any, Value) -> Result<(), Fault> + Send + Sync>;

/// Writes a static member.
pub type StaticWrite = Box<dyn Fn(Value) -> Result<(), Fault> + Send + Sync>;

/// Invokes a method. `None` output means the method returns `()`.
pub type RawInvoke =
    Box<dyn Fn(Option<&mut dyn Any>, Vec<Value>) -> Result<Option<Value>, Fault> + Send + Sync>;

/// Constructs an instance from arguments.
pub type RawConstruct = Box<dyn Fn(Vec<Value>) -> Result<Value, Fault> + Send + Sync>;

/// Read primitive of a property or field.
pub enum ReadFn {
    /// Bound to an instance.
    Instance(InstanceRead),
    /// Bound to the type.
    Static(StaticRead)
}

/// Write primitive of a property or field.
pub enum WriteFn {
    /// Bound to an instance.
    Instance(InstanceWrite),
    /// Bound to the type.
    Static(StaticWrite)
}

/// Pull the next argument as `A`.
pub(crate) fn take_arg<A: Any>(
    args: &mut std::vec::IntoIter<Value>,
    index: usize
) -> Result<A, Fault> {
    args.next()
        .ok_or(Fault::Argument(index))?
        .take::<A>()
        .map_err(|_| Fault::Argument(index))
}

/// Box a method result, mapping `()` to "no value".
pub(crate) fn wrap_output<R: Any + Send + Sync>(output: R) -> Option<Value> {
    if std::any::TypeId::of::<R>() == std::any::TypeId::of::<()>() {
        None
    } else {
        Some(Value::new(output))
    }
}
