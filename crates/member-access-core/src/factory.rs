// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Compiled-accessor factory.
//!
//! Turns the raw primitives of a descriptor into checked, reusable
//! delegates. A delegate is built once per owning accessor and then called
//! any number of times; building it is the only place descriptor metadata
//! is inspected.
//!
//! # Checks Performed by Delegates
//!
//! | Check | Error |
//! |-------|-------|
//! | instance member called without an instance | [`InvalidArgument`](AccessError::InvalidArgument) |
//! | instance of another type | [`InvalidArgument`](AccessError::InvalidArgument) |
//! | argument count differs from the parameter count | [`InvalidArgument`](AccessError::InvalidArgument) |
//! | value not coercible to the declared type | [`InvalidCast`](AccessError::InvalidCast) |
//! | member body returned `Err` | [`Invocation`](AccessError::Invocation) |
//!
//! Static members ignore whatever instance is passed.
//!
//! Setter factories return `None` when the member cannot be written; the
//! caller decides how to report that.

use std::any::Any;

use tracing::trace;

use crate::{
    AccessError, ConstructorDescriptor, FieldDescriptor, MemberDescriptor, MemberInfo,
    MethodDescriptor, PropertyDescriptor, Result, TypeDescriptor, TypeRef, Value,
    descriptor::raw::{Fault, ReadFn, WriteFn}
};

/// Reads a member. Pass `None` for static members.
pub type Getter = Box<dyn Fn(Option<&dyn Any>) -> Result<Value> + Send + Sync>;

/// Writes a member. Pass `None` for static members.
pub type Setter = Box<dyn Fn(Option<&mut dyn Any>, Value) -> Result<()> + Send + Sync>;

/// Invokes a method. `Ok(None)` for methods returning `()`.
pub type Invoker =
    Box<dyn Fn(Option<&mut dyn Any>, Vec<Value>) -> Result<Option<Value>> + Send + Sync>;

/// Creates an instance from arguments.
pub type Constructor = Box<dyn Fn(Vec<Value>) -> Result<Value> + Send + Sync>;

/// `Type::member` label used in error messages.
pub(crate) fn qualified(declaring_type: TypeRef, member: &str) -> String {
    format!("{}::{member}", declaring_type.short_name())
}

fn missing_instance(label: &str) -> AccessError {
    AccessError::invalid_argument(format!("`{label}` requires an instance"))
}

fn wrong_instance(label: &str, declaring_type: TypeRef) -> AccessError {
    AccessError::invalid_argument(format!(
        "`{label}` expects an instance of `{}`",
        declaring_type.name()
    ))
}

fn coerce(value: Value, target: TypeRef, context: impl FnOnce() -> String) -> Result<Value> {
    value
        .coerce_to(&target)
        .map_err(|value| AccessError::invalid_cast(target.name(), value.type_name(), context()))
}

fn check_arity(label: &str, kind: &str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        return Ok(());
    }
    Err(AccessError::invalid_argument(format!(
        "{kind} `{label}` expected {expected} parameters but got {actual}"
    )))
}

fn fault_error(fault: Fault, label: &str, declaring_type: TypeRef) -> AccessError {
    match fault {
        Fault::Instance => wrong_instance(label, declaring_type),
        Fault::Argument(index) => AccessError::invalid_argument(format!(
            "argument {index} of `{label}` has an unexpected type"
        )),
        Fault::Failed(source) => AccessError::invocation(label, source)
    }
}

fn read_delegate(info: &'static MemberInfo, read: &'static ReadFn) -> Getter {
    let label = qualified(info.declaring_type(), info.name());
    let nested = info.member_type().descriptor();
    Box::new(move |instance: Option<&dyn Any>| {
        let value = match read {
            ReadFn::Static(read) => read(),
            ReadFn::Instance(read) => {
                let instance = instance.ok_or_else(|| missing_instance(&label))?;
                read(instance).ok_or_else(|| wrong_instance(&label, info.declaring_type()))?
            }
        };
        Ok(match nested {
            Some(descriptor) => value.with_descriptor(descriptor),
            None => value
        })
    })
}

fn write_delegate(info: &'static MemberInfo, write: &'static WriteFn) -> Setter {
    let label = qualified(info.declaring_type(), info.name());
    Box::new(move |instance: Option<&mut dyn Any>, value: Value| {
        let value = coerce(value, info.member_type(), || format!("`{label}`"))?;
        let written = match write {
            WriteFn::Static(write) => write(value),
            WriteFn::Instance(write) => {
                let instance = instance.ok_or_else(|| missing_instance(&label))?;
                write(instance, value)
            }
        };
        written.map_err(|fault| fault_error(fault, &label, info.declaring_type()))
    })
}

/// Build a getter for a property. `None` when the property has no getter.
#[must_use]
pub fn create_getter(property: &'static PropertyDescriptor) -> Option<Getter> {
    let read = property.raw_getter()?;
    trace!(member = property.name(), "compiling property getter");
    Some(read_delegate(property.info(), read))
}

/// Build a setter for a property. `None` when the property has no setter.
#[must_use]
pub fn create_setter(property: &'static PropertyDescriptor) -> Option<Setter> {
    let write = property.raw_setter()?;
    trace!(member = property.name(), "compiling property setter");
    Some(write_delegate(property.info(), write))
}

/// Build a getter over a field's storage slot.
#[must_use]
pub fn create_field_getter(field: &'static FieldDescriptor) -> Getter {
    trace!(member = field.name(), "compiling field getter");
    read_delegate(field.info(), field.raw_read())
}

/// Build a setter over a field's storage slot. `None` for read-only fields.
#[must_use]
pub fn create_field_setter(field: &'static FieldDescriptor) -> Option<Setter> {
    let write = field.raw_write()?;
    trace!(member = field.name(), "compiling field setter");
    Some(write_delegate(field.info(), write))
}

/// Build an invoker for a method.
#[must_use]
pub fn create_invoker(method: &'static MethodDescriptor) -> Invoker {
    let label = qualified(method.declaring_type(), method.name());
    trace!(member = method.name(), parameters = method.parameters().len(), "compiling invoker");
    Box::new(move |instance: Option<&mut dyn Any>, args: Vec<Value>| {
        check_arity(&label, "method", method.parameters().len(), args.len())?;
        let args = args
            .into_iter()
            .zip(method.parameters())
            .map(|(arg, parameter)| {
                coerce(arg, parameter.parameter_type(), || {
                    format!("parameter `{}` of `{label}`", parameter.name())
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let instance = if method.is_static() {
            None
        } else {
            Some(instance.ok_or_else(|| missing_instance(&label))?)
        };
        (method.raw_invoke())(instance, args)
            .map_err(|fault| fault_error(fault, &label, method.declaring_type()))
    })
}

/// Build a delegate for a constructor of `descriptor`'s type.
///
/// Created values carry `descriptor`, so they can be used as instances
/// for further lookups right away.
#[must_use]
pub fn create_constructor(
    descriptor: &'static TypeDescriptor,
    constructor: &'static ConstructorDescriptor
) -> Constructor {
    let label = qualified(descriptor.type_ref(), "new");
    trace!(
        type_name = descriptor.name(),
        parameters = constructor.parameters().len(),
        "compiling constructor"
    );
    Box::new(move |args: Vec<Value>| {
        check_arity(&label, "constructor", constructor.parameters().len(), args.len())?;
        let args = args
            .into_iter()
            .zip(constructor.parameters())
            .map(|(arg, parameter)| {
                coerce(arg, parameter.parameter_type(), || {
                    format!("parameter `{}` of `{label}`", parameter.name())
                })
            })
            .collect::<Result<Vec<_>>>()?;
        (constructor.raw_construct())(args)
            .map(|value| value.with_descriptor(descriptor))
            .map_err(|fault| fault_error(fault, &label, descriptor.type_ref()))
    })
}

/// Build a delegate for the public parameterless constructor, if the type
/// has one.
#[must_use]
pub fn create_default_constructor(descriptor: &'static TypeDescriptor) -> Option<Constructor> {
    descriptor
        .constructors()
        .iter()
        .find(|c| c.is_public() && c.is_parameterless())
        .map(|constructor| create_constructor(descriptor, constructor))
}
