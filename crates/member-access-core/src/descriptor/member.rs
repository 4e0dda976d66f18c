// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Property and field descriptors.
//!
//! Both kinds carry a [`MemberInfo`]; they differ in how they are accessed:
//!
//! - a **property** reads and writes through accessor functions, so it is
//!   readable or writable exactly when the corresponding function exists;
//! - a **field** is a storage slot. It is always readable and writable
//!   unless it was declared read-only (immutable after construction).

use std::fmt;

use super::{
    Annotation, TypeRef, Visibility,
    raw::{ReadFn, WriteFn}
};

/// Kind of a value-carrying member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Accessed through getter/setter functions.
    Property,
    /// Accessed through its storage slot.
    Field
}

/// Metadata shared by every member kind.
#[derive(Debug)]
pub struct MemberInfo {
    pub(crate) name:           &'static str,
    pub(crate) member_type:    TypeRef,
    pub(crate) declaring_type: TypeRef,
    pub(crate) visibility:     Visibility,
    pub(crate) is_static:      bool,
    pub(crate) annotations:    Vec<Annotation>
}

impl MemberInfo {
    /// Member name as declared.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared value type.
    #[must_use]
    pub fn member_type(&self) -> TypeRef {
        self.member_type
    }

    /// Type that declares the member.
    #[must_use]
    pub fn declaring_type(&self) -> TypeRef {
        self.declaring_type
    }

    /// Access level.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Check if the member is bound to the type rather than an instance.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Attached annotations, in attachment order.
    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

/// Common view over property and field descriptors.
pub trait MemberDescriptor {
    /// Shared metadata.
    fn info(&self) -> &MemberInfo;

    /// Member kind.
    fn kind(&self) -> MemberKind;

    /// Member name as declared.
    fn name(&self) -> &'static str {
        self.info().name()
    }

    /// Declared value type.
    fn member_type(&self) -> TypeRef {
        self.info().member_type()
    }

    /// Access level.
    fn visibility(&self) -> Visibility {
        self.info().visibility()
    }

    /// Check if the member is bound to the type.
    fn is_static(&self) -> bool {
        self.info().is_static()
    }

    /// Attached annotations.
    fn annotations(&self) -> &[Annotation] {
        self.info().annotations()
    }
}

/// Descriptor of a property.
pub struct PropertyDescriptor {
    pub(crate) info:   MemberInfo,
    pub(crate) getter: Option<ReadFn>,
    pub(crate) setter: Option<WriteFn>
}

impl PropertyDescriptor {
    /// Check if a getter exists.
    #[must_use]
    pub fn can_read(&self) -> bool {
        self.getter.is_some()
    }

    /// Check if a setter exists.
    #[must_use]
    pub fn can_write(&self) -> bool {
        self.setter.is_some()
    }

    /// Raw getter primitive.
    #[must_use]
    pub fn raw_getter(&self) -> Option<&ReadFn> {
        self.getter.as_ref()
    }

    /// Raw setter primitive.
    #[must_use]
    pub fn raw_setter(&self) -> Option<&WriteFn> {
        self.setter.as_ref()
    }
}

impl MemberDescriptor for PropertyDescriptor {
    fn info(&self) -> &MemberInfo {
        &self.info
    }

    fn kind(&self) -> MemberKind {
        MemberKind::Property
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.info.name)
            .field("type", &self.info.member_type)
            .field("static", &self.info.is_static)
            .field("can_read", &self.can_read())
            .field("can_write", &self.can_write())
            .finish()
    }
}

/// Descriptor of a field.
pub struct FieldDescriptor {
    pub(crate) info:  MemberInfo,
    pub(crate) read:  ReadFn,
    pub(crate) write: Option<WriteFn>
}

impl FieldDescriptor {
    /// Check if the field is immutable after construction.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.write.is_none()
    }

    /// Raw slot reader.
    #[must_use]
    pub fn raw_read(&self) -> &ReadFn {
        &self.read
    }

    /// Raw slot writer, absent for read-only fields.
    #[must_use]
    pub fn raw_write(&self) -> Option<&WriteFn> {
        self.write.as_ref()
    }
}

impl MemberDescriptor for FieldDescriptor {
    fn info(&self) -> &MemberInfo {
        &self.info
    }

    fn kind(&self) -> MemberKind {
        MemberKind::Field
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.info.name)
            .field("type", &self.info.member_type)
            .field("static", &self.info.is_static)
            .field("read_only", &self.is_read_only())
            .finish()
    }
}
