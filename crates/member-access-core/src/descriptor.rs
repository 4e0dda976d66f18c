// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Structural metadata for reflected types.
//!
//! Rust has no run-time reflection, so this module is the type system the
//! rest of the crate resolves names against. A [`TypeDescriptor`] is built
//! once per type (by `#[derive(Reflect)]` or by hand through
//! [`TypeDescriptorBuilder`]) and lives for the rest of the process.
//!
//! # Module Structure
//!
//! ```text
//! descriptor/
//! ├── annotation.rs - Declarative metadata (table, column, key, ...)
//! ├── member.rs     - Property and field descriptors
//! ├── method.rs     - Method, parameter and constructor descriptors
//! ├── raw.rs        - Type-erased access primitives
//! └── builder.rs    - Typed builder producing descriptors
//! ```
//!
//! Descriptors hold *raw* primitives: type-erased closures produced from
//! statically typed code. They perform no argument validation and report
//! problems as [`Fault`](raw::Fault)s. The [`factory`](crate::factory)
//! wraps them into checked delegates.

mod annotation;
mod builder;
mod member;
mod method;
pub mod raw;

use std::{
    any::{Any, TypeId},
    fmt,
    hash::{Hash, Hasher}
};

pub use annotation::{Annotation, GeneratedOption};
pub use builder::TypeDescriptorBuilder;
pub use member::{FieldDescriptor, MemberDescriptor, MemberInfo, MemberKind, PropertyDescriptor};
pub use method::{
    ConstructorDescriptor, ConstructorFn, Fallible, MethodDescriptor, MutMethod,
    ParameterDescriptor, Plain, RefMethod, StaticMethod
};

use crate::{Reflect, value::can_coerce};

/// Access level of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Visible outside the declaring module (`pub`).
    #[default]
    Public,

    /// Anything narrower than `pub`.
    NonPublic
}

/// Lightweight handle to a Rust type.
///
/// Equality and hashing use the [`TypeId`] only. A reference created with
/// [`TypeRef::reflected`] additionally knows the type's descriptor.
#[derive(Clone, Copy)]
pub struct TypeRef {
    id:         TypeId,
    name:       &'static str,
    descriptor: Option<fn() -> &'static TypeDescriptor>
}

impl TypeRef {
    /// Reference to `T`.
    #[must_use]
    pub fn of<T: ?Sized + Any>() -> Self {
        Self {
            id:         TypeId::of::<T>(),
            name:       std::any::type_name::<T>(),
            descriptor: None
        }
    }

    /// Reference to a reflected `T`, carrying its descriptor.
    #[must_use]
    pub fn reflected<T: Reflect>() -> Self {
        Self {
            descriptor: Some(T::type_descriptor),
            ..Self::of::<T>()
        }
    }

    pub(crate) fn from_parts(id: TypeId, name: &'static str) -> Self {
        Self {
            id,
            name,
            descriptor: None
        }
    }

    /// The `TypeId`.
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Full type name as reported by [`std::any::type_name`].
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without the module path of the outermost type.
    ///
    /// `alloc::string::String` becomes `String`;
    /// `core::option::Option<alloc::string::String>` becomes
    /// `Option<alloc::string::String>`.
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        let head_end = self.name.find('<').unwrap_or(self.name.len());
        let start = self.name[..head_end].rfind("::").map_or(0, |pos| pos + 2);
        &self.name[start..]
    }

    /// Check if this is `()`, the return type of methods without a value.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.id == TypeId::of::<()>()
    }

    /// Descriptor of the referenced type when it is known to be reflected.
    #[must_use]
    pub fn descriptor(&self) -> Option<&'static TypeDescriptor> {
        self.descriptor.map(|get| get())
    }

    /// Check whether a value of type `source` can be stored in, or passed
    /// as, this type. See [`Value::coerce_to`](crate::Value::coerce_to).
    #[must_use]
    pub fn is_assignable_from(&self, source: &TypeRef) -> bool {
        can_coerce(source.id, self.id)
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({})", self.name)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Structural metadata of one reflected type.
///
/// Members are kept in declaration order; that order decides ties in
/// case-insensitive lookups and overload scoring.
pub struct TypeDescriptor {
    pub(crate) name:         &'static str,
    pub(crate) type_ref:     TypeRef,
    pub(crate) annotations:  Vec<Annotation>,
    pub(crate) properties:   Vec<PropertyDescriptor>,
    pub(crate) fields:       Vec<FieldDescriptor>,
    pub(crate) methods:      Vec<MethodDescriptor>,
    pub(crate) constructors: Vec<ConstructorDescriptor>
}

impl TypeDescriptor {
    /// Short type name (e.g. `Order`).
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Reference to the described type.
    #[must_use]
    pub fn type_ref(&self) -> TypeRef {
        self.type_ref
    }

    /// `TypeId` of the described type.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_ref.id()
    }

    /// Full Rust path of the described type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_ref.name()
    }

    /// Type-level annotations.
    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Properties in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Methods in declaration order.
    #[must_use]
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// Constructors in declaration order.
    #[must_use]
    pub fn constructors(&self) -> &[ConstructorDescriptor] {
        &self.constructors
    }

    /// Property with exactly this name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// Field with exactly this name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Check if `instance` is of the described type.
    #[must_use]
    pub fn is_instance(&self, instance: &dyn Any) -> bool {
        (*instance).type_id() == self.type_id()
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("type", &self.type_ref)
            .field("annotations", &self.annotations)
            .field("properties", &self.properties)
            .field("fields", &self.fields)
            .field("methods", &self.methods)
            .field("constructors", &self.constructors.len())
            .finish()
    }
}
