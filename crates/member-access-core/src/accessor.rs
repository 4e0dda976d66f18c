// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Member and method accessors.
//!
//! An accessor wraps one descriptor and compiles its delegates on first
//! use. Accessors are created and cached by a
//! [`TypeAccessor`](crate::TypeAccessor), so the compiled delegates are
//! shared by every caller of that type accessor.
//!
//! # Module Structure
//!
//! ```text
//! accessor/
//! ├── property.rs - PropertyAccessor (getter/setter functions)
//! ├── field.rs    - FieldAccessor (storage slot)
//! ├── method.rs   - MethodAccessor and MethodKey
//! └── metadata.rs - MemberMetadata and TableInfo
//! ```
//!
//! [`MemberAccessor`] is the closed set of value-carrying accessors. Code
//! that does not care which kind it got works through [`ValueAccessor`].

mod field;
mod metadata;
mod method;
mod property;

use std::{
    any::Any,
    hash::{Hash, Hasher},
    sync::Arc
};

pub use field::FieldAccessor;
pub use metadata::{MemberMetadata, TableInfo};
pub use method::{MethodAccessor, MethodKey};
pub use property::PropertyAccessor;

use crate::{MemberKind, Result, TypeRef, Value, Visibility};

/// Read/write access to a property or field.
pub trait ValueAccessor {
    /// Member name as declared.
    fn name(&self) -> &'static str;

    /// Declared value type.
    fn member_type(&self) -> TypeRef;

    /// Type that declares the member.
    fn declaring_type(&self) -> TypeRef;

    /// Check if the member is bound to the type.
    fn is_static(&self) -> bool;

    /// Access level.
    fn visibility(&self) -> Visibility;

    /// Check if the member can be read.
    fn has_getter(&self) -> bool;

    /// Check if the member can be written.
    fn has_setter(&self) -> bool;

    /// Read the member of `instance`. Static members accept `None`.
    ///
    /// # Errors
    ///
    /// - [`InvalidOperation`](crate::AccessError::InvalidOperation) when the
    ///   member cannot be read
    /// - [`InvalidArgument`](crate::AccessError::InvalidArgument) when an
    ///   instance member gets no instance or one of another type
    fn get_value(&self, instance: Option<&dyn Any>) -> Result<Value>;

    /// Write the member of `instance`. Static members accept `None`.
    ///
    /// # Errors
    ///
    /// - [`InvalidOperation`](crate::AccessError::InvalidOperation) when the
    ///   member cannot be written
    /// - [`InvalidCast`](crate::AccessError::InvalidCast) when `value` does
    ///   not coerce to the member type
    /// - [`InvalidArgument`](crate::AccessError::InvalidArgument) as for
    ///   [`get_value`](Self::get_value)
    fn set_value(&self, instance: Option<&mut dyn Any>, value: Value) -> Result<()>;

    /// Mapping metadata, computed on first call.
    fn metadata(&self) -> &MemberMetadata;
}

/// A resolved property or field.
///
/// Two accessors are equal when they wrap the same descriptor, whichever
/// type accessor produced them.
#[derive(Debug, Clone)]
pub enum MemberAccessor {
    /// Property accessor.
    Property(Arc<PropertyAccessor>),
    /// Field accessor.
    Field(Arc<FieldAccessor>)
}

impl MemberAccessor {
    fn inner(&self) -> &dyn ValueAccessor {
        match self {
            Self::Property(property) => &**property,
            Self::Field(field) => &**field
        }
    }

    /// Member kind.
    #[must_use]
    pub fn kind(&self) -> MemberKind {
        match self {
            Self::Property(_) => MemberKind::Property,
            Self::Field(_) => MemberKind::Field
        }
    }

    /// The property accessor, if this is one.
    #[must_use]
    pub fn as_property(&self) -> Option<&Arc<PropertyAccessor>> {
        match self {
            Self::Property(property) => Some(property),
            Self::Field(_) => None
        }
    }

    /// The field accessor, if this is one.
    #[must_use]
    pub fn as_field(&self) -> Option<&Arc<FieldAccessor>> {
        match self {
            Self::Field(field) => Some(field),
            Self::Property(_) => None
        }
    }

    /// Check if both handles point at the same accessor object.
    #[must_use]
    pub fn same_instance(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Property(a), Self::Property(b)) => Arc::ptr_eq(a, b),
            (Self::Field(a), Self::Field(b)) => Arc::ptr_eq(a, b),
            _ => false
        }
    }
}

impl ValueAccessor for MemberAccessor {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn member_type(&self) -> TypeRef {
        self.inner().member_type()
    }

    fn declaring_type(&self) -> TypeRef {
        self.inner().declaring_type()
    }

    fn is_static(&self) -> bool {
        self.inner().is_static()
    }

    fn visibility(&self) -> Visibility {
        self.inner().visibility()
    }

    fn has_getter(&self) -> bool {
        self.inner().has_getter()
    }

    fn has_setter(&self) -> bool {
        self.inner().has_setter()
    }

    fn get_value(&self, instance: Option<&dyn Any>) -> Result<Value> {
        self.inner().get_value(instance)
    }

    fn set_value(&self, instance: Option<&mut dyn Any>, value: Value) -> Result<()> {
        self.inner().set_value(instance, value)
    }

    fn metadata(&self) -> &MemberMetadata {
        self.inner().metadata()
    }
}

impl PartialEq for MemberAccessor {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Property(a), Self::Property(b)) => a == b,
            (Self::Field(a), Self::Field(b)) => a == b,
            _ => false
        }
    }
}

impl Eq for MemberAccessor {}

impl Hash for MemberAccessor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Self::Property(property) => property.hash(state),
            Self::Field(field) => field.hash(state)
        }
    }
}

impl From<Arc<PropertyAccessor>> for MemberAccessor {
    fn from(property: Arc<PropertyAccessor>) -> Self {
        Self::Property(property)
    }
}

impl From<Arc<FieldAccessor>> for MemberAccessor {
    fn from(field: Arc<FieldAccessor>) -> Self {
        Self::Field(field)
    }
}
