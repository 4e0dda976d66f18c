// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use std::{
    any::Any,
    fmt,
    hash::{Hash, Hasher},
    ptr,
    sync::OnceLock
};

use tracing::trace;

use super::{MemberMetadata, ValueAccessor};
use crate::{
    AccessError, FieldDescriptor, MemberDescriptor, Result, TypeRef, Value, Visibility,
    factory::{self, Getter, Setter, qualified}
};

/// Accessor over a [`FieldDescriptor`].
///
/// Fields are always readable. They are writable unless declared
/// read-only.
pub struct FieldAccessor {
    descriptor: &'static FieldDescriptor,
    getter:     OnceLock<Getter>,
    setter:     OnceLock<Option<Setter>>,
    metadata:   OnceLock<MemberMetadata>
}

impl FieldAccessor {
    /// Wrap a field descriptor. Nothing is compiled yet.
    #[must_use]
    pub fn new(descriptor: &'static FieldDescriptor) -> Self {
        trace!(member = descriptor.name(), "creating field accessor");
        Self {
            descriptor,
            getter: OnceLock::new(),
            setter: OnceLock::new(),
            metadata: OnceLock::new()
        }
    }

    /// Wrapped descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &'static FieldDescriptor {
        self.descriptor
    }

    /// Check if the field is immutable after construction.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.descriptor.is_read_only()
    }
}

impl ValueAccessor for FieldAccessor {
    fn name(&self) -> &'static str {
        self.descriptor.name()
    }

    fn member_type(&self) -> TypeRef {
        self.descriptor.member_type()
    }

    fn declaring_type(&self) -> TypeRef {
        self.descriptor.info().declaring_type()
    }

    fn is_static(&self) -> bool {
        self.descriptor.is_static()
    }

    fn visibility(&self) -> Visibility {
        self.descriptor.visibility()
    }

    fn has_getter(&self) -> bool {
        true
    }

    fn has_setter(&self) -> bool {
        !self.descriptor.is_read_only()
    }

    fn get_value(&self, instance: Option<&dyn Any>) -> Result<Value> {
        let get = self
            .getter
            .get_or_init(|| factory::create_field_getter(self.descriptor));
        get(instance)
    }

    fn set_value(&self, instance: Option<&mut dyn Any>, value: Value) -> Result<()> {
        let setter = self
            .setter
            .get_or_init(|| factory::create_field_setter(self.descriptor));
        match setter {
            Some(set) => set(instance, value),
            None => Err(AccessError::invalid_operation(format!(
                "field `{}` is read-only",
                qualified(self.declaring_type(), self.name())
            )))
        }
    }

    fn metadata(&self) -> &MemberMetadata {
        self.metadata.get_or_init(|| {
            MemberMetadata::from_annotations(self.descriptor.name(), self.descriptor.annotations())
        })
    }
}

impl PartialEq for FieldAccessor {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.descriptor, other.descriptor)
    }
}

impl Eq for FieldAccessor {}

impl Hash for FieldAccessor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ptr::hash(self.descriptor, state);
    }
}

impl fmt::Debug for FieldAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessor")
            .field("name", &self.descriptor.name())
            .field("type", &self.descriptor.member_type())
            .field("read_only", &self.is_read_only())
            .finish()
    }
}
