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
    AccessError, MemberDescriptor, PropertyDescriptor, Result, TypeRef, Value, Visibility,
    factory::{self, Getter, Setter, qualified}
};

/// Accessor over a [`PropertyDescriptor`].
pub struct PropertyAccessor {
    descriptor: &'static PropertyDescriptor,
    getter:     OnceLock<Option<Getter>>,
    setter:     OnceLock<Option<Setter>>,
    metadata:   OnceLock<MemberMetadata>
}

impl PropertyAccessor {
    /// Wrap a property descriptor. Nothing is compiled yet.
    #[must_use]
    pub fn new(descriptor: &'static PropertyDescriptor) -> Self {
        trace!(member = descriptor.name(), "creating property accessor");
        Self {
            descriptor,
            getter: OnceLock::new(),
            setter: OnceLock::new(),
            metadata: OnceLock::new()
        }
    }

    /// Wrapped descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &'static PropertyDescriptor {
        self.descriptor
    }

    fn label(&self) -> String {
        qualified(self.descriptor.info().declaring_type(), self.descriptor.name())
    }
}

impl ValueAccessor for PropertyAccessor {
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
        self.descriptor.can_read()
    }

    fn has_setter(&self) -> bool {
        self.descriptor.can_write()
    }

    fn get_value(&self, instance: Option<&dyn Any>) -> Result<Value> {
        let getter = self
            .getter
            .get_or_init(|| factory::create_getter(self.descriptor));
        match getter {
            Some(get) => get(instance),
            None => Err(AccessError::invalid_operation(format!(
                "property `{}` has no getter",
                self.label()
            )))
        }
    }

    fn set_value(&self, instance: Option<&mut dyn Any>, value: Value) -> Result<()> {
        let setter = self
            .setter
            .get_or_init(|| factory::create_setter(self.descriptor));
        match setter {
            Some(set) => set(instance, value),
            None => Err(AccessError::invalid_operation(format!(
                "property `{}` has no setter",
                self.label()
            )))
        }
    }

    fn metadata(&self) -> &MemberMetadata {
        self.metadata.get_or_init(|| {
            MemberMetadata::from_annotations(self.descriptor.name(), self.descriptor.annotations())
        })
    }
}

impl PartialEq for PropertyAccessor {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.descriptor, other.descriptor)
    }
}

impl Eq for PropertyAccessor {}

impl Hash for PropertyAccessor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ptr::hash(self.descriptor, state);
    }
}

impl fmt::Debug for PropertyAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyAccessor")
            .field("name", &self.descriptor.name())
            .field("type", &self.descriptor.member_type())
            .field("compiled_getter", &self.getter.get().is_some())
            .field("compiled_setter", &self.setter.get().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use super::*;
    use crate::{Annotation, TypeDescriptor, TypeDescriptorBuilder};

    struct Invoice {
        number: String,
        lines:  u32
    }

    static INVOICE: LazyLock<TypeDescriptor> = LazyLock::new(|| {
        TypeDescriptorBuilder::<Invoice>::new("Invoice")
            .property(
                "number",
                |i: &Invoice| i.number.clone(),
                |i: &mut Invoice, v| i.number = v
            )
            .annotate(Annotation::MaxLength(16))
            .readonly_property("lines", |i: &Invoice| i.lines)
            .writeonly_property("reset", |i: &mut Invoice, v: bool| {
                if v {
                    i.lines = 0;
                }
            })
            .build()
    });

    fn accessor(name: &str) -> PropertyAccessor {
        PropertyAccessor::new(INVOICE.property(name).unwrap())
    }

    #[test]
    fn get_and_set_through_delegates() {
        let number = accessor("number");
        let mut invoice = Invoice {
            number: "A-1".into(),
            lines:  2
        };
        number
            .set_value(Some(&mut invoice), Value::new("B-2".to_string()))
            .unwrap();
        let value = number.get_value(Some(&invoice)).unwrap();
        assert_eq!(value.take::<String>().unwrap(), "B-2");
    }

    #[test]
    fn read_only_property_rejects_writes() {
        let lines = accessor("lines");
        let mut invoice = Invoice {
            number: String::new(),
            lines:  1
        };
        assert!(lines.has_getter());
        assert!(!lines.has_setter());
        let err = lines
            .set_value(Some(&mut invoice), Value::new(3_u32))
            .unwrap_err();
        assert!(err.is_invalid_operation());
    }

    #[test]
    fn write_only_property_rejects_reads() {
        let reset = accessor("reset");
        let invoice = Invoice {
            number: String::new(),
            lines:  1
        };
        assert!(!reset.has_getter());
        assert!(reset.get_value(Some(&invoice)).unwrap_err().is_invalid_operation());
    }

    #[test]
    fn metadata_is_computed_once() {
        let number = accessor("number");
        let first: *const MemberMetadata = number.metadata();
        let second: *const MemberMetadata = number.metadata();
        assert_eq!(first, second);
        assert_eq!(number.metadata().max_length(), Some(16));
        assert_eq!(number.metadata().column_name(), "number");
    }

    #[test]
    fn equality_follows_descriptor() {
        assert_eq!(accessor("number"), accessor("number"));
        assert_ne!(accessor("number"), accessor("lines"));
    }
}
