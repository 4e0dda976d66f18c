// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Boxed dynamic values.
//!
//! Every compiled getter returns a [`Value`] and every setter, invoker and
//! constructor consumes them. A value remembers the concrete type it was
//! created from and, when the type is reflected, its descriptor so callers
//! can keep walking member paths.
//!
//! # Coercion
//!
//! Arguments are coerced to the declared type before they reach a member:
//!
//! | From | To |
//! |------|----|
//! | any `T` | `T` |
//! | signed/unsigned integers | any wider integer or float that holds every value losslessly |
//! | `f32` | `f64` |
//! | `char` | `u32` |
//! | `&'static str` | `String` |
//!
//! The same table drives overload scoring through
//! [`TypeRef::is_assignable_from`](crate::TypeRef::is_assignable_from).

use std::{
    any::{Any, TypeId},
    fmt
};

use crate::{Reflect, TypeDescriptor, TypeRef};

/// A type-erased, owned value.
pub struct Value {
    inner:      Box<dyn Any + Send + Sync>,
    type_id:    TypeId,
    type_name:  &'static str,
    descriptor: Option<&'static TypeDescriptor>
}

impl Value {
    /// Box a value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner:      Box::new(value),
            type_id:    TypeId::of::<T>(),
            type_name:  std::any::type_name::<T>(),
            descriptor: None
        }
    }

    /// Box a reflected value, keeping its descriptor for nested lookups.
    pub fn reflected<T: Reflect>(value: T) -> Self {
        Self::new(value).with_descriptor(T::type_descriptor())
    }

    /// Attach a descriptor to an already boxed value.
    #[must_use]
    pub fn with_descriptor(mut self, descriptor: &'static TypeDescriptor) -> Self {
        if descriptor.type_id() == self.type_id {
            self.descriptor = Some(descriptor);
        }
        self
    }

    /// `TypeId` of the boxed value.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Full type name of the boxed value.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Type reference describing the boxed value.
    #[must_use]
    pub fn type_ref(&self) -> TypeRef {
        TypeRef::from_parts(self.type_id, self.type_name)
    }

    /// Descriptor of the boxed value when it is a reflected type.
    #[must_use]
    pub fn descriptor(&self) -> Option<&'static TypeDescriptor> {
        self.descriptor
    }

    /// Check the concrete type.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Borrow the value as `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Mutably borrow the value as `T`.
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.inner.downcast_mut::<T>()
    }

    /// Unbox the value as `T`, handing it back untouched on mismatch.
    pub fn take<T: Any>(self) -> std::result::Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }
        match self.inner.downcast::<T>() {
            Ok(boxed) => Ok(*boxed),
            Err(inner) => Err(Self {
                inner,
                type_id: self.type_id,
                type_name: self.type_name,
                descriptor: self.descriptor
            })
        }
    }

    /// Borrow the boxed value as `&dyn Any`, e.g. to use it as an instance.
    #[must_use]
    pub fn as_any(&self) -> &dyn Any {
        &*self.inner
    }

    /// Mutably borrow the boxed value as `&mut dyn Any`.
    pub fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut *self.inner
    }

    /// Coerce the value to `target` using the table in the module docs.
    ///
    /// Returns the value unchanged in `Err` when no conversion applies.
    pub fn coerce_to(self, target: &TypeRef) -> std::result::Result<Self, Self> {
        if self.type_id == target.id() {
            return Ok(self);
        }
        match widen(&self, target.id()) {
            Some(widened) => Ok(widened),
            None => Err(self)
        }
    }

    /// Render scalar and string values, including `Option`s of them.
    ///
    /// `None` renders as an empty string. Returns `None` for values that
    /// have no textual form here (structs, collections).
    #[must_use]
    pub fn to_display_string(&self) -> Option<String> {
        macro_rules! render {
            ($($ty:ty),* $(,)?) => {
                $(
                    if let Some(v) = self.downcast_ref::<$ty>() {
                        return Some(v.to_string());
                    }
                    if let Some(v) = self.downcast_ref::<Option<$ty>>() {
                        return Some(v.as_ref().map(ToString::to_string).unwrap_or_default());
                    }
                )*
            };
        }

        render!(
            String, &'static str, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64,
            u128, usize, f32, f64
        );
        None
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Value");
        out.field("type", &self.type_name);
        if let Some(text) = self.to_display_string() {
            out.field("value", &text);
        }
        out.finish()
    }
}

macro_rules! widenings {
    ($($from:ty => [$($to:ty),+]);+ $(;)?) => {
        fn widen(value: &Value, target: TypeId) -> Option<Value> {
            $(
                if let Some(v) = value.downcast_ref::<$from>() {
                    $(
                        if target == TypeId::of::<$to>() {
                            return Some(Value::new(<$to>::from(*v)));
                        }
                    )+
                    return None;
                }
            )+
            if target == TypeId::of::<String>()
                && let Some(v) = value.downcast_ref::<&'static str>()
            {
                return Some(Value::new((*v).to_owned()));
            }
            None
        }

        /// Check whether a value of type `from` coerces to `to`.
        pub(crate) fn can_coerce(from: TypeId, to: TypeId) -> bool {
            if from == to {
                return true;
            }
            $(
                if from == TypeId::of::<$from>() {
                    return false $(|| to == TypeId::of::<$to>())+;
                }
            )+
            from == TypeId::of::<&'static str>() && to == TypeId::of::<String>()
        }
    };
}

widenings! {
    i8 => [i16, i32, i64, i128, isize, f32, f64];
    i16 => [i32, i64, i128, isize, f32, f64];
    i32 => [i64, i128, f64];
    i64 => [i128];
    u8 => [u16, u32, u64, u128, usize, i16, i32, i64, i128, isize, f32, f64];
    u16 => [u32, u64, u128, usize, i32, i64, i128, f32, f64];
    u32 => [u64, u128, i64, i128, f64];
    u64 => [u128, i128];
    f32 => [f64];
    char => [u32, u64, u128];
}
