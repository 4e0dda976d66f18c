// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! One-shot named access.
//!
//! [`LateBinding`] resolves a member by name and uses it in a single call,
//! for code that does not want to hold on to accessors. Resolution goes
//! through a registry, so repeated calls still hit the caches.
//!
//! | Operation | Members searched |
//! |-----------|------------------|
//! | [`get`](LateBinding::get), [`set`](LateBinding::set), [`invoke_method`](LateBinding::invoke_method) | public instance |
//! | [`get_static`](LateBinding::get_static), [`set_static`](LateBinding::set_static), [`invoke_static`](LateBinding::invoke_static) | public static |
//!
//! A name that resolves to nothing fails with
//! [`InvalidOperation`](crate::AccessError::InvalidOperation) naming the
//! member and the type, before anything is read, written or invoked.

use std::sync::Arc;

use crate::{
    AccessError, BindingFlags, MemberAccessor, MethodAccessor, Reflect, Reflected, Result,
    TypeAccessor, TypeAccessorRegistry, TypeDescriptor, Value, ValueAccessor
};

const STATIC_FLAGS: BindingFlags = BindingFlags::PUBLIC.union(BindingFlags::STATIC);

fn not_found(kind: &str, name: &str, descriptor: &TypeDescriptor) -> AccessError {
    AccessError::invalid_operation(format!(
        "could not find {kind} `{name}` on type `{}`",
        descriptor.type_name()
    ))
}

/// Named get/set/invoke/create over a registry.
#[derive(Debug, Clone, Copy)]
pub struct LateBinding<'r> {
    registry: &'r TypeAccessorRegistry
}

impl LateBinding<'static> {
    /// Late binding over the process-wide registry.
    #[must_use]
    pub fn global() -> Self {
        Self::new(TypeAccessorRegistry::global())
    }
}

impl Default for LateBinding<'static> {
    fn default() -> Self {
        Self::global()
    }
}

impl<'r> LateBinding<'r> {
    /// Late binding over `registry`.
    #[must_use]
    pub fn new(registry: &'r TypeAccessorRegistry) -> Self {
        Self {
            registry
        }
    }

    /// Registry used for resolution.
    #[must_use]
    pub fn registry(&self) -> &'r TypeAccessorRegistry {
        self.registry
    }

    fn member(
        &self,
        descriptor: &'static TypeDescriptor,
        name: &str,
        flags: BindingFlags
    ) -> Result<MemberAccessor> {
        self.registry
            .type_accessor_for(descriptor)
            .find_with(name, flags)?
            .ok_or_else(|| not_found("member", name, descriptor))
    }

    fn method_call(
        &self,
        accessor: &Arc<TypeAccessor>,
        name: &str,
        args: &[Value],
        flags: BindingFlags
    ) -> Result<Arc<MethodAccessor>> {
        let types: Vec<_> = args.iter().map(Value::type_ref).collect();
        accessor
            .find_method_with(name, &types, flags)?
            .ok_or_else(|| not_found("method", name, accessor.descriptor()))
    }

    /// Find a public instance member of `T`.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`](AccessError::InvalidArgument) for an empty name.
    pub fn find<T: Reflect>(&self, name: &str) -> Result<Option<MemberAccessor>> {
        self.registry.type_accessor::<T>().find(name)
    }

    /// Find a public instance member of the type of `instance`.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`](AccessError::InvalidArgument) for an empty name.
    pub fn find_on(&self, instance: &dyn Reflected, name: &str) -> Result<Option<MemberAccessor>> {
        self.registry
            .type_accessor_for(instance.descriptor())
            .find(name)
    }

    /// Read a public instance member of `instance`.
    ///
    /// # Errors
    ///
    /// [`InvalidOperation`](AccessError::InvalidOperation) when no such
    /// member exists or it cannot be read.
    pub fn get(&self, instance: &dyn Reflected, name: &str) -> Result<Value> {
        self.member(instance.descriptor(), name, BindingFlags::DEFAULT)?
            .get_value(Some(instance.as_any()))
    }

    /// Read a public static member of `T`.
    ///
    /// # Errors
    ///
    /// [`InvalidOperation`](AccessError::InvalidOperation) when no such
    /// member exists or it cannot be read.
    pub fn get_static<T: Reflect>(&self, name: &str) -> Result<Value> {
        self.member(T::type_descriptor(), name, STATIC_FLAGS)?
            .get_value(None)
    }

    /// Write a public instance member of `instance`.
    ///
    /// # Errors
    ///
    /// - [`InvalidOperation`](AccessError::InvalidOperation) when no such
    ///   member exists or it cannot be written
    /// - [`InvalidCast`](AccessError::InvalidCast) when `value` does not
    ///   coerce to the member type
    pub fn set(&self, instance: &mut dyn Reflected, name: &str, value: Value) -> Result<()> {
        self.member(instance.descriptor(), name, BindingFlags::DEFAULT)?
            .set_value(Some(instance.as_any_mut()), value)
    }

    /// Write a public static member of `T`.
    ///
    /// # Errors
    ///
    /// As for [`set`](Self::set).
    pub fn set_static<T: Reflect>(&self, name: &str, value: Value) -> Result<()> {
        self.member(T::type_descriptor(), name, STATIC_FLAGS)?
            .set_value(None, value)
    }

    /// Invoke a public instance method of `instance`, choosing the overload
    /// from the argument types.
    ///
    /// # Errors
    ///
    /// - [`InvalidOperation`](AccessError::InvalidOperation) when no method
    ///   with this name accepts the arguments
    /// - any error of [`MethodAccessor::invoke`](crate::MethodAccessor::invoke)
    pub fn invoke_method(
        &self,
        instance: &mut dyn Reflected,
        name: &str,
        args: Vec<Value>
    ) -> Result<Option<Value>> {
        let accessor = self.registry.type_accessor_for(instance.descriptor());
        self.method_call(&accessor, name, &args, BindingFlags::DEFAULT)?
            .invoke(Some(instance.as_any_mut()), args)
    }

    /// Invoke a public static method of `T`.
    ///
    /// # Errors
    ///
    /// As for [`invoke_method`](Self::invoke_method).
    pub fn invoke_static<T: Reflect>(&self, name: &str, args: Vec<Value>) -> Result<Option<Value>> {
        let accessor = self.registry.type_accessor::<T>();
        self.method_call(&accessor, name, &args, STATIC_FLAGS)?
            .invoke_static(args)
    }

    /// Create a `T` through its parameterless constructor.
    ///
    /// # Errors
    ///
    /// [`InvalidOperation`](AccessError::InvalidOperation) when `T` has no
    /// parameterless constructor.
    pub fn create_instance<T: Reflect>(&self) -> Result<T> {
        self.registry
            .type_accessor::<T>()
            .create()?
            .take::<T>()
            .map_err(|value| {
                AccessError::invalid_cast(
                    std::any::type_name::<T>(),
                    value.type_name(),
                    "created instance"
                )
            })
    }

    /// Create an instance of the type `descriptor` describes.
    ///
    /// # Errors
    ///
    /// As for [`create_instance`](Self::create_instance).
    pub fn create_instance_of(&self, descriptor: &'static TypeDescriptor) -> Result<Value> {
        self.registry.type_accessor_for(descriptor).create()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        OnceLock,
        atomic::{AtomicU32, Ordering}
    };

    use super::*;
    use crate::TypeDescriptorBuilder;

    static CREATED: AtomicU32 = AtomicU32::new(0);

    #[derive(Default)]
    struct Robot {
        name:  String,
        speed: u16
    }

    impl Reflect for Robot {
        fn type_descriptor() -> &'static TypeDescriptor {
            static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
            DESCRIPTOR.get_or_init(|| {
                TypeDescriptorBuilder::<Self>::new("Robot")
                    .property("name", |r: &Robot| r.name.clone(), |r: &mut Robot, v| r.name = v)
                    .property("speed", |r: &Robot| r.speed, |r: &mut Robot, v| r.speed = v)
                    .method_mut("accelerate", |r: &mut Robot, by: u16| {
                        r.speed += by;
                        r.speed
                    })
                    .static_readonly_property("created", || CREATED.load(Ordering::SeqCst))
                    .static_method("model", || "R2")
                    .default_constructor()
                    .build()
            })
        }
    }

    #[test]
    fn get_and_set_by_name() {
        let registry = TypeAccessorRegistry::new();
        let binding = LateBinding::new(&registry);
        let mut robot = Robot::default();
        binding.set(&mut robot, "name", Value::new("unit".to_string())).unwrap();
        assert_eq!(robot.name, "unit");
        let speed = binding.get(&robot, "SPEED").unwrap();
        assert_eq!(speed.take::<u16>().unwrap(), 0);
    }

    #[test]
    fn find_uses_the_instance_type() {
        let registry = TypeAccessorRegistry::new();
        let binding = LateBinding::new(&registry);
        let robot = Robot {
            name:  "unit".to_string(),
            speed: 3
        };
        let speed = binding.find_on(&robot, "Speed").unwrap().unwrap();
        assert_eq!(speed, binding.find::<Robot>("speed").unwrap().unwrap());
        assert_eq!(speed.get_value(Some(&robot)).unwrap().take::<u16>().unwrap(), 3);
        assert!(binding.find_on(&robot, "altitude").unwrap().is_none());
        assert!(binding.find_on(&robot, "").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn unknown_member_names_member_and_type() {
        let registry = TypeAccessorRegistry::new();
        let binding = LateBinding::new(&registry);
        let robot = Robot::default();
        let err = binding.get(&robot, "altitude").unwrap_err();
        assert!(err.is_invalid_operation());
        let text = err.to_string();
        assert!(text.contains("altitude"));
        assert!(text.contains("Robot"));
    }

    #[test]
    fn invoke_chooses_by_argument_types() {
        let registry = TypeAccessorRegistry::new();
        let binding = LateBinding::new(&registry);
        let mut robot = Robot::default();
        let out = binding
            .invoke_method(&mut robot, "accelerate", vec![Value::new(5_u8)])
            .unwrap()
            .unwrap();
        assert_eq!(out.take::<u16>().unwrap(), 5);
        let err = binding
            .invoke_method(&mut robot, "fly", Vec::new())
            .unwrap_err();
        assert!(err.is_invalid_operation());
    }

    #[test]
    fn statics_are_separate_from_instance_members() {
        let registry = TypeAccessorRegistry::new();
        let binding = LateBinding::new(&registry);
        let robot = Robot::default();
        assert!(binding.get(&robot, "created").is_err());
        assert!(binding.get_static::<Robot>("created").is_ok());
        let model = binding.invoke_static::<Robot>("model", Vec::new()).unwrap();
        assert_eq!(model.unwrap().take::<&str>().unwrap(), "R2");
        assert!(binding
            .set_static::<Robot>("created", Value::new(1_u32))
            .unwrap_err()
            .is_invalid_operation());
    }

    #[test]
    fn create_instance_by_type() {
        let registry = TypeAccessorRegistry::new();
        let binding = LateBinding::new(&registry);
        let robot: Robot = binding.create_instance().unwrap();
        assert_eq!(robot.speed, 0);
        let value = binding.create_instance_of(Robot::type_descriptor()).unwrap();
        assert!(value.is::<Robot>());
        assert!(binding.find::<Robot>("name").unwrap().is_some());
    }
}
