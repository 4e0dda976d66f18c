// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Typed builder for [`TypeDescriptor`].
//!
//! The builder is what `#[derive(Reflect)]` expands to, and the hook handed
//! to `#[reflect(extend = path)]` for members the derive cannot see
//! (methods, computed properties, statics, constructors).
//!
//! # Member Modifiers
//!
//! [`annotate`](TypeDescriptorBuilder::annotate),
//! [`non_public`](TypeDescriptorBuilder::non_public),
//! [`reflected`](TypeDescriptorBuilder::reflected) and
//! [`parameter_names`](TypeDescriptorBuilder::parameter_names) apply to the
//! member added last:
//!
//! ```rust
//! use member_access_core::{Annotation, TypeDescriptorBuilder};
//!
//! struct Order {
//!     id:    u64,
//!     total: f64
//! }
//!
//! impl Order {
//!     fn discounted(&self, rate: f64) -> f64 {
//!         self.total * (1.0 - rate)
//!     }
//! }
//!
//! let descriptor = TypeDescriptorBuilder::<Order>::new("Order")
//!     .readonly_property("id", |o: &Order| o.id)
//!     .annotate(Annotation::Key)
//!     .property("total", |o: &Order| o.total, |o: &mut Order, v| o.total = v)
//!     .method("discounted", Order::discounted)
//!     .parameter_names(&["rate"])
//!     .build();
//!
//! assert_eq!(descriptor.properties().len(), 2);
//! assert_eq!(descriptor.methods()[0].parameters()[0].name(), "rate");
//! ```

use std::{
    any::Any,
    marker::PhantomData,
    sync::{PoisonError, RwLock}
};

use super::{
    Annotation, ConstructorDescriptor, ConstructorFn, Fallible, FieldDescriptor, MemberInfo,
    MethodDescriptor, MutMethod, ParameterDescriptor, Plain, PropertyDescriptor, RefMethod,
    StaticMethod, TypeDescriptor, TypeRef, Visibility,
    raw::{Fault, RawInvoke, ReadFn, WriteFn}
};
use crate::{Reflect, Value};

#[derive(Clone, Copy)]
enum Last {
    Property(usize),
    Field(usize),
    Method(usize),
    Constructor(usize)
}

/// Builds the descriptor of `T` member by member.
pub struct TypeDescriptorBuilder<T> {
    name:         &'static str,
    annotations:  Vec<Annotation>,
    properties:   Vec<PropertyDescriptor>,
    fields:       Vec<FieldDescriptor>,
    methods:      Vec<MethodDescriptor>,
    constructors: Vec<ConstructorDescriptor>,
    last:         Option<Last>,
    marker:       PhantomData<fn() -> T>
}

fn instance_write<T, V, S>(set: S) -> WriteFn
where
    T: Any,
    V: Any,
    S: Fn(&mut T, V) + Send + Sync + 'static
{
    WriteFn::Instance(Box::new(move |instance: &mut dyn Any, value: Value| {
        let this = instance.downcast_mut::<T>().ok_or(Fault::Instance)?;
        let value = value.take::<V>().map_err(|_| Fault::Argument(0))?;
        set(this, value);
        Ok(())
    }))
}

fn instance_read<T, V, G>(get: G) -> ReadFn
where
    T: Any,
    V: Any + Send + Sync,
    G: Fn(&T) -> V + Send + Sync + 'static
{
    ReadFn::Instance(Box::new(move |instance: &dyn Any| {
        instance.downcast_ref::<T>().map(|this| Value::new(get(this)))
    }))
}

impl<T: Any + Send + Sync> TypeDescriptorBuilder<T> {
    /// Start a descriptor for `T` under the given short name.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            annotations: Vec::new(),
            properties: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            last: None,
            marker: PhantomData
        }
    }

    /// Attach a type-level annotation.
    #[must_use]
    pub fn type_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    fn info<V: Any>(name: &'static str, is_static: bool) -> MemberInfo {
        MemberInfo {
            name,
            member_type: TypeRef::of::<V>(),
            declaring_type: TypeRef::of::<T>(),
            visibility: Visibility::Public,
            is_static,
            annotations: Vec::new()
        }
    }

    fn push_property(
        mut self,
        info: MemberInfo,
        getter: Option<ReadFn>,
        setter: Option<WriteFn>
    ) -> Self {
        self.last = Some(Last::Property(self.properties.len()));
        self.properties.push(PropertyDescriptor {
            info,
            getter,
            setter
        });
        self
    }

    fn push_field(mut self, info: MemberInfo, read: ReadFn, write: Option<WriteFn>) -> Self {
        self.last = Some(Last::Field(self.fields.len()));
        self.fields.push(FieldDescriptor {
            info,
            read,
            write
        });
        self
    }

    fn push_method(
        mut self,
        name: &'static str,
        parameters: Vec<TypeRef>,
        return_type: TypeRef,
        is_static: bool,
        invoke: RawInvoke
    ) -> Self {
        self.last = Some(Last::Method(self.methods.len()));
        self.methods.push(MethodDescriptor {
            name,
            declaring_type: TypeRef::of::<T>(),
            parameters: ParameterDescriptor::from_types(parameters),
            return_type,
            visibility: Visibility::Public,
            is_static,
            invoke,
            annotations: Vec::new()
        });
        self
    }

    /// Add a readable and writable instance property.
    #[must_use]
    pub fn property<V, G, S>(self, name: &'static str, get: G, set: S) -> Self
    where
        V: Any + Send + Sync,
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static
    {
        let info = Self::info::<V>(name, false);
        self.push_property(info, Some(instance_read(get)), Some(instance_write(set)))
    }

    /// Add an instance property without a setter.
    #[must_use]
    pub fn readonly_property<V, G>(self, name: &'static str, get: G) -> Self
    where
        V: Any + Send + Sync,
        G: Fn(&T) -> V + Send + Sync + 'static
    {
        let info = Self::info::<V>(name, false);
        self.push_property(info, Some(instance_read(get)), None)
    }

    /// Add an instance property without a getter.
    #[must_use]
    pub fn writeonly_property<V, S>(self, name: &'static str, set: S) -> Self
    where
        V: Any + Send + Sync,
        S: Fn(&mut T, V) + Send + Sync + 'static
    {
        let info = Self::info::<V>(name, false);
        self.push_property(info, None, Some(instance_write(set)))
    }

    /// Add a readable and writable static property.
    #[must_use]
    pub fn static_property<V, G, S>(self, name: &'static str, get: G, set: S) -> Self
    where
        V: Any + Send + Sync,
        G: Fn() -> V + Send + Sync + 'static,
        S: Fn(V) + Send + Sync + 'static
    {
        let info = Self::info::<V>(name, true);
        let getter = ReadFn::Static(Box::new(move || Value::new(get())));
        let setter = WriteFn::Static(Box::new(move |value: Value| {
            set(value.take::<V>().map_err(|_| Fault::Argument(0))?);
            Ok(())
        }));
        self.push_property(info, Some(getter), Some(setter))
    }

    /// Add a static property without a setter.
    #[must_use]
    pub fn static_readonly_property<V, G>(self, name: &'static str, get: G) -> Self
    where
        V: Any + Send + Sync,
        G: Fn() -> V + Send + Sync + 'static
    {
        let info = Self::info::<V>(name, true);
        let getter = ReadFn::Static(Box::new(move || Value::new(get())));
        self.push_property(info, Some(getter), None)
    }

    /// Add a mutable instance field backed by a storage slot.
    #[must_use]
    pub fn field<V, R, W>(self, name: &'static str, slot: R, slot_mut: W) -> Self
    where
        V: Any + Send + Sync + Clone,
        R: Fn(&T) -> &V + Send + Sync + 'static,
        W: Fn(&mut T) -> &mut V + Send + Sync + 'static
    {
        let info = Self::info::<V>(name, false);
        let read = instance_read(move |this: &T| slot(this).clone());
        let write = instance_write(move |this: &mut T, value: V| *slot_mut(this) = value);
        self.push_field(info, read, Some(write))
    }

    /// Add an instance field that is immutable after construction.
    #[must_use]
    pub fn readonly_field<V, R>(self, name: &'static str, slot: R) -> Self
    where
        V: Any + Send + Sync + Clone,
        R: Fn(&T) -> &V + Send + Sync + 'static
    {
        let info = Self::info::<V>(name, false);
        let read = instance_read(move |this: &T| slot(this).clone());
        self.push_field(info, read, None)
    }

    /// Add a mutable static field stored in a `RwLock`.
    ///
    /// A poisoned lock is read and written through; the stored value is
    /// always a complete `V`.
    #[must_use]
    pub fn static_field<V>(self, name: &'static str, cell: &'static RwLock<V>) -> Self
    where
        V: Any + Send + Sync + Clone
    {
        let info = Self::info::<V>(name, true);
        let read = ReadFn::Static(Box::new(move || {
            Value::new(cell.read().unwrap_or_else(PoisonError::into_inner).clone())
        }));
        let write = WriteFn::Static(Box::new(move |value: Value| {
            let value = value.take::<V>().map_err(|_| Fault::Argument(0))?;
            *cell.write().unwrap_or_else(PoisonError::into_inner) = value;
            Ok(())
        }));
        self.push_field(info, read, Some(write))
    }

    /// Add an immutable static field.
    #[must_use]
    pub fn static_readonly_field<V>(self, name: &'static str, value: &'static V) -> Self
    where
        V: Any + Send + Sync + Clone
    {
        let info = Self::info::<V>(name, true);
        let read = ReadFn::Static(Box::new(move || Value::new(value.clone())));
        self.push_field(info, read, None)
    }

    /// Add a method taking `&T`.
    #[must_use]
    pub fn method<F, Args, R>(self, name: &'static str, method: F) -> Self
    where
        F: RefMethod<T, Args, Plain<R>>
    {
        self.push_method(
            name,
            F::parameter_types(),
            F::return_type(),
            false,
            method.into_invoke()
        )
    }

    /// Add a method taking `&mut T`.
    #[must_use]
    pub fn method_mut<F, Args, R>(self, name: &'static str, method: F) -> Self
    where
        F: MutMethod<T, Args, Plain<R>>
    {
        self.push_method(
            name,
            F::parameter_types(),
            F::return_type(),
            false,
            method.into_invoke()
        )
    }

    /// Add a static method.
    #[must_use]
    pub fn static_method<F, Args, R>(self, name: &'static str, method: F) -> Self
    where
        F: StaticMethod<Args, Plain<R>>
    {
        self.push_method(
            name,
            F::parameter_types(),
            F::return_type(),
            true,
            method.into_invoke()
        )
    }

    /// Add a fallible method taking `&T`. `Err` surfaces as an invocation
    /// error carrying the original error.
    #[must_use]
    pub fn try_method<F, Args, R, E>(self, name: &'static str, method: F) -> Self
    where
        F: RefMethod<T, Args, Fallible<R, E>>
    {
        self.push_method(
            name,
            F::parameter_types(),
            F::return_type(),
            false,
            method.into_invoke()
        )
    }

    /// Add a fallible method taking `&mut T`.
    #[must_use]
    pub fn try_method_mut<F, Args, R, E>(self, name: &'static str, method: F) -> Self
    where
        F: MutMethod<T, Args, Fallible<R, E>>
    {
        self.push_method(
            name,
            F::parameter_types(),
            F::return_type(),
            false,
            method.into_invoke()
        )
    }

    /// Add a fallible static method.
    #[must_use]
    pub fn try_static_method<F, Args, R, E>(self, name: &'static str, method: F) -> Self
    where
        F: StaticMethod<Args, Fallible<R, E>>
    {
        self.push_method(
            name,
            F::parameter_types(),
            F::return_type(),
            true,
            method.into_invoke()
        )
    }

    /// Add a constructor.
    #[must_use]
    pub fn constructor<F, Args>(mut self, constructor: F) -> Self
    where
        F: ConstructorFn<T, Args>
    {
        self.last = Some(Last::Constructor(self.constructors.len()));
        self.constructors.push(ConstructorDescriptor {
            parameters: ParameterDescriptor::from_types(F::parameter_types()),
            visibility: Visibility::Public,
            construct:  constructor.into_construct()
        });
        self
    }

    /// Add a parameterless constructor backed by [`Default`].
    #[must_use]
    pub fn default_constructor(self) -> Self
    where
        T: Default
    {
        self.constructor(T::default)
    }

    fn last_info(&mut self) -> Option<&mut MemberInfo> {
        match self.last? {
            Last::Property(i) => self.properties.get_mut(i).map(|p| &mut p.info),
            Last::Field(i) => self.fields.get_mut(i).map(|f| &mut f.info),
            Last::Method(_) | Last::Constructor(_) => None
        }
    }

    /// Attach an annotation to the member added last.
    ///
    /// Before any member is added the annotation goes to the type.
    /// Constructors carry no annotations; the call is ignored for them.
    #[must_use]
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        match self.last {
            None => self.annotations.push(annotation),
            Some(Last::Method(i)) => {
                if let Some(method) = self.methods.get_mut(i) {
                    method.annotations.push(annotation);
                }
            }
            Some(Last::Constructor(_)) => {}
            Some(_) => {
                if let Some(info) = self.last_info() {
                    info.annotations.push(annotation);
                }
            }
        }
        self
    }

    /// Attach a description to the member added last.
    #[must_use]
    pub fn describe(self, text: &'static str) -> Self {
        self.annotate(Annotation::Description(text))
    }

    /// Set the access level of the member added last.
    #[must_use]
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        match self.last {
            Some(Last::Method(i)) => {
                if let Some(method) = self.methods.get_mut(i) {
                    method.visibility = visibility;
                }
            }
            Some(Last::Constructor(i)) => {
                if let Some(constructor) = self.constructors.get_mut(i) {
                    constructor.visibility = visibility;
                }
            }
            _ => {
                if let Some(info) = self.last_info() {
                    info.visibility = visibility;
                }
            }
        }
        self
    }

    /// Mark the member added last as non-public.
    #[must_use]
    pub fn non_public(self) -> Self {
        self.visibility(Visibility::NonPublic)
    }

    /// Declare that the value type of the last property or field is the
    /// reflected `V`, so values read from it can be walked further.
    ///
    /// Ignored when `V` is not the member's declared type.
    #[must_use]
    pub fn reflected<V: Reflect>(mut self) -> Self {
        let target = TypeRef::reflected::<V>();
        if let Some(info) = self.last_info()
            && info.member_type == target
        {
            info.member_type = target;
        }
        self
    }

    /// Name the parameters of the last method or constructor, in order.
    ///
    /// Extra names are ignored; missing ones keep their `argN` default.
    #[must_use]
    pub fn parameter_names(mut self, names: &[&'static str]) -> Self {
        let parameters = match self.last {
            Some(Last::Method(i)) => self.methods.get_mut(i).map(|m| &mut m.parameters),
            Some(Last::Constructor(i)) => self.constructors.get_mut(i).map(|c| &mut c.parameters),
            _ => None
        };
        if let Some(parameters) = parameters {
            for (parameter, name) in parameters.iter_mut().zip(names) {
                parameter.name = *name;
            }
        }
        self
    }

    /// Finish the descriptor.
    #[must_use]
    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor {
            name:         self.name,
            type_ref:     TypeRef::of::<T>(),
            annotations:  self.annotations,
            properties:   self.properties,
            fields:       self.fields,
            methods:      self.methods,
            constructors: self.constructors
        }
    }
}
