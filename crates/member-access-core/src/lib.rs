// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime member access for reflected Rust types.
//!
//! This crate resolves properties, fields, methods and constructors of a
//! type by name at run time and executes them through delegates that are
//! compiled once and cached. It is the runtime behind `member-access`;
//! `#[derive(Reflect)]` generates the descriptors it works on.
//!
//! # Overview
//!
//! - [`TypeDescriptor`] - Structural metadata of a type, built by the derive
//!   or by [`TypeDescriptorBuilder`]
//! - [`TypeAccessorRegistry`] - One [`TypeAccessor`] per type
//! - [`TypeAccessor`] - Name, column and signature lookups with caching
//! - [`MemberAccessor`] / [`MethodAccessor`] - Get, set and invoke
//! - [`LateBinding`] - One-shot named access
//! - [`format_template`] - `{Path.To.Property}` expansion
//! - [`prelude`] - Convenient re-exports
//!
//! # Flow
//!
//! ```text
//! TypeAccessorRegistry ──► TypeAccessor ──► MemberAccessor / MethodAccessor
//!   (one per type)          (name caches)      (delegates compiled once)
//!                                                      │
//!                                                      ▼
//!                                             factory ◄── raw primitives
//! ```
//!
//! # Usage
//!
//! ```rust
//! use std::sync::OnceLock;
//!
//! use member_access_core::prelude::*;
//!
//! #[derive(Default)]
//! struct Order {
//!     total: f64
//! }
//!
//! impl Reflect for Order {
//!     fn type_descriptor() -> &'static TypeDescriptor {
//!         static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
//!         DESCRIPTOR.get_or_init(|| {
//!             TypeDescriptorBuilder::<Self>::new("Order")
//!                 .property("total", |o: &Order| o.total, |o: &mut Order, v| o.total = v)
//!                 .default_constructor()
//!                 .build()
//!         })
//!     }
//! }
//!
//! let accessor = type_accessor::<Order>();
//! let total = accessor.find("Total").unwrap().unwrap();
//!
//! let mut order = Order::default();
//! total.set_value(Some(&mut order), Value::new(42_i32)).unwrap();
//! assert_eq!(order.total, 42.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod accessor;
mod binding;
pub mod descriptor;
mod error;
pub mod factory;
mod late_binding;
mod member_ref;
pub mod prelude;
mod registry;
mod template;
mod type_accessor;
mod value;

use std::{any::Any, sync::Arc};

pub use accessor::{
    FieldAccessor, MemberAccessor, MemberMetadata, MethodAccessor, MethodKey, PropertyAccessor,
    TableInfo, ValueAccessor
};
pub use binding::BindingFlags;
pub use descriptor::{
    Annotation, ConstructorDescriptor, FieldDescriptor, GeneratedOption, MemberDescriptor,
    MemberInfo, MemberKind, MethodDescriptor, ParameterDescriptor, PropertyDescriptor,
    TypeDescriptor, TypeDescriptorBuilder, TypeRef, Visibility
};
pub use error::{AccessError, Result};
pub use late_binding::LateBinding;
pub use member_ref::MemberRef;
pub use registry::TypeAccessorRegistry;
pub use template::{format_template, format_template_with};
pub use type_accessor::TypeAccessor;
pub use value::Value;

/// A type with a static descriptor.
///
/// Implemented by `#[derive(Reflect)]`. Manual implementations build the
/// descriptor once, typically in a `static OnceLock`.
pub trait Reflect: Any + Send + Sync {
    /// Descriptor of `Self`.
    fn type_descriptor() -> &'static TypeDescriptor;
}

/// Object-safe view of a [`Reflect`] value.
///
/// Lets late binding and templates accept `&dyn Reflected` without knowing
/// the concrete type.
pub trait Reflected: Any + Send + Sync {
    /// Descriptor of the concrete type.
    fn descriptor(&self) -> &'static TypeDescriptor;

    /// Borrow as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Borrow as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Reflect> Reflected for T {
    fn descriptor(&self) -> &'static TypeDescriptor {
        T::type_descriptor()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Accessor for `T` from the global registry.
#[must_use]
pub fn type_accessor<T: Reflect>() -> Arc<TypeAccessor> {
    TypeAccessorRegistry::global().type_accessor::<T>()
}
