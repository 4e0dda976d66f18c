// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust
//! use member_access_core::prelude::*;
//! ```

pub use crate::{
    AccessError, Annotation, BindingFlags, LateBinding, MemberAccessor, MethodAccessor, Reflect,
    Reflected, Result, TypeAccessor, TypeAccessorRegistry, TypeDescriptor, TypeDescriptorBuilder,
    TypeRef, Value, ValueAccessor, format_template, member_ref, type_accessor
};
