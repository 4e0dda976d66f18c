// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Registry of type accessors.
//!
//! A registry holds at most one [`TypeAccessor`] per type. Concurrent first
//! requests for the same type converge on a single accessor, so every
//! caller shares its caches and compiled delegates.
//!
//! Use [`TypeAccessorRegistry::global`] for the process-wide registry, or
//! construct one to keep caches scoped (tests, plugins):
//!
//! ```rust
//! use member_access_core::{TypeAccessorRegistry, TypeDescriptor, TypeDescriptorBuilder};
//! use std::sync::LazyLock;
//!
//! struct Point {
//!     x: i32
//! }
//!
//! static POINT: LazyLock<TypeDescriptor> = LazyLock::new(|| {
//!     TypeDescriptorBuilder::<Point>::new("Point")
//!         .property("x", |p: &Point| p.x, |p: &mut Point, v| p.x = v)
//!         .build()
//! });
//!
//! let registry = TypeAccessorRegistry::new();
//! let first = registry.type_accessor_for(&POINT);
//! let second = registry.type_accessor_for(&POINT);
//! assert!(std::sync::Arc::ptr_eq(&first, &second));
//! assert_eq!(registry.len(), 1);
//! ```

use std::{
    any::TypeId,
    sync::{Arc, LazyLock}
};

use dashmap::DashMap;
use tracing::debug;

use crate::{Reflect, TypeAccessor, TypeDescriptor};

static GLOBAL: LazyLock<TypeAccessorRegistry> = LazyLock::new(TypeAccessorRegistry::new);

/// Cache of [`TypeAccessor`]s keyed by type.
#[derive(Debug, Default)]
pub struct TypeAccessorRegistry {
    accessors: DashMap<TypeId, Arc<TypeAccessor>>
}

impl TypeAccessorRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Accessor for a reflected type.
    #[must_use]
    pub fn type_accessor<T: Reflect>(&self) -> Arc<TypeAccessor> {
        self.type_accessor_for(T::type_descriptor())
    }

    /// Accessor for the type `descriptor` describes.
    #[must_use]
    pub fn type_accessor_for(&self, descriptor: &'static TypeDescriptor) -> Arc<TypeAccessor> {
        let id = descriptor.type_id();
        if let Some(existing) = self.accessors.get(&id) {
            return existing.clone();
        }
        self.accessors
            .entry(id)
            .or_insert_with(|| {
                debug!(type_name = descriptor.name(), "registering type accessor");
                Arc::new(TypeAccessor::new(descriptor))
            })
            .clone()
    }

    /// Accessor already registered for `id`.
    #[must_use]
    pub fn get_by_id(&self, id: TypeId) -> Option<Arc<TypeAccessor>> {
        self.accessors.get(&id).map(|accessor| accessor.clone())
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    /// Check if no type is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Barrier, LazyLock},
        thread
    };

    use super::*;
    use crate::TypeDescriptorBuilder;

    struct Probe;

    static PROBE: LazyLock<TypeDescriptor> =
        LazyLock::new(|| TypeDescriptorBuilder::<Probe>::new("Probe").build());

    #[test]
    fn registry_starts_empty() {
        let registry = TypeAccessorRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get_by_id(TypeId::of::<Probe>()).is_none());
    }

    #[test]
    fn concurrent_requests_converge() {
        let registry = TypeAccessorRegistry::new();
        let barrier = Barrier::new(8);
        let accessors: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        registry.type_accessor_for(&PROBE)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(accessors.iter().all(|a| Arc::ptr_eq(a, &accessors[0])));
        assert_eq!(registry.len(), 1);
        let by_id = registry.get_by_id(TypeId::of::<Probe>()).unwrap();
        assert!(Arc::ptr_eq(&by_id, &accessors[0]));
    }

    #[test]
    fn registries_are_independent() {
        let a = TypeAccessorRegistry::new();
        let b = TypeAccessorRegistry::new();
        assert!(!Arc::ptr_eq(&a.type_accessor_for(&PROBE), &b.type_accessor_for(&PROBE)));
    }
}
