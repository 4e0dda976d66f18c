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

use crate::{
    MethodDescriptor, ParameterDescriptor, Result, TypeRef, Value, Visibility,
    factory::{self, Invoker}
};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

/// Structural signature of a method: name plus ordered parameter types.
///
/// Used as the cache key for method lookups. [`hash_code`](Self::hash_code)
/// gives a compact integer form for callers that want one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodKey {
    name:       String,
    parameters: Vec<TypeRef>
}

impl MethodKey {
    /// Key for `name` with the given parameter types.
    #[must_use]
    pub fn new(name: impl Into<String>, parameters: &[TypeRef]) -> Self {
        Self {
            name:       name.into(),
            parameters: parameters.to_vec()
        }
    }

    /// Method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter types in order.
    #[must_use]
    pub fn parameters(&self) -> &[TypeRef] {
        &self.parameters
    }

    /// FNV-1a hash over the name and the parameter type names.
    ///
    /// The algorithm is part of the contract: the value must not change
    /// between runs, so it is not computed with a seeded hasher. Stable for a
    /// given build. Two different signatures may collide.
    #[must_use]
    pub fn hash_code(&self) -> u64 {
        let mut hash = FNV_OFFSET;
        let mut feed = |bytes: &[u8]| {
            for byte in bytes {
                hash ^= u64::from(*byte);
                hash = hash.wrapping_mul(FNV_PRIME);
            }
        };
        feed(self.name.as_bytes());
        for parameter in &self.parameters {
            feed(b"(");
            feed(parameter.name().as_bytes());
        }
        hash
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (index, parameter) in self.parameters.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(parameter.short_name())?;
        }
        f.write_str(")")
    }
}

/// Accessor over a [`MethodDescriptor`].
pub struct MethodAccessor {
    descriptor: &'static MethodDescriptor,
    key:        MethodKey,
    invoker:    OnceLock<Invoker>
}

impl MethodAccessor {
    /// Wrap a method descriptor. Nothing is compiled yet.
    #[must_use]
    pub fn new(descriptor: &'static MethodDescriptor) -> Self {
        trace!(member = descriptor.name(), "creating method accessor");
        let parameters: Vec<TypeRef> = descriptor.parameter_types().collect();
        Self {
            descriptor,
            key: MethodKey::new(descriptor.name(), &parameters),
            invoker: OnceLock::new()
        }
    }

    /// Signature hash of `name` with `parameter_types`.
    ///
    /// Equal to `MethodKey::new(name, parameter_types).hash_code()`.
    #[must_use]
    pub fn get_key(name: &str, parameter_types: &[TypeRef]) -> u64 {
        MethodKey::new(name, parameter_types).hash_code()
    }

    /// Structural signature of the wrapped method.
    #[must_use]
    pub fn key(&self) -> &MethodKey {
        &self.key
    }

    /// Wrapped descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &'static MethodDescriptor {
        self.descriptor
    }

    /// Method name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.descriptor.name()
    }

    /// Ordered parameters.
    #[must_use]
    pub fn parameters(&self) -> &'static [ParameterDescriptor] {
        self.descriptor.parameters()
    }

    /// Return type; `()` for methods without a value.
    #[must_use]
    pub fn return_type(&self) -> TypeRef {
        self.descriptor.return_type()
    }

    /// Check if the method takes no receiver.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.descriptor.is_static()
    }

    /// Access level.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.descriptor.visibility()
    }

    /// Invoke the method. Static methods accept and ignore any instance.
    ///
    /// Arguments are coerced to the declared parameter types. Returns
    /// `Ok(None)` for methods returning `()`.
    ///
    /// # Errors
    ///
    /// - [`InvalidArgument`](crate::AccessError::InvalidArgument) when the
    ///   argument count differs from the parameter count, or the instance is
    ///   missing or of another type
    /// - [`InvalidCast`](crate::AccessError::InvalidCast) when an argument
    ///   does not coerce to its parameter type
    /// - [`Invocation`](crate::AccessError::Invocation) when the method body
    ///   returns an error
    pub fn invoke(&self, instance: Option<&mut dyn Any>, args: Vec<Value>) -> Result<Option<Value>> {
        let invoke = self
            .invoker
            .get_or_init(|| factory::create_invoker(self.descriptor));
        invoke(instance, args)
    }

    /// Invoke a static method.
    ///
    /// # Errors
    ///
    /// See [`invoke`](Self::invoke).
    pub fn invoke_static(&self, args: Vec<Value>) -> Result<Option<Value>> {
        self.invoke(None, args)
    }
}

impl PartialEq for MethodAccessor {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.descriptor, other.descriptor)
    }
}

impl Eq for MethodAccessor {}

impl Hash for MethodAccessor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ptr::hash(self.descriptor, state);
    }
}

impl fmt::Debug for MethodAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodAccessor")
            .field("key", &self.key.to_string())
            .field("static", &self.is_static())
            .field("compiled", &self.invoker.get().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use super::*;
    use crate::{TypeDescriptor, TypeDescriptorBuilder};

    struct Calculator {
        memory: i64
    }

    static CALCULATOR: LazyLock<TypeDescriptor> = LazyLock::new(|| {
        TypeDescriptorBuilder::<Calculator>::new("Calculator")
            .method("add", |c: &Calculator, x: i64| c.memory + x)
            .method_mut("store", |c: &mut Calculator, x: i64| c.memory = x)
            .static_method("zero", || 0_i64)
            .build()
    });

    fn accessor(name: &str) -> MethodAccessor {
        let descriptor = CALCULATOR
            .methods()
            .iter()
            .find(|m| m.name() == name)
            .unwrap();
        MethodAccessor::new(descriptor)
    }

    #[test]
    fn key_is_deterministic() {
        let types = [TypeRef::of::<i64>(), TypeRef::of::<String>()];
        assert_eq!(
            MethodAccessor::get_key("f", &types),
            MethodAccessor::get_key("f", &types)
        );
        assert_ne!(
            MethodAccessor::get_key("f", &types),
            MethodAccessor::get_key("g", &types)
        );
        assert_ne!(
            MethodAccessor::get_key("f", &types),
            MethodAccessor::get_key("f", &types[..1])
        );
    }

    #[test]
    fn key_is_fnv1a() {
        assert_eq!(MethodAccessor::get_key("f", &[]), 0xaf63_db4c_8601_ead9);
        assert_eq!(
            MethodAccessor::get_key("add", &[TypeRef::of::<i64>()]),
            0xce0a_886a_0343_02b5
        );
    }

    #[test]
    fn key_matches_descriptor_signature() {
        let add = accessor("add");
        assert_eq!(add.key(), &MethodKey::new("add", &[TypeRef::of::<i64>()]));
        assert_eq!(add.key().to_string(), "add(i64)");
        assert_eq!(
            add.key().hash_code(),
            MethodAccessor::get_key("add", &[TypeRef::of::<i64>()])
        );
    }

    #[test]
    fn invoke_instance_and_void() {
        let mut calc = Calculator {
            memory: 0
        };
        assert!(accessor("store")
            .invoke(Some(&mut calc), vec![Value::new(5_i64)])
            .unwrap()
            .is_none());
        let sum = accessor("add")
            .invoke(Some(&mut calc), vec![Value::new(2_i32)])
            .unwrap()
            .unwrap();
        assert_eq!(sum.take::<i64>().unwrap(), 7);
    }

    #[test]
    fn invoke_static_without_instance() {
        let zero = accessor("zero");
        assert!(zero.is_static());
        let value = zero.invoke_static(Vec::new()).unwrap().unwrap();
        assert_eq!(value.take::<i64>().unwrap(), 0);
    }

    #[test]
    fn wrong_argument_count_is_reported() {
        let mut calc = Calculator {
            memory: 0
        };
        let err = accessor("add")
            .invoke(Some(&mut calc), vec![Value::new(1_i64), Value::new(2_i64)])
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("expected 1 parameters but got 2"));
    }

    #[test]
    fn uncoercible_argument_is_a_cast_error() {
        let mut calc = Calculator {
            memory: 0
        };
        let err = accessor("add")
            .invoke(Some(&mut calc), vec![Value::new("1".to_string())])
            .unwrap_err();
        assert!(err.is_invalid_cast());
    }
}
