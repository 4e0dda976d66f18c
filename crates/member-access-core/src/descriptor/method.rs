// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Method, parameter and constructor descriptors.
//!
//! Typed functions are turned into descriptors through the conversion
//! traits in this module. They are implemented for every `Fn` of up to six
//! arguments:
//!
//! | Trait | Shape |
//! |-------|-------|
//! | [`RefMethod`] | `Fn(&T, A0, ..) -> R` |
//! | [`MutMethod`] | `Fn(&mut T, A0, ..) -> R` |
//! | [`StaticMethod`] | `Fn(A0, ..) -> R` |
//! | [`ConstructorFn`] | `Fn(A0, ..) -> T` |
//!
//! The marker parameter selects how the return value is treated:
//! [`Plain`] boxes it as is, [`Fallible`] expects `Result<R, E>` and turns
//! `Err` into an invocation failure.

use std::{any::Any, error::Error as StdError, fmt, marker::PhantomData};

use super::{
    Annotation, TypeRef, Visibility,
    raw::{Fault, RawConstruct, RawInvoke, take_arg, wrap_output}
};
use crate::Value;

const DEFAULT_PARAMETER_NAMES: [&str; 6] = ["arg0", "arg1", "arg2", "arg3", "arg4", "arg5"];

/// Positional parameter of a method or constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterDescriptor {
    pub(crate) position:       usize,
    pub(crate) name:           &'static str,
    pub(crate) parameter_type: TypeRef
}

impl ParameterDescriptor {
    pub(crate) fn from_types(types: Vec<TypeRef>) -> Vec<Self> {
        types
            .into_iter()
            .enumerate()
            .map(|(position, parameter_type)| Self {
                position,
                name: DEFAULT_PARAMETER_NAMES
                    .get(position)
                    .copied()
                    .unwrap_or("arg"),
                parameter_type
            })
            .collect()
    }

    /// Zero-based position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Parameter name (`argN` unless named explicitly).
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared parameter type.
    #[must_use]
    pub fn parameter_type(&self) -> TypeRef {
        self.parameter_type
    }
}

/// Descriptor of a method.
pub struct MethodDescriptor {
    pub(crate) name:           &'static str,
    pub(crate) declaring_type: TypeRef,
    pub(crate) parameters:     Vec<ParameterDescriptor>,
    pub(crate) return_type:    TypeRef,
    pub(crate) visibility:     Visibility,
    pub(crate) is_static:      bool,
    pub(crate) invoke:         RawInvoke,
    pub(crate) annotations:    Vec<Annotation>
}

impl MethodDescriptor {
    /// Method name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type that declares the method.
    #[must_use]
    pub fn declaring_type(&self) -> TypeRef {
        self.declaring_type
    }

    /// Ordered parameters.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    /// Parameter types in order.
    pub fn parameter_types(&self) -> impl Iterator<Item = TypeRef> + '_ {
        self.parameters.iter().map(|p| p.parameter_type)
    }

    /// Return type; `()` for methods without a value.
    #[must_use]
    pub fn return_type(&self) -> TypeRef {
        self.return_type
    }

    /// Access level.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Check if the method takes no receiver.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Attached annotations.
    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Raw invoke primitive.
    #[must_use]
    pub fn raw_invoke(&self) -> &RawInvoke {
        &self.invoke
    }

    /// Check if parameter types equal `types` exactly, in order.
    #[must_use]
    pub fn has_signature(&self, types: &[TypeRef]) -> bool {
        self.parameters.len() == types.len()
            && self
                .parameters
                .iter()
                .zip(types)
                .all(|(p, t)| p.parameter_type == *t)
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("return_type", &self.return_type)
            .field("static", &self.is_static)
            .finish()
    }
}

/// Descriptor of a constructor.
pub struct ConstructorDescriptor {
    pub(crate) parameters: Vec<ParameterDescriptor>,
    pub(crate) visibility: Visibility,
    pub(crate) construct:  RawConstruct
}

impl ConstructorDescriptor {
    /// Ordered parameters.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    /// Access level.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Check if the constructor can be used from outside the type.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// Check if the constructor takes no arguments.
    #[must_use]
    pub fn is_parameterless(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Raw construct primitive.
    #[must_use]
    pub fn raw_construct(&self) -> &RawConstruct {
        &self.construct
    }
}

impl fmt::Debug for ConstructorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorDescriptor")
            .field("parameters", &self.parameters)
            .field("visibility", &self.visibility)
            .finish()
    }
}

/// Return values are boxed as they are.
pub struct Plain<R>(PhantomData<fn() -> R>);

/// Return values are `Result<R, E>`; `Err` fails the invocation.
pub struct Fallible<R, E>(PhantomData<fn() -> (R, E)>);

/// Function usable as a method taking `&T`.
pub trait RefMethod<T, Args, Kind>: Send + Sync + 'static {
    /// Declared parameter types.
    fn parameter_types() -> Vec<TypeRef>;
    /// Declared return type.
    fn return_type() -> TypeRef;
    /// Erase into a raw invoke primitive.
    fn into_invoke(self) -> RawInvoke;
}

/// Function usable as a method taking `&mut T`.
pub trait MutMethod<T, Args, Kind>: Send + Sync + 'static {
    /// Declared parameter types.
    fn parameter_types() -> Vec<TypeRef>;
    /// Declared return type.
    fn return_type() -> TypeRef;
    /// Erase into a raw invoke primitive.
    fn into_invoke(self) -> RawInvoke;
}

/// Function usable as a static method.
pub trait StaticMethod<Args, Kind>: Send + Sync + 'static {
    /// Declared parameter types.
    fn parameter_types() -> Vec<TypeRef>;
    /// Declared return type.
    fn return_type() -> TypeRef;
    /// Erase into a raw invoke primitive.
    fn into_invoke(self) -> RawInvoke;
}

/// Function usable as a constructor of `T`.
pub trait ConstructorFn<T, Args>: Send + Sync + 'static {
    /// Declared parameter types.
    fn parameter_types() -> Vec<TypeRef>;
    /// Erase into a raw construct primitive.
    fn into_construct(self) -> RawConstruct;
}

fn fail<E: StdError + Send + Sync + 'static>(err: E) -> Fault {
    Fault::Failed(Box::new(err))
}

macro_rules! impl_method_arity {
    ($($idx:tt $arg:ident),*) => {
        impl<T, F, R, $($arg,)*> RefMethod<T, ($($arg,)*), Plain<R>> for F
        where
            T: Any,
            F: Fn(&T, $($arg),*) -> R + Send + Sync + 'static,
            R: Any + Send + Sync,
            $($arg: Any,)*
        {
            fn parameter_types() -> Vec<TypeRef> {
                vec![$(TypeRef::of::<$arg>()),*]
            }

            fn return_type() -> TypeRef {
                TypeRef::of::<R>()
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn into_invoke(self) -> RawInvoke {
                let handler = self;
                Box::new(move |instance: Option<&mut dyn Any>, args: Vec<Value>| {
                    let this: &T = instance
                        .and_then(|i| i.downcast_mut::<T>())
                        .ok_or(Fault::Instance)?;
                    let mut args = args.into_iter();
                    $(let $arg = take_arg::<$arg>(&mut args, $idx)?;)*
                    Ok(wrap_output(handler(this, $($arg),*)))
                })
            }
        }

        impl<T, F, R, E, $($arg,)*> RefMethod<T, ($($arg,)*), Fallible<R, E>> for F
        where
            T: Any,
            F: Fn(&T, $($arg),*) -> Result<R, E> + Send + Sync + 'static,
            R: Any + Send + Sync,
            E: StdError + Send + Sync + 'static,
            $($arg: Any,)*
        {
            fn parameter_types() -> Vec<TypeRef> {
                vec![$(TypeRef::of::<$arg>()),*]
            }

            fn return_type() -> TypeRef {
                TypeRef::of::<R>()
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn into_invoke(self) -> RawInvoke {
                let handler = self;
                Box::new(move |instance: Option<&mut dyn Any>, args: Vec<Value>| {
                    let this: &T = instance
                        .and_then(|i| i.downcast_mut::<T>())
                        .ok_or(Fault::Instance)?;
                    let mut args = args.into_iter();
                    $(let $arg = take_arg::<$arg>(&mut args, $idx)?;)*
                    handler(this, $($arg),*).map(wrap_output).map_err(fail)
                })
            }
        }

        impl<T, F, R, $($arg,)*> MutMethod<T, ($($arg,)*), Plain<R>> for F
        where
            T: Any,
            F: Fn(&mut T, $($arg),*) -> R + Send + Sync + 'static,
            R: Any + Send + Sync,
            $($arg: Any,)*
        {
            fn parameter_types() -> Vec<TypeRef> {
                vec![$(TypeRef::of::<$arg>()),*]
            }

            fn return_type() -> TypeRef {
                TypeRef::of::<R>()
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn into_invoke(self) -> RawInvoke {
                let handler = self;
                Box::new(move |instance: Option<&mut dyn Any>, args: Vec<Value>| {
                    let this = instance
                        .and_then(|i| i.downcast_mut::<T>())
                        .ok_or(Fault::Instance)?;
                    let mut args = args.into_iter();
                    $(let $arg = take_arg::<$arg>(&mut args, $idx)?;)*
                    Ok(wrap_output(handler(this, $($arg),*)))
                })
            }
        }

        impl<T, F, R, E, $($arg,)*> MutMethod<T, ($($arg,)*), Fallible<R, E>> for F
        where
            T: Any,
            F: Fn(&mut T, $($arg),*) -> Result<R, E> + Send + Sync + 'static,
            R: Any + Send + Sync,
            E: StdError + Send + Sync + 'static,
            $($arg: Any,)*
        {
            fn parameter_types() -> Vec<TypeRef> {
                vec![$(TypeRef::of::<$arg>()),*]
            }

            fn return_type() -> TypeRef {
                TypeRef::of::<R>()
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn into_invoke(self) -> RawInvoke {
                let handler = self;
                Box::new(move |instance: Option<&mut dyn Any>, args: Vec<Value>| {
                    let this = instance
                        .and_then(|i| i.downcast_mut::<T>())
                        .ok_or(Fault::Instance)?;
                    let mut args = args.into_iter();
                    $(let $arg = take_arg::<$arg>(&mut args, $idx)?;)*
                    handler(this, $($arg),*).map(wrap_output).map_err(fail)
                })
            }
        }

        impl<F, R, $($arg,)*> StaticMethod<($($arg,)*), Plain<R>> for F
        where
            F: Fn($($arg),*) -> R + Send + Sync + 'static,
            R: Any + Send + Sync,
            $($arg: Any,)*
        {
            fn parameter_types() -> Vec<TypeRef> {
                vec![$(TypeRef::of::<$arg>()),*]
            }

            fn return_type() -> TypeRef {
                TypeRef::of::<R>()
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn into_invoke(self) -> RawInvoke {
                let handler = self;
                Box::new(move |_instance: Option<&mut dyn Any>, args: Vec<Value>| {
                    let mut args = args.into_iter();
                    $(let $arg = take_arg::<$arg>(&mut args, $idx)?;)*
                    Ok(wrap_output(handler($($arg),*)))
                })
            }
        }

        impl<F, R, E, $($arg,)*> StaticMethod<($($arg,)*), Fallible<R, E>> for F
        where
            F: Fn($($arg),*) -> Result<R, E> + Send + Sync + 'static,
            R: Any + Send + Sync,
            E: StdError + Send + Sync + 'static,
            $($arg: Any,)*
        {
            fn parameter_types() -> Vec<TypeRef> {
                vec![$(TypeRef::of::<$arg>()),*]
            }

            fn return_type() -> TypeRef {
                TypeRef::of::<R>()
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn into_invoke(self) -> RawInvoke {
                let handler = self;
                Box::new(move |_instance: Option<&mut dyn Any>, args: Vec<Value>| {
                    let mut args = args.into_iter();
                    $(let $arg = take_arg::<$arg>(&mut args, $idx)?;)*
                    handler($($arg),*).map(wrap_output).map_err(fail)
                })
            }
        }

        impl<T, F, $($arg,)*> ConstructorFn<T, ($($arg,)*)> for F
        where
            T: Any + Send + Sync,
            F: Fn($($arg),*) -> T + Send + Sync + 'static,
            $($arg: Any,)*
        {
            fn parameter_types() -> Vec<TypeRef> {
                vec![$(TypeRef::of::<$arg>()),*]
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn into_construct(self) -> RawConstruct {
                let handler = self;
                Box::new(move |args: Vec<Value>| {
                    let mut args = args.into_iter();
                    $(let $arg = take_arg::<$arg>(&mut args, $idx)?;)*
                    Ok(Value::new(handler($($arg),*)))
                })
            }
        }
    };
}

impl_method_arity!();
impl_method_arity!(0 A0);
impl_method_arity!(0 A0, 1 A1);
impl_method_arity!(0 A0, 1 A1, 2 A2);
impl_method_arity!(0 A0, 1 A1, 2 A2, 3 A3);
impl_method_arity!(0 A0, 1 A1, 2 A2, 3 A3, 4 A4);
impl_method_arity!(0 A0, 1 A1, 2 A2, 3 A3, 4 A4, 5 A5);
