// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Method resolution, invocation and construction.

use std::{error::Error as _, num::ParseIntError, sync::Arc};

use member_access::{BindingFlags, prelude::*};

#[derive(Debug, Default, Reflect)]
#[reflect(default, extend = "Formatter::describe")]
pub struct Formatter {
    pub calls: u32
}

impl Formatter {
    fn describe(builder: TypeDescriptorBuilder<Self>) -> TypeDescriptorBuilder<Self> {
        builder
            .method_mut("f", |s: &mut Formatter, text: String| {
                s.calls += 1;
                format!("string:{text}")
            })
            .method_mut("f", |s: &mut Formatter, n: i32| {
                s.calls += 1;
                format!("int:{n}")
            })
            .method_mut("f", |s: &mut Formatter, n: f64| {
                s.calls += 1;
                format!("double:{n}")
            })
            .method("pair", |_: &Formatter, a: i64, b: i64| a + b)
            .parameter_names(&["left", "right"])
            .try_method("parse", |_: &Formatter, text: String| text.parse::<i32>())
            .method_mut("reset", |s: &mut Formatter| s.calls = 0)
            .static_method("version", || "1.2")
            .static_readonly_property("Kind", || "formatter")
    }
}

/// Only constructible with a name.
#[derive(Debug, Reflect)]
#[reflect(extend = "Named::describe")]
pub struct Named {
    pub name: String
}

impl Named {
    fn describe(builder: TypeDescriptorBuilder<Self>) -> TypeDescriptorBuilder<Self> {
        builder.constructor(|name: String| Named { name })
    }
}

fn call(method: &MethodAccessor, formatter: &mut Formatter, args: Vec<Value>) -> Option<Value> {
    method.invoke(Some(formatter), args).unwrap()
}

#[test]
fn overloads_resolve_by_exact_signature() {
    let accessor = type_accessor::<Formatter>();
    let mut formatter = Formatter::default();

    let by_string = accessor
        .find_method("f", &[TypeRef::of::<String>()])
        .unwrap()
        .unwrap();
    let out = call(&by_string, &mut formatter, vec![Value::new("x".to_string())]).unwrap();
    assert_eq!(out.take::<String>().unwrap(), "string:x");

    let by_int = accessor.find_method("f", &[TypeRef::of::<i32>()]).unwrap().unwrap();
    let out = call(&by_int, &mut formatter, vec![Value::new(7_i32)]).unwrap();
    assert_eq!(out.take::<String>().unwrap(), "int:7");
    assert_eq!(formatter.calls, 2);
}

#[test]
fn overloads_resolve_to_best_assignable_candidate() {
    let accessor = type_accessor::<Formatter>();
    let widened = accessor.find_method("f", &[TypeRef::of::<f32>()]).unwrap().unwrap();
    assert_eq!(widened.parameters()[0].parameter_type(), TypeRef::of::<f64>());

    let mut formatter = Formatter::default();
    let out = call(&widened, &mut formatter, vec![Value::new(1.5_f32)]).unwrap();
    assert_eq!(out.take::<String>().unwrap(), "double:1.5");
}

#[test]
fn wrong_arity_finds_nothing() {
    let accessor = type_accessor::<Formatter>();
    let none = accessor
        .find_method("f", &[TypeRef::of::<i32>(), TypeRef::of::<i32>()])
        .unwrap();
    assert!(none.is_none());
}

#[test]
fn method_lookup_is_cached() {
    let accessor = type_accessor::<Formatter>();
    let signature = [TypeRef::of::<i64>(), TypeRef::of::<i64>()];
    let a = accessor.find_method("pair", &signature).unwrap().unwrap();
    let b = accessor.find_method("pair", &signature).unwrap().unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.parameters()[1].name(), "right");
    assert!(accessor.find_method("PAIR", &signature).unwrap().is_none());
}

#[test]
fn argument_count_mismatch_is_reported() {
    let accessor = type_accessor::<Formatter>();
    let pair = accessor
        .find_method("pair", &[TypeRef::of::<i64>(), TypeRef::of::<i64>()])
        .unwrap()
        .unwrap();
    let mut formatter = Formatter::default();
    let err = pair
        .invoke(Some(&mut formatter), vec![Value::new(1_i64)])
        .unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(err.to_string().contains("expected 2 parameters but got 1"));
}

#[test]
fn unit_methods_return_nothing() {
    let accessor = type_accessor::<Formatter>();
    let reset = accessor.find_method("reset", &[]).unwrap().unwrap();
    let mut formatter = Formatter { calls: 9 };
    assert!(call(&reset, &mut formatter, Vec::new()).is_none());
    assert_eq!(formatter.calls, 0);
}

#[test]
fn failing_method_keeps_its_error() {
    let accessor = type_accessor::<Formatter>();
    let parse = accessor
        .find_method("parse", &[TypeRef::of::<String>()])
        .unwrap()
        .unwrap();
    let mut formatter = Formatter::default();

    let ok = call(&parse, &mut formatter, vec![Value::new("42".to_string())]).unwrap();
    assert_eq!(ok.take::<i32>().unwrap(), 42);

    let err = parse
        .invoke(Some(&mut formatter), vec![Value::new("forty".to_string())])
        .unwrap_err();
    assert!(err.is_invocation());
    let source = err.source().unwrap();
    assert!(source.downcast_ref::<ParseIntError>().is_some());
}

#[test]
fn static_members_ignore_the_instance() {
    let accessor = type_accessor::<Formatter>();
    assert!(accessor.find_method("version", &[]).unwrap().is_none());

    let flags = BindingFlags::PUBLIC | BindingFlags::STATIC;
    let version = accessor.find_method_with("version", &[], flags).unwrap().unwrap();
    assert!(version.is_static());
    let out = version.invoke_static(Vec::new()).unwrap().unwrap();
    assert_eq!(out.take::<&'static str>().unwrap(), "1.2");

    let mut formatter = Formatter::default();
    let out = version.invoke(Some(&mut formatter), Vec::new()).unwrap().unwrap();
    assert_eq!(out.take::<&'static str>().unwrap(), "1.2");

    let kind = accessor.find_with("kind", flags).unwrap().unwrap();
    assert_eq!(kind.get_value(None).unwrap().take::<&'static str>().unwrap(), "formatter");
}

#[test]
fn listing_respects_flags() {
    let accessor = type_accessor::<Formatter>();
    let instance = accessor.get_methods(BindingFlags::DEFAULT);
    assert!(instance.iter().all(|m| !m.is_static()));
    assert_eq!(instance.iter().filter(|m| m.name() == "f").count(), 3);

    let all = accessor.get_methods(BindingFlags::ALL);
    assert_eq!(all.len(), instance.len() + 1);
}

#[test]
fn default_constructor_creates_instances() {
    let created = type_accessor::<Formatter>().create().unwrap();
    assert_eq!(created.take::<Formatter>().unwrap().calls, 0);
}

#[test]
fn missing_parameterless_constructor_is_an_error() {
    let accessor = type_accessor::<Named>();
    let err = accessor.create().unwrap_err();
    assert!(err.is_invalid_operation());

    let err = LateBinding::global().create_instance::<Named>().unwrap_err();
    assert!(err.is_invalid_operation());
}

#[test]
fn parameterized_constructor_is_reachable() {
    let accessor = type_accessor::<Named>();
    let created = accessor
        .create_with(vec![Value::new("Acme".to_string())])
        .unwrap();
    assert_eq!(created.take::<Named>().unwrap().name, "Acme");
}
