// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use member_access::prelude::*;

#[derive(Debug, Default, Reflect)]
#[reflect(default, extend = "Calculator::describe")]
pub struct Calculator {
    pub total: f64,
}

impl Calculator {
    fn describe(builder: TypeDescriptorBuilder<Self>) -> TypeDescriptorBuilder<Self> {
        builder
            .method_mut("add", |c: &mut Calculator, n: i64| c.total += n as f64)
            .method_mut("add", |c: &mut Calculator, n: f64| c.total += n)
            .readonly_property("doubled", |c: &Calculator| c.total * 2.0)
            .static_method("zero", Calculator::default)
    }
}

fn main() {
    let binder = LateBinding::global();
    let mut calculator: Calculator = binder.create_instance().unwrap();

    binder
        .invoke_method(&mut calculator, "add", vec![Value::new(2_i64)])
        .unwrap();
    binder
        .invoke_method(&mut calculator, "add", vec![Value::new(0.5_f64)])
        .unwrap();
    assert_eq!(calculator.total, 2.5);

    let doubled = binder.get(&calculator, "Doubled").unwrap();
    assert_eq!(doubled.take::<f64>().unwrap(), 5.0);

    let zero = binder
        .invoke_static::<Calculator>("zero", Vec::new())
        .unwrap()
        .unwrap();
    assert_eq!(zero.take::<Calculator>().unwrap().total, 0.0);
}
