// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use member_access::prelude::*;

#[derive(Debug, Default, Reflect)]
#[reflect(default)]
pub struct Order {
    pub customer: String,
    pub total: f64,
}

fn main() {
    let accessor = type_accessor::<Order>();
    assert_eq!(accessor.name(), "Order");

    let customer = accessor.find_property("Customer").unwrap().unwrap();
    let mut order = Order::default();
    customer
        .set_value(Some(&mut order), Value::new("Acme".to_string()))
        .unwrap();
    assert_eq!(order.customer, "Acme");

    let total = accessor.find("TOTAL").unwrap().unwrap();
    total.set_value(Some(&mut order), Value::new(12_i32)).unwrap();
    assert_eq!(order.total, 12.0);

    let created = accessor.create().unwrap();
    assert!(created.is::<Order>());
}
