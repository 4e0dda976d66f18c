// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use member_access::{Annotation, BindingFlags, GeneratedOption, prelude::*};
use uuid::Uuid;

/// Customer order.
#[derive(Debug, Reflect)]
#[reflect(rename_all = "camelCase")]
#[table(name = "orders", schema = "sales")]
pub struct Order {
    /// Primary key.
    #[key]
    #[generated(identity)]
    pub id: Uuid,

    #[required]
    #[max_length(120)]
    #[column(name = "customer", type_name = "varchar", order = 1)]
    pub customer_name: String,

    #[foreign_key(Customer)]
    pub customer_id: Uuid,

    #[concurrency_check]
    #[reflect(readonly)]
    pub version: i32,

    #[generated(computed)]
    pub created_at: DateTime<Utc>,

    #[not_mapped]
    pub scratch: String,

    #[reflect(field)]
    pub notes: Vec<String>,

    #[reflect(skip)]
    pub cache: HashMap<String, String>,

    internal: u8,
}

fn main() {
    let accessor = type_accessor::<Order>();

    assert_eq!(accessor.table_name(), "orders");
    assert_eq!(accessor.table_schema(), Some("sales"));
    assert!(accessor
        .descriptor()
        .annotations()
        .contains(&Annotation::Description("Customer order.")));

    let id = accessor.find_property("id").unwrap().unwrap();
    assert!(id.metadata().is_key());
    assert_eq!(id.metadata().generated(), GeneratedOption::Identity);
    assert_eq!(id.metadata().description(), Some("Primary key."));

    let customer = accessor.find_column("CUSTOMER").unwrap().unwrap();
    assert_eq!(customer.name(), "customer_name");
    assert!(customer.metadata().is_required());
    assert_eq!(customer.metadata().max_length(), Some(120));
    assert_eq!(customer.metadata().type_name(), Some("varchar"));
    assert_eq!(customer.metadata().order(), Some(1));

    let customer_id = accessor.find_column("customerId").unwrap().unwrap();
    assert_eq!(customer_id.metadata().foreign_key(), Some("Customer"));

    let version = accessor.find_property("version").unwrap().unwrap();
    assert!(version.metadata().is_concurrency_check());
    assert!(!version.has_setter());

    let created_at = accessor.find_property("created_at").unwrap().unwrap();
    assert_eq!(created_at.metadata().generated(), GeneratedOption::Computed);

    let scratch = accessor.find_property("scratch").unwrap().unwrap();
    assert!(scratch.metadata().is_not_mapped());

    assert!(accessor.find_field("notes").unwrap().is_some());
    assert!(accessor.find("cache").unwrap().is_none());

    assert!(accessor.find("internal").unwrap().is_none());
    assert!(accessor
        .find_with("internal", BindingFlags::ALL)
        .unwrap()
        .is_some());

    let mut order = Order {
        id: Uuid::new_v4(),
        customer_name: String::new(),
        customer_id: Uuid::new_v4(),
        version: 1,
        created_at: Utc::now(),
        scratch: String::new(),
        notes: Vec::new(),
        cache: HashMap::new(),
        internal: 0,
    };
    let fresh = Uuid::new_v4();
    id.set_value(Some(&mut order), Value::new(fresh)).unwrap();
    assert_eq!(order.id, fresh);
    assert_eq!(order.internal, 0);
}
