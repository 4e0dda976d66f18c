// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! One-shot access through `LateBinding`, and template expansion.

use chrono::{DateTime, TimeZone, Utc};
use member_access::{TypeAccessorRegistry, prelude::*};
use uuid::Uuid;

#[derive(Debug, Clone, Default, Reflect)]
#[reflect(default)]
pub struct City {
    pub name:    String,
    pub country: String
}

#[derive(Debug, Clone, Default, Reflect)]
#[reflect(default, extend = "Customer::describe")]
pub struct Customer {
    pub id:       Uuid,
    pub name:     String,
    pub joined:   Option<DateTime<Utc>>,
    pub visits:   u32,
    #[reflect(nested)]
    pub city:     City,
    #[reflect(readonly)]
    pub tier:     String,
    nickname:     Option<String>
}

impl Customer {
    fn describe(builder: TypeDescriptorBuilder<Self>) -> TypeDescriptorBuilder<Self> {
        builder
            .method_mut("visit", |c: &mut Customer, times: u32| {
                c.visits += times;
                c.visits
            })
            .static_method("greeting", |name: String| format!("Hello, {name}"))
            .readonly_property("joined_year", |c: &Customer| {
                c.joined.map(|at| at.format("%Y").to_string())
            })
    }
}

fn customer() -> Customer {
    Customer {
        id:       Uuid::new_v4(),
        name:     "Acme".to_string(),
        joined:   Utc.with_ymd_and_hms(2021, 3, 14, 0, 0, 0).single(),
        visits:   0,
        city:     City {
            name:    "Oslo".to_string(),
            country: "Norway".to_string()
        },
        tier:     "gold".to_string(),
        nickname: None
    }
}

#[test]
fn get_and_set_by_name() {
    let binder = LateBinding::global();
    let mut customer = customer();

    binder
        .set(&mut customer, "NAME", Value::new("Globex".to_string()))
        .unwrap();
    assert_eq!(customer.name, "Globex");

    let id = binder.get(&customer, "id").unwrap();
    assert_eq!(id.take::<Uuid>().unwrap(), customer.id);
}

#[test]
fn unknown_member_is_an_invalid_operation() {
    let binder = LateBinding::global();
    let customer = customer();
    let err = binder.get(&customer, "missing").unwrap_err();
    assert!(err.is_invalid_operation());
    assert!(err.to_string().contains("`missing`"));
    assert!(err.to_string().contains("Customer"));
}

#[test]
fn read_only_member_rejects_writes() {
    let binder = LateBinding::global();
    let mut customer = customer();
    let err = binder
        .set(&mut customer, "tier", Value::new("silver".to_string()))
        .unwrap_err();
    assert!(err.is_invalid_operation());
    assert_eq!(customer.tier, "gold");
}

#[test]
fn non_public_members_are_hidden() {
    let binder = LateBinding::global();
    let customer = customer();
    assert!(binder.get(&customer, "nickname").is_err());
    assert!(binder.find::<Customer>("nickname").unwrap().is_none());
}

#[test]
fn invoke_methods_by_name() {
    let binder = LateBinding::global();
    let mut customer = customer();

    let visits = binder
        .invoke_method(&mut customer, "visit", vec![Value::new(3_u32)])
        .unwrap()
        .unwrap();
    assert_eq!(visits.take::<u32>().unwrap(), 3);

    let widened = binder
        .invoke_method(&mut customer, "visit", vec![Value::new(2_u8)])
        .unwrap()
        .unwrap();
    assert_eq!(widened.take::<u32>().unwrap(), 5);

    let greeting = binder
        .invoke_static::<Customer>("greeting", vec![Value::new("Ada".to_string())])
        .unwrap()
        .unwrap();
    assert_eq!(greeting.take::<String>().unwrap(), "Hello, Ada");

    let err = binder
        .invoke_method(&mut customer, "vanish", Vec::new())
        .unwrap_err();
    assert!(err.is_invalid_operation());
}

#[test]
fn create_instances() {
    let binder = LateBinding::global();
    let created: Customer = binder.create_instance().unwrap();
    assert_eq!(created.visits, 0);

    let value = binder.create_instance_of(City::type_descriptor()).unwrap();
    assert!(value.is::<City>());
    assert!(value.descriptor().is_some());
}

#[test]
fn isolated_registry() {
    let registry = TypeAccessorRegistry::new();
    let binder = LateBinding::new(&registry);
    let customer = customer();

    assert!(registry.is_empty());
    binder.get(&customer, "name").unwrap();
    assert_eq!(registry.len(), 1);
}

#[test]
fn template_walks_nested_members() {
    let customer = customer();
    let text = format_template("{Name} from {City.Name}, {City.Country}", &customer).unwrap();
    assert_eq!(text, "Acme from Oslo, Norway");
}

#[test]
fn template_renders_optional_and_computed_values() {
    let mut customer = customer();
    let text = format_template("joined {joined_year}; nick '{nickname}'", &customer);
    assert!(text.unwrap_err().is_invalid_operation());

    let text = format_template("joined {joined_year}", &customer).unwrap();
    assert_eq!(text, "joined 2021");

    customer.joined = None;
    let text = format_template("joined [{joined_year}]", &customer).unwrap();
    assert_eq!(text, "joined []");
}

#[test]
fn template_escapes_and_errors() {
    let customer = customer();
    assert_eq!(
        format_template("{{{Visits}}}", &customer).unwrap(),
        "{0}"
    );
    assert!(format_template("{Name", &customer).unwrap_err().is_invalid_argument());
    assert!(format_template("Name}", &customer).unwrap_err().is_invalid_argument());
    assert!(format_template("{}", &customer).unwrap_err().is_invalid_argument());
    assert!(
        format_template("{Name.Length}", &customer)
            .unwrap_err()
            .is_invalid_operation()
    );
    assert!(format_template("{Unknown}", &customer).unwrap_err().is_invalid_operation());
}
