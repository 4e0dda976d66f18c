// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use member_access::prelude::*;

#[derive(Debug, Clone, Reflect)]
pub struct Address {
    pub city: String,
    pub zip: Option<String>,
}

#[derive(Debug, Reflect)]
pub struct Customer {
    pub name: String,
    #[reflect(nested)]
    pub address: Address,
}

fn main() {
    let customer = Customer {
        name: "Acme".to_string(),
        address: Address {
            city: "Oslo".to_string(),
            zip: None,
        },
    };

    let text = format_template(
        "{{{Name}}} ships to {Address.City}{Address.Zip}",
        &customer,
    )
    .unwrap();
    assert_eq!(text, "{Acme} ships to Oslo");
}
