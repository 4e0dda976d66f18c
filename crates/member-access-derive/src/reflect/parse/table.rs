// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `#[table(name = "...", schema = "...")]`.

use darling::FromMeta;
use syn::Attribute;

/// Table mapping for the type.
#[derive(Debug, Clone, PartialEq, Eq, FromMeta)]
pub struct TableConfig {
    /// Table name.
    pub name: String,

    /// Optional schema.
    #[darling(default)]
    pub schema: Option<String>
}

impl TableConfig {
    /// Find and parse the `#[table]` attribute, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the attribute is malformed, lacks `name`, or
    /// appears more than once.
    pub fn from_attrs(attrs: &[Attribute]) -> darling::Result<Option<Self>> {
        let mut found: Option<Self> = None;
        for attr in attrs.iter().filter(|attr| attr.path().is_ident("table")) {
            if found.is_some() {
                return Err(darling::Error::custom("duplicate `table` attribute").with_span(attr));
            }
            found = Some(Self::from_meta(&attr.meta)?);
        }
        Ok(found)
    }
}
