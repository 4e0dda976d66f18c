// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Struct-level `#[reflect(...)]` options.

use darling::FromDeriveInput;
use syn::{Generics, Ident};

use super::RenameRule;

/// Struct-level attributes parsed from `#[reflect(...)]`.
///
/// Internal to parsing; [`ReflectDef`](super::ReflectDef) combines these with
/// the table and member definitions.
///
/// # Example
///
/// ```rust,ignore
/// #[reflect(name = "Order", default, rename_all = "camelCase", extend = "Order::methods")]
/// ```
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(reflect), supports(struct_named))]
pub struct ReflectAttrs {
    /// Struct identifier.
    pub ident: Ident,

    /// Struct generics. Must be empty.
    pub generics: Generics,

    /// Descriptor name override.
    #[darling(default)]
    pub name: Option<String>,

    /// Register a parameterless constructor through `Default`.
    #[darling(default)]
    pub default: bool,

    /// Column naming rule for members without an explicit column name.
    #[darling(default)]
    pub rename_all: Option<RenameRule>,

    /// Builder hook run after the generated members.
    #[darling(default)]
    pub extend: Option<syn::Path>
}
