// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Procedural macro behind `member-access`.
//!
//! This crate is an implementation detail. Depend on `member-access`, which
//! re-exports [`macro@Reflect`] together with the runtime it targets.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

mod reflect;
mod utils;

use proc_macro::TokenStream;

/// Derive a static type descriptor for a struct with named fields.
///
/// Generates `impl member_access::Reflect`. Each named field becomes a
/// property whose getter clones the value and whose setter assigns it, or a
/// field descriptor when marked `#[reflect(field)]`. The descriptor is built
/// on first use and cached for the life of the process.
///
/// # Example
///
/// ```rust,ignore
/// use member_access::Reflect;
///
/// /// A customer order.
/// #[derive(Debug, Default, Reflect)]
/// #[reflect(default, rename_all = "snake_case", extend = "Order::methods")]
/// #[table(name = "orders", schema = "sales")]
/// pub struct Order {
///     #[key]
///     #[generated(identity)]
///     pub id: i64,
///
///     #[required]
///     #[max_length(120)]
///     #[column(name = "customer")]
///     pub customer_name: String,
///
///     #[concurrency_check]
///     pub version: i32,
///
///     #[not_mapped]
///     pub scratch: String,
///
///     #[reflect(skip)]
///     cache: Vec<u8>,
/// }
///
/// impl Order {
///     fn methods(
///         builder: member_access::TypeDescriptorBuilder<Self>
///     ) -> member_access::TypeDescriptorBuilder<Self> {
///         builder.method("describe", |o: &Order| format!("#{}", o.id))
///     }
/// }
/// ```
///
/// # Struct Attributes
///
/// | Attribute | Effect |
/// |-----------|--------|
/// | `#[reflect(name = "...")]` | Descriptor name, defaults to the struct name |
/// | `#[reflect(default)]` | Parameterless constructor via `Default` |
/// | `#[reflect(rename_all = "...")]` | Column names for members without an explicit one |
/// | `#[reflect(extend = "path")]` | `fn(TypeDescriptorBuilder<T>) -> TypeDescriptorBuilder<T>` hook |
/// | `#[table(name = "...", schema = "...")]` | Table annotation |
///
/// `rename_all` accepts `snake_case`, `camelCase`, `PascalCase`,
/// `kebab-case`, `SCREAMING_SNAKE_CASE`, `lowercase` and `UPPERCASE`.
///
/// # Field Attributes
///
/// | Attribute | Effect |
/// |-----------|--------|
/// | `#[reflect(skip)]` | Not described |
/// | `#[reflect(readonly)]` | No setter |
/// | `#[reflect(field)]` | Field descriptor instead of a property |
/// | `#[reflect(nested)]` | Value type implements `Reflect`; values can be walked |
/// | `#[column(name, type_name, order)]` | Column annotation |
/// | `#[key]` | Key annotation |
/// | `#[not_mapped]` | Excluded from mapping |
/// | `#[concurrency_check]` | Optimistic concurrency token |
/// | `#[generated(identity \| computed \| none)]` | Store-generated value |
/// | `#[foreign_key(Navigation)]` | Foreign key for a navigation |
/// | `#[required]` | Value must be present |
/// | `#[max_length(N)]` | Maximum length |
/// | `/// doc comment` | Member description |
///
/// Non-`pub` fields are described as non-public. Getters require the field
/// type to implement `Clone`.
///
/// # Errors
///
/// Compilation fails for enums, unions, tuple and unit structs, generic
/// structs, unknown `generated` options and malformed attributes.
#[proc_macro_derive(
    Reflect,
    attributes(
        reflect,
        table,
        column,
        key,
        not_mapped,
        concurrency_check,
        generated,
        foreign_key,
        required,
        max_length
    )
)]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    reflect::derive(input)
}
