// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Complete parsed definition of a reflected struct.

use darling::FromDeriveInput;
use syn::{Data, DeriveInput, Fields, Ident, Path};

use super::{MemberDef, RenameRule, TableConfig, attrs::ReflectAttrs};
use crate::utils::docs::extract_doc_comments;

/// Everything the generator needs about one struct.
#[derive(Debug)]
pub struct ReflectDef {
    /// Struct identifier.
    pub ident: Ident,

    /// Descriptor name.
    pub name: String,

    /// Register a `Default`-based constructor.
    pub default_constructor: bool,

    /// Column naming rule.
    pub rename_all: Option<RenameRule>,

    /// Builder hook.
    pub extend: Option<Path>,

    /// `#[table(...)]`
    pub table: Option<TableConfig>,

    /// Struct doc comment.
    pub doc: Option<String>,

    /// Members in declaration order, skipped ones included.
    pub members: Vec<MemberDef>
}

impl ReflectDef {
    /// Parse a derive input.
    ///
    /// Errors from the table attribute and from every field are collected
    /// and reported together.
    ///
    /// # Errors
    ///
    /// Returns an error for anything but a non-generic struct with named
    /// fields, and for malformed attributes.
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = ReflectAttrs::from_derive_input(input)?;
        let mut errors = darling::Error::accumulator();

        if !attrs.generics.params.is_empty() {
            errors.push(
                darling::Error::custom("Reflect cannot be derived for generic types")
                    .with_span(&attrs.generics)
            );
        }

        let table = errors
            .handle(TableConfig::from_attrs(&input.attrs))
            .flatten();

        let fields = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
                _ => {
                    return Err(darling::Error::custom(
                        "Reflect requires a struct with named fields"
                    )
                    .with_span(&input.ident));
                }
            },
            _ => {
                return Err(
                    darling::Error::custom("Reflect can only be derived for structs")
                        .with_span(&input.ident)
                );
            }
        };

        let members = fields
            .into_iter()
            .filter_map(|field| errors.handle(MemberDef::from_field(field)))
            .collect();

        errors.finish()?;

        Ok(Self {
            name: attrs.name.unwrap_or_else(|| attrs.ident.to_string()),
            ident: attrs.ident,
            default_constructor: attrs.default,
            rename_all: attrs.rename_all,
            extend: attrs.extend,
            table,
            doc: extract_doc_comments(&input.attrs),
            members
        })
    }

    /// Members that end up in the descriptor.
    pub fn described_members(&self) -> impl Iterator<Item = &MemberDef> {
        self.members.iter().filter(|member| !member.is_skipped())
    }

    /// Column name for a member.
    ///
    /// An explicit `#[column(name)]` wins; otherwise `rename_all` applies.
    /// `None` when neither is present.
    #[must_use]
    pub fn column_name(&self, member: &MemberDef) -> Option<String> {
        member
            .mapping
            .column
            .as_ref()
            .and_then(|column| column.name.clone())
            .or_else(|| self.rename_all.map(|rule| rule.apply(&member.name())))
    }
}
