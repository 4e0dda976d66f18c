// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! One described member per named field.

mod mapping;
mod options;

pub use mapping::{GeneratedKind, MappingConfig};
pub use options::MemberOptions;
use syn::{Field, Ident, Type, Visibility, ext::IdentExt};

use crate::utils::docs::extract_doc_comments;

/// Field definition with all parsed attributes.
///
/// # Example
///
/// ```rust,ignore
/// /// Total including tax.          // doc
/// #[column(name = "total_amount")] // mapping.column
/// #[reflect(readonly)]             // options.readonly
/// pub total: f64,
/// ```
#[derive(Debug)]
pub struct MemberDef {
    /// Field identifier.
    pub ident: Ident,

    /// Declared type.
    pub ty: Type,

    /// Declared with plain `pub`.
    pub is_public: bool,

    /// `#[reflect(...)]` flags.
    pub options: MemberOptions,

    /// Mapping annotations.
    pub mapping: MappingConfig,

    /// Documentation comment.
    pub doc: Option<String>
}

impl MemberDef {
    /// Parse a member from a named field.
    ///
    /// # Errors
    ///
    /// Returns an error for unnamed fields and malformed attributes.
    pub fn from_field(field: &Field) -> darling::Result<Self> {
        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("Reflect members must be named").with_span(field)
        })?;
        let options = MemberOptions::from_attrs(&field.attrs)?;
        let mapping = MappingConfig::from_attrs(&field.attrs)?;

        Ok(Self {
            ident,
            ty: field.ty.clone(),
            is_public: matches!(field.vis, Visibility::Public(_)),
            options,
            mapping,
            doc: extract_doc_comments(&field.attrs)
        })
    }

    /// Member name as seen at run time. Raw identifiers lose their `r#`.
    #[must_use]
    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }

    /// Check if the member is left out of the descriptor.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.options.skip
    }

    /// Check if the member has a setter.
    #[must_use]
    pub fn is_writable(&self) -> bool {
        !self.options.readonly
    }

    /// Check if the member is described as a field.
    #[must_use]
    pub fn is_field(&self) -> bool {
        self.options.field
    }

    /// Check if the member's type is reflected.
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.options.nested
    }
}
