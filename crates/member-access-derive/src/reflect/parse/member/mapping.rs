// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Mapping attributes that become member annotations.
//!
//! # Attributes
//!
//! | Attribute | Syntax |
//! |-----------|--------|
//! | `column` | `#[column(name = "total_amount", type_name = "money", order = 2)]` |
//! | `key` | `#[key]` |
//! | `not_mapped` | `#[not_mapped]` |
//! | `concurrency_check` | `#[concurrency_check]` |
//! | `generated` | `#[generated(identity)]`, `computed` or `none` |
//! | `foreign_key` | `#[foreign_key(Customer)]` |
//! | `required` | `#[required]` |
//! | `max_length` | `#[max_length(120)]` |

use darling::FromMeta;
use syn::{Attribute, Ident, LitInt};

/// `#[column(...)]` arguments. All optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, FromMeta)]
pub struct ColumnConfig {
    /// Column name override.
    #[darling(default)]
    pub name:      Option<String>,
    /// Provider-specific type name.
    #[darling(default)]
    pub type_name: Option<String>,
    /// Zero-based ordinal.
    #[darling(default)]
    pub order:     Option<i32>
}

/// `#[generated(...)]` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratedKind {
    /// `none`
    None,
    /// `identity`
    Identity,
    /// `computed`
    Computed
}

impl GeneratedKind {
    fn from_ident(ident: &Ident) -> syn::Result<Self> {
        match ident.to_string().as_str() {
            "none" => Ok(Self::None),
            "identity" => Ok(Self::Identity),
            "computed" => Ok(Self::Computed),
            other => Err(syn::Error::new_spanned(
                ident,
                format!("unknown generated option `{other}`, expected `identity`, `computed` or `none`")
            ))
        }
    }
}

/// Every mapping attribute found on one field.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MappingConfig {
    /// `#[column(...)]`
    pub column:            Option<ColumnConfig>,
    /// `#[key]`
    pub key:               bool,
    /// `#[not_mapped]`
    pub not_mapped:        bool,
    /// `#[concurrency_check]`
    pub concurrency_check: bool,
    /// `#[generated(...)]`
    pub generated:         Option<GeneratedKind>,
    /// `#[foreign_key(...)]`
    pub foreign_key:       Option<String>,
    /// `#[required]`
    pub required:          bool,
    /// `#[max_length(...)]`
    pub max_length:        Option<usize>
}

impl MappingConfig {
    /// Parse mapping attributes from a field.
    ///
    /// Attributes that are not mapping attributes are ignored. When an
    /// attribute repeats, the last one wins.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed arguments, arguments on flag
    /// attributes, and unknown `generated` options.
    pub fn from_attrs(attrs: &[Attribute]) -> darling::Result<Self> {
        let mut config = Self::default();
        for attr in attrs {
            let path = attr.path();
            if path.is_ident("column") {
                config.column = Some(ColumnConfig::from_meta(&attr.meta)?);
            } else if path.is_ident("key") {
                attr.meta.require_path_only()?;
                config.key = true;
            } else if path.is_ident("not_mapped") {
                attr.meta.require_path_only()?;
                config.not_mapped = true;
            } else if path.is_ident("concurrency_check") {
                attr.meta.require_path_only()?;
                config.concurrency_check = true;
            } else if path.is_ident("generated") {
                let ident: Ident = attr.parse_args()?;
                config.generated = Some(GeneratedKind::from_ident(&ident)?);
            } else if path.is_ident("foreign_key") {
                let ident: Ident = attr.parse_args()?;
                config.foreign_key = Some(ident.to_string());
            } else if path.is_ident("required") {
                attr.meta.require_path_only()?;
                config.required = true;
            } else if path.is_ident("max_length") {
                let value: LitInt = attr.parse_args()?;
                config.max_length = Some(value.base10_parse()?);
            }
        }
        Ok(config)
    }
}
