// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level `#[reflect(...)]` flags.

use syn::Attribute;

/// How a field is described.
///
/// # Attributes
///
/// - `#[reflect(skip)]` - Not described at all
/// - `#[reflect(readonly)]` - Described without a setter
/// - `#[reflect(field)]` - Field descriptor instead of a property
/// - `#[reflect(nested)]` - Value type implements `Reflect`
///
/// Flags combine: `#[reflect(field, readonly)]`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MemberOptions {
    /// Leave the field out of the descriptor.
    pub skip:     bool,
    /// No setter.
    pub readonly: bool,
    /// Describe as a field rather than a property.
    pub field:    bool,
    /// Declared type is itself reflected.
    pub nested:   bool
}

impl MemberOptions {
    /// Parse every `#[reflect(...)]` on a field.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown flags or non-list syntax.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut options = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident("reflect")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    options.skip = true;
                } else if meta.path.is_ident("readonly") {
                    options.readonly = true;
                } else if meta.path.is_ident("field") {
                    options.field = true;
                } else if meta.path.is_ident("nested") {
                    options.nested = true;
                } else {
                    return Err(meta.error(
                        "unknown reflect option, expected `skip`, `readonly`, `field` or `nested`"
                    ));
                }
                Ok(())
            })?;
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    #[test]
    fn no_attribute_is_default() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[key])];
        assert_eq!(MemberOptions::from_attrs(&attrs).unwrap(), MemberOptions::default());
    }

    #[test]
    fn flags_combine() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[reflect(field, readonly)])];
        let options = MemberOptions::from_attrs(&attrs).unwrap();
        assert!(options.field);
        assert!(options.readonly);
        assert!(!options.skip);
        assert!(!options.nested);
    }

    #[test]
    fn flags_from_several_attributes() {
        let attrs: Vec<Attribute> = vec![
            parse_quote!(#[reflect(nested)]),
            parse_quote!(#[reflect(readonly)]),
        ];
        let options = MemberOptions::from_attrs(&attrs).unwrap();
        assert!(options.nested);
        assert!(options.readonly);
    }

    #[test]
    fn unknown_flag_is_an_error() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[reflect(hidden)])];
        let err = MemberOptions::from_attrs(&attrs).unwrap_err();
        assert!(err.to_string().contains("unknown reflect option"));
    }

    #[test]
    fn bare_attribute_is_an_error() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[reflect])];
        assert!(MemberOptions::from_attrs(&attrs).is_err());
    }
}
