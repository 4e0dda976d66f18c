// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Doc comment extraction.
//!
//! `///` comments on a struct or field turn into a
//! `Annotation::Description` on the generated descriptor.

use syn::{Attribute, Expr, ExprLit, Lit, Meta};

/// Collect `#[doc = "..."]` attributes into one description.
///
/// Each line is trimmed and lines are joined with `\n`. Returns `None` when
/// there are no doc comments or they are blank.
pub fn extract_doc_comments(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| {
            if let Meta::NameValue(meta) = &attr.meta
                && let Expr::Lit(ExprLit {
                    lit: Lit::Str(text),
                    ..
                }) = &meta.value
            {
                return Some(text.value());
            }
            None
        })
        .collect();

    let combined = lines
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("\n");

    let trimmed = combined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs_of(input: &str) -> Vec<Attribute> {
        let item: syn::ItemStruct = syn::parse_str(input).unwrap();
        item.attrs
    }

    #[test]
    fn single_line() {
        let attrs = attrs_of(
            r#"
            /// Customer order.
            struct Order;
        "#
        );
        assert_eq!(extract_doc_comments(&attrs), Some("Customer order.".to_string()));
    }

    #[test]
    fn keeps_paragraph_breaks() {
        let attrs = attrs_of(
            r#"
            /// Summary.
            ///
            /// Details.
            struct Order;
        "#
        );
        assert_eq!(
            extract_doc_comments(&attrs),
            Some("Summary.\n\nDetails.".to_string())
        );
    }

    #[test]
    fn ignores_other_attributes() {
        let attrs = attrs_of(
            r#"
            #[derive(Debug)]
            struct Order;
        "#
        );
        assert_eq!(extract_doc_comments(&attrs), None);
    }

    #[test]
    fn blank_docs_are_none() {
        let attrs = attrs_of(
            r#"
            ///
            ///
            struct Order;
        "#
        );
        assert_eq!(extract_doc_comments(&attrs), None);
    }
}
