// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Code generation for `#[derive(Reflect)]`.
//!
//! # Generated Code
//!
//! ```rust,ignore
//! impl ::member_access::Reflect for Order {
//!     fn type_descriptor() -> &'static ::member_access::TypeDescriptor {
//!         static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
//!         DESCRIPTOR.get_or_init(|| {
//!             let builder = TypeDescriptorBuilder::<Order>::new("Order")
//!                 .type_annotation(Annotation::Table { name: "orders", schema: None })
//!                 .property("total", |this| this.total.clone(), |this, value| this.total = value)
//!                 .annotate(Annotation::Required)
//!                 .default_constructor();
//!             let builder = Order::methods(builder);
//!             builder.build()
//!         })
//!     }
//! }
//! ```

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{GeneratedKind, MemberDef, ReflectDef};

/// Generate the `Reflect` implementation.
pub fn generate(def: &ReflectDef) -> TokenStream {
    let ident = &def.ident;
    let name = &def.name;
    let type_annotations = type_annotations(def);
    let members = def.described_members().map(|member| generate_member(def, member));
    let constructor = def
        .default_constructor
        .then(|| quote! { .default_constructor() });
    let extend = def
        .extend
        .as_ref()
        .map(|path| quote! { let builder = #path(builder); });

    quote! {
        impl ::member_access::Reflect for #ident {
            fn type_descriptor() -> &'static ::member_access::TypeDescriptor {
                static DESCRIPTOR: ::std::sync::OnceLock<::member_access::TypeDescriptor> =
                    ::std::sync::OnceLock::new();
                DESCRIPTOR.get_or_init(|| {
                    let builder = ::member_access::TypeDescriptorBuilder::<#ident>::new(#name)
                        #(#type_annotations)*
                        #(#members)*
                        #constructor;
                    #extend
                    builder.build()
                })
            }
        }
    }
}

fn type_annotations(def: &ReflectDef) -> Vec<TokenStream> {
    let mut annotations = Vec::new();
    if let Some(table) = &def.table {
        let table_name = &table.name;
        let schema = optional_str(table.schema.as_deref());
        annotations.push(quote! {
            .type_annotation(::member_access::Annotation::Table {
                name: #table_name,
                schema: #schema
            })
        });
    }
    if let Some(doc) = &def.doc {
        annotations.push(quote! {
            .type_annotation(::member_access::Annotation::Description(#doc))
        });
    }
    annotations
}

/// Builder calls for one member: the accessor registration followed by its
/// modifiers and annotations.
fn generate_member(def: &ReflectDef, member: &MemberDef) -> TokenStream {
    let owner = &def.ident;
    let field = &member.ident;
    let ty = &member.ty;
    let name = member.name();

    let register = match (member.is_field(), member.is_writable()) {
        (false, true) => quote! {
            .property(
                #name,
                |__this: &#owner| ::core::clone::Clone::clone(&__this.#field),
                |__this: &mut #owner, __value: #ty| __this.#field = __value
            )
        },
        (false, false) => quote! {
            .readonly_property(
                #name,
                |__this: &#owner| ::core::clone::Clone::clone(&__this.#field)
            )
        },
        (true, true) => quote! {
            .field(
                #name,
                |__this: &#owner| &__this.#field,
                |__this: &mut #owner| &mut __this.#field
            )
        },
        (true, false) => quote! {
            .readonly_field(#name, |__this: &#owner| &__this.#field)
        }
    };

    let visibility = (!member.is_public).then(|| quote! { .non_public() });
    let nested = member.is_nested().then(|| quote! { .reflected::<#ty>() });
    let annotations = member_annotations(def, member);

    quote! {
        #register
        #visibility
        #nested
        #(.annotate(#annotations))*
    }
}

fn member_annotations(def: &ReflectDef, member: &MemberDef) -> Vec<TokenStream> {
    let mapping = &member.mapping;
    let mut annotations = Vec::new();

    let column_name = def.column_name(member);
    let type_name = mapping.column.as_ref().and_then(|c| c.type_name.as_deref());
    let order = mapping.column.as_ref().and_then(|c| c.order);
    if column_name.is_some() || type_name.is_some() || order.is_some() {
        let column_name = optional_str(column_name.as_deref());
        let type_name = optional_str(type_name);
        let order = match order {
            Some(order) => quote! { ::core::option::Option::Some(#order) },
            None => quote! { ::core::option::Option::None }
        };
        annotations.push(quote! {
            ::member_access::Annotation::Column {
                name: #column_name,
                type_name: #type_name,
                order: #order
            }
        });
    }

    if mapping.key {
        annotations.push(quote! { ::member_access::Annotation::Key });
    }
    if mapping.not_mapped {
        annotations.push(quote! { ::member_access::Annotation::NotMapped });
    }
    if mapping.concurrency_check {
        annotations.push(quote! { ::member_access::Annotation::ConcurrencyCheck });
    }
    if let Some(kind) = mapping.generated {
        let option = match kind {
            GeneratedKind::None => quote! { None },
            GeneratedKind::Identity => quote! { Identity },
            GeneratedKind::Computed => quote! { Computed }
        };
        annotations.push(quote! {
            ::member_access::Annotation::Generated(::member_access::GeneratedOption::#option)
        });
    }
    if let Some(target) = &mapping.foreign_key {
        annotations.push(quote! { ::member_access::Annotation::ForeignKey(#target) });
    }
    if mapping.required {
        annotations.push(quote! { ::member_access::Annotation::Required });
    }
    if let Some(max) = mapping.max_length {
        annotations.push(quote! { ::member_access::Annotation::MaxLength(#max) });
    }
    if let Some(doc) = &member.doc {
        annotations.push(quote! { ::member_access::Annotation::Description(#doc) });
    }

    annotations
}

fn optional_str(value: Option<&str>) -> TokenStream {
    match value {
        Some(value) => quote! { ::core::option::Option::Some(#value) },
        None => quote! { ::core::option::Option::None }
    }
}

#[cfg(test)]
mod tests {
    use syn::{DeriveInput, parse_quote};

    use super::*;

    /// Expanded code with whitespace removed, string literals included.
    fn expand(input: DeriveInput) -> String {
        let def = ReflectDef::from_derive_input(&input).unwrap();
        generate(&def).to_string().replace(' ', "")
    }

    #[test]
    fn implements_reflect_with_cached_descriptor() {
        let code = expand(parse_quote! {
            pub struct Order {
                pub total: f64
            }
        });
        assert!(code.contains("impl::member_access::ReflectforOrder"));
        assert!(code.contains("::std::sync::OnceLock<::member_access::TypeDescriptor>"));
        assert!(code.contains("TypeDescriptorBuilder::<Order>::new(\"Order\")"));
        assert!(code.contains("builder.build()"));
    }

    #[test]
    fn writable_member_is_a_property() {
        let code = expand(parse_quote! {
            pub struct Order {
                pub total: f64
            }
        });
        assert!(code.contains(".property(\"total\""));
        assert!(code.contains("__value:f64"));
        assert!(!code.contains("non_public"));
    }

    #[test]
    fn member_flavours() {
        let code = expand(parse_quote! {
            pub struct Order {
                #[reflect(readonly)]
                pub id: i64,
                #[reflect(field)]
                pub count: i32,
                #[reflect(field, readonly)]
                pub code: String,
                #[reflect(skip)]
                pub cache: Vec<u8>
            }
        });
        assert!(code.contains(".readonly_property(\"id\""));
        assert!(code.contains(".field(\"count\""));
        assert!(code.contains(".readonly_field(\"code\""));
        assert!(!code.contains("\"cache\""));
    }

    #[test]
    fn private_member_is_non_public() {
        let code = expand(parse_quote! {
            pub struct Order {
                secret: String
            }
        });
        assert!(code.contains(".non_public()"));
    }

    #[test]
    fn nested_member_declares_reflected_type() {
        let code = expand(parse_quote! {
            pub struct Customer {
                #[reflect(nested)]
                pub city: City
            }
        });
        assert!(code.contains(".reflected::<City>()"));
    }

    #[test]
    fn annotations() {
        let code = expand(parse_quote! {
            /// Customer order.
            #[table(name = "orders", schema = "sales")]
            pub struct Order {
                /// Primary key.
                #[key]
                #[generated(identity)]
                #[column(name = "order_id", type_name = "bigint", order = 0)]
                pub id: i64,
                #[not_mapped]
                #[concurrency_check]
                #[required]
                #[max_length(40)]
                #[foreign_key(Customer)]
                pub customer: String
            }
        });
        assert!(code.contains("Annotation::Table{name:\"orders\",schema:::core::option::Option::Some(\"sales\")}"));
        assert!(code.contains("Annotation::Description(\"Customerorder.\")"));
        assert!(code.contains("Annotation::Description(\"Primarykey.\")"));
        assert!(code.contains("Annotation::Key"));
        assert!(code.contains("GeneratedOption::Identity"));
        assert!(code.contains("name:::core::option::Option::Some(\"order_id\")"));
        assert!(code.contains("type_name:::core::option::Option::Some(\"bigint\")"));
        assert!(code.contains("Annotation::NotMapped"));
        assert!(code.contains("Annotation::ConcurrencyCheck"));
        assert!(code.contains("Annotation::Required"));
        assert!(code.contains("Annotation::MaxLength(40usize)"));
        assert!(code.contains("Annotation::ForeignKey(\"Customer\")"));
    }

    #[test]
    fn rename_all_produces_column_annotation() {
        let code = expand(parse_quote! {
            #[reflect(rename_all = "SCREAMING_SNAKE_CASE")]
            pub struct Order {
                pub unit_price: f64
            }
        });
        assert!(code.contains("Some(\"UNIT_PRICE\")"));
    }

    #[test]
    fn no_column_annotation_without_column_data() {
        let code = expand(parse_quote! {
            pub struct Order {
                pub total: f64
            }
        });
        assert!(!code.contains("Annotation::Column"));
    }

    #[test]
    fn constructor_and_extend_hook() {
        let code = expand(parse_quote! {
            #[reflect(default, extend = "Order::methods")]
            pub struct Order {
                pub total: f64
            }
        });
        assert!(code.contains(".default_constructor()"));
        assert!(code.contains("letbuilder=Order::methods(builder);"));
    }

    #[test]
    fn no_constructor_by_default() {
        let code = expand(parse_quote! {
            pub struct Order {
                pub total: f64
            }
        });
        assert!(!code.contains("default_constructor"));
    }
}
