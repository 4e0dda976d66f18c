// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `#[derive(Reflect)]` implementation.
//!
//! # Pipeline
//!
//! ```text
//! DeriveInput ──► parse::ReflectDef ──► generate ──► impl Reflect
//!                  (attributes,          (builder chain
//!                   members, docs)        in a OnceLock)
//! ```
//!
//! Parsing collects every attribute error before giving up, so one
//! compilation reports all of them.

mod generate;
pub mod parse;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

use self::parse::ReflectDef;

/// Main entry point for the Reflect derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match ReflectDef::from_derive_input(&input) {
        Ok(def) => generate::generate(&def).into(),
        Err(err) => err.write_errors().into()
    }
}
