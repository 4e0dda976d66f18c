// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing for `#[derive(Reflect)]`.
//!
//! # Module Structure
//!
//! ```text
//! parse/
//! ├── attrs.rs        #[reflect(...)] on the struct (darling)
//! ├── rename.rs       rename_all rules
//! ├── table.rs        #[table(...)]
//! ├── definition.rs   ReflectDef, the combined view
//! └── member/         per-field attributes
//!     ├── options.rs  #[reflect(skip | readonly | field | nested)]
//!     └── mapping.rs  #[column], #[key], #[generated], ...
//! ```

mod attrs;
mod definition;
mod member;
mod rename;
mod table;

pub use definition::ReflectDef;
pub use member::{GeneratedKind, MemberDef};
pub use rename::RenameRule;
pub use table::TableConfig;
