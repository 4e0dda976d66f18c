// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Declarative annotations attached to types and members.
//!
//! Annotations are data only. Nothing in this crate acts on them; accessors
//! surface them as [`MemberMetadata`](crate::MemberMetadata) and
//! [`TableInfo`](crate::TableInfo) for mappers to use.
//!
//! # Derive Attribute Mapping
//!
//! | Attribute | Annotation |
//! |-----------|------------|
//! | `#[table(name = "orders", schema = "sales")]` | [`Annotation::Table`] |
//! | `#[column(name = "total_amount", type_name = "money", order = 2)]` | [`Annotation::Column`] |
//! | `#[key]` | [`Annotation::Key`] |
//! | `#[not_mapped]` | [`Annotation::NotMapped`] |
//! | `#[concurrency_check]` | [`Annotation::ConcurrencyCheck`] |
//! | `#[generated(identity)]` | [`Annotation::Generated`] |
//! | `#[foreign_key(Customer)]` | [`Annotation::ForeignKey`] |
//! | `#[required]` | [`Annotation::Required`] |
//! | `#[max_length(120)]` | [`Annotation::MaxLength`] |
//! | `/// doc comment` | [`Annotation::Description`] |

/// How the store produces a member's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeneratedOption {
    /// Value is always supplied by the caller.
    #[default]
    None,

    /// Value is produced on insert (identity, sequence).
    Identity,

    /// Value is produced on insert and update (computed column).
    Computed
}

impl GeneratedOption {
    /// Parse from the attribute spelling.
    ///
    /// Returns `None` for unrecognized values.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "none" => Some(Self::None),
            "identity" => Some(Self::Identity),
            "computed" => Some(Self::Computed),
            _ => None
        }
    }
}

/// One piece of declarative metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Annotation {
    /// Type maps to a table.
    Table {
        /// Table name.
        name:   &'static str,
        /// Optional schema.
        schema: Option<&'static str>
    },

    /// Member maps to a column.
    Column {
        /// Column name, when different from the member name.
        name:      Option<&'static str>,
        /// Provider-specific type name.
        type_name: Option<&'static str>,
        /// Zero-based ordinal.
        order:     Option<i32>
    },

    /// Member is part of the key.
    Key,

    /// Member is excluded from mapping.
    NotMapped,

    /// Member takes part in optimistic concurrency checks.
    ConcurrencyCheck,

    /// Member value is generated by the store.
    Generated(GeneratedOption),

    /// Member is a foreign key for the named navigation.
    ForeignKey(&'static str),

    /// Member must have a value.
    Required,

    /// Maximum length of a string or collection member.
    MaxLength(usize),

    /// Human readable description.
    Description(&'static str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_option_default_is_none() {
        assert_eq!(GeneratedOption::default(), GeneratedOption::None);
    }

    #[test]
    fn generated_option_parse_is_case_insensitive() {
        assert_eq!(
            GeneratedOption::parse("Identity"),
            Some(GeneratedOption::Identity)
        );
        assert_eq!(
            GeneratedOption::parse("COMPUTED"),
            Some(GeneratedOption::Computed)
        );
        assert_eq!(GeneratedOption::parse("none"), Some(GeneratedOption::None));
        assert_eq!(GeneratedOption::parse("sequence"), None);
    }
}
