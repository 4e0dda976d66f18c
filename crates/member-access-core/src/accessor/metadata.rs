// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Declarative metadata resolved from annotations.

use crate::{Annotation, GeneratedOption, TypeDescriptor};

/// Mapping metadata of one property or field.
///
/// Computed once per accessor from the member's annotations. When an
/// annotation appears more than once the last one wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberMetadata {
    member_name:          &'static str,
    column:               Option<&'static str>,
    type_name:            Option<&'static str>,
    order:                Option<i32>,
    is_key:               bool,
    is_not_mapped:        bool,
    is_concurrency_check: bool,
    generated:            GeneratedOption,
    foreign_key:          Option<&'static str>,
    is_required:          bool,
    max_length:           Option<usize>,
    description:          Option<&'static str>
}

impl MemberMetadata {
    pub(crate) fn from_annotations(member_name: &'static str, annotations: &[Annotation]) -> Self {
        let mut metadata = Self {
            member_name,
            column:               None,
            type_name:            None,
            order:                None,
            is_key:               false,
            is_not_mapped:        false,
            is_concurrency_check: false,
            generated:            GeneratedOption::None,
            foreign_key:          None,
            is_required:          false,
            max_length:           None,
            description:          None
        };
        for annotation in annotations {
            match annotation {
                Annotation::Column {
                    name,
                    type_name,
                    order
                } => {
                    metadata.column = name.or(metadata.column);
                    metadata.type_name = type_name.or(metadata.type_name);
                    metadata.order = order.or(metadata.order);
                }
                Annotation::Key => metadata.is_key = true,
                Annotation::NotMapped => metadata.is_not_mapped = true,
                Annotation::ConcurrencyCheck => metadata.is_concurrency_check = true,
                Annotation::Generated(option) => metadata.generated = *option,
                Annotation::ForeignKey(target) => metadata.foreign_key = Some(*target),
                Annotation::Required => metadata.is_required = true,
                Annotation::MaxLength(length) => metadata.max_length = Some(*length),
                Annotation::Description(text) => metadata.description = Some(*text),
                Annotation::Table { .. } => {}
            }
        }
        metadata
    }

    /// Column name; the member name unless a column annotation renames it.
    #[must_use]
    pub fn column_name(&self) -> &'static str {
        self.column.unwrap_or(self.member_name)
    }

    /// Column name given by a column annotation, if any.
    #[must_use]
    pub fn mapped_column(&self) -> Option<&'static str> {
        self.column
    }

    /// Provider-specific column type name.
    #[must_use]
    pub fn type_name(&self) -> Option<&'static str> {
        self.type_name
    }

    /// Column ordinal.
    #[must_use]
    pub fn order(&self) -> Option<i32> {
        self.order
    }

    /// Check if the member is part of the key.
    #[must_use]
    pub fn is_key(&self) -> bool {
        self.is_key
    }

    /// Check if the member is excluded from mapping.
    #[must_use]
    pub fn is_not_mapped(&self) -> bool {
        self.is_not_mapped
    }

    /// Check if the member is a concurrency token.
    #[must_use]
    pub fn is_concurrency_check(&self) -> bool {
        self.is_concurrency_check
    }

    /// How the store generates the value.
    #[must_use]
    pub fn generated(&self) -> GeneratedOption {
        self.generated
    }

    /// Navigation this member is a foreign key for.
    #[must_use]
    pub fn foreign_key(&self) -> Option<&'static str> {
        self.foreign_key
    }

    /// Check if a value is required.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.is_required
    }

    /// Maximum length.
    #[must_use]
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Description taken from doc comments or set explicitly.
    #[must_use]
    pub fn description(&self) -> Option<&'static str> {
        self.description
    }
}

/// Table a type maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableInfo {
    name:   &'static str,
    schema: Option<&'static str>
}

impl TableInfo {
    /// Resolve from a `Table` annotation, falling back to the type name.
    pub(crate) fn from_descriptor(descriptor: &TypeDescriptor) -> Self {
        descriptor
            .annotations()
            .iter()
            .rev()
            .find_map(|annotation| match annotation {
                Annotation::Table {
                    name,
                    schema
                } => Some(Self {
                    name:   *name,
                    schema: *schema
                }),
                _ => None
            })
            .unwrap_or(Self {
                name:   descriptor.name(),
                schema: None
            })
    }

    /// Table name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Schema, when declared.
    #[must_use]
    pub fn schema(&self) -> Option<&'static str> {
        self.schema
    }
}
