// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Column naming rules for `#[reflect(rename_all = "...")]`.

use convert_case::{Case, Casing};
use darling::FromMeta;

/// How column names are derived from field names.
///
/// | Value | `customer_name` becomes |
/// |-------|-------------------------|
/// | `"snake_case"` | `customer_name` |
/// | `"camelCase"` | `customerName` |
/// | `"PascalCase"` | `CustomerName` |
/// | `"kebab-case"` | `customer-name` |
/// | `"SCREAMING_SNAKE_CASE"` | `CUSTOMER_NAME` |
/// | `"lowercase"` | `customername` |
/// | `"UPPERCASE"` | `CUSTOMERNAME` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    /// `snake_case`
    Snake,
    /// `camelCase`
    Camel,
    /// `PascalCase`
    Pascal,
    /// `kebab-case`
    Kebab,
    /// `SCREAMING_SNAKE_CASE`
    ScreamingSnake,
    /// `lowercase`
    Lower,
    /// `UPPERCASE`
    Upper
}

impl RenameRule {
    /// Apply the rule to a field name.
    #[must_use]
    pub fn apply(self, name: &str) -> String {
        match self {
            Self::Snake => name.to_case(Case::Snake),
            Self::Camel => name.to_case(Case::Camel),
            Self::Pascal => name.to_case(Case::Pascal),
            Self::Kebab => name.to_case(Case::Kebab),
            Self::ScreamingSnake => name.to_case(Case::Snake).to_uppercase(),
            Self::Lower => name.replace('_', "").to_lowercase(),
            Self::Upper => name.replace('_', "").to_uppercase()
        }
    }
}

impl FromMeta for RenameRule {
    fn from_string(value: &str) -> darling::Result<Self> {
        match value {
            "snake_case" => Ok(Self::Snake),
            "camelCase" => Ok(Self::Camel),
            "PascalCase" => Ok(Self::Pascal),
            "kebab-case" => Ok(Self::Kebab),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
            "lowercase" => Ok(Self::Lower),
            "UPPERCASE" => Ok(Self::Upper),
            other => Err(darling::Error::unknown_value(other))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_spelling() {
        let cases = [
            ("snake_case", RenameRule::Snake),
            ("camelCase", RenameRule::Camel),
            ("PascalCase", RenameRule::Pascal),
            ("kebab-case", RenameRule::Kebab),
            ("SCREAMING_SNAKE_CASE", RenameRule::ScreamingSnake),
            ("lowercase", RenameRule::Lower),
            ("UPPERCASE", RenameRule::Upper)
        ];
        for (spelling, rule) in cases {
            assert_eq!(RenameRule::from_string(spelling).unwrap(), rule);
        }
    }

    #[test]
    fn rejects_unknown_spelling() {
        assert!(RenameRule::from_string("Title Case").is_err());
    }

    #[test]
    fn applies_to_field_names() {
        assert_eq!(RenameRule::Camel.apply("customer_name"), "customerName");
        assert_eq!(RenameRule::Pascal.apply("customer_name"), "CustomerName");
        assert_eq!(RenameRule::Kebab.apply("customer_name"), "customer-name");
        assert_eq!(
            RenameRule::ScreamingSnake.apply("customer_name"),
            "CUSTOMER_NAME"
        );
        assert_eq!(RenameRule::Lower.apply("customer_name"), "customername");
        assert_eq!(RenameRule::Upper.apply("customer_name"), "CUSTOMERNAME");
        assert_eq!(RenameRule::Snake.apply("total"), "total");
    }
}
