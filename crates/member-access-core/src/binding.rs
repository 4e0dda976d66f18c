// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Binding visibility sets.
//!
//! A [`BindingFlags`] value combines an access level (public, non-public)
//! with instance/static-ness. A member is visible to a lookup when both its
//! access level and its instance/static kind are present in the set.
//!
//! ```rust
//! use member_access_core::BindingFlags;
//!
//! let flags = BindingFlags::PUBLIC | BindingFlags::STATIC;
//! assert!(flags.contains(BindingFlags::STATIC));
//! assert!(!flags.contains(BindingFlags::INSTANCE));
//! assert_eq!(BindingFlags::default(), BindingFlags::PUBLIC | BindingFlags::INSTANCE);
//! ```

use std::{
    fmt,
    ops::{BitOr, BitOrAssign}
};

use crate::Visibility;

/// Filter applied to member lookups.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingFlags(u8);

impl BindingFlags {
    /// Public members.
    pub const PUBLIC: Self = Self(1);

    /// Non-public members (private, crate-visible, restricted).
    pub const NON_PUBLIC: Self = Self(1 << 1);

    /// Members bound to an instance.
    pub const INSTANCE: Self = Self(1 << 2);

    /// Members bound to the type.
    pub const STATIC: Self = Self(1 << 3);

    /// Public instance members. Used when no flags are given.
    pub const DEFAULT: Self = Self(Self::PUBLIC.0 | Self::INSTANCE.0);

    /// Every member regardless of access level or binding.
    pub const ALL: Self = Self(Self::PUBLIC.0 | Self::NON_PUBLIC.0 | Self::INSTANCE.0 | Self::STATIC.0);

    const NAMES: [(Self, &'static str); 4] = [
        (Self::PUBLIC, "PUBLIC"),
        (Self::NON_PUBLIC, "NON_PUBLIC"),
        (Self::INSTANCE, "INSTANCE"),
        (Self::STATIC, "STATIC")
    ];

    /// The empty set. Matches nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Union of two sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check that every flag of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check if no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Check whether a member with the given access level and binding is
    /// visible under this set.
    #[must_use]
    pub const fn matches(self, visibility: Visibility, is_static: bool) -> bool {
        let access = match visibility {
            Visibility::Public => Self::PUBLIC,
            Visibility::NonPublic => Self::NON_PUBLIC
        };
        let binding = if is_static {
            Self::STATIC
        } else {
            Self::INSTANCE
        };
        self.contains(access) && self.contains(binding)
    }
}

impl Default for BindingFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl BitOr for BindingFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for BindingFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Debug for BindingFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("BindingFlags(EMPTY)");
        }
        let names: Vec<&str> = Self::NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "BindingFlags({})", names.join(" | "))
    }
}
