// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Compile-time checked member references.
//!
//! [`member_ref!`](crate::member_ref) turns a member path into a
//! [`MemberRef`] after the compiler has checked that the member exists:
//!
//! | Invocation | Result |
//! |------------|--------|
//! | `member_ref!(Order, total)` | [`MemberRef::Member`] |
//! | `member_ref!(Order, quantity as f64)` | [`MemberRef::Convert`] around the member |
//! | `member_ref!(Order, total_with_tax())` | [`MemberRef::Call`] |
//!
//! ```rust
//! use member_access_core::{MemberRef, member_ref};
//!
//! struct Order {
//!     quantity: u32
//! }
//!
//! let reference = member_ref!(Order, quantity as f64);
//! assert!(matches!(reference, MemberRef::Convert { .. }));
//! assert_eq!(reference.member_name().unwrap(), "quantity");
//! ```

use crate::{AccessError, Result, TypeRef};

/// A member expression rooted at a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberRef {
    /// Direct member access.
    Member {
        /// Type the member is accessed on.
        owner: TypeRef,
        /// Member name.
        name:  &'static str
    },

    /// Numeric conversion of another expression.
    Convert {
        /// Conversion target type.
        target:  TypeRef,
        /// Converted expression.
        operand: Box<MemberRef>
    },

    /// Method call.
    Call {
        /// Type the method is called on.
        owner: TypeRef,
        /// Method name.
        name:  &'static str
    }
}

impl MemberRef {
    /// Type the expression is rooted at.
    #[must_use]
    pub fn owner(&self) -> TypeRef {
        match self {
            Self::Member {
                owner, ..
            }
            | Self::Call {
                owner, ..
            } => *owner,
            Self::Convert {
                operand, ..
            } => operand.owner()
        }
    }

    /// Name of the referenced member, looking through conversions.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`](AccessError::InvalidArgument) when the expression
    /// is a method call.
    pub fn member_name(&self) -> Result<&'static str> {
        match self {
            Self::Member {
                name, ..
            } => Ok(*name),
            Self::Convert {
                operand, ..
            } => operand.member_name(),
            Self::Call {
                owner,
                name
            } => Err(AccessError::invalid_argument(format!(
                "`{}::{name}()` is a method call, not a member access",
                owner.short_name()
            )))
        }
    }
}

/// Build a [`MemberRef`] checked by the compiler.
///
/// See the [module docs](crate::member_ref) for the accepted forms.
#[macro_export]
macro_rules! member_ref {
    ($owner:ty, $member:ident as $target:ty) => {{
        let _ = |__owner: &$owner| __owner.$member as $target;
        $crate::MemberRef::Convert {
            target:  $crate::TypeRef::of::<$target>(),
            operand: ::std::boxed::Box::new($crate::member_ref!($owner, $member))
        }
    }};
    ($owner:ty, $method:ident ()) => {{
        let _ = <$owner>::$method;
        $crate::MemberRef::Call {
            owner: $crate::TypeRef::of::<$owner>(),
            name:  ::core::stringify!($method)
        }
    }};
    ($owner:ty, $member:ident) => {{
        let _ = |__owner: &$owner| {
            let _ = &__owner.$member;
        };
        $crate::MemberRef::Member {
            owner: $crate::TypeRef::of::<$owner>(),
            name:  ::core::stringify!($member)
        }
    }};
}
