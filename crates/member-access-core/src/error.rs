// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error types for member access.
//!
//! Lookups that simply find nothing return `Option::None`; everything else
//! that can go wrong surfaces as an [`AccessError`].
//!
//! # Taxonomy
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | [`InvalidArgument`](AccessError::InvalidArgument) | Empty names, malformed member references, wrong argument counts, missing or mismatched instances |
//! | [`InvalidOperation`](AccessError::InvalidOperation) | Reading an unreadable member, writing a read-only one, no public parameterless constructor, late-bound lookup found nothing |
//! | [`InvalidCast`](AccessError::InvalidCast) | A value cannot be coerced to the declared member or parameter type |
//! | [`Invocation`](AccessError::Invocation) | The body of an invoked method or constructor returned an error |

use std::error::Error as StdError;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AccessError>;

/// Errors raised by accessors, the factory and the late-binding facade.
#[derive(Debug, Error)]
pub enum AccessError {
    /// A required input was empty, malformed or of the wrong shape.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Human readable description.
        message: String
    },

    /// The requested operation is not supported by the resolved member.
    #[error("invalid operation: {message}")]
    InvalidOperation {
        /// Human readable description.
        message: String
    },

    /// A value could not be converted to the declared type.
    #[error("invalid cast: cannot convert `{actual}` to `{expected}` for {context}")]
    InvalidCast {
        /// Declared type name.
        expected: &'static str,
        /// Run-time type name of the offending value.
        actual:   &'static str,
        /// Member or parameter the value was destined for.
        context:  String
    },

    /// The invoked member body failed. The original error is kept as the
    /// source so callers can downcast it.
    #[error("invocation of `{member}` failed: {source}")]
    Invocation {
        /// Qualified member name (`Type::member`).
        member: String,
        /// Error returned by the member body.
        #[source]
        source: Box<dyn StdError + Send + Sync>
    }
}

impl AccessError {
    /// Create an [`AccessError::InvalidArgument`].
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into()
        }
    }

    /// Create an [`AccessError::InvalidOperation`].
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into()
        }
    }

    /// Create an [`AccessError::InvalidCast`].
    pub fn invalid_cast(
        expected: &'static str,
        actual: &'static str,
        context: impl Into<String>
    ) -> Self {
        Self::InvalidCast {
            expected,
            actual,
            context: context.into()
        }
    }

    /// Create an [`AccessError::Invocation`].
    pub fn invocation(member: impl Into<String>, source: Box<dyn StdError + Send + Sync>) -> Self {
        Self::Invocation {
            member: member.into(),
            source
        }
    }

    /// Check if this is an [`AccessError::InvalidArgument`].
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Check if this is an [`AccessError::InvalidOperation`].
    #[must_use]
    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, Self::InvalidOperation { .. })
    }

    /// Check if this is an [`AccessError::InvalidCast`].
    #[must_use]
    pub fn is_invalid_cast(&self) -> bool {
        matches!(self, Self::InvalidCast { .. })
    }

    /// Check if this is an [`AccessError::Invocation`].
    #[must_use]
    pub fn is_invocation(&self) -> bool {
        matches!(self, Self::Invocation { .. })
    }
}
