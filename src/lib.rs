// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! # member-access
//!
//! One crate, all features. Re-exports:
//! - [`Reflect`](macro@Reflect) derive macro from `member-access-derive`
//!   (feature `derive`, on by default)
//! - All types from `member-access-core` ([`TypeAccessor`],
//!   [`LateBinding`], [`format_template`], ...)
//!
//! # Quick Start
//!
//! ```rust
//! use member_access::prelude::*;
//!
//! #[derive(Debug, Default, Reflect)]
//! #[reflect(default)]
//! pub struct Order {
//!     pub id:    i64,
//!     pub total: f64
//! }
//!
//! let accessor = type_accessor::<Order>();
//! let total = accessor.find("TOTAL").unwrap().unwrap();
//!
//! let mut order = Order::default();
//! total.set_value(Some(&mut order), Value::new(12.5_f64)).unwrap();
//! assert_eq!(order.total, 12.5);
//!
//! let read = total.get_value(Some(&order)).unwrap();
//! assert_eq!(read.downcast_ref::<f64>(), Some(&12.5));
//! ```

pub use member_access_core::*;
#[cfg(feature = "derive")]
#[cfg_attr(docsrs, doc(cfg(feature = "derive")))]
pub use member_access_derive::Reflect;

/// Convenient re-exports, including the derive macro.
pub mod prelude {
    pub use member_access_core::prelude::*;
    #[cfg(feature = "derive")]
    pub use member_access_derive::Reflect;
}
