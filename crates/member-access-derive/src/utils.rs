// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Shared utilities for parsing and code generation.
//!
//! # Submodules
//!
//! - [`docs`] - Doc comment extraction

pub mod docs;
