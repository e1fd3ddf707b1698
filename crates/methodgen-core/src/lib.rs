// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Method table compiler core.
//!
//! This crate contains the core compiler functionality:
//! - Descriptor analysis (streaming reader, parser, validation)
//! - The method table model (entries, ordinals, identifying constants)
//! - Code generation (Java `*Definition` compilation units)
//!
//! A compilation is a single forward pass: the descriptor document is parsed
//! into a [`table::Generator`] aggregate, which is then handed read-only to
//! [`codegen::generate`]. No state is shared across runs, so concurrent
//! invocations on different descriptors are independently safe.

#![doc = include_str!("../../../README.md")]

pub mod codegen;
pub mod descriptor;
pub mod table;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::codegen::generate;
    pub use crate::descriptor::{Span, parse};
    pub use crate::table::{Generator, MethodEntry, MethodSpec, Superclass};
}
