// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Descriptor analysis for method table descriptors.
//!
//! This module contains the streaming reader and the parser that turn a
//! descriptor document into a [`Generator`](crate::table::Generator).
//!
//! # Reading
//!
//! The [`Reader`] converts descriptor text into a stream of structural
//! [`Event`]s (element start, text, element end) in document order. It is a
//! single forward pass with no backtracking; each event carries its source
//! location via [`Span`].
//!
//! ```
//! use methodgen_core::descriptor::{Event, Reader};
//!
//! let events: Vec<_> = Reader::new("<name>Kernel</name>")
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(events.len(), 3); // start, text, end
//! ```
//!
//! # Parsing
//!
//! The [`parse`] function consumes the event stream and builds the method
//! table aggregate, tracking the active table (instance vs class) and the
//! current entry that attribute directives apply to.
//!
//! # Error Handling
//!
//! Malformed surface syntax is reported as [`ReadError`]; structural and
//! validation failures as [`DescriptorError`]. Both carry spans and abort the
//! run before any emission — a failing descriptor produces no output.

mod error;
mod parser;
mod reader;
mod span;

pub use error::{DescriptorError, ReadError, ReadErrorKind};
pub use parser::parse;
pub use reader::{Attribute, Event, Reader};
pub use span::Span;
