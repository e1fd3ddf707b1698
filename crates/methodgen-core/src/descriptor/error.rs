// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for descriptor analysis.
//!
//! Errors carry source locations ([`Span`]) for precise diagnostics.
//! They integrate with [`miette`] for beautiful error reporting.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

use super::Span;

/// A surface-syntax error encountered while reading a descriptor.
///
/// The reader does not recover: the first read error aborts the run, and no
/// output is produced for the descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind}")]
#[diagnostic()]
pub struct ReadError {
    /// The kind of read error.
    #[source]
    pub kind: ReadErrorKind,
    /// The source location of the error.
    #[label("here")]
    pub span: Span,
}

impl ReadError {
    /// Creates a new read error.
    #[must_use]
    pub fn new(kind: ReadErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Creates an "unexpected character" error.
    #[must_use]
    pub fn unexpected_char(c: char, span: Span) -> Self {
        Self::new(ReadErrorKind::UnexpectedCharacter(c), span)
    }

    /// Creates an "unterminated tag" error.
    #[must_use]
    pub fn unterminated_tag(span: Span) -> Self {
        Self::new(ReadErrorKind::UnterminatedTag, span)
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn unexpected_eof(span: Span) -> Self {
        Self::new(ReadErrorKind::UnexpectedEof, span)
    }
}

/// The kind of read error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadErrorKind {
    /// An unexpected character was encountered.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    /// An element tag was not terminated before end of input.
    #[error("unterminated element tag")]
    UnterminatedTag,

    /// A comment was not terminated.
    #[error("unterminated comment")]
    UnterminatedComment,

    /// An attribute value was not terminated.
    #[error("unterminated attribute value")]
    UnterminatedAttribute,

    /// An entity reference was not one of the five predefined entities.
    #[error("unknown entity reference '&{0};'")]
    UnknownEntity(EcoString),

    /// A closing tag did not match the innermost open element.
    #[error("mismatched closing tag '</{found}>', expected '</{expected}>'")]
    MismatchedClosingTag {
        /// The innermost open element.
        expected: EcoString,
        /// The name found in the closing tag.
        found: EcoString,
    },

    /// A closing tag appeared with no element open.
    #[error("closing tag '</{0}>' with no open element")]
    StrayClosingTag(EcoString),

    /// Input ended while elements were still open.
    #[error("unexpected end of input")]
    UnexpectedEof,
}

/// A structural or validation failure in a descriptor.
///
/// All variants abort the run before any emission; no partial output is
/// produced.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum DescriptorError {
    /// The underlying event stream failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Read(#[from] ReadError),

    /// An arity value was not a non-negative decimal integer.
    #[error("invalid arity '{text}'")]
    #[diagnostic(help("arity must be a non-negative decimal integer"))]
    InvalidArity {
        /// The offending text.
        text: EcoString,
        /// The source location of the arity value.
        #[label("not an integer")]
        span: Span,
    },

    /// An `optional` attribute was not a boolean literal.
    #[error("invalid boolean '{text}' for 'optional'")]
    #[diagnostic(help("expected 'true' or 'false'"))]
    InvalidBoolean {
        /// The offending text.
        text: EcoString,
        /// The source location of the attribute.
        #[label("not a boolean")]
        span: Span,
    },

    /// A `method-alias` named an original that is not declared in its table.
    #[error("alias target '{original}' is not declared in this table")]
    #[diagnostic(help(
        "an alias may only refer to a method declared earlier in the same section"
    ))]
    UnknownAliasTarget {
        /// The unresolved original name.
        original: EcoString,
        /// The source location of the alias element.
        #[label("unresolved")]
        span: Span,
    },

    /// A required attribute was missing from an element.
    #[error("missing required attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        /// The element name.
        element: EcoString,
        /// The missing attribute name.
        attribute: EcoString,
        /// The source location of the element.
        #[label("here")]
        span: Span,
    },

    /// A method-bearing element appeared outside a methods section.
    #[error("<{element}> is only valid inside a methods section")]
    OutsideSection {
        /// The element name.
        element: EcoString,
        /// The source location of the element.
        #[label("here")]
        span: Span,
    },

    /// An arity or java directive did not follow a method declaration.
    #[error("<{element}> does not follow a method declaration")]
    #[diagnostic(help(
        "arity and java directives apply to the most recently declared method"
    ))]
    MisplacedDirective {
        /// The element name.
        element: EcoString,
        /// The source location of the element.
        #[label("here")]
        span: Span,
    },

    /// The descriptor never declared a `<name>`.
    #[error("descriptor is missing a <name> element")]
    MissingName,

    /// The class table needs a dispatcher but no `<implementation>` was given.
    #[error("descriptor declares class methods but no <implementation>")]
    #[diagnostic(help(
        "the indexed dispatcher calls static functions on the implementation class"
    ))]
    MissingImplementation,
}
