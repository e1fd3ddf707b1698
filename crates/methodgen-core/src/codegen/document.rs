// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Document tree for Java code generation.
//!
//! This module provides a composable `Document` type for building the
//! generated compilation unit declaratively. Instead of writing directly to a
//! string buffer with manual indentation tracking, codegen functions return
//! `Document` values that are rendered in a final pass.
//!
//! Generated Java has fixed formatting, so the tree carries no line-fitting
//! machinery: a `Line` is always a newline followed by the current
//! indentation, and rendering is deterministic — the same tree produces the
//! same bytes on every run.
//!
//! # Example
//!
//! ```
//! use methodgen_core::codegen::document::{line, nest, INDENT};
//! use methodgen_core::docvec;
//!
//! let doc = docvec![
//!     "public FooDefinition(Ruby runtime) {",
//!     nest(INDENT, docvec![line(), "super(runtime);"]),
//!     line(),
//!     "}",
//! ];
//! assert_eq!(
//!     doc.to_pretty_string(),
//!     "public FooDefinition(Ruby runtime) {\n    super(runtime);\n}"
//! );
//! ```

use ecow::EcoString;

/// Indentation width used throughout Java generation.
pub const INDENT: isize = 4;

/// A renderable document tree.
///
/// Documents are composable, immutable tree structures that describe the
/// layout of generated Java. They are rendered to strings in a final pass,
/// with automatic indentation handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document<'a> {
    /// A borrowed string literal.
    Str(&'a str),
    /// An owned string.
    String(String),
    /// A newline followed by current indentation.
    Line,
    /// Increase indentation for nested content.
    Nest(isize, Box<Document<'a>>),
    /// A sequence of documents.
    Vec(Vec<Document<'a>>),
    /// Empty document.
    Nil,
}

/// Coerce a value into a `Document`.
pub trait Documentable<'a> {
    fn to_doc(self) -> Document<'a>;
}

impl<'a> Documentable<'a> for &'a str {
    fn to_doc(self) -> Document<'a> {
        Document::Str(self)
    }
}

impl<'a> Documentable<'a> for String {
    fn to_doc(self) -> Document<'a> {
        Document::String(self)
    }
}

impl<'a> Documentable<'a> for EcoString {
    fn to_doc(self) -> Document<'a> {
        Document::String(String::from(self))
    }
}

impl<'a> Documentable<'a> for u32 {
    fn to_doc(self) -> Document<'a> {
        Document::String(self.to_string())
    }
}

impl<'a> Documentable<'a> for Document<'a> {
    fn to_doc(self) -> Document<'a> {
        self
    }
}

impl<'a> Documentable<'a> for Vec<Document<'a>> {
    fn to_doc(self) -> Document<'a> {
        Document::Vec(self)
    }
}

/// Join multiple documents together in a vector.
///
/// Each element is converted to a `Document` via the `Documentable` trait.
/// Documents are concatenated directly — no separator is inserted.
///
/// ```
/// use methodgen_core::docvec;
///
/// let doc = docvec!["STATIC | ", 3_u32];
/// assert_eq!(doc.to_pretty_string(), "STATIC | 3");
/// ```
#[macro_export]
macro_rules! docvec {
    () => {
        $crate::codegen::document::Document::Vec(Vec::new())
    };

    ($first:expr $(,)?) => {
        $crate::codegen::document::Document::Vec(
            vec![$crate::codegen::document::Documentable::to_doc($first)]
        )
    };

    ($first:expr, $($rest:expr),+ $(,)?) => {
        match $crate::codegen::document::Documentable::to_doc($first) {
            $crate::codegen::document::Document::Vec(mut vec) => {
                $(
                    vec.push($crate::codegen::document::Documentable::to_doc($rest));
                )*
                $crate::codegen::document::Document::Vec(vec)
            },
            first => {
                $crate::codegen::document::Document::Vec(
                    vec![first, $($crate::codegen::document::Documentable::to_doc($rest)),+]
                )
            }
        }
    };
}

/// Creates a `Line` document — a newline followed by indentation.
#[must_use]
pub fn line() -> Document<'static> {
    Document::Line
}

/// Creates a `Nil` document — an empty document.
#[must_use]
pub fn nil() -> Document<'static> {
    Document::Nil
}

/// Creates a `Nest` document — increases indentation for the inner document.
#[must_use]
pub fn nest(indent: isize, doc: Document<'_>) -> Document<'_> {
    Document::Nest(indent, Box::new(doc))
}

/// Concatenates documents without any separator.
#[must_use]
pub fn concat<'a>(docs: impl IntoIterator<Item = Document<'a>>) -> Document<'a> {
    Document::Vec(docs.into_iter().collect())
}

impl Document<'_> {
    /// Returns true if the document renders to nothing.
    ///
    /// Used by the emitter to skip entries whose emission operations are
    /// no-ops (aliases and undefines contribute no constant declaration and
    /// no dispatch branch).
    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self, Document::Nil)
    }

    /// Renders the document to a string.
    #[must_use]
    pub fn to_pretty_string(&self) -> String {
        let mut output = String::new();
        self.render_to(&mut output, 0);
        output
    }

    fn render_to(&self, output: &mut String, indent: isize) {
        match self {
            Document::Str(s) => output.push_str(s),
            Document::String(s) => output.push_str(s),
            Document::Nil => {}
            Document::Line => {
                output.push('\n');
                write_indent(output, indent);
            }
            Document::Nest(extra, doc) => {
                doc.render_to(output, indent + extra);
            }
            Document::Vec(docs) => {
                for doc in docs {
                    doc.render_to(output, indent);
                }
            }
        }
    }
}

fn write_indent(output: &mut String, indent: isize) {
    for _ in 0..indent {
        output.push(' ');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn str_document() {
        let doc = Document::Str("hello");
        assert_eq!(doc.to_pretty_string(), "hello");
    }

    #[test]
    fn string_document() {
        let doc = Document::String("world".to_string());
        assert_eq!(doc.to_pretty_string(), "world");
    }

    #[test]
    fn nil_document() {
        let doc = Document::Nil;
        assert_eq!(doc.to_pretty_string(), "");
        assert!(doc.is_nil());
    }

    #[test]
    fn line_document() {
        let doc = Document::Vec(vec![Document::Str("a"), Document::Line, Document::Str("b")]);
        assert_eq!(doc.to_pretty_string(), "a\nb");
    }

    #[test]
    fn nest_document() {
        let doc = Document::Vec(vec![
            Document::Str("switch (index) {"),
            nest(4, Document::Vec(vec![line(), Document::Str("default :")])),
        ]);
        assert_eq!(doc.to_pretty_string(), "switch (index) {\n    default :");
    }

    #[test]
    fn nested_nest() {
        let doc = nest(
            2,
            Document::Vec(vec![
                line(),
                Document::Str("outer"),
                nest(2, Document::Vec(vec![line(), Document::Str("inner")])),
            ]),
        );
        assert_eq!(doc.to_pretty_string(), "\n  outer\n    inner");
    }

    #[test]
    fn docvec_macro_empty() {
        let doc = docvec![];
        assert_eq!(doc.to_pretty_string(), "");
    }

    #[test]
    fn docvec_macro_multiple() {
        let doc = docvec!["a", "b", "c"];
        assert_eq!(doc.to_pretty_string(), "abc");
    }

    #[test]
    fn docvec_macro_mixed_types() {
        let owned = EcoString::from("BAR");
        let doc = docvec!["public static final int ", owned, " = FOO | ", 1_u32, ";"];
        assert_eq!(
            doc.to_pretty_string(),
            "public static final int BAR = FOO | 1;"
        );
    }

    #[test]
    fn docvec_flattens_leading_vec() {
        let inner = docvec!["a", "b"];
        let doc = docvec![inner, "c"];
        assert_eq!(doc.to_pretty_string(), "abc");
        if let Document::Vec(v) = doc {
            assert_eq!(v.len(), 3);
        } else {
            panic!("Expected Vec");
        }
    }

    #[test]
    fn concat_documents() {
        let docs = vec![
            Document::Str("import org.jruby.Ruby;"),
            line(),
            Document::Str("import org.jruby.RubyClass;"),
        ];
        let doc = concat(docs);
        assert_eq!(
            doc.to_pretty_string(),
            "import org.jruby.Ruby;\nimport org.jruby.RubyClass;"
        );
    }

    #[test]
    fn realistic_method_body() {
        let doc = docvec![
            "protected void defineMethods(MethodContext context) {",
            nest(
                INDENT,
                docvec![line(), "context.create(\"puts\", PUTS, 0);"]
            ),
            line(),
            "}",
        ];
        assert_eq!(
            doc.to_pretty_string(),
            "protected void defineMethods(MethodContext context) {\n    \
             context.create(\"puts\", PUTS, 0);\n}"
        );
    }

    #[test]
    fn blank_line_carries_no_indentation() {
        // A bare "\n" inside a nest stays column-0; line() re-indents.
        let doc = nest(INDENT, docvec![line(), "a;", "\n", line(), "b;"]);
        assert_eq!(doc.to_pretty_string(), "\n    a;\n\n    b;");
    }
}
