// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Streaming event reader for descriptor documents.
//!
//! This module converts descriptor text into a stream of [`Event`]s. The
//! reader is hand-written for maximum control over spans and error
//! reporting, and covers exactly the XML subset the descriptor format uses:
//! elements, attributes, character data, comments, an optional XML
//! declaration, and the five predefined entities.
//!
//! # Design Principles
//!
//! - **Single forward pass**: no backtracking, no random access
//! - **Precise spans**: every event and error carries its source location
//! - **No recovery**: a malformed descriptor aborts the run before emission
//!
//! # Example
//!
//! ```
//! use methodgen_core::descriptor::{Event, Reader};
//!
//! let events: Vec<_> = Reader::new("<method name=\"puts\"/>")
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(events.len(), 2); // start + synthetic end
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use ecow::EcoString;

use super::{ReadError, ReadErrorKind, Span};

/// One attribute of an element start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute name.
    pub name: EcoString,
    /// The attribute value, with entities decoded.
    pub value: EcoString,
    /// Source location covering `name="value"`.
    pub span: Span,
}

/// A structural event in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// An element start tag. Self-closing elements produce a `Start`
    /// immediately followed by a matching `End`.
    Start {
        /// The element name.
        name: EcoString,
        /// The attributes in source order.
        attributes: Vec<Attribute>,
        /// Source location covering the whole tag.
        span: Span,
    },
    /// Non-whitespace character data, with entities decoded.
    Text {
        /// The trimmed text content.
        text: EcoString,
        /// Source location of the trimmed content.
        span: Span,
    },
    /// An element end tag.
    End {
        /// The element name.
        name: EcoString,
        /// Source location covering the whole tag.
        span: Span,
    },
}

/// A streaming reader over descriptor text.
///
/// Implements [`Iterator`]; yields events until end of input or the first
/// error. After an error the iterator is exhausted — the reader does not
/// recover.
pub struct Reader<'src> {
    /// The descriptor text being read.
    source: &'src str,
    /// Character iterator with byte positions.
    chars: Peekable<CharIndices<'src>>,
    /// Current byte position in source.
    position: usize,
    /// Names of currently open elements, innermost last.
    open: Vec<EcoString>,
    /// Synthetic `End` to emit after a self-closing tag.
    pending_end: Option<Event>,
    /// Set after the first error; the iterator is then exhausted.
    failed: bool,
}

impl std::fmt::Debug for Reader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reader")
            .field("position", &self.position)
            .field("open", &self.open)
            .finish()
    }
}

impl<'src> Reader<'src> {
    /// Creates a new reader for the given descriptor text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            position: 0,
            open: Vec::new(),
            pending_end: None,
            failed: false,
        }
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Peeks at the character after the next one.
    fn peek_char_second(&self) -> Option<char> {
        let mut iter = self.chars.clone();
        iter.next();
        iter.next().map(|(_, c)| c)
    }

    /// Consumes the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.position = pos + c.len_utf8();
        Some(c)
    }

    /// Consumes characters while the predicate is true.
    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Returns the current byte position.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "descriptor documents over 4GB are not supported"
    )]
    fn current_position(&self) -> u32 {
        self.position as u32
    }

    /// Creates a span from start to current position.
    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.current_position())
    }

    /// Extracts source text for a span.
    fn text_for(&self, span: Span) -> &'src str {
        &self.source[span.as_range()]
    }

    /// Skips whitespace between tokens inside a tag.
    fn skip_whitespace(&mut self) {
        self.advance_while(|c| c.is_ascii_whitespace());
    }

    /// Reads the next event, or `None` at a clean end of input.
    fn next_event(&mut self) -> Result<Option<Event>, ReadError> {
        loop {
            match self.peek_char() {
                None => {
                    if self.open.is_empty() {
                        return Ok(None);
                    }
                    let here = self.current_position();
                    return Err(ReadError::unexpected_eof(Span::new(here, here)));
                }
                Some('<') => {
                    if let Some(event) = self.lex_markup()? {
                        return Ok(Some(event));
                    }
                    // Comment or declaration: skipped, keep going.
                }
                Some(_) => {
                    if let Some(event) = self.lex_text()? {
                        return Ok(Some(event));
                    }
                    // Whitespace-only text between elements: not reported.
                }
            }
        }
    }

    /// Lexes character data up to the next tag.
    fn lex_text(&mut self) -> Result<Option<Event>, ReadError> {
        let start = self.current_position();
        self.advance_while(|c| c != '<');
        let raw_span = self.span_from(start);
        let raw = self.text_for(raw_span);
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let lead = raw.len() - raw.trim_start().len();
        let span = Span::from(
            raw_span.start() as usize + lead..raw_span.start() as usize + lead + trimmed.len(),
        );
        let text = decode_entities(trimmed).map_err(|kind| ReadError::new(kind, span))?;
        Ok(Some(Event::Text { text, span }))
    }

    /// Lexes markup starting at `<`: a tag, or skipped comment/declaration.
    fn lex_markup(&mut self) -> Result<Option<Event>, ReadError> {
        let start = self.current_position();
        self.advance(); // <
        match self.peek_char() {
            None => Err(ReadError::unterminated_tag(self.span_from(start))),
            Some('?') => {
                self.skip_declaration(start)?;
                Ok(None)
            }
            Some('!') => {
                self.skip_comment(start)?;
                Ok(None)
            }
            Some('/') => self.lex_closing_tag(start).map(Some),
            Some(c) if is_name_start(c) => self.lex_element(start).map(Some),
            Some(c) => {
                let here = self.current_position();
                self.advance();
                Err(ReadError::unexpected_char(c, self.span_from(here)))
            }
        }
    }

    /// Skips an XML declaration: `<?xml ... ?>`
    fn skip_declaration(&mut self, start: u32) -> Result<(), ReadError> {
        self.advance(); // ?
        loop {
            match self.advance() {
                None => return Err(ReadError::unterminated_tag(self.span_from(start))),
                Some('?') if self.peek_char() == Some('>') => {
                    self.advance();
                    return Ok(());
                }
                _ => {}
            }
        }
    }

    /// Skips a comment: `<!-- ... -->`
    fn skip_comment(&mut self, start: u32) -> Result<(), ReadError> {
        self.advance(); // !
        for _ in 0..2 {
            match self.peek_char() {
                Some('-') => {
                    self.advance();
                }
                Some(c) => {
                    let here = self.current_position();
                    self.advance();
                    return Err(ReadError::unexpected_char(c, self.span_from(here)));
                }
                None => {
                    return Err(ReadError::new(
                        ReadErrorKind::UnterminatedComment,
                        self.span_from(start),
                    ));
                }
            }
        }
        loop {
            match self.advance() {
                None => {
                    return Err(ReadError::new(
                        ReadErrorKind::UnterminatedComment,
                        self.span_from(start),
                    ));
                }
                Some('-')
                    if self.peek_char() == Some('-') && self.peek_char_second() == Some('>') =>
                {
                    self.advance();
                    self.advance();
                    return Ok(());
                }
                _ => {}
            }
        }
    }

    /// Lexes a closing tag: `</name>`
    fn lex_closing_tag(&mut self, start: u32) -> Result<Event, ReadError> {
        self.advance(); // /
        let name = self.lex_name()?;
        self.skip_whitespace();
        match self.peek_char() {
            Some('>') => {
                self.advance();
            }
            Some(c) => {
                let here = self.current_position();
                self.advance();
                return Err(ReadError::unexpected_char(c, self.span_from(here)));
            }
            None => return Err(ReadError::unterminated_tag(self.span_from(start))),
        }
        let span = self.span_from(start);
        match self.open.pop() {
            Some(expected) if expected == name => Ok(Event::End { name, span }),
            Some(expected) => Err(ReadError::new(
                ReadErrorKind::MismatchedClosingTag {
                    expected,
                    found: name,
                },
                span,
            )),
            None => Err(ReadError::new(ReadErrorKind::StrayClosingTag(name), span)),
        }
    }

    /// Lexes an element start tag, including its attributes.
    fn lex_element(&mut self, start: u32) -> Result<Event, ReadError> {
        let name = self.lex_name()?;
        let mut attributes = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek_char() {
                None => return Err(ReadError::unterminated_tag(self.span_from(start))),
                Some('>') => {
                    self.advance();
                    let span = self.span_from(start);
                    self.open.push(name.clone());
                    return Ok(Event::Start {
                        name,
                        attributes,
                        span,
                    });
                }
                Some('/') => {
                    self.advance();
                    match self.peek_char() {
                        Some('>') => {
                            self.advance();
                        }
                        Some(c) => {
                            let here = self.current_position();
                            self.advance();
                            return Err(ReadError::unexpected_char(c, self.span_from(here)));
                        }
                        None => return Err(ReadError::unterminated_tag(self.span_from(start))),
                    }
                    let span = self.span_from(start);
                    self.pending_end = Some(Event::End {
                        name: name.clone(),
                        span,
                    });
                    return Ok(Event::Start {
                        name,
                        attributes,
                        span,
                    });
                }
                Some(c) if is_name_start(c) => attributes.push(self.lex_attribute()?),
                Some(c) => {
                    let here = self.current_position();
                    self.advance();
                    return Err(ReadError::unexpected_char(c, self.span_from(here)));
                }
            }
        }
    }

    /// Lexes one `name="value"` attribute.
    fn lex_attribute(&mut self) -> Result<Attribute, ReadError> {
        let start = self.current_position();
        let name = self.lex_name()?;
        self.skip_whitespace();
        match self.peek_char() {
            Some('=') => {
                self.advance();
            }
            Some(c) => {
                let here = self.current_position();
                self.advance();
                return Err(ReadError::unexpected_char(c, self.span_from(here)));
            }
            None => return Err(ReadError::unterminated_tag(self.span_from(start))),
        }
        self.skip_whitespace();
        let quote = match self.peek_char() {
            Some(q @ ('"' | '\'')) => {
                self.advance();
                q
            }
            Some(c) => {
                let here = self.current_position();
                self.advance();
                return Err(ReadError::unexpected_char(c, self.span_from(here)));
            }
            None => return Err(ReadError::unterminated_tag(self.span_from(start))),
        };
        let value_start = self.current_position();
        self.advance_while(move |c| c != quote);
        if self.peek_char().is_none() {
            return Err(ReadError::new(
                ReadErrorKind::UnterminatedAttribute,
                self.span_from(start),
            ));
        }
        let value_span = self.span_from(value_start);
        let raw = self.text_for(value_span);
        self.advance(); // closing quote
        let span = self.span_from(start);
        let value = decode_entities(raw).map_err(|kind| ReadError::new(kind, value_span))?;
        Ok(Attribute { name, value, span })
    }

    /// Lexes an element or attribute name.
    fn lex_name(&mut self) -> Result<EcoString, ReadError> {
        let start = self.current_position();
        self.advance_while(is_name_char);
        let span = self.span_from(start);
        if span.is_empty() {
            return match self.peek_char() {
                Some(c) => {
                    self.advance();
                    Err(ReadError::unexpected_char(c, self.span_from(start)))
                }
                None => Err(ReadError::unterminated_tag(span)),
            };
        }
        Ok(EcoString::from(self.text_for(span)))
    }
}

impl Iterator for Reader<'_> {
    type Item = Result<Event, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if let Some(event) = self.pending_end.take() {
            return Some(Ok(event));
        }
        match self.next_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => None,
            Err(error) => {
                self.failed = true;
                Some(Err(error))
            }
        }
    }
}

/// Returns true if `c` may start an element or attribute name.
fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Returns true if `c` may appear in an element or attribute name.
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')
}

/// Decodes the five predefined entities in text or attribute values.
fn decode_entities(raw: &str) -> Result<EcoString, ReadErrorKind> {
    if !raw.contains('&') {
        return Ok(EcoString::from(raw));
    }
    let mut decoded = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        let Some(semi) = tail.find(';') else {
            let preview: String = tail.chars().take(8).collect();
            return Err(ReadErrorKind::UnknownEntity(EcoString::from(
                preview.as_str(),
            )));
        };
        let entity = &tail[..semi];
        decoded.push(match entity {
            "lt" => '<',
            "gt" => '>',
            "amp" => '&',
            "quot" => '"',
            "apos" => '\'',
            _ => return Err(ReadErrorKind::UnknownEntity(EcoString::from(entity))),
        });
        rest = &tail[semi + 1..];
    }
    decoded.push_str(rest);
    Ok(EcoString::from(decoded))
}
