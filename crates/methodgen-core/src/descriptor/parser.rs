// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Descriptor parsing: events in, [`Generator`] out.
//!
//! The parser consumes the reader's event stream in a single forward pass.
//! It tracks which table (instance vs class) is currently being populated
//! and holds an explicit cursor to the entry that follow-up attribute
//! directives (`<arity>`, `<java>`) apply to. The cursor moves only when a
//! `<method>`, `<method-alias>`, or `<undefine-method>` element starts, so
//! attributes can never land on an alias or undefine appended after the
//! method they belong to.
//!
//! Unknown elements are tolerated and skipped; the format has grown fields
//! over time and old generators ignored what they did not understand.

use ecow::EcoString;

use super::{Attribute, DescriptorError, Event, Reader, Span};
use crate::table::{AliasSpec, Generator, MethodEntry, MethodSpec, Superclass, UndefineSpec};

/// Parses descriptor text into a method table aggregate.
///
/// # Errors
///
/// Returns a [`DescriptorError`] for malformed surface syntax, bad literal
/// values, unresolved alias targets, or a structurally incomplete document.
/// No partial aggregate is produced.
///
/// # Examples
///
/// ```
/// use methodgen_core::descriptor::parse;
///
/// let generator = parse(
///     "<module type=\"module\">\
///        <name>Kernel</name>\
///        <instance-methods>\
///          <method name=\"puts\"/>\
///        </instance-methods>\
///      </module>",
/// )
/// .unwrap();
/// assert_eq!(generator.name, "Kernel");
/// assert!(generator.is_module);
/// assert_eq!(generator.methods.len(), 1);
/// ```
pub fn parse(source: &str) -> Result<Generator, DescriptorError> {
    let mut parser = Parser::new();
    for event in Reader::new(source) {
        parser.handle(event?)?;
    }
    parser.finish()
}

/// Which method table is receiving new entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Table {
    Instance,
    Class,
}

/// The parser state for one descriptor.
struct Parser {
    name: Option<EcoString>,
    superclass: Superclass,
    implementation: Option<EcoString>,
    is_module: bool,
    methods: Vec<MethodEntry>,
    class_methods: Vec<MethodEntry>,
    /// The active table; `None` outside any methods section.
    active: Option<Table>,
    /// Ordinal counter for the active table; reset on section entry.
    counter: u32,
    /// The entry that arity/java directives apply to.
    cursor: Option<(Table, usize)>,
    /// Open element names, innermost last; routes text content.
    path: Vec<EcoString>,
}

impl Parser {
    fn new() -> Self {
        Self {
            name: None,
            superclass: Superclass::default(),
            implementation: None,
            is_module: false,
            methods: Vec::new(),
            class_methods: Vec::new(),
            active: None,
            counter: 0,
            cursor: None,
            path: Vec::new(),
        }
    }

    fn handle(&mut self, event: Event) -> Result<(), DescriptorError> {
        match event {
            Event::Start {
                name,
                attributes,
                span,
            } => {
                if self.path.is_empty() {
                    // Root element: only the framing attribute matters.
                    if attribute(&attributes, "type").is_some_and(|a| a.value == "module") {
                        self.is_module = true;
                    }
                } else {
                    self.handle_element(&name, &attributes, span)?;
                }
                self.path.push(name);
            }
            Event::Text { text, span } => self.handle_text(&text, span)?,
            Event::End { .. } => {
                self.path.pop();
            }
        }
        Ok(())
    }

    fn handle_element(
        &mut self,
        name: &EcoString,
        attributes: &[Attribute],
        span: Span,
    ) -> Result<(), DescriptorError> {
        match name.as_str() {
            "instance-methods" => {
                self.active = Some(Table::Instance);
                self.counter = 0;
                self.cursor = None;
            }
            "class-methods" => {
                self.active = Some(Table::Class);
                self.counter = 0;
                self.cursor = None;
            }
            "method" => {
                let table = self.active_table(name, span)?;
                let method_name = required_attribute(name, attributes, "name", span)?;
                self.counter += 1;
                let spec = MethodSpec::new(method_name, self.counter);
                let entry = match table {
                    Table::Instance => MethodEntry::Method(spec),
                    Table::Class => MethodEntry::StaticMethod(spec),
                };
                let entries = self.table_mut(table);
                let index = entries.len();
                entries.push(entry);
                self.cursor = Some((table, index));
            }
            "method-alias" => {
                let table = self.active_table(name, span)?;
                let alias_name = required_attribute(name, attributes, "name", span)?;
                let original = required_attribute(name, attributes, "original", span)?;
                let alias = self.resolve_alias(table, alias_name, &original, span)?;
                self.table_mut(table).push(MethodEntry::Alias(alias));
                self.cursor = None;
            }
            "undefine-method" => {
                let table = self.active_table(name, span)?;
                let undefine_name = required_attribute(name, attributes, "name", span)?;
                self.table_mut(table).push(MethodEntry::Undefine(UndefineSpec {
                    name: undefine_name,
                }));
                self.cursor = None;
            }
            "arity" => {
                if let Some(optional) = attribute(attributes, "optional") {
                    let value = parse_boolean(optional)?;
                    let spec = self.current_spec().ok_or_else(|| {
                        DescriptorError::MisplacedDirective {
                            element: name.clone(),
                            span,
                        }
                    })?;
                    spec.optional = value;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_text(&mut self, text: &EcoString, span: Span) -> Result<(), DescriptorError> {
        let Some(element) = self.path.last().cloned() else {
            return Ok(());
        };
        match element.as_str() {
            "name" => self.name = Some(text.clone()),
            "superclass" => {
                self.superclass = if text == "none" {
                    Superclass::None
                } else {
                    Superclass::Named(text.clone())
                };
            }
            "implementation" => self.implementation = Some(text.clone()),
            "arity" => {
                let arity = text
                    .parse::<u32>()
                    .map_err(|_| DescriptorError::InvalidArity {
                        text: text.clone(),
                        span,
                    })?;
                let spec =
                    self.current_spec()
                        .ok_or_else(|| DescriptorError::MisplacedDirective {
                            element: element.clone(),
                            span,
                        })?;
                spec.arity = arity;
            }
            "java" => {
                let spec =
                    self.current_spec()
                        .ok_or_else(|| DescriptorError::MisplacedDirective {
                            element: element.clone(),
                            span,
                        })?;
                spec.java_name = text.clone();
            }
            _ => {}
        }
        Ok(())
    }

    fn finish(self) -> Result<Generator, DescriptorError> {
        let Some(name) = self.name else {
            return Err(DescriptorError::MissingName);
        };
        let needs_implementation = self
            .class_methods
            .iter()
            .any(|entry| matches!(entry, MethodEntry::StaticMethod(_)));
        if needs_implementation && self.implementation.is_none() {
            return Err(DescriptorError::MissingImplementation);
        }
        Ok(Generator {
            name,
            package: None,
            implementation: self.implementation,
            superclass: self.superclass,
            is_module: self.is_module,
            methods: self.methods,
            class_methods: self.class_methods,
        })
    }

    /// Resolves an alias target against the entries already in `table`.
    fn resolve_alias(
        &self,
        table: Table,
        alias_name: EcoString,
        original: &EcoString,
        span: Span,
    ) -> Result<AliasSpec, DescriptorError> {
        let found = self.table_ref(table).iter().find_map(|entry| match entry {
            MethodEntry::Method(spec) | MethodEntry::StaticMethod(spec)
                if spec.name == *original =>
            {
                Some(spec)
            }
            _ => None,
        });
        let spec = found.ok_or_else(|| DescriptorError::UnknownAliasTarget {
            original: original.clone(),
            span,
        })?;
        Ok(AliasSpec {
            name: alias_name,
            constant_name: spec.constant_name(),
            arity: spec.arity,
            optional: spec.optional,
        })
    }

    fn active_table(&self, element: &EcoString, span: Span) -> Result<Table, DescriptorError> {
        self.active.ok_or_else(|| DescriptorError::OutsideSection {
            element: element.clone(),
            span,
        })
    }

    fn table_ref(&self, table: Table) -> &[MethodEntry] {
        match table {
            Table::Instance => &self.methods,
            Table::Class => &self.class_methods,
        }
    }

    fn table_mut(&mut self, table: Table) -> &mut Vec<MethodEntry> {
        match table {
            Table::Instance => &mut self.methods,
            Table::Class => &mut self.class_methods,
        }
    }

    /// The method spec under the cursor, if the cursor rests on one.
    fn current_spec(&mut self) -> Option<&mut MethodSpec> {
        let (table, index) = self.cursor?;
        match self.table_mut(table).get_mut(index) {
            Some(MethodEntry::Method(spec) | MethodEntry::StaticMethod(spec)) => Some(spec),
            _ => None,
        }
    }
}

fn attribute<'a>(attributes: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attributes.iter().find(|a| a.name == name)
}

fn required_attribute(
    element: &EcoString,
    attributes: &[Attribute],
    name: &str,
    span: Span,
) -> Result<EcoString, DescriptorError> {
    attribute(attributes, name)
        .map(|a| a.value.clone())
        .ok_or_else(|| DescriptorError::MissingAttribute {
            element: element.clone(),
            attribute: name.into(),
            span,
        })
}

fn parse_boolean(attr: &Attribute) -> Result<bool, DescriptorError> {
    match attr.value.as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(DescriptorError::InvalidBoolean {
            text: attr.value.clone(),
            span: attr.span,
        }),
    }
}
