// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Java code generation for method table definitions.
//!
//! This module renders a [`Generator`] aggregate into one Java compilation
//! unit: a `<Name>Definition` class extending the runtime's module or class
//! definition base type, with the packed identifying constants, a
//! constructor, a factory hook, the registration hooks, and the
//! indexed-switch dispatcher for class-level methods.
//!
//! # Generated code
//!
//! For a module `Foo` with one instance method `bar` of arity 1:
//!
//! ```java
//! public class FooDefinition extends ModuleDefinition {
//!     private static final int FOO = 0xf000;
//!     private static final int STATIC = FOO | 0x100;
//!     public static final int BAR = FOO | 1;
//!
//!     protected RubyModule createModule(Ruby runtime) {
//!         return runtime.defineModule("Foo");
//!     }
//!
//!     protected void defineMethods(MethodContext context) {
//!         context.create("bar", BAR, 1);
//!     }
//! }
//! ```
//!
//! Emission order is fully determined by document order plus the two-table
//! split, so re-running the compiler on an unchanged descriptor produces
//! byte-identical output.
//!
//! # Example
//!
//! ```
//! use methodgen_core::{codegen, descriptor};
//!
//! let generator = descriptor::parse(
//!     "<module type=\"module\"><name>Foo</name>\
//!        <instance-methods><method name=\"bar\"/></instance-methods>\
//!      </module>",
//! )
//! .unwrap();
//! let unit = codegen::generate(&generator);
//! assert!(unit.contains("public static final int BAR = FOO | 1;"));
//! ```

pub mod document;

#[cfg(test)]
mod property_tests;
#[cfg(test)]
mod tests;

use crate::docvec;
use crate::table::{Generator, MethodEntry, Superclass};
use document::{Document, INDENT, concat, line, nest};

/// Collaborator types the generated unit references: the runtime base
/// types, the dispatch-context types, and the assertion utility.
const IMPORTS: [&str; 10] = [
    "org.jruby.Ruby",
    "org.jruby.RubyClass",
    "org.jruby.RubyModule",
    "org.jruby.runtime.builtin.IRubyObject",
    "org.jruby.runtime.builtin.definitions.MethodContext",
    "org.jruby.runtime.builtin.definitions.SingletonMethodContext",
    "org.jruby.runtime.builtin.definitions.ModuleDefinition",
    "org.jruby.runtime.builtin.definitions.ClassDefinition",
    "org.jruby.runtime.builtin.definitions.ModuleFunctionsContext",
    "org.jruby.util.Asserts",
];

/// Renders the aggregate into the text of one compilation unit.
#[must_use]
pub fn generate(generator: &Generator) -> String {
    unit(generator).to_pretty_string()
}

fn unit(generator: &Generator) -> Document<'static> {
    let base = if generator.is_module { "Module" } else { "Class" };
    let mut parts: Vec<Document<'static>> = Vec::new();
    parts.push(Document::Str("/* Generated - do not edit! */\n\n"));
    if let Some(package) = &generator.package {
        parts.push(docvec!["package ", package.clone(), ";\n\n"]);
    }
    for import in IMPORTS {
        parts.push(docvec!["import ", import, ";\n"]);
    }
    parts.push(Document::Str("\n"));
    parts.push(docvec![
        "public class ",
        generator.name.clone(),
        "Definition extends ",
        base,
        "Definition {",
    ]);
    parts.push(nest(INDENT, class_body(generator)));
    parts.push(line());
    parts.push(Document::Str("}\n"));
    concat(parts)
}

fn class_body(generator: &Generator) -> Document<'static> {
    concat([
        constants(generator),
        Document::Str("\n"),
        constructor(generator),
        Document::Str("\n"),
        factory(generator),
        Document::Str("\n"),
        instance_registrations(generator),
        Document::Str("\n"),
        class_registrations(generator),
        Document::Str("\n"),
        dispatcher(generator),
    ])
}

/// The identifier space: base constant, static marker, then one constant
/// per method entry in table-then-ordinal order.
fn constants(generator: &Generator) -> Document<'static> {
    let base = generator.constant_name();
    let mut parts = vec![
        docvec![line(), "private static final int ", base.clone(), " = 0xf000;"],
        docvec![line(), "private static final int STATIC = ", base, " | 0x100;"],
    ];
    for entry in generator.methods.iter().chain(&generator.class_methods) {
        let declaration = entry.declaration(generator);
        if !declaration.is_nil() {
            parts.push(docvec![line(), declaration]);
        }
    }
    concat(parts)
}

fn constructor(generator: &Generator) -> Document<'static> {
    docvec![
        line(),
        "public ",
        generator.name.clone(),
        "Definition(Ruby runtime) {",
        nest(INDENT, docvec![line(), "super(runtime);"]),
        line(),
        "}",
    ]
}

/// The factory hook: `createModule` under module framing, `createType`
/// with superclass resolution otherwise.
fn factory(generator: &Generator) -> Document<'static> {
    if generator.is_module {
        docvec![
            line(),
            "protected RubyModule createModule(Ruby runtime) {",
            nest(
                INDENT,
                docvec![
                    line(),
                    "return runtime.defineModule(\"",
                    generator.name.clone(),
                    "\");",
                ],
            ),
            line(),
            "}",
        ]
    } else {
        let superclass = match &generator.superclass {
            Superclass::None => Document::Str("(RubyClass) null"),
            Superclass::Named(name) => docvec![
                "(RubyClass) runtime.getClasses().getClass(\"",
                name.clone(),
                "\")",
            ],
        };
        docvec![
            line(),
            "protected RubyClass createType(Ruby runtime) {",
            nest(
                INDENT,
                docvec![
                    line(),
                    "return runtime.defineClass(\"",
                    generator.name.clone(),
                    "\", ",
                    superclass,
                    ");",
                ],
            ),
            line(),
            "}",
        ]
    }
}

fn instance_registrations(generator: &Generator) -> Document<'static> {
    registration_hook("defineMethods(MethodContext context)", &generator.methods)
}

/// The class-table hook name differs by framing: modules expose module
/// functions, classes expose singleton methods.
fn class_registrations(generator: &Generator) -> Document<'static> {
    let signature = if generator.is_module {
        "defineModuleFunctions(ModuleFunctionsContext context)"
    } else {
        "defineSingletonMethods(SingletonMethodContext context)"
    };
    registration_hook(signature, &generator.class_methods)
}

fn registration_hook(signature: &'static str, entries: &[MethodEntry]) -> Document<'static> {
    let body = concat(
        entries
            .iter()
            .map(|entry| docvec![line(), entry.registration()]),
    );
    docvec![
        line(),
        "protected void ",
        signature,
        " {",
        nest(INDENT, body),
        line(),
        "}",
    ]
}

/// The indexed dispatcher: an exhaustive switch over class-table constants.
///
/// Instance methods are not routed through this switch; their dispatch is an
/// external mechanism. The default branch asserts unreachable — the
/// registration hooks and this switch hand out the same constant space.
fn dispatcher(generator: &Generator) -> Document<'static> {
    let mut cases: Vec<Document<'static>> = Vec::new();
    for entry in &generator.class_methods {
        let case = entry.dispatch_case(generator);
        if !case.is_nil() {
            cases.push(docvec![line(), case]);
        }
    }
    cases.push(docvec![
        line(),
        "default :",
        nest(
            INDENT,
            docvec![line(), "Asserts.notReached();", line(), "return null;"],
        ),
    ]);
    docvec![
        line(),
        "public IRubyObject callIndexed(int index, IRubyObject receiver, IRubyObject[] args) {",
        nest(
            INDENT,
            docvec![line(), "switch (index) {", concat(cases), line(), "}"],
        ),
        line(),
        "}",
    ]
}
