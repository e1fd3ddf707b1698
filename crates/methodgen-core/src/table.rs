// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The method table model.
//!
//! A parsed descriptor becomes a [`Generator`] aggregate: the declared name,
//! framing, superclass, implementation target, and two ordered tables of
//! [`MethodEntry`] values (instance methods and class methods). The aggregate
//! is built once by the descriptor parser and then consumed read-only by the
//! code emitter; it is discarded after the run.
//!
//! # Identifying constants
//!
//! Every method entry owns a packed integer constant used both to register
//! the method and to select its dispatch branch. The per-type base constant
//! is `0xf000`; the class-method range sets an additional `0x100` marker bit.
//! Entry constants OR the 1-based table ordinal into the base, so instance
//! and class ordinals never collide even though both start at 1. Aliases and
//! undefines mint no constants of their own — an alias always shares its
//! original's.

use ecow::EcoString;

use crate::codegen::document::{Document, INDENT, line, nest, nil};
use crate::docvec;

/// The superclass of a generated class definition.
///
/// `None` is the explicit no-superclass sentinel (descriptor literal
/// `none`); the default is `Object`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Superclass {
    /// Root class: the factory hook passes a null superclass.
    None,
    /// Resolved by name from the runtime's class registry.
    Named(EcoString),
}

impl Default for Superclass {
    fn default() -> Self {
        Superclass::Named(EcoString::from("Object"))
    }
}

/// A plain or class-level method row.
///
/// `java_name` defaults to the declared name and may be overridden by a
/// `<java>` directive. The ordinal is the entry's 1-based position within
/// its owning table, assigned at insertion and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpec {
    /// The externally visible method name.
    pub name: EcoString,
    /// The static function on the implementation class.
    pub java_name: EcoString,
    /// Number of required positional arguments.
    pub arity: u32,
    /// Whether the method takes a trailing optional argument list.
    pub optional: bool,
    /// 1-based position within the owning table.
    pub ordinal: u32,
}

impl MethodSpec {
    /// Creates a spec with the given declared name and ordinal.
    #[must_use]
    pub fn new(name: impl Into<EcoString>, ordinal: u32) -> Self {
        let name = name.into();
        Self {
            java_name: name.clone(),
            name,
            arity: 0,
            optional: false,
            ordinal,
        }
    }

    /// The name of this entry's identifying constant.
    #[must_use]
    pub fn constant_name(&self) -> EcoString {
        EcoString::from(self.java_name.to_uppercase())
    }
}

/// An alias row: a second name for an already-declared entry.
///
/// Holds the original's constant name, arity, and optional flag, resolved
/// when the alias directive was read. Entries are append-only and complete
/// before they can be aliased, so the snapshot cannot go stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasSpec {
    /// The alias's externally visible name.
    pub name: EcoString,
    /// The original entry's identifying constant name.
    pub constant_name: EcoString,
    /// The original entry's arity.
    pub arity: u32,
    /// The original entry's optional flag.
    pub optional: bool,
}

/// A removal row: undefines a method name at registration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndefineSpec {
    /// The method name to remove.
    pub name: EcoString,
}

/// One row of a method table.
///
/// A closed union over the four entry variants. Each variant implements the
/// emission operations differently: aliases and undefines are explicit
/// no-ops for declaration and dispatch while still producing a registration
/// call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodEntry {
    /// A plain instance method.
    Method(MethodSpec),
    /// A class-level method, dispatched through the generated switch.
    StaticMethod(MethodSpec),
    /// A second name for an existing entry in the same table.
    Alias(AliasSpec),
    /// A method name removed from the runtime's table.
    Undefine(UndefineSpec),
}

impl MethodEntry {
    /// The externally visible name this row registers or removes.
    #[must_use]
    pub fn declared_name(&self) -> &EcoString {
        match self {
            MethodEntry::Method(spec) | MethodEntry::StaticMethod(spec) => &spec.name,
            MethodEntry::Alias(alias) => &alias.name,
            MethodEntry::Undefine(undefine) => &undefine.name,
        }
    }

    /// The identifying constant this row registers under.
    ///
    /// An alias reports its original's constant; an undefine has none.
    #[must_use]
    pub fn constant_name(&self) -> Option<EcoString> {
        match self {
            MethodEntry::Method(spec) | MethodEntry::StaticMethod(spec) => {
                Some(spec.constant_name())
            }
            MethodEntry::Alias(alias) => Some(alias.constant_name.clone()),
            MethodEntry::Undefine(_) => None,
        }
    }

    /// The constant declaration for this row, or nil for rows that mint no
    /// constant.
    #[must_use]
    pub fn declaration(&self, generator: &Generator) -> Document<'static> {
        match self {
            MethodEntry::Method(spec) => docvec![
                "public static final int ",
                spec.constant_name(),
                " = ",
                generator.constant_name(),
                " | ",
                spec.ordinal,
                ";",
            ],
            MethodEntry::StaticMethod(spec) => docvec![
                "public static final int ",
                spec.constant_name(),
                " = STATIC | ",
                spec.ordinal,
                ";",
            ],
            MethodEntry::Alias(_) | MethodEntry::Undefine(_) => nil(),
        }
    }

    /// The registration call for this row.
    #[must_use]
    pub fn registration(&self) -> Document<'static> {
        match self {
            MethodEntry::Method(spec) | MethodEntry::StaticMethod(spec) => registration_call(
                spec.optional,
                &spec.name,
                &spec.constant_name(),
                spec.arity,
            ),
            MethodEntry::Alias(alias) => registration_call(
                alias.optional,
                &alias.name,
                &alias.constant_name,
                alias.arity,
            ),
            MethodEntry::Undefine(undefine) => {
                docvec!["context.undefineMethod(\"", undefine.name.clone(), "\");"]
            }
        }
    }

    /// The dispatch branch for this row, or nil for rows that contribute no
    /// branch.
    ///
    /// Only class-level methods are routed through the generated dispatcher;
    /// an alias shares its original's branch because it shares its
    /// original's constant.
    #[must_use]
    pub fn dispatch_case(&self, generator: &Generator) -> Document<'static> {
        match self {
            MethodEntry::StaticMethod(spec) => {
                let target = generator.implementation.as_deref().unwrap_or_default();
                let mut call = format!("return {}.{}(receiver", target, spec.java_name);
                if spec.optional {
                    call.push_str(", args");
                } else {
                    for i in 0..spec.arity {
                        call.push_str(&format!(", args[{i}]"));
                    }
                }
                call.push_str(");");
                docvec![
                    "case ",
                    spec.constant_name(),
                    " :",
                    nest(INDENT, docvec![line(), call]),
                ]
            }
            MethodEntry::Method(_) | MethodEntry::Alias(_) | MethodEntry::Undefine(_) => nil(),
        }
    }
}

/// The registration call shared by methods and aliases.
fn registration_call(
    optional: bool,
    name: &EcoString,
    constant: &EcoString,
    arity: u32,
) -> Document<'static> {
    let verb = if optional { "createOptional" } else { "create" };
    docvec![
        "context.",
        verb,
        "(\"",
        name.clone(),
        "\", ",
        constant.clone(),
        ", ",
        arity,
        ");",
    ]
}

/// The root aggregate for one compilation run.
///
/// Owned exclusively by the run: built once by the descriptor parser, handed
/// read-only to the emitter, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generator {
    /// The declared type or module name.
    pub name: EcoString,
    /// Optional namespace for the generated unit, supplied by the
    /// invocation rather than the document.
    pub package: Option<EcoString>,
    /// The class whose static functions satisfy method bodies. Present
    /// whenever the class table needs a dispatcher.
    pub implementation: Option<EcoString>,
    /// The superclass, or the no-superclass sentinel. Unused under module
    /// framing.
    pub superclass: Superclass,
    /// Module framing vs class framing.
    pub is_module: bool,
    /// The instance method table, in document order.
    pub methods: Vec<MethodEntry>,
    /// The class method table, in document order.
    pub class_methods: Vec<MethodEntry>,
}

impl Generator {
    /// Creates an empty aggregate for the given declared name.
    #[must_use]
    pub fn new(name: impl Into<EcoString>) -> Self {
        Self {
            name: name.into(),
            package: None,
            implementation: None,
            superclass: Superclass::default(),
            is_module: false,
            methods: Vec::new(),
            class_methods: Vec::new(),
        }
    }

    /// The name of the per-type base constant.
    #[must_use]
    pub fn constant_name(&self) -> EcoString {
        EcoString::from(self.name.to_uppercase())
    }

    /// Sets the namespace for the generated unit.
    pub fn set_package(&mut self, package: impl Into<EcoString>) {
        self.package = Some(package.into());
    }
}
