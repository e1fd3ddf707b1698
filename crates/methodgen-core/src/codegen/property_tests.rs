// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for descriptor parsing and code generation.
//!
//! These exercise the invariants that must hold for all descriptors, not
//! just the hand-picked ones in the golden tests: dense ordinals, disjoint
//! packed constant spaces, byte-identical re-emission, and crash safety on
//! arbitrary input.

use proptest::prelude::*;

use super::generate;
use crate::descriptor::parse;
use crate::table::MethodEntry;

#[derive(Debug, Clone)]
struct MethodCase {
    name: String,
    arity: u32,
    optional: bool,
}

prop_compose! {
    fn method_case()(
        name in "[a-z][a-z0-9_]{0,7}",
        arity in 0_u32..5,
        optional in any::<bool>(),
    ) -> MethodCase {
        MethodCase {
            name,
            arity,
            optional,
        }
    }
}

fn method_tables() -> impl Strategy<Value = (Vec<MethodCase>, Vec<MethodCase>)> {
    (
        prop::collection::vec(method_case(), 0..8),
        prop::collection::vec(method_case(), 0..8),
    )
}

fn render_descriptor(
    name: &str,
    is_module: bool,
    instance: &[MethodCase],
    class: &[MethodCase],
) -> String {
    use std::fmt::Write;

    let mut doc = String::new();
    if is_module {
        doc.push_str("<module type=\"module\">");
    } else {
        doc.push_str("<module>");
    }
    let _ = write!(doc, "<name>{name}</name>");
    doc.push_str("<implementation>Impl</implementation>");
    doc.push_str("<instance-methods>");
    for case in instance {
        let _ = write!(
            doc,
            "<method name=\"{}\"><arity optional=\"{}\">{}</arity></method>",
            case.name, case.optional, case.arity
        );
    }
    doc.push_str("</instance-methods>");
    doc.push_str("<class-methods>");
    for case in class {
        let _ = write!(
            doc,
            "<method name=\"{}\"><arity optional=\"{}\">{}</arity></method>",
            case.name, case.optional, case.arity
        );
    }
    doc.push_str("</class-methods></module>");
    doc
}

fn ordinals(entries: &[MethodEntry]) -> Vec<u32> {
    entries
        .iter()
        .filter_map(|entry| match entry {
            MethodEntry::Method(spec) | MethodEntry::StaticMethod(spec) => Some(spec.ordinal),
            _ => None,
        })
        .collect()
}

proptest! {
    #[test]
    fn re_emission_is_byte_identical(
        (instance, class) in method_tables(),
        is_module in any::<bool>(),
    ) {
        let source = render_descriptor("Widget", is_module, &instance, &class);
        let first = generate(&parse(&source).unwrap());
        let second = generate(&parse(&source).unwrap());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn ordinals_are_dense_in_document_order(
        (instance, class) in method_tables(),
    ) {
        let source = render_descriptor("Widget", false, &instance, &class);
        let generator = parse(&source).unwrap();
        let expected_instance: Vec<u32> = (1..=instance.len() as u32).collect();
        let expected_class: Vec<u32> = (1..=class.len() as u32).collect();
        prop_assert_eq!(ordinals(&generator.methods), expected_instance);
        prop_assert_eq!(ordinals(&generator.class_methods), expected_class);
    }

    #[test]
    fn packed_constant_spaces_are_disjoint(
        (instance, class) in method_tables(),
    ) {
        let source = render_descriptor("Widget", false, &instance, &class);
        let generator = parse(&source).unwrap();
        // The marker bit is set on every class-table constant and never on
        // an instance-table constant, so the ranges cannot collide even
        // though both ordinal sequences start at 1.
        for ordinal in ordinals(&generator.methods) {
            prop_assert_eq!((0xf000_u32 | ordinal) & 0x100, 0);
        }
        for ordinal in ordinals(&generator.class_methods) {
            prop_assert_ne!((0xf000_u32 | 0x100 | ordinal) & 0x100, 0);
        }
    }

    #[test]
    fn alias_shares_constant_and_dispatch_branch(case in method_case()) {
        let source = format!(
            "<module><name>Widget</name><implementation>Impl</implementation>\
               <class-methods>\
                 <method name=\"{}\"><arity optional=\"{}\">{}</arity></method>\
                 <method-alias name=\"zz_alias\" original=\"{}\"/>\
               </class-methods>\
             </module>",
            case.name, case.optional, case.arity, case.name
        );
        let unit = generate(&parse(&source).unwrap());
        let constant = case.name.to_uppercase();
        // One constant, one branch, two registrations against it.
        prop_assert_eq!(unit.matches("public static final int").count(), 1);
        prop_assert_eq!(unit.matches(&format!("case {constant} :")).count(), 1);
        prop_assert_eq!(unit.matches(&format!(", {constant}, ")).count(), 2);
    }

    #[test]
    fn arbitrary_input_never_panics(source in ".{0,256}") {
        let _ = parse(&source);
    }
}
