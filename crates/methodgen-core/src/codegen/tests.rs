// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Tests for Java code generation.

use super::*;
use crate::descriptor::parse;

fn generate_from(source: &str) -> String {
    let generator = parse(source).expect("descriptor should parse");
    generate(&generator)
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn module_with_one_method_generates_full_unit() {
    let unit = generate_from(
        "<module type=\"module\">\
           <name>Foo</name>\
           <instance-methods>\
             <method name=\"bar\"><arity>1</arity></method>\
           </instance-methods>\
         </module>",
    );
    let expected = r#"/* Generated - do not edit! */

import org.jruby.Ruby;
import org.jruby.RubyClass;
import org.jruby.RubyModule;
import org.jruby.runtime.builtin.IRubyObject;
import org.jruby.runtime.builtin.definitions.MethodContext;
import org.jruby.runtime.builtin.definitions.SingletonMethodContext;
import org.jruby.runtime.builtin.definitions.ModuleDefinition;
import org.jruby.runtime.builtin.definitions.ClassDefinition;
import org.jruby.runtime.builtin.definitions.ModuleFunctionsContext;
import org.jruby.util.Asserts;

public class FooDefinition extends ModuleDefinition {
    private static final int FOO = 0xf000;
    private static final int STATIC = FOO | 0x100;
    public static final int BAR = FOO | 1;

    public FooDefinition(Ruby runtime) {
        super(runtime);
    }

    protected RubyModule createModule(Ruby runtime) {
        return runtime.defineModule("Foo");
    }

    protected void defineMethods(MethodContext context) {
        context.create("bar", BAR, 1);
    }

    protected void defineModuleFunctions(ModuleFunctionsContext context) {
    }

    public IRubyObject callIndexed(int index, IRubyObject receiver, IRubyObject[] args) {
        switch (index) {
        default :
            Asserts.notReached();
            return null;
        }
    }
}
"#;
    assert_eq!(unit, expected);
}

#[test]
fn class_framing_aliased_optional_class_method() {
    // One optional class method `baz` aliased as `qux`: two registrations
    // sharing one constant, one dispatch branch keyed by that constant.
    let unit = generate_from(
        "<module>\
           <name>Foo</name>\
           <implementation>FooMethods</implementation>\
           <class-methods>\
             <method name=\"baz\"><arity optional=\"true\">0</arity></method>\
             <method-alias name=\"qux\" original=\"baz\"/>\
           </class-methods>\
         </module>",
    );
    assert!(unit.contains("public class FooDefinition extends ClassDefinition {"));
    assert!(unit.contains("public static final int BAZ = STATIC | 1;"));
    assert!(unit.contains("context.createOptional(\"baz\", BAZ, 0);"));
    assert!(unit.contains("context.createOptional(\"qux\", BAZ, 0);"));
    assert!(unit.contains("return FooMethods.baz(receiver, args);"));
    assert_eq!(count(&unit, "public static final int"), 1);
    assert_eq!(count(&unit, "case BAZ :"), 1);
}

#[test]
fn package_emits_namespace_declaration() {
    let mut generator = parse("<module><name>Foo</name></module>").unwrap();
    generator.set_package("org.jruby.runtime.builtin.definitions");
    let unit = generate(&generator);
    assert!(unit.starts_with(
        "/* Generated - do not edit! */\n\n\
         package org.jruby.runtime.builtin.definitions;\n\n\
         import org.jruby.Ruby;\n"
    ));
}

#[test]
fn no_package_means_no_namespace_declaration() {
    let unit = generate_from("<module><name>Foo</name></module>");
    assert!(!unit.contains("package "));
}

#[test]
fn superclass_defaults_to_object_lookup() {
    let unit = generate_from("<module><name>Foo</name></module>");
    assert!(unit.contains(
        "return runtime.defineClass(\"Foo\", \
         (RubyClass) runtime.getClasses().getClass(\"Object\"));"
    ));
}

#[test]
fn named_superclass_resolves_through_registry() {
    let unit =
        generate_from("<module><name>Binding</name><superclass>Kernel</superclass></module>");
    assert!(unit.contains(
        "return runtime.defineClass(\"Binding\", \
         (RubyClass) runtime.getClasses().getClass(\"Kernel\"));"
    ));
}

#[test]
fn superclass_none_passes_null() {
    let unit =
        generate_from("<module><name>BasicObject</name><superclass>none</superclass></module>");
    assert!(unit.contains("return runtime.defineClass(\"BasicObject\", (RubyClass) null);"));
}

#[test]
fn module_framing_names_the_module_functions_hook() {
    let unit = generate_from("<module type=\"module\"><name>Foo</name></module>");
    assert!(unit.contains("protected RubyModule createModule(Ruby runtime)"));
    assert!(unit.contains("protected void defineModuleFunctions(ModuleFunctionsContext context)"));
    assert!(!unit.contains("defineSingletonMethods"));
}

#[test]
fn class_framing_names_the_singleton_hook() {
    let unit = generate_from("<module><name>Foo</name></module>");
    assert!(unit.contains("protected RubyClass createType(Ruby runtime)"));
    assert!(unit.contains("protected void defineSingletonMethods(SingletonMethodContext context)"));
    assert!(!unit.contains("defineModuleFunctions"));
}

#[test]
fn undefine_emits_exactly_one_removal_and_nothing_else() {
    let unit = generate_from(
        "<module><name>Foo</name>\
           <instance-methods>\
             <undefine-method name=\"freeze\"/>\
           </instance-methods>\
         </module>",
    );
    assert_eq!(count(&unit, "context.undefineMethod(\"freeze\");"), 1);
    assert_eq!(count(&unit, "public static final int"), 0);
    assert_eq!(count(&unit, "freeze"), 1);
}

#[test]
fn instance_constants_precede_class_constants() {
    let unit = generate_from(
        "<module><name>Foo</name>\
           <implementation>FooMethods</implementation>\
           <class-methods>\
             <method name=\"first\"/>\
           </class-methods>\
           <instance-methods>\
             <method name=\"second\"/>\
           </instance-methods>\
         </module>",
    );
    // The class table was populated first in document order, but the
    // instance table is always emitted first.
    let instance = unit
        .find("public static final int SECOND = FOO | 1;")
        .expect("instance constant present");
    let class = unit
        .find("public static final int FIRST = STATIC | 1;")
        .expect("class constant present");
    assert!(instance < class);
}

#[test]
fn java_override_renames_constant_and_dispatch_target() {
    let unit = generate_from(
        "<module><name>Foo</name>\
           <implementation>FooMethods</implementation>\
           <class-methods>\
             <method name=\"format\">\
               <arity>2</arity>\
               <java>sprintf</java>\
             </method>\
           </class-methods>\
         </module>",
    );
    assert!(unit.contains("public static final int SPRINTF = STATIC | 1;"));
    assert!(unit.contains("context.create(\"format\", SPRINTF, 2);"));
    assert!(unit.contains("return FooMethods.sprintf(receiver, args[0], args[1]);"));
}

#[test]
fn instance_methods_never_reach_the_dispatcher() {
    let unit = generate_from(
        "<module><name>Foo</name>\
           <instance-methods>\
             <method name=\"bar\"/>\
           </instance-methods>\
         </module>",
    );
    assert_eq!(count(&unit, "case "), 0);
    assert!(unit.contains("default :"));
}

#[test]
fn re_emission_is_byte_identical() {
    let source = "<module type=\"module\">\
                    <name>Kernel</name>\
                    <implementation>KernelMethods</implementation>\
                    <instance-methods>\
                      <method name=\"puts\"><arity optional=\"true\">0</arity></method>\
                      <method-alias name=\"print\" original=\"puts\"/>\
                      <undefine-method name=\"freeze\"/>\
                    </instance-methods>\
                    <class-methods>\
                      <method name=\"sleep\"><arity>1</arity></method>\
                    </class-methods>\
                  </module>";
    let first = generate_from(source);
    let second = generate_from(source);
    assert_eq!(first, second);
}

#[test]
fn emitted_unit_has_no_trailing_whitespace() {
    let unit = generate_from(
        "<module><name>Foo</name>\
           <implementation>FooMethods</implementation>\
           <instance-methods><method name=\"a\"/></instance-methods>\
           <class-methods><method name=\"b\"/></class-methods>\
         </module>",
    );
    for line in unit.lines() {
        assert_eq!(line, line.trim_end(), "trailing whitespace in: {line:?}");
    }
    assert!(unit.ends_with("}\n"));
}
