// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Rich error reports using miette.
//!
//! Core errors carry spans into the descriptor document; attaching the
//! source text here lets miette render the offending span with context,
//! arrows, and any fix hints the error declares.

use methodgen_core::descriptor::DescriptorError;
use miette::NamedSource;

/// Wraps a core error with its source document for contextual rendering.
pub fn with_source(error: DescriptorError, name: &str, source: &str) -> miette::Report {
    miette::Report::new(error).with_source_code(NamedSource::new(name, source.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use methodgen_core::descriptor::parse;

    #[test]
    fn report_carries_message() {
        let source = "<module><name>Kernel</name>\
                      <instance-methods>\
                      <method-alias name=\"b\" original=\"a\"/>\
                      </instance-methods></module>";
        let error = parse(source).unwrap_err();
        let report = with_source(error, "kernel.xml", source);
        assert!(report.to_string().contains("alias target 'a'"));
    }

    #[test]
    fn report_for_read_errors() {
        let source = "<module><name>Kernel</module>";
        let error = parse(source).unwrap_err();
        let report = with_source(error, "kernel.xml", source);
        assert!(report.to_string().contains("mismatched closing tag"));
    }
}
