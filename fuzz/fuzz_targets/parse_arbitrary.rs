// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for descriptor parser crash safety testing.
//!
//! This target feeds arbitrary byte sequences to the descriptor front-end
//! and asserts that it never panics. The parser must handle all input
//! gracefully, producing either a method table aggregate or an error.
//!
//! # Success Criteria
//!
//! The parser passes fuzzing if:
//! - It never panics on any input (including invalid UTF-8)
//! - It always returns a Generator or a DescriptorError
//! - No assertions fail during parsing

#![no_main]

use libfuzzer_sys::fuzz_target;
use methodgen_core::descriptor::parse;

fuzz_target!(|data: &[u8]| {
    // Only test valid UTF-8 (the parser expects strings)
    // Invalid UTF-8 is not a parser concern - it's filtered earlier
    if let Ok(source) = std::str::from_utf8(data) {
        // Success = no panic. We don't care whether it's an error.
        let _ = parse(source);
    }
});
