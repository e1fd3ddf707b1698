// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Check a descriptor for errors without generating code.

use camino::Utf8Path;
use methodgen_core::descriptor;
use miette::Result;
use tracing::{info, instrument};

use super::read_descriptor;
use crate::diagnostic;

/// Parses and validates a descriptor, reporting diagnostics only.
#[instrument(skip_all)]
pub fn check(descriptor_path: Option<&Utf8Path>) -> Result<()> {
    let (source_name, source) = read_descriptor(descriptor_path)?;
    let generator = descriptor::parse(&source)
        .map_err(|error| diagnostic::with_source(error, &source_name, &source))?;
    info!(name = %generator.name, "Descriptor is valid");
    println!(
        "{}: ok ({} instance methods, {} class methods)",
        generator.name,
        generator.methods.len(),
        generator.class_methods.len()
    );
    Ok(())
}
