// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Generate a method table definition from a descriptor.

use camino::Utf8Path;
use methodgen_core::{codegen, descriptor};
use miette::{Context, IntoDiagnostic, Result};
use tracing::{debug, info, instrument};

use super::read_descriptor;
use crate::diagnostic;

/// Generates a compilation unit from a descriptor.
///
/// The output file is written only after generation succeeds; a validation
/// failure produces no partial file.
#[instrument(skip_all)]
pub fn generate(
    descriptor_path: Option<&Utf8Path>,
    package: Option<&str>,
    output: Option<&Utf8Path>,
) -> Result<()> {
    let (source_name, source) = read_descriptor(descriptor_path)?;
    debug!(bytes = source.len(), "Read descriptor");

    let mut generator = descriptor::parse(&source)
        .map_err(|error| diagnostic::with_source(error, &source_name, &source))?;
    if let Some(namespace) = package {
        generator.set_package(namespace);
    }
    info!(name = %generator.name, "Parsed descriptor");

    let unit = codegen::generate(&generator);
    match output {
        Some(path) => {
            std::fs::write(path, &unit)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to write '{path}'"))?;
            info!(path = %path, "Wrote generated unit");
        }
        None => print!("{unit}"),
    }
    Ok(())
}
