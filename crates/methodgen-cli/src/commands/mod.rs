// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! CLI command implementations.

pub mod check;
pub mod generate;

use camino::Utf8Path;
use miette::{Context, IntoDiagnostic, Result};

/// Reads descriptor text from a file, or standard input when no path is
/// given. Returns the source name (for diagnostics) and the text.
fn read_descriptor(path: Option<&Utf8Path>) -> Result<(String, String)> {
    match path {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to read descriptor '{path}'"))?;
            Ok((path.to_string(), source))
        }
        None => {
            let source = std::io::read_to_string(std::io::stdin())
                .into_diagnostic()
                .wrap_err("Failed to read descriptor from standard input")?;
            Ok(("<stdin>".to_string(), source))
        }
    }
}
