// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Method table compiler command-line interface.
//!
//! This is the main entry point for the `methodgen` command.

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser, Subcommand};
use miette::Result;
use tracing_subscriber::EnvFilter;

mod commands;
mod diagnostic;

/// Methodgen: a descriptor-driven method table compiler for the JRuby runtime
#[derive(Debug, Parser)]
#[command(name = "methodgen")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a method table definition from a descriptor
    Generate {
        /// Descriptor file to read (standard input when omitted)
        descriptor: Option<Utf8PathBuf>,

        /// Namespace for the generated compilation unit
        #[arg(long)]
        package: Option<String>,

        /// Write the generated unit to a file instead of standard output
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },

    /// Check a descriptor for errors without generating code
    Check {
        /// Descriptor file to read (standard input when omitted)
        descriptor: Option<Utf8PathBuf>,
    },
}

fn main() -> Result<()> {
    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    // The generated unit goes to stdout, so logs stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::Generate {
            descriptor,
            package,
            output,
        } => commands::generate::generate(
            descriptor.as_deref(),
            package.as_deref(),
            output.as_deref(),
        ),
        Command::Check { descriptor } => commands::check::check(descriptor.as_deref()),
    };

    // Exit with appropriate code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{e:?}");
            std::process::exit(1);
        }
    }
}

fn directive_for_verbosity(v: u8) -> &'static str {
    // Targets must match the crates' Rust module paths.
    match v {
        0 => "methodgen_cli=info,methodgen_core=info",
        1 => "methodgen_cli=debug,methodgen_core=debug",
        _ => "methodgen_cli=trace,methodgen_core=trace",
    }
}
