// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Marshalgen CLI
//!
//! Generate and inspect marshaller factories from a type catalog.
//!
//! ## Usage
//!
//! ```sh
//! # Generate (or reuse) the factory source
//! marshalgen generate catalog.toml --package app.gen --class AppMarshallers
//!
//! # Show which marshaller every wire identifier is bound to
//! marshalgen bindings catalog.toml
//!
//! # Validate a catalog and print its fingerprint
//! marshalgen check catalog.toml
//!
//! # Decode wire text against the catalog and print it re-encoded
//! marshalgen normalize catalog.toml message.json
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{BindingsCmd, CheckCmd, GenerateCmd, NormalizeCmd};
use common::Result;

/// Marshalgen - marshaller factory generator
///
/// Reads a catalog of exposed types and emits a factory binding every wire
/// identifier to a JSON marshaller.
#[derive(Parser, Clone)]
#[command(name = "marshalgen")]
#[command(about = "Marshaller factory generator for exposed data-model types", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Log generation steps to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Generate the factory source, reusing cached output when unchanged
    Generate(GenerateCmd),

    /// List identifier bindings of the generated factory
    Bindings(BindingsCmd),

    /// Validate a catalog and print its fingerprint
    Check(CheckCmd),

    /// Decode a wire value and print it re-encoded
    Normalize(NormalizeCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    common::init_logging(cli.verbose);

    match cli.command {
        Commands::Generate(cmd) => cmd.run(),
        Commands::Bindings(cmd) => cmd.run(),
        Commands::Check(cmd) => cmd.run(),
        Commands::Normalize(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
