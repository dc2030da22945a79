// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::path::Path;

use anyhow::Context as _;
use clap::Args;
use marshalgen::TypeCatalog;
use tracing_subscriber::EnvFilter;

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Default output package.
pub const DEFAULT_PACKAGE: &str = "marshalgen.generated";
/// Default output class name.
pub const DEFAULT_CLASS: &str = "MarshallerFactoryImpl";

/// Output target shared by the generating commands.
#[derive(Args, Clone, Debug)]
pub struct TargetArgs {
    /// Package of the generated factory
    #[arg(short, long, default_value = DEFAULT_PACKAGE)]
    pub package: String,

    /// Class name of the generated factory (also names the cache files)
    #[arg(short, long = "class", default_value = DEFAULT_CLASS)]
    pub class_name: String,
}

/// Install a stderr logger. `RUST_LOG` takes precedence over `-v`.
pub fn init_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Load and validate a catalog file merged over the built-in types.
pub fn load_catalog(path: &Path) -> Result<TypeCatalog> {
    TypeCatalog::load(path).with_context(|| format!("loading catalog {}", path.display()))
}
