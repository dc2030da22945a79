// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Generate command - emit the factory source through the cache.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use marshalgen::{FactoryGenerator, GenerationCache, GeneratorConfig};

use crate::common::{load_catalog, Result, TargetArgs};

/// Generate the marshaller factory source.
#[derive(Args, Clone, Debug)]
pub struct GenerateCmd {
    /// Catalog file (JSON or TOML)
    #[arg(value_name = "CATALOG")]
    catalog: PathBuf,

    #[command(flatten)]
    target: TargetArgs,

    /// Generator configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Cache directory (overrides config and environment)
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// Always regenerate, ignoring cached output
    #[arg(long)]
    no_cache: bool,

    /// Also print freshly generated source to stdout
    #[arg(long)]
    print: bool,

    /// Write the source to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl GenerateCmd {
    pub fn run(self) -> Result<()> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)?,
            None => GeneratorConfig::default(),
        };
        config.apply_env()?;
        if let Some(dir) = self.cache_dir {
            config.cache_dir = dir;
        }
        if self.no_cache {
            config.use_cache = false;
        }
        if self.print {
            config.print_out = true;
        }

        let generator = FactoryGenerator::new(load_catalog(&self.catalog)?);
        let mut cache = GenerationCache::from_config(&config);
        let source = cache.generate(&generator, &self.target.package, &self.target.class_name)?;

        match self.output {
            Some(path) => {
                std::fs::write(&path, &source)
                    .with_context(|| format!("writing {}", path.display()))?;
                eprintln!(
                    "{} ({})",
                    path.display(),
                    if cache.generation_count() == 0 {
                        "cached"
                    } else {
                        "generated"
                    }
                );
            }
            // A fresh generation was already printed by the cache.
            None if config.print_out && cache.generation_count() > 0 => {}
            None => print!("{source}"),
        }
        Ok(())
    }
}
