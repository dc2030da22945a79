// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Normalize command - decode wire text through the generated registry and
//! encode it again.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use marshalgen::{FactoryGenerator, TypeRef};

use crate::common::{load_catalog, Result, TargetArgs};

/// Decode and re-encode wire text.
#[derive(Args, Clone, Debug)]
pub struct NormalizeCmd {
    /// Catalog file (JSON or TOML)
    #[arg(value_name = "CATALOG")]
    catalog: PathBuf,

    /// File holding the wire text
    #[arg(value_name = "WIRE_FILE")]
    input: PathBuf,

    /// Declared type of the value (tagged dispatch when omitted)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    declared: Option<String>,

    #[command(flatten)]
    target: TargetArgs,
}

impl NormalizeCmd {
    pub fn run(self) -> Result<()> {
        let factory = FactoryGenerator::new(load_catalog(&self.catalog)?)
            .build_factory(&self.target.package, &self.target.class_name)?;
        let text = std::fs::read_to_string(&self.input)
            .with_context(|| format!("reading {}", self.input.display()))?;

        let output = match &self.declared {
            Some(spelling) => {
                let declared: TypeRef = spelling.parse()?;
                let value = factory.demarshall_as(&declared, text.trim())?;
                factory.marshall_as(&declared, &value)?
            }
            None => {
                let value = factory.demarshall(text.trim())?;
                factory.marshall(&value)?
            }
        };
        println!("{output}");
        Ok(())
    }
}
