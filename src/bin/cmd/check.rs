// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Check command - validate a catalog without writing anything.

use std::path::PathBuf;

use clap::Args;
use marshalgen::FactoryGenerator;

use crate::common::{load_catalog, Result, TargetArgs};

/// Validate a catalog and print its fingerprint.
#[derive(Args, Clone, Debug)]
pub struct CheckCmd {
    /// Catalog file (JSON or TOML)
    #[arg(value_name = "CATALOG")]
    catalog: PathBuf,

    #[command(flatten)]
    target: TargetArgs,
}

impl CheckCmd {
    pub fn run(self) -> Result<()> {
        let generator = FactoryGenerator::new(load_catalog(&self.catalog)?);
        let fingerprint = generator.fingerprint(&self.target.package, &self.target.class_name)?;
        let types = generator.catalog().len();
        let aliases = generator.catalog().aliases.len();

        let plan = generator.build_plan(&self.target.package, &self.target.class_name)?;

        println!("Catalog:     {}", self.catalog.display());
        println!("Types:       {types}");
        println!("Aliases:     {aliases}");
        println!("Marshallers: {}", plan.marshallers.len());
        println!("Bindings:    {}", plan.bindings.len());
        println!("Fingerprint: {fingerprint}");
        Ok(())
    }
}
