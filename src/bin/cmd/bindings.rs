// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Bindings command - show which marshaller each identifier resolves to.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;
use marshalgen::{FactoryGenerator, MappingStrategy};

use crate::common::{load_catalog, Result, TargetArgs};

/// List identifier bindings of the generated factory.
#[derive(Args, Clone, Debug)]
pub struct BindingsCmd {
    /// Catalog file (JSON or TOML)
    #[arg(value_name = "CATALOG")]
    catalog: PathBuf,

    #[command(flatten)]
    target: TargetArgs,

    /// Only show identifiers containing this text
    #[arg(short, long)]
    filter: Option<String>,

    /// Print the bindings as a JSON object
    #[arg(long)]
    json: bool,
}

impl BindingsCmd {
    pub fn run(self) -> Result<()> {
        let generator = FactoryGenerator::new(load_catalog(&self.catalog)?);
        let plan = generator.build_plan(&self.target.package, &self.target.class_name)?;

        if self.json {
            let selected: BTreeMap<&String, &String> = plan
                .bindings
                .iter()
                .filter(|(type_id, _)| self.matches(type_id))
                .collect();
            println!("{}", serde_json::to_string_pretty(&selected)?);
            return Ok(());
        }

        println!("=== {} ===", plan.qualified_name());
        let mut shown = 0usize;
        for (type_id, var) in &plan.bindings {
            if !self.matches(type_id) {
                continue;
            }
            let detail = plan
                .marshaller(var)
                .map(|m| describe(&m.strategy))
                .unwrap_or_default();
            println!("  {type_id:<30} {var:<24} {detail}");
            shown += 1;
        }
        println!();
        println!(
            "{shown} of {} bindings, {} marshallers",
            plan.bindings.len(),
            plan.marshallers.len()
        );
        Ok(())
    }

    fn matches(&self, type_id: &str) -> bool {
        self.filter
            .as_deref()
            .map_or(true, |filter| type_id.contains(filter))
    }
}

fn describe(strategy: &MappingStrategy) -> String {
    match strategy {
        MappingStrategy::Explicit { class, .. } => format!("explicit {class}"),
        MappingStrategy::Array { signature } => format!("array {signature}"),
        MappingStrategy::Enum { variants, .. } => format!("enum ({} constants)", variants.len()),
        MappingStrategy::Reflective { fields, .. } => {
            format!("reflective ({} fields)", fields.len())
        }
    }
}
