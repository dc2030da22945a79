// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Marshaller factory generation.
//!
//! - [`FactoryGenerator`] - walks the catalog and emits a [`FactoryPlan`]
//! - [`select_strategy`] - picks the [`MappingStrategy`] for one type
//! - [`ArraySynthesizer`] - one marshaller per distinct array signature
//! - [`GeneratorContext`] - state of a single generation pass

pub mod array;
pub mod context;
pub mod generator;
pub mod plan;
pub mod strategy;

pub use array::ArraySynthesizer;
pub use context::GeneratorContext;
pub use generator::FactoryGenerator;
pub use plan::{FactoryPlan, PlanBuilder, PlannedMarshaller};
pub use strategy::{select_strategy, MappingStrategy};
