// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod bindings;
mod check;
mod generate;
mod normalize;

pub use bindings::BindingsCmd;
pub use check::CheckCmd;
pub use generate::GenerateCmd;
pub use normalize::NormalizeCmd;
