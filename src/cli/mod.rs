// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for slotmod-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! slotmod [global options] <command>
//! version | options | inis
//! schema <ASSET_DIR>
//! scan <MOD_DIR>
//! resolve <ASSET_DIR> [assignments]
//! export <ASSET_DIR> <MOD_DIR> [assignments]
//! inspect <FILE>
//! ```

pub mod global;
pub mod slots;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::slots::{ExportArgs, InspectArgs, ResolveArgs, ScanArgs, SchemaArgs};
use clap::{Parser, Subcommand};

/// Mod Slot Matcher
///
/// Maps the buffers of an existing mod onto the slots of an extracted asset.
#[derive(Debug, Parser)]
#[command(
    name = "slotmod",
    author,
    version,
    about = "Mod Slot Matcher",
    long_about = "slotmod-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Maps the resource files of an existing mod onto the slots of\n\
                  an extracted asset and writes a rewritten copy of the mod.\n\n\
                  `slotmod schema <asset>` shows the slots, `slotmod scan <mod>`\n\
                  lists the candidate buffers, and `slotmod export <asset> <mod>\n\
                  --assign Body/A:ib=ib0.assets ...` stages the rewritten copy.\n\
                  See `slotmod <command> --help` for more information.",
    after_help = "CONFIG FILES:\n\n\
                  By default, slotmod loads `slotmod.toml` from the current\n\
                  directory if it exists. Additional files can be given with\n\
                  --config and are loaded after it, each overriding the previous.\n\
                  SLOTMOD_SECTION__KEY environment variables and --set options\n\
                  are applied last. Use --no-default-config to skip slotmod.toml."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the configuration files used by slotmod.
    Inis,

    /// Shows the component schema of an asset folder.
    Schema(SchemaArgs),

    /// Lists candidate buffers of a mod folder and their bindings.
    Scan(ScanArgs),

    /// Prints the logical slot ids for a set of assignments.
    Resolve(ResolveArgs),

    /// Stages a rewritten copy of a mod.
    Export(ExportArgs),

    /// Parses one configuration file and prints it back.
    Inspect(InspectArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
