// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of the asset and mod commands.
//!
//! ```text
//! schema  <ASSET_DIR>
//! scan    <MOD_DIR> [--glob PATTERN] [--json]
//! resolve <ASSET_DIR>           [--assignments FILE] [--assign SPEC]...
//! export  <ASSET_DIR> <MOD_DIR> [--assignments FILE] [--assign SPEC]...
//! inspect <FILE>
//! ```
//!
//! Assignments from the file are applied first, then each `--assign` in
//! order; a later spec for the same slot wins.

use clap::{ArgAction, Args};
use std::path::PathBuf;

use crate::slots::SlotSpec;

/// Slot assignments shared by `resolve` and `export`.
#[derive(Debug, Clone, Default, Args)]
pub struct AssignmentArgs {
    /// JSON assignment file.
    #[arg(short = 'a', long = "assignments", value_name = "FILE")]
    pub assignments: Option<PathBuf>,

    /// Assigns one slot, e.g. 'Body/A:ib=meshes/ib0.assets' or
    /// 'Body:position=vb0.assets'. Can be specified multiple times.
    #[arg(long = "assign", value_name = "SPEC", action = ArgAction::Append)]
    pub assign: Vec<SlotSpec>,
}

impl AssignmentArgs {
    /// True if neither a file nor a single spec was given.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.assignments.is_none() && self.assign.is_empty()
    }
}

/// Arguments for the `schema` command.
#[derive(Debug, Clone, Args)]
pub struct SchemaArgs {
    /// Asset folder containing `hash.json`.
    #[arg(value_name = "ASSET_DIR")]
    pub asset_dir: PathBuf,
}

/// Arguments for the `scan` command.
#[derive(Debug, Clone, Args)]
pub struct ScanArgs {
    /// Mod folder to scan.
    #[arg(value_name = "MOD_DIR")]
    pub mod_dir: PathBuf,

    /// Only lists candidates matching this glob, e.g. '**/*.ib'.
    #[arg(short = 'g', long = "glob", value_name = "PATTERN")]
    pub glob: Option<String>,

    /// Prints the candidates as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// Asset folder containing `hash.json`.
    #[arg(value_name = "ASSET_DIR")]
    pub asset_dir: PathBuf,

    #[command(flatten)]
    pub slots: AssignmentArgs,
}

/// Arguments for the `export` command.
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Asset folder containing `hash.json`.
    #[arg(value_name = "ASSET_DIR")]
    pub asset_dir: PathBuf,

    /// Mod folder to copy and rewrite. It is never modified.
    #[arg(value_name = "MOD_DIR")]
    pub mod_dir: PathBuf,

    #[command(flatten)]
    pub slots: AssignmentArgs,

    /// Re-serializes every configuration file after the rewrite.
    #[arg(long)]
    pub canonicalize: bool,
}

/// Arguments for the `inspect` command.
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Configuration file to parse.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}
