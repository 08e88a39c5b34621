// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Inspect command implementation for slotmod-rs.

use anyhow::Context;
use tracing::debug;

use crate::cli::slots::InspectArgs;
use crate::config::Config;
use crate::dialect::{parse_with, serialize_with};
use crate::error::Result;
use crate::utility::encoding::decode_text;

/// Main handler for inspect command.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn run_inspect_command(args: &InspectArgs, config: &Config) -> Result<()> {
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let decoded = decode_text(&bytes);
    let doc = parse_with(&decoded.text, &config.dialect);
    debug!(
        file = %args.file.display(),
        encoding = ?decoded.encoding,
        sections = doc.len(),
        "parsed configuration"
    );

    print!("{}", serialize_with(&doc, &config.dialect));
    Ok(())
}
