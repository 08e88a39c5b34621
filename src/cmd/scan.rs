// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scan command implementation for slotmod-rs.

use crate::cli::slots::ScanArgs;
use crate::config::Config;
use crate::error::Result;
use crate::scan::{ScanReport, scan_mod};

/// One line per candidate, followed by an indented line per binding.
#[must_use]
pub fn format_scan(report: &ScanReport) -> Vec<String> {
    let mut out = Vec::new();
    for candidate in &report.candidates {
        match &candidate.kind_hint {
            Some(kind) => out.push(format!("{} ({kind})", candidate.path)),
            None => out.push(candidate.path.clone()),
        }
        for binding in &candidate.bindings {
            out.push(format!(
                "  {} {} hash={} via [{}] in {}",
                binding.component,
                binding.kind,
                binding.hash.as_deref().unwrap_or("-"),
                binding.resource,
                binding.config
            ));
        }
    }
    out
}

/// Main handler for scan command.
///
/// # Errors
///
/// Returns an error if the mod folder cannot be walked.
pub fn run_scan_command(args: &ScanArgs, config: &Config) -> Result<()> {
    let mut report = scan_mod(&args.mod_dir, &config.dialect)?;
    if let Some(pattern) = &args.glob {
        report.retain_glob(&args.mod_dir, pattern)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.candidates)?);
        return Ok(());
    }

    if report.candidates.is_empty() {
        println!("No candidate buffers found");
    } else {
        for line in format_scan(&report) {
            println!("{line}");
        }
    }
    Ok(())
}
