// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Export command implementation for slotmod-rs.
//!
//! ```text
//! hash.json + assignments --resolve--> [ResolvedSlot]
//!                                          |
//! mod folder --stage--> output_root/<mod> --rewrite--> ExportReport
//! ```

use tracing::{info, warn};

use super::assets::{format_incidents, resolve_assignment};
use crate::cli::slots::ExportArgs;
use crate::config::Config;
use crate::error::Result;
use crate::export::{ExportReport, Exporter};
use crate::logging::journal::RunLog;

/// Summary printed after a run: staged root, rename record, incidents.
#[must_use]
pub fn format_export_report(report: &ExportReport) -> Vec<String> {
    let mut out = vec![
        format!("staged:    {}", report.staged_root.display()),
        format!("copied:    {} file(s)", report.copied),
        format!("configs:   {} file(s)", report.configs.len()),
    ];

    if !report.record.files.is_empty() {
        out.push("files:".to_string());
        for (source, name) in &report.record.files {
            out.push(format!("  {source} -> {name}"));
        }
    }
    if !report.record.sections.is_empty() {
        out.push("sections:".to_string());
        for (old, new) in &report.record.sections {
            out.push(format!("  {old} -> {new}"));
        }
    }
    if !report.pruned.is_empty() {
        out.push(format!("pruned:    {}", report.pruned.join(", ")));
    }

    let incidents = format_incidents(&report.log);
    if incidents.is_empty() {
        out.push("incidents: none".to_string());
    } else {
        out.push("incidents:".to_string());
        out.extend(incidents.into_iter().map(|line| format!("  {line}")));
    }
    out
}

/// Main handler for export command.
///
/// # Errors
///
/// Returns an error if the assignments are invalid, if staging fails, or if
/// the rewrite recorded error-level incidents. The staged copy is kept in
/// the last case.
pub async fn run_export_command(args: &ExportArgs, config: &Config) -> Result<()> {
    let mut log = RunLog::new();
    let resolved = resolve_assignment(&args.asset_dir, &args.slots, &mut log)?;
    if resolved.slots.is_empty() {
        warn!("no slot is assigned, the copy is only pruned");
    }

    let mut options = config.rewrite_options();
    options.canonicalize |= args.canonicalize;
    let exporter = Exporter::new(
        config.paths.output_root.clone(),
        config.dialect.clone(),
        options,
    );

    info!(
        asset = %resolved.schema.asset_name,
        mod_root = %args.mod_dir.display(),
        slots = resolved.slots.len(),
        "starting export"
    );
    let mut report = exporter.export(&args.mod_dir, resolved.slots).await?;

    log.extend(std::mem::take(&mut report.log));
    report.log = log;

    for line in format_export_report(&report) {
        println!("{line}");
    }

    if report.log.has_errors() {
        anyhow::bail!(
            "export finished with errors, see the log for details ({})",
            report.staged_root.display()
        );
    }
    Ok(())
}
