// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `schema` and `resolve` commands, plus the assignment plumbing `export`
//! shares with them.

use anyhow::Context;
use tracing::{debug, warn};

use crate::cli::slots::{AssignmentArgs, ResolveArgs, SchemaArgs};
use crate::error::{Incident, Result};
use crate::logging::journal::RunLog;
use crate::schema::{AssetSchema, SlotKind, load_asset_schema};
use crate::slots::{ResolvedSlot, SlotAssignment, SlotSpec, load_assignment_file, resolve};

use std::path::Path;

/// Schema of an asset folder with the assignment resolved against it.
#[derive(Debug, Clone)]
pub struct ResolvedAssignment {
    pub schema: AssetSchema,
    pub assignment: SlotAssignment,
    pub slots: Vec<ResolvedSlot>,
}

/// Loads the schema of `asset_dir` and resolves the assignment arguments.
///
/// File entries are applied before `--assign` specs, so a spec overrides
/// the file for the same slot.
///
/// # Errors
///
/// Returns an error if the assignment file cannot be read or if a spec
/// names a component, variant or slot the schema does not have.
pub fn resolve_assignment(
    asset_dir: &Path,
    args: &AssignmentArgs,
    log: &mut RunLog,
) -> Result<ResolvedAssignment> {
    log.enter_phase("schema");
    let schema = load_asset_schema(asset_dir, log);

    let mut specs: Vec<SlotSpec> = match &args.assignments {
        Some(path) => load_assignment_file(path)?,
        None => Vec::new(),
    };
    specs.extend(args.assign.iter().cloned());

    let mut assignment = SlotAssignment::new();
    for spec in &specs {
        let key = spec
            .apply(&schema, &mut assignment)
            .with_context(|| format!("cannot assign '{spec}'"))?;
        debug!(spec = %spec, component = key.component, "assigned slot");
    }

    let slots = resolve(&schema.components, &assignment, &schema.asset_name);
    Ok(ResolvedAssignment {
        schema,
        assignment,
        slots,
    })
}

fn fmt_hash(hash: Option<&String>) -> &str {
    hash.map_or("-", String::as_str)
}

fn fmt_slots<'a>(
    out: &mut Vec<String>,
    indent: &str,
    slots: impl IntoIterator<Item = (&'a SlotKind, &'a Option<String>)>,
) {
    for (kind, hash) in slots {
        out.push(format!(
            "{indent}{:<10} {}",
            kind.to_string(),
            fmt_hash(hash.as_ref())
        ));
    }
}

/// Human-readable schema listing.
#[must_use]
pub fn format_schema(schema: &AssetSchema) -> Vec<String> {
    let mut out = vec![format!(
        "asset '{}': {} component(s)",
        schema.asset_name,
        schema.components.len()
    )];

    for (index, component) in schema.components.iter().enumerate() {
        out.push(format!("[{index}] {}", component.name));
        out.push("  shared".to_string());
        fmt_slots(&mut out, "    ", &component.shared);
        for variant in &component.variants {
            let label = if variant.label.is_empty() {
                "(default)"
            } else {
                variant.label.as_str()
            };
            out.push(format!("  variant {label}"));
            fmt_slots(&mut out, "    ", &variant.slots);
        }
    }
    out
}

/// `logical_id <- source` per resolved slot, aligned on the arrow.
#[must_use]
pub fn format_resolved(slots: &[ResolvedSlot]) -> Vec<String> {
    let width = slots.iter().map(|s| s.logical_id.len()).max().unwrap_or(0);
    slots
        .iter()
        .map(|s| format!("{:<width$} <- {}", s.logical_id, s.source))
        .collect()
}

/// One `kind: count` line per incident kind, or nothing for a clean run.
#[must_use]
pub fn format_incidents(log: &RunLog) -> Vec<String> {
    log.incident_counts()
        .into_iter()
        .map(|(kind, count)| format!("{kind}: {count}"))
        .collect()
}

/// Main handler for the schema command.
///
/// # Errors
///
/// Returns an error if `hash.json` is missing or malformed.
pub fn run_schema_command(args: &SchemaArgs) -> Result<()> {
    let mut log = RunLog::new();
    let schema = load_asset_schema(&args.asset_dir, &mut log);
    if let Some(event) = log.incidents(Incident::MetadataUnavailable).next() {
        anyhow::bail!("{}", event.message);
    }

    for line in format_schema(&schema) {
        println!("{line}");
    }
    Ok(())
}

/// Main handler for the resolve command.
///
/// # Errors
///
/// Returns an error if the assignments cannot be applied.
pub fn run_resolve_command(args: &ResolveArgs) -> Result<()> {
    let mut log = RunLog::new();
    let resolved = resolve_assignment(&args.asset_dir, &args.slots, &mut log)?;

    if resolved.slots.is_empty() {
        warn!("no slot is assigned");
        println!("No slots assigned");
        return Ok(());
    }
    for line in format_resolved(&resolved.slots) {
        println!("{line}");
    }
    Ok(())
}
