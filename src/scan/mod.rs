// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod-folder scan: candidate buffers and what the mod binds them to.
//!
//! ```text
//! walk(mod_root)                       sorted
//!   *.ib / *.buf / *.assets  -> Candidate
//!   *.ini -> parse ->
//!     [TextureOverrideBody]            component "Body"
//!       hash = 1a2b3c4d                hash
//!       vb0  = ResourceBodyPosition    slot kind from the dialect key
//!     [ResourceBodyPosition]
//!       filename = meshes/vb0.assets   -> Binding on that candidate
//! ```


use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::dialect::{Dialect, Document, has_extension, parse_with};
use crate::error::{Incident, Result};
use crate::logging::journal::RunLog;
use crate::schema::SlotKind;
use crate::utility::encoding::decode_text;
use crate::utility::fs::relpath::{base_name, join_relative, normalize_slashes, parent_dir};
use crate::utility::fs::walk::{WalkOptions, find_files, parallel_walk, relative_slash_path};

/// A buffer file that can be assigned to a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// Slash path relative to the mod root.
    pub path: String,
    /// Kind implied by the extension alone (index buffers only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind_hint: Option<SlotKind>,
    pub bindings: Vec<Binding>,
}

/// One override-section binding found in the mod's own configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    /// Configuration file, relative to the mod root.
    pub config: String,
    /// Override section name without its prefix.
    pub component: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    pub kind: SlotKind,
    /// Resource section that loads the file.
    pub resource: String,
}

/// Result of [`scan_mod`].
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub candidates: Vec<Candidate>,
    /// Configuration files parsed, relative to the mod root.
    pub configs: Vec<String>,
    pub log: RunLog,
}

impl ScanReport {
    /// Candidate with the given relative path.
    #[must_use]
    pub fn candidate(&self, path: &str) -> Option<&Candidate> {
        self.candidates
            .iter()
            .find(|c| c.path.eq_ignore_ascii_case(path))
    }

    /// Keeps only candidates matching `pattern` (a glob relative to `mod_root`).
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is invalid or `mod_root` is missing.
    pub fn retain_glob(&mut self, mod_root: &Path, pattern: &str) -> Result<()> {
        let matched: Vec<String> = find_files(mod_root, pattern)?
            .iter()
            .map(|p| relative_slash_path(mod_root, p))
            .collect();
        self.candidates.retain(|c| matched.contains(&c.path));
        Ok(())
    }
}

fn is_candidate(name: &str, dialect: &Dialect) -> bool {
    [
        &dialect.index_extension,
        &dialect.stream_extension,
        &dialect.placeholder_extension,
    ]
    .into_iter()
    .any(|ext| has_extension(name, ext))
}

/// Lists candidate buffers under `mod_root` and their bindings.
///
/// # Errors
///
/// Returns an error if `mod_root` cannot be walked. Unreadable configuration
/// files are recorded in the report's log.
pub fn scan_mod(mod_root: &Path, dialect: &Dialect) -> Result<ScanReport> {
    let walk = parallel_walk(mod_root, &WalkOptions::for_mod_tree())?;
    let mut log = RunLog::new();
    log.enter_phase("scan");

    let all: Vec<String> = walk
        .files()
        .iter()
        .map(|p| relative_slash_path(mod_root, p))
        .collect();

    let mut candidates: Vec<Candidate> = all
        .iter()
        .filter(|rel| is_candidate(base_name(rel), dialect))
        .map(|rel| Candidate {
            path: rel.clone(),
            kind_hint: has_extension(base_name(rel), &dialect.index_extension)
                .then_some(SlotKind::IndexBuffer),
            bindings: Vec::new(),
        })
        .collect();

    let mut configs = Vec::new();
    for rel in all.iter().filter(|rel| dialect.is_config_file(base_name(rel))) {
        let bytes = match std::fs::read(mod_root.join(rel)) {
            Ok(bytes) => bytes,
            Err(e) => {
                log.warn(Incident::FilesystemFailure, format!("cannot read {rel}: {e}"));
                continue;
            }
        };
        let doc = parse_with(&decode_text(&bytes).text, dialect);
        let bindings = collect_bindings(&doc, rel, dialect);
        debug!(config = %rel, bindings = bindings.len(), "parsed configuration");

        for (file, binding) in bindings {
            match find_candidate(&mut candidates, &file) {
                Some(candidate) => {
                    if !candidate.bindings.contains(&binding) {
                        candidate.bindings.push(binding);
                    }
                }
                None => log.info(format!(
                    "[{}] in {rel} loads {file}, which is not a candidate buffer",
                    binding.resource
                )),
            }
        }
        configs.push(rel.clone());
    }

    log.info(format!(
        "{} candidate(s), {} bound, {} configuration file(s)",
        candidates.len(),
        candidates.iter().filter(|c| !c.bindings.is_empty()).count(),
        configs.len()
    ));
    Ok(ScanReport {
        candidates,
        configs,
        log,
    })
}

/// Exact relative path first, then the first candidate with the same name.
fn find_candidate<'a>(candidates: &'a mut [Candidate], file: &str) -> Option<&'a mut Candidate> {
    let index = candidates
        .iter()
        .position(|c| c.path.eq_ignore_ascii_case(file))
        .or_else(|| {
            let name = base_name(file);
            candidates
                .iter()
                .position(|c| base_name(&c.path).eq_ignore_ascii_case(name))
        })?;
    candidates.get_mut(index)
}

/// `(mod-relative file, binding)` for every slot key of every override
/// section whose resource declares a `filename`.
fn collect_bindings(doc: &Document, config_rel: &str, dialect: &Dialect) -> Vec<(String, Binding)> {
    let config_dir = parent_dir(config_rel);
    let mut out = Vec::new();

    for (name, section) in doc.sections() {
        let Some(component) = name.strip_prefix(dialect.override_prefix.as_str()) else {
            continue;
        };
        let hash = section.text("hash").map(str::to_string);

        for (key, value) in section.iter() {
            let Some(kind) = dialect.slot_kind_for_key(key) else {
                continue;
            };
            for resource in value.texts() {
                let Some(filename) = doc
                    .section(resource)
                    .and_then(|res| res.text("filename"))
                else {
                    continue;
                };
                out.push((
                    join_relative(config_dir, &normalize_slashes(filename)),
                    Binding {
                        config: config_rel.to_string(),
                        component: component.to_string(),
                        hash: hash.clone(),
                        kind: kind.clone(),
                        resource: resource.to_string(),
                    },
                ));
            }
        }
    }
    out
}
