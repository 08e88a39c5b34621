// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rewrite engine for a staged mod tree.
//!
//! ```text
//! RewriteEngine::rewrite(staged_root, resolved_slots)
//!   discover    walk (sorted), locate slot sources, load configs
//!   1 flatten       files.rs       matched files + configs -> root
//!   2 normalize     files.rs       .assets -> .ib / .buf
//!   3 patch paths   paths.rs       filename = <new root-relative name>
//!   4 rename        files.rs       name -> {token}.ext -> {logical id}.ext
//!   5 references    references.rs  old names -> token -> final names
//!   6 sections      references.rs  [ResourceOld] -> [Resource<final>]
//!   7 prune         prune.rs       invalid resource sections
//!   8 transforms    transform.rs   `!=` rewrite, plus-value key
//!   save        encoding and line endings preserved
//!   -> RewriteOutcome { record, configs, pruned, log }
//! ```
//!
//! Every phase completes for all files before the next starts. Per-file
//! failures are recorded in the [`RunLog`] and never abort the run.

mod files;
mod paths;
mod prune;
mod references;
mod transform;


use std::path::{Path, PathBuf};

use bon::Builder;
use indexmap::IndexMap;
use serde::Serialize;

use crate::dialect::text::ConfigText;
use crate::dialect::{Dialect, Document, parse_with, serialize_with};
use crate::error::Incident;
use crate::logging::journal::RunLog;
use crate::slots::ResolvedSlot;
use crate::utility::encoding::{Encoding, decode_text, encode_text};
use crate::utility::fs::relpath::{base_name, normalize_slashes, parent_dir};
use crate::utility::fs::walk::{WalkOptions, parallel_walk, relative_slash_path};

pub use prune::PruneRule;
pub use transform::{rewrite_inequalities, rewrite_plus_value};

/// Mapping produced by one run. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenameRecord {
    /// Assigned source path -> final file name.
    pub files: IndexMap<String, String>,
    /// Original section id -> final section id.
    pub sections: IndexMap<String, String>,
}

impl RenameRecord {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.sections.is_empty()
    }
}

/// Knobs of one rewrite run.
#[derive(Debug, Clone, Copy, Default, Builder)]
pub struct RewriteOptions {
    /// Re-emit each configuration through the document serializer.
    #[builder(default)]
    pub canonicalize: bool,
}

/// Result of one rewrite run.
#[derive(Debug, Clone, Default)]
pub struct RewriteOutcome {
    pub record: RenameRecord,
    /// Configuration files written, in processing order.
    pub configs: Vec<PathBuf>,
    /// Sections removed by pruning.
    pub pruned: Vec<String>,
    pub log: RunLog,
}

/// Drives phases 1-8 over a staged mod root.
#[derive(Debug, Clone)]
pub struct RewriteEngine<'a> {
    dialect: &'a Dialect,
    options: RewriteOptions,
}

impl<'a> RewriteEngine<'a> {
    #[must_use]
    pub const fn new(dialect: &'a Dialect, options: RewriteOptions) -> Self {
        Self { dialect, options }
    }

    /// Rewrites the staged tree in place.
    ///
    /// The staged root must be a disposable copy: files are moved and
    /// configuration files overwritten.
    #[must_use]
    pub fn rewrite(&self, staged_root: &Path, slots: &[ResolvedSlot]) -> RewriteOutcome {
        let mut log = RunLog::new();
        log.enter_phase("discover");

        let Some(mut ws) = Workspace::discover(staged_root, self.dialect, slots, &mut log) else {
            return RewriteOutcome {
                log,
                ..RewriteOutcome::default()
            };
        };
        ws.log = log;

        ws.flatten();
        ws.normalize_extensions();
        ws.patch_paths();
        ws.rename_files();
        ws.substitute_references();
        ws.rename_sections();
        ws.prune();
        ws.transform();
        if self.options.canonicalize {
            ws.canonicalize();
        }
        ws.save();

        RewriteOutcome {
            record: ws.record,
            configs: ws.configs.into_iter().map(|c| c.path).collect(),
            pruned: ws.pruned,
            log: ws.log,
        }
    }
}

/// Rewrites with the default options.
#[must_use]
pub fn rewrite(staged_root: &Path, slots: &[ResolvedSlot], dialect: &Dialect) -> RewriteOutcome {
    RewriteEngine::new(dialect, RewriteOptions::default()).rewrite(staged_root, slots)
}

/// A slot source file followed through the phases.
#[derive(Debug, Clone)]
struct TrackedFile {
    slot: ResolvedSlot,
    /// Slash path relative to the root when discovered.
    original_rel: String,
    /// File name when discovered.
    original_name: String,
    /// Current location; `None` once the file is lost.
    current: Option<PathBuf>,
    /// File name the configs point at after phase 3.
    staged_name: Option<String>,
    final_name: Option<String>,
}

impl TrackedFile {
    fn current_name(&self) -> Option<String> {
        self.current
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
    }
}

/// A configuration file held in memory for the run.
#[derive(Debug, Clone)]
struct ConfigFile {
    path: PathBuf,
    /// Slash directory relative to the root before flattening (`""` at root).
    original_dir: String,
    text: ConfigText,
    encoding: Encoding,
    doc: Document,
}

impl ConfigFile {
    fn load(path: PathBuf, original_rel: &str, dialect: &Dialect) -> std::io::Result<Self> {
        let bytes = std::fs::read(&path)?;
        let decoded = decode_text(&bytes);
        let original_dir = parent_dir(original_rel).to_string();
        Ok(Self {
            path,
            original_dir,
            doc: parse_with(&decoded.text, dialect),
            text: ConfigText::parse(&decoded.text),
            encoding: decoded.encoding,
        })
    }

    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn reparse(&mut self, dialect: &Dialect) {
        self.doc = parse_with(&self.text.normalized(), dialect);
    }

    fn save(&self) -> std::io::Result<()> {
        std::fs::write(&self.path, encode_text(&self.text.to_string(), self.encoding))
    }
}

/// Mutable state of one run.
struct Workspace<'a> {
    root: PathBuf,
    dialect: &'a Dialect,
    files: Vec<TrackedFile>,
    configs: Vec<ConfigFile>,
    record: RenameRecord,
    pruned: Vec<String>,
    log: RunLog,
}

impl<'a> Workspace<'a> {
    /// Walks the staged root, locates every slot source and loads every
    /// configuration file. Returns `None` if the root cannot be walked.
    fn discover(
        root: &Path,
        dialect: &'a Dialect,
        slots: &[ResolvedSlot],
        log: &mut RunLog,
    ) -> Option<Self> {
        let walk = match parallel_walk(root, &WalkOptions::for_mod_tree()) {
            Ok(walk) => walk,
            Err(e) => {
                log.error(
                    Incident::FilesystemFailure,
                    format!("cannot walk {}: {e:#}", root.display()),
                );
                return None;
            }
        };
        if walk.error_count() > 0 {
            log.warn(
                Incident::FilesystemFailure,
                format!("{} entries could not be read", walk.error_count()),
            );
        }

        let all: Vec<String> = walk
            .files()
            .iter()
            .map(|p| relative_slash_path(root, p))
            .collect();

        let mut files: Vec<TrackedFile> = Vec::with_capacity(slots.len());
        for slot in slots {
            let located = files::locate(&all, &slot.source, log);
            if let Some(rel) = &located
                && let Some(owner) = files.iter().find(|f| f.original_rel == *rel)
            {
                log.warn(
                    Incident::StructuralAmbiguity,
                    format!(
                        "{rel} is already bound to {}, skipping {}",
                        owner.slot.logical_id, slot.logical_id
                    ),
                );
                continue;
            }

            let original_rel = located
                .clone()
                .unwrap_or_else(|| normalize_slashes(&slot.source));
            let original_name = base_name(&original_rel).to_string();
            files.push(TrackedFile {
                slot: slot.clone(),
                current: located.map(|rel| root.join(rel)),
                original_rel,
                original_name,
                staged_name: None,
                final_name: None,
            });
        }

        let mut configs = Vec::new();
        for rel in all.iter().filter(|rel| dialect.is_config_file(base_name(rel))) {
            match ConfigFile::load(root.join(rel), rel, dialect) {
                Ok(config) => configs.push(config),
                Err(e) => log.warn(
                    Incident::FilesystemFailure,
                    format!("cannot read {rel}: {e}"),
                ),
            }
        }
        log.info(format!(
            "found {} configuration file(s), {} of {} slot source(s)",
            configs.len(),
            files.iter().filter(|f| f.current.is_some()).count(),
            slots.len()
        ));

        Some(Self {
            root: root.to_path_buf(),
            dialect,
            files,
            configs,
            record: RenameRecord::default(),
            pruned: Vec::new(),
            log: RunLog::new(),
        })
    }

    /// Re-emits every configuration through the document serializer.
    fn canonicalize(&mut self) {
        self.log.enter_phase("canonicalize");
        for config in &mut self.configs {
            let doc = parse_with(&config.text.normalized(), self.dialect);
            let serialized = serialize_with(&doc, self.dialect);
            let line_ending = config.text.line_ending;
            config.text = ConfigText::parse(&serialized);
            config.text.line_ending = line_ending;
            config.doc = doc;
        }
    }

    fn save(&mut self) {
        self.log.enter_phase("save");
        for config in &self.configs {
            self.log.set_file(config.name());
            match config.save() {
                Ok(()) => self.log.info("written"),
                Err(e) => self
                    .log
                    .error(Incident::FilesystemFailure, format!("cannot write: {e}")),
            }
        }
        self.log.clear_file();
    }
}
