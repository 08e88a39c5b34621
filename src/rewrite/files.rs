// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! File phases: flatten (1), extension normalization (2), two-phase rename (4).

use std::path::Path;

use uuid::Uuid;

use super::Workspace;
use crate::error::Incident;
use crate::logging::journal::RunLog;
use crate::utility::fs::relpath::{base_name, normalize_slashes};
use crate::utility::fs::unique::{join_file_name, move_unique, split_file_name, unique_path};

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Finds a slot source among the walked files (sorted slash paths).
///
/// An exact relative path wins; otherwise the first file with the same
/// name (ignoring ASCII case) is used.
pub(super) fn locate(all: &[String], source: &str, log: &mut RunLog) -> Option<String> {
    let wanted = normalize_slashes(source);
    if all.iter().any(|rel| *rel == wanted) {
        return Some(wanted);
    }

    let name = base_name(&wanted);
    let mut hits = all
        .iter()
        .filter(|rel| base_name(rel).eq_ignore_ascii_case(name));
    let first = hits.next()?.clone();
    let others = hits.count();
    if others > 0 {
        log.warn(
            Incident::StructuralAmbiguity,
            format!("{source} matches {} files, using {first}", others + 1),
        );
    }
    Some(first)
}

impl Workspace<'_> {
    /// Phase 1: moves matched files and configuration files from
    /// subdirectories to the root, suffixing on collision.
    pub(super) fn flatten(&mut self) {
        self.log.enter_phase("flatten");
        let root = self.root.clone();

        for file in &mut self.files {
            let Some(current) = file.current.as_deref() else {
                continue;
            };
            if current.parent() == Some(root.as_path()) {
                continue;
            }
            match move_unique(current, &root, &file.original_name) {
                Ok(target) => {
                    self.log.info(format!(
                        "{} -> {}",
                        file.original_rel,
                        file_name_of(&target)
                    ));
                    file.current = Some(target);
                }
                Err(e) => self.log.warn(
                    Incident::FilesystemFailure,
                    format!("could not move {}: {e}", file.original_rel),
                ),
            }
        }

        for config in &mut self.configs {
            if config.path.parent() == Some(root.as_path()) {
                continue;
            }
            let name = config.name();
            match move_unique(&config.path, &root, &name) {
                Ok(target) => {
                    self.log.info(format!(
                        "{}/{name} -> {}",
                        config.original_dir,
                        file_name_of(&target)
                    ));
                    config.path = target;
                }
                Err(e) => self.log.warn(
                    Incident::FilesystemFailure,
                    format!("could not move {}/{name}: {e}", config.original_dir),
                ),
            }
        }
    }

    /// Phase 2: placeholder extension -> index or stream extension.
    pub(super) fn normalize_extensions(&mut self) {
        self.log.enter_phase("normalize");
        let placeholder = self.dialect.placeholder_extension.as_str();

        for file in &mut self.files {
            let (Some(current), Some(name)) = (file.current.clone(), file.current_name()) else {
                continue;
            };
            let (stem, ext) = split_file_name(&name);
            if !ext.is_some_and(|ext| ext.eq_ignore_ascii_case(placeholder)) {
                continue;
            }

            let Some(target_ext) = self.dialect.buffer_extension(&file.slot.kind) else {
                self.log.info(format!(
                    "{name}: {} slot has no buffer extension, left unchanged",
                    file.slot.kind
                ));
                continue;
            };

            let dir = current.parent().unwrap_or(&self.root);
            let target = unique_path(dir, &join_file_name(stem, Some(target_ext)));
            match std::fs::rename(&current, &target) {
                Ok(()) => {
                    self.log
                        .info(format!("{name} -> {}", file_name_of(&target)));
                    file.current = Some(target);
                }
                Err(e) => self.log.warn(
                    Incident::FilesystemFailure,
                    format!("could not rename {name}: {e}"),
                ),
            }
        }
    }

    /// Phase 4: every matched file goes to a random token name first, then
    /// to its logical slot id. Missing files are skipped and their
    /// references stay unpatched.
    pub(super) fn rename_files(&mut self) {
        self.log.enter_phase("rename");
        let root = self.root.clone();
        let mut staged: Vec<usize> = Vec::with_capacity(self.files.len());

        for (idx, file) in self.files.iter_mut().enumerate() {
            let Some(current) = file.current.clone().filter(|p| p.is_file()) else {
                self.log.warn(
                    Incident::FileNotFound,
                    format!(
                        "{} for {} not found, references left unpatched",
                        file.slot.source, file.slot.logical_id
                    ),
                );
                file.current = None;
                continue;
            };

            let name = file_name_of(&current);
            let (_, ext) = split_file_name(&name);
            let temp = root.join(join_file_name(&Uuid::new_v4().simple().to_string(), ext));
            match std::fs::rename(&current, &temp) {
                Ok(()) => {
                    file.staged_name = Some(name);
                    file.current = Some(temp);
                    staged.push(idx);
                }
                Err(e) => self.log.warn(
                    Incident::FilesystemFailure,
                    format!("could not stage {name}: {e}"),
                ),
            }
        }

        for idx in staged {
            let file = &mut self.files[idx];
            let (Some(temp), Some(staged_name)) = (file.current.clone(), file.staged_name.clone())
            else {
                continue;
            };
            let (_, ext) = split_file_name(&staged_name);
            let wanted = join_file_name(&file.slot.logical_id, ext);
            let target = unique_path(&root, &wanted);

            match std::fs::rename(&temp, &target) {
                Ok(()) => {
                    let final_name = file_name_of(&target);
                    if final_name == wanted {
                        self.log.info(format!("{staged_name} -> {final_name}"));
                    } else {
                        self.log.info(format!(
                            "{staged_name} -> {final_name} ({wanted} already taken)"
                        ));
                    }
                    self.record
                        .files
                        .insert(file.slot.source.clone(), final_name.clone());
                    file.final_name = Some(final_name);
                    file.current = Some(target);
                }
                Err(e) => {
                    self.log.warn(
                        Incident::FilesystemFailure,
                        format!("could not rename {staged_name}: {e}"),
                    );
                    let restored = unique_path(&root, &staged_name);
                    if std::fs::rename(&temp, &restored).is_ok() {
                        file.current = Some(restored);
                    }
                    file.staged_name = None;
                }
            }
        }
    }
}
