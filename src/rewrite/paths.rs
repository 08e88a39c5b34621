// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Phase 3: `filename = <path>` patching.
//!
//! ```text
//! filename = sub\vb0.assets        exact path (either slash style)
//! filename = ../sub/vb0.assets     path joined to the config's old dir
//! filename = vb0.assets            basename fallback
//!            -> vb0.buf            current root-relative name
//! filename = textures/d.dds        unmatched, config moved from sub/
//!            -> sub/textures/d.dds rebased
//! ```

use super::Workspace;
use crate::dialect::text::{is_comment, replace_value, split_key_value};
use crate::error::Incident;
use crate::utility::fs::relpath::{base_name, join_relative, normalize_slashes};

const FILENAME_KEY: &str = "filename";

pub(super) struct PathTarget {
    pub(super) original_rel: String,
    pub(super) original_name: String,
    pub(super) new_name: String,
}

#[derive(Debug, PartialEq, Eq)]
pub(super) enum PathMatch {
    Target { index: usize, ambiguous: bool },
    Rebased(String),
}

/// True for paths that are relative to the configuration file.
fn is_relative(path: &str) -> bool {
    !(path.starts_with('/')
        || path.starts_with('\\')
        || path.starts_with('$')
        || path.contains(':'))
}

pub(super) fn match_reference(
    value: &str,
    config_dir: &str,
    rebase: bool,
    targets: &[PathTarget],
) -> Option<PathMatch> {
    let raw = normalize_slashes(value);
    if raw.is_empty() {
        return None;
    }
    let joined = join_relative(config_dir, &raw);

    if let Some(index) = targets.iter().position(|t| {
        t.original_rel.eq_ignore_ascii_case(&raw) || t.original_rel.eq_ignore_ascii_case(&joined)
    }) {
        return Some(PathMatch::Target {
            index,
            ambiguous: false,
        });
    }

    let name = base_name(&raw);
    let mut hits = targets
        .iter()
        .enumerate()
        .filter(|(_, t)| t.original_name.eq_ignore_ascii_case(name));
    if let Some((index, _)) = hits.next() {
        return Some(PathMatch::Target {
            index,
            ambiguous: hits.next().is_some(),
        });
    }

    if rebase && is_relative(value.trim()) && joined != raw {
        let rebased = if value.contains('\\') {
            joined.replace('/', "\\")
        } else {
            joined
        };
        return Some(PathMatch::Rebased(rebased));
    }
    None
}

impl Workspace<'_> {
    /// Phase 3: points every `filename` line at the current name of the
    /// file it referenced before flattening.
    pub(super) fn patch_paths(&mut self) {
        self.log.enter_phase("paths");
        let targets: Vec<PathTarget> = self
            .files
            .iter()
            .filter_map(|f| {
                Some(PathTarget {
                    original_rel: f.original_rel.clone(),
                    original_name: f.original_name.clone(),
                    new_name: f.current_name()?,
                })
            })
            .collect();

        for config in &mut self.configs {
            self.log.set_file(config.name());
            let moved = !config.original_dir.is_empty()
                && config.path.parent() == Some(self.root.as_path());
            let mut patched = 0usize;

            for line in &mut config.text.lines {
                if is_comment(line) {
                    continue;
                }
                let Some((key, value)) = split_key_value(line) else {
                    continue;
                };
                if !key.eq_ignore_ascii_case(FILENAME_KEY) {
                    continue;
                }
                let value = value.to_string();

                let found = match_reference(&value, &config.original_dir, moved, &targets);
                let new_value = match found {
                    Some(PathMatch::Target { index, ambiguous }) => {
                        let target = &targets[index];
                        if ambiguous {
                            self.log.warn(
                                Incident::StructuralAmbiguity,
                                format!(
                                    "{value} matches several slot files by name, using {}",
                                    target.original_rel
                                ),
                            );
                        }
                        target.new_name.clone()
                    }
                    Some(PathMatch::Rebased(path)) => path,
                    None => continue,
                };

                if new_value != value {
                    *line = replace_value(line, &new_value);
                    patched += 1;
                }
            }

            if patched > 0 {
                self.log
                    .info(format!("patched {patched} filename reference(s)"));
            }
        }
        self.log.clear_file();
    }
}
