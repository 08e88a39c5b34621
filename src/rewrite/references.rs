// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reference substitution (5) and resource-section rename (6).
//!
//! ```text
//! TokenMap:  needle -> __slotmod_<uuid>__ -> replacement
//!            (all needles first, then all tokens, so one replacement can
//!             never be rewritten again by a later needle)
//!
//! phase 5   value side only      vb0.buf -> AstraBodyPosition.buf
//!                                vb0     -> AstraBodyPosition
//! phase 6   whole line           ResourceVb0 -> ResourceAstraBodyPosition
//!           [ResourceVb0]        header rewritten in place
//! ```

use std::collections::HashSet;

use uuid::Uuid;

use super::Workspace;
use crate::dialect::text::{header_name, replace_identifier, value_start};
use crate::error::Incident;
use crate::utility::fs::relpath::base_name;
use crate::utility::fs::unique::split_file_name;

/// Two-step replacement through unique placeholder tokens.
#[derive(Debug, Default)]
pub(super) struct TokenMap {
    entries: Vec<TokenEntry>,
}

#[derive(Debug)]
struct TokenEntry {
    needle: String,
    token: String,
    replacement: String,
}

impl TokenMap {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Registers a replacement. Empty, identity and repeated needles are
    /// ignored; returns whether the pair was added.
    pub(super) fn add(
        &mut self,
        needle: impl Into<String>,
        replacement: impl Into<String>,
    ) -> bool {
        let needle = needle.into();
        let replacement = replacement.into();
        if needle.is_empty()
            || needle == replacement
            || self.entries.iter().any(|e| e.needle == needle)
        {
            return false;
        }
        self.entries.push(TokenEntry {
            needle,
            token: format!("__slotmod_{}__", Uuid::new_v4().simple()),
            replacement,
        });
        true
    }

    /// Applies every pair to `text`, returning the result and the number of
    /// matches per pair in registration order.
    pub(super) fn apply(&self, text: &str) -> (String, Vec<usize>) {
        let mut out = text.to_string();
        let mut counts = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let (next, hits) = replace_identifier(&out, &entry.needle, &entry.token);
            out = next;
            counts.push(hits);
        }
        for entry in &self.entries {
            if out.contains(&entry.token) {
                out = out.replace(&entry.token, &entry.replacement);
            }
        }
        (out, counts)
    }
}

/// Moved file names used by phases 5 and 6.
struct MovedName {
    owner: usize,
    staged: String,
    original: String,
    final_name: String,
}

impl Workspace<'_> {
    fn moved_names(&self) -> Vec<MovedName> {
        self.files
            .iter()
            .enumerate()
            .filter_map(|(owner, f)| {
                Some(MovedName {
                    owner,
                    staged: f.staged_name.clone()?,
                    original: f.original_name.clone(),
                    final_name: f.final_name.clone()?,
                })
            })
            .collect()
    }

    /// Phase 5: replaces old file names and stems with final ones on the
    /// value side of every `key = value` line.
    pub(super) fn substitute_references(&mut self) {
        self.log.enter_phase("references");
        let moved = self.moved_names();
        if moved.is_empty() {
            return;
        }

        // owners[i] is the tracked file behind the i-th pair of `map`
        let mut map = TokenMap::new();
        let mut owners: Vec<usize> = Vec::new();

        for name in &moved {
            if map.add(name.staged.as_str(), name.final_name.as_str()) {
                owners.push(name.owner);
            }
            if map.add(name.original.as_str(), name.final_name.as_str()) {
                owners.push(name.owner);
            }
        }
        for name in &moved {
            let (stem, _) = split_file_name(&name.staged);
            let unique = moved
                .iter()
                .filter(|other| split_file_name(&other.staged).0 == stem)
                .count()
                == 1;
            let (final_stem, _) = split_file_name(&name.final_name);
            if unique && map.add(stem, final_stem) {
                owners.push(name.owner);
            }
        }

        let mut hits_per_owner = vec![0usize; self.files.len()];
        for config in &mut self.configs {
            self.log.set_file(config.name());
            let mut changed = 0usize;
            for line in &mut config.text.lines {
                if header_name(line).is_some() {
                    continue;
                }
                let Some(start) = value_start(line) else {
                    continue;
                };
                let (replaced, counts) = map.apply(&line[start..]);
                let total: usize = counts.iter().sum();
                if total == 0 {
                    continue;
                }
                for (idx, count) in counts.into_iter().enumerate() {
                    hits_per_owner[owners[idx]] += count;
                }
                line.replace_range(start.., &replaced);
                changed += 1;
            }
            if changed > 0 {
                self.log.info(format!("updated {changed} line(s)"));
            }
        }
        self.log.clear_file();

        for name in &moved {
            if hits_per_owner[name.owner] == 0 {
                self.log.warn(
                    Incident::StructuralAmbiguity,
                    format!(
                        "no reference to {} found in any configuration file",
                        name.staged
                    ),
                );
            }
        }
    }

    /// Phase 6: renames resource sections that load a moved file after the
    /// file's final name, and every reference to them in the same file.
    pub(super) fn rename_sections(&mut self) {
        self.log.enter_phase("sections");
        let moved = self.moved_names();
        let prefix = self.dialect.resource_prefix.clone();
        let index_ext = self.dialect.index_extension.clone();

        for config in &mut self.configs {
            self.log.set_file(config.name());
            config.reparse(self.dialect);

            let mut taken: HashSet<String> = config
                .text
                .lines
                .iter()
                .filter_map(|line| header_name(line))
                .map(str::to_string)
                .collect();

            let mut renames: Vec<(String, String)> = Vec::new();
            for (name, section) in config.doc.sections() {
                if !self.dialect.is_resource(name) {
                    continue;
                }
                let Some(filename) = section.text("filename") else {
                    continue;
                };
                let base = base_name(filename);
                let Some(target) = moved
                    .iter()
                    .find(|m| m.final_name.eq_ignore_ascii_case(base))
                else {
                    continue;
                };

                let (stem, ext) = split_file_name(&target.final_name);
                let mut wanted = format!("{prefix}{stem}");
                if ext.is_some_and(|ext| ext.eq_ignore_ascii_case(&index_ext)) {
                    wanted.push_str("IB");
                }
                if wanted == name {
                    continue;
                }

                let mut new_name = wanted.clone();
                let mut n = 1;
                while taken.contains(&new_name) {
                    new_name = format!("{wanted}_{n}");
                    n += 1;
                }
                if new_name != wanted {
                    self.log.warn(
                        Incident::StructuralAmbiguity,
                        format!("section {wanted} already exists, renaming {name} to {new_name}"),
                    );
                }
                taken.insert(new_name.clone());
                renames.push((name.to_string(), new_name));
            }

            if renames.is_empty() {
                continue;
            }

            let mut map = TokenMap::new();
            for (old, new) in &renames {
                map.add(old.as_str(), new.as_str());
            }
            for line in &mut config.text.lines {
                match header_name(line) {
                    Some(header) => {
                        if let Some((old, new)) = renames.iter().find(|(old, _)| old == header) {
                            *line = replace_identifier(line, old, new).0;
                        }
                    }
                    None => {
                        let (replaced, counts) = map.apply(line);
                        if counts.iter().any(|c| *c > 0) {
                            *line = replaced;
                        }
                    }
                }
            }

            for (old, new) in renames {
                config.doc.rename_section(&old, &new);
                self.log.info(format!("[{old}] -> [{new}]"));
                self.record.sections.insert(old, new);
            }
        }
        self.log.clear_file();
    }
}
