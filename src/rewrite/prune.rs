// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Phase 7: structural pruning of resource sections.
//!
//! ```text
//! rule               matches                                  references
//! NO_FILENAME        resource section without `filename`      removed
//! FORMAT_NOT_INDEX   declares `format`, filename not .ib      removed
//! STREAM_VARIANT     filename <shared stream stem>.<label>.*  kept
//! EXCLUDED_SUFFIX    [Resource...CS]                          removed
//! ```
//!
//! Header lines of other sections are never deleted as references.

use bitflags::bitflags;

use super::Workspace;
use crate::dialect::text::{contains_identifier, header_name, section_ranges};
use crate::dialect::{Dialect, Section, has_extension};
use crate::error::Incident;
use crate::utility::fs::relpath::base_name;
use crate::utility::fs::unique::split_file_name;

bitflags! {
    /// Pruning rules a resource section matched.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PruneRule: u8 {
        /// No `filename` key in the body.
        const NO_FILENAME = 0x01;
        /// `format` declared on something that is not an index buffer.
        const FORMAT_NOT_INDEX = 0x02;
        /// Per-variant copy of a shared vertex stream.
        const STREAM_VARIANT = 0x04;
        /// Name ends with the excluded two-letter suffix.
        const EXCLUDED_SUFFIX = 0x08;
    }
}

impl PruneRule {
    /// Rules whose sections also lose every line referencing them.
    pub const REMOVES_REFERENCES: Self = Self::NO_FILENAME
        .union(Self::FORMAT_NOT_INDEX)
        .union(Self::EXCLUDED_SUFFIX);

    /// Comma-separated rule names for logs.
    #[must_use]
    pub fn describe(self) -> String {
        self.iter_names()
            .map(|(name, _)| name.to_ascii_lowercase())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Classifies one section. `section` is `None` for sections the
    /// parser filtered out (structured buffers); only the name rule
    /// applies to them.
    #[must_use]
    pub fn classify(
        name: &str,
        section: Option<&Section>,
        dialect: &Dialect,
        shared_stems: &[String],
    ) -> Self {
        let mut rules = Self::empty();
        if !dialect.is_resource(name) {
            return rules;
        }
        if name.len() > dialect.resource_prefix.len() && name.ends_with(&dialect.excluded_suffix) {
            rules |= Self::EXCLUDED_SUFFIX;
        }

        let Some(section) = section else {
            return rules;
        };
        let Some(filename) = section.text("filename") else {
            return rules | Self::NO_FILENAME;
        };

        let base = base_name(filename);
        if section.get_ignore_case("format").is_some()
            && !has_extension(base, &dialect.index_extension)
        {
            rules |= Self::FORMAT_NOT_INDEX;
        }

        let (stem, _) = split_file_name(base);
        let is_variant = shared_stems.iter().any(|shared| {
            stem.strip_prefix(shared.as_str())
                .and_then(|rest| rest.strip_prefix('.'))
                .is_some_and(|label| !label.is_empty())
        });
        if is_variant {
            rules |= Self::STREAM_VARIANT;
        }
        rules
    }
}

impl Workspace<'_> {
    /// Final stems of moved shared vertex-stream files.
    fn shared_stream_stems(&self) -> Vec<String> {
        self.files
            .iter()
            .filter(|f| f.slot.kind.is_vertex_stream() && f.slot.variant.is_none())
            .filter_map(|f| f.final_name.as_deref())
            .map(|name| split_file_name(name).0.to_string())
            .collect()
    }

    /// Phase 7: deletes invalid resource sections and, for most rules, the
    /// lines that still reference them.
    pub(super) fn prune(&mut self) {
        self.log.enter_phase("prune");
        let shared_stems = self.shared_stream_stems();

        for config in &mut self.configs {
            self.log.set_file(config.name());
            config.reparse(self.dialect);

            let ranges = section_ranges(&config.text.lines);
            let mut doomed: Vec<usize> = Vec::new();
            let mut dangling: Vec<String> = Vec::new();
            let mut removed: Vec<String> = Vec::new();

            for range in &ranges {
                let rules = PruneRule::classify(
                    &range.name,
                    config.doc.section(&range.name),
                    self.dialect,
                    &shared_stems,
                );
                if rules.is_empty() {
                    continue;
                }

                doomed.push(range.header);
                doomed.extend(range.body.clone());
                if removed.contains(&range.name) {
                    continue;
                }
                if rules.bits().count_ones() > 1 {
                    self.log.warn(
                        Incident::StructuralAmbiguity,
                        format!(
                            "[{}] matches several pruning rules ({})",
                            range.name,
                            rules.describe()
                        ),
                    );
                }
                if rules.intersects(PruneRule::REMOVES_REFERENCES) {
                    dangling.push(range.name.clone());
                }
                self.log
                    .info(format!("removed [{}] ({})", range.name, rules.describe()));
                removed.push(range.name.clone());
            }

            if removed.is_empty() {
                continue;
            }

            let mut references = 0usize;
            for (idx, line) in config.text.lines.iter().enumerate() {
                if header_name(line).is_some() || doomed.contains(&idx) {
                    continue;
                }
                if dangling.iter().any(|name| contains_identifier(line, name)) {
                    doomed.push(idx);
                    references += 1;
                }
            }
            if references > 0 {
                self.log
                    .info(format!("removed {references} dangling reference line(s)"));
            }

            doomed.sort_unstable();
            doomed.dedup();
            config.text.remove_lines(&doomed);
            while config.text.lines.last().is_some_and(|l| l.trim().is_empty()) {
                config.text.lines.pop();
            }
            for name in &removed {
                config.doc.remove_section(name);
            }
            self.pruned.extend(removed);
        }
        self.log.clear_file();
    }
}
