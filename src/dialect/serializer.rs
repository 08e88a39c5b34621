// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dialect serializer.
//!
//! ```text
//! preamble lines
//! <blank>
//! [Section]
//! key = value               Scalar
//! key = a / key = b         Multi, stored order
//! ; comment                 Annotated comments, as captured
//! drawindexed = 6, 0, 0     skipped if the value was already written
//! if $swap == 1             inert lines, in place
//! <blank>                   exactly one between sections
//! ```

use std::collections::HashSet;

use super::Dialect;
use super::document::{Document, Section, SectionLine, Value};

/// Serializes a document with the default dialect names.
#[must_use]
pub fn serialize(doc: &Document) -> String {
    serialize_with(doc, &Dialect::default())
}

/// Serializes a document; output always ends with a single newline.
#[must_use]
pub fn serialize_with(doc: &Document, dialect: &Dialect) -> String {
    let mut blocks: Vec<String> = Vec::with_capacity(doc.len() + 1);

    if !doc.preamble.is_empty() {
        blocks.push(doc.preamble.join("\n"));
    }
    for (name, section) in doc.sections() {
        blocks.push(section_block(name, section, dialect));
    }

    if blocks.is_empty() {
        return String::new();
    }
    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

fn section_block(name: &str, section: &Section, dialect: &Dialect) -> String {
    let mut lines = vec![format!("[{name}]")];
    let mut written_values: HashSet<&str> = HashSet::new();
    let mut written_disabled: HashSet<&str> = HashSet::new();

    for line in section.lines() {
        let (key, value) = match line {
            SectionLine::Inert(raw) => {
                lines.push(raw.to_string());
                continue;
            }
            SectionLine::Entry { key, value } => (key, value),
        };
        match value {
            Value::Scalar(text) => lines.push(format!("{key} = {text}")),
            Value::Bare => lines.push(key.to_string()),
            Value::Annotated(annotated) => {
                let primary = dialect.is_primary(key);
                let fresh = match &annotated.disabled {
                    Some(raw) => !primary || written_disabled.insert(raw.as_str()),
                    None => !primary || written_values.insert(annotated.value.as_str()),
                };
                if !fresh {
                    continue;
                }
                lines.extend(annotated.comments.iter().cloned());
                lines.push(match &annotated.disabled {
                    Some(raw) => raw.clone(),
                    None => format!("{key} = {}", annotated.value),
                });
            }
            Value::Multi(nested) => lines.extend(
                nested
                    .iter()
                    .filter_map(Value::text)
                    .map(|inner| format!("{key} = {inner}")),
            ),
        }
    }
    lines.join("\n")
}
