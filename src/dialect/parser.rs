// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dialect parser.
//!
//! ```text
//! line kind          action
//! ----------------   ------------------------------------------------
//! blank              drop pending comments
//! [Name]             flush section (structured-buffer filter), reset
//! if/elif/else       pending comments -> block comments, depth += 1 on if,
//!                    line kept in place (inert)
//! endif              depth -= 1, at depth 0 drop block + pending, kept
//! ;primary = v       disabled Annotated occurrence, takes pending
//! ; other            pending comment (raw)
//! primary = v        Annotated, takes block + pending
//! key = v            Scalar, repeats merge into Multi
//! anything else      Bare (inert, re-emitted verbatim)
//! ```
//!
//! Parsing is total: no input makes it fail.

use super::Dialect;
use super::document::{Annotated, Document, Section, Value};
use super::text::{Conditional, comment_body, header_name, is_comment, split_key_value};

/// Parses dialect text with the default dialect names.
#[must_use]
pub fn parse(text: &str) -> Document {
    parse_with(text, &Dialect::default())
}

/// Parses dialect text using the names configured in `dialect`.
#[must_use]
pub fn parse_with(text: &str, dialect: &Dialect) -> Document {
    let mut parser = Parser::new(dialect);
    for line in text.lines() {
        parser.line(line);
    }
    parser.finish()
}

struct Parser<'d> {
    dialect: &'d Dialect,
    doc: Document,
    current: Option<(String, Section)>,
    pending: Vec<String>,
    block_comments: Vec<String>,
    depth: usize,
}

impl<'d> Parser<'d> {
    fn new(dialect: &'d Dialect) -> Self {
        Self {
            dialect,
            doc: Document::new(),
            current: None,
            pending: Vec::new(),
            block_comments: Vec::new(),
            depth: 0,
        }
    }

    fn line(&mut self, raw: &str) {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            self.pending.clear();
            return;
        }

        if let Some(name) = header_name(trimmed) {
            self.flush();
            self.current = Some((name.to_string(), Section::new()));
            self.pending.clear();
            self.block_comments.clear();
            self.depth = 0;
            return;
        }

        let Some((_, section)) = self.current.as_mut() else {
            self.doc.preamble.push(raw.trim_end().to_string());
            return;
        };

        if let Some(cond) = Conditional::detect(trimmed) {
            if cond.opens_branch() {
                if cond == Conditional::If {
                    self.depth += 1;
                }
                if !self.pending.is_empty() {
                    self.block_comments = std::mem::take(&mut self.pending);
                }
            } else {
                self.depth = self.depth.saturating_sub(1);
                if self.depth == 0 {
                    self.block_comments.clear();
                }
                self.pending.clear();
            }
            section.push_inert(raw.trim_end());
            return;
        }

        if is_comment(trimmed) {
            match split_key_value(comment_body(trimmed)) {
                Some((key, value)) if self.dialect.is_primary(key) => {
                    let comments = std::mem::take(&mut self.pending);
                    let key = primary_key(section, key);
                    section.push(
                        key,
                        Value::Annotated(Annotated::disabled(value, comments, raw.trim_end())),
                    );
                }
                _ => self.pending.push(raw.trim_end().to_string()),
            }
            return;
        }

        match split_key_value(trimmed) {
            Some((key, value)) if self.dialect.is_primary(key) => {
                let mut comments: Vec<String> = Vec::new();
                if self.depth > 0 {
                    comments.extend(self.block_comments.drain(..));
                }
                for comment in self.pending.drain(..) {
                    if !comments.contains(&comment) {
                        comments.push(comment);
                    }
                }
                let key = primary_key(section, key);
                section.push(key, Value::Annotated(Annotated::new(value, comments)));
            }
            Some((key, value)) => {
                section.push(key, Value::Scalar(value.to_string()));
                self.pending.clear();
            }
            None => {
                section.push(trimmed, Value::Bare);
                self.pending.clear();
            }
        }
    }

    fn flush(&mut self) {
        if let Some((name, section)) = self.current.take() {
            if self.is_structured_buffer(&name, &section) {
                tracing::trace!(section = %name, "skipping structured buffer resource");
            } else {
                self.doc.insert_section(name, section);
            }
        }
    }

    fn is_structured_buffer(&self, name: &str, section: &Section) -> bool {
        self.dialect.is_resource(name)
            && section
                .text("type")
                .is_some_and(|t| t.eq_ignore_ascii_case("StructuredBuffer"))
    }

    fn finish(mut self) -> Document {
        self.flush();
        self.doc
    }
}

/// Spelling of the primary key already used in `section`, so enabled and
/// disabled occurrences with different casing share one entry.
fn primary_key(section: &Section, key: &str) -> String {
    section.existing_key(key).unwrap_or(key).to_string()
}
