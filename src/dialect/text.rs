// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Line-level helpers shared by the parser and the rewrite engine.
//!
//! ```text
//! ConfigText        lines + line ending + trailing newline, lossless
//! header_name()     "[Name]"           -> Some("Name")
//! split_key_value() "key = value"      -> Some(("key", "value"))
//! value_start()     byte offset of the value side of a line
//! replace_value()   swap the value, keep key and spacing
//! section_ranges()  header index + body range per section
//! Conditional       if / elif / else if / else / endif
//! *_identifier()    matching bounded by [A-Za-z0-9_]
//! ```

use std::fmt;
use std::ops::Range;

/// Line terminator detected in a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }

    /// Detects the terminator of the first line break in `text`.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(idx) if idx > 0 && text.as_bytes()[idx - 1] == b'\r' => Self::CrLf,
            _ => Self::Lf,
        }
    }
}

/// Configuration text held as lines so edits never disturb other lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigText {
    pub lines: Vec<String>,
    pub line_ending: LineEnding,
    pub trailing_newline: bool,
}

impl ConfigText {
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
            line_ending: LineEnding::detect(text),
            trailing_newline: text.ends_with('\n'),
        }
    }

    /// Joins the lines with `\n` regardless of the original line ending.
    #[must_use]
    pub fn normalized(&self) -> String {
        let mut out = self.lines.join("\n");
        if self.trailing_newline && !self.lines.is_empty() {
            out.push('\n');
        }
        out
    }

    /// Indices of the lines that are section headers.
    #[must_use]
    pub fn header_indices(&self) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| header_name(line).is_some())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Removes every line whose index is in `indices` (must be sorted).
    pub fn remove_lines(&mut self, indices: &[usize]) {
        let mut cursor = 0;
        let mut idx = 0;
        self.lines.retain(|_| {
            let keep = indices.get(cursor) != Some(&idx);
            if !keep {
                cursor += 1;
            }
            idx += 1;
            keep
        });
    }
}

impl fmt::Display for ConfigText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ending = self.line_ending.as_str();
        for (idx, line) in self.lines.iter().enumerate() {
            if idx > 0 {
                f.write_str(ending)?;
            }
            f.write_str(line)?;
        }
        if self.trailing_newline && !self.lines.is_empty() {
            f.write_str(ending)?;
        }
        Ok(())
    }
}

/// Section name of a `[Name]` header line.
#[must_use]
pub fn header_name(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .map(str::trim)
}

/// True for `;` and `#` comment lines.
#[must_use]
pub fn is_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with(';') || trimmed.starts_with('#')
}

/// Comment body with markers and surrounding blanks removed.
#[must_use]
pub fn comment_body(line: &str) -> &str {
    line.trim()
        .trim_start_matches([';', '#', ' ', '\t'])
        .trim_end()
}

/// Splits `key = value` at the first `=`, trimming both sides.
#[must_use]
pub fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

/// Byte offset just past the first `=` of a line.
#[must_use]
pub fn value_start(line: &str) -> Option<usize> {
    line.find('=').map(|idx| idx + 1)
}

/// Replaces the value side of a `key = value` line, keeping the key and
/// the blanks around the value.
#[must_use]
pub fn replace_value(line: &str, new_value: &str) -> String {
    let Some(start) = value_start(line) else {
        return line.to_string();
    };
    let (head, rest) = line.split_at(start);
    if rest.trim().is_empty() {
        return format!("{head}{rest}{new_value}");
    }
    let lead = &rest[..rest.len() - rest.trim_start().len()];
    let trail = &rest[rest.trim_end().len()..];
    format!("{head}{lead}{new_value}{trail}")
}

/// Key of a `key = value` line (trimmed), ignoring comment lines.
#[must_use]
pub fn line_key(line: &str) -> Option<&str> {
    if is_comment(line) {
        return None;
    }
    split_key_value(line).map(|(key, _)| key)
}

/// Position of a section inside a line list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRange {
    pub name: String,
    pub header: usize,
    /// Lines after the header up to the next header.
    pub body: Range<usize>,
}

/// Locates every section of `lines` in order.
#[must_use]
pub fn section_ranges(lines: &[String]) -> Vec<SectionRange> {
    let mut ranges: Vec<SectionRange> = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        if let Some(name) = header_name(line) {
            if let Some(prev) = ranges.last_mut() {
                prev.body.end = idx;
            }
            ranges.push(SectionRange {
                name: name.to_string(),
                header: idx,
                body: idx + 1..lines.len(),
            });
        }
    }
    ranges
}

/// Conditional block keyword at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conditional {
    If,
    ElseIf,
    Else,
    EndIf,
}

impl Conditional {
    /// Classifies a line by its leading word.
    #[must_use]
    pub fn detect(line: &str) -> Option<Self> {
        let trimmed = line.trim_start();
        let word_len = trimmed
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(trimmed.len());
        let (word, rest) = trimmed.split_at(word_len);
        if rest.starts_with(is_identifier_char) {
            return None;
        }

        match word.to_ascii_lowercase().as_str() {
            "if" => Some(Self::If),
            "elif" => Some(Self::ElseIf),
            "else" => {
                let next = rest.trim_start();
                let is_else_if = next
                    .get(..2)
                    .is_some_and(|w| w.eq_ignore_ascii_case("if"))
                    && !next[2..].starts_with(is_identifier_char);
                Some(if is_else_if { Self::ElseIf } else { Self::Else })
            }
            "endif" => Some(Self::EndIf),
            _ => None,
        }
    }

    #[must_use]
    pub const fn opens_branch(self) -> bool {
        !matches!(self, Self::EndIf)
    }
}

/// True for characters that continue an identifier.
#[must_use]
pub const fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Byte offsets of `needle` in `haystack` not embedded in a longer identifier.
#[must_use]
pub fn find_identifier(haystack: &str, needle: &str) -> Vec<usize> {
    if needle.is_empty() {
        return Vec::new();
    }
    haystack
        .match_indices(needle)
        .filter(|(idx, _)| {
            let before = haystack[..*idx].chars().next_back();
            let after = haystack[idx + needle.len()..].chars().next();
            !before.is_some_and(is_identifier_char) && !after.is_some_and(is_identifier_char)
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// Number of bounded occurrences of `needle` in `haystack`.
#[must_use]
pub fn count_identifier(haystack: &str, needle: &str) -> usize {
    find_identifier(haystack, needle).len()
}

/// True if `haystack` contains `needle` as a bounded identifier.
#[must_use]
pub fn contains_identifier(haystack: &str, needle: &str) -> bool {
    !find_identifier(haystack, needle).is_empty()
}

/// Replaces bounded occurrences of `needle`, returning the new text and count.
#[must_use]
pub fn replace_identifier(haystack: &str, needle: &str, replacement: &str) -> (String, usize) {
    let hits = find_identifier(haystack, needle);
    if hits.is_empty() {
        return (haystack.to_string(), 0);
    }

    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;
    for idx in &hits {
        out.push_str(&haystack[last..*idx]);
        out.push_str(replacement);
        last = idx + needle.len();
    }
    out.push_str(&haystack[last..]);
    (out, hits.len())
}
