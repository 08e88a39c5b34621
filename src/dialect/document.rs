// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory document model.
//!
//! ```text
//! Document
//! ├── preamble: lines before the first header, verbatim
//! └── sections: IndexMap<name, Section>   (first-occurrence order)
//!       ├── entries: IndexMap<key, Value>
//!       │     Scalar("v")                 key = v
//!       │     Annotated { value, comments, disabled }
//!       │     Bare                        inert line, key is the raw text
//!       │     Multi([..])                 repeated key, arrival order
//!       └── layout: [Entry(key) | Inert(raw)]
//!             source order of occurrences and of conditional lines
//! ```

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;

/// One occurrence of the primary directive with its attached comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotated {
    pub value: String,
    /// Comment lines exactly as captured, in source order.
    pub comments: Vec<String>,
    /// Raw comment line when this occurrence was commented out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<String>,
}

impl Annotated {
    #[must_use]
    pub fn new(value: impl Into<String>, comments: Vec<String>) -> Self {
        Self {
            value: value.into(),
            comments,
            disabled: None,
        }
    }

    #[must_use]
    pub fn disabled(
        value: impl Into<String>,
        comments: Vec<String>,
        raw: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            comments,
            disabled: Some(raw.into()),
        }
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled.is_some()
    }
}

/// Value stored under one key of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Value {
    Scalar(String),
    Annotated(Annotated),
    /// A line without `=`; the key holds the raw text.
    Bare,
    Multi(Vec<Self>),
}

impl Value {
    /// Appends another occurrence, turning `self` into `Multi` if needed.
    pub fn push(&mut self, next: Self) {
        match self {
            Self::Multi(items) => items.push(next),
            single => {
                let first = std::mem::replace(single, Self::Bare);
                *single = Self::Multi(vec![first, next]);
            }
        }
    }

    /// Individual occurrences in arrival order.
    #[must_use]
    pub fn occurrences(&self) -> &[Self] {
        match self {
            Self::Multi(items) => items,
            single => std::slice::from_ref(single),
        }
    }

    /// Text of this single occurrence (`None` for `Bare` and `Multi`).
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Scalar(text) => Some(text),
            Self::Annotated(annotated) => Some(&annotated.value),
            Self::Bare | Self::Multi(_) => None,
        }
    }

    /// Texts of all enabled occurrences in arrival order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.occurrences()
            .iter()
            .filter(|v| !matches!(v, Self::Annotated(a) if a.is_disabled()))
            .filter_map(Self::text)
            .collect()
    }

    /// Text of the first enabled occurrence.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.texts().into_iter().next()
    }

    #[must_use]
    pub const fn is_multi(&self) -> bool {
        matches!(self, Self::Multi(_))
    }
}

/// Position of one line in a section body.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LayoutLine {
    /// The next occurrence of this key.
    Entry(String),
    /// A line kept verbatim without a key, such as `if $swap == 1`.
    Inert(String),
}

/// One line of a section in source order, as returned by
/// [`Section::lines`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionLine<'a> {
    Entry { key: &'a str, value: &'a Value },
    Inert(&'a str),
}

/// Ordered, duplicate-tolerant key/value body of one section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Section {
    entries: IndexMap<String, Value>,
    #[serde(skip)]
    layout: Vec<LayoutLine>,
}

impl Section {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an occurrence of `key`, merging repeats into `Multi`.
    pub fn push(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        self.layout.push(LayoutLine::Entry(key.clone()));
        match self.entries.get_mut(&key) {
            Some(existing) => existing.push(value),
            None => {
                self.entries.insert(key, value);
            }
        }
    }

    /// Adds a line that belongs to no key (conditional block markers).
    pub fn push_inert(&mut self, raw: impl Into<String>) {
        self.layout.push(LayoutLine::Inert(raw.into()));
    }

    /// Replaces the value of `key`, keeping its position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        if !self.entries.contains_key(&key) {
            self.layout.push(LayoutLine::Entry(key.clone()));
        }
        self.entries.insert(key, value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.layout
            .retain(|line| !matches!(line, LayoutLine::Entry(k) if k == key));
        self.entries.shift_remove(key)
    }

    /// Inert lines in source order.
    pub fn inert_lines(&self) -> impl Iterator<Item = &str> {
        self.layout.iter().filter_map(|line| match line {
            LayoutLine::Inert(raw) => Some(raw.as_str()),
            LayoutLine::Entry(_) => None,
        })
    }

    /// Every occurrence and inert line in source order.
    ///
    /// When a value holds more occurrences than the layout has slots for
    /// its key (after [`insert`](Self::insert)), the extra occurrences
    /// follow the key's last slot; surplus slots emit nothing.
    #[must_use]
    pub fn lines(&self) -> Vec<SectionLine<'_>> {
        let mut slots: HashMap<&str, usize> = HashMap::new();
        for line in &self.layout {
            if let LayoutLine::Entry(key) = line {
                *slots.entry(key.as_str()).or_default() += 1;
            }
        }

        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut out = Vec::with_capacity(self.layout.len());
        for line in &self.layout {
            let key = match line {
                LayoutLine::Inert(raw) => {
                    out.push(SectionLine::Inert(raw));
                    continue;
                }
                LayoutLine::Entry(key) => key.as_str(),
            };
            let Some((key, value)) = self.entries.get_key_value(key) else {
                continue;
            };
            let occurrences = value.occurrences();
            let index = seen.entry(key.as_str()).or_default();
            let last_slot = *index + 1 == slots.get(key.as_str()).copied().unwrap_or(1);
            let taken: &[Value] = if last_slot {
                occurrences.get(*index..).unwrap_or_default()
            } else {
                occurrences.get(*index..=*index).unwrap_or_default()
            };
            *index += 1;
            out.extend(taken.iter().map(|value| SectionLine::Entry { key, value }));
        }
        out
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Case-insensitive lookup.
    #[must_use]
    pub fn get_ignore_case(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    /// First enabled text of `key` (case-insensitive).
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get_ignore_case(key).and_then(Value::first_text)
    }

    /// Key already used for a case-insensitive match of `key`.
    #[must_use]
    pub fn existing_key(&self, key: &str) -> Option<&str> {
        self.entries
            .keys()
            .find(|k| k.eq_ignore_ascii_case(key))
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parsed configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Lines before the first section header, verbatim.
    pub preamble: Vec<String>,
    sections: IndexMap<String, Section>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a section. A redeclared name replaces the body but keeps
    /// the position of its first declaration.
    pub fn insert_section(&mut self, name: impl Into<String>, section: Section) {
        self.sections.insert(name.into(), section);
    }

    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        self.sections.shift_remove(name)
    }

    /// Renames a section in place.
    ///
    /// Returns `false` if `old` is missing or `new` is already taken.
    pub fn rename_section(&mut self, old: &str, new: &str) -> bool {
        if old == new {
            return self.sections.contains_key(old);
        }
        if self.sections.contains_key(new) {
            return false;
        }
        let Some((index, _, section)) = self.sections.shift_remove_full(old) else {
            return false;
        };
        self.sections.shift_insert(index, new.to_string(), section);
        true
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.get_mut(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
