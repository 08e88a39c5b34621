// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Slot assignment and resolution.
//!
//! ```text
//! SlotSpec "Body/A:ib=ib0.assets"  ─┐
//! assignments.json                 ─┼─> SlotAssignment
//!                                   │   (component, kind, variant) -> path
//!                                   v
//! resolve(schema, assignment, asset) -> [ResolvedSlot]
//!     shared          Astra + Body + Position   = AstraBodyPosition
//!     variant IB      Astra + Body + A          = AstraBodyA
//!     variant other   Astra + Body + A + Diffuse
//! ```

pub mod resolver;
pub mod spec;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use crate::schema::SlotKind;

pub use resolver::{ResolvedSlot, resolve};
pub use spec::{AssignmentFile, SlotSpec, load_assignment_file};

/// Address of one slot in a schema.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey {
    pub component: usize,
    pub kind: SlotKind,
    /// `None` for shared slots.
    pub variant: Option<String>,
}

impl SlotKey {
    #[must_use]
    pub const fn shared(component: usize, kind: SlotKind) -> Self {
        Self {
            component,
            kind,
            variant: None,
        }
    }

    #[must_use]
    pub fn variant(component: usize, kind: SlotKind, label: impl Into<String>) -> Self {
        Self {
            component,
            kind,
            variant: Some(label.into()),
        }
    }
}

/// User-chosen source file per slot.
///
/// Reset whenever a new schema is loaded; consumed once by export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotAssignment {
    slots: BTreeMap<SlotKey, String>,
}

impl SlotAssignment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `path` to `key`, returning the previous path.
    ///
    /// A blank path clears the slot.
    pub fn assign(&mut self, key: SlotKey, path: impl Into<String>) -> Option<String> {
        let path = path.into();
        let path = path.trim();
        if path.is_empty() {
            return self.slots.remove(&key);
        }
        self.slots.insert(key, path.to_string())
    }

    pub fn clear(&mut self, key: &SlotKey) -> Option<String> {
        self.slots.remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &SlotKey) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SlotKey, &str)> {
        self.slots.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Drops every assignment.
    pub fn reset(&mut self) {
        self.slots.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
