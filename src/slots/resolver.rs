// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Slot resolver: pure mapping from assignments to logical slot ids.

use serde::Serialize;

use super::{SlotAssignment, SlotKey};
use crate::schema::{ComponentSchema, SlotKind};

/// A filled slot with its computed logical id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSlot {
    /// Target file stem, e.g. `AstraBodyPosition`.
    pub logical_id: String,
    /// Source file as assigned (path relative to the mod root, or a bare name).
    pub source: String,
    pub kind: SlotKind,
    pub component: String,
    pub variant: Option<String>,
}

/// Resolves every non-empty assignment in schema order.
///
/// Assignments whose key is not part of `schema` are ignored.
#[must_use]
pub fn resolve(
    schema: &[ComponentSchema],
    assignment: &SlotAssignment,
    asset_name: &str,
) -> Vec<ResolvedSlot> {
    let mut resolved = Vec::new();

    for (index, component) in schema.iter().enumerate() {
        for kind in component.shared.keys() {
            let key = SlotKey::shared(index, kind.clone());
            if let Some(source) = assignment.get(&key) {
                resolved.push(ResolvedSlot {
                    logical_id: format!("{asset_name}{}{}", component.name, kind.suffix()),
                    source: source.to_string(),
                    kind: kind.clone(),
                    component: component.name.clone(),
                    variant: None,
                });
            }
        }

        for variant in &component.variants {
            for kind in variant.slots.keys() {
                let key = SlotKey::variant(index, kind.clone(), variant.label.clone());
                let Some(source) = assignment.get(&key) else {
                    continue;
                };
                let logical_id = if kind.is_index_buffer() {
                    format!("{asset_name}{}{}", component.name, variant.label)
                } else {
                    format!(
                        "{asset_name}{}{}{}",
                        component.name,
                        variant.label,
                        kind.suffix()
                    )
                };
                resolved.push(ResolvedSlot {
                    logical_id,
                    source: source.to_string(),
                    kind: kind.clone(),
                    component: component.name.clone(),
                    variant: Some(variant.label.clone()),
                });
            }
        }
    }

    resolved
}
