// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Assignment input: `Component[/Variant]:slot=path` specs and JSON files.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;

use super::{SlotAssignment, SlotKey};
use crate::error::{ConfigError, Result};
use crate::schema::{AssetSchema, SlotKind};

/// One textual slot assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSpec {
    /// Component name or zero-based index.
    pub component: String,
    pub variant: Option<String>,
    pub kind: SlotKind,
    pub path: String,
}

impl SlotSpec {
    /// Resolves the spec against a schema into a [`SlotKey`].
    ///
    /// Stream slots are shared. Other slots go to the named variant, or to
    /// the only variant when the component has exactly one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the component, variant or
    /// slot does not exist in `schema`.
    pub fn key(&self, schema: &AssetSchema) -> std::result::Result<SlotKey, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            section: "assignment".to_string(),
            key: self.to_string(),
            message,
        };

        let index = schema
            .component_index(&self.component)
            .ok_or_else(|| invalid(format!("unknown component '{}'", self.component)))?;
        let component = &schema.components[index];

        if self.kind.is_vertex_stream() {
            if self.variant.is_some() {
                return Err(invalid(format!("{} is a shared slot", self.kind)));
            }
            return Ok(SlotKey::shared(index, self.kind.clone()));
        }

        let label = match &self.variant {
            Some(label) => label.clone(),
            None => match component.variants.as_slice() {
                [only] => only.label.clone(),
                _ => {
                    return Err(invalid(format!(
                        "component '{}' has several variants, name one",
                        component.name
                    )));
                }
            },
        };

        if !component.has_slot(&self.kind, Some(&label)) {
            return Err(invalid(format!(
                "variant '{label}' of '{}' has no {} slot",
                component.name, self.kind
            )));
        }
        Ok(SlotKey::variant(index, self.kind.clone(), label))
    }

    /// Resolves the spec and stores it in `assignment`.
    ///
    /// # Errors
    ///
    /// See [`SlotSpec::key`].
    pub fn apply(
        &self,
        schema: &AssetSchema,
        assignment: &mut SlotAssignment,
    ) -> std::result::Result<SlotKey, ConfigError> {
        let key = self.key(schema)?;
        assignment.assign(key.clone(), self.path.clone());
        Ok(key)
    }
}

impl fmt::Display for SlotSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.component)?;
        if let Some(variant) = &self.variant {
            write!(f, "/{variant}")?;
        }
        write!(f, ":{}={}", self.kind, self.path)
    }
}

impl FromStr for SlotSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = |message: &str| ConfigError::InvalidValue {
            section: "assignment".to_string(),
            key: s.to_string(),
            message: format!("{message} (expected Component[/Variant]:slot=path)"),
        };

        let (target, path) = s.split_once('=').ok_or_else(|| invalid("missing '='"))?;
        let (target, slot) = target
            .split_once(':')
            .ok_or_else(|| invalid("missing ':'"))?;
        let (component, variant) = match target.split_once('/') {
            Some((component, variant)) => (component, Some(variant.trim().to_string())),
            None => (target, None),
        };

        let component = component.trim();
        if component.is_empty() {
            return Err(invalid("empty component"));
        }

        Ok(Self {
            component: component.to_string(),
            variant,
            kind: slot.parse()?,
            path: path.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ComponentRef {
    Index(usize),
    Name(String),
}

#[derive(Debug, Clone, Deserialize)]
struct AssignmentEntry {
    component: ComponentRef,
    #[serde(default)]
    variant: Option<String>,
    slot: SlotKind,
    file: String,
}

/// JSON assignment file: `{"assignments": [{component, variant, slot, file}]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentFile {
    assignments: Vec<AssignmentEntry>,
}

impl AssignmentFile {
    /// Converts every entry into a [`SlotSpec`].
    #[must_use]
    pub fn into_specs(self) -> Vec<SlotSpec> {
        self.assignments
            .into_iter()
            .map(|entry| SlotSpec {
                component: match entry.component {
                    ComponentRef::Index(idx) => idx.to_string(),
                    ComponentRef::Name(name) => name,
                },
                variant: entry.variant,
                kind: entry.slot,
                path: entry.file,
            })
            .collect()
    }
}

/// Reads an assignment file into specs.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid JSON.
pub fn load_assignment_file(path: &Path) -> Result<Vec<SlotSpec>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read assignment file {}", path.display()))?;
    let file: AssignmentFile = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse assignment file {}", path.display()))?;
    Ok(file.into_specs())
}
