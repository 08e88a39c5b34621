// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Component schema of an asset.
//!
//! ```text
//! AssetSchema { asset_name, components }
//! └── ComponentSchema { name, shared, variants }
//!       shared:   SlotKind -> hash   (position / texcoord / blend)
//!       variants: [Variant { label, slots: SlotKind -> hash }]
//!                 (index buffer and texture roles)
//! ```
//!
//! Schemas are built once from `hash.json` (see [`loader`]) and replaced
//! wholesale when another asset folder is selected.

pub mod loader;


use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

pub use loader::{HASH_FILE, load_asset_schema, load_schema};

/// Role a resource file plays for a component.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SlotKind {
    IndexBuffer,
    Position,
    Texcoord,
    Blend,
    /// Named texture role (`diffuse`, `lightmap`, ...).
    Texture(String),
}

impl SlotKind {
    /// Suffix used when building logical slot ids.
    #[must_use]
    pub fn suffix(&self) -> String {
        match self {
            Self::IndexBuffer => "IB".to_string(),
            Self::Position => "Position".to_string(),
            Self::Texcoord => "Texcoord".to_string(),
            Self::Blend => "Blend".to_string(),
            Self::Texture(role) => capitalize(role),
        }
    }

    #[must_use]
    pub const fn is_index_buffer(&self) -> bool {
        matches!(self, Self::IndexBuffer)
    }

    /// True for position, texcoord and blend.
    #[must_use]
    pub const fn is_vertex_stream(&self) -> bool {
        matches!(self, Self::Position | Self::Texcoord | Self::Blend)
    }

    /// Shared stream kinds in display order.
    pub const STREAMS: [Self; 3] = [Self::Position, Self::Texcoord, Self::Blend];
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexBuffer => f.write_str("ib"),
            Self::Position => f.write_str("position"),
            Self::Texcoord => f.write_str("texcoord"),
            Self::Blend => f.write_str("blend"),
            Self::Texture(role) => write!(f, "texture:{role}"),
        }
    }
}

impl FromStr for SlotKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(role) = trimmed.strip_prefix("texture:") {
            let role = role.trim();
            if role.is_empty() {
                return Err(ConfigError::InvalidValue {
                    section: "assignment".to_string(),
                    key: "slot".to_string(),
                    message: format!("texture role is empty in '{s}'"),
                });
            }
            return Ok(Self::Texture(role.to_string()));
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "ib" | "index" | "index_buffer" | "indexbuffer" => Ok(Self::IndexBuffer),
            "position" | "pos" => Ok(Self::Position),
            "texcoord" | "uv" => Ok(Self::Texcoord),
            "blend" => Ok(Self::Blend),
            _ => Err(ConfigError::InvalidValue {
                section: "assignment".to_string(),
                key: "slot".to_string(),
                message: format!(
                    "unknown slot '{s}' (expected ib, position, texcoord, blend or texture:<role>)"
                ),
            }),
        }
    }
}

impl Serialize for SlotKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One variant (object classification) of a component.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Variant {
    pub label: String,
    pub slots: BTreeMap<SlotKind, Option<String>>,
}

/// Slots of one component; reference hashes are informational.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ComponentSchema {
    pub name: String,
    pub shared: BTreeMap<SlotKind, Option<String>>,
    pub variants: Vec<Variant>,
}

impl ComponentSchema {
    #[must_use]
    pub fn variant(&self, label: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.label == label)
    }

    /// True if `kind` exists as a shared slot or in variant `label`.
    #[must_use]
    pub fn has_slot(&self, kind: &SlotKind, label: Option<&str>) -> bool {
        match label {
            None => self.shared.contains_key(kind),
            Some(label) => self
                .variant(label)
                .is_some_and(|v| v.slots.contains_key(kind)),
        }
    }
}

/// Schema of one asset folder.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AssetSchema {
    /// Asset folder name, the prefix of every logical slot id.
    pub asset_name: String,
    pub components: Vec<ComponentSchema>,
}

impl AssetSchema {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Looks a component up by name, or by zero-based index when `key`
    /// is numeric and no component carries that name.
    #[must_use]
    pub fn component_index(&self, key: &str) -> Option<usize> {
        self.components
            .iter()
            .position(|c| c.name == key)
            .or_else(|| {
                key.parse::<usize>()
                    .ok()
                    .filter(|idx| *idx < self.components.len())
            })
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
