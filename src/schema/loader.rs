// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `hash.json` metadata loader.
//!
//! ```text
//! [ { "component_name": "Body",
//!     "position_vb": "..", "texcoord_vb": "..", "blend_vb": "..",
//!     "ib": "..",
//!     "object_classifications": ["A", "B"],       // [] -> one variant ""
//!     "texture_hashes": [[["Diffuse", ".dds", ".."]], ...] } ]
//! ```
//!
//! [`load_asset_schema`] never fails: a missing or malformed file yields an
//! empty schema and a `MetadataUnavailable` incident.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::{AssetSchema, ComponentSchema, SlotKind, Variant};
use crate::error::{Incident, MetadataError};
use crate::logging::journal::RunLog;
use crate::utility::encoding::decode_text;

/// Metadata file name inside an asset folder.
pub const HASH_FILE: &str = "hash.json";

#[derive(Debug, Deserialize)]
struct HashEntry {
    #[serde(default = "unnamed")]
    component_name: String,
    #[serde(default)]
    position_vb: Option<String>,
    #[serde(default)]
    texcoord_vb: Option<String>,
    #[serde(default)]
    blend_vb: Option<String>,
    #[serde(default)]
    ib: Option<String>,
    #[serde(default)]
    object_classifications: Vec<String>,
    /// Per classification: `[role, extension, hash]` triples.
    #[serde(default)]
    texture_hashes: Vec<Vec<Vec<String>>>,
}

fn unnamed() -> String {
    "Unnamed".to_string()
}

impl HashEntry {
    fn into_component(self) -> ComponentSchema {
        let shared = BTreeMap::from([
            (SlotKind::Position, self.position_vb),
            (SlotKind::Texcoord, self.texcoord_vb),
            (SlotKind::Blend, self.blend_vb),
        ]);

        let labels = if self.object_classifications.is_empty() {
            vec![String::new()]
        } else {
            self.object_classifications
        };

        let variants = labels
            .into_iter()
            .enumerate()
            .map(|(idx, label)| {
                let mut slots = BTreeMap::from([(SlotKind::IndexBuffer, self.ib.clone())]);
                for triple in self.texture_hashes.get(idx).into_iter().flatten() {
                    if let [role, _ext, hash, ..] = triple.as_slice() {
                        slots.insert(
                            SlotKind::Texture(role.to_ascii_lowercase()),
                            Some(hash.clone()),
                        );
                    }
                }
                Variant { label, slots }
            })
            .collect();

        ComponentSchema {
            name: self.component_name,
            shared,
            variants,
        }
    }
}

/// Parses the JSON body of a metadata file.
///
/// # Errors
///
/// Returns the `serde_json` error for malformed input.
pub fn parse_schema(json: &str) -> Result<Vec<ComponentSchema>, serde_json::Error> {
    let entries: Vec<HashEntry> = serde_json::from_str(json)?;
    Ok(entries.into_iter().map(HashEntry::into_component).collect())
}

/// Loads component schemas from a metadata file.
///
/// # Errors
///
/// Returns [`MetadataError::NotFound`] if the file does not exist and
/// [`MetadataError::Malformed`] if it cannot be read or parsed.
pub fn load_schema(path: &Path) -> Result<Vec<ComponentSchema>, MetadataError> {
    if !path.is_file() {
        return Err(MetadataError::NotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path).map_err(|e| MetadataError::Malformed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let decoded = decode_text(&bytes);

    parse_schema(&decoded.text).map_err(|e| MetadataError::Malformed {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Loads the schema of an asset folder, degrading to an empty schema.
///
/// The asset name is the folder's own name.
pub fn load_asset_schema(asset_dir: &Path, log: &mut RunLog) -> AssetSchema {
    let asset_name = asset_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let components = match load_schema(&asset_dir.join(HASH_FILE)) {
        Ok(components) => {
            log.info(format!(
                "loaded {} component(s) for asset '{asset_name}'",
                components.len()
            ));
            components
        }
        Err(e) => {
            log.warn(Incident::MetadataUnavailable, e.to_string());
            Vec::new()
        }
    };

    AssetSchema {
        asset_name,
        components,
    }
}
