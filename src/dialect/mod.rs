// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The mod configuration dialect (3DMigoto-style INI).
//!
//! ```text
//! text --parse()--> Document --serialize()--> text
//!                      |
//!            IndexMap<section, Section>
//!            Section: IndexMap<key, Value>
//!            Value:   Scalar | Annotated | Bare | Multi
//!
//! text.rs: line-preserving helpers used by the rewrite engine
//!          (headers, section ranges, identifier-boundary replace)
//! ```
//!
//! A key may repeat within a section (`Multi`), comments preceding the
//! primary directive (`drawindexed`) travel with it (`Annotated`), and
//! `if` / `else` / `endif` blocks are tolerated but never evaluated.

pub mod document;
pub mod parser;
pub mod serializer;
pub mod text;


use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::schema::SlotKind;

pub use document::{Annotated, Document, Section, SectionLine, Value};
pub use parser::{parse, parse_with};
pub use serializer::{serialize, serialize_with};

/// Fixed names of the dialect, configurable under `[dialect]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Dialect {
    /// Extension of configuration files, without the dot.
    pub config_extension: String,
    /// The one repeatable key that carries attached comments.
    pub primary_directive: String,
    /// Prefix of bindable file resource sections.
    pub resource_prefix: String,
    /// Prefix of hash override sections.
    pub override_prefix: String,
    /// Generic extension of extracted buffers awaiting classification.
    pub placeholder_extension: String,
    /// Extension of index buffers.
    pub index_extension: String,
    /// Extension of vertex-stream buffers.
    pub stream_extension: String,
    /// Two-letter suffix of resource sections the downstream tool cannot load.
    pub excluded_suffix: String,
    /// Key whose value must not contain bare `=`.
    pub plus_value_key: String,
    pub index_buffer_key: String,
    pub position_key: String,
    pub texcoord_key: String,
    pub blend_key: String,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            config_extension: "ini".to_string(),
            primary_directive: "drawindexed".to_string(),
            resource_prefix: "Resource".to_string(),
            override_prefix: "TextureOverride".to_string(),
            placeholder_extension: "assets".to_string(),
            index_extension: "ib".to_string(),
            stream_extension: "buf".to_string(),
            excluded_suffix: "CS".to_string(),
            plus_value_key: "condition".to_string(),
            index_buffer_key: "ib".to_string(),
            position_key: "vb0".to_string(),
            texcoord_key: "vb1".to_string(),
            blend_key: "vb2".to_string(),
        }
    }
}

impl Dialect {
    /// Rejects empty names, which would match every line or file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` naming the first empty field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("config_extension", &self.config_extension),
            ("primary_directive", &self.primary_directive),
            ("resource_prefix", &self.resource_prefix),
            ("placeholder_extension", &self.placeholder_extension),
            ("index_extension", &self.index_extension),
            ("stream_extension", &self.stream_extension),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    section: "dialect".to_string(),
                    key: key.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// True if `key` is the primary directive (case-insensitive).
    #[must_use]
    pub fn is_primary(&self, key: &str) -> bool {
        key.eq_ignore_ascii_case(&self.primary_directive)
    }

    /// True if `name` is a resource section name.
    #[must_use]
    pub fn is_resource(&self, name: &str) -> bool {
        name.starts_with(&self.resource_prefix)
    }

    /// True if `file_name` has the configuration extension.
    #[must_use]
    pub fn is_config_file(&self, file_name: &str) -> bool {
        has_extension(file_name, &self.config_extension)
    }

    /// Slot kind bound by a dialect key inside an override section.
    #[must_use]
    pub fn slot_kind_for_key(&self, key: &str) -> Option<SlotKind> {
        let key = key.trim();
        if key.eq_ignore_ascii_case(&self.index_buffer_key) {
            Some(SlotKind::IndexBuffer)
        } else if key.eq_ignore_ascii_case(&self.position_key) {
            Some(SlotKind::Position)
        } else if key.eq_ignore_ascii_case(&self.texcoord_key) {
            Some(SlotKind::Texcoord)
        } else if key.eq_ignore_ascii_case(&self.blend_key) {
            Some(SlotKind::Blend)
        } else {
            None
        }
    }

    /// Target extension for a buffer bound to `kind`, if it has one.
    #[must_use]
    pub fn buffer_extension(&self, kind: &SlotKind) -> Option<&str> {
        match kind {
            SlotKind::IndexBuffer => Some(&self.index_extension),
            SlotKind::Position | SlotKind::Texcoord | SlotKind::Blend => {
                Some(&self.stream_extension)
            }
            SlotKind::Texture(_) => None,
        }
    }
}

/// Case-insensitive extension check on a file name.
#[must_use]
pub fn has_extension(file_name: &str, ext: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(stem, found)| !stem.is_empty() && found.eq_ignore_ascii_case(ext))
}
