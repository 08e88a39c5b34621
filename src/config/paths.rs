// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! output_root/
//!   <mod folder name>/   (staged copy, replaced on every export)
//! ```
//!
//! `output_root` is resolved against the working directory on load. The
//! last-used folders are informational only.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Default staging root, relative to the working directory.
pub const DEFAULT_OUTPUT_ROOT: &str = "output";

/// Staging and last-used folder paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Root under which staged mod copies are created.
    pub output_root: PathBuf,
    /// Asset folder of the previous run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_asset_folder: Option<PathBuf>,
    /// Mod folder of the previous run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_mod_folder: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            last_asset_folder: None,
            last_mod_folder: None,
        }
    }
}

impl PathsConfig {
    /// Makes `output_root` absolute against `base`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` if `output_root` is empty.
    pub fn resolve(&mut self, base: &Path) -> Result<(), ConfigError> {
        if self.output_root.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "paths".to_string(),
                key: "output_root".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.output_root.is_relative() {
            self.output_root = base.join(&self.output_root);
        }
        Ok(())
    }

    /// Staging directory for a mod folder: `output_root/<folder name>`.
    #[must_use]
    pub fn staging_dir(&self, mod_root: &Path) -> Option<PathBuf> {
        mod_root
            .file_name()
            .map(|name| self.output_root.join(name))
    }
}
