// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Settings for slotmod: logging, the staging root, the configuration-file
//! dialect and export switches.
//!
//! # Layers
//!
//! ```text
//! lowest precedence first
//! 1. built-in defaults
//! 2. slotmod.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. SLOTMOD_* env vars
//! 5. --set section/key=value
//! ```
//!
//! # Environment
//!
//! ```text
//! SLOTMOD_GLOBAL__OUTPUT_LOG_LEVEL=4      → global.output_log_level = 4
//! SLOTMOD_PATHS__OUTPUT_ROOT=/tmp/out     → paths.output_root = "/tmp/out"
//! SLOTMOD_DIALECT__PLUS_VALUE_KEY=cond    → dialect.plus_value_key = "cond"
//! ```

pub mod loader;
pub mod paths;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::dialect::Dialect;
use crate::error::Result;
use crate::rewrite::RewriteOptions;

use loader::ConfigLoader;
use paths::PathsConfig;
use types::{ExportConfig, GlobalConfig};

/// Name of the optional configuration file picked up from the working
/// directory.
pub const DEFAULT_CONFIG_FILE: &str = "slotmod.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "SLOTMOD";

/// Merged settings, one field per TOML section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `[global]`: log levels and log file.
    pub global: GlobalConfig,
    /// `[paths]`: staging root and remembered folders.
    pub paths: PathsConfig,
    /// Configuration-file dialect.
    pub dialect: Dialect,
    /// Export pipeline options.
    pub export: ExportConfig,
}

impl Config {
    /// Starts an empty [`ConfigLoader`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use slotmod_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("slotmod.toml")
    ///     .with_env_prefix("SLOTMOD")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Loads one TOML file over the defaults.
    ///
    /// # Errors
    ///
    /// Fails when the file is missing, malformed or carries unknown keys.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Loads TOML text over the defaults.
    ///
    /// # Errors
    ///
    /// Fails when the text is malformed, carries unknown keys or does not
    /// validate.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Resolve all paths against `base` and validate configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `paths.output_root` is empty or a dialect
    /// extension is empty.
    pub fn resolve_and_validate(&mut self, base: &Path) -> Result<()> {
        self.paths.resolve(base)?;
        self.dialect.validate()?;
        Ok(())
    }

    /// Rewrite options derived from `[export]`.
    #[must_use]
    pub fn rewrite_options(&self) -> RewriteOptions {
        RewriteOptions::builder()
            .canonicalize(self.export.canonicalize)
            .build()
    }

    /// Format configuration options for display.
    ///
    /// Returns one `key = value` line per option, aligned on `=` and ordered
    /// by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_paths_options(&mut options);
        self.format_dialect_options(&mut options);
        options.insert(
            "export.canonicalize".into(),
            self.export.canonicalize.to_string(),
        );

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert("global.log_file".into(), fmt_path(self.global.log_file.as_ref()));
        options.insert("global.log_json".into(), self.global.log_json.to_string());
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "paths.output_root".into(),
            self.paths.output_root.display().to_string(),
        );
        options.insert(
            "paths.last_asset_folder".into(),
            fmt_path(self.paths.last_asset_folder.as_ref()),
        );
        options.insert(
            "paths.last_mod_folder".into(),
            fmt_path(self.paths.last_mod_folder.as_ref()),
        );
    }

    fn format_dialect_options(&self, options: &mut BTreeMap<String, String>) {
        let d = &self.dialect;
        for (key, value) in [
            ("config_extension", &d.config_extension),
            ("primary_directive", &d.primary_directive),
            ("resource_prefix", &d.resource_prefix),
            ("override_prefix", &d.override_prefix),
            ("placeholder_extension", &d.placeholder_extension),
            ("index_extension", &d.index_extension),
            ("stream_extension", &d.stream_extension),
            ("excluded_suffix", &d.excluded_suffix),
            ("plus_value_key", &d.plus_value_key),
            ("index_buffer_key", &d.index_buffer_key),
            ("position_key", &d.position_key),
            ("texcoord_key", &d.texcoord_key),
            ("blend_key", &d.blend_key),
        ] {
            options.insert(format!("dialect.{key}"), value.clone());
        }
    }
}

fn fmt_path(path: Option<&PathBuf>) -> String {
    path.map_or_else(String::new, |p| p.display().to_string())
}
