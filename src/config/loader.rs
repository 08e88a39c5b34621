// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration loading.
//!
//! ```text
//! defaults < slotmod.toml < --config FILE.. < SLOTMOD_SECTION__KEY < overrides
//!                                 |
//!                        ConfigLoader::build()
//!                                 |
//!          deserialize --> resolve paths against base dir --> validate
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};

use super::Config;
use crate::error::{ConfigError, Result};

/// Where a layer of the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A file that must exist.
    File(PathBuf),
    /// A file that was present when it was added.
    Optional(PathBuf),
    /// TOML text handed in directly.
    Inline,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "[file] {}", path.display()),
            Self::Optional(path) => write!(f, "[optional] {}", path.display()),
            Self::Inline => f.write_str("[inline] <string>"),
        }
    }
}

/// Collects configuration layers and merges them into a [`Config`].
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
    sources: Vec<ConfigSource>,
    env_prefix: Option<String>,
    base_dir: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            sources: Vec::new(),
            env_prefix: None,
            base_dir: None,
        }
    }

    fn layer<S>(mut self, layer: S, source: ConfigSource) -> Self
    where
        S: config::Source + Send + Sync + 'static,
    {
        self.builder = self.builder.add_source(layer);
        self.sources.push(source);
        self
    }

    /// Adds a TOML file; `build()` fails if it is missing or malformed.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        let path = path.as_ref();
        let file = File::from(path).format(FileFormat::Toml).required(true);
        self.layer(file, ConfigSource::File(path.to_path_buf()))
    }

    /// Adds a TOML file that is skipped when absent.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        let file = File::from(path).format(FileFormat::Toml).required(false);
        if path.is_file() {
            return self.layer(file, ConfigSource::Optional(path.to_path_buf()));
        }
        self.builder = self.builder.add_source(file);
        self
    }

    #[must_use]
    pub fn add_toml_str(self, content: &str) -> Self {
        self.layer(File::from_str(content, FileFormat::Toml), ConfigSource::Inline)
    }

    /// Reads `PREFIX_SECTION__KEY` environment variables, e.g.
    /// `SLOTMOD_PATHS__OUTPUT_ROOT=/tmp/out`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Directory relative paths resolve against. Defaults to the current
    /// directory.
    #[must_use]
    pub fn with_base_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.base_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Sets one dotted key, taking precedence over every file and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot be parsed as a config path.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| anyhow::anyhow!("cannot override '{key}': {e}"))?;
        Ok(self)
    }

    /// Applies `section/key=value` (or `section.key=value`) overrides in order.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` for an override without `=` or
    /// without a section.
    pub fn apply_overrides(self, overrides: &[String]) -> Result<Self> {
        overrides.iter().try_fold(self, |loader, raw| {
            let (key, value) = parse_override(raw)?;
            loader.set(&key, value)
        })
    }

    /// Merges every layer, resolves relative paths and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing, a layer is not valid
    /// TOML, a value has the wrong type or an unknown key is present, or
    /// validation rejects the merged configuration.
    pub fn build(self) -> Result<Config> {
        let mut builder = self.builder;
        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let mut config: Config = builder.build()?.try_deserialize()?;
        let base = match self.base_dir {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        config.resolve_and_validate(&base)?;
        Ok(config)
    }

    /// Layers added so far, lowest precedence first. Absent optional files
    /// are not listed.
    #[must_use]
    pub fn loaded_files(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// Numbered lines for the `inis` command.
    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, source)| format!("{}. {source}", i + 1))
            .collect()
    }
}

/// Splits `section/key=value` into a dotted key and its value.
pub(crate) fn parse_override(raw: &str) -> std::result::Result<(String, String), ConfigError> {
    let invalid = |message: &str| ConfigError::InvalidValue {
        section: "override".to_string(),
        key: raw.to_string(),
        message: message.to_string(),
    };

    let (path, value) = raw
        .split_once('=')
        .ok_or_else(|| invalid("expected 'section/key=value'"))?;
    let (section, key) = path
        .trim()
        .split_once(['/', '.'])
        .ok_or_else(|| invalid("expected 'section/key=value'"))?;
    let (section, key) = (section.trim(), key.trim());
    if section.is_empty() || key.is_empty() {
        return Err(invalid("section and key must not be empty"));
    }
    Ok((format!("{section}.{key}"), value.trim().to_string()))
}
