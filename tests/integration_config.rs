// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use slotmod_rs::config::Config;
use slotmod_rs::config::loader::ConfigLoader;
use slotmod_rs::logging::LogLevel;

const FULL_TOML: &str = r#"
[global]
output_log_level = 4
file_log_level = 6
log_file = "slotmod.log"

[paths]
output_root = "staging"
last_asset_folder = "assets/Astra"

[dialect]
config_extension = "ini"
primary_directive = "drawindexed"
resource_prefix = "Resource"
override_prefix = "TextureOverride"
placeholder_extension = "assets"
index_extension = "ib"
stream_extension = "vb"
excluded_suffix = "CS"
plus_value_key = "condition"
index_buffer_key = "ib"
position_key = "vb0"
texcoord_key = "vb1"
blend_key = "vb2"

[export]
canonicalize = true
"#;

// =============================================================================
// Loading from files
// =============================================================================

#[test]
fn config_full_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("slotmod.toml");
    std::fs::write(&path, FULL_TOML).unwrap();

    let config = ConfigLoader::new()
        .add_toml_file(&path)
        .with_base_dir(temp.path())
        .build()
        .unwrap();

    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.global.file_log_level, LogLevel::DUMP);
    assert_eq!(
        config.global.log_file.as_deref(),
        Some(std::path::Path::new("slotmod.log"))
    );
    assert_eq!(config.paths.output_root, temp.path().join("staging"));
    assert_eq!(
        config.paths.last_asset_folder.as_deref(),
        Some(std::path::Path::new("assets/Astra"))
    );
    assert_eq!(config.dialect.stream_extension, "vb");
    assert!(config.rewrite_options().canonicalize);
}

#[test]
fn config_later_files_override_earlier() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path().join("base.toml");
    let local = temp.path().join("local.toml");
    std::fs::write(&base, FULL_TOML).unwrap();
    std::fs::write(&local, "[dialect]\nstream_extension = \"buf\"\n\n[export]\ncanonicalize = false\n")
        .unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file(&base)
        .add_toml_file(&local)
        .add_toml_file_optional(temp.path().join("missing.toml"))
        .with_base_dir(temp.path());
    assert_eq!(loader.loaded_files().len(), 2);

    let config = loader.build().unwrap();
    assert_eq!(config.dialect.stream_extension, "buf");
    assert!(!config.export.canonicalize);
    // untouched keys keep the earlier file's values
    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
}

#[test]
fn config_overrides_beat_files() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("slotmod.toml");
    std::fs::write(&path, FULL_TOML).unwrap();

    let config = ConfigLoader::new()
        .add_toml_file(&path)
        .with_base_dir(temp.path())
        .apply_overrides(&[
            "paths/output_root=elsewhere".to_string(),
            "global.output_log_level=0".to_string(),
        ])
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.paths.output_root, temp.path().join("elsewhere"));
    assert_eq!(config.global.output_log_level, LogLevel::SILENT);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn config_rejects_unknown_dialect_key() {
    let result = Config::parse("[dialect]\nshader_prefix = \"Shader\"\n");
    assert!(result.is_err());
}

#[test]
fn config_rejects_empty_output_root() {
    let result = Config::parse("[paths]\noutput_root = \"\"\n");
    assert!(result.is_err());
}

#[test]
fn config_rejects_invalid_toml() {
    assert!(Config::parse("[global\noutput_log_level = 3").is_err());
}

#[test]
fn config_options_listing_covers_every_section() {
    let config = Config::parse("").unwrap();
    let options = config.format_options();

    for prefix in ["global.", "paths.", "dialect.", "export."] {
        assert!(
            options.iter().any(|line| line.starts_with(prefix)),
            "missing {prefix} options"
        );
    }
    assert!(
        options
            .iter()
            .any(|line| line.starts_with("dialect.primary_directive") && line.ends_with("drawindexed"))
    );
}
