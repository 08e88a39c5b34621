// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns and
//! checks that global flags reach the loaded configuration.

use std::path::PathBuf;

use clap::Parser;
use slotmod_rs::cli::{Cli, Command};
use slotmod_rs::config::loader::ConfigLoader;
use slotmod_rs::logging::LogLevel;
use slotmod_rs::schema::SlotKind;

// =============================================================================
// Simple Commands
// =============================================================================

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["slotmod", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_unknown_command_rejected() {
    assert!(Cli::try_parse_from(["slotmod", "build"]).is_err());
}

#[test]
fn cli_schema_requires_asset_dir() {
    assert!(Cli::try_parse_from(["slotmod", "schema"]).is_err());

    let cli = Cli::try_parse_from(["slotmod", "schema", "assets/Astra"]).unwrap();
    let Some(Command::Schema(args)) = cli.command else {
        panic!("expected schema command");
    };
    assert_eq!(args.asset_dir, PathBuf::from("assets/Astra"));
}

// =============================================================================
// Assignment Specs
// =============================================================================

#[test]
fn cli_resolve_texture_and_index_specs() {
    let cli = Cli::try_parse_from([
        "slotmod",
        "resolve",
        "assets/Astra",
        "--assign",
        "Body/A:texture:diffuse=textures/body.dds",
        "--assign",
        "Body/B:ib = meshes/ib1.assets",
    ])
    .unwrap();

    let Some(Command::Resolve(args)) = cli.command else {
        panic!("expected resolve command");
    };
    let specs = &args.slots.assign;
    assert_eq!(specs.len(), 2);
    assert_eq!(specs[0].kind, SlotKind::Texture("diffuse".to_string()));
    assert_eq!(specs[0].path, "textures/body.dds");
    assert_eq!(specs[1].variant.as_deref(), Some("B"));
    assert_eq!(specs[1].kind, SlotKind::IndexBuffer);
    assert_eq!(specs[1].path, "meshes/ib1.assets");
}

#[test]
fn cli_export_rejects_unknown_slot() {
    let result = Cli::try_parse_from([
        "slotmod",
        "export",
        "assets/Astra",
        "mods/Astra",
        "--assign",
        "Body:normal=n.buf",
    ]);
    assert!(result.is_err());
}

#[test]
fn cli_export_flags() {
    let cli = Cli::try_parse_from([
        "slotmod",
        "export",
        "assets/Astra",
        "mods/Astra",
        "--assignments",
        "slots.json",
        "--canonicalize",
    ])
    .unwrap();

    let Some(Command::Export(args)) = cli.command else {
        panic!("expected export command");
    };
    assert!(args.canonicalize);
    assert_eq!(args.slots.assignments, Some(PathBuf::from("slots.json")));
    assert!(args.slots.assign.is_empty());
}

// =============================================================================
// Global Options -> Config
// =============================================================================

#[test]
fn cli_global_flags_reach_config() {
    let temp = tempfile::tempdir().unwrap();
    let cli = Cli::try_parse_from([
        "slotmod",
        "--log-level",
        "1",
        "--file-log-level",
        "6",
        "--output",
        "staged",
        "--set",
        "dialect.stream_extension=vb",
        "--set",
        "export/canonicalize=true",
        "options",
    ])
    .unwrap();

    let config = ConfigLoader::new()
        .with_base_dir(temp.path())
        .apply_overrides(&cli.global.to_config_overrides())
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.global.output_log_level, LogLevel::ERROR);
    assert_eq!(config.global.file_log_level, LogLevel::DUMP);
    assert_eq!(config.paths.output_root, temp.path().join("staged"));
    assert_eq!(config.dialect.stream_extension, "vb");
    assert!(config.export.canonicalize);
}

#[test]
fn cli_output_flag_after_subcommand() {
    let cli = Cli::try_parse_from(["slotmod", "export", "a", "m", "-o", "/tmp/staged"]).unwrap();
    assert_eq!(cli.global.output_root, Some(PathBuf::from("/tmp/staged")));
    assert!(
        cli.global
            .to_config_overrides()
            .contains(&"paths/output_root=/tmp/staged".to_string())
    );
}

#[test]
fn cli_malformed_set_fails_in_loader() {
    let cli = Cli::try_parse_from(["slotmod", "--set", "no_equals_sign", "options"]).unwrap();
    assert!(
        ConfigLoader::new()
            .apply_overrides(&cli.global.to_config_overrides())
            .is_err()
    );
}
