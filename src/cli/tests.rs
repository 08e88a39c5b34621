// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use crate::cli::{Cli, Command};
use crate::schema::SlotKind;
use clap::Parser;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["slotmod", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "slotmod",
        "-l",
        "5",
        "-c",
        "a.toml",
        "--config",
        "b.toml",
        "--set",
        "export/canonicalize=true",
        "options",
    ])
    .unwrap();

    assert_eq!(cli.global.log_level, Some(5));
    assert_eq!(
        cli.global.configs,
        [PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );
    assert!(matches!(cli.command, Some(Command::Options)));
}

#[test]
fn test_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["slotmod", "-l", "7", "options"]).is_err());
}

#[test]
fn test_config_overrides() {
    let cli = Cli::try_parse_from([
        "slotmod",
        "-l",
        "4",
        "--log-file",
        "run.log",
        "-s",
        "dialect/stream_extension=vb",
        "inis",
    ])
    .unwrap();

    insta::assert_snapshot!(cli.global.to_config_overrides().join("\n"), @r"
    dialect/stream_extension=vb
    global/output_log_level=4
    global/file_log_level=4
    global/log_file=run.log
    ");
}

#[test]
fn test_file_log_level_wins_over_log_level() {
    let cli =
        Cli::try_parse_from(["slotmod", "-l", "2", "--file-log-level", "6", "version"]).unwrap();
    let overrides = cli.global.to_config_overrides();
    assert!(overrides.contains(&"global/file_log_level=6".to_string()));
    assert!(!overrides.contains(&"global/file_log_level=2".to_string()));
}

#[test]
fn test_parse_export() {
    let cli = Cli::try_parse_from([
        "slotmod",
        "export",
        "assets/Astra",
        "mods/Astra",
        "--assign",
        "Body/A:ib=ib0.assets",
        "--assign",
        "0:position=meshes/vb0.assets",
        "--output",
        "staged",
    ])
    .unwrap();

    let Some(Command::Export(args)) = cli.command else {
        panic!("expected export command");
    };
    assert_eq!(args.asset_dir, PathBuf::from("assets/Astra"));
    assert_eq!(args.mod_dir, PathBuf::from("mods/Astra"));
    assert_eq!(cli.global.output_root, Some(PathBuf::from("staged")));
    assert_eq!(args.slots.assign.len(), 2);
    assert_eq!(args.slots.assign[0].component, "Body");
    assert_eq!(args.slots.assign[0].variant.as_deref(), Some("A"));
    assert_eq!(args.slots.assign[0].kind, SlotKind::IndexBuffer);
    assert_eq!(args.slots.assign[1].component, "0");
    assert_eq!(args.slots.assign[1].path, "meshes/vb0.assets");
    assert!(!args.canonicalize);
}

#[test]
fn test_parse_export_rejects_bad_spec() {
    assert!(
        Cli::try_parse_from(["slotmod", "export", "a", "m", "--assign", "Body-ib0.assets"])
            .is_err()
    );
}

#[test]
fn test_parse_resolve_with_file() {
    let cli =
        Cli::try_parse_from(["slotmod", "resolve", "assets/Astra", "-a", "slots.json"]).unwrap();
    let Some(Command::Resolve(args)) = cli.command else {
        panic!("expected resolve command");
    };
    assert_eq!(args.slots.assignments, Some(PathBuf::from("slots.json")));
    assert!(!args.slots.is_empty());
}

#[test]
fn test_parse_scan_and_inspect() {
    let cli = Cli::try_parse_from(["slotmod", "scan", "--json", "mods/Astra"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Scan(ref args)) if args.json));

    let cli = Cli::try_parse_from(["slotmod", "inspect", "mod.ini"]).unwrap();
    assert!(
        matches!(cli.command, Some(Command::Inspect(ref args)) if args.file == PathBuf::from("mod.ini"))
    );
}

#[test]
fn test_no_command() {
    let cli = Cli::try_parse_from(["slotmod"]).unwrap();
    assert!(cli.command.is_none());
}
