// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use super::assets::{format_incidents, format_resolved, format_schema, resolve_assignment};
use super::export::format_export_report;
use super::scan::format_scan;
use crate::cli::slots::AssignmentArgs;
use crate::dialect::Dialect;
use crate::error::Incident;
use crate::export::ExportReport;
use crate::logging::journal::RunLog;
use crate::rewrite::RenameRecord;
use crate::scan::scan_mod;

const HASH_JSON: &str = r#"[
  {
    "component_name": "Body",
    "position_vb": "aaa111",
    "ib": "ddd444",
    "object_classifications": ["A", "B"]
  }
]"#;

fn asset_dir(root: &Path) -> PathBuf {
    let dir = root.join("Astra");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("hash.json"), HASH_JSON).unwrap();
    dir
}

fn specs(raw: &[&str]) -> AssignmentArgs {
    AssignmentArgs {
        assignments: None,
        assign: raw.iter().map(|s| s.parse().unwrap()).collect(),
    }
}

#[test]
fn test_format_schema() {
    let temp = tempfile::tempdir().unwrap();
    let dir = asset_dir(temp.path());
    let mut log = RunLog::new();
    let schema = crate::schema::load_asset_schema(&dir, &mut log);

    assert_eq!(
        format_schema(&schema),
        [
            "asset 'Astra': 1 component(s)",
            "[0] Body",
            "  shared",
            "    position   aaa111",
            "    texcoord   -",
            "    blend      -",
            "  variant A",
            "    ib         ddd444",
            "  variant B",
            "    ib         ddd444",
        ]
    );
}

#[test]
fn test_resolve_assignment_specs() {
    let temp = tempfile::tempdir().unwrap();
    let dir = asset_dir(temp.path());
    let mut log = RunLog::new();

    let resolved = resolve_assignment(
        &dir,
        &specs(&["Body:position=meshes/vb0.assets", "0/B:ib=ib1.assets"]),
        &mut log,
    )
    .unwrap();

    assert_eq!(resolved.assignment.len(), 2);
    assert_eq!(
        format_resolved(&resolved.slots),
        [
            "AstraBodyPosition <- meshes/vb0.assets",
            "AstraBodyB        <- ib1.assets",
        ]
    );
    assert!(format_incidents(&log).is_empty());
}

#[test]
fn test_resolve_assignment_spec_overrides_file() {
    let temp = tempfile::tempdir().unwrap();
    let dir = asset_dir(temp.path());
    let file = temp.path().join("slots.json");
    std::fs::write(
        &file,
        r#"{"assignments": [
            {"component": "Body", "variant": "A", "slot": "ib", "file": "old.assets"},
            {"component": 0, "slot": "texcoord", "file": "uv.buf"}
        ]}"#,
    )
    .unwrap();

    let args = AssignmentArgs {
        assignments: Some(file),
        assign: vec!["Body/A:ib=new.assets".parse().unwrap()],
    };
    let resolved = resolve_assignment(&dir, &args, &mut RunLog::new()).unwrap();

    let sources: Vec<(&str, &str)> = resolved
        .slots
        .iter()
        .map(|s| (s.logical_id.as_str(), s.source.as_str()))
        .collect();
    assert_eq!(
        sources,
        [("AstraBodyTexcoord", "uv.buf"), ("AstraBodyA", "new.assets")]
    );
}

#[test]
fn test_resolve_assignment_rejects_unknown_variant() {
    let temp = tempfile::tempdir().unwrap();
    let dir = asset_dir(temp.path());

    let err = resolve_assignment(&dir, &specs(&["Body/C:ib=x.assets"]), &mut RunLog::new())
        .unwrap_err();
    assert!(format!("{err:#}").contains("Body/C:ib=x.assets"));

    // several variants, none named
    assert!(resolve_assignment(&dir, &specs(&["Body:ib=x.assets"]), &mut RunLog::new()).is_err());
}

#[test]
fn test_resolve_assignment_without_metadata() {
    let temp = tempfile::tempdir().unwrap();
    let mut log = RunLog::new();

    let resolved = resolve_assignment(temp.path(), &specs(&[]), &mut log).unwrap();

    assert!(resolved.schema.is_empty());
    assert!(resolved.slots.is_empty());
    assert_eq!(log.incidents(Incident::MetadataUnavailable).count(), 1);
    assert_eq!(format_incidents(&log), ["metadata_unavailable: 1"]);
}

#[test]
fn test_format_scan() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    std::fs::write(
        root.join("mod.ini"),
        "[TextureOverrideBody]\nhash = 1a2b\nib = ResourceBodyIB\n\n[ResourceBodyIB]\nfilename = Body.ib\n",
    )
    .unwrap();
    std::fs::write(root.join("Body.ib"), "").unwrap();
    std::fs::write(root.join("extra.buf"), "").unwrap();

    let report = scan_mod(root, &Dialect::default()).unwrap();

    insta::assert_snapshot!(format_scan(&report).join("\n"), @r"
    Body.ib (ib)
      Body ib hash=1a2b via [ResourceBodyIB] in mod.ini
    extra.buf
    ");
}

#[test]
fn test_format_export_report() {
    let mut record = RenameRecord::default();
    record
        .files
        .insert("meshes/vb0.assets".to_string(), "AstraBodyPosition.buf".to_string());
    record
        .sections
        .insert("ResourceBody".to_string(), "ResourceAstraBodyPosition".to_string());
    let mut log = RunLog::new();
    log.warn(Incident::FileNotFound, "missing.assets");
    log.warn(Incident::FileNotFound, "gone.assets");

    let report = ExportReport {
        staged_root: PathBuf::from("out/AstraMod"),
        copied: 3,
        record,
        configs: vec![PathBuf::from("out/AstraMod/mod.ini")],
        pruned: vec!["ResourceEmpty".to_string()],
        log,
    };

    insta::assert_snapshot!(format_export_report(&report).join("\n"), @r"
    staged:    out/AstraMod
    copied:    3 file(s)
    configs:   1 file(s)
    files:
      meshes/vb0.assets -> AstraBodyPosition.buf
    sections:
      ResourceBody -> ResourceAstraBodyPosition
    pruned:    ResourceEmpty
    incidents:
      file_not_found: 2
    ");
}

#[test]
fn test_format_export_report_clean_run() {
    let report = ExportReport {
        staged_root: PathBuf::from("out/M"),
        copied: 0,
        record: RenameRecord::default(),
        configs: Vec::new(),
        pruned: Vec::new(),
        log: RunLog::new(),
    };
    assert_eq!(
        format_export_report(&report).last().map(String::as_str),
        Some("incidents: none")
    );
}
