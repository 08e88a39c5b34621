// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::journal::{EventLevel, RunLog};
use super::{LogConfig, LogLevel, split_log_path};
use std::path::{Path, PathBuf};
use crate::error::Incident;

#[test]
fn test_log_level_bounds() {
    assert!(LogLevel::new(0).is_ok());
    assert!(LogLevel::new(6).is_ok());
    assert!(LogLevel::new(7).is_err());
    assert_eq!(LogLevel::from_u8(9), None);
}

#[test]
fn test_log_level_filter_strings() {
    let filters: Vec<_> = (0..=6)
        .filter_map(LogLevel::from_u8)
        .map(LogLevel::to_filter_string)
        .collect();
    assert_eq!(
        filters,
        [
            "off",
            "error",
            "warn",
            "info",
            "debug",
            "info,slotmod_rs=trace,slotmod=trace",
            "trace"
        ]
    );
}

#[test]
fn test_log_level_names() {
    assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::DEBUG);
    assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::WARN);
    assert_eq!(" 6 ".parse::<LogLevel>().unwrap(), LogLevel::DUMP);
    assert!("verbose".parse::<LogLevel>().is_err());
    assert!("7".parse::<LogLevel>().is_err());
    assert_eq!(LogLevel::SILENT.to_string(), "off");
    assert!(LogLevel::ERROR < LogLevel::TRACE);
}

#[test]
fn test_log_level_deserialize_number_or_name() {
    #[derive(serde::Deserialize)]
    struct Levels {
        a: LogLevel,
        b: LogLevel,
    }
    let levels: Levels = serde_json::from_str(r#"{"a": 2, "b": "trace"}"#).unwrap();
    assert_eq!(levels.a, LogLevel::WARN);
    assert_eq!(levels.b, LogLevel::TRACE);
    assert!(serde_json::from_str::<Levels>(r#"{"a": 300, "b": 1}"#).is_err());
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
    assert!(!config.json_file());
    assert!(!config.show_target());
}

#[test]
fn test_split_log_path() {
    let (dir, name) = split_log_path(Path::new("logs/run.log")).unwrap();
    assert_eq!(dir, PathBuf::from("logs"));
    assert_eq!(name, "run.log");

    let (dir, _) = split_log_path(Path::new("run.log")).unwrap();
    assert_eq!(dir, PathBuf::from("."));
    assert!(split_log_path(Path::new("/")).is_err());
}

#[test]
fn test_run_log_context_prefix() {
    let mut log = RunLog::new();
    log.info("no context");
    log.enter_phase("rename");
    log.info("phase only");
    log.set_file("mod.ini");
    log.warn(Incident::FileNotFound, "missing vb0.assets");
    log.enter_phase("prune");
    log.info("file cleared by phase change");

    let prefixes: Vec<_> = log.events().iter().map(super::journal::LogEvent::prefix).collect();
    assert_eq!(
        prefixes,
        ["", "[rename] ", "[rename/mod.ini] ", "[prune] "]
    );
}

#[test]
fn test_run_log_display() {
    let mut log = RunLog::new();
    log.enter_phase("flatten");
    log.warn(Incident::FilesystemFailure, "could not move sub/a.ini");
    insta::assert_snapshot!(
        log.events()[0].to_string(),
        @"WARN  [flatten] could not move sub/a.ini (filesystem_failure)"
    );
}

#[test]
fn test_run_log_incident_counts() {
    let mut log = RunLog::new();
    log.warn(Incident::FileNotFound, "a");
    log.warn(Incident::FileNotFound, "b");
    log.error(Incident::FilesystemFailure, "c");
    log.info("d");

    let counts = log.incident_counts();
    assert_eq!(counts.get(&Incident::FileNotFound), Some(&2));
    assert_eq!(counts.get(&Incident::FilesystemFailure), Some(&1));
    assert_eq!(counts.get(&Incident::StructuralAmbiguity), None);
    assert!(log.has_errors());
    assert_eq!(log.incidents(Incident::FileNotFound).count(), 2);
    assert_eq!(log.events()[3].level, EventLevel::Info);
}

#[test]
fn test_run_log_extend_keeps_order() {
    let mut first = RunLog::new();
    first.info("one");
    let mut second = RunLog::new();
    second.info("two");
    first.extend(second);

    let messages: Vec<_> = first.events().iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, ["one", "two"]);
}
