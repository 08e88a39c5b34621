// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Flags shared by every subcommand.
//!
//! Each flag becomes a `section/key=value` override, so the merged
//! configuration is the single place commands read settings from:
//!
//! ```text
//! -l 4 --file-log-level 6   global/output_log_level=4  global/file_log_level=6
//! --log-file run.log        global/log_file=run.log
//! -o staging                paths/output_root=staging
//! -s dialect/x=y            dialect/x=y (applied first, flags win)
//! ```

use clap::{ArgAction, Args};
use std::path::PathBuf;

/// Flags accepted before or after any subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Extra TOML configuration file, merged over `slotmod.toml`. Repeatable.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Console verbosity: 0=silent 1=error 2=warn 3=info 4=debug 5=trace 6=dump.
    #[arg(
        short = 'l',
        long = "log-level",
        value_name = "LEVEL",
        value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// Log file verbosity. Follows --log-level when omitted.
    #[arg(
        long = "file-log-level",
        value_name = "LEVEL",
        value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Also write logs to this file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Staging root; each export lands in a subfolder named after the mod.
    #[arg(short = 'o', long = "output", value_name = "DIR", global = true)]
    pub output_root: Option<PathBuf>,

    /// Option override such as 'dialect/stream_extension=buf' or
    /// 'export.canonicalize=true'. Repeatable.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = ArgAction::Append)]
    pub options: Vec<String>,

    /// Skip `slotmod.toml` in the current directory.
    #[arg(long = "no-default-config")]
    pub no_default_config: bool,
}

impl GlobalOptions {
    /// `--set` values followed by the dedicated flags, so a flag beats a
    /// `--set` for the same key.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let file_level = self.file_log_level.or(self.log_level);
        let flags = [
            self.log_level
                .map(|level| format!("global/output_log_level={level}")),
            file_level.map(|level| format!("global/file_log_level={level}")),
            self.log_file
                .as_ref()
                .map(|path| format!("global/log_file={}", path.display())),
            self.output_root
                .as_ref()
                .map(|root| format!("paths/output_root={}", root.display())),
        ];

        self.options
            .iter()
            .cloned()
            .chain(flags.into_iter().flatten())
            .collect()
    }
}
