// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `options` and `inis`: what the merged configuration looks like and which
//! layers produced it.

use crate::config::Config;

/// Prints every effective option as `section.key = value`.
pub fn run_options_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Prints the configuration layers, lowest precedence first.
pub fn run_inis_command(config_files: &[String]) {
    if config_files.is_empty() {
        println!("no configuration files, using defaults");
        return;
    }
    for line in config_files {
        println!("{line}");
    }
}
