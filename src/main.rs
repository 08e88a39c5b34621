// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> ConfigLoader --> Logging --> Command Dispatch
//!   Schema | Scan | Resolve | Export | Inspect | Options | Inis
//! ```

use std::process::ExitCode;

use slotmod_rs::cli::global::GlobalOptions;
use slotmod_rs::cli::{self, Command};
use slotmod_rs::cmd::assets::{run_resolve_command, run_schema_command};
use slotmod_rs::cmd::config::{run_inis_command, run_options_command};
use slotmod_rs::cmd::export::run_export_command;
use slotmod_rs::cmd::inspect::run_inspect_command;
use slotmod_rs::cmd::scan::run_scan_command;
use slotmod_rs::config::loader::ConfigLoader;
use slotmod_rs::config::{Config, DEFAULT_CONFIG_FILE, ENV_PREFIX};
use slotmod_rs::error::Result;
use slotmod_rs::logging::init_logging;
use slotmod_rs::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let loader = match build_config_loader(&cli.global) {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Invalid option: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    let config_files = loader.format_loaded_files();
    let config = loader
        .build()
        .map_err(|e| e.context("failed to load config"));

    let log_config = build_log_config(&cli.global, config.as_ref().ok());
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config_files, config).await
}

/// Logging follows the loaded `[global]` section, which already carries the
/// CLI flags as overrides. Without a config only the flags apply.
fn build_log_config(global: &GlobalOptions, config: Option<&Config>) -> LogConfig {
    if let Some(config) = config {
        return LogConfig::builder()
            .with_console_level(config.global.output_log_level)
            .with_file_level(config.global.file_log_level)
            .maybe_with_log_file(config.global.log_file.clone())
            .with_json_file(config.global.log_json)
            .build();
    }

    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.clone())
        .build()
}

async fn dispatch_command(
    cli: &cli::Cli,
    config_files: &[String],
    config: Result<Config>,
) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => config.map(|config| run_options_command(&config)),
        Some(Command::Inis) => {
            run_inis_command(config_files);
            Ok(())
        }
        Some(Command::Schema(args)) => run_schema_command(args),
        Some(Command::Scan(args)) => config.and_then(|config| run_scan_command(args, &config)),
        Some(Command::Resolve(args)) => run_resolve_command(args),
        Some(Command::Export(args)) => match config {
            Ok(config) => run_export_command(args, &config).await,
            Err(e) => Err(e),
        },
        Some(Command::Inspect(args)) => {
            config.and_then(|config| run_inspect_command(args, &config))
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if !global.no_default_config {
        loader = loader.add_toml_file_optional(DEFAULT_CONFIG_FILE);
    }
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader
        .with_env_prefix(ENV_PREFIX)
        .apply_overrides(&global.to_config_overrides())
}
