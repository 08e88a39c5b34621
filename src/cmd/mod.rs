// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   assets (schema, resolve), config, export, inspect, scan
//! ```

pub mod assets;
pub mod config;
pub mod export;
pub mod inspect;
pub mod scan;

#[cfg(test)]
mod tests;
