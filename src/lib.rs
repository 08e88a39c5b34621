// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |       schema / scan / resolve / export
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!              schema       slots     scan
//!            hash.json    resolver  mod buffers
//!                             |
//!                             v
//!                          export
//!                  staging, single-flight
//!                             |
//!                             v
//!                          rewrite
//!                  phases 1-8 over the copy
//!                             |
//!                             v
//!                          dialect
//!                 parser, serializer, text
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod dialect;
pub mod error;
pub mod export;
pub mod logging;
pub mod rewrite;
pub mod scan;
pub mod schema;
pub mod slots;
pub mod utility;
