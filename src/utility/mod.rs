// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! encoding
//!   decode_text() / encode_text()  UTF-8 (BOM) / UTF-16LE / CP1252
//! fs
//!   walk:   parallel_walk(), find_files(), WalkOptions
//!   copy:   copy_dir_contents_async(), replace_dir_async()
//!   unique:  unique_path(), move_unique()
//!   relpath: normalize_slashes(), join_relative(), base_name()
//! ```

pub mod encoding;
pub mod fs;
