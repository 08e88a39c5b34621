// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities with parallel traversal and async copy.
//!
//! ```text
//! walk:   parallel_walk()   ignore::WalkParallel, sorted output
//!         find_files()      wax glob matching
//!         WalkOptions       max_depth, hidden, gitignore
//! copy:   copy_dir_contents_async() / replace_dir_async()  tokio::fs
//! unique: unique_path() / move_unique()  numeric suffix on collision
//! relpath: normalize_slashes() / base_name() / join_relative()
//! ```

pub mod copy;
pub mod relpath;
pub mod unique;
pub mod walk;
