// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Collision-free file naming.
//!
//! ```text
//! unique_path(dir, "vb0.buf")  vb0.buf -> vb0_1.buf -> vb0_2.buf ...
//! move_unique(from, dir, name) rename(from, unique_path(dir, name))
//! ```

use std::io;
use std::path::{Path, PathBuf};

/// Splits a file name into stem and extension (`"a.b.buf"` → `("a.b", Some("buf"))`).
#[must_use]
pub fn split_file_name(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(0) | None => (name, None),
        Some(idx) => (&name[..idx], Some(&name[idx + 1..])),
    }
}

/// Joins a stem and optional extension back into a file name.
#[must_use]
pub fn join_file_name(stem: &str, ext: Option<&str>) -> String {
    match ext {
        Some(ext) if !ext.is_empty() => format!("{stem}.{ext}"),
        _ => stem.to_string(),
    }
}

/// Returns a path in `dir` named `file_name` that does not exist yet,
/// appending `_1`, `_2`, ... to the stem on collision.
#[must_use]
pub fn unique_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = split_file_name(file_name);
    (1..)
        .map(|n| dir.join(join_file_name(&format!("{stem}_{n}"), ext)))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Renames `from` into `dir` under `file_name`, suffixing on collision.
///
/// Returns the final path.
///
/// # Errors
///
/// Returns the underlying I/O error if the rename fails.
pub fn move_unique(from: &Path, dir: &Path, file_name: &str) -> io::Result<PathBuf> {
    let target = unique_path(dir, file_name);
    std::fs::rename(from, &target)?;
    Ok(target)
}
