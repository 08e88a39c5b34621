// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Slash-path helpers for paths written inside configuration files.
//!
//! ```text
//! normalize_slashes(".\sub\a.buf")      -> "sub/a.buf"
//! base_name("sub\a.buf")                -> "a.buf"
//! join_relative("sub/deep", "../a.buf") -> "sub/a.buf"
//! ```

/// Backslashes to slashes, leading `./` removed.
#[must_use]
pub fn normalize_slashes(path: &str) -> String {
    path.trim()
        .replace('\\', "/")
        .trim_start_matches("./")
        .to_string()
}

/// Last component of a slash or backslash path.
#[must_use]
pub fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Joins a relative slash path onto a slash directory, folding `.` and `..`.
///
/// `..` past the start is kept, so an escaping path never matches a file
/// inside the tree.
#[must_use]
pub fn join_relative(dir: &str, rel: &str) -> String {
    let mut parts: Vec<&str> = dir.split('/').filter(|p| !p.is_empty()).collect();
    for part in rel.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }
    parts.join("/")
}

/// Directory part of a slash path (`""` for a bare name).
#[must_use]
pub fn parent_dir(rel: &str) -> &str {
    rel.rsplit_once('/').map_or("", |(dir, _)| dir)
}
