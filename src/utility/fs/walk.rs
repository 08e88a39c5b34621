// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parallel traversal of mod folders.
//!
//! Both entry points share one `ignore::WalkParallel` driver. Workers push
//! matching file paths into a flume channel that is drained once the walk
//! completes, and the result is sorted so scans and rewrites see the same
//! order on every platform.

use crate::error::Result;
use bon::Builder;
use flume::{Sender, unbounded};
use ignore::{DirEntry, WalkBuilder, WalkState};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};
use wax::{Glob, Program};

/// How a folder is traversed.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Deepest level to descend into. Unlimited when unset.
    #[builder(setters(name = with_max_depth))]
    max_depth: Option<usize>,
    #[builder(setters(name = with_follow_links), default = false)]
    follow_links: bool,
    /// Visit dot-files and dot-directories.
    #[builder(setters(name = with_include_hidden), default = false)]
    include_hidden: bool,
    /// Skip whatever `.gitignore`/`.ignore` files exclude.
    #[builder(setters(name = with_honour_ignore_files), default = true)]
    honour_ignore_files: bool,
    #[builder(setters(name = with_threads))]
    threads: Option<usize>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    /// Options for walking a mod folder.
    ///
    /// Every file belongs to the mod, so hidden files are visited and ignore
    /// files are not consulted.
    #[must_use]
    pub fn for_mod_tree() -> Self {
        Self::builder()
            .with_include_hidden(true)
            .with_honour_ignore_files(false)
            .build()
    }

    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    #[must_use]
    pub const fn honour_ignore_files(&self) -> bool {
        self.honour_ignore_files
    }

    fn walker(&self, root: &Path) -> WalkBuilder {
        let ignore_files = self.honour_ignore_files;
        let mut builder = WalkBuilder::new(root);
        builder
            .max_depth(self.max_depth)
            .follow_links(self.follow_links)
            .hidden(!self.include_hidden)
            .git_ignore(ignore_files)
            .git_global(ignore_files)
            .git_exclude(ignore_files)
            .ignore(ignore_files)
            .parents(ignore_files);
        if let Some(threads) = self.threads {
            builder.threads(threads);
        }
        builder
    }
}

/// Files found under a root, sorted by path.
#[derive(Debug, Default)]
pub struct WalkResult {
    files: Vec<PathBuf>,
    error_count: usize,
}

impl WalkResult {
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Entries that could not be read (permission errors, broken links).
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.error_count
    }

    #[must_use]
    pub fn into_files(self) -> Vec<PathBuf> {
        self.files
    }
}

/// Runs a parallel walk, sending every regular file accepted by `keep`.
fn collect_files<F>(root: &Path, options: &WalkOptions, keep: F) -> Result<WalkResult>
where
    F: Fn(&DirEntry) -> bool + Send + Sync,
{
    if !root.is_dir() {
        anyhow::bail!("folder does not exist: {}", root.display());
    }

    let (tx, rx) = unbounded::<PathBuf>();
    let errors = Arc::new(AtomicUsize::new(0));

    options.walker(root).build_parallel().run(|| {
        let tx: Sender<PathBuf> = tx.clone();
        let errors = Arc::clone(&errors);
        let keep = &keep;
        Box::new(move |entry| {
            match entry {
                Ok(entry) if entry.file_type().is_some_and(|ft| ft.is_file()) => {
                    if keep(&entry) {
                        let _ = tx.send(entry.into_path());
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    errors.fetch_add(1, Ordering::Relaxed);
                }
            }
            WalkState::Continue
        })
    });
    drop(tx);

    let mut files: Vec<PathBuf> = rx.drain().collect();
    files.sort();
    let error_count = errors.load(Ordering::Relaxed);
    debug!(root = %root.display(), files = files.len(), error_count, "walk finished");
    Ok(WalkResult { files, error_count })
}

/// Lists every file under `root`.
///
/// # Errors
///
/// Returns an error if `root` is not a directory.
///
/// # Example
/// ```no_run
/// use slotmod_rs::utility::fs::walk::{parallel_walk, WalkOptions};
///
/// let result = parallel_walk("/path/to/mod", &WalkOptions::for_mod_tree())?;
/// println!("{} files", result.files().len());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn parallel_walk<P: AsRef<Path>>(root: P, options: &WalkOptions) -> Result<WalkResult> {
    collect_files(root.as_ref(), options, |_| true)
}

/// Lists the files under a mod folder whose slash-separated relative path
/// matches the glob `pattern`.
///
/// # Errors
///
/// Returns an error if `root` is not a directory or the pattern does not
/// compile.
///
/// # Example
/// ```no_run
/// use slotmod_rs::utility::fs::walk::find_files;
///
/// for buffer in find_files("/path/to/mod", "**/*.{ib,buf}")? {
///     println!("{}", buffer.display());
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn find_files<P: AsRef<Path>>(root: P, pattern: &str) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    let glob =
        Glob::new(pattern).map_err(|e| anyhow::anyhow!("invalid glob pattern '{pattern}': {e}"))?;

    let result = collect_files(root, &WalkOptions::for_mod_tree(), |entry| {
        entry
            .path()
            .strip_prefix(root)
            .is_ok_and(|rel| glob.is_match(rel))
    })?;
    Ok(result.into_files())
}

/// Path of `path` relative to `root` with forward slashes, e.g. `sub/vb0.assets`.
#[must_use]
pub fn relative_slash_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
