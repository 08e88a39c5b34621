// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use anyhow::Context;
use std::path::Path;
use tokio::fs;

/// Recursively copies all contents from src directory to dst directory.
///
/// Creates dst if it doesn't exist. Returns the number of files copied.
///
/// # Example
/// ```no_run
/// use slotmod_rs::utility::fs::copy::copy_dir_contents_async;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// copy_dir_contents_async(Path::new("mods/Astra"), Path::new("output/Astra")).await?;
/// # Ok(())
/// # }
/// ```
/// # Errors
///
/// Returns an error if any IO operation fails (creating directory, reading, copying).
pub async fn copy_dir_contents_async(src: &Path, dst: &Path) -> Result<usize> {
    fs::create_dir_all(dst)
        .await
        .with_context(|| format!("failed to create directory {}", dst.display()))?;

    let mut entries = fs::read_dir(src)
        .await
        .with_context(|| format!("failed to read directory {}", src.display()))?;

    let mut copied = 0;
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("failed to read entry from {}", src.display()))?
    {
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copied += Box::pin(copy_dir_contents_async(&src_path, &dst_path)).await?;
        } else {
            fs::copy(&src_path, &dst_path).await.with_context(|| {
                format!(
                    "failed to copy {} to {}",
                    src_path.display(),
                    dst_path.display()
                )
            })?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Replaces `dst` with a fresh copy of `src`.
///
/// Any previous directory at `dst` is removed first.
///
/// # Errors
///
/// Returns an error if the old copy cannot be removed or the copy fails.
pub async fn replace_dir_async(src: &Path, dst: &Path) -> Result<usize> {
    if fs::try_exists(dst).await.unwrap_or(false) {
        fs::remove_dir_all(dst)
            .await
            .with_context(|| format!("failed to remove previous copy {}", dst.display()))?;
    }
    copy_dir_contents_async(src, dst).await
}
