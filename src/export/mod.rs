// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Export orchestration.
//!
//! ```text
//! Exporter::export(mod_root, slots)
//!   begin()        one-permit semaphore, Busy if a run is in flight
//!   stage()        output_root/<mod name> replaced by a fresh copy
//!                  (fatal: MissingModRoot, StagingInsideSource, StagingFailed)
//!   spawn_blocking RewriteEngine::rewrite(staged_root, slots)
//!                  (the permit travels with it and drops when it returns)
//!   -> ExportReport { staged_root, record, configs, pruned, log }
//! ```
//!
//! Nothing in the source mod folder is ever modified: every mutation
//! happens on the staged copy.


use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, info};

use crate::config::Config;
use crate::dialect::Dialect;
use crate::error::{ExportError, SlotResult};
use crate::logging::journal::RunLog;
use crate::rewrite::{RenameRecord, RewriteEngine, RewriteOptions};
use crate::slots::ResolvedSlot;
use crate::utility::fs::copy::replace_dir_async;

/// Result of one export run.
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Root of the staged, rewritten copy.
    pub staged_root: PathBuf,
    /// Number of files copied into the staging directory.
    pub copied: usize,
    pub record: RenameRecord,
    /// Configuration files written.
    pub configs: Vec<PathBuf>,
    /// Sections removed by pruning.
    pub pruned: Vec<String>,
    pub log: RunLog,
}

/// Proof that the caller holds the single export slot.
///
/// The slot is released when the permit is dropped.
#[derive(Debug)]
pub struct ExportPermit {
    _permit: OwnedSemaphorePermit,
}

/// Runs exports one at a time.
///
/// Clones share the same gate, so a clone handed to another task still
/// sees a run started through the original.
#[derive(Debug, Clone)]
pub struct Exporter {
    gate: Arc<Semaphore>,
    output_root: PathBuf,
    dialect: Arc<Dialect>,
    options: RewriteOptions,
}

impl Exporter {
    #[must_use]
    pub fn new(output_root: impl Into<PathBuf>, dialect: Dialect, options: RewriteOptions) -> Self {
        Self {
            gate: Arc::new(Semaphore::new(1)),
            output_root: output_root.into(),
            dialect: Arc::new(dialect),
            options,
        }
    }

    /// Exporter configured from `[paths]`, `[dialect]` and `[export]`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.paths.output_root.clone(),
            config.dialect.clone(),
            config.rewrite_options(),
        )
    }

    #[must_use]
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// True while a run holds the export slot.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.gate.available_permits() == 0
    }

    /// Claims the export slot without waiting.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Busy` if another export is in flight.
    pub fn begin(&self) -> Result<ExportPermit, ExportError> {
        Arc::clone(&self.gate)
            .try_acquire_owned()
            .map(|permit| ExportPermit { _permit: permit })
            .map_err(|_| ExportError::Busy)
    }

    /// Stages `mod_root` and rewrites the staged copy for `slots`.
    ///
    /// # Errors
    ///
    /// Returns an error if another export is in flight, if staging fails, or
    /// if the rewrite worker dies. Per-file failures during the rewrite are
    /// recorded in the report's log instead.
    pub async fn export(&self, mod_root: &Path, slots: Vec<ResolvedSlot>) -> SlotResult<ExportReport> {
        let permit = self.begin()?;
        self.export_with(permit, mod_root, slots).await
    }

    /// Runs an export under a permit obtained from [`Exporter::begin`].
    ///
    /// # Errors
    ///
    /// Same as [`Exporter::export`], minus the busy check.
    pub async fn export_with(
        &self,
        permit: ExportPermit,
        mod_root: &Path,
        slots: Vec<ResolvedSlot>,
    ) -> SlotResult<ExportReport> {
        let (staged_root, copied) = self.stage(mod_root).await?;
        info!(
            staged = %staged_root.display(),
            copied,
            slots = slots.len(),
            "staged mod folder"
        );

        let dialect = Arc::clone(&self.dialect);
        let options = self.options;
        let root = staged_root.clone();
        let outcome = run_exclusive(permit, move || {
            RewriteEngine::new(&dialect, options).rewrite(&root, &slots)
        })
        .await?;

        info!(
            files = outcome.record.files.len(),
            sections = outcome.record.sections.len(),
            pruned = outcome.pruned.len(),
            "export finished"
        );
        Ok(ExportReport {
            staged_root,
            copied,
            record: outcome.record,
            configs: outcome.configs,
            pruned: outcome.pruned,
            log: outcome.log,
        })
    }

    /// Replaces `output_root/<mod name>` with a fresh copy of `mod_root`.
    async fn stage(&self, mod_root: &Path) -> Result<(PathBuf, usize), ExportError> {
        let display = mod_root.display().to_string();
        let is_dir = tokio::fs::metadata(mod_root)
            .await
            .is_ok_and(|meta| meta.is_dir());
        if !is_dir {
            return Err(ExportError::MissingModRoot(display));
        }

        let source = tokio::fs::canonicalize(mod_root)
            .await
            .map_err(|_| ExportError::MissingModRoot(display.clone()))?;
        let Some(name) = source.file_name().map(ToOwned::to_owned) else {
            return Err(ExportError::MissingModRoot(display));
        };

        let staging_failed = |staged: &Path, message: String| ExportError::StagingFailed {
            source_root: source.display().to_string(),
            staged: staged.display().to_string(),
            message,
        };

        tokio::fs::create_dir_all(&self.output_root)
            .await
            .map_err(|e| staging_failed(&self.output_root, e.to_string()))?;
        let output_root = tokio::fs::canonicalize(&self.output_root)
            .await
            .map_err(|e| staging_failed(&self.output_root, e.to_string()))?;
        let staged = output_root.join(name);
        debug!(source = %source.display(), staged = %staged.display(), "staging");

        if source.starts_with(&staged) {
            return Err(staging_failed(
                &staged,
                "staging directory would replace the mod folder".to_string(),
            ));
        }
        if staged.starts_with(&source) {
            return Err(ExportError::StagingInsideSource {
                staged: staged.display().to_string(),
                source_root: source.display().to_string(),
            });
        }

        let copied = replace_dir_async(&source, &staged)
            .await
            .map_err(|e| staging_failed(&staged, format!("{e:#}")))?;
        Ok((staged, copied))
    }
}

/// Runs `work` on the blocking pool while holding `permit`.
///
/// The permit moves into the blocking task, so the export slot stays taken
/// until `work` returns even when the awaiting future is dropped.
async fn run_exclusive<T, F>(permit: ExportPermit, work: F) -> Result<T, ExportError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let _permit = permit;
        work()
    })
    .await
    .map_err(|e| ExportError::Worker(e.to_string()))
}
