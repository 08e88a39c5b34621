// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!             SlotError (~24 bytes)
//!                     |
//!   +--------+--------+--------+--------+
//!   |        |        |        |        |
//!   v        v        v        v        v
//! Config  Metadata   Fs     Export  Io/Other
//!  Box      Box      Box     Box    Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Config    ParseError, MissingKey, InvalidValue
//!   Metadata  NotFound, Malformed
//!   Fs        NotFound, PermissionDenied, IoError
//!   Export    Busy, MissingModRoot, StagingFailed
//! ```
//!
//! Only staging and the single-flight gate are fatal to an export run. Every
//! other failure is recorded as an [`Incident`] in the run's
//! [`RunLog`](crate::logging::journal::RunLog).

use std::fmt;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`SlotError`].
pub type SlotResult<T> = std::result::Result<T, SlotError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum small on the stack.
#[derive(Debug, Error)]
pub enum SlotError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Component metadata could not be loaded.
    #[error("metadata error: {0}")]
    Metadata(#[from] Box<MetadataError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// Export could not be started or staged.
    #[error("export error: {0}")]
    Export(#[from] Box<ExportError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for SlotError {
                fn from(err: $error) -> Self {
                    SlotError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    MetadataError => Metadata,
    FsError => Fs,
    ExportError => Export,
    std::io::Error => Io,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Metadata Errors ---

/// Component metadata (`hash.json`) errors.
///
/// These never abort a run: the loader degrades to an empty schema and
/// records [`Incident::MetadataUnavailable`].
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Metadata file does not exist.
    #[error("metadata file not found: {0}")]
    NotFound(String),

    /// Metadata file exists but could not be read or decoded.
    #[error("malformed metadata in '{path}': {message}")]
    Malformed { path: String, message: String },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// Permission denied.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Classifies an I/O error against the path it happened on.
    #[must_use]
    pub fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        let display = path.display().to_string();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(display),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(display),
            _ => Self::IoError {
                path: display,
                source,
            },
        }
    }
}

// --- Export Errors ---

/// Errors that abort an export before any mutation happens.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Another export is still in flight.
    #[error("an export is already running")]
    Busy,

    /// The mod source folder does not exist.
    #[error("mod folder not found: {0}")]
    MissingModRoot(String),

    /// The staging directory would be created inside the mod being staged.
    #[error("staging directory '{staged}' lies inside mod folder '{source_root}'")]
    StagingInsideSource { staged: String, source_root: String },

    /// Copying the mod into the staging directory failed.
    #[error("failed to stage '{source_root}' into '{staged}': {message}")]
    StagingFailed {
        source_root: String,
        staged: String,
        message: String,
    },

    /// The background rewrite worker panicked or was aborted.
    #[error("rewrite worker failed: {0}")]
    Worker(String),
}

// --- Incidents ---

/// Non-fatal failure categories recorded during an export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Incident {
    /// Missing or malformed component metadata; schema degraded to empty.
    MetadataUnavailable,
    /// A matched file could not be found during rename or patch.
    FileNotFound,
    /// A copy, move, rename, read or write failed for one operation.
    FilesystemFailure,
    /// A section matched several pruning rules, or a substitution matched nothing.
    StructuralAmbiguity,
}

impl Incident {
    /// All incident kinds in report order.
    pub const ALL: [Self; 4] = [
        Self::MetadataUnavailable,
        Self::FileNotFound,
        Self::FilesystemFailure,
        Self::StructuralAmbiguity,
    ];

    /// Stable identifier used in logs and summaries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MetadataUnavailable => "metadata_unavailable",
            Self::FileNotFound => "file_not_found",
            Self::FilesystemFailure => "filesystem_failure",
            Self::StructuralAmbiguity => "structural_ambiguity",
        }
    }
}

impl fmt::Display for Incident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
