//! Error types for archive loading and view selection.
//!
//! Loader failures are typed so callers can tell a missing archive apart from a
//! broken one. Everything above the library (CLI, TUI loop) works in `anyhow`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to produce an [`Archive`](crate::models::Archive) from a file.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The archive path does not resolve to a file.
    #[error("Archive not found: {path}")]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("Failed to read archive {path}: {source}")]
    Io {
        /// Path of the archive.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is above the loader's size cap.
    #[error("Archive too large: {path} ({size} bytes, max {max} bytes)")]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    /// Content is not JSON, or not a sequence of conversation objects.
    #[error("Malformed archive {path}: {reason}")]
    Malformed {
        /// Path of the archive.
        path: PathBuf,
        /// Human-readable description of what was wrong.
        reason: String,
        #[source]
        source: Option<serde_json::Error>,
    },
}

impl ArchiveError {
    /// True when the failure is a missing file rather than bad content.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ArchiveError::NotFound { .. })
    }
}

/// Failure to resolve a position in the derived view.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("Selection {index} is outside the current view ({len} conversations)")]
    SelectionOutOfRange { index: usize, len: usize },
}
