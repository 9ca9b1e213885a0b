//! Error types for packing runs.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by a packing run.
#[derive(Debug, Error)]
pub enum PackError {
    /// Obfuscation label was neither 0 nor 1.
    #[error("obfuscation label must be either 0 or 1, got {0}")]
    InvalidLabel(i64),

    /// Records-per-shard capacity was zero.
    #[error("records per shard must be at least 1")]
    InvalidCapacity,

    /// The file-list path does not exist.
    #[error("path to file list does not exist: {}", .path.display())]
    MissingFileList {
        /// The missing list path
        path: PathBuf,
    },

    /// Output directory could not be created or is not a directory.
    #[error("cannot use output directory {}: {source}", .path.display())]
    OutputDir {
        /// The unusable directory path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A listed source file could not be opened or read.
    ///
    /// Under [`crate::ReadPolicy::FailFast`] this aborts the run;
    /// shards finalized before the abort remain valid on disk.
    #[error("cannot read source file {}: {source}", .path.display())]
    SourceRead {
        /// The unreadable source path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A shard file could not be created or written.
    #[error("cannot write shard {}: {source}", .path.display())]
    ShardWrite {
        /// The shard path being written
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file list itself failed mid-read.
    #[error("cannot read file list: {0}")]
    ListRead(#[from] std::io::Error),
}

impl PackError {
    /// Check if this error is a pre-flight validation failure, i.e.
    /// one reported before any shard file is created.
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            PackError::InvalidLabel(_)
                | PackError::InvalidCapacity
                | PackError::MissingFileList { .. }
                | PackError::OutputDir { .. }
        )
    }
}

/// Result type for packing operations.
pub type Result<T> = std::result::Result<T, PackError>;
