//! Error types for sink operations.

use std::io;
use thiserror::Error;

/// Result type for sink operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while writing to a sink.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Attempted to patch bytes beyond what has been written.
    #[error("patch beyond end of sink: offset {offset}, len {len}, written {written}")]
    PatchPastEnd {
        /// The requested patch offset.
        offset: u64,
        /// The requested patch length.
        len: usize,
        /// The number of bytes written so far.
        written: u64,
    },
}
