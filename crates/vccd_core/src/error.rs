//! Error types for the compilation pipeline.

use std::io;
use thiserror::Error;

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors that can occur while compiling a caption source file.
///
/// Every variant is fatal: the compilation pass aborts and all
/// partially-built state is dropped. There is no warning tier.
#[derive(Debug, Error)]
pub enum CompileError {
    /// I/O error while reading the source or writing the archive.
    #[error("{0}")]
    Io(#[from] io::Error),

    /// Sink error while writing the archive.
    #[error("{0}")]
    Storage(#[from] vccd_storage::StorageError),

    /// End of file reached before the `Tokens` section marker.
    #[error("could not find token declaration")]
    MissingSectionMarker,

    /// A caption's key was empty after extraction.
    #[error("line {line} has a key of length 0")]
    EmptyKey {
        /// Source line number of the offending entry.
        line: u32,
    },

    /// A caption's serialized value exceeds half the block size.
    #[error("value at line {line} exceeds maximum length of {max_bytes} bytes")]
    ValueTooLarge {
        /// Source line number of the offending entry.
        line: u32,
        /// Maximum allowed serialized length in bytes.
        max_bytes: usize,
    },

    /// The source file contains malformed UTF-16.
    #[error("source is not valid UTF-16LE text")]
    Encoding,

    /// Bytes written after the data offset do not match the expected total.
    #[error("written byte count mismatch: expected {expected}, wrote {actual}")]
    IoConsistency {
        /// Expected total bytes after the data offset.
        expected: u64,
        /// Actual bytes written.
        actual: u64,
    },
}
