//! The `Sink` trait - the compiler's output abstraction.

use crate::error::StorageResult;

/// An append-oriented byte destination with support for patching
/// already-written bytes.
///
/// The compiler emits an archive header before the total block count is
/// known, then patches the count back in once all data blocks have been
/// packed. `Sink` therefore exposes a two-write protocol: sequential
/// [`append`](Sink::append) / [`fill`](Sink::fill) calls build the file
/// front to back, and a single [`patch`](Sink::patch) rewrites a small
/// region inside the already-written prefix.
///
/// Sinks never interpret the bytes they are given.
pub trait Sink {
    /// Appends `data` at the current position.
    fn append(&mut self, data: &[u8]) -> StorageResult<()>;

    /// Appends `count` repetitions of `byte` at the current position.
    ///
    /// Used for directory and block padding.
    fn fill(&mut self, byte: u8, count: usize) -> StorageResult<()>;

    /// Returns the number of bytes appended so far.
    fn position(&self) -> u64;

    /// Overwrites `data.len()` bytes at `offset` within the
    /// already-written prefix.
    ///
    /// # Errors
    ///
    /// Fails with [`StorageError::PatchPastEnd`] if the patched region
    /// extends beyond the current position.
    ///
    /// [`StorageError::PatchPastEnd`]: crate::StorageError::PatchPastEnd
    fn patch(&mut self, offset: u64, data: &[u8]) -> StorageResult<()>;

    /// Flushes any buffered bytes to the underlying destination.
    fn flush(&mut self) -> StorageResult<()>;
}
