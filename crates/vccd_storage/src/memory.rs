//! In-memory sink for testing.

use crate::error::{StorageError, StorageResult};
use crate::sink::Sink;

/// An in-memory sink.
///
/// Collects all written bytes in a `Vec<u8>`, which makes byte-exact
/// assertions on the produced archive straightforward. Suitable for:
/// - Unit tests
/// - Integration tests
/// - Compiling to memory without touching the filesystem
///
/// # Example
///
/// ```rust
/// use vccd_storage::{MemorySink, Sink};
///
/// let mut sink = MemorySink::new();
/// sink.append(b"test data").unwrap();
/// assert_eq!(sink.position(), 9);
/// assert_eq!(sink.data(), b"test data");
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    data: Vec<u8>,
}

impl MemorySink {
    /// Creates a new empty in-memory sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the sink and returns the written bytes.
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

impl Sink for MemorySink {
    fn append(&mut self, data: &[u8]) -> StorageResult<()> {
        self.data.extend_from_slice(data);
        Ok(())
    }

    fn fill(&mut self, byte: u8, count: usize) -> StorageResult<()> {
        self.data.resize(self.data.len() + count, byte);
        Ok(())
    }

    fn position(&self) -> u64 {
        self.data.len() as u64
    }

    fn patch(&mut self, offset: u64, data: &[u8]) -> StorageResult<()> {
        let offset_usize = offset as usize;
        let end = offset_usize.saturating_add(data.len());
        if end > self.data.len() {
            return Err(StorageError::PatchPastEnd {
                offset,
                len: data.len(),
                written: self.data.len() as u64,
            });
        }

        self.data[offset_usize..end].copy_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> StorageResult<()> {
        // Nothing buffered
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_accumulates() {
        let mut sink = MemorySink::new();
        sink.append(b"hello").unwrap();
        sink.append(b" world").unwrap();

        assert_eq!(sink.position(), 11);
        assert_eq!(sink.data(), b"hello world");
    }

    #[test]
    fn fill_pads() {
        let mut sink = MemorySink::new();
        sink.append(b"x").unwrap();
        sink.fill(0, 3).unwrap();

        assert_eq!(sink.data(), b"x\0\0\0");
    }

    #[test]
    fn patch_in_place() {
        let mut sink = MemorySink::new();
        sink.append(b"aaaa").unwrap();
        sink.patch(1, b"bb").unwrap();

        assert_eq!(sink.data(), b"abba");
        assert_eq!(sink.position(), 4);
    }

    #[test]
    fn patch_past_end_fails() {
        let mut sink = MemorySink::new();
        sink.append(b"ab").unwrap();

        let result = sink.patch(1, b"xy");
        assert!(matches!(result, Err(StorageError::PatchPastEnd { .. })));
    }

    #[test]
    fn into_data_returns_bytes() {
        let mut sink = MemorySink::new();
        sink.append(b"bytes").unwrap();
        assert_eq!(sink.into_data(), b"bytes".to_vec());
    }
}
