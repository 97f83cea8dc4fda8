//! File-backed sink for writing archives to disk.

use crate::error::{StorageError, StorageResult};
use crate::sink::Sink;
use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// A file-backed sink.
///
/// Writes are buffered through a [`BufWriter`]; a [`patch`](Sink::patch)
/// seeks back into the written prefix, rewrites the region, and returns
/// the cursor to the end of the file.
///
/// # Example
///
/// ```no_run
/// use vccd_storage::{FileSink, Sink};
/// use std::path::Path;
///
/// let mut sink = FileSink::create(Path::new("captions.dat")).unwrap();
/// sink.append(b"header").unwrap();
/// sink.patch(0, b"H").unwrap();
/// sink.flush().unwrap();
/// ```
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
    written: u64,
}

impl FileSink {
    /// Creates the file at `path`, truncating any existing content.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(path: &Path) -> StorageResult<Self> {
        let file = File::create(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn append(&mut self, data: &[u8]) -> StorageResult<()> {
        self.writer.write_all(data)?;
        self.written += data.len() as u64;
        Ok(())
    }

    fn fill(&mut self, byte: u8, count: usize) -> StorageResult<()> {
        const CHUNK: usize = 512;
        let pattern = [byte; CHUNK];
        let mut remaining = count;
        while remaining > 0 {
            let n = remaining.min(CHUNK);
            self.writer.write_all(&pattern[..n])?;
            remaining -= n;
        }
        self.written += count as u64;
        Ok(())
    }

    fn position(&self) -> u64 {
        self.written
    }

    fn patch(&mut self, offset: u64, data: &[u8]) -> StorageResult<()> {
        let end = offset.saturating_add(data.len() as u64);
        if end > self.written {
            return Err(StorageError::PatchPastEnd {
                offset,
                len: data.len(),
                written: self.written,
            });
        }

        // Seeking through a BufWriter flushes pending bytes first.
        self.writer.seek(SeekFrom::Start(offset))?;
        self.writer.write_all(data)?;
        self.writer.seek(SeekFrom::Start(self.written))?;
        Ok(())
    }

    fn flush(&mut self) -> StorageResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn create_new_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.dat");

        let sink = FileSink::create(&path).unwrap();
        assert_eq!(sink.position(), 0);
        assert!(path.exists());
    }

    #[test]
    fn append_and_fill() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.dat");

        let mut sink = FileSink::create(&path).unwrap();
        sink.append(b"abc").unwrap();
        sink.fill(0, 5).unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.position(), 8);

        let data = std::fs::read(&path).unwrap();
        assert_eq!(&data, b"abc\0\0\0\0\0");
    }

    #[test]
    fn fill_larger_than_chunk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.dat");

        let mut sink = FileSink::create(&path).unwrap();
        sink.fill(0xAB, 1300).unwrap();
        sink.flush().unwrap();

        let data = std::fs::read(&path).unwrap();
        assert_eq!(data.len(), 1300);
        assert!(data.iter().all(|&b| b == 0xAB));
    }

    #[test]
    fn patch_rewrites_prefix() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.dat");

        let mut sink = FileSink::create(&path).unwrap();
        sink.append(b"xxxx tail").unwrap();
        sink.patch(0, b"head").unwrap();
        sink.append(b" more").unwrap();
        sink.flush().unwrap();

        let data = std::fs::read(&path).unwrap();
        assert_eq!(&data, b"head tail more");
    }

    #[test]
    fn patch_past_end_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.dat");

        let mut sink = FileSink::create(&path).unwrap();
        sink.append(b"ab").unwrap();

        let result = sink.patch(1, b"xy");
        assert!(matches!(result, Err(StorageError::PatchPastEnd { .. })));
    }

    #[test]
    fn create_truncates_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.dat");
        std::fs::write(&path, b"old content").unwrap();

        let mut sink = FileSink::create(&path).unwrap();
        sink.append(b"new").unwrap();
        sink.flush().unwrap();

        let data = std::fs::read(&path).unwrap();
        assert_eq!(&data, b"new");
    }

    #[test]
    fn path_accessor() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.dat");

        let sink = FileSink::create(&path).unwrap();
        assert_eq!(sink.path(), path);
    }
}
