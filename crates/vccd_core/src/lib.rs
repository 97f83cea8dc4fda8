//! # VCCD Core
//!
//! Compilation pipeline for VCCD closed-caption archives.
//!
//! Turns a UTF-16LE caption source file (quoted `"key" "value"` pairs
//! under a `Tokens` section) into the compact binary archive used for
//! runtime caption lookup by CRC-32 key hash.
//!
//! The pipeline is a single synchronous pass:
//!
//! 1. Decode the source and scan it line by line ([`scan_source`])
//! 2. Sort captions by key ([`CaptionList::sort`])
//! 3. Pack the header, directory and data blocks ([`serialize`])
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! vccd_core::compile_file(
//!     Path::new("closecaption_english.txt"),
//!     Path::new("closecaption_english.dat"),
//! )
//! .unwrap();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod archive;
mod caption;
mod error;
mod extract;
mod list;
mod source;

pub use archive::{
    serialize, BLOCK_SIZE, DIR_ENTRY_SIZE, FORMAT_VERSION, HEADER_SIZE, MAGIC, MAX_VALUE_BYTES,
};
pub use caption::Caption;
pub use error::{CompileError, CompileResult};
pub use extract::{extract_line, Extracted};
pub use list::CaptionList;
pub use source::{read_captions, scan_source};

use std::path::Path;
use tracing::info;
use vccd_storage::FileSink;

/// Compiles a caption source file into an archive on disk.
///
/// The output file is created only after the source has been scanned
/// successfully, so scan failures leave nothing behind.
///
/// # Errors
///
/// Any [`CompileError`]; the failure aborts the whole compilation and
/// all partially-built state is dropped.
pub fn compile_file(source: &Path, output: &Path) -> CompileResult<()> {
    let mut captions = read_captions(source)?;
    captions.sort();

    let mut sink = FileSink::create(output)?;
    serialize(captions, &mut sink)?;

    info!(output = %output.display(), "archive compiled");
    Ok(())
}

/// Compiles raw source bytes into an in-memory archive.
///
/// Useful for tests and for callers that manage their own files.
///
/// # Errors
///
/// Same failure modes as [`compile_file`], minus the file I/O.
pub fn compile_bytes(source: &[u8]) -> CompileResult<Vec<u8>> {
    let mut captions = scan_source(source)?;
    captions.sort();

    let mut sink = vccd_storage::MemorySink::new();
    serialize(captions, &mut sink)?;
    Ok(sink.into_data())
}
