//! Source file scanning: UTF-16LE decode and line-by-line extraction.

use crate::error::{CompileError, CompileResult};
use crate::extract::{extract_line, Extracted};
use crate::list::CaptionList;
use encoding_rs::UTF_16LE;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Section marker that opens the translatable entries.
const SECTION_MARKER: &str = "Tokens";

/// Reads and scans a caption source file from disk.
///
/// # Errors
///
/// Propagates I/O failures opening or reading the file, plus every
/// failure of [`scan_source`].
pub fn read_captions(path: &Path) -> CompileResult<CaptionList> {
    let bytes = fs::read(path)?;
    scan_source(&bytes)
}

/// Scans raw source bytes into a caption list.
///
/// The bytes are decoded as UTF-16LE (a leading byte-order marker is
/// honored and discarded), carriage returns are stripped, and lines are
/// consumed top to bottom: first a scan for the `Tokens` section marker,
/// then one extraction per line. Skipped lines are dropped silently;
/// the list is built in source order and left unsorted.
///
/// # Errors
///
/// - [`CompileError::Encoding`] if the bytes are not valid UTF-16LE.
/// - [`CompileError::MissingSectionMarker`] if the file ends before the
///   `Tokens` marker.
/// - Any extraction failure, carrying the offending line number.
pub fn scan_source(bytes: &[u8]) -> CompileResult<CaptionList> {
    let (text, _, had_errors) = UTF_16LE.decode(bytes);
    if had_errors {
        return Err(CompileError::Encoding);
    }

    let text = text.replace('\r', "");
    let mut lines = text.split('\n');
    let mut line_no: u32 = 0;

    let mut found_marker = false;
    for line in lines.by_ref() {
        line_no += 1;
        if is_section_marker(line) {
            found_marker = true;
            break;
        }
    }
    if !found_marker {
        return Err(CompileError::MissingSectionMarker);
    }

    let mut list = CaptionList::new();
    for line in lines {
        line_no += 1;
        debug!(line = line_no, text = line, "parsing line");

        match extract_line(line, line_no)? {
            Extracted::Caption(caption) => list.push(caption),
            Extracted::Skip => {}
        }
    }

    debug!(entries = list.len(), "scan complete");
    Ok(list)
}

fn is_section_marker(line: &str) -> bool {
    let line = line.trim_start();
    let line = line.strip_prefix('"').unwrap_or(line);
    line.starts_with(SECTION_MARKER)
}
