//! Text record extraction: one decoded source line to a caption.

use crate::archive::MAX_VALUE_BYTES;
use crate::caption::Caption;
use crate::error::{CompileError, CompileResult};

/// Reserved key marking a localization-variant header line.
const VARIANT_MARKER: &str = "[english]";

/// Outcome of extracting a single source line.
#[derive(Debug, PartialEq, Eq)]
pub enum Extracted {
    /// The line produced a valid caption.
    Caption(Caption),
    /// The line carries no caption and is silently dropped: blank
    /// lines, comments, braces, variant headers, empty values.
    Skip,
}

/// Extracts a `(key, value)` caption from one decoded line.
///
/// The key is lowercased and quote-stripped; the value keeps its case.
/// `line_no` is only used to report failures.
///
/// # Errors
///
/// - [`CompileError::EmptyKey`] if the key is empty after extraction.
/// - [`CompileError::ValueTooLarge`] if the serialized value (UTF-16
///   code units plus terminator, two bytes each) exceeds half the block
///   size.
pub fn extract_line(line: &str, line_no: u32) -> CompileResult<Extracted> {
    let mut chars = line.chars().peekable();

    // Key
    while chars.next_if(|c| c.is_whitespace()).is_some() {}

    match chars.peek() {
        None | Some('/' | '{' | '}') => return Ok(Extracted::Skip),
        Some('"') => {
            chars.next();
        }
        Some(_) => {}
    }

    let mut key = String::new();
    while let Some(&c) = chars.peek() {
        if c == '"' || c.is_whitespace() {
            break;
        }
        for lc in c.to_lowercase() {
            key.push(lc);
        }
        chars.next();
    }
    let _ = chars.next_if_eq(&'"');

    if key.is_empty() {
        return Err(CompileError::EmptyKey { line: line_no });
    }
    if key == VARIANT_MARKER {
        return Ok(Extracted::Skip);
    }

    // Value
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
    let _ = chars.next_if_eq(&'"');

    let mut value = String::new();
    for c in chars.by_ref() {
        if c == '"' {
            break;
        }
        value.push(c);
    }

    if value.is_empty() {
        return Ok(Extracted::Skip);
    }

    let caption = Caption::new(key, value);
    if caption.value_len_bytes() > MAX_VALUE_BYTES {
        return Err(CompileError::ValueTooLarge {
            line: line_no,
            max_bytes: MAX_VALUE_BYTES,
        });
    }

    Ok(Extracted::Caption(caption))
}
