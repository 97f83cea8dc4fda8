//! VCCD archive serialization.
//!
//! On-disk layout, all integers little-endian:
//!
//! ```text
//! offset 0  : i32 magic ("VCCD")
//! offset 4  : i32 version (=1)
//! offset 8  : i32 block_count   (patched in once known)
//! offset 12 : i32 block_size    (=8192)
//! offset 16 : i32 dir_size      (= caption count)
//! offset 20 : i32 data_offset   (directory end padded to 512)
//! offset 24 : dir_size x { u32 hash, i32 block, i16 offset, i16 length }
//! then zero padding to data_offset
//! then block_count x 8192-byte blocks of packed UTF-16LE values
//! ```
//!
//! Directory entries are written in ascending key order so a reader can
//! binary-search the directory without an auxiliary index. Values never
//! span a block boundary.

use crate::error::{CompileError, CompileResult};
use crate::list::CaptionList;
use tracing::debug;
use vccd_storage::Sink;

/// Magic bytes identifying a VCCD archive.
pub const MAGIC: [u8; 4] = *b"VCCD";

/// Current archive format version.
pub const FORMAT_VERSION: i32 = 1;

/// Size of one data block in bytes.
pub const BLOCK_SIZE: usize = 8192;

/// Size of the archive header in bytes.
pub const HEADER_SIZE: usize = 24;

/// Size of one directory entry in bytes.
pub const DIR_ENTRY_SIZE: usize = 12;

/// Maximum serialized value length: half a block.
pub const MAX_VALUE_BYTES: usize = BLOCK_SIZE / 2;

/// The data region starts at a multiple of this.
const DATA_ALIGNMENT: usize = 512;

/// Byte offset of the block_count field within the header.
const BLOCK_COUNT_OFFSET: u64 = 8;

/// Archive header.
#[derive(Debug, Clone, Copy)]
struct Header {
    block_count: i32,
    dir_size: i32,
    data_offset: i32,
}

impl Header {
    fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0..4].copy_from_slice(&MAGIC);
        buf[4..8].copy_from_slice(&FORMAT_VERSION.to_le_bytes());
        buf[8..12].copy_from_slice(&self.block_count.to_le_bytes());
        buf[12..16].copy_from_slice(&(BLOCK_SIZE as i32).to_le_bytes());
        buf[16..20].copy_from_slice(&self.dir_size.to_le_bytes());
        buf[20..24].copy_from_slice(&self.data_offset.to_le_bytes());
        buf
    }
}

/// One directory entry, locating a value inside the data blocks.
#[derive(Debug, Clone, Copy)]
struct DirEntry {
    hash: u32,
    block: i32,
    offset: i16,
    length: i16,
}

impl DirEntry {
    fn encode(&self) -> [u8; DIR_ENTRY_SIZE] {
        let mut buf = [0u8; DIR_ENTRY_SIZE];
        buf[0..4].copy_from_slice(&self.hash.to_le_bytes());
        buf[4..8].copy_from_slice(&self.block.to_le_bytes());
        buf[8..10].copy_from_slice(&self.offset.to_le_bytes());
        buf[10..12].copy_from_slice(&self.length.to_le_bytes());
        buf
    }
}

/// Serializes a sorted caption list into `sink`, draining the list.
///
/// The header is emitted first with a zero block count; once every
/// value has been packed the true count is patched back in at offset 8.
/// Values accumulate in a growable in-memory buffer so the data region
/// is appended in a single write after the directory.
///
/// # Errors
///
/// Propagates sink failures, and fails with
/// [`CompileError::IoConsistency`] if the bytes written past the data
/// offset do not match the accumulated value and padding lengths.
pub fn serialize<S: Sink>(mut captions: CaptionList, sink: &mut S) -> CompileResult<()> {
    let dir_size = captions.len();
    let dir_end = HEADER_SIZE + dir_size * DIR_ENTRY_SIZE;
    // An already-aligned directory still gets a full alignment's worth
    // of padding.
    let dir_padding = DATA_ALIGNMENT - dir_end % DATA_ALIGNMENT;
    let data_offset = dir_end + dir_padding;

    let header = Header {
        block_count: 0,
        dir_size: dir_size as i32,
        data_offset: data_offset as i32,
    };
    debug!(
        version = FORMAT_VERSION,
        block_size = BLOCK_SIZE,
        dir_size,
        data_offset,
        "writing archive header"
    );
    sink.append(&header.encode())?;

    let mut data: Vec<u8> = Vec::with_capacity(BLOCK_SIZE);
    let mut expected_len: u64 = 0;
    let mut block: i32 = 0;
    let mut offset: usize = 0;

    while let Some(caption) = captions.pop() {
        let length = caption.value_len_bytes();

        if offset + length > BLOCK_SIZE {
            let leftover = BLOCK_SIZE - offset;
            data.resize(data.len() + leftover, 0);
            expected_len += leftover as u64;
            block += 1;
            offset = 0;
        }

        debug!(
            key = %caption.key,
            hash = caption.hash,
            block,
            offset,
            length,
            "writing caption"
        );
        let entry = DirEntry {
            hash: caption.hash,
            block,
            offset: offset as i16,
            length: length as i16,
        };
        sink.append(&entry.encode())?;

        caption.encode_value(&mut data);
        expected_len += length as u64;
        offset += length;
    }

    // Pad the final block to its boundary
    let leftover = BLOCK_SIZE - offset;
    data.resize(data.len() + leftover, 0);
    expected_len += leftover as u64;

    debug!(padding = dir_padding, "padding directory");
    sink.fill(0, dir_padding)?;

    debug!(bytes = data.len(), "writing data blocks");
    sink.append(&data)?;

    let actual = sink.position() - data_offset as u64;
    if actual != expected_len {
        return Err(CompileError::IoConsistency {
            expected: expected_len,
            actual,
        });
    }

    let block_count = block + 1;
    debug!(block_count, "patching block count");
    sink.patch(BLOCK_COUNT_OFFSET, &block_count.to_le_bytes())?;
    sink.flush()?;

    Ok(())
}
