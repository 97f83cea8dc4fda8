//! Caption records and key hashing.

/// One compiled caption entry.
///
/// Created by the extractor from a single source line, held by the
/// [`CaptionList`](crate::CaptionList) until the serializer drains it,
/// and dropped as soon as its value has been written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    /// Canonicalized key: lowercased, trimmed, quote-stripped.
    pub key: String,
    /// Decoded value, case unchanged, quote-stripped.
    pub value: String,
    /// CRC-32 of the key's UTF-8 bytes.
    pub hash: u32,
}

impl Caption {
    /// Builds a caption and hashes its key.
    ///
    /// The key must already be canonicalized (lowercased) by the
    /// extractor. The hash is the standard CRC-32 (ISO-3309 / zlib
    /// polynomial) over the key's UTF-8 bytes, excluding any terminator.
    #[must_use]
    pub fn new(key: String, value: String) -> Self {
        let hash = crc32fast::hash(key.as_bytes());
        Self { key, value, hash }
    }

    /// Serialized length of the value in bytes: its UTF-16 code units
    /// plus one terminator unit, two bytes each.
    #[must_use]
    pub fn value_len_bytes(&self) -> usize {
        (self.value.encode_utf16().count() + 1) * 2
    }

    /// Appends the value as UTF-16LE code units followed by a two-byte
    /// zero terminator.
    pub fn encode_value(&self, buf: &mut Vec<u8>) {
        for unit in self.value.encode_utf16() {
            buf.extend_from_slice(&unit.to_le_bytes());
        }
        buf.extend_from_slice(&[0, 0]);
    }
}
