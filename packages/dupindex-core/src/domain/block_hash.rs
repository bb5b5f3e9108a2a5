//! Fixed-width block hash
//!
//! The upstream tokenizer hashes every fixed-size window of source content
//! and attaches the digest bytes to the block it emits. The index never
//! interprets those bytes; matching is exact byte-for-byte equality, and
//! hash quality is entirely the hasher's concern.
//!
//! The packed index stores hashes as big-endian `u32` words, so this type
//! also owns that encoding (`word`, `word_count`, `from_words`).

use crate::error::{DupIndexError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hash of one block's content, fixed-width per index instance
///
/// Ordering is byte-lexicographic, which for equal widths coincides with
/// the packed big-endian word ordering the packed index sorts by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockHash(Box<[u8]>);

impl BlockHash {
    /// Create a hash from raw digest bytes
    pub fn new(bytes: impl Into<Box<[u8]>>) -> Self {
        Self(bytes.into())
    }

    /// Parse a hash from a hexadecimal literal
    ///
    /// Rejects odd-length strings and non-hex characters. Mostly useful in
    /// tests and diagnostics; production blocks carry digest bytes directly.
    pub fn from_hex(hex: &str) -> Result<Self> {
        if hex.len() % 2 != 0 {
            return Err(DupIndexError::invalid_hash_literal(format!(
                "odd number of digits in {:?}",
                hex
            )));
        }
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DupIndexError::invalid_hash_literal(format!(
                "non-hex character in {:?}",
                hex
            )));
        }

        let bytes: Vec<u8> = (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0))
            .collect();
        Ok(Self(bytes.into_boxed_slice()))
    }

    /// Width of the hash in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a zero-width hash
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of `u32` words this hash packs into: `ceil(len / 4)`
    pub fn word_count(&self) -> usize {
        (self.0.len() + 3) / 4
    }

    /// The `index`-th big-endian `u32` word of the digest
    ///
    /// Bytes past the end of the digest read as zero, so widths that are
    /// not a multiple of 4 pack into a zero-padded final word.
    pub fn word(&self, index: usize) -> u32 {
        let mut word = 0u32;
        for k in 0..4 {
            let byte = self.0.get(index * 4 + k).copied().unwrap_or(0);
            word = (word << 8) | u32::from(byte);
        }
        word
    }

    /// Rebuild a hash of `byte_len` bytes from its packed word encoding
    ///
    /// Inverse of [`BlockHash::word`]; `words` must hold at least
    /// `ceil(byte_len / 4)` entries.
    pub fn from_words(words: &[u32], byte_len: usize) -> Self {
        let bytes: Vec<u8> = (0..byte_len)
            .map(|i| {
                let shift = 24 - 8 * (i % 4);
                (words[i / 4] >> shift) as u8
            })
            .collect();
        Self(bytes.into_boxed_slice())
    }
}

impl From<Vec<u8>> for BlockHash {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes.into_boxed_slice())
    }
}

impl From<&[u8]> for BlockHash {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.into())
    }
}

impl From<u64> for BlockHash {
    /// Eight big-endian bytes; convenient for synthetic hashes in tests
    fn from(value: u64) -> Self {
        Self(value.to_be_bytes().to_vec().into_boxed_slice())
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
