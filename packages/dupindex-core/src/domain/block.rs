//! Block Representation
//!
//! The unit stored in the index: one fixed-size hashed window of source
//! content at a specific position in a file. Blocks are produced by the
//! upstream tokenizer/hasher, inserted once, and never mutated; queries
//! hand out owned copies, never views into index storage.

use super::block_hash::BlockHash;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One hashed block of a source file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Identifier of the source file this block came from
    pub resource_id: String,

    /// Content hash; width is constant across all blocks of one index
    pub hash: BlockHash,

    /// 0-based sequence number of the block within its file
    pub index_in_file: u32,

    /// First source line covered (1-based, inclusive)
    pub start_line: u32,

    /// Last source line covered (1-based, inclusive)
    pub end_line: u32,

    /// First token/statement offset covered
    pub start_unit: u32,

    /// Last token/statement offset covered
    pub end_unit: u32,
}

impl Block {
    /// Start building a block for `resource_id` with content hash `hash`
    pub fn builder(resource_id: impl Into<String>, hash: BlockHash) -> BlockBuilder {
        BlockBuilder {
            resource_id: resource_id.into(),
            hash,
            index_in_file: 0,
            start_line: 1,
            end_line: 1,
            start_unit: 0,
            end_unit: 0,
        }
    }

    /// Number of source lines covered (end - start + 1)
    pub fn line_count(&self) -> u32 {
        self.end_line - self.start_line + 1
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Block({}[{}], lines {}-{}, units {}-{}, hash {})",
            self.resource_id,
            self.index_in_file,
            self.start_line,
            self.end_line,
            self.start_unit,
            self.end_unit,
            self.hash
        )
    }
}

/// Chained builder for [`Block`]
///
/// Line and unit ranges default to the smallest legal values; the tokenizer
/// sets all of them. Range invariants (`end >= start`) are tokenizer
/// preconditions and only debug-asserted.
#[derive(Debug, Clone)]
pub struct BlockBuilder {
    resource_id: String,
    hash: BlockHash,
    index_in_file: u32,
    start_line: u32,
    end_line: u32,
    start_unit: u32,
    end_unit: u32,
}

impl BlockBuilder {
    /// Set the 0-based in-file sequence number
    pub fn index_in_file(mut self, index: u32) -> Self {
        self.index_in_file = index;
        self
    }

    /// Set the covered line range (1-based, inclusive)
    pub fn lines(mut self, start_line: u32, end_line: u32) -> Self {
        self.start_line = start_line;
        self.end_line = end_line;
        self
    }

    /// Set the covered unit range (inclusive)
    pub fn units(mut self, start_unit: u32, end_unit: u32) -> Self {
        self.start_unit = start_unit;
        self.end_unit = end_unit;
        self
    }

    /// Finish the block
    pub fn build(self) -> Block {
        debug_assert!(self.end_line >= self.start_line);
        debug_assert!(self.end_unit >= self.start_unit);

        Block {
            resource_id: self.resource_id,
            hash: self.hash,
            index_in_file: self.index_in_file,
            start_line: self.start_line,
            end_line: self.end_line,
            start_unit: self.start_unit,
            end_unit: self.end_unit,
        }
    }
}
