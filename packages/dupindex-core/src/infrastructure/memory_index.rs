//! Multimap-backed reference index
//!
//! The straightforward implementation of the clone index contract: two
//! independent multimaps, one per query axis, appended on every insert.
//! No sorting phase, no memory-layout tricks. It exists primarily as the
//! low-risk correctness oracle the packed implementation is tested
//! against, and as a readable statement of the contract itself.

use crate::domain::{Block, BlockHash, CloneIndex};
use crate::error::Result;
use ahash::AHashMap;

/// Reference clone index backed by two hash multimaps
#[derive(Debug, Default)]
pub struct MemoryCloneIndex {
    /// resource id -> blocks of that resource, in insertion order
    by_resource: AHashMap<String, Vec<Block>>,

    /// hash -> blocks with that hash anywhere, in insertion order
    by_hash: AHashMap<BlockHash, Vec<Block>>,
}

impl MemoryCloneIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of inserted blocks
    pub fn len(&self) -> usize {
        self.by_resource.values().map(Vec::len).sum()
    }

    /// True when no block has been inserted
    pub fn is_empty(&self) -> bool {
        self.by_resource.is_empty()
    }
}

impl CloneIndex for MemoryCloneIndex {
    fn insert(&mut self, block: Block) -> Result<()> {
        self.by_resource
            .entry(block.resource_id.clone())
            .or_default()
            .push(block.clone());
        self.by_hash.entry(block.hash.clone()).or_default().push(block);
        Ok(())
    }

    fn by_resource_id(&mut self, resource_id: &str) -> Vec<Block> {
        self.by_resource.get(resource_id).cloned().unwrap_or_default()
    }

    fn by_sequence_hash(&mut self, hash: &BlockHash) -> Result<Vec<Block>> {
        Ok(self.by_hash.get(hash).cloned().unwrap_or_default())
    }

    fn resource_groups(&mut self) -> Vec<(String, Vec<Block>)> {
        self.by_resource
            .iter()
            .map(|(resource_id, blocks)| (resource_id.clone(), blocks.clone()))
            .collect()
    }

    fn resource_count(&mut self) -> usize {
        self.by_resource.len()
    }
}
