//! Clone Index Port
//!
//! The implementation-agnostic contract both index implementations
//! satisfy in full. The aggregation pass talks to this trait only; which
//! implementation backs it is a memory/speed trade-off made at startup.
//!
//! # Contract
//!
//! - Every query reflects all inserts completed before the call.
//! - Not-found is not an error: lookups return empty sequences.
//! - Duplicate inserts of equal blocks are legal and all retained.
//! - Single-threaded: the caller serializes all access. No operation
//!   performs I/O or blocks.
//!
//! Queries take `&mut self` because the packed implementation rebuilds
//! its sort orders lazily on the first query after a burst of inserts.

use super::block::Block;
use super::block_hash::BlockHash;
use crate::error::Result;

/// Block-level duplicate-code index
pub trait CloneIndex {
    /// Add a block to the index
    ///
    /// Visible to all subsequent queries. Rejects the call with
    /// [`DupIndexError::HashWidthMismatch`](crate::error::DupIndexError)
    /// when the implementation fixes a hash width and the block's differs.
    fn insert(&mut self, block: Block) -> Result<()>;

    /// All blocks inserted with `resource_id`, empty if none
    ///
    /// Order is stable for a given index state but otherwise unspecified.
    fn by_resource_id(&mut self, resource_id: &str) -> Vec<Block>;

    /// All blocks anywhere whose hash equals `hash` byte-for-byte,
    /// empty if none
    fn by_sequence_hash(&mut self, hash: &BlockHash) -> Result<Vec<Block>>;

    /// Every distinct resource with its blocks, each resource exactly once
    ///
    /// The union of all yielded blocks equals every inserted block.
    fn resource_groups(&mut self) -> Vec<(String, Vec<Block>)>;

    /// Number of distinct resource ids currently indexed
    fn resource_count(&mut self) -> usize;
}
