//! Domain layer for the duplicate-code block index
//!
//! Value types exchanged with the tokenizer upstream and the aggregation
//! pass downstream, plus the index port both implementations satisfy.
//!
//! # Data flow
//!
//! ```text
//! tokenizer/hasher (external)
//!         ↓ Block
//! CloneIndex (port) ── MemoryCloneIndex / PackedCloneIndex
//!         ↓ Vec<Block>
//! aggregation (external) ── ClonePart / CloneGroup
//! ```

pub mod block;
pub mod block_hash;
pub mod clone_group;
pub mod clone_index;
pub mod clone_part;

// Re-exports for convenience
pub use block::{Block, BlockBuilder};
pub use block_hash::BlockHash;
pub use clone_group::{CloneGroup, CloneGroupBuilder};
pub use clone_index::CloneIndex;
pub use clone_part::ClonePart;
