//! dupindex-core - Block-Level Duplicate-Code Index
//!
//! Core of a copy-paste detector for a static-analysis pipeline. An
//! upstream tokenizer slices each source file into fixed-size hashed
//! blocks; this crate indexes those blocks and answers, at the scale of
//! hundreds of thousands of blocks per run, the two queries the
//! duplication aggregator is built on:
//!
//! - all blocks belonging to a given file (`by_resource_id`)
//! - all blocks anywhere sharing an exact hash (`by_sequence_hash`)
//!
//! # Architecture
//!
//! ```text
//! domain/          value types (Block, BlockHash, ClonePart, CloneGroup)
//!                  + the CloneIndex port
//! infrastructure/  MemoryCloneIndex (reference oracle)
//!                  PackedCloneIndex (struct-of-arrays, production path)
//!                  sort (Sortable engine both orders are built with)
//! ```
//!
//! # Usage
//!
//! ```rust
//! use dupindex_core::{Block, BlockHash, CloneIndex, PackedCloneIndex};
//!
//! let mut index = PackedCloneIndex::new(8);
//! index.insert(
//!     Block::builder("src/auth.py", BlockHash::from(0xcafe_babe_u64))
//!         .index_in_file(0)
//!         .lines(1, 5)
//!         .units(0, 11)
//!         .build(),
//! )?;
//!
//! let matches = index.by_sequence_hash(&BlockHash::from(0xcafe_babe_u64))?;
//! assert_eq!(matches.len(), 1);
//! # Ok::<(), dupindex_core::DupIndexError>(())
//! ```
//!
//! One index instance serves one analysis run, single-threaded: built
//! once, queried repeatedly, then discarded.

/// Domain models and the index port
pub mod domain;

/// Error types
pub mod error;

/// Index implementations and the sort engine
pub mod infrastructure;

// Re-exports for the public API
pub use domain::{
    Block, BlockBuilder, BlockHash, CloneGroup, CloneGroupBuilder, CloneIndex, ClonePart,
};
pub use error::{DupIndexError, Result};
pub use infrastructure::{MemoryCloneIndex, PackedCloneIndex};
