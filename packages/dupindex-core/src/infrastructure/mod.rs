//! Index implementations and their sorting engine
//!
//! Two interchangeable implementations of the
//! [`CloneIndex`](crate::domain::CloneIndex) port:
//!
//! - [`MemoryCloneIndex`] — multimap-backed, simple, the correctness
//!   oracle;
//! - [`PackedCloneIndex`] — struct-of-arrays layout for large runs, built
//!   on the [`sort`] engine.

pub mod memory_index;
pub mod packed_index;
pub mod sort;

// Re-exports for convenience
pub use memory_index::MemoryCloneIndex;
pub use packed_index::PackedCloneIndex;
pub use sort::{lower_bound, sort, Sortable};
