//! Memory-packed clone index
//!
//! One heap object per block does not survive contact with large
//! codebases: headers, a boxed hash, and per-field references dominate
//! the memory of an index holding hundreds of thousands of blocks. This
//! implementation stores block fields in parallel primitive arrays
//! instead — one interned string handle per block plus one flat `u32`
//! array holding a fixed-width record per block:
//!
//! ```text
//! [hash words…, index_in_file, start_line, end_line, start_unit, end_unit]
//! ```
//!
//! Two sort orders serve the two query axes:
//! - by hash: a true physical reorder of the record array, so equal
//!   hashes are contiguous and binary-searchable;
//! - by resource id: an indirection array of physical slots, sorted by a
//!   byte-wise comparator, leaving the hash layout undisturbed.
//!
//! Inserts only mark the index dirty; both orders are rebuilt together on
//! the first query after a burst of inserts. That matches the access
//! pattern of an analysis run: all blocks of a file arrive together, and
//! the broad queries start once insertion is done.

use super::sort::{lower_bound, sort, Sortable};
use crate::domain::{Block, BlockHash, CloneIndex};
use crate::error::{DupIndexError, Result};
use ahash::AHashMap;
use std::sync::Arc;
use tracing::debug;

/// Words per record after the hash words: index_in_file, start_line,
/// end_line, start_unit, end_unit
const FIELD_WORDS: usize = 5;

/// Default capacity, in blocks, of an index built with [`PackedCloneIndex::new`]
const DEFAULT_CAPACITY: usize = 1024;

/// Sort-order state of the packed arrays
///
/// The two orders are never valid independently: the resource permutation
/// indexes physical slots that the hash sort reassigns. A single state
/// covering both makes a partial rebuild unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortState {
    /// At least one insert happened since the orders were last rebuilt
    Dirty,
    /// Both orders reflect the current contents
    Sorted,
}

/// Intern pool keeping one allocation per distinct resource id
///
/// Blocks arrive grouped by file, so the pool stays small (one entry per
/// analyzed file) while the per-block array stores 8-byte handles.
#[derive(Debug, Default)]
struct StringPool {
    pool: AHashMap<String, Arc<str>>,
}

impl StringPool {
    fn intern(&mut self, s: &str) -> Arc<str> {
        if let Some(interned) = self.pool.get(s) {
            return interned.clone();
        }
        let interned: Arc<str> = Arc::from(s);
        self.pool.insert(s.to_owned(), interned.clone());
        interned
    }
}

/// Struct-of-arrays clone index, the performance-critical implementation
///
/// Hash width is fixed at construction; inserting or hash-querying with a
/// different width is a configuration error and rejects the call. One
/// instance serves one analysis run: bulk-populated, queried repeatedly,
/// then dropped. The caller serializes all access.
#[derive(Debug)]
pub struct PackedCloneIndex {
    /// Hash width in bytes, constant for the life of the index
    hash_bytes: usize,

    /// `ceil(hash_bytes / 4)`, cached
    hash_words: usize,

    /// `hash_words + FIELD_WORDS`, cached
    record_words: usize,

    /// Number of inserted blocks
    size: usize,

    /// One interned resource-id handle per block, parallel to the records
    resource_ids: Vec<Arc<str>>,

    /// Flat record storage, `record_words` words per block
    block_data: Vec<u32>,

    /// Permutation (logical position -> physical slot) ordered by
    /// resource id; rebuilt by `ensure_sorted`
    resource_ids_index: Vec<u32>,

    state: SortState,

    pool: StringPool,
}

impl PackedCloneIndex {
    /// Create an index for hashes of `hash_bytes` bytes
    pub fn new(hash_bytes: usize) -> Self {
        Self::with_capacity(hash_bytes, DEFAULT_CAPACITY)
    }

    /// Create an index with room for `blocks` blocks before reallocating
    pub fn with_capacity(hash_bytes: usize, blocks: usize) -> Self {
        let hash_words = (hash_bytes + 3) / 4;
        let record_words = hash_words + FIELD_WORDS;
        Self {
            hash_bytes,
            hash_words,
            record_words,
            size: 0,
            resource_ids: Vec::with_capacity(blocks),
            block_data: Vec::with_capacity(blocks * record_words),
            resource_ids_index: Vec::with_capacity(blocks),
            state: SortState::Sorted,
            pool: StringPool::default(),
        }
    }

    /// Hash width this index was constructed for, in bytes
    pub fn hash_bytes(&self) -> usize {
        self.hash_bytes
    }

    /// Number of inserted blocks
    pub fn len(&self) -> usize {
        self.size
    }

    /// True when no block has been inserted
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Rebuild both sort orders if any insert happened since the last
    /// rebuild
    ///
    /// The physical hash sort runs first; the resource permutation is then
    /// rebuilt from identity against the new layout. Partial rebuilds are
    /// not permitted.
    fn ensure_sorted(&mut self) {
        if self.state == SortState::Sorted {
            return;
        }
        debug!(blocks = self.size, "rebuilding packed index sort orders");

        sort(&mut ByHashOrder {
            resource_ids: &mut self.resource_ids,
            block_data: &mut self.block_data,
            record_words: self.record_words,
            hash_words: self.hash_words,
        });

        self.resource_ids_index.clear();
        self.resource_ids_index.extend(0..self.size as u32);
        sort(&mut ByResourceOrder {
            resource_ids: &self.resource_ids,
            index: &mut self.resource_ids_index,
        });

        self.state = SortState::Sorted;
    }

    /// Hash words of the record in physical slot `slot`
    fn hash_words_at(&self, slot: usize) -> &[u32] {
        let start = slot * self.record_words;
        &self.block_data[start..start + self.hash_words]
    }

    /// Decode the hash stored in physical slot `slot`
    fn decode_hash(&self, slot: usize) -> BlockHash {
        BlockHash::from_words(self.hash_words_at(slot), self.hash_bytes)
    }

    /// Materialize an owned block from physical slot `slot`
    fn read_block(&self, slot: usize, hash: BlockHash) -> Block {
        let fields = slot * self.record_words + self.hash_words;
        Block {
            resource_id: self.resource_ids[slot].as_ref().to_owned(),
            hash,
            index_in_file: self.block_data[fields],
            start_line: self.block_data[fields + 1],
            end_line: self.block_data[fields + 2],
            start_unit: self.block_data[fields + 3],
            end_unit: self.block_data[fields + 4],
        }
    }
}

impl CloneIndex for PackedCloneIndex {
    fn insert(&mut self, block: Block) -> Result<()> {
        if block.hash.len() != self.hash_bytes {
            return Err(DupIndexError::width_mismatch(
                self.hash_bytes,
                block.hash.len(),
            ));
        }

        let resource = self.pool.intern(&block.resource_id);
        self.resource_ids.push(resource);
        for w in 0..self.hash_words {
            self.block_data.push(block.hash.word(w));
        }
        self.block_data.extend_from_slice(&[
            block.index_in_file,
            block.start_line,
            block.end_line,
            block.start_unit,
            block.end_unit,
        ]);

        self.size += 1;
        self.state = SortState::Dirty;
        Ok(())
    }

    fn by_resource_id(&mut self, resource_id: &str) -> Vec<Block> {
        self.ensure_sorted();

        let probe = resource_id.as_bytes();
        let first = lower_bound(self.size, |pos| {
            self.resource_ids[self.resource_ids_index[pos] as usize].as_bytes() < probe
        });

        let mut blocks = Vec::new();
        for pos in first..self.size {
            let slot = self.resource_ids_index[pos] as usize;
            if self.resource_ids[slot].as_ref() != resource_id {
                break;
            }
            // Unlike the hash query, the hash is not known to the caller
            // here and must be decoded from the record
            blocks.push(self.read_block(slot, self.decode_hash(slot)));
        }
        blocks
    }

    fn by_sequence_hash(&mut self, hash: &BlockHash) -> Result<Vec<Block>> {
        if hash.len() != self.hash_bytes {
            return Err(DupIndexError::width_mismatch(self.hash_bytes, hash.len()));
        }
        self.ensure_sorted();

        let probe: Vec<u32> = (0..self.hash_words).map(|w| hash.word(w)).collect();
        let first = lower_bound(self.size, |slot| self.hash_words_at(slot) < &probe[..]);

        let mut blocks = Vec::new();
        for slot in first..self.size {
            if self.hash_words_at(slot) != &probe[..] {
                break;
            }
            // The query already carries the exact hash bytes; reuse them
            blocks.push(self.read_block(slot, hash.clone()));
        }
        Ok(blocks)
    }

    fn resource_groups(&mut self) -> Vec<(String, Vec<Block>)> {
        self.ensure_sorted();

        let mut groups = Vec::new();
        let mut pos = 0;
        while pos < self.size {
            let first_slot = self.resource_ids_index[pos] as usize;
            let resource = self.resource_ids[first_slot].clone();

            let mut blocks = Vec::new();
            while pos < self.size {
                let slot = self.resource_ids_index[pos] as usize;
                if self.resource_ids[slot].as_ref() != resource.as_ref() {
                    break;
                }
                blocks.push(self.read_block(slot, self.decode_hash(slot)));
                pos += 1;
            }

            groups.push((resource.as_ref().to_owned(), blocks));
        }
        groups
    }

    fn resource_count(&mut self) -> usize {
        self.ensure_sorted();

        let mut count = 0;
        let mut previous: Option<&str> = None;
        for pos in 0..self.size {
            let slot = self.resource_ids_index[pos] as usize;
            let current = self.resource_ids[slot].as_ref();
            if previous != Some(current) {
                count += 1;
            }
            previous = Some(current);
        }
        count
    }
}

/// Physical reorder of `resource_ids` + `block_data`, ascending by hash
/// words (lexicographic)
struct ByHashOrder<'a> {
    resource_ids: &'a mut [Arc<str>],
    block_data: &'a mut [u32],
    record_words: usize,
    hash_words: usize,
}

impl Sortable for ByHashOrder<'_> {
    fn size(&self) -> usize {
        self.resource_ids.len()
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.resource_ids.swap(i, j);
        let a = i * self.record_words;
        let b = j * self.record_words;
        for k in 0..self.record_words {
            self.block_data.swap(a + k, b + k);
        }
    }

    fn is_less(&self, i: usize, j: usize) -> bool {
        let a = i * self.record_words;
        let b = j * self.record_words;
        self.block_data[a..a + self.hash_words] < self.block_data[b..b + self.hash_words]
    }
}

/// Indirect order over physical slots, ascending by resource id
struct ByResourceOrder<'a> {
    resource_ids: &'a [Arc<str>],
    index: &'a mut [u32],
}

impl Sortable for ByResourceOrder<'_> {
    fn size(&self) -> usize {
        self.index.len()
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.index.swap(i, j);
    }

    fn is_less(&self, i: usize, j: usize) -> bool {
        let a = &self.resource_ids[self.index[i] as usize];
        let b = &self.resource_ids[self.index[j] as usize];
        // str ordering is already byte-wise lexicographic
        a.as_bytes() < b.as_bytes()
    }
}
