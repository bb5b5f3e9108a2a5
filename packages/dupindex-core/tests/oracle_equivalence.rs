//! Packed-vs-reference equivalence
//!
//! The multimap-backed index is simple enough to read as the contract
//! itself, so it serves as the oracle: over the same insert sequence,
//! every query of the packed implementation must return the same result
//! set. One deterministic large case pins the headline scale (1,000
//! blocks over 50 resources); a proptest property walks arbitrary insert
//! sequences with heavily colliding hashes and resources.

use dupindex_core::{Block, BlockHash, CloneIndex, MemoryCloneIndex, PackedCloneIndex};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

const HASH_BYTES: usize = 8;

/// Order-insensitive comparison form of a query result
fn canonical(mut blocks: Vec<Block>) -> Vec<Block> {
    blocks.sort_by_key(|b| {
        (
            b.resource_id.clone(),
            b.index_in_file,
            b.hash.as_bytes().to_vec(),
            b.start_unit,
        )
    });
    blocks
}

/// Group listing as a comparable map, each group canonicalized
fn canonical_groups(groups: Vec<(String, Vec<Block>)>) -> BTreeMap<String, Vec<Block>> {
    groups
        .into_iter()
        .map(|(resource_id, blocks)| (resource_id, canonical(blocks)))
        .collect()
}

/// Insert the same blocks into both implementations, then check that every
/// query the contract offers agrees between them.
fn assert_equivalent(blocks: Vec<Block>) {
    let mut packed = PackedCloneIndex::with_capacity(HASH_BYTES, blocks.len());
    let mut reference = MemoryCloneIndex::new();

    let resources: BTreeSet<String> = blocks.iter().map(|b| b.resource_id.clone()).collect();
    let hashes: BTreeSet<Vec<u8>> = blocks.iter().map(|b| b.hash.as_bytes().to_vec()).collect();

    for block in blocks {
        packed.insert(block.clone()).unwrap();
        reference.insert(block).unwrap();
    }

    for resource in &resources {
        assert_eq!(
            canonical(packed.by_resource_id(resource)),
            canonical(reference.by_resource_id(resource)),
            "by_resource_id({:?}) diverged",
            resource
        );
    }
    assert!(packed.by_resource_id("no-such-resource").is_empty());

    for bytes in &hashes {
        let hash = BlockHash::from(bytes.as_slice());
        assert_eq!(
            canonical(packed.by_sequence_hash(&hash).unwrap()),
            canonical(reference.by_sequence_hash(&hash).unwrap()),
            "by_sequence_hash({}) diverged",
            hash
        );
    }
    let absent = BlockHash::from(u64::MAX);
    assert_eq!(
        packed.by_sequence_hash(&absent).unwrap(),
        reference.by_sequence_hash(&absent).unwrap()
    );

    assert_eq!(packed.resource_count(), reference.resource_count());
    assert_eq!(
        canonical_groups(packed.resource_groups()),
        canonical_groups(reference.resource_groups())
    );
}

// =========================================================================
// DETERMINISTIC LARGE CASE
// =========================================================================

/// Small linear congruential generator; keeps the large case reproducible
/// without a randomness dependency.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }
}

#[test]
fn thousand_blocks_over_fifty_resources_match_oracle() {
    let mut rng = Lcg(0x5eed);
    let mut next_index = BTreeMap::new();

    let blocks: Vec<Block> = (0..1000)
        .map(|_| {
            let resource = format!("src/file_{:02}.py", rng.next() % 50);
            // ~4x expected collisions per hash value
            let hash = BlockHash::from(rng.next() % 256);
            let index = next_index
                .entry(resource.clone())
                .and_modify(|i| *i += 1)
                .or_insert(0u32);
            let line = *index * 2 + 1;
            Block::builder(resource, hash)
                .index_in_file(*index)
                .lines(line, line + 4)
                .units(*index * 7, *index * 7 + 6)
                .build()
        })
        .collect();

    assert_equivalent(blocks);
}

// =========================================================================
// PROPERTY: ARBITRARY INSERT SEQUENCES
// =========================================================================

proptest! {
    /// Resources and hashes are drawn from deliberately tiny alphabets so
    /// that shared hashes, in-file self-duplication, and uneven resource
    /// sizes all occur constantly.
    #[test]
    fn packed_matches_oracle_on_arbitrary_sequences(
        seeds in prop::collection::vec((0u8..10, 0u64..16), 0..150)
    ) {
        let mut next_index = BTreeMap::new();
        let blocks: Vec<Block> = seeds
            .into_iter()
            .map(|(resource_no, hash_value)| {
                let resource = format!("R{}", resource_no);
                let index = next_index
                    .entry(resource.clone())
                    .and_modify(|i| *i += 1)
                    .or_insert(0u32);
                Block::builder(resource, BlockHash::from(hash_value))
                    .index_in_file(*index)
                    .lines(*index + 1, *index + 3)
                    .units(*index * 5, *index * 5 + 4)
                    .build()
            })
            .collect();

        assert_equivalent(blocks);
    }
}
