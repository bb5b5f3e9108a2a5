//! Contract suite for the clone index implementations
//!
//! Every case is written once against the `CloneIndex` trait and executed
//! against both the reference and the packed implementation, so the two
//! can never drift apart on the contract itself.

use dupindex_core::{Block, BlockHash, CloneIndex, MemoryCloneIndex, PackedCloneIndex};
use pretty_assertions::assert_eq;

const HASH_BYTES: usize = 8;

fn block(resource: &str, hash: u64, index: u32) -> Block {
    Block::builder(resource, BlockHash::from(hash))
        .index_in_file(index)
        .lines(index * 3 + 1, index * 3 + 3)
        .units(index * 10, index * 10 + 9)
        .build()
}

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

// =========================================================================
// SUITE (implementation-agnostic)
// =========================================================================

fn suite_empty_index(index: &mut impl CloneIndex) {
    assert!(index.by_resource_id("F1").is_empty());
    assert!(index
        .by_sequence_hash(&BlockHash::from(1u64))
        .unwrap()
        .is_empty());
    assert_eq!(index.resource_count(), 0);
    assert!(index.resource_groups().is_empty());
}

/// Scenario: two blocks in F1, one of them sharing a hash with F2
fn suite_shared_hash_across_resources(index: &mut impl CloneIndex) {
    let a = block("F1", 1, 0);
    let b = block("F1", 2, 1);
    let c = block("F2", 1, 0);

    index.insert(a.clone()).unwrap();
    index.insert(b.clone()).unwrap();
    index.insert(c.clone()).unwrap();

    assert_eq!(
        canonical(index.by_sequence_hash(&BlockHash::from(1u64)).unwrap()),
        canonical(vec![a.clone(), c])
    );
    assert_eq!(
        canonical(index.by_resource_id("F1")),
        canonical(vec![a, b])
    );
    assert_eq!(index.resource_count(), 2);
}

fn suite_completeness_under_interleaving(index: &mut impl CloneIndex) {
    // Blocks of three resources inserted round-robin rather than grouped
    let mut per_resource: Vec<Vec<Block>> = vec![Vec::new(), Vec::new(), Vec::new()];
    for i in 0..30u32 {
        let r = (i % 3) as usize;
        let b = block(&format!("R{}", r), u64::from(i), i / 3);
        index.insert(b.clone()).unwrap();
        per_resource[r].push(b);
    }

    for (r, expected) in per_resource.into_iter().enumerate() {
        assert_eq!(
            canonical(index.by_resource_id(&format!("R{}", r))),
            canonical(expected)
        );
    }
    assert!(index.by_resource_id("R3").is_empty());
}

fn suite_hash_exactness(index: &mut impl CloneIndex) {
    let a = block("F1", 5, 0);
    let b = block("F1", 5, 4); // in-file self-duplication
    let c = block("F2", 5, 0);
    let d = block("F2", 6, 1);

    for blk in [&a, &b, &c, &d] {
        index.insert(blk.clone()).unwrap();
    }

    assert_eq!(
        canonical(index.by_sequence_hash(&BlockHash::from(5u64)).unwrap()),
        canonical(vec![a, b, c])
    );
    assert_eq!(
        canonical(index.by_sequence_hash(&BlockHash::from(6u64)).unwrap()),
        canonical(vec![d])
    );
    assert!(index
        .by_sequence_hash(&BlockHash::from(7u64))
        .unwrap()
        .is_empty());
}

fn suite_partition_coverage(index: &mut impl CloneIndex) {
    let mut inserted = Vec::new();
    for i in 0..40u32 {
        let b = block(&format!("F{}", i % 5), u64::from(i % 9), i);
        index.insert(b.clone()).unwrap();
        inserted.push(b);
    }

    let groups = index.resource_groups();

    // Every distinct resource exactly once
    let mut names: Vec<&String> = groups.iter().map(|(name, _)| name).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), groups.len());
    assert_eq!(groups.len(), 5);
    assert_eq!(index.resource_count(), 5);

    // Union of yielded blocks equals the full inserted set
    let yielded: Vec<Block> = groups
        .iter()
        .flat_map(|(_, blocks)| blocks.iter().cloned())
        .collect();
    assert_eq!(canonical(yielded), canonical(inserted));

    // Each group only holds its own resource's blocks
    for (resource_id, blocks) in &groups {
        assert!(blocks.iter().all(|b| &b.resource_id == resource_id));
    }
}

fn suite_query_idempotence(index: &mut impl CloneIndex) {
    for i in 0..25u32 {
        index
            .insert(block(&format!("F{}", i % 4), u64::from(i % 6), i))
            .unwrap();
    }

    let hash = BlockHash::from(3u64);
    assert_eq!(
        index.by_sequence_hash(&hash).unwrap(),
        index.by_sequence_hash(&hash).unwrap()
    );
    assert_eq!(index.by_resource_id("F2"), index.by_resource_id("F2"));
    assert_eq!(index.resource_groups(), index.resource_groups());
    assert_eq!(index.resource_count(), index.resource_count());
}

fn suite_duplicate_inserts_retained(index: &mut impl CloneIndex) {
    let b = block("F1", 7, 0);
    index.insert(b.clone()).unwrap();
    index.insert(b.clone()).unwrap();
    index.insert(b.clone()).unwrap();

    assert_eq!(index.by_resource_id("F1").len(), 3);
    assert_eq!(index.by_sequence_hash(&BlockHash::from(7u64)).unwrap().len(), 3);
    assert_eq!(index.resource_count(), 1);
}

// =========================================================================
// MEMORY IMPLEMENTATION
// =========================================================================

#[test]
fn memory_empty_index() {
    suite_empty_index(&mut MemoryCloneIndex::new());
}

#[test]
fn memory_shared_hash_across_resources() {
    suite_shared_hash_across_resources(&mut MemoryCloneIndex::new());
}

#[test]
fn memory_completeness_under_interleaving() {
    suite_completeness_under_interleaving(&mut MemoryCloneIndex::new());
}

#[test]
fn memory_hash_exactness() {
    suite_hash_exactness(&mut MemoryCloneIndex::new());
}

#[test]
fn memory_partition_coverage() {
    suite_partition_coverage(&mut MemoryCloneIndex::new());
}

#[test]
fn memory_query_idempotence() {
    suite_query_idempotence(&mut MemoryCloneIndex::new());
}

#[test]
fn memory_duplicate_inserts_retained() {
    suite_duplicate_inserts_retained(&mut MemoryCloneIndex::new());
}

// =========================================================================
// PACKED IMPLEMENTATION
// =========================================================================

#[test]
fn packed_empty_index() {
    suite_empty_index(&mut PackedCloneIndex::new(HASH_BYTES));
}

#[test]
fn packed_shared_hash_across_resources() {
    suite_shared_hash_across_resources(&mut PackedCloneIndex::new(HASH_BYTES));
}

#[test]
fn packed_completeness_under_interleaving() {
    suite_completeness_under_interleaving(&mut PackedCloneIndex::new(HASH_BYTES));
}

#[test]
fn packed_hash_exactness() {
    suite_hash_exactness(&mut PackedCloneIndex::new(HASH_BYTES));
}

#[test]
fn packed_partition_coverage() {
    suite_partition_coverage(&mut PackedCloneIndex::new(HASH_BYTES));
}

#[test]
fn packed_query_idempotence() {
    suite_query_idempotence(&mut PackedCloneIndex::new(HASH_BYTES));
}

#[test]
fn packed_duplicate_inserts_retained() {
    suite_duplicate_inserts_retained(&mut PackedCloneIndex::new(HASH_BYTES));
}
