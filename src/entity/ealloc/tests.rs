use std::collections::{BTreeSet, HashSet, VecDeque};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Allocator, ExhaustedError};
use crate::entity::MAX_SLOTS;
use crate::test_util;

#[test]
fn test_reuse_only_above_min_free() {
    test_util::init();

    let mut ealloc = Allocator::<VecDeque<u32>>::new(2, MAX_SLOTS);
    let first: Vec<_> = (0..4).map(|_| ealloc.allocate()).collect();

    for &entity in &first[..3] {
        assert!(ealloc.deallocate(entity));
    }
    assert_eq!(ealloc.free_slots(), 3);

    let reused = ealloc.allocate();
    assert_eq!(reused.index(), first[0].index(), "FIFO recycler reuses the oldest free slot");
    assert_eq!(reused.generation().get(), 1);
    assert_ne!(reused, first[0]);

    let fresh = ealloc.allocate();
    assert_eq!(fresh.index(), 4, "free list is at the minimum, so the table grows");
    assert_eq!(ealloc.free_slots(), 2);
}

#[test]
fn test_deallocate_is_idempotent() {
    let mut ealloc = Allocator::<Vec<u32>>::new(0, MAX_SLOTS);
    let mut entity = ealloc.allocate();

    assert!(ealloc.deallocate(&mut entity));
    assert!(entity.destroyed_hint());
    assert!(!ealloc.is_valid(entity));

    assert!(!ealloc.deallocate(&mut entity), "destroying a destroyed handle is a no-op");
    assert_eq!(ealloc.free_slots(), 1);
    assert_eq!(ealloc.len(), 0);
}

#[test]
fn test_stale_handle_rejected_after_reuse() {
    let mut ealloc = Allocator::<Vec<u32>>::new(0, MAX_SLOTS);
    let old = ealloc.allocate();
    ealloc.deallocate(old);

    let new = ealloc.allocate();
    assert_eq!(new.index(), old.index());
    assert!(ealloc.is_valid(new));
    assert!(!ealloc.is_valid(old));
}

#[test]
fn test_growth_preserves_identity() {
    let mut ealloc = Allocator::<VecDeque<u32>>::with_capacity(0, MAX_SLOTS, 4);
    let early: Vec<_> = (0..4).map(|_| ealloc.allocate()).collect();
    let bits: Vec<_> = early.iter().map(|entity| entity.to_bits()).collect();

    for _ in 0..1000 {
        ealloc.allocate();
    }

    for (entity, bits) in early.iter().zip(bits) {
        assert!(ealloc.is_valid(*entity));
        assert_eq!(entity.to_bits(), bits);
    }
    assert_eq!(ealloc.iter_live().take(4).collect::<Vec<_>>(), early);
}

#[test]
#[should_panic = "Entity index space exhausted: all 3 slots are live"]
fn test_exhaustion_panics() {
    let mut ealloc = Allocator::<VecDeque<u32>>::new(0, 3);
    for _ in 0..4 {
        ealloc.allocate();
    }
}

#[test]
fn test_exhaustion_reuses_below_min_free() {
    let mut ealloc = Allocator::<VecDeque<u32>>::new(1024, 2);
    let first = ealloc.allocate();
    let _second = ealloc.allocate();
    assert_eq!(ealloc.try_allocate(), Err(ExhaustedError { max_slots: 2 }));

    ealloc.deallocate(first);
    let third = ealloc.try_allocate().expect("a free slot is available");
    assert_eq!(third.index(), first.index(), "exhausted table falls back to the free list");
}

#[test]
fn test_btree_recycler_prefers_low_slots() {
    let mut ealloc = Allocator::<BTreeSet<u32>>::new(0, MAX_SLOTS);
    let entities: Vec<_> = (0..5).map(|_| ealloc.allocate()).collect();
    ealloc.deallocate(entities[3]);
    ealloc.deallocate(entities[1]);

    assert_eq!(ealloc.allocate().index(), 1);
    assert_eq!(ealloc.allocate().index(), 3);
}

#[test]
fn test_random_sequence_keeps_live_handles_unique() {
    test_util::init();

    let mut rng = StdRng::seed_from_u64(0x6b696e64);
    let mut ealloc = Allocator::<VecDeque<u32>>::new(8, MAX_SLOTS);
    let mut live: Vec<_> = Vec::new();
    let mut dead = Vec::new();

    for _ in 0..5000 {
        if live.is_empty() || rng.gen_bool(0.55) {
            live.push(ealloc.allocate());
        } else {
            let entity = live.swap_remove(rng.gen_range(0..live.len()));
            assert!(ealloc.deallocate(entity));
            dead.push(entity);
        }

        let unique: HashSet<_> = live.iter().copied().collect();
        assert_eq!(unique.len(), live.len());
    }

    assert_eq!(ealloc.len(), live.len());
    assert!(live.iter().all(|&entity| ealloc.is_valid(entity)));
    for entity in dead.iter().filter(|entity| !live.contains(entity)) {
        assert!(!ealloc.is_valid(*entity), "{entity:?} is stale but still valid");
    }
}
