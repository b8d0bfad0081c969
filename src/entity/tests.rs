use std::collections::HashSet;

use super::{ealloc, Entity, EntityRef, Generation, Ref, GENERATION_BITS, MAX_SLOTS};

#[test]
fn test_pack_index_and_generation() {
    let mut generation = Generation::default();
    for _ in 0..5 {
        generation = generation.next();
    }

    let entity = Entity::new(MAX_SLOTS - 1, generation);
    assert_eq!(entity.index(), MAX_SLOTS - 1);
    assert_eq!(entity.generation().get(), 5);
    assert_eq!(Entity::from_bits(entity.to_bits()), entity);
}

#[test]
fn test_generation_wraps_within_bits() {
    let mut generation = Generation::default();
    for _ in 0..(1u32 << GENERATION_BITS) {
        generation = generation.next();
    }
    assert_eq!(generation, Generation::default());

    let entity = Entity::new(3, Generation((1 << GENERATION_BITS) - 1));
    assert_eq!(entity.index(), 3, "generation must not bleed into the index bits");
}

#[test]
fn test_hint_is_ignored_by_eq_and_hash() {
    let mut ealloc = ealloc::Allocator::<Vec<u32>>::new(0, MAX_SLOTS);
    let entity = ealloc.allocate();
    let mut copy = entity;

    assert!(ealloc.deallocate(&mut copy));
    assert!(copy.destroyed_hint());
    assert!(!entity.destroyed_hint(), "other copies are not updated");

    assert_eq!(copy, entity);
    let set: HashSet<_> = [copy, entity].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn test_ref_marks_entity_ref() {
    let entity = Entity::new(1, Generation::default());
    let mut reference = EntityRef::Borrowed(entity);

    let mut target = &mut reference;
    assert_eq!(<&mut EntityRef as Ref>::entity(&target), entity);
    <&mut EntityRef as Ref>::mark_destroyed(&mut target);

    assert!(reference.entity().destroyed_hint());
    assert!(!reference.is_owned());
}
