use crate::entity::{Entity, Generation};
use crate::storage::Storage;

macro_rules! test_storage {
    (SINGLE $storage:ty) => {
        crate::storage::tests::test_storage! { @$storage =>
            test_swap_remove_stability
            test_stale_generation_rejected
            test_iter_matches_get
            test_reinsert_after_remove
            test_replace_returns_old
        }
    };
    (MULTI $storage:ty) => {
        crate::storage::tests::test_storage! { @$storage =>
            test_swap_remove_stability
            test_stale_generation_rejected
            test_iter_matches_get
            test_reinsert_after_remove
        }
    };
    (@$storage:ty => $($(#[$meta:meta])* $tests:ident)*) => {
        $(
            $(#[$meta])*
            #[test]
            fn $tests() {
                crate::storage::tests::$tests::<$storage>();
            }
        )*
    }
}

pub(crate) use test_storage;

fn entity(index: u32) -> Entity { Entity::new(index, Generation::default()) }

fn value(index: u32) -> i64 { i64::from(index) * 10 + 1 }

pub(super) fn test_swap_remove_stability<S: Storage<Comp = i64>>() {
    let mut storage = S::default();
    for i in 0..10 {
        assert_eq!(storage.insert(entity(i), value(i)), None);
    }

    for removed in [3, 9, 0] {
        assert!(storage.remove(entity(removed)).is_some());
        assert!(!storage.contains(entity(removed)));
    }

    for i in [1, 2, 4, 5, 6, 7, 8] {
        assert_eq!(storage.get(entity(i)), Some(&value(i)), "entity {i} was corrupted");
    }
    assert_eq!(storage.cardinality(), 7);
}

pub(super) fn test_stale_generation_rejected<S: Storage<Comp = i64>>() {
    let mut storage = S::default();
    storage.insert(entity(2), 5);

    let stale = Entity::new(2, Generation::default().next());
    assert_eq!(storage.get(stale), None);
    assert_eq!(storage.get_mut(stale), None);
    assert!(!storage.contains(stale));
    assert!(storage.remove(stale).is_none());
    assert_eq!(storage.iter_of(stale).count(), 0);

    assert_eq!(storage.get(entity(2)), Some(&5));
}

pub(super) fn test_iter_matches_get<S: Storage<Comp = i64>>() {
    let mut storage = S::default();
    for i in (0..16).step_by(3) {
        storage.insert(entity(i), value(i));
    }
    storage.remove(entity(6));

    for (owner, comp) in storage.iter_mut() {
        *comp += i64::from(owner.index());
    }

    let mut seen: Vec<_> = storage.iter().map(|(owner, comp)| (owner.index(), *comp)).collect();
    seen.sort_unstable();
    assert_eq!(seen, vec![(0, 1), (3, 34), (9, 100), (12, 133), (15, 166)]);

    let mut owners: Vec<_> = storage.entities().map(Entity::index).collect();
    owners.sort_unstable();
    assert_eq!(owners, vec![0, 3, 9, 12, 15]);
}

pub(super) fn test_reinsert_after_remove<S: Storage<Comp = i64>>() {
    let mut storage = S::default();
    storage.insert(entity(1), 1);
    storage.insert(entity(2), 2);
    assert!(storage.remove(entity(1)).is_some());

    let reused = Entity::new(1, Generation::default().next());
    assert_eq!(storage.insert(reused, 3), None);
    assert_eq!(storage.get(reused), Some(&3));
    assert_eq!(storage.get(entity(1)), None);
    assert_eq!(storage.get(entity(2)), Some(&2));
    assert_eq!(storage.cardinality(), 2);
}

pub(super) fn test_replace_returns_old<S: Storage<Comp = i64>>() {
    let mut storage = S::default();
    assert_eq!(storage.insert(entity(7), 1), None);
    assert_eq!(storage.insert(entity(7), 2), Some(1));
    assert_eq!(storage.get(entity(7)), Some(&2));
    assert_eq!(storage.cardinality(), 1);
}
