use indexmap::IndexSet;

use super::{normalize, Cache, Query};
use crate::comp::{KindId, KindSet};
use crate::entity::{Entity, Generation};

fn entity(index: u32) -> Entity { Entity::new(index, Generation::default()) }

fn kinds(ids: &[u16]) -> KindSet { ids.iter().map(|&id| KindId(id)).collect() }

fn key(ids: &[u16]) -> Box<[KindId]> { normalize(ids.iter().map(|&id| KindId(id))) }

fn selected(cache: &Cache, query: Query) -> Vec<u32> {
    let mut indices: Vec<_> = cache.get(query).select().iter().map(Entity::index).collect();
    indices.sort_unstable();
    indices
}

#[test]
fn test_normalize_sorts_and_dedups() {
    assert_eq!(&*key(&[3, 1, 3, 2, 1]), &[KindId(1), KindId(2), KindId(3)]);
    assert!(key(&[]).is_empty());
}

#[test]
fn test_retain_shares_index() {
    let mut cache = Cache::default();
    assert_eq!(cache.retain(&key(&[1, 2])), None);

    let query = cache.insert(key(&[2, 1]), IndexSet::new());
    assert_eq!(cache.retain(&key(&[1, 2, 2])), Some(query));
    assert_eq!(cache.len(), 1);

    // two creations, so the first forget keeps the index
    assert!(!cache.forget(query));
    assert_eq!(selected(&cache, query), Vec::<u32>::new());
    assert!(cache.forget(query));
    assert_eq!(cache.len(), 0);
    assert_eq!(cache.retain(&key(&[1, 2])), None);
}

#[test]
#[should_panic = "has been forgotten"]
fn test_forgotten_query_panics() {
    let mut cache = Cache::default();
    let query = cache.insert(key(&[0]), IndexSet::new());
    cache.forget(query);

    // the slot is reused by a different query with a new generation
    let other = cache.insert(key(&[1]), IndexSet::new());
    assert_ne!(query, other);
    cache.get(query);
}

#[test]
fn test_incremental_membership() {
    let mut cache = Cache::default();
    let both = cache.insert(key(&[0, 1]), IndexSet::new());
    let first = cache.insert(key(&[0]), IndexSet::new());
    let all = cache.insert(key(&[]), IndexSet::new());

    cache.sync(entity(1), &kinds(&[0, 1]));
    cache.sync(entity(2), &kinds(&[0]));
    cache.sync(entity(3), &kinds(&[]));
    assert_eq!(selected(&cache, both), vec![1]);
    assert_eq!(selected(&cache, first), vec![1, 2]);
    assert_eq!(selected(&cache, all), vec![1, 2, 3]);

    cache.on_kind_changed(entity(2), KindId(1), &kinds(&[0, 1]));
    assert_eq!(selected(&cache, both), vec![1, 2]);

    cache.on_kind_changed(entity(1), KindId(0), &kinds(&[1]));
    assert_eq!(selected(&cache, both), vec![2]);
    assert_eq!(selected(&cache, first), vec![2]);
    assert_eq!(selected(&cache, all), vec![1, 2, 3]);

    cache.remove_entity(entity(2));
    assert_eq!(selected(&cache, both), Vec::<u32>::new());
    assert_eq!(selected(&cache, first), Vec::<u32>::new());
    assert_eq!(selected(&cache, all), vec![1, 3]);
}

#[test]
fn test_selection_view() {
    let mut cache = Cache::default();
    let seeded: IndexSet<Entity> = [entity(4), entity(9)].into_iter().collect();
    let query = cache.insert(key(&[5]), seeded);

    let selection = cache.get(query).select();
    assert_eq!(selection.len(), 2);
    assert!(!selection.is_empty());
    assert!(selection.contains(entity(9)));
    assert!(!selection.contains(Entity::new(9, Generation::default().next())));
    assert_eq!(selection.to_vec(), vec![entity(4), entity(9)]);
    assert_eq!(selection.into_iter().count(), 2);
    assert_eq!(cache.get(query).kinds(), &[KindId(5)]);
}
