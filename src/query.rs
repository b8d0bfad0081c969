//! Cached, incrementally maintained query indices.
//!
//! A query is a set of required kinds.
//! Each distinct set owns one index holding exactly the live entities
//! that carry every kind in the set.
//! The index is seeded by a single bootstrap scan when the query is first created,
//! and afterwards updated on every attachment change,
//! so reading it through [`World::select`](crate::World::select) never scans.
//!
//! Creating the same set of kinds again (in any order, with any duplicates)
//! returns a handle to the same index.
//! Each creation must be balanced by a [`World::forget_query`](crate::World::forget_query);
//! the index is dropped when the last creator forgets it.

use std::collections::HashMap;
use std::iter;

use indexmap::{set, IndexSet};
use itertools::Itertools;
use xias::Xias;

use crate::comp::{KindId, KindSet};
use crate::Entity;

#[cfg(test)]
mod tests;

/// A handle to a cached query index.
///
/// Handles are invalidated when the index is dropped by the last
/// [`forget_query`](crate::World::forget_query).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Query {
    slot:       u32,
    generation: u32,
}

pub(crate) struct Index {
    kinds:    KindSet,
    key:      Box<[KindId]>,
    refcount: usize,
    entities: IndexSet<Entity>,
}

struct Slot {
    generation: u32,
    index:      Option<Index>,
}

/// Normalizes a list of kinds into the interning key of its query.
pub(crate) fn normalize(kinds: impl IntoIterator<Item = KindId>) -> Box<[KindId]> {
    kinds.into_iter().sorted_unstable().dedup().collect()
}

/// All query indices of a world.
#[derive(Default)]
pub(crate) struct Cache {
    slots:    Vec<Slot>,
    free:     Vec<u32>,
    interned: HashMap<Box<[KindId]>, u32>,
}

impl Cache {
    /// Returns the existing query for `key`, incrementing its reference count.
    pub(crate) fn retain(&mut self, key: &[KindId]) -> Option<Query> {
        let &slot = self.interned.get(key)?;
        let entry = self.slots.get_mut(slot.small_int::<usize>()).expect("interned slot exists");
        let index = entry.index.as_mut().expect("interned slot is occupied");
        index.refcount += 1;
        Some(Query { slot, generation: entry.generation })
    }

    /// Interns a new query for `key`, seeded with the bootstrap result `entities`.
    ///
    /// The key must not already be interned.
    pub(crate) fn insert(&mut self, key: Box<[KindId]>, entities: IndexSet<Entity>) -> Query {
        debug_assert!(!self.interned.contains_key(&key), "query {key:?} is already interned");

        let index = Index {
            kinds: key.iter().copied().collect(),
            key: key.clone(),
            refcount: 1,
            entities,
        };

        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.slots.push(Slot { generation: 0, index: None });
                (self.slots.len() - 1).small_int()
            }
        };
        let entry = self.slots.get_mut(slot.small_int::<usize>()).expect("slot was just allocated");
        entry.index = Some(index);
        self.interned.insert(key, slot);

        Query { slot, generation: entry.generation }
    }

    fn entry(&self, query: Query) -> Option<&Index> {
        let entry = self.slots.get(query.slot.small_int::<usize>())?;
        if entry.generation != query.generation {
            return None;
        }
        entry.index.as_ref()
    }

    /// Returns the index of `query`.
    ///
    /// # Panics
    /// Panics if the query has been forgotten.
    pub(crate) fn get(&self, query: Query) -> &Index {
        match self.entry(query) {
            Some(index) => index,
            None => panic!("{query:?} has been forgotten"),
        }
    }

    /// Decrements the reference count of `query`,
    /// dropping the index when it reaches zero.
    ///
    /// Returns whether the index was dropped.
    ///
    /// # Panics
    /// Panics if the query has already been forgotten.
    pub(crate) fn forget(&mut self, query: Query) -> bool {
        self.get(query);

        let entry = self.slots.get_mut(query.slot.small_int::<usize>()).expect("checked by get");
        let index = entry.index.as_mut().expect("checked by get");
        index.refcount -= 1;
        if index.refcount > 0 {
            return false;
        }

        let index = entry.index.take().expect("checked by get");
        entry.generation = entry.generation.wrapping_add(1);
        self.interned.remove(&index.key);
        self.free.push(query.slot);
        true
    }

    fn indices_mut(&mut self) -> impl Iterator<Item = &mut Index> {
        self.slots.iter_mut().filter_map(|slot| slot.index.as_mut())
    }

    /// Re-evaluates the membership of `entity` in every index.
    pub(crate) fn sync(&mut self, entity: Entity, carried: &KindSet) {
        for index in self.indices_mut() {
            index.update(entity, carried);
        }
    }

    /// Re-evaluates the membership of `entity` in the indices requiring `kind`.
    pub(crate) fn on_kind_changed(&mut self, entity: Entity, kind: KindId, carried: &KindSet) {
        for index in self.indices_mut() {
            if index.kinds.contains(kind) {
                index.update(entity, carried);
            }
        }
    }

    /// Removes `entity` from every index.
    pub(crate) fn remove_entity(&mut self, entity: Entity) {
        for index in self.indices_mut() {
            index.entities.swap_remove(&entity);
        }
    }

    /// The number of live indices.
    pub(crate) fn len(&self) -> usize { self.interned.len() }
}

impl Index {
    fn update(&mut self, entity: Entity, carried: &KindSet) {
        if carried.is_superset(&self.kinds) {
            self.entities.insert(entity);
        } else {
            self.entities.swap_remove(&entity);
        }
    }

    pub(crate) fn kinds(&self) -> &[KindId] { &self.key }

    pub(crate) fn select(&self) -> Selection<'_> { Selection { entities: &self.entities } }
}

/// A borrowed view of the entities matching a query.
///
/// The iteration order is unspecified.
#[derive(Clone, Copy)]
pub struct Selection<'t> {
    entities: &'t IndexSet<Entity>,
}

impl<'t> Selection<'t> {
    /// Iterates over the matching entities.
    pub fn iter(&self) -> iter::Copied<set::Iter<'t, Entity>> { self.entities.iter().copied() }

    /// The number of matching entities.
    pub fn len(&self) -> usize { self.entities.len() }

    /// Whether no entity matches.
    pub fn is_empty(&self) -> bool { self.entities.is_empty() }

    /// Whether `entity` matches.
    pub fn contains(&self, entity: Entity) -> bool { self.entities.contains(&entity) }

    /// Copies the matching entities into a vector.
    pub fn to_vec(&self) -> Vec<Entity> { self.iter().collect() }
}

impl<'t> IntoIterator for Selection<'t> {
    type Item = Entity;
    type IntoIter = iter::Copied<set::Iter<'t, Entity>>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}
