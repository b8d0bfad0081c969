use std::{iter, mem, option, slice};

use xias::Xias;

use super::Storage;
use crate::Entity;

const VACANT: u32 = u32::MAX;

/// A packed storage holding at most one record per entity.
///
/// Records and their owners are stored contiguously in two parallel arrays.
/// A sparse table maps each entity slot to the position of its record.
/// Removal moves the last record into the vacated position,
/// so the position of a record is not stable across removals.
pub struct Dense<C> {
    data:   Vec<C>,
    owners: Vec<Entity>,
    sparse: Vec<u32>,
}

impl<C> Default for Dense<C> {
    fn default() -> Self { Self { data: Vec::new(), owners: Vec::new(), sparse: Vec::new() } }
}

impl<C> Dense<C> {
    /// The records in storage order.
    pub fn as_slice(&self) -> &[C] { &self.data }

    /// The owners of the records returned by [`as_slice`](Self::as_slice), in the same order.
    pub fn owners(&self) -> &[Entity] { &self.owners }

    /// The number of records in this storage.
    pub fn len(&self) -> usize { self.data.len() }

    /// Whether this storage is empty.
    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    /// The packed position of the record of `entity`, including stale owners of the same slot.
    fn slot_position(&self, entity: Entity) -> Option<usize> {
        match self.sparse.get(entity.usize()) {
            Some(&position) if position != VACANT => Some(position.small_int()),
            _ => None,
        }
    }

    /// The packed position of the record of `entity`, only if the generation matches.
    fn position(&self, entity: Entity) -> Option<usize> {
        let position = self.slot_position(entity)?;
        let owner = self.owners.get(position).expect("sparse table points out of bounds");
        (*owner == entity).then_some(position)
    }
}

impl<C: 'static> Storage for Dense<C> {
    type Comp = C;
    type Removed = C;

    fn insert(&mut self, entity: Entity, comp: C) -> Option<C> {
        if let Some(position) = self.slot_position(entity) {
            let owner = self.owners.get_mut(position).expect("sparse table points out of bounds");
            let data = self.data.get_mut(position).expect("owners and data have the same length");
            if *owner == entity {
                return Some(mem::replace(data, comp));
            }

            log::warn!("Overwriting record of stale entity {:?} with {:?}", owner, entity);
            *owner = entity;
            *data = comp;
            return None;
        }

        let index = entity.usize();
        if self.sparse.len() <= index {
            self.sparse.resize(index + 1, VACANT);
        }

        let position = self.data.len();
        self.data.push(comp);
        self.owners.push(entity);
        *self.sparse.get_mut(index).expect("sparse table was just resized") = position.small_int();
        None
    }

    fn remove(&mut self, entity: Entity) -> Option<C> {
        let position = self.position(entity)?;

        let comp = self.data.swap_remove(position);
        self.owners.swap_remove(position);
        *self.sparse.get_mut(entity.usize()).expect("position exists") = VACANT;

        if let Some(moved) = self.owners.get(position) {
            *self.sparse.get_mut(moved.usize()).expect("owner has a sparse entry") =
                position.small_int();
        }

        Some(comp)
    }

    fn get(&self, entity: Entity) -> Option<&C> {
        let position = self.position(entity)?;
        self.data.get(position)
    }

    fn get_mut(&mut self, entity: Entity) -> Option<&mut C> {
        let position = self.position(entity)?;
        self.data.get_mut(position)
    }

    fn contains(&self, entity: Entity) -> bool { self.position(entity).is_some() }

    fn cardinality(&self) -> usize { self.data.len() }

    fn for_each_of_mut(&mut self, entity: Entity, mut f: impl FnMut(&mut C)) {
        if let Some(comp) = self.get_mut(entity) {
            f(comp);
        }
    }

    type IterOf<'t> = option::IntoIter<&'t C>;
    fn iter_of(&self, entity: Entity) -> Self::IterOf<'_> { self.get(entity).into_iter() }

    type Entities<'t> = iter::Copied<slice::Iter<'t, Entity>>;
    fn entities(&self) -> Self::Entities<'_> { self.owners.iter().copied() }

    type Iter<'t> = iter::Zip<iter::Copied<slice::Iter<'t, Entity>>, slice::Iter<'t, C>>;
    fn iter(&self) -> Self::Iter<'_> { self.owners.iter().copied().zip(self.data.iter()) }

    type IterMut<'t> = iter::Zip<iter::Copied<slice::Iter<'t, Entity>>, slice::IterMut<'t, C>>;
    fn iter_mut(&mut self) -> Self::IterMut<'_> {
        self.owners.iter().copied().zip(self.data.iter_mut())
    }
}

#[cfg(test)]
mod tests {
    crate::storage::tests::test_storage!(SINGLE super::Dense<i64>);
}
