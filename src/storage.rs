//! A storage holds all records of a single kind for all entities.
//!
//! Storages are keyed by [`Entity`] handles.
//! Every lookup compares the full handle including its generation,
//! so a stale handle never reads a record belonging to the new occupant of a reused slot.

use std::any::Any;

use crate::comp::Comp;
use crate::entity::{Referrer, Visitor};
use crate::Entity;

mod dense;
pub use dense::Dense;

mod chain;
pub use chain::Chain;

#[cfg(test)]
mod tests;

/// A storage for records of one kind.
pub trait Storage: Default + 'static {
    /// The record type stored.
    type Comp: 'static;

    /// The value returned by [`remove`](Self::remove).
    ///
    /// This is the record itself for single-instance storages,
    /// and the list of records for multi-instance storages.
    type Removed;

    /// Attaches a record to `entity`.
    ///
    /// Returns the replaced record if the storage only holds one record per entity
    /// and `entity` already had one.
    fn insert(&mut self, entity: Entity, comp: Self::Comp) -> Option<Self::Comp>;

    /// Detaches all records of `entity`, returning them if any was present.
    fn remove(&mut self, entity: Entity) -> Option<Self::Removed>;

    /// Gets a shared reference to the first record of `entity`.
    fn get(&self, entity: Entity) -> Option<&Self::Comp>;

    /// Gets a mutable reference to the first record of `entity`.
    fn get_mut(&mut self, entity: Entity) -> Option<&mut Self::Comp>;

    /// Whether `entity` has at least one record in this storage.
    fn contains(&self, entity: Entity) -> bool { self.get(entity).is_some() }

    /// Returns the number of distinct entities that have records in this storage.
    fn cardinality(&self) -> usize;

    /// Calls `f` on every record of `entity`.
    fn for_each_of_mut(&mut self, entity: Entity, f: impl FnMut(&mut Self::Comp));

    /// Return value of [`iter_of`](Self::iter_of).
    type IterOf<'t>: Iterator<Item = &'t Self::Comp> + 't;
    /// Iterates over the records of `entity` in insertion order.
    fn iter_of(&self, entity: Entity) -> Self::IterOf<'_>;

    /// Return value of [`entities`](Self::entities).
    type Entities<'t>: Iterator<Item = Entity> + 't;
    /// Iterates over the distinct entities that have records in this storage.
    fn entities(&self) -> Self::Entities<'_>;

    /// Return value of [`iter`](Self::iter).
    type Iter<'t>: Iterator<Item = (Entity, &'t Self::Comp)> + 't;
    /// Iterates over all records in storage order.
    ///
    /// Storage order changes whenever a record is removed,
    /// so positions must not be cached across mutations.
    fn iter(&self) -> Self::Iter<'_>;

    /// Return value of [`iter_mut`](Self::iter_mut).
    type IterMut<'t>: Iterator<Item = (Entity, &'t mut Self::Comp)> + 't;
    /// Mutably iterates over all records in storage order.
    fn iter_mut(&mut self) -> Self::IterMut<'_>;
}

/// Type-erased operations on a storage of a [`Comp`].
pub(crate) trait AnyStorage: 'static {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Visits the entity references in all records of `entity`.
    fn visit_refs(&mut self, entity: Entity, visitor: &mut dyn Visitor);

    /// Drops all records of `entity`, returning whether any was present.
    fn discard(&mut self, entity: Entity) -> bool;

    fn contains(&self, entity: Entity) -> bool;

    fn cardinality(&self) -> usize;

    fn for_each_owner(&self, f: &mut dyn FnMut(Entity));
}

impl<S: Storage> AnyStorage for S
where
    S::Comp: Comp,
{
    fn as_any(&self) -> &dyn Any { self }

    fn as_any_mut(&mut self) -> &mut dyn Any { self }

    fn visit_refs(&mut self, entity: Entity, visitor: &mut dyn Visitor) {
        self.for_each_of_mut(entity, |comp| comp.visit_each(&mut *visitor));
    }

    fn discard(&mut self, entity: Entity) -> bool { self.remove(entity).is_some() }

    fn contains(&self, entity: Entity) -> bool { Storage::contains(self, entity) }

    fn cardinality(&self) -> usize { Storage::cardinality(self) }

    fn for_each_owner(&self, f: &mut dyn FnMut(Entity)) { self.entities().for_each(f) }
}
