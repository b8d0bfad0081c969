//! Manages entity slot allocation and recycling.

use std::collections::VecDeque;
use std::{error, fmt};

use bitvec::prelude::BitVec;
use xias::Xias;

use super::{Entity, Generation, Ref, MAX_SLOTS};

mod recycler;
pub use recycler::Recycler;

/// The default number of freed slots retained before any of them is reused.
pub const DEFAULT_MIN_FREE_SLOTS: usize = 1024;

/// Allocates and recycles entity slots.
///
/// A freed slot is only reused once the recycler holds more than `min_free` slots,
/// which spreads reuse of the same slot over time
/// so that stale handles are less likely to meet a wrapped generation.
/// The allocator is independent of component storage and can be used standalone.
#[derive(Debug)]
pub struct Allocator<R: Recycler = VecDeque<u32>> {
    /// The current generation of each slot.
    generations: Vec<Generation>,
    /// Whether each slot is currently allocated.
    live:        BitVec,
    /// Freed slots waiting to be reused.
    recycler:    R,
    /// Freed slots are only reused when the recycler holds more than this many.
    min_free:    usize,
    /// The slot table never grows beyond this many slots.
    max_slots:   u32,
    /// The number of live slots.
    live_count:  usize,
}

impl<R: Recycler> Allocator<R> {
    /// Creates an empty allocator.
    ///
    /// # Panics
    /// Panics if `max_slots` exceeds [`MAX_SLOTS`].
    pub fn new(min_free: usize, max_slots: u32) -> Self {
        Self::with_capacity(min_free, max_slots, 0)
    }

    /// Creates an empty allocator with room for `capacity` slots before the first growth.
    ///
    /// # Panics
    /// Panics if `max_slots` exceeds [`MAX_SLOTS`].
    pub fn with_capacity(min_free: usize, max_slots: u32, capacity: usize) -> Self {
        assert!(
            max_slots <= MAX_SLOTS,
            "max_slots {max_slots} exceeds the index space of {MAX_SLOTS} slots"
        );
        let capacity = capacity.min(max_slots.small_int());

        Self {
            generations: Vec::with_capacity(capacity),
            live: BitVec::with_capacity(capacity),
            recycler: R::default(),
            min_free,
            max_slots,
            live_count: 0,
        }
    }

    /// Allocates a new entity.
    ///
    /// # Panics
    /// Panics if all `max_slots` slots are live.
    /// This indicates an entity leak rather than a recoverable condition.
    pub fn allocate(&mut self) -> Entity {
        match self.try_allocate() {
            Ok(entity) => entity,
            Err(err) => panic!("{err}"),
        }
    }

    /// Allocates a new entity, or returns an error if the index space is exhausted.
    pub fn try_allocate(&mut self) -> Result<Entity, ExhaustedError> {
        let exhausted = self.generations.len() >= self.max_slots.small_int::<usize>();

        let index = if self.recycler.len() > self.min_free || exhausted {
            match self.recycler.poll() {
                Some(index) => index,
                None => return Err(ExhaustedError { max_slots: self.max_slots }),
            }
        } else {
            let index = self.generations.len();
            if index == self.generations.capacity() {
                log::debug!("Growing entity slot table beyond {index} slots");
            }

            self.generations.push(Generation::default());
            self.live.push(false);
            index.small_int()
        };

        let slot = index.small_int::<usize>();
        let generation = *self.generations.get(slot).expect("slot was allocated before");
        self.live.set(slot, true);
        self.live_count += 1;

        let entity = Entity::new(index, generation);
        log::trace!("Allocated {entity:?}");
        Ok(entity)
    }

    /// Frees the slot of an entity and bumps its generation.
    ///
    /// Returns `false` without doing anything if the entity is already invalid.
    /// Sets the destroyed hint if `target` is a mutable handle.
    pub fn deallocate(&mut self, mut target: impl Ref) -> bool {
        let entity = target.entity();
        if !self.is_valid(entity) {
            return false;
        }

        target.mark_destroyed();

        let slot = entity.usize();
        let generation = self.generations.get_mut(slot).expect("valid entity has a slot");
        *generation = generation.next();
        self.live.set(slot, false);
        self.live_count -= 1;
        self.recycler.push(entity.index());

        log::trace!("Deallocated {entity:?}");
        true
    }

    /// Whether `entity` refers to a live slot with a matching generation.
    pub fn is_valid(&self, entity: Entity) -> bool {
        let slot = entity.usize();
        let live = match self.live.get(slot) {
            Some(bit) => *bit,
            None => false,
        };
        live && self.generations.get(slot) == Some(&entity.generation())
    }

    /// The number of live entities.
    pub fn len(&self) -> usize { self.live_count }

    /// Whether there are no live entities.
    pub fn is_empty(&self) -> bool { self.live_count == 0 }

    /// The number of slots ever allocated, live or free.
    pub fn slots(&self) -> usize { self.generations.len() }

    /// The number of freed slots waiting to be reused.
    pub fn free_slots(&self) -> usize { self.recycler.len() }

    /// Iterates over all live entities in slot order.
    pub fn iter_live(&self) -> impl Iterator<Item = Entity> + '_ {
        self.live.iter_ones().map(|slot| {
            let generation = *self.generations.get(slot).expect("live bits match generations");
            Entity::new(slot.small_int(), generation)
        })
    }
}

/// All entity slots are live and no more can be allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExhaustedError {
    /// The configured maximum number of slots.
    pub max_slots: u32,
}

impl fmt::Display for ExhaustedError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Entity index space exhausted: all {} slots are live", self.max_slots)
    }
}

impl error::Error for ExhaustedError {}

#[cfg(test)]
mod tests;
