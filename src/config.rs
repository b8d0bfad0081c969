//! Tunable parameters of a [`World`](crate::World).

use crate::entity::{ealloc, MAX_SLOTS};

/// Parameters of a world, consumed by [`world::Builder`](crate::world::Builder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Freed entity slots are only reused once more than this many slots are free.
    ///
    /// Larger values delay reuse, making it less likely that
    /// a stale handle retained by mistake aliases a new entity.
    pub min_free_slots:   usize,
    /// The maximum number of entity slots.
    ///
    /// Must not exceed [`MAX_SLOTS`].
    pub max_entities:     u32,
    /// The number of entity slots to reserve upfront.
    pub initial_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_free_slots:   ealloc::DEFAULT_MIN_FREE_SLOTS,
            max_entities:     MAX_SLOTS,
            initial_capacity: 0,
        }
    }
}

impl Config {
    /// Sets [`min_free_slots`](Self::min_free_slots).
    pub fn min_free_slots(mut self, min_free_slots: usize) -> Self {
        self.min_free_slots = min_free_slots;
        self
    }

    /// Sets [`max_entities`](Self::max_entities).
    pub fn max_entities(mut self, max_entities: u32) -> Self {
        self.max_entities = max_entities;
        self
    }

    /// Sets [`initial_capacity`](Self::initial_capacity).
    pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Checks that the parameters are consistent.
    ///
    /// # Panics
    /// Panics if `max_entities` is zero or exceeds [`MAX_SLOTS`].
    pub fn validate(&self) {
        assert!(self.max_entities > 0, "max_entities must be positive");
        assert!(
            self.max_entities <= MAX_SLOTS,
            "max_entities {} exceeds the index space of {} slots",
            self.max_entities,
            MAX_SLOTS,
        );
    }
}
