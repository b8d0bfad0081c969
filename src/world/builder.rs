use indexmap::IndexSet;

use super::{kinds, World};
use crate::comp::{Comp, KindId};
use crate::entity::ealloc;
use crate::{query, Config};

/// This type is used to build a world.
#[derive(Default)]
pub struct Builder {
    config:        Config,
    registrations: Vec<fn(&mut kinds::Registry) -> KindId>,
}

impl Builder {
    /// Replaces all parameters.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// See [`Config::min_free_slots`].
    pub fn min_free_slots(mut self, min_free_slots: usize) -> Self {
        self.config.min_free_slots = min_free_slots;
        self
    }

    /// See [`Config::max_entities`].
    pub fn max_entities(mut self, max_entities: u32) -> Self {
        self.config.max_entities = max_entities;
        self
    }

    /// See [`Config::initial_capacity`].
    pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.config.initial_capacity = initial_capacity;
        self
    }

    /// Registers a component kind upfront,
    /// so that kind ids are assigned in a known order.
    pub fn register<C: Comp>(mut self) -> Self {
        self.registrations.push(kinds::Registry::register::<C>);
        self
    }

    /// Builds the world.
    ///
    /// # Panics
    /// Panics if the parameters are invalid (see [`Config::validate`]).
    pub fn build(self) -> World {
        self.config.validate();

        let mut registry = kinds::Registry::default();
        for register in self.registrations {
            register(&mut registry);
        }

        let ealloc = ealloc::Allocator::with_capacity(
            self.config.min_free_slots,
            self.config.max_entities,
            self.config.initial_capacity,
        );

        log::debug!("Built world with {:?} and {} kinds", self.config, registry.len());

        World {
            carried: Vec::with_capacity(self.config.initial_capacity),
            config: self.config,
            ealloc,
            registry,
            queries: query::Cache::default(),
            marked: IndexSet::new(),
        }
    }
}
