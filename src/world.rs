//! The world stores all entities, their components and the query indices over them.
//!
//! # Lifecycle of an entity
//! An entity is created by [`World::entity`] with an initial [bundle](comp::Bundle).
//! Its components may be attached and detached with [`World::add`] and [`World::remove`]
//! at any time while it is live.
//!
//! [`World::destroy`] only marks an entity for destruction.
//! Marked entities remain fully readable and keep appearing in query selections
//! until the next [`World::flush`],
//! which removes every marked entity together with all entities it [owns](EntityRef::Owned),
//! transitively, and reconciles every storage and query index.
//! Flushing is the responsibility of the driver of the world
//! (see [`system::Schedule`](crate::system::Schedule)),
//! which calls it once after all per-tick logic has run.

use auto_enums::auto_enum;
use indexmap::IndexSet;

use crate::comp::{self, Comp, KindId, KindSet};
use crate::entity::{self, ealloc, EntityRef};
use crate::query::{self, Query, Selection};
use crate::storage::Storage;
use crate::{tracer, verify, Config, Entity};

mod builder;
pub use builder::Builder;

mod deletion;

mod kinds;


/// An entity template.
///
/// Blueprints are plain functions that create an entity with a fixed initial component list.
pub trait Blueprint {
    /// Creates an entity in `world`.
    fn build(&self, world: &mut World) -> Entity;
}

impl<F: Fn(&mut World) -> Entity> Blueprint for F {
    fn build(&self, world: &mut World) -> Entity { self(world) }
}

/// The data structure that stores all entities and components.
pub struct World {
    config:   Config,
    ealloc:   ealloc::Allocator,
    registry: kinds::Registry,
    /// The kinds carried by each entity slot.
    carried:  Vec<KindSet>,
    queries:  query::Cache,
    /// Entities pending destruction, in marking order.
    marked:   IndexSet<Entity>,
}

impl Default for World {
    fn default() -> Self { Self::new() }
}

impl World {
    /// Creates a world with the default [`Config`].
    pub fn new() -> Self { Builder::default().build() }

    /// Starts building a world with custom parameters.
    pub fn builder() -> Builder { Builder::default() }

    /// The parameters this world was built with.
    pub fn config(&self) -> &Config { &self.config }

    fn carried(&self, entity: Entity) -> Option<&KindSet> {
        if !self.ealloc.is_valid(entity) {
            return None;
        }
        self.carried.get(entity.usize())
    }

    fn carried_mut(&mut self, entity: Entity) -> &mut KindSet {
        self.carried.get_mut(entity.usize()).expect("live entity has a kind set")
    }

    /// Creates an entity with the components in `bundle`.
    ///
    /// Query indices observe the entity with all its initial components at once.
    ///
    /// # Panics
    /// Panics if the entity index space is exhausted.
    pub fn entity(&mut self, bundle: impl comp::Bundle) -> Entity {
        let entity = self.ealloc.allocate();

        let slot = entity.usize();
        if self.carried.len() <= slot {
            self.carried.resize_with(slot + 1, KindSet::default);
        }
        self.carried_mut(entity).clear();

        bundle.attach(self, entity);

        let carried = self.carried.get(slot).expect("resized above");
        self.queries.sync(entity, carried);
        log::trace!("Created {:?} with kinds {:?}", entity, carried);

        entity
    }

    /// Creates an entity from a blueprint.
    pub fn spawn(&mut self, blueprint: &impl Blueprint) -> Entity { blueprint.build(self) }

    /// Inserts a record without updating query indices.
    ///
    /// Returns whether the kind was newly added, and the replaced record if any.
    fn insert_record<C: Comp>(&mut self, entity: Entity, comp: C) -> (KindId, bool, Option<C>) {
        let kind = self.registry.register::<C>();
        let storage = self.registry.storage_mut::<C>().expect("kind was just registered");
        let old = storage.insert(entity, comp);
        let added = self.carried_mut(entity).insert(kind);
        (kind, added, old)
    }

    pub(crate) fn attach_unsynced<C: Comp>(&mut self, entity: Entity, comp: C) {
        self.insert_record(entity, comp);
    }

    /// Attaches a component to a live entity.
    ///
    /// For single-instance kinds, an existing record is replaced and returned.
    /// For multi-instance kinds, the record is appended after existing records of the same kind.
    ///
    /// Adding to an entity that is not live is a programmer error,
    /// which panics in verifying builds and is otherwise ignored.
    #[track_caller]
    pub fn add<C: Comp>(&mut self, entity: Entity, comp: C) -> Option<C> {
        if !self.ealloc.is_valid(entity) {
            verify::stale_mutation(C::name(), entity);
            return None;
        }

        let (kind, added, old) = self.insert_record(entity, comp);
        if added {
            let carried = self.carried.get(entity.usize()).expect("live entity has a kind set");
            self.queries.on_kind_changed(entity, kind, carried);
        }
        old
    }

    /// Detaches all records of kind `C` from an entity, returning them.
    pub fn remove<C: Comp>(&mut self, entity: Entity) -> Option<<C::Storage as Storage>::Removed> {
        let kind = self.registry.get::<C>()?;
        self.carried(entity)?;

        let removed = self.registry.storage_mut::<C>().expect("kind is registered").remove(entity)?;
        self.detach_kind(entity, kind);
        Some(removed)
    }

    /// Detaches and drops all records of `kind` from an entity,
    /// returning whether any was present.
    pub fn remove_kind(&mut self, entity: Entity, kind: KindId) -> bool {
        if self.carried(entity).is_none() || !self.registry.any_mut(kind).discard(entity) {
            return false;
        }
        self.detach_kind(entity, kind);
        true
    }

    fn detach_kind(&mut self, entity: Entity, kind: KindId) {
        let carried = self.carried.get_mut(entity.usize()).expect("live entity has a kind set");
        carried.remove(kind);
        self.queries.on_kind_changed(entity, kind, carried);
    }

    /// Gets the first record of kind `C` on an entity.
    ///
    /// Returns `None` if the entity does not carry `C` or the handle is stale.
    pub fn data<C: Comp>(&self, entity: Entity) -> Option<&C> {
        self.registry.storage::<C>()?.get(entity)
    }

    /// Mutably gets the first record of kind `C` on an entity.
    pub fn data_mut<C: Comp>(&mut self, entity: Entity) -> Option<&mut C> {
        self.registry.storage_mut::<C>()?.get_mut(entity)
    }

    /// Gets a record that the caller knows to be present.
    ///
    /// # Panics
    /// Panics if the entity does not carry `C`.
    /// Verifying builds additionally report the state of the entity.
    #[track_caller]
    pub fn data_required<C: Comp>(&self, entity: Entity) -> &C {
        match self.data(entity) {
            Some(comp) => comp,
            None => verify::missing_required(C::name(), entity, || self.verify_state(entity)),
        }
    }

    /// Mutably gets a record that the caller knows to be present.
    ///
    /// # Panics
    /// Panics if the entity does not carry `C`.
    #[track_caller]
    pub fn data_required_mut<C: Comp>(&mut self, entity: Entity) -> &mut C {
        let state = self.verify_state(entity);
        match self.data_mut(entity) {
            Some(comp) => comp,
            None => verify::missing_required(C::name(), entity, || state),
        }
    }

    fn verify_state(&self, entity: Entity) -> verify::State {
        if !self.ealloc.is_valid(entity) {
            verify::State::Stale
        } else if self.marked.contains(&entity) {
            verify::State::Marked
        } else {
            verify::State::Live
        }
    }

    /// Iterates over all records of kind `C` on an entity in insertion order.
    #[auto_enum(Iterator)]
    pub fn data_all<C: Comp>(&self, entity: Entity) -> impl Iterator<Item = &C> + '_ {
        match self.registry.storage::<C>() {
            Some(storage) => storage.iter_of(entity),
            None => std::iter::empty(),
        }
    }

    /// Whether an entity carries kind `C`.
    pub fn has<C: Comp>(&self, entity: Entity) -> bool {
        match self.registry.get::<C>() {
            Some(kind) => self.has_kind(entity, kind),
            None => false,
        }
    }

    /// Whether an entity carries `kind`.
    pub fn has_kind(&self, entity: Entity, kind: KindId) -> bool {
        self.carried(entity).map_or(false, |carried| carried.contains(kind))
    }

    /// The kinds carried by an entity, or `None` if the handle is stale.
    pub fn kinds_of(&self, entity: Entity) -> Option<&KindSet> { self.carried(entity) }

    /// The kind id of `C`, if it has been registered.
    pub fn kind<C: Comp>(&self) -> Option<KindId> { self.registry.get::<C>() }

    /// Registers `C` and returns its kind id.
    pub fn register<C: Comp>(&mut self) -> KindId { self.registry.register::<C>() }

    /// The name of a registered kind.
    ///
    /// # Panics
    /// Panics if `kind` was not assigned by this world.
    pub fn kind_name(&self, kind: KindId) -> &'static str { self.registry.name(kind) }

    /// The number of registered kinds.
    pub fn kinds(&self) -> usize { self.registry.len() }

    /// Iterates over all records of kind `C` in storage order.
    pub fn iter<C: Comp>(&self) -> impl Iterator<Item = (Entity, &C)> + '_ {
        self.registry.storage::<C>().into_iter().flat_map(|storage| storage.iter())
    }

    /// Mutably iterates over all records of kind `C` in storage order.
    pub fn iter_mut<C: Comp>(&mut self) -> impl Iterator<Item = (Entity, &mut C)> + '_ {
        self.registry.storage_mut::<C>().into_iter().flat_map(|storage| storage.iter_mut())
    }

    /// Creates a query over the component types in `Q`, registering them if necessary.
    ///
    /// See [`create_query`](Self::create_query).
    pub fn query<Q: comp::Set>(&mut self) -> Query {
        let kinds = Q::register(self);
        self.create_query(kinds)
    }

    /// Creates or retains the query over `kinds`.
    ///
    /// The first creation of a kind set scans the smallest storage among the kinds
    /// (or all live entities for the empty set) to seed the index.
    /// Every creation must eventually be balanced by a [`forget_query`](Self::forget_query).
    pub fn create_query(&mut self, kinds: impl IntoIterator<Item = KindId>) -> Query {
        self.create_query_with(kinds, &tracer::Log(log::Level::Debug))
    }

    /// Same as [`create_query`](Self::create_query), reporting the bootstrap to `tracer`.
    pub fn create_query_with(
        &mut self,
        kinds: impl IntoIterator<Item = KindId>,
        tracer: &impl tracer::Tracer,
    ) -> Query {
        let key = query::normalize(kinds);
        if let Some(query) = self.queries.retain(&key) {
            return query;
        }

        let entities = self.bootstrap(&key);
        let matched = entities.len();
        let query = self.queries.insert(key, entities);
        tracer.bootstrap_query(query, self.queries.get(query).kinds(), matched);
        query
    }

    fn bootstrap(&self, key: &[KindId]) -> IndexSet<Entity> {
        let driver = key.iter().copied().min_by_key(|&kind| self.registry.any(kind).cardinality());
        let driver = match driver {
            Some(driver) => driver,
            None => return self.ealloc.iter_live().collect(),
        };

        let required: KindSet = key.iter().copied().collect();
        let mut entities = IndexSet::new();
        self.registry.any(driver).for_each_owner(&mut |entity| {
            let carried = self.carried.get(entity.usize()).expect("owner has a kind set");
            if carried.is_superset(&required) {
                entities.insert(entity);
            }
        });
        entities
    }

    /// Reads the entities currently matching `query`.
    ///
    /// # Panics
    /// Panics if the query has been forgotten.
    #[track_caller]
    pub fn select(&self, query: Query) -> Selection<'_> { self.queries.get(query).select() }

    /// Releases one creation of `query`,
    /// dropping its index when no creator retains it.
    ///
    /// Returns whether the index was dropped.
    ///
    /// # Panics
    /// Panics if the query has already been forgotten.
    pub fn forget_query(&mut self, query: Query) -> bool { self.queries.forget(query) }

    /// The number of live query indices.
    pub fn query_count(&self) -> usize { self.queries.len() }

    /// Marks an entity for destruction at the next [`flush`](Self::flush).
    ///
    /// Passing the handle by `&mut` sets its [destroyed hint](Entity::destroyed_hint).
    /// Returns `false` if the entity was already marked or removed.
    pub fn destroy(&mut self, mut target: impl entity::Ref) -> bool {
        let entity = target.entity();
        target.mark_destroyed();

        if !self.ealloc.is_valid(entity) {
            return false;
        }

        let marked = self.marked.insert(entity);
        if marked {
            log::trace!("Marked {:?} for destruction", entity);
        }
        marked
    }

    /// Whether an entity is marked for destruction or already removed.
    pub fn is_destroyed(&self, entity: Entity) -> bool {
        self.marked.contains(&entity) || !self.ealloc.is_valid(entity)
    }

    /// Whether the handle refers to a live entity, including entities pending destruction.
    pub fn is_valid(&self, entity: Entity) -> bool { self.ealloc.is_valid(entity) }

    /// Whether the reference points to an entity that is marked or removed.
    pub fn is_dangling(&self, reference: &EntityRef) -> bool { self.is_destroyed(reference.entity()) }

    /// The number of live entities, including entities pending destruction.
    pub fn len(&self) -> usize { self.ealloc.len() }

    /// Whether there are no live entities.
    pub fn is_empty(&self) -> bool { self.ealloc.is_empty() }

    /// Iterates over all live entities in slot order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ { self.ealloc.iter_live() }

    /// The number of entities marked for destruction.
    pub fn pending_destruction(&self) -> usize { self.marked.len() }
}
