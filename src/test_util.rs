#![allow(missing_docs)]

use parking_lot::{Mutex, Once};

use crate::comp::KindId;
use crate::entity::{self, EntityRef};
use crate::query::Query;
use crate::{comp, storage, tracer, Entity};

/// Initializes the test logger once for the whole test binary.
pub fn init() {
    static SET_LOGGER_ONCE: Once = Once::new();
    SET_LOGGER_ONCE.call_once(env_logger::init);
}

#[comp]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub f32, pub f32);

#[comp]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity(pub f32, pub f32);

#[comp(name = "health")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health(pub i32);

/// Holds an arbitrary list of tagged references.
#[comp]
#[derive(Debug, Clone, PartialEq)]
pub struct Holder {
    #[entity]
    pub refs: Vec<EntityRef>,
}

/// References a single entity.
#[comp]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parent(#[entity] pub EntityRef);

/// A multi-instance component without references.
#[comp(multi)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attachment(pub u32);

/// A multi-instance component with one reference per record.
#[comp(multi)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link(#[entity] pub EntityRef);

/// A family of distinct component kinds for generating many kinds at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompN<const N: usize>(pub i32);

impl<const N: usize> entity::Referrer for CompN<N> {
    fn visit_each<V: entity::Visitor + ?Sized>(&mut self, _: &mut V) {}
}

impl<const N: usize> comp::Comp for CompN<N> {
    type Storage = storage::Dense<Self>;
}

/// An event observed by [`EventTracer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    StartFlush(usize),
    Pass(usize, usize),
    Cascade(Entity, Entity),
    Remove(Entity),
    EndFlush(usize),
    Bootstrap(Query, Vec<KindId>, usize),
}

/// Records every tracer event in order.
#[derive(Default)]
pub struct EventTracer {
    events: Mutex<Vec<Event>>,
}

impl EventTracer {
    /// Returns the events observed in this tracer.
    pub fn get_events(self) -> Vec<Event> { self.events.into_inner() }

    fn push(&self, event: Event) { self.events.lock().push(event); }
}

impl tracer::Tracer for EventTracer {
    fn start_flush(&self, marked: usize) { self.push(Event::StartFlush(marked)) }

    fn start_pass(&self, pass: usize, batch: usize) { self.push(Event::Pass(pass, batch)) }

    fn cascade(&self, holder: Entity, target: Entity) { self.push(Event::Cascade(holder, target)) }

    fn remove_entity(&self, entity: Entity) { self.push(Event::Remove(entity)) }

    fn end_flush(&self, removed: usize) { self.push(Event::EndFlush(removed)) }

    fn bootstrap_query(&self, query: Query, kinds: &[KindId], matched: usize) {
        self.push(Event::Bootstrap(query, kinds.to_vec(), matched))
    }
}
