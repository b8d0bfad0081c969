//! Hooks observing destruction and query bootstrap.

use crate::comp::KindId;
use crate::query::Query;
use crate::Entity;

/// A handler that receives world maintenance events.
///
/// All methods default to no-ops.
pub trait Tracer {
    /// A flush starts with `marked` entities pending destruction.
    fn start_flush(&self, _marked: usize) {}

    /// A flush pass starts, processing `batch` marked entities.
    fn start_pass(&self, _pass: usize, _batch: usize) {}

    /// Destroying `holder` cascades to `target` through an owned reference.
    fn cascade(&self, _holder: Entity, _target: Entity) {}

    /// `entity` and all its records have been removed.
    fn remove_entity(&self, _entity: Entity) {}

    /// A flush completes after removing `removed` entities.
    fn end_flush(&self, _removed: usize) {}

    /// A new query index over `kinds` is bootstrapped with `matched` entities.
    fn bootstrap_query(&self, _query: Query, _kinds: &[KindId], _matched: usize) {}
}

/// A tracer that does nothing.
pub struct Noop;

impl Tracer for Noop {}

/// A tracer that logs all events at the given level.
pub struct Log(pub log::Level);

impl Tracer for Log {
    fn start_flush(&self, marked: usize) {
        log::log!(self.0, "Flushing {marked} marked entities");
    }

    fn start_pass(&self, pass: usize, batch: usize) {
        log::log!(self.0, "Flush pass {pass}: {batch} entities");
    }

    fn cascade(&self, holder: Entity, target: Entity) {
        log::log!(self.0, "Destruction of {holder:?} cascades to {target:?}");
    }

    fn remove_entity(&self, entity: Entity) {
        log::log!(self.0, "Removed {entity:?}");
    }

    fn end_flush(&self, removed: usize) {
        log::log!(self.0, "Flush removed {removed} entities");
    }

    fn bootstrap_query(&self, query: Query, kinds: &[KindId], matched: usize) {
        log::log!(self.0, "Bootstrapped {query:?} over {kinds:?} with {matched} entities");
    }
}

/// Forwards every event to both tracers in order.
pub struct Aggregate<A, B>(pub A, pub B);

impl<A: Tracer, B: Tracer> Tracer for Aggregate<A, B> {
    fn start_flush(&self, marked: usize) {
        self.0.start_flush(marked);
        self.1.start_flush(marked);
    }

    fn start_pass(&self, pass: usize, batch: usize) {
        self.0.start_pass(pass, batch);
        self.1.start_pass(pass, batch);
    }

    fn cascade(&self, holder: Entity, target: Entity) {
        self.0.cascade(holder, target);
        self.1.cascade(holder, target);
    }

    fn remove_entity(&self, entity: Entity) {
        self.0.remove_entity(entity);
        self.1.remove_entity(entity);
    }

    fn end_flush(&self, removed: usize) {
        self.0.end_flush(removed);
        self.1.end_flush(removed);
    }

    fn bootstrap_query(&self, query: Query, kinds: &[KindId], matched: usize) {
        self.0.bootstrap_query(query, kinds, matched);
        self.1.bootstrap_query(query, kinds, matched);
    }
}
