use std::mem;

use super::World;
use crate::comp::KindId;
use crate::entity::EntityRef;
use crate::{tracer, Entity};

impl World {
    /// Removes every entity marked for destruction,
    /// cascading through owned references until no new entity is marked.
    ///
    /// Returns the number of entities removed.
    pub fn flush(&mut self) -> usize { self.flush_with(&tracer::Log(log::Level::Trace)) }

    /// Same as [`flush`](Self::flush), reporting progress to `tracer`.
    pub fn flush_with(&mut self, tracer: &impl tracer::Tracer) -> usize {
        if self.marked.is_empty() {
            return 0;
        }

        tracer.start_flush(self.marked.len());

        let mut removed = 0;
        let mut pass = 0;
        while !self.marked.is_empty() {
            let batch: Vec<Entity> = self.marked.drain(..).collect();
            tracer.start_pass(pass, batch.len());

            for entity in batch {
                // a cycle may mark an entity that an earlier pass already removed
                if !self.ealloc.is_valid(entity) {
                    continue;
                }

                self.remove_entity(entity, tracer);
                removed += 1;
            }

            pass += 1;
        }

        tracer.end_flush(removed);
        log::debug!("Flushed {removed} entities in {pass} passes");
        removed
    }

    fn remove_entity(&mut self, entity: Entity, tracer: &impl tracer::Tracer) {
        let freed = self.ealloc.deallocate(entity);
        debug_assert!(freed, "marked entity {entity:?} must be live");

        let kinds = mem::take(self.carried_mut(entity));
        let kinds: Vec<KindId> = kinds.iter().collect();

        let mut owned = Vec::new();
        for &kind in &kinds {
            self.registry.any_mut(kind).visit_refs(entity, &mut |reference: &mut EntityRef| {
                if let EntityRef::Owned(target) = *reference {
                    owned.push(target);
                }
            });
        }

        for target in owned {
            tracer.cascade(entity, target);
            if self.ealloc.is_valid(target) {
                self.marked.insert(target);
            }
        }

        for &kind in &kinds {
            let discarded = self.registry.any_mut(kind).discard(entity);
            debug_assert!(discarded, "{entity:?} carries {kind} but has no record");
        }

        self.queries.remove_entity(entity);
        tracer.remove_entity(entity);
    }
}
