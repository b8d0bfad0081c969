//! Systems are actions performed every tick to manipulate entities and components.
//!
//! A [`Schedule`] runs its systems sequentially in registration order,
//! then flushes destruction exactly once per tick.
//! Systems only receive `&mut World`,
//! so a system cannot flush while any [`Selection`](crate::query::Selection) is borrowed:
//! reading a selection borrows the world shared, while flushing borrows it exclusively.

use std::any;

use crate::{tracer, World};

/// A unit of per-tick logic.
///
/// Implemented for all `FnMut(&mut World)` closures.
pub trait System {
    /// Describes this system in logs.
    fn name(&self) -> &str { any::type_name::<Self>() }

    /// Runs the system for one tick.
    fn run(&mut self, world: &mut World);

    /// Releases world resources held by this system, such as queries.
    fn teardown(&mut self, _world: &mut World) {}
}

impl<F: FnMut(&mut World)> System for F {
    fn run(&mut self, world: &mut World) { self(world) }
}

/// An ordered list of systems.
#[derive(Default)]
pub struct Schedule {
    systems: Vec<Box<dyn System>>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self { Self::default() }

    /// Appends a system to the schedule.
    pub fn add(&mut self, system: impl System + 'static) -> &mut Self {
        log::debug!("Scheduled system {}", system.name());
        self.systems.push(Box::new(system));
        self
    }

    /// The number of systems.
    pub fn len(&self) -> usize { self.systems.len() }

    /// Whether the schedule has no systems.
    pub fn is_empty(&self) -> bool { self.systems.is_empty() }

    /// Runs every system once, then flushes destruction.
    ///
    /// Returns the number of entities removed by the flush.
    pub fn tick(&mut self, world: &mut World) -> usize {
        self.tick_with(world, &tracer::Log(log::Level::Trace))
    }

    /// Same as [`tick`](Self::tick), reporting the flush to `tracer`.
    pub fn tick_with(&mut self, world: &mut World, tracer: &impl tracer::Tracer) -> usize {
        for system in &mut self.systems {
            log::trace!("Running system {}", system.name());
            system.run(world);
        }

        world.flush_with(tracer)
    }

    /// Tears down every system in reverse registration order.
    pub fn teardown(mut self, world: &mut World) {
        for system in self.systems.iter_mut().rev() {
            system.teardown(world);
        }
    }
}
