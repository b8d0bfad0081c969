//! An entity is a single object that owns components.
//!
//! Entities are identified by [`Entity`] handles,
//! which pack a slot index and a generation counter into a single `u32`.
//! Freeing a slot bumps its generation,
//! so a handle retained across the reuse of its slot is detected as stale
//! instead of silently aliasing the new occupant.
//!
//! Handles embedded in component data are tagged through [`EntityRef`]:
//! an [`Owned`](EntityRef::Owned) reference makes its holder responsible for the referenced entity,
//! so destroying the holder also destroys the referenced entity,
//! while a [`Borrowed`](EntityRef::Borrowed) reference is only informational.
//! The tag is a property of the reference site, not of the entity;
//! the same entity may be owned by one holder and borrowed by many others.
//!
//! All components must implement [`Referrer`] to expose their tagged references.

use std::{cmp, fmt, hash};

use xias::Xias;

pub mod ealloc;
pub use ealloc::{Allocator, ExhaustedError, Recycler};

mod referrer;
pub use kindec_codegen::Referrer;
pub use referrer::{Referrer, Visitor};

/// The number of bits used for the slot index of an entity.
pub const INDEX_BITS: u32 = 22;
/// The number of bits used for the generation of an entity.
pub const GENERATION_BITS: u32 = u32::BITS - INDEX_BITS;
/// The maximum number of entity slots that can ever be allocated.
pub const MAX_SLOTS: u32 = 1 << INDEX_BITS;

const INDEX_MASK: u32 = MAX_SLOTS - 1;
const GENERATION_MASK: u32 = (1 << GENERATION_BITS) - 1;

static_assertions::const_assert_eq!(INDEX_BITS + GENERATION_BITS, u32::BITS);

/// The number of times a slot has been freed.
///
/// Generations wrap around after `2^GENERATION_BITS` frees of the same slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Generation(u32);

impl Generation {
    /// Returns the generation following this one.
    pub fn next(self) -> Self { Self(self.0.wrapping_add(1) & GENERATION_MASK) }

    /// Returns the numeric value of this generation.
    pub fn get(self) -> u32 { self.0 }
}

/// A generational handle to an entity.
///
/// Equality, ordering and hashing only consider the slot index and the generation;
/// the [destroyed hint](Self::destroyed_hint) is a property of this particular copy.
#[derive(Clone, Copy)]
pub struct Entity {
    raw:       u32,
    destroyed: bool,
}

impl Entity {
    pub(crate) fn new(index: u32, generation: Generation) -> Self {
        debug_assert!(index <= INDEX_MASK, "slot index {index} out of range");
        Self { raw: (generation.0 << INDEX_BITS) | index, destroyed: false }
    }

    /// The slot index of this entity.
    pub fn index(self) -> u32 { self.raw & INDEX_MASK }

    /// The generation of the slot when this handle was issued.
    pub fn generation(self) -> Generation { Generation(self.raw >> INDEX_BITS) }

    /// The packed `(generation, index)` representation of this handle.
    pub fn to_bits(self) -> u32 { self.raw }

    /// Reconstructs a handle from [`to_bits`](Self::to_bits).
    pub fn from_bits(raw: u32) -> Self { Self { raw, destroyed: false } }

    /// Whether this copy of the handle was passed to a destroy call by mutable reference.
    ///
    /// This is only a local hint.
    /// Other copies of the same handle are not updated,
    /// so [`World::is_destroyed`](crate::World::is_destroyed) remains the authoritative check.
    pub fn destroyed_hint(self) -> bool { self.destroyed }

    pub(crate) fn usize(self) -> usize { self.index().small_int() }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool { self.raw == other.raw }
}
impl Eq for Entity {}

impl PartialOrd for Entity {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> { Some(self.cmp(other)) }
}
impl Ord for Entity {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        (self.index(), self.generation().0).cmp(&(other.index(), other.generation().0))
    }
}

impl hash::Hash for Entity {
    fn hash<H: hash::Hasher>(&self, state: &mut H) { self.raw.hash(state) }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Entity({}v{})", self.index(), self.generation().0)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::Debug::fmt(self, f) }
}

/// An entity handle embedded in component data, tagged with its ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    /// Destroying the holder of this reference also destroys the referenced entity.
    Owned(Entity),
    /// The reference is informational; destruction does not cascade through it.
    Borrowed(Entity),
}

impl EntityRef {
    /// The referenced entity.
    pub fn entity(&self) -> Entity {
        match *self {
            Self::Owned(entity) | Self::Borrowed(entity) => entity,
        }
    }

    /// A mutable reference to the referenced entity handle.
    pub fn entity_mut(&mut self) -> &mut Entity {
        match self {
            Self::Owned(entity) | Self::Borrowed(entity) => entity,
        }
    }

    /// Whether this is an [`Owned`](Self::Owned) reference.
    pub fn is_owned(&self) -> bool { matches!(self, Self::Owned(_)) }
}

/// A value that identifies an entity to destroy.
///
/// Passing a `&mut` handle sets its [destroyed hint](Entity::destroyed_hint) immediately.
pub trait Ref {
    /// The referenced entity.
    fn entity(&self) -> Entity;

    /// Records the destruction on the local handle, if it is mutable.
    fn mark_destroyed(&mut self) {}
}

impl Ref for Entity {
    fn entity(&self) -> Entity { *self }
}

impl<'t> Ref for &'t Entity {
    fn entity(&self) -> Entity { **self }
}

impl<'t> Ref for &'t mut Entity {
    fn entity(&self) -> Entity { **self }

    fn mark_destroyed(&mut self) { self.destroyed = true; }
}

impl Ref for EntityRef {
    fn entity(&self) -> Entity { EntityRef::entity(self) }
}

impl<'t> Ref for &'t mut EntityRef {
    fn entity(&self) -> Entity { EntityRef::entity(self) }

    fn mark_destroyed(&mut self) { self.entity_mut().destroyed = true; }
}

#[cfg(test)]
mod tests;
