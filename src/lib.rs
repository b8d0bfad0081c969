//! A data-oriented entity/component store for real-time simulations.
//!
//! # What is this?
//! Objects ("entities") are bags of differently-typed data records ("components"),
//! identified by a stable numeric handle.
//! Per-tick logic ("systems") repeatedly selects entities by the kinds of components they carry,
//! then reads and mutates those components.
//!
//! # Entities are generational handles
//! An [`Entity`] packs a slot index and a generation counter into a single `u32`.
//! Freeing a slot bumps its generation,
//! so a handle retained after its entity is gone is always detected as stale
//! instead of silently reading the data of whatever entity reuses the slot.
//! Freed slots are held back until more than
//! [`min_free_slots`](Config::min_free_slots) of them are free,
//! which makes it even less likely that a stale handle meets a recycled slot
//! with a wrapped generation.
//!
//! # Components are stored densely
//! All records of the same kind live in one packed array.
//! Removing a record moves the last record of the array into its place,
//! so insertion, removal and lookup are all O(1) and iteration touches contiguous memory.
//! The position of a record in its array is not stable;
//! only the entity handle is.
//!
//! Kinds declared with `#[comp(multi)]` may have multiple records on the same entity,
//! kept in insertion order.
//!
//! # Queries are cached and incrementally maintained
//! A [query](query::Query) names a set of kinds.
//! The world keeps one index per distinct set,
//! seeded by one scan when the query is first created
//! and updated on every attachment change afterwards,
//! so [selecting](World::select) the matching entities is a plain read.
//! Indices always reflect every mutation applied so far.
//!
//! # Destruction is deferred and follows ownership
//! Components may reference other entities through [`EntityRef`],
//! which is either [`Owned`](EntityRef::Owned) or [`Borrowed`](EntityRef::Borrowed).
//! [`World::destroy`] only marks an entity;
//! marked entities stay readable until the driver calls [`World::flush`] at the end of the tick.
//! Flushing removes every marked entity and, transitively, every entity it owns,
//! while borrowed references are left alone.
//! Ownership cycles terminate because each pass only removes entities that are still live.
//!
//! # Verification
//! Programmer errors, such as reading a [required](World::data_required) component that is absent
//! or attaching components to a stale entity,
//! are reported in detail when the `debug-verify` feature is enabled in debug builds
//! (the default) or the `release-verify` feature is enabled in release builds.
//! Otherwise these checks are reduced to their cheapest form.

#![cfg_attr(doc, warn(missing_docs))]

extern crate self as kindec;

mod macros;
#[doc(inline)]
pub use macros::*;

pub mod tracer;
pub use tracer::Tracer;

pub mod comp;
pub use comp::Comp;

pub mod config;
pub use config::Config;

pub mod entity;
pub use entity::{Entity, EntityRef, Referrer};

pub mod query;
pub use query::{Query, Selection};

pub mod storage;
pub use storage::Storage;

pub mod system;
pub use system::{Schedule, System};

pub(crate) mod verify;

pub mod world;
pub use world::{Blueprint, World};

#[cfg(any(test, feature = "internal-bench"))]
#[allow(missing_docs)]
pub mod test_util;
