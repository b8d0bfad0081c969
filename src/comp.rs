//! A component is a data record attached to an entity under a kind.
//!
//! Each component type is its own kind.
//! Kinds are registered to a [`World`](crate::World) lazily,
//! receiving a dense [`KindId`] on first use,
//! so the set of kinds carried by an entity can be represented as a [`KindSet`] bitset.
//!
//! # Single vs multi-instance kinds
//! The storage of a kind is selected by [`Comp::Storage`].
//! Most kinds use [`storage::Dense`],
//! which holds at most one record per entity.
//! Adding a record of a kind that the entity already carries replaces the old record,
//! which is returned to the caller.
//!
//! Kinds declared with `#[comp(multi)]` use [`storage::Chain`] instead,
//! where each entity may carry any number of records of the same kind
//! in insertion order.
//! Adding a record to a multi-instance kind always appends.
//!
//! # Entity references
//! Every component implements [`Referrer`](crate::entity::Referrer),
//! so that destroying an entity can find the [owned](crate::EntityRef::Owned) references
//! held in its records.
//! Use [`#[comp]`](crate::comp) and annotate fields holding references with `#[entity]`.

use std::any;

use crate::{entity, storage};

/// A component kind.
///
/// This trait is usually implemented through [`#[comp]`](crate::comp).
pub trait Comp: entity::Referrer + Sized + 'static {
    /// The storage type holding all records of this kind.
    type Storage: storage::Storage<Comp = Self>;

    /// A human-readable name of this kind, used in diagnostics.
    fn name() -> &'static str { any::type_name::<Self>() }
}

mod kind;
pub use kind::{KindId, KindSet};

mod bundle;
pub use bundle::{Bundle, Map, Set};
