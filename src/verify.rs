//! Programmer-error checks that are only compiled into verifying builds.
//!
//! Verification is enabled in debug builds with the `debug-verify` feature (on by default)
//! and in release builds with the `release-verify` feature.

use crate::Entity;

cfg_if::cfg_if! {
    if #[cfg(any(
        all(debug_assertions, feature = "debug-verify"),
        all(not(debug_assertions), feature = "release-verify"),
    ))] {
        /// Whether verification is compiled in.
        pub(crate) const ENABLED: bool = true;
    } else {
        /// Whether verification is compiled in.
        pub(crate) const ENABLED: bool = false;
    }
}

/// The entity state reported when a required component is missing.
#[derive(Debug, Clone, Copy)]
pub(crate) enum State {
    Live,
    Marked,
    Stale,
}

#[cold]
#[track_caller]
pub(crate) fn missing_required(kind: &str, entity: Entity, state: impl FnOnce() -> State) -> ! {
    if ENABLED {
        panic!("Required component {kind} is missing on {entity:?} (entity state: {:?})", state())
    } else {
        panic!("Required component {kind} is missing")
    }
}

#[cold]
#[track_caller]
pub(crate) fn stale_mutation(kind: &str, entity: Entity) {
    if ENABLED {
        panic!("Cannot attach {kind} to {entity:?}, which is not a live entity");
    }

    log::trace!("Ignoring attachment of {kind} to stale {entity:?}");
}
