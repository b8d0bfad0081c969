use std::fmt;

use bitvec::prelude::BitVec;
use xias::Xias;

/// A dense identifier for a kind registered in a world.
///
/// Kind ids are assigned in registration order starting from zero,
/// and are only meaningful for the world that assigned them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KindId(pub(crate) u16);

impl KindId {
    /// Returns the id as a `usize` for indexing.
    pub fn usize(self) -> usize { self.0.small_int() }
}

impl fmt::Display for KindId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "#{}", self.0) }
}

/// A set of kinds, stored as a bitset over [`KindId`].
#[derive(Default, Clone)]
pub struct KindSet {
    bits: BitVec,
}

impl KindSet {
    /// Constructs a set from the given kinds.
    pub fn from_kinds(kinds: impl IntoIterator<Item = KindId>) -> Self {
        let mut set = Self::default();
        for kind in kinds {
            set.insert(kind);
        }
        set
    }

    /// Adds a kind to the set, returning whether it was absent.
    pub fn insert(&mut self, kind: KindId) -> bool {
        let index = kind.usize();
        if self.bits.len() <= index {
            self.bits.resize(index + 1, false);
        }

        let mut bit = self.bits.get_mut(index).expect("bitvec was just resized");
        !bit.replace(true)
    }

    /// Removes a kind from the set, returning whether it was present.
    pub fn remove(&mut self, kind: KindId) -> bool {
        match self.bits.get_mut(kind.usize()) {
            Some(mut bit) => bit.replace(false),
            None => false,
        }
    }

    /// Whether the set contains `kind`.
    pub fn contains(&self, kind: KindId) -> bool {
        self.bits.get(kind.usize()).map_or(false, |bit| *bit)
    }

    /// Whether every kind in `other` is also in `self`.
    pub fn is_superset(&self, other: &Self) -> bool {
        other.bits.iter_ones().all(|index| self.bits.get(index).map_or(false, |bit| *bit))
    }

    /// Iterates over the kinds in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = KindId> + '_ {
        self.bits.iter_ones().map(|index| KindId(index.small_int()))
    }

    /// The number of kinds in the set.
    pub fn len(&self) -> usize { self.bits.count_ones() }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool { self.bits.not_any() }

    /// Removes all kinds while retaining the allocation.
    pub fn clear(&mut self) { self.bits.fill(false); }
}

// trailing zero bits do not affect equality
impl PartialEq for KindSet {
    fn eq(&self, other: &Self) -> bool { self.bits.iter_ones().eq(other.bits.iter_ones()) }
}
impl Eq for KindSet {}

impl fmt::Debug for KindSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.debug_set().entries(self.iter()).finish() }
}

impl FromIterator<KindId> for KindSet {
    fn from_iter<I: IntoIterator<Item = KindId>>(iter: I) -> Self { Self::from_kinds(iter) }
}
