use std::collections::{BTreeSet, VecDeque};

/// A data structure that holds freed entity slots for reuse.
pub trait Recycler: Default + 'static {
    /// Returns the number of slots in this recycler.
    fn len(&self) -> usize;

    /// Returns whether the recycler is empty.
    fn is_empty(&self) -> bool { self.len() == 0 }

    /// Adds a freed slot to the recycler.
    fn push(&mut self, index: u32);

    /// Takes a slot out of the recycler.
    fn poll(&mut self) -> Option<u32>;
}

/// Reuses the slot that has been free for the longest time.
impl Recycler for VecDeque<u32> {
    fn len(&self) -> usize { VecDeque::len(self) }

    fn push(&mut self, index: u32) { self.push_back(index) }

    fn poll(&mut self) -> Option<u32> { self.pop_front() }
}

/// A minimal recycler implemented through a FILO stack.
impl Recycler for Vec<u32> {
    fn len(&self) -> usize { Vec::len(self) }

    fn push(&mut self, index: u32) { Vec::push(self, index) }

    fn poll(&mut self) -> Option<u32> { self.pop() }
}

/// Reuses the lowest free slot first, keeping live slots compact.
impl Recycler for BTreeSet<u32> {
    fn len(&self) -> usize { BTreeSet::len(self) }

    fn push(&mut self, index: u32) {
        let inserted = self.insert(index);
        assert!(inserted, "slot {index} was freed twice");
    }

    fn poll(&mut self) -> Option<u32> { self.pop_first() }
}
