use std::collections::{self, HashMap};
use std::hash;
use std::marker::PhantomData;

use super::{Referrer, Visitor};

impl<T: Referrer> Referrer for Option<T> {
    fn visit_each<V: Visitor + ?Sized>(&mut self, visitor: &mut V) {
        if let Some(this) = self {
            this.visit_each(visitor);
        }
    }
}

impl<T: Referrer> Referrer for Box<T> {
    fn visit_each<V: Visitor + ?Sized>(&mut self, visitor: &mut V) {
        let this: &mut T = self;
        this.visit_each(visitor);
    }
}

// Rc and Arc are not implemented because we cannot guarantee each is only visited once.

impl<T: Referrer> Referrer for Vec<T> {
    fn visit_each<V: Visitor + ?Sized>(&mut self, visitor: &mut V) {
        for item in self {
            item.visit_each(visitor);
        }
    }
}

impl<T: Referrer> Referrer for collections::VecDeque<T> {
    fn visit_each<V: Visitor + ?Sized>(&mut self, visitor: &mut V) {
        for item in self {
            item.visit_each(visitor);
        }
    }
}

impl<T: Referrer, const N: usize> Referrer for [T; N] {
    fn visit_each<V: Visitor + ?Sized>(&mut self, visitor: &mut V) {
        for item in self {
            item.visit_each(visitor);
        }
    }
}

impl<K: Ord, T: Referrer> Referrer for collections::BTreeMap<K, T> {
    fn visit_each<V: Visitor + ?Sized>(&mut self, visitor: &mut V) {
        for item in self.values_mut() {
            item.visit_each(visitor);
        }
    }
}

impl<K: Eq + hash::Hash, T: Referrer, S: hash::BuildHasher> Referrer for HashMap<K, T, S> {
    fn visit_each<V: Visitor + ?Sized>(&mut self, visitor: &mut V) {
        for item in self.values_mut() {
            item.visit_each(visitor);
        }
    }
}

impl<T> Referrer for PhantomData<T> {
    fn visit_each<V: Visitor + ?Sized>(&mut self, _: &mut V) {}
}

// tuples are not implemented because they are usually not all Referrer.
