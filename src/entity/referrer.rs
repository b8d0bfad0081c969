use super::EntityRef;

mod std_impl;

/// A type that may hold tagged entity references.
///
/// Every component must implement this trait so that destruction can find
/// the [owned](EntityRef::Owned) references of a destroyed holder.
/// Use [`#[derive(Referrer)]`](crate::Referrer) or [`#[comp]`](crate::comp)
/// and mark each field that contains entity references with `#[entity]`.
pub trait Referrer {
    /// Executes the visitor for each entity reference held by this value.
    ///
    /// Each entity reference must be visited exactly once.
    /// As a result, `Referrer` is not implemented for [`std::rc::Rc`] or [`std::sync::Arc`],
    /// since shared values would be visited once per holder.
    fn visit_each<V: Visitor + ?Sized>(&mut self, visitor: &mut V);
}

/// A value used to visit each entity reference.
pub trait Visitor {
    /// Visits an entity reference.
    fn visit(&mut self, reference: &mut EntityRef);
}

impl<F: FnMut(&mut EntityRef) + ?Sized> Visitor for F {
    fn visit(&mut self, reference: &mut EntityRef) { self(reference) }
}

impl Referrer for EntityRef {
    fn visit_each<V: Visitor + ?Sized>(&mut self, visitor: &mut V) { visitor.visit(self) }
}
