use crate::comp::{Comp, KindId};
use crate::{Entity, World};

/// A group of components attached to an entity together.
///
/// [`World::entity`] attaches the whole bundle before any query index observes the new entity,
/// so indices only ever see the complete initial kind set.
///
/// Implemented for tuples of up to 12 components and for the dynamic [`Map`].
pub trait Bundle {
    /// Attaches every component in this bundle to `entity`.
    fn attach(self, world: &mut World, entity: Entity);
}

impl Bundle for () {
    fn attach(self, _: &mut World, _: Entity) {}
}

macro_rules! impl_bundle {
    ($($ty:ident $var:ident),+) => {
        impl<$($ty: Comp),+> Bundle for ($($ty,)+) {
            fn attach(self, world: &mut World, entity: Entity) {
                let ($($var,)+) = self;
                $(
                    world.attach_unsynced(entity, $var);
                )+
            }
        }
    };
}

impl_bundle!(C1 c1);
impl_bundle!(C1 c1, C2 c2);
impl_bundle!(C1 c1, C2 c2, C3 c3);
impl_bundle!(C1 c1, C2 c2, C3 c3, C4 c4);
impl_bundle!(C1 c1, C2 c2, C3 c3, C4 c4, C5 c5);
impl_bundle!(C1 c1, C2 c2, C3 c3, C4 c4, C5 c5, C6 c6);
impl_bundle!(C1 c1, C2 c2, C3 c3, C4 c4, C5 c5, C6 c6, C7 c7);
impl_bundle!(C1 c1, C2 c2, C3 c3, C4 c4, C5 c5, C6 c6, C7 c7, C8 c8);
impl_bundle!(C1 c1, C2 c2, C3 c3, C4 c4, C5 c5, C6 c6, C7 c7, C8 c8, C9 c9);
impl_bundle!(C1 c1, C2 c2, C3 c3, C4 c4, C5 c5, C6 c6, C7 c7, C8 c8, C9 c9, C10 c10);
impl_bundle!(C1 c1, C2 c2, C3 c3, C4 c4, C5 c5, C6 c6, C7 c7, C8 c8, C9 c9, C10 c10, C11 c11);
impl_bundle!(
    C1 c1, C2 c2, C3 c3, C4 c4, C5 c5, C6 c6, C7 c7, C8 c8, C9 c9, C10 c10, C11 c11, C12 c12
);

type Attach = Box<dyn FnOnce(&mut World, Entity)>;

/// A dynamically built list of components.
///
/// Usually constructed with the [`comps!`](crate::comps) macro.
/// Components are attached in insertion order,
/// so a later record of a single-instance kind replaces an earlier one.
#[derive(Default)]
pub struct Map {
    attachments: Vec<Attach>,
}

impl Map {
    /// Creates an empty map.
    pub fn new() -> Self { Self::default() }

    /// Adds a component to the map, returning the map for chaining.
    pub fn with<C: Comp>(mut self, comp: C) -> Self {
        self.insert(comp);
        self
    }

    /// Adds a component to the map.
    pub fn insert<C: Comp>(&mut self, comp: C) {
        self.attachments.push(Box::new(move |world, entity| {
            world.attach_unsynced(entity, comp);
        }));
    }

    /// Returns the number of components in the map.
    pub fn len(&self) -> usize { self.attachments.len() }

    /// Returns true if the map contains no components.
    pub fn is_empty(&self) -> bool { self.attachments.is_empty() }
}

impl Bundle for Map {
    fn attach(self, world: &mut World, entity: Entity) {
        for attach in self.attachments {
            attach(world, entity);
        }
    }
}

/// A tuple of component types naming a query.
///
/// `()` names the empty query, which selects every live entity.
pub trait Set {
    /// Registers every kind in this set and returns their ids.
    fn register(world: &mut World) -> Vec<KindId>;
}

impl Set for () {
    fn register(_: &mut World) -> Vec<KindId> { Vec::new() }
}

macro_rules! impl_set {
    ($($ty:ident),+) => {
        impl<$($ty: Comp),+> Set for ($($ty,)+) {
            fn register(world: &mut World) -> Vec<KindId> {
                vec![$(world.register::<$ty>()),+]
            }
        }
    };
}

impl_set!(C1);
impl_set!(C1, C2);
impl_set!(C1, C2, C3);
impl_set!(C1, C2, C3, C4);
impl_set!(C1, C2, C3, C4, C5);
impl_set!(C1, C2, C3, C4, C5, C6);
impl_set!(C1, C2, C3, C4, C5, C6, C7);
impl_set!(C1, C2, C3, C4, C5, C6, C7, C8);
