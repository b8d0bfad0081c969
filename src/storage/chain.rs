use std::{iter, slice};

use xias::Xias;

use super::Storage;
use crate::Entity;

const NIL: u32 = u32::MAX;

/// A record in a [`Chain`] together with its chain links.
pub struct Node<C> {
    owner: Entity,
    value: C,
    prev:  u32,
    next:  u32,
}

#[derive(Clone, Copy)]
struct Link {
    head: u32,
    tail: u32,
}

const EMPTY_LINK: Link = Link { head: NIL, tail: NIL };

/// A storage allowing any number of records of the same kind per entity.
///
/// All records are packed in a single node array.
/// The records of each entity form an intrusive doubly-linked chain in insertion order,
/// so appending and detaching are O(1) per record.
pub struct Chain<C> {
    nodes:       Vec<Node<C>>,
    links:       Vec<Link>,
    cardinality: usize,
}

impl<C> Default for Chain<C> {
    fn default() -> Self { Self { nodes: Vec::new(), links: Vec::new(), cardinality: 0 } }
}

fn index(position: u32) -> usize { position.small_int() }

impl<C> Chain<C> {
    /// The total number of records in this storage.
    pub fn len(&self) -> usize { self.nodes.len() }

    /// Whether this storage is empty.
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// The number of records of `entity`.
    pub fn count_of(&self, entity: Entity) -> usize { self.chain_of(entity).count() }

    fn node(&self, position: u32) -> &Node<C> {
        self.nodes.get(index(position)).expect("chain points out of bounds")
    }

    fn node_mut(&mut self, position: u32) -> &mut Node<C> {
        self.nodes.get_mut(index(position)).expect("chain points out of bounds")
    }

    fn link_mut(&mut self, entity: Entity) -> &mut Link {
        self.links.get_mut(entity.usize()).expect("owner of a node has a link")
    }

    /// The head of the chain of `entity`, only if the generation matches.
    fn head(&self, entity: Entity) -> Option<u32> {
        let link = self.links.get(entity.usize())?;
        if link.head == NIL || self.node(link.head).owner != entity {
            return None;
        }
        Some(link.head)
    }

    fn chain_of(&self, entity: Entity) -> ChainOf<'_, C> {
        ChainOf { nodes: &self.nodes, next: self.head(entity).unwrap_or(NIL) }
    }

    /// Unlinks and removes the node at `position`,
    /// fixing up the links of the node swapped into its place.
    fn remove_node(&mut self, position: u32) -> Node<C> {
        let (owner, prev, next) = {
            let node = self.node(position);
            (node.owner, node.prev, node.next)
        };

        match prev {
            NIL => self.link_mut(owner).head = next,
            prev => self.node_mut(prev).next = next,
        }
        match next {
            NIL => self.link_mut(owner).tail = prev,
            next => self.node_mut(next).prev = prev,
        }

        let node = self.nodes.swap_remove(index(position));

        if index(position) < self.nodes.len() {
            let (moved_owner, moved_prev, moved_next) = {
                let moved = self.node(position);
                (moved.owner, moved.prev, moved.next)
            };

            match moved_prev {
                NIL => self.link_mut(moved_owner).head = position,
                prev => self.node_mut(prev).next = position,
            }
            match moved_next {
                NIL => self.link_mut(moved_owner).tail = position,
                next => self.node_mut(next).prev = position,
            }
        }

        node
    }

    fn detach_all(&mut self, owner: Entity) -> Vec<C> {
        let mut values = Vec::new();
        loop {
            let head = self.links.get(owner.usize()).map_or(NIL, |link| link.head);
            if head == NIL {
                break;
            }
            values.push(self.remove_node(head).value);
        }
        self.cardinality -= 1;
        values
    }
}

impl<C: 'static> Storage for Chain<C> {
    type Comp = C;
    type Removed = Vec<C>;

    fn insert(&mut self, entity: Entity, comp: C) -> Option<C> {
        let slot = entity.usize();
        if self.links.len() <= slot {
            self.links.resize(slot + 1, EMPTY_LINK);
        }

        let head = self.links.get(slot).expect("links was just resized").head;
        if head != NIL {
            let stale = self.node(head).owner;
            if stale != entity {
                log::warn!("Dropping records of stale entity {:?} for {:?}", stale, entity);
                self.detach_all(stale);
            }
        }

        let position: u32 = self.nodes.len().small_int();
        let link = self.link_mut(entity);
        let prev = link.tail;
        link.tail = position;
        if prev == NIL {
            link.head = position;
            self.cardinality += 1;
        } else {
            self.node_mut(prev).next = position;
        }

        self.nodes.push(Node { owner: entity, value: comp, prev, next: NIL });
        None
    }

    fn remove(&mut self, entity: Entity) -> Option<Vec<C>> {
        self.head(entity)?;
        Some(self.detach_all(entity))
    }

    fn get(&self, entity: Entity) -> Option<&C> {
        let head = self.head(entity)?;
        Some(&self.node(head).value)
    }

    fn get_mut(&mut self, entity: Entity) -> Option<&mut C> {
        let head = self.head(entity)?;
        Some(&mut self.node_mut(head).value)
    }

    fn contains(&self, entity: Entity) -> bool { self.head(entity).is_some() }

    fn cardinality(&self) -> usize { self.cardinality }

    fn for_each_of_mut(&mut self, entity: Entity, mut f: impl FnMut(&mut C)) {
        let mut next = self.head(entity).unwrap_or(NIL);
        while next != NIL {
            let node = self.node_mut(next);
            f(&mut node.value);
            next = node.next;
        }
    }

    type IterOf<'t> = ChainOf<'t, C>;
    fn iter_of(&self, entity: Entity) -> Self::IterOf<'_> { self.chain_of(entity) }

    type Entities<'t> = Entities<'t, C>;
    fn entities(&self) -> Self::Entities<'_> {
        Entities { nodes: &self.nodes, links: self.links.iter() }
    }

    type Iter<'t> = iter::Map<slice::Iter<'t, Node<C>>, fn(&Node<C>) -> (Entity, &C)>;
    fn iter(&self) -> Self::Iter<'_> {
        let f: fn(&Node<C>) -> (Entity, &C) = |node| (node.owner, &node.value);
        self.nodes.iter().map(f)
    }

    type IterMut<'t> =
        iter::Map<slice::IterMut<'t, Node<C>>, fn(&mut Node<C>) -> (Entity, &mut C)>;
    fn iter_mut(&mut self) -> Self::IterMut<'_> {
        let f: fn(&mut Node<C>) -> (Entity, &mut C) = |node| (node.owner, &mut node.value);
        self.nodes.iter_mut().map(f)
    }
}

/// Iterates over the records of one entity in insertion order.
pub struct ChainOf<'t, C> {
    nodes: &'t [Node<C>],
    next:  u32,
}

impl<'t, C> Iterator for ChainOf<'t, C> {
    type Item = &'t C;

    fn next(&mut self) -> Option<&'t C> {
        if self.next == NIL {
            return None;
        }

        let node = self.nodes.get(index(self.next)).expect("chain points out of bounds");
        self.next = node.next;
        Some(&node.value)
    }
}

/// Iterates over the distinct owners of a [`Chain`].
pub struct Entities<'t, C> {
    nodes: &'t [Node<C>],
    links: slice::Iter<'t, Link>,
}

impl<'t, C> Iterator for Entities<'t, C> {
    type Item = Entity;

    fn next(&mut self) -> Option<Entity> {
        let nodes = self.nodes;
        self.links.by_ref().find(|link| link.head != NIL).map(|link| {
            nodes.get(index(link.head)).expect("chain points out of bounds").owner
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Chain;
    use crate::entity::{Entity, Generation};
    use crate::storage::Storage;

    crate::storage::tests::test_storage!(MULTI Chain<i64>);

    fn entity(index: u32) -> Entity { Entity::new(index, Generation::default()) }

    fn records(storage: &Chain<i64>, index: u32) -> Vec<i64> {
        storage.iter_of(entity(index)).copied().collect()
    }

    #[test]
    fn test_insert_appends_in_order() {
        let mut storage = Chain::<i64>::default();
        for i in 0..3 {
            assert_eq!(storage.insert(entity(1), i), None);
            assert_eq!(storage.insert(entity(2), i * 10), None);
        }

        assert_eq!(records(&storage, 1), vec![0, 1, 2]);
        assert_eq!(records(&storage, 2), vec![0, 10, 20]);
        assert_eq!(storage.count_of(entity(1)), 3);
        assert_eq!(storage.len(), 6);
        assert_eq!(storage.cardinality(), 2);
        assert_eq!(storage.get(entity(2)), Some(&0));
    }

    #[test]
    fn test_remove_preserves_interleaved_chains() {
        let mut storage = Chain::<i64>::default();
        for i in 0..4 {
            for owner in 1..=3 {
                storage.insert(entity(owner), i64::from(owner) * 100 + i);
            }
        }

        assert_eq!(storage.remove(entity(2)), Some(vec![200, 201, 202, 203]));
        assert_eq!(storage.remove(entity(2)), None);
        assert_eq!(records(&storage, 1), vec![100, 101, 102, 103]);
        assert_eq!(records(&storage, 3), vec![300, 301, 302, 303]);
        assert_eq!(storage.cardinality(), 2);

        storage.insert(entity(2), 7);
        storage.insert(entity(1), 104);
        assert_eq!(records(&storage, 2), vec![7]);
        assert_eq!(records(&storage, 1), vec![100, 101, 102, 103, 104]);

        let mut owners: Vec<_> = storage.entities().map(Entity::index).collect();
        owners.sort_unstable();
        assert_eq!(owners, vec![1, 2, 3]);
    }

    #[test]
    fn test_for_each_of_mut_visits_whole_chain() {
        let mut storage = Chain::<i64>::default();
        storage.insert(entity(4), 1);
        storage.insert(entity(5), 2);
        storage.insert(entity(4), 3);

        storage.for_each_of_mut(entity(4), |value| *value *= -1);
        assert_eq!(records(&storage, 4), vec![-1, -3]);
        assert_eq!(records(&storage, 5), vec![2]);
    }
}
