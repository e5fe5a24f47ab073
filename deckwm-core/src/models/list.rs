//! Index-linked lists threaded through slotmap arenas.
//!
//! Every container level (desktops, monitors, displays, clients) keeps its members in a
//! `SlotMap` and orders them with a [`List`] owned by the parent entity. Each member carries a
//! [`Link`] with its neighbours and the handle of the container that owns it, so the owner can be
//! found from the member alone. A member is in at most one list at a time.
use slotmap::{Key, SlotMap};

/// Position of a node inside the list that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link<K: Key, P> {
    parent: Option<P>,
    prev: Option<K>,
    next: Option<K>,
}

impl<K: Key, P> Default for Link<K, P> {
    fn default() -> Self {
        Self {
            parent: None,
            prev: None,
            next: None,
        }
    }
}

impl<K: Key, P: Copy> Link<K, P> {
    #[must_use]
    pub fn parent(&self) -> Option<P> {
        self.parent
    }

    #[must_use]
    pub fn prev(&self) -> Option<K> {
        self.prev
    }

    #[must_use]
    pub fn next(&self) -> Option<K> {
        self.next
    }

    #[must_use]
    pub fn is_linked(&self) -> bool {
        self.parent.is_some()
    }
}

/// Implemented by every entity that can be a list member.
pub trait Linked<K: Key> {
    /// Handle of the container owning the list.
    type Parent: Copy + PartialEq;

    fn link(&self) -> &Link<K, Self::Parent>;
    fn link_mut(&mut self) -> &mut Link<K, Self::Parent>;
}

/// Doubly linked list of arena keys. All operations are O(1) except iteration.
#[derive(Debug, Clone)]
pub struct List<K: Key, P> {
    owner: P,
    head: Option<K>,
    tail: Option<K>,
    len: usize,
}

impl<K: Key, P: Copy + PartialEq> List<K, P> {
    #[must_use]
    pub fn new(owner: P) -> Self {
        Self {
            owner,
            head: None,
            tail: None,
            len: 0,
        }
    }

    #[must_use]
    pub fn owner(&self) -> P {
        self.owner
    }

    #[must_use]
    pub fn head(&self) -> Option<K> {
        self.head
    }

    #[must_use]
    pub fn tail(&self) -> Option<K> {
        self.tail
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `key` is a member of this list.
    pub fn contains<T>(&self, nodes: &SlotMap<K, T>, key: K) -> bool
    where
        T: Linked<K, Parent = P>,
    {
        nodes
            .get(key)
            .is_some_and(|node| node.link().parent == Some(self.owner))
    }

    /// Links a detached node at the front. Returns `false` if the node is missing or already in a
    /// list.
    pub fn push_front<T>(&mut self, nodes: &mut SlotMap<K, T>, key: K) -> bool
    where
        T: Linked<K, Parent = P>,
    {
        let head = self.head;
        self.link_between(nodes, key, None, head)
    }

    /// Links a detached node at the back. Returns `false` if the node is missing or already in a
    /// list.
    pub fn push_back<T>(&mut self, nodes: &mut SlotMap<K, T>, key: K) -> bool
    where
        T: Linked<K, Parent = P>,
    {
        let tail = self.tail;
        self.link_between(nodes, key, tail, None)
    }

    /// Links a detached node directly after `anchor`, which must be a member of this list.
    pub fn insert_after<T>(&mut self, nodes: &mut SlotMap<K, T>, anchor: K, key: K) -> bool
    where
        T: Linked<K, Parent = P>,
    {
        if !self.contains(nodes, anchor) {
            return false;
        }
        let next = nodes[anchor].link().next;
        self.link_between(nodes, key, Some(anchor), next)
    }

    /// Links a detached node directly before `anchor`, which must be a member of this list.
    pub fn insert_before<T>(&mut self, nodes: &mut SlotMap<K, T>, anchor: K, key: K) -> bool
    where
        T: Linked<K, Parent = P>,
    {
        if !self.contains(nodes, anchor) {
            return false;
        }
        let prev = nodes[anchor].link().prev;
        self.link_between(nodes, key, prev, Some(anchor))
    }

    /// Unlinks `key` and clears its link. Removing a node that is not in this list is a no-op.
    pub fn remove<T>(&mut self, nodes: &mut SlotMap<K, T>, key: K) -> Option<K>
    where
        T: Linked<K, Parent = P>,
    {
        if !self.contains(nodes, key) {
            return None;
        }
        let link = std::mem::take(nodes[key].link_mut());
        match link.prev {
            Some(prev) => nodes[prev].link_mut().next = link.next,
            None => self.head = link.next,
        }
        match link.next {
            Some(next) => nodes[next].link_mut().prev = link.prev,
            None => self.tail = link.prev,
        }
        self.len -= 1;
        Some(key)
    }

    pub fn pop_front<T>(&mut self, nodes: &mut SlotMap<K, T>) -> Option<K>
    where
        T: Linked<K, Parent = P>,
    {
        let head = self.head?;
        self.remove(nodes, head)
    }

    /// Iterates the member keys from head to tail.
    pub fn iter<'a, T>(&self, nodes: &'a SlotMap<K, T>) -> Iter<'a, K, T>
    where
        T: Linked<K, Parent = P>,
    {
        Iter {
            nodes,
            cursor: self.head,
        }
    }

    /// Snapshot of the member keys, for loops that mutate the arena.
    pub fn keys<T>(&self, nodes: &SlotMap<K, T>) -> Vec<K>
    where
        T: Linked<K, Parent = P>,
    {
        self.iter(nodes).collect()
    }

    fn link_between<T>(
        &mut self,
        nodes: &mut SlotMap<K, T>,
        key: K,
        prev: Option<K>,
        next: Option<K>,
    ) -> bool
    where
        T: Linked<K, Parent = P>,
    {
        match nodes.get_mut(key) {
            Some(node) if !node.link().is_linked() => {
                *node.link_mut() = Link {
                    parent: Some(self.owner),
                    prev,
                    next,
                };
            }
            _ => return false,
        }
        match prev {
            Some(prev) => nodes[prev].link_mut().next = Some(key),
            None => self.head = Some(key),
        }
        match next {
            Some(next) => nodes[next].link_mut().prev = Some(key),
            None => self.tail = Some(key),
        }
        self.len += 1;
        true
    }
}

pub struct Iter<'a, K: Key, T> {
    nodes: &'a SlotMap<K, T>,
    cursor: Option<K>,
}

impl<K: Key, T: Linked<K>> Iterator for Iter<'_, K, T> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        let key = self.cursor?;
        self.cursor = self.nodes.get(key).and_then(|node| node.link().next);
        Some(key)
    }
}

/// The member following `key` in its list.
pub fn next_of<K: Key, T: Linked<K>>(nodes: &SlotMap<K, T>, key: K) -> Option<K> {
    nodes.get(key)?.link().next
}

/// The member preceding `key` in its list.
pub fn prev_of<K: Key, T: Linked<K>>(nodes: &SlotMap<K, T>, key: K) -> Option<K> {
    nodes.get(key)?.link().prev
}

#[cfg(test)]
mod tests {
    use super::*;

    slotmap::new_key_type! {
        struct NodeId;
    }

    #[derive(Default)]
    struct Node {
        link: Link<NodeId, u8>,
    }

    impl Linked<NodeId> for Node {
        type Parent = u8;

        fn link(&self) -> &Link<NodeId, u8> {
            &self.link
        }

        fn link_mut(&mut self) -> &mut Link<NodeId, u8> {
            &mut self.link
        }
    }

    fn setup(count: usize) -> (SlotMap<NodeId, Node>, Vec<NodeId>) {
        let mut nodes = SlotMap::with_key();
        let keys = (0..count).map(|_| nodes.insert(Node::default())).collect();
        (nodes, keys)
    }

    #[test]
    fn push_back_and_front_keep_order() {
        let (mut nodes, keys) = setup(3);
        let mut list = List::new(1);
        assert!(list.push_back(&mut nodes, keys[1]));
        assert!(list.push_back(&mut nodes, keys[2]));
        assert!(list.push_front(&mut nodes, keys[0]));
        assert_eq!(list.keys(&nodes), keys);
        assert_eq!(list.head(), Some(keys[0]));
        assert_eq!(list.tail(), Some(keys[2]));
        assert_eq!(list.len(), 3);
        assert_eq!(prev_of(&nodes, keys[0]), None);
        assert_eq!(next_of(&nodes, keys[0]), Some(keys[1]));
        assert_eq!(nodes[keys[2]].link().parent(), Some(1));
    }

    #[test]
    fn positional_inserts() {
        let (mut nodes, keys) = setup(4);
        let mut list = List::new(1);
        list.push_back(&mut nodes, keys[0]);
        list.push_back(&mut nodes, keys[3]);
        assert!(list.insert_after(&mut nodes, keys[0], keys[1]));
        assert!(list.insert_before(&mut nodes, keys[3], keys[2]));
        assert_eq!(list.keys(&nodes), keys);
        assert_eq!(prev_of(&nodes, keys[3]), Some(keys[2]));
    }

    #[test]
    fn remove_detaches_and_clears_links() {
        let (mut nodes, keys) = setup(3);
        let mut list = List::new(1);
        for key in &keys {
            list.push_back(&mut nodes, *key);
        }
        assert_eq!(list.remove(&mut nodes, keys[1]), Some(keys[1]));
        assert_eq!(list.keys(&nodes), vec![keys[0], keys[2]]);
        assert!(!nodes[keys[1]].link().is_linked());
        assert_eq!(next_of(&nodes, keys[1]), None);
        assert_eq!(list.pop_front(&mut nodes), Some(keys[0]));
        assert_eq!(list.remove(&mut nodes, keys[2]), Some(keys[2]));
        assert!(list.is_empty());
        assert_eq!(list.head(), None);
        assert_eq!(list.tail(), None);
    }

    #[test]
    fn removing_a_foreign_node_is_a_noop() {
        let (mut nodes, keys) = setup(2);
        let mut first = List::new(1);
        let mut second = List::new(2);
        first.push_back(&mut nodes, keys[0]);
        second.push_back(&mut nodes, keys[1]);
        assert_eq!(first.remove(&mut nodes, keys[1]), None);
        assert_eq!(second.keys(&nodes), vec![keys[1]]);
        let (mut other, loose) = setup(1);
        assert_eq!(first.remove(&mut other, loose[0]), None);
    }

    #[test]
    fn a_node_is_in_at_most_one_list() {
        let (mut nodes, keys) = setup(1);
        let mut first = List::new(1);
        let mut second = List::new(2);
        assert!(first.push_back(&mut nodes, keys[0]));
        assert!(!second.push_back(&mut nodes, keys[0]));
        assert!(!first.push_front(&mut nodes, keys[0]));
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
    }
}
