use std::collections::btree_map::{BTreeMap, Entry};
use std::ops::Bound;

use crate::arena::NodeId;

/// Dispatch key for a child inside its parent's map.
///
/// Children never share a first byte, and at most one child per node has an
/// empty fragment (the leaf holding a value at the parent's exact prefix).
/// That makes `(Empty | First(byte))` a complete identifier, and the derived
/// ordering puts the empty-fragment leaf before every extension, which is
/// what yields lexicographic traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum ChildKey {
    Empty,
    First(u8),
}

/// Ordered child map of an internal node.
#[derive(Debug, Clone, Default)]
pub(crate) struct ChildMap {
    children: BTreeMap<ChildKey, NodeId>,
}

impl ChildMap {
    pub(crate) fn new() -> Self {
        Self { children: BTreeMap::new() }
    }

    /// Inserts a child that must not already be present.
    pub(crate) fn add_child(&mut self, key: ChildKey, node: NodeId) {
        match self.children.entry(key) {
            Entry::Vacant(e) => {
                e.insert(node);
            }
            Entry::Occupied(_) => unreachable!("duplicate child dispatch key"),
        }
    }

    /// Repoints an existing slot, e.g. when a collapse swaps a node for its
    /// merged child under the same first byte.
    pub(crate) fn update_child(&mut self, key: ChildKey, node: NodeId) {
        self.children.insert(key, node);
    }

    pub(crate) fn seek_child(&self, key: ChildKey) -> Option<NodeId> {
        self.children.get(&key).copied()
    }

    pub(crate) fn delete_child(&mut self, key: ChildKey) -> Option<NodeId> {
        self.children.remove(&key)
    }

    #[inline]
    pub(crate) fn num_children(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn first_child(&self) -> Option<NodeId> {
        self.children.first_key_value().map(|(_, id)| *id)
    }

    pub(crate) fn last_child(&self) -> Option<NodeId> {
        self.children.last_key_value().map(|(_, id)| *id)
    }

    /// The only child, when exactly one remains. Erase collapse uses this to
    /// find the surviving sibling of a removed leaf.
    pub(crate) fn sole_child(&self) -> Option<(ChildKey, NodeId)> {
        if self.children.len() == 1 {
            self.children.first_key_value().map(|(k, id)| (*k, *id))
        } else {
            None
        }
    }

    /// The in-order successor sibling of the child at `key`, if any.
    pub(crate) fn next_after(&self, key: ChildKey) -> Option<NodeId> {
        self.children
            .range((Bound::Excluded(key), Bound::Unbounded))
            .next()
            .map(|(_, id)| *id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (ChildKey, NodeId)> + '_ {
        self.children.iter().map(|(k, id)| (*k, *id))
    }
}

#[cfg(test)]
mod tests {
    use super::{ChildKey, ChildMap};
    use crate::arena::NodeId;

    #[test]
    fn empty_sorts_before_any_byte() {
        assert!(ChildKey::Empty < ChildKey::First(0));
        assert!(ChildKey::First(b'a') < ChildKey::First(b'b'));
    }

    #[test]
    fn ordered_traversal_and_successors() {
        let mut map = ChildMap::new();
        map.add_child(ChildKey::First(b'r'), NodeId::from_index(1));
        map.add_child(ChildKey::Empty, NodeId::from_index(0));
        map.add_child(ChildKey::First(b'a'), NodeId::from_index(2));

        let order: Vec<_> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(
            order,
            vec![ChildKey::Empty, ChildKey::First(b'a'), ChildKey::First(b'r')]
        );
        assert_eq!(map.first_child(), Some(NodeId::from_index(0)));
        assert_eq!(map.last_child(), Some(NodeId::from_index(1)));
        assert_eq!(map.next_after(ChildKey::Empty), Some(NodeId::from_index(2)));
        assert_eq!(map.next_after(ChildKey::First(b'a')), Some(NodeId::from_index(1)));
        assert_eq!(map.next_after(ChildKey::First(b'r')), None);
    }

    #[test]
    fn delete_and_sole_child() {
        let mut map = ChildMap::new();
        map.add_child(ChildKey::Empty, NodeId::from_index(7));
        map.add_child(ChildKey::First(b'x'), NodeId::from_index(8));
        assert_eq!(map.sole_child(), None);
        assert_eq!(map.delete_child(ChildKey::First(b'x')), Some(NodeId::from_index(8)));
        assert_eq!(map.sole_child(), Some((ChildKey::Empty, NodeId::from_index(7))));
        assert_eq!(map.delete_child(ChildKey::First(b'x')), None);
    }
}
