use crate::arena::NodeId;
use crate::children::{ChildKey, ChildMap};
use crate::fragment::Fragment;

/// A tree vertex. The fragments along the path from the root to a node
/// spell a prefix of a key; `depth` is the offset where this node's
/// fragment starts within that key.
///
/// Values live only in leaves, and every leaf has an empty fragment: a
/// stored key is represented by an internal node whose path spells the
/// whole key, with the leaf sitting in that node's empty dispatch slot.
pub(crate) struct Node<K, V> {
    pub(crate) fragment: Fragment,
    pub(crate) depth: usize,
    pub(crate) parent: Option<NodeId>,
    pub(crate) content: Content<K, V>,
}

pub(crate) enum Content<K, V> {
    Inner(ChildMap),
    Leaf { key: K, value: V },
}

impl<K, V> Node<K, V> {
    pub(crate) fn new_root() -> Self {
        Self {
            fragment: Fragment::empty(),
            depth: 0,
            parent: None,
            content: Content::Inner(ChildMap::new()),
        }
    }

    pub(crate) fn new_inner(fragment: Fragment, depth: usize, parent: NodeId) -> Self {
        Self {
            fragment,
            depth,
            parent: Some(parent),
            content: Content::Inner(ChildMap::new()),
        }
    }

    pub(crate) fn new_leaf(key: K, value: V, depth: usize, parent: NodeId) -> Self {
        Self {
            fragment: Fragment::empty(),
            depth,
            parent: Some(parent),
            content: Content::Leaf { key, value },
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        matches!(&self.content, Content::Leaf { .. })
    }

    /// Child map of an internal node. Callers hold a structural guarantee
    /// that the node is internal (e.g. it is some node's parent).
    pub(crate) fn children(&self) -> &ChildMap {
        match &self.content {
            Content::Inner(children) => children,
            Content::Leaf { .. } => unreachable!("leaf nodes have no child map"),
        }
    }

    pub(crate) fn children_mut(&mut self) -> &mut ChildMap {
        match &mut self.content {
            Content::Inner(children) => children,
            Content::Leaf { .. } => unreachable!("leaf nodes have no child map"),
        }
    }

    pub(crate) fn value(&self) -> Option<&V> {
        let Content::Leaf { value, .. } = &self.content else {
            return None;
        };
        Some(value)
    }

    pub(crate) fn value_mut(&mut self) -> Option<&mut V> {
        let Content::Leaf { value, .. } = &mut self.content else {
            return None;
        };
        Some(value)
    }

    pub(crate) fn entry(&self) -> Option<(&K, &V)> {
        let Content::Leaf { key, value } = &self.content else {
            return None;
        };
        Some((key, value))
    }

    /// Consumes the node, yielding the stored pair if it was a leaf.
    pub(crate) fn into_entry(self) -> Option<(K, V)> {
        let Content::Leaf { key, value } = self.content else {
            return None;
        };
        Some((key, value))
    }

    /// The node's dispatch key in its parent's child map: leaves sit in the
    /// empty slot, internal nodes under their fragment's first byte.
    pub(crate) fn child_key(&self) -> ChildKey {
        match &self.content {
            Content::Leaf { .. } => ChildKey::Empty,
            Content::Inner(_) => match self.fragment.first() {
                Some(byte) => ChildKey::First(byte),
                None => unreachable!("non-root internal node with empty fragment"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Content, Node};
    use crate::arena::NodeId;
    use crate::children::ChildKey;
    use crate::fragment::Fragment;

    #[test]
    fn leaf_accessors() {
        let parent = NodeId::from_index(0);
        let leaf: Node<String, u32> = Node::new_leaf("bind".to_string(), 6, 4, parent);
        assert!(leaf.is_leaf());
        assert!(leaf.fragment.is_empty());
        assert_eq!(leaf.value(), Some(&6));
        assert_eq!(leaf.entry(), Some((&"bind".to_string(), &6)));
        assert_eq!(leaf.child_key(), ChildKey::Empty);
        assert_eq!(leaf.into_entry(), Some(("bind".to_string(), 6)));
    }

    #[test]
    fn inner_dispatches_on_first_byte() {
        let parent = NodeId::from_index(0);
        let inner: Node<String, u32> = Node::new_inner(Fragment::from_slice(b"ro"), 1, parent);
        assert!(!inner.is_leaf());
        assert_eq!(inner.child_key(), ChildKey::First(b'r'));
        assert!(inner.value().is_none());
        assert!(matches!(inner.content, Content::Inner(_)));
    }
}
