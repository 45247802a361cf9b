//! Structure introspection: node counts for memory analysis, and a full
//! shape validator used by the test suite after mutation sequences.

use crate::children::ChildKey;
use crate::keys::RadixKey;
use crate::node::Content;
use crate::tree::RadixMap;

/// Shape summary of a tree, gathered by walking every node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreeStats {
    /// Internal nodes, the root included.
    pub num_inner: usize,
    /// Leaves; equals the entry count.
    pub num_leaves: usize,
    /// Nodes on the longest root-to-leaf path, zero for an empty tree.
    pub max_height: usize,
    /// Total bytes held in edge fragments. With path compression this stays
    /// near the total length of the distinct key material, not the sum of
    /// all key lengths.
    pub fragment_bytes: usize,
}

impl<K, V> RadixMap<K, V> {
    /// Walks the whole tree and reports its shape.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        let mut pending = vec![(self.root, 1usize)];
        while let Some((id, height)) = pending.pop() {
            let node = &self.nodes[id];
            stats.fragment_bytes += node.fragment.len();
            match &node.content {
                Content::Leaf { .. } => {
                    stats.num_leaves += 1;
                    stats.max_height = stats.max_height.max(height);
                }
                Content::Inner(children) => {
                    stats.num_inner += 1;
                    for (_, child) in children.iter() {
                        pending.push((child, height + 1));
                    }
                }
            }
        }
        stats
    }
}

impl<K: RadixKey, V> RadixMap<K, V> {
    /// Asserts every structural rule of the tree; panics on the first
    /// violation. A debugging aid for tests, linear in total key bytes.
    pub fn check_invariants(&self) {
        {
            let root = &self.nodes[self.root];
            assert!(root.parent.is_none(), "root must have no parent");
            assert!(root.fragment.is_empty(), "root must have an empty fragment");
            assert_eq!(root.depth, 0, "root depth must be zero");
            assert!(!root.is_leaf(), "root must be an internal node");
        }

        let mut leaves = 0usize;
        let mut visited = 0usize;
        // Each entry pairs a node with the bytes spelled by the path to it.
        let mut pending = vec![(self.root, Vec::new())];
        while let Some((id, path)) = pending.pop() {
            visited += 1;
            let node = &self.nodes[id];
            let children = match &node.content {
                Content::Leaf { key, .. } => {
                    leaves += 1;
                    assert_eq!(
                        key.bytes().as_ref(),
                        path.as_slice(),
                        "leaf key must equal the bytes spelled by its path"
                    );
                    assert_eq!(
                        node.depth,
                        path.len(),
                        "leaf depth must equal its key length"
                    );
                    continue;
                }
                Content::Inner(children) => children,
            };

            if id != self.root {
                assert!(
                    children.num_children() >= 1,
                    "internal node must have at least one child"
                );
                if let Some((key, _)) = children.sole_child() {
                    assert_eq!(
                        key,
                        ChildKey::Empty,
                        "a sole child must be the node's own leaf"
                    );
                }
            }

            let child_depth = node.depth + node.fragment.len();
            for (key, child_id) in children.iter() {
                let child = &self.nodes[child_id];
                assert_eq!(
                    child.parent,
                    Some(id),
                    "child must point back at its parent"
                );
                assert_eq!(
                    child.depth, child_depth,
                    "child depth must be parent depth plus fragment length"
                );
                match key {
                    ChildKey::Empty => {
                        assert!(child.is_leaf(), "the empty slot must hold a leaf");
                        assert!(child.fragment.is_empty(), "leaf fragment must be empty");
                    }
                    ChildKey::First(byte) => {
                        assert!(
                            !child.is_leaf(),
                            "byte-keyed children must be internal nodes"
                        );
                        assert_eq!(
                            child.fragment.first(),
                            Some(byte),
                            "dispatch byte must be the child fragment's first byte"
                        );
                    }
                }
                let mut child_path = path.clone();
                child_path.extend_from_slice(child.fragment.as_slice());
                pending.push((child_id, child_path));
            }
        }

        assert_eq!(leaves, self.len(), "leaf count must equal the entry count");
        assert_eq!(
            visited,
            self.nodes.size(),
            "arena must hold exactly the reachable nodes"
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::RadixMap;

    #[test]
    fn stats_of_empty_and_small_trees() {
        let mut map: RadixMap<String, u32> = RadixMap::new();
        let stats = map.stats();
        assert_eq!(stats.num_inner, 1);
        assert_eq!(stats.num_leaves, 0);
        assert_eq!(stats.max_height, 0);
        assert_eq!(stats.fragment_bytes, 0);

        map.insert("bind".to_string(), 6);
        map.insert("binary".to_string(), 5);
        let stats = map.stats();
        assert_eq!(stats.num_leaves, 2);
        assert_eq!(stats.num_inner, 4); // root, "bin", "ary", "d"
        // "bin" + "ary" + "d" shared storage, not 4 + 6 bytes.
        assert_eq!(stats.fragment_bytes, 7);
        assert_eq!(stats.max_height, 4); // root -> "bin" -> branch -> leaf
    }

    #[test]
    fn fragment_bytes_reflect_compression() {
        let long: RadixMap<String, ()> = [("interchangeable".to_string(), ())]
            .into_iter()
            .collect();
        assert_eq!(long.stats().fragment_bytes, "interchangeable".len());
    }
}
