use std::borrow::Borrow;
use std::fmt;
use std::ops::Index;

use crate::arena::{Arena, NodeId};
use crate::children::ChildKey;
use crate::fragment::Fragment;
use crate::iter::{Iter, Keys, Matches, Values};
use crate::keys::RadixKey;
use crate::node::{Content, Node};

/// A position in a [`RadixMap`]: either a leaf holding an entry, or the end
/// sentinel.
///
/// Cursors are plain copyable tokens and do not borrow the map, which is
/// what allows removing through them. The flip side is that a cursor is
/// invalidated by any structural change to the leaf it names or to one of
/// its ancestors; dereferencing an invalidated cursor panics.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cursor {
    node: Option<NodeId>,
}

impl Cursor {
    pub(crate) fn at(node: NodeId) -> Self {
        Self { node: Some(node) }
    }

    pub(crate) fn end() -> Self {
        Self { node: None }
    }

    /// True for the end sentinel.
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    pub(crate) fn node(&self) -> Option<NodeId> {
        self.node
    }
}

/// An ordered map from byte-comparable keys to values, stored as a
/// compressed prefix tree (PATRICIA-style radix tree).
///
/// Chains of single-child nodes are collapsed into multi-byte edge
/// fragments, so lookup cost follows the shared-prefix structure of the key
/// set rather than raw key length times fan-out. On top of exact lookup the
/// map answers [`longest_match`](RadixMap::longest_match) (longest stored
/// key that prefixes a query) and [`prefix_match`](RadixMap::prefix_match)
/// (every stored key extending a query), both of which are awkward to get
/// out of a `BTreeMap` or hash map.
///
/// Unlike the std maps, [`insert`](RadixMap::insert) does not overwrite an
/// existing entry; it reports the collision and leaves the map unchanged.
///
/// ## Examples
///
/// ```
/// use radixmap::RadixMap;
///
/// let mut routes: RadixMap<String, &str> = RadixMap::new();
/// routes.insert("/".to_string(), "index");
/// routes.insert("/assets/".to_string(), "static files");
/// routes.insert("/api/users".to_string(), "user service");
///
/// // Longest registered route that prefixes the request path.
/// let (route, handler) = routes.longest_match("/assets/logo.png").unwrap();
/// assert_eq!(route, "/assets/");
/// assert_eq!(*handler, "static files");
///
/// // Every route under a path, in lexicographic order.
/// let api: Vec<_> = routes.prefix_match("/api").map(|(k, _)| k.as_str()).collect();
/// assert_eq!(api, ["/api/users"]);
/// ```
pub struct RadixMap<K, V> {
    pub(crate) nodes: Arena<Node<K, V>>,
    pub(crate) root: NodeId,
    len: usize,
}

impl<K, V> RadixMap<K, V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        let mut nodes = Arena::new();
        let root = nodes.add(Node::new_root());
        Self { nodes, root, len: 0 }
    }

    /// Number of stored entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every entry. Teardown is slot-by-slot in the arena, never a
    /// walk of the node graph, so arbitrarily deep trees are fine.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = self.nodes.add(Node::new_root());
        self.len = 0;
    }

    /// In-order iterator over `(&key, &value)` entries.
    ///
    /// Order is lexicographic over key bytes: at every node the
    /// empty-fragment leaf (the key ending exactly there) comes before all
    /// longer extensions.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self)
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self)
    }

    /// Entry with the lexicographically smallest key.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let id = self.descend_first(self.root)?;
        self.nodes[id].entry()
    }

    /// Entry with the lexicographically largest key.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let id = self.descend_last(self.root)?;
        self.nodes[id].entry()
    }

    /// Cursor at the first entry, or the end sentinel when empty.
    pub fn first(&self) -> Cursor {
        Cursor { node: self.descend_first(self.root) }
    }

    /// The entry a cursor points at; `None` for the end sentinel.
    ///
    /// Panics if the cursor was invalidated by an intervening mutation.
    pub fn entry_at(&self, cursor: Cursor) -> Option<(&K, &V)> {
        let node = cursor.node()?;
        match self.nodes[node].entry() {
            Some(entry) => Some(entry),
            None => panic!("stale cursor: slot no longer holds a leaf"),
        }
    }

    /// Mutable value access through a cursor; `None` for the end sentinel.
    pub fn value_at_mut(&mut self, cursor: Cursor) -> Option<&mut V> {
        let node = cursor.node()?;
        match self.nodes[node].value_mut() {
            Some(value) => Some(value),
            None => panic!("stale cursor: slot no longer holds a leaf"),
        }
    }

    /// Cursor at the in-order successor. The end sentinel stays put.
    pub fn advance(&self, cursor: Cursor) -> Cursor {
        match cursor.node() {
            Some(node) => Cursor { node: self.successor(node) },
            None => Cursor::end(),
        }
    }

    /// Removes the entry under `cursor` and returns a cursor at its
    /// in-order successor. The successor is computed before anything is
    /// unlinked, so the returned cursor is valid afterwards.
    ///
    /// Panics on the end sentinel or an invalidated cursor.
    pub fn remove_at(&mut self, cursor: Cursor) -> Cursor {
        let Some(leaf) = cursor.node() else {
            panic!("remove_at on the end sentinel");
        };
        assert!(
            self.nodes[leaf].is_leaf(),
            "stale cursor: slot no longer holds a leaf"
        );
        let next = self.successor(leaf);
        self.remove_leaf(leaf);
        Cursor { node: next }
    }

    /// Keeps only the entries for which `pred` returns true, in order.
    ///
    /// ## Examples
    ///
    /// ```
    /// use radixmap::RadixMap;
    ///
    /// let mut map: RadixMap<String, u32> = RadixMap::new();
    /// for (word, n) in [("bind", 6), ("binary", 5), ("bro", 10)] {
    ///     map.insert(word.to_string(), n);
    /// }
    /// map.retain(|_, n| *n % 2 == 0);
    /// let left: Vec<_> = map.keys().map(String::as_str).collect();
    /// assert_eq!(left, ["bind", "bro"]);
    /// ```
    pub fn retain<F>(&mut self, mut pred: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut cursor = self.first();
        while let Some(node) = cursor.node() {
            let Content::Leaf { key, value } = &mut self.nodes[node].content else {
                unreachable!("cursor walk reached an internal node");
            };
            cursor = if pred(key, value) {
                self.advance(cursor)
            } else {
                self.remove_at(cursor)
            };
        }
    }

    // Leftmost leaf of the subtree under `from`; None only for a childless
    // root.
    pub(crate) fn descend_first(&self, from: NodeId) -> Option<NodeId> {
        let mut current = from;
        loop {
            match &self.nodes[current].content {
                Content::Leaf { .. } => return Some(current),
                Content::Inner(children) => match children.first_child() {
                    Some(child) => current = child,
                    None => return None,
                },
            }
        }
    }

    // Rightmost leaf of the subtree under `from`.
    pub(crate) fn descend_last(&self, from: NodeId) -> Option<NodeId> {
        let mut current = from;
        loop {
            match &self.nodes[current].content {
                Content::Leaf { .. } => return Some(current),
                Content::Inner(children) => match children.last_child() {
                    Some(child) => current = child,
                    None => return None,
                },
            }
        }
    }

    // In-order successor leaf: nearest ancestor with a later sibling, then
    // leftmost under that sibling. None once the root is exhausted.
    pub(crate) fn successor(&self, node: NodeId) -> Option<NodeId> {
        let mut current = node;
        loop {
            let parent = self.nodes[current].parent?;
            let key = self.nodes[current].child_key();
            if let Some(sibling) = self.nodes[parent].children().next_after(key) {
                return self.descend_first(sibling);
            }
            current = parent;
        }
    }

    fn remove_leaf(&mut self, leaf_id: NodeId) -> (K, V) {
        debug_assert!(self.nodes[leaf_id].is_leaf());
        let parent_id = match self.nodes[leaf_id].parent {
            Some(parent) => parent,
            None => unreachable!("leaf without a parent"),
        };
        let detached = self.nodes[parent_id].children_mut().delete_child(ChildKey::Empty);
        debug_assert_eq!(detached, Some(leaf_id));
        let leaf = self.nodes.free(leaf_id);
        self.len -= 1;
        self.collapse(parent_id);
        match leaf.into_entry() {
            Some(entry) => entry,
            None => unreachable!("removed node was not a leaf"),
        }
    }

    // Upward cleanup after a leaf removal: first drop a parent left with no
    // children, then fold a node left with a single internal child into
    // that child, restoring prefix compression. Runs entirely within one
    // removal; intermediate states are never observable.
    fn collapse(&mut self, parent_id: NodeId) {
        if parent_id == self.root || self.nodes[parent_id].children().num_children() > 1 {
            return;
        }

        let target = if self.nodes[parent_id].children().is_empty() {
            let grandparent = match self.nodes[parent_id].parent {
                Some(grandparent) => grandparent,
                None => unreachable!("non-root node without a parent"),
            };
            let key = self.nodes[parent_id].child_key();
            let detached = self.nodes[grandparent].children_mut().delete_child(key);
            debug_assert_eq!(detached, Some(parent_id));
            self.nodes.free(parent_id);
            grandparent
        } else {
            parent_id
        };

        if target == self.root {
            return;
        }
        let Some((survivor_key, survivor)) = self.nodes[target].children().sole_child() else {
            return;
        };
        if survivor_key == ChildKey::Empty {
            // The survivor is the leaf for a key ending exactly here; a
            // single-leaf node is a valid terminal shape, not a redundancy.
            return;
        }

        // Fold `target` into its sole internal child: the child absorbs the
        // fragment and takes target's place under the same first byte.
        let target_parent = match self.nodes[target].parent {
            Some(parent) => parent,
            None => unreachable!("non-root node without a parent"),
        };
        let target_key = self.nodes[target].child_key();
        let target_depth = self.nodes[target].depth;
        let merged = self.nodes[target].fragment.join(&self.nodes[survivor].fragment);
        {
            let survivor_node = &mut self.nodes[survivor];
            survivor_node.fragment = merged;
            survivor_node.depth = target_depth;
            survivor_node.parent = Some(target_parent);
        }
        self.nodes[target_parent].children_mut().update_child(target_key, survivor);
        self.nodes.free(target);
    }
}

impl<K: RadixKey, V> RadixMap<K, V> {
    /// Walks from the root toward the deepest node consistent with `query`.
    ///
    /// Exactly one child can continue a walk: the one whose fragment starts
    /// with the next unconsumed byte. The walk first dispatches on that
    /// byte, then verifies the child's whole fragment against the query. A
    /// full match descends; a first-byte-only match returns the child
    /// itself, and callers branch on that (insertion's split decision, the
    /// walk-upward in longest_match). A fully consumed query lands on the
    /// empty-slot leaf when one exists, which is the exact-match case.
    fn find_node(&self, query: &[u8]) -> NodeId {
        let mut current = self.root;
        loop {
            let node = &self.nodes[current];
            let children = match &node.content {
                Content::Inner(children) => children,
                Content::Leaf { .. } => return current,
            };
            if children.is_empty() {
                return current;
            }
            let consumed = node.depth + node.fragment.len();
            if consumed == query.len() {
                return match children.seek_child(ChildKey::Empty) {
                    Some(leaf) => leaf,
                    None => current,
                };
            }
            let Some(child) = children.seek_child(ChildKey::First(query[consumed])) else {
                return current;
            };
            if self.nodes[child].fragment.matches_start_of(&query[consumed..]) {
                current = child;
            } else {
                return child;
            }
        }
    }

    /// Returns the value stored at exactly `key`.
    ///
    /// ## Examples
    ///
    /// ```
    /// use radixmap::RadixMap;
    ///
    /// let mut map: RadixMap<String, u32> = RadixMap::new();
    /// map.insert("avenger".to_string(), 4);
    /// assert_eq!(map.get("avenger"), Some(&4));
    /// assert_eq!(map.get("avenge"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: RadixKey + ?Sized,
    {
        let bytes = key.bytes();
        let node = self.find_node(bytes.as_ref());
        self.nodes[node].value()
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: RadixKey + ?Sized,
    {
        let node = {
            let bytes = key.bytes();
            self.find_node(bytes.as_ref())
        };
        self.nodes[node].value_mut()
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: RadixKey + ?Sized,
    {
        let bytes = key.bytes();
        let node = self.find_node(bytes.as_ref());
        self.nodes[node].entry()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: RadixKey + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Cursor at the entry for `key`, or the end sentinel if absent.
    pub fn find<Q>(&self, key: &Q) -> Cursor
    where
        K: Borrow<Q>,
        Q: RadixKey + ?Sized,
    {
        let bytes = key.bytes();
        let node = self.find_node(bytes.as_ref());
        if self.nodes[node].is_leaf() {
            Cursor::at(node)
        } else {
            Cursor::end()
        }
    }

    /// Inserts an entry, returning a cursor at the stored leaf and whether
    /// a new entry was created.
    ///
    /// An existing entry for the key is left untouched: the returned flag
    /// is `false` and the cursor points at the prior entry. Use
    /// [`get_mut`](RadixMap::get_mut) or
    /// [`get_or_insert_default`](RadixMap::get_or_insert_default) to update
    /// in place.
    ///
    /// ## Examples
    ///
    /// ```
    /// use radixmap::RadixMap;
    ///
    /// let mut map: RadixMap<String, u32> = RadixMap::new();
    /// let (_, inserted) = map.insert("bind".to_string(), 6);
    /// assert!(inserted);
    /// let (at, inserted) = map.insert("bind".to_string(), 99);
    /// assert!(!inserted);
    /// assert_eq!(map.entry_at(at), Some((&"bind".to_string(), &6)));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (Cursor, bool) {
        enum Site {
            Append(NodeId),
            Split(NodeId),
        }

        let site = {
            let bytes = key.bytes();
            let query = bytes.as_ref();
            let landing = self.find_node(query);
            let node = &self.nodes[landing];
            if node.is_leaf() {
                return (Cursor::at(landing), false);
            }
            if landing == self.root || node.fragment.matches_start_of(&query[node.depth..]) {
                Site::Append(landing)
            } else {
                Site::Split(landing)
            }
        };
        let leaf = match site {
            Site::Append(node) => self.append(node, key, value),
            Site::Split(node) => self.prepend(node, key, value),
        };
        self.len += 1;
        (Cursor::at(leaf), true)
    }

    // Grows the tree below `parent_id`, whose path is fully matched by the
    // key: hang the unconsumed remainder under it. A non-empty remainder
    // becomes an internal node with the leaf in its empty slot; an empty
    // remainder means the key ends exactly at the parent and the leaf goes
    // straight into the parent's empty slot.
    fn append(&mut self, parent_id: NodeId, key: K, value: V) -> NodeId {
        let depth = {
            let parent = &self.nodes[parent_id];
            parent.depth + parent.fragment.len()
        };
        let (remainder, key_len) = {
            let bytes = key.bytes();
            let query = bytes.as_ref();
            (Fragment::from_slice(&query[depth..]), query.len())
        };

        if remainder.is_empty() {
            let leaf = self.nodes.add(Node::new_leaf(key, value, depth, parent_id));
            self.nodes[parent_id].children_mut().add_child(ChildKey::Empty, leaf);
            return leaf;
        }
        let first = remainder.at(0);
        let inner = self.nodes.add(Node::new_inner(remainder, depth, parent_id));
        self.nodes[parent_id].children_mut().add_child(ChildKey::First(first), inner);
        let leaf = self.nodes.add(Node::new_leaf(key, value, key_len, inner));
        self.nodes[inner].children_mut().add_child(ChildKey::Empty, leaf);
        leaf
    }

    // Splits the edge above `node_id`, whose fragment shares a non-empty
    // proper prefix with the key's unconsumed remainder: a new node holding
    // the shared prefix takes node's place, node re-hangs below it with the
    // shared bytes dropped, and the key's diverging remainder becomes the
    // sibling branch.
    fn prepend(&mut self, node_id: NodeId, key: K, value: V) -> NodeId {
        let (count, node_depth) = {
            let node = &self.nodes[node_id];
            let bytes = key.bytes();
            let query = bytes.as_ref();
            (node.fragment.common_prefix_len(&query[node.depth..]), node.depth)
        };
        assert!(count > 0, "edge split without a shared first byte");
        debug_assert!(count < self.nodes[node_id].fragment.len());

        let (key_len, diverging) = {
            let bytes = key.bytes();
            let query = bytes.as_ref();
            let split_end = node_depth + count;
            let rest = if split_end == query.len() {
                None
            } else {
                Some(Fragment::from_slice(&query[split_end..]))
            };
            (query.len(), rest)
        };

        let parent_id = match self.nodes[node_id].parent {
            Some(parent) => parent,
            None => unreachable!("attempted split of the root"),
        };
        let shared = self.nodes[node_id].fragment.before(count);
        let kept = self.nodes[node_id].fragment.after(count);
        let slot = ChildKey::First(shared.at(0));

        let split = self.nodes.add(Node::new_inner(shared, node_depth, parent_id));
        let detached = self.nodes[parent_id].children_mut().delete_child(slot);
        debug_assert_eq!(detached, Some(node_id));
        self.nodes[parent_id].children_mut().add_child(slot, split);

        let kept_slot = ChildKey::First(kept.at(0));
        {
            let node = &mut self.nodes[node_id];
            node.fragment = kept;
            node.depth = node_depth + count;
            node.parent = Some(split);
        }
        self.nodes[split].children_mut().add_child(kept_slot, node_id);

        match diverging {
            None => {
                // The new key is exhausted at the split point.
                let leaf = self.nodes.add(Node::new_leaf(key, value, key_len, split));
                self.nodes[split].children_mut().add_child(ChildKey::Empty, leaf);
                leaf
            }
            Some(rest) => {
                let first = rest.at(0);
                let inner = self.nodes.add(Node::new_inner(rest, node_depth + count, split));
                self.nodes[split].children_mut().add_child(ChildKey::First(first), inner);
                let leaf = self.nodes.add(Node::new_leaf(key, value, key_len, inner));
                self.nodes[inner].children_mut().add_child(ChildKey::Empty, leaf);
                leaf
            }
        }
    }

    /// Removes the entry at exactly `key`, returning its value.
    ///
    /// Removal re-merges any internal node the deletion leaves with a
    /// single internal child, so the compressed shape after a removal is
    /// the same as if the key had never been inserted.
    ///
    /// ## Examples
    ///
    /// ```
    /// use radixmap::RadixMap;
    ///
    /// let mut map: RadixMap<String, u32> = RadixMap::new();
    /// map.insert("bro".to_string(), 10);
    /// map.insert("brother".to_string(), 7);
    /// assert_eq!(map.remove("bro"), Some(10));
    /// assert_eq!(map.remove("bro"), None);
    /// assert_eq!(map.get("brother"), Some(&7));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: RadixKey + ?Sized,
    {
        let leaf = {
            let bytes = key.bytes();
            let node = self.find_node(bytes.as_ref());
            if !self.nodes[node].is_leaf() {
                return None;
            }
            node
        };
        let (_, value) = self.remove_leaf(leaf);
        Some(value)
    }

    /// Value at `key`, inserting `V::default()` first when absent.
    ///
    /// ## Examples
    ///
    /// ```
    /// use radixmap::RadixMap;
    ///
    /// let mut counts: RadixMap<String, u32> = RadixMap::new();
    /// *counts.get_or_insert_default("bind".to_string()) += 1;
    /// *counts.get_or_insert_default("bind".to_string()) += 1;
    /// assert_eq!(counts.get("bind"), Some(&2));
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let landing = {
            let bytes = key.bytes();
            self.find_node(bytes.as_ref())
        };
        let leaf = if self.nodes[landing].is_leaf() {
            landing
        } else {
            let (cursor, inserted) = self.insert(key, V::default());
            debug_assert!(inserted);
            match cursor.node() {
                Some(leaf) => leaf,
                None => unreachable!("insert returned the end sentinel"),
            }
        };
        match self.nodes[leaf].value_mut() {
            Some(value) => value,
            None => unreachable!("leaf without a value"),
        }
    }

    /// The entry with the longest stored key that is a prefix of `query`.
    ///
    /// ## Examples
    ///
    /// ```
    /// use radixmap::RadixMap;
    ///
    /// let mut map: RadixMap<String, u32> = RadixMap::new();
    /// map.insert("bind".to_string(), 6);
    /// map.insert("binary".to_string(), 5);
    /// let hit = map.longest_match("binder");
    /// assert_eq!(hit, Some((&"bind".to_string(), &6)));
    /// assert_eq!(map.longest_match("apple"), None);
    /// ```
    pub fn longest_match<Q>(&self, query: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: RadixKey + ?Sized,
    {
        let bytes = query.bytes();
        let query = bytes.as_ref();
        let landing = self.find_node(query);
        let node = &self.nodes[landing];
        if node.is_leaf() {
            // Exact hit; nothing longer can prefix the query.
            return node.entry();
        }
        // A landing node whose own fragment diverges from the query cannot
        // end a matching prefix, so start the upward scan at its parent.
        let mut current = if node.fragment.matches_start_of(&query[node.depth..]) {
            Some(landing)
        } else {
            node.parent
        };
        while let Some(id) = current {
            let node = &self.nodes[id];
            if let Some(leaf) = node.children().seek_child(ChildKey::Empty) {
                return self.nodes[leaf].entry();
            }
            current = node.parent;
        }
        None
    }

    /// Iterates over every entry whose key starts with `prefix`, in order.
    ///
    /// ## Examples
    ///
    /// ```
    /// use radixmap::RadixMap;
    ///
    /// let mut map: RadixMap<String, u32> = RadixMap::new();
    /// for (word, n) in [("affair", 3), ("afford", 1), ("apache", 0)] {
    ///     map.insert(word.to_string(), n);
    /// }
    /// let hits: Vec<_> = map.prefix_match("aff").map(|(k, _)| k.as_str()).collect();
    /// assert_eq!(hits, ["affair", "afford"]);
    /// assert_eq!(map.prefix_match("b").count(), 0);
    /// ```
    pub fn prefix_match<Q>(&self, prefix: &Q) -> Matches<'_, K, V>
    where
        K: Borrow<Q>,
        Q: RadixKey + ?Sized,
    {
        let bytes = prefix.bytes();
        let query = bytes.as_ref();
        let subroot = self.match_root(query);
        // The walk can stop early on a diverging edge; the subtree only
        // holds extensions of the prefix if the overlapping region agrees.
        let node = &self.nodes[subroot];
        let remaining = &query[node.depth..];
        if node.fragment.common_prefix_len(remaining) < remaining.len() {
            return Matches::none(self);
        }
        Matches::subtree(self, subroot)
    }

    /// Iterates over the subtree the query walks into, without checking
    /// that the query actually matches the landing edge.
    ///
    /// Where [`prefix_match`](RadixMap::prefix_match) returns nothing for a
    /// query that diverges in the middle of an edge fragment, this returns
    /// every entry sharing the path walked so far. Callers that only want
    /// true extensions of the query should use `prefix_match`.
    pub fn greedy_match<Q>(&self, query: &Q) -> Matches<'_, K, V>
    where
        K: Borrow<Q>,
        Q: RadixKey + ?Sized,
    {
        let bytes = query.bytes();
        let subroot = self.match_root(bytes.as_ref());
        Matches::subtree(self, subroot)
    }

    // Subtree root for enumeration: the landing node, stepped up to its
    // parent when the landing is the exact-match leaf (the parent's subtree
    // then includes that leaf plus every extension).
    fn match_root(&self, query: &[u8]) -> NodeId {
        let landing = self.find_node(query);
        let node = &self.nodes[landing];
        if node.is_leaf() {
            match node.parent {
                Some(parent) => parent,
                None => unreachable!("leaf without a parent"),
            }
        } else {
            landing
        }
    }
}

impl<K, V> Default for RadixMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RadixMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, Q, V> Index<&Q> for RadixMap<K, V>
where
    K: RadixKey + Borrow<Q>,
    Q: RadixKey + ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

/// Duplicate keys in the source keep the first occurrence, matching
/// [`insert`](RadixMap::insert)'s no-overwrite rule.
impl<K: RadixKey, V> Extend<(K, V)> for RadixMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: RadixKey, V> FromIterator<(K, V)> for RadixMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V> IntoIterator for &'a RadixMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
