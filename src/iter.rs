use crate::arena::NodeId;
use crate::tree::RadixMap;

/// In-order iterator over the entries of a [`RadixMap`].
///
/// Walks leaf to leaf through parent links, so construction is O(depth) and
/// no per-iterator stack is kept.
pub struct Iter<'a, K, V> {
    map: &'a RadixMap<K, V>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(map: &'a RadixMap<K, V>) -> Self {
        Self {
            map,
            next: map.descend_first(map.root),
            remaining: map.len(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.map.successor(current);
        self.remaining -= 1;
        self.map.nodes[current].entry()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Iterator over the keys of a [`RadixMap`], in order.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) fn new(map: &'a RadixMap<K, V>) -> Self {
        Self { inner: Iter::new(map) }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Iterator over the values of a [`RadixMap`], in key order.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) fn new(map: &'a RadixMap<K, V>) -> Self {
        Self { inner: Iter::new(map) }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Iterator over one subtree's entries, as returned by
/// [`prefix_match`](RadixMap::prefix_match) and
/// [`greedy_match`](RadixMap::greedy_match).
///
/// The bounds are fixed up front as a half-open leaf range: the subtree's
/// first leaf up to (not including) the in-order successor of its last.
pub struct Matches<'a, K, V> {
    map: &'a RadixMap<K, V>,
    next: Option<NodeId>,
    end: Option<NodeId>,
}

impl<'a, K, V> Matches<'a, K, V> {
    pub(crate) fn subtree(map: &'a RadixMap<K, V>, subroot: NodeId) -> Self {
        let next = map.descend_first(subroot);
        let end = map.descend_last(subroot).and_then(|last| map.successor(last));
        Self { map, next, end }
    }

    pub(crate) fn none(map: &'a RadixMap<K, V>) -> Self {
        Self { map, next: None, end: None }
    }
}

impl<'a, K, V> Iterator for Matches<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == self.end {
            return None;
        }
        let current = self.next?;
        self.next = self.map.successor(current);
        self.map.nodes[current].entry()
    }
}
