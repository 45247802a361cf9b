use std::ops::{Index, IndexMut};

// u32 rather than usize: there won't be 4 billion nodes, and it keeps the
// parent/child handles small in structs that embed them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NodeId(u32);

impl NodeId {
    pub(crate) fn from_index(idx: u32) -> Self {
        Self(idx)
    }

    #[inline(always)]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Slot vector owning every node of a tree, addressed by [`NodeId`], with
/// freed slots kept on a free list for reuse. Handles to freed slots are a
/// caller bug; indexing through one panics.
///
/// Dropping or clearing the arena drops each slot independently, so tearing
/// down a tree never recurses over the node graph no matter how deep it is.
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free_list: Vec<u32>,
    size: usize,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: vec![],
            free_list: Vec::with_capacity(16),
            size: 0,
        }
    }

    pub(crate) fn add(&mut self, value: T) -> NodeId {
        let id = match self.free_list.pop() {
            None => {
                let id = NodeId::from_index(self.slots.len() as u32);
                self.slots.push(Some(value));
                id
            }
            Some(idx) => {
                debug_assert!(self.slots[idx as usize].is_none());
                self.slots[idx as usize] = Some(value);
                NodeId::from_index(idx)
            }
        };
        self.size += 1;
        id
    }

    /// Vacates the slot and returns its value. Panics on an already-free
    /// slot; erase paths rely on getting the owned node back.
    pub(crate) fn free(&mut self, id: NodeId) -> T {
        let idx = id.index();
        assert!(idx < self.slots.len(), "arena handle out of range");
        let Some(value) = self.slots[idx].take() else {
            panic!("free of vacant arena slot {idx}");
        };
        if idx == self.slots.len() - 1 {
            self.slots.pop();
        } else {
            self.free_list.push(id.0);
        }
        self.size -= 1;
        value
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.size = 0;
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &Self::Output {
        match self.slots.get(id.index()) {
            Some(Some(value)) => value,
            _ => panic!("stale node handle {}", id.0),
        }
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match self.slots.get_mut(id.index()) {
            Some(Some(value)) => value,
            _ => panic!("stale node handle {}", id.0),
        }
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Arena;

    #[test]
    fn add_free_reuse() {
        let mut arena = Arena::new();
        let a = arena.add("a");
        let b = arena.add("b");
        let c = arena.add("c");
        assert_eq!(arena.size(), 3);
        assert_eq!(arena[b], "b");

        assert_eq!(arena.free(b), "b");
        assert_eq!(arena.size(), 2);

        // Freed slot is recycled before the vector grows.
        let d = arena.add("d");
        assert_eq!(d, b);
        assert_eq!(arena[d], "d");
        assert_eq!(arena[a], "a");
        assert_eq!(arena[c], "c");
    }

    #[test]
    fn free_of_tail_slot_shrinks() {
        let mut arena = Arena::new();
        let a = arena.add(1);
        let b = arena.add(2);
        assert_eq!(arena.free(b), 2);
        assert_eq!(arena.free(a), 1);
        assert_eq!(arena.size(), 0);
        let again = arena.add(3);
        assert_eq!(arena[again], 3);
    }

    #[test]
    #[should_panic(expected = "stale node handle")]
    fn stale_handle_panics() {
        let mut arena = Arena::new();
        let a = arena.add(42u64);
        arena.free(a);
        let _ = arena[a];
    }
}
