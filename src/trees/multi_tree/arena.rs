//! Slot storage for the nodes of a [`MultiTree`](super::MultiTree).
//!
//! Nodes are addressed by [`Handle`]s instead of pointers. A handle carries the
//! generation of the slot it was issued for; freeing a slot bumps its generation,
//! so a handle to a removed node never aliases a node that later reuses the slot.

use std::collections::TryReserveError;
use std::ops::{Index, IndexMut};

use super::Node;

const DANGLING_HANDLE_ERROR: &str = "invariant violated: tree link points at a vacant slot";

/// A stable reference to one entry of a tree.
///
/// A handle stays valid for as long as the entry it names is in the tree,
/// regardless of what else gets inserted or erased. Once the entry is removed
/// the handle is stale, and every handle-based accessor returns [`None`] for it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Handle {
    index: usize,
    generation: u32,
}

enum Entry<K, V> {
    Occupied(Node<K, V>),
    /// Holds the index of the next free slot.
    Vacant(Option<usize>),
}

struct Slot<K, V> {
    generation: u32,
    entry: Entry<K, V>,
}

pub(super) struct NodeArena<K, V> {
    slots: Vec<Slot<K, V>>,
    free_head: Option<usize>,
    len: usize,
    // slots pushed after a shrink start from here, so stale handles to popped slots stay stale
    next_generation: u32,
}

impl<K, V> NodeArena<K, V> {
    pub fn new() -> Self {
        NodeArena {
            slots: Vec::new(),
            free_head: None,
            len: 0,
            next_generation: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        NodeArena {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
            next_generation: 0,
        }
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Makes sure `additional` more nodes fit without reallocating.
    /// Vacant slots count towards the room that is already there.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let vacant = self.slots.len() - self.len;
        if additional > vacant {
            self.slots.try_reserve(additional - vacant)?;
        }
        Ok(())
    }

    pub fn shrink_to_fit(&mut self) {
        // vacant slots at the tail can't be referenced by any live handle
        while let Some(Slot {
            generation,
            entry: Entry::Vacant(_),
        }) = self.slots.last()
        {
            self.next_generation = self.next_generation.max(*generation);
            self.slots.pop();
        }
        self.rebuild_free_list();
        self.slots.shrink_to_fit();
    }

    fn rebuild_free_list(&mut self) {
        self.free_head = None;
        for index in (0..self.slots.len()).rev() {
            if let Entry::Vacant(next) = &mut self.slots[index].entry {
                *next = self.free_head;
                self.free_head = Some(index);
            }
        }
    }

    /// Stores the node, aborting on allocation failure like [`Vec::push`].
    pub fn insert(&mut self, node: Node<K, V>) -> Handle {
        if self.free_head.is_none() {
            self.slots.reserve(1);
        }
        self.insert_reserved(node)
    }

    /// Stores the node, reporting allocation failure instead of aborting.
    pub fn try_insert(&mut self, node: Node<K, V>) -> Result<Handle, TryReserveError> {
        self.try_reserve(1)?;
        Ok(self.insert_reserved(node))
    }

    // Room for one more slot must already be available.
    fn insert_reserved(&mut self, node: Node<K, V>) -> Handle {
        self.len += 1;
        match self.free_head {
            Some(index) => {
                let slot = &mut self.slots[index];
                self.free_head = match slot.entry {
                    Entry::Vacant(next) => next,
                    Entry::Occupied(_) => panic!("free list points at an occupied slot"),
                };
                slot.entry = Entry::Occupied(node);
                Handle {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len();
                let generation = self.next_generation;
                self.slots.push(Slot {
                    generation,
                    entry: Entry::Occupied(node),
                });
                Handle { index, generation }
            }
        }
    }

    /// Frees the slot and returns its node.
    /// Returns [`None`] if the handle is stale.
    pub fn remove(&mut self, handle: Handle) -> Option<Node<K, V>> {
        let slot = self.slots.get_mut(handle.index)?;
        if slot.generation != handle.generation || matches!(slot.entry, Entry::Vacant(_)) {
            return None;
        }
        let entry = std::mem::replace(&mut slot.entry, Entry::Vacant(self.free_head));
        slot.generation = slot.generation.wrapping_add(1);
        self.free_head = Some(handle.index);
        self.len -= 1;
        match entry {
            Entry::Occupied(node) => Some(node),
            Entry::Vacant(_) => None,
        }
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: Handle) -> Option<&Node<K, V>> {
        match self.slots.get(handle.index)? {
            Slot {
                generation,
                entry: Entry::Occupied(node),
            } if *generation == handle.generation => Some(node),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut Node<K, V>> {
        match self.slots.get_mut(handle.index)? {
            Slot {
                generation,
                entry: Entry::Occupied(node),
            } if *generation == handle.generation => Some(node),
            _ => None,
        }
    }

    /// Drops every node. Generations are kept, so handles issued before
    /// the call stay stale afterwards.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            if let Entry::Occupied(_) = slot.entry {
                slot.generation = slot.generation.wrapping_add(1);
            }
            slot.entry = Entry::Vacant(None);
        }
        self.len = 0;
        self.rebuild_free_list();
    }
}

impl<K, V> Index<Handle> for NodeArena<K, V> {
    type Output = Node<K, V>;

    fn index(&self, handle: Handle) -> &Node<K, V> {
        self.get(handle).expect(DANGLING_HANDLE_ERROR)
    }
}

impl<K, V> IndexMut<Handle> for NodeArena<K, V> {
    fn index_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.get_mut(handle).expect(DANGLING_HANDLE_ERROR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(key: i32) -> Node<i32, ()> {
        Node::new(key, (), None)
    }

    #[test]
    fn freed_slots_are_reused_with_a_new_generation() {
        let mut arena = NodeArena::new();
        let first = arena.insert(leaf(1));
        let second = arena.insert(leaf(2));
        assert_eq!(arena.remove(first).map(|node| node.key), Some(1));
        assert_eq!(arena.len(), 1);

        let third = arena.insert(leaf(3));
        assert_eq!(third.index, first.index);
        assert_ne!(third, first);
        assert!(arena.get(first).is_none());
        assert_eq!(arena[third].key, 3);
        assert_eq!(arena[second].key, 2);
    }

    #[test]
    fn removing_twice_is_rejected() {
        let mut arena = NodeArena::new();
        let handle = arena.insert(leaf(7));
        assert!(arena.remove(handle).is_some());
        assert!(arena.remove(handle).is_none());
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn clear_makes_old_handles_stale() {
        let mut arena = NodeArena::with_capacity(4);
        let handles: Vec<_> = (0..4).map(|key| arena.insert(leaf(key))).collect();
        arena.clear();
        assert_eq!(arena.len(), 0);
        assert!(handles.iter().all(|&handle| !arena.contains(handle)));

        let reused = arena.insert(leaf(10));
        assert!(handles.iter().all(|&handle| handle != reused));
        assert_eq!(arena[reused].key, 10);
    }

    #[test]
    fn shrinking_keeps_live_nodes_addressable() {
        let mut arena = NodeArena::new();
        let handles: Vec<_> = (0..8).map(|key| arena.insert(leaf(key))).collect();
        for &handle in &handles[3..] {
            arena.remove(handle);
        }
        arena.remove(handles[1]);
        arena.shrink_to_fit();

        assert_eq!(arena.len(), 2);
        assert_eq!(arena[handles[0]].key, 0);
        assert_eq!(arena[handles[2]].key, 2);
        let reused = arena.insert(leaf(42));
        assert_eq!(reused.index, handles[1].index);

        // slots popped by the shrink come back without reviving old handles
        let pushed: Vec<_> = (0..6).map(|key| arena.insert(leaf(key))).collect();
        assert_eq!(pushed[2].index, handles[5].index);
        assert!(arena.get(handles[5]).is_none());
        assert!(!arena.contains(handles[7]));
    }

    #[test]
    fn try_insert_counts_vacant_slots_as_room() {
        let mut arena = NodeArena::new();
        let handle = arena.try_insert(leaf(1)).unwrap();
        arena.remove(handle);
        let capacity = arena.capacity();
        arena.try_insert(leaf(2)).unwrap();
        assert_eq!(arena.capacity(), capacity);
    }
}
