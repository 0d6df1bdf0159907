//! The multi tree module
//! This module implements an unbalanced binary search tree that allows duplicate keys.
//!
//! Entries with equal keys are kept as separate nodes. A new entry is always placed
//! to the left of every existing entry with the same key, so the in-order run of a key
//! lists its entries from the most recently inserted to the oldest one.

// these should not be public as they are merely separate files
// for some of the functions of this module
mod arena;
mod cursor;
mod erase;
mod implementations;
mod iterators;
mod lookup;

pub use arena::Handle;
pub use cursor::*;
pub use iterators::*;

use super::Side;
use crate::error::TreeError;
use arena::NodeArena;

struct Node<K, V> {
    key: K,
    value: V,
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V, parent: Option<Handle>) -> Node<K, V> {
        Node {
            key,
            value,
            parent,
            left: None,
            right: None,
        }
    }

    fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

/// A binary search tree that allows several entries with the same key.
///
/// For every node, the keys in its left subtree are less than or equal to its own key,
/// and the keys in its right subtree are strictly greater. The tree is not balanced:
/// inserting keys in sorted order produces a tree as deep as it is long.
///
/// Nodes are stored in an arena and linked through [`Handle`]s, parent links included,
/// which is what lets a [`Cursor`] move in both directions without a stack.
///
///```
/// use multitree::MultiTree;
///
/// let mut tree = MultiTree::new();
/// for (key, value) in [(5, "a"), (3, "b"), (5, "c"), (7, "d"), (5, "e")] {
///     tree.insert(key, value);
/// }
///
/// assert_eq!(tree.len(), 5);
/// assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![3, 5, 5, 5, 7]);
/// assert_eq!(tree.iter_equal(&5).map(|(_, v)| *v).collect::<Vec<_>>(), vec!["e", "c", "a"]);
///
/// assert_eq!(tree.erase(&5), 3);
/// assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![3, 7]);
/// assert!(tree.find(&5).is_end());
/// # tree.assert_correctness();
///```
pub struct MultiTree<K, V> {
    arena: NodeArena<K, V>,
    root: Option<Handle>,
}

impl<K, V> MultiTree<K, V> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        MultiTree {
            arena: NodeArena::new(),
            root: None,
        }
    }

    /// Creates an empty tree with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        MultiTree {
            arena: NodeArena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of entries, counting every duplicate.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns how many entries the tree can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Reserves room for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) -> Result<(), TreeError> {
        self.arena.try_reserve(additional)?;
        Ok(())
    }

    /// Releases unused storage at the end of the arena.
    /// Handles of entries still in the tree stay valid.
    pub fn shrink_to_fit(&mut self) {
        self.arena.shrink_to_fit();
    }

    /// Removes every entry. Handles issued before the call become stale.
    pub fn clear(&mut self) {
        tracing::trace!(target: "multitree", removed = self.len(), "clearing tree");
        self.arena.clear();
        self.root = None;
    }

    /// Returns the entry behind a handle, or [`None`] if it was removed.
    pub fn get(&self, handle: Handle) -> Option<(&K, &V)> {
        let node = self.arena.get(handle)?;
        Some((&node.key, &node.value))
    }

    /// Returns the value behind a handle, or [`None`] if it was removed.
    /// The key can't be changed, since that could break the ordering.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut V> {
        Some(&mut self.arena.get_mut(handle)?.value)
    }

    pub fn contains_handle(&self, handle: Handle) -> bool {
        self.arena.contains(handle)
    }

    fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.arena[handle].left {
            handle = left;
        }
        handle
    }

    fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.arena[handle].right {
            handle = right;
        }
        handle
    }

    fn first_handle(&self) -> Option<Handle> {
        Some(self.leftmost(self.root?))
    }

    fn last_handle(&self) -> Option<Handle> {
        Some(self.rightmost(self.root?))
    }

    /// The in-order successor. Ascends until arriving from a left child.
    fn successor(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.arena[handle].right {
            return Some(self.leftmost(right));
        }
        let mut child = handle;
        while let Some(parent) = self.arena[child].parent {
            if self.arena[parent].left == Some(child) {
                return Some(parent);
            }
            child = parent;
        }
        None
    }

    /// The in-order predecessor. Ascends until arriving from a right child.
    fn predecessor(&self, handle: Handle) -> Option<Handle> {
        if let Some(left) = self.arena[handle].left {
            return Some(self.rightmost(left));
        }
        let mut child = handle;
        while let Some(parent) = self.arena[child].parent {
            if self.arena[parent].right == Some(child) {
                return Some(parent);
            }
            child = parent;
        }
        None
    }

    /// Points whatever referenced `old` (its parent's child link, or the root)
    /// at `new`. Doesn't touch the parent link of `new`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let node = &mut self.arena[parent];
                if node.left == Some(old) {
                    node.left = new;
                } else {
                    debug_assert_eq!(node.right, Some(old));
                    node.right = new;
                }
            }
        }
    }

    fn set_parent(&mut self, child: Option<Handle>, parent: Option<Handle>) {
        if let Some(child) = child {
            self.arena[child].parent = parent;
        }
    }
}

impl<K: Ord, V> MultiTree<K, V> {
    /// Inserts an entry and returns its handle. Never replaces anything:
    /// an entry whose key is already present is added next to the existing ones,
    /// in front of them in iteration order.
    ///
    ///```
    /// use multitree::MultiTree;
    ///
    /// let mut tree = MultiTree::new();
    /// let first = tree.insert("k", 1);
    /// let second = tree.insert("k", 2);
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.get(first), Some((&"k", &1)));
    /// assert_eq!(tree.find(&"k").handle(), Some(second));
    /// # tree.assert_correctness();
    ///```
    pub fn insert(&mut self, key: K, value: V) -> Handle {
        let place = self.attach_point(&key);
        let handle = self.arena.insert(Node::new(key, value, place.map(|(parent, _)| parent)));
        self.attach(place, handle);
        handle
    }

    /// Like [`MultiTree::insert`], but reports a failed allocation
    /// instead of aborting. The tree is unchanged on failure.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Handle, TreeError> {
        let place = self.attach_point(&key);
        let handle = self
            .arena
            .try_insert(Node::new(key, value, place.map(|(parent, _)| parent)))?;
        self.attach(place, handle);
        Ok(handle)
    }

    /// Finds the empty position where `key` has to go: equal keys go left.
    /// Returns [`None`] when the tree is empty.
    fn attach_point(&self, key: &K) -> Option<(Handle, Side)> {
        let mut current = self.root?;
        loop {
            let side = if self.arena[current].key >= *key {
                Side::Left
            } else {
                Side::Right
            };
            match self.arena[current].child(side) {
                Some(next) => current = next,
                None => return Some((current, side)),
            }
        }
    }

    fn attach(&mut self, place: Option<(Handle, Side)>, handle: Handle) {
        match place {
            None => self.root = Some(handle),
            Some((parent, side)) => self.arena[parent].set_child(side, Some(handle)),
        }
    }

    /// Checks that the invariants hold: parent links mirror child links,
    /// keys on the left are at most the node's key, keys on the right are greater,
    /// and the number of reachable nodes is [`MultiTree::len`].
    /// If they don't, panics.
    pub fn assert_correctness(&self) {
        let mut reachable = 0;
        if let Some(root) = self.root {
            assert!(self.arena[root].parent.is_none(), "root has a parent");
            // node, smallest key allowed (exclusive), largest key allowed (inclusive)
            let mut stack: Vec<(Handle, Option<&K>, Option<&K>)> = vec![(root, None, None)];
            while let Some((handle, lower, upper)) = stack.pop() {
                reachable += 1;
                let node = &self.arena[handle];
                if let Some(lower) = lower {
                    assert!(node.key > *lower, "key in a right subtree isn't greater");
                }
                if let Some(upper) = upper {
                    assert!(node.key <= *upper, "key in a left subtree is greater");
                }
                for side in [Side::Left, Side::Right] {
                    if let Some(child) = node.child(side) {
                        assert_eq!(self.arena[child].parent, Some(handle), "broken parent link");
                        match side {
                            Side::Left => stack.push((child, lower, Some(&node.key))),
                            Side::Right => stack.push((child, Some(&node.key), upper)),
                        }
                    }
                }
            }
        }
        assert_eq!(reachable, self.len(), "size doesn't match the reachable nodes");
    }
}
