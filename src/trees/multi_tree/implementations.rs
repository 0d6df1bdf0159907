//! Standard trait implementations for [`MultiTree`].
//! It is a separate file from the main module file, and its contents are used
//! through the traits themselves.

use std::fmt;

use super::*;

impl<K, V> Default for MultiTree<K, V> {
    fn default() -> Self {
        MultiTree::new()
    }
}

impl<K: Clone, V: Clone> Clone for MultiTree<K, V> {
    /// Copies the tree node by node into a fresh, compact arena, keeping its exact shape.
    ///
    /// The nodes are visited with an explicit stack, since the tree can be as deep as
    /// it is long. Handles of the original tree are not valid in the copy.
    fn clone(&self) -> Self {
        let mut arena = NodeArena::with_capacity(self.len());
        let mut root = None;
        // node in the original tree, its new parent, and the side it hangs from
        let mut stack: Vec<(Handle, Option<Handle>, Side)> = vec![];
        if let Some(handle) = self.root {
            stack.push((handle, None, Side::Left));
        }
        while let Some((original, parent, side)) = stack.pop() {
            let node = &self.arena[original];
            let copy = arena.insert(Node::new(node.key.clone(), node.value.clone(), parent));
            match parent {
                None => root = Some(copy),
                Some(parent) => arena[parent].set_child(side, Some(copy)),
            }
            if let Some(right) = node.right {
                stack.push((right, Some(copy), Side::Right));
            }
            if let Some(left) = node.left {
                stack.push((left, Some(copy), Side::Left));
            }
        }
        tracing::trace!(target: "multitree", nodes = arena.len(), "cloned tree");
        MultiTree { arena, root }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for MultiTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Two trees are equal when they iterate over the same entries in the same order,
/// regardless of their shapes.
impl<K: PartialEq, V: PartialEq> PartialEq for MultiTree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for MultiTree<K, V> {}

impl<K: Ord, V> std::iter::FromIterator<(K, V)> for MultiTree<K, V> {
    /// Inserts the entries one by one, in the order they come.
    /// The tree isn't balanced, so sorted input builds a tree as deep as it is long.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = MultiTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for MultiTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> IntoIterator for MultiTree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter::new(self)
    }
}

impl<'a, K, V> IntoIterator for &'a MultiTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}
