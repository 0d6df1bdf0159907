//! Removal of entries from a [`MultiTree`].
//!
//! Nodes are only ever relinked, never have their contents swapped, so every entry that
//! stays in the tree keeps its handle, and cursors at surviving entries keep working.

use super::*;

const UNLINKED_NODE_ERROR: &str = "invariant violated: unlinked node missing from the arena";

impl<K, V> MultiTree<K, V> {
    /// Removes the entry behind the handle and returns it.
    /// Returns [`None`] if the handle is stale.
    pub fn remove(&mut self, handle: Handle) -> Option<(K, V)> {
        if !self.arena.contains(handle) {
            return None;
        }
        let node = self.unlink(handle);
        Some((node.key, node.value))
    }

    /// Takes a single node out of the tree and frees its slot.
    ///
    /// A node with two children is replaced by its in-order predecessor: it is the greatest
    /// key on the left, so everything left of it stays at most its key, and everything on the
    /// right is strictly greater than the removed key, hence strictly greater than it too.
    fn unlink(&mut self, handle: Handle) -> Node<K, V> {
        let (parent, left, right) = {
            let node = &self.arena[handle];
            (node.parent, node.left, node.right)
        };
        match (left, right) {
            (Some(left), Some(right)) => {
                let replacement = self.rightmost(left);
                if replacement != left {
                    // the replacement has no right child; its left subtree takes its place
                    let (replacement_parent, replacement_left) = {
                        let node = &self.arena[replacement];
                        (node.parent, node.left)
                    };
                    self.replace_child(replacement_parent, replacement, replacement_left);
                    self.set_parent(replacement_left, replacement_parent);

                    self.arena[replacement].left = Some(left);
                    self.set_parent(Some(left), Some(replacement));
                }
                self.arena[replacement].right = Some(right);
                self.set_parent(Some(right), Some(replacement));

                self.arena[replacement].parent = parent;
                self.replace_child(parent, handle, Some(replacement));
            }
            (child, None) | (None, child) => {
                self.replace_child(parent, handle, child);
                self.set_parent(child, parent);
            }
        }
        self.arena.remove(handle).expect(UNLINKED_NODE_ERROR)
    }
}

impl<K: Ord, V> MultiTree<K, V> {
    /// Removes every entry with this key, and returns how many there were.
    /// Erasing an absent key does nothing and returns `0`.
    ///
    /// Entries are removed one at a time, newest first, until none is left.
    ///
    ///```
    /// use multitree::MultiTree;
    ///
    /// let mut tree: MultiTree<_, _> = vec![(4, ()), (2, ()), (4, ()), (6, ()), (4, ())]
    ///     .into_iter()
    ///     .collect();
    /// let six = tree.find(&6).handle().unwrap();
    ///
    /// assert_eq!(tree.erase(&4), 3);
    /// assert_eq!(tree.erase(&4), 0);
    /// assert_eq!(tree.len(), 2);
    /// // entries that weren't erased keep their handles
    /// assert_eq!(tree.get(six), Some((&6, &())));
    /// # tree.assert_correctness();
    ///```
    pub fn erase(&mut self, key: &K) -> usize {
        let mut removed = 0;
        while let Some(handle) = self.last_occurrence(key) {
            // the newest entry of a key has only smaller keys in its left subtree
            self.unlink(handle);
            removed += 1;
        }
        if removed > 0 {
            tracing::debug!(
                target: "multitree",
                removed,
                remaining = self.len(),
                "erased every entry of a key"
            );
        }
        removed
    }

    /// Removes the newest entry with this key, and returns it.
    ///
    ///```
    /// use multitree::MultiTree;
    ///
    /// let mut tree = MultiTree::new();
    /// tree.insert('k', 1);
    /// tree.insert('k', 2);
    ///
    /// assert_eq!(tree.remove_entry(&'k'), Some(('k', 2)));
    /// assert_eq!(tree.remove_entry(&'k'), Some(('k', 1)));
    /// assert_eq!(tree.remove_entry(&'k'), None);
    ///```
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let handle = self.last_occurrence(key)?;
        let node = self.unlink(handle);
        Some((node.key, node.value))
    }
}
