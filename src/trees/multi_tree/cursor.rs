//! Cursors over a [`MultiTree`].
//!
//! A cursor points either at an entry or at the end position, which sits both after
//! the last entry and before the first one. Moving is done through parent links,
//! without keeping a stack.

use std::fmt;

use super::*;

const END_CURSOR_ERROR: &str = "cursor is at the end position";

/// A read-only position in a [`MultiTree`].
///
/// Two cursors are equal when they point at the same node of the same tree,
/// not when their keys are equal.
pub struct Cursor<'a, K, V> {
    tree: &'a MultiTree<K, V>,
    current: Option<Handle>,
}

// the derived implementations would require `K: Clone` and `V: Clone`
impl<'a, K, V> Clone for Cursor<'a, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V> Copy for Cursor<'a, K, V> {}

impl<'a, K, V> PartialEq for Cursor<'a, K, V> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.current == other.current
    }
}

impl<'a, K, V> Eq for Cursor<'a, K, V> {}

impl<'a, K: fmt::Debug, V: fmt::Debug> fmt::Debug for Cursor<'a, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(super) fn new(tree: &'a MultiTree<K, V>, current: Option<Handle>) -> Self {
        Cursor { tree, current }
    }

    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// The handle of the current entry, or [`None`] at the end position.
    pub fn handle(&self) -> Option<Handle> {
        self.current
    }

    /// Returns the current entry, or [`None`] at the end position.
    pub fn get(&self) -> Option<(&'a K, &'a V)> {
        let tree = self.tree;
        let node = &tree.arena[self.current?];
        Some((&node.key, &node.value))
    }

    /// # Panics
    /// Panics at the end position.
    pub fn key(&self) -> &'a K {
        self.get().expect(END_CURSOR_ERROR).0
    }

    /// # Panics
    /// Panics at the end position.
    pub fn value(&self) -> &'a V {
        self.get().expect(END_CURSOR_ERROR).1
    }

    /// Moves to the next entry in iteration order. Moving past the last entry
    /// reaches the end position.
    ///
    /// # Panics
    /// Panics at the end position.
    pub fn move_next(&mut self) {
        let current = self.current.expect(END_CURSOR_ERROR);
        self.current = self.tree.successor(current);
    }

    /// Moves to the previous entry in iteration order. Moving back from the
    /// first entry reaches the end position.
    ///
    /// # Panics
    /// Panics at the end position.
    pub fn move_prev(&mut self) {
        let current = self.current.expect(END_CURSOR_ERROR);
        self.current = self.tree.predecessor(current);
    }

    /// Returns the entry after the current one, without moving.
    /// Returns [`None`] at the end position or at the last entry.
    pub fn peek_next(&self) -> Option<(&'a K, &'a V)> {
        let next = self.tree.successor(self.current?);
        Cursor::new(self.tree, next).get()
    }

    /// Returns the entry before the current one, without moving.
    /// Returns [`None`] at the end position or at the first entry.
    pub fn peek_prev(&self) -> Option<(&'a K, &'a V)> {
        let prev = self.tree.predecessor(self.current?);
        Cursor::new(self.tree, prev).get()
    }
}

/// A position in a [`MultiTree`] that can change values and remove entries.
pub struct CursorMut<'a, K, V> {
    tree: &'a mut MultiTree<K, V>,
    current: Option<Handle>,
}

impl<'a, K: fmt::Debug, V: fmt::Debug> fmt::Debug for CursorMut<'a, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.get()).finish()
    }
}

impl<'a, K, V> CursorMut<'a, K, V> {
    pub(super) fn new(tree: &'a mut MultiTree<K, V>, current: Option<Handle>) -> Self {
        CursorMut { tree, current }
    }

    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    pub fn handle(&self) -> Option<Handle> {
        self.current
    }

    /// A read-only cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, K, V> {
        Cursor::new(self.tree, self.current)
    }

    pub fn get(&self) -> Option<(&K, &V)> {
        let node = &self.tree.arena[self.current?];
        Some((&node.key, &node.value))
    }

    /// Returns the current value mutably, or [`None`] at the end position.
    pub fn get_mut(&mut self) -> Option<&mut V> {
        let current = self.current?;
        Some(&mut self.tree.arena[current].value)
    }

    /// # Panics
    /// Panics at the end position.
    pub fn key(&self) -> &K {
        self.get().expect(END_CURSOR_ERROR).0
    }

    /// # Panics
    /// Panics at the end position.
    pub fn value(&self) -> &V {
        self.get().expect(END_CURSOR_ERROR).1
    }

    /// # Panics
    /// Panics at the end position.
    pub fn value_mut(&mut self) -> &mut V {
        self.get_mut().expect(END_CURSOR_ERROR)
    }

    /// # Panics
    /// Panics at the end position.
    pub fn move_next(&mut self) {
        let current = self.current.expect(END_CURSOR_ERROR);
        self.current = self.tree.successor(current);
    }

    /// # Panics
    /// Panics at the end position.
    pub fn move_prev(&mut self) {
        let current = self.current.expect(END_CURSOR_ERROR);
        self.current = self.tree.predecessor(current);
    }

    /// Removes the current entry and moves to the one after it.
    /// Returns [`None`] at the end position.
    ///
    ///```
    /// use multitree::MultiTree;
    ///
    /// let mut tree: MultiTree<_, _> = (0..10).map(|x| (x % 3, x)).collect();
    /// let mut cursor = tree.begin_mut();
    /// while let Some((key, _)) = cursor.get() {
    ///     if *key == 1 {
    ///         cursor.remove_current();
    ///     } else {
    ///         cursor.move_next();
    ///     }
    /// }
    ///
    /// assert_eq!(tree.len(), 7);
    /// assert!(!tree.contains_key(&1));
    /// # tree.assert_correctness();
    ///```
    pub fn remove_current(&mut self) -> Option<(K, V)> {
        let current = self.current?;
        let next = self.tree.successor(current);
        let entry = self.tree.remove(current);
        self.current = next;
        entry
    }
}

impl<K, V> MultiTree<K, V> {
    /// Returns a cursor at the first entry, or the end cursor if the tree is empty.
    pub fn begin(&self) -> Cursor<'_, K, V> {
        Cursor::new(self, self.first_handle())
    }

    /// Returns the end cursor.
    pub fn end(&self) -> Cursor<'_, K, V> {
        Cursor::new(self, None)
    }

    /// Returns a cursor at the last entry, or the end cursor if the tree is empty.
    pub fn back(&self) -> Cursor<'_, K, V> {
        Cursor::new(self, self.last_handle())
    }

    pub fn begin_mut(&mut self) -> CursorMut<'_, K, V> {
        let first = self.first_handle();
        CursorMut::new(self, first)
    }

    /// Returns a cursor at the entry behind the handle,
    /// or [`None`] if the entry has been removed.
    pub fn cursor_at(&self, handle: Handle) -> Option<Cursor<'_, K, V>> {
        if self.arena.contains(handle) {
            Some(Cursor::new(self, Some(handle)))
        } else {
            None
        }
    }

    pub fn cursor_at_mut(&mut self, handle: Handle) -> Option<CursorMut<'_, K, V>> {
        if self.arena.contains(handle) {
            Some(CursorMut::new(self, Some(handle)))
        } else {
            None
        }
    }
}
