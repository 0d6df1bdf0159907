//! Key lookups for [`MultiTree`].
//!
//! Every entry with a given key lies on the search path of that key, i.e. the path that
//! goes left whenever the node's key is at least the searched key and right otherwise.
//! Along that path, the shallowest match is the oldest entry and the deepest match is
//! the newest one, which is also the first of them in iteration order.

use std::cmp::Ordering;

use super::*;

impl<K: Ord, V> MultiTree<K, V> {
    /// The shallowest entry with this key, i.e. the one inserted first.
    /// It is the last entry of the key's run in iteration order.
    pub(super) fn first_occurrence(&self, key: &K) -> Option<Handle> {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = &self.arena[handle];
            current = match node.key.cmp(key) {
                Ordering::Greater => node.left,
                Ordering::Less => node.right,
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    /// The deepest entry with this key, i.e. the one inserted last.
    /// It is the first entry of the key's run in iteration order.
    pub(super) fn last_occurrence(&self, key: &K) -> Option<Handle> {
        let mut current = self.root;
        let mut found = None;
        while let Some(handle) = current {
            let node = &self.arena[handle];
            current = match node.key.cmp(key) {
                Ordering::Greater => node.left,
                Ordering::Less => node.right,
                Ordering::Equal => {
                    found = Some(handle);
                    node.left
                }
            };
        }
        found
    }

    /// Returns a cursor at the first entry with this key in iteration order,
    /// or the end cursor if there is none.
    ///
    ///```
    /// use multitree::MultiTree;
    ///
    /// let tree: MultiTree<_, _> = vec![(2, 'x'), (1, 'y'), (2, 'z')].into_iter().collect();
    ///
    /// let cursor = tree.find(&2);
    /// assert_eq!(cursor.get(), Some((&2, &'z')));
    /// assert!(tree.find(&3).is_end());
    ///```
    pub fn find(&self, key: &K) -> Cursor<'_, K, V> {
        Cursor::new(self, self.last_occurrence(key))
    }

    /// Same as [`MultiTree::find`], with mutable access to the values.
    pub fn find_mut(&mut self, key: &K) -> CursorMut<'_, K, V> {
        let current = self.last_occurrence(key);
        CursorMut::new(self, current)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.first_occurrence(key).is_some()
    }

    /// Returns the number of entries with this key.
    pub fn count(&self, key: &K) -> usize {
        self.iter_equal(key).len()
    }

    /// Returns the half-open cursor range `[first, past_last)` that covers
    /// every entry with this key. Both cursors are at the end if the key is absent.
    ///
    ///```
    /// use multitree::MultiTree;
    ///
    /// let tree: MultiTree<_, _> = vec![(1, 10), (2, 20), (2, 21), (3, 30)].into_iter().collect();
    ///
    /// let (mut first, past_last) = tree.equal_range(&2);
    /// let mut values = vec![];
    /// while first != past_last {
    ///     values.push(*first.value());
    ///     first.move_next();
    /// }
    /// assert_eq!(values, vec![21, 20]);
    /// assert_eq!(past_last.key(), &3);
    ///```
    pub fn equal_range(&self, key: &K) -> (Cursor<'_, K, V>, Cursor<'_, K, V>) {
        let (first, past_last) = self.run_bounds(key);
        (Cursor::new(self, first), Cursor::new(self, past_last))
    }

    /// Iterates over every entry with this key, newest first.
    pub fn iter_equal(&self, key: &K) -> Iter<'_, K, V> {
        let first = match self.last_occurrence(key) {
            Some(first) => first,
            None => return Iter::empty(self),
        };
        let last = self
            .first_occurrence(key)
            .expect("invariant violated: key found by the deep search but not by the shallow one");
        let mut len = 1;
        let mut current = first;
        while current != last {
            current = self
                .successor(current)
                .expect("invariant violated: run of equal keys ended before its last entry");
            len += 1;
        }
        Iter::new(self, first, last, len)
    }

    /// The first entry of the key's run and the entry right after its last one.
    fn run_bounds(&self, key: &K) -> (Option<Handle>, Option<Handle>) {
        match self.last_occurrence(key) {
            None => (None, None),
            Some(first) => {
                let past_last = self
                    .first_occurrence(key)
                    .and_then(|last| self.successor(last));
                (Some(first), past_last)
            }
        }
    }

    /// Returns a cursor at the entry with this key that has the smallest value.
    /// Among equal values the one that comes first in iteration order wins.
    /// Returns the end cursor if the key is absent.
    pub fn min(&self, key: &K) -> Cursor<'_, K, V>
    where
        V: PartialOrd,
    {
        self.best_in_run(key, |candidate, best| candidate < best)
    }

    /// Returns a cursor at the entry with this key that has the largest value.
    /// Among equal values the one that comes first in iteration order wins.
    /// Returns the end cursor if the key is absent.
    ///
    ///```
    /// use multitree::MultiTree;
    ///
    /// let mut tree = MultiTree::new();
    /// tree.insert("k", 2);
    /// tree.insert("k", 3);
    /// tree.insert("k", 1);
    ///
    /// assert_eq!(tree.min(&"k").value(), &1);
    /// assert_eq!(tree.max(&"k").value(), &3);
    /// assert!(tree.max(&"missing").is_end());
    ///```
    pub fn max(&self, key: &K) -> Cursor<'_, K, V>
    where
        V: PartialOrd,
    {
        self.best_in_run(key, |candidate, best| candidate > best)
    }

    fn best_in_run<F>(&self, key: &K, is_better: F) -> Cursor<'_, K, V>
    where
        F: Fn(&V, &V) -> bool,
    {
        let (first, past_last) = self.run_bounds(key);
        let mut best = match first {
            Some(first) => first,
            None => return self.end(),
        };
        let mut current = self.successor(best);
        while let Some(handle) = current.filter(|&handle| Some(handle) != past_last) {
            if is_better(&self.arena[handle].value, &self.arena[best].value) {
                best = handle;
            }
            current = self.successor(handle);
        }
        Cursor::new(self, Some(best))
    }
}
