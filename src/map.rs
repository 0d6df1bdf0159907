//! A map with unique keys, built on top of [`MultiTree`].
//!
//! The map never lets the tree hold two entries with the same key: inserting an existing key
//! overwrites the stored value in place.

use std::fmt;

use crate::error::TreeError;
use crate::trees::{Cursor, CursorMut, Handle, Iter, Keys, MultiTree, Values};

/// An ordered map with unique keys.
///
///```
/// use multitree::TreeMap;
///
/// let mut map = TreeMap::new();
/// assert_eq!(map.insert(2, "b"), None);
/// assert_eq!(map.insert(1, "a"), None);
/// assert_eq!(map.insert(2, "B"), Some("b"));
///
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get(&2), Some(&"B"));
/// assert_eq!(map.iter().collect::<Vec<_>>(), vec![(&1, &"a"), (&2, &"B")]);
///```
pub struct TreeMap<K, V> {
    tree: MultiTree<K, V>,
}

impl<K, V> TreeMap<K, V> {
    pub fn new() -> Self {
        TreeMap {
            tree: MultiTree::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TreeMap {
            tree: MultiTree::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.tree.iter()
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        self.tree.keys()
    }

    pub fn values(&self) -> Values<'_, K, V> {
        self.tree.values()
    }

    pub fn begin(&self) -> Cursor<'_, K, V> {
        self.tree.begin()
    }

    pub fn end(&self) -> Cursor<'_, K, V> {
        self.tree.end()
    }

    pub fn begin_mut(&mut self) -> CursorMut<'_, K, V> {
        self.tree.begin_mut()
    }
}

impl<K: Ord, V> TreeMap<K, V> {
    /// Inserts the value under the key. If the key is already present, its value is
    /// replaced in place and the old value is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.tree.find(&key).handle() {
            Some(handle) => {
                tracing::trace!(target: "multitree::map", "overwriting an existing value");
                self.tree
                    .get_mut(handle)
                    .map(|slot| std::mem::replace(slot, value))
            }
            None => {
                self.tree.insert(key, value);
                None
            }
        }
    }

    /// Like [`TreeMap::insert`], but reports a failed allocation instead of aborting.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>, TreeError> {
        match self.tree.find(&key).handle() {
            Some(handle) => Ok(self
                .tree
                .get_mut(handle)
                .map(|slot| std::mem::replace(slot, value))),
            None => {
                self.tree.try_insert(key, value)?;
                Ok(None)
            }
        }
    }

    /// Removes the key. Returns whether it was present.
    pub fn erase(&mut self, key: &K) -> bool {
        let removed = self.tree.erase(key);
        debug_assert!(removed <= 1, "map holds a key more than once");
        removed > 0
    }

    /// Removes the key and returns its value, if it was present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.tree.remove_entry(key).map(|(_, value)| value)
    }

    /// Returns a cursor at the key, or the end cursor if it is absent.
    pub fn find(&self, key: &K) -> Cursor<'_, K, V> {
        self.tree.find(key)
    }

    pub fn find_mut(&mut self, key: &K) -> CursorMut<'_, K, V> {
        self.tree.find_mut(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.find(key).get().map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let handle = self.tree.find(key).handle()?;
        self.tree.get_mut(handle)
    }

    /// Returns the value stored under the key, inserting `V::default()` first
    /// if the key is absent.
    ///
    ///```
    /// use multitree::TreeMap;
    ///
    /// let mut counts: TreeMap<&str, u32> = TreeMap::new();
    /// for word in "a b a c a".split(' ') {
    ///     *counts.get_or_insert_default(word) += 1;
    /// }
    ///
    /// assert_eq!(counts.get(&"a"), Some(&3));
    /// assert_eq!(counts.get(&"c"), Some(&1));
    ///```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let handle = match self.tree.find(&key).handle() {
            Some(handle) => handle,
            None => self.tree.insert(key, V::default()),
        };
        self.tree
            .get_mut(handle)
            .expect("invariant violated: fresh handle is stale")
    }

    /// The handle of the key's entry, which stays valid until the key is removed.
    pub fn handle_of(&self, key: &K) -> Option<Handle> {
        self.tree.find(key).handle()
    }

    pub fn assert_correctness(&self) {
        self.tree.assert_correctness();
        let mut keys = self.tree.keys();
        if let Some(mut previous) = keys.next() {
            for key in keys {
                assert!(previous < key, "map holds a key more than once");
                previous = key;
            }
        }
    }
}

impl<K, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        TreeMap::new()
    }
}

impl<K: Clone, V: Clone> Clone for TreeMap<K, V> {
    fn clone(&self) -> Self {
        TreeMap {
            tree: self.tree.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for TreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for TreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, V: Eq> Eq for TreeMap<K, V> {}

impl<K: Ord, V> Extend<(K, V)> for TreeMap<K, V> {
    /// Later values overwrite earlier ones with the same key.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> std::iter::FromIterator<(K, V)> for TreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = TreeMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V> IntoIterator for TreeMap<K, V> {
    type Item = (K, V);
    type IntoIter = crate::trees::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a TreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.tree.iter()
    }
}
