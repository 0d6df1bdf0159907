//! A set built on top of [`TreeMap`], storing every element as both key and value.

use std::fmt;

use crate::map::TreeMap;
use crate::trees::{Cursor, Keys};

/// An ordered set.
///
///```
/// use multitree::TreeSet;
///
/// let mut set: TreeSet<_> = vec![5, 1, 3].into_iter().collect();
/// assert!(!set.insert(3));
/// assert!(set.insert(4));
///
/// assert!(set.contains(&4));
/// assert!(set.erase(&1));
/// assert_eq!(set.remove(&5), Some(5));
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![3, 4]);
///```
pub struct TreeSet<T> {
    map: TreeMap<T, T>,
}

impl<T> TreeSet<T> {
    pub fn new() -> Self {
        TreeSet {
            map: TreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Iterates over the elements in order.
    pub fn iter(&self) -> Keys<'_, T, T> {
        self.map.keys()
    }

    pub fn end(&self) -> Cursor<'_, T, T> {
        self.map.end()
    }
}

impl<T: Ord + Clone> TreeSet<T> {
    /// Adds the element. Returns `true` if it wasn't present.
    pub fn insert(&mut self, value: T) -> bool {
        self.map.insert(value.clone(), value).is_none()
    }

    /// Removes the element. Returns `true` if it was present.
    pub fn erase(&mut self, value: &T) -> bool {
        self.map.erase(value)
    }

    /// Removes the element and returns the stored copy, if it was present.
    pub fn remove(&mut self, value: &T) -> Option<T> {
        self.map.remove(value)
    }

    /// Returns a cursor at the element, or the end cursor if it is absent.
    pub fn find(&self, value: &T) -> Cursor<'_, T, T> {
        self.map.find(value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find(value) != self.end()
    }

    /// Returns the stored element equal to `value`.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.map.get(value)
    }

    pub fn assert_correctness(&self) {
        self.map.assert_correctness();
    }
}

impl<T> Default for TreeSet<T> {
    fn default() -> Self {
        TreeSet::new()
    }
}

impl<T: Clone> Clone for TreeSet<T> {
    fn clone(&self) -> Self {
        TreeSet {
            map: self.map.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for TreeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for TreeSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for TreeSet<T> {}

impl<T: Ord + Clone> Extend<T> for TreeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord + Clone> std::iter::FromIterator<T> for TreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = TreeSet::new();
        set.extend(iter);
        set
    }
}

impl<T> IntoIterator for TreeSet<T> {
    type Item = T;
    type IntoIter = std::iter::Map<crate::trees::IntoIter<T, T>, fn((T, T)) -> T>;

    fn into_iter(self) -> Self::IntoIter {
        let key: fn((T, T)) -> T = |(key, _)| key;
        self.map.into_iter().map(key)
    }
}

impl<'a, T> IntoIterator for &'a TreeSet<T> {
    type Item = &'a T;
    type IntoIter = Keys<'a, T, T>;

    fn into_iter(self) -> Keys<'a, T, T> {
        self.iter()
    }
}
