use std::iter::FusedIterator;

use super::*;

/// Iterator over the entries of a [`MultiTree`], in key order.
/// Entries with equal keys come newest first.
pub struct Iter<'a, K, V> {
    tree: &'a MultiTree<K, V>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(super) fn new(tree: &'a MultiTree<K, V>, front: Handle, back: Handle, len: usize) -> Self {
        Iter {
            tree,
            front: Some(front),
            back: Some(back),
            remaining: len,
        }
    }

    pub(super) fn empty(tree: &'a MultiTree<K, V>) -> Self {
        Iter {
            tree,
            front: None,
            back: None,
            remaining: 0,
        }
    }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let handle = self.front?;
        self.remaining -= 1;
        self.front = tree.successor(handle);
        let node = &tree.arena[handle];
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let handle = self.back?;
        self.remaining -= 1;
        self.back = tree.predecessor(handle);
        let node = &tree.arena[handle];
        Some((&node.key, &node.value))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

/// Iterator over the keys of a [`MultiTree`], duplicates included.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Clone for Keys<'a, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        Some(self.inner.next()?.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a K> {
        Some(self.inner.next_back()?.0)
    }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}

/// Iterator over the values of a [`MultiTree`], in the order of their keys.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Clone for Values<'a, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        Some(self.inner.next()?.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> {
        Some(self.inner.next_back()?.1)
    }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}

/// Owning iterator over the entries of a [`MultiTree`].
pub struct IntoIter<K, V> {
    arena: NodeArena<K, V>,
    // handles in iteration order, collected before any node is taken out
    order: std::vec::IntoIter<Handle>,
}

impl<K, V> IntoIter<K, V> {
    pub(super) fn new(tree: MultiTree<K, V>) -> Self {
        let mut order = Vec::with_capacity(tree.len());
        let mut current = tree.first_handle();
        while let Some(handle) = current {
            order.push(handle);
            current = tree.successor(handle);
        }
        IntoIter {
            arena: tree.arena,
            order: order.into_iter(),
        }
    }

    fn take(&mut self, handle: Handle) -> (K, V) {
        let node = self
            .arena
            .remove(handle)
            .expect("invariant violated: entry taken twice");
        (node.key, node.value)
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        let handle = self.order.next()?;
        Some(self.take(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        let handle = self.order.next_back()?;
        Some(self.take(handle))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> MultiTree<K, V> {
    /// Iterates over all entries in key order.
    ///
    ///```
    /// use multitree::MultiTree;
    ///
    /// let tree: MultiTree<_, _> = vec![(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
    /// let entries: Vec<_> = tree.iter().rev().map(|(k, v)| (*k, *v)).collect();
    /// assert_eq!(entries, vec![(3, 'c'), (2, 'b'), (1, 'a')]);
    ///```
    pub fn iter(&self) -> Iter<'_, K, V> {
        match (self.first_handle(), self.last_handle()) {
            (Some(front), Some(back)) => Iter::new(self, front, back, self.len()),
            _ => Iter::empty(self),
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}
