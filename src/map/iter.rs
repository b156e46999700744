//! Iterators over an [`OrderedMap`](super::OrderedMap), all in key order.

use std::iter::FusedIterator;

use slab::Slab;

use super::node::{Direction, Node, NodeId};
use super::tree::Tree;

/// Borrowing iterator over the entries of an [`OrderedMap`](super::OrderedMap).
///
/// Created by [`OrderedMap::iter`](super::OrderedMap::iter). Each step follows
/// successor links, so a full pass is O(N) and a single step amortized O(1).
pub struct Iter<'a, K, V> {
    pub(super) tree: &'a Tree<K, V>,
    pub(super) front: Option<NodeId>,
    pub(super) back: Option<NodeId>,
    pub(super) remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(super) fn new(tree: &'a Tree<K, V>) -> Self {
        Self {
            tree,
            front: tree.first(),
            back: tree.last(),
            remaining: tree.nodes.len(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front?;
        self.front = self.tree.step(node, Direction::Right);
        self.remaining -= 1;
        let node = &self.tree.nodes[node];
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back?;
        self.back = self.tree.step(node, Direction::Left);
        self.remaining -= 1;
        let node = &self.tree.nodes[node];
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// Iterator with mutable access to the values of an
/// [`OrderedMap`](super::OrderedMap); keys stay shared.
///
/// Created by [`OrderedMap::iter_mut`](super::OrderedMap::iter_mut). The
/// entries are sorted into key order when the iterator is created.
pub struct IterMut<'a, K, V> {
    inner: std::iter::Flatten<std::vec::IntoIter<Option<(&'a K, &'a mut V)>>>,
    remaining: usize,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(super) fn new(tree: &'a mut Tree<K, V>) -> Self {
        let order = tree.in_order();
        let remaining = order.len();
        let mut rank = vec![0; tree.nodes.capacity()];
        for (position, &node) in order.iter().enumerate() {
            rank[node] = position;
        }
        let mut slots: Vec<Option<(&'a K, &'a mut V)>> = std::iter::repeat_with(|| None).take(remaining).collect();
        for (node, entry) in &mut tree.nodes {
            slots[rank[node]] = Some((&entry.key, &mut entry.value));
        }
        Self {
            inner: slots.into_iter().flatten(),
            remaining,
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.inner.next()?;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let entry = self.inner.next_back()?;
        self.remaining -= 1;
        Some(entry)
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Owning iterator over the entries of an [`OrderedMap`](super::OrderedMap).
///
/// Created by the [`IntoIterator`] implementation.
pub struct IntoIter<K, V> {
    nodes: Slab<Node<K, V>>,
    order: std::vec::IntoIter<NodeId>,
}

impl<K, V> IntoIter<K, V> {
    pub(super) fn new(tree: Tree<K, V>) -> Self {
        let order = tree.in_order().into_iter();
        Self {
            nodes: tree.nodes,
            order,
        }
    }

    fn take(&mut self, node: NodeId) -> Option<(K, V)> {
        self.nodes.try_remove(node).map(|node| (node.key, node.value))
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.order.next()?;
        self.take(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let node = self.order.next_back()?;
        self.take(node)
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

/// Iterator over the keys of an [`OrderedMap`](super::OrderedMap).
pub struct Keys<'a, K, V> {
    pub(super) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// Iterator over the values of an [`OrderedMap`](super::OrderedMap).
pub struct Values<'a, K, V> {
    pub(super) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// Iterator over mutable references to the values of an
/// [`OrderedMap`](super::OrderedMap).
pub struct ValuesMut<'a, K, V> {
    pub(super) inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}
