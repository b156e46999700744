//! Iterators over a [`SegmentedDeque`].

use std::iter::FusedIterator;

use slab::Slab;

use super::SegmentedDeque;
use super::block::{Block, BlockId};

/// Borrowing iterator over the elements of a [`SegmentedDeque`], front to back.
///
/// Created by [`SegmentedDeque::iter`].
pub struct Iter<'a, T, const BLOCK_CAPACITY: usize> {
    pub(super) blocks: &'a Slab<Block<T, BLOCK_CAPACITY>>,
    /// Next block and index to yield from the front.
    pub(super) front: (BlockId, usize),
    /// Block and exclusive end index of the next element to yield from the back.
    pub(super) back: (BlockId, usize),
    pub(super) remaining: usize,
}

impl<'a, T, const BLOCK_CAPACITY: usize> Iterator for Iter<'a, T, BLOCK_CAPACITY> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let (mut block, mut index) = self.front;
        while index == self.blocks[block].len() {
            block = self.blocks[block].next;
            index = 0;
        }
        self.front = (block, index + 1);
        self.remaining -= 1;
        Some(&self.blocks[block].items[index])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, const BLOCK_CAPACITY: usize> DoubleEndedIterator for Iter<'_, T, BLOCK_CAPACITY> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let (mut block, mut end) = self.back;
        while end == 0 {
            block = self.blocks[block].prev;
            end = self.blocks[block].len();
        }
        self.back = (block, end - 1);
        self.remaining -= 1;
        Some(&self.blocks[block].items[end - 1])
    }
}

impl<T, const BLOCK_CAPACITY: usize> ExactSizeIterator for Iter<'_, T, BLOCK_CAPACITY> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T, const BLOCK_CAPACITY: usize> FusedIterator for Iter<'_, T, BLOCK_CAPACITY> {}

impl<T, const BLOCK_CAPACITY: usize> Clone for Iter<'_, T, BLOCK_CAPACITY> {
    fn clone(&self) -> Self {
        Self {
            blocks: self.blocks,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// Mutably borrowing iterator over the elements of a [`SegmentedDeque`].
///
/// Created by [`SegmentedDeque::iter_mut`]. The block slices are gathered in
/// chain order up front, so creating the iterator costs O(number of blocks).
pub struct IterMut<'a, T> {
    pub(super) inner: std::iter::Flatten<std::vec::IntoIter<&'a mut [T]>>,
    pub(super) remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.inner.next()?;
        self.remaining -= 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let element = self.inner.next_back()?;
        self.remaining -= 1;
        Some(element)
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator over the elements of a [`SegmentedDeque`].
///
/// Created by the [`IntoIterator`] implementation; pops from either end.
pub struct IntoIter<T, const BLOCK_CAPACITY: usize> {
    pub(super) deque: SegmentedDeque<T, BLOCK_CAPACITY>,
}

impl<T, const BLOCK_CAPACITY: usize> Iterator for IntoIter<T, BLOCK_CAPACITY> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.deque.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len(), Some(self.deque.len()))
    }
}

impl<T, const BLOCK_CAPACITY: usize> DoubleEndedIterator for IntoIter<T, BLOCK_CAPACITY> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.deque.pop_back().ok()
    }
}

impl<T, const BLOCK_CAPACITY: usize> ExactSizeIterator for IntoIter<T, BLOCK_CAPACITY> {
    fn len(&self) -> usize {
        self.deque.len()
    }
}

impl<T, const BLOCK_CAPACITY: usize> FusedIterator for IntoIter<T, BLOCK_CAPACITY> {}
