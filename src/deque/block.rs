//! Fixed-capacity blocks chained together by [`SegmentedDeque`](super::SegmentedDeque).

use arrayvec::ArrayVec;

/// Arena key of a block.
pub(super) type BlockId = usize;

/// A contiguous run of at most `CAPACITY` elements.
///
/// `prev` and `next` are arena keys of the neighbouring blocks. The arena
/// owns every block; the links are only followed, never freed through.
/// The head sentinel links `prev` to itself and the tail sentinel links
/// `next` to itself, so neither link is ever absent.
#[derive(Clone)]
pub(super) struct Block<T, const CAPACITY: usize> {
    pub(super) items: ArrayVec<T, CAPACITY>,
    pub(super) prev: BlockId,
    pub(super) next: BlockId,
}

impl<T, const CAPACITY: usize> Block<T, CAPACITY> {
    pub(super) const fn new(items: ArrayVec<T, CAPACITY>, prev: BlockId, next: BlockId) -> Self {
        Self { items, prev, next }
    }

    /// Creates an empty block with no neighbours yet.
    pub(super) const fn sentinel(link: BlockId) -> Self {
        Self::new(ArrayVec::new_const(), link, link)
    }

    #[inline]
    pub(super) fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub(super) fn is_full(&self) -> bool {
        self.items.is_full()
    }

    /// Moves the upper part of a full block out, keeping the first
    /// `CAPACITY / 2` elements in place.
    pub(super) fn split_upper_half(&mut self) -> ArrayVec<T, CAPACITY> {
        debug_assert!(self.is_full());
        self.items.drain(CAPACITY / 2..).collect()
    }
}
