//! Position handles into a [`SegmentedDeque`](super::SegmentedDeque).

use super::block::BlockId;
use crate::identity::OwnerId;

/// A bidirectional position inside a [`SegmentedDeque`](super::SegmentedDeque).
///
/// A cursor is a plain `Copy` value naming a block, an index within that
/// block and the deque it came from. It does not borrow the deque: every
/// read, move or mutation through a cursor goes through a deque method,
/// which checks that the cursor still makes sense.
///
/// # Invalidation
///
/// A cursor is invalidated when its block is split, when its block is freed,
/// or when elements in its block are shifted by an insert or erase. Freed
/// blocks and out-of-range indices are reported as
/// [`ContainerError::InvalidIterator`](crate::error::ContainerError::InvalidIterator);
/// a cursor into a block that was shifted but still exists silently refers
/// to whatever element now occupies its slot.
///
/// # Examples
///
/// ```rust
/// use strata::deque::SegmentedDeque;
///
/// let deque: SegmentedDeque<i32> = (1..=3).collect();
/// let cursor = deque.advance(deque.begin(), 2).unwrap();
/// assert_eq!(deque.get(cursor), Ok(&3));
/// assert_eq!(deque.next_cursor(cursor), Ok(deque.end()));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct DequeCursor {
    pub(super) owner: OwnerId,
    pub(super) block: BlockId,
    pub(super) index: usize,
}

impl DequeCursor {
    pub(super) const fn new(owner: OwnerId, block: BlockId, index: usize) -> Self {
        Self {
            owner,
            block,
            index,
        }
    }
}
