//! Segmented double-ended queue.
//!
//! This module provides [`SegmentedDeque`], a sequence stored as a doubly
//! linked chain of fixed-capacity blocks.
//!
//! # Overview
//!
//! - O(1) `front`, `back`, `len` and `is_empty`
//! - amortized O(1) `push_front`, `push_back`, `pop_front`, `pop_back`
//! - O(N / C + C) positional `at`, `insert` and `erase`, where C is the
//!   block capacity; with C close to √N this is O(√N)
//!
//! # Block Chain
//!
//! The chain always starts with a head sentinel and ends with a tail
//! sentinel, both permanently empty. Every block between them holds
//! between 1 and `BLOCK_CAPACITY` elements:
//!
//! ```text
//! head <-> [a b c] <-> [d] <-> [e f g h] <-> tail
//! ```
//!
//! Inserting into a full block first splits it into a lower half of
//! `BLOCK_CAPACITY / 2` elements and an upper half holding the rest. Erasing
//! never merges neighbours; a block is only freed when it becomes empty.
//!
//! # Examples
//!
//! ```rust
//! use strata::deque::SegmentedDeque;
//!
//! let mut deque: SegmentedDeque<i32> = SegmentedDeque::new();
//! deque.push_back(1);
//! deque.push_back(2);
//! deque.push_front(0);
//! assert_eq!(deque.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
//!
//! deque.pop_front().unwrap();
//! let position = deque.advance(deque.begin(), 1).unwrap();
//! deque.insert(position, 9).unwrap();
//! assert_eq!(deque.iter().copied().collect::<Vec<_>>(), vec![1, 9, 2]);
//! ```

mod block;
mod cursor;
mod iter;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};

use arrayvec::ArrayVec;
use slab::Slab;

use self::block::{Block, BlockId};
use crate::error::ContainerError;
use crate::identity::OwnerId;

pub use self::cursor::DequeCursor;
pub use self::iter::{IntoIter, Iter, IterMut};

/// Block capacity used when none is given.
pub const DEFAULT_BLOCK_CAPACITY: usize = 512;

static_assertions::const_assert!(DEFAULT_BLOCK_CAPACITY >= 2);
static_assertions::assert_impl_all!(SegmentedDeque<i32>: Send, Sync, Clone, Default);
static_assertions::assert_impl_all!(DequeCursor: Send, Sync, Copy);

// =============================================================================
// SegmentedDeque Definition
// =============================================================================

/// A double-ended queue stored as a chain of fixed-capacity blocks.
///
/// `BLOCK_CAPACITY` bounds the number of elements per block and must be at
/// least 2. Small capacities are useful for exercising the split logic.
///
/// # Time Complexity
///
/// | Operation                 | Complexity   |
/// |---------------------------|--------------|
/// | `push_*` / `pop_*`        | O(C)         |
/// | `front` / `back`          | O(1)         |
/// | `at` / `insert` / `erase` | O(N / C + C) |
/// | `advance` / `distance`    | O(N / C)     |
/// | `len` / `is_empty`        | O(1)         |
///
/// # Examples
///
/// ```rust
/// use strata::deque::SegmentedDeque;
/// use strata::error::ContainerError;
///
/// let mut deque: SegmentedDeque<&str, 4> = SegmentedDeque::new();
/// assert_eq!(deque.front(), Err(ContainerError::ContainerIsEmpty));
///
/// deque.push_back("b");
/// deque.push_front("a");
/// assert_eq!(deque.at(1), Ok(&"b"));
/// assert_eq!(deque[0], "a");
/// ```
pub struct SegmentedDeque<T, const BLOCK_CAPACITY: usize = DEFAULT_BLOCK_CAPACITY> {
    blocks: Slab<Block<T, BLOCK_CAPACITY>>,
    head: BlockId,
    tail: BlockId,
    length: usize,
    owner: OwnerId,
}

impl<T, const BLOCK_CAPACITY: usize> SegmentedDeque<T, BLOCK_CAPACITY> {
    /// Creates an empty deque.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::deque::SegmentedDeque;
    ///
    /// let deque: SegmentedDeque<u8> = SegmentedDeque::new();
    /// assert!(deque.is_empty());
    /// assert_eq!(deque.begin(), deque.end());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        const {
            assert!(
                BLOCK_CAPACITY >= 2,
                "SegmentedDeque requires a block capacity of at least 2"
            );
        }
        let mut blocks = Slab::with_capacity(2);
        let head = blocks.insert(Block::sentinel(0));
        let tail = blocks.insert(Block::sentinel(0));
        blocks[head].prev = head;
        blocks[head].next = tail;
        blocks[tail].prev = head;
        blocks[tail].next = tail;
        Self {
            blocks,
            head,
            tail,
            length: 0,
            owner: OwnerId::fresh(),
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the deque holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Removes every element and frees every block.
    ///
    /// The deque takes a new identity, so every cursor obtained before the
    /// call, [`end`](Self::end) included, is rejected afterwards.
    pub fn clear(&mut self) {
        let first = self.blocks[self.head].next;
        let mut block = first;
        while block != self.tail {
            let next = self.blocks[block].next;
            self.blocks.remove(block);
            block = next;
        }
        self.blocks[self.head].next = self.tail;
        self.blocks[self.tail].prev = self.head;
        self.length = 0;
        self.owner = OwnerId::fresh();
    }

    // =========================================================================
    // Element Access
    // =========================================================================

    /// Returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::ContainerIsEmpty`] if the deque is empty.
    pub fn front(&self) -> Result<&T, ContainerError> {
        let first = self.first_block().ok_or(ContainerError::ContainerIsEmpty)?;
        Ok(&self.blocks[first].items[0])
    }

    /// Returns the first element mutably.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::ContainerIsEmpty`] if the deque is empty.
    pub fn front_mut(&mut self) -> Result<&mut T, ContainerError> {
        let first = self.first_block().ok_or(ContainerError::ContainerIsEmpty)?;
        Ok(&mut self.blocks[first].items[0])
    }

    /// Returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::ContainerIsEmpty`] if the deque is empty.
    pub fn back(&self) -> Result<&T, ContainerError> {
        let last = self.last_block().ok_or(ContainerError::ContainerIsEmpty)?;
        let block = &self.blocks[last];
        Ok(&block.items[block.len() - 1])
    }

    /// Returns the last element mutably.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::ContainerIsEmpty`] if the deque is empty.
    pub fn back_mut(&mut self) -> Result<&mut T, ContainerError> {
        let last = self.last_block().ok_or(ContainerError::ContainerIsEmpty)?;
        let block = &mut self.blocks[last];
        let index = block.len() - 1;
        Ok(&mut block.items[index])
    }

    /// Returns the element at `position`, counted from the front.
    ///
    /// The chain is walked from whichever end is nearer.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::IndexOutOfBounds`] if `position >= len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::deque::SegmentedDeque;
    /// use strata::error::ContainerError;
    ///
    /// let deque: SegmentedDeque<i32, 2> = (0..10).collect();
    /// assert_eq!(deque.at(7), Ok(&7));
    /// assert_eq!(deque.at(10), Err(ContainerError::IndexOutOfBounds));
    /// ```
    pub fn at(&self, position: usize) -> Result<&T, ContainerError> {
        let (block, index) = self
            .locate(position)
            .ok_or(ContainerError::IndexOutOfBounds)?;
        Ok(&self.blocks[block].items[index])
    }

    /// Returns the element at `position` mutably.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::IndexOutOfBounds`] if `position >= len()`.
    pub fn at_mut(&mut self, position: usize) -> Result<&mut T, ContainerError> {
        let (block, index) = self
            .locate(position)
            .ok_or(ContainerError::IndexOutOfBounds)?;
        Ok(&mut self.blocks[block].items[index])
    }

    // =========================================================================
    // End Operations
    // =========================================================================

    /// Appends an element at the back, splitting the last block if it is full.
    pub fn push_back(&mut self, value: T) {
        match self.last_block() {
            Some(last) => {
                let end = self.blocks[last].len();
                self.insert_in_block(last, end, value);
            }
            None => {
                self.insert_first(value);
            }
        }
    }

    /// Prepends an element at the front, splitting the first block if it is full.
    pub fn push_front(&mut self, value: T) {
        match self.first_block() {
            Some(first) => {
                self.insert_in_block(first, 0, value);
            }
            None => {
                self.insert_first(value);
            }
        }
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::ContainerIsEmpty`] if the deque is empty.
    pub fn pop_back(&mut self) -> Result<T, ContainerError> {
        let last = self.last_block().ok_or(ContainerError::ContainerIsEmpty)?;
        let index = self.blocks[last].len() - 1;
        Ok(self.remove_in_block(last, index).1)
    }

    /// Removes and returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::ContainerIsEmpty`] if the deque is empty.
    pub fn pop_front(&mut self) -> Result<T, ContainerError> {
        let first = self.first_block().ok_or(ContainerError::ContainerIsEmpty)?;
        Ok(self.remove_in_block(first, 0).1)
    }

    // =========================================================================
    // Cursors
    // =========================================================================

    /// Returns a cursor to the first element, or [`end`](Self::end) if empty.
    #[must_use]
    pub fn begin(&self) -> DequeCursor {
        DequeCursor::new(self.owner, self.blocks[self.head].next, 0)
    }

    /// Returns the past-the-end cursor: the tail sentinel at index 0.
    #[must_use]
    pub fn end(&self) -> DequeCursor {
        DequeCursor::new(self.owner, self.tail, 0)
    }

    /// Same as [`begin`](Self::begin); provided for read-only call sites.
    #[must_use]
    pub fn cbegin(&self) -> DequeCursor {
        self.begin()
    }

    /// Same as [`end`](Self::end); provided for read-only call sites.
    #[must_use]
    pub fn cend(&self) -> DequeCursor {
        self.end()
    }

    /// Returns a cursor to `position`; `position == len()` yields [`end`](Self::end).
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::IndexOutOfBounds`] if `position > len()`.
    pub fn cursor_at(&self, position: usize) -> Result<DequeCursor, ContainerError> {
        if position == self.length {
            return Ok(self.end());
        }
        let (block, index) = self
            .locate(position)
            .ok_or(ContainerError::IndexOutOfBounds)?;
        Ok(DequeCursor::new(self.owner, block, index))
    }

    /// Returns the element a cursor points at.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::InvalidIterator`] for [`end`](Self::end),
    /// for a cursor from another deque, or for a cursor whose position no
    /// longer exists.
    pub fn get(&self, cursor: DequeCursor) -> Result<&T, ContainerError> {
        self.check_dereferenceable(cursor)?;
        Ok(&self.blocks[cursor.block].items[cursor.index])
    }

    /// Returns the element a cursor points at, mutably.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn get_mut(&mut self, cursor: DequeCursor) -> Result<&mut T, ContainerError> {
        self.check_dereferenceable(cursor)?;
        Ok(&mut self.blocks[cursor.block].items[cursor.index])
    }

    /// Moves a cursor one element forward.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::InvalidIterator`] if the cursor is already
    /// [`end`](Self::end) or is not valid for this deque.
    pub fn next_cursor(&self, cursor: DequeCursor) -> Result<DequeCursor, ContainerError> {
        self.check_dereferenceable(cursor)?;
        let block = &self.blocks[cursor.block];
        if cursor.index + 1 < block.len() {
            Ok(DequeCursor::new(self.owner, cursor.block, cursor.index + 1))
        } else {
            Ok(DequeCursor::new(self.owner, block.next, 0))
        }
    }

    /// Moves a cursor one element backward. Moving back from
    /// [`end`](Self::end) yields the last element.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::InvalidIterator`] if the cursor is
    /// [`begin`](Self::begin) or is not valid for this deque.
    pub fn prev_cursor(&self, cursor: DequeCursor) -> Result<DequeCursor, ContainerError> {
        self.check_cursor(cursor)?;
        if cursor == self.begin() {
            return Err(ContainerError::InvalidIterator);
        }
        if cursor.index > 0 {
            return Ok(DequeCursor::new(self.owner, cursor.block, cursor.index - 1));
        }
        let previous = self.blocks[cursor.block].prev;
        let index = self.blocks[previous].len() - 1;
        Ok(DequeCursor::new(self.owner, previous, index))
    }

    /// Moves a cursor `offset` elements forward (or backward when negative),
    /// walking the block chain from the cursor's block.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::InvalidIterator`] if the cursor is not valid
    /// for this deque or the target lies outside `begin()..=end()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::deque::SegmentedDeque;
    ///
    /// let deque: SegmentedDeque<i32, 3> = (0..10).collect();
    /// let end = deque.advance(deque.begin(), 10).unwrap();
    /// assert_eq!(end, deque.end());
    /// let seventh = deque.advance(end, -3).unwrap();
    /// assert_eq!(deque.get(seventh), Ok(&7));
    /// assert!(deque.advance(end, 1).is_err());
    /// ```
    pub fn advance(&self, cursor: DequeCursor, offset: isize) -> Result<DequeCursor, ContainerError> {
        self.check_cursor(cursor)?;
        if offset >= 0 {
            self.walk_forward(cursor, offset.unsigned_abs())
        } else {
            self.walk_backward(cursor, offset.unsigned_abs())
        }
    }

    /// Moves a cursor `offset` elements backward.
    ///
    /// # Errors
    ///
    /// Same as [`advance`](Self::advance).
    pub fn retreat(&self, cursor: DequeCursor, offset: usize) -> Result<DequeCursor, ContainerError> {
        self.check_cursor(cursor)?;
        self.walk_backward(cursor, offset)
    }

    /// Returns the offset of a cursor from [`begin`](Self::begin).
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::InvalidIterator`] if the cursor is not valid
    /// for this deque.
    pub fn position(&self, cursor: DequeCursor) -> Result<usize, ContainerError> {
        self.check_cursor(cursor)?;
        let mut offset = 0;
        let mut block = self.blocks[self.head].next;
        while block != cursor.block {
            offset += self.blocks[block].len();
            block = self.blocks[block].next;
        }
        Ok(offset + cursor.index)
    }

    /// Returns `position(later) - position(earlier)`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::InvalidIterator`] if either cursor belongs
    /// to another deque or is no longer valid.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::deque::SegmentedDeque;
    ///
    /// let deque: SegmentedDeque<char> = "hello".chars().collect();
    /// assert_eq!(deque.distance(deque.end(), deque.begin()), Ok(5));
    /// assert_eq!(deque.distance(deque.begin(), deque.end()), Ok(-5));
    /// ```
    pub fn distance(&self, later: DequeCursor, earlier: DequeCursor) -> Result<isize, ContainerError> {
        let later = self.position(later)?;
        let earlier = self.position(earlier)?;
        Ok(signed(later) - signed(earlier))
    }

    // =========================================================================
    // Positional Mutation
    // =========================================================================

    /// Inserts `value` before the element at `cursor` and returns a cursor to
    /// the inserted element. Inserting at [`end`](Self::end) appends.
    ///
    /// A full target block is split in two before the insertion; every
    /// cursor into that block is invalidated.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::InvalidIterator`] if the cursor is not valid
    /// for this deque. The deque is left unchanged.
    pub fn insert(&mut self, cursor: DequeCursor, value: T) -> Result<DequeCursor, ContainerError> {
        self.check_cursor(cursor)?;
        if cursor.block != self.tail {
            return Ok(self.insert_in_block(cursor.block, cursor.index, value));
        }
        Ok(match self.last_block() {
            Some(last) => {
                let end = self.blocks[last].len();
                self.insert_in_block(last, end, value)
            }
            None => self.insert_first(value),
        })
    }

    /// Removes the element at `cursor`.
    ///
    /// Returns a cursor to the element that followed the removed one,
    /// together with the removed value. Underfull neighbouring blocks are
    /// never merged; the block is freed only when it becomes empty.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::InvalidIterator`] for [`end`](Self::end) or a
    /// cursor that is not valid for this deque. The deque is left unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::deque::SegmentedDeque;
    ///
    /// let mut deque: SegmentedDeque<i32> = (1..=3).collect();
    /// let middle = deque.advance(deque.begin(), 1).unwrap();
    /// let (following, removed) = deque.erase(middle).unwrap();
    /// assert_eq!(removed, 2);
    /// assert_eq!(deque.get(following), Ok(&3));
    /// assert!(deque.erase(deque.end()).is_err());
    /// ```
    pub fn erase(&mut self, cursor: DequeCursor) -> Result<(DequeCursor, T), ContainerError> {
        self.check_dereferenceable(cursor)?;
        Ok(self.remove_in_block(cursor.block, cursor.index))
    }

    // =========================================================================
    // Iteration
    // =========================================================================

    /// Returns an iterator over the elements, front to back.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T, BLOCK_CAPACITY> {
        Iter {
            blocks: &self.blocks,
            front: (self.head, 0),
            back: (self.tail, 0),
            remaining: self.length,
        }
    }

    /// Returns an iterator that allows modifying each element.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let order = self.chain_order();
        let mut slots: Vec<Option<&mut [T]>> = std::iter::repeat_with(|| None)
            .take(self.blocks.capacity())
            .collect();
        for (block, entry) in &mut self.blocks {
            slots[block] = Some(entry.items.as_mut_slice());
        }
        let slices: Vec<&mut [T]> = order
            .into_iter()
            .filter_map(|block| slots[block].take())
            .collect();
        IterMut {
            inner: slices.into_iter().flatten(),
            remaining: self.length,
        }
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    fn first_block(&self) -> Option<BlockId> {
        let first = self.blocks[self.head].next;
        (first != self.tail).then_some(first)
    }

    fn last_block(&self) -> Option<BlockId> {
        let last = self.blocks[self.tail].prev;
        (last != self.head).then_some(last)
    }

    /// Live blocks in chain order.
    fn chain_order(&self) -> Vec<BlockId> {
        let mut order = Vec::new();
        let mut block = self.blocks[self.head].next;
        while block != self.tail {
            order.push(block);
            block = self.blocks[block].next;
        }
        order
    }

    /// Checks that a cursor belongs to this deque and names an existing
    /// position, `end()` included.
    fn check_cursor(&self, cursor: DequeCursor) -> Result<(), ContainerError> {
        if cursor.owner != self.owner {
            return Err(ContainerError::InvalidIterator);
        }
        if cursor.block == self.tail {
            return if cursor.index == 0 {
                Ok(())
            } else {
                Err(ContainerError::InvalidIterator)
            };
        }
        match self.blocks.get(cursor.block) {
            Some(block) if cursor.block != self.head && cursor.index < block.len() => Ok(()),
            _ => Err(ContainerError::InvalidIterator),
        }
    }

    fn check_dereferenceable(&self, cursor: DequeCursor) -> Result<(), ContainerError> {
        self.check_cursor(cursor)?;
        if cursor.block == self.tail {
            Err(ContainerError::InvalidIterator)
        } else {
            Ok(())
        }
    }

    /// Finds the block and local index holding `position`.
    fn locate(&self, position: usize) -> Option<(BlockId, usize)> {
        if position >= self.length {
            return None;
        }
        if position < self.length / 2 {
            let mut remaining = position;
            let mut block = self.blocks[self.head].next;
            loop {
                let size = self.blocks[block].len();
                if remaining < size {
                    return Some((block, remaining));
                }
                remaining -= size;
                block = self.blocks[block].next;
            }
        }
        let mut remaining = self.length - position;
        let mut block = self.blocks[self.tail].prev;
        loop {
            let size = self.blocks[block].len();
            if remaining <= size {
                return Some((block, size - remaining));
            }
            remaining -= size;
            block = self.blocks[block].prev;
        }
    }

    fn walk_forward(&self, cursor: DequeCursor, offset: usize) -> Result<DequeCursor, ContainerError> {
        let mut block = cursor.block;
        let mut remaining = cursor.index + offset;
        loop {
            if block == self.tail {
                return if remaining == 0 {
                    Ok(self.end())
                } else {
                    Err(ContainerError::InvalidIterator)
                };
            }
            let size = self.blocks[block].len();
            if remaining < size {
                return Ok(DequeCursor::new(self.owner, block, remaining));
            }
            remaining -= size;
            block = self.blocks[block].next;
        }
    }

    fn walk_backward(&self, cursor: DequeCursor, offset: usize) -> Result<DequeCursor, ContainerError> {
        if offset <= cursor.index {
            return Ok(DequeCursor::new(self.owner, cursor.block, cursor.index - offset));
        }
        let mut remaining = offset - cursor.index;
        let mut block = cursor.block;
        loop {
            block = self.blocks[block].prev;
            if block == self.head {
                return Err(ContainerError::InvalidIterator);
            }
            let size = self.blocks[block].len();
            if remaining <= size {
                return Ok(DequeCursor::new(self.owner, block, size - remaining));
            }
            remaining -= size;
        }
    }

    /// Links a new block holding `items` right after `anchor`.
    fn link_after(&mut self, anchor: BlockId, items: ArrayVec<T, BLOCK_CAPACITY>) -> BlockId {
        let next = self.blocks[anchor].next;
        let block = self.blocks.insert(Block::new(items, anchor, next));
        self.blocks[anchor].next = block;
        self.blocks[next].prev = block;
        block
    }

    /// Unlinks and frees a block that has become empty.
    fn unlink(&mut self, block: BlockId) {
        let removed = self.blocks.remove(block);
        debug_assert_eq!(removed.len(), 0);
        self.blocks[removed.prev].next = removed.next;
        self.blocks[removed.next].prev = removed.prev;
    }

    fn insert_first(&mut self, value: T) -> DequeCursor {
        let mut items = ArrayVec::new();
        items.push(value);
        let block = self.link_after(self.head, items);
        self.length += 1;
        DequeCursor::new(self.owner, block, 0)
    }

    /// Inserts at `index` of a live block, splitting it first when full.
    fn insert_in_block(&mut self, block: BlockId, index: usize, value: T) -> DequeCursor {
        let (block, index) = if self.blocks[block].is_full() {
            let upper = self.blocks[block].split_upper_half();
            let upper_block = self.link_after(block, upper);
            let half = BLOCK_CAPACITY / 2;
            if index < half {
                (block, index)
            } else {
                (upper_block, index - half)
            }
        } else {
            (block, index)
        };
        self.blocks[block].items.insert(index, value);
        self.length += 1;
        DequeCursor::new(self.owner, block, index)
    }

    /// Removes the element at `index` of a live block and returns the cursor
    /// of the element that followed it.
    fn remove_in_block(&mut self, block: BlockId, index: usize) -> (DequeCursor, T) {
        let entry = &mut self.blocks[block];
        let value = entry.items.remove(index);
        let next = entry.next;
        let following = if index == entry.len() {
            DequeCursor::new(self.owner, next, 0)
        } else {
            DequeCursor::new(self.owner, block, index)
        };
        if entry.len() == 0 {
            self.unlink(block);
        }
        self.length -= 1;
        (following, value)
    }

    #[cfg(test)]
    fn check_invariants(&self) {
        let head = &self.blocks[self.head];
        let tail = &self.blocks[self.tail];
        assert_eq!(head.len(), 0);
        assert_eq!(tail.len(), 0);
        let mut total = 0;
        let mut previous = self.head;
        let mut block = head.next;
        let mut live = 0;
        while block != self.tail {
            let entry = &self.blocks[block];
            assert!(entry.len() >= 1 && entry.len() <= BLOCK_CAPACITY);
            assert_eq!(entry.prev, previous);
            total += entry.len();
            live += 1;
            previous = block;
            block = entry.next;
        }
        assert_eq!(tail.prev, previous);
        assert_eq!(total, self.length);
        assert_eq!(self.blocks.len(), live + 2);
    }
}

#[allow(clippy::cast_possible_wrap)]
const fn signed(value: usize) -> isize {
    value as isize
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, const BLOCK_CAPACITY: usize> Default for SegmentedDeque<T, BLOCK_CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const BLOCK_CAPACITY: usize> Clone for SegmentedDeque<T, BLOCK_CAPACITY> {
    /// Deep copy with an independent block arena and a fresh identity;
    /// cursors of the source are rejected by the copy.
    fn clone(&self) -> Self {
        Self {
            blocks: self.blocks.clone(),
            head: self.head,
            tail: self.tail,
            length: self.length,
            owner: OwnerId::fresh(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.blocks.clone_from(&source.blocks);
        self.head = source.head;
        self.tail = source.tail;
        self.length = source.length;
        self.owner = OwnerId::fresh();
    }
}

impl<T, const BLOCK_CAPACITY: usize> Index<usize> for SegmentedDeque<T, BLOCK_CAPACITY> {
    type Output = T;

    fn index(&self, position: usize) -> &Self::Output {
        match self.at(position) {
            Ok(element) => element,
            Err(error) => panic!("{error}: position {position}, length {}", self.length),
        }
    }
}

impl<T, const BLOCK_CAPACITY: usize> IndexMut<usize> for SegmentedDeque<T, BLOCK_CAPACITY> {
    fn index_mut(&mut self, position: usize) -> &mut Self::Output {
        let length = self.length;
        match self.at_mut(position) {
            Ok(element) => element,
            Err(error) => panic!("{error}: position {position}, length {length}"),
        }
    }
}

impl<T, const BLOCK_CAPACITY: usize> FromIterator<T> for SegmentedDeque<T, BLOCK_CAPACITY> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

impl<T, const BLOCK_CAPACITY: usize> Extend<T> for SegmentedDeque<T, BLOCK_CAPACITY> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.push_back(element);
        }
    }
}

impl<T, const BLOCK_CAPACITY: usize> From<Vec<T>> for SegmentedDeque<T, BLOCK_CAPACITY> {
    fn from(elements: Vec<T>) -> Self {
        elements.into_iter().collect()
    }
}

impl<T, const BLOCK_CAPACITY: usize, const N: usize> From<[T; N]> for SegmentedDeque<T, BLOCK_CAPACITY> {
    fn from(elements: [T; N]) -> Self {
        elements.into_iter().collect()
    }
}

impl<T, const BLOCK_CAPACITY: usize> IntoIterator for SegmentedDeque<T, BLOCK_CAPACITY> {
    type Item = T;
    type IntoIter = IntoIter<T, BLOCK_CAPACITY>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { deque: self }
    }
}

impl<'a, T, const BLOCK_CAPACITY: usize> IntoIterator for &'a SegmentedDeque<T, BLOCK_CAPACITY> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, BLOCK_CAPACITY>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const BLOCK_CAPACITY: usize> IntoIterator for &'a mut SegmentedDeque<T, BLOCK_CAPACITY> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: PartialEq, const BLOCK_CAPACITY: usize> PartialEq for SegmentedDeque<T, BLOCK_CAPACITY> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<T: Eq, const BLOCK_CAPACITY: usize> Eq for SegmentedDeque<T, BLOCK_CAPACITY> {}

impl<T: Hash, const BLOCK_CAPACITY: usize> Hash for SegmentedDeque<T, BLOCK_CAPACITY> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug, const BLOCK_CAPACITY: usize> fmt::Debug for SegmentedDeque<T, BLOCK_CAPACITY> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, const BLOCK_CAPACITY: usize> fmt::Display for SegmentedDeque<T, BLOCK_CAPACITY> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Tests
// =============================================================================
