//! Sorted associative map backed by a red-black tree.
//!
//! This module provides [`OrderedMap`], a map with unique keys kept in the
//! order given by a [`Compare`] implementation.
//!
//! # Overview
//!
//! - O(log N) `insert`, `remove`, `find` and `get`
//! - ordered iteration, forward and backward, through borrowing iterators
//!   or through [`MapCursor`]s
//! - rebalancing is top-down: insertion and deletion each make a single pass
//!   from the root
//!
//! Nodes live in an arena and never move once inserted. Removing an entry
//! with two children physically unlinks its in-order successor and moves
//! that node into the vacated position, so cursors to every other entry
//! survive.
//!
//! # Examples
//!
//! ```rust
//! use strata::map::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.insert(3, "three");
//! map.insert(1, "one");
//! map.insert(2, "two");
//!
//! assert_eq!(map.get(&2), Some(&"two"));
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
//!
//! assert_eq!(map.remove(&1), Some("one"));
//! assert_eq!(map.first_key_value(), Some((&2, &"two")));
//! ```

mod compare;
mod cursor;
mod iter;
mod node;
mod tree;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::ops::Index;

use self::node::{Direction, NodeId};
use self::tree::Tree;
use crate::error::ContainerError;
use crate::identity::OwnerId;

pub use self::compare::{Compare, NaturalOrder};
pub use self::cursor::MapCursor;
pub use self::iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};

static_assertions::assert_impl_all!(OrderedMap<i32, String>: Send, Sync, Clone, Default);
static_assertions::assert_impl_all!(MapCursor: Send, Sync, Copy);

// =============================================================================
// OrderedMap Definition
// =============================================================================

/// A sorted map with unique keys, backed by a red-black tree.
///
/// Keys are ordered by the comparator `C`, which defaults to
/// [`NaturalOrder`]. Two keys are the same key when neither is less than the
/// other.
///
/// # Time Complexity
///
/// | Operation                      | Complexity         |
/// |--------------------------------|--------------------|
/// | `insert` / `remove` / `erase`  | O(log N)           |
/// | `get` / `find` / `at`          | O(log N)           |
/// | `next_cursor` / `prev_cursor`  | O(log N), amortized O(1) |
/// | `first_key_value` / `last_key_value` | O(log N)     |
/// | `len` / `is_empty`             | O(1)               |
/// | `clone`                        | O(N)               |
///
/// # Examples
///
/// ```rust
/// use strata::error::ContainerError;
/// use strata::map::OrderedMap;
///
/// let mut map: OrderedMap<&str, i32> = OrderedMap::new();
/// *map.get_or_insert_default("apples") += 3;
/// *map.get_or_insert_default("apples") += 2;
///
/// assert_eq!(map.at(&"apples"), Ok(&5));
/// assert_eq!(map.at(&"pears"), Err(ContainerError::IndexOutOfBounds));
/// assert_eq!(map[&"apples"], 5);
/// ```
pub struct OrderedMap<K, V, C = NaturalOrder> {
    tree: Tree<K, V>,
    comparator: C,
    owner: OwnerId,
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Creates an empty map ordered by [`Ord`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, V, C> OrderedMap<K, V, C> {
    /// Returns the number of entries.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.tree.nodes.len()
    }

    /// Returns `true` if the map has no entries.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.root.is_none()
    }

    /// Removes every entry.
    ///
    /// The map takes a new identity, so every cursor obtained before the
    /// call, [`end`](Self::end) included, is rejected afterwards.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.owner = OwnerId::fresh();
    }

    /// Returns the entry with the smallest key.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|node| self.key_value(node))
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.last().map(|node| self.key_value(node))
    }

    // =========================================================================
    // Cursors
    // =========================================================================

    /// Returns a cursor to the smallest key, or [`end`](Self::end) if empty.
    #[must_use]
    pub fn begin(&self) -> MapCursor {
        MapCursor::new(self.owner, self.tree.first())
    }

    /// Returns the past-the-end cursor.
    #[must_use]
    pub const fn end(&self) -> MapCursor {
        MapCursor::new(self.owner, None)
    }

    /// Same as [`begin`](Self::begin); provided for read-only call sites.
    #[must_use]
    pub fn cbegin(&self) -> MapCursor {
        self.begin()
    }

    /// Same as [`end`](Self::end); provided for read-only call sites.
    #[must_use]
    pub const fn cend(&self) -> MapCursor {
        self.end()
    }

    /// Returns the entry a cursor points at.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::InvalidIterator`] for [`end`](Self::end),
    /// for a cursor from another map, or for a cursor whose entry was removed.
    pub fn entry(&self, cursor: MapCursor) -> Result<(&K, &V), ContainerError> {
        let node = self.check_dereferenceable(cursor)?;
        Ok(self.key_value(node))
    }

    /// Returns the value a cursor points at, mutably.
    ///
    /// # Errors
    ///
    /// Same as [`entry`](Self::entry).
    pub fn value_mut(&mut self, cursor: MapCursor) -> Result<&mut V, ContainerError> {
        let node = self.check_dereferenceable(cursor)?;
        Ok(&mut self.tree.nodes[node].value)
    }

    /// Moves a cursor to the next larger key; from the largest key this
    /// yields [`end`](Self::end).
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::InvalidIterator`] if the cursor is already
    /// [`end`](Self::end) or is not valid for this map.
    pub fn next_cursor(&self, cursor: MapCursor) -> Result<MapCursor, ContainerError> {
        let node = self.check_dereferenceable(cursor)?;
        Ok(MapCursor::new(self.owner, self.tree.step(node, Direction::Right)))
    }

    /// Moves a cursor to the next smaller key; from [`end`](Self::end) this
    /// yields the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::InvalidIterator`] if the cursor is
    /// [`begin`](Self::begin) or is not valid for this map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::map::OrderedMap;
    ///
    /// let map = OrderedMap::from([(1, 'a'), (2, 'b')]);
    /// let last = map.prev_cursor(map.end()).unwrap();
    /// assert_eq!(map.entry(last), Ok((&2, &'b')));
    /// assert!(map.prev_cursor(map.begin()).is_err());
    /// ```
    pub fn prev_cursor(&self, cursor: MapCursor) -> Result<MapCursor, ContainerError> {
        self.check_cursor(cursor)?;
        let previous = match cursor.node {
            None => self.tree.last(),
            Some(node) => self.tree.step(node, Direction::Left),
        };
        previous
            .map(|node| MapCursor::new(self.owner, Some(node)))
            .ok_or(ContainerError::InvalidIterator)
    }

    // =========================================================================
    // Iteration
    // =========================================================================

    /// Returns an iterator over the entries in key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.tree)
    }

    /// Returns an iterator over the entries in key order with mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.tree)
    }

    /// Returns an iterator over the keys in order.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values in key order.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over mutable values in key order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    fn key_value(&self, node: NodeId) -> (&K, &V) {
        let node = &self.tree.nodes[node];
        (&node.key, &node.value)
    }

    fn check_cursor(&self, cursor: MapCursor) -> Result<(), ContainerError> {
        let live = cursor.node.is_none_or(|node| self.tree.nodes.contains(node));
        if cursor.owner == self.owner && live {
            Ok(())
        } else {
            Err(ContainerError::InvalidIterator)
        }
    }

    fn check_dereferenceable(&self, cursor: MapCursor) -> Result<NodeId, ContainerError> {
        self.check_cursor(cursor)?;
        cursor.node.ok_or(ContainerError::InvalidIterator)
    }
}

impl<K, V, C: Compare<K>> OrderedMap<K, V, C> {
    /// Creates an empty map ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::map::OrderedMap;
    ///
    /// let mut map = OrderedMap::with_comparator(|left: &String, right: &String| {
    ///     left.to_lowercase() < right.to_lowercase()
    /// });
    /// map.insert("Beta".to_string(), 2);
    /// map.insert("alpha".to_string(), 1);
    /// let (_, inserted) = map.insert("BETA".to_string(), 3);
    ///
    /// assert!(!inserted);
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.first_key_value(), Some((&"alpha".to_string(), &1)));
    /// ```
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            tree: Tree::new(),
            comparator,
            owner: OwnerId::fresh(),
        }
    }

    /// Returns a reference to the comparator.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Inserts `key` with `value` unless an equivalent key is present.
    ///
    /// Returns a cursor to the entry holding the key and whether an insertion
    /// happened. An existing entry is left untouched, and `value` is dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// let (first, inserted) = map.insert(7, "seven");
    /// assert!(inserted);
    ///
    /// let (again, inserted) = map.insert(7, "SEVEN");
    /// assert!(!inserted);
    /// assert_eq!(first, again);
    /// assert_eq!(map.get(&7), Some(&"seven"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (MapCursor, bool) {
        if let Some(node) = self.locate(&key) {
            return (MapCursor::new(self.owner, Some(node)), false);
        }
        let node = self.tree.insert(key, value, &self.comparator);
        (MapCursor::new(self.owner, Some(node)), true)
    }

    /// Removes `key` and returns its value, or `None` if it is absent.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` and returns the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let node = self.locate(key)?;
        let removed = self.tree.remove(node, &self.comparator);
        Some((removed.key, removed.value))
    }

    /// Removes the entry a cursor points at.
    ///
    /// Cursors to other entries stay valid.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::InvalidIterator`] for [`end`](Self::end),
    /// for a cursor from another map, or for a cursor whose entry was
    /// already removed. The map is unchanged in that case.
    pub fn erase(&mut self, cursor: MapCursor) -> Result<(K, V), ContainerError> {
        let node = self.check_dereferenceable(cursor)?;
        let removed = self.tree.remove(node, &self.comparator);
        Ok((removed.key, removed.value))
    }

    /// Returns a cursor to `key`, or [`end`](Self::end) if it is absent.
    #[must_use]
    pub fn find(&self, key: &K) -> MapCursor {
        MapCursor::new(self.owner, self.locate(key))
    }

    /// Returns 1 if `key` is present and 0 otherwise.
    #[must_use]
    pub fn count(&self, key: &K) -> usize {
        usize::from(self.contains_key(key))
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.locate(key).is_some()
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.locate(key).map(|node| &self.tree.nodes[node].value)
    }

    /// Returns the value stored under `key`, mutably.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let node = self.locate(key)?;
        Some(&mut self.tree.nodes[node].value)
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::IndexOutOfBounds`] if `key` is absent.
    pub fn at(&self, key: &K) -> Result<&V, ContainerError> {
        self.get(key).ok_or(ContainerError::IndexOutOfBounds)
    }

    /// Returns the value stored under `key`, mutably.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::IndexOutOfBounds`] if `key` is absent.
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V, ContainerError> {
        self.get_mut(key).ok_or(ContainerError::IndexOutOfBounds)
    }

    /// Returns the value under `key`, inserting `V::default()` first if the
    /// key is absent.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let node = match self.locate(&key) {
            Some(node) => node,
            None => self.tree.insert(key, V::default(), &self.comparator),
        };
        &mut self.tree.nodes[node].value
    }

    fn locate(&self, key: &K) -> Option<NodeId> {
        let mut current = self.tree.root;
        while let Some(node) = current {
            let stored = &self.tree.nodes[node].key;
            if self.comparator.less(key, stored) {
                current = self.tree.child(node, Direction::Left);
            } else if self.comparator.less(stored, key) {
                current = self.tree.child(node, Direction::Right);
            } else {
                return Some(node);
            }
        }
        None
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V, C: Compare<K> + Default> Default for OrderedMap<K, V, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for OrderedMap<K, V, C> {
    /// Deep copy with its own arena and a fresh identity; cursors of the
    /// source are rejected by the copy.
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
            comparator: self.comparator.clone(),
            owner: OwnerId::fresh(),
        }
    }
}

impl<K, V, C: Compare<K>> Index<&K> for OrderedMap<K, V, C> {
    type Output = V;

    fn index(&self, key: &K) -> &Self::Output {
        match self.at(key) {
            Ok(value) => value,
            Err(error) => panic!("{error}: key not present in map of length {}", self.len()),
        }
    }
}

impl<K, V, C: Compare<K> + Default> FromIterator<(K, V)> for OrderedMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, C: Compare<K>> Extend<(K, V)> for OrderedMap<K, V, C> {
    /// Inserts every pair; pairs whose key is already present are ignored.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for OrderedMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K, V, C> IntoIterator for OrderedMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.tree)
    }
}

impl<'a, K, V, C> IntoIterator for &'a OrderedMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut OrderedMap<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for OrderedMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for OrderedMap<K, V, C> {}

impl<K: Hash, V: Hash, C> Hash for OrderedMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for OrderedMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, C> fmt::Display for OrderedMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Tests
// =============================================================================
