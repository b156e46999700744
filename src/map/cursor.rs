//! Position handles into an [`OrderedMap`](super::OrderedMap).

use super::node::NodeId;
use crate::identity::OwnerId;

/// A bidirectional position inside an [`OrderedMap`](super::OrderedMap).
///
/// A cursor names one node of the map it came from, or the past-the-end
/// position. Like [`DequeCursor`](crate::deque::DequeCursor) it is `Copy`
/// and holds no borrow; it is resolved through map methods.
///
/// # Invalidation
///
/// Inserting never invalidates a cursor. Removing an entry invalidates only
/// cursors to that entry; a cursor to a removed entry is reported as
/// [`ContainerError::InvalidIterator`](crate::error::ContainerError::InvalidIterator)
/// unless a later insertion has reused its slot.
///
/// # Examples
///
/// ```rust
/// use strata::map::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// let (cursor, _) = map.insert(2, 'b');
/// map.insert(1, 'a');
/// map.insert(3, 'c');
///
/// assert_eq!(map.entry(cursor), Ok((&2, &'b')));
/// let after = map.next_cursor(cursor).unwrap();
/// assert_eq!(map.entry(after), Ok((&3, &'c')));
/// assert_eq!(map.next_cursor(after), Ok(map.end()));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct MapCursor {
    pub(super) owner: OwnerId,
    /// `None` is the past-the-end position.
    pub(super) node: Option<NodeId>,
}

impl MapCursor {
    pub(super) const fn new(owner: OwnerId, node: Option<NodeId>) -> Self {
        Self { owner, node }
    }

    /// Returns `true` for the past-the-end position.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.node.is_none()
    }
}
