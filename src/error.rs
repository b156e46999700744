//! Error type shared by both containers.
//!
//! Every fallible operation validates its arguments before touching the
//! container, so an `Err` always leaves the container exactly as it was.

/// Represents the ways a container operation can be rejected.
///
/// # Examples
///
/// ```rust
/// use strata::deque::SegmentedDeque;
/// use strata::error::ContainerError;
///
/// let mut deque: SegmentedDeque<i32> = SegmentedDeque::new();
/// assert_eq!(deque.pop_front(), Err(ContainerError::ContainerIsEmpty));
/// assert_eq!(deque.at(3), Err(ContainerError::IndexOutOfBounds));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerError {
    /// `front`, `back` or a pop was requested on an empty container.
    ContainerIsEmpty,
    /// A position was outside `0..len()`, or a key was absent from a map
    /// accessed through `at` or immutable indexing.
    IndexOutOfBounds,
    /// A cursor was dereferenced or moved outside the valid range, belongs
    /// to another container, or refers to storage that no longer exists.
    InvalidIterator,
}

impl std::fmt::Display for ContainerError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContainerIsEmpty => write!(formatter, "container is empty"),
            Self::IndexOutOfBounds => write!(formatter, "index out of bounds"),
            Self::InvalidIterator => write!(formatter, "invalid iterator"),
        }
    }
}

impl std::error::Error for ContainerError {}
