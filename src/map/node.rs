//! Red-black tree nodes stored in a slab arena.

/// Arena key of a node.
pub(super) type NodeId = usize;

// =============================================================================
// Color and Direction
// =============================================================================

/// The color of a red-black tree node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(super) enum Color {
    Red,
    Black,
}

/// Which child slot of a node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(super) enum Direction {
    Left = 0,
    Right = 1,
}

impl Direction {
    #[inline]
    pub(super) const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    #[inline]
    pub(super) const fn index(self) -> usize {
        self as usize
    }
}

// =============================================================================
// Node Definition
// =============================================================================

/// A key-value pair with its tree links.
///
/// The arena owns every node. `parent` is only followed for traversal and
/// relinking; nothing is ever freed through it.
#[derive(Clone)]
pub(super) struct Node<K, V> {
    pub(super) key: K,
    pub(super) value: V,
    pub(super) color: Color,
    pub(super) parent: Option<NodeId>,
    pub(super) children: [Option<NodeId>; 2],
}

impl<K, V> Node<K, V> {
    /// Creates a new red node with no links.
    pub(super) const fn new_red(key: K, value: V) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            parent: None,
            children: [None, None],
        }
    }

    #[inline]
    pub(super) const fn child(&self, direction: Direction) -> Option<NodeId> {
        self.children[direction.index()]
    }

    #[inline]
    pub(super) fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}
