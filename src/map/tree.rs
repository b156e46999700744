//! Red-black tree structure and its top-down rebalancing passes.
//!
//! The tree keeps its nodes in a [`Slab`] and links them by arena key.
//! Both insertion and deletion rebalance during the single descent from the
//! root, so no second upward pass is needed:
//!
//! - insertion splits every node with two red children on the way down and
//!   repairs the resulting red-red pair at once with a single or double
//!   rotation;
//! - deletion pushes a red node down the search path, so the node finally
//!   unlinked is always red (or the root) and black-height never changes.

use slab::Slab;
use smallvec::SmallVec;

use super::compare::Compare;
use super::node::{Color, Direction, Node, NodeId};

/// Inline capacity of traversal stacks. A red-black tree with N nodes is at
/// most 2·log2(N + 1) deep, so 48 covers trees of millions of nodes.
const STACK_INLINE: usize = 48;

pub(super) type TraversalStack = SmallVec<[NodeId; STACK_INLINE]>;

#[derive(Clone)]
pub(super) struct Tree<K, V> {
    pub(super) nodes: Slab<Node<K, V>>,
    pub(super) root: Option<NodeId>,
}

impl<K, V> Tree<K, V> {
    pub(super) const fn new() -> Self {
        Self {
            nodes: Slab::new(),
            root: None,
        }
    }

    pub(super) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    #[inline]
    pub(super) fn child(&self, node: NodeId, direction: Direction) -> Option<NodeId> {
        self.nodes[node].child(direction)
    }

    #[inline]
    pub(super) fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node].parent
    }

    /// Returns `true` for a red node; absent nodes count as black.
    #[inline]
    pub(super) fn is_red(&self, node: Option<NodeId>) -> bool {
        node.is_some_and(|node| self.nodes[node].is_red())
    }

    #[inline]
    fn set_color(&mut self, node: NodeId, color: Color) {
        self.nodes[node].color = color;
    }

    /// Which child of its parent `node` is; `None` for the root.
    fn side_of(&self, node: NodeId) -> Option<Direction> {
        let parent = self.parent(node)?;
        if self.child(parent, Direction::Left) == Some(node) {
            Some(Direction::Left)
        } else {
            Some(Direction::Right)
        }
    }

    /// Follows `direction` links from `node` until none is left.
    pub(super) fn extreme(&self, mut node: NodeId, direction: Direction) -> NodeId {
        while let Some(next) = self.child(node, direction) {
            node = next;
        }
        node
    }

    pub(super) fn first(&self) -> Option<NodeId> {
        self.root.map(|root| self.extreme(root, Direction::Left))
    }

    pub(super) fn last(&self) -> Option<NodeId> {
        self.root.map(|root| self.extreme(root, Direction::Right))
    }

    /// In-order neighbour of `node` in `direction`: `Right` gives the
    /// successor, `Left` the predecessor.
    ///
    /// Descends to the nearest node of the `direction` subtree if there is
    /// one, otherwise climbs until arriving from the opposite side.
    pub(super) fn step(&self, node: NodeId, direction: Direction) -> Option<NodeId> {
        if let Some(subtree) = self.child(node, direction) {
            return Some(self.extreme(subtree, direction.opposite()));
        }
        let mut current = node;
        let mut parent = self.parent(current);
        while let Some(above) = parent {
            if self.child(above, direction) != Some(current) {
                break;
            }
            current = above;
            parent = self.parent(above);
        }
        parent
    }

    /// Node keys in key order, gathered with an explicit stack.
    pub(super) fn in_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = TraversalStack::new();
        let mut current = self.root;
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = self.child(node, Direction::Left);
            }
            let Some(node) = stack.pop() else {
                break;
            };
            order.push(node);
            current = self.child(node, Direction::Right);
        }
        order
    }

    // =========================================================================
    // Relinking
    // =========================================================================

    /// Puts `child` in the `direction` slot of `parent`.
    fn attach(&mut self, parent: NodeId, direction: Direction, child: Option<NodeId>) {
        self.nodes[parent].children[direction.index()] = child;
        if let Some(child) = child {
            self.nodes[child].parent = Some(parent);
        }
    }

    /// Puts `replacement` wherever `old` hangs below `parent` (or at the root).
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, replacement: Option<NodeId>) {
        match parent {
            None => {
                self.root = replacement;
                if let Some(replacement) = replacement {
                    self.nodes[replacement].parent = None;
                }
            }
            Some(parent) => {
                let side = if self.child(parent, Direction::Left) == Some(old) {
                    Direction::Left
                } else {
                    Direction::Right
                };
                self.attach(parent, side, replacement);
            }
        }
    }

    /// Rotates `node` down toward `direction`; its child on the opposite side
    /// takes its place. Returns the node now at the top of the subtree.
    ///
    /// Colors are left untouched.
    fn rotate(&mut self, node: NodeId, direction: Direction) -> NodeId {
        let rising_side = direction.opposite();
        let Some(pivot) = self.child(node, rising_side) else {
            return node;
        };
        let parent = self.parent(node);
        let inner = self.child(pivot, direction);
        self.attach(node, rising_side, inner);
        self.replace_child(parent, node, Some(pivot));
        self.attach(pivot, direction, Some(node));
        pivot
    }

    fn blacken_root(&mut self) {
        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    // =========================================================================
    // Top-Down Insertion
    // =========================================================================

    /// Links a new node for a key known to be absent and returns its id.
    pub(super) fn insert<C: Compare<K>>(&mut self, key: K, value: V, comparator: &C) -> NodeId {
        let mut current = self.root;
        let mut parent: Option<NodeId> = None;
        let mut direction = Direction::Left;
        loop {
            let Some(node) = current else {
                let node = self.nodes.insert(Node::new_red(key, value));
                match parent {
                    Some(parent) => self.attach(parent, direction, Some(node)),
                    None => self.root = Some(node),
                }
                self.resolve_red_pair(node);
                self.blacken_root();
                return node;
            };

            let left = self.child(node, Direction::Left);
            let right = self.child(node, Direction::Right);
            if self.is_red(left) && self.is_red(right) {
                self.set_color(node, Color::Red);
                if let Some(left) = left {
                    self.set_color(left, Color::Black);
                }
                if let Some(right) = right {
                    self.set_color(right, Color::Black);
                }
                self.resolve_red_pair(node);
            }

            direction = if comparator.less(&key, &self.nodes[node].key) {
                Direction::Left
            } else {
                Direction::Right
            };
            parent = Some(node);
            current = self.child(node, direction);
        }
    }

    /// Repairs a red `node` whose parent is also red.
    ///
    /// An outer grandchild needs a single rotation at the grandparent, an
    /// inner one a double rotation. The node that ends on top turns black
    /// and the grandparent red.
    fn resolve_red_pair(&mut self, node: NodeId) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        if !self.nodes[parent].is_red() {
            return;
        }
        let Some(grandparent) = self.parent(parent) else {
            self.set_color(parent, Color::Black);
            return;
        };
        let (Some(parent_side), Some(node_side)) = (self.side_of(parent), self.side_of(node)) else {
            return;
        };
        let top = if parent_side == node_side {
            self.rotate(grandparent, parent_side.opposite())
        } else {
            self.rotate(parent, node_side.opposite());
            self.rotate(grandparent, parent_side.opposite())
        };
        self.set_color(top, Color::Black);
        self.set_color(grandparent, Color::Red);
    }

    // =========================================================================
    // Top-Down Deletion
    // =========================================================================

    /// Unlinks `target` and returns it.
    ///
    /// The descent follows `target`'s key and, once at `target`, continues to
    /// its in-order successor. At every black node on the way a red node is
    /// pushed down:
    ///
    /// - a red child away from the path is rotated above the current node;
    /// - a sibling with two black children is absorbed by a color flip;
    /// - a sibling with a red outer child takes a single rotation at the
    ///   parent, one with only a red inner child a double rotation.
    ///
    /// The last node reached has at most one child and is red unless it is
    /// the root. If it is not `target` itself it is relocated into
    /// `target`'s structural slot, so it keeps its arena key.
    pub(super) fn remove<C: Compare<K>>(&mut self, target: NodeId, comparator: &C) -> Node<K, V> {
        // `None` stands for a virtual head whose right child is the root.
        let mut current: Option<NodeId> = None;
        let mut direction = Direction::Right;

        loop {
            let next = match current {
                None => self.root,
                Some(node) => self.child(node, direction),
            };
            let Some(node) = next else {
                break;
            };
            let last = direction;
            let parent = current;
            current = Some(node);
            direction = if comparator.less(&self.nodes[target].key, &self.nodes[node].key) {
                Direction::Left
            } else {
                Direction::Right
            };

            if self.nodes[node].is_red() || self.is_red(self.child(node, direction)) {
                continue;
            }

            if self.is_red(self.child(node, direction.opposite())) {
                let raised = self.rotate(node, direction);
                self.set_color(node, Color::Red);
                self.set_color(raised, Color::Black);
                continue;
            }

            let Some(above) = parent else {
                continue;
            };
            let Some(sibling) = self.child(above, last.opposite()) else {
                continue;
            };
            let outer = self.child(sibling, last.opposite());
            let inner = self.child(sibling, last);

            if !self.is_red(outer) && !self.is_red(inner) {
                self.set_color(above, Color::Black);
                self.set_color(sibling, Color::Red);
                self.set_color(node, Color::Red);
                continue;
            }

            let top = if self.is_red(outer) {
                self.rotate(above, last)
            } else {
                self.rotate(sibling, last.opposite());
                self.rotate(above, last)
            };
            self.set_color(node, Color::Red);
            self.set_color(top, Color::Red);
            for side in [Direction::Left, Direction::Right] {
                if let Some(child) = self.child(top, side) {
                    self.set_color(child, Color::Black);
                }
            }
        }

        if let Some(doomed) = current {
            self.splice_out(doomed, target);
        }
        let removed = self.nodes.remove(target);
        self.blacken_root();
        removed
    }

    /// Detaches `doomed` (which has at most one child) and, when it differs
    /// from `target`, moves it into `target`'s place, taking its color.
    fn splice_out(&mut self, doomed: NodeId, target: NodeId) {
        let orphan = self
            .child(doomed, Direction::Left)
            .or_else(|| self.child(doomed, Direction::Right));
        let doomed_parent = self.parent(doomed);
        self.replace_child(doomed_parent, doomed, orphan);
        if doomed == target {
            return;
        }

        let Node {
            color,
            parent,
            children: [left, right],
            ..
        } = self.nodes[target];
        self.replace_child(parent, target, Some(doomed));
        self.attach(doomed, Direction::Left, left);
        self.attach(doomed, Direction::Right, right);
        self.set_color(doomed, color);
    }
}

// =============================================================================
// Tests
// =============================================================================
