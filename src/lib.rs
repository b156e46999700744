//! # strata
//!
//! Two in-memory containers with positional, cursor-based APIs.
//!
//! ## Overview
//!
//! - **Segmented Deque**: [`SegmentedDeque`](deque::SegmentedDeque), a
//!   double-ended sequence stored as a chain of fixed-capacity blocks, with
//!   amortized O(1) operations at both ends and O(√N) positional insert,
//!   erase and access
//! - **Ordered Map**: [`OrderedMap`](map::OrderedMap), a sorted map with
//!   unique keys backed by a red-black tree rebalanced top-down
//!
//! Both hand out `Copy` cursors that do not borrow the container. Every
//! cursor is tied to the container that produced it and is checked on use;
//! misuse is reported as a [`ContainerError`](error::ContainerError) rather
//! than undefined behaviour.
//!
//! ## Feature Flags
//!
//! - `deque`: the segmented deque
//! - `map`: the ordered map
//! - `full`: enable all features
//!
//! Both containers are enabled by default.
//!
//! ## Example
//!
//! ```rust
//! use strata::prelude::*;
//!
//! let mut deque: SegmentedDeque<i32> = (1..=4).collect();
//! deque.push_front(0);
//! assert_eq!(deque.at(4), Ok(&4));
//!
//! let mut map = OrderedMap::new();
//! map.insert("b", 2);
//! map.insert("a", 1);
//! assert_eq!(map.first_key_value(), Some((&"a", &1)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the container types, their cursors and the error type.
///
/// # Usage
///
/// ```rust
/// use strata::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::ContainerError;

    #[cfg(feature = "deque")]
    pub use crate::deque::{DequeCursor, SegmentedDeque};

    #[cfg(feature = "map")]
    pub use crate::map::{Compare, MapCursor, NaturalOrder, OrderedMap};
}

pub mod error;

mod identity;

#[cfg(feature = "deque")]
pub mod deque;

#[cfg(feature = "map")]
pub mod map;
