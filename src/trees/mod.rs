//! This module contains the tree types.
//!
//! [`multi_tree`] implements the core binary search tree that allows duplicate keys.
//! The map and set types of the crate are built on top of it.

pub mod multi_tree;

pub use multi_tree::*;

/// The side of a child relative to its parent.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Side {
    Left,
    Right,
}
