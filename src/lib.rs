//! An unbalanced binary search tree that allows duplicate keys, together with a map
//! and a set built on top of it.
//!
//! [`MultiTree`] is the core: it keeps every inserted entry, even when keys repeat,
//! and gives parent-linked cursors that move both ways through the tree.
//! [`TreeMap`] keeps keys unique by overwriting, and [`TreeSet`] stores bare elements.

pub mod error;
pub mod map;
pub mod set;
pub mod trees;

pub use error::TreeError;
pub use map::TreeMap;
pub use set::TreeSet;
pub use trees::*;
