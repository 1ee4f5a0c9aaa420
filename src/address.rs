//! Address translation and heap indexing.
//!
//! The slot array is an implicit binary heap:
//! - index 1 is the root
//! - internal node `i` has children `2i` and `2i + 1`
//! - indices `[capacity, 2 * capacity)` are the leaves, left to right
//! - index 0 is unused
//!
//! External addresses are byte offsets into the `capacity * 32` byte data region.
//! They are always masked into range, never rejected.

use std::fmt;

use crate::block::{BLOCK_BYTES, WORDS_PER_BLOCK, WORD_BYTES};

/// Smallest supported address width (two leaves).
pub const MIN_ADDRESS_BITS: u32 = 1;

/// Largest supported address width (16M leaves, 512 MiB of data).
pub const MAX_ADDRESS_BITS: u32 = 24;

/// Position of a leaf in left-to-right order, `0..capacity`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
pub struct LeafIndex(pub usize);

impl LeafIndex {
    /// Slot index of this leaf in a tree with `capacity` leaves.
    pub const fn node(self, capacity: usize) -> NodeIndex {
        NodeIndex(self.0 + capacity)
    }
}

/// Index of a slot in the heap-ordered array.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NodeIndex(pub usize);

impl NodeIndex {
    /// The root slot.
    pub const ROOT: Self = Self(1);

    /// Raw array index.
    pub const fn get(self) -> usize {
        self.0
    }

    pub const fn parent(self) -> Self {
        Self(self.0 / 2)
    }

    pub const fn left(self) -> Self {
        Self(self.0 * 2)
    }

    pub const fn right(self) -> Self {
        Self(self.0 * 2 + 1)
    }

    pub const fn is_root(self) -> bool {
        self.0 == 1
    }

    /// Whether this is an internal node of a tree with `capacity` leaves.
    pub const fn is_internal(self, capacity: usize) -> bool {
        self.0 >= 1 && self.0 < capacity
    }

    /// Whether both children of this node are leaves.
    pub const fn is_leaf_parent(self, capacity: usize) -> bool {
        self.0 >= capacity / 2 && self.0 < capacity
    }

    /// Iterate from this node's parent up to and including the root.
    pub fn ancestors(self) -> impl Iterator<Item = NodeIndex> {
        std::iter::successors((self.0 > 1).then(|| self.parent()), |n| {
            (n.0 > 1).then(|| n.parent())
        })
    }
}

impl fmt::Debug for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeIndex({})", self.0)
    }
}

impl From<usize> for NodeIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// A leaf together with a byte offset inside its 32-byte slot.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Location {
    pub leaf: LeafIndex,
    pub offset: usize,
}

/// Leaf addressed by a block access: `(address / 32) & (capacity - 1)`.
pub fn block_leaf(address: u32, capacity: usize) -> LeafIndex {
    LeafIndex((address as usize / BLOCK_BYTES) & (capacity - 1))
}

/// Location of a word access. The word space wraps at `capacity * 8` words.
pub fn word_location(address: u32, capacity: usize) -> Location {
    let word = (address as usize / WORD_BYTES) & (capacity * WORDS_PER_BLOCK - 1);
    Location {
        leaf: LeafIndex(word / WORDS_PER_BLOCK),
        offset: (word % WORDS_PER_BLOCK) * WORD_BYTES,
    }
}

/// Location of a byte access. The byte space wraps at `capacity * 32` bytes.
pub fn byte_location(address: u32, capacity: usize) -> Location {
    let byte = address as usize & (capacity * BLOCK_BYTES - 1);
    Location {
        leaf: LeafIndex(byte / BLOCK_BYTES),
        offset: byte % BLOCK_BYTES,
    }
}
