//! # Merkle Memory
//!
//! A fixed-capacity, byte-addressable memory whose contents are committed to by
//! a single SHA3-256 Merkle root.
//!
//! The memory is a flat array of `2^address_bits` leaves of 32 bytes (8 words of
//! 32 bits). A binary hash tree is overlaid on the same array in heap order, so
//! no node objects or per-node allocations exist.
//!
//! Keeping the root cheap under random writes is the point of the design:
//!
//! - **Writes** store the data and mark the leaf's ancestors stale, stopping at
//!   the first ancestor that is already stale
//! - **[`MerkleMemory::recompute`]** rebuilds every stale hash in one bottom-up
//!   sweep, so repeated writes to the same region cost one rehash
//! - **Reads** of leaf data never need a recompute; reads of hashes are only
//!   valid right after one
//!
//! ## Addressing
//!
//! All addresses are byte offsets and wrap at `capacity * 32`. Block accesses
//! round down to the containing leaf and word accesses to the containing word.
//! Words are stored little-endian, so byte, word and block views always agree.
//! Bounds-checked `*_checked` variants reject instead of wrapping.
//!
//! ## Hashing
//!
//! - leaf parent: `H(H(left_leaf) || H(right_leaf))`
//! - interior node: `H(left || right)`
//!
//! The hash function is SHA3-256 and is not configurable.
//!
//! ## Example
//!
//! ```
//! use merkle_memory::MerkleMemory;
//!
//! let mut memory = MerkleMemory::new(10).unwrap();
//! memory.write_word(0x40, 0xdead_beef);
//! memory.write_byte(0x41, 0x00);
//! memory.recompute();
//!
//! assert_eq!(memory.read_word(0x40), 0xdead_00ef);
//! assert!(memory.verified_root().is_ok());
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod address;
mod block;
mod config;
mod error;
mod hash;
mod tree;

pub use address::{LeafIndex, Location, NodeIndex, MAX_ADDRESS_BITS, MIN_ADDRESS_BITS};
pub use block::{decode_block, encode_block, Block, BLOCK_BYTES, WORDS_PER_BLOCK, WORD_BYTES};
pub use config::{MemoryConfig, DEFAULT_ADDRESS_BITS};
pub use error::{MemoryError, Result};
pub use hash::{empty_root, Sha3Hasher};
pub use tree::{MerkleMemory, RecomputeStats};

/// Re-export alloy primitives for convenience
pub use alloy_primitives::B256;
