//! Main memory implementation.
//!
//! This module provides [`MerkleMemory`], a flat array of 32-byte leaves kept
//! under a binary SHA3-256 hash tree. It supports:
//!
//! - O(1) block, word and byte reads
//! - Writes that invalidate the leaf's ancestors in O(log n) worst case, stopping
//!   at the first ancestor that is already stale
//! - Deferred hash recomputation in a single bottom-up sweep
//!   ([`MerkleMemory::recompute`]) that only touches stale nodes
//!
//! # Reading hashes
//!
//! [`MerkleMemory::root`] and [`MerkleMemory::node_hash`] return whatever is
//! stored in the slot. They are only meaningful right after
//! [`MerkleMemory::recompute`]; a stale slot reads as [`B256::ZERO`]. Use
//! [`MerkleMemory::verified_root`] to have that precondition checked.
//!
//! # Performance Characteristics
//!
//! | Operation | Cost |
//! |-----------|------|
//! | read      | O(1) |
//! | write     | O(log C) worst case, O(1) when the parent is already stale |
//! | `recompute` | O(number of stale nodes) hashes plus O(C) tag checks |
//!
//! Where C = capacity (number of leaves).

mod hash;
mod invalidate;

pub use hash::RecomputeStats;

use alloy_primitives::B256;
use bitvec::vec::BitVec;
use std::fmt;
use tracing::debug;

use crate::{
    address::{block_leaf, byte_location, word_location, LeafIndex, NodeIndex},
    block::{self, decode_block, encode_block, Block},
    config::MemoryConfig,
    error::Result,
    MemoryError, Sha3Hasher,
};

/// Fixed-capacity memory committed to by a Merkle root.
///
/// Storage is a single `2 * capacity` slot array in heap order: slot 1 is the
/// root, slots `[capacity, 2 * capacity)` are the leaves and slot 0 is unused.
/// Leaves hold raw data; internal slots hold hashes. Each internal node also has
/// a staleness bit, so a computed hash is never confused with "needs recompute".
#[derive(Clone)]
pub struct MerkleMemory {
    config: MemoryConfig,
    /// Number of leaves, `2^address_bits`
    capacity: usize,
    /// Heap-ordered slots: internal hashes in `[1, capacity)`, leaves after
    slots: Vec<B256>,
    /// Staleness of internal node `i` is bit `i`; bit 0 is unused
    stale: BitVec,
    hasher: Sha3Hasher,
}

impl MerkleMemory {
    /// Create a zeroed memory with `2^address_bits` leaves.
    ///
    /// Every internal node starts stale, so the first [`MerkleMemory::recompute`]
    /// hashes the whole tree.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::AddressBitsOutOfRange`] if `address_bits` is not in
    /// `MIN_ADDRESS_BITS..=MAX_ADDRESS_BITS`, or [`MemoryError::AllocationFailed`]
    /// if the storage cannot be reserved.
    ///
    /// # Example
    /// ```
    /// use merkle_memory::{empty_root, MerkleMemory};
    /// let mut memory = MerkleMemory::new(3).unwrap();
    /// memory.recompute();
    /// assert_eq!(memory.root(), empty_root(3).unwrap());
    /// ```
    pub fn new(address_bits: u32) -> Result<Self> {
        Self::with_config(MemoryConfig::new(address_bits))
    }

    /// Create a zeroed memory from a config.
    pub fn with_config(config: MemoryConfig) -> Result<Self> {
        config.validate()?;
        let capacity = config.capacity();

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(2 * capacity)
            .map_err(|_| MemoryError::AllocationFailed {
                bytes: config.storage_bytes(),
            })?;
        slots.resize(2 * capacity, B256::ZERO);

        debug!(
            address_bits = config.address_bits,
            capacity,
            bytes = config.storage_bytes(),
            "allocated merkle memory"
        );

        Ok(Self {
            config,
            capacity,
            slots,
            stale: BitVec::repeat(true, capacity),
            hasher: Sha3Hasher,
        })
    }

    /// The config this memory was built from.
    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Number of leaves.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn address_bits(&self) -> u32 {
        self.config.address_bits
    }

    /// Size of the byte-addressable region. Addresses wrap at this length.
    pub fn byte_len(&self) -> usize {
        self.config.leaf_bytes()
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Write a full leaf. `address` is a byte address; its 32-byte block is written.
    pub fn write_block(&mut self, address: u32, value: &Block) {
        let leaf = block_leaf(address, self.capacity);
        *self.leaf_mut(leaf) = encode_block(value);
        self.invalidate(leaf);
    }

    /// Write the 32-bit word containing byte address `address`.
    pub fn write_word(&mut self, address: u32, value: u32) {
        let loc = word_location(address, self.capacity);
        block::write_word(self.leaf_mut(loc.leaf), loc.offset, value);
        self.invalidate(loc.leaf);
    }

    /// Write a single byte.
    pub fn write_byte(&mut self, address: u32, value: u8) {
        let loc = byte_location(address, self.capacity);
        self.leaf_mut(loc.leaf).0[loc.offset] = value;
        self.invalidate(loc.leaf);
    }

    /// Like [`MerkleMemory::write_block`] but rejects addresses past the region.
    pub fn write_block_checked(&mut self, address: u32, value: &Block) -> Result<()> {
        self.check_address(address)?;
        self.write_block(address, value);
        Ok(())
    }

    /// Like [`MerkleMemory::write_word`] but rejects addresses past the region.
    pub fn write_word_checked(&mut self, address: u32, value: u32) -> Result<()> {
        self.check_address(address)?;
        self.write_word(address, value);
        Ok(())
    }

    /// Like [`MerkleMemory::write_byte`] but rejects addresses past the region.
    pub fn write_byte_checked(&mut self, address: u32, value: u8) -> Result<()> {
        self.check_address(address)?;
        self.write_byte(address, value);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Reads (never invalidate)
    // ------------------------------------------------------------------

    /// Read the leaf containing byte address `address`.
    #[must_use]
    pub fn read_block(&self, address: u32) -> Block {
        decode_block(self.leaf(block_leaf(address, self.capacity)))
    }

    /// Read the 32-bit word containing byte address `address`.
    #[must_use]
    pub fn read_word(&self, address: u32) -> u32 {
        let loc = word_location(address, self.capacity);
        block::read_word(self.leaf(loc.leaf), loc.offset)
    }

    #[must_use]
    pub fn read_byte(&self, address: u32) -> u8 {
        let loc = byte_location(address, self.capacity);
        self.leaf(loc.leaf).0[loc.offset]
    }

    pub fn read_block_checked(&self, address: u32) -> Result<Block> {
        self.check_address(address)?;
        Ok(self.read_block(address))
    }

    pub fn read_word_checked(&self, address: u32) -> Result<u32> {
        self.check_address(address)?;
        Ok(self.read_word(address))
    }

    pub fn read_byte_checked(&self, address: u32) -> Result<u8> {
        self.check_address(address)?;
        Ok(self.read_byte(address))
    }

    // ------------------------------------------------------------------
    // Hashes
    // ------------------------------------------------------------------

    /// The root slot. Only meaningful immediately after [`MerkleMemory::recompute`].
    #[must_use]
    pub fn root(&self) -> B256 {
        self.slots[NodeIndex::ROOT.get()]
    }

    /// The stored hash of an internal node, or `None` if `index` is not in
    /// `[1, capacity)`. Only meaningful immediately after [`MerkleMemory::recompute`].
    #[must_use]
    pub fn node_hash(&self, index: NodeIndex) -> Option<B256> {
        index
            .is_internal(self.capacity)
            .then(|| self.slots[index.get()])
    }

    /// The root, or [`MemoryError::StaleNode`] if it has not been recomputed
    /// since the last write.
    pub fn verified_root(&self) -> Result<B256> {
        self.verified_node_hash(NodeIndex::ROOT)
    }

    /// Checked form of [`MerkleMemory::node_hash`].
    pub fn verified_node_hash(&self, index: NodeIndex) -> Result<B256> {
        if !index.is_internal(self.capacity) {
            return Err(MemoryError::InvalidNodeIndex {
                index: index.get(),
                capacity: self.capacity,
            });
        }
        if self.stale[index.get()] {
            return Err(MemoryError::StaleNode { index: index.get() });
        }
        Ok(self.slots[index.get()])
    }

    /// Whether an internal node must be recomputed before its hash is trusted.
    /// Always `false` for indices outside `[1, capacity)`.
    pub fn is_stale(&self, index: NodeIndex) -> bool {
        index.is_internal(self.capacity) && self.stale[index.get()]
    }

    /// Number of stale internal nodes.
    pub fn stale_count(&self) -> usize {
        self.stale[1..].count_ones()
    }

    /// Whether every internal hash is current.
    pub fn is_clean(&self) -> bool {
        self.stale[1..].not_any()
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn leaf(&self, leaf: LeafIndex) -> &B256 {
        &self.slots[leaf.node(self.capacity).get()]
    }

    fn leaf_mut(&mut self, leaf: LeafIndex) -> &mut B256 {
        &mut self.slots[leaf.node(self.capacity).get()]
    }

    fn check_address(&self, address: u32) -> Result<()> {
        // byte_len is at most 2^29, always representable
        let limit = self.byte_len() as u32;
        if address >= limit {
            return Err(MemoryError::AddressOutOfRange { address, limit });
        }
        Ok(())
    }
}

impl fmt::Debug for MerkleMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MerkleMemory")
            .field("address_bits", &self.config.address_bits)
            .field("capacity", &self.capacity)
            .field("stale", &self.stale_count())
            .field("root", &format_args!("0x{}", hex::encode(self.root())))
            .finish()
    }
}
