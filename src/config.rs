//! Construction parameters.

use crate::{
    address::{MAX_ADDRESS_BITS, MIN_ADDRESS_BITS},
    block::BLOCK_BYTES,
    error::Result,
    MemoryError,
};

/// Address width used by [`MemoryConfig::default`] (8192 leaves, 256 KiB of data).
pub const DEFAULT_ADDRESS_BITS: u32 = 13;

/// Geometry of a [`crate::MerkleMemory`].
///
/// The tree has `2^address_bits` leaves of 32 bytes each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MemoryConfig {
    /// log2 of the number of leaves.
    pub address_bits: u32,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS_BITS)
    }
}

impl MemoryConfig {
    /// Create a config for `2^address_bits` leaves. Not validated until used.
    pub const fn new(address_bits: u32) -> Self {
        Self { address_bits }
    }

    /// Check that the address width is supported.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_ADDRESS_BITS..=MAX_ADDRESS_BITS).contains(&self.address_bits) {
            return Err(MemoryError::AddressBitsOutOfRange {
                bits: self.address_bits,
                min: MIN_ADDRESS_BITS,
                max: MAX_ADDRESS_BITS,
            });
        }
        Ok(())
    }

    /// Number of leaf slots. Only meaningful for a validated config.
    pub const fn capacity(&self) -> usize {
        1usize << self.address_bits
    }

    /// Size of the byte-addressable data region.
    pub const fn leaf_bytes(&self) -> usize {
        self.capacity() * BLOCK_BYTES
    }

    /// Size of the whole slot array (leaves plus internal nodes).
    pub const fn storage_bytes(&self) -> usize {
        2 * self.leaf_bytes()
    }
}
