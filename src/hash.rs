//! Node hashing.
//!
//! The tree is hashed with SHA3-256 only. Two node shapes exist:
//! - leaf parent: `H(H(left_leaf) || H(right_leaf))`
//! - interior node: `H(left_hash || right_hash)`
//!
//! Hashing each raw leaf before combining keeps leaf data and internal hashes in
//! separate value spaces.

use alloy_primitives::B256;
use sha3::{Digest, Sha3_256};

use crate::{config::MemoryConfig, error::Result};

/// SHA3-256 node hasher.
#[derive(Clone, Copy, Default, Debug)]
pub struct Sha3Hasher;

impl Sha3Hasher {
    /// Hash a single 32-byte value.
    pub fn hash_32(&self, value: &B256) -> B256 {
        B256::from_slice(&Sha3_256::digest(value.as_slice()))
    }

    /// Hash the 64-byte concatenation `left || right`.
    pub fn hash_64(&self, left: &B256, right: &B256) -> B256 {
        let mut hasher = Sha3_256::new();
        hasher.update(left.as_slice());
        hasher.update(right.as_slice());
        B256::from_slice(&hasher.finalize())
    }

    /// Hash of a node whose children are both raw leaves.
    pub fn hash_leaf_pair(&self, left: &B256, right: &B256) -> B256 {
        self.hash_64(&self.hash_32(left), &self.hash_32(right))
    }
}

/// Root of a tree of `2^address_bits` all-zero leaves.
///
/// Every subtree of an all-zero tree is identical, so one hash per level is enough.
pub fn empty_root(address_bits: u32) -> Result<B256> {
    MemoryConfig::new(address_bits).validate()?;
    let hasher = Sha3Hasher;
    let mut node = hasher.hash_leaf_pair(&B256::ZERO, &B256::ZERO);
    for _ in 1..address_bits {
        node = hasher.hash_64(&node, &node);
    }
    Ok(node)
}
