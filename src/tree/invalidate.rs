//! Write-time invalidation of ancestor hashes.

use alloy_primitives::B256;
use tracing::trace;

use crate::address::LeafIndex;

use super::MerkleMemory;

impl MerkleMemory {
    /// Mark every ancestor of `leaf` stale, walking toward the root.
    ///
    /// Stops at the first ancestor that is already stale. Every ancestor of a
    /// stale node is itself stale, so nothing above it needs touching.
    ///
    /// The stored hash is zeroed as well so a stale slot never exposes an
    /// outdated digest. Leaves are never touched.
    pub(super) fn invalidate(&mut self, leaf: LeafIndex) {
        let mut invalidated = 0usize;
        for node in leaf.node(self.capacity).ancestors() {
            let index = node.get();
            if self.stale[index] {
                break;
            }
            self.stale.set(index, true);
            self.slots[index] = B256::ZERO;
            invalidated += 1;
        }
        trace!(leaf = leaf.0, invalidated, "invalidated ancestors");
    }
}
