//! Hash recomputation for [`MerkleMemory`].

use tracing::debug;

use crate::address::NodeIndex;

use super::MerkleMemory;

/// Number of nodes hashed by one [`MerkleMemory::recompute`] sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecomputeStats {
    /// Nodes whose children are leaves
    pub leaf_parents: usize,
    /// Nodes whose children are internal
    pub interior: usize,
}

impl RecomputeStats {
    pub fn total(&self) -> usize {
        self.leaf_parents + self.interior
    }
}

impl MerkleMemory {
    /// Bring every stale internal hash up to date.
    ///
    /// Runs bottom-up in two phases:
    /// 1. leaf parents `[capacity / 2, capacity)`: `H(H(left) || H(right))` over raw leaves
    /// 2. interior nodes `[1, capacity / 2)`: `H(left || right)` over child hashes
    ///
    /// Indices are visited in descending order, so both children of a node
    /// (`2i`, `2i + 1`) are final before the node itself. Clean nodes are skipped.
    ///
    /// Calling this twice with no write in between hashes nothing the second time.
    pub fn recompute(&mut self) -> RecomputeStats {
        let half = self.capacity / 2;
        let mut stats = RecomputeStats::default();

        for index in (half..self.capacity).rev() {
            if !self.stale[index] {
                continue;
            }
            let node = NodeIndex(index);
            let hash = self.hasher.hash_leaf_pair(
                &self.slots[node.left().get()],
                &self.slots[node.right().get()],
            );
            self.slots[index] = hash;
            self.stale.set(index, false);
            stats.leaf_parents += 1;
        }

        for index in (1..half).rev() {
            if !self.stale[index] {
                continue;
            }
            let node = NodeIndex(index);
            let hash = self.hasher.hash_64(
                &self.slots[node.left().get()],
                &self.slots[node.right().get()],
            );
            self.slots[index] = hash;
            self.stale.set(index, false);
            stats.interior += 1;
        }

        debug!(
            leaf_parents = stats.leaf_parents,
            interior = stats.interior,
            "recomputed merkle hashes"
        );
        stats
    }
}
