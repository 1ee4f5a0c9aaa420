//! Error types for the merkle memory crate.

use thiserror::Error;

/// Errors that can occur while building or querying a [`crate::MerkleMemory`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// Address width outside the supported range
    #[error("address bits {bits} out of range (expected {min}..={max})")]
    AddressBitsOutOfRange { bits: u32, min: u32, max: u32 },

    /// Storage array could not be reserved
    #[error("failed to allocate {bytes} bytes of tree storage")]
    AllocationFailed { bytes: usize },

    /// Address rejected by a bounds-checked accessor
    #[error("address {address:#x} out of range (limit {limit:#x})")]
    AddressOutOfRange { address: u32, limit: u32 },

    /// Node index outside the internal range `[1, capacity)`
    #[error("node index {index} is not an internal node (capacity {capacity})")]
    InvalidNodeIndex { index: usize, capacity: usize },

    /// Hash read before the node was recomputed
    #[error("node {index} is stale; call recompute() before reading hashes")]
    StaleNode { index: usize },
}

/// Result type alias for merkle memory operations.
pub type Result<T> = std::result::Result<T, MemoryError>;
