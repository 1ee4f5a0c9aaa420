//! Reference model and invariant checking for merkle memory simulation.
//!
//! The key invariant: after `recompute()`, the incrementally maintained root
//! equals the root of a full rebuild over the reference model's bytes.

use merkle_memory::{MerkleMemory, B256};
use sha3::{Digest, Sha3_256};

/// A violation of an expected invariant during simulation.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    pub operation_index: u64,
    pub description: String,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invariant violation at op {}: {} (expected: {}, actual: {})",
            self.operation_index, self.description, self.expected, self.actual
        )
    }
}

impl std::error::Error for InvariantViolation {}

/// Operation types for memory simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryOperation {
    WriteBlock { address: u32, value: [u32; 8] },
    WriteWord { address: u32, value: u32 },
    WriteByte { address: u32, value: u8 },
    ReadBlock { address: u32 },
    ReadWord { address: u32 },
    ReadByte { address: u32 },
    Recompute,
}

/// Plain byte array model with no hash caching.
#[derive(Debug, Clone)]
pub struct ReferenceModel {
    bytes: Vec<u8>,
}

impl ReferenceModel {
    pub fn new(address_bits: u32) -> Self {
        Self {
            bytes: vec![0u8; (1usize << address_bits) * 32],
        }
    }

    fn mask(&self, address: u32) -> usize {
        address as usize & (self.bytes.len() - 1)
    }

    pub fn apply(&mut self, op: &MemoryOperation) {
        match *op {
            MemoryOperation::WriteBlock { address, ref value } => {
                let base = self.mask(address) & !31;
                for (i, word) in value.iter().enumerate() {
                    let start = base + 4 * i;
                    self.bytes[start..start + 4].copy_from_slice(&word.to_le_bytes());
                }
            }
            MemoryOperation::WriteWord { address, value } => {
                let base = self.mask(address) & !3;
                self.bytes[base..base + 4].copy_from_slice(&value.to_le_bytes());
            }
            MemoryOperation::WriteByte { address, value } => {
                let index = self.mask(address);
                self.bytes[index] = value;
            }
            _ => {}
        }
    }

    pub fn block(&self, address: u32) -> [u32; 8] {
        let base = self.mask(address) & !31;
        let mut block = [0u32; 8];
        for (i, word) in block.iter_mut().enumerate() {
            *word = self.word_at(base + 4 * i);
        }
        block
    }

    pub fn word(&self, address: u32) -> u32 {
        self.word_at(self.mask(address) & !3)
    }

    pub fn byte(&self, address: u32) -> u8 {
        self.bytes[self.mask(address)]
    }

    fn word_at(&self, index: usize) -> u32 {
        let b = &self.bytes[index..index + 4];
        u32::from_le_bytes([b[0], b[1], b[2], b[3]])
    }

    /// Root of a full rebuild, hashed level by level.
    pub fn root(&self) -> B256 {
        let mut level: Vec<[u8; 32]> = self
            .bytes
            .chunks(64)
            .map(|pair| sha3_pair(&sha3(&pair[..32]), &sha3(&pair[32..])))
            .collect();
        while level.len() > 1 {
            level = level
                .chunks(2)
                .map(|pair| sha3_pair(&pair[0], &pair[1]))
                .collect();
        }
        B256::from(level[0])
    }
}

fn sha3(data: &[u8]) -> [u8; 32] {
    Sha3_256::digest(data).into()
}

fn sha3_pair(left: &[u8], right: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// Compare the memory's root against a full rebuild of the model.
pub fn verify_root(
    operation_index: u64,
    memory: &MerkleMemory,
    model: &ReferenceModel,
) -> Result<(), InvariantViolation> {
    let actual = memory.verified_root().map_err(|e| InvariantViolation {
        operation_index,
        description: "Root not recomputed".to_string(),
        expected: "clean root".to_string(),
        actual: e.to_string(),
    })?;
    let expected = model.root();

    if actual != expected {
        return Err(InvariantViolation {
            operation_index,
            description: "Root hash mismatch".to_string(),
            expected: format!("{:?}", expected),
            actual: format!("{:?}", actual),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use merkle_memory::empty_root;

    #[test]
    fn test_model_zero_root() {
        for bits in 1..6 {
            assert_eq!(ReferenceModel::new(bits).root(), empty_root(bits).unwrap());
        }
    }

    #[test]
    fn test_model_wraps() {
        let mut model = ReferenceModel::new(3);
        model.apply(&MemoryOperation::WriteByte { address: 256 + 5, value: 1 });
        assert_eq!(model.byte(5), 1);
        assert_eq!(model.word(4), 0x0000_0100);
    }
}
