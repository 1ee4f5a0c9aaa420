//! Leaf data encoding.
//!
//! A leaf slot holds 8 words of 32 bits. Each word is stored little-endian at
//! byte offset `4 * word` of the slot, so block, word and byte views of the same
//! leaf agree on every host.

use alloy_primitives::B256;

/// Number of 32-bit words in a leaf.
pub const WORDS_PER_BLOCK: usize = 8;

/// Bytes per word.
pub const WORD_BYTES: usize = 4;

/// Bytes per leaf (and per hash).
pub const BLOCK_BYTES: usize = WORDS_PER_BLOCK * WORD_BYTES;

/// Contents of one leaf as words.
pub type Block = [u32; WORDS_PER_BLOCK];

/// Encode a block into its 32-byte slot representation.
pub fn encode_block(block: &Block) -> B256 {
    let mut bytes = [0u8; BLOCK_BYTES];
    for (chunk, word) in bytes.chunks_exact_mut(WORD_BYTES).zip(block) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    B256::from(bytes)
}

/// Decode a 32-byte slot into words.
pub fn decode_block(slot: &B256) -> Block {
    let mut block = [0u32; WORDS_PER_BLOCK];
    for (word, chunk) in block.iter_mut().zip(slot.0.chunks_exact(WORD_BYTES)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    block
}

/// Read the word starting at byte `offset` of a slot. `offset` must be word aligned.
pub(crate) fn read_word(slot: &B256, offset: usize) -> u32 {
    debug_assert_eq!(offset % WORD_BYTES, 0);
    let b = &slot.0[offset..offset + WORD_BYTES];
    u32::from_le_bytes([b[0], b[1], b[2], b[3]])
}

/// Overwrite the word starting at byte `offset` of a slot.
pub(crate) fn write_word(slot: &mut B256, offset: usize, value: u32) {
    debug_assert_eq!(offset % WORD_BYTES, 0);
    slot.0[offset..offset + WORD_BYTES].copy_from_slice(&value.to_le_bytes());
}
