#![no_main]

use libfuzzer_sys::fuzz_target;
use merkle_memory::MerkleMemory;

/// Fuzz arbitrary memory operations
/// Tests that no sequence of writes, reads and recomputes panics, and that the
/// incrementally maintained root matches a rebuild from the final contents
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // First byte picks the size: 1..=8 address bits
    let bits = u32::from(data[0] % 8) + 1;
    let mut memory = MerkleMemory::new(bits).unwrap();

    // Interpret the rest as 9-byte operations: op, address (4), value (4)
    for chunk in data[1..].chunks_exact(9) {
        let address = u32::from_le_bytes(chunk[1..5].try_into().unwrap());
        let value = u32::from_le_bytes(chunk[5..9].try_into().unwrap());

        match chunk[0] % 7 {
            0 => memory.write_block(address, &[value; 8]),
            1 => memory.write_word(address, value),
            2 => memory.write_byte(address, value as u8),
            3 => {
                let _ = memory.read_block(address);
            }
            4 => {
                let low = memory.read_word(address).to_le_bytes()[0];
                assert_eq!(low, memory.read_byte(address & !3));
            }
            5 => {
                memory.recompute();
                assert!(memory.verified_root().is_ok());
            }
            6 => {
                let _ = memory.write_word_checked(address, value);
            }
            _ => unreachable!(),
        }
    }

    memory.recompute();

    let mut rebuilt = MerkleMemory::new(bits).unwrap();
    for leaf in 0..memory.capacity() as u32 {
        rebuilt.write_block(leaf * 32, &memory.read_block(leaf * 32));
    }
    rebuilt.recompute();
    assert_eq!(memory.root(), rebuilt.root());
});
