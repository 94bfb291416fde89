//! Shared helpers for integration tests

#![allow(dead_code)]

use rand_core::{CryptoRng, RngCore};

/// Deterministic RNG: a Keccak-f[1600] state seeded with `0x2a` bytes.
///
/// Every request permutes the state once and returns a prefix of its
/// little-endian serialization, so each `fill_bytes` call is independent of
/// the requested length.
pub struct KeccakRng {
    state: [u64; 25],
}

impl KeccakRng {
    pub fn new() -> Self {
        Self {
            state: [0x2a2a_2a2a_2a2a_2a2a; 25],
        }
    }
}

impl RngCore for KeccakRng {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        assert!(dest.len() <= 200, "KeccakRng serves at most 200 bytes per call");
        keccak::f1600(&mut self.state);
        let mut out = [0u8; 200];
        for (chunk, lane) in out.chunks_exact_mut(8).zip(self.state.iter()) {
            chunk.copy_from_slice(&lane.to_le_bytes());
        }
        dest.copy_from_slice(&out[..dest.len()]);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for KeccakRng {}

pub fn bytes32(hex_str: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    hex::decode_to_slice(hex_str, &mut out).unwrap();
    out
}
