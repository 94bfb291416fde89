//! Keccak-256 domain hashing
//!
//! Monero's `cn_fast_hash` is the original Keccak submission (pad byte `0x01`),
//! not FIPS-202 SHA3-256. `sha3::Keccak256` is exactly that variant.

use curve25519_dalek::Scalar;
use sha3::{Digest, Keccak256};

/// Keccak-256 of `data`.
#[must_use]
pub fn fast_hash(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Keccak-256 over the concatenation of `parts`, without allocating.
#[must_use]
pub fn fast_hash_parts(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// `Hs(data)`: Keccak-256 reduced mod ℓ.
#[must_use]
pub fn hash_to_scalar(data: &[u8]) -> Scalar {
    Scalar::from_bytes_mod_order(fast_hash(data))
}

/// `Hs` over the concatenation of `parts`.
#[must_use]
pub(crate) fn hash_parts_to_scalar(parts: &[&[u8]]) -> Scalar {
    Scalar::from_bytes_mod_order(fast_hash_parts(parts))
}
