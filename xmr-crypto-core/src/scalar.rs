//! Scalar operations modulo the group order ℓ
//!
//! ℓ = 2^252 + 27742317777372353535851937790883648493

use curve25519_dalek::Scalar;
use rand_core::{CryptoRng, RngCore};
use tracing::trace;

pub use crate::hash::hash_to_scalar;

/// 15·ℓ, the largest multiple of ℓ below 2^256, little-endian
const FIFTEEN_L: [u8; 32] = [
    0xe3, 0x6a, 0x67, 0x72, 0x8b, 0xce, 0x13, 0x29, 0x8f, 0x30, 0x82, 0x8c, 0x0b, 0xa4, 0x10, 0x39,
    0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf0,
];

/// Reduce 32 little-endian bytes mod ℓ (`sc_reduce32`).
#[must_use]
pub fn reduce(bytes: &[u8; 32]) -> [u8; 32] {
    Scalar::from_bytes_mod_order(*bytes).to_bytes()
}

/// True iff `bytes` encodes an integer strictly below ℓ (`sc_check`).
#[must_use]
pub fn scalar_check(bytes: &[u8; 32]) -> bool {
    canonical_scalar(bytes).is_some()
}

/// Decode a canonical scalar, `None` if `bytes >= ℓ`.
#[must_use]
pub fn canonical_scalar(bytes: &[u8; 32]) -> Option<Scalar> {
    Option::from(Scalar::from_canonical_bytes(*bytes))
}

/// Compare two little-endian 256-bit integers.
fn lt_le(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().rev().lt(b.iter().rev())
}

/// Uniform non-zero scalar.
///
/// Draws 32 bytes and rejects anything at or above 15·ℓ so the reduction is
/// unbiased, then rejects zero.
pub fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
    loop {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        if !lt_le(&bytes, &FIFTEEN_L) {
            trace!("random scalar draw above 15l, retrying");
            continue;
        }
        let s = Scalar::from_bytes_mod_order(bytes);
        if s == Scalar::ZERO {
            trace!("random scalar draw reduced to zero, retrying");
            continue;
        }
        return s;
    }
}
